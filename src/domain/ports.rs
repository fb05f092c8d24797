use crate::domain::model::CardFeatures;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Boundary to the image-analysis collaborator. Card recognition only needs
/// two answers from it: the detected features of a scan, and a perceptual
/// hash for an arbitrary image so candidates can be ranked against the scan.
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn extract_features(&self, image: &[u8]) -> Result<CardFeatures>;

    async fn image_hash(&self, image: &[u8]) -> Result<u64>;
}
