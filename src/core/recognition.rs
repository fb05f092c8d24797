use crate::core::app::App;
use crate::domain::model::{
    BorderType, CardFeatures, FrameColor, FrameStyle, RecognitionResult, ScryfallCard,
};
use crate::utils::error::{Result, VaultError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

const MAX_CANDIDATES: usize = 10;

/// Builds a Scryfall query from detected visual features. Undetectable
/// features contribute nothing; a fully unknown card searches everything.
pub fn build_search_query(features: &CardFeatures) -> String {
    let mut parts: Vec<&str> = Vec::new();

    match features.frame_color {
        FrameColor::Blue => parts.push("c:u"),
        FrameColor::Red => parts.push("c:r"),
        FrameColor::Green => parts.push("c:g"),
        FrameColor::White => parts.push("c:w"),
        FrameColor::Black => parts.push("c:b"),
        FrameColor::Gold => parts.push("c:m"),
        FrameColor::Land => parts.push("t:land"),
        FrameColor::Unknown => {}
    }

    match features.border_type {
        BorderType::Black => parts.push("border:black"),
        BorderType::White => parts.push("border:white"),
        BorderType::Silver => parts.push("border:silver"),
        BorderType::Unknown => {}
    }

    match features.frame_style {
        FrameStyle::OldFrame => parts.push("frame:old"),
        FrameStyle::ModernFrame => parts.push("frame:modern"),
        FrameStyle::M15Frame => parts.push("frame:2015"),
        FrameStyle::Unknown => {}
    }

    if parts.is_empty() {
        "*".to_string()
    } else {
        parts.join(" ")
    }
}

/// Human-readable rendering of the detected features.
pub fn describe_features(features: &CardFeatures) -> String {
    let mut parts = Vec::new();

    match features.border_type {
        BorderType::Black => parts.push("Black border"),
        BorderType::White => parts.push("White border"),
        BorderType::Silver => parts.push("Silver border"),
        BorderType::Unknown => parts.push("Unknown border"),
    }

    match features.frame_color {
        FrameColor::Blue => parts.push("Blue frame"),
        FrameColor::Red => parts.push("Red frame"),
        FrameColor::Green => parts.push("Green frame"),
        FrameColor::White => parts.push("White frame"),
        FrameColor::Black => parts.push("Black frame"),
        FrameColor::Gold => parts.push("Multicolor frame"),
        FrameColor::Land => parts.push("Land frame"),
        FrameColor::Unknown => parts.push("Unknown frame color"),
    }

    match features.frame_style {
        FrameStyle::OldFrame => parts.push("Old frame style"),
        FrameStyle::ModernFrame => parts.push("Modern frame style"),
        FrameStyle::M15Frame => parts.push("M15 frame style"),
        FrameStyle::Unknown => {}
    }

    if features.has_corner_dots {
        parts.push("Has corner dots");
    }
    if features.is_foil {
        parts.push("Foil");
    }

    parts.join(", ")
}

/// Number of differing bits between two perceptual hashes, 0 to 64.
pub fn hamming_distance(hash1: u64, hash2: u64) -> u32 {
    (hash1 ^ hash2).count_ones()
}

/// Accepts raw base64 or a browser data URL (`data:image/...;base64,...`).
fn decode_image_payload(image_data: &str) -> Result<Vec<u8>> {
    let payload = match image_data.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => image_data,
    };
    STANDARD
        .decode(payload.trim())
        .map_err(|e| VaultError::recognition(format!("Invalid base64 image data: {}", e)))
}

impl App {
    /// Recognizes a captured card image: extracts visual features, searches
    /// Scryfall with a query built from them, and ranks candidates by
    /// perceptual-hash distance to the scan.
    pub async fn recognize_card_with_features(
        &self,
        image_data: &str,
    ) -> Result<RecognitionResult> {
        let extractor = self
            .extractor
            .as_ref()
            .ok_or_else(|| VaultError::recognition("No feature extractor configured"))?;

        let image = decode_image_payload(image_data)?;
        let features = extractor.extract_features(&image).await?;
        let query = build_search_query(&features);
        let description = describe_features(&features);
        tracing::debug!("Recognition query: {} ({})", query, description);

        let page = self.scryfall.search_cards(&query, 1).await?;
        let mut candidates: Vec<ScryfallCard> = Vec::new();
        for mut card in page.data.into_iter().take(MAX_CANDIDATES * 2) {
            if let Some(uris) = &card.image_uris {
                match self.scryfall.fetch_image(&uris.small).await {
                    Ok(bytes) => match extractor.image_hash(&bytes).await {
                        Ok(hash) => {
                            card.similarity = Some(hamming_distance(features.phash, hash));
                        }
                        Err(e) => tracing::warn!("Hash failed for {}: {}", card.name, e),
                    },
                    Err(e) => tracing::warn!("Image fetch failed for {}: {}", card.name, e),
                }
            }
            candidates.push(card);
        }

        // Best matches first, unhashable candidates at the end.
        candidates.sort_by_key(|c| c.similarity.unwrap_or(u32::MAX));
        candidates.truncate(MAX_CANDIDATES);

        Ok(RecognitionResult {
            features,
            description,
            query,
            candidates,
        })
    }
}
