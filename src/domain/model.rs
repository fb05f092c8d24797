use serde::{Deserialize, Serialize};

/// A Magic set as returned by the Scryfall `/sets` endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScryfallSet {
    #[serde(default)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub released_at: Option<String>,
    pub icon_svg_uri: Option<String>,
    pub set_type: Option<String>,
    pub card_count: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScryfallSetList {
    pub data: Vec<ScryfallSet>,
    pub has_more: bool,
}

/// One page of a Scryfall card search.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScryfallCardList {
    pub data: Vec<ScryfallCard>,
    pub has_more: bool,
    pub total_cards: Option<i32>,
}

/// A single printing as returned by Scryfall.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScryfallCard {
    pub id: String,
    pub oracle_id: Option<String>,
    pub name: String,
    pub lang: Option<String>,
    pub set: String,
    pub set_name: String,
    pub collector_number: String,
    pub released_at: String,
    pub artist: Option<String>,
    pub image_uris: Option<ImageUris>,
    pub prices: Prices,
    pub rarity: String,
    /// Hamming distance to a scanned image, filled in by recognition. Lower
    /// is better. Never part of the Scryfall payload itself.
    #[serde(default, skip_deserializing)]
    pub similarity: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageUris {
    pub small: String,
    pub normal: String,
    pub large: String,
    pub png: String,
    pub art_crop: String,
    pub border_crop: String,
}

/// Scryfall publishes prices as decimal strings, absent when unknown.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
}

/// A card the user owns.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CollectionCard {
    pub id: String,
    pub scryfall_id: String,
    pub name: String,
    pub set_code: String,
    pub collector_number: String,
    pub condition: String,
    pub language: String,
    pub finish: String,
    pub purchase_price: f64,
    pub current_price: f64,
    pub quantity: i32,
    pub is_foil: bool,
    pub image_uri: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
}

/// A card the user wants but does not own.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WishlistCard {
    pub id: String,
    pub scryfall_id: String,
    pub name: String,
    pub set_code: String,
    pub collector_number: String,
    pub image_uri: Option<String>,
    pub target_price: Option<f64>,
    pub notes: Option<String>,
    pub added_date: String,
    pub priority: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Arguments for adding a card to the collection. Field names are the wire
/// format used by the invoke bridge, so they stay snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCardArgs {
    pub scryfall_id: String,
    pub condition: String,
    pub purchase_price: f64,
    pub quantity: i32,
    pub is_foil: bool,
    pub language: String,
    pub finish: Option<String>,
    /// "Name:Color" strings; tags are created when absent.
    pub tags: Option<Vec<String>>,
}

/// Optional server-side filtering for `get_collection`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionFilter {
    pub name: Option<String>,
    pub set_code: Option<String>,
    pub condition: Option<String>,
    pub tag_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CardPerformance {
    pub id: String,
    pub name: String,
    pub set_code: String,
    pub quantity: i32,
    pub purchase_price: f64,
    pub current_price: f64,
    pub total_gain: f64,
    pub roi_percentage: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_investment: f64,
    pub total_value: f64,
    pub total_gain: f64,
    pub total_roi_percentage: f64,
    pub top_winners: Vec<CardPerformance>,
    pub top_losers: Vec<CardPerformance>,
}

/// One recorded market price for a card.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
    pub currency: String,
}

/// Collection-wide value on one date.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PortfolioPoint {
    pub date: String,
    pub total_value: f64,
    pub total_investment: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarketTrends {
    pub standard_staples: Vec<ScryfallCard>,
    pub modern_staples: Vec<ScryfallCard>,
    pub commander_popularity: Vec<ScryfallCard>,
    pub new_hot: Vec<ScryfallCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BorderType {
    Black,
    White,
    Silver,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FrameColor {
    Black,
    Blue,
    Red,
    Green,
    White,
    Gold,
    Land,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FrameStyle {
    OldFrame,
    ModernFrame,
    M15Frame,
    Unknown,
}

/// Visual features detected on a scanned card image. Produced by the
/// feature-extraction collaborator, consumed by recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFeatures {
    pub border_type: BorderType,
    pub frame_color: FrameColor,
    pub frame_style: FrameStyle,
    pub has_corner_dots: bool,
    pub is_foil: bool,
    /// 64-bit perceptual hash of the scanned image.
    pub phash: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub features: CardFeatures,
    pub description: String,
    pub query: String,
    pub candidates: Vec<ScryfallCard>,
}

/// Progress tick for long-running imports. `current == total` is terminal;
/// consumers must also tolerate an operation finishing without any ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressEvent {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Known physical print variants, value and display label.
pub const CARD_FINISHES: &[(&str, &str)] = &[
    ("nonfoil", "Non-foil"),
    ("foil", "Foil"),
    ("etched", "Etched Foil"),
    ("showcase", "Showcase"),
    ("extended_art", "Extended Art"),
    ("borderless", "Borderless"),
    ("full_art", "Full Art"),
    ("promo", "Promo"),
    ("prerelease", "Prerelease"),
    ("buy_a_box", "Buy-a-Box"),
    ("fnm", "FNM Promo"),
    ("serialized", "Serialized"),
    ("gilded", "Gilded Foil"),
    ("textured", "Textured Foil"),
];

pub fn finish_label(finish: &str) -> &str {
    CARD_FINISHES
        .iter()
        .find(|(value, _)| *value == finish)
        .map(|(_, label)| *label)
        .unwrap_or(finish)
}

/// A finish counts as foil exactly when it names a foil variant: the string
/// contains "foil" but is not the non-foil literal itself.
pub fn is_foil_finish(finish: &str) -> bool {
    let normalized = finish.to_ascii_lowercase();
    normalized.contains("foil")
        && !normalized.contains("nonfoil")
        && !normalized.contains("non-foil")
}
