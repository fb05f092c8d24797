use crate::adapters::store::wishlist;
use crate::core::app::App;
use crate::domain::model::{ScryfallCard, WishlistCard};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;

impl App {
    /// Adds a printing the caller already looked up to the wishlist.
    pub async fn add_to_wishlist(
        &self,
        card: &ScryfallCard,
        target_price: Option<f64>,
        notes: Option<String>,
        priority: i32,
    ) -> Result<String> {
        validate_range("priority", priority, 1, 5)?;
        let db = self.db()?;
        wishlist::add_to_wishlist(&db, card, target_price, notes, priority)
    }

    pub async fn get_wishlist(&self) -> Result<Vec<WishlistCard>> {
        let db = self.db()?;
        wishlist::get_wishlist(&db)
    }

    pub async fn remove_from_wishlist(&self, id: &str) -> Result<()> {
        let db = self.db()?;
        wishlist::remove_from_wishlist(&db, id)
    }

    pub async fn update_wishlist_card(
        &self,
        id: &str,
        target_price: Option<f64>,
        notes: Option<String>,
        priority: i32,
    ) -> Result<()> {
        validate_range("priority", priority, 1, 5)?;
        let db = self.db()?;
        wishlist::update_wishlist_card(&db, id, target_price, notes, priority)
    }
}
