use crate::adapters::store::tags;
use crate::core::app::App;
use crate::domain::model::Tag;
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

impl App {
    pub async fn create_tag(&self, name: &str, color: &str) -> Result<i64> {
        validate_non_empty_string("name", name)?;
        validate_non_empty_string("color", color)?;
        let db = self.db()?;
        tags::create_tag(&db, name, color)
    }

    pub async fn delete_tag(&self, id: i64) -> Result<()> {
        let db = self.db()?;
        tags::delete_tag(&db, id)
    }

    pub async fn get_all_tags(&self) -> Result<Vec<Tag>> {
        let db = self.db()?;
        tags::get_all_tags(&db)
    }

    pub async fn get_card_tags(&self, card_id: &str) -> Result<Vec<Tag>> {
        let db = self.db()?;
        tags::get_card_tags(&db, card_id)
    }

    pub async fn add_tag_to_card(&self, card_id: &str, tag_id: i64) -> Result<()> {
        let db = self.db()?;
        tags::add_tag_to_card(&db, card_id, tag_id)
    }

    pub async fn remove_tag_from_card(&self, card_id: &str, tag_id: i64) -> Result<()> {
        let db = self.db()?;
        tags::remove_tag_from_card(&db, card_id, tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scryfall::ScryfallClient;
    use crate::adapters::store::collection::{insert_card, test_support};
    use crate::adapters::store::open_in_memory;
    use httpmock::MockServer;

    fn test_app(server: &MockServer) -> App {
        App::new(
            open_in_memory().unwrap(),
            ScryfallClient::with_base_url(server.base_url()),
        )
    }

    #[tokio::test]
    async fn test_tag_lifecycle_through_app() {
        let server = MockServer::start();
        let app = test_app(&server);
        {
            let db = app.db().unwrap();
            let card = test_support::scryfall_card("sc-1", "Bolt");
            insert_card(&db, "u1", &card, &test_support::add_args("sc-1")).unwrap();
        }

        let tag_id = app.create_tag("Burn", "#ff0000").await.unwrap();
        app.add_tag_to_card("u1", tag_id).await.unwrap();

        let card_tags = app.get_card_tags("u1").await.unwrap();
        assert_eq!(card_tags.len(), 1);
        assert_eq!(card_tags[0].name, "Burn");

        app.remove_tag_from_card("u1", tag_id).await.unwrap();
        assert!(app.get_card_tags("u1").await.unwrap().is_empty());

        // Tag itself survives until deleted globally.
        assert_eq!(app.get_all_tags().await.unwrap().len(), 1);
        app.delete_tag(tag_id).await.unwrap();
        assert!(app.get_all_tags().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_tag_rejects_empty_name() {
        let server = MockServer::start();
        let app = test_app(&server);
        assert!(app.create_tag("", "#fff").await.is_err());
        assert!(app.create_tag("Burn", "  ").await.is_err());
    }
}
