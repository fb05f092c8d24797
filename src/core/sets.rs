use crate::adapters::store::sets;
use crate::core::app::App;
use crate::domain::model::{ScryfallCardList, ScryfallSet};
use crate::utils::error::Result;

/// Progress ticks during a set import fire once per this many sets.
const SET_PROGRESS_STRIDE: usize = 10;

impl App {
    /// Returns the local set catalog, fetching it from Scryfall first when
    /// the catalog is still empty.
    pub async fn get_sets(&self) -> Result<Vec<ScryfallSet>> {
        {
            let db = self.db()?;
            let stored = sets::get_all_sets(&db)?;
            if !stored.is_empty() {
                return Ok(stored);
            }
        }

        let fetched = self.scryfall.fetch_sets().await?;
        let db = self.db()?;
        for set in &fetched {
            sets::insert_set(&db, set)?;
        }
        sets::get_all_sets(&db)
    }

    /// Re-imports the full set catalog from Scryfall, upserting every set.
    pub async fn import_sets(&self) -> Result<String> {
        let fetched = self.scryfall.fetch_sets().await?;
        let total = fetched.len();

        let db = self.db()?;
        for (i, set) in fetched.iter().enumerate() {
            sets::insert_set(&db, set)?;
            let done = i + 1;
            if done % SET_PROGRESS_STRIDE == 0 || done == total {
                self.progress
                    .emit(done, total, format!("Importing set: {}", set.name));
            }
        }

        tracing::info!("Imported {} sets", total);
        Ok(format!("Imported {} sets", total))
    }

    pub async fn get_set_cards(&self, set_code: &str, page: u32) -> Result<ScryfallCardList> {
        self.scryfall.fetch_set_cards(set_code, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scryfall::ScryfallClient;
    use crate::adapters::store::open_in_memory;
    use httpmock::prelude::*;

    fn sets_body(count: usize) -> serde_json::Value {
        let data: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": format!("set-{}", i),
                    "code": format!("s{:02}", i),
                    "name": format!("Set {}", i),
                    "released_at": "2024-01-01",
                    "icon_svg_uri": null,
                    "set_type": "expansion",
                    "card_count": 10
                })
            })
            .collect();
        serde_json::json!({"data": data, "has_more": false})
    }

    fn test_app(server: &MockServer) -> App {
        App::new(
            open_in_memory().unwrap(),
            ScryfallClient::with_base_url(server.base_url()),
        )
    }

    #[tokio::test]
    async fn test_get_sets_fetches_when_empty_then_serves_locally() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/sets");
            then.status(200).json_body(sets_body(3));
        });

        let app = test_app(&server);
        let first = app.get_sets().await.unwrap();
        assert_eq!(first.len(), 3);

        let second = app.get_sets().await.unwrap();
        assert_eq!(second.len(), 3);
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_import_sets_emits_progress_for_final_item() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/sets");
            then.status(200).json_body(sets_body(25));
        });

        let app = test_app(&server);
        let mut rx = app.subscribe_progress();
        let message = app.import_sets().await.unwrap();
        assert_eq!(message, "Imported 25 sets");

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        // Strides at 10 and 20, plus the final item.
        assert_eq!(events.len(), 3);
        let last = events.last().unwrap();
        assert_eq!(last.current, 25);
        assert_eq!(last.total, 25);
    }
}
