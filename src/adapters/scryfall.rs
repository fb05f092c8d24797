use crate::domain::model::{ScryfallCard, ScryfallCardList, ScryfallSet, ScryfallSetList};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};

const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

/// HTTP client for the Scryfall API. The base URL is injectable so tests can
/// point it at a mock server.
pub struct ScryfallClient {
    client: Client,
    base_url: String,
}

impl ScryfallClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("cardvault/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        ScryfallClient {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the full set catalog.
    pub async fn fetch_sets(&self) -> Result<Vec<ScryfallSet>> {
        let url = format!("{}/sets", self.base_url);
        tracing::debug!("Fetching set catalog from {}", url);
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        let list: ScryfallSetList = resp.json().await?;
        Ok(list.data)
    }

    /// Fetches a single printing by its Scryfall id.
    pub async fn fetch_card(&self, id: &str) -> Result<ScryfallCard> {
        let url = format!("{}/cards/{}", self.base_url, id);
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        let card = resp.json().await?;
        Ok(card)
    }

    /// Searches cards with Scryfall query syntax, one page at a time.
    /// A 404 means "no matches" and yields an empty page, not an error.
    pub async fn search_cards(&self, query: &str, page: u32) -> Result<ScryfallCardList> {
        let url = format!("{}/cards/search", self.base_url);
        tracing::debug!("Searching Scryfall: {} (page {})", query, page);
        let page = page.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("unique", "prints"),
                ("page", page.as_str()),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Scryfall returned 404 (no cards found)");
            return Ok(ScryfallCardList {
                data: vec![],
                has_more: false,
                total_cards: Some(0),
            });
        }

        let list: ScryfallCardList = resp.error_for_status()?.json().await?;
        tracing::debug!("Found {} cards, has_more: {}", list.data.len(), list.has_more);
        Ok(list)
    }

    /// Fetches one page of a set's cards in collector-number order.
    pub async fn fetch_set_cards(&self, set_code: &str, page: u32) -> Result<ScryfallCardList> {
        let url = format!("{}/cards/search", self.base_url);
        let query = format!("e:{}", set_code);
        let page = page.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("unique", "prints"),
                ("order", "set"),
                ("page", page.as_str()),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ScryfallCardList {
                data: vec![],
                has_more: false,
                total_cards: Some(0),
            });
        }

        let list = resp.error_for_status()?.json().await?;
        Ok(list)
    }

    /// Lists the language codes a card was printed in within one set,
    /// sorted and deduplicated.
    pub async fn card_languages(&self, oracle_id: &str, set_code: &str) -> Result<Vec<String>> {
        let url = format!("{}/cards/search", self.base_url);
        let query = format!("oracle_id:{} set:{}", oracle_id, set_code);
        tracing::debug!("Fetching printings for language lookup: {}", query);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("unique", "prints"),
                ("include_multilingual", "true"),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        let list: ScryfallCardList = resp.error_for_status()?.json().await?;
        let mut languages: Vec<String> =
            list.data.into_iter().filter_map(|card| card.lang).collect();
        languages.sort();
        languages.dedup();
        Ok(languages)
    }

    /// Top N cards for a query under a given sort order and direction.
    pub async fn top_cards(
        &self,
        query: &str,
        order: &str,
        direction: &str,
        limit: usize,
    ) -> Result<Vec<ScryfallCard>> {
        let url = format!("{}/cards/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("order", order),
                ("dir", direction),
                ("page", "1"),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        let list: ScryfallCardList = resp.error_for_status()?.json().await?;
        Ok(list.data.into_iter().take(limit).collect())
    }

    /// Downloads raw image bytes, used for ranking recognition candidates.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}
