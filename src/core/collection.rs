use crate::adapters::store::{collection, history, tags};
use crate::config::Currency;
use crate::core::app::App;
use crate::domain::model::{
    AddCardArgs, CollectionCard, CollectionFilter, Prices, ScryfallCard, ScryfallCardList,
};
use crate::utils::error::{Result, VaultError};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative};
use std::time::Duration;

/// Pause between per-card Scryfall requests during a bulk price refresh.
const PRICE_REFRESH_DELAY: Duration = Duration::from_millis(100);

const DEFAULT_TAG_COLOR: &str = "#6b7280";

/// Creates (if needed) and links each `"Name:Color"` tag spec to a card.
/// Specs without a color get a neutral default.
pub(crate) fn link_tags(
    db: &rusqlite::Connection,
    card_id: &str,
    specs: &[String],
) -> Result<()> {
    for spec in specs {
        let (name, color) = match spec.split_once(':') {
            Some((name, color)) if !color.is_empty() => (name, color),
            _ => (spec.as_str(), DEFAULT_TAG_COLOR),
        };
        if name.trim().is_empty() {
            continue;
        }
        let tag_id = tags::create_tag(db, name.trim(), color)?;
        tags::add_tag_to_card(db, card_id, tag_id)?;
    }
    Ok(())
}

/// Picks the published price matching currency preference and foil flag.
pub fn select_price(prices: &Prices, currency: Currency, is_foil: bool) -> Option<f64> {
    let raw = match (currency, is_foil) {
        (Currency::Eur, true) => prices.eur_foil.as_ref(),
        (Currency::Eur, false) => prices.eur.as_ref(),
        (Currency::Usd, true) => prices.usd_foil.as_ref(),
        (Currency::Usd, false) => prices.usd.as_ref(),
    };
    raw.and_then(|p| p.parse::<f64>().ok())
}

fn validate_add_args(args: &AddCardArgs) -> Result<()> {
    validate_non_empty_string("scryfall_id", &args.scryfall_id)?;
    validate_non_empty_string("condition", &args.condition)?;
    validate_non_negative("purchase_price", args.purchase_price)?;
    if args.quantity < 1 {
        return Err(VaultError::validation("quantity must be at least 1"));
    }
    Ok(())
}

impl App {
    pub async fn search_scryfall(&self, query: &str, page: u32) -> Result<ScryfallCardList> {
        self.scryfall.search_cards(query, page).await
    }

    pub async fn get_card(&self, scryfall_id: &str) -> Result<ScryfallCard> {
        self.scryfall.fetch_card(scryfall_id).await
    }

    pub async fn get_card_languages(&self, oracle_id: &str, set_code: &str) -> Result<Vec<String>> {
        self.scryfall.card_languages(oracle_id, set_code).await
    }

    /// Adds a card to the collection: fetches the printing from Scryfall,
    /// stores it under a fresh id, and creates/links any requested tags.
    pub async fn add_card(&self, args: AddCardArgs) -> Result<String> {
        validate_add_args(&args)?;
        let card = self.scryfall.fetch_card(&args.scryfall_id).await?;

        let id = uuid::Uuid::new_v4().to_string();
        let db = self.db()?;
        collection::insert_card(&db, &id, &card, &args)?;

        if let Some(tag_specs) = &args.tags {
            link_tags(&db, &id, tag_specs)?;
        }

        tracing::info!("Added {} ({}) to collection", card.name, id);
        Ok(id)
    }

    pub async fn get_collection(&self, filter: CollectionFilter) -> Result<Vec<CollectionCard>> {
        let db = self.db()?;
        collection::get_cards(&db, &filter)
    }

    pub async fn remove_card(&self, id: &str) -> Result<()> {
        let db = self.db()?;
        collection::remove_card(&db, id)
    }

    pub async fn update_card_quantity(&self, id: &str, quantity: i32) -> Result<()> {
        if quantity < 1 {
            return Err(VaultError::validation("quantity must be at least 1"));
        }
        let db = self.db()?;
        collection::update_card_quantity(&db, id, quantity)
    }

    pub async fn update_card_details(
        &self,
        id: &str,
        condition: &str,
        language: &str,
        purchase_price: f64,
    ) -> Result<()> {
        validate_non_empty_string("condition", condition)?;
        validate_non_empty_string("language", language)?;
        validate_non_negative("purchase_price", purchase_price)?;
        let db = self.db()?;
        collection::update_card_details(&db, id, condition, language, purchase_price)
    }

    /// Refreshes the market price of every owned card from Scryfall and
    /// records a price-history point. Cards without a published price or
    /// with a failing fetch are skipped, never fatal.
    pub async fn update_prices(&self, currency: Currency) -> Result<String> {
        let cards = {
            let db = self.db()?;
            collection::get_cards(&db, &CollectionFilter::default())?
        };

        let total = cards.len();
        let mut updated = 0usize;
        for (i, card) in cards.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(PRICE_REFRESH_DELAY).await;
            }

            match self.scryfall.fetch_card(&card.scryfall_id).await {
                Ok(fresh) => {
                    if let Some(price) = select_price(&fresh.prices, currency, card.is_foil) {
                        let db = self.db()?;
                        collection::update_card_price(&db, &card.id, price)?;
                        history::record_price(&db, &card.id, price, currency.as_str())?;
                        updated += 1;
                    } else {
                        tracing::warn!("No {} price available for {}", currency, card.name);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch price for {}: {}", card.name, e);
                }
            }

            self.progress.emit(
                i + 1,
                total,
                format!("Updating price: {}", card.name),
            );
        }

        Ok(format!("Updated prices for {} cards", updated))
    }

    /// Serializes the collection to the native CSV format.
    pub async fn export_collection(&self) -> Result<String> {
        let cards = {
            let db = self.db()?;
            collection::get_cards(&db, &CollectionFilter::default())?
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "name",
            "set_code",
            "collector_number",
            "condition",
            "purchase_price",
            "current_price",
            "quantity",
            "is_foil",
            "language",
            "finish",
            "tags",
            "scryfall_id",
        ])?;

        for card in cards {
            let tags_str = card
                .tags
                .as_ref()
                .map(|t| {
                    t.iter()
                        .map(|tag| format!("{}:{}", tag.name, tag.color))
                        .collect::<Vec<_>>()
                        .join(";")
                })
                .unwrap_or_default();

            writer.write_record([
                card.name.as_str(),
                card.set_code.as_str(),
                card.collector_number.as_str(),
                card.condition.as_str(),
                &card.purchase_price.to_string(),
                &card.current_price.to_string(),
                &card.quantity.to_string(),
                if card.is_foil { "1" } else { "0" },
                card.language.as_str(),
                card.finish.as_str(),
                tags_str.as_str(),
                card.scryfall_id.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| VaultError::validation(format!("CSV write failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| VaultError::validation(e.to_string()))
    }
}
