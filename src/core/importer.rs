use crate::adapters::store::collection;
use crate::core::app::App;
use crate::core::collection::link_tags;
use crate::domain::model::{is_foil_finish, AddCardArgs, ScryfallCard};
use crate::utils::error::{Result, VaultError};
use std::collections::HashMap;

/// Supported CSV layouts. Detection looks only at the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Native,
    Moxfield,
    Archidekt,
}

/// One card-to-import, normalized across source formats.
#[derive(Debug, Clone, Default)]
struct ImportRow {
    scryfall_id: Option<String>,
    name: String,
    set_code: Option<String>,
    collector_number: Option<String>,
    condition: String,
    language: String,
    finish: String,
    purchase_price: f64,
    current_price: Option<f64>,
    quantity: i32,
    tags: Vec<String>,
}

/// Decides which exporter produced the file. Moxfield uses `Count`/`Edition`,
/// Archidekt `Quantity`/`Set Code`; anything else is read as the native layout.
pub fn detect_format(headers: &[String]) -> ImportFormat {
    let has = |name: &str| headers.iter().any(|h| h == name);
    if has("scryfall_id") {
        ImportFormat::Native
    } else if has("count") && has("edition") {
        ImportFormat::Moxfield
    } else if has("quantity") && (has("set code") || has("edition code")) {
        ImportFormat::Archidekt
    } else {
        ImportFormat::Native
    }
}

fn column_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
        .collect()
}

fn field<'a>(
    record: &'a csv::StringRecord,
    columns: &HashMap<String, usize>,
    names: &[&str],
) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| columns.get(*name).and_then(|&i| record.get(i)))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "True" | "TRUE" | "foil" | "etched")
}

fn parse_row(
    format: ImportFormat,
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
) -> Option<ImportRow> {
    let name = field(record, columns, &["name"])?.to_string();

    let quantity = field(record, columns, &["quantity", "count"])
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|q| *q >= 1)
        .unwrap_or(1);
    let purchase_price = field(record, columns, &["purchase_price", "purchase price"])
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    let condition = field(record, columns, &["condition"])
        .unwrap_or("NM")
        .to_string();
    let language = field(record, columns, &["language"])
        .unwrap_or("English")
        .to_string();

    let mut row = ImportRow {
        name,
        quantity,
        purchase_price,
        condition,
        language,
        finish: "nonfoil".to_string(),
        ..Default::default()
    };

    match format {
        ImportFormat::Native => {
            row.scryfall_id = field(record, columns, &["scryfall_id"]).map(String::from);
            row.set_code = field(record, columns, &["set_code"]).map(String::from);
            row.collector_number =
                field(record, columns, &["collector_number"]).map(String::from);
            if let Some(finish) = field(record, columns, &["finish"]) {
                row.finish = finish.to_string();
            } else if field(record, columns, &["is_foil"]).is_some_and(parse_bool) {
                row.finish = "foil".to_string();
            }
            row.current_price = field(record, columns, &["current_price"])
                .and_then(|v| v.parse::<f64>().ok());
            if let Some(tags) = field(record, columns, &["tags"]) {
                row.tags = tags.split(';').map(|t| t.trim().to_string()).collect();
            }
        }
        ImportFormat::Moxfield => {
            row.set_code = field(record, columns, &["edition"]).map(String::from);
            row.collector_number =
                field(record, columns, &["collector number"]).map(String::from);
            if let Some(foil) = field(record, columns, &["foil"]) {
                if foil.eq_ignore_ascii_case("etched") {
                    row.finish = "etched".to_string();
                } else if parse_bool(foil) {
                    row.finish = "foil".to_string();
                }
            }
        }
        ImportFormat::Archidekt => {
            row.set_code =
                field(record, columns, &["set code", "edition code"]).map(String::from);
            row.collector_number =
                field(record, columns, &["collector number"]).map(String::from);
            if let Some(finish) = field(record, columns, &["finish"]) {
                let normalized = finish.to_ascii_lowercase();
                if normalized != "normal" && normalized != "nonfoil" {
                    row.finish = normalized;
                }
            }
        }
    }

    Some(row)
}

fn parse_csv(content: &str) -> Result<(ImportFormat, Vec<ImportRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();
    let lowered: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    if !lowered.iter().any(|h| h == "name") {
        return Err(VaultError::validation(
            "CSV is missing a Name column, cannot import",
        ));
    }

    let format = detect_format(&lowered);
    let columns = column_map(&headers);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(row) = parse_row(format, &record, &columns) {
            rows.push(row);
        }
    }
    Ok((format, rows))
}

impl App {
    /// Looks a row up on Scryfall, most specific query first.
    async fn resolve_row(&self, row: &ImportRow) -> Result<ScryfallCard> {
        if let Some(id) = &row.scryfall_id {
            return self.scryfall.fetch_card(id).await;
        }

        let mut queries = Vec::new();
        if let (Some(set), Some(cn)) = (&row.set_code, &row.collector_number) {
            queries.push(format!("set:{} cn:{}", set, cn));
        }
        if let Some(set) = &row.set_code {
            queries.push(format!("!\"{}\" set:{}", row.name, set));
        }
        queries.push(format!("!\"{}\"", row.name));

        for query in &queries {
            let page = self.scryfall.search_cards(query, 1).await?;
            if let Some(card) = page.data.into_iter().next() {
                return Ok(card);
            }
        }
        Err(VaultError::not_found(format!("card '{}'", row.name)))
    }

    fn store_row(&self, row: &ImportRow, card: &ScryfallCard) -> Result<()> {
        let args = AddCardArgs {
            scryfall_id: card.id.clone(),
            condition: row.condition.clone(),
            purchase_price: row.purchase_price,
            quantity: row.quantity,
            is_foil: is_foil_finish(&row.finish),
            language: row.language.clone(),
            finish: Some(row.finish.clone()),
            tags: None,
        };
        let id = uuid::Uuid::new_v4().to_string();
        let db = self.db()?;
        collection::insert_card(&db, &id, card, &args)?;
        if let Some(current) = row.current_price {
            collection::update_card_price(&db, &id, current)?;
        }
        if !row.tags.is_empty() {
            link_tags(&db, &id, &row.tags)?;
        }
        Ok(())
    }

    /// Imports a CSV export into the collection. Rows that cannot be resolved
    /// on Scryfall or fail to store are skipped and counted, never fatal.
    pub async fn import_collection(&self, csv_content: &str) -> Result<String> {
        let (format, rows) = parse_csv(csv_content)?;
        tracing::info!("Importing {} rows ({:?} format)", rows.len(), format);

        let total = rows.len();
        let mut imported = 0usize;
        let mut skipped = 0usize;

        for (i, row) in rows.iter().enumerate() {
            let outcome = match self.resolve_row(row).await {
                Ok(card) => self.store_row(row, &card),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => imported += 1,
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", row.name, e);
                    skipped += 1;
                }
            }
            self.progress
                .emit(i + 1, total, format!("Importing: {}", row.name));
        }

        Ok(format!(
            "Imported {} cards, skipped {} cards",
            imported, skipped
        ))
    }
}
