use crate::adapters::store::{sets, tags};
use crate::domain::model::{AddCardArgs, CollectionCard, CollectionFilter, ScryfallCard};
use crate::utils::error::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<CollectionCard> {
    Ok(CollectionCard {
        id: row.get(0)?,
        scryfall_id: row.get(1)?,
        name: row.get(2)?,
        set_code: row.get(3)?,
        collector_number: row.get(4)?,
        condition: row.get(5)?,
        language: row.get(6)?,
        finish: row.get(7)?,
        purchase_price: row.get(8)?,
        current_price: row.get(9)?,
        quantity: row.get(10)?,
        is_foil: row.get(11)?,
        image_uri: row.get(12)?,
        tags: None,
    })
}

const CARD_COLUMNS: &str = "id, scryfall_id, name, set_code, collector_number, condition, \
     language, finish, purchase_price, current_price, quantity, is_foil, image_uri";

/// Inserts an owned card. The current price starts equal to the purchase
/// price; the set row is created on demand so the foreign key always holds.
pub fn insert_card(
    conn: &Connection,
    id: &str,
    card: &ScryfallCard,
    args: &AddCardArgs,
) -> Result<()> {
    let image_uri = card
        .image_uris
        .as_ref()
        .map(|u| u.normal.clone())
        .unwrap_or_default();
    let finish = args.finish.clone().unwrap_or_else(|| "nonfoil".to_string());

    sets::ensure_set(conn, &card.set, &card.set_name)?;

    conn.execute(
        "INSERT INTO cards (id, scryfall_id, name, set_code, collector_number, condition, \
         language, finish, purchase_price, current_price, quantity, is_foil, image_uri)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            id,
            args.scryfall_id,
            card.name,
            card.set,
            card.collector_number,
            args.condition,
            args.language,
            finish,
            args.purchase_price,
            args.purchase_price,
            args.quantity,
            args.is_foil,
            image_uri
        ],
    )?;
    Ok(())
}

/// Lists owned cards, with their tags attached, optionally filtered.
pub fn get_cards(conn: &Connection, filter: &CollectionFilter) -> Result<Vec<CollectionCard>> {
    let mut sql = format!("SELECT {} FROM cards WHERE 1=1", CARD_COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(name) = &filter.name {
        sql.push_str(" AND name LIKE ?");
        params_vec.push(Box::new(format!("%{}%", name)));
    }
    if let Some(set_code) = &filter.set_code {
        sql.push_str(" AND set_code = ?");
        params_vec.push(Box::new(set_code.clone()));
    }
    if let Some(condition) = &filter.condition {
        sql.push_str(" AND condition = ?");
        params_vec.push(Box::new(condition.clone()));
    }
    if let Some(tag_id) = filter.tag_id {
        sql.push_str(" AND id IN (SELECT card_id FROM card_tags WHERE tag_id = ?)");
        params_vec.push(Box::new(tag_id));
    }
    sql.push_str(" ORDER BY name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(&param_refs[..], card_from_row)?;

    let mut cards = Vec::new();
    for card in rows {
        let mut card = card?;
        let card_tags = tags::get_card_tags(conn, &card.id)?;
        if !card_tags.is_empty() {
            card.tags = Some(card_tags);
        }
        cards.push(card);
    }
    Ok(cards)
}

pub fn get_card(conn: &Connection, id: &str) -> Result<Option<CollectionCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM cards WHERE id = ?1",
        CARD_COLUMNS
    ))?;
    let card = stmt.query_row([id], card_from_row).optional()?;

    match card {
        Some(mut card) => {
            let card_tags = tags::get_card_tags(conn, &card.id)?;
            if !card_tags.is_empty() {
                card.tags = Some(card_tags);
            }
            Ok(Some(card))
        }
        None => Ok(None),
    }
}

/// Removes a card along with its price history and tag links.
pub fn remove_card(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM price_history WHERE card_id = ?1", params![id])?;
    conn.execute("DELETE FROM card_tags WHERE card_id = ?1", params![id])?;
    conn.execute("DELETE FROM cards WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn update_card_quantity(conn: &Connection, id: &str, quantity: i32) -> Result<()> {
    conn.execute(
        "UPDATE cards SET quantity = ?1 WHERE id = ?2",
        params![quantity, id],
    )?;
    Ok(())
}

pub fn update_card_price(conn: &Connection, id: &str, price: f64) -> Result<()> {
    conn.execute(
        "UPDATE cards SET current_price = ?1 WHERE id = ?2",
        params![price, id],
    )?;
    Ok(())
}

pub fn update_card_details(
    conn: &Connection,
    id: &str,
    condition: &str,
    language: &str,
    purchase_price: f64,
) -> Result<()> {
    conn.execute(
        "UPDATE cards SET condition = ?1, language = ?2, purchase_price = ?3 WHERE id = ?4",
        params![condition, language, purchase_price, id],
    )?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::model::{AddCardArgs, ImageUris, Prices, ScryfallCard};

    pub fn scryfall_card(id: &str, name: &str) -> ScryfallCard {
        ScryfallCard {
            id: id.to_string(),
            oracle_id: Some("oracle-1".to_string()),
            name: name.to_string(),
            lang: Some("en".to_string()),
            set: "tst".to_string(),
            set_name: "Test Set".to_string(),
            collector_number: "1".to_string(),
            released_at: "2024-01-01".to_string(),
            artist: Some("Test Artist".to_string()),
            image_uris: Some(ImageUris {
                small: "https://example.com/small.jpg".to_string(),
                normal: "https://example.com/normal.jpg".to_string(),
                large: "https://example.com/large.jpg".to_string(),
                png: "https://example.com/card.png".to_string(),
                art_crop: "https://example.com/art.jpg".to_string(),
                border_crop: "https://example.com/border.jpg".to_string(),
            }),
            prices: Prices {
                usd: Some("10.00".to_string()),
                usd_foil: Some("20.00".to_string()),
                eur: Some("9.00".to_string()),
                eur_foil: Some("18.00".to_string()),
            },
            rarity: "rare".to_string(),
            similarity: None,
        }
    }

    pub fn add_args(scryfall_id: &str) -> AddCardArgs {
        AddCardArgs {
            scryfall_id: scryfall_id.to_string(),
            condition: "NM".to_string(),
            purchase_price: 10.0,
            quantity: 1,
            is_foil: false,
            language: "English".to_string(),
            finish: None,
            tags: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{add_args, scryfall_card};
    use super::*;
    use crate::adapters::store::open_in_memory;

    #[test]
    fn test_insert_and_get_cards() {
        let conn = open_in_memory().unwrap();
        let card = scryfall_card("sc-1", "Test Card");
        insert_card(&conn, "uuid-1", &card, &add_args("sc-1")).unwrap();

        let cards = get_cards(&conn, &CollectionFilter::default()).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Test Card");
        assert_eq!(cards[0].finish, "nonfoil");
        assert_eq!(cards[0].language, "English");
        // Current price starts at the purchase price.
        assert_eq!(cards[0].current_price, 10.0);
    }

    #[test]
    fn test_insert_card_creates_missing_set_row() {
        let conn = open_in_memory().unwrap();
        let card = scryfall_card("sc-1", "Test Card");
        insert_card(&conn, "uuid-1", &card, &add_args("sc-1")).unwrap();

        let set_name: String = conn
            .query_row("SELECT name FROM sets WHERE code = 'tst'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(set_name, "Test Set");
    }

    #[test]
    fn test_filter_by_name_and_set() {
        let conn = open_in_memory().unwrap();
        insert_card(
            &conn,
            "uuid-1",
            &scryfall_card("sc-1", "Lightning Bolt"),
            &add_args("sc-1"),
        )
        .unwrap();
        insert_card(
            &conn,
            "uuid-2",
            &scryfall_card("sc-2", "Counterspell"),
            &add_args("sc-2"),
        )
        .unwrap();

        let filter = CollectionFilter {
            name: Some("bolt".to_string()),
            ..Default::default()
        };
        // SQLite LIKE is case-insensitive for ASCII.
        let cards = get_cards(&conn, &filter).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Lightning Bolt");

        let filter = CollectionFilter {
            set_code: Some("none".to_string()),
            ..Default::default()
        };
        assert!(get_cards(&conn, &filter).unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_tag() {
        let conn = open_in_memory().unwrap();
        insert_card(
            &conn,
            "uuid-1",
            &scryfall_card("sc-1", "Tagged"),
            &add_args("sc-1"),
        )
        .unwrap();
        insert_card(
            &conn,
            "uuid-2",
            &scryfall_card("sc-2", "Untagged"),
            &add_args("sc-2"),
        )
        .unwrap();

        let tag_id = crate::adapters::store::tags::create_tag(&conn, "Deck", "#ff0000").unwrap();
        crate::adapters::store::tags::add_tag_to_card(&conn, "uuid-1", tag_id).unwrap();

        let filter = CollectionFilter {
            tag_id: Some(tag_id),
            ..Default::default()
        };
        let cards = get_cards(&conn, &filter).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Tagged");
        assert_eq!(cards[0].tags.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_card_cascades() {
        let conn = open_in_memory().unwrap();
        insert_card(
            &conn,
            "uuid-1",
            &scryfall_card("sc-1", "Test Card"),
            &add_args("sc-1"),
        )
        .unwrap();
        crate::adapters::store::history::record_price_on(&conn, "uuid-1", "2024-01-01", 15.0, "USD")
            .unwrap();
        let tag_id = crate::adapters::store::tags::create_tag(&conn, "Deck", "#fff").unwrap();
        crate::adapters::store::tags::add_tag_to_card(&conn, "uuid-1", tag_id).unwrap();

        remove_card(&conn, "uuid-1").unwrap();

        assert!(get_cards(&conn, &CollectionFilter::default())
            .unwrap()
            .is_empty());
        let history: i64 = conn
            .query_row("SELECT COUNT(*) FROM price_history", [], |r| r.get(0))
            .unwrap();
        assert_eq!(history, 0);
        let links: i64 = conn
            .query_row("SELECT COUNT(*) FROM card_tags", [], |r| r.get(0))
            .unwrap();
        assert_eq!(links, 0);
    }

    #[test]
    fn test_update_card_details() {
        let conn = open_in_memory().unwrap();
        insert_card(
            &conn,
            "uuid-1",
            &scryfall_card("sc-1", "Test Card"),
            &add_args("sc-1"),
        )
        .unwrap();

        update_card_details(&conn, "uuid-1", "LP", "Japanese", 15.0).unwrap();

        let card = get_card(&conn, "uuid-1").unwrap().unwrap();
        assert_eq!(card.condition, "LP");
        assert_eq!(card.language, "Japanese");
        assert_eq!(card.purchase_price, 15.0);
    }

    #[test]
    fn test_update_quantity_and_price() {
        let conn = open_in_memory().unwrap();
        insert_card(
            &conn,
            "uuid-1",
            &scryfall_card("sc-1", "Test Card"),
            &add_args("sc-1"),
        )
        .unwrap();

        update_card_quantity(&conn, "uuid-1", 4).unwrap();
        update_card_price(&conn, "uuid-1", 22.5).unwrap();

        let card = get_card(&conn, "uuid-1").unwrap().unwrap();
        assert_eq!(card.quantity, 4);
        assert_eq!(card.current_price, 22.5);
    }

    #[test]
    fn test_get_card_missing() {
        let conn = open_in_memory().unwrap();
        assert!(get_card(&conn, "nope").unwrap().is_none());
    }
}
