use crate::domain::model::{ScryfallCard, WishlistCard};
use crate::utils::error::Result;
use rusqlite::{params, Connection};

pub fn add_to_wishlist(
    conn: &Connection,
    card: &ScryfallCard,
    target_price: Option<f64>,
    notes: Option<String>,
    priority: i32,
) -> Result<String> {
    let id = uuid::Uuid::new_v4().to_string();
    let added_date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let image_uri = card
        .image_uris
        .as_ref()
        .map(|u| u.normal.clone())
        .unwrap_or_default();

    conn.execute(
        "INSERT INTO wishlist (id, scryfall_id, name, set_code, collector_number, image_uri, \
         target_price, notes, added_date, priority)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            card.id,
            card.name,
            card.set,
            card.collector_number,
            image_uri,
            target_price,
            notes,
            added_date,
            priority
        ],
    )?;
    Ok(id)
}

/// Wishlist entries, most wanted first.
pub fn get_wishlist(conn: &Connection) -> Result<Vec<WishlistCard>> {
    let mut stmt = conn.prepare(
        "SELECT id, scryfall_id, name, set_code, collector_number, image_uri, \
         target_price, notes, added_date, priority
         FROM wishlist
         ORDER BY priority DESC, added_date DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(WishlistCard {
            id: row.get(0)?,
            scryfall_id: row.get(1)?,
            name: row.get(2)?,
            set_code: row.get(3)?,
            collector_number: row.get(4)?,
            image_uri: row.get(5)?,
            target_price: row.get(6)?,
            notes: row.get(7)?,
            added_date: row.get(8)?,
            priority: row.get(9)?,
        })
    })?;

    let mut wishlist = Vec::new();
    for card in rows {
        wishlist.push(card?);
    }
    Ok(wishlist)
}

pub fn remove_from_wishlist(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM wishlist WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn update_wishlist_card(
    conn: &Connection,
    id: &str,
    target_price: Option<f64>,
    notes: Option<String>,
    priority: i32,
) -> Result<()> {
    conn.execute(
        "UPDATE wishlist SET target_price = ?1, notes = ?2, priority = ?3 WHERE id = ?4",
        params![target_price, notes, priority, id],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::collection::test_support::scryfall_card;
    use crate::adapters::store::open_in_memory;

    #[test]
    fn test_add_and_get_wishlist() {
        let conn = open_in_memory().unwrap();
        let card = scryfall_card("sc-1", "Wanted Card");

        let id = add_to_wishlist(&conn, &card, Some(15.0), Some("note".to_string()), 2).unwrap();
        assert!(!id.is_empty());

        let wishlist = get_wishlist(&conn).unwrap();
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist[0].name, "Wanted Card");
        assert_eq!(wishlist[0].target_price, Some(15.0));
        assert_eq!(wishlist[0].priority, 2);
    }

    #[test]
    fn test_wishlist_ordered_by_priority_desc() {
        let conn = open_in_memory().unwrap();
        let low = scryfall_card("sc-1", "Low Priority");
        let mut high = scryfall_card("sc-2", "High Priority");
        high.id = "sc-2".to_string();

        add_to_wishlist(&conn, &low, None, None, 1).unwrap();
        add_to_wishlist(&conn, &high, None, None, 3).unwrap();

        let wishlist = get_wishlist(&conn).unwrap();
        assert_eq!(wishlist[0].name, "High Priority");
        assert_eq!(wishlist[1].name, "Low Priority");
    }

    #[test]
    fn test_update_and_remove() {
        let conn = open_in_memory().unwrap();
        let card = scryfall_card("sc-1", "Wanted Card");
        let id = add_to_wishlist(&conn, &card, Some(10.0), None, 1).unwrap();

        update_wishlist_card(&conn, &id, Some(20.0), Some("new".to_string()), 3).unwrap();
        let wishlist = get_wishlist(&conn).unwrap();
        assert_eq!(wishlist[0].target_price, Some(20.0));
        assert_eq!(wishlist[0].notes, Some("new".to_string()));
        assert_eq!(wishlist[0].priority, 3);

        remove_from_wishlist(&conn, &id).unwrap();
        assert!(get_wishlist(&conn).unwrap().is_empty());
    }
}
