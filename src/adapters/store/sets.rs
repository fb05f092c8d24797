use crate::domain::model::ScryfallSet;
use crate::utils::error::Result;
use rusqlite::{params, Connection};

pub fn insert_set(conn: &Connection, set: &ScryfallSet) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO sets (code, name, release_date, icon_uri)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            set.code,
            set.name,
            set.released_at,
            set.icon_svg_uri.clone().unwrap_or_default()
        ],
    )?;
    Ok(())
}

/// Inserts a minimal set row when the catalog has not been imported yet, so
/// card inserts never trip the foreign key.
pub fn ensure_set(conn: &Connection, code: &str, name: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO sets (code, name) VALUES (?1, ?2)",
        params![code, name],
    )?;
    Ok(())
}

pub fn get_all_sets(conn: &Connection) -> Result<Vec<ScryfallSet>> {
    let mut stmt = conn.prepare(
        "SELECT code, name, release_date, icon_uri
         FROM sets
         ORDER BY release_date DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ScryfallSet {
            id: String::new(), // not persisted
            code: row.get(0)?,
            name: row.get(1)?,
            released_at: row.get(2)?,
            icon_svg_uri: row.get(3)?,
            set_type: None,
            card_count: None,
        })
    })?;

    let mut sets = Vec::new();
    for set in rows {
        sets.push(set?);
    }
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::open_in_memory;

    fn sample_set(code: &str, released: &str) -> ScryfallSet {
        ScryfallSet {
            id: "set-id".to_string(),
            code: code.to_string(),
            name: format!("Set {}", code),
            released_at: Some(released.to_string()),
            icon_svg_uri: None,
            set_type: Some("expansion".to_string()),
            card_count: Some(10),
        }
    }

    #[test]
    fn test_insert_and_list_sets_newest_first() {
        let conn = open_in_memory().unwrap();
        insert_set(&conn, &sample_set("old", "2003-01-01")).unwrap();
        insert_set(&conn, &sample_set("new", "2024-06-01")).unwrap();

        let sets = get_all_sets(&conn).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].code, "new");
        assert_eq!(sets[1].code, "old");
    }

    #[test]
    fn test_insert_set_upserts() {
        let conn = open_in_memory().unwrap();
        insert_set(&conn, &sample_set("tst", "2024-01-01")).unwrap();

        let mut renamed = sample_set("tst", "2024-01-01");
        renamed.name = "Renamed".to_string();
        insert_set(&conn, &renamed).unwrap();

        let sets = get_all_sets(&conn).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "Renamed");
    }

    #[test]
    fn test_ensure_set_does_not_overwrite() {
        let conn = open_in_memory().unwrap();
        insert_set(&conn, &sample_set("tst", "2024-01-01")).unwrap();
        ensure_set(&conn, "tst", "Placeholder").unwrap();

        let sets = get_all_sets(&conn).unwrap();
        assert_eq!(sets[0].name, "Set tst");
    }
}
