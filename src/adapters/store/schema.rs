use crate::utils::error::Result;
use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sets (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            release_date TEXT,
            icon_uri TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id TEXT PRIMARY KEY,
            scryfall_id TEXT NOT NULL,
            name TEXT NOT NULL,
            set_code TEXT NOT NULL,
            collector_number TEXT NOT NULL,
            condition TEXT DEFAULT 'NM',
            language TEXT NOT NULL DEFAULT 'English',
            finish TEXT NOT NULL DEFAULT 'nonfoil',
            purchase_price REAL,
            current_price REAL,
            quantity INTEGER DEFAULT 1,
            is_foil BOOLEAN DEFAULT 0,
            image_uri TEXT,
            FOREIGN KEY(set_code) REFERENCES sets(code)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS price_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            card_id TEXT NOT NULL,
            date TEXT NOT NULL,
            price REAL NOT NULL,
            currency TEXT DEFAULT 'USD',
            FOREIGN KEY(card_id) REFERENCES cards(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS wishlist (
            id TEXT PRIMARY KEY,
            scryfall_id TEXT NOT NULL,
            name TEXT NOT NULL,
            set_code TEXT NOT NULL,
            collector_number TEXT NOT NULL,
            image_uri TEXT,
            target_price REAL,
            notes TEXT,
            added_date TEXT NOT NULL,
            priority INTEGER DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS card_tags (
            card_id TEXT NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (card_id, tag_id),
            FOREIGN KEY(card_id) REFERENCES cards(id),
            FOREIGN KEY(tag_id) REFERENCES tags(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Brings databases created by earlier schema versions up to date. The early
/// cards table had no language or finish column.
pub fn migrate_database(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("PRAGMA table_info(cards)")?;
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if !columns.iter().any(|c| c == "language") {
        tracing::info!("Migrating cards table: adding language column");
        conn.execute(
            "ALTER TABLE cards ADD COLUMN language TEXT NOT NULL DEFAULT 'English'",
            [],
        )?;
    }

    if !columns.iter().any(|c| c == "finish") {
        tracing::info!("Migrating cards table: adding finish column");
        conn.execute(
            "ALTER TABLE cards ADD COLUMN finish TEXT NOT NULL DEFAULT 'nonfoil'",
            [],
        )?;
    }

    Ok(())
}
