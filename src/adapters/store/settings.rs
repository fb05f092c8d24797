use crate::config::Currency;
use crate::utils::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

const CURRENCY_KEY: &str = "currency";

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Persisted currency preference; USD until the user changes it.
pub fn get_currency(conn: &Connection) -> Result<Currency> {
    match get(conn, CURRENCY_KEY)? {
        Some(raw) => raw.parse(),
        None => Ok(Currency::default()),
    }
}

pub fn set_currency(conn: &Connection, currency: Currency) -> Result<()> {
    set(conn, CURRENCY_KEY, currency.as_str())
}
