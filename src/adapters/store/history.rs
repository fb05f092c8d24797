use crate::domain::model::{PortfolioPoint, PricePoint};
use crate::utils::error::Result;
use rusqlite::{params, Connection};

/// Records a price for today, replacing any earlier record for the same day
/// so repeated refreshes never duplicate points.
pub fn record_price(conn: &Connection, card_id: &str, price: f64, currency: &str) -> Result<()> {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    record_price_on(conn, card_id, &date, price, currency)
}

pub fn record_price_on(
    conn: &Connection,
    card_id: &str,
    date: &str,
    price: f64,
    currency: &str,
) -> Result<()> {
    conn.execute(
        "DELETE FROM price_history WHERE card_id = ?1 AND date = ?2",
        params![card_id, date],
    )?;
    conn.execute(
        "INSERT INTO price_history (card_id, date, price, currency)
         VALUES (?1, ?2, ?3, ?4)",
        params![card_id, date, price, currency],
    )?;
    Ok(())
}

pub fn get_card_history(conn: &Connection, card_id: &str) -> Result<Vec<PricePoint>> {
    let mut stmt = conn.prepare(
        "SELECT date, price, currency
         FROM price_history
         WHERE card_id = ?1
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map([card_id], |row| {
        Ok(PricePoint {
            date: row.get(0)?,
            price: row.get(1)?,
            currency: row.get(2)?,
        })
    })?;

    let mut history = Vec::new();
    for point in rows {
        history.push(point?);
    }
    Ok(history)
}

/// Collection value per recorded date. The value on a date sums that day's
/// recorded prices weighted by owned quantity; the investment column reflects
/// the current collection's purchase cost.
pub fn get_portfolio_history(conn: &Connection) -> Result<Vec<PortfolioPoint>> {
    let mut dates_stmt =
        conn.prepare("SELECT DISTINCT date FROM price_history ORDER BY date ASC")?;
    let dates: Vec<String> = dates_stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let total_investment: f64 = conn
        .query_row(
            "SELECT SUM(purchase_price * quantity) FROM cards",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0.0);

    let mut history = Vec::new();
    for date in dates {
        let total_value: f64 = conn
            .query_row(
                "SELECT SUM(ph.price * c.quantity)
                 FROM price_history ph
                 JOIN cards c ON ph.card_id = c.id
                 WHERE ph.date = ?1",
                [&date],
                |row| row.get(0),
            )
            .unwrap_or(0.0);

        history.push(PortfolioPoint {
            date,
            total_value,
            total_investment,
        });
    }
    Ok(history)
}
