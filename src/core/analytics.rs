use crate::adapters::store::{collection, history};
use crate::core::app::App;
use crate::domain::model::{
    CardPerformance, CollectionFilter, CollectionStats, PortfolioPoint, PricePoint,
};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

const TOP_PERFORMER_COUNT: usize = 5;

/// Reductions over a card's recorded price history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSummary {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    /// Change versus purchase price, None when the purchase price is zero.
    pub change_pct: Option<f64>,
}

/// Summarizes a price history against the price paid. Empty histories have
/// no summary.
pub fn summarize_history(points: &[PricePoint], purchase_price: f64) -> Option<PriceSummary> {
    let last = points.last()?;
    let current = last.price;
    let min = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);
    let average = points.iter().map(|p| p.price).sum::<f64>() / points.len() as f64;
    let change_pct = if purchase_price > 0.0 {
        Some((current - purchase_price) / purchase_price * 100.0)
    } else {
        None
    };
    Some(PriceSummary {
        current,
        min,
        max,
        average,
        change_pct,
    })
}

fn roi_percentage(investment: f64, value: f64) -> f64 {
    if investment > 0.0 {
        (value - investment) / investment * 100.0
    } else if value > 0.0 {
        100.0
    } else {
        0.0
    }
}

impl App {
    /// Investment statistics over the whole collection, with the five
    /// biggest gainers and losers by absolute gain.
    pub async fn get_collection_stats(&self) -> Result<CollectionStats> {
        let cards = {
            let db = self.db()?;
            collection::get_cards(&db, &CollectionFilter::default())?
        };

        let mut total_investment = 0.0;
        let mut total_value = 0.0;
        let mut performances: Vec<CardPerformance> = Vec::with_capacity(cards.len());

        for card in &cards {
            let qty = card.quantity as f64;
            let investment = card.purchase_price * qty;
            let value = card.current_price * qty;
            total_investment += investment;
            total_value += value;

            performances.push(CardPerformance {
                id: card.id.clone(),
                name: card.name.clone(),
                set_code: card.set_code.clone(),
                quantity: card.quantity,
                purchase_price: card.purchase_price,
                current_price: card.current_price,
                total_gain: value - investment,
                roi_percentage: roi_percentage(investment, value),
            });
        }

        let mut by_gain = performances;
        by_gain.sort_by(|a, b| {
            b.total_gain
                .partial_cmp(&a.total_gain)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let top_winners: Vec<CardPerformance> = by_gain
            .iter()
            .take(TOP_PERFORMER_COUNT)
            .cloned()
            .collect();
        let top_losers: Vec<CardPerformance> = by_gain
            .iter()
            .rev()
            .take(TOP_PERFORMER_COUNT)
            .cloned()
            .collect();

        Ok(CollectionStats {
            total_investment,
            total_value,
            total_gain: total_value - total_investment,
            total_roi_percentage: roi_percentage(total_investment, total_value),
            top_winners,
            top_losers,
        })
    }

    pub async fn get_card_price_history(&self, card_id: &str) -> Result<Vec<PricePoint>> {
        let db = self.db()?;
        history::get_card_history(&db, card_id)
    }

    pub async fn get_portfolio_history(&self) -> Result<Vec<PortfolioPoint>> {
        let db = self.db()?;
        history::get_portfolio_history(&db)
    }

    /// Price summary for one card, None when it has no recorded history.
    pub async fn get_card_price_summary(&self, card_id: &str) -> Result<Option<PriceSummary>> {
        let db = self.db()?;
        let card = collection::get_card(&db, card_id)?;
        let Some(card) = card else {
            return Ok(None);
        };
        let points = history::get_card_history(&db, card_id)?;
        Ok(summarize_history(&points, card.purchase_price))
    }
}
