use crate::core::app::App;
use crate::domain::model::MarketTrends;
use crate::utils::error::Result;

const TREND_LIST_SIZE: usize = 10;

impl App {
    /// Four market snapshots fetched concurrently from Scryfall.
    pub async fn get_market_trends(&self) -> Result<MarketTrends> {
        let (standard, modern, commander, new_hot) = tokio::join!(
            self.scryfall
                .top_cards("f:standard game:paper", "usd", "desc", TREND_LIST_SIZE),
            self.scryfall
                .top_cards("f:modern game:paper", "usd", "desc", TREND_LIST_SIZE),
            self.scryfall
                .top_cards("game:paper", "edhrec", "asc", TREND_LIST_SIZE),
            self.scryfall.top_cards(
                "date>=now-30days game:paper",
                "usd",
                "desc",
                TREND_LIST_SIZE
            ),
        );

        Ok(MarketTrends {
            standard_staples: standard?,
            modern_staples: modern?,
            commander_popularity: commander?,
            new_hot: new_hot?,
        })
    }
}
