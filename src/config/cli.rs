use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardvault", version, about = "Trading card collection manager")]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Currency preference override (USD or EUR), persisted
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Path to an optional TOML config file
    #[arg(long, default_value = "cardvault.toml")]
    pub config: String,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search cards on Scryfall
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Add a card to the collection by Scryfall id
    Add {
        scryfall_id: String,
        #[arg(long, default_value = "NM")]
        condition: String,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
        #[arg(long, default_value_t = 1)]
        quantity: i32,
        #[arg(long)]
        foil: bool,
        #[arg(long, default_value = "English")]
        language: String,
        #[arg(long)]
        finish: Option<String>,
        /// Tag as "Name:Color", repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List the collection
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        set: Option<String>,
        #[arg(long)]
        condition: Option<String>,
    },
    /// Remove a card from the collection
    Remove { id: String },
    /// Refresh market prices for every owned card
    UpdatePrices,
    /// Show collection investment statistics
    Stats,
    /// Show one card's recorded price history
    History { card_id: String },
    /// Show portfolio value over time
    Portfolio,
    /// List the local set catalog
    Sets,
    /// Re-import the full set catalog from Scryfall
    ImportSets,
    /// Export the collection as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Import a CSV export (native, Moxfield or Archidekt)
    Import { file: String },
    /// Show market trend lists
    Trends,
    /// List the wishlist
    Wishlist,
    /// Invoke any bridge command by name with raw JSON arguments
    Invoke {
        command: String,
        #[arg(default_value = "{}")]
        args: String,
    },
}
