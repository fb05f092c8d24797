pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::scryfall::ScryfallClient;
pub use config::{AppConfig, Currency, FileConfig};
pub use core::app::App;
pub use core::bridge::dispatch;
pub use domain::ports::FeatureExtractor;
pub use utils::error::{Result, VaultError};
