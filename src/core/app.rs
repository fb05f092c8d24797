use crate::adapters::scryfall::ScryfallClient;
use crate::adapters::store::settings;
use crate::config::Currency;
use crate::core::progress::ProgressSender;
use crate::domain::model::ProgressEvent;
use crate::domain::ports::FeatureExtractor;
use crate::utils::error::{Result, VaultError};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;

/// Shared application state behind every command: the database connection,
/// the Scryfall client, the optional recognizer, and the progress channel.
///
/// The connection lock is only ever held for synchronous query sections;
/// no command holds it across an await point.
pub struct App {
    pub(crate) db: Mutex<Connection>,
    pub(crate) scryfall: ScryfallClient,
    pub(crate) extractor: Option<Box<dyn FeatureExtractor>>,
    pub(crate) progress: ProgressSender,
}

impl App {
    pub fn new(conn: Connection, scryfall: ScryfallClient) -> Self {
        App {
            db: Mutex::new(conn),
            scryfall,
            extractor: None,
            progress: ProgressSender::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub(crate) fn db(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| VaultError::LockError)
    }

    /// Subscribe to import-progress events.
    pub fn subscribe_progress(&self) -> broadcast::Receiver<ProgressEvent> {
        self.progress.subscribe()
    }

    /// The persisted currency preference, USD when never set.
    pub fn currency(&self) -> Result<Currency> {
        let db = self.db()?;
        settings::get_currency(&db)
    }

    pub fn set_currency(&self, currency: Currency) -> Result<()> {
        let db = self.db()?;
        settings::set_currency(&db, currency)
    }
}
