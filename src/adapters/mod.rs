// Adapters layer: concrete integrations with external systems, namely the
// Scryfall HTTP API and the SQLite store.

pub mod scryfall;
pub mod store;
