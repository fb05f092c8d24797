//! Command layer: shared state plus one module per command area. Every
//! operation is reachable both as a typed method on [`app::App`] and by name
//! through [`bridge::dispatch`].

pub mod analytics;
pub mod app;
pub mod bridge;
pub mod collection;
pub mod importer;
pub mod market;
pub mod progress;
pub mod recognition;
pub mod sets;
pub mod tags;
pub mod wishlist;
