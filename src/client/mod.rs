//! Picker client: a reducer + effect-process pair.
//!
//! The client loads the catalog once at initialization, reduces the result
//! into display state, and reacts to user actions (tag toggle, example
//! selection, "use") without further network calls. State lives in a single
//! writer task ([`effects::spawn_store`]); hosts observe snapshots through a
//! watch channel and feed [`store::Action`]s through an mpsc channel.
//!
//! The catalog fetch ([`loader::CatalogLoader`]) and the final navigation
//! ([`launch::Navigator`]) are trait seams so hosts and tests plug in their
//! own transports.

pub mod effects;
pub mod launch;
pub mod loader;
pub mod store;

pub use effects::{StoreHandle, spawn_store};
pub use launch::{LogNavigator, Navigator, launch_url};
pub use loader::{CatalogLoader, HttpLoader};
pub use store::{Action, ClientOptions, ClientState};

use thiserror::Error;

/// Client-side failures.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("catalog load failed: {0}")]
    Load(String),

    #[error("navigation failed: {0}")]
    Navigate(String),
}
