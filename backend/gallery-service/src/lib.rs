//! Gallery Service
//!
//! Content-sharing backend: media uploads with likes and comments, payment
//! proof review, and live update fan-out to connected clients. State lives in
//! three JSON collection files plus two directories of uploaded binaries.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod security;
pub mod services;
pub mod store;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};

use realtime::Broadcaster;
use store::{MediaStore, Stores};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<Stores>,
    pub uploads: MediaStore,
    pub proofs: MediaStore,
    pub broadcaster: Broadcaster,
}

impl AppState {
    /// Open the stores and media directories named by the configuration.
    pub fn initialize(config: &Config) -> std::io::Result<Self> {
        Ok(Self {
            stores: Arc::new(Stores::open(&config.storage.data_dir)?),
            uploads: MediaStore::open(&config.storage.uploads_dir)?,
            proofs: MediaStore::open(&config.storage.proofs_dir)?,
            broadcaster: Broadcaster::new(),
        })
    }
}
