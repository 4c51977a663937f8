//! # Application State
//!
//! Shared handles passed to every handler. The content store serializes its
//! own writes, so the state itself needs no lock.

use std::sync::Arc;

use parsa_core::SiteConfig;
use parsa_schema::ContentValidator;
use parsa_store::{ContentStore, MediaStore, StoreError};

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub media: Arc<MediaStore>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    /// Stores rooted where `config` says the site lives.
    pub fn new(config: SiteConfig) -> Result<Self, StoreError> {
        let store = ContentStore::from_config(&config)?;
        let media = MediaStore::from_config(&config);
        Ok(Self {
            store: Arc::new(store),
            media: Arc::new(media),
            config: Arc::new(config),
        })
    }

    pub fn validator(&self) -> &ContentValidator {
        self.store.validator()
    }
}
