//! Client facade wiring the gateway, codec, store and local storage together

use std::sync::Arc;

use crate::actions::Actions;
use crate::codec::{JwtCodec, PayloadCodec};
use crate::config::Config;
use crate::entities::Entity;
use crate::error::ClientError;
use crate::gateway::{Gateway, HttpGateway};
use crate::notify::Toasts;
use crate::repository::Repository;
use crate::session::Session;
use crate::storage::{FileStore, LocalStore};
use crate::store::Store;
use crate::wizard::{DraftStore, ListingWizard};

/// Shared client state. Cloning is cheap; clones share one store.
#[derive(Clone)]
pub struct MarketClient {
    gateway: Arc<dyn Gateway>,
    codec: Arc<dyn PayloadCodec>,
    store: Arc<Store>,
    storage: Arc<dyn LocalStore>,
    toasts: Toasts,
}

impl MarketClient {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        codec: Arc<dyn PayloadCodec>,
        storage: Arc<dyn LocalStore>,
    ) -> Self {
        Self {
            gateway,
            codec,
            store: Store::new(),
            storage,
            toasts: Toasts::new(),
        }
    }

    /// Build an HTTP-backed client with file-persisted local state
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let gateway = HttpGateway::from_config(config);
        let codec = JwtCodec::new(&config.payload_secret);
        let storage = FileStore::open(&config.storage_dir)?;

        tracing::info!(
            gateway = %config.gateway_url_masked(),
            environment = config.environment.as_str(),
            storage = %config.storage_dir.display(),
            "Client configured"
        );
        Ok(Self::new(
            Arc::new(gateway),
            Arc::new(codec),
            Arc::new(storage),
        ))
    }

    pub fn repo<E: Entity>(&self) -> Repository<E> {
        Repository::new(self.gateway.clone(), self.codec.clone(), self.store.clone())
    }

    pub fn session(&self) -> Session {
        Session::new(
            self.gateway.clone(),
            self.codec.clone(),
            self.storage.clone(),
            self.store.clone(),
        )
    }

    pub fn drafts(&self) -> DraftStore {
        DraftStore::new(self.storage.clone())
    }

    /// A new wizard persisting its drafts to local storage
    pub fn wizard(&self) -> ListingWizard {
        ListingWizard::with_drafts(self.drafts())
    }

    pub fn actions(&self) -> Actions {
        Actions::new(self.clone())
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn storage(&self) -> &Arc<dyn LocalStore> {
        &self.storage
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }
}
