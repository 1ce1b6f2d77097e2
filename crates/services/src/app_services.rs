use std::sync::Arc;

use storage::repository::Storage;

use crate::api::{ApiClient, AuthGateway, CatalogGateway, StaticCatalog};
use crate::auth_service::AuthService;
use crate::catalog_service::CatalogService;
use crate::config::AppConfig;
use crate::error::AppServicesError;
use crate::token_store::TokenStore;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    tokens: TokenStore,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(config: &AppConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        Ok(Self::from_storage(&storage, config))
    }

    /// Build services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(storage: &Storage, config: &AppConfig) -> Self {
        let tokens = TokenStore::new(Arc::clone(&storage.key_values));
        let client = Arc::new(ApiClient::new(config.api.clone(), tokens.clone()));

        let catalog_gateway: Arc<dyn CatalogGateway> = if config.catalog.offline {
            Arc::new(StaticCatalog::new())
        } else {
            client.clone()
        };
        let auth_gateway: Arc<dyn AuthGateway> = client;

        Self {
            auth: Arc::new(AuthService::new(auth_gateway, tokens.clone())),
            catalog: Arc::new(CatalogService::new(catalog_gateway, config.catalog)),
            tokens,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }
}
