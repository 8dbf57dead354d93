use crate::config::AppConfig;
use crate::store::sqlite::SqliteDrinkStore;
use crate::store::{DrinkStore, StoreError};
use drinks_auth::{AuthError, CachedKeySource, HttpKeySource, KeySource, TokenValidator};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failures while assembling the application state
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to open the drink store: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid key set URL: {0}")]
    JwksUrl(#[from] url::ParseError),
    #[error("Failed to set up token validation: {0}")]
    Auth(#[from] AuthError),
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let store = SqliteDrinkStore::connect(&config.database).await?;
        if config.database.reset_on_start {
            store.reset().await?;
        } else {
            store.setup().await?;
        }

        let jwks_url = config.auth.jwks_url()?;
        info!("Signing keys are fetched from {}", jwks_url);
        let http_source = HttpKeySource::new(
            jwks_url,
            Duration::from_secs(config.auth.jwks_timeout),
        )?;
        let keys: Arc<dyn KeySource> = Arc::new(CachedKeySource::new(
            Arc::new(http_source),
            Duration::from_secs(config.auth.jwks_cache_ttl),
        ));
        let validator = TokenValidator::new(config.auth.validator_settings(), keys);

        Ok(Self::with_parts(Arc::new(store), Arc::new(validator)))
    }

    pub fn with_parts(store: Arc<dyn DrinkStore>, validator: Arc<TokenValidator>) -> Self {
        Self { store, validator }
    }

    /// Whether every dependency needed to serve requests is reachable
    pub async fn health_check(&self) -> Result<(), String> {
        self.store
            .health_check()
            .await
            .map_err(|e| format!("Store is not available: {}", e))
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
        info!("Drink store closed");
    }
}
