use crate::error::AuthError;
use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use log::{debug, error, warn};
use moka::future::Cache;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Verification keys indexed by key identifier (`kid`)
#[derive(Clone, Default)]
pub struct KeySet {
    keys: HashMap<String, DecodingKey>,
}

impl KeySet {
    /// Builds a key set from a JSON Web Key Set.
    ///
    /// Only RSA keys with a `kid` are kept; anything else is skipped.
    pub fn from_jwks(jwks: &JwkSet) -> Self {
        let mut keys = HashMap::new();
        for jwk in &jwks.keys {
            let Some(kid) = jwk.common.key_id.as_ref() else {
                warn!("Skipping signing key without a key id");
                continue;
            };
            if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
                warn!("Skipping signing key '{}': only RSA keys are accepted", kid);
                continue;
            }
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid.clone(), key);
                }
                Err(e) => warn!("Skipping signing key '{}': {}", kid, e),
            }
        }
        Self { keys }
    }

    /// Parses a JSON Web Key Set document
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        let jwks: JwkSet = serde_json::from_str(document)?;
        Ok(Self::from_jwks(&jwks))
    }

    pub fn get(&self, kid: &str) -> Option<&DecodingKey> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys.keys()).finish()
    }
}

/// Where the signing-key set comes from
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Returns the current signing-key set
    async fn keys(&self) -> Result<Arc<KeySet>, AuthError>;
}

/// Fetches the signing-key set from a JWKS endpoint over HTTP
pub struct HttpKeySource {
    client: reqwest::Client,
    url: Url,
}

impl HttpKeySource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    async fn keys(&self) -> Result<Arc<KeySet>, AuthError> {
        debug!("Fetching signing keys from {}", self.url);
        let unavailable = |e: reqwest::Error| {
            error!("Failed to fetch signing keys from {}: {}", self.url, e);
            AuthError::KeySetUnavailable(e.to_string())
        };

        let jwks: JwkSet = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        let keys = KeySet::from_jwks(&jwks);
        if keys.is_empty() {
            warn!("Key set at {} holds no usable signing keys", self.url);
        } else {
            debug!("Loaded {} signing key(s): {:?}", keys.len(), keys);
        }
        Ok(Arc::new(keys))
    }
}

/// A fixed signing-key set
pub struct StaticKeySource {
    keys: Arc<KeySet>,
}

impl StaticKeySource {
    pub fn new(keys: KeySet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn keys(&self) -> Result<Arc<KeySet>, AuthError> {
        Ok(self.keys.clone())
    }
}

/// Caches the key set of another source for a fixed time to live.
///
/// Concurrent misses share a single fetch. Failed fetches are not cached, so
/// the next request tries again.
pub struct CachedKeySource {
    inner: Arc<dyn KeySource>,
    cache: Cache<(), Arc<KeySet>>,
}

impl CachedKeySource {
    pub fn new(inner: Arc<dyn KeySource>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { inner, cache }
    }

    /// Drops the cached key set so the next lookup fetches it again
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }
}

#[async_trait]
impl KeySource for CachedKeySource {
    async fn keys(&self) -> Result<Arc<KeySet>, AuthError> {
        self.cache
            .try_get_with((), self.inner.keys())
            .await
            .map_err(|e: Arc<AuthError>| (*e).clone())
    }
}
