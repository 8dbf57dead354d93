//! Bearer token validation configuration

use confique::Config;
use drinks_auth::ValidatorSettings;
use url::Url;

/// Bearer token validation configuration
#[derive(Debug, Config, Clone)]
pub struct AuthConfig {
    /// Identity provider domain, e.g. "dev-example.eu.auth0.com"
    #[config(env = "DRINKS_AUTH_DOMAIN")]
    pub domain: String,

    /// Expected token audience (default: "drink")
    #[config(env = "DRINKS_AUTH_AUDIENCE", default = "drink")]
    pub audience: String,

    /// Expected token issuer (default: "https://<domain>/")
    #[config(env = "DRINKS_AUTH_ISSUER")]
    pub issuer: Option<String>,

    /// JSON Web Key Set location (default: "https://<domain>/.well-known/jwks.json")
    #[config(env = "DRINKS_AUTH_JWKS_URL")]
    pub jwks_url: Option<String>,

    /// How long a fetched key set is reused, in seconds (default: 600)
    #[config(env = "DRINKS_AUTH_JWKS_CACHE_TTL", default = 600)]
    pub jwks_cache_ttl: u64,

    /// Key set request timeout in seconds (default: 5)
    #[config(env = "DRINKS_AUTH_JWKS_TIMEOUT", default = 5)]
    pub jwks_timeout: u64,

    /// Tolerated clock skew in seconds (default: 60)
    #[config(env = "DRINKS_AUTH_LEEWAY", default = 60)]
    pub leeway: u64,

    /// Reject tokens without a permissions claim as invalid claims
    /// (default: false)
    #[config(env = "DRINKS_AUTH_REQUIRE_PERMISSIONS_CLAIM", default = false)]
    pub require_permissions_claim: bool,
}

impl AuthConfig {
    fn domain(&self) -> &str {
        self.domain
            .trim_start_matches("https://")
            .trim_end_matches('/')
    }

    /// The expected `iss` claim
    pub fn issuer(&self) -> String {
        self.issuer
            .clone()
            .unwrap_or_else(|| format!("https://{}/", self.domain()))
    }

    /// Where the signing-key set is fetched from
    pub fn jwks_url(&self) -> Result<Url, url::ParseError> {
        match &self.jwks_url {
            Some(url) => Url::parse(url),
            None => Url::parse(&format!("https://{}/.well-known/jwks.json", self.domain())),
        }
    }

    pub fn validator_settings(&self) -> ValidatorSettings {
        ValidatorSettings {
            issuer: self.issuer(),
            audience: self.audience.clone(),
            leeway: self.leeway,
            require_permissions_claim: self.require_permissions_claim,
        }
    }
}
