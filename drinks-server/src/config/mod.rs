pub(crate) use crate::config::auth::AuthConfig;
pub(crate) use crate::config::database::DatabaseConfig;
use confique::Config;

pub mod auth;
pub mod database;

/// Optional configuration file, read from the working directory
pub const CONFIG_FILE: &str = "drinks.toml";

/// Main configuration structure for the drinks API
#[derive(Debug, Config, Clone)]
pub struct AppConfig {
    /// The port the API server listens on (default: 5000)
    #[config(env = "DRINKS_PORT", default = 5000)]
    pub port: u16,

    /// Database configuration
    #[config(nested)]
    pub database: DatabaseConfig,

    /// Token validation configuration
    #[config(nested)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Loads the configuration from environment variables, falling back to
    /// [`CONFIG_FILE`] and then to the defaults
    pub fn load() -> Result<Self, confique::Error> {
        Self::builder().env().file(CONFIG_FILE).load()
    }

    #[cfg(test)]
    pub fn for_test_with_mock(jwks_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0,
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                reset_on_start: false,
            },
            auth: AuthConfig {
                domain: "drinks.test".to_string(),
                audience: "drink".to_string(),
                issuer: None,
                jwks_url: Some(format!("{}/.well-known/jwks.json", jwks_mock.uri())),
                jwks_cache_ttl: 600,
                jwks_timeout: 2,
                leeway: 60,
                require_permissions_claim: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_from_file() {
        let path = write_config(
            "drinks-defaults",
            r#"
            [auth]
            domain = "dev-example.eu.auth0.com"
            "#,
        );

        let config = AppConfig::builder().file(&path).load().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.database.url, "sqlite://drinks.db?mode=rwc");
        assert!(!config.database.reset_on_start);
        assert_eq!(config.auth.domain, "dev-example.eu.auth0.com");
        assert_eq!(config.auth.audience, "drink");
        assert_eq!(config.auth.issuer, None);
        assert_eq!(config.auth.jwks_url, None);
        assert_eq!(config.auth.jwks_cache_ttl, 600);
        assert_eq!(config.auth.jwks_timeout, 5);
        assert_eq!(config.auth.leeway, 60);
        assert!(!config.auth.require_permissions_claim);
    }

    #[test]
    fn test_values_from_file() {
        let path = write_config(
            "drinks-values",
            r#"
            port = 8080

            [database]
            url = "sqlite::memory:"
            reset_on_start = true

            [auth]
            domain = "tenant.auth0.com"
            audience = "coffee"
            require_permissions_claim = true
            "#,
        );

        let config = AppConfig::builder().file(&path).load().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(config.database.reset_on_start);
        assert_eq!(config.auth.audience, "coffee");
        assert!(config.auth.require_permissions_claim);
    }

    #[test]
    fn test_domain_is_required() {
        assert!(AppConfig::builder().load().is_err());
    }
}
