use confique::Config;

/// Entity store configuration
#[derive(Debug, Config, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (default: "sqlite://drinks.db?mode=rwc")
    #[config(env = "DRINKS_DATABASE_URL", default = "sqlite://drinks.db?mode=rwc")]
    pub url: String,

    /// Drop every record and recreate the table with sample data on startup
    /// (default: false)
    #[config(env = "DRINKS_DATABASE_RESET_ON_START", default = false)]
    pub reset_on_start: bool,
}

impl DatabaseConfig {
    /// Whether the URL points to a private in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
