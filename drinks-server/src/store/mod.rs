use crate::models::{Drink, NewDrink};
use thiserror::Error;

pub mod sqlite;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A drink titled '{0}' already exists")]
    Conflict(String),
    #[error("Stored recipe of drink {id} is corrupt: {source}")]
    Corrupt {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode recipe: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence of drinks.
///
/// The store exclusively owns the records; callers receive copies and never
/// keep them across requests.
#[async_trait::async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks, ordered by id
    async fn list(&self) -> Result<Vec<Drink>, StoreError>;

    /// The drink with the given id, if any
    async fn find(&self, id: i64) -> Result<Option<Drink>, StoreError>;

    /// Stores a new drink and returns it with its assigned id
    async fn insert(&self, drink: &NewDrink) -> Result<Drink, StoreError>;

    /// Replaces title and recipe of drink `id`, `None` if there is no such drink
    async fn update(&self, id: i64, drink: &NewDrink) -> Result<Option<Drink>, StoreError>;

    /// Removes drink `id`, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Checks that the backend answers queries
    async fn health_check(&self) -> Result<(), String>;

    /// Releases the backend connections
    async fn close(&self);
}
