use super::{DrinkStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{Drink, Ingredient, NewDrink};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS drink (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     title VARCHAR(80) NOT NULL UNIQUE, \
     recipe VARCHAR(180) NOT NULL)";

#[derive(sqlx::FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = StoreError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe = serde_json::from_str(&row.recipe).map_err(|source| StoreError::Corrupt {
            id: row.id,
            source,
        })?;
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe,
        })
    }
}

fn encode_recipe(recipe: &[Ingredient]) -> Result<String, StoreError> {
    serde_json::to_string(recipe).map_err(StoreError::Encode)
}

fn conflict_or(error: sqlx::Error, title: &str) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            StoreError::Conflict(title.to_string())
        }
        _ => StoreError::Database(error),
    }
}

/// Drink store backed by a SQLite `drink` table
#[derive(Clone)]
pub struct SqliteDrinkStore {
    pool: SqlitePool,
}

impl SqliteDrinkStore {
    /// Opens the database described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own database, so
        // the pool must hold on to exactly one
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        debug!("Connected to {}", config.url);
        Ok(Self { pool })
    }

    /// Creates the `drink` table if it does not exist yet
    pub async fn setup(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Drops all drinks, recreates the table and adds a sample drink
    pub async fn reset(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE IF EXISTS drink")
            .execute(&self.pool)
            .await?;
        self.setup().await?;

        let water = NewDrink {
            title: "water".to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        };
        self.insert(&water).await?;
        info!("Drink table recreated with sample data");
        Ok(())
    }
}

#[async_trait]
impl DrinkStore for SqliteDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows: Vec<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drink ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Drink::try_from).collect()
    }

    async fn find(&self, id: i64) -> Result<Option<Drink>, StoreError> {
        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drink WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Drink::try_from).transpose()
    }

    async fn insert(&self, drink: &NewDrink) -> Result<Drink, StoreError> {
        let recipe = encode_recipe(&drink.recipe)?;
        let result = sqlx::query("INSERT INTO drink (title, recipe) VALUES (?, ?)")
            .bind(&drink.title)
            .bind(&recipe)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_or(e, &drink.title))?;

        Ok(Drink {
            id: result.last_insert_rowid(),
            title: drink.title.clone(),
            recipe: drink.recipe.clone(),
        })
    }

    async fn update(&self, id: i64, drink: &NewDrink) -> Result<Option<Drink>, StoreError> {
        let recipe = encode_recipe(&drink.recipe)?;
        let result = sqlx::query("UPDATE drink SET title = ?, recipe = ? WHERE id = ?")
            .bind(&drink.title)
            .bind(&recipe)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_or(e, &drink.title))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Drink {
            id,
            title: drink.title.clone(),
            recipe: drink.recipe.clone(),
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM drink WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
