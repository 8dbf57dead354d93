use super::body::{DrinkBody, DrinkId};
use crate::errors::{ApiError, ErrorEnvelope};
use crate::models::{Drink, DrinkPayload, ShortDrink};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::{extract::State, Extension, Json};
use drinks_auth::Claims;
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public menu, ingredient names redacted
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortDrinkList {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

/// Drinks with their full recipes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinkList {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

impl DrinkList {
    fn of(drinks: Vec<Drink>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// Result of a deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    /// Id of the deleted drink
    pub delete: i64,
}

fn subject(claims: &Claims) -> &str {
    claims.subject.as_deref().unwrap_or("<anonymous>")
}

async fn all_drinks(state: &AppState) -> Result<Vec<Drink>, ApiError> {
    let drinks = state.store.list().await?;
    if drinks.is_empty() {
        return Err(ApiError::not_found());
    }
    Ok(drinks)
}

/// List the menu
#[utoipa::path(
    get,
    path = "/drinks",
    tag = DRINKS_TAG,
    responses(
        (status = 200, description = "All drinks, ingredient names omitted", body = ShortDrinkList),
        (status = 404, description = "No drinks on the menu", body = ErrorEnvelope)
    )
)]
pub(crate) async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<ShortDrinkList>, ApiError> {
    let drinks = all_drinks(&state).await?;
    Ok(Json(ShortDrinkList {
        success: true,
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}

/// List the menu with full recipes
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = DRINKS_TAG,
    security(("bearer" = ["get:drinks-detail"])),
    responses(
        (status = 200, description = "All drinks with full recipes", body = DrinkList),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 403, description = "Permission not granted", body = ErrorEnvelope),
        (status = 404, description = "No drinks on the menu", body = ErrorEnvelope)
    )
)]
pub(crate) async fn list_drinks_detail(
    State(state): State<AppState>,
) -> Result<Json<DrinkList>, ApiError> {
    Ok(Json(DrinkList::of(all_drinks(&state).await?)))
}

/// Add a drink to the menu
#[utoipa::path(
    post,
    path = "/drinks",
    tag = DRINKS_TAG,
    security(("bearer" = ["post:drinks"])),
    request_body = DrinkPayload,
    responses(
        (status = 200, description = "The created drink", body = DrinkList),
        (status = 400, description = "Body is not valid JSON", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 403, description = "Permission not granted", body = ErrorEnvelope),
        (status = 404, description = "Missing body", body = ErrorEnvelope),
        (status = 422, description = "Invalid drink or title already taken", body = ErrorEnvelope)
    )
)]
pub(crate) async fn create_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    DrinkBody(drink): DrinkBody,
) -> Result<Json<DrinkList>, ApiError> {
    let drink = state.store.insert(&drink).await?;
    info!("Drink {} '{}' created by {}", drink.id, drink.title, subject(&claims));
    Ok(Json(DrinkList::of(vec![drink])))
}

/// Replace the title and recipe of a drink
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    security(("bearer" = ["patch:drinks"])),
    params(("id" = i64, Path, description = "Drink id")),
    request_body = DrinkPayload,
    responses(
        (status = 200, description = "The updated drink", body = DrinkList),
        (status = 400, description = "Body is not valid JSON", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 403, description = "Permission not granted", body = ErrorEnvelope),
        (status = 404, description = "No such drink or missing body", body = ErrorEnvelope),
        (status = 422, description = "Invalid drink or title already taken", body = ErrorEnvelope)
    )
)]
pub(crate) async fn update_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    DrinkId(id): DrinkId,
    body: Result<DrinkBody, ApiError>,
) -> Result<Json<DrinkList>, ApiError> {
    // An unknown id is reported before any problem with the body
    if state.store.find(id).await?.is_none() {
        return Err(ApiError::not_found());
    }
    let DrinkBody(drink) = body?;

    let drink = state
        .store
        .update(id, &drink)
        .await?
        .ok_or_else(ApiError::not_found)?;
    info!("Drink {} updated by {}", id, subject(&claims));
    Ok(Json(DrinkList::of(vec![drink])))
}

/// Remove a drink from the menu
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    security(("bearer" = ["delete:drinks"])),
    params(("id" = i64, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Id of the deleted drink", body = DeleteResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 403, description = "Permission not granted", body = ErrorEnvelope),
        (status = 404, description = "No such drink", body = ErrorEnvelope)
    )
)]
pub(crate) async fn delete_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    DrinkId(id): DrinkId,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.store.delete(id).await? {
        return Err(ApiError::not_found());
    }
    info!("Drink {} deleted by {}", id, subject(&claims));
    Ok(Json(DeleteResponse {
        success: true,
        delete: id,
    }))
}
