use crate::api::drinks::handlers::{DeleteResponse, DrinkList, ShortDrinkList};
use crate::api::{drinks, health};
use crate::errors::ErrorEnvelope;
use crate::models::{Drink, DrinkPayload, Ingredient, RecipeInput, ShortDrink, ShortIngredient};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const DRINKS_TAG: &str = "Drinks API";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::ready_check,
        drinks::handlers::list_drinks,
        drinks::handlers::list_drinks_detail,
        drinks::handlers::create_drink,
        drinks::handlers::update_drink,
        drinks::handlers::delete_drink,
    ),
    components(schemas(
        Drink,
        ShortDrink,
        Ingredient,
        ShortIngredient,
        DrinkPayload,
        RecipeInput,
        DrinkList,
        ShortDrinkList,
        DeleteResponse,
        ErrorEnvelope,
        health::Health,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = DRINKS_TAG, description = "Drinks menu endpoints"),
    ),
    info(
        title = "Drinks API",
        description = "Drinks menu with permission-guarded management",
        version = "1.0.0"
    )
)]
pub(crate) struct ApiDoc;

/// Registers the `bearer` security scheme referenced by guarded routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Handler for the OpenAPI JSON specification endpoint
async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates a router for OpenAPI documentation routes
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(openapi_json_handler))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}
