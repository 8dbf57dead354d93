mod body;
pub(crate) mod handlers;

use crate::api::auth_middleware::{require_permission, PermissionGuard};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use handlers::{create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink};

pub(crate) const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub(crate) const POST_DRINKS: &str = "post:drinks";
pub(crate) const PATCH_DRINKS: &str = "patch:drinks";
pub(crate) const DELETE_DRINKS: &str = "delete:drinks";

pub(crate) fn router(state: &AppState) -> Router<AppState> {
    let guard =
        |permission: &'static str| PermissionGuard::new(state.validator.clone(), permission);

    Router::new()
        .route("/drinks", get(list_drinks))
        .route(
            "/drinks",
            post(create_drink).route_layer(middleware::from_fn_with_state(
                guard(POST_DRINKS),
                require_permission,
            )),
        )
        .route(
            "/drinks-detail",
            get(list_drinks_detail).route_layer(middleware::from_fn_with_state(
                guard(GET_DRINKS_DETAIL),
                require_permission,
            )),
        )
        .route(
            "/drinks/{id}",
            patch(update_drink).route_layer(middleware::from_fn_with_state(
                guard(PATCH_DRINKS),
                require_permission,
            )),
        )
        .route(
            "/drinks/{id}",
            delete(delete_drink).route_layer(middleware::from_fn_with_state(
                guard(DELETE_DRINKS),
                require_permission,
            )),
        )
}
