mod auth_middleware;
pub(crate) mod drinks;
pub(crate) mod health;

use crate::state::AppState;
use axum::Router;

/// Combines all API routes into a single router.
///
/// Drink routes that need a permission carry their own guard, so public
/// routes and protected routes share one router.
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(drinks::router(state))
}
