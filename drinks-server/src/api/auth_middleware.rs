use crate::errors::ApiError;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use drinks_auth::{check_permission, AuthError, Claims, TokenValidator};
use http::HeaderValue;
use log::warn;
use std::sync::Arc;

/// State of the [`require_permission`] middleware: the validator and the
/// permission the guarded route needs
#[derive(Clone)]
pub(crate) struct PermissionGuard {
    validator: Arc<TokenValidator>,
    permission: &'static str,
}

impl PermissionGuard {
    pub(crate) fn new(validator: Arc<TokenValidator>, permission: &'static str) -> Self {
        Self {
            validator,
            permission,
        }
    }

    async fn authorize(&self, authorization: Option<&HeaderValue>) -> Result<Claims, AuthError> {
        let claims = self.validator.validate(authorization).await?;
        check_permission(&claims, self.permission)?;
        Ok(claims)
    }
}

/// Rejects requests whose bearer token is invalid or lacks the guarded
/// permission. Accepted requests carry their [`Claims`] as an extension.
pub(crate) async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = request.headers().get(http::header::AUTHORIZATION);
    let claims = match guard.authorize(authorization).await {
        Ok(claims) => claims,
        // Logged by the key source that failed to fetch
        Err(e @ AuthError::KeySetUnavailable(_)) => return Err(e.into()),
        Err(e) => {
            warn!(
                "Rejected {} {} ({}): {}",
                request.method(),
                request.uri().path(),
                e.code(),
                e
            );
            return Err(e.into());
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
