//! Extractors for the drink routes

use crate::errors::ApiError;
use crate::models::{DrinkPayload, NewDrink};
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use http::request::Parts;
use log::debug;
use serde_json::Value;

/// A validated drink taken from a JSON request body.
///
/// An empty body or `null` is reported as not found, undecodable JSON as a
/// bad request, and anything else that is not a valid drink as
/// unprocessable.
#[derive(Debug)]
pub(crate) struct DrinkBody(pub NewDrink);

impl<S> FromRequest<S> for DrinkBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!("Failed to read request body: {}", e);
            ApiError::bad_request()
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::not_found());
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            debug!("Request body is not JSON: {}", e);
            ApiError::bad_request()
        })?;
        if value.is_null() {
            return Err(ApiError::not_found());
        }

        let payload: DrinkPayload = serde_json::from_value(value).map_err(|e| {
            debug!("Request body is not a drink: {}", e);
            ApiError::unprocessable()
        })?;

        NewDrink::try_from(payload).map(DrinkBody).map_err(|reason| {
            debug!("Invalid drink: {}", reason);
            ApiError::unprocessable()
        })
    }
}

/// The numeric `{id}` path segment; anything else is not found
#[derive(Debug, Clone, Copy)]
pub(crate) struct DrinkId(pub i64);

impl<S> FromRequestParts<S> for DrinkId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| DrinkId(id))
            .map_err(|e| {
                debug!("Invalid drink id: {}", e);
                ApiError::not_found()
            })
    }
}
