use crate::claims::Claims;
use crate::error::{AuthError, TokenRejection};
use crate::header::bearer_token;
use crate::keys::{KeySet, KeySource};
use http::HeaderValue;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};
use log::debug;
use serde_json::{Map, Value};
use std::sync::Arc;

/// What a token must satisfy besides a valid signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSettings {
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Clock skew tolerated on `exp` and `nbf`, in seconds
    pub leeway: u64,
    /// Reject tokens without a permissions claim during validation
    pub require_permissions_claim: bool,
}

/// Verifies bearer tokens against the issuer's signing keys
pub struct TokenValidator {
    keys: Arc<dyn KeySource>,
    validation: Validation,
    require_permissions_claim: bool,
}

impl TokenValidator {
    pub fn new(settings: ValidatorSettings, keys: Arc<dyn KeySource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        // Absent `aud` or `iss` claims would otherwise skip their checks
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.validate_nbf = true;
        validation.leeway = settings.leeway;

        Self {
            keys,
            validation,
            require_permissions_claim: settings.require_permissions_claim,
        }
    }

    /// Validates the raw `Authorization` header of a request and returns the
    /// claims of its bearer token
    pub async fn validate(&self, authorization: Option<&HeaderValue>) -> Result<Claims, AuthError> {
        let token = bearer_token(authorization)?;
        let keys = self.keys.keys().await?;
        self.verify(&keys, token)
    }

    /// Verifies `token` against `keys`.
    ///
    /// The key is selected by the `kid` of the token header; signature,
    /// expiry, audience and issuer are then checked before the claims are
    /// extracted.
    pub fn verify(&self, keys: &KeySet, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!("Undecodable token header: {}", e);
            AuthError::InvalidToken(TokenRejection::Malformed)
        })?;

        let kid = header.kid.ok_or_else(|| {
            debug!("Token header carries no key id");
            AuthError::InvalidToken(TokenRejection::Malformed)
        })?;

        let key = keys.get(&kid).ok_or_else(|| {
            debug!("No signing key with id '{}'", kid);
            AuthError::InvalidToken(TokenRejection::UnknownKey)
        })?;

        let data = decode::<Map<String, Value>>(token, key, &self.validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::InvalidToken(rejection(e.kind()))
        })?;

        Claims::from_payload(data.claims, self.require_permissions_claim)
    }
}

fn rejection(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => TokenRejection::ClaimsMismatch,
        ErrorKind::InvalidSignature => TokenRejection::BadSignature,
        _ => TokenRejection::Malformed,
    }
}
