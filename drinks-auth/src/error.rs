use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Why an `Authorization` header could not be read as a bearer credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedHeader {
    /// The header contains bytes that are not visible ASCII
    NotText,
    /// The scheme is something other than `Bearer`
    WrongScheme,
    /// The scheme is present but the token is empty
    TokenNotFound,
    /// More than a scheme and a token were supplied
    TooManyParts,
}

impl fmt::Display for MalformedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::NotText => "Authorization header must only contain visible ASCII characters.",
            Self::WrongScheme => "Authorization header must start with \"Bearer\".",
            Self::TokenNotFound => "Token not found.",
            Self::TooManyParts => "Authorization header must be bearer token.",
        };
        f.write_str(description)
    }
}

/// Why a bearer token failed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Undecodable header or payload, missing `kid`, or an unaccepted algorithm
    Malformed,
    /// The `kid` does not match any key in the signing-key set
    UnknownKey,
    /// The signature does not match the selected key
    BadSignature,
    /// The `exp` claim lies in the past
    Expired,
    /// Wrong audience or issuer, not yet valid, or a required claim is missing
    ClaimsMismatch,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::Malformed => "Unable to parse authentication token.",
            Self::UnknownKey => "Unable to find the appropriate key.",
            Self::BadSignature => "Token signature could not be verified.",
            Self::Expired => "Token expired.",
            Self::ClaimsMismatch => "Incorrect claims. Please, check the audience and issuer.",
        };
        f.write_str(description)
    }
}

/// Errors raised while authenticating and authorizing a request.
///
/// The `Display` output is safe to return to callers; internal details are
/// only carried by [`AuthError::KeySetUnavailable`] and are not displayed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("{0}")]
    MalformedHeader(MalformedHeader),

    #[error("{0}")]
    InvalidToken(TokenRejection),

    #[error("{0}")]
    InvalidClaims(String),

    #[error("Permissions not included in JWT.")]
    PermissionsClaimMissing,

    #[error("Permission not found.")]
    PermissionNotFound(String),

    #[error("Unable to fetch signing keys.")]
    KeySetUnavailable(String),
}

impl AuthError {
    /// HTTP status this failure is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader | Self::MalformedHeader(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(TokenRejection::Malformed | TokenRejection::UnknownKey) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidClaims(_) | Self::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
            Self::PermissionNotFound(_) => StatusCode::FORBIDDEN,
            Self::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable reason
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader(_) => "invalid_header",
            Self::InvalidToken(TokenRejection::Malformed | TokenRejection::UnknownKey) => {
                "invalid_header"
            }
            Self::InvalidToken(TokenRejection::BadSignature) => "invalid_signature",
            Self::InvalidToken(TokenRejection::Expired) => "token_expired",
            Self::InvalidToken(TokenRejection::ClaimsMismatch) => "invalid_claims",
            Self::InvalidClaims(_) | Self::PermissionsClaimMissing => "invalid_claims",
            Self::PermissionNotFound(_) => "unauthorized",
            Self::KeySetUnavailable(_) => "key_set_unavailable",
        }
    }
}
