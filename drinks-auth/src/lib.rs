//! # drinks-auth
//!
//! Bearer-token authorization for the drinks API.
//!
//! ## Components
//!
//! - **Header:** extracts the bearer credential from an `Authorization` header.
//! - **Keys:** loads the issuer's JSON Web Key Set and caches it.
//! - **Validator:** verifies a token against the key set and extracts its claims.
//! - **Permissions:** decides whether a claims set grants a required permission.

pub mod claims;
pub mod error;
pub mod header;
pub mod keys;
pub mod permissions;
pub mod validator;

pub use claims::Claims;
pub use error::{AuthError, MalformedHeader, TokenRejection};
pub use header::bearer_token;
pub use keys::{CachedKeySource, HttpKeySource, KeySet, KeySource, StaticKeySource};
pub use permissions::check_permission;
pub use validator::{TokenValidator, ValidatorSettings};
