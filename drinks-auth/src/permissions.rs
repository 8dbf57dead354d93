use crate::claims::Claims;
use crate::error::AuthError;
use log::debug;

/// Checks that `claims` grants the `required` permission.
///
/// A claims set without a permissions claim is reported separately from one
/// whose permissions simply do not include `required`.
pub fn check_permission(claims: &Claims, required: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if !permissions.contains(required) {
        debug!(
            "Permission '{}' not granted to {}",
            required,
            claims.subject.as_deref().unwrap_or("anonymous subject")
        );
        return Err(AuthError::PermissionNotFound(required.to_string()));
    }

    Ok(())
}
