use crate::error::{AuthError, MalformedHeader};
use http::HeaderValue;

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. The header must hold exactly a
/// scheme and a token separated by whitespace.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let value = header
        .to_str()
        .map_err(|_| AuthError::MalformedHeader(MalformedHeader::NotText))?;

    let mut parts = value.split_whitespace();
    match parts.next() {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {}
        _ => return Err(AuthError::MalformedHeader(MalformedHeader::WrongScheme)),
    }

    let token = parts
        .next()
        .ok_or(AuthError::MalformedHeader(MalformedHeader::TokenNotFound))?;

    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader(MalformedHeader::TooManyParts));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> Result<String, AuthError> {
        let header = HeaderValue::from_str(value).unwrap();
        bearer_token(Some(&header)).map(str::to_string)
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(None), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_valid_bearer_token() {
        assert_eq!(parse("Bearer abc.def.ghi"), Ok("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(parse("bearer abc"), Ok("abc".to_string()));
        assert_eq!(parse("BEARER abc"), Ok("abc".to_string()));
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            parse("Basic dXNlcjpwYXNz"),
            Err(AuthError::MalformedHeader(MalformedHeader::WrongScheme))
        );
        assert_eq!(
            parse("abc.def.ghi"),
            Err(AuthError::MalformedHeader(MalformedHeader::WrongScheme))
        );
        assert_eq!(
            parse(""),
            Err(AuthError::MalformedHeader(MalformedHeader::WrongScheme))
        );
    }

    #[test]
    fn test_token_not_found() {
        assert_eq!(
            parse("Bearer"),
            Err(AuthError::MalformedHeader(MalformedHeader::TokenNotFound))
        );
        assert_eq!(
            parse("Bearer   "),
            Err(AuthError::MalformedHeader(MalformedHeader::TokenNotFound))
        );
    }

    #[test]
    fn test_too_many_parts() {
        assert_eq!(
            parse("Bearer abc def"),
            Err(AuthError::MalformedHeader(MalformedHeader::TooManyParts))
        );
    }

    #[test]
    fn test_non_ascii_header() {
        let header = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();
        assert_eq!(
            bearer_token(Some(&header)),
            Err(AuthError::MalformedHeader(MalformedHeader::NotText))
        );
    }
}
