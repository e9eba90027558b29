use axum::http::HeaderMap;

use crate::errors::AppError;

/// Admin capability check consulted by every privileged handler before any
/// read or mutation. Failure surfaces as a 403 with no further detail.
pub fn check_admin(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_token() {
        assert!(check_admin(&headers_with("Bearer secret"), "secret").is_ok());
    }

    #[test]
    fn test_wrong_token() {
        assert!(check_admin(&headers_with("Bearer nope"), "secret").is_err());
    }

    #[test]
    fn test_missing_header() {
        assert!(check_admin(&HeaderMap::new(), "secret").is_err());
    }

    #[test]
    fn test_missing_bearer_prefix() {
        assert!(check_admin(&headers_with("secret"), "secret").is_err());
    }
}
