//! API token derivation and checking.
//!
//! The token is the hex SHA-256 of the deployment's shared secret plus a
//! fixed namespace string. This guards low-value internal telemetry, so a
//! straightforward equality check is sufficient; absence or mismatch must
//! still reject before any query executes.

use std::collections::HashMap;
use std::fmt::Write as _;

use sha2::{Digest, Sha256};

use crate::error::ApiError;

/// Namespace mixed into the token so that the shared secret alone is not
/// the credential.
const TOKEN_NAMESPACE: &str = "searchtrack-api";

/// Derives the API token from the shared secret.
#[must_use]
pub fn api_token(secret: &str) -> String {
    let digest = Sha256::digest(format!("{secret}{TOKEN_NAMESPACE}"));
    digest.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Rejects the request unless the `token` query parameter matches.
///
/// # Errors
///
/// Returns `ApiError::InvalidToken` on a missing or mismatched token.
pub fn require_token(
    expected: &str,
    params: &HashMap<String, String>,
) -> Result<(), ApiError> {
    match params.get("token") {
        Some(token) if token == expected => Ok(()),
        _ => Err(ApiError::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_is_hex_sha256() {
        let token = api_token("secret");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_api_token_is_deterministic_per_secret() {
        assert_eq!(api_token("a"), api_token("a"));
        assert_ne!(api_token("a"), api_token("b"));
    }

    #[test]
    fn test_require_token_rejects_missing_and_wrong_tokens() {
        let expected = api_token("secret");

        let empty = HashMap::new();
        assert!(require_token(&expected, &empty).is_err());

        let mut wrong = HashMap::new();
        wrong.insert("token".to_owned(), "nope".to_owned());
        assert!(require_token(&expected, &wrong).is_err());

        let mut right = HashMap::new();
        right.insert("token".to_owned(), expected.clone());
        assert!(require_token(&expected, &right).is_ok());
    }
}
