//! # Bearer token claims
//!
//! The server issues a JWT whose payload names the member (`sub`, their email) and
//! their roles (`scopes`). The client holds no signing key, so claims are read with
//! signature and expiry validation turned off; expiry is checked separately against
//! the platform clock.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not valid base64: {0}")]
    Encoding(String),
    #[error("token payload is not valid JSON: {0}")]
    Payload(String),
    #[error("token has no subject")]
    MissingSubject,
}

/// Claims carried in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Tokens without `exp` never expire client-side.
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Strip an optional `Bearer ` prefix, as found in the `Authorization` response header.
pub fn strip_bearer(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .unwrap_or(raw)
        .trim()
}

fn token_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::Base64(e) => TokenError::Encoding(e.to_string()),
        ErrorKind::Json(e) => TokenError::Payload(e.to_string()),
        ErrorKind::Utf8(e) => TokenError::Payload(e.to_string()),
        _ => TokenError::Malformed,
    }
}

/// Decode the payload of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let token = strip_bearer(token);

    let mut validation = Validation::new(Algorithm::HS256);
    #[allow(deprecated)]
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let claims = decode::<TokenClaims>(token, &DecodingKey::from_secret(b""), &validation)
        .map_err(token_error)?
        .claims;

    if claims.sub.trim().is_empty() {
        return Err(TokenError::MissingSubject);
    }
    Ok(claims)
}

/// Current Unix time in seconds.
#[cfg(target_arch = "wasm32")]
pub fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Current Unix time in seconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Build a token for tests, signed with a throwaway key.
#[cfg(test)]
pub(crate) fn test_token(sub: &str, scopes: &[&str], exp: Option<i64>) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let mut payload = serde_json::json!({ "sub": sub, "scopes": scopes, "iss": "test" });
    if let Some(exp) = exp {
        payload["exp"] = serde_json::json!(exp);
    }
    encode(&Header::default(), &payload, &EncodingKey::from_secret(b"test-secret"))
        .expect("encode test token")
}
