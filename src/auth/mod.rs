use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Decoded bearer token payload. Only `userId` is required; unknown claims are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Claims issued now and expiring `expiry_hours` later.
    pub fn new(user_id: i32, expiry_hours: u64) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthError::ExpiryOutOfRange(expiry_hours))?;

        Ok(Self {
            user_id,
            exp: Some(exp.timestamp()),
            iat: Some(now.timestamp()),
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// No token was presented. Maps to 401.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bad signature, malformed, expired, not yet valid, or missing `userId`. Maps to 403.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Token lifetime of {0} hours is out of range")]
    ExpiryOutOfRange(u64),

    #[error("JWT generation error: {0}")]
    TokenGeneration(#[source] jsonwebtoken::errors::Error),
}

/// Verifies and issues HMAC-signed tokens under one shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_hours: u64,
}

impl TokenVerifier {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // `exp` and `nbf` are checked when present but not demanded
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_hours,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Verify a raw token. `None` or an empty token is `MissingToken`.
    pub fn verify(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }

    /// Sign a fresh token for `user_id` with the configured lifetime.
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        self.sign(&Claims::new(user_id, self.expiry_hours)?)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(AuthError::TokenGeneration)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("expiry_hours", &self.expiry_hours)
            .finish_non_exhaustive()
    }
}
