//! JWT token generation and validation
//!
//! Tokens are HS256-signed and carry the user id as `sub` plus `iat` and
//! `exp` timestamps. Keys are derived once from the configured secret and
//! shared behind `Arc`.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            expiry_secs,
        }
    }

    /// Generate a token for a user, valid from now
    pub fn generate_token(&self, user_id: i64) -> Result<String> {
        self.generate_token_at(user_id, Utc::now())
    }

    /// Generate a token as if issued at `issued_at`
    pub fn generate_token_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = issued_at + Duration::seconds(self.expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))?;
        debug!(user_id, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    /// Validate a token and return claims
    ///
    /// Rejects bad signatures, other algorithms, malformed tokens and
    /// expired tokens. Callers must not report which check failed.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.keys.decoding, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}
