//! Access and refresh tokens.
//!
//! An access token is an HS256 JWT whose subject is the driver id. Nothing
//! else about the driver is embedded: the auth extractor reloads the driver
//! row on every request. A refresh token is an opaque random string handed
//! to the client once; the database keeps only its SHA-256 digest.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use taxi_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: DbId,
    iat: i64,
    exp: i64,
}

/// Signing keys and token lifetimes, built once at startup.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// A refresh token as issued: the plaintext for the client, the digest for
/// the session row.
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
    pub expires_at: Timestamp,
}

impl TokenKeys {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl: Duration::minutes(config.access_token_ttl_mins),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    pub fn issue_access(&self, driver_id: DbId) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: driver_id,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// The driver id of a correctly signed, unexpired access token.
    pub fn verify_access(&self, token: &str) -> Option<DbId> {
        decode::<AccessClaims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| data.claims.sub)
    }

    pub fn issue_refresh(&self) -> RefreshToken {
        let plaintext = Uuid::new_v4().simple().to_string();
        RefreshToken {
            digest: refresh_digest(&plaintext),
            plaintext,
            expires_at: Utc::now() + self.refresh_ttl,
        }
    }
}

/// Hex SHA-256 of a refresh token, the form in which it is stored.
pub fn refresh_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
