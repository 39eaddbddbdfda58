use std::fmt;
use std::str::FromStr;

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;

/// Server configuration loaded from environment variables.
///
/// | Env Var                   | Default                 |
/// |---------------------------|-------------------------|
/// | `HOST`                    | `0.0.0.0`               |
/// | `PORT`                    | `3000`                  |
/// | `CORS_ORIGINS`            | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
/// | `JWT_SECRET`              | required                |
/// | `JWT_ACCESS_EXPIRY_MINS`  | `15`                    |
/// | `JWT_REFRESH_EXPIRY_DAYS` | `7`                     |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS, validated as header values at load time.
    pub cors_origins: Vec<HeaderValue>,
    pub request_timeout_secs: u64,
    pub auth: AuthConfig,
}

/// Token signing secret and lifetimes.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl_mins: i64,
    pub refresh_token_ttl_days: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl_mins", &self.access_token_ttl_mins)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics on unparseable values, an invalid CORS origin, or a missing
    /// or empty `JWT_SECRET`. The server cannot start without them.
    pub fn from_env() -> Self {
        let raw_origins =
            std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into());
        let cors_origins = parse_origins(&raw_origins)
            .unwrap_or_else(|e| panic!("CORS_ORIGINS contains an invalid origin: {e}"));

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!jwt_secret.is_empty(), "JWT_SECRET must be set and non-empty");

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            auth: AuthConfig {
                jwt_secret,
                access_token_ttl_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
                refresh_token_ttl_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
            },
        }
    }
}

/// Parse `name` from the environment, falling back to `default` when unset.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value {raw:?}: {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let origins = parse_origins(" http://a.test , ,http://b.test,").unwrap();
        assert_eq!(origins, ["http://a.test", "http://b.test"]);
        assert!(parse_origins("").unwrap().is_empty());
    }

    #[test]
    fn origin_with_control_character_is_rejected() {
        assert!(parse_origins("http://a.test,http://b\n.test").is_err());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let auth = AuthConfig {
            jwt_secret: "hunter2".to_string(),
            access_token_ttl_mins: 15,
            refresh_token_ttl_days: 7,
        };
        let printed = format!("{auth:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("access_token_ttl_mins: 15"));
    }
}
