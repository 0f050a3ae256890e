use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use eventhub_api::token::DEFAULT_TTL_MINUTES;

/// Longest accepted token lifetime: one week.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me",
    "change-me-to-a-random-string",
    "dev-secret-change-me",
    "secret",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub token_ttl_minutes: i64,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset and empty values fall back
    /// to defaults, except the secret which is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("EVENTHUB_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("EVENTHUB_JWT_SECRET is unset or still a placeholder");
        }

        let port = match get("EVENTHUB_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("EVENTHUB_PORT is not a port number: {raw}"))?,
            None => 5036,
        };

        let token_ttl_minutes = match get("EVENTHUB_TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|m| (1..=MAX_TOKEN_TTL_MINUTES).contains(m))
                .with_context(|| {
                    format!(
                        "EVENTHUB_TOKEN_TTL_MINUTES must be between 1 and {MAX_TOKEN_TTL_MINUTES}: {raw}"
                    )
                })?,
            None => DEFAULT_TTL_MINUTES,
        };

        Ok(Self {
            jwt_secret,
            db_path: get("EVENTHUB_DB_PATH")
                .unwrap_or_else(|| "eventhub.db".into())
                .into(),
            host: get("EVENTHUB_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            token_ttl_minutes,
            cors_origin: get("EVENTHUB_CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".into()),
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = config(&[("EVENTHUB_JWT_SECRET", "a-real-secret-value")]).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("eventhub.db"));
        assert_eq!(cfg.port, 5036);
        assert_eq!(cfg.token_ttl_minutes, 120);
        assert_eq!(cfg.cors_origin, "http://localhost:3000");
        assert_eq!(cfg.addr().unwrap().to_string(), "0.0.0.0:5036");
    }

    #[test]
    fn missing_or_placeholder_secret_is_fatal() {
        assert!(config(&[]).is_err());
        assert!(config(&[("EVENTHUB_JWT_SECRET", "   ")]).is_err());
        assert!(config(&[("EVENTHUB_JWT_SECRET", "dev-secret-change-me")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("EVENTHUB_JWT_SECRET", "s3cr3t-for-tests"),
            ("EVENTHUB_PORT", "8080"),
            ("EVENTHUB_HOST", "127.0.0.1"),
            ("EVENTHUB_TOKEN_TTL_MINUTES", "15"),
        ])
        .unwrap();
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.token_ttl_minutes, 15);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let secret = ("EVENTHUB_JWT_SECRET", "s3cr3t-for-tests");
        assert!(config(&[secret, ("EVENTHUB_PORT", "http")]).is_err());
        assert!(config(&[secret, ("EVENTHUB_TOKEN_TTL_MINUTES", "0")]).is_err());
    }

    #[test]
    fn token_ttl_is_capped_at_a_week() {
        let secret = ("EVENTHUB_JWT_SECRET", "s3cr3t-for-tests");
        let week = MAX_TOKEN_TTL_MINUTES.to_string();
        let cfg = config(&[secret, ("EVENTHUB_TOKEN_TTL_MINUTES", week.as_str())]).unwrap();
        assert_eq!(cfg.token_ttl_minutes, 10_080);

        let over = (MAX_TOKEN_TTL_MINUTES + 1).to_string();
        assert!(config(&[secret, ("EVENTHUB_TOKEN_TTL_MINUTES", over.as_str())]).is_err());
        assert!(config(&[secret, ("EVENTHUB_TOKEN_TTL_MINUTES", "9223372036854775807")]).is_err());
    }
}
