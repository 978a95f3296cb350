//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "usergoapi";
const DEFAULT_COLLECTION: &str = "profiles";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// MongoDB connection string
    pub mongodb_uri: String,
    /// Database holding the profile collection
    pub database: String,
    /// Profile collection name
    pub collection: String,
}

impl Config {
    /// Config for tests: defaults everywhere, no environment access.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: "usergoapi_test".to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            mongodb_uri: non_empty("MONGODB_URI")
                .unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            database: non_empty("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: non_empty("MONGODB_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "usergoapi");
        assert_eq!(config.collection, "profiles");
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("MONGODB_URI", "mongodb://db.internal:27017"),
            ("MONGODB_DATABASE", "crm"),
            ("MONGODB_COLLECTION", " people "),
        ]))
        .expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.mongodb_uri, "mongodb://db.internal:27017");
        assert_eq!(config.database, "crm");
        assert_eq!(config.collection, "people");
    }

    #[test]
    fn test_config_rejects_bad_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }
}
