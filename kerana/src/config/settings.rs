//! Connection settings read from the environment.

use std::env;

use kerana_repository::BasicAuth;

/// Default MongoDB connection string.
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/";

/// Default search index URL.
const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";

/// Default basic-auth user for the search index.
const DEFAULT_ELASTICSEARCH_USER: &str = "elastic";

/// Default basic-auth password for the search index.
const DEFAULT_ELASTICSEARCH_PASSWORD: &str = "colav";

/// Where to read from and where to write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mongodb_uri: String,
    pub elasticsearch_url: String,
    pub elasticsearch_user: String,
    pub elasticsearch_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            elasticsearch_url: DEFAULT_ELASTICSEARCH_URL.to_string(),
            elasticsearch_user: DEFAULT_ELASTICSEARCH_USER.to_string(),
            elasticsearch_password: DEFAULT_ELASTICSEARCH_PASSWORD.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MONGODB_URI`: MongoDB connection string (default: mongodb://localhost:27017/)
    /// - `ELASTICSEARCH_URL`: search index URL (default: http://localhost:9200)
    /// - `ELASTICSEARCH_USER`: basic-auth user (default: elastic)
    /// - `ELASTICSEARCH_PASSWORD`: basic-auth password (default: colav)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            mongodb_uri: lookup("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            elasticsearch_url: lookup("ELASTICSEARCH_URL").unwrap_or(defaults.elasticsearch_url),
            elasticsearch_user: lookup("ELASTICSEARCH_USER").unwrap_or(defaults.elasticsearch_user),
            elasticsearch_password: lookup("ELASTICSEARCH_PASSWORD")
                .unwrap_or(defaults.elasticsearch_password),
        }
    }

    /// Credentials for the search index.
    pub fn auth(&self) -> BasicAuth {
        BasicAuth::new(&self.elasticsearch_user, &self.elasticsearch_password)
    }
}
