//! Deployment settings needed to reach the cache service.
//!
//! Stored as JSON in `~/.cloudcache/config.json`, with environment variables
//! taking precedence over the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CFG_SERVER: &str = "server";
pub const CFG_PORT: &str = "port";
pub const CFG_USER: &str = "user";
pub const CFG_API_KEY: &str = "api_key";
pub const CFG_ACCESS_TOKEN: &str = "access_token";
pub const CFG_TOKEN_EXPIRES: &str = "token_expires";

pub const ENV_SERVER: &str = "CLOUDCACHE_SERVER";
pub const ENV_PORT: &str = "CLOUDCACHE_PORT";
pub const ENV_USER: &str = "CLOUDCACHE_USER";
pub const ENV_API_KEY: &str = "CLOUDCACHE_API_KEY";

const DEFAULT_SERVER: &str = "localhost";
const DEFAULT_PORT: u16 = 8080;

/// Keys missing from the file take their value from [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: String,
    pub port: u16,
    #[serde(rename = "user")]
    pub username: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expires: Option<DateTime<Utc>>,
}

/// Whether `host` can stand alone between `http://` and `:{port}`.
///
/// Accepts dot-separated labels of ASCII letters, digits and `-`, or a
/// bracketed IPv6 address such as `[::1]`.
pub fn is_valid_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.contains(':')
            && inner.chars().all(|c| c.is_ascii_hexdigit() || matches!(c, ':' | '.'));
    }
    !host.is_empty()
        && host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            username: String::new(),
            api_key: String::new(),
            access_token: None,
            token_expires: None,
        }
    }
}

impl Config {
    /// Get the default config file path (~/.cloudcache/config.json)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cloudcache").join("config.json"))
    }

    /// Load config from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to `path`, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, content).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, keyed by the `CLOUDCACHE_*` names.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(ENV_SERVER) {
            self.server = server;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: CFG_PORT,
                value: port,
            })?;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.username = user;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = api_key;
        }
        Ok(())
    }

    /// Ensure the keys every command needs to build a URL are present.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::MissingKey(CFG_SERVER));
        }
        if !is_valid_host(&self.server) {
            return Err(ConfigError::InvalidValue {
                key: CFG_SERVER,
                value: self.server.clone(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::MissingKey(CFG_PORT));
        }
        Ok(())
    }

    /// A token is usable when present and not past its expiry.
    /// Tokens without a recorded expiry are assumed valid.
    pub fn token_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, self.token_expires) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(expires)) => now < expires,
        }
    }

    pub fn set_token(&mut self, token: String, expires: Option<DateTime<Utc>>) {
        self.access_token = Some(token);
        self.token_expires = expires;
    }

    pub fn clear_token(&mut self) {
        self.access_token = None;
        self.token_expires = None;
    }

    /// API key with all but the last four characters hidden, for display.
    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.api_key.chars().skip(count - 4).collect();
        format!("{}{}", "*".repeat(count - 4), tail)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Duration;

    use super::*;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server, "localhost");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config {
            server: "cache.internal".to_string(),
            port: 9000,
            username: "alice".to_string(),
            api_key: "k-123".to_string(),
            ..Config::default()
        };
        config.set_token("tok".to_string(), Some(Utc::now() + Duration::hours(1)));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_file_key_names() {
        let json = r#"{"server":"example.com","port":8080,"user":"bob","api_key":"abc"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.username, "bob");
        assert_eq!(config.access_token, None);

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value[CFG_USER], "bob");
        assert!(value.get(CFG_ACCESS_TOKEN).is_none());
        assert!(value.get(CFG_TOKEN_EXPIRES).is_none());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"user":"bob","api_key":"k"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.username, "bob");
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn test_valid_hosts() {
        for host in ["localhost", "cache.internal", "my-cache.example.com", "10.0.0.1", "[::1]", "[fe80::1]"] {
            assert!(is_valid_host(host), "{host}");
        }
        for host in [
            "",
            "cache.internal:9000",
            "a?b",
            "a?b#c",
            "user@host",
            "http://x.io",
            "x.io/api",
            "a..b",
            ".a",
            "-a.io",
            "has space",
            "[]",
            "[zz::1]",
        ] {
            assert!(!is_valid_host(host), "{host}");
        }
    }

    #[test]
    fn test_check_rejects_env_server_with_scheme() {
        let mut config = Config::default();
        config
            .apply_overrides(|key| (key == ENV_SERVER).then(|| "http://x.io".to_string()))
            .unwrap();

        let err = config.check().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: CFG_SERVER, .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_SERVER, "example.com"),
            (ENV_PORT, "9090"),
            (ENV_USER, "carol"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server, "example.com");
        assert_eq!(config.port, 9090);
        assert_eq!(config.username, "carol");
        assert_eq!(config.api_key, "");
    }

    #[test]
    fn test_override_bad_port() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == ENV_PORT).then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: CFG_PORT, .. }));
    }

    #[test]
    fn test_check_missing_keys() {
        let mut config = Config::default();
        assert!(config.check().is_ok());

        config.port = 0;
        assert!(matches!(config.check(), Err(ConfigError::MissingKey(CFG_PORT))));

        config.server = " ".to_string();
        assert!(matches!(config.check(), Err(ConfigError::MissingKey(CFG_SERVER))));
    }

    #[test]
    fn test_token_validity() {
        let now = Utc::now();
        let mut config = Config::default();
        assert!(!config.token_valid_at(now));

        config.set_token("tok".to_string(), None);
        assert!(config.token_valid_at(now));

        config.token_expires = Some(now + Duration::minutes(5));
        assert!(config.token_valid_at(now));
        assert!(!config.token_valid_at(now + Duration::minutes(5)));

        config.clear_token();
        assert!(!config.token_valid_at(now));
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = Config::default();
        assert_eq!(config.masked_api_key(), "");

        config.api_key = "abc".to_string();
        assert_eq!(config.masked_api_key(), "***");

        config.api_key = "secret-1234".to_string();
        assert_eq!(config.masked_api_key(), "*******1234");
    }
}
