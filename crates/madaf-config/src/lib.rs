//! Startup configuration for the Madaf catalog service.
//!
//! TOML file + `MADAF_`-prefixed environment, merged through figment, and
//! translated to `madaf_core::StoreConfig`. The store endpoint and public
//! API key are mandatory: their absence is a fatal configuration error,
//! surfaced before any network call and distinct from runtime store
//! errors.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use madaf_core::StoreConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting '{field}' (set it in the config file or as MADAF_{env})")]
    Missing { field: String, env: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Store root URL (e.g. "https://abc.example.co").
    pub url: Option<String>,

    /// Public (anon) API key. Public by design, but still routed through
    /// `SecretString` downstream so it never lands in logs.
    pub anon_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "madaf", "madaf").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("madaf");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full `Config` from file + environment.
///
/// Environment wins over the file: `MADAF_URL`, `MADAF_ANON_KEY`,
/// `MADAF_TIMEOUT`.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

/// Load from an explicit file path (tests, alternative deployments).
pub fn load_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MADAF_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation to the runtime config ───────────────────────────────

impl Config {
    /// Validate presence of the mandatory settings and build the runtime
    /// `StoreConfig`.
    pub fn to_store_config(&self) -> Result<StoreConfig, ConfigError> {
        let raw_url = self.url.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "url".into(),
            env: "URL".into(),
        })?;

        let url: url::Url = raw_url.parse().map_err(|_| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {raw_url}"),
        })?;

        let anon_key = self
            .anon_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "anon_key".into(),
                env: "ANON_KEY".into(),
            })?;

        let mut store = StoreConfig::new(url, SecretString::from(anon_key.to_owned()));
        store.timeout = Duration::from_secs(self.timeout);
        Ok(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parsed(toml_str: &str) -> Config {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .unwrap()
    }

    #[test]
    fn full_config_translates() {
        let cfg = parsed(
            r#"
            url = "https://abc.example.co"
            anon_key = "public-anon-key"
            timeout = 10
            "#,
        );

        let store = cfg.to_store_config().unwrap();
        assert_eq!(store.url.as_str(), "https://abc.example.co/");
        assert_eq!(store.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_url_is_a_fatal_config_error() {
        let cfg = parsed(r#"anon_key = "public-anon-key""#);

        let err = cfg.to_store_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref field, .. } if field == "url"));
    }

    #[test]
    fn missing_or_empty_key_is_a_fatal_config_error() {
        let cfg = parsed(r#"url = "https://abc.example.co""#);
        assert!(cfg.to_store_config().is_err());

        let cfg = parsed(
            r#"
            url = "https://abc.example.co"
            anon_key = ""
            "#,
        );
        let err = cfg.to_store_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref field, .. } if field == "anon_key"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let cfg = parsed(
            r#"
            url = "not a url"
            anon_key = "public-anon-key"
            "#,
        );
        let err = cfg.to_store_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "url"));
    }

    #[test]
    fn environment_overrides_the_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                url = "https://file.example.co"
                anon_key = "file-key"
                "#,
            )?;
            jail.set_env("MADAF_URL", "https://env.example.co");

            let cfg = load_from(std::path::Path::new("config.toml")).unwrap();
            assert_eq!(cfg.url.as_deref(), Some("https://env.example.co"));
            assert_eq!(cfg.anon_key.as_deref(), Some("file-key"));
            Ok(())
        });
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = parsed(
            r#"
            url = "https://abc.example.co"
            anon_key = "public-anon-key"
            "#,
        );
        assert_eq!(cfg.timeout, 30);
    }
}
