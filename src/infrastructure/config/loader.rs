use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::Uncased;
use figment::Figment;
use reqwest::Url;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".tracker-proxy";

/// Prefix for environment overrides (`TRACKER_PROXY_GITHUB__CLIENT_ID`).
pub const ENV_PREFIX: &str = "TRACKER_PROXY_";

/// Upper bound on `session.ttl_days` (ten years).
pub const MAX_SESSION_TTL_DAYS: u32 = 3_650;

/// Unprefixed variable names accepted for compatibility with plain `.env` files.
const LEGACY_ENV: [(&str, &str); 5] = [
    ("GITHUB_CLIENT_ID", "github.client_id"),
    ("GITHUB_CLIENT_SECRET", "github.client_secret"),
    ("GITHUB_OWNER", "github.owner"),
    ("GITHUB_REPO", "github.repo"),
    ("FRONTEND_URL", "server.frontend_url"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GitHub OAuth client_id must be set")]
    MissingClientId,

    #[error("GitHub OAuth client_secret must be set")]
    MissingClientSecret,

    #[error("GitHub owner and repo must both be set")]
    MissingRepository,

    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Invalid session ttl_days: 0. Must be at least 1")]
    InvalidSessionTtl,

    #[error("Invalid session ttl_days: {0}. Must be at most {max}", max = MAX_SESSION_TTL_DAYS)]
    SessionTtlTooLong(u32),

    #[error("Session cookie_name cannot be empty")]
    EmptyCookieName,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .tracker-proxy/config.yaml
    /// 3. .tracker-proxy/local.yaml (optional local overrides)
    /// 4. Unprefixed GITHUB_* / FRONTEND_URL variables
    /// 5. TRACKER_PROXY_* variables, nested with `__` (highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Same as [`load`](Self::load) with the config directory under `root`.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.client_id.is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        if config.github.client_secret.is_empty() {
            return Err(ConfigError::MissingClientSecret);
        }
        if config.github.owner.is_empty() || config.github.repo.is_empty() {
            return Err(ConfigError::MissingRepository);
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        check_http_url("server.frontend_url", &config.server.frontend_url)?;
        for origin in &config.server.cors_origins {
            check_http_url("server.cors_origins", origin)?;
        }
        check_http_url("github.api_base_url", &config.github.api_base_url)?;
        check_http_url("github.oauth_base_url", &config.github.oauth_base_url)?;

        if config.session.ttl_days == 0 {
            return Err(ConfigError::InvalidSessionTtl);
        }
        if config.session.ttl_days > MAX_SESSION_TTL_DAYS {
            return Err(ConfigError::SessionTtlTooLong(config.session.ttl_days));
        }
        if config.session.cookie_name.is_empty() {
            return Err(ConfigError::EmptyCookieName);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

fn legacy_env() -> Env {
    let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map_or_else(
                || Uncased::from(key.as_str().to_string()),
                |(_, path)| Uncased::from(*path),
            )
    })
}

fn check_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.github.client_id = "Iv1.abc".to_string();
        config.github.client_secret = "shh".to_string();
        config.github.owner = "octo-org".to_string();
        config.github.repo = "tracker".to_string();
        config
    }

    const ENV_KEYS: [&str; 7] = [
        "GITHUB_CLIENT_ID",
        "GITHUB_CLIENT_SECRET",
        "GITHUB_OWNER",
        "GITHUB_REPO",
        "FRONTEND_URL",
        "TRACKER_PROXY_GITHUB__CLIENT_ID",
        "TRACKER_PROXY_SERVER__PORT",
    ];

    fn without_env<F: FnOnce()>(f: F) {
        temp_env::with_vars_unset(ENV_KEYS, f);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.session.ttl_days, 14);
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.logging.level, "info");
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingClientId)
        ));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_missing_secret() {
        let mut config = valid_config();
        config.github.client_secret.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingClientSecret)
        ));
    }

    #[test]
    fn test_validate_missing_repo() {
        let mut config = valid_config();
        config.github.repo.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingRepository)
        ));
    }

    #[test]
    fn test_validate_bad_frontend_url() {
        let mut config = valid_config();
        config.server.frontend_url = "not a url".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidUrl { field: "server.frontend_url", .. })
        ));

        config.server.frontend_url = "ftp://files.example.com".to_string();
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_validate_zero_ttl_and_port() {
        let mut config = valid_config();
        config.session.ttl_days = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidSessionTtl)
        ));

        let mut config = valid_config();
        config.server.port = 0;
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn test_validate_ttl_upper_bound() {
        let mut config = valid_config();
        config.session.ttl_days = MAX_SESSION_TTL_DAYS;
        assert!(ConfigLoader::validate(&config).is_ok());

        config.session.ttl_days = 1_000_000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::SessionTtlTooLong(1_000_000))
        ));
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
server:
  port: 9000
  frontend_url: https://tracker.example.com
  cookie_secure: false
github:
  client_id: Iv1.abc
  client_secret: shh
  owner: octo-org
  repo: tracker
session:
  ttl_days: 7
logging:
  level: debug
  format: pretty
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.server.port, 9000);
        assert!(!config.server.cookie_secure);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.github.repo, "tracker");
        assert_eq!(config.session.ttl_days, 7);
        assert_eq!(config.session.cookie_name, "tracker_session");
        assert_eq!(config.logging.format, crate::domain::models::LogFormat::Pretty);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_from_file() {
        without_env(|| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("tracker.yaml");
            std::fs::write(
                &path,
                "github:\n  client_id: id\n  client_secret: secret\n  owner: o\n  repo: r\n",
            )
            .unwrap();

            let config = ConfigLoader::load_from_file(&path).unwrap();
            assert_eq!(config.github.owner, "o");
            assert_eq!(config.server.port, 8000);
        });
    }

    #[test]
    fn test_load_from_dir_local_overrides_config() {
        without_env(|| {
            let dir = tempfile::tempdir().unwrap();
            let config_dir = dir.path().join(CONFIG_DIR);
            std::fs::create_dir_all(&config_dir).unwrap();
            std::fs::write(
                config_dir.join("config.yaml"),
                "server:\n  port: 8100\ngithub:\n  client_id: id\n  client_secret: secret\n  owner: o\n  repo: r\n",
            )
            .unwrap();
            std::fs::write(config_dir.join("local.yaml"), "server:\n  port: 8200\n").unwrap();

            let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
            assert_eq!(config.server.port, 8200);
            assert_eq!(config.github.client_id, "id");
        });
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.yaml");
        std::fs::write(
            &path,
            "github:\n  client_id: from-file\n  client_secret: secret\n  owner: o\n  repo: r\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("GITHUB_CLIENT_ID", None),
                ("GITHUB_CLIENT_SECRET", None),
                ("GITHUB_OWNER", None),
                ("GITHUB_REPO", None),
                ("FRONTEND_URL", None),
                ("TRACKER_PROXY_GITHUB__CLIENT_ID", Some("from-env")),
                ("TRACKER_PROXY_SERVER__PORT", Some("9100")),
            ],
            || {
                let config = ConfigLoader::load_from_file(&path).unwrap();
                assert_eq!(config.github.client_id, "from-env");
                assert_eq!(config.server.port, 9100);
            },
        );
    }

    #[test]
    fn test_legacy_env_names() {
        let dir = tempfile::tempdir().unwrap();

        temp_env::with_vars(
            [
                ("GITHUB_CLIENT_ID", Some("legacy-id")),
                ("GITHUB_CLIENT_SECRET", Some("legacy-secret")),
                ("GITHUB_OWNER", Some("legacy-owner")),
                ("GITHUB_REPO", Some("legacy-repo")),
                ("FRONTEND_URL", Some("https://frontend.example.com")),
                ("TRACKER_PROXY_GITHUB__CLIENT_ID", None),
                ("TRACKER_PROXY_SERVER__PORT", None),
            ],
            || {
                let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
                assert_eq!(config.github.client_id, "legacy-id");
                assert_eq!(config.github.repo, "legacy-repo");
                assert_eq!(config.server.frontend_url, "https://frontend.example.com");
            },
        );
    }

    #[test]
    fn test_redacted_hides_secret() {
        let config = valid_config().redacted();
        assert_eq!(config.github.client_secret, "[REDACTED]");
        assert!(!format!("{:?}", valid_config()).contains("shh"));
    }
}
