use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the tracker proxy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub OAuth app and repository configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Copy of this configuration that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.github.client_secret.is_empty() {
            copy.github.client_secret = "[REDACTED]".to_string();
        }
        copy
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Frontend URL that login redirects land on; also the primary CORS origin
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Additional origins allowed to call the API with credentials
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Mark the session cookie `Secure; SameSite=None` (required cross-site)
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_url: default_frontend_url(),
            cors_origins: vec![],
            cookie_secure: default_true(),
        }
    }
}

/// GitHub configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// OAuth app client id
    #[serde(default)]
    pub client_id: String,

    /// OAuth app client secret
    #[serde(default)]
    pub client_secret: String,

    /// Owner (user or organisation) of the tracked repository
    #[serde(default)]
    pub owner: String,

    /// Name of the tracked repository
    #[serde(default)]
    pub repo: String,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// OAuth base URL (hosts `/login/oauth/access_token`)
    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,

    /// `User-Agent` sent with every host request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Value of the `X-GitHub-Api-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_oauth_base_url() -> String {
    "https://github.com".to_string()
}

fn default_user_agent() -> String {
    "tracker-proxy".to_string()
}

fn default_api_version() -> String {
    "2022-11-28".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            owner: String::new(),
            repo: String::new(),
            api_base_url: default_api_base_url(),
            oauth_base_url: default_oauth_base_url(),
            user_agent: default_user_agent(),
            api_version: default_api_version(),
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base_url", &self.api_base_url)
            .field("oauth_base_url", &self.oauth_base_url)
            .field("user_agent", &self.user_agent)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in days
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u32,

    /// Upper bound on concurrently stored sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

fn default_cookie_name() -> String {
    "tracker_session".to_string()
}

const fn default_ttl_days() -> u32 {
    14
}

const fn default_max_sessions() -> u64 {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_days: default_ttl_days(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Directory for log files (if None logs only to stdout)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Enable stdout logging
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_stdout: true,
            rotation: RotationPolicy::default(),
        }
    }
}
