use std::sync::LazyLock;

use regex::Regex;

/// GitHub token formats: `ghp_`, `gho_`, `ghu_`, `ghs_`, `ghr_` and fine-grained PATs.
static GITHUB_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:gh[pousr]_[A-Za-z0-9]{20,}|github_pat_[A-Za-z0-9_]{20,})")
        .expect("github token pattern is valid")
});

/// Bearer tokens in Authorization headers.
static BEARER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-_\.]+").expect("bearer pattern is valid")
});

/// `access_token=...`, `client_secret: ...`, `"token": "..."` and similar.
static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(["']?(?:access_token|client_secret|secret|token|code)["']?\s*[:=]\s*)["']?[^"'\s,&}]+["']?"#,
    )
    .expect("key/value pattern is valid")
});

/// Scrubs credentials from text before it is logged or surfaced to callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub(&self, message: &str) -> String {
        let scrubbed = GITHUB_TOKEN.replace_all(message, "[TOKEN_REDACTED]");
        let scrubbed = BEARER.replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
        let scrubbed = KEY_VALUE.replace_all(&scrubbed, "${1}[REDACTED]");
        scrubbed.into_owned()
    }
}
