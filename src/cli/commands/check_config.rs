//! `check-config`: validate and print the effective configuration.

use anyhow::{Context, Result};

use crate::domain::models::Config;

/// Render `config` with secrets redacted.
pub fn render(config: &Config, json: bool) -> Result<String> {
    let redacted = config.redacted();
    if json {
        serde_json::to_string_pretty(&redacted).context("Failed to serialize configuration")
    } else {
        serde_yaml::to_string(&redacted).context("Failed to serialize configuration")
    }
}

pub fn execute(config: &Config, json: bool) -> Result<()> {
    println!("{}", render(config, json)?);
    Ok(())
}
