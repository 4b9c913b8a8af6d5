use crate::engine::{AdvantageConfig, LeanThresholds};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub advantage: AdvantageConfig,
    #[serde(default)]
    pub lean: LeanThresholds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub matchup_api_url: String,
    pub umpire_api_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout() -> u64 { 30_000 }

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::parse(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse TOML only. Environment overrides are applied by `load`.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config TOML")
    }

    /// `MLB_MATCHUP_API_URL` / `MLB_UMPIRE_API_URL` replace the file values.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MLB_MATCHUP_API_URL").filter(|u| !u.trim().is_empty()) {
            self.feed.matchup_api_url = sanitize(&url);
        }
        if let Some(url) = lookup("MLB_UMPIRE_API_URL").filter(|u| !u.trim().is_empty()) {
            self.feed.umpire_api_url = sanitize(&url);
        }
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        for line in content.lines() {
            let line = line.trim().trim_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

/// Strip carriage returns, BOM, and other invisible chars from a value.
fn sanitize(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}
