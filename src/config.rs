use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
    #[serde(default = "default_report_base_url")]
    pub report_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: default_catalog_base_url(),
            report_base_url: default_report_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://www.fruityvice.com/api/fruit".to_string()
}
fn default_report_base_url() -> String {
    "https://www.thereportoftheweekapi.com/api/v1".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate server
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    // Validate upstream
    if config.upstream.timeout_secs == 0 {
        anyhow::bail!("upstream.timeout_secs must be > 0");
    }
    for (key, url) in [
        ("upstream.catalog_base_url", &config.upstream.catalog_base_url),
        ("upstream.report_base_url", &config.upstream.report_base_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("{} must be an http(s) URL", key);
        }
    }

    Ok(config)
}
