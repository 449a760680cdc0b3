use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_API_URL;

pub const API_URL_ENV: &str = "BACKEND_API_URL";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<String>,
}

const TEMPLATE: &str = r#"# triage_dash configuration
# Backend base url (BACKEND_API_URL and --api-url take precedence)
# api_url = "http://localhost:8000"

# Give up on a backend request after this many seconds (unset: wait forever)
# request_timeout_secs = 30

# Write logs here instead of stderr (recommended for the TUI)
# log_file = "/tmp/triage_dash.log"
"#;

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("triage_dash"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file: write a commented template and run with defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        fs::write(path, TEMPLATE)?;
        log::info!("created template config at {}", path.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}

impl Config {
    /// `--api-url` beats the environment, which beats the file.
    pub fn resolve_api_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        [cli, env, self.api_url.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
