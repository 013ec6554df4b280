use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".hookscoperc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Timeout for bundle and source-map fetches, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Largest translated line considered safe to parse. Positions beyond
    /// it fail translation so a pathological original file cannot stall
    /// the pipeline.
    #[serde(default = "default_max_source_lines")]
    pub max_source_lines: u32,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_source_lines() -> u32 {
    100_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            max_source_lines: default_max_source_lines(),
        }
    }
}

pub struct ConfigResult {
    pub config: Config,
    /// Whether the config came from a file (vs. built-in defaults).
    pub from_file: bool,
}

/// Load configuration from `dir/.hookscoperc.json`, falling back to the
/// defaults when no config file exists.
pub fn load_config(dir: &Path) -> Result<ConfigResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(ConfigResult {
            config: Config::default(),
            from_file: false,
        });
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config in {}", config_path.display()))?;

    Ok(ConfigResult {
        config,
        from_file: true,
    })
}

pub fn default_config_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&Config::default())?)
}
