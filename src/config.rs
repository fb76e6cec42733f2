//! YAML configuration
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::sites::MatchMode;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub match_mode: MatchMode,
    pub arm_delay_ms: u64,
    pub easy_apply: EasyApplyConfig,
    pub sheets: SheetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EasyApplyConfig {
    /// Selector for the application container the watcher observes
    pub container: String,
    /// Class token carried by the node LinkedIn adds on a successful submit
    pub success_class: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SheetsConfig {
    pub endpoint: String,
    pub range: String,
    /// Environment variable holding the OAuth access token
    pub token_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Loose,
            arm_delay_ms: 500,
            easy_apply: EasyApplyConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Default for EasyApplyConfig {
    fn default() -> Self {
        Self {
            container: ".jobs-easy-apply-modal".to_string(),
            success_class: "artdeco-inline-feedback--success".to_string(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            range: "Sheet1!A:E".to_string(),
            token_env: "APPLY_TRACKER_TOKEN".to_string(),
        }
    }
}

/// Load config from `path`, or the embedded default when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let bytes: Vec<u8> = if let Some(p) = path {
        std::fs::read(p)?
    } else {
        include_bytes!("../config/default.yml").to_vec()
    };

    let config: Config = serde_yaml::from_slice(&bytes)?;
    Ok(config)
}
