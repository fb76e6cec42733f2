//! Error types
//!
//! Scraping never fails: missing elements and unknown sites degrade to
//! default field values. Errors only exist at the edges (config, append).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum AppendError {
    #[error("no spreadsheet selected")]
    NoSheet,
    #[error("access token unavailable: {0}")]
    Token(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("spreadsheet api returned {status}: {body}")]
    Status { status: u16, body: String },
}
