//! Spreadsheet append collaborator
//!
//! Appends one row per [`JobRecord`] through the Google Sheets REST API.
//! Obtaining the OAuth token is the host's job; this module only needs a
//! [`TokenProvider`] to hand it a current one.

use std::future::Future;

use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

use crate::config::SheetsConfig;
use crate::error::AppendError;
use crate::record::JobRecord;

pub trait SheetAppender {
    fn append(
        &self,
        sheet_id: &str,
        record: &JobRecord,
    ) -> impl Future<Output = Result<(), AppendError>> + Send;
}

pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Result<String, AppendError>;
}

/// Token read from an environment variable at call time
#[derive(Debug, Clone)]
pub struct EnvToken {
    pub var: String,
}

impl TokenProvider for EnvToken {
    fn access_token(&self) -> Result<String, AppendError> {
        std::env::var(&self.var)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppendError::Token(format!("{} is not set", self.var)))
    }
}

pub struct GoogleSheetsClient<T> {
    client: Client,
    config: SheetsConfig,
    tokens: T,
}

impl<T: TokenProvider> GoogleSheetsClient<T> {
    pub fn new(config: SheetsConfig, tokens: T) -> Self {
        Self {
            client: Client::new(),
            config,
            tokens,
        }
    }

    /// `values:append` endpoint for `sheet_id`
    pub fn append_url(&self, sheet_id: &str) -> String {
        format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.config.endpoint.trim_end_matches('/'),
            sheet_id,
            self.config.range
        )
    }
}

/// Request body for a single-row append
pub fn append_body(record: &JobRecord) -> serde_json::Value {
    json!({ "values": [record.to_row()] })
}

impl<T: TokenProvider> SheetAppender for GoogleSheetsClient<T> {
    async fn append(&self, sheet_id: &str, record: &JobRecord) -> Result<(), AppendError> {
        if sheet_id.is_empty() {
            return Err(AppendError::NoSheet);
        }
        let token = self.tokens.access_token()?;

        let response = self
            .client
            .post(self.append_url(sheet_id))
            .bearer_auth(token)
            .json(&append_body(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "spreadsheet append rejected");
            return Err(AppendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(sheet_id, title = record.job_title.as_str(), "row appended");
        Ok(())
    }
}
