//! Message contract between popup, page and background
//!
//! Messages are JSON objects tagged by `action`; the shapes must stay
//! byte-compatible with the extension UI.

use serde::{Deserialize, Serialize};

use crate::record::JobRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Select the spreadsheet rows are appended to
    LoadSheet {
        #[serde(rename = "sheetId")]
        sheet_id: String,
    },
    /// Append a record to the selected spreadsheet
    SaveJob {
        #[serde(rename = "formData")]
        form_data: JobRecord,
    },
    /// Ask the page for its record
    LoadData,
    /// Toggle automatic submission on Easy Apply completion
    AutoSave { value: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply to a [`Message`].
///
/// Untagged on the wire; variant order matters for deserialization since a
/// record accepts any object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Saved(AppendOutcome),
    Ack { ok: bool },
    Record(JobRecord),
}

impl Response {
    pub fn ack() -> Self {
        Response::Ack { ok: true }
    }
}
