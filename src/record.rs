//! Job Record

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Placeholder URL for a record built without a page
pub const URL_NOT_AVAILABLE: &str = "N/A";

/// Normalized scrape result for one job-application page or event.
///
/// Field names serialize in camelCase because the popup and the spreadsheet
/// row builder read them under those keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRecord {
    pub job_title: String,
    pub company: String,
    /// Board display name, empty when the page is not a known board
    pub source: String,
    pub application_date_time: String,
    pub url: String,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            company: String::new(),
            source: String::new(),
            application_date_time: format_timestamp(&Local::now()),
            url: URL_NOT_AVAILABLE.to_string(),
        }
    }
}

impl JobRecord {
    /// Spreadsheet column order
    pub fn to_row(&self) -> [&str; 5] {
        [
            self.job_title.as_str(),
            self.company.as_str(),
            self.source.as_str(),
            self.application_date_time.as_str(),
            self.url.as_str(),
        ]
    }

    /// True when every field but the timestamp is equal
    pub fn same_listing(&self, other: &JobRecord) -> bool {
        self.job_title == other.job_title
            && self.company == other.company
            && self.source == other.source
            && self.url == other.url
    }
}

/// `DD/MM/YYYY HH:MM:SS`: en-GB date, 24-hour time, joined by one space.
///
/// This is the presentation format the spreadsheet rows already use; it is
/// not meant to be parsed back.
pub fn format_timestamp(moment: &DateTime<Local>) -> String {
    moment.format("%d/%m/%Y %H:%M:%S").to_string()
}
