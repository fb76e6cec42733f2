//! Job-application tracker core
//!
//! Scrapes application metadata from job-board pages and forwards it to a
//! spreadsheet:
//! - Site table (LinkedIn, Indeed, Glassdoor) and URL matching
//! - Best-effort page scraper over a CSS-selector DOM surface
//! - Easy Apply completion watcher with a fire-once latch
//! - Page/background message relay and the spreadsheet append client
//! - FFI entry point for hosts embedding the scraper

pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod ffi;
pub mod logging;
pub mod message;
pub mod record;
pub mod relay;
pub mod scrape;
pub mod session;
pub mod sheets;
pub mod sites;
pub mod storage;
pub mod watcher;

pub use content::{ContentScript, Effect, PageEvent};
pub use dom::{Dom, HtmlDocument};
pub use message::{AppendOutcome, Message, Response};
pub use record::JobRecord;
pub use relay::{Background, Relay};
pub use scrape::{scrape, scrape_at};
pub use sites::{MatchMode, SiteMap, Source};
pub use watcher::{CompletionWatcher, MutationRecord, WatchState};
