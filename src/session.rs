//! Per-page session state
//!
//! Everything that lives for one page load: the URL, the latest document
//! snapshot, the autosave flag, the lazily scraped record and the Easy Apply
//! watcher. Navigation starts a new session in place.

use tracing::debug;

use crate::config::EasyApplyConfig;
use crate::dom::HtmlDocument;
use crate::record::JobRecord;
use crate::scrape::scrape;
use crate::sites::SiteMap;
use crate::watcher::{CompletionWatcher, MutationRecord, WatchState};

#[derive(Debug, Clone)]
pub struct PageSession {
    url: String,
    html: String,
    autosave: bool,
    cached: Option<JobRecord>,
    watcher: CompletionWatcher,
}

impl PageSession {
    pub fn new(url: impl Into<String>, html: impl Into<String>, config: &EasyApplyConfig) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            autosave: false,
            cached: None,
            watcher: CompletionWatcher::new(config),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    pub fn watch_state(&self) -> WatchState {
        self.watcher.state()
    }

    pub fn document(&self) -> HtmlDocument {
        HtmlDocument::parse(&self.html)
    }

    /// Start a new page session at `url`. Autosave is a user setting and
    /// survives navigation; the cached record and the watcher do not.
    pub fn navigate(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.cached = None;
        self.watcher.reset();
        debug!(url = self.url.as_str(), "new page session");
    }

    pub fn update_document(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// Turning autosave off detaches the watcher.
    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
        if !enabled {
            self.watcher.reset();
        }
    }

    /// Record for this page, scraped on first request and then reused.
    pub fn record(&mut self, sites: &SiteMap) -> &JobRecord {
        let (url, html) = (&self.url, &self.html);
        self.cached
            .get_or_insert_with(|| scrape(url, &HtmlDocument::parse(html), sites))
    }

    /// Arm the watcher when autosave is on and the container is present.
    pub fn try_arm(&mut self) -> bool {
        if !self.autosave {
            return false;
        }
        let document = self.document();
        self.watcher.arm(&document)
    }

    /// Feed one mutation batch to the watcher; on completion, re-scrape the
    /// page as it is now.
    pub fn on_mutations(&mut self, batch: &[MutationRecord], sites: &SiteMap) -> Option<JobRecord> {
        if !self.watcher.process(batch) {
            return None;
        }
        Some(scrape(&self.url, &self.document(), sites))
    }
}
