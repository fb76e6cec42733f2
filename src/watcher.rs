//! Easy Apply completion watcher
//!
//! Fires once when LinkedIn inserts its "application sent" node into the
//! Easy Apply modal.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EasyApplyConfig;
use crate::dom::{fragment_has_class, fragment_matches, Dom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No observer attached
    Idle,
    /// Observing the application container, not yet fired
    Watching,
    /// Success seen; one record already submitted for this application
    Fired,
}

/// One mutation record from the host observer, with nodes as outer HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MutationRecord {
    pub added_nodes: Vec<String>,
    pub removed_nodes: Vec<String>,
}

impl MutationRecord {
    pub fn added(node: impl Into<String>) -> Self {
        Self {
            added_nodes: vec![node.into()],
            removed_nodes: Vec::new(),
        }
    }

    pub fn removed(node: impl Into<String>) -> Self {
        Self {
            added_nodes: Vec::new(),
            removed_nodes: vec![node.into()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionWatcher {
    state: WatchState,
    container_selector: String,
    success_class: String,
}

impl CompletionWatcher {
    pub fn new(config: &EasyApplyConfig) -> Self {
        Self {
            state: WatchState::Idle,
            container_selector: config.container.clone(),
            success_class: config.success_class.clone(),
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Attach to the application container if one is on the page.
    ///
    /// Only moves `Idle -> Watching`; returns whether the watcher is watching
    /// afterwards.
    pub fn arm<D: Dom + ?Sized>(&mut self, dom: &D) -> bool {
        if self.state == WatchState::Idle && dom.exists(&self.container_selector) {
            debug!(container = self.container_selector.as_str(), "watching application");
            self.state = WatchState::Watching;
        }
        self.state == WatchState::Watching
    }

    /// Process one mutation batch. Returns `true` exactly when this batch
    /// completed the application and a record must be submitted.
    pub fn process(&mut self, batch: &[MutationRecord]) -> bool {
        match self.state {
            WatchState::Watching => {}
            WatchState::Fired => {
                if self.container_removed(batch) {
                    debug!("application container closed, watcher reset");
                    self.state = WatchState::Idle;
                }
                return false;
            }
            WatchState::Idle => return false,
        }

        let succeeded = batch.iter().any(|record| {
            record
                .added_nodes
                .iter()
                .any(|node| fragment_has_class(node, &self.success_class))
        });

        if succeeded {
            info!("easy apply submission detected");
            self.state = WatchState::Fired;
        } else if self.container_removed(batch) {
            debug!("application container closed before submit, watcher reset");
            self.state = WatchState::Idle;
        }
        succeeded
    }

    /// Detach, e.g. on navigation.
    pub fn reset(&mut self) {
        self.state = WatchState::Idle;
    }

    fn container_removed(&self, batch: &[MutationRecord]) -> bool {
        batch.iter().any(|record| {
            record
                .removed_nodes
                .iter()
                .any(|node| fragment_matches(node, &self.container_selector))
        })
    }
}
