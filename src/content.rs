//! Page-side event handling
//!
//! [`ContentScript`] reacts to host events one at a time: navigation,
//! document snapshots, mutation batches from the Easy Apply observer, and
//! messages from the popup. [`ContentScript::handle_event`] is synchronous so
//! the logic can be driven without a runtime; [`ContentScript::run`] is the
//! event loop around it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::message::{Message, Response};
use crate::record::JobRecord;
use crate::relay::Relay;
use crate::session::PageSession;
use crate::sites::SiteMap;
use crate::storage::{KeyValueStore, JOB_DATA_KEY};
use crate::watcher::MutationRecord;

#[derive(Debug)]
pub enum PageEvent {
    /// The tab moved to a new URL
    Navigated { url: String },
    /// Fresh snapshot of the document
    DocumentChanged { html: String },
    /// One batch from the observer on the application container
    Mutations(Vec<MutationRecord>),
    /// Message for the page, with an optional reply slot
    Message {
        message: Message,
        reply: Option<oneshot::Sender<Response>>,
    },
    /// The deferred arm delay has passed
    ArmTimerElapsed,
}

/// Follow-up work the event loop performs after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the watcher once the page has settled
    ScheduleArm,
    /// Send this record to the background for appending
    Submit(JobRecord),
}

pub struct ContentScript {
    session: PageSession,
    sites: SiteMap,
    store: Arc<dyn KeyValueStore>,
    arm_delay: Duration,
}

impl ContentScript {
    pub fn new(
        config: &Config,
        url: impl Into<String>,
        html: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            session: PageSession::new(url, html, &config.easy_apply),
            sites: SiteMap::new(config.match_mode),
            store,
            arm_delay: Duration::from_millis(config.arm_delay_ms),
        }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    pub fn handle_event(&mut self, event: PageEvent) -> Option<Effect> {
        match event {
            PageEvent::Navigated { url } => {
                self.session.navigate(url);
                self.session.autosave().then_some(Effect::ScheduleArm)
            }
            PageEvent::DocumentChanged { html } => {
                self.session.update_document(html);
                self.session.try_arm();
                None
            }
            PageEvent::Mutations(batch) => self
                .session
                .on_mutations(&batch, &self.sites)
                .map(Effect::Submit),
            PageEvent::Message { message, reply } => {
                let (response, effect) = self.handle_message(message);
                if let (Some(response), Some(reply)) = (response, reply) {
                    let _ = reply.send(response);
                }
                effect
            }
            PageEvent::ArmTimerElapsed => {
                if self.session.try_arm() {
                    debug!("watcher armed after delay");
                }
                None
            }
        }
    }

    /// Handle a page-addressed message. Background actions get no response.
    pub fn handle_message(&mut self, message: Message) -> (Option<Response>, Option<Effect>) {
        match message {
            Message::LoadData => {
                let record = self.session.record(&self.sites).clone();
                match serde_json::to_value(&record) {
                    Ok(value) => self.store.put(JOB_DATA_KEY, value),
                    Err(e) => warn!(error = %e, "could not store job data"),
                }
                (Some(Response::Record(record)), None)
            }
            Message::AutoSave { value } => {
                info!(enabled = value, "autosave toggled");
                self.session.set_autosave(value);
                let effect = value.then_some(Effect::ScheduleArm);
                (Some(Response::ack()), effect)
            }
            Message::LoadSheet { .. } | Message::SaveJob { .. } => (None, None),
        }
    }

    /// Process events until the sender side closes. Submissions go out
    /// through `relay` on their own task, so the loop never waits on the
    /// append; the arm delay is a single pending deadline.
    pub async fn run(mut self, mut events: mpsc::Receiver<PageEvent>, relay: Relay) {
        let mut arm_at: Option<Instant> = None;

        loop {
            let event = tokio::select! {
                received = events.recv() => match received {
                    Some(event) => event,
                    None => break,
                },
                _ = wait_until(arm_at) => {
                    arm_at = None;
                    PageEvent::ArmTimerElapsed
                }
            };

            match self.handle_event(event) {
                Some(Effect::ScheduleArm) => {
                    arm_at = Some(Instant::now() + self.arm_delay);
                }
                Some(Effect::Submit(record)) => {
                    let relay = relay.clone();
                    tokio::spawn(async move { submit(&relay, record).await });
                }
                None => {}
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn submit(relay: &Relay, record: JobRecord) {
    let title = record.job_title.clone();
    match relay.send(Message::SaveJob { form_data: record }).await {
        Some(Response::Saved(outcome)) if outcome.success => {
            info!(title = title.as_str(), "application saved");
        }
        Some(Response::Saved(outcome)) => {
            warn!(error = outcome.error.as_deref().unwrap_or(""), "application not saved");
        }
        Some(other) => warn!(?other, "unexpected response to saveJob"),
        None => warn!("saveJob got no response"),
    }
}
