//! Messaging relay and background handler
//!
//! A [`Relay`] is the page side of one request/response round trip to the
//! background. Delivery is best-effort: a closed channel or a dropped reply
//! shows up as `None`, and nothing is retried.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::content::PageEvent;
use crate::message::{AppendOutcome, Message, Response};
use crate::sheets::SheetAppender;
use crate::storage::{KeyValueStore, SHEET_ID_KEY};

/// A message in flight together with its reply slot
#[derive(Debug)]
pub struct Envelope {
    pub message: Message,
    pub reply: oneshot::Sender<Response>,
}

#[derive(Debug, Clone)]
pub struct Relay {
    tx: mpsc::Sender<Envelope>,
}

impl Relay {
    pub fn channel(buffer: usize) -> (Relay, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Relay { tx }, rx)
    }

    pub async fn send(&self, message: Message) -> Option<Response> {
        let (reply, response) = oneshot::channel();
        if self.tx.send(Envelope { message, reply }).await.is_err() {
            warn!("background is gone, message dropped");
            return None;
        }
        match response.await {
            Ok(response) => Some(response),
            Err(_) => {
                debug!("message got no response");
                None
            }
        }
    }
}

/// Background side: owns the selected spreadsheet and the append collaborator.
pub struct Background<A> {
    appender: A,
    store: Arc<dyn KeyValueStore>,
    sheet_id: Option<String>,
    last_url: Option<String>,
}

impl<A: SheetAppender> Background<A> {
    /// Picks up a previously stored spreadsheet id, if any.
    pub fn new(appender: A, store: Arc<dyn KeyValueStore>) -> Self {
        let sheet_id = store
            .get(SHEET_ID_KEY)
            .and_then(|v| v.as_str().map(String::from));
        Self {
            appender,
            store,
            sheet_id,
            last_url: None,
        }
    }

    pub fn sheet_id(&self) -> Option<&str> {
        self.sheet_id.as_deref()
    }

    /// Handle a message addressed to the background. Page-side actions get
    /// no response.
    pub async fn handle(&mut self, message: Message) -> Option<Response> {
        match message {
            Message::LoadSheet { sheet_id } => {
                info!(sheet_id = sheet_id.as_str(), "spreadsheet selected");
                self.store
                    .put(SHEET_ID_KEY, serde_json::Value::String(sheet_id.clone()));
                self.sheet_id = Some(sheet_id);
                Some(Response::ack())
            }
            Message::SaveJob { form_data } => {
                let result = match self.sheet_id.as_deref() {
                    Some(sheet_id) => self.appender.append(sheet_id, &form_data).await,
                    None => Err(crate::error::AppendError::NoSheet),
                };
                let outcome = match result {
                    Ok(()) => AppendOutcome {
                        success: true,
                        error: None,
                    },
                    Err(e) => {
                        warn!(error = %e, "saving job failed");
                        AppendOutcome {
                            success: false,
                            error: Some(e.to_string()),
                        }
                    }
                };
                Some(Response::Saved(outcome))
            }
            Message::LoadData | Message::AutoSave { .. } => None,
        }
    }

    /// Tab-update notification. Returns the navigation event to forward to
    /// the page when the URL actually changed.
    pub fn on_tab_updated(&mut self, url: Option<&str>) -> Option<PageEvent> {
        let url = url?;
        if self.last_url.as_deref() == Some(url) {
            return None;
        }
        self.last_url = Some(url.to_string());
        Some(PageEvent::Navigated {
            url: url.to_string(),
        })
    }

    /// Answer envelopes until every [`Relay`] is dropped.
    pub async fn serve(mut self, mut rx: mpsc::Receiver<Envelope>) {
        while let Some(Envelope { message, reply }) = rx.recv().await {
            if let Some(response) = self.handle(message).await {
                let _ = reply.send(response);
            }
        }
    }
}
