//! Send orchestration
//!
//! One send is a transaction against the current session: admit the input,
//! record the user message, simulate thinking time, route to a handler, and
//! record the assistant message. A single-flight gate rejects a second send
//! while one is in flight, so a session never interleaves two exchanges.

use crate::attachments::AttachmentPipeline;
use crate::collaborators::Collaborators;
use crate::config::Config;
use crate::dashboard::DashboardData;
use crate::error::{PulsechatError, Result};
use crate::latency::LatencySimulator;
use crate::router::IntentRouter;
use crate::session::{ChatMessage, SessionStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Placeholder content for an attachments-only message
pub const SENT_FILES_PLACEHOLDER: &str = "Sent file(s)";

/// Outcome of one send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The exchange completed; carries the assistant response text
    Completed(String),
    /// Nothing to send: whitespace-only input with no pending attachments
    EmptyInput,
    /// A send is already in flight; the input was rejected unchanged
    Busy,
}

/// Drives the full send flow against one session store
///
/// The orchestrator owns the attachment pipeline, the latency simulator, and
/// the intent router; the session store is shared with the caller so the UI
/// can render sessions while a send is in flight.
pub struct SendOrchestrator {
    store: Arc<Mutex<SessionStore>>,
    attachments: tokio::sync::Mutex<AttachmentPipeline>,
    latency: LatencySimulator,
    router: IntentRouter,
    dashboard: Option<DashboardData>,
    in_flight: AtomicBool,
}

/// Releases the single-flight gate when a send ends, including on panic
/// or cancellation.
struct GateGuard<'a>(&'a AtomicBool);

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SendOrchestrator {
    /// Creates an orchestrator over a shared session store
    pub fn new(
        store: Arc<Mutex<SessionStore>>,
        collaborators: Collaborators,
        config: &Config,
    ) -> Self {
        Self {
            store,
            attachments: tokio::sync::Mutex::new(AttachmentPipeline::new(
                config.attachments.clone(),
            )),
            latency: LatencySimulator::new(config.latency.clone()),
            router: IntentRouter::new(collaborators, &config.router),
            dashboard: config.dashboard.clone(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs one complete exchange against the current session
    ///
    /// Admission happens first: whitespace-only input with no pending
    /// attachments is a no-op, and a send while another is in flight is
    /// rejected without touching any state. An admitted send appends the
    /// user message (draining pending attachments into it), waits the
    /// simulated thinking time, routes to a handler, and appends the
    /// assistant response. Session state changes by exactly two messages
    /// or not at all.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session store rejects an append; routing
    /// failures degrade to a fixed response instead.
    pub async fn send(&self, text: &str) -> Result<SendOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() && self.attachments.lock().await.pending().is_empty() {
            debug!("Ignoring empty send");
            return Ok(SendOutcome::EmptyInput);
        }

        // Single-flight gate, acquired atomically at admission.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Rejecting send while another is in flight");
            return Ok(SendOutcome::Busy);
        }
        let _gate = GateGuard(&self.in_flight);

        let attachments = self.attachments.lock().await.take_pending();
        let content = if trimmed.is_empty() {
            SENT_FILES_PLACEHOLDER.to_string()
        } else {
            trimmed.to_string()
        };

        let session_id = {
            let mut store = self.store.lock().expect("session store poisoned");
            let id = store.current_session_id();
            store.append_message(id, ChatMessage::user_with_attachments(content, attachments.clone()))?;
            id
        };

        self.latency.delay(trimmed).await;
        let response = self.router.route(trimmed, &attachments, self.dashboard.as_ref()).await;

        {
            let mut store = self.store.lock().expect("session store poisoned");
            store.append_message(session_id, ChatMessage::assistant(response.clone()))?;
        }

        info!(%session_id, "Completed exchange");
        Ok(SendOutcome::Completed(response))
    }

    /// Reports whether a send is currently in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Stages files from disk for the next send
    ///
    /// Returns one error per rejected file; accepted files are staged in
    /// selection order.
    pub async fn stage_files(&self, paths: &[PathBuf]) -> Vec<PulsechatError> {
        self.attachments.lock().await.stage_files(paths).await
    }

    /// Stages one in-memory payload for the next send
    ///
    /// # Errors
    ///
    /// Returns `PulsechatError::AttachmentTooLarge` when the payload exceeds
    /// the configured limit.
    pub async fn stage_bytes(
        &self,
        name: impl Into<String>,
        mime: &str,
        bytes: &[u8],
    ) -> std::result::Result<(), PulsechatError> {
        self.attachments.lock().await.stage_bytes(name, mime, bytes)
    }

    /// Returns the number of attachments staged for the next send
    pub async fn pending_attachments(&self) -> usize {
        self.attachments.lock().await.pending().len()
    }

    /// Discards all staged attachments
    pub async fn clear_attachments(&self) {
        self.attachments.lock().await.clear_pending();
    }

    /// The shared session store
    pub fn store(&self) -> &Arc<Mutex<SessionStore>> {
        &self.store
    }
}

impl std::fmt::Debug for SendOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendOrchestrator")
            .field("in_flight", &self.is_busy())
            .finish_non_exhaustive()
    }
}
