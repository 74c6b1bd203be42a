//! Session lifecycle management
//!
//! This module owns the set of conversation sessions and the active-session
//! pointer, and enforces the store invariants in one place:
//!
//! - the session set is never empty (deleting the last session clears it
//!   instead of removing it)
//! - the current pointer always references an existing session
//! - messages are append-only and immutable once appended

use crate::error::{PulsechatError, Result};
use crate::session::message::{ChatMessage, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Title given to freshly created (or cleared) sessions
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Assistant greeting inserted into every new session
pub const WELCOME_MESSAGE: &str = "Hi! I'm your Pulseboard assistant. Ask me about \
revenue, users, alerts, reports, your team, or workflows - or upload a file and \
I'll take a look.";

/// Maximum characters of the first user message used for an auto-derived title
const TITLE_DERIVE_LEN: usize = 30;

/// One independent, named conversation thread with its own message history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier
    pub id: Uuid,
    /// Display title, user-editable or auto-derived
    pub title: String,
    /// Ordered, append-only message sequence
    pub messages: Vec<ChatMessage>,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
    /// Time of the most recent append (UTC)
    pub updated_at: DateTime<Utc>,
    /// Set when the user renamed the session explicitly; suppresses
    /// title auto-derivation
    #[serde(default)]
    pub title_overridden: bool,
}

impl ChatSession {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            created_at: now,
            updated_at: now,
            title_overridden: false,
        }
    }

    /// Returns true if no user message has been appended yet
    fn has_user_message(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::User)
    }
}

/// Owns the conversation sessions and the active-session pointer
///
/// All operations are synchronous single-step mutations; multi-threaded
/// callers must serialize access (the orchestrator wraps the store in a
/// mutex).
///
/// # Examples
///
/// ```
/// use pulsechat::session::{ChatMessage, SessionStore};
///
/// let mut store = SessionStore::new();
/// let id = store.current_session_id();
/// store.append_message(id, ChatMessage::user("hello")).unwrap();
/// assert_eq!(store.current_session().messages.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    current: Uuid,
}

impl SessionStore {
    /// Creates a store with one default session holding the welcome message
    pub fn new() -> Self {
        let session = ChatSession::new();
        let current = session.id;
        Self {
            sessions: vec![session],
            current,
        }
    }

    /// Allocates a new session with a welcome message and makes it current
    ///
    /// # Returns
    ///
    /// The id of the newly created session
    pub fn create_session(&mut self) -> Uuid {
        let session = ChatSession::new();
        let id = session.id;
        self.sessions.push(session);
        self.current = id;
        debug!(session_id = %id, "Created session");
        id
    }

    /// Deletes a session, preserving the never-empty invariant
    ///
    /// Deleting the sole remaining session clears its messages and resets its
    /// title instead of removing it. When the deleted session was current, the
    /// most recently updated survivor becomes current.
    ///
    /// Unknown ids are ignored with a warning.
    pub fn delete_session(&mut self, id: Uuid) {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            warn!(session_id = %id, "Ignoring delete for unknown session");
            return;
        };

        if self.sessions.len() == 1 {
            let session = &mut self.sessions[index];
            session.messages.clear();
            session.title = DEFAULT_SESSION_TITLE.to_string();
            session.title_overridden = false;
            session.updated_at = Utc::now();
            debug!(session_id = %id, "Cleared sole remaining session");
            return;
        }

        self.sessions.remove(index);
        debug!(session_id = %id, "Deleted session");

        if self.current == id {
            match self.sessions.iter().max_by_key(|s| s.updated_at) {
                Some(survivor) => self.current = survivor.id,
                // Unreachable given the sole-session guard above, but the
                // invariant is cheap to restore.
                None => {
                    self.current = self.create_session();
                }
            }
        }
    }

    /// Renames a session
    ///
    /// A title that trims to empty leaves the session unchanged; otherwise the
    /// title is set verbatim and auto-derivation is disabled for this session.
    pub fn rename_session(&mut self, id: Uuid, title: &str) {
        if title.trim().is_empty() {
            return;
        }
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.title = title.to_string();
            session.title_overridden = true;
            debug!(session_id = %id, title, "Renamed session");
        }
    }

    /// Appends a message to a session and bumps its `updated_at`
    ///
    /// The first user message appended to a session derives its title
    /// (first 30 characters plus an ellipsis) unless the user has renamed it.
    ///
    /// # Errors
    ///
    /// Returns `PulsechatError::Session` for unknown session ids.
    pub fn append_message(&mut self, id: Uuid, message: ChatMessage) -> Result<()> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PulsechatError::Session(format!("Unknown session: {}", id)))?;

        let derive_title = message.role == Role::User
            && !session.title_overridden
            && !session.has_user_message();
        if derive_title {
            session.title = derive_session_title(&message.content);
        }

        session.messages.push(message);
        session.updated_at = Utc::now();
        Ok(())
    }

    /// Sets the current session; unknown ids are a silent no-op
    pub fn select_session(&mut self, id: Uuid) {
        if self.sessions.iter().any(|s| s.id == id) {
            self.current = id;
        } else {
            warn!(session_id = %id, "Ignoring select for unknown session");
        }
    }

    /// Serializes one session to a pretty JSON document
    ///
    /// This is the one-shot "export chat" action; the document is not a
    /// durable store and is never reloaded.
    ///
    /// # Errors
    ///
    /// Returns `PulsechatError::Session` for unknown session ids.
    pub fn export_session(&self, id: Uuid) -> Result<String> {
        let session = self
            .get(id)
            .ok_or_else(|| PulsechatError::Session(format!("Unknown session: {}", id)))?;
        Ok(serde_json::to_string_pretty(session).map_err(PulsechatError::Serialization)?)
    }

    /// Returns the session with the given id, if present
    pub fn get(&self, id: Uuid) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Returns the current session
    ///
    /// The store invariant guarantees the current pointer is always valid.
    pub fn current_session(&self) -> &ChatSession {
        self.sessions
            .iter()
            .find(|s| s.id == self.current)
            .expect("current session pointer must reference an existing session")
    }

    /// Returns the id of the current session
    pub fn current_session_id(&self) -> Uuid {
        self.current
    }

    /// Returns all sessions in insertion order
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Returns the number of sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Always false; the session set is never empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a session title from the first user message
///
/// Takes the first 30 characters and appends an ellipsis when truncated.
fn derive_session_title(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_DERIVE_LEN).collect();
    if content.chars().count() > TITLE_DERIVE_LEN {
        title.push_str("...");
    }
    title
}
