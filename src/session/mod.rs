//! Conversation sessions: messages, attachments, and the session store

pub mod message;
pub mod store;

pub use message::{Attachment, AttachmentKind, ChatMessage, Role};
pub use store::{ChatSession, SessionStore, DEFAULT_SESSION_TITLE, WELCOME_MESSAGE};
