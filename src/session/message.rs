//! Message and attachment types for conversation sessions
//!
//! This module defines the message structures exchanged between the user and
//! the assistant, along with inline attachments bound to a message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed (or staged) by the user
    User,
    /// Message produced by the assistant
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Attachment classification derived from the MIME type prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// MIME type starts with `image/`
    Image,
    /// Everything else
    File,
}

impl AttachmentKind {
    /// Classify a MIME type string
    ///
    /// # Examples
    ///
    /// ```
    /// use pulsechat::session::AttachmentKind;
    ///
    /// assert_eq!(AttachmentKind::from_mime("image/png"), AttachmentKind::Image);
    /// assert_eq!(AttachmentKind::from_mime("application/pdf"), AttachmentKind::File);
    /// ```
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else {
            Self::File
        }
    }
}

/// An inline file or image bound to a message
///
/// Attachments carry their content as a `data:` URI; they live in the
/// pending list until a send consumes them, after which they are owned by
/// the message they were attached to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Image or file, derived from the MIME prefix
    pub kind: AttachmentKind,
    /// Inline data URI (`data:<mime>;base64,<payload>`)
    pub url: String,
    /// File name as presented by the user
    pub name: String,
    /// Size in bytes of the original content
    pub size: u64,
}

/// One turn in a session, authored by either the user or the assistant
///
/// Messages are immutable once appended to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: Uuid,
    /// Author of the message
    pub role: Role,
    /// Markdown-flavored message text
    pub content: String,
    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Attachments bound to this message, in staging order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use pulsechat::session::{ChatMessage, Role};
    ///
    /// let msg = ChatMessage::user("Show me revenue trends");
    /// assert_eq!(msg.role, Role::User);
    /// assert!(msg.attachments.is_empty());
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
        }
    }

    /// Creates a new user message carrying attachments
    pub fn user_with_attachments(
        content: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            attachments,
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use pulsechat::session::{ChatMessage, Role};
    ///
    /// let msg = ChatMessage::assistant("Here is your summary");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
        }
    }
}
