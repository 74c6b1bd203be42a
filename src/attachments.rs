//! Attachment staging pipeline
//!
//! Selected or dropped files are validated and converted into inline
//! attachment records before a send consumes them. Each file is handled
//! independently: an oversized or unreadable file is rejected with a warning
//! while the rest of the batch continues. Files are read concurrently but
//! staged in selection order.

use crate::config::AttachmentsConfig;
use crate::error::PulsechatError;
use crate::session::{Attachment, AttachmentKind};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Validates and converts files into pending inline attachments
///
/// The pending list is consumed (drained) by the next send. Staging is not
/// gated by the send lock; it only populates the pending list.
#[derive(Debug, Default)]
pub struct AttachmentPipeline {
    config: AttachmentsConfig,
    pending: Vec<Attachment>,
}

impl AttachmentPipeline {
    /// Creates a pipeline with the given limits
    pub fn new(config: AttachmentsConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
        }
    }

    /// Stages a batch of files from disk
    ///
    /// Files are read concurrently and appended to the pending list in
    /// selection order. Failures are per-file and non-fatal: the returned
    /// vector carries one error per rejected file while the remaining files
    /// are staged normally.
    pub async fn stage_files(&mut self, paths: &[PathBuf]) -> Vec<PulsechatError> {
        let limit = self.config.max_size_bytes;
        let reads = paths.iter().map(|path| read_attachment(path, limit));
        let results = join_all(reads).await;

        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(attachment) => {
                    debug!(name = %attachment.name, size = attachment.size, "Staged attachment");
                    self.pending.push(attachment);
                }
                Err(error) => {
                    warn!(%error, "Skipping attachment");
                    errors.push(error);
                }
            }
        }
        errors
    }

    /// Stages one attachment from in-memory bytes
    ///
    /// Used when content arrives without a backing file (drag-and-drop
    /// payloads, tests). The same size limit applies.
    ///
    /// # Errors
    ///
    /// Returns `PulsechatError::AttachmentTooLarge` when the content exceeds
    /// the configured limit.
    pub fn stage_bytes(
        &mut self,
        name: impl Into<String>,
        mime: &str,
        bytes: &[u8],
    ) -> Result<(), PulsechatError> {
        let name = name.into();
        let size = bytes.len() as u64;
        if size > self.config.max_size_bytes {
            return Err(PulsechatError::AttachmentTooLarge {
                name,
                size,
                limit: self.config.max_size_bytes,
            });
        }

        self.pending.push(build_attachment(name, mime, bytes));
        Ok(())
    }

    /// Returns the pending attachments without consuming them
    pub fn pending(&self) -> &[Attachment] {
        &self.pending
    }

    /// Drains the pending list, transferring ownership to the caller
    pub fn take_pending(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.pending)
    }

    /// Discards all pending attachments
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }
}

/// Reads one file and converts it to an inline attachment
async fn read_attachment(path: &Path, limit: u64) -> Result<Attachment, PulsechatError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        PulsechatError::Attachment(format!("Cannot stat {}: {}", path.display(), e))
    })?;
    let size = metadata.len();
    if size > limit {
        return Err(PulsechatError::AttachmentTooLarge { name, size, limit });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        PulsechatError::Attachment(format!("Cannot read {}: {}", path.display(), e))
    })?;

    Ok(build_attachment(name, mime_for_path(path), &bytes))
}

fn build_attachment(name: String, mime: &str, bytes: &[u8]) -> Attachment {
    Attachment {
        kind: AttachmentKind::from_mime(mime),
        url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        name,
        size: bytes.len() as u64,
    }
}

/// Guesses a MIME type from the file extension
///
/// Unknown extensions fall back to `application/octet-stream`, which
/// classifies as a plain file attachment.
fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("pdf") => "application/pdf",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("txt") | Some("md") => "text/plain",
        Some("yaml") | Some("yml") => "text/yaml",
        _ => "application/octet-stream",
    }
}
