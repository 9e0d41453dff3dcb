//! Per-entry conversion
//!
//! Turns one raw exported note into a finished document. No I/O happens
//! here, so a failure can be attributed to a single stage of one entry.

use crate::converter::MarkdownConverter;
use crate::error::{EntryFailure, ImportStage};
use crate::source::RawNote;
use getnote_parser::{cleanup, extract_metadata, strip_metadata_lines, FrontMatter, ProcessedDocument};
use std::sync::Arc;
use tracing::{debug, trace};

/// Characters not allowed in vault file names
const FORBIDDEN_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Longest file stem, in characters
pub const MAX_FILENAME_CHARS: usize = 100;

/// Name used when nothing better is available
pub const UNTITLED: &str = "untitled";

/// Make a title usable as a file stem.
///
/// Forbidden characters become `-`, the result is trimmed and cut to
/// [`MAX_FILENAME_CHARS`] characters; an empty result becomes `untitled`.
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if FORBIDDEN_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let truncated: String = replaced.trim().chars().take(MAX_FILENAME_CHARS).collect();

    if truncated.is_empty() {
        UNTITLED.to_string()
    } else {
        truncated
    }
}

/// A note ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedNote {
    /// Archive path the note came from
    pub source_path: String,
    /// Sanitized file stem, without `.md`
    pub file_stem: String,
    pub document: ProcessedDocument,
}

impl ConvertedNote {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.file_stem)
    }

    /// Vault-relative target path inside `folder`
    pub fn relative_path(&self, folder: &str) -> String {
        let folder = folder.trim().trim_end_matches('/');
        if folder.is_empty() {
            self.file_name()
        } else {
            format!("{folder}/{}", self.file_name())
        }
    }

    pub fn render(&self) -> String {
        self.document.render()
    }
}

/// Runs extraction, conversion, cleanup and composition for one note.
#[derive(Clone)]
pub struct NoteConverter {
    markdown: Arc<dyn MarkdownConverter>,
}

impl NoteConverter {
    pub fn new(markdown: Arc<dyn MarkdownConverter>) -> Self {
        Self { markdown }
    }

    pub fn convert(&self, raw: &RawNote) -> Result<ConvertedNote, EntryFailure> {
        trace!(path = %raw.path, stage = %ImportStage::Extracting, "processing entry");
        let metadata = extract_metadata(&raw.html);

        trace!(path = %raw.path, stage = %ImportStage::Converting, "processing entry");
        let markdown = self
            .markdown
            .convert(&raw.html)
            .map_err(|e| EntryFailure::new(&raw.path, ImportStage::Converting, e))?;

        trace!(path = %raw.path, stage = %ImportStage::Cleaning, "processing entry");
        let body = strip_metadata_lines(&cleanup(&markdown));

        trace!(path = %raw.path, stage = %ImportStage::Composing, "processing entry");
        let title = metadata
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                let stem = raw.file_stem().trim();
                if stem.is_empty() {
                    UNTITLED.to_string()
                } else {
                    stem.to_string()
                }
            });
        let file_stem = sanitize_filename(&title);

        debug!(
            path = %raw.path,
            title = %title,
            tags = metadata.tags.len(),
            "note converted"
        );

        let front_matter = FrontMatter::new(title)
            .with_created(metadata.created)
            .with_tags(metadata.tags);

        Ok(ConvertedNote {
            source_path: raw.path.clone(),
            file_stem,
            document: ProcessedDocument::new(front_matter, body),
        })
    }
}
