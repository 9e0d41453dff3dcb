//! Front matter composition
//!
//! Renders the metadata header that precedes every imported note:
//!
//! ```text
//! ---
//! title: Foo
//! created: 2023-03-03 12:00:00
//! tags:
//!   - alpha
//! ---
//!
//! body...
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt::Write;

use crate::datetime::CANONICAL_FORMAT;

/// Characters that force a scalar into double quotes.
const SPECIAL_CHARS: &[char] = &[
    ':', '#', '[', ']', '{', '}', '|', '>', '*', '&', '!', '%', '@', ',',
];

/// Ordered metadata header of one note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    /// Always emitted
    pub title: String,
    /// Emitted verbatim when present
    pub created: Option<String>,
    /// Emitted as a block list when non-empty
    pub tags: Vec<String>,
}

impl FrontMatter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_created(mut self, created: Option<String>) -> Self {
        self.created = created;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Render the `---` delimited block, ending with a newline.
    ///
    /// Title and tags go through [`escape_scalar`]. The creation time is
    /// written bare when canonical and escaped otherwise.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");

        // Writing into a String cannot fail.
        let _ = writeln!(out, "title: {}", escape_scalar(&self.title));

        if let Some(created) = &self.created {
            let _ = writeln!(out, "created: {}", escape_timestamp(created));
        }

        if !self.tags.is_empty() {
            out.push_str("tags:\n");
            for tag in &self.tags {
                let _ = writeln!(out, "  - {}", escape_scalar(tag));
            }
        }

        out.push_str("---\n");
        out
    }
}

/// A note ready to be written: front matter plus cleaned Markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

impl ProcessedDocument {
    pub fn new(front_matter: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            front_matter,
            body: body.into(),
        }
    }

    /// Front matter, one blank line, then the body.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.front_matter.render(), self.body)
    }
}

/// Quote a scalar when it contains a YAML indicator character or has
/// leading/trailing whitespace. Inner double quotes are backslash-escaped.
pub fn escape_scalar(value: &str) -> String {
    let needs_quotes = value.contains(SPECIAL_CHARS) || value.trim() != value;

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// A canonical `YYYY-MM-DD HH:MM:SS` value is plain YAML and stays bare;
/// any pass-through value is escaped like other scalars.
fn escape_timestamp(value: &str) -> String {
    if NaiveDateTime::parse_from_str(value, CANONICAL_FORMAT).is_ok() {
        value.to_string()
    } else {
        escape_scalar(value)
    }
}

/// Compose a full document from its parts.
pub fn compose(body: &str, title: &str, tags: &[String], created: Option<&str>) -> String {
    let front_matter = FrontMatter::new(title)
        .with_created(created.map(str::to_string))
        .with_tags(tags.to_vec());

    ProcessedDocument::new(front_matter, body).render()
}
