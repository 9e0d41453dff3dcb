//! Get笔记 export parser
//!
//! Pattern-based extraction and cleanup for notes exported from Get笔记 as
//! HTML. This crate never builds a DOM: every pass is a regex over the raw
//! markup, which keeps it tolerant of the inconsistent markup those exports
//! contain. It provides:
//! - Text normalization helpers (tag stripping, fuzzy line comparison)
//! - Title, tag and creation-time extraction
//! - Date-time normalization into `YYYY-MM-DD HH:MM:SS`
//! - Cleanup of converted Markdown (script leftovers, duplicated title line)
//! - Front matter composition
//!
//! All functions are synchronous and infallible: "not found" is expressed as
//! `None`, an empty list, or the current time.

pub mod cleanup;
pub mod datetime;
pub mod frontmatter;
pub mod metadata;
pub mod text;

pub use cleanup::{cleanup, remove_duplicate_title, strip_metadata_lines};
pub use datetime::{now_canonical, normalize, CANONICAL_FORMAT};
pub use frontmatter::{compose, escape_scalar, FrontMatter, ProcessedDocument};
pub use metadata::{
    extract_created_time, extract_metadata, extract_tags, extract_title, ExtractedMetadata,
    GETNOTE_TAG,
};
pub use text::{are_similar, strip_entities, strip_entities_and_symbols, strip_tags};
