//! Get笔记 archive import
//!
//! Reads an exported zip archive, converts every note under `notes/` to
//! Markdown with front matter and writes it into a vault folder. The archive,
//! the HTML converter and the vault are injected as trait objects so the
//! orchestrator can run against real files or in-memory fixtures.

pub mod converter;
pub mod error;
pub mod import_pipeline;
pub mod note;
pub mod source;
pub mod writer;

pub use converter::{HtmdConverter, MarkdownConverter};
pub use error::{EntryFailure, ImportError, ImportResult, ImportStage};
pub use import_pipeline::{
    EntryOutcome, ImportObserver, ImportOptions, ImportPipeline, ImportSummary,
};
pub use note::{sanitize_filename, ConvertedNote, NoteConverter, MAX_FILENAME_CHARS, UNTITLED};
pub use source::{
    is_qualifying_entry, ArchiveEntry, NoteSource, RawNote, ZipNoteSource, NOTES_PREFIX,
    NOTE_EXTENSION,
};
pub use writer::{FsVaultWriter, InMemoryVaultWriter, VaultWriter};
