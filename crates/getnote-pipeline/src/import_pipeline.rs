//! Import Orchestrator
//!
//! Drives one import run over an exported archive.
//!
//! ## Run
//!
//! 1. **Folder check**: the output folder is checked once and created if missing
//! 2. **Per entry**, for each qualifying entry in archive order:
//!    extract → convert → clean → compose → write
//! 3. **Done**: report `{imported, failed}`
//!
//! Entries are processed one at a time; each write completes before the next
//! entry is read. A failing entry is logged with its path and stage, counted,
//! and skipped. Only failures to open or list the archive, or to prepare the
//! output folder, abort the run.
//!
//! ```text
//! ImportPipeline
//!   ├─> NoteSource        (archive entries)
//!   ├─> NoteConverter     (extract, convert, clean, compose)
//!   └─> VaultWriter       (output files)
//! ```

use crate::converter::MarkdownConverter;
use crate::error::{EntryFailure, ImportResult, ImportStage};
use crate::note::{ConvertedNote, NoteConverter};
use crate::source::{is_qualifying_entry, NoteSource, RawNote};
use crate::writer::VaultWriter;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Per-run options, resolved by the caller from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Vault-relative folder receiving the notes
    pub output_folder: String,
}

impl ImportOptions {
    pub fn new(output_folder: impl Into<String>) -> Self {
        Self {
            output_folder: output_folder.into(),
        }
    }

    fn folder(&self) -> &str {
        self.output_folder.trim().trim_end_matches('/')
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.imported + self.failed
    }
}

/// Outcome of one entry, as reported to an [`ImportObserver`]
#[derive(Debug)]
pub enum EntryOutcome<'a> {
    Imported { target: &'a str },
    Failed(&'a EntryFailure),
}

/// Receives progress callbacks during a run
pub trait ImportObserver: Send + Sync {
    /// Called once with the number of qualifying entries
    fn on_start(&self, _total: usize) {}

    /// Called after each entry
    fn on_entry(&self, _path: &str, _outcome: EntryOutcome<'_>) {}
}

/// The import orchestrator
pub struct ImportPipeline {
    source: Arc<dyn NoteSource>,
    converter: NoteConverter,
    writer: Arc<dyn VaultWriter>,
    observer: Option<Arc<dyn ImportObserver>>,
}

impl ImportPipeline {
    pub fn new(
        source: Arc<dyn NoteSource>,
        markdown: Arc<dyn MarkdownConverter>,
        writer: Arc<dyn VaultWriter>,
    ) -> Self {
        Self {
            source,
            converter: NoteConverter::new(markdown),
            writer,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Import every qualifying entry into `options.output_folder`.
    ///
    /// # Returns
    ///
    /// - `Ok(ImportSummary)` once all entries were attempted
    /// - `Err(...)` when the archive or the output folder is unusable
    pub async fn run(&self, options: &ImportOptions) -> ImportResult<ImportSummary> {
        let folder = options.folder();

        let entries: Vec<_> = self
            .source
            .entries()
            .await?
            .into_iter()
            .filter(is_qualifying_entry)
            .collect();

        info!(entries = entries.len(), folder = %folder, "starting import");
        if let Some(observer) = &self.observer {
            observer.on_start(entries.len());
        }

        if !folder.is_empty() && !self.writer.folder_exists(folder).await? {
            self.writer.create_folder(folder).await?;
        }

        let mut summary = ImportSummary::default();

        for entry in &entries {
            match self.process_entry(&entry.name, folder).await {
                Ok(target) => {
                    summary.imported += 1;
                    debug!(path = %entry.name, target = %target, "imported note");
                    self.notify(&entry.name, EntryOutcome::Imported { target: &target });
                }
                Err(failure) => {
                    summary.failed += 1;
                    error!(
                        path = %failure.path,
                        stage = %failure.stage,
                        error = %failure.source,
                        "failed to import note"
                    );
                    self.notify(&entry.name, EntryOutcome::Failed(&failure));
                }
            }
        }

        info!(
            imported = summary.imported,
            failed = summary.failed,
            "import finished"
        );
        Ok(summary)
    }

    /// Process one entry, returning the vault path it was written to.
    async fn process_entry(&self, name: &str, folder: &str) -> Result<String, EntryFailure> {
        let html = self
            .source
            .read_entry(name)
            .await
            .map_err(|e| EntryFailure::new(name, ImportStage::Extracting, e))?;

        let note: ConvertedNote = self.converter.convert(&RawNote::new(name, html))?;
        let target = note.relative_path(folder);

        self.writer
            .write(&target, &note.render())
            .await
            .map_err(|e| EntryFailure::new(name, ImportStage::Writing, e))?;

        Ok(target)
    }

    fn notify(&self, path: &str, outcome: EntryOutcome<'_>) {
        if let Some(observer) = &self.observer {
            observer.on_entry(path, outcome);
        }
    }
}
