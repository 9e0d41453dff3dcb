//! Archive access
//!
//! [`NoteSource`] abstracts the exported archive so the orchestrator can be
//! driven by a real zip file or by an in-memory fixture.

use crate::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use zip::ZipArchive;

/// Top-level directory holding the exported notes
pub const NOTES_PREFIX: &str = "notes/";
/// Extension of an exported note
pub const NOTE_EXTENSION: &str = ".html";

/// One archive member as listed by the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Raw note read from the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNote {
    /// Archive path, e.g. `notes/foo.html`
    pub path: String,
    pub html: String,
}

impl RawNote {
    pub fn new(path: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            html: html.into(),
        }
    }

    /// Base file name without directories or extension
    pub fn file_stem(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.strip_suffix(NOTE_EXTENSION).unwrap_or(name)
    }
}

/// An archive entry is a note when it is a file under `notes/` ending in `.html`.
pub fn is_qualifying_entry(entry: &ArchiveEntry) -> bool {
    !entry.is_dir && entry.name.starts_with(NOTES_PREFIX) && entry.name.ends_with(NOTE_EXTENSION)
}

/// Source of exported notes
#[async_trait]
pub trait NoteSource: Send + Sync {
    /// All entries in archive order
    async fn entries(&self) -> ImportResult<Vec<ArchiveEntry>>;

    /// Read one entry as UTF-8 text
    async fn read_entry(&self, name: &str) -> ImportResult<String>;
}

/// Zip archive loaded into memory
pub struct ZipNoteSource {
    path: PathBuf,
    archive: Mutex<ZipArchive<Cursor<Vec<u8>>>>,
}

impl ZipNoteSource {
    /// Read and decode the archive at `path`.
    ///
    /// Any failure here is fatal for the import run.
    pub async fn open(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref().to_path_buf();

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ImportError::ArchiveOpen {
                path: path.clone(),
                source: e.into(),
            })?;

        Self::from_bytes(path, bytes)
    }

    /// Decode an archive already held in memory. `path` is used for messages.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> ImportResult<Self> {
        let path = path.into();
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|source| {
            ImportError::ArchiveOpen {
                path: path.clone(),
                source,
            }
        })?;

        info!(path = %path.display(), entries = archive.len(), "opened archive");

        Ok(Self {
            path,
            archive: Mutex::new(archive),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ZipArchive<Cursor<Vec<u8>>>> {
        self.archive
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl NoteSource for ZipNoteSource {
    async fn entries(&self) -> ImportResult<Vec<ArchiveEntry>> {
        let mut archive = self.lock();
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let file = archive
                .by_index_raw(index)
                .map_err(|source| ImportError::ArchiveOpen {
                    path: self.path.clone(),
                    source,
                })?;
            entries.push(ArchiveEntry {
                name: file.name().to_string(),
                is_dir: file.is_dir(),
            });
        }

        Ok(entries)
    }

    async fn read_entry(&self, name: &str) -> ImportResult<String> {
        let mut archive = self.lock();
        let mut file = archive.by_name(name).map_err(|source| ImportError::EntryRead {
            name: name.to_string(),
            source,
        })?;

        // The declared size comes from the archive header and is not trusted.
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ImportError::EntryRead {
                name: name.to_string(),
                source: e.into(),
            })?;

        debug!(entry = name, bytes = bytes.len(), "read entry");

        String::from_utf8(bytes).map_err(|source| ImportError::InvalidUtf8 {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifying_entries() {
        assert!(is_qualifying_entry(&ArchiveEntry::file("notes/a.html")));
        assert!(is_qualifying_entry(&ArchiveEntry::file("notes/sub/b.html")));
        assert!(!is_qualifying_entry(&ArchiveEntry::file("notes/a.htm")));
        assert!(!is_qualifying_entry(&ArchiveEntry::file("images/a.html")));
        assert!(!is_qualifying_entry(&ArchiveEntry::file("export/notes/a.html")));
        assert!(!is_qualifying_entry(&ArchiveEntry {
            name: "notes/dir.html/".to_string(),
            is_dir: true,
        }));
    }

    #[test]
    fn test_raw_note_file_stem() {
        assert_eq!(RawNote::new("notes/日记.html", "").file_stem(), "日记");
        assert_eq!(RawNote::new("notes/a/b.c.html", "").file_stem(), "b.c");
    }

    #[test]
    fn test_garbage_bytes_fail_to_open() {
        let result = ZipNoteSource::from_bytes("broken.zip", b"not a zip".to_vec());
        assert!(matches!(result, Err(ImportError::ArchiveOpen { .. })));
    }

    #[test]
    fn test_overstated_entry_size_is_not_preallocated() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("notes/a.html", options).unwrap();
        writer.write_all(b"<p>hi</p>").unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        // Claim a ~4 GiB uncompressed size in the central directory record.
        let central = bytes
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        bytes[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let source = ZipNoteSource::from_bytes("sized.zip", bytes).unwrap();
        let result = tokio_test::block_on(source.read_entry("notes/a.html"));
        if let Ok(text) = result {
            assert_eq!(text, "<p>hi</p>");
        }
    }
}
