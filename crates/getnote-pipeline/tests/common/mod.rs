//! Common test utilities for pipeline tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// The sample note used by the end-to-end checks
pub const SAMPLE_NOTE: &str = "<html><head><title>Foo - Get笔记</title></head><body><h1>Foo</h1><p>标签: alpha, beta</p><p>创建于: 2023-03-03 12:00:00</p></body></html>";

/// Build an in-memory zip archive from `(name, bytes)` pairs.
///
/// Names ending in `/` are added as directories.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).expect("add directory");
        } else {
            zip.start_file(*name, options).expect("start file");
            zip.write_all(bytes).expect("write entry");
        }
    }

    zip.finish().expect("finish zip").into_inner()
}

/// Write an archive into a fresh temp directory.
///
/// Returns the temp directory (which must be kept alive) and the archive path.
pub fn write_zip(entries: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("export.zip");
    std::fs::write(&path, build_zip(entries)).expect("write archive");
    (temp_dir, path)
}

/// Split a rendered note into its YAML front matter and body.
pub fn split_document(document: &str) -> (serde_yaml::Value, String) {
    let rest = document.strip_prefix("---\n").expect("opening delimiter");
    let end = rest.find("\n---\n").expect("closing delimiter");
    let yaml = serde_yaml::from_str(&rest[..end]).expect("valid front matter");
    let body = rest[end + "\n---\n".len()..].to_string();
    (yaml, body)
}

/// Every file below `dir`, relative, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let Ok(read_dir) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in read_dir.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(dir) {
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    files.sort();
    files
}
