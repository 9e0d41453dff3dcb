#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const SAMPLE_NOTE: &str = "<html><head><title>Foo - Get笔记</title></head><body><h1>Foo</h1><p>标签: alpha, beta</p><p>创建于: 2023-03-03 12:00:00</p></body></html>";

/// Isolated vault, config file and archive location for one test
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub vault_path: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let vault_path = temp_dir.path().join("vault");
        let config_path = temp_dir.path().join("config").join("config.toml");
        std::fs::create_dir_all(&vault_path).expect("vault dir");

        Self {
            temp_dir,
            vault_path,
            config_path,
        }
    }

    /// `getnote` with this environment's config file and no inherited overrides
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("getnote").expect("getnote binary");
        cmd.arg("--config").arg(&self.config_path);
        for var in [
            "GETNOTE_VAULT_PATH",
            "GETNOTE_OUTPUT_FOLDER",
            "GETNOTE_LOG_LEVEL",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Write an archive with the given entries and return its path
    pub fn archive(&self, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = self.temp_dir.path().join("export.zip");
        std::fs::write(&path, build_zip(entries)).expect("write archive");
        path
    }

    pub fn vault_file(&self, relative: &str) -> PathBuf {
        self.vault_path.join(relative)
    }
}

pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        zip.start_file(*name, options).expect("start file");
        zip.write_all(bytes).expect("write entry");
    }

    zip.finish().expect("finish zip").into_inner()
}

pub fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}
