//! End-to-end tests for the `getnote` binary

mod common;

use common::{exists, TestEnv, SAMPLE_NOTE};
use predicates::prelude::*;

#[test]
fn test_help() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_import_sample_archive() {
    let env = TestEnv::new();
    let archive = env.archive(&[("notes/foo.html", SAMPLE_NOTE.as_bytes())]);

    env.cmd()
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 notes, 0 failed"));

    let written = std::fs::read_to_string(env.vault_file("Get笔记/Foo.md")).unwrap();
    assert!(written.starts_with("---\ntitle: Foo\ncreated: 2023-03-03 12:00:00\n"));
    assert!(written.contains("  - Get笔记\n"));
    assert!(!written.contains("标签:"));
}

#[test]
fn test_import_counts_failed_entries() {
    let env = TestEnv::new();
    let archive = env.archive(&[
        ("notes/foo.html", SAMPLE_NOTE.as_bytes()),
        ("notes/broken.html", b"\xff\xfe\xfd".as_slice()),
        ("attachments/image.png", b"\x89PNG".as_slice()),
    ]);

    env.cmd()
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 notes, 1 failed"))
        .stderr(predicate::str::contains("notes/broken.html"));
}

#[test]
fn test_import_missing_archive_is_input_error() {
    let env = TestEnv::new();

    env.cmd()
        .arg("import")
        .arg(env.temp_dir.path().join("missing.zip"))
        .arg("--vault")
        .arg(&env.vault_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Archive not found"));

    assert!(!exists(&env.vault_file("Get笔记")));
}

#[test]
fn test_import_corrupt_archive_fails_without_counts() {
    let env = TestEnv::new();
    let archive = env.temp_dir.path().join("corrupt.zip");
    std::fs::write(&archive, b"definitely not a zip file").unwrap();

    env.cmd()
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import failed:"))
        .stdout(predicate::str::contains("Imported").not());
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let env = TestEnv::new();
    let archive = env.archive(&[("notes/foo.html", SAMPLE_NOTE.as_bytes())]);

    env.cmd()
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foo.md"))
        .stdout(predicate::str::contains("Imported 1 notes, 0 failed"));

    assert!(!exists(&env.vault_file("Get笔记")));
}

#[test]
fn test_import_output_folder_flag() {
    let env = TestEnv::new();
    let archive = env.archive(&[("notes/foo.html", SAMPLE_NOTE.as_bytes())]);

    env.cmd()
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .arg("--output-folder")
        .arg("Inbox/Get")
        .assert()
        .success();

    assert!(exists(&env.vault_file("Inbox/Get/Foo.md")));
}

#[test]
fn test_convert_prints_document() {
    let env = TestEnv::new();
    let file = env.temp_dir.path().join("foo.html");
    std::fs::write(&file, SAMPLE_NOTE).unwrap();

    env.cmd()
        .arg("convert")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\ntitle: Foo\n"))
        .stdout(predicate::str::contains("created: 2023-03-03 12:00:00"))
        .stdout(predicate::str::contains("创建于").not());
}

#[test]
fn test_config_set_output_folder_persists() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set-output-folder", "Imported Notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported Notes"));

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output_folder = \"Imported Notes\""));

    let archive = env.archive(&[("notes/foo.html", SAMPLE_NOTE.as_bytes())]);
    env.cmd()
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .assert()
        .success();

    assert!(exists(&env.vault_file("Imported Notes/Foo.md")));
}

#[test]
fn test_config_set_output_folder_rejects_escape() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set-output-folder", "../outside"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid output folder"));

    assert!(!exists(&env.config_path));
}

#[test]
fn test_config_init_does_not_overwrite() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));
    assert!(exists(&env.config_path));

    env.cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    env.cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));
}

#[test]
fn test_env_output_folder_override() {
    let env = TestEnv::new();
    let archive = env.archive(&[("notes/foo.html", SAMPLE_NOTE.as_bytes())]);

    env.cmd()
        .env("GETNOTE_OUTPUT_FOLDER", "FromEnv")
        .arg("import")
        .arg(&archive)
        .arg("--vault")
        .arg(&env.vault_path)
        .assert()
        .success();

    assert!(exists(&env.vault_file("FromEnv/Foo.md")));
}
