use anyhow::{bail, Result};
use colored::Colorize;
use getnote_config::{Config, ConfigOverrides, SettingsStore};
use getnote_pipeline::{
    EntryOutcome, FsVaultWriter, HtmdConverter, ImportObserver, ImportOptions, ImportPipeline,
    ImportSummary, InMemoryVaultWriter, VaultWriter, ZipNoteSource,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Arguments of `getnote import`
#[derive(Debug, Clone)]
pub struct ImportArgs {
    pub archive: PathBuf,
    pub vault: Option<PathBuf>,
    pub output_folder: Option<String>,
    pub dry_run: bool,
}

/// Spinner updated as entries are processed
struct SpinnerObserver {
    pb: ProgressBar,
}

impl ImportObserver for SpinnerObserver {
    fn on_start(&self, total: usize) {
        self.pb.set_message(format!("Importing {total} notes..."));
    }

    fn on_entry(&self, path: &str, outcome: EntryOutcome<'_>) {
        match outcome {
            EntryOutcome::Imported { target } => self.pb.set_message(target.to_string()),
            EntryOutcome::Failed(_) => self.pb.set_message(format!("{path} (failed)")),
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Execute import command
pub async fn execute(store: &dyn SettingsStore, args: ImportArgs) -> Result<ExitCode> {
    if !args.archive.is_file() {
        bail!("Archive not found: {}", args.archive.display());
    }

    let config = Config::load(
        store,
        ConfigOverrides {
            vault_path: args.vault,
            output_folder: args.output_folder,
        },
    )?;
    debug!(archive = %args.archive.display(), dry_run = args.dry_run, "import requested");

    let pb = spinner(format!("Reading {}", args.archive.display()));

    let source = match ZipNoteSource::open(&args.archive).await {
        Ok(source) => source,
        Err(e) => {
            pb.finish_and_clear();
            return Ok(report_failure(&e));
        }
    };

    let memory = args.dry_run.then(|| Arc::new(InMemoryVaultWriter::new()));
    let writer: Arc<dyn VaultWriter> = match &memory {
        Some(memory) => memory.clone(),
        None => Arc::new(FsVaultWriter::new(&config.vault.path)),
    };

    let pipeline = ImportPipeline::new(Arc::new(source), Arc::new(HtmdConverter::new()), writer)
        .with_observer(Arc::new(SpinnerObserver { pb: pb.clone() }));

    let result = pipeline
        .run(&ImportOptions::new(&config.import.output_folder))
        .await;
    pb.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => return Ok(report_failure(&e)),
    };

    if let Some(memory) = memory {
        println!("{}", "Dry run, nothing written. Would create:".dimmed());
        for path in memory.files().keys() {
            println!("  {}", config.vault.path.join(path).display());
        }
    } else {
        println!(
            "{} {}",
            "Output:".dimmed(),
            config.output_dir().display()
        );
    }

    print_summary(&summary);
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &ImportSummary) {
    let line = format!(
        "Imported {} notes, {} failed",
        summary.imported, summary.failed
    );
    if summary.failed == 0 {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.yellow().bold());
    }
}

fn report_failure(error: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("{} {}", "Import failed:".red().bold(), error);
    ExitCode::FAILURE
}
