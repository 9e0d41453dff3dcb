use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "getnote")]
#[command(about = "getnote - import exported Get笔记 notes into a Markdown vault")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value, then RUST_LOG, then 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/getnote/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an exported archive into the vault
    Import {
        /// Zip archive exported from Get笔记
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Vault directory (overrides config file)
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Folder inside the vault for imported notes (overrides config file)
        #[arg(short, long)]
        output_folder: Option<String>,

        /// Convert everything but write nothing; list target paths instead
        #[arg(long)]
        dry_run: bool,
    },

    /// Convert a single exported HTML note and print the Markdown
    Convert {
        #[arg(value_name = "HTML_FILE")]
        file: PathBuf,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current effective configuration
    Show,

    /// Initialize a new config file
    Init {
        /// Overwrite existing config file
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Persist the output folder used by future imports
    SetOutputFolder {
        #[arg(value_name = "NAME")]
        name: String,
    },
}
