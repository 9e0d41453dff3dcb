//! getnote CLI library
//!
//! Argument parsing, logging setup and the command implementations behind
//! the `getnote` binary.

pub mod cli;
pub mod commands;
pub mod logging;

use anyhow::Result;
use getnote_config::{SettingsStore, TomlSettingsStore};
use std::process::ExitCode;

use cli::{Cli, Commands};
use commands::import::ImportArgs;

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let store = match cli.config {
        Some(path) => TomlSettingsStore::new(path),
        None => TomlSettingsStore::at_default_location()?,
    };

    // Logging needs the configured level before the config is fully
    // validated, so read it leniently here.
    let config_level = store.load().ok().and_then(|mut config| {
        config.apply_env();
        config.logging.level
    });
    logging::init(cli.log_level, cli.verbose, config_level.as_deref());

    match cli.command {
        Commands::Import {
            archive,
            vault,
            output_folder,
            dry_run,
        } => {
            let args = ImportArgs {
                archive,
                vault,
                output_folder,
                dry_run,
            };
            commands::import::execute(&store, args).await
        }

        Commands::Convert { file } => {
            commands::convert::execute(&file).await?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config(cmd) => {
            commands::config::execute(&store, cmd).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
