use anyhow::{Context, Result};
use colored::Colorize;
use getnote_config::{Config, ConfigOverrides, ImportSettings, SettingsStore, TomlSettingsStore};

use crate::cli::ConfigCommands;

/// Execute config subcommand
pub async fn execute(store: &TomlSettingsStore, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(store),
        ConfigCommands::Init { force } => init(store, force),
        ConfigCommands::SetOutputFolder { name } => set_output_folder(store, name),
    }
}

/// Show the current effective configuration
fn show(store: &TomlSettingsStore) -> Result<()> {
    let config = Config::load(store, ConfigOverrides::default())?;
    let toml = config
        .to_toml()
        .context("Failed to serialize config as TOML")?;

    println!(
        "{}",
        format!("# Effective configuration ({})", store.path().display()).dimmed()
    );
    print!("{toml}");
    Ok(())
}

/// Initialize a new config file
fn init(store: &TomlSettingsStore, force: bool) -> Result<()> {
    if !store.create_example(force)? {
        println!(
            "{} Config file already exists at: {}",
            "Error:".red().bold(),
            store.path().display()
        );
        println!("Use {} to overwrite", "--force".yellow());
        return Ok(());
    }

    println!(
        "{} Created config file at: {}",
        "Success:".green().bold(),
        store.path().display()
    );
    println!(
        "\n{}",
        "Default values will be used until you customize the config.".dimmed()
    );
    Ok(())
}

/// Persist a new output folder
fn set_output_folder(store: &dyn SettingsStore, name: String) -> Result<()> {
    let settings = ImportSettings::new(name.trim());
    settings.validate()?;

    let mut config = store.load()?;
    config.import = settings;
    store.save(&config)?;

    println!(
        "{} Output folder set to: {}",
        "Success:".green().bold(),
        config.import.output_folder
    );
    Ok(())
}
