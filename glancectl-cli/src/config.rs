use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glancectl_core::GlanceConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented config template
    Init(InitArgs),
    /// Show the effective configuration
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, reference: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(reference),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = GlanceConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&config_path, GlanceConfig::template())
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Point docs_dir at a Glance checkout's docs/ directory");
    println!("  3. Run: glancectl scrape");

    Ok(())
}

fn run_show(reference: Option<&Path>) -> Result<()> {
    let config = GlanceConfig::load()?;

    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    if !toml_str.trim().is_empty() {
        println!("{}", toml_str.trim_end());
        println!();
    }

    println!("# effective values");
    println!("# reference data: {}", config.reference_data_path(reference).display());
    println!("# docs dir:       {}", config.docs_dir().display());
    println!("# save path:      {}", config.default_output().display());

    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", GlanceConfig::config_path().display());
    Ok(())
}
