//! glancectl CLI - editor and tooling for Glance dashboard configs
//!
//! Subcommands:
//! - `edit`: interactive page/column/widget editor with live YAML preview
//! - `fmt`: load a config and write it back in canonical form
//! - `widgets` / `templates`: browse the scraped reference data
//! - `docs`: quick reference for page and column layout
//! - `scrape`: rebuild reference data from the Glance Markdown docs
//! - `config`: manage ~/.glancectl/config.toml

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod prompter;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "glancectl",
    author,
    version,
    about = "Build and tidy Glance dashboard configuration files",
    long_about = "Assemble a Glance glance.yml from pages, columns and widgets with a live \
                  preview, reformat existing configs, and browse widget docs and \
                  preconfigured page templates scraped from the Glance documentation."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Reference data JSON (overrides config and GLANCECTL_REFERENCE_DATA)
    #[arg(long, global = true, value_name = "PATH")]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Edit a config interactively
    Edit(commands::edit::EditArgs),
    /// Load a config and print or write it in canonical form
    Fmt(commands::fmt::FmtArgs),
    /// List known widget types or show one widget's docs
    Widgets(commands::reference::WidgetsArgs),
    /// List preconfigured page templates or print one
    Templates(commands::reference::TemplatesArgs),
    /// Show the page/column quick reference from the Glance docs
    Docs(commands::docs::DocsArgs),
    /// Rebuild reference data from the Glance docs
    Scrape(commands::scrape::ScrapeArgs),
    /// Manage glancectl configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let reference = cli.reference.as_deref();
    match cli.command {
        Commands::Edit(args) => commands::run_edit(args, reference)?,
        Commands::Fmt(args) => commands::run_fmt(args)?,
        Commands::Widgets(args) => commands::run_widgets(args, reference)?,
        Commands::Templates(args) => commands::run_templates(args, reference)?,
        Commands::Docs(args) => commands::run_docs(args)?,
        Commands::Scrape(args) => commands::run_scrape(args)?,
        Commands::Config(args) => config::run_config(args, reference)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
