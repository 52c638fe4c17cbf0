//! `glancectl docs`: quick reference for page and column layout.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glancectl_core::GlanceConfig;
use glancectl_scrape::quick_reference;

#[derive(Parser, Debug)]
pub struct DocsArgs {
    /// Directory with configuration.md and glance.yml (default: config docs_dir)
    #[arg(long, value_name = "DIR")]
    docs: Option<PathBuf>,
}

pub fn run_docs(args: DocsArgs) -> Result<()> {
    let config = GlanceConfig::load()?;
    let docs_dir = args.docs.unwrap_or_else(|| config.docs_dir());

    let reference = quick_reference(&docs_dir);
    if reference.is_empty() {
        eprintln!(
            "⚠️  No Glance docs found in {}; pass --docs or set docs_dir",
            docs_dir.display()
        );
        return Ok(());
    }
    println!("{}", reference.compose().trim_end());
    Ok(())
}
