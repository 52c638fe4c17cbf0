//! `glancectl scrape`: rebuild reference data from the Glance docs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glancectl_core::GlanceConfig;
use glancectl_scrape::{scrape_dir, write_reference_data, OUTPUT_FILE};

#[derive(Parser, Debug)]
pub struct ScrapeArgs {
    /// Directory with configuration.md and preconfigured-pages.md (default: config docs_dir)
    #[arg(long, value_name = "DIR")]
    docs: Option<PathBuf>,

    /// Output JSON path (default: <docs>/reference_data.json)
    #[arg(long = "out", value_name = "PATH")]
    output: Option<PathBuf>,
}

pub fn run_scrape(args: ScrapeArgs) -> Result<()> {
    let config = GlanceConfig::load()?;
    let docs_dir = args.docs.unwrap_or_else(|| config.docs_dir());
    let output = args.output.unwrap_or_else(|| docs_dir.join(OUTPUT_FILE));

    let data = scrape_dir(&docs_dir);
    write_reference_data(&output, &data)
        .with_context(|| format!("Failed to write reference data to {}", output.display()))?;

    println!(
        "Wrote {} with {} widgets and {} templates.",
        output.display(),
        data.widget_docs().len(),
        data.all_templates().len()
    );
    Ok(())
}
