//! `glancectl fmt`: load, normalize and re-render a config.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glancectl_core::{parse, render_file};
use tracing::info;

#[derive(Parser, Debug)]
pub struct FmtArgs {
    /// Config file to format
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(long = "out", value_name = "PATH", conflicts_with = "check")]
    output: Option<PathBuf>,

    /// Exit with an error if the file is not already formatted
    #[arg(long)]
    check: bool,
}

pub fn run_fmt(args: FmtArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let document =
        parse(&text).with_context(|| format!("Failed to load {}", args.file.display()))?;
    let formatted = render_file(&document);

    if args.check {
        if formatted != text {
            bail!("{} is not formatted", args.file.display());
        }
        println!("✅ {} is formatted", args.file.display());
        return Ok(());
    }

    match args.output {
        Some(out) => {
            fs::write(&out, &formatted)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!(
                "formatted {} -> {} ({} pages)",
                args.file.display(),
                out.display(),
                document.pages.len()
            );
        }
        None => print!("{formatted}"),
    }
    Ok(())
}
