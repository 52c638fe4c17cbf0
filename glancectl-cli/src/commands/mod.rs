//! Command implementations for glancectl CLI

pub mod docs;
pub mod edit;
pub mod fmt;
pub mod reference;
pub mod scrape;

use std::path::Path;

use clap::ValueEnum;
use glancectl_core::{GlanceConfig, ReferenceData};
use tracing::debug;

// Re-export main dispatcher functions for flat access from main.rs
pub use docs::run_docs;
pub use edit::run_edit;
pub use fmt::run_fmt;
pub use reference::{run_templates, run_widgets};
pub use scrape::run_scrape;

/// Output format for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Reference data from the configured location. Never fails on a missing
/// or broken file; the result is just empty.
pub fn load_reference(config: &GlanceConfig, cli_override: Option<&Path>) -> ReferenceData {
    let path = config.reference_data_path(cli_override);
    debug!(path = %path.display(), "loading reference data");
    let data = ReferenceData::load(&path);
    if data.is_empty() {
        eprintln!(
            "⚠️  No reference data at {}; run `glancectl scrape` to build it",
            path.display()
        );
    }
    data
}
