//! Reference data scraper for glancectl
//!
//! Turns the Glance Markdown docs into the JSON blob the editor reads:
//! widget docs with example snippets from `configuration.md`, and
//! preconfigured page templates from `preconfigured-pages.md`. The quick
//! reference (layout excerpts and the sample config) is read on demand.
//! Best effort: a missing file yields an empty list for its category.

pub mod quick_reference;
pub mod templates;
pub mod text;
pub mod widgets;

use std::fs;
use std::io;
use std::path::Path;

use glancectl_core::{GlanceError, ReferenceData, Result};
use tracing::{debug, info, warn};

pub use quick_reference::{quick_reference, QuickReference, SAMPLE_CONFIG};
pub use templates::extract_templates;
pub use widgets::{extract_example, extract_widgets, find_widget_with_type};

/// Widget documentation inside the docs directory.
pub const CONFIG_DOC: &str = "configuration.md";
/// Template documentation inside the docs directory.
pub const PRECONFIG_DOC: &str = "preconfigured-pages.md";
/// Where the scraper writes by default, relative to the docs directory.
pub const OUTPUT_FILE: &str = "reference_data.json";

/// Scrape both documents into reference data.
pub fn scrape(config_doc: &Path, preconfig_doc: &Path) -> ReferenceData {
    let widgets = read_doc(config_doc)
        .map(|text| extract_widgets(&text))
        .unwrap_or_default();
    let templates = read_doc(preconfig_doc)
        .map(|text| extract_templates(&text))
        .unwrap_or_default();
    info!(
        widgets = widgets.len(),
        templates = templates.len(),
        "scraped reference data"
    );
    ReferenceData::new(widgets, templates)
}

/// Scrape the standard file names inside `docs_dir`.
pub fn scrape_dir(docs_dir: &Path) -> ReferenceData {
    scrape(&docs_dir.join(CONFIG_DOC), &docs_dir.join(PRECONFIG_DOC))
}

/// Write pretty JSON with a trailing newline.
pub fn write_reference_data(path: &Path, data: &ReferenceData) -> Result<()> {
    let text = data.to_json_string()?;
    fs::write(path, text).map_err(|err| GlanceError::io(path, err))?;
    debug!(path = %path.display(), "wrote reference data");
    Ok(())
}

fn read_doc(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "doc not found, skipping");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read doc, skipping");
            None
        }
    }
}
