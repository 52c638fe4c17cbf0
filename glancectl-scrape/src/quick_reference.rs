//! Quick reference: the parts of `configuration.md` that describe the page
//! layout, plus the sample `glance.yml` shipped with the docs.

use std::path::Path;

use crate::{read_doc, CONFIG_DOC};

/// Sample configuration inside the docs directory.
pub const SAMPLE_CONFIG: &str = "glance.yml";

/// (title, start marker, end marker) for each excerpt of `configuration.md`.
const EXCERPTS: [(&str, &str, &str); 3] = [
    ("Pages excerpt", "### Pages", "### Properties"),
    ("Columns excerpt", "### Columns", "## Widgets"),
    ("Widget shared properties", "### Shared Properties", "###"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickReference {
    /// `(title, excerpt)`; empty excerpts are kept so titles stay stable
    pub excerpts: Vec<(String, String)>,
    pub sample_config: Option<String>,
}

impl QuickReference {
    pub fn is_empty(&self) -> bool {
        self.sample_config.is_none() && self.excerpts.iter().all(|(_, text)| text.is_empty())
    }

    /// Plain-text rendering with a `--- title ---` banner per part.
    pub fn compose(&self) -> String {
        let mut parts = Vec::new();
        for (title, text) in &self.excerpts {
            parts.push(format!("--- {title} ---\n"));
            if !text.is_empty() {
                parts.push(text.clone());
            }
        }
        if let Some(sample) = &self.sample_config {
            parts.push(format!("--- Sample {SAMPLE_CONFIG} ---\n"));
            parts.push(sample.clone());
        }
        parts.join("\n")
    }
}

/// Build the quick reference from a docs directory. Missing files leave
/// their part out.
pub fn quick_reference(docs_dir: &Path) -> QuickReference {
    let excerpts = read_doc(&docs_dir.join(CONFIG_DOC))
        .map(|text| {
            EXCERPTS
                .iter()
                .map(|(title, start, end)| {
                    (title.to_string(), extract_section(&text, start, end).to_string())
                })
                .collect()
        })
        .unwrap_or_default();
    QuickReference {
        excerpts,
        sample_config: read_doc(&docs_dir.join(SAMPLE_CONFIG)),
    }
}

/// Text from `start` (inclusive) to the next `end` after it, trimmed. Runs to
/// the end of the document when `end` never follows; empty when `start` is
/// absent.
pub fn extract_section<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let Some(from) = text.find(start) else {
        return "";
    };
    let body_start = from + start.len();
    let to = text[body_start..]
        .find(end)
        .map_or(text.len(), |offset| body_start + offset);
    text[from..to].trim()
}
