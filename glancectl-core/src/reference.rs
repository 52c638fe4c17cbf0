//! Read-only reference data: widget docs, known widget types, templates.
//!
//! Built once at startup and handed to the editor. A missing or malformed
//! reference file never fails anything: the editor just loses autocomplete
//! and example insertion.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GlanceError, Result};
use crate::value::Value;

/// Documentation excerpt for one widget type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDoc {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub markdown: String,
    /// Example widget node from the docs, including its `type` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl WidgetDoc {
    /// Display name, falling back to the type.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.widget_type
        } else {
            &self.name
        }
    }
}

/// A preconfigured page from the docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    #[serde(default)]
    pub preview_image: Option<String>,
    /// Minimum Glance version, e.g. `v0.7.0`
    #[serde(default)]
    pub requires: Option<String>,
    pub yaml: String,
}

#[derive(Serialize)]
struct ReferenceFile<'a> {
    widgets: &'a [WidgetDoc],
    templates: &'a [TemplateEntry],
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    widgets: Vec<WidgetDoc>,
    templates: Vec<TemplateEntry>,
    widget_types: Vec<String>,
    by_type: HashMap<String, usize>,
}

impl ReferenceData {
    /// No widgets, no templates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble from already-extracted entries. The first doc for a type wins
    /// lookups.
    pub fn new(widgets: Vec<WidgetDoc>, templates: Vec<TemplateEntry>) -> Self {
        Self::assemble(widgets, templates, Vec::new())
    }

    fn assemble(
        widgets: Vec<WidgetDoc>,
        templates: Vec<TemplateEntry>,
        extra_types: Vec<String>,
    ) -> Self {
        let mut by_type = HashMap::with_capacity(widgets.len());
        for (index, doc) in widgets.iter().enumerate() {
            let widget_type = doc.widget_type.trim();
            if !widget_type.is_empty() {
                by_type.entry(widget_type.to_string()).or_insert(index);
            }
        }

        let widget_types = widgets
            .iter()
            .map(|doc| doc.widget_type.trim().to_string())
            .chain(extra_types.into_iter().map(|t| t.trim().to_string()))
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            widgets,
            templates,
            widget_types,
            by_type,
        }
    }

    /// Load from a reference JSON file, degrading to empty data on any problem.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no reference data");
                return Self::empty();
            }
        };
        let data = Self::from_json_str(&text);
        debug!(
            path = %path.display(),
            widgets = data.widgets.len(),
            templates = data.templates.len(),
            "loaded reference data"
        );
        data
    }

    /// Parse reference JSON leniently.
    ///
    /// Entries that do not fit the expected shape are skipped one by one. The
    /// older format where `widgets` is a list of bare type names is accepted;
    /// those types have no docs.
    pub fn from_json_str(text: &str) -> Self {
        let root: serde_json::Value = match serde_json::from_str(text) {
            Ok(root) => root,
            Err(err) => {
                warn!(error = %err, "reference data is not valid JSON, ignoring it");
                return Self::empty();
            }
        };
        let serde_json::Value::Object(mut root) = root else {
            warn!("reference data root is not an object, ignoring it");
            return Self::empty();
        };

        let mut widgets = Vec::new();
        let mut bare_types = Vec::new();
        for entry in take_array(&mut root, "widgets") {
            match entry {
                serde_json::Value::String(widget_type) => bare_types.push(widget_type),
                entry @ serde_json::Value::Object(_) => {
                    match serde_json::from_value::<WidgetDoc>(entry) {
                        Ok(doc) => widgets.push(doc),
                        Err(err) => debug!(error = %err, "skipping malformed widget entry"),
                    }
                }
                _ => debug!("skipping non-object widget entry"),
            }
        }

        let templates = take_array(&mut root, "templates")
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<TemplateEntry>(entry) {
                Ok(template) => Some(template),
                Err(err) => {
                    debug!(error = %err, "skipping malformed template entry");
                    None
                }
            })
            .collect();

        Self::assemble(widgets, templates, bare_types)
    }

    /// Serialize as the reference JSON blob (pretty, trailing newline).
    pub fn to_json_string(&self) -> Result<String> {
        let file = ReferenceFile {
            widgets: &self.widgets,
            templates: &self.templates,
        };
        let mut text = serde_json::to_string_pretty(&file)
            .map_err(|err| GlanceError::json("reference data", err))?;
        text.push('\n');
        Ok(text)
    }

    pub fn widget_doc(&self, widget_type: &str) -> Option<&WidgetDoc> {
        self.by_type
            .get(widget_type.trim())
            .and_then(|&index| self.widgets.get(index))
    }

    pub fn widget_docs(&self) -> &[WidgetDoc] {
        &self.widgets
    }

    /// Distinct, sorted type names.
    pub fn all_widget_types(&self) -> &[String] {
        &self.widget_types
    }

    pub fn all_templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    pub fn template(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn is_known_type(&self, widget_type: &str) -> bool {
        self.widget_types
            .binary_search_by(|t| t.as_str().cmp(widget_type.trim()))
            .is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty() && self.templates.is_empty() && self.widget_types.is_empty()
    }
}

fn take_array(root: &mut serde_json::Map<String, serde_json::Value>, key: &str) -> Vec<serde_json::Value> {
    match root.remove(key) {
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => {
            warn!(key, "reference data key is not an array, ignoring it");
            Vec::new()
        }
        None => Vec::new(),
    }
}
