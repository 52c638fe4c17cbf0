//! YAML loader with structural normalization.
//!
//! The read side uses a real YAML parser; only structure matters here, not
//! formatting. Hand-written files often omit fields the editor relies on, so
//! every page, column and widget is normalized on the way in.

use tracing::{debug, warn};

use crate::document::{widget_from_mapping, Column, ColumnSize, Document, Page};
use crate::error::{GlanceError, Result};
use crate::value::{Mapping, Value};

/// Name given to pages that do not have one.
pub const DEFAULT_PAGE_NAME: &str = "Untitled page";

/// Parse configuration text into a fresh document.
pub fn parse(text: &str) -> Result<Document> {
    let node: serde_yaml::Value = serde_yaml::from_str(text)?;
    let mut root = match Value::from_yaml(node) {
        Value::Mapping(map) => map,
        _ => return Err(GlanceError::NotAMappingRoot),
    };

    let pages = match root.shift_remove("pages") {
        Some(Value::Sequence(pages)) => pages,
        _ => return Err(GlanceError::MissingPages),
    };

    let mut document = Document {
        pages: Vec::with_capacity(pages.len()),
        settings: root,
    };

    for (index, entry) in pages.into_iter().enumerate() {
        match entry {
            Value::Mapping(map) => document.pages.push(normalize_page(map)?),
            other => debug!(index, kind = kind_of(&other), "skipping non-mapping page"),
        }
    }

    debug!(
        pages = document.pages.len(),
        widgets = document.widget_count(),
        "loaded configuration"
    );
    Ok(document)
}

fn normalize_page(mut map: Mapping) -> Result<Page> {
    let name = match map.shift_remove("name") {
        Some(Value::String(name)) => name,
        Some(Value::Null) | None => DEFAULT_PAGE_NAME.to_string(),
        Some(other) => other
            .scalar_text()
            .unwrap_or_else(|| DEFAULT_PAGE_NAME.to_string()),
    };

    let entries = take_sequence(&mut map, "columns");
    let mut columns = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::Mapping(column) => columns.push(normalize_column(column)?),
            other => debug!(page = %name, index, kind = kind_of(&other), "skipping non-mapping column"),
        }
    }

    Ok(Page {
        name,
        columns,
        properties: map,
    })
}

fn normalize_column(mut map: Mapping) -> Result<Column> {
    let size = match map.shift_remove("size") {
        Some(Value::Null) | None => ColumnSize::Small,
        Some(Value::String(size)) => size.parse()?,
        Some(other) => {
            return Err(GlanceError::invalid_column_size(
                other.scalar_text().unwrap_or_else(|| "<container>".to_string()),
            ))
        }
    };

    let entries = take_sequence(&mut map, "widgets");
    let mut widgets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::Mapping(widget) => match widget_from_mapping(widget) {
                Some(widget) => widgets.push(widget),
                None => warn!(index, "dropping widget without a type"),
            },
            other => debug!(index, kind = kind_of(&other), "skipping non-mapping widget"),
        }
    }

    Ok(Column {
        size,
        widgets,
        properties: map,
    })
}

/// Remove `key` from `map`, defaulting to an empty list when it is missing or
/// not a sequence.
fn take_sequence(map: &mut Mapping, key: &str) -> Vec<Value> {
    match map.shift_remove(key) {
        Some(Value::Sequence(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(key, kind = kind_of(&other), "expected a list, using an empty one");
            Vec::new()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_mapping_root() {
        assert!(matches!(parse("- a\n- b\n"), Err(GlanceError::NotAMappingRoot)));
        assert!(matches!(parse("just text"), Err(GlanceError::NotAMappingRoot)));
    }

    #[test]
    fn test_rejects_missing_pages() {
        assert!(matches!(parse("theme: {}\n"), Err(GlanceError::MissingPages)));
        assert!(matches!(parse("pages: home\n"), Err(GlanceError::MissingPages)));
    }

    #[test]
    fn test_malformed_yaml_is_a_yaml_error() {
        assert!(matches!(parse("pages: [\n"), Err(GlanceError::Yaml { .. })));
    }

    #[test]
    fn test_fills_defaults_and_skips_junk() {
        let text = "\
pages:
  - just a string
  - columns:
      - 42
      - widgets:
          - type: clock
          - not a widget
          - title: no type here
  - name: Second
";
        let doc = parse(text).unwrap();
        assert_eq!(doc.pages.len(), 2);

        let first = &doc.pages[0];
        assert_eq!(first.name, DEFAULT_PAGE_NAME);
        assert_eq!(first.columns.len(), 1);
        assert_eq!(first.columns[0].size, ColumnSize::Small);
        assert_eq!(first.columns[0].widgets.len(), 1);
        assert_eq!(first.columns[0].widgets[0].widget_type(), "clock");

        assert_eq!(doc.pages[1].name, "Second");
        assert!(doc.pages[1].columns.is_empty());
    }

    #[test]
    fn test_invalid_column_size_is_an_error() {
        let text = "pages:\n  - name: A\n    columns:\n      - size: wide\n";
        assert!(matches!(
            parse(text),
            Err(GlanceError::InvalidColumnSize { .. })
        ));
    }

    #[test]
    fn test_keeps_unknown_keys_in_order() {
        let text = "\
server:
  port: 8080
pages:
  - name: Home
    slug: home
    columns:
      - size: full
        widgets:
          - type: rss
            limit: 5
            cache: 1h
            title: Feeds
theme:
  light: true
";
        let doc = parse(text).unwrap();
        let settings: Vec<_> = doc.settings.keys().cloned().collect();
        assert_eq!(settings, vec!["server", "theme"]);
        assert_eq!(doc.pages[0].properties.get("slug"), Some(&Value::from("home")));

        let widget = &doc.pages[0].columns[0].widgets[0];
        assert_eq!(widget.title(), Some("Feeds"));
        let keys: Vec<_> = widget.options().keys().cloned().collect();
        assert_eq!(keys, vec!["limit", "cache"]);
    }

    #[test]
    fn test_numeric_page_name_becomes_text() {
        let doc = parse("pages:\n  - name: 2024\n").unwrap();
        assert_eq!(doc.pages[0].name, "2024");
    }
}
