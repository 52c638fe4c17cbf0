//! Widget docs from the `## Widgets` chapter of `configuration.md`.

use glancectl_core::{Value, WidgetDoc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::text::{dedent, sections};

const WIDGETS_HEADING: &str = "## Widgets";

static SUBSECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^###\s+(.+?)\n").expect("widget heading regex"));

static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\s+type:\s*([A-Za-z0-9_-]+)").expect("widget type regex"));

static EXAMPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```(?:yaml|yml)(.*?)```").expect("example block regex"));

/// Extract one doc per widget type, sorted by type. When several sections
/// declare the same type the first one wins.
pub fn extract_widgets(config_doc: &str) -> Vec<WidgetDoc> {
    let Some(chapter) = widgets_chapter(config_doc) else {
        debug!("no widgets chapter found");
        return Vec::new();
    };

    let mut docs: Vec<WidgetDoc> = Vec::new();
    for section in sections(chapter, &SUBSECTION_RE) {
        let body = dedent(section.body).trim().to_string();
        let Some(caps) = TYPE_RE.captures(&body) else {
            continue;
        };
        let widget_type = caps[1].trim().to_string();
        if docs.iter().any(|doc| doc.widget_type == widget_type) {
            debug!(widget_type, section = section.name, "duplicate widget type, keeping the first");
            continue;
        }
        let example = extract_example(&body, &widget_type);
        docs.push(WidgetDoc {
            name: section.name.to_string(),
            widget_type,
            markdown: body,
            example,
        });
    }

    docs.sort_by(|a, b| a.widget_type.cmp(&b.widget_type));
    docs
}

/// From `## Widgets` up to the next second-level heading.
fn widgets_chapter(text: &str) -> Option<&str> {
    let start = text.find(WIDGETS_HEADING)?;
    let end = text[start + WIDGETS_HEADING.len()..]
        .find("\n## ")
        .map_or(text.len(), |offset| start + WIDGETS_HEADING.len() + offset);
    Some(&text[start..end])
}

/// The node for `widget_type` inside the first YAML block of a section.
pub fn extract_example(body: &str, widget_type: &str) -> Option<Value> {
    let block = EXAMPLE_RE.captures(body)?;
    let snippet = dedent(&block[1]);
    let snippet = snippet.trim();
    if snippet.is_empty() {
        return None;
    }
    let parsed = match serde_yaml::from_str::<serde_yaml::Value>(snippet) {
        Ok(parsed) => Value::from_yaml(parsed),
        Err(err) => {
            debug!(widget_type, error = %err, "example block is not valid YAML");
            return None;
        }
    };
    find_widget_with_type(&parsed, widget_type).cloned()
}

/// Depth-first, document-order search for a mapping whose `type` is
/// `expected`.
pub fn find_widget_with_type<'a>(node: &'a Value, expected: &str) -> Option<&'a Value> {
    match node {
        Value::Mapping(map) => {
            if let Some(Value::String(t)) = map.get("type") {
                if t.trim() == expected {
                    return Some(node);
                }
            }
            map.values()
                .find_map(|value| find_widget_with_type(value, expected))
        }
        Value::Sequence(items) => items
            .iter()
            .find_map(|item| find_widget_with_type(item, expected)),
        _ => None,
    }
}
