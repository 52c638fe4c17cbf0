//! Deterministic YAML emitter.
//!
//! Output is stable across saves so that diffs stay small: two-space indent,
//! insertion order, block style only, and a fixed quoting rule for strings.
//! Do not swap this for a generic serializer; quoting and layout are part of
//! the file format.

use std::fmt::Write;

use crate::document::Document;
use crate::value::Value;

const INDENT: &str = "  ";

/// Characters that force a string into double quotes.
const SIGNIFICANT_CHARS: [char; 8] = [':', '#', '-', '[', ']', '{', '}', '\n'];

/// Characters that cannot start a plain scalar.
const INDICATORS: [char; 12] = ['\'', '"', '&', '*', '!', '|', '>', '%', '@', '`', ',', '?'];

/// YAML 1.1 booleans; still read as bools by some Glance-side parsers.
const LEGACY_BOOLS: [&str; 6] = ["yes", "no", "on", "off", "y", "n"];

/// Render the document without a trailing newline (live preview).
pub fn render(document: &Document) -> String {
    render_value(&document.to_value(), 0)
}

/// Render the document as saved to disk: the preview plus one newline.
pub fn render_file(document: &Document) -> String {
    let mut text = render(document);
    text.push('\n');
    text
}

/// Render any value at the given nesting depth.
pub fn render_value(value: &Value, indent: usize) -> String {
    let space = INDENT.repeat(indent);
    match value {
        Value::Mapping(map) => {
            if map.is_empty() {
                return format!("{space}{{}}");
            }
            let mut lines = Vec::with_capacity(map.len());
            for (key, val) in map {
                let key = quote_string(key);
                if val.is_container() {
                    lines.push(format!("{space}{key}:"));
                    lines.push(render_value(val, indent + 1));
                } else {
                    lines.push(format!("{space}{key}: {}", format_scalar(val)));
                }
            }
            lines.join("\n")
        }
        Value::Sequence(items) => {
            if items.is_empty() {
                return format!("{space}[]");
            }
            let mut lines = Vec::with_capacity(items.len());
            for item in items {
                if item.is_container() {
                    lines.push(format!("{space}-"));
                    lines.push(render_value(item, indent + 1));
                } else {
                    lines.push(format!("{space}- {}", format_scalar(item)));
                }
            }
            lines.join("\n")
        }
        scalar => format!("{space}{}", format_scalar(scalar)),
    }
}

/// Inline text of a scalar. Containers fall back to their flow form, which
/// only happens when a caller asks for a single-line value explicitly.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => "null".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => quote_string(s),
        Value::Sequence(_) | Value::Mapping(_) => format_flow(value),
    }
}

/// Single-line flow form: `[a, b]` / `{k: v}` with every string quoted,
/// since flow context gives `,` and brackets a meaning of their own.
pub fn format_flow(value: &Value) -> String {
    match value {
        Value::String(s) => double_quote(s),
        Value::Sequence(items) => {
            let items: Vec<_> = items.iter().map(format_flow).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", double_quote(k), format_flow(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        scalar => format_scalar(scalar),
    }
}

/// Floats always keep a fractional part so they reload as floats.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return ".nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let text = f.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

/// Bare unless empty (`''`) or unsafe, in which case double-quoted.
pub fn quote_string(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if needs_quotes(s) {
        return double_quote(s);
    }
    s.to_string()
}

/// Double-quoted scalar. Anything a YAML reader would reject or treat as a
/// line break is written as a `\uXXXX` escape.
pub fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if needs_escape(c) => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Outside the YAML printable set, or a Unicode line/paragraph separator.
pub(crate) fn needs_escape(c: char) -> bool {
    !matches!(
        c,
        '\u{20}'..='\u{7E}'
            | '\u{A0}'..='\u{2027}'
            | '\u{202A}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn needs_quotes(s: &str) -> bool {
    s.contains(SIGNIFICANT_CHARS)
        || s.contains(needs_escape)
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.starts_with(INDICATORS)
        || LEGACY_BOOLS.iter().any(|b| b.eq_ignore_ascii_case(s))
        || !reads_back_verbatim(s)
}

/// A bare scalar is only safe if a YAML parser returns the same string:
/// `true`, `10`, `null`, `*ref`, `'x'` and friends are not.
fn reads_back_verbatim(s: &str) -> bool {
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == s
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ColumnSize, Widget};
    use crate::value::Mapping;

    #[test]
    fn test_quoting_rules() {
        assert_eq!(quote_string("plain"), "plain");
        assert_eq!(quote_string("needs: quoting"), "\"needs: quoting\"");
        assert_eq!(quote_string(""), "''");
        assert_eq!(quote_string(" padded"), "\" padded\"");
        assert_eq!(quote_string("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote_string("hacker-news"), "\"hacker-news\"");
        assert_eq!(quote_string("London, United Kingdom"), "London, United Kingdom");
    }

    #[test]
    fn test_strings_that_would_change_type_are_quoted() {
        assert_eq!(quote_string("true"), "\"true\"");
        assert_eq!(quote_string("10"), "\"10\"");
        assert_eq!(quote_string("null"), "\"null\"");
        assert_eq!(quote_string("~"), "\"~\"");
        assert_eq!(quote_string("*alias"), "\"*alias\"");
        assert_eq!(quote_string("'single'"), "\"'single'\"");
        assert_eq!(quote_string("yes"), "\"yes\"");
        assert_eq!(quote_string("Off"), "\"Off\"");
        assert_eq!(quote_string("@handle"), "\"@handle\"");
    }

    #[test]
    fn test_non_printable_characters_are_escaped() {
        assert_eq!(quote_string("a\u{7f}b"), "\"a\\u007Fb\"");
        assert_eq!(quote_string("a\u{85}b"), "\"a\\u0085b\"");
        assert_eq!(quote_string("a\u{90}b"), "\"a\\u0090b\"");
        assert_eq!(quote_string("a\u{2028}b"), "\"a\\u2028b\"");
        assert_eq!(quote_string("a\u{1b}b"), "\"a\\u001Bb\"");
        assert_eq!(quote_string("tab\there"), "\"tab\\there\"");
        assert_eq!(quote_string("\"hi\" \\ bye"), "\"\\\"hi\\\" \\\\ bye\"");
        assert_eq!(quote_string("漢字 😀"), "漢字 😀");
    }

    #[test]
    fn test_scalar_formatting() {
        assert_eq!(format_scalar(&Value::Bool(true)), "true");
        assert_eq!(format_scalar(&Value::Bool(false)), "false");
        assert_eq!(format_scalar(&Value::Null), "null");
        assert_eq!(format_scalar(&Value::Int(-42)), "-42");
        assert_eq!(format_scalar(&Value::Float(2.5)), "2.5");
        assert_eq!(format_scalar(&Value::Float(3.0)), "3.0");
        assert_eq!(format_scalar(&Value::Float(f64::INFINITY)), ".inf");
    }

    #[test]
    fn test_flow_form() {
        let mut feed = Mapping::new();
        feed.insert("url".into(), Value::from("https://a, b"));
        feed.insert("limit".into(), Value::Int(3));
        let value = Value::Sequence(vec![Value::Mapping(feed), Value::Bool(true)]);
        assert_eq!(
            format_scalar(&value),
            "[{\"url\": \"https://a, b\", \"limit\": 3}, true]"
        );
        assert_eq!(Value::parse_form_value(&format_flow(&value)), value);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render_value(&Value::Mapping(Mapping::new()), 0), "{}");
        assert_eq!(render_value(&Value::Sequence(Vec::new()), 1), "  []");
        assert_eq!(render(&Document::new()), "pages:\n  []");
    }

    #[test]
    fn test_render_document() {
        let mut doc = Document::new();
        let page = doc.add_page("Home").unwrap();
        let column = doc.add_column(page, ColumnSize::Small).unwrap();
        let widget = Widget::new("calendar").unwrap();
        doc.add_widget(page, column, widget).unwrap();
        let column = doc.add_column(page, ColumnSize::Full).unwrap();
        let widget = Widget::new("rss")
            .unwrap()
            .with_title("News")
            .with_option("limit", 10)
            .unwrap()
            .with_option(
                "feeds",
                Value::Sequence(vec![Value::from("https://a.example/rss")]),
            )
            .unwrap()
            .with_option("tags", Value::Sequence(Vec::new()))
            .unwrap();
        doc.add_widget(page, column, widget).unwrap();

        let expected = "\
pages:
  -
    name: Home
    columns:
      -
        size: small
        widgets:
          -
            type: calendar
      -
        size: full
        widgets:
          -
            type: rss
            title: News
            limit: 10
            feeds:
              - \"https://a.example/rss\"
            tags:
              []";
        assert_eq!(render(&doc), expected);
        assert_eq!(render_file(&doc), format!("{expected}\n"));
    }

    #[test]
    fn test_settings_render_before_pages() {
        let mut doc = Document::new();
        let mut server = Mapping::new();
        server.insert("port".into(), Value::Int(8080));
        doc.settings.insert("server".into(), Value::Mapping(server));
        assert_eq!(render(&doc), "server:\n  port: 8080\npages:\n  []");
    }
}
