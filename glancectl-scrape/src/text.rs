//! Markdown text helpers shared by the widget and template extractors.

use regex::Regex;

/// A heading and the text up to the next heading of the same level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

/// Split `text` at every match of `heading`, whose first capture group is
/// the section name. Text before the first heading is dropped.
pub fn sections<'a>(text: &'a str, heading: &Regex) -> Vec<Section<'a>> {
    let headings: Vec<_> = heading.captures_iter(text).collect();
    let mut out = Vec::with_capacity(headings.len());
    for (i, caps) in headings.iter().enumerate() {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = headings
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        out.push(Section {
            name: name.as_str().trim(),
            body: &text[whole.end()..end],
        });
    }
    out
}

/// Remove the whitespace prefix shared by every non-blank line.
/// Whitespace-only lines come out empty.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (content, newline) = match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        };
        if content.trim().is_empty() {
            out.push_str(newline);
        } else {
            out.push_str(content.strip_prefix(margin).unwrap_or(content));
            out.push_str(newline);
        }
    }
    out
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
