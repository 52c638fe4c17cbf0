//! Preconfigured pages from `preconfigured-pages.md`.

use glancectl_core::TemplateEntry;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{dedent, sections};

static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^##\s+(.+?)\n").expect("template heading regex"));

static YAML_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```yaml(.*?)```").expect("template block regex"));

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("image regex"));

static REQUIRES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)requires\s+Glance\s+<code>([^<]+)</code>").expect("requires regex")
});

/// One template per `## <name>` section that carries a YAML block, in
/// document order.
pub fn extract_templates(preconfig_doc: &str) -> Vec<TemplateEntry> {
    sections(preconfig_doc, &SECTION_RE)
        .into_iter()
        .filter_map(|section| {
            let block = YAML_RE.captures(section.body)?;
            let yaml = dedent(&block[1]).trim_matches('\n').to_string();
            Some(TemplateEntry {
                name: section.name.to_string(),
                preview_image: IMAGE_RE
                    .captures(section.body)
                    .map(|caps| caps[1].to_string()),
                requires: REQUIRES_RE
                    .captures(section.body)
                    .map(|caps| caps[1].trim().to_string()),
                yaml,
            })
        })
        .collect()
}
