//! `glancectl widgets` and `glancectl templates`: browse reference data.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glancectl_core::emit::render_value;
use glancectl_core::{GlanceConfig, Value};

use super::{load_reference, OutputFormat};

#[derive(Parser, Debug)]
pub struct WidgetsArgs {
    /// Widget type to show (omit to list all known types)
    #[arg(value_name = "TYPE")]
    widget_type: Option<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Template to print (omit to list all templates)
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run_widgets(args: WidgetsArgs, reference: Option<&Path>) -> Result<()> {
    let config = GlanceConfig::load()?;
    let data = load_reference(&config, reference);

    let Some(widget_type) = args.widget_type else {
        match args.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(data.all_widget_types())
                    .context("Failed to serialize widget types")?
            ),
            OutputFormat::Text => {
                for widget_type in data.all_widget_types() {
                    match data.widget_doc(widget_type) {
                        Some(doc) => println!("{:<20} {}", widget_type, doc.display_name()),
                        None => println!("{widget_type}"),
                    }
                }
            }
        }
        return Ok(());
    };

    let doc = data
        .widget_doc(widget_type.trim())
        .ok_or_else(|| anyhow!("Unknown widget type: {}", widget_type.trim()))?;

    match args.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(doc).context("Failed to serialize widget doc")?
        ),
        OutputFormat::Text => {
            println!("{} ({})\n", doc.display_name(), doc.widget_type);
            println!("{}", doc.markdown);
            if let Some(example) = &doc.example {
                println!("\nExample:\n");
                println!("{}", render_value(&Value::Sequence(vec![example.clone()]), 0));
            }
        }
    }
    Ok(())
}

pub fn run_templates(args: TemplatesArgs, reference: Option<&Path>) -> Result<()> {
    let config = GlanceConfig::load()?;
    let data = load_reference(&config, reference);

    let Some(name) = args.name else {
        match args.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(data.all_templates())
                    .context("Failed to serialize templates")?
            ),
            OutputFormat::Text => {
                for template in data.all_templates() {
                    match &template.requires {
                        Some(version) => println!("{} (requires Glance {})", template.name, version),
                        None => println!("{}", template.name),
                    }
                }
            }
        }
        return Ok(());
    };

    let template = data
        .template(name.trim())
        .ok_or_else(|| anyhow!("Unknown template: {}", name.trim()))?;

    match args.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(template).context("Failed to serialize template")?
        ),
        OutputFormat::Text => println!("{}", template.yaml),
    }
    Ok(())
}
