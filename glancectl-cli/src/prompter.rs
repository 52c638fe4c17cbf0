//! Terminal dialogs for the interactive editor, built on `inquire`.
//!
//! Esc and Ctrl+C both count as cancelling the dialog. A rejected submission
//! comes back with the reason, which is printed above the re-opened prompt.

use std::io::IsTerminal;

use glancectl_core::{ColumnSize, GlanceError, Prompter, Response, WidgetForm};
use inquire::error::CustomUserError;
use inquire::{InquireError, Select, Text};
use tracing::warn;

/// Check if we're attached to an interactive terminal
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Map an inquire answer onto the dialog response.
pub fn into_response<T>(answer: Result<T, InquireError>) -> Response<T> {
    match answer {
        Ok(value) => Response::Submitted(value),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Response::Cancelled
        }
        Err(err) => {
            warn!(error = %err, "prompt failed, treating as cancel");
            Response::Cancelled
        }
    }
}

fn show_error(error: Option<&GlanceError>) {
    if let Some(err) = error {
        eprintln!("❌ {err}");
    }
}

pub struct InquirePrompter {
    widget_types: Vec<String>,
}

impl InquirePrompter {
    /// `widget_types` feeds autocompletion of the type field.
    pub fn new(widget_types: Vec<String>) -> Self {
        Self { widget_types }
    }

    /// Ask for a widget type, suggesting known types by prefix.
    pub fn ask_widget_type(&self, initial: &str) -> Result<String, InquireError> {
        let types = self.widget_types.clone();
        let suggest = move |input: &str| -> Result<Vec<String>, CustomUserError> {
            let needle = input.trim().to_ascii_lowercase();
            Ok(types
                .iter()
                .filter(|t| t.to_ascii_lowercase().starts_with(&needle))
                .cloned()
                .collect())
        };
        Text::new("Widget type:")
            .with_initial_value(initial)
            .with_autocomplete(suggest)
            .with_help_message("Tab to complete; unknown types are allowed")
            .prompt()
    }

    fn ask_widget(&self, form: &WidgetForm) -> Result<WidgetForm, InquireError> {
        let widget_type = self.ask_widget_type(&form.widget_type)?;
        let title = Text::new("Title:")
            .with_initial_value(&form.title)
            .with_help_message("Optional; leave blank for none")
            .prompt()?;
        let options = ask_options(&form.options)?;
        Ok(WidgetForm {
            widget_type,
            title,
            options,
        })
    }
}

/// One prompt per existing option line, then new lines until an empty one.
fn ask_options(existing: &str) -> Result<String, InquireError> {
    let mut lines = Vec::new();
    for line in existing.lines().filter(|l| !l.trim().is_empty()) {
        let kept = Text::new("Option:")
            .with_initial_value(line)
            .with_help_message("key=value; clear the line to drop it")
            .prompt()?;
        if !kept.trim().is_empty() {
            lines.push(kept);
        }
    }
    loop {
        let extra = Text::new("New option:")
            .with_help_message("key=value, values are YAML (10, true, [a, b]); empty to finish")
            .prompt()?;
        if extra.trim().is_empty() {
            break;
        }
        lines.push(extra);
    }
    Ok(lines.join("\n"))
}

impl Prompter for InquirePrompter {
    fn page_name(&mut self, initial: &str, error: Option<&GlanceError>) -> Response<String> {
        show_error(error);
        into_response(
            Text::new("Page name:")
                .with_initial_value(initial)
                .with_help_message("Shown as the page's tab in Glance")
                .prompt(),
        )
    }

    fn column_size(&mut self, initial: &str, error: Option<&GlanceError>) -> Response<String> {
        show_error(error);
        let cursor = ColumnSize::ALL
            .iter()
            .position(|size| size.as_str() == initial.trim())
            .unwrap_or(0);
        into_response(
            Select::new("Column size:", ColumnSize::ALL.to_vec())
                .with_starting_cursor(cursor)
                .with_help_message("A page holds up to three columns, one or two of them full")
                .prompt()
                .map(|size| size.to_string()),
        )
    }

    fn widget(&mut self, form: &WidgetForm, error: Option<&GlanceError>) -> Response<WidgetForm> {
        show_error(error);
        into_response(self.ask_widget(form))
    }
}
