//! `glancectl edit`: the interactive editing session.
//!
//! A menu loop over the current selection (page, column, widget). Every
//! action goes through the core `Editor`; errors are printed and the session
//! carries on. Only quitting ends it.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use glancectl_core::emit::{format_scalar, render_value};
use glancectl_core::{Document, Editor, GlanceConfig, Outcome, PathStep, Value};
use inquire::{Confirm, InquireError, Select, Text};
use tracing::debug;

use super::load_reference;
use crate::prompter::{can_prompt, InquirePrompter};

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Config file to open; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

pub fn run_edit(args: EditArgs, reference: Option<&Path>) -> Result<()> {
    if !can_prompt() {
        bail!("`glancectl edit` needs an interactive terminal; use `glancectl fmt` in scripts");
    }

    let config = GlanceConfig::load()?;
    let data = load_reference(&config, reference);
    let prompter = InquirePrompter::new(data.all_widget_types().to_vec());
    let target = args.file.clone().unwrap_or_else(|| config.default_output());

    let mut session = Session::new(Editor::new(data), prompter, target);
    if let Some(file) = args.file.as_deref().filter(|f| f.exists()) {
        session
            .editor
            .load(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;
        session.mark_saved();
        println!("📂 Loaded {}", file.display());
    }

    session.run()
}

/// Indices of the page, column and widget the menu acts on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Selection {
    page: Option<usize>,
    column: Option<usize>,
    widget: Option<usize>,
}

impl Selection {
    /// Keep the selection pointing at something that exists, moving to the
    /// nearest remaining item after a delete.
    fn clamp(&mut self, document: &Document) {
        self.page = self.page.and_then(|p| nearest(p, document.pages.len()));
        let Some(page) = self.page.map(|p| &document.pages[p]) else {
            self.column = None;
            self.widget = None;
            return;
        };
        self.column = self.column.and_then(|c| nearest(c, page.columns.len()));
        let Some(column) = self.column.map(|c| &page.columns[c]) else {
            self.widget = None;
            return;
        };
        self.widget = self.widget.and_then(|w| nearest(w, column.widgets.len()));
    }

    fn page_only(page: usize) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// `Home › column 2 (full) › rss`
    fn breadcrumb(&self, document: &Document) -> String {
        let Some(page) = self.page.and_then(|p| document.pages.get(p)) else {
            return format!("{} page(s), nothing selected", document.pages.len());
        };
        let mut parts = vec![format!("📄 {}", page.name)];
        if let Some((index, column)) = self
            .column
            .and_then(|c| page.columns.get(c).map(|col| (c, col)))
        {
            parts.push(format!("column {} ({})", index + 1, column.size));
            if let Some(widget) = self.widget.and_then(|w| column.widgets.get(w)) {
                parts.push(widget.label().to_string());
            }
        }
        parts.join(" › ")
    }
}

fn nearest(index: usize, len: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| index.min(last))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Preview,
    AddPage,
    SelectPage,
    RenamePage,
    DeletePage,
    AddColumn,
    SelectColumn,
    EditColumn,
    DeleteColumn,
    AddWidget,
    SelectWidget,
    EditWidget,
    DeleteWidget,
    EditOption,
    InsertTemplate,
    WidgetDocs,
    Save,
    SaveAs,
    Load,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Preview => "Show YAML preview",
            Action::AddPage => "Add page",
            Action::SelectPage => "Select page",
            Action::RenamePage => "Rename page",
            Action::DeletePage => "Delete page",
            Action::AddColumn => "Add column",
            Action::SelectColumn => "Select column",
            Action::EditColumn => "Change column size",
            Action::DeleteColumn => "Delete column",
            Action::AddWidget => "Add widget",
            Action::SelectWidget => "Select widget",
            Action::EditWidget => "Edit widget",
            Action::DeleteWidget => "Delete widget",
            Action::EditOption => "Edit widget option by path",
            Action::InsertTemplate => "Insert preconfigured page",
            Action::WidgetDocs => "Show widget docs",
            Action::Save => "Save",
            Action::SaveAs => "Save as…",
            Action::Load => "Load file…",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionAction {
    Show,
    Set,
    Insert,
    Delete,
}

impl fmt::Display for OptionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptionAction::Show => "Show value",
            OptionAction::Set => "Replace existing value",
            OptionAction::Insert => "Insert key or list item",
            OptionAction::Delete => "Delete value",
        })
    }
}

struct Session {
    editor: Editor,
    prompter: InquirePrompter,
    selection: Selection,
    target: PathBuf,
    saved_preview: String,
}

impl Session {
    fn new(editor: Editor, prompter: InquirePrompter, target: PathBuf) -> Self {
        let saved_preview = editor.preview().to_string();
        Self {
            editor,
            prompter,
            selection: Selection::default(),
            target,
            saved_preview,
        }
    }

    fn mark_saved(&mut self) {
        self.saved_preview = self.editor.preview().to_string();
    }

    fn has_unsaved_changes(&self) -> bool {
        self.saved_preview != self.editor.preview()
    }

    fn run(&mut self) -> Result<()> {
        println!("🧩 Glance config editor, saving to {}", self.target.display());
        loop {
            println!("\n{}", self.selection.breadcrumb(self.editor.document()));
            let action = match Select::new("Action:", available_actions(&self.editor, self.selection))
                .with_page_size(14)
                .prompt()
            {
                Ok(action) => action,
                Err(InquireError::OperationCanceled) => continue,
                Err(InquireError::OperationInterrupted) => Action::Quit,
                Err(err) => return Err(err).context("Menu prompt failed"),
            };

            if action == Action::Quit {
                if self.confirm_quit()? {
                    return Ok(());
                }
                continue;
            }

            debug!(?action, "menu action");
            if let Err(err) = self.perform(action) {
                eprintln!("❌ {err:#}");
            }
            self.selection.clamp(self.editor.document());
        }
    }

    fn confirm_quit(&self) -> Result<bool> {
        if !self.has_unsaved_changes() {
            return Ok(true);
        }
        match Confirm::new("Discard unsaved changes and quit?")
            .with_default(false)
            .prompt()
        {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(InquireError::OperationInterrupted) => Ok(true),
            Err(err) => Err(err).context("Confirm prompt failed"),
        }
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        let page = self.selection.page;
        let column = self.selection.column;
        let widget = self.selection.widget;

        match action {
            Action::Preview => println!("{}", self.editor.preview()),
            Action::AddPage => {
                if let Outcome::Applied(index) = self.editor.add_page(&mut self.prompter)? {
                    self.selection = Selection::page_only(index);
                }
            }
            Action::SelectPage => {
                let labels = self.editor.document().pages.iter().map(|p| p.name.clone()).collect();
                if let Some(index) = pick("Page:", labels, page)? {
                    self.selection = Selection::page_only(index);
                }
            }
            Action::RenamePage => {
                self.editor.rename_page(require(page, "page")?, &mut self.prompter)?;
            }
            Action::DeletePage => {
                let p = require(page, "page")?;
                let target = self.editor.document().page(p)?;
                let question = format!(
                    "Delete page '{}' with {} column(s)?",
                    target.name,
                    target.columns.len()
                );
                if confirm(&question)? {
                    self.editor.delete_page(p)?;
                }
            }
            Action::AddColumn => {
                let p = require(page, "page")?;
                if let Outcome::Applied(index) = self.editor.add_column(p, &mut self.prompter)? {
                    self.selection.column = Some(index);
                    self.selection.widget = None;
                }
            }
            Action::SelectColumn => {
                let p = require(page, "page")?;
                let labels = self
                    .editor
                    .document()
                    .page(p)?
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{} ({}, {} widget(s))", i + 1, c.size, c.widgets.len()))
                    .collect();
                if let Some(index) = pick("Column:", labels, column)? {
                    self.selection.column = Some(index);
                    self.selection.widget = None;
                }
            }
            Action::EditColumn => {
                let (p, c) = (require(page, "page")?, require(column, "column")?);
                let widgets = self.editor.document().column(p, c)?.widgets.len();
                let question = format!("Changing the size resets the column and drops its {widgets} widget(s). Continue?");
                if (widgets == 0 || confirm(&question)?)
                    && self.editor.edit_column(p, c, &mut self.prompter)?.is_applied()
                {
                    self.selection.widget = None;
                }
            }
            Action::DeleteColumn => {
                let (p, c) = (require(page, "page")?, require(column, "column")?);
                if confirm("Delete this column and its widgets?")? {
                    self.editor.delete_column(p, c)?;
                }
            }
            Action::AddWidget => {
                let (p, c) = (require(page, "page")?, require(column, "column")?);
                let Some(widget_type) = optional(self.prompter.ask_widget_type(""))? else {
                    return Ok(());
                };
                let initial = self.editor.widget_form_for(widget_type.trim());
                if let Outcome::Applied(index) =
                    self.editor.add_widget(p, c, initial, &mut self.prompter)?
                {
                    self.selection.widget = Some(index);
                }
            }
            Action::SelectWidget => {
                let (p, c) = (require(page, "page")?, require(column, "column")?);
                let labels = self
                    .editor
                    .document()
                    .column(p, c)?
                    .widgets
                    .iter()
                    .map(|w| match w.title() {
                        Some(title) => format!("{} ({})", title, w.widget_type()),
                        None => w.widget_type().to_string(),
                    })
                    .collect();
                if let Some(index) = pick("Widget:", labels, widget)? {
                    self.selection.widget = Some(index);
                }
            }
            Action::EditWidget => {
                let at = (require(page, "page")?, require(column, "column")?, require(widget, "widget")?);
                self.editor.edit_widget(at.0, at.1, at.2, &mut self.prompter)?;
            }
            Action::DeleteWidget => {
                let at = (require(page, "page")?, require(column, "column")?, require(widget, "widget")?);
                if confirm("Delete this widget?")? {
                    self.editor.delete_widget(at.0, at.1, at.2)?;
                }
            }
            Action::EditOption => {
                let at = (require(page, "page")?, require(column, "column")?, require(widget, "widget")?);
                self.edit_option(at)?;
            }
            Action::InsertTemplate => self.insert_template()?,
            Action::WidgetDocs => self.show_widget_docs()?,
            Action::Save => self.save()?,
            Action::SaveAs => {
                let Some(path) = ask_path("Save to:", &self.target)? else {
                    return Ok(());
                };
                self.target = path;
                self.save()?;
            }
            Action::Load => self.load()?,
            Action::Quit => {}
        }
        Ok(())
    }

    fn edit_option(&mut self, at: (usize, usize, usize)) -> Result<()> {
        let actions = vec![
            OptionAction::Show,
            OptionAction::Set,
            OptionAction::Insert,
            OptionAction::Delete,
        ];
        let Some(action) = optional(Select::new("Option action:", actions).prompt())? else {
            return Ok(());
        };
        let Some(path_text) = optional(
            Text::new("Option path:")
                .with_help_message("e.g. feeds[0].url; a new list item goes at index = length")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let path = PathStep::parse_path(&path_text)?;

        match action {
            OptionAction::Show => {
                let value = self.editor.document().widget(at.0, at.1, at.2)?.get_option(&path)?;
                if value.is_container() {
                    println!("{}", render_value(value, 0));
                } else {
                    println!("{}", format_scalar(value));
                }
            }
            OptionAction::Set | OptionAction::Insert => {
                let Some(value) = ask_value()? else {
                    return Ok(());
                };
                if action == OptionAction::Set {
                    let old = self.editor.set_option(at, &path, value)?;
                    println!("Replaced {}", format_scalar(&old));
                } else {
                    self.editor.insert_option(at, &path, value)?;
                }
            }
            OptionAction::Delete => {
                let removed = self.editor.delete_option(at, &path)?;
                println!("Removed {}", format_scalar(&removed));
            }
        }
        Ok(())
    }

    fn insert_template(&mut self) -> Result<()> {
        let labels: Vec<String> = self
            .editor
            .reference()
            .all_templates()
            .iter()
            .map(|t| t.name.clone())
            .collect();
        if labels.is_empty() {
            bail!("No templates in the reference data");
        }
        let Some(index) = pick("Template:", labels.clone(), None)? else {
            return Ok(());
        };
        let first_new = self.editor.document().pages.len();
        let added = self.editor.insert_template(&labels[index])?;
        println!("Inserted {added} page(s) from '{}'", labels[index]);
        if added > 0 {
            self.selection = Selection::page_only(first_new);
        }
        Ok(())
    }

    fn show_widget_docs(&self) -> Result<()> {
        let initial = self
            .selection
            .widget
            .zip(self.selection.page.zip(self.selection.column))
            .and_then(|(w, (p, c))| self.editor.document().widget(p, c, w).ok())
            .map(|w| w.widget_type().to_string())
            .unwrap_or_default();
        let Some(widget_type) = optional(self.prompter.ask_widget_type(&initial))? else {
            return Ok(());
        };
        let doc = self
            .editor
            .reference()
            .widget_doc(widget_type.trim())
            .ok_or_else(|| anyhow!("No docs for widget type '{}'", widget_type.trim()))?;
        println!("\n{} ({})\n\n{}", doc.display_name(), doc.widget_type, doc.markdown);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.editor
            .save(&self.target)
            .with_context(|| format!("Failed to save {}", self.target.display()))?;
        self.mark_saved();
        println!("💾 Saved {}", self.target.display());
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        if self.has_unsaved_changes() && !confirm("Discard unsaved changes?")? {
            return Ok(());
        }
        let Some(path) = ask_path("Load from:", &self.target)? else {
            return Ok(());
        };
        self.editor
            .load(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        self.selection = Selection::default();
        self.target = path;
        self.mark_saved();
        println!("📂 Loaded {}", self.target.display());
        Ok(())
    }
}

/// Menu entries that make sense for the current selection.
fn available_actions(editor: &Editor, selection: Selection) -> Vec<Action> {
    let document = editor.document();
    let page = selection.page.and_then(|p| document.pages.get(p));
    let column = page.and_then(|p| selection.column.and_then(|c| p.columns.get(c)));
    let widget = column.and_then(|c| selection.widget.and_then(|w| c.widgets.get(w)));

    let mut actions = vec![Action::Preview, Action::AddPage];
    if !document.pages.is_empty() {
        actions.push(Action::SelectPage);
    }
    if let Some(page) = page {
        actions.extend([Action::RenamePage, Action::DeletePage, Action::AddColumn]);
        if !page.columns.is_empty() {
            actions.push(Action::SelectColumn);
        }
    }
    if let Some(column) = column {
        actions.extend([Action::EditColumn, Action::DeleteColumn, Action::AddWidget]);
        if !column.widgets.is_empty() {
            actions.push(Action::SelectWidget);
        }
    }
    if widget.is_some() {
        actions.extend([Action::EditWidget, Action::DeleteWidget, Action::EditOption]);
    }
    if !editor.reference().all_templates().is_empty() {
        actions.push(Action::InsertTemplate);
    }
    if !editor.reference().widget_docs().is_empty() {
        actions.push(Action::WidgetDocs);
    }
    actions.extend([Action::Save, Action::SaveAs, Action::Load, Action::Quit]);
    actions
}

fn require(index: Option<usize>, what: &str) -> Result<usize> {
    index.ok_or_else(|| anyhow!("Select a {what} first"))
}

/// `Ok(None)` when the prompt was cancelled.
fn optional<T>(answer: Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Prompt failed"),
    }
}

fn pick(prompt: &str, labels: Vec<String>, current: Option<usize>) -> Result<Option<usize>> {
    let cursor = current.filter(|c| *c < labels.len()).unwrap_or(0);
    let choice = optional(
        Select::new(prompt, labels)
            .with_starting_cursor(cursor)
            .raw_prompt(),
    )?;
    Ok(choice.map(|option| option.index))
}

fn confirm(question: &str) -> Result<bool> {
    Ok(optional(Confirm::new(question).with_default(false).prompt())?.unwrap_or(false))
}

fn ask_path(prompt: &str, default: &Path) -> Result<Option<PathBuf>> {
    let default = default.display().to_string();
    let answer = optional(Text::new(prompt).with_initial_value(&default).prompt())?;
    Ok(answer
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .map(PathBuf::from))
}

fn ask_value() -> Result<Option<Value>> {
    let answer = optional(
        Text::new("Value:")
            .with_help_message("YAML: 10, true, null, \"text\", [a, b], {key: value}")
            .prompt(),
    )?;
    Ok(answer.map(|text| Value::parse_form_value(&text)))
}
