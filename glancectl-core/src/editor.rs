//! Editing session: a document, the reference data, and the live preview.
//!
//! Dialogs are a request/response seam (`Prompter`). A prompt either returns
//! a submission or a cancellation; invalid submissions are reported back into
//! the next prompt until the user gets it right or gives up. Nothing here
//! knows how prompts are shown.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::document::{ColumnSize, Document, Widget, RESERVED_WIDGET_KEYS};
use crate::emit;
use crate::error::{GlanceError, Result};
use crate::load;
use crate::path::PathStep;
use crate::reference::ReferenceData;
use crate::value::Value;

/// What a prompt returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    Submitted(T),
    Cancelled,
}

/// What a dialog-driven operation did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = ()> {
    Applied(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// The fields of the widget dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetForm {
    pub widget_type: String,
    pub title: String,
    /// One `key=value` per line
    pub options: String,
}

impl WidgetForm {
    /// Pre-fill the form from an existing widget. Scalars are written the way
    /// the emitter writes them, containers in flow form, so that submitting
    /// the form unchanged yields the same widget.
    pub fn from_widget(widget: &Widget) -> Self {
        let options = widget
            .options()
            .iter()
            .map(|(key, value)| format_form_line(key, value))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            widget_type: widget.widget_type().to_string(),
            title: widget.title().unwrap_or_default().to_string(),
            options,
        }
    }

    /// Pre-fill from a documentation example node (a mapping with `type`).
    pub fn from_example(widget_type: &str, example: &Value) -> Self {
        let mut form = WidgetForm {
            widget_type: widget_type.to_string(),
            ..Self::default()
        };
        let Some(map) = example.as_mapping() else {
            return form;
        };
        let mut lines = Vec::new();
        for (key, value) in map {
            match key.as_str() {
                "type" => {}
                "title" => form.title = value.scalar_text().unwrap_or_default(),
                _ => lines.push(format_form_line(key, value)),
            }
        }
        form.options = lines.join("\n");
        form
    }

    /// Validate and build the widget.
    pub fn to_widget(&self) -> Result<Widget> {
        let mut widget = Widget::new(&self.widget_type)?;
        widget.set_title(Some(&self.title));

        for (number, line) in self.options.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = split_form_line(line) else {
                return Err(GlanceError::InvalidOptionLine {
                    line: number + 1,
                    text: line.trim().to_string(),
                });
            };
            if RESERVED_WIDGET_KEYS.contains(&key.as_str()) {
                return Err(GlanceError::reserved_key(key));
            }
            widget.insert_option(&[PathStep::Key(key)], Value::parse_form_value(value))?;
        }
        Ok(widget)
    }
}

/// `key=value` as shown in the form. Keys that would not survive the trip
/// back through `split_form_line` are double-quoted.
fn format_form_line(key: &str, value: &Value) -> String {
    let plain = !key.is_empty()
        && !key.contains('=')
        && !key.starts_with('"')
        && key.trim() == key
        && !key.contains(emit::needs_escape);
    if plain {
        format!("{key}={}", emit::format_scalar(value))
    } else {
        format!("{}={}", emit::double_quote(key), emit::format_scalar(value))
    }
}

/// Split a form line into key and raw value. A key starting with `"` is a
/// YAML double-quoted string and may contain `=`; a bare key runs to the
/// first `=` and must not be blank.
fn split_form_line(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('"') {
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        return (!key.is_empty()).then(|| (key.to_string(), value));
    }

    let mut escaped = false;
    let mut end = None;
    for (i, c) in trimmed.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                end = Some(i);
                break;
            }
            _ => {}
        }
    }
    let end = end?;
    let key = serde_yaml::from_str::<String>(&trimmed[..=end]).ok()?;
    let value = trimmed[end + 1..].trim_start().strip_prefix('=')?;
    Some((key, value))
}

/// Front-end seam for the three dialogs. `error` is the reason the previous
/// submission was rejected, if any.
pub trait Prompter {
    fn page_name(&mut self, initial: &str, error: Option<&GlanceError>) -> Response<String>;

    fn column_size(&mut self, initial: &str, error: Option<&GlanceError>) -> Response<String>;

    fn widget(&mut self, form: &WidgetForm, error: Option<&GlanceError>) -> Response<WidgetForm>;
}

/// Ask until `apply` accepts the submission or the user cancels. User-input
/// errors are fed back into the next prompt; anything else is returned.
fn ask_until_valid<T: Clone, R>(
    initial: T,
    mut ask: impl FnMut(&T, Option<&GlanceError>) -> Response<T>,
    mut apply: impl FnMut(&T) -> Result<R>,
) -> Result<Outcome<R>> {
    let mut current = initial;
    let mut last_error: Option<GlanceError> = None;
    loop {
        match ask(&current, last_error.as_ref()) {
            Response::Cancelled => return Ok(Outcome::Cancelled),
            Response::Submitted(value) => match apply(&value) {
                Ok(result) => return Ok(Outcome::Applied(result)),
                Err(err) if err.is_user_input() => {
                    debug!(error = %err, "rejected input, asking again");
                    current = value;
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            },
        }
    }
}

pub struct Editor {
    document: Document,
    reference: ReferenceData,
    preview: String,
}

impl Editor {
    pub fn new(reference: ReferenceData) -> Self {
        let document = Document::new();
        let preview = emit::render(&document);
        Self {
            document,
            reference,
            preview,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Rendered YAML as of the last mutation.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    fn refresh_preview(&mut self) {
        self.preview = emit::render(&self.document);
        debug!(bytes = self.preview.len(), "preview refreshed");
    }

    /// Apply an outcome-producing mutation and re-render when it applied.
    fn after<T>(&mut self, outcome: Result<Outcome<T>>) -> Result<Outcome<T>> {
        if let Ok(Outcome::Applied(_)) = &outcome {
            self.refresh_preview();
        }
        outcome
    }

    fn mutated<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.refresh_preview();
        }
        result
    }

    // === Pages ===

    pub fn add_page(&mut self, prompter: &mut impl Prompter) -> Result<Outcome<usize>> {
        let document = &mut self.document;
        let outcome = ask_until_valid(
            String::new(),
            |name, err| prompter.page_name(name, err),
            |name| document.add_page(name),
        );
        self.after(outcome)
    }

    pub fn rename_page(&mut self, page: usize, prompter: &mut impl Prompter) -> Result<Outcome> {
        let initial = self.document.page(page)?.name.clone();
        let document = &mut self.document;
        let outcome = ask_until_valid(
            initial,
            |name, err| prompter.page_name(name, err),
            |name| document.rename_page(page, name),
        );
        self.after(outcome)
    }

    pub fn delete_page(&mut self, page: usize) -> Result<()> {
        let result = self.document.delete_page(page).map(|_| ());
        self.mutated(result)
    }

    // === Columns ===

    pub fn add_column(&mut self, page: usize, prompter: &mut impl Prompter) -> Result<Outcome<usize>> {
        self.document.page(page)?;
        let document = &mut self.document;
        let outcome = ask_until_valid(
            ColumnSize::Small.to_string(),
            |size, err| prompter.column_size(size, err),
            |size| document.add_column(page, size.parse()?),
        );
        self.after(outcome)
    }

    /// Recreates the column: the new size replaces the old and the widget
    /// list starts over empty.
    pub fn edit_column(
        &mut self,
        page: usize,
        column: usize,
        prompter: &mut impl Prompter,
    ) -> Result<Outcome> {
        let initial = self.document.column(page, column)?.size.to_string();
        let document = &mut self.document;
        let outcome = ask_until_valid(
            initial,
            |size, err| prompter.column_size(size, err),
            |size| document.edit_column(page, column, size.parse()?),
        );
        self.after(outcome)
    }

    pub fn delete_column(&mut self, page: usize, column: usize) -> Result<()> {
        let result = self.document.delete_column(page, column).map(|_| ());
        self.mutated(result)
    }

    // === Widgets ===

    /// Example option tree from the docs, used to pre-fill a new widget.
    pub fn widget_example(&self, widget_type: &str) -> Option<&Value> {
        self.reference
            .widget_doc(widget_type)
            .and_then(|doc| doc.example.as_ref())
    }

    /// Form pre-filled from the documentation example for `widget_type`, or a
    /// bare form when there is none.
    pub fn widget_form_for(&self, widget_type: &str) -> WidgetForm {
        match self.widget_example(widget_type) {
            Some(example) => WidgetForm::from_example(widget_type, example),
            None => WidgetForm {
                widget_type: widget_type.to_string(),
                ..WidgetForm::default()
            },
        }
    }

    pub fn add_widget(
        &mut self,
        page: usize,
        column: usize,
        initial: WidgetForm,
        prompter: &mut impl Prompter,
    ) -> Result<Outcome<usize>> {
        self.document.column(page, column)?;
        let reference = &self.reference;
        let document = &mut self.document;
        let outcome = ask_until_valid(
            initial,
            |form, err| prompter.widget(form, err),
            |form| {
                let widget = form.to_widget()?;
                warn_unknown_type(reference, widget.widget_type());
                document.add_widget(page, column, widget)
            },
        );
        self.after(outcome)
    }

    /// Replace a widget with the edited form. Options keep the order they
    /// have in the form, which starts out as the widget's own order.
    pub fn edit_widget(
        &mut self,
        page: usize,
        column: usize,
        index: usize,
        prompter: &mut impl Prompter,
    ) -> Result<Outcome> {
        let initial = WidgetForm::from_widget(self.document.widget(page, column, index)?);
        let reference = &self.reference;
        let document = &mut self.document;
        let outcome = ask_until_valid(
            initial,
            |form, err| prompter.widget(form, err),
            |form| {
                let widget = form.to_widget()?;
                warn_unknown_type(reference, widget.widget_type());
                document.replace_widget(page, column, index, widget).map(|_| ())
            },
        );
        self.after(outcome)
    }

    pub fn delete_widget(&mut self, page: usize, column: usize, index: usize) -> Result<()> {
        let result = self.document.delete_widget(page, column, index).map(|_| ());
        self.mutated(result)
    }

    // === Widget option subtrees ===

    pub fn insert_option(
        &mut self,
        (page, column, index): (usize, usize, usize),
        path: &[PathStep],
        value: Value,
    ) -> Result<()> {
        let result = self
            .document
            .widget_mut(page, column, index)
            .and_then(|w| w.insert_option(path, value));
        self.mutated(result)
    }

    pub fn set_option(
        &mut self,
        (page, column, index): (usize, usize, usize),
        path: &[PathStep],
        value: Value,
    ) -> Result<Value> {
        let result = self
            .document
            .widget_mut(page, column, index)
            .and_then(|w| w.set_option(path, value));
        self.mutated(result)
    }

    pub fn delete_option(
        &mut self,
        (page, column, index): (usize, usize, usize),
        path: &[PathStep],
    ) -> Result<Value> {
        let result = self
            .document
            .widget_mut(page, column, index)
            .and_then(|w| w.delete_option(path));
        self.mutated(result)
    }

    // === Templates ===

    /// Append the pages of a named template. Returns how many were added.
    pub fn insert_template(&mut self, name: &str) -> Result<usize> {
        let template = self
            .reference
            .template(name)
            .ok_or_else(|| GlanceError::TemplateNotFound {
                name: name.to_string(),
            })?;
        let parsed = match load::parse(&template.yaml) {
            Ok(parsed) => parsed,
            Err(GlanceError::NotAMappingRoot | GlanceError::MissingPages) => {
                return Err(GlanceError::TemplateWithoutPages {
                    name: name.to_string(),
                })
            }
            Err(err) => return Err(err),
        };
        let added = parsed.pages.len();
        self.document.pages.extend(parsed.pages);
        info!(template = name, pages = added, "inserted template");
        self.refresh_preview();
        Ok(added)
    }

    // === Files ===

    /// Write the rendered document. The document itself is never touched.
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.document.is_empty() {
            return Err(GlanceError::EmptyDocument);
        }
        fs::write(path, emit::render_file(&self.document))
            .map_err(|err| GlanceError::io(path, err))?;
        info!(path = %path.display(), pages = self.document.pages.len(), "saved configuration");
        Ok(())
    }

    /// Replace the document with the file's contents. On any error the
    /// current document stays as it was.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|err| GlanceError::io(path, err))?;
        self.load_str(&text)?;
        info!(path = %path.display(), pages = self.document.pages.len(), "loaded configuration");
        Ok(())
    }

    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let document = load::parse(text)?;
        self.document = document;
        self.refresh_preview();
        Ok(())
    }
}

fn warn_unknown_type(reference: &ReferenceData, widget_type: &str) {
    if !reference.all_widget_types().is_empty() && !reference.is_known_type(widget_type) {
        warn!(widget_type, "widget type is not in the reference data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    /// Replays canned answers and records the errors it was shown.
    #[derive(Default)]
    struct Scripted {
        names: VecDeque<Response<String>>,
        sizes: VecDeque<Response<String>>,
        widgets: VecDeque<Response<WidgetForm>>,
        seen_errors: Vec<String>,
        seen_forms: Vec<WidgetForm>,
    }

    impl Scripted {
        fn record(&mut self, error: Option<&GlanceError>) {
            if let Some(err) = error {
                self.seen_errors.push(err.to_string());
            }
        }
    }

    impl Prompter for Scripted {
        fn page_name(&mut self, _initial: &str, error: Option<&GlanceError>) -> Response<String> {
            self.record(error);
            self.names.pop_front().unwrap_or(Response::Cancelled)
        }

        fn column_size(&mut self, _initial: &str, error: Option<&GlanceError>) -> Response<String> {
            self.record(error);
            self.sizes.pop_front().unwrap_or(Response::Cancelled)
        }

        fn widget(&mut self, form: &WidgetForm, error: Option<&GlanceError>) -> Response<WidgetForm> {
            self.record(error);
            self.seen_forms.push(form.clone());
            self.widgets.pop_front().unwrap_or(Response::Cancelled)
        }
    }

    fn submit(text: &str) -> Response<String> {
        Response::Submitted(text.to_string())
    }

    fn form(widget_type: &str, title: &str, options: &str) -> WidgetForm {
        WidgetForm {
            widget_type: widget_type.into(),
            title: title.into(),
            options: options.into(),
        }
    }

    fn editor_with_column() -> Editor {
        let mut editor = Editor::new(ReferenceData::empty());
        let mut prompter = Scripted::default();
        prompter.names.push_back(submit("Home"));
        prompter.sizes.push_back(submit("full"));
        editor.add_page(&mut prompter).unwrap();
        editor.add_column(0, &mut prompter).unwrap();
        editor
    }

    #[test]
    fn test_add_page_retries_until_valid() {
        let mut editor = Editor::new(ReferenceData::empty());
        let mut prompter = Scripted::default();
        prompter.names.push_back(submit("   "));
        prompter.names.push_back(submit("Home"));

        let outcome = editor.add_page(&mut prompter).unwrap();
        assert_eq!(outcome, Outcome::Applied(0));
        assert_eq!(prompter.seen_errors, vec!["Page name cannot be empty"]);
        assert!(editor.preview().contains("name: Home"));
    }

    #[test]
    fn test_cancel_leaves_document_unchanged() {
        let mut editor = editor_with_column();
        let before = editor.document().clone();
        let mut prompter = Scripted::default();

        assert_eq!(editor.add_page(&mut prompter).unwrap(), Outcome::Cancelled);
        assert_eq!(editor.rename_page(0, &mut prompter).unwrap(), Outcome::Cancelled);
        assert_eq!(
            editor.add_widget(0, 0, WidgetForm::default(), &mut prompter).unwrap(),
            Outcome::Cancelled
        );
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_invalid_column_size_keeps_prior_state() {
        let mut editor = editor_with_column();
        let mut prompter = Scripted::default();
        prompter.widgets.push_back(Response::Submitted(form("clock", "", "")));
        editor
            .add_widget(0, 0, WidgetForm::default(), &mut prompter)
            .unwrap();

        prompter.sizes.push_back(submit("medium"));
        let outcome = editor.edit_column(0, 0, &mut prompter).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(prompter.seen_errors.len(), 1);

        let column = editor.document().column(0, 0).unwrap();
        assert_eq!(column.size, ColumnSize::Full);
        assert_eq!(column.widgets.len(), 1);
    }

    #[test]
    fn test_widget_form_validation() {
        let mut editor = editor_with_column();
        let mut prompter = Scripted::default();
        prompter.widgets.push_back(Response::Submitted(form("", "", "")));
        prompter
            .widgets
            .push_back(Response::Submitted(form("rss", "", "limit 10")));
        prompter
            .widgets
            .push_back(Response::Submitted(form("rss", "", "type=weather")));
        prompter
            .widgets
            .push_back(Response::Submitted(form("rss", "", "limit=1\nlimit=2")));
        prompter.widgets.push_back(Response::Submitted(form(
            "rss",
            " News ",
            "limit=10\n\ncache=12h\nstyle=vertical-list",
        )));

        let outcome = editor
            .add_widget(0, 0, WidgetForm::default(), &mut prompter)
            .unwrap();
        assert_eq!(outcome, Outcome::Applied(0));
        assert_eq!(prompter.seen_errors.len(), 4);
        // Rejected input is handed back for correction.
        assert_eq!(prompter.seen_forms[2].options, "limit 10");

        let widget = editor.document().widget(0, 0, 0).unwrap();
        assert_eq!(widget.title(), Some("News"));
        assert_eq!(widget.options().get("limit"), Some(&Value::Int(10)));
        assert_eq!(
            widget.options().get("style"),
            Some(&Value::from("vertical-list"))
        );
    }

    #[test]
    fn test_edit_widget_round_trips_form() {
        let mut editor = editor_with_column();
        let mut prompter = Scripted::default();
        prompter.widgets.push_back(Response::Submitted(form(
            "weather",
            "",
            "location=London, United Kingdom\nurl=\"https://x\"\nunits=metric\nhour-format=24h",
        )));
        editor
            .add_widget(0, 0, WidgetForm::default(), &mut prompter)
            .unwrap();
        editor
            .insert_option(
                (0, 0, 0),
                &[PathStep::key("tags")],
                Value::Sequence(vec![Value::from("a"), Value::Int(2)]),
            )
            .unwrap();
        let before = editor.document().widget(0, 0, 0).unwrap().clone();

        // Submit the pre-filled form untouched.
        let initial = WidgetForm::from_widget(&before);
        prompter.widgets.push_back(Response::Submitted(initial));
        editor.edit_widget(0, 0, 0, &mut prompter).unwrap();

        let after = editor.document().widget(0, 0, 0).unwrap();
        assert_eq!(after, &before);
        let keys: Vec<_> = after.options().keys().cloned().collect();
        assert_eq!(keys, vec!["location", "url", "units", "hour-format", "tags"]);
    }

    #[test]
    fn test_form_preserves_awkward_option_keys() {
        let doc = load::parse(
            "pages:\n  - name: Home\n    columns:\n      - size: full\n        widgets:\n          - type: custom\n            \"a=b\": 1\n            \"\": x\n            \" padded\": 2\n            '\"q\"': 3\n            plain: \"&anchor x\"\n",
        )
        .unwrap();
        let widget = doc.widget(0, 0, 0).unwrap();
        let form = WidgetForm::from_widget(widget);
        assert_eq!(
            form.options,
            "\"a=b\"=1\n\"\"=x\n\" padded\"=2\n\"\\\"q\\\"\"=3\nplain=\"&anchor x\""
        );
        assert_eq!(&form.to_widget().unwrap(), widget);
    }

    #[test]
    fn test_quoted_form_keys() {
        let parsed = form("custom", "", "\"x=y\" = 5\n\"unterminated=1").to_widget();
        assert!(matches!(
            parsed,
            Err(GlanceError::InvalidOptionLine { line: 2, .. })
        ));

        let widget = form("custom", "", "\"x=y\" = 5\nv=&anchor x").to_widget().unwrap();
        assert_eq!(widget.options().get("x=y"), Some(&Value::Int(5)));
        assert_eq!(widget.options().get("v"), Some(&Value::from("&anchor x")));
    }

    #[test]
    fn test_option_path_errors_are_reported() {
        let mut editor = editor_with_column();
        let mut prompter = Scripted::default();
        prompter
            .widgets
            .push_back(Response::Submitted(form("rss", "", "limit=10")));
        editor
            .add_widget(0, 0, WidgetForm::default(), &mut prompter)
            .unwrap();
        let preview = editor.preview().to_string();

        let err = editor
            .delete_option((0, 0, 0), &[PathStep::key("missing")])
            .unwrap_err();
        assert!(matches!(err, GlanceError::PathNotFound { .. }));
        let err = editor
            .insert_option((0, 0, 0), &[PathStep::key("limit")], Value::Int(3))
            .unwrap_err();
        assert!(matches!(err, GlanceError::DuplicateKey { .. }));
        assert_eq!(editor.preview(), preview);
    }

    #[test]
    fn test_widget_form_from_reference_example() {
        let reference = ReferenceData::from_json_str(
            r#"{"widgets": [{"name": "RSS", "type": "rss", "markdown": "",
                "example": {"type": "rss", "title": "News", "limit": 10, "feeds": [{"url": "https://a"}]}}]}"#,
        );
        let editor = Editor::new(reference);
        let form = editor.widget_form_for("rss");
        assert_eq!(form.title, "News");
        assert_eq!(form.options, "limit=10\nfeeds=[{\"url\": \"https://a\"}]");

        let widget = form.to_widget().unwrap();
        let url = PathStep::parse_path("feeds[0].url").unwrap();
        assert_eq!(widget.get_option(&url).unwrap(), &Value::from("https://a"));

        assert_eq!(editor.widget_form_for("clock").options, "");
    }

    #[test]
    fn test_insert_template() {
        let reference = ReferenceData::from_json_str(
            r#"{"templates": [
                {"name": "Startpage", "yaml": "pages:\n  - name: Startpage\n    columns:\n      - size: full\n"},
                {"name": "Snippet", "yaml": "- type: rss\n"}
            ]}"#,
        );
        let mut editor = Editor::new(reference);
        assert_eq!(editor.insert_template("Startpage").unwrap(), 1);
        assert_eq!(editor.document().pages[0].name, "Startpage");

        assert!(matches!(
            editor.insert_template("Snippet"),
            Err(GlanceError::TemplateWithoutPages { .. })
        ));
        assert!(matches!(
            editor.insert_template("Nope"),
            Err(GlanceError::TemplateNotFound { .. })
        ));
        assert_eq!(editor.document().pages.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glance.yml");

        let empty = Editor::new(ReferenceData::empty());
        assert!(matches!(empty.save(&path), Err(GlanceError::EmptyDocument)));
        assert!(!path.exists());

        let editor = editor_with_column();
        editor.save(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{}\n", editor.preview()));

        let mut other = Editor::new(ReferenceData::empty());
        other.load(&path).unwrap();
        assert_eq!(other.document(), editor.document());
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "theme:\n  light: true\n").unwrap();

        let mut editor = editor_with_column();
        let before = editor.document().clone();
        let preview = editor.preview().to_string();

        assert!(matches!(editor.load(&path), Err(GlanceError::MissingPages)));
        assert!(matches!(
            editor.load(&dir.path().join("missing.yml")),
            Err(GlanceError::Io { .. })
        ));
        assert_eq!(editor.document(), &before);
        assert_eq!(editor.preview(), preview);
    }

    #[test]
    fn test_save_to_unwritable_path_reports_io_error() {
        let dir = TempDir::new().unwrap();
        let editor = editor_with_column();
        let path = dir.path().join("no-such-dir").join("glance.yml");
        assert!(matches!(editor.save(&path), Err(GlanceError::Io { .. })));
        assert_eq!(editor.document().pages.len(), 1);
    }
}
