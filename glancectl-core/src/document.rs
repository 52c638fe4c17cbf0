//! The editable configuration tree: pages → columns → widgets.
//!
//! Every operation is index-based; which page or column is "selected" is the
//! caller's business. Failed operations leave the tree untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GlanceError, Result};
use crate::path::{self, PathStep};
use crate::value::{Mapping, Value};

/// Keys a widget carries as fields rather than free-form options.
pub const RESERVED_WIDGET_KEYS: [&str; 2] = ["type", "title"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSize {
    /// Fixed-width sidebar
    #[default]
    Small,
    /// Takes the remaining width
    Full,
}

impl ColumnSize {
    pub const ALL: [ColumnSize; 2] = [ColumnSize::Small, ColumnSize::Full];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnSize::Small => "small",
            ColumnSize::Full => "full",
        }
    }
}

impl FromStr for ColumnSize {
    type Err = GlanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "small" => Ok(ColumnSize::Small),
            "full" => Ok(ColumnSize::Full),
            other => Err(GlanceError::invalid_column_size(other)),
        }
    }
}

impl fmt::Display for ColumnSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    widget_type: String,
    title: Option<String>,
    options: Mapping,
}

impl Widget {
    /// A widget of `widget_type` with no title and no options.
    pub fn new(widget_type: &str) -> Result<Self> {
        let widget_type = widget_type.trim();
        if widget_type.is_empty() {
            return Err(GlanceError::MissingWidgetType);
        }
        Ok(Self {
            widget_type: widget_type.to_string(),
            title: None,
            options: Mapping::new(),
        })
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.set_title(Some(title));
        self
    }

    /// Builder-style option insert; fails on reserved or duplicate keys.
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Result<Self> {
        self.insert_option(&[PathStep::key(key)], value.into())?;
        Ok(self)
    }

    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Blank titles are stored as absent.
    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    pub fn options(&self) -> &Mapping {
        &self.options
    }

    /// Title if set, otherwise the type. Used for list labels.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.widget_type)
    }

    pub fn get_option(&self, path: &[PathStep]) -> Result<&Value> {
        let first = match path.first() {
            Some(PathStep::Key(k)) => k,
            _ => return Err(GlanceError::path_not_found(path)),
        };
        let node = self
            .options
            .get(first)
            .ok_or_else(|| GlanceError::path_not_found(&path[..1]))?;
        path::resolve(node, &path[1..]).map_err(|err| rebase_error(err, &path[..1]))
    }

    pub fn insert_option(&mut self, path: &[PathStep], value: Value) -> Result<()> {
        check_reserved(path)?;
        self.with_option_root(|root| path::insert(root, path, value))
    }

    pub fn set_option(&mut self, path: &[PathStep], value: Value) -> Result<Value> {
        check_reserved(path)?;
        self.with_option_root(|root| path::replace(root, path, value))
    }

    pub fn delete_option(&mut self, path: &[PathStep]) -> Result<Value> {
        self.with_option_root(|root| path::remove(root, path))
    }

    /// Run a path operation against the option map viewed as a `Value` root.
    /// Paths are never empty here, so the root stays a mapping.
    fn with_option_root<T>(&mut self, op: impl FnOnce(&mut Value) -> Result<T>) -> Result<T> {
        let mut root = Value::Mapping(std::mem::take(&mut self.options));
        let result = op(&mut root);
        if let Value::Mapping(options) = root {
            self.options = options;
        }
        result
    }

    /// The widget as the mapping the emitter writes: type, title, options.
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::with_capacity(self.options.len() + 2);
        map.insert("type".into(), Value::from(self.widget_type.as_str()));
        if let Some(title) = &self.title {
            map.insert("title".into(), Value::from(title.as_str()));
        }
        for (k, v) in &self.options {
            map.insert(k.clone(), v.clone());
        }
        Value::Mapping(map)
    }
}

fn check_reserved(path: &[PathStep]) -> Result<()> {
    if let [PathStep::Key(k)] = path {
        if RESERVED_WIDGET_KEYS.contains(&k.as_str()) {
            return Err(GlanceError::reserved_key(k.clone()));
        }
    }
    Ok(())
}

/// `resolve` reports paths relative to the node it started from.
fn rebase_error(err: GlanceError, prefix: &[PathStep]) -> GlanceError {
    let join = |rest: &str| {
        let head = PathStep::display_path(prefix);
        match rest {
            "<root>" => head,
            r if r.starts_with('[') => format!("{head}{r}"),
            r => format!("{head}.{r}"),
        }
    };
    match err {
        GlanceError::PathNotFound { path } => GlanceError::PathNotFound { path: join(&path) },
        GlanceError::NotAContainer { path } => GlanceError::NotAContainer { path: join(&path) },
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub size: ColumnSize,
    pub widgets: Vec<Widget>,
    /// Keys other than `size`/`widgets` found when loading, kept verbatim.
    pub properties: Mapping,
}

impl Column {
    pub fn new(size: ColumnSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub name: String,
    pub columns: Vec<Column>,
    /// Keys other than `name`/`columns` found when loading, kept verbatim.
    pub properties: Mapping,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            properties: Mapping::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub pages: Vec<Page>,
    /// Top-level keys other than `pages` (server, theme, ...), kept verbatim.
    pub settings: Mapping,
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GlanceError::EmptyName);
    }
    Ok(name.to_string())
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn widget_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.columns)
            .map(|c| c.widgets.len())
            .sum()
    }

    // === Pages ===

    pub fn page(&self, page: usize) -> Result<&Page> {
        let len = self.pages.len();
        self.pages
            .get(page)
            .ok_or_else(|| GlanceError::out_of_range("page", page, len))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut Page> {
        let len = self.pages.len();
        self.pages
            .get_mut(page)
            .ok_or_else(|| GlanceError::out_of_range("page", page, len))
    }

    /// Append a page, returning its index.
    pub fn add_page(&mut self, name: &str) -> Result<usize> {
        let name = validate_name(name)?;
        debug!(page = %name, "adding page");
        self.pages.push(Page::new(name));
        Ok(self.pages.len() - 1)
    }

    pub fn rename_page(&mut self, page: usize, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        let target = self.page_mut(page)?;
        debug!(from = %target.name, to = %name, "renaming page");
        target.name = name;
        Ok(())
    }

    /// Remove a page together with all of its columns and widgets.
    pub fn delete_page(&mut self, page: usize) -> Result<Page> {
        self.page(page)?;
        let removed = self.pages.remove(page);
        debug!(page = %removed.name, columns = removed.columns.len(), "deleted page");
        Ok(removed)
    }

    // === Columns ===

    pub fn column(&self, page: usize, column: usize) -> Result<&Column> {
        let columns = &self.page(page)?.columns;
        columns
            .get(column)
            .ok_or_else(|| GlanceError::out_of_range("column", column, columns.len()))
    }

    fn column_mut(&mut self, page: usize, column: usize) -> Result<&mut Column> {
        let columns = &mut self.page_mut(page)?.columns;
        let len = columns.len();
        columns
            .get_mut(column)
            .ok_or_else(|| GlanceError::out_of_range("column", column, len))
    }

    pub fn add_column(&mut self, page: usize, size: ColumnSize) -> Result<usize> {
        let columns = &mut self.page_mut(page)?.columns;
        columns.push(Column::new(size));
        debug!(page, size = %size, "added column");
        Ok(columns.len() - 1)
    }

    /// Recreate the column with a new size. Its widgets are discarded.
    pub fn edit_column(&mut self, page: usize, column: usize, size: ColumnSize) -> Result<()> {
        let target = self.column_mut(page, column)?;
        debug!(
            page,
            column,
            size = %size,
            dropped_widgets = target.widgets.len(),
            "recreating column"
        );
        *target = Column::new(size);
        Ok(())
    }

    pub fn delete_column(&mut self, page: usize, column: usize) -> Result<Column> {
        self.column(page, column)?;
        Ok(self.page_mut(page)?.columns.remove(column))
    }

    // === Widgets ===

    pub fn widget(&self, page: usize, column: usize, widget: usize) -> Result<&Widget> {
        let widgets = &self.column(page, column)?.widgets;
        widgets
            .get(widget)
            .ok_or_else(|| GlanceError::out_of_range("widget", widget, widgets.len()))
    }

    pub fn widget_mut(&mut self, page: usize, column: usize, widget: usize) -> Result<&mut Widget> {
        let widgets = &mut self.column_mut(page, column)?.widgets;
        let len = widgets.len();
        widgets
            .get_mut(widget)
            .ok_or_else(|| GlanceError::out_of_range("widget", widget, len))
    }

    pub fn add_widget(&mut self, page: usize, column: usize, widget: Widget) -> Result<usize> {
        let widgets = &mut self.column_mut(page, column)?.widgets;
        debug!(page, column, widget_type = %widget.widget_type(), "added widget");
        widgets.push(widget);
        Ok(widgets.len() - 1)
    }

    /// Swap in an edited widget at the same position.
    pub fn replace_widget(
        &mut self,
        page: usize,
        column: usize,
        index: usize,
        widget: Widget,
    ) -> Result<Widget> {
        let target = self.widget_mut(page, column, index)?;
        Ok(std::mem::replace(target, widget))
    }

    pub fn delete_widget(&mut self, page: usize, column: usize, widget: usize) -> Result<Widget> {
        self.widget(page, column, widget)?;
        Ok(self.column_mut(page, column)?.widgets.remove(widget))
    }

    // === Serialization view ===

    /// The whole document as a nested value in emission order.
    pub fn to_value(&self) -> Value {
        let mut root = self.settings.clone();
        let pages = self.pages.iter().map(Page::to_value).collect();
        root.insert("pages".into(), Value::Sequence(pages));
        Value::Mapping(root)
    }
}

impl Page {
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::with_capacity(self.properties.len() + 2);
        map.insert("name".into(), Value::from(self.name.as_str()));
        for (k, v) in &self.properties {
            map.insert(k.clone(), v.clone());
        }
        let columns = self.columns.iter().map(Column::to_value).collect();
        map.insert("columns".into(), Value::Sequence(columns));
        Value::Mapping(map)
    }
}

impl Column {
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::with_capacity(self.properties.len() + 2);
        map.insert("size".into(), Value::from(self.size.as_str()));
        for (k, v) in &self.properties {
            map.insert(k.clone(), v.clone());
        }
        let widgets = self.widgets.iter().map(Widget::to_value).collect();
        map.insert("widgets".into(), Value::Sequence(widgets));
        Value::Mapping(map)
    }
}

/// Build a widget from a loaded mapping. `None` when there is no usable type.
pub(crate) fn widget_from_mapping(mut map: Mapping) -> Option<Widget> {
    let widget_type = match map.shift_remove("type") {
        Some(Value::String(t)) if !t.trim().is_empty() => t,
        _ => return None,
    };
    let title = match map.shift_remove("title") {
        Some(Value::Null) | None => None,
        Some(other) => other.scalar_text(),
    };
    let mut widget = Widget::new(&widget_type).ok()?;
    widget.set_title(title.as_deref());
    widget.options = map;
    Some(widget)
}
