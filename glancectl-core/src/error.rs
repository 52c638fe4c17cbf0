//! Structured error types for glancectl-core.
//!
//! Library code returns `GlanceError`; the CLI wraps it in `anyhow` for
//! context. None of these are fatal to an editing session: the operation that
//! produced one is aborted and the document stays as it was.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::path::PathStep;

#[derive(Error, Debug)]
pub enum GlanceError {
    /// Page name was empty after trimming
    #[error("Page name cannot be empty")]
    EmptyName,

    /// Widget form submitted without a type
    #[error("Widget type is required")]
    MissingWidgetType,

    /// Column size outside the allowed set
    #[error("Invalid column size '{value}': columns must be either 'small' or 'full'")]
    InvalidColumnSize { value: String },

    /// Options text line without `key=value`
    #[error("Invalid option on line {line}: '{text}' (expected key=value)")]
    InvalidOptionLine { line: usize, text: String },

    /// `type` and `title` are first-class widget fields
    #[error("'{key}' is a reserved widget field and cannot be used as an option")]
    ReservedOptionKey { key: String },

    /// Mapping already has this key at the addressed level
    #[error("Duplicate key '{key}' at {at}")]
    DuplicateKey { key: String, at: String },

    /// Option path does not resolve
    #[error("Option path not found: {path}")]
    PathNotFound { path: String },

    /// Tried to step into a scalar
    #[error("Cannot step into a scalar at {path}")]
    NotAContainer { path: String },

    /// Page/column/widget index outside the current list
    #[error("No {kind} at index {index} (have {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// Saving a document without pages
    #[error("Add at least one page before saving")]
    EmptyDocument,

    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    #[error("Template '{name}' does not contain a pages list")]
    TemplateWithoutPages { name: String },

    /// Loaded YAML root was a sequence or scalar
    #[error("Invalid configuration: not a mapping root")]
    NotAMappingRoot,

    /// Loaded YAML root had no `pages` sequence
    #[error("Invalid configuration: missing pages list")]
    MissingPages,

    #[error("YAML error: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, GlanceError>;

impl GlanceError {
    pub fn invalid_column_size(value: impl Into<String>) -> Self {
        Self::InvalidColumnSize {
            value: value.into(),
        }
    }

    pub fn reserved_key(key: impl Into<String>) -> Self {
        Self::ReservedOptionKey { key: key.into() }
    }

    pub fn duplicate_key(key: impl Into<String>, at: &[PathStep]) -> Self {
        Self::DuplicateKey {
            key: key.into(),
            at: PathStep::display_path(at),
        }
    }

    pub fn path_not_found(path: &[PathStep]) -> Self {
        Self::PathNotFound {
            path: PathStep::display_path(path),
        }
    }

    pub fn not_a_container(path: &[PathStep]) -> Self {
        Self::NotAContainer {
            path: PathStep::display_path(path),
        }
    }

    pub fn out_of_range(kind: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { kind, index, len }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by what the user typed, which a prompt can
    /// re-present instead of aborting.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::MissingWidgetType
                | Self::InvalidColumnSize { .. }
                | Self::InvalidOptionLine { .. }
                | Self::ReservedOptionKey { .. }
                | Self::DuplicateKey { .. }
        )
    }
}
