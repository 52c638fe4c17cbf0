pub mod config;
pub mod document;
pub mod editor;
pub mod emit;
pub mod error;
pub mod load;
pub mod path;
pub mod reference;
pub mod value;

pub use config::GlanceConfig;
pub use document::{Column, ColumnSize, Document, Page, Widget};
pub use editor::{Editor, Outcome, Prompter, Response, WidgetForm};
pub use emit::{render, render_file};
pub use error::{GlanceError, Result};
pub use load::parse;
pub use path::{resolve, PathStep};
pub use reference::{ReferenceData, TemplateEntry, WidgetDoc};
pub use value::{Mapping, Value};
