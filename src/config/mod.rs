//! Asset configuration: parsing, typed schema and loading
//!
//! [`tree`] turns the text format into a generic [`ConfigTree`];
//! [`schema`] reads the keys the merge pipeline uses out of it.

pub mod loader;
pub mod schema;
pub mod tree;

pub use loader::load_config;
pub use schema::{DataEntry, PartOffset, PipelineConfig, ResizeConfig, DEFAULT_PREFIX};
pub use tree::{parse, ConfigTree, LayerRecord, Section, Table, Value};

use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// A line that is neither a section, a key/value pair nor a comment
    #[error("Malformed line {line}: '{text}'")]
    MalformedLine { line: usize, text: String },
    /// A key/value line before any section header
    #[error("Key '{key}' on line {line} is not inside a section")]
    KeyOutsideSection { key: String, line: usize },
    /// The same name used as both `[name]` and `[[name]]`
    #[error("Section '{name}' on line {line} is used as both [{name}] and [[{name}]]")]
    SectionKindConflict { name: String, line: usize },
    /// Required section absent
    #[error("Missing section [{0}]")]
    MissingSection(String),
    /// Required key absent
    #[error("Missing key '{key}' in {section}")]
    MissingKey { section: String, key: String },
    /// Key present but holding the wrong kind of value
    #[error("Invalid value for '{key}' in {section}: expected {expected}")]
    InvalidValue { section: String, key: String, expected: &'static str },
    /// A data entry names a part without an offset
    #[error("Data entry '{title}' refers to part '{part}' which has no offset")]
    UnknownPart { part: String, title: String },
    /// Resize ratio with a zero term
    #[error("Invalid resize ratio {to}/{from}: both terms must be positive")]
    InvalidRatio { from: i64, to: i64 },
}
