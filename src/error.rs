use thiserror::Error;

use crate::valuetype::Code;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabsError {
    #[error("Parse error: {message}")]
    Parse { message: String },
    #[error("Out of range: {message}")]
    OutOfRange { message: String },
    #[error("Can't use empty value for {value_type}")]
    EmptyDisallowed { value_type: String },
    #[error("Type {value_type}: key '{label}' not found")]
    UnknownLabel { value_type: String, label: String },
    #[error("Invalid code {code} for column {column}")]
    InvalidCode { column: String, code: Code },
    #[error("Row has {found} values but the table has {expected} columns")]
    Arity { expected: usize, found: usize },
    #[error("Column already exists: {0}")]
    DuplicateColumn(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TabsError>;

impl TabsError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }
    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange { message: message.into() }
    }
}

// Helper conversions
impl From<config::ConfigError> for TabsError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<regex::Error> for TabsError {
    fn from(e: regex::Error) -> Self { Self::Config(e.to_string()) }
}
