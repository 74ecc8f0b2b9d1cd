//! Error types for corpus reading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GigawordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line} is not valid UTF-8")]
    Encoding { line: u64 },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Document block contains no <DOC> element")]
    MissingDocElement,

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{parent}> is missing required child <{child}>")]
    MissingElement {
        parent: String,
        child: &'static str,
    },

    #[error("Invalid integer for {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Cannot derive a date from document id {0:?}")]
    InvalidDocumentId(String),

    #[error("Unbalanced expression: {reason}")]
    UnbalancedExpression { reason: &'static str },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<quick_xml::Error> for GigawordError {
    fn from(err: quick_xml::Error) -> Self {
        GigawordError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GigawordError>;
