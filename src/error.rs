//! Error types for structxml

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Decode input was empty or whitespace-only
    EmptyInput,
    /// The underlying XML parser reported an error
    MalformedXml,
    /// The document contains a construct that is rejected unconditionally
    /// (a document type declaration)
    DisallowedConstruct,
    /// A value or key has no defined XML representation
    UnsupportedValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::MalformedXml => write!(f, "malformed XML"),
            Self::DisallowedConstruct => write!(f, "disallowed construct"),
            Self::UnsupportedValue => write!(f, "unsupported value"),
        }
    }
}

/// Main error type for structxml
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Empty or whitespace-only decode input
    pub fn empty_input() -> Self {
        Self::new(ErrorKind::EmptyInput, "XML input is empty")
    }

    /// Parse failure reported by the external parser
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedXml, message)
    }

    /// Hard rejection of a document construct
    pub fn disallowed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DisallowedConstruct, message)
    }

    /// Value shape with no XML representation
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedValue, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Result type alias for structxml
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = Error::empty_input();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = Error::malformed("unexpected end of document");
        let display = err.to_string();
        assert!(display.contains("malformed XML"));
        assert!(display.contains("unexpected end of document"));
    }

    #[test]
    fn test_disallowed_display() {
        let err = Error::disallowed("document types are not allowed");
        assert_eq!(err.kind(), ErrorKind::DisallowedConstruct);
        assert!(err.to_string().contains("document types"));
    }
}
