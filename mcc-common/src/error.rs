//! Error handling for the mini compiler
//!
//! This module defines the error taxonomy shared by every stage and the
//! diagnostic collection used by the driver. Each stage has its own error
//! enum that converts into [`CompilerError`].

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structural parse failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseErrorKind {
    /// The statement does not end in `;`
    MissingTerminator,
    /// A production was asked to parse an empty token range
    EmptyOrInvertedRange,
    /// A token appeared where the grammar does not allow it
    UnexpectedToken,
    /// An operator is missing one of its operands
    IncompleteExpression,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::MissingTerminator => "missing terminator",
            ParseErrorKind::EmptyOrInvertedRange => "empty expression",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::IncompleteExpression => "incomplete expression",
        };
        write!(f, "{}", name)
    }
}

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error ({kind}) at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        kind: ParseErrorKind,
        message: String,
    },

    #[error("Lvalue error at {location}: {message}")]
    LvalueError {
        location: SourceLocation,
        message: String,
    },

    #[error("Domain error at {location}: {message}")]
    DomainError {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(kind: ParseErrorKind, message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError {
            location,
            kind,
            message,
        }
    }

    /// Create an lvalue error
    pub fn lvalue_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LvalueError { location, message }
    }

    /// Create a domain error
    pub fn domain_error(message: String, location: SourceLocation) -> Self {
        CompilerError::DomainError { location, message }
    }

    /// Name of the taxonomy bucket this error belongs to
    pub fn category(&self) -> &'static str {
        match self {
            CompilerError::LexError { .. } => "LexError",
            CompilerError::ParseError { .. } => "ParseError",
            CompilerError::LvalueError { .. } => "LvalueError",
            CompilerError::DomainError { .. } => "DomainError",
            CompilerError::IoError { .. } => "IoError",
            CompilerError::InternalError { .. } => "InternalError",
        }
    }

    /// Where in the input the error was detected, if anywhere
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CompilerError::LexError { location, .. }
            | CompilerError::ParseError { location, .. }
            | CompilerError::LvalueError { location, .. }
            | CompilerError::DomainError { location, .. } => Some(location),
            CompilerError::IoError { .. } | CompilerError::InternalError { .. } => None,
        }
    }

    /// The human-readable description without the location prefix
    pub fn message(&self) -> &str {
        match self {
            CompilerError::LexError { message, .. }
            | CompilerError::ParseError { message, .. }
            | CompilerError::LvalueError { message, .. }
            | CompilerError::DomainError { message, .. }
            | CompilerError::IoError { message }
            | CompilerError::InternalError { message } => message,
        }
    }

    /// The parse failure kind, for parse errors
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            CompilerError::ParseError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with an optional location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Error,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: String, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl From<&CompilerError> for Diagnostic {
    fn from(err: &CompilerError) -> Self {
        Diagnostic::error(err.message().to_string(), err.location().cloned())
            .with_note(format!("statement rejected with {}", err.category()))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}: {}", self.severity, location, self.message)?,
            None => write!(f, "{}: {}", self.severity, self.message)?,
        }

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Error reporter for collecting and displaying diagnostics
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, updating the counters
    pub fn report(&mut self, diagnostic: Diagnostic) -> &Diagnostic {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diagnostic);
        &self.diagnostics[self.diagnostics.len() - 1]
    }

    /// Record a failed statement
    pub fn report_error(&mut self, err: &CompilerError) -> &Diagnostic {
        self.report(Diagnostic::from(err))
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = CompilerError::parse_error(
            ParseErrorKind::IncompleteExpression,
            "operator '+' is missing its right operand".to_string(),
            SourceLocation::new("<stdin>", 1, 2),
        );
        assert_eq!(
            err.to_string(),
            "Parse error (incomplete expression) at <stdin>:1:2: operator '+' is missing its right operand"
        );
        assert_eq!(err.category(), "ParseError");
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::IncompleteExpression));
    }

    #[test]
    fn test_diagnostic_from_error() {
        let err = CompilerError::lvalue_error(
            "lvalue required as left operand of assignment".to_string(),
            SourceLocation::new("<stdin>", 4, 1),
        );
        let diag = Diagnostic::from(&err);

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(
            diag.to_string(),
            "error: <stdin>:4:1: lvalue required as left operand of assignment\n  note: statement rejected with LvalueError"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err = CompilerError::from(io);
        assert_eq!(err.category(), "IoError");
        assert!(err.location().is_none());
        assert_eq!(err.to_string(), "IO error: stream did not contain valid UTF-8");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let err = CompilerError::InternalError {
            message: "register index overflow".to_string(),
        };
        assert!(err.location().is_none());
        assert_eq!(
            Diagnostic::error(err.message().to_string(), None).to_string(),
            "error: register index overflow"
        );
    }

    #[test]
    fn test_summary() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.summary(), "No errors or warnings");
        assert!(!reporter.has_errors());

        let err = CompilerError::domain_error(
            "unknown variable 'a'".to_string(),
            SourceLocation::new_simple(1, 1),
        );
        reporter.report_error(&err);
        assert_eq!(reporter.summary(), "1 error");

        reporter.report_error(&err);
        assert_eq!(reporter.summary(), "2 errors");

        reporter.report(Diagnostic::warning("line skipped".to_string(), None));
        assert_eq!(reporter.summary(), "2 errors and 1 warning");
        assert_eq!(reporter.error_count(), 2);
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(reporter.diagnostics().len(), 3);
    }
}
