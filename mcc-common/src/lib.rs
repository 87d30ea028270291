//! Mini Compiler - Common Types and Utilities
//!
//! This crate contains the source location types and the error taxonomy
//! shared by every stage of the statement compiler.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter, ParseErrorKind, Severity};
pub use source_loc::{SourceLocation, SourceSpan};
