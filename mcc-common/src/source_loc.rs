//! Source location tracking for error reporting
//!
//! Every statement is a single input line, so a location is the input name,
//! the line number and a column within that line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the input (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Create a location on an unnamed input
    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }

    /// The location `count` columns to the right on the same line
    pub fn advanced_by(&self, count: u32) -> Self {
        Self {
            filename: self.filename.clone(),
            line: self.line,
            column: self.column + count,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in the input (start inclusive, end exclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    /// Create a dummy span for testing
    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }

    /// Smallest span covering both `self` and `other`
    pub fn extend(&self, other: &SourceSpan) -> SourceSpan {
        if self.start.filename != other.start.filename || self.start.line != other.start.line {
            return self.clone();
        }

        let start = if self.start.column <= other.start.column {
            self.start.clone()
        } else {
            other.start.clone()
        };
        let end = if self.end.column >= other.end.column {
            self.end.clone()
        } else {
            other.end.clone()
        };

        SourceSpan::new(start, end)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line != self.end.line || self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.end.column <= self.start.column + 1 {
            write!(f, "{}", self.start)
        } else {
            write!(
                f,
                "{}:{}:{}-{}",
                self.start.filename,
                self.start.line,
                self.start.column,
                self.end.column - 1
            )
        }
    }
}
