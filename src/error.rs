//! # Error Types
//!
//! All errors produced while processing chord-sheet markup.
//!
//! Parse errors carry the 1-based line and column of the offending token so the
//! host application can point at the problem. Errors never escape the
//! orchestrator in [`crate::api::process`]; they are turned into a fallback
//! status there.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{parse, ChordError};
//!
//! match parse("[G Amazing grace") {
//!     Ok(doc) => println!("{} sections", doc.sections.len()),
//!     Err(ChordError::ParseError { line, column, message }) => {
//!         eprintln!("Parse error at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    /// Structurally malformed markup, such as a chord token that is never closed.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordError;
    /// let err = ChordError::ParseError {
    ///     line: 3,
    ///     column: 7,
    ///     message: "Unterminated chord token".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 3, column 7: Unterminated chord token");
    /// ```
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid engine configuration (YAML settings file).
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
