// Errors raised while parsing the scraped projection and schedule sources.

use thiserror::Error;

/// A projection or schedule source did not match its expected layout.
///
/// Parsing is all-or-nothing: any `ParseError` discards the whole rebuild and
/// the previously cached data stays in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("projection sheet line {line}: {message}")]
    Projection { line: usize, message: String },

    #[error("schedule grid row {row}: {message}")]
    Schedule { row: usize, message: String },

    #[error("{source_name} produced zero rows")]
    Empty { source_name: &'static str },

    #[error("failed to build selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}

impl ParseError {
    pub(crate) fn projection(line: usize, message: impl Into<String>) -> Self {
        ParseError::Projection {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn schedule(row: usize, message: impl Into<String>) -> Self {
        ParseError::Schedule {
            row,
            message: message.into(),
        }
    }
}
