//! The textual exchange form of operator trees: a parenthesized S-expression notation.
//!
//! ```text
//! (project (?s)
//!   (filter (> ?o 1)
//!     (bgp (triple ?s <http://example.com/p> ?o))))
//! ```
//!
//! Every tree can be rendered with [Display](std::fmt::Display) and parsed back with
//! [FromStr](std::str::FromStr). Parsed trees are validated.

mod lexer;
mod parse;
mod write;

use crate::ValidationError;
use thiserror::Error;

/// An error raised while parsing the textual exchange form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SseParseError {
    /// The text is not well-formed.
    #[error("{message} (at byte {position})")]
    Syntax { message: String, position: usize },
    /// The text is well-formed but describes an invalid tree.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SseParseError {
    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        SseParseError::Syntax {
            message: message.into(),
            position,
        }
    }
}
