//! Errors raised while translating a pattern into a node tree.

/// A structural problem in a pattern. Offsets are byte offsets into the pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A `)` with no open group around it.
    #[error("closing parenthesis not found: unmatched `)` at offset {offset}")]
    UnmatchedClose { offset: usize },

    /// A `(` that is never closed. Only reported when unclosed groups are rejected.
    #[error("unclosed group: `(` at offset {offset} has no matching `)`")]
    UnclosedGroup { offset: usize },

    /// Group nesting went past the configured limit.
    #[error("groups nested deeper than {limit} at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::UnmatchedClose { offset }
            | ParseError::UnclosedGroup { offset }
            | ParseError::NestingTooDeep { offset, .. } => offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
