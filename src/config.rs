//! Options controlling how strictly a pattern is parsed.

/// What to do with a `(` that is still open when the pattern ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnclosedGroups {
    /// Fail with [`ParseError::UnclosedGroup`](crate::ParseError::UnclosedGroup).
    #[default]
    Reject,
    /// Close every open group implicitly at end of input, so `(a` parses as `(a)`.
    Accept,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub unclosed_groups: UnclosedGroups,
    /// Maximum group nesting depth. `None` means unlimited.
    pub max_nesting: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options reproducing the permissive grammar, where an unterminated group
    /// swallows the rest of the pattern.
    pub fn permissive() -> Self {
        Self::default().unclosed_groups(UnclosedGroups::Accept)
    }

    pub fn unclosed_groups(mut self, policy: UnclosedGroups) -> Self {
        self.unclosed_groups = policy;
        self
    }

    pub fn max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = Some(limit);
        self
    }
}
