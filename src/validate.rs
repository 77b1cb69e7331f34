//! Compile-time checks on pattern literals.
//!
//! Under this grammar every `(` opens a group and every `)` closes one, no
//! matter what precedes them, so counting nesting depth over the raw bytes
//! finds exactly the errors the parser reports. Both characters are ASCII and
//! can never appear inside a multi-byte UTF-8 sequence.

/// A structural problem found by [`check`]. Offsets are byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    UnmatchedClose(usize),
    UnclosedGroup(usize),
}

/// Find the first stray `)` or, failing that, the outermost `(` left open.
pub const fn check(pattern: &str) -> Option<Problem> {
    let bytes = pattern.as_bytes();
    let mut depth = 0usize;
    let mut outermost_open = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                if depth == 0 {
                    outermost_open = i;
                }
                depth += 1;
            }
            b')' => {
                if depth == 0 {
                    return Some(Problem::UnmatchedClose(i));
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }
    if depth > 0 {
        Some(Problem::UnclosedGroup(outermost_open))
    } else {
        None
    }
}

/// Panics when `pattern` is malformed. Evaluated in a `const` item, the panic
/// becomes a compile error at the pattern literal.
pub const fn assert_valid(pattern: &str) {
    match check(pattern) {
        Some(Problem::UnmatchedClose(_)) => panic!("closing parenthesis not found"),
        Some(Problem::UnclosedGroup(_)) => panic!("unclosed group"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKED: Option<Problem> = check("(a)+b");

    #[test]
    fn evaluates_in_const_context() {
        assert_eq!(CHECKED, None);
    }

    #[test]
    fn finds_stray_close() {
        assert_eq!(check("a)"), Some(Problem::UnmatchedClose(1)));
        assert_eq!(check("(a))(b"), Some(Problem::UnmatchedClose(3)));
    }

    #[test]
    fn finds_outermost_unclosed_group() {
        assert_eq!(check("(a"), Some(Problem::UnclosedGroup(0)));
        assert_eq!(check("(a)(b(c)"), Some(Problem::UnclosedGroup(3)));
    }

    #[test]
    fn agrees_with_parser() {
        for pattern in ["", "ab", "(ab)+c", "((a)", "a)", "é(", "^$", ")("] {
            let expected = match crate::parse(pattern) {
                Ok(_) => None,
                Err(crate::ParseError::UnmatchedClose { offset }) => {
                    Some(Problem::UnmatchedClose(offset))
                }
                Err(crate::ParseError::UnclosedGroup { offset }) => {
                    Some(Problem::UnclosedGroup(offset))
                }
                Err(err) => panic!("unexpected error {err}"),
            };
            assert_eq!(check(pattern), expected, "pattern {pattern:?}");
        }
    }

    #[test]
    #[should_panic(expected = "closing parenthesis not found")]
    fn assert_valid_rejects_stray_close() {
        assert_valid("a)");
    }
}
