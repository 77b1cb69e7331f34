//! Translates fixed regular-expression patterns into a typed node tree.
//!
//! The grammar is deliberately small: literal characters, the postfix
//! operators `+` and `*`, the anchors `^` and `$`, and parenthesized groups.
//! A postfix operator binds to the single atom before it and is looked for
//! only once, so `a**` is `a*` followed by a literal `*`.
//!
//! Patterns known at compile time go through [`regex!`], which rejects
//! unbalanced parentheses during the build and parses the literal once on
//! first use:
//!
//! ```
//! use static_regex::{regex, Node};
//!
//! let re = regex!("(ab)+c");
//! assert_eq!(
//!     re.nodes(),
//!     &[
//!         Node::plus(Node::group([Node::literal('a'), Node::literal('b')])),
//!         Node::literal('c'),
//!     ]
//! );
//! ```
//!
//! A stray `)` does not compile:
//!
//! ```compile_fail
//! let re = static_regex::regex!("a)");
//! ```
//!
//! Neither does an unclosed `(`:
//!
//! ```compile_fail
//! let re = static_regex::regex!("(a");
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod regex;
pub mod validate;

pub use ast::Node;
pub use config::{ParseOptions, UnclosedGroups};
pub use error::{ParseError, Result};
pub use parser::{parse, parse_with, Parser};
pub use regex::Regex;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}

/// Builds a `&'static Regex` from a string literal.
///
/// Unbalanced parentheses fail the build. The literal is parsed the first
/// time the expression is evaluated and reused afterwards.
#[macro_export]
macro_rules! regex {
    ($pattern:literal) => {{
        const _: () = $crate::validate::assert_valid($pattern);
        static REGEX: $crate::__private::Lazy<$crate::Regex> =
            $crate::__private::Lazy::new(|| $crate::Regex::from_checked($pattern));
        &*REGEX
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_memoizes_per_call_site() {
        fn pattern() -> &'static Regex {
            regex!("^a*$")
        }
        let first = pattern();
        let second = pattern();
        assert!(std::ptr::eq(first, second));
        assert_eq!(
            first.nodes(),
            &[Node::Begin, Node::star(Node::literal('a')), Node::End]
        );
    }
}
