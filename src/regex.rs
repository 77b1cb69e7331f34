use std::fmt;
use std::str::FromStr;

use crate::ast::{self, Node};
use crate::config::ParseOptions;
use crate::error::{ParseError, Result};
use crate::parser;

/// A parsed pattern: the ordered top-level node sequence plus the text it came from.
///
/// This is the hand-off point to a matcher, which consumes [`Regex::nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Regex {
    source: String,
    nodes: Vec<Node>,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_options(pattern, &ParseOptions::default())
    }

    pub fn with_options(pattern: &str, options: &ParseOptions) -> Result<Self> {
        let nodes = parser::parse_with(pattern, options)?;
        Ok(Self {
            source: pattern.to_owned(),
            nodes,
        })
    }

    /// Wrap an already-built node sequence. The source text is rendered from the nodes.
    ///
    /// `nodes` must have the shape the parser produces: every `Plus` or `Star`
    /// wraps a `Literal` or a `Group`. Other shapes, such as `Plus(Begin)` or
    /// `Star(Star(x))`, render to text that parses back to a different tree.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        debug_assert!(
            ast::repetitions_well_formed(&nodes),
            "repetition must wrap a literal or a group"
        );
        let source = Rendered(&nodes).to_string();
        Self { source, nodes }
    }

    /// Used by [`regex!`](crate::regex!) once the literal passed the compile-time check.
    #[doc(hidden)]
    pub fn from_checked(pattern: &'static str) -> Self {
        match Self::new(pattern) {
            Ok(regex) => regex,
            Err(err) => unreachable!("pattern {pattern:?} passed validation but failed: {err}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indented tree dump of every top-level node.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        ast::write_tree(&self.nodes, &mut out);
        out
    }
}

struct Rendered<'a>(&'a [Node]);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ast::write_pattern(self.0, f)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ast::write_pattern(&self.nodes, f)
    }
}

impl FromStr for Regex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<'a> IntoIterator for &'a Regex {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnclosedGroups;

    #[test]
    fn keeps_source_and_nodes() {
        let regex = Regex::new("^a+").unwrap();
        assert_eq!(regex.as_str(), "^a+");
        assert_eq!(regex.nodes(), &[Node::Begin, Node::plus(Node::literal('a'))]);
        assert_eq!(regex.len(), 2);
        assert!(!regex.is_empty());
    }

    #[test]
    fn from_str_reports_errors() {
        assert_eq!(
            "a)".parse::<Regex>(),
            Err(ParseError::UnmatchedClose { offset: 1 })
        );
    }

    #[test]
    fn options_are_honoured() {
        let options = ParseOptions::new().unclosed_groups(UnclosedGroups::Accept);
        let regex = Regex::with_options("(a", &options).unwrap();
        assert_eq!(regex.nodes(), &[Node::group([Node::literal('a')])]);
        // Display closes the group that the source left open.
        assert_eq!(regex.to_string(), "(a)");
        assert_eq!(regex.as_str(), "(a");
    }

    #[test]
    fn from_nodes_renders_source() {
        let regex = Regex::from_nodes(vec![Node::star(Node::group([Node::literal('x')])), Node::End]);
        assert_eq!(regex.as_str(), "(x)*$");
        assert_eq!(regex.into_nodes().len(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "repetition must wrap a literal or a group")]
    fn from_nodes_rejects_repeated_anchor() {
        Regex::from_nodes(vec![Node::plus(Node::Begin)]);
    }

    #[test]
    fn deeply_nested_pattern_is_freed() {
        let depth = 200_000;
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let regex = Regex::new(&pattern).unwrap();
        assert_eq!(regex.len(), 1);
        drop(regex);
    }

    #[test]
    fn iterates_top_level_nodes() {
        let regex = Regex::new("ab(c)").unwrap();
        let mut kinds = Vec::new();
        for node in &regex {
            kinds.push(matches!(node, Node::Group(_)));
        }
        assert_eq!(kinds, vec![false, false, true]);
    }
}
