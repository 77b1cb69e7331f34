use std::fmt;

/// A single node of a parsed pattern.
///
/// The variant set is closed: a matcher built on top of this tree is expected
/// to dispatch on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Matches exactly one occurrence of the character.
    Literal(char),
    /// Matches the child one or more times.
    Plus(Box<Node>),
    /// Matches the child zero or more times.
    Star(Box<Node>),
    /// Zero-width anchor at the start of input.
    Begin,
    /// Zero-width anchor at the end of input.
    End,
    /// Ordered concatenation treated as a single atom.
    Group(Vec<Node>),
}

impl Node {
    pub fn literal(c: char) -> Self {
        Node::Literal(c)
    }

    pub fn plus(node: Node) -> Self {
        Node::Plus(Box::new(node))
    }

    pub fn star(node: Node) -> Self {
        Node::Star(Box::new(node))
    }

    pub fn group<I: IntoIterator<Item = Node>>(nodes: I) -> Self {
        Node::Group(nodes.into_iter().collect())
    }

    /// Anchors match a position, never a character, and never take a postfix operator.
    pub fn is_anchor(&self) -> bool {
        matches!(self, Node::Begin | Node::End)
    }

    /// Nesting depth of groups and repetitions below this node. Leaves are 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            match node {
                Node::Plus(inner) | Node::Star(inner) => stack.push((&**inner, level + 1)),
                Node::Group(children) => {
                    // An empty group still adds a level.
                    deepest = deepest.max(level + 1);
                    stack.extend(children.iter().map(|child| (child, level + 1)));
                }
                Node::Literal(_) | Node::Begin | Node::End => {}
            }
        }
        deepest
    }

    /// Indented one-node-per-line dump of this node and its children.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        write_tree(std::slice::from_ref(self), &mut out);
        out
    }
}

impl Drop for Node {
    // Children are moved onto a local stack so freeing a deeply nested tree
    // does not take one call frame per level.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        take_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            take_children(&mut node, &mut stack);
        }
    }
}

fn take_children(node: &mut Node, stack: &mut Vec<Node>) {
    match node {
        Node::Plus(inner) | Node::Star(inner) => {
            if !matches!(**inner, Node::Literal(_) | Node::Begin | Node::End) {
                stack.push(std::mem::replace(&mut **inner, Node::End));
            }
        }
        Node::Group(children) => stack.append(children),
        Node::Literal(_) | Node::Begin | Node::End => {}
    }
}

/// True when every `Plus`/`Star` wraps a literal or a group, which is the
/// only shape the parser produces.
pub(crate) fn repetitions_well_formed(nodes: &[Node]) -> bool {
    let mut stack: Vec<&Node> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        match node {
            Node::Plus(inner) | Node::Star(inner) => {
                if !matches!(**inner, Node::Literal(_) | Node::Group(_)) {
                    return false;
                }
                stack.push(&**inner);
            }
            Node::Group(children) => stack.extend(children.iter()),
            Node::Literal(_) | Node::Begin | Node::End => {}
        }
    }
    true
}

/// Writes `nodes` as an indented tree, two spaces per level.
pub(crate) fn write_tree(nodes: &[Node], out: &mut String) {
    let mut stack: Vec<(&Node, usize)> = nodes.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, indent)) = stack.pop() {
        for _ in 0..indent {
            out.push_str("  ");
        }
        match node {
            Node::Literal(c) => out.push_str(&format!("Literal({c:?})")),
            Node::Begin => out.push_str("Begin"),
            Node::End => out.push_str("End"),
            Node::Plus(inner) => {
                out.push_str("Plus");
                stack.push((&**inner, indent + 1));
            }
            Node::Star(inner) => {
                out.push_str("Star");
                stack.push((&**inner, indent + 1));
            }
            Node::Group(children) => {
                out.push_str("Group");
                stack.extend(children.iter().rev().map(|child| (child, indent + 1)));
            }
        }
        out.push('\n');
    }
}

enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

/// Renders nodes back to pattern syntax without recursing on the tree.
pub(crate) fn write_pattern(nodes: &[Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut stack: Vec<Piece<'_>> = nodes.iter().rev().map(Piece::Node).collect();
    while let Some(piece) = stack.pop() {
        match piece {
            Piece::Text(text) => f.write_str(text)?,
            Piece::Node(Node::Literal(c)) => write!(f, "{c}")?,
            Piece::Node(Node::Begin) => f.write_str("^")?,
            Piece::Node(Node::End) => f.write_str("$")?,
            Piece::Node(Node::Plus(inner)) => {
                stack.push(Piece::Text("+"));
                stack.push(Piece::Node(inner));
            }
            Piece::Node(Node::Star(inner)) => {
                stack.push(Piece::Text("*"));
                stack.push(Piece::Node(inner));
            }
            Piece::Node(Node::Group(children)) => {
                f.write_str("(")?;
                stack.push(Piece::Text(")"));
                stack.extend(children.iter().rev().map(Piece::Node));
            }
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pattern(std::slice::from_ref(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_pattern_syntax() {
        let node = Node::plus(Node::group([Node::literal('a'), Node::star(Node::literal('b'))]));
        assert_eq!(node.to_string(), "(ab*)+");
        assert_eq!(Node::Begin.to_string(), "^");
        assert_eq!(Node::Group(vec![]).to_string(), "()");
    }

    #[test]
    fn depth_counts_groups_and_repetitions() {
        assert_eq!(Node::literal('a').depth(), 0);
        assert_eq!(Node::Group(vec![]).depth(), 1);
        let node = Node::group([
            Node::literal('a'),
            Node::plus(Node::group([Node::literal('b')])),
        ]);
        assert_eq!(node.depth(), 3);
    }

    #[test]
    fn only_begin_and_end_are_anchors() {
        assert!(Node::Begin.is_anchor());
        assert!(Node::End.is_anchor());
        assert!(!Node::literal('^').is_anchor());
        assert!(!Node::group([Node::Begin]).is_anchor());
    }

    #[test]
    fn pretty_indents_children() {
        let node = Node::plus(Node::group([Node::literal('a'), Node::End]));
        assert_eq!(node.pretty(), "Plus\n  Group\n    Literal('a')\n    End\n");
    }

    #[test]
    fn drops_deep_repetition_chains() {
        let mut node = Node::literal('a');
        for _ in 0..200_000 {
            node = Node::star(Node::group([node]));
        }
        assert_eq!(node.depth(), 400_000);
        drop(node);
    }

    #[test]
    fn repetition_shapes() {
        assert!(repetitions_well_formed(&[Node::plus(Node::group([Node::star(
            Node::literal('a')
        )]))]));
        assert!(!repetitions_well_formed(&[Node::plus(Node::Begin)]));
        assert!(!repetitions_well_formed(&[Node::group([Node::star(Node::star(
            Node::literal('a')
        ))])]));
    }
}
