use crate::ast::Node;
use crate::config::{ParseOptions, UnclosedGroups};
use crate::error::{ParseError, Result};

/// Where the parser stands between two characters.
#[derive(Debug)]
enum State {
    /// No atom is waiting; the next character starts a new one.
    Empty,
    /// This atom was just completed and may still take one `+` or `*`.
    Pending(Node),
}

/// One level of group nesting. The root frame has no opening parenthesis.
#[derive(Debug)]
struct Frame {
    open: Option<usize>,
    nodes: Vec<Node>,
}

/// What happened to a group frame when the input was exhausted or a `)` was read.
enum GroupEnd {
    /// A `)` closed the innermost open group.
    Closed(Node),
    /// The `)` had no group to close.
    Unmatched,
}

/// Parser for fixed patterns.
///
/// Walks the pattern once, left to right, alternating between the two states
/// of [`State`]. Nested groups live on an explicit frame stack instead of the
/// call stack, so nesting depth is bounded only by memory.
pub struct Parser<'a> {
    pattern: &'a str,
    pos: usize,
    options: &'a ParseOptions,
    frames: Vec<Frame>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            pattern,
            pos: 0,
            options,
            frames: vec![Frame {
                open: None,
                nodes: Vec::new(),
            }],
        }
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Append a finished node to the innermost open sequence.
    fn emit(&mut self, node: Node) {
        if let Some(frame) = self.frames.last_mut() {
            frame.nodes.push(node);
        }
    }

    fn open_group(&mut self, offset: usize) -> Result<()> {
        let depth = self.frames.len() - 1;
        if let Some(limit) = self.options.max_nesting {
            if depth >= limit {
                return Err(ParseError::NestingTooDeep { limit, offset });
            }
        }
        log::trace!("open group at {offset}, depth {}", depth + 1);
        self.frames.push(Frame {
            open: Some(offset),
            nodes: Vec::new(),
        });
        Ok(())
    }

    fn close_group(&mut self) -> GroupEnd {
        if self.frames.len() == 1 {
            return GroupEnd::Unmatched;
        }
        match self.frames.pop() {
            Some(frame) => {
                log::trace!("close group opened at {:?}", frame.open);
                GroupEnd::Closed(Node::Group(frame.nodes))
            }
            None => GroupEnd::Unmatched,
        }
    }

    /// Entry point: parse the whole pattern into its top-level node sequence.
    ///
    /// Example:
    /// - Pattern: `(ab)+c` → [Plus(Group([Literal('a'), Literal('b')])), Literal('c')]
    pub fn parse(mut self) -> Result<Vec<Node>> {
        let mut state = State::Empty;
        loop {
            state = match state {
                State::Pending(node) => self.postfix(node),
                State::Empty => {
                    let offset = self.pos;
                    match self.advance() {
                        None => break,
                        Some(c) => self.atom(c, offset)?,
                    }
                }
            };
        }
        self.finish()
    }

    /// Look ahead exactly once for a postfix operator on a completed atom.
    ///
    /// Anything other than `+` or `*` is left in place and handled from the
    /// empty state, which is why `a**` is `a*` followed by a literal `*`.
    fn postfix(&mut self, node: Node) -> State {
        match self.peek() {
            Some('+') => {
                self.advance();
                self.emit(Node::plus(node));
            }
            Some('*') => {
                self.advance();
                self.emit(Node::star(node));
            }
            _ => self.emit(node),
        }
        State::Empty
    }

    /// Handle a character read in the empty state.
    fn atom(&mut self, c: char, offset: usize) -> Result<State> {
        match c {
            '^' => {
                self.emit(Node::Begin);
                Ok(State::Empty)
            }
            '$' => {
                self.emit(Node::End);
                Ok(State::Empty)
            }
            '(' => {
                self.open_group(offset)?;
                Ok(State::Empty)
            }
            ')' => match self.close_group() {
                GroupEnd::Closed(group) => Ok(State::Pending(group)),
                GroupEnd::Unmatched => Err(ParseError::UnmatchedClose { offset }),
            },
            c => Ok(State::Pending(Node::Literal(c))),
        }
    }

    /// Input is exhausted: settle any groups that are still open.
    fn finish(mut self) -> Result<Vec<Node>> {
        if self.frames.len() > 1 {
            match self.options.unclosed_groups {
                UnclosedGroups::Reject => {
                    let offset = self.frames[1].open.unwrap_or_default();
                    return Err(ParseError::UnclosedGroup { offset });
                }
                UnclosedGroups::Accept => {
                    log::debug!("closing {} unterminated group(s)", self.frames.len() - 1);
                    while let GroupEnd::Closed(group) = self.close_group() {
                        self.emit(group);
                    }
                }
            }
        }
        let nodes = self.frames.pop().map(|root| root.nodes).unwrap_or_default();
        log::debug!("parsed {:?} into {} top-level node(s)", self.pattern, nodes.len());
        Ok(nodes)
    }
}

/// Parse `pattern` with the default options.
pub fn parse(pattern: &str) -> Result<Vec<Node>> {
    parse_with(pattern, &ParseOptions::default())
}

/// Parse `pattern` with explicit options.
pub fn parse_with(pattern: &str, options: &ParseOptions) -> Result<Vec<Node>> {
    Parser::new(pattern, options).parse()
}
