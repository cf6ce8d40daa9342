//! Raw S-expression reading.
//!
//! A [`GenericParser`] turns text into a forest of [`GenericTree`]s: groups
//! in parentheses and leaves, each tagged with where it starts and ends. It
//! knows nothing about list names, token validity or line breaks; the
//! [`de`](crate::de) bridge turns its output into [`Node`](crate::Node)s and
//! applies those rules.
//!
//! [`Reader`] is the built-in parser. Any other implementation can be plugged
//! in through [`parse_with`](crate::parse_with), including a plain closure:
//!
//! ```rust
//! use sexpression::{parse_with, GenericTree, ParseOptions, Position, SyntaxError};
//!
//! let canned = |_: &str| -> Result<Vec<GenericTree>, SyntaxError> {
//!     let at = Position::new(1, 1);
//!     Ok(vec![GenericTree::Group {
//!         children: vec![GenericTree::leaf("stub", false, at, at)],
//!         start: at,
//!         end: at,
//!     }])
//! };
//! let root = parse_with(&canned, "ignored", "canned", &ParseOptions::new()).unwrap();
//! assert_eq!(root.to_string(), "(stub)");
//! ```
//!
//! ## Raw Syntax
//!
//! - whitespace (including newlines) separates elements
//! - `(` opens a group, `)` closes the innermost open group
//! - `"` starts a quoted leaf; inside it `\"`, `\\`, `\n`, `\r`, `\t`, `\b`,
//!   `\f` and `\0` are escapes, any other backslash sequence is kept as is
//! - everything else is a bare leaf running up to the next whitespace,
//!   parenthesis or quote

use thiserror::Error;
use tracing::trace;

use crate::escape::{is_delimiter, unescape_char};
use crate::options::DEFAULT_MAX_DEPTH;
use crate::Position;

/// A raw element produced by a [`GenericParser`].
///
/// `start` and `end` are the positions of the first and last character of
/// the element (for a group, its parentheses).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenericTree {
    Leaf {
        text: String,
        /// `true` if the leaf was written in quotes. `text` is unescaped.
        quoted: bool,
        start: Position,
        end: Position,
    },
    Group {
        children: Vec<GenericTree>,
        start: Position,
        end: Position,
    },
}

impl GenericTree {
    pub fn leaf(text: impl Into<String>, quoted: bool, start: Position, end: Position) -> Self {
        GenericTree::Leaf {
            text: text.into(),
            quoted,
            start,
            end,
        }
    }

    #[must_use]
    pub fn start(&self) -> Position {
        match self {
            GenericTree::Leaf { start, .. } | GenericTree::Group { start, .. } => *start,
        }
    }

    #[must_use]
    pub fn end(&self) -> Position {
        match self {
            GenericTree::Leaf { end, .. } | GenericTree::Group { end, .. } => *end,
        }
    }
}

/// Malformed raw text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: Option<Position>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        SyntaxError {
            message: message.into(),
            position,
        }
    }
}

/// Turns text into raw trees.
pub trait GenericParser {
    /// Parses the whole of `text` into its top-level elements.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for unbalanced parentheses, unterminated
    /// strings or anything else the parser cannot make sense of.
    fn parse(&self, text: &str) -> Result<Vec<GenericTree>, SyntaxError>;
}

impl<F> GenericParser for F
where
    F: Fn(&str) -> Result<Vec<GenericTree>, SyntaxError>,
{
    fn parse(&self, text: &str) -> Result<Vec<GenericTree>, SyntaxError> {
        self(text)
    }
}

/// The built-in parser.
///
/// Groups may nest at most [`DEFAULT_MAX_DEPTH`] levels unless another limit
/// is set with [`Reader::with_max_depth`].
///
/// # Examples
///
/// ```rust
/// use sexpression::{GenericParser, GenericTree, Reader};
///
/// let reader = Reader::new();
/// let trees = reader.parse("(a \"b c\")").unwrap();
/// match &trees[0] {
///     GenericTree::Group { children, .. } => assert_eq!(children.len(), 2),
///     other => panic!("unexpected {:?}", other),
/// }
/// assert_eq!(reader.parse("(a").unwrap_err().message, "unclosed '('");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Reader {
    max_depth: usize,
}

impl Default for Reader {
    fn default() -> Self {
        Reader {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Reader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Reader { max_depth }
    }
}

impl GenericParser for Reader {
    fn parse(&self, text: &str) -> Result<Vec<GenericTree>, SyntaxError> {
        let mut tokenizer = Tokenizer::new(text);
        let mut open: Vec<(Position, Vec<GenericTree>)> = Vec::new();
        let mut top = Vec::new();

        loop {
            tokenizer.skip_whitespace();
            let start = tokenizer.position();
            let Some(ch) = tokenizer.peek_char() else {
                break;
            };

            let tree = match ch {
                '(' => {
                    if open.len() >= self.max_depth {
                        return Err(SyntaxError::new(
                            format!("nesting exceeds {} levels", self.max_depth),
                            Some(start),
                        ));
                    }
                    tokenizer.next_char();
                    open.push((start, Vec::new()));
                    continue;
                }
                ')' => {
                    tokenizer.next_char();
                    let (group_start, children) = open
                        .pop()
                        .ok_or_else(|| SyntaxError::new("unexpected ')'", Some(start)))?;
                    GenericTree::Group {
                        children,
                        start: group_start,
                        end: start,
                    }
                }
                '"' => tokenizer.read_quoted()?,
                _ => tokenizer.read_bare(),
            };

            match open.last_mut() {
                Some((_, children)) => children.push(tree),
                None => top.push(tree),
            }
        }

        if let Some((start, _)) = open.last() {
            return Err(SyntaxError::new("unclosed '('", Some(*start)));
        }

        trace!(elements = top.len(), "read raw trees");
        Ok(top)
    }
}

struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.next_char();
        }
    }

    /// Reads up to the next delimiter. The current character must not be one.
    fn read_bare(&mut self) -> GenericTree {
        let start = self.position();
        let mut end = start;
        let from = self.position;
        while let Some(ch) = self.peek_char() {
            if is_delimiter(ch) {
                break;
            }
            end = self.position();
            self.next_char();
        }
        GenericTree::leaf(&self.input[from..self.position], false, start, end)
    }

    fn read_quoted(&mut self) -> Result<GenericTree, SyntaxError> {
        let start = self.position();
        let unterminated = || SyntaxError::new("unterminated string", Some(start));
        self.next_char(); // opening quote

        let mut text = String::new();
        loop {
            let at = self.position();
            match self.next_char().ok_or_else(unterminated)? {
                '"' => return Ok(GenericTree::leaf(text, true, start, at)),
                '\\' => {
                    let escaped = self.next_char().ok_or_else(unterminated)?;
                    match unescape_char(escaped) {
                        Some(resolved) => text.push(resolved),
                        None => {
                            text.push('\\');
                            text.push(escaped);
                        }
                    }
                }
                ch => text.push(ch),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_children(tree: &GenericTree) -> &[GenericTree] {
        match tree {
            GenericTree::Group { children, .. } => children,
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_positions() {
        let trees = Reader::new().parse("(ab\n  \"c d\")").unwrap();
        assert_eq!(trees.len(), 1);
        let root = &trees[0];
        assert_eq!(root.start(), Position::new(1, 1));
        assert_eq!(root.end(), Position::new(2, 8));

        let children = group_children(root);
        assert_eq!(
            children[0],
            GenericTree::leaf("ab", false, Position::new(1, 2), Position::new(1, 3))
        );
        assert_eq!(
            children[1],
            GenericTree::leaf("c d", true, Position::new(2, 3), Position::new(2, 7))
        );
    }

    #[test]
    fn test_escapes() {
        let trees = Reader::new().parse(r#"(s "a\"b\\c\nd\qe")"#).unwrap();
        match &group_children(&trees[0])[1] {
            GenericTree::Leaf { text, quoted, .. } => {
                assert!(*quoted);
                assert_eq!(text, "a\"b\\c\nd\\qe");
            }
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_leaf_stops_at_delimiters() {
        let trees = Reader::new().parse("(a b)c\"d\"").unwrap();
        assert_eq!(trees.len(), 3);
        assert_eq!(group_children(&trees[0]).len(), 2);
        assert!(matches!(&trees[1], GenericTree::Leaf { text, quoted: false, .. } if text == "c"));
        assert!(matches!(&trees[2], GenericTree::Leaf { text, quoted: true, .. } if text == "d"));
    }

    #[test]
    fn test_unicode_columns() {
        let trees = Reader::new().parse("(ü \"ñ\" x)").unwrap();
        let children = group_children(&trees[0]);
        assert_eq!(children[2].start(), Position::new(1, 8));
    }

    #[test]
    fn test_unbalanced() {
        let err = Reader::new().parse("(a (b)").unwrap_err();
        assert_eq!(err.message, "unclosed '('");
        assert_eq!(err.position, Some(Position::new(1, 1)));

        let err = Reader::new().parse("(a))").unwrap_err();
        assert_eq!(err.message, "unexpected ')'");
        assert_eq!(err.position, Some(Position::new(1, 4)));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Reader::new().parse("(a\n \"open)").unwrap_err();
        assert_eq!(err.message, "unterminated string");
        assert_eq!(err.position, Some(Position::new(2, 2)));

        let err = Reader::new().parse("(a \"trailing\\").unwrap_err();
        assert_eq!(err.message, "unterminated string");
    }

    #[test]
    fn test_empty_input() {
        assert!(Reader::new().parse("").unwrap().is_empty());
        assert!(Reader::new().parse(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 1_000;
        let text = format!("{}{}", "(a ".repeat(depth), ")".repeat(depth));
        let trees = Reader::with_max_depth(usize::MAX).parse(&text).unwrap();
        assert_eq!(trees.len(), 1);
    }

    #[test]
    fn test_nesting_limit() {
        let reader = Reader::with_max_depth(3);
        assert!(reader.parse("(a (b (c)) (d (e)))").is_ok());

        let err = reader.parse("(a (b (c (d))))").unwrap_err();
        assert_eq!(err.message, "nesting exceeds 3 levels");
        assert_eq!(err.position, Some(Position::new(1, 10)));

        let text = format!("{}{}", "(a ".repeat(DEFAULT_MAX_DEPTH + 1), ")".repeat(DEFAULT_MAX_DEPTH + 1));
        assert!(Reader::new().parse(&text).is_err());
    }
}
