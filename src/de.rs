//! Building [`Node`] trees from parsed text.
//!
//! This module bridges a [`GenericParser`] and the document model: every raw
//! group becomes a List named after its first element, every quoted leaf a
//! String and every bare leaf a Token. Each node is tagged with the source
//! identity and the position it was read from.
//!
//! ## Overview
//!
//! - **Root**: the text must contain exactly one top-level List
//! - **List names**: the first element of a group must be a bare, valid name;
//!   otherwise the group fails with [`Error::MissingListName`]
//! - **Line breaks**: a child written on a later line than the element before
//!   it is preceded by one LineBreak per line of distance, and the same goes
//!   for the closing parenthesis; printing the tree again therefore keeps the
//!   layout of the source (see [`ParseOptions`])
//!
//! ## Usage
//!
//! Most users should use [`parse`](crate::parse):
//!
//! ```rust
//! use sexpression::parse;
//!
//! let text = "(symbol\n  (pin 1)\n\n  (pin 2)\n)";
//! let root = parse(text, "symbol.lp").unwrap();
//! assert_eq!(root.children_named("pin").len(), 2);
//! assert_eq!(root.to_string(), text);
//! ```

use tracing::debug;

use crate::escape::{is_valid_list_name, is_valid_token};
use crate::{
    Error, GenericParser, GenericTree, Location, Node, NodeKind, ParseOptions, Position, Result,
    SourceId, SyntaxError,
};

/// Converts raw trees into nodes for one source.
pub struct Deserializer {
    source: SourceId,
    options: ParseOptions,
}

impl Deserializer {
    pub fn new(source: SourceId, options: ParseOptions) -> Self {
        Deserializer { source, options }
    }

    /// Runs `parser` over `text` and converts the result into the root List.
    ///
    /// # Errors
    ///
    /// - [`Error::Syntax`] if the parser fails, the text is empty, there is
    ///   anything but a single List at the top level, Lists nest deeper than
    ///   [`ParseOptions::max_depth`] or a bare leaf is not a valid token
    /// - [`Error::MissingListName`] for groups that cannot become Lists
    pub fn deserialize<P: GenericParser + ?Sized>(&self, parser: &P, text: &str) -> Result<Node> {
        let trees = parser
            .parse(text)
            .map_err(|err| self.syntax_error(err))?;

        let mut trees = trees.into_iter();
        let root = match (trees.next(), trees.next()) {
            (None, _) => {
                return Err(Error::syntax(self.location(None), "document is empty"));
            }
            (Some(_), Some(extra)) => {
                return Err(Error::syntax(
                    self.location(Some(extra.start())),
                    "unexpected content after the root list",
                ));
            }
            (Some(GenericTree::Leaf { start, .. }), None) => {
                return Err(Error::syntax(
                    self.location(Some(start)),
                    "document root must be a list",
                ));
            }
            (Some(root), None) => root,
        };

        let node = self.convert(root, 1)?;
        debug!(
            source = %self.source,
            bytes = text.len(),
            children = node.children().len(),
            "parsed document"
        );
        Ok(node)
    }

    fn convert(&self, tree: GenericTree, depth: usize) -> Result<Node> {
        match tree {
            GenericTree::Leaf {
                text, quoted: true, start, ..
            } => Ok(Node::located(NodeKind::String(text), self.location(Some(start)))),
            GenericTree::Leaf {
                text, quoted: false, start, ..
            } => {
                let location = self.location(Some(start));
                if !is_valid_token(&text) {
                    let msg = format!("invalid token \"{}\"", text);
                    return Err(Error::syntax(location, &msg));
                }
                Ok(Node::located(NodeKind::Token(text), location))
            }
            GenericTree::Group {
                children,
                start,
                end,
            } => self.convert_group(children, start, end, depth),
        }
    }

    fn convert_group(
        &self,
        elements: Vec<GenericTree>,
        start: Position,
        end: Position,
        depth: usize,
    ) -> Result<Node> {
        let location = self.location(Some(start));
        if depth > self.options.max_depth {
            return Err(Error::syntax(
                location,
                &format!("nesting exceeds {} levels", self.options.max_depth),
            ));
        }
        let mut elements = elements.into_iter();

        let (name, name_end) = match elements.next() {
            Some(GenericTree::Leaf {
                text,
                quoted: false,
                end,
                ..
            }) if is_valid_list_name(&text) => (text, end),
            _ => return Err(Error::MissingListName { location }),
        };

        let mut children = Vec::with_capacity(elements.len());
        let mut previous_line = name_end.line;
        for element in elements {
            self.push_line_breaks(&mut children, previous_line, element.start());
            previous_line = element.end().line;
            children.push(self.convert(element, depth + 1)?);
        }
        self.push_line_breaks(&mut children, previous_line, end);

        Ok(Node::located(NodeKind::List { name, children }, location))
    }

    /// Pushes one LineBreak per line between `from_line` and `next`, the
    /// start of the following element or the closing parenthesis. The
    /// LineBreaks are located at `next`.
    fn push_line_breaks(&self, children: &mut Vec<Node>, from_line: usize, next: Position) {
        if !self.options.preserve_line_breaks {
            return;
        }
        for _ in 0..next.line.saturating_sub(from_line) {
            children.push(Node::located(NodeKind::LineBreak, self.location(Some(next))));
        }
    }

    #[inline]
    fn location(&self, position: Option<Position>) -> Location {
        Location::new(self.source.clone(), position)
    }

    fn syntax_error(&self, err: SyntaxError) -> Error {
        Error::syntax(self.location(err.position), &err.message)
    }
}
