//! Canonical pretty-printing.
//!
//! This module provides the [`Printer`] that renders a [`Node`] tree as text.
//!
//! ## Layout Rules
//!
//! - A List is written `(name child child ...)` with single spaces between
//!   children on the same line
//! - A LineBreak child starts a new line, indented one level deeper than its
//!   parent List
//! - If a List spans several lines, its closing `)` goes on a line of its own
//!   at the List's own indentation
//! - Tokens are written verbatim, Strings quoted and escaped
//! - No line ever ends with whitespace
//!
//! Line breaks therefore only appear where the tree has LineBreak nodes: the
//! printer never wraps on its own, so the layout of a document survives a
//! parse/print round trip unchanged.
//!
//! ## Usage
//!
//! Most users should use [`to_string`](crate::to_string) or the `Display`
//! implementation of [`Node`]:
//!
//! ```rust
//! use sexpression::Node;
//!
//! let mut root = Node::create_list("net").unwrap();
//! root.append_token("gnd").unwrap();
//! root.append_string_child("name", "GND", true).unwrap();
//! root.append_line_break().unwrap();
//! assert_eq!(root.to_string(), "(net gnd\n  (name \"GND\")\n)");
//! ```
//!
//! ## Direct Printer Usage
//!
//! ```rust
//! use sexpression::{parse, Printer, PrintOptions};
//!
//! let root = parse("(a\n(b 1)\n)", "a.lp").unwrap();
//! let mut printer = Printer::new(PrintOptions::new().with_indent(3));
//! printer.print(&root, 0);
//! assert_eq!(printer.into_inner(), "(a\n   (b 1)\n)");
//! ```

use tracing::trace;

use crate::escape::escape_string;
use crate::{Node, NodeKind, PrintOptions};

/// Renders nodes into an owned buffer.
pub struct Printer {
    output: String,
    options: PrintOptions,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Printer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders `node` as if it started at nesting level `indent`.
    ///
    /// The opening text is not indented; `indent` only affects the lines
    /// started by LineBreaks and the closing parenthesis of a multi-line List.
    pub fn print(&mut self, node: &Node, indent: usize) {
        self.print_node(node, indent);
    }

    /// Returns whether the rendered text spans more than one line.
    fn print_node(&mut self, node: &Node, indent: usize) -> bool {
        match node.kind() {
            NodeKind::List { name, children } => self.print_list(name, children, indent),
            NodeKind::Token(text) => {
                self.output.push_str(text);
                false
            }
            NodeKind::String(text) => {
                self.output.push('"');
                self.output.push_str(&escape_string(text));
                self.output.push('"');
                false
            }
            NodeKind::LineBreak => {
                self.write_line_break(indent);
                true
            }
        }
    }

    /// Renders `node` as a complete document, honoring
    /// [`PrintOptions::trailing_newline`].
    pub fn print_document(&mut self, node: &Node) {
        trace!(indent = self.options.indent, "printing document");
        self.print(node, 0);
        if self.options.trailing_newline && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn print_list(&mut self, name: &str, children: &[Node], indent: usize) -> bool {
        self.output.push('(');
        self.output.push_str(name);

        let mut multi_line = false;
        for child in children {
            if child.is_line_break() {
                self.write_line_break(indent + 1);
                multi_line = true;
            } else {
                if !self.output.ends_with(' ') && !self.output.ends_with('\n') {
                    self.output.push(' ');
                }
                multi_line |= self.print_node(child, indent + 1);
            }
        }

        if multi_line {
            match children.last() {
                Some(last) if last.is_line_break() => self.trim_trailing_spaces(),
                _ => self.output.push('\n'),
            }
            self.write_indent(indent);
        }
        self.output.push(')');
        multi_line
    }

    fn write_line_break(&mut self, indent: usize) {
        self.trim_trailing_spaces();
        self.output.push('\n');
        self.write_indent(indent);
    }

    #[inline]
    fn write_indent(&mut self, level: usize) {
        let width = level * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    /// Indentation written for a LineBreak that turned out to be followed by
    /// another LineBreak or the closing parenthesis.
    fn trim_trailing_spaces(&mut self) {
        let trimmed = self.output.trim_end_matches(' ').len();
        self.output.truncate(trimmed);
    }
}
