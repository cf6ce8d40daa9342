//! Configuration options for reading and writing documents.
//!
//! This module provides two small builder structs:
//!
//! - [`PrintOptions`]: how the pretty-printer lays out a tree
//! - [`ParseOptions`]: what the parser keeps from the input text
//!
//! The defaults produce the canonical format, so a document written with
//! [`PrintOptions::default()`] and read back with [`ParseOptions::default()`]
//! prints identically a second time.
//!
//! ## Examples
//!
//! ```rust
//! use sexpression::{parse_with_options, to_string_with_options, ParseOptions, PrintOptions};
//!
//! let text = "(symbol\n (pin 1)\n (pin 2)\n)";
//!
//! // Re-indent with four spaces
//! let root = parse_with_options(text, "sym.lp", ParseOptions::new()).unwrap();
//! let out = to_string_with_options(&root, PrintOptions::new().with_indent(4));
//! assert_eq!(out, "(symbol\n    (pin 1)\n    (pin 2)\n)\n");
//!
//! // Drop the original layout entirely
//! let flat = ParseOptions::new().with_line_breaks(false);
//! let root = parse_with_options(text, "sym.lp", flat).unwrap();
//! let out = to_string_with_options(&root, PrintOptions::new().with_trailing_newline(false));
//! assert_eq!(out, "(symbol (pin 1) (pin 2))");
//! ```

/// Layout options for the pretty-printer.
///
/// # Examples
///
/// ```rust
/// use sexpression::PrintOptions;
///
/// let options = PrintOptions::new();
/// assert_eq!(options.indent, 2);
/// assert!(options.trailing_newline);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Whether whole documents end with a `\n`. Rendering a single node
    /// through `Display` never adds one.
    pub trailing_newline: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent: 2,
            trailing_newline: true,
        }
    }
}

impl PrintOptions {
    /// Creates the canonical options (2-space indent, trailing newline).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::PrintOptions;
    ///
    /// let options = PrintOptions::new().with_indent(1);
    /// assert_eq!(options.indent, 1);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }
}

/// Deepest List nesting accepted by default when parsing.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for the parser bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether newlines between the children of a List are turned into
    /// LineBreak nodes. When disabled, the parsed tree is flat and prints on
    /// a single line.
    pub preserve_line_breaks: bool,
    /// Deepest List nesting accepted; the root List is at depth 1. A group
    /// opened below this depth is a syntax error.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            preserve_line_breaks: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Sets the deepest List nesting the parser accepts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::{parse_with_options, Error, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_max_depth(2);
    /// assert!(parse_with_options("(a (b))", "a.lp", options.clone()).is_ok());
    /// assert!(matches!(
    ///     parse_with_options("(a (b (c)))", "a.lp", options),
    ///     Err(Error::Syntax { .. })
    /// ));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
