//! # sexpression
//!
//! A typed, round-trippable S-expression document format for persisting
//! structured records as human-editable text files.
//!
//! ## What is it?
//!
//! Documents are trees of named lists with bare tokens and quoted strings as
//! leaves:
//!
//! ```text
//! (footprint 2d3a4c5e-0000-4000-8000-000000000001
//!   (name "SOT-23")
//!   (pad 1 (side top) (size 600))
//!   (locked false)
//! )
//! ```
//!
//! The format is designed for files that live in version control and are
//! also edited by hand: the printer is canonical and deterministic, and the
//! parser remembers where the author put line breaks, so reading and writing
//! a file again produces a minimal diff.
//!
//! ## Key Features
//!
//! - **Canonical printing**: stable indentation, explicit line-break markers
//!   and escaping; see [`format`] for the exact rules
//! - **Typed values**: leaves convert to and from `bool`, integers, [`Color`],
//!   URLs, UTC timestamps, optional values and user-defined types through the
//!   [`Encode`]/[`Decode`] traits
//! - **Precise errors**: every node knows its source and position, and decode
//!   failures report the offending text, e.g. `pad.lp:3:9: failed to parse
//!   "maybe": not a valid boolean`
//! - **Path lookup**: `root.value_by_path::<u32>("pad/size", false)`
//!
//! ## Quick Start
//!
//! ### Reading
//!
//! ```rust
//! use sexpression::parse;
//!
//! let text = "(pad 1\n  (side top)\n  (size 600)\n)\n";
//! let root = parse(text, "pad.lp").unwrap();
//!
//! assert_eq!(root.name().unwrap(), "pad");
//! assert_eq!(root.value_of_first_child::<u8>(false).unwrap(), 1);
//! assert_eq!(root.value_by_path::<String>("side", false).unwrap(), "top");
//! assert_eq!(root.value_by_path::<u32>("size", false).unwrap(), 600);
//! ```
//!
//! ### Building and Writing
//!
//! ```rust
//! use sexpression::{to_string, Color, Node};
//!
//! let mut root = Node::create_list("layer").unwrap();
//! root.append_token("top_copper").unwrap();
//! root.append_token_child("color", &Color::rgb(0xcc, 0x33, 0x00), true).unwrap();
//! root.append_token_child("visible", &true, true).unwrap();
//! root.append_line_break().unwrap();
//!
//! assert_eq!(
//!     to_string(&root),
//!     "(layer top_copper\n  (color #ffcc3300)\n  (visible true)\n)\n"
//! );
//! ```
//!
//! ### Modifying in Place
//!
//! ```rust
//! use sexpression::{parse, to_string, Node};
//!
//! let mut root = parse("(net gnd\n  (name \"GND\")\n)\n", "net.lp").unwrap();
//! *root.child_by_path_mut("name").unwrap() = {
//!     let mut name = Node::create_list("name").unwrap();
//!     name.append_string("AGND").unwrap();
//!     name
//! };
//! assert_eq!(to_string(&root), "(net gnd\n  (name \"AGND\")\n)\n");
//! ```
//!
//! ### Custom Value Types
//!
//! ```rust
//! use sexpression::{impl_codec_via_str, parse};
//! use std::fmt;
//! use std::str::FromStr;
//!
//! #[derive(Debug, PartialEq)]
//! enum Side { Top, Bottom }
//!
//! impl fmt::Display for Side {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str(match self { Side::Top => "top", Side::Bottom => "bottom" })
//!     }
//! }
//!
//! impl FromStr for Side {
//!     type Err = String;
//!     fn from_str(s: &str) -> Result<Self, String> {
//!         match s {
//!             "top" => Ok(Side::Top),
//!             "bottom" => Ok(Side::Bottom),
//!             _ => Err(format!("unknown side {:?}", s)),
//!         }
//!     }
//! }
//!
//! impl_codec_via_str!(Side);
//!
//! let root = parse("(pad (side bottom))", "pad.lp").unwrap();
//! assert_eq!(root.value_by_path::<Side>("side", false).unwrap(), Side::Bottom);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: single pass over the text, no recursion in the tokenizer;
//!   Lists nest at most [`ParseOptions::max_depth`] levels (256 by default)
//! - **Printing**: O(n) into a pre-allocated buffer
//! - **Lookup**: paths are resolved against direct children only, level by level
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Invalid list names and tokens are rejected when the node is created,
//!   never at print time
//! - No panics in the public API

pub mod codec;
pub mod color;
pub mod de;
pub mod error;
pub mod escape;
pub mod format;
pub mod macros;
pub mod node;
pub mod options;
pub mod path;
pub mod reader;
pub mod ser;

pub use codec::{Decode, Encode, Nullable};
pub use color::Color;
pub use de::Deserializer;
pub use error::{DecodeError, Error, Location, Position, Result, SourceId};
pub use node::{Node, NodeKind, NodeType};
pub use options::{ParseOptions, PrintOptions, DEFAULT_MAX_DEPTH};
pub use reader::{GenericParser, GenericTree, Reader, SyntaxError};
pub use ser::Printer;

use std::io;
use tracing::debug;

/// Parses a document with the built-in [`Reader`].
///
/// `source` identifies the document in error messages and node locations;
/// usually the file path.
///
/// # Examples
///
/// ```rust
/// use sexpression::parse;
///
/// let root = parse("(version 3)", "lib/version.lp").unwrap();
/// assert_eq!(root.value_of_first_child::<u32>(false).unwrap(), 3);
/// assert_eq!(root.location().to_string(), "lib/version.lp:1:1");
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed text, a root that is not a
/// single List or Lists nested deeper than [`DEFAULT_MAX_DEPTH`], and
/// [`Error::MissingListName`] for a list without a valid name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str, source: impl Into<SourceId>) -> Result<Node> {
    parse_with_options(text, source, ParseOptions::default())
}

/// Parses a document with custom [`ParseOptions`].
///
/// # Errors
///
/// See [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(
    text: &str,
    source: impl Into<SourceId>,
    options: ParseOptions,
) -> Result<Node> {
    let reader = Reader::with_max_depth(options.max_depth);
    Deserializer::new(source.into(), options).deserialize(&reader, text)
}

/// Parses a document with any [`GenericParser`].
///
/// # Errors
///
/// Failures of `parser` are reported as [`Error::Syntax`]; everything else
/// as for [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with<P>(
    parser: &P,
    text: &str,
    source: impl Into<SourceId>,
    options: &ParseOptions,
) -> Result<Node>
where
    P: GenericParser + ?Sized,
{
    Deserializer::new(source.into(), options.clone()).deserialize(parser, text)
}

/// Parses a document from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use sexpression::from_slice;
///
/// let root = from_slice(b"(grid 2540)", "grid.lp").unwrap();
/// assert_eq!(root.value_of_first_child::<u32>(false).unwrap(), 2540);
/// assert!(from_slice(b"(bad \xff)", "bad.lp").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if `bytes` is not valid UTF-8, otherwise as for
/// [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8], source: impl Into<SourceId>) -> Result<Node> {
    let source = source.into();
    let text = std::str::from_utf8(bytes).map_err(|e| {
        Error::syntax(Location::new(source.clone(), None), &e.to_string())
    })?;
    parse(text, source)
}

/// Parses a document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use sexpression::from_reader;
/// use std::io::Cursor;
///
/// let root = from_reader(Cursor::new(b"(grid 2540)"), "grid.lp").unwrap();
/// assert_eq!(root.name().unwrap(), "grid");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as for [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R, source: impl Into<SourceId>) -> Result<Node>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes, source)
}

/// Renders `node` as a complete document with the canonical options.
///
/// Unlike `node.to_string()`, the document ends with a newline.
///
/// # Examples
///
/// ```rust
/// use sexpression::{to_string, Node};
///
/// let mut root = Node::create_list("grid").unwrap();
/// root.append_token(&2540).unwrap();
/// assert_eq!(to_string(&root), "(grid 2540)\n");
/// assert_eq!(root.to_string(), "(grid 2540)");
/// ```
#[must_use]
pub fn to_string(node: &Node) -> String {
    to_string_with_options(node, PrintOptions::default())
}

/// Renders `node` as a complete document with custom [`PrintOptions`].
#[must_use]
pub fn to_string_with_options(node: &Node, options: PrintOptions) -> String {
    let mut printer = Printer::new(options);
    printer.print_document(node);
    let output = printer.into_inner();
    debug!(bytes = output.len(), "rendered document");
    output
}

/// Writes `node` as a complete document to `writer`.
///
/// # Examples
///
/// ```rust
/// use sexpression::{to_writer, Node};
///
/// let root = Node::create_list("empty").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &root).unwrap();
/// assert_eq!(buffer, b"(empty)\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, node: &Node) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, node, PrintOptions::default())
}

/// Writes `node` as a complete document with custom [`PrintOptions`].
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, node: &Node, options: PrintOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(node, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
