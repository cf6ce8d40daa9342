//! Error types for reading, navigating and decoding S-expression documents.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: malformed raw text reported by the tokenizer
//! - **Construction Errors**: invalid list names or tokens, lists without a name
//! - **Navigation Errors**: asking a node for something its kind cannot provide
//! - **Decode Errors**: a leaf whose text cannot be converted to the requested type
//!
//! ## Error Context
//!
//! Everything that can be traced back to a document carries a [`Location`]: the
//! identity of the source (usually a file path) and, when known, the 1-based
//! line and column. Unknown positions are displayed as `-1:-1`. Decode errors
//! additionally carry the offending raw text, so the message can be shown to
//! the end user unmodified.
//!
//! ```rust
//! use sexpression::{parse, Error};
//!
//! let root = parse("(board (visible maybe))", "board.lp").unwrap();
//! let err = root.value_by_path::<bool>("visible", false).unwrap_err();
//! assert!(matches!(err, Error::Decode { .. }));
//! assert_eq!(
//!     err.to_string(),
//!     "board.lp:1:17: failed to parse \"maybe\": not a valid boolean"
//! );
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Identity of the document a node originates from.
///
/// Cheap to clone; every node parsed from the same text shares one allocation.
/// Nodes built through the builder API carry a synthetic identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceId(Option<Arc<str>>);

impl SourceId {
    /// Creates a named source identity, e.g. from a file path.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        SourceId(Some(name.into()))
    }

    /// The identity of programmatically constructed nodes.
    #[must_use]
    pub const fn synthetic() -> Self {
        SourceId(None)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => f.write_str(name),
            None => f.write_str("<memory>"),
        }
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        SourceId::new(value)
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        SourceId::new(value)
    }
}

impl From<&Path> for SourceId {
    fn from(value: &Path) -> Self {
        SourceId::new(value.to_string_lossy().as_ref())
    }
}

/// A 1-based line and column in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// Where a node came from. Used for diagnostics only, never for equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: SourceId,
    pub position: Option<Position>,
}

impl Location {
    pub fn new(source: SourceId, position: Option<Position>) -> Self {
        Location { source, position }
    }

    /// Location of nodes that were not parsed from any document.
    #[must_use]
    pub const fn synthetic() -> Self {
        Location {
            source: SourceId::synthetic(),
            position: None,
        }
    }

    /// The 1-based line, or `-1` if unknown.
    #[must_use]
    pub fn line(&self) -> i64 {
        self.position.map_or(-1, |p| p.line as i64)
    }

    /// The 1-based column, or `-1` if unknown.
    #[must_use]
    pub fn column(&self) -> i64 {
        self.position.map_or(-1, |p| p.column as i64)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line(), self.column())
    }
}

/// Failure to convert leaf text into a typed value.
///
/// Returned by [`Decode::decode`](crate::Decode::decode) and wrapped into
/// [`Error::Decode`] together with the node's location and raw text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("not a valid boolean")]
    InvalidBoolean,

    #[error("not a valid integer")]
    InvalidInteger,

    #[error("not a valid color")]
    InvalidColor,

    #[error("not a valid URL: {0}")]
    InvalidUrl(url::ParseError),

    #[error("not a valid datetime: {0}")]
    InvalidDateTime(chrono::ParseError),

    /// Raised by user-defined decoders.
    #[error("{0}")]
    Failure(String),
}

impl DecodeError {
    /// Creates a decode failure for a user-defined type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::DecodeError;
    ///
    /// let err = DecodeError::custom("unknown layer");
    /// assert_eq!(err.to_string(), "unknown layer");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::Failure(msg.to_string())
    }
}

/// Represents all possible errors of this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed raw text (unbalanced parentheses, unterminated string, ...)
    #[error("{location}: syntax error: {msg}")]
    Syntax { location: Location, msg: String },

    /// A parenthesized group that is empty or does not start with a bare identifier
    #[error("{location}: list does not start with a valid name")]
    MissingListName { location: Location },

    #[error("invalid list name: \"{0}\"")]
    InvalidIdentifier(String),

    #[error("invalid token: \"{0}\"")]
    InvalidToken(String),

    #[error("{location}: node is not a list")]
    NotAList { location: Location },

    #[error("{location}: node is not a token or string")]
    NotATokenOrString { location: Location },

    #[error("{location}: child index {index} is out of range (node has {len} children)")]
    IndexOutOfRange {
        location: Location,
        index: usize,
        len: usize,
    },

    #[error("{location}: node does not have children")]
    NoChildren { location: Location },

    #[error("{location}: child not found: {path}")]
    ChildNotFound { location: Location, path: String },

    #[error("{location}: node value is empty")]
    EmptyValue { location: Location },

    /// A leaf that could not be decoded into the requested type
    #[error("{location}: failed to parse \"{text}\": {cause}")]
    Decode {
        location: Location,
        text: String,
        #[source]
        cause: DecodeError,
    },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    pub fn syntax(location: Location, msg: &str) -> Self {
        Error::Syntax {
            location,
            msg: msg.to_string(),
        }
    }

    pub fn decode(location: Location, text: &str, cause: DecodeError) -> Self {
        Error::Decode {
            location,
            text: text.to_string(),
            cause,
        }
    }

    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The document location the error refers to, if any.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::Syntax { location, .. }
            | Error::MissingListName { location }
            | Error::NotAList { location }
            | Error::NotATokenOrString { location }
            | Error::IndexOutOfRange { location, .. }
            | Error::NoChildren { location }
            | Error::ChildNotFound { location, .. }
            | Error::EmptyValue { location }
            | Error::Decode { location, .. } => Some(location),
            Error::InvalidIdentifier(_) | Error::InvalidToken(_) | Error::Io(_) => None,
        }
    }

    /// The underlying coercion failure of an [`Error::Decode`].
    #[must_use]
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
