//! The document tree.
//!
//! A [`Node`] is exactly one of four kinds:
//!
//! - **List**: a named, ordered container, written `(name child child ...)`
//! - **Token**: a bare leaf, written verbatim (`-12.34`, `none`, `#ff00ff00`)
//! - **String**: a quoted leaf, written `"..."` with escaping
//! - **LineBreak**: a formatting marker inside a List; it carries no data and
//!   is skipped by every semantic query (named lookup, paths, typed getters)
//!
//! Nodes own their children. Cloning a node deep-copies its subtree, so no
//! node is ever shared between two parents.
//!
//! ## Building Trees
//!
//! ```rust
//! use sexpression::Node;
//!
//! let mut root = Node::create_list("footprint").unwrap();
//! root.append_token("default").unwrap();
//! root.append_string_child("name", "SOT-23", true).unwrap();
//! root.append_list("pad", true)
//!     .unwrap()
//!     .append_token(&1)
//!     .unwrap()
//!     .append_token_child("size", &600, false)
//!     .unwrap();
//! root.append_line_break().unwrap();
//!
//! assert_eq!(
//!     root.to_string(),
//!     "(footprint default\n  (name \"SOT-23\")\n  (pad 1 (size 600))\n)"
//! );
//! ```
//!
//! ## Reading Values
//!
//! ```rust
//! use sexpression::parse;
//!
//! let root = parse("(pad 1 (size 600) (locked true))", "pad.lp").unwrap();
//! assert_eq!(root.name().unwrap(), "pad");
//! assert_eq!(root.value_of_first_child::<u32>(false).unwrap(), 1);
//! assert_eq!(root.value_by_path::<i64>("size", false).unwrap(), 600);
//! assert!(root.value_by_path::<bool>("locked", false).unwrap());
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::escape::{is_valid_list_name, is_valid_token};
use crate::ser::Printer;
use crate::{Decode, Encode, Error, Location, PrintOptions, Result};

/// Classification of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    List,
    Token,
    String,
    LineBreak,
}

/// The payload of a [`Node`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    List { name: String, children: Vec<Node> },
    Token(String),
    String(String),
    LineBreak,
}

/// A node of an S-expression document.
///
/// Equality compares structure and content only; the [`Location`] a node was
/// read from never takes part in it.
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    location: Location,
}

impl Node {
    /// Creates an empty List.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `name` is not a valid list name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::{Error, Node};
    ///
    /// assert!(Node::create_list("valid_name-1.2").is_ok());
    /// assert!(matches!(Node::create_list("1bad"), Err(Error::InvalidIdentifier(_))));
    /// ```
    pub fn create_list(name: &str) -> Result<Node> {
        if !is_valid_list_name(name) {
            return Err(Error::InvalidIdentifier(name.to_string()));
        }
        Ok(Node::synthetic(NodeKind::List {
            name: name.to_string(),
            children: Vec::new(),
        }))
    }

    /// Creates a bare Token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if `text` is empty or contains
    /// whitespace, parentheses or quotes.
    pub fn create_token(text: &str) -> Result<Node> {
        if !is_valid_token(text) {
            return Err(Error::InvalidToken(text.to_string()));
        }
        Ok(Node::synthetic(NodeKind::Token(text.to_string())))
    }

    /// Creates a quoted String. Any text is allowed.
    pub fn create_string(text: impl Into<String>) -> Node {
        Node::synthetic(NodeKind::String(text.into()))
    }

    pub fn create_line_break() -> Node {
        Node::synthetic(NodeKind::LineBreak)
    }

    fn synthetic(kind: NodeKind) -> Node {
        Node {
            kind,
            location: Location::synthetic(),
        }
    }

    /// Wraps an already validated payload. Used by the parser bridge.
    pub(crate) fn located(kind: NodeKind, location: Location) -> Node {
        Node { kind, location }
    }

    /// Validates a payload coming from outside the builder API.
    fn from_kind(kind: NodeKind) -> Result<Node> {
        match &kind {
            NodeKind::List { name, .. } if !is_valid_list_name(name) => {
                Err(Error::InvalidIdentifier(name.clone()))
            }
            NodeKind::Token(text) if !is_valid_token(text) => {
                Err(Error::InvalidToken(text.clone()))
            }
            _ => Ok(Node::synthetic(kind)),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Where this node was read from; synthetic for built nodes.
    #[inline]
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::List { .. } => NodeType::List,
            NodeKind::Token(_) => NodeType::Token,
            NodeKind::String(_) => NodeType::String,
            NodeKind::LineBreak => NodeType::LineBreak,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.kind, NodeKind::List { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self.kind, NodeKind::Token(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.kind, NodeKind::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_line_break(&self) -> bool {
        matches!(self.kind, NodeKind::LineBreak)
    }

    /// Returns `true` if rendering this List spans more than one line, i.e.
    /// it contains a LineBreak or a child List that does.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::Node;
    ///
    /// let mut root = Node::create_list("root").unwrap();
    /// root.append_list("inner", false).unwrap().append_token("x").unwrap();
    /// assert!(!root.is_multi_line_list());
    ///
    /// root.append_list("other", false).unwrap().append_line_break().unwrap();
    /// assert!(root.is_multi_line_list());
    /// ```
    #[must_use]
    pub fn is_multi_line_list(&self) -> bool {
        self.children()
            .iter()
            .any(|child| child.is_line_break() || child.is_multi_line_list())
    }

    /// The name of a List.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAList`] for any other kind of node.
    pub fn name(&self) -> Result<&str> {
        match &self.kind {
            NodeKind::List { name, .. } => Ok(name),
            _ => Err(Error::NotAList {
                location: self.location.clone(),
            }),
        }
    }

    /// The raw text of a Token or String leaf.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Token(text) | NodeKind::String(text) => Some(text),
            _ => None,
        }
    }

    /// All children in order, LineBreak markers included. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::List { children, .. } => children,
            _ => &[],
        }
    }

    /// Mutable access to the children, e.g. to edit a record in place.
    pub fn children_mut(&mut self) -> &mut [Node] {
        match &mut self.kind {
            NodeKind::List { children, .. } => children,
            _ => Default::default(),
        }
    }

    /// Direct children matching `name`: Lists by their name, Tokens and
    /// Strings by their value. LineBreaks never match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::parse;
    ///
    /// let root = parse("(pkg (pad 1) (pad 2) smd (pin 3))", "pkg.lp").unwrap();
    /// assert_eq!(root.children_named("pad").len(), 2);
    /// assert_eq!(root.children_named("smd").len(), 1);
    /// assert!(root.children_named("via").is_empty());
    /// ```
    #[must_use]
    pub fn children_named(&self, name: &str) -> Vec<&Node> {
        self.children()
            .iter()
            .filter(|child| child.matches_name(name))
            .collect()
    }

    pub(crate) fn matches_name(&self, name: &str) -> bool {
        match &self.kind {
            NodeKind::List { name: own, .. } => own == name,
            NodeKind::Token(text) | NodeKind::String(text) => text == name,
            NodeKind::LineBreak => false,
        }
    }

    /// The child at `index` in the full child sequence; LineBreak markers
    /// occupy indices like any other child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.children().len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::Node;
    ///
    /// let mut root = Node::create_list("root").unwrap();
    /// root.append_token("a").unwrap().append_line_break().unwrap().append_token("b").unwrap();
    /// assert!(root.child_at(1).unwrap().is_line_break());
    /// assert_eq!(root.child_at(2).unwrap().raw_value(), Some("b"));
    /// assert!(root.child_at(3).is_err());
    /// ```
    pub fn child_at(&self, index: usize) -> Result<&Node> {
        self.children().get(index).ok_or_else(|| Error::IndexOutOfRange {
            location: self.location.clone(),
            index,
            len: self.children().len(),
        })
    }

    pub fn child_at_mut(&mut self, index: usize) -> Result<&mut Node> {
        let len = self.children().len();
        let location = self.location.clone();
        self.children_mut()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange {
                location,
                index,
                len,
            })
    }

    /// Resolves a lookup path such as `"pad/size"` or `"pad.size"`; see
    /// [`path`](crate::path) for the exact rules. Returns `None` if any
    /// segment is missing.
    #[must_use]
    pub fn try_child_by_path(&self, path: &str) -> Option<&Node> {
        crate::path::resolve(self, path)
    }

    pub fn try_child_by_path_mut(&mut self, path: &str) -> Option<&mut Node> {
        crate::path::resolve_mut(self, path)
    }

    /// Like [`try_child_by_path`](Self::try_child_by_path), but fails with
    /// [`Error::ChildNotFound`].
    pub fn child_by_path(&self, path: &str) -> Result<&Node> {
        self.try_child_by_path(path)
            .ok_or_else(|| self.child_not_found(path))
    }

    pub fn child_by_path_mut(&mut self, path: &str) -> Result<&mut Node> {
        let err = self.child_not_found(path);
        self.try_child_by_path_mut(path).ok_or(err)
    }

    fn child_not_found(&self, path: &str) -> Error {
        Error::ChildNotFound {
            location: self.location.clone(),
            path: path.to_string(),
        }
    }

    /// Decodes the text of this Token or String.
    ///
    /// # Errors
    ///
    /// - [`Error::NotATokenOrString`] if this is a List or LineBreak
    /// - [`Error::EmptyValue`] if `throw_if_empty` is set and the text is empty
    /// - [`Error::Decode`] if `T` rejects the text; the error carries this
    ///   node's location and the offending text
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::{Error, Node};
    ///
    /// let empty = Node::create_string("");
    /// assert_eq!(empty.value::<String>(false).unwrap(), "");
    /// assert!(matches!(empty.value::<String>(true), Err(Error::EmptyValue { .. })));
    /// ```
    pub fn value<T: Decode>(&self, throw_if_empty: bool) -> Result<T> {
        let text = self.raw_value().ok_or_else(|| Error::NotATokenOrString {
            location: self.location.clone(),
        })?;
        if throw_if_empty && text.is_empty() {
            return Err(Error::EmptyValue {
                location: self.location.clone(),
            });
        }
        T::decode(text).map_err(|cause| Error::decode(self.location.clone(), text, cause))
    }

    /// Decodes the first child that is not a LineBreak.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoChildren`] if there is no such child, otherwise
    /// whatever [`value`](Self::value) returns for it.
    pub fn value_of_first_child<T: Decode>(&self, throw_if_empty: bool) -> Result<T> {
        let child = self
            .children()
            .iter()
            .find(|child| !child.is_line_break())
            .ok_or_else(|| Error::NoChildren {
                location: self.location.clone(),
            })?;
        child.value(throw_if_empty)
    }

    /// Decodes the first child of the node found at `path`.
    pub fn value_by_path<T: Decode>(&self, path: &str, throw_if_empty: bool) -> Result<T> {
        self.child_by_path(path)?
            .value_of_first_child(throw_if_empty)
    }

    fn children_vec_mut(&mut self) -> Result<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::List { children, .. } => Ok(children),
            _ => Err(Error::NotAList {
                location: self.location.clone(),
            }),
        }
    }

    /// Appends `child`, optionally preceded by a LineBreak, and returns `self`
    /// for chaining sibling appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAList`] if `self` is not a List.
    pub fn append_child(&mut self, child: Node, linebreak: bool) -> Result<&mut Self> {
        let children = self.children_vec_mut()?;
        if linebreak {
            children.push(Node::create_line_break());
        }
        children.push(child);
        Ok(self)
    }

    /// Appends a new empty List and returns the *new* child, for nesting.
    pub fn append_list(&mut self, name: &str, linebreak: bool) -> Result<&mut Node> {
        let child = Node::create_list(name)?;
        let children = self.children_vec_mut()?;
        if linebreak {
            children.push(Node::create_line_break());
        }
        children.push(child);
        let last = children.len() - 1;
        Ok(&mut children[last])
    }

    /// Encodes `value` and appends it as a bare Token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the encoded text cannot be written
    /// unquoted, and [`Error::NotAList`] if `self` is not a List.
    pub fn append_token<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        let token = Node::create_token(&value.encode())?;
        self.append_child(token, false)
    }

    /// Encodes `value` and appends it as a quoted String.
    pub fn append_string<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        self.append_child(Node::create_string(value.encode()), false)
    }

    /// Appends `(name <token>)` and returns the new List.
    pub fn append_token_child<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        linebreak: bool,
    ) -> Result<&mut Node> {
        let child = self.append_list(name, linebreak)?;
        child.append_token(value)?;
        Ok(child)
    }

    /// Appends `(name "<string>")` and returns the new List.
    pub fn append_string_child<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        linebreak: bool,
    ) -> Result<&mut Node> {
        let child = self.append_list(name, linebreak)?;
        child.append_string(value)?;
        Ok(child)
    }

    pub fn append_line_break(&mut self) -> Result<&mut Self> {
        self.append_child(Node::create_line_break(), false)
    }

    /// Strips every LineBreak from this subtree.
    pub fn remove_line_breaks(&mut self) {
        if let NodeKind::List { children, .. } = &mut self.kind {
            children.retain(|child| !child.is_line_break());
            for child in children.iter_mut() {
                child.remove_line_breaks();
            }
        }
    }

    /// Equality that ignores where LineBreaks are placed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sexpression::parse;
    ///
    /// let compact = parse("(a (b 1) (c 2))", "a").unwrap();
    /// let expanded = parse("(a\n  (b 1)\n  (c 2)\n)", "b").unwrap();
    /// assert_ne!(compact, expanded);
    /// assert!(compact.semantic_eq(&expanded));
    /// ```
    #[must_use]
    pub fn semantic_eq(&self, other: &Node) -> bool {
        match (&self.kind, &other.kind) {
            (
                NodeKind::List { name, children },
                NodeKind::List {
                    name: other_name,
                    children: other_children,
                },
            ) => {
                let ours = children.iter().filter(|c| !c.is_line_break());
                let mut theirs = other_children.iter().filter(|c| !c.is_line_break());
                name == other_name
                    && ours
                        .map(Some)
                        .chain(std::iter::once(None))
                        .all(|mine| match (mine, theirs.next()) {
                            (Some(a), Some(b)) => a.semantic_eq(b),
                            (None, None) => true,
                            _ => false,
                        })
            }
            (a, b) => a == b,
        }
    }

    /// Renders this node canonically, starting at `indent` levels.
    #[must_use]
    pub fn to_string_indented(&self, indent: usize) -> String {
        let mut printer = Printer::new(PrintOptions::default());
        printer.print(self, indent);
        printer.into_inner()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_indented(0))
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.kind.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let kind = NodeKind::deserialize(deserializer)?;
        Node::from_kind(kind).map_err(de::Error::custom)
    }
}
