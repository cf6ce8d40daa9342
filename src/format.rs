//! Text Format Reference
//!
//! This module documents the S-expression dialect read and written by this
//! library.
//!
//! # Overview
//!
//! A document is a single List. Lists contain Tokens, Strings and further
//! Lists, and remember where line breaks were placed between their children.
//!
//! ```text
//! (symbol 5bd3f2a2-6b4c-4a1d-9d47-cc3d2b7a4f11
//!  (name "Resistor")
//!  (created 2024-01-15T10:30:00Z)
//!  (pin 1 (position 0 -5.08) (rotation 90))
//!  (pin 2 (position 0 5.08) (rotation 270))
//! )
//! ```
//!
//! (shown with one-space indentation, see below for the canonical layout)
//!
//! # Elements
//!
//! ## Lists
//!
//! `(name child child ...)`. The name directly follows the opening
//! parenthesis and is required.
//!
//! **Rules**:
//! - Names match `[A-Za-z_][A-Za-z0-9_.:-]*`
//! - `()`, `("quoted")` and `((nested))` are rejected: a List without a bare
//!   name cannot be read
//! - Children are separated by whitespace
//!
//! ## Tokens
//!
//! Bare leaves, written verbatim: `1`, `-5.08`, `true`, `none`, `#ff00ff00`,
//! `2024-01-15T10:30:00Z`.
//!
//! **Rules**:
//! - Never empty
//! - No whitespace, no `(`, `)` or `"`
//! - Everything else, including non-ASCII text, is allowed
//!
//! ## Strings
//!
//! Quoted leaves for free text. A String may be empty and may contain any
//! character; the following are escaped:
//!
//! | Character | Escape |
//! |-----------|--------|
//! | `"` | `\"` |
//! | `\` | `\\` |
//! | newline | `\n` |
//! | carriage return | `\r` |
//! | tab | `\t` |
//! | backspace | `\b` |
//! | form feed | `\f` |
//! | NUL | `\0` |
//!
//! When reading, a backslash followed by any other character is kept as is:
//! `"C:\data"` reads as `C:\data`. The printer always escapes a backslash as `\\`,
//! so such a String is normalized once: it is written back as `"C:\\data"`,
//! which reads as the same text and prints unchanged from then on.
//!
//! # Nesting
//!
//! Lists may nest at most 256 levels deep by default (the root List is
//! level 1); deeper documents are rejected with a syntax error at the
//! offending `(`. See [`ParseOptions::with_max_depth`](crate::ParseOptions::with_max_depth).
//!
//! # Layout
//!
//! The printer is canonical: the same tree always produces the same bytes.
//!
//! - Children on the same line are separated by exactly one space
//! - A new line is started only where the tree holds a LineBreak
//! - Lines inside a List are indented one level (2 spaces) deeper than the
//!   line holding the List's opening parenthesis
//! - A List spanning several lines closes on a line of its own
//! - Blank lines are kept; no line ends with whitespace
//! - Documents end with a single newline
//!
//! ```text
//! (pad 1
//!   (side top)
//!   (shape (rect 600 400))
//!
//!   (net gnd)
//! )
//! ```
//!
//! When reading, each line of distance between two children (or between
//! the last child and the closing parenthesis) becomes one LineBreak, so the
//! example above survives a read/write cycle byte for byte. Indentation in
//! the input is not significant and is normalized on output.
//!
//! # Values
//!
//! Leaves hold text; the typed getters interpret it:
//!
//! | Type | Written as | Example |
//! |------|------------|---------|
//! | `bool` | `true` / `false` (exactly) | `(locked false)` |
//! | integers | decimal, optional `-` | `(size 600)` |
//! | `BigInt` | decimal of any length | `(serial 123456789012345678901234567890)` |
//! | `Color` | `#aarrggbb`; `#rrggbb` and `#rgb` accepted | `(color #ffcc3300)` |
//! | `Url` | absolute URL | `(url "https://example.com/")` |
//! | `DateTime<Utc>` | ISO 8601, UTC, `Z` suffix | `(created 2024-01-15T10:30:00Z)` |
//! | `Option<T>` | the type's own sentinel when empty | `(grid none)` |
//!
//! # Limitations
//!
//! - **Comments**: not supported
//! - **Root**: exactly one List per document
//! - **Floating point**: not built in; store decimals as text in the unit of
//!   your choice and decode them with your own type

// This module contains only documentation; no implementation code
