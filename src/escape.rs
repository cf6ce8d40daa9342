//! Validation and escaping rules for leaves and list names.
//!
//! These are pure functions shared by the builders (which reject invalid
//! names and tokens as soon as a node is created), the parser bridge and the
//! printer.

/// Returns `true` if `name` may be used as the name of a List.
///
/// A name starts with an ASCII letter or `_`, followed by letters, digits,
/// `.`, `:`, `_` or `-`.
///
/// # Examples
///
/// ```rust
/// use sexpression::escape::is_valid_list_name;
///
/// assert!(is_valid_list_name("valid_name-1.2"));
/// assert!(is_valid_list_name("lib:pad"));
/// assert!(!is_valid_list_name("1bad"));
/// assert!(!is_valid_list_name(""));
/// ```
#[must_use]
pub fn is_valid_list_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '_' | '-'))
}

/// Returns `true` if `text` can be written as a bare (unquoted) token.
///
/// # Examples
///
/// ```rust
/// use sexpression::escape::is_valid_token;
///
/// assert!(is_valid_token("-12.34"));
/// assert!(is_valid_token("#ff00ff00"));
/// assert!(!is_valid_token(""));
/// assert!(!is_valid_token("two words"));
/// assert!(!is_valid_token("(x"));
/// assert!(!is_valid_token("\"quoted\""));
/// ```
#[must_use]
pub fn is_valid_token(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(is_delimiter)
}

/// Characters that end a bare token.
#[inline]
pub(crate) fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')' || c == '"'
}

/// Escapes the content of a String leaf so that reading it back yields the
/// identical text. The surrounding quotes are not included.
///
/// # Examples
///
/// ```rust
/// use sexpression::escape::escape_string;
///
/// assert_eq!(escape_string(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape_string("C:\\lib"), "C:\\\\lib");
/// assert_eq!(escape_string("line1\r\nline2"), "line1\\r\\nline2");
/// ```
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out
}

/// Maps the character following a backslash back to the character it encodes.
///
/// Unknown escapes are not resolved; the reader keeps them literally.
#[inline]
pub(crate) fn unescape_char(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'b' => Some('\u{0008}'),
        'f' => Some('\u{000C}'),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Reverses [`escape_string`].
///
/// Unknown escape sequences are preserved literally (backslash included).
///
/// # Examples
///
/// ```rust
/// use sexpression::escape::{escape_string, unescape_string};
///
/// let original = "a \"quoted\" \\ path\n";
/// assert_eq!(unescape_string(&escape_string(original)), original);
/// ```
#[must_use]
pub fn unescape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next) => match unescape_char(next) {
                Some(resolved) => out.push(resolved),
                None => {
                    out.push('\\');
                    out.push(next);
                }
            },
            None => out.push('\\'),
        }
    }
    out
}
