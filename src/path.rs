//! Lookup paths.
//!
//! A path names a nested child by the names of the nodes leading to it,
//! separated by `/` or `.`: `"pad/size"` and `"pad.size"` both resolve to
//! the `size` List inside the first `pad` List. Each segment selects the
//! *first* direct child matching it (see
//! [`Node::children_named`](crate::Node::children_named)).
//!
//! Since `.` is also allowed inside list names, a segment is matched
//! greedily: the longest prefix of the remaining path that names a child
//! wins, and shorter prefixes are only tried if the rest of the path cannot
//! be resolved below that child.
//!
//! ```rust
//! use sexpression::parse;
//!
//! let root = parse("(lib (version.major 3) (version (major 4)))", "lib.lp").unwrap();
//! assert_eq!(root.value_by_path::<u8>("version.major", false).unwrap(), 3);
//! assert_eq!(root.value_by_path::<u8>("version/major", false).unwrap(), 4);
//! ```

use crate::Node;

#[inline]
#[must_use]
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '.'
}

/// Resolves `path` below `node`. An empty path resolves to nothing.
#[must_use]
pub fn resolve<'a>(node: &'a Node, path: &str) -> Option<&'a Node> {
    let mut current = node;
    for index in resolve_indices(node, path)? {
        current = &current.children()[index];
    }
    Some(current)
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(node: &'a mut Node, path: &str) -> Option<&'a mut Node> {
    let indices = resolve_indices(node, path)?;
    let mut current = node;
    for index in indices {
        current = current.children_mut().get_mut(index)?;
    }
    Some(current)
}

/// The child indices (raw, LineBreaks counted) leading from `node` to the
/// node named by `path`.
fn resolve_indices(node: &Node, path: &str) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    if resolve_from(node, path, &mut indices) {
        Some(indices)
    } else {
        None
    }
}

fn resolve_from(node: &Node, path: &str, indices: &mut Vec<usize>) -> bool {
    let ends = path
        .char_indices()
        .filter(|&(_, c)| is_separator(c))
        .map(|(i, _)| i)
        .chain(std::iter::once(path.len()));
    let ends: Vec<usize> = ends.collect();

    for &end in ends.iter().rev() {
        let segment = &path[..end];
        if segment.is_empty() {
            continue;
        }
        let Some(index) = node
            .children()
            .iter()
            .position(|child| child.matches_name(segment))
        else {
            continue;
        };

        indices.push(index);
        if end == path.len() {
            return true;
        }
        // separators are ASCII, so `end + 1` is a char boundary
        if resolve_from(&node.children()[index], &path[end + 1..], indices) {
            return true;
        }
        indices.pop();
    }
    false
}
