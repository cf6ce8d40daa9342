//! Property-based tests for the printer/parser round trip
//!
//! Trees are generated through the builder API, including randomly placed
//! line breaks, so every layout the printer can produce gets read back.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use sexpression::escape::{escape_string, unescape_string};
use sexpression::{parse, to_string, Color, Decode, Encode, Node};

fn list_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_.:-]{0,8}"
}

fn token_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_#.+:/µΩ-]{1,10}"
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        token_text().prop_map(|text| Node::create_token(&text).unwrap()),
        any::<String>().prop_map(Node::create_string),
    ]
}

fn tree() -> impl Strategy<Value = Node> {
    let list = (list_name(), prop::collection::vec((leaf(), any::<bool>()), 0..4), any::<bool>())
        .prop_map(build_list);
    list.prop_recursive(4, 48, 6, |inner| {
        (
            list_name(),
            prop::collection::vec((prop_oneof![leaf(), inner], any::<bool>()), 0..6),
            any::<bool>(),
        )
            .prop_map(build_list)
    })
}

fn build_list((name, children, closing_break): (String, Vec<(Node, bool)>, bool)) -> Node {
    let mut node = Node::create_list(&name).unwrap();
    for (child, linebreak) in children {
        node.append_child(child, linebreak).unwrap();
    }
    if closing_break {
        node.append_line_break().unwrap();
    }
    node
}

fn codec_roundtrip<T: Encode + Decode + PartialEq + std::fmt::Debug>(value: &T) -> bool {
    match T::decode(&value.encode()) {
        Ok(decoded) => *value == decoded,
        Err(e) => {
            eprintln!("Decode failed: {}", e);
            eprintln!("Encoded was: {}", value.encode());
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_parse_recovers_built_tree(root in tree()) {
        let text = to_string(&root);
        let parsed = parse(&text, "prop.lp").unwrap();
        prop_assert!(parsed.semantic_eq(&root), "text was:\n{}", text);
    }

    #[test]
    fn prop_print_is_a_fixpoint(root in tree()) {
        let first = to_string(&root);
        let second = to_string(&parse(&first, "prop.lp").unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_no_trailing_whitespace(root in tree()) {
        let text = to_string(&root);
        prop_assert!(text.lines().all(|line| !line.ends_with(' ')));
        prop_assert!(text.ends_with(")\n"));
    }

    #[test]
    fn prop_multi_line_matches_output(root in tree()) {
        prop_assert_eq!(root.is_multi_line_list(), root.to_string().contains('\n'));
    }

    #[test]
    fn prop_string_escaping(s in any::<String>()) {
        prop_assert_eq!(unescape_string(&escape_string(&s)), s.clone());
        let escaped = escape_string(&s);
        prop_assert!(!escaped.contains('\n'));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(codec_roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(codec_roundtrip(&n));
    }

    #[test]
    fn prop_color(a in any::<u8>(), r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        prop_assert!(codec_roundtrip(&Color::argb(a, r, g, b)));
    }

    #[test]
    fn prop_datetime(millis in -62_000_000_000_000i64..250_000_000_000_000i64) {
        let dt: DateTime<Utc> = Utc.timestamp_millis_opt(millis).unwrap();
        prop_assert!(codec_roundtrip(&dt));
    }
}
