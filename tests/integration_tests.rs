use chrono::{DateTime, TimeZone, Utc};
use sexpression::{
    from_reader, parse, parse_with_options, to_string, to_writer, Color, Error, Node,
    ParseOptions, Result, DEFAULT_MAX_DEPTH,
};
use url::Url;

#[derive(Debug, PartialEq)]
struct Pad {
    number: u32,
    side: String,
    size: (i64, i64),
    net: Option<String>,
}

#[derive(Debug, PartialEq)]
struct Footprint {
    name: String,
    author: String,
    created: DateTime<Utc>,
    url: Url,
    locked: bool,
    color: Color,
    pads: Vec<Pad>,
}

impl Pad {
    fn to_node(&self) -> Result<Node> {
        let mut node = Node::create_list("pad")?;
        node.append_token(&self.number)?;
        node.append_token_child("side", &self.side, false)?;
        node.append_list("size", false)?
            .append_token(&self.size.0)?
            .append_token(&self.size.1)?;
        match &self.net {
            Some(net) => node.append_string_child("net", net, false)?,
            None => node.append_token_child("net", "none", false)?,
        };
        Ok(node)
    }

    fn from_node(node: &Node) -> Result<Self> {
        let size = node.child_by_path("size")?;
        let net = node.child_by_path("net")?.child_at(0)?;
        Ok(Pad {
            number: node.value_of_first_child(false)?,
            side: node.value_by_path("side", true)?,
            size: (size.child_at(0)?.value(false)?, size.child_at(1)?.value(false)?),
            net: if net.is_string() {
                Some(net.value(true)?)
            } else {
                None
            },
        })
    }
}

impl Footprint {
    fn to_node(&self) -> Result<Node> {
        let mut root = Node::create_list("footprint")?;
        root.append_string_child("name", &self.name, true)?;
        root.append_string_child("author", &self.author, true)?;
        root.append_token_child("created", &self.created, true)?;
        root.append_string_child("url", &self.url, true)?;
        root.append_token_child("locked", &self.locked, true)?;
        root.append_token_child("color", &self.color, true)?;
        for pad in &self.pads {
            root.append_child(pad.to_node()?, true)?;
        }
        root.append_line_break()?;
        Ok(root)
    }

    fn from_node(root: &Node) -> Result<Self> {
        Ok(Footprint {
            name: root.value_by_path("name", true)?,
            author: root.value_by_path("author", false)?,
            created: root.value_by_path("created", true)?,
            url: root.value_by_path("url", true)?,
            locked: root.value_by_path("locked", true)?,
            color: root.value_by_path("color", true)?,
            pads: root
                .children_named("pad")
                .into_iter()
                .map(Pad::from_node)
                .collect::<Result<_>>()?,
        })
    }
}

fn sample() -> Footprint {
    Footprint {
        name: "SOT-23 \"small\"".to_string(),
        author: String::new(),
        created: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        url: Url::parse("https://example.com/parts/sot23").unwrap(),
        locked: false,
        color: Color::argb(0x80, 0xcc, 0x33, 0x00),
        pads: vec![
            Pad {
                number: 1,
                side: "top".to_string(),
                size: (600, -400),
                net: Some("GND".to_string()),
            },
            Pad {
                number: 2,
                side: "bottom".to_string(),
                size: (600, 400),
                net: None,
            },
        ],
    }
}

const SAMPLE_TEXT: &str = r#"(footprint
  (name "SOT-23 \"small\"")
  (author "")
  (created 2024-01-15T10:30:00Z)
  (url "https://example.com/parts/sot23")
  (locked false)
  (color #80cc3300)
  (pad 1 (side top) (size 600 -400) (net "GND"))
  (pad 2 (side bottom) (size 600 400) (net none))
)
"#;

#[test]
fn test_record_to_text() {
    let root = sample().to_node().unwrap();
    assert_eq!(to_string(&root), SAMPLE_TEXT);
}

#[test]
fn test_text_to_record() {
    let root = parse(SAMPLE_TEXT, "sot23.lp").unwrap();
    assert_eq!(Footprint::from_node(&root).unwrap(), sample());
}

#[test]
fn test_record_roundtrip_through_writer() {
    let root = sample().to_node().unwrap();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &root).unwrap();

    let back = from_reader(buffer.as_slice(), "buffer").unwrap();
    assert_eq!(back, root);
    assert_eq!(Footprint::from_node(&back).unwrap(), sample());
}

#[test]
fn test_hand_edited_layout_survives_modification() {
    let text = "(footprint\n  (name \"R1\")\n\n  (pad 1\n    (side top)\n  )\n  (locked false)\n)\n";
    let mut root = parse(text, "r1.lp").unwrap();

    *root.child_by_path_mut("locked").unwrap() = {
        let mut locked = Node::create_list("locked").unwrap();
        locked.append_token(&true).unwrap();
        locked
    };

    assert_eq!(
        to_string(&root),
        "(footprint\n  (name \"R1\")\n\n  (pad 1\n    (side top)\n  )\n  (locked true)\n)\n"
    );
}

#[test]
fn test_indentation_is_normalized() {
    let text = "(a\n\t(b 1)\n        (c\n   2)\n  )";
    let root = parse(text, "a.lp").unwrap();
    assert_eq!(to_string(&root), "(a\n  (b 1)\n  (c\n    2\n  )\n)\n");
}

#[test]
fn test_flat_parse_drops_layout() {
    let options = ParseOptions::new().with_line_breaks(false);
    let root = parse_with_options(SAMPLE_TEXT, "sot23.lp", options).unwrap();
    let text = to_string(&root);
    assert_eq!(text.lines().count(), 1);
    assert!(root.semantic_eq(&parse(SAMPLE_TEXT, "sot23.lp").unwrap()));
}

#[test]
fn test_decode_error_reports_source_and_text() {
    let text = "(footprint\n  (locked maybe)\n)";
    let root = parse(text, "lib/broken.lp").unwrap();
    let err = root.value_by_path::<bool>("locked", true).unwrap_err();
    assert_eq!(
        err.to_string(),
        "lib/broken.lp:2:11: failed to parse \"maybe\": not a valid boolean"
    );
}

#[test]
fn test_errors_propagate_from_record_readers() {
    let text = "(footprint (name \"x\"))";
    let root = parse(text, "partial.lp").unwrap();
    match Footprint::from_node(&root) {
        Err(Error::ChildNotFound { path, location }) => {
            assert_eq!(path, "author");
            assert_eq!(location.to_string(), "partial.lp:1:1");
        }
        other => panic!("expected ChildNotFound, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_location() {
    let err = parse("(footprint\n  (name \"unterminated)\n)", "bad.lp").unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
    assert_eq!(err.to_string(), "bad.lp:2:9: syntax error: unterminated string");
}

#[test]
fn test_empty_values() {
    let root = parse("(a (name \"\") (id x))", "a.lp").unwrap();
    assert_eq!(root.value_by_path::<String>("name", false).unwrap(), "");
    assert!(matches!(
        root.value_by_path::<String>("name", true),
        Err(Error::EmptyValue { .. })
    ));
}

#[test]
fn test_navigation_misuse() {
    let root = parse("(a (b x))", "a.lp").unwrap();
    let leaf = root.child_by_path("b").unwrap().child_at(0).unwrap();
    assert!(matches!(leaf.name(), Err(Error::NotAList { .. })));
    assert!(matches!(root.value::<u8>(false), Err(Error::NotATokenOrString { .. })));
    assert!(matches!(root.child_at(5), Err(Error::IndexOutOfRange { .. })));
}

#[test]
fn test_unicode_content() {
    let mut root = Node::create_list("label").unwrap();
    root.append_string("Widerstand 10 kΩ\t±1 %").unwrap();
    root.append_token("µm").unwrap();
    let text = to_string(&root);
    assert_eq!(text, "(label \"Widerstand 10 kΩ\\t±1 %\" µm)\n");
    assert_eq!(parse(&text, "label.lp").unwrap(), root);
}

fn nested(depth: usize) -> String {
    format!("{}{}", "(a ".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_depth_limit() {
    let root = parse(&nested(DEFAULT_MAX_DEPTH), "deep.lp").unwrap();
    assert_eq!(parse(&to_string(&root), "deep.lp").unwrap(), root);

    let err = parse(&nested(DEFAULT_MAX_DEPTH + 1), "deep.lp").unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "deep.lp:1:{}: syntax error: nesting exceeds {} levels",
            3 * DEFAULT_MAX_DEPTH + 1,
            DEFAULT_MAX_DEPTH
        )
    );

    let shallow = ParseOptions::new().with_max_depth(2);
    assert!(parse_with_options(&nested(2), "deep.lp", shallow.clone()).is_ok());
    assert!(matches!(
        parse_with_options(&nested(3), "deep.lp", shallow),
        Err(Error::Syntax { .. })
    ));
}
