//! Tests for the configurable serializer.

use thicket_dom::{Attributes, DomTree, ElementData, MAX_INDENT_SIZE, NodeId, NodeType, WriteOptions};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs: Attributes = attrs.iter().copied().collect();
    let id = tree.alloc(NodeType::Element(ElementData::new(tag.to_string(), attrs)));
    tree.append_child(parent, id);
    id
}

fn text(tree: &mut DomTree, parent: NodeId, data: &str) {
    let id = tree.alloc(NodeType::Text(data.to_string()));
    tree.append_child(parent, id);
}

/// `<div id="main"><p>hello</p><ul><li>a</li></ul><input name="q"/></div>`
fn sample() -> DomTree {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div", &[("id", "main")]);
    let p = element(&mut tree, div, "p", &[]);
    text(&mut tree, p, "hello");
    let ul = element(&mut tree, div, "ul", &[]);
    let li = element(&mut tree, ul, "li", &[]);
    text(&mut tree, li, "a");
    let _ = element(&mut tree, div, "input", &[("name", "q")]);
    tree
}

#[test]
fn test_pretty_default() {
    let out = sample().write(NodeId::ROOT, &WriteOptions::default());
    let expected = [
        r#"<div id="main">"#,
        "  <p>hello</p>",
        "  <ul>",
        "    <li>a</li>",
        "  </ul>",
        r#"  <input name="q" />"#,
        "</div>",
    ]
    .join("\r\n");
    assert_eq!(out, expected);
}

#[test]
fn test_compact() {
    let out = sample().write(NodeId::ROOT, &WriteOptions::compact());
    assert_eq!(
        out,
        r#"<div id="main"><p>hello</p><ul><li>a</li></ul><input name="q" /></div>"#
    );
}

#[test]
fn test_tabs_and_no_shrink() {
    let options = WriteOptions {
        use_tabs: true,
        shrink_text: false,
        ..WriteOptions::default()
    };
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p", &[]);
    text(&mut tree, p, "hello");
    assert_eq!(tree.write(NodeId::ROOT, &options), "<p>\r\n\thello\r\n</p>");
}

#[test]
fn test_shrink_limit_is_inclusive() {
    let mut tree = DomTree::new();
    let short = element(&mut tree, NodeId::ROOT, "p", &[]);
    text(&mut tree, short, "twenty characters!!!");
    let long = element(&mut tree, NodeId::ROOT, "p", &[]);
    text(&mut tree, long, "twenty-one characters");

    let options = WriteOptions::default();
    assert_eq!(tree.write(short, &options), "<p>twenty characters!!!</p>");
    assert_eq!(
        tree.write(long, &options),
        "<p>\r\n  twenty-one characters\r\n</p>"
    );
}

#[test]
fn test_childless_elements() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div", &[("class", "x")]);
    let script = element(&mut tree, NodeId::ROOT, "script", &[]);
    let br = element(&mut tree, NodeId::ROOT, "br", &[]);

    let options = WriteOptions::default();
    assert_eq!(tree.write(div, &options), r#"<div class="x" />"#);
    assert_eq!(tree.write(script, &options), "<script></script>");
    assert_eq!(tree.write(br, &options), "<br />");

    let open_close = WriteOptions {
        self_closing: false,
        ..WriteOptions::default()
    };
    assert_eq!(tree.write(div, &open_close), r#"<div class="x"></div>"#);
    assert_eq!(tree.write(br, &open_close), "<br>");
}

#[test]
fn test_always_self_closing_is_configurable() {
    let mut tree = DomTree::new();
    let img = element(&mut tree, NodeId::ROOT, "img", &[("src", "a.png")]);
    text(&mut tree, img, "alt");

    assert_eq!(
        tree.write(img, &WriteOptions::default()),
        r#"<img src="a.png" />"#
    );

    let options = WriteOptions {
        always_self_closing: vec!["meta".to_string()],
        ..WriteOptions::default()
    };
    assert_eq!(tree.write(img, &options), r#"<img src="a.png">alt</img>"#);
}

#[test]
fn test_doctype() {
    let mut tree = DomTree::new();
    let _ = element(&mut tree, NodeId::ROOT, "!doctype", &[("html", "true")]);
    let html = element(&mut tree, NodeId::ROOT, "html", &[("lang", "en")]);
    let _ = element(&mut tree, html, "head", &[]);
    assert_eq!(
        tree.write(NodeId::ROOT, &WriteOptions::default()),
        "<!DOCTYPE html>\r\n<html lang=\"en\">\r\n  <head></head>\r\n</html>"
    );
}

#[test]
fn test_comments_on_their_own_line() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div", &[]);
    let comment = tree.alloc(NodeType::Comment("note".to_string()));
    tree.append_child(div, comment);
    assert_eq!(
        tree.write(NodeId::ROOT, &WriteOptions::default()),
        "<div>\r\n  <!-- note -->\r\n</div>"
    );
}

#[test]
fn test_options_from_json_fill_defaults() {
    let options: WriteOptions =
        serde_json::from_str(r#"{"indent_size": 4, "self_closing": false}"#).unwrap();
    assert_eq!(options.indent_size, 4);
    assert!(!options.self_closing);
    assert!(options.pretty);
    assert_eq!(options.shrink_limit, 20);
    assert!(options.always_self_closing.iter().any(|t| t == "br"));
}

#[test]
fn test_attribute_values_with_quotes() {
    let cases = [
        ("plain", r#"<p v="plain" />"#),
        (r#"say "hi""#, r#"<p v='say "hi"' />"#),
        ("it's", r#"<p v="it's" />"#),
        (r#"it's "x""#, r#"<p v="it's \"x\"" />"#),
        (r"a\nb", r#"<p v="a\nb" />"#),
        (r#"a\"b"#, r#"<p v='a\"b' />"#),
    ];
    for (value, expected) in cases {
        let mut tree = DomTree::new();
        let _ = element(&mut tree, NodeId::ROOT, "p", &[("v", value)]);
        assert_eq!(tree.write(NodeId::ROOT, &WriteOptions::default()), expected);
    }
}

#[test]
fn test_indent_size_is_clamped() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div", &[]);
    let _ = element(&mut tree, div, "span", &[]);
    let options = WriteOptions {
        indent_size: usize::MAX,
        ..WriteOptions::default()
    };
    let expected = format!("<div>\r\n{}<span />\r\n</div>", " ".repeat(MAX_INDENT_SIZE));
    assert_eq!(tree.write(NodeId::ROOT, &options), expected);
}
