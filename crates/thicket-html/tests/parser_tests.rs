//! Integration tests for the tree builder.

use thicket_dom::{Document, DomTree, NodeId, NodeType};
use thicket_html::{
    HTMLParser, IssueKind, ParseError, ParseIssue, ParseOptions, parse, parse_document,
    tree_outline,
};

/// Helper to parse leniently and return the document
fn lenient(html: &str) -> Document {
    parse(html).unwrap()
}

/// Helper to parse strictly
fn strict(html: &str) -> Result<Document, ParseError> {
    parse_document(html, &ParseOptions::strict())
}

/// Helper to parse leniently and collect the recovered issues
fn issues(html: &str) -> Vec<ParseIssue> {
    let options = ParseOptions::lenient();
    let (_, issues) = HTMLParser::new(html, &options).run_with_issues().unwrap();
    issues
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, tag: &str) -> NodeId {
    tree.elements_by_tag_name(NodeId::ROOT, tag)[0]
}

/// Helper to describe the children of a node, e.g. `["b", "#x"]`
fn child_names(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| match &tree.get(child).unwrap().node_type {
            NodeType::Element(data) => data.tag_name.clone(),
            NodeType::Text(text) => format!("#{text}"),
            NodeType::Comment(text) => format!("!{text}"),
            NodeType::Document => "document".to_string(),
        })
        .collect()
}

// ========== well-formed input ==========

#[test]
fn test_nested_elements() {
    let document = lenient("<div id='a'><p>one</p><p>two <b>three</b></p></div>");
    let tree = document.tree();
    let div = find_element(tree, "div");
    assert_eq!(document.root_list(), &[div]);
    assert_eq!(child_names(tree, div), vec!["p", "p"]);

    let second = tree.children(div)[1];
    assert_eq!(child_names(tree, second), vec!["#two", "b"]);
    assert_eq!(tree.parent(second), Some(div));
    assert_eq!(tree.parent(div), Some(NodeId::ROOT));
}

#[test]
fn test_same_name_nesting() {
    let document = lenient("<div><div>a</div>b</div>");
    let tree = document.tree();
    let outer = document.root_list()[0];
    assert_eq!(child_names(tree, outer), vec!["div", "#b"]);
}

#[test]
fn test_root_list_holds_every_top_level_node() {
    let document = lenient("<!DOCTYPE html>\n<html><body></body></html>\ntrailing");
    assert_eq!(
        child_names(document.tree(), NodeId::ROOT),
        vec!["!doctype", "html", "#trailing"]
    );
}

#[test]
fn test_void_and_self_closing_elements_take_no_children() {
    let document = lenient(r#"<p>a<br>b<img src="x.png">c<meta charset="utf-8"><span/>d</p>"#);
    let tree = document.tree();
    let p = find_element(tree, "p");
    assert_eq!(
        child_names(tree, p),
        vec!["#a", "br", "#b", "img", "#c", "meta", "span", "#d"]
    );
}

#[test]
fn test_configured_void_tag() {
    let options = ParseOptions::lenient().with_void_tag("hr");
    let document = parse_document("<div><hr>x</div>", &options).unwrap();
    let tree = document.tree();
    assert_eq!(child_names(tree, find_element(tree, "div")), vec!["hr", "#x"]);
}

#[test]
fn test_script_content_is_one_text_node() {
    let document = lenient("<script>if (a < b) {}</script>");
    let tree = document.tree();
    let script = find_element(tree, "script");
    assert_eq!(child_names(tree, script), vec!["#if (a < b) {}"]);
}

#[test]
fn test_comments_dropped_by_default() {
    let html = "<div><!-- note -->x</div>";
    let document = lenient(html);
    let tree = document.tree();
    assert_eq!(child_names(tree, find_element(tree, "div")), vec!["#x"]);
    assert!(!document.keeps_comments());

    let options = ParseOptions::lenient().with_comments(true);
    let document = parse_document(html, &options).unwrap();
    let tree = document.tree();
    assert_eq!(
        child_names(tree, find_element(tree, "div")),
        vec!["!note", "#x"]
    );
}

#[test]
fn test_empty_input() {
    let document = lenient("   \n ");
    assert!(document.root_list().is_empty());
    assert!(strict("").unwrap().root_list().is_empty());
}

// ========== mismatch recovery ==========

#[test]
fn test_close_tag_closes_ancestor() {
    let document = lenient("<a><b>x</a>");
    let tree = document.tree();
    let a = find_element(tree, "a");
    let b = find_element(tree, "b");
    assert_eq!(document.root_list(), &[a]);
    assert_eq!(child_names(tree, a), vec!["b"]);
    assert_eq!(child_names(tree, b), vec!["#x"]);

    let kinds: Vec<IssueKind> = issues("<a><b>x</a>").iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![IssueKind::UnclosedElement]);
}

#[test]
fn test_unmatched_close_is_strict_error() {
    let error = strict("<div><span></div>").unwrap_err();
    match error {
        ParseError::UnmatchedCloseTag {
            name,
            open,
            position,
        } => {
            assert_eq!(name, "div");
            assert_eq!(open, "span");
            assert_eq!(position.offset, 11);
        }
        other => panic!("unexpected {other}"),
    }

    let document = lenient("<div><span></div>");
    let tree = document.tree();
    let div = find_element(tree, "div");
    let span = find_element(tree, "span");
    assert_eq!(child_names(tree, div), vec!["span"]);
    assert!(tree.children(span).is_empty());
}

#[test]
fn test_crossed_tags() {
    let html = "<b><i>text</b></i>";
    let document = lenient(html);
    let tree = document.tree();
    let b = find_element(tree, "b");
    let i = find_element(tree, "i");
    assert_eq!(document.root_list(), &[b]);
    assert_eq!(child_names(tree, i), vec!["#text"]);

    let kinds: Vec<IssueKind> = issues(html).iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![IssueKind::UnclosedElement, IssueKind::CloseTagAtRoot]
    );
    assert!(strict(html).is_err());
}

#[test]
fn test_unmatched_close_propagates_to_root() {
    let html = "<div><p>x</span>y</div>";
    let document = lenient(html);
    let tree = document.tree();
    // </span> closes p and div on its way up, then is dropped
    assert_eq!(child_names(tree, NodeId::ROOT), vec!["div", "#y"]);
    assert_eq!(child_names(tree, find_element(tree, "p")), vec!["#x"]);

    let kinds: Vec<IssueKind> = issues(html).iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::UnclosedElement,
            IssueKind::UnmatchedCloseTag,
            IssueKind::CloseTagAtRoot,
        ]
    );
}

#[test]
fn test_close_tag_at_root() {
    let document = lenient("</p>hi");
    assert_eq!(child_names(document.tree(), NodeId::ROOT), vec!["#hi"]);

    let found = issues("</p>hi");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, IssueKind::CloseTagAtRoot);
    let position = found[0].position.unwrap();
    assert_eq!((position.line, position.column), (1, 1));

    assert!(matches!(
        strict("</p><p></p>"),
        Err(ParseError::CloseTagAtRoot { ref name, .. }) if name == "p"
    ));
}

#[test]
fn test_end_of_input_closes_open_elements() {
    let document = lenient("<div><p>x");
    let tree = document.tree();
    assert_eq!(child_names(tree, find_element(tree, "div")), vec!["p"]);
    assert_eq!(child_names(tree, find_element(tree, "p")), vec!["#x"]);

    let found = issues("<div><p>x");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|issue| issue.kind == IssueKind::UnclosedElement));
    assert!(found.iter().all(|issue| issue.position.is_none()));

    assert!(matches!(
        strict("<div><p>x</p>"),
        Err(ParseError::UnexpectedEnd { ref name }) if name == "div"
    ));
}

#[test]
fn test_malformed_is_fatal_in_both_modes() {
    // trailing text with no tag after it is only readable leniently
    assert!(matches!(
        strict("<p>x</p>tail"),
        Err(ParseError::Malformed { .. })
    ));
    assert_eq!(lenient("<p>x</p>tail").root_list().len(), 2);
}

#[test]
fn test_strict_tag_violation_aborts_parse() {
    assert!(matches!(
        strict("<div><a href=x>y</a></div>"),
        Err(ParseError::InvalidTag { .. })
    ));
    let document = lenient("<div><a href=x>y</a></div>");
    let tree = document.tree();
    let a = find_element(tree, "a");
    assert_eq!(tree.as_element(a).unwrap().attrs.get("href"), Some("x"));
}

// ========== document shortcuts ==========

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head><title>T</title></head>
  <body class="main"><p id="first">x</p></body>
</html>"#;

#[test]
fn test_shortcuts() {
    for document in [lenient(PAGE), strict(PAGE).unwrap()] {
        let tree = document.tree();
        assert_eq!(document.doctype().and_then(|id| tree.tag_name(id)), Some("!doctype"));
        assert_eq!(document.html().and_then(|id| tree.tag_name(id)), Some("html"));
        assert_eq!(document.head().and_then(|id| tree.tag_name(id)), Some("head"));
        let body = document.body().unwrap();
        assert!(tree.as_element(body).unwrap().has_class("main"));
        assert_eq!(document.element_by_id("first"), Some(find_element(tree, "p")));
    }
}

#[test]
fn test_strict_shortcuts_require_position() {
    let html = "<!-- c --><p>x</p><i>y</i><html><body></body></html>";
    let document = strict(html).unwrap();
    assert_eq!(document.html(), None);
    let document = lenient(html);
    assert!(document.html().is_some());
    assert!(document.body().is_some());
}

#[test]
fn test_tree_outline() {
    let document = lenient(r#"<ul class="x"><li>a b</li></ul>"#);
    let outline = tree_outline(document.tree(), NodeId::ROOT);
    assert_eq!(
        outline,
        "Document\n  <ul class=\"x\">\n    <li>\n      \"a\u{00B7}b\"\n"
    );
}

#[test]
fn test_many_issues_keep_their_positions() {
    let html = "</x>\n".repeat(20_000);
    let found = issues(&html);
    assert_eq!(found.len(), 20_000);
    for (index, issue) in found.iter().enumerate().step_by(997) {
        assert_eq!(issue.kind, IssueKind::CloseTagAtRoot);
        let position = issue.position.unwrap();
        assert_eq!((position.line, position.column), (index + 1, 1));
        assert_eq!(position.offset, index * 5);
    }
}
