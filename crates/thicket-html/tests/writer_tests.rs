//! Tests for serializing parsed documents.

use thicket_dom::WriteOptions;
use thicket_html::{ParseOptions, parse, parse_document};

#[test]
fn test_canonical_markup_round_trips_exactly() {
    let source = [
        "<!DOCTYPE html>",
        "<html>",
        "  <head>",
        "    <meta charset=\"utf-8\" />",
        "  </head>",
        "  <body>",
        "    <p class=\"x\">",
        "      hello",
        "    </p>",
        "    <br />",
        "  </body>",
        "</html>",
    ]
    .join("\r\n");
    let document = parse_document(&source, &ParseOptions::strict()).unwrap();
    let options = WriteOptions {
        shrink_text: false,
        ..WriteOptions::default()
    };
    assert_eq!(document.write(&options), source);
}

#[test]
fn test_reindents_and_shrinks() {
    let document = parse("<ul><li>a</li>\n\n   <li>b <i>c</i></li></ul>").unwrap();
    let expected = [
        "<ul>",
        "  <li>a</li>",
        "  <li>",
        "    b",
        "    <i>c</i>",
        "  </li>",
        "</ul>",
    ]
    .join("\r\n");
    assert_eq!(document.write(&WriteOptions::default()), expected);
}

#[test]
fn test_written_markup_parses_to_the_same_tree() {
    let source = r#"<div id="a"><p>one<b>two</b></p><img src="x"><span></span>three</div>"#;
    let first = parse(source).unwrap();
    for options in [
        WriteOptions::default(),
        WriteOptions::compact(),
        WriteOptions {
            use_tabs: true,
            self_closing: false,
            ..WriteOptions::default()
        },
    ] {
        let written = first.write(&options);
        let second = parse(&written).unwrap();
        assert_eq!(second.outer_html(), first.outer_html(), "{written}");
    }
}

#[test]
fn test_quoted_attribute_values_survive_a_rewrite() {
    let source = r#"<p title='say "hi"' alt="it\"s" note="it's \"x\"" path="a\nb">x</p>"#;
    for parse_options in [ParseOptions::lenient(), ParseOptions::strict()] {
        let first = parse_document(source, &parse_options).unwrap();
        let p = first.elements_by_tag_name("p")[0];
        let attrs = &first.tree().as_element(p).unwrap().attrs;
        assert_eq!(attrs.get("title"), Some(r#"say "hi""#));
        assert_eq!(attrs.get("alt"), Some(r#"it"s"#));

        for options in [WriteOptions::default(), WriteOptions::compact()] {
            let written = first.write(&options);
            let second = parse_document(&written, &parse_options).unwrap();
            assert_eq!(second.outer_html(), first.outer_html(), "{written}");
        }
    }
}
