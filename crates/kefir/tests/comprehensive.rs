//! Comprehensive tests for kefir
//!
//! Descriptor lists compiled end to end: tree shape, diagnostics and
//! serialized output.

use kefir::dom::NodeId;
use kefir::{Compilation, Compiler, Descriptor, DiagnosticKind, FieldError};
use serde_json::{json, Value};

fn compile(ui: Value) -> Compilation {
    let descriptors = match ui {
        Value::Array(items) => items.into_iter().map(Descriptor::from_value).collect(),
        other => panic!("expected array, got {other}"),
    };
    Compiler::new(descriptors).compile()
}

fn tags(compilation: &Compilation, ids: &[NodeId]) -> Vec<String> {
    let tree = compilation.document.tree();
    ids.iter()
        .map(|&id| tree.tag_name(id).unwrap_or_default().to_string())
        .collect()
}

fn html(ui: Value) -> String {
    let descriptors = ui
        .as_array()
        .unwrap()
        .iter()
        .cloned()
        .map(Descriptor::from_value)
        .collect();
    Compiler::new(descriptors).compile_to_string()
}

// ============================================================================
// TREE SHAPE
// ============================================================================

#[test]
fn test_empty_list() {
    let compilation = compile(json!([]));
    assert!(compilation.root_children().is_empty());
    assert!(compilation.style_nodes().is_empty());
    assert!(compilation.is_clean());

    assert_eq!(
        html(json!([])),
        "<!DOCTYPE html>\n<html><head></head><body><div id=\"root\"></div></body></html>"
    );
}

#[test]
fn test_mixed_list() {
    let compilation = compile(json!(["hr", {"type": "p", "text": "Hi"}, "css: a{}"]));
    let tree = compilation.document.tree();

    let children = compilation.root_children();
    assert_eq!(tags(&compilation, &children), vec!["hr", "p"]);
    assert_eq!(tree.text_content(children[1]), "Hi");

    let styles = compilation.style_nodes();
    assert_eq!(styles.len(), 1);
    assert_eq!(tree.text_content(styles[0]), "a{}");
    assert_eq!(tree.child_count(compilation.document.head()), 1);
}

#[test]
fn test_root_child_count_matches_producing_descriptors() {
    let compilation = compile(json!([
        "br",
        "css: p{}",
        {"type": "div"},
        {},
        {"type": "unknown"},
        "plain",
        {"type": 5},
        {"type": "btn", "text": "Go"},
        "hr",
        null,
    ]));

    // br, div, plain, btn, hr
    assert_eq!(compilation.root_children().len(), 5);
    assert_eq!(
        tags(&compilation, &compilation.root_children()),
        vec!["br", "div", "p", "button", "hr"]
    );
}

#[test]
fn test_style_directive_spacing_and_case() {
    for directive in ["css:  body{color:red}  ", "  css:body{color:red}", "CSS: body{color:red}"] {
        let compilation = compile(json!([directive]));
        let tree = compilation.document.tree();
        let styles = compilation.style_nodes();

        assert_eq!(styles.len(), 1, "{directive:?}");
        assert_eq!(tree.text_content(styles[0]), "body{color:red}");
        assert!(compilation.root_children().is_empty());
    }
}

#[test]
fn test_styles_keep_encounter_order() {
    let compilation = compile(json!(["css: a{}", "p one", "css: b{}"]));
    let tree = compilation.document.tree();
    let css: Vec<_> = compilation
        .style_nodes()
        .into_iter()
        .map(|id| tree.text_content(id))
        .collect();
    assert_eq!(css, vec!["a{}", "b{}"]);
}

#[test]
fn test_br_and_hr() {
    let compilation = compile(json!(["br", "hr"]));
    let children = compilation.root_children();
    assert_eq!(tags(&compilation, &children), vec!["br", "hr"]);
    for id in children {
        assert_eq!(compilation.document.tree().child_count(id), 0);
    }
}

#[test]
fn test_plain_string_is_escaped_paragraph() {
    let output = html(json!(["<b>bold</b> & co"]));
    assert!(output.contains("<p>&lt;b&gt;bold&lt;/b&gt; &amp; co</p>"));

    let compilation = compile(json!(["<b>bold</b> & co"]));
    let p = compilation.root_children()[0];
    assert_eq!(compilation.document.tree().text_content(p), "<b>bold</b> & co");
}

#[test]
fn test_style_text_not_escaped() {
    let output = html(json!(["css: a > b { content: \"&\"; }"]));
    assert!(output.contains("<head><style>a > b { content: \"&\"; }</style></head>"));
}

// ============================================================================
// ELEMENT KINDS
// ============================================================================

#[test]
fn test_text_element() {
    let output = html(json!([
        {"type": "text", "id": "greeting", "text": "Hello", "action": "wave()"},
        {"type": "p", "text": "Plain"},
    ]));
    assert!(output.contains("<p id=\"greeting\" onclick=\"wave()\">Hello</p><p>Plain</p>"));
}

#[test]
fn test_button_element() {
    let output = html(json!([{"type": "button", "text": "Go", "action": "go()"}]));
    assert!(output.contains("<button onclick=\"go()\">Go</button>"));
}

#[test]
fn test_link_element() {
    let output = html(json!([{"type": "a", "text": "Docs", "href": "https://example.com"}]));
    assert!(output.contains("<a href=\"https://example.com\" target=\"_blank\">Docs</a>"));
}

#[test]
fn test_select_element() {
    let compilation = compile(json!([
        {"type": "select", "id": "pick", "options": ["A", "B", "C"], "action": "picked()"}
    ]));
    let tree = compilation.document.tree();
    let select = compilation.root_children()[0];

    assert_eq!(tree.selected_index(select), Some(0));
    let options: Vec<_> = tree.children(select).map(|(id, _)| id).collect();
    assert_eq!(tags(&compilation, &options), vec!["option"; 3]);
    let labels: Vec<_> = options.iter().map(|&id| tree.text_content(id)).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
    assert_eq!(tree.get_attribute(select, "onchange"), Some("picked()"));

    let output = html(json!([{"type": "select", "options": ["A", "B"]}]));
    assert!(output.contains("<select><option selected>A</option><option>B</option></select>"));
}

#[test]
fn test_image_element() {
    let output = html(json!([
        {"type": "img", "src": "cat.png", "alt": "A cat", "width": 100, "height": "50", "action": "zoom()"},
        {"type": "image", "src": "dog.png"},
    ]));
    assert!(output.contains(
        "<img src=\"cat.png\" alt=\"A cat\" width=\"100\" height=\"50\" onclick=\"zoom()\" />"
    ));
    assert!(output.contains("<img src=\"dog.png\" />"));
}

#[test]
fn test_image_empty_alt() {
    let compilation = compile(json!([{"type": "img", "src": "x.png", "alt": ""}]));
    let img = compilation.root_children()[0];
    let tree = compilation.document.tree();
    assert_eq!(tree.get_attribute(img, "alt"), Some(""));
    assert_eq!(tree.get_attribute(img, "width"), None);
}

#[test]
fn test_input_two_slot_binding() {
    let compilation = compile(json!([
        {"type": "input", "input_type": "text", "placeholder": "Name", "action": "f", "action_type": "onkeyup"}
    ]));
    let input = compilation.root_children()[0];
    let tree = compilation.document.tree();

    assert_eq!(tree.get_attribute(input, "type"), Some("text"));
    assert_eq!(tree.get_attribute(input, "placeholder"), Some("Name"));
    assert_eq!(tree.get_attribute(input, "onkeyup"), Some("f"));
    assert_eq!(tree.get_attribute(input, "onchange"), Some("f"));
}

#[test]
fn test_input_onchange_survives_bad_slot() {
    let output = html(json!([
        {"type": "input", "input_type": "text", "action": "f", "action_type": "on\"key"}
    ]));
    assert!(output.contains("<input type=\"text\" onchange=\"f\" />"));
}

#[test]
fn test_input_without_action_type() {
    let output = html(json!([{"type": "input", "input_type": "email", "action": "check()"}]));
    assert!(output.contains("<input type=\"email\" onchange=\"check()\" />"));
}

#[test]
fn test_input_action_type_onchange_collapses() {
    let compilation = compile(json!([
        {"type": "input", "action": "f", "action_type": "onchange"}
    ]));
    let input = compilation.root_children()[0];
    let elem = compilation.document.tree().get(input).unwrap().as_element().unwrap();
    assert_eq!(elem.attrs.len(), 1);
}

#[test]
fn test_div_element() {
    let output = html(json!([{"type": "div", "id": "box", "action": "open()"}]));
    assert!(output.contains("<div id=\"root\"><div id=\"box\" onclick=\"open()\"></div></div>"));
}

// ============================================================================
// IDS AND DIAGNOSTICS
// ============================================================================

#[test]
fn test_blank_ids_not_applied() {
    let compilation = compile(json!([
        {"type": "div", "id": ""},
        {"type": "div", "id": "   "},
        {"type": "div", "id": "x"},
    ]));
    let tree = compilation.document.tree();
    let ids: Vec<_> = compilation
        .root_children()
        .into_iter()
        .map(|id| tree.get_attribute(id, "id"))
        .collect();
    assert_eq!(ids, vec![None, None, Some("x")]);
}

#[test]
fn test_missing_type_reported_and_skipped() {
    let compilation = compile(json!([{}, "after"]));

    assert_eq!(compilation.root_children().len(), 1);
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.diagnostics[0].index, 1);
    assert_eq!(compilation.diagnostics[0].kind, DiagnosticKind::MissingType);
}

#[test]
fn test_non_string_type_reported() {
    let compilation = compile(json!(["br", {"type": ["p"]}, {"type": ""}]));
    let indexes: Vec<_> = compilation.diagnostics.iter().map(|d| d.index).collect();
    assert_eq!(indexes, vec![2, 3]);
    assert!(compilation
        .diagnostics
        .iter()
        .all(|d| d.kind == DiagnosticKind::MissingType));
}

#[test]
fn test_field_error_leaves_partial_node() {
    let compilation = compile(json!([
        {"type": "button", "id": "b"},
        {"type": "p", "text": "next"},
    ]));
    let tree = compilation.document.tree();
    let children = compilation.root_children();

    // Button exists with its id but no text
    assert_eq!(tags(&compilation, &children), vec!["button", "p"]);
    assert_eq!(tree.get_attribute(children[0], "id"), Some("b"));
    assert_eq!(tree.child_count(children[0]), 0);

    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.diagnostics[0].index, 1);
    assert_eq!(
        compilation.diagnostics[0].kind,
        DiagnosticKind::Field(FieldError::Missing { field: "text".into() })
    );
}

#[test]
fn test_select_bad_option_keeps_earlier_options() {
    let compilation = compile(json!([
        {"type": "select", "options": ["A", {"bad": true}, "C"], "action": "never()"}
    ]));
    let tree = compilation.document.tree();
    let select = compilation.root_children()[0];

    assert_eq!(tree.child_count(select), 1);
    assert_eq!(tree.get_attribute(select, "onchange"), None);
    assert!(matches!(
        &compilation.diagnostics[0].kind,
        DiagnosticKind::Field(FieldError::WrongType { field, .. }) if field == "options[1]"
    ));
}

#[test]
fn test_invalid_descriptor_values() {
    let compilation = compile(json!([null, 42, true, "ok"]));
    assert_eq!(compilation.root_children().len(), 1);
    let indexes: Vec<_> = compilation.diagnostics.iter().map(|d| d.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(
        compilation.diagnostics[0].kind,
        DiagnosticKind::NotADescriptor { found: "null" }
    );
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_compile_to_writes_compiled_string() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    let compiler = Compiler::new(vec!["hr".into(), "Hello".into()]);

    let compilation = compiler.compile_to(&path).unwrap();
    assert!(compilation.is_clean());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        compiler.compile_to_string()
    );
}

#[test]
fn test_compile_json() {
    let output = kefir::compile_json(r#"["br", {"type": "btn", "text": "Ok"}]"#).unwrap();
    assert!(output.contains("<div id=\"root\"><br /><button>Ok</button></div>"));
}
