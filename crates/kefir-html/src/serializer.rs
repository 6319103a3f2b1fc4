//! HTML Serialization
//!
//! Serializes DOM nodes to HTML strings.
//!
//! Key features:
//! - Document serialization with doctype
//! - innerHTML/outerHTML serialization
//! - Proper HTML escaping
//! - Void element handling
//! - Raw text for style/script content

use kefir_dom::{Document, DomTree, ElementData, NodeData, NodeId};

/// Document type declaration emitted before the `<html>` element
pub const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// HTML serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

/// Void elements (self-closing, no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Override the indentation string used when pretty printing
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Serialize a document: doctype line, then the `<html>` element
    pub fn serialize_document(&self, document: &Document) -> String {
        let mut output = String::from(DOCTYPE);
        self.serialize_node(document.tree(), document.document_element(), &mut output, 0, false);
        if self.pretty_print {
            output.push('\n');
        }
        tracing::debug!("Serialized document: {} bytes", output.len());
        output
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output, 0);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0, false);
        output
    }

    /// Serialize a node and its descendants
    ///
    /// `selected` marks an option that its select control starts on.
    fn serialize_node(
        &self,
        tree: &DomTree,
        node_id: NodeId,
        output: &mut String,
        depth: usize,
        selected: bool,
    ) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output, depth);
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name);
                let is_void = VOID_ELEMENTS.contains(&tag);
                let is_raw = RAW_TEXT_ELEMENTS.contains(&tag);

                if self.pretty_print && depth > 0 {
                    self.newline(output, depth);
                }

                // Start tag
                output.push('<');
                output.push_str(tag);

                for attr in &elem.attrs {
                    output.push(' ');
                    output.push_str(tree.resolve(attr.name));
                    if !attr.value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }
                if selected && tree.get_attribute(node_id, "selected").is_none() {
                    output.push_str(" selected");
                }

                if is_void {
                    output.push_str(" />");
                    return;
                }
                output.push('>');

                if is_raw {
                    self.serialize_children_raw(tree, node_id, output);
                } else if elem.selected_index.is_some() {
                    self.serialize_options(tree, node_id, elem, output, depth + 1);
                } else {
                    self.serialize_children(tree, node_id, output, depth + 1);
                }

                // End tag
                if self.pretty_print && has_element_children(tree, node_id) {
                    self.newline(output, depth);
                }
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(&text.content, output);
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String, depth: usize) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output, depth, false);
        }
    }

    /// Children of a select control; the option at `selected_index`
    /// (counting options only) gets a `selected` attribute
    fn serialize_options(
        &self,
        tree: &DomTree,
        parent_id: NodeId,
        select: &ElementData,
        output: &mut String,
        depth: usize,
    ) {
        let mut option_index = 0;
        for (child_id, _) in tree.children(parent_id) {
            let is_option = tree.tag_name(child_id) == Some("option");
            let selected = is_option && select.selected_index == Some(option_index);
            if is_option {
                option_index += 1;
            }
            self.serialize_node(tree, child_id, output, depth, selected);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (_child_id, child) in tree.children(parent_id) {
            if let NodeData::Text(text) = &child.data {
                output.push_str(&text.content);
            }
        }
    }

    fn newline(&self, output: &mut String, depth: usize) {
        output.push('\n');
        for _ in 0..depth {
            output.push_str(&self.indent);
        }
    }
}

fn has_element_children(tree: &DomTree, node_id: NodeId) -> bool {
    tree.children(node_id).any(|(_, child)| child.is_element())
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Utility: Get innerHTML of an element
pub fn get_inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: Get outerHTML of an element
pub fn get_outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}
