//! Document - High-level document API

use crate::{DomTree, Node, NodeId};

/// HTML Document
///
/// Always carries the `html > (head, body)` skeleton.
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with empty head and body
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.attach(tree.root(), html);
        tree.attach(html, head);
        tree.attach(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Append a `div` carrying `id` as the last child of body
    pub fn append_body_container(&mut self, id: &str) -> NodeId {
        let id_attr = self.tree.interner_mut().intern("id");
        let div = self.tree.create_element("div");
        if let Some(elem) = self.tree.get_mut(div).and_then(Node::as_element_mut) {
            elem.id = Some(id.to_string());
            elem.set_attr(id_attr, id.to_string());
        }
        self.tree.attach(self.body_element, div);
        div
    }

    /// Get element by ID (first match in tree order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target: &str) -> Option<NodeId> {
        for (node_id, node) in self.tree.children(start) {
            if let Some(elem) = node.as_element() {
                if elem.id.as_deref() == Some(target) {
                    return Some(node_id);
                }
            }
            if let Some(found) = self.find_element_with_id(node_id, target) {
                return Some(found);
            }
        }
        None
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new();
        let tree = doc.tree();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.tag_name(doc.document_element()), Some("html"));
        assert_eq!(tree.tag_name(doc.head()), Some("head"));
        assert_eq!(tree.tag_name(doc.body()), Some("body"));

        let html_children: Vec<_> = tree
            .children(doc.document_element())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(html_children, vec![doc.head(), doc.body()]);
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let div = doc.append_body_container("root");

        assert_eq!(doc.get_element_by_id("root"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.tree().get(div).unwrap().parent, doc.body());
        assert_eq!(doc.tree().get_attribute(div, "id"), Some("root"));
    }
}
