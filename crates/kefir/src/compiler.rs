//! Descriptor interpreter
//!
//! Walks a UI description in order and builds the document tree:
//! `css:` directives become `<style>` nodes in head, everything else
//! becomes a sibling under the root container in body.
//!
//! A bad descriptor never stops the walk. Its problem is reported and the
//! next descriptor runs; an element that failed half-way stays in the
//! tree as far as it got.

use std::path::Path;

use kefir_dom::{Document, DomTree, NodeId};
use kefir_html::HtmlSerializer;

use crate::descriptor::{scalar_text, value_kind, ElementKind, Record};
use crate::{output, CompilerConfig, Descriptor, Diagnostic, DiagnosticKind, FieldError, KefirError};

const STYLE_PREFIX: &str = "css:";

/// Compiles a UI description into an HTML document
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    descriptors: Vec<Descriptor>,
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        Self {
            descriptors,
            config: CompilerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Build the document tree
    pub fn compile(&self) -> Compilation {
        let mut builder = TreeBuilder::new(&self.config);
        for (i, descriptor) in self.descriptors.iter().enumerate() {
            builder.visit(i + 1, descriptor);
        }

        let compilation = builder.finish();
        tracing::debug!(
            "Compiled {} descriptors into {} root elements, {} styles ({} diagnostics)",
            self.descriptors.len(),
            compilation.root_children().len(),
            compilation.style_nodes().len(),
            compilation.diagnostics.len()
        );
        compilation
    }

    /// Build and serialize
    pub fn compile_to_string(&self) -> String {
        self.compile().to_html(&self.serializer())
    }

    /// Build, serialize and write to `path`
    ///
    /// The compile itself cannot fail; only the write can.
    pub fn compile_to(&self, path: impl AsRef<Path>) -> Result<Compilation, KefirError> {
        let compilation = self.compile();
        let html = compilation.to_html(&self.serializer());
        output::write_document(path.as_ref(), &html)?;
        Ok(compilation)
    }

    /// Serializer matching this compiler's configuration
    pub fn serializer(&self) -> HtmlSerializer {
        HtmlSerializer {
            pretty_print: self.config.pretty_print,
            indent: self.config.indent.clone(),
        }
    }
}

/// Result of one compile
#[derive(Debug)]
pub struct Compilation {
    pub document: Document,
    /// Container holding every non-style element
    pub root: NodeId,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// Serialize the document
    pub fn to_html(&self, serializer: &HtmlSerializer) -> String {
        serializer.serialize_document(&self.document)
    }

    /// Children of the root container, in order
    pub fn root_children(&self) -> Vec<NodeId> {
        self.document.tree().children(self.root).map(|(id, _)| id).collect()
    }

    /// Style nodes injected into head, in order
    pub fn style_nodes(&self) -> Vec<NodeId> {
        let tree = self.document.tree();
        tree.children(self.document.head())
            .map(|(id, _)| id)
            .filter(|&id| tree.tag_name(id) == Some("style"))
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

struct TreeBuilder<'a> {
    config: &'a CompilerConfig,
    document: Document,
    root: NodeId,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TreeBuilder<'a> {
    fn new(config: &'a CompilerConfig) -> Self {
        let mut document = Document::new();
        let root = document.append_body_container(&config.root_id);
        Self {
            config,
            document,
            root,
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> Compilation {
        Compilation {
            document: self.document,
            root: self.root,
            diagnostics: self.diagnostics,
        }
    }

    fn tree(&mut self) -> &mut DomTree {
        self.document.tree_mut()
    }

    fn report(&mut self, index: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { index, kind };
        tracing::warn!(index, code = diagnostic.kind.code(), "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn visit(&mut self, index: usize, descriptor: &Descriptor) {
        let result = match descriptor {
            Descriptor::Directive(directive) => self.directive(directive),
            Descriptor::Element(record) => self.record(index, record),
            Descriptor::Invalid(value) => {
                let found = value_kind(value);
                self.report(index, DiagnosticKind::NotADescriptor { found });
                Ok(())
            }
        };

        if let Err(err) = result {
            self.report(index, DiagnosticKind::Field(err));
        }
    }

    fn directive(&mut self, directive: &str) -> Result<(), FieldError> {
        match directive {
            "br" | "hr" => {
                self.append_to_root(directive)?;
            }
            _ => {
                if let Some(css) = style_directive(directive) {
                    let head = self.document.head();
                    let style = self.tree().create_element("style");
                    self.tree().append_child(head, style)?;
                    self.append_text(style, css)?;
                } else {
                    let p = self.append_to_root("p")?;
                    self.append_text(p, directive)?;
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, index: usize, record: &Record) -> Result<(), FieldError> {
        let kind = match record.type_name() {
            Some(name) if !name.is_empty() => ElementKind::from_type_name(name),
            _ => {
                self.report(index, DiagnosticKind::MissingType);
                None
            }
        };

        let Some(kind) = kind else {
            tracing::debug!(index, "Element {}: no element for type {:?}", index, record.get("type"));
            return Ok(());
        };

        let node = self.append_to_root(kind.tag())?;
        if let Some(id) = record.id()? {
            self.tree().set_id(node, &id)?;
        }

        match kind {
            ElementKind::Text | ElementKind::Button => {
                let text = record.required_scalar("text")?;
                self.append_text(node, &text)?;
                self.bind_action(node, record, "onclick")?;
            }
            ElementKind::Link => {
                let text = record.required_scalar("text")?;
                self.append_text(node, &text)?;
                let href = record.required_scalar("href")?;
                self.tree().set_attribute(node, "href", &href)?;
                let config = self.config;
                self.tree().set_attribute(node, "target", &config.link_target)?;
            }
            ElementKind::Select => {
                self.tree().set_selected_index(node, 0)?;
                for (i, option) in record.array("options")?.iter().enumerate() {
                    let label = scalar_text(&format!("options[{i}]"), option)?;
                    let option_node = self.tree().create_element("option");
                    self.tree().append_child(node, option_node)?;
                    self.append_text(option_node, &label)?;
                }
                self.bind_action(node, record, "onchange")?;
            }
            ElementKind::Image => {
                let src = record.required_scalar("src")?;
                self.tree().set_attribute(node, "src", &src)?;
                for field in ["alt", "width", "height"] {
                    if let Some(value) = record.scalar(field)? {
                        self.tree().set_attribute(node, field, &value)?;
                    }
                }
                self.bind_action(node, record, "onclick")?;
            }
            ElementKind::Input => {
                if let Some(input_type) = record.scalar("input_type")? {
                    self.tree().set_attribute(node, "type", &input_type)?;
                }
                if let Some(placeholder) = record.scalar("placeholder")? {
                    self.tree().set_attribute(node, "placeholder", &placeholder)?;
                }
                // onchange is always bound; a bad slot name only loses the slot
                if let Some(action) = record.action()? {
                    self.tree().set_attribute(node, "onchange", action.as_str())?;
                    if let Some(slot) = record.action_type()? {
                        self.tree().set_attribute(node, &slot, action.as_str())?;
                    }
                }
            }
            ElementKind::Div => {
                self.bind_action(node, record, "onclick")?;
            }
        }
        Ok(())
    }

    fn append_to_root(&mut self, tag: &str) -> Result<NodeId, FieldError> {
        let root = self.root;
        let node = self.tree().create_element(tag);
        self.tree().append_child(root, node)?;
        Ok(node)
    }

    fn append_text(&mut self, parent: NodeId, content: &str) -> Result<(), FieldError> {
        let text = self.tree().create_text(content);
        self.tree().append_child(parent, text)?;
        Ok(())
    }

    fn bind_action(&mut self, node: NodeId, record: &Record, slot: &str) -> Result<(), FieldError> {
        if let Some(action) = record.action()? {
            self.tree().set_attribute(node, slot, action.as_str())?;
        }
        Ok(())
    }
}

/// CSS text of a `css:` directive, trimmed
///
/// Leading whitespace and the prefix's case are ignored.
fn style_directive(directive: &str) -> Option<&str> {
    let trimmed = directive.trim_start();
    let prefix = trimmed.get(..STYLE_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(STYLE_PREFIX) {
        return None;
    }
    Some(trimmed[STYLE_PREFIX.len()..].trim())
}
