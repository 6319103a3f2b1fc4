//! kefir HTML
//!
//! Serializes a kefir document tree to markup. Output only; there is
//! no parser on this side.

mod serializer;

pub use serializer::{get_inner_html, get_outer_html, HtmlSerializer, DOCTYPE};

use kefir_dom::Document;

/// Serialize a whole document, doctype included
pub fn to_html(document: &Document) -> String {
    HtmlSerializer::new().serialize_document(document)
}
