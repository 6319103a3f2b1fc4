//! kefir
//!
//! Compiles a declarative UI description into a static HTML document.
//!
//! # Example
//! ```rust
//! use kefir::{Compiler, Descriptor, Record};
//!
//! let ui: Vec<Descriptor> = vec![
//!     "css: body { font-family: sans-serif; }".into(),
//!     Record::new("button").with("text", "Greet").with("action", "greet()").into(),
//!     "hr".into(),
//! ];
//! let html = Compiler::new(ui).compile_to_string();
//! assert!(html.contains("<button onclick=\"greet()\">Greet</button>"));
//! ```

mod compiler;
mod config;
mod descriptor;
mod diagnostics;
mod error;
mod output;

pub use compiler::{Compilation, Compiler};
pub use config::CompilerConfig;
pub use descriptor::{parse_descriptors, value_kind, Descriptor, ElementKind, Handler, Record};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{FieldError, KefirError};
pub use output::write_document;

// Re-export sub-crates for callers that inspect the tree
pub use kefir_dom as dom;
pub use kefir_html as html;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Startup banner
pub fn banner() -> String {
    format!("kefir v{VERSION}")
}

/// Compile a JSON UI description to HTML with default settings
pub fn compile_json(json: &str) -> Result<String, KefirError> {
    Ok(Compiler::new(parse_descriptors(json)?).compile_to_string())
}
