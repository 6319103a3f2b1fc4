//! Compiler Configuration

/// Compiler configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// `id` of the container every non-style element is appended to
    pub root_id: String,

    /// `target` forced onto every link
    pub link_target: String,

    /// Indent the serialized document
    pub pretty_print: bool,

    /// Indentation used when `pretty_print` is on
    pub indent: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            link_target: "_blank".to_string(),
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}
