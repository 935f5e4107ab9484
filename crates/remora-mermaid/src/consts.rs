//! Token and marker conventions.

/// Placeholder token authors write in documentation source where the
/// inheritance arrow cannot be expressed literally.
pub const PLACEHOLDER_TOKEN: &str = "class_diagram_inheritance";

/// Mermaid's native class-diagram inheritance arrow.
pub const INHERITANCE_ARROW: &str = "<|--";

/// Class name marking elements that hold diagram source.
pub const DEFAULT_MARKER_CLASS: &str = "mermaid";

/// Element id of the injected bootstrap script.
pub const BOOTSTRAP_SCRIPT_ID: &str = "remora-mermaid-bootstrap";
