//! Mermaid diagram refresh for documentation pages.
//!
//! Documentation source formats cannot express Mermaid's class-diagram
//! inheritance arrow `<|--` literally, so authors write the placeholder
//! token `class_diagram_inheritance` instead. This crate provides
//! [`DiagramRefresh`], a page-lifecycle hook that rewrites the placeholder
//! inside every diagram-marked element on each page-change event and then
//! triggers an explicit render pass through a [`DiagramEngine`]. Automatic
//! scan-and-render is disabled at document load; the hook drives rendering.
//!
//! # Architecture
//!
//! - [`DiagramRefresh`]: the `PageHook` implementation
//! - [`DiagramEngine`] / [`InitOptions`]: the diagram library's consumed
//!   surface
//! - [`MermaidScript`]: engine binding that injects the client-side
//!   bootstrap into server-rendered pages
//! - `MockEngine` (feature `mock`): recording engine for host test suites
//!
//! # Example
//!
//! ```
//! use remora_dom::{Document, HookSet};
//! use remora_mermaid::{DiagramRefresh, MermaidScript};
//!
//! let mut hooks = HookSet::new();
//! hooks.register(DiagramRefresh::new(MermaidScript::new()));
//!
//! let mut page = Document::new(
//!     "<div class=\"mermaid\">classDiagram\nA class_diagram_inheritance B</div>",
//! );
//! hooks.document_ready(&mut page);
//! hooks.page_change(&mut page);
//!
//! assert!(page.html().contains("A <|-- B"));
//! ```

mod consts;
mod engine;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod refresh;
mod script;

pub use consts::{DEFAULT_MARKER_CLASS, INHERITANCE_ARROW, PLACEHOLDER_TOKEN};
pub use engine::{DiagramEngine, InitOptions};
#[cfg(any(test, feature = "mock"))]
pub use mock::{EngineCall, MockEngine};
pub use refresh::DiagramRefresh;
pub use script::MermaidScript;
