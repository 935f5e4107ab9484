//! Page document model and lifecycle hooks for Remora.
//!
//! The host documentation framework owns the currently displayed page; this
//! crate models the slice of it that plugins interact with:
//! - [`Document`]: the page's HTML plus its readiness state, with in-place
//!   mutation of diagram-marked elements
//! - [`PageHook`]: the handler interface plugins implement for the host's
//!   document-ready and page-change events
//! - [`HookSet`]: ordered handler registration and synchronous dispatch
//!
//! # Example
//!
//! ```
//! use remora_dom::{Document, HookSet};
//!
//! let mut document = Document::new("<pre class=\"mermaid\">graph TD</pre>");
//! let mut hooks = HookSet::new();
//! // hooks.register(...);
//! hooks.document_ready(&mut document);
//! hooks.page_change(&mut document);
//! ```

mod document;
mod hooks;

pub use document::{DomError, Document, ReadyState};
pub use hooks::{HookSet, PageHook};
