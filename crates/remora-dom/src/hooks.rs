//! Lifecycle hook registration and dispatch.
//!
//! The host framework emits two events plugins care about: document-ready
//! (once per document load) and page-change (once per client-side
//! navigation). Plugins implement [`PageHook`] and register on a
//! [`HookSet`]; the host dispatches events through it. Dispatch is
//! synchronous and single-threaded: one callback runs at a time, and each
//! callback gets exclusive access to the document.

use crate::document::Document;

/// Handler for host page-lifecycle events.
///
/// Handlers do not fail: a hook that cannot process an event records a
/// warning and leaves the document as it found it, so one misbehaving hook
/// cannot abort dispatch to the others.
pub trait PageHook {
    /// Document-ready event, fired once per document load.
    fn on_document_ready(&mut self, document: &mut Document);

    /// Page-change event, fired once per client-side navigation.
    fn on_page_change(&mut self, document: &mut Document);

    /// Warnings accumulated while handling events.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Ordered set of registered page hooks.
#[derive(Default)]
pub struct HookSet {
    hooks: Vec<Box<dyn PageHook>>,
}

impl HookSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Hooks run in registration order.
    pub fn register(&mut self, hook: impl PageHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Dispatch the document-ready event: marks the document ready, then
    /// notifies every hook.
    pub fn document_ready(&mut self, document: &mut Document) {
        document.mark_ready();
        tracing::debug!(hooks = self.hooks.len(), "dispatching document-ready");
        for hook in &mut self.hooks {
            hook.on_document_ready(document);
        }
    }

    /// Dispatch the page-change event to every hook.
    pub fn page_change(&mut self, document: &mut Document) {
        tracing::debug!(hooks = self.hooks.len(), "dispatching page-change");
        for hook in &mut self.hooks {
            hook.on_page_change(document);
        }
    }

    /// Warnings from all registered hooks, in registration order.
    #[must_use]
    pub fn warnings(&self) -> Vec<&str> {
        self.hooks
            .iter()
            .flat_map(|hook| hook.warnings().iter().map(String::as_str))
            .collect()
    }
}
