//! Diagram refresh hook.

use remora_config::Config;
use remora_dom::{Document, PageHook, ReadyState};

use crate::consts::{DEFAULT_MARKER_CLASS, INHERITANCE_ARROW, PLACEHOLDER_TOKEN};
use crate::engine::{DiagramEngine, InitOptions};

/// Keeps diagram elements rendered correctly across client-side page
/// navigations.
///
/// On every page-change event the hook replaces every literal occurrence of
/// the placeholder token with the arrow token inside each diagram-marked
/// element, then triggers the engine's render pass. The render pass is
/// deferred until the document is ready; the engine is initialized once per
/// document load with automatic scan-and-render disabled, always before the
/// first render trigger.
///
/// The placeholder is assumed never to appear legitimately in diagram
/// source; matches are rewritten unconditionally (the per-page replacement
/// count is logged at debug level).
///
/// # Configuration
///
/// Create the hook around an engine, then configure using builder methods,
/// or use [`from_config`](Self::from_config):
///
/// ```
/// use remora_mermaid::{DiagramRefresh, MermaidScript};
///
/// let hook = DiagramRefresh::new(MermaidScript::new())
///     .marker_class("diagram")
///     .placeholder("inherits")
///     .arrow("--|>");
/// ```
pub struct DiagramRefresh<E> {
    engine: E,
    marker_class: String,
    placeholder: String,
    arrow: String,
    options: InitOptions,
    initialized: bool,
    render_pending: bool,
    warnings: Vec<String>,
}

impl<E: DiagramEngine> DiagramRefresh<E> {
    /// Create a hook with the default marker class and token conventions.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            marker_class: DEFAULT_MARKER_CLASS.to_owned(),
            placeholder: PLACEHOLDER_TOKEN.to_owned(),
            arrow: INHERITANCE_ARROW.to_owned(),
            options: InitOptions::default(),
            initialized: false,
            render_pending: false,
            warnings: Vec::new(),
        }
    }

    /// Create a hook from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config, engine: E) -> Self {
        Self::new(engine)
            .marker_class(config.refresh.marker_class.clone())
            .placeholder(config.refresh.placeholder.clone())
            .arrow(config.refresh.arrow.clone())
            .init_options(InitOptions::from_config(&config.mermaid))
    }

    /// Set the class name marking diagram elements.
    #[must_use]
    pub fn marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Set the placeholder token to rewrite.
    #[must_use]
    pub fn placeholder(mut self, token: impl Into<String>) -> Self {
        self.placeholder = token.into();
        self
    }

    /// Set the token the placeholder is rewritten to.
    #[must_use]
    pub fn arrow(mut self, token: impl Into<String>) -> Self {
        self.arrow = token.into();
        self
    }

    /// Set the engine initialization options.
    #[must_use]
    pub fn init_options(mut self, options: InitOptions) -> Self {
        self.options = options;
        self
    }

    /// The wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.engine.initialize(&self.options);
            self.initialized = true;
        }
    }

    fn render(&mut self, document: &mut Document) {
        self.ensure_initialized();
        self.engine.run(document);
    }
}

impl<E: DiagramEngine> PageHook for DiagramRefresh<E> {
    fn on_document_ready(&mut self, document: &mut Document) {
        self.ensure_initialized();
        if self.render_pending {
            self.render_pending = false;
            self.engine.run(document);
        }
    }

    fn on_page_change(&mut self, document: &mut Document) {
        let placeholder = self.placeholder.as_str();
        let arrow = self.arrow.as_str();
        let mut replaced = 0_usize;

        let scan = document.rewrite_marked_text(&self.marker_class, |content| {
            let hits = content.matches(placeholder).count();
            if hits == 0 {
                return content.to_owned();
            }
            replaced += hits;
            content.replace(placeholder, arrow)
        });

        match scan {
            Ok(elements) => {
                tracing::debug!(elements, replaced, "diagram elements refreshed");
            }
            Err(err) => {
                // Leave the document as it was; the render trigger below
                // still runs.
                tracing::warn!(error = %err, "diagram refresh skipped");
                self.warnings.push(format!("diagram refresh skipped: {err}"));
            }
        }

        if document.ready_state() == ReadyState::Complete {
            self.render(document);
        } else {
            tracing::debug!("document not ready, render deferred");
            self.render_pending = true;
        }
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
