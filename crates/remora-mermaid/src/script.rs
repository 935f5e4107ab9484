//! Client-side bootstrap engine.
//!
//! For server-rendered sites the Mermaid library executes in the browser;
//! this engine forwards the recorded initialization options and the explicit
//! render call by injecting a single bootstrap `<script>` into the page.

use remora_dom::Document;

use crate::consts::BOOTSTRAP_SCRIPT_ID;
use crate::engine::{DiagramEngine, InitOptions};

/// [`DiagramEngine`] that emits the Mermaid bootstrap into the page.
///
/// `initialize` records the options; `run` ensures the document carries
/// exactly one bootstrap script (identified by element id) with
/// `mermaid.initialize(...)` followed by the explicit `mermaid.init()` call.
#[derive(Debug, Default)]
pub struct MermaidScript {
    options: Option<InitOptions>,
}

impl MermaidScript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options recorded by the last `initialize` call, if any.
    #[must_use]
    pub fn options(&self) -> Option<&InitOptions> {
        self.options.as_ref()
    }

    fn bootstrap_markup(options: &InitOptions) -> String {
        let options_json = serde_json::to_string(options).unwrap_or_else(|_| "{}".to_owned());
        format!(
            r#"<script id="{BOOTSTRAP_SCRIPT_ID}">mermaid.initialize({options_json});mermaid.init();</script>"#
        )
    }
}

impl DiagramEngine for MermaidScript {
    fn initialize(&mut self, options: &InitOptions) {
        if self.options.as_ref() == Some(options) {
            return;
        }
        tracing::info!(?options, "mermaid engine configured");
        self.options = Some(options.clone());
    }

    fn run(&mut self, document: &mut Document) {
        let id_marker = format!(r#"id="{BOOTSTRAP_SCRIPT_ID}""#);
        if document.contains(&id_marker) {
            tracing::debug!("bootstrap script already present");
            return;
        }

        let options = self.options.clone().unwrap_or_default();
        document.append_to_body(&Self::bootstrap_markup(&options));
        tracing::debug!("bootstrap script injected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_injects_bootstrap_before_body_close() {
        let mut engine = MermaidScript::new();
        engine.initialize(&InitOptions::default());

        let mut doc = Document::new("<html><body><p>x</p></body></html>");
        engine.run(&mut doc);

        assert_eq!(
            doc.html(),
            "<html><body><p>x</p>\
             <script id=\"remora-mermaid-bootstrap\">\
             mermaid.initialize({\"startOnLoad\":false});mermaid.init();\
             </script></body></html>"
        );
    }

    #[test]
    fn test_run_is_idempotent_per_document() {
        let mut engine = MermaidScript::new();
        engine.initialize(&InitOptions::default());

        let mut doc = Document::new("<body></body>");
        engine.run(&mut doc);
        let after_first = doc.html().to_owned();
        engine.run(&mut doc);

        assert_eq!(doc.html(), after_first);
        assert_eq!(doc.html().matches("mermaid.init()").count(), 1);
    }

    #[test]
    fn test_run_forwards_recorded_options() {
        let mut engine = MermaidScript::new();
        engine.initialize(&InitOptions {
            start_on_load: false,
            theme: Some("forest".to_owned()),
            security_level: None,
        });

        let mut doc = Document::new("<body></body>");
        engine.run(&mut doc);

        assert!(doc.contains(r#"{"startOnLoad":false,"theme":"forest"}"#));
    }

    #[test]
    fn test_run_without_initialize_uses_defaults() {
        let mut engine = MermaidScript::new();
        let mut doc = Document::new("<body></body>");
        engine.run(&mut doc);

        assert!(doc.contains(r#"{"startOnLoad":false}"#));
    }

    #[test]
    fn test_initialize_records_latest_options() {
        let mut engine = MermaidScript::new();
        engine.initialize(&InitOptions::default());
        engine.initialize(&InitOptions {
            start_on_load: false,
            theme: Some("dark".to_owned()),
            security_level: None,
        });

        assert_eq!(
            engine.options().and_then(|o| o.theme.as_deref()),
            Some("dark")
        );
    }
}
