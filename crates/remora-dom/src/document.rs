//! In-memory page document.
//!
//! [`Document`] wraps the HTML of the currently displayed page together with
//! its readiness state. The host framework creates it when a page loads,
//! lends it to hooks for the duration of an event callback, and discards it
//! when the page unloads.

use std::cell::{Cell, RefCell};

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str, text};

/// Document readiness, as signalled by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// The document is still being parsed.
    #[default]
    Loading,
    /// The document-ready event has fired.
    Complete,
}

/// Error raised by document mutation.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// The marker class cannot be interpolated into a selector.
    #[error("invalid marker class '{0}': expected ASCII alphanumerics, '-' or '_'")]
    InvalidMarkerClass(String),
    /// The underlying HTML rewriter rejected the document.
    #[error("HTML rewrite failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
}

/// The currently displayed page's content tree, as plugins see it.
///
/// Mutation goes through [`rewrite_marked_text`](Self::rewrite_marked_text),
/// which selects elements by class and rewrites their text content in place.
/// Everything outside the selected elements passes through byte-for-byte.
#[derive(Debug, Clone)]
pub struct Document {
    html: String,
    ready_state: ReadyState,
}

impl Document {
    /// Wrap a page's HTML. The document starts in [`ReadyState::Loading`].
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ready_state: ReadyState::Loading,
        }
    }

    /// Current page HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Signal the document-ready event. One-way transition; normally invoked
    /// by [`HookSet::document_ready`](crate::HookSet::document_ready).
    pub fn mark_ready(&mut self) {
        self.ready_state = ReadyState::Complete;
    }

    /// Rewrite the text content of every element carrying `marker_class`.
    ///
    /// `f` receives each text node's content (raw markup, entities
    /// unresolved) and returns the replacement. Returns the number of marked
    /// elements found; zero matches leaves the document untouched and is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidMarkerClass`] for a class that is empty or
    /// contains characters outside `[A-Za-z0-9_-]`, and [`DomError::Rewrite`]
    /// when the HTML rewriter fails.
    pub fn rewrite_marked_text<F>(&mut self, marker_class: &str, mut f: F) -> Result<usize, DomError>
    where
        F: FnMut(&str) -> String,
    {
        let selector = marker_selector(marker_class)?;
        let visited = Cell::new(0_usize);
        // Text nodes arrive in chunks; buffer until the last chunk so `f`
        // sees the whole node and tokens cannot be split mid-match.
        let buffer = RefCell::new(String::new());

        let output = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(selector.clone(), |_el| {
                        visited.set(visited.get() + 1);
                        Ok(())
                    }),
                    text!(selector, |chunk| {
                        let mut buffered = buffer.borrow_mut();
                        buffered.push_str(chunk.as_str());
                        if chunk.last_in_text_node() {
                            let rewritten = f(&buffered);
                            buffered.clear();
                            chunk.replace(&rewritten, ContentType::Html);
                        } else {
                            chunk.remove();
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::new()
            },
        )?;

        self.html = output;
        Ok(visited.get())
    }

    /// Insert markup immediately before the closing `</body>` tag, or at the
    /// end of the document when the page has no body close tag (fragments).
    pub fn append_to_body(&mut self, markup: &str) {
        match self.html.rfind("</body>") {
            Some(pos) => self.html.insert_str(pos, markup),
            None => self.html.push_str(markup),
        }
    }

    /// Whether the page HTML contains `needle` literally.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.html.contains(needle)
    }

    /// Consume the document, returning the page HTML.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }
}

/// Build a class selector, rejecting classes that the selector grammar (or a
/// markup author) could misinterpret.
fn marker_selector(class: &str) -> Result<String, DomError> {
    let valid = !class.is_empty()
        && class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(DomError::InvalidMarkerClass(class.to_owned()));
    }
    Ok(format!(".{class}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_loading() {
        let doc = Document::new("<p>hi</p>");
        assert_eq!(doc.ready_state(), ReadyState::Loading);
        assert_eq!(doc.html(), "<p>hi</p>");
    }

    #[test]
    fn test_mark_ready_transitions() {
        let mut doc = Document::new("");
        doc.mark_ready();
        assert_eq!(doc.ready_state(), ReadyState::Complete);
    }

    #[test]
    fn test_rewrite_marked_text_single_element() {
        let mut doc = Document::new(r#"<pre class="mermaid">A -> B</pre>"#);
        let visited = doc
            .rewrite_marked_text("mermaid", |text| text.replace("->", "=>"))
            .unwrap();

        assert_eq!(visited, 1);
        assert_eq!(doc.html(), r#"<pre class="mermaid">A => B</pre>"#);
    }

    #[test]
    fn test_rewrite_marked_text_multiple_elements() {
        let mut doc = Document::new(
            r#"<div class="mermaid">one</div><p>keep</p><div class="mermaid">two</div>"#,
        );
        let visited = doc
            .rewrite_marked_text("mermaid", |text| text.to_uppercase())
            .unwrap();

        assert_eq!(visited, 2);
        assert_eq!(
            doc.html(),
            r#"<div class="mermaid">ONE</div><p>keep</p><div class="mermaid">TWO</div>"#
        );
    }

    #[test]
    fn test_rewrite_marked_text_ignores_unmarked_elements() {
        let html = r#"<pre class="plain">A -> B</pre><p>A -> B</p>"#;
        let mut doc = Document::new(html);
        let visited = doc
            .rewrite_marked_text("mermaid", |text| text.replace("->", "=>"))
            .unwrap();

        assert_eq!(visited, 0);
        assert_eq!(doc.html(), html);
    }

    #[test]
    fn test_rewrite_marked_text_matches_among_multiple_classes() {
        let mut doc = Document::new(r#"<pre class="language-text mermaid">x</pre>"#);
        let visited = doc
            .rewrite_marked_text("mermaid", |_| "y".to_owned())
            .unwrap();

        assert_eq!(visited, 1);
        assert!(doc.html().contains(">y</pre>"));
    }

    #[test]
    fn test_rewrite_marked_text_empty_document() {
        let mut doc = Document::new("");
        let visited = doc
            .rewrite_marked_text("mermaid", |text| text.to_owned())
            .unwrap();
        assert_eq!(visited, 0);
        assert_eq!(doc.html(), "");
    }

    #[test]
    fn test_rewrite_marked_text_preserves_untouched_markup() {
        let html = "<html><head><title>t</title></head><body>\n<p>A &lt; B</p>\n</body></html>";
        let mut doc = Document::new(html);
        doc.rewrite_marked_text("mermaid", |text| text.to_owned())
            .unwrap();
        assert_eq!(doc.html(), html);
    }

    #[test]
    fn test_rewrite_marked_text_element_with_nested_break() {
        // Text nodes separated by child elements are rewritten independently.
        let mut doc = Document::new(r#"<div class="mermaid">a-b<br>a-b</div>"#);
        let visited = doc
            .rewrite_marked_text("mermaid", |text| text.replace("a-b", "c"))
            .unwrap();

        assert_eq!(visited, 1);
        assert_eq!(doc.html(), r#"<div class="mermaid">c<br>c</div>"#);
    }

    #[test]
    fn test_rewrite_marked_text_invalid_class() {
        let mut doc = Document::new("<p>x</p>");

        let err = doc
            .rewrite_marked_text("", |text| text.to_owned())
            .unwrap_err();
        assert!(matches!(err, DomError::InvalidMarkerClass(_)));

        let err = doc
            .rewrite_marked_text("mer maid", |text| text.to_owned())
            .unwrap_err();
        assert!(matches!(err, DomError::InvalidMarkerClass(_)));
        assert!(err.to_string().contains("mer maid"));
    }

    #[test]
    fn test_append_to_body_before_close_tag() {
        let mut doc = Document::new("<html><body><p>x</p></body></html>");
        doc.append_to_body("<script>s()</script>");
        assert_eq!(
            doc.html(),
            "<html><body><p>x</p><script>s()</script></body></html>"
        );
    }

    #[test]
    fn test_append_to_body_fragment() {
        let mut doc = Document::new("<p>x</p>");
        doc.append_to_body("<script>s()</script>");
        assert_eq!(doc.html(), "<p>x</p><script>s()</script>");
    }

    #[test]
    fn test_contains() {
        let doc = Document::new(r#"<script id="boot"></script>"#);
        assert!(doc.contains(r#"id="boot""#));
        assert!(!doc.contains("id=\"other\""));
    }

    #[test]
    fn test_into_html() {
        let doc = Document::new("<p>x</p>");
        assert_eq!(doc.into_html(), "<p>x</p>");
    }

    #[test]
    fn test_marker_selector_valid() {
        assert_eq!(marker_selector("mermaid").unwrap(), ".mermaid");
        assert_eq!(marker_selector("diagram_v2").unwrap(), ".diagram_v2");
        assert_eq!(marker_selector("my-diagrams").unwrap(), ".my-diagrams");
    }

    #[test]
    fn test_marker_selector_invalid() {
        for class in ["", ".mermaid", "a b", "a>b", "ø"] {
            assert!(marker_selector(class).is_err(), "accepted: {class}");
        }
    }
}
