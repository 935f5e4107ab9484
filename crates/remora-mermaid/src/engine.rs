//! Diagram engine interface.
//!
//! The Mermaid library is an external collaborator; this module defines the
//! two entry points the refresh hook consumes: global initialization and an
//! explicit "render now" pass over the document's marked elements.

use remora_dom::Document;
use serde::Serialize;

/// Engine initialization options.
///
/// A subset of `mermaid.initialize`; serializes (camelCase) to the object
/// literal the client-side call expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    /// Automatic scan-and-render on load. The refresh hook disables this
    /// and drives rendering explicitly, so no uncontrolled render races
    /// with navigation.
    pub start_on_load: bool,
    /// Theme name (e.g. `"forest"`). Engine default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Security level (e.g. `"loose"`). Engine default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level: Option<String>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            start_on_load: false,
            theme: None,
            security_level: None,
        }
    }
}

impl InitOptions {
    /// Build options from the `[mermaid]` config section. `start_on_load`
    /// is not configurable; rendering stays hook-driven.
    #[must_use]
    pub fn from_config(config: &remora_config::MermaidConfig) -> Self {
        Self {
            start_on_load: false,
            theme: config.theme.clone(),
            security_level: config.security_level.clone(),
        }
    }
}

/// Diagram library entry points consumed by the refresh hook.
pub trait DiagramEngine {
    /// Apply global engine configuration. Idempotent when repeated with
    /// equal options.
    fn initialize(&mut self, options: &InitOptions);

    /// Scan the document's marked elements and render them now.
    fn run(&mut self, document: &mut Document);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_disable_autorender() {
        let options = InitOptions::default();
        assert!(!options.start_on_load);
        assert_eq!(options.theme, None);
        assert_eq!(options.security_level, None);
    }

    #[test]
    fn test_serialize_minimal() {
        let json = serde_json::to_string(&InitOptions::default()).unwrap();
        assert_eq!(json, r#"{"startOnLoad":false}"#);
    }

    #[test]
    fn test_serialize_full() {
        let options = InitOptions {
            start_on_load: false,
            theme: Some("forest".to_owned()),
            security_level: Some("loose".to_owned()),
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"startOnLoad":false,"theme":"forest","securityLevel":"loose"}"#
        );
    }

    #[test]
    fn test_from_config() {
        let config = remora_config::MermaidConfig {
            theme: Some("dark".to_owned()),
            security_level: None,
        };
        let options = InitOptions::from_config(&config);
        assert!(!options.start_on_load);
        assert_eq!(options.theme.as_deref(), Some("dark"));
        assert_eq!(options.security_level, None);
    }
}
