//! Scanner configuration.

use gdnative_core::BINDING_NAMESPACE;

/// Names the scanner looks for.
///
/// The defaults match the `godot` / `gdnative` naming used by generated
/// bindings; every name can be overridden with the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Prefix of every doc marker (`godot` in `godot::register`).
    pub marker_prefix: String,
    /// Namespace holding the engine classes a registered type extends.
    pub framework_namespace: String,
    /// Namespace holding the engine value types.
    pub binding_namespace: String,
    /// Name of the signal type.
    pub signal_type: String,
    /// Name of the field tag attribute.
    pub tag_attribute: String,
    /// Function name reserved for the generated init hook.
    pub reserved_init: String,
    /// File name infix of generated sources, which are never scanned.
    pub generated_infix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            marker_prefix: "godot".to_string(),
            framework_namespace: "godot".to_string(),
            binding_namespace: BINDING_NAMESPACE.to_string(),
            signal_type: "Signal".to_string(),
            tag_attribute: "godot".to_string(),
            reserved_init: "godot_nativescript_init".to_string(),
            generated_infix: ".gen.".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }

    pub fn with_framework_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.framework_namespace = namespace.into();
        self
    }

    pub fn with_binding_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.binding_namespace = namespace.into();
        self
    }

    pub fn with_signal_type(mut self, name: impl Into<String>) -> Self {
        self.signal_type = name.into();
        self
    }

    pub fn with_tag_attribute(mut self, name: impl Into<String>) -> Self {
        self.tag_attribute = name.into();
        self
    }

    pub fn with_reserved_init(mut self, name: impl Into<String>) -> Self {
        self.reserved_init = name.into();
        self
    }

    pub fn with_generated_infix(mut self, infix: impl Into<String>) -> Self {
        self.generated_infix = infix.into();
        self
    }

    /// Full text of a marker, e.g. `godot::register`.
    pub fn marker(&self, name: &str) -> String {
        format!("{}::{}", self.marker_prefix, name)
    }

    /// Check whether a file name belongs to generated output.
    pub fn is_generated(&self, file_name: &str) -> bool {
        !self.generated_infix.is_empty() && file_name.contains(&self.generated_infix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.marker("register"), "godot::register");
        assert_eq!(config.binding_namespace, "gdnative");
        assert_eq!(config.reserved_init, "godot_nativescript_init");
        assert!(config.is_generated("player.gen.rs"));
        assert!(!config.is_generated("player.rs"));
    }

    #[test]
    fn builders_override() {
        let config = ScanConfig::new()
            .with_marker_prefix("engine")
            .with_signal_type("Event")
            .with_generated_infix("");
        assert_eq!(config.marker("export"), "engine::export");
        assert_eq!(config.signal_type, "Event");
        assert!(!config.is_generated("player.gen.rs"));
    }
}
