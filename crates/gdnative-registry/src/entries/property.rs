use serde::Serialize;

use gdnative_core::{Kind, PropertyHint, PropertyUsage, RpcMode, VariantType};

/// An exported field of a registered class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    pub class: String,
    pub name: String,
    pub alias: Option<String>,
    pub kind: Kind,
    /// Engine type the property is declared as.
    pub variant_type: VariantType,
    pub hint: PropertyHint,
    pub hint_string: String,
    pub usage: PropertyUsage,
    pub rset: RpcMode,
    /// Custom getter function, when tagged with `get`.
    pub getter: Option<String>,
    /// Custom setter function, when tagged with `set`.
    pub setter: Option<String>,
}

impl PropertyEntry {
    /// A property with default metadata: no hint, default usage, RPC disabled.
    pub fn new(class: impl Into<String>, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            alias: None,
            variant_type: VariantType::for_kind(&kind),
            kind,
            hint: PropertyHint::default(),
            hint_string: String::new(),
            usage: PropertyUsage::default(),
            rset: RpcMode::default(),
            getter: None,
            setter: None,
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    /// Name the property is registered under.
    pub fn registered_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn has_custom_accessors(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }
}

/// A signal bound to a class through a struct literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalEntry {
    pub name: String,
    /// Field of the class literal the signal initialises.
    pub field: String,
    /// Argument expressions, as source text.
    pub args: Vec<String>,
    /// Default argument expressions, as source text.
    pub default_args: Vec<String>,
}

impl SignalEntry {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            args: Vec::new(),
            default_args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_defaults() {
        let property = PropertyEntry::new("Player", "hp", Kind::named("i64"));
        assert_eq!(property.hint, PropertyHint::None);
        assert_eq!(property.usage, PropertyUsage::DEFAULT);
        assert_eq!(property.rset, RpcMode::Disabled);
        assert_eq!(property.variant_type, VariantType::Int);
        assert_eq!(property.registered_name(), "hp");
        assert!(!property.has_custom_accessors());

        let aliased = property.with_alias(Some("health".to_string()));
        assert_eq!(aliased.registered_name(), "health");
    }
}
