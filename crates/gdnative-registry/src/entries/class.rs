//! Registered class entry.

use std::fmt;

use serde::Serialize;

use gdnative_core::{ScanError, ScanResult};

use super::function::{ConstructorEntry, DestructorEntry, MethodEntry, to_snake_case};
use super::property::{PropertyEntry, SignalEntry};

/// A struct carrying the register marker, with everything bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryClass {
    pub name: String,
    /// Engine base class, empty when no framework field was found.
    pub base: String,
    pub alias: Option<String>,
    /// Runs inside the editor as well.
    pub tool: bool,
    pub constructor: Option<ConstructorEntry>,
    pub destructor: Option<DestructorEntry>,
    pub methods: Vec<MethodEntry>,
    pub properties: Vec<PropertyEntry>,
    pub signals: Vec<SignalEntry>,
}

impl RegistryClass {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            alias: None,
            tool: false,
            constructor: None,
            destructor: None,
            methods: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_tool(mut self, tool: bool) -> Self {
        self.tool = tool;
        self
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Name the class is registered under: the alias, or the struct name.
    pub fn registered_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_tool(&self) -> bool {
        self.tool
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    pub fn constructor_signature(&self) -> Option<String> {
        self.constructor.as_ref().map(ConstructorEntry::signature)
    }

    pub fn destructor_signature(&self) -> Option<String> {
        self.destructor.as_ref().map(DestructorEntry::signature)
    }

    pub fn method_signatures(&self) -> Vec<String> {
        self.methods.iter().map(MethodEntry::signature).collect()
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn find_signal(&self, name: &str) -> Option<&SignalEntry> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Name of the generated per-class init function.
    pub fn init_function(&self) -> String {
        format!("native_script_init_{}", to_snake_case(&self.name))
    }

    // ==========================================================================
    // Mutation
    // ==========================================================================

    /// Bind the constructor. A class has at most one.
    pub fn set_constructor(&mut self, constructor: ConstructorEntry) -> ScanResult<()> {
        if let Some(existing) = &self.constructor {
            return Err(ScanError::DuplicateConstructor {
                class: self.name.clone(),
                first: existing.function.clone(),
                second: constructor.function,
            });
        }
        self.constructor = Some(constructor);
        Ok(())
    }

    /// Bind the destructor. A class has at most one.
    pub fn set_destructor(&mut self, destructor: DestructorEntry) -> ScanResult<()> {
        if let Some(existing) = &self.destructor {
            return Err(ScanError::DuplicateDestructor {
                class: self.name.clone(),
                first: existing.function.clone(),
                second: destructor.function,
            });
        }
        self.destructor = Some(destructor);
        Ok(())
    }

    pub fn add_method(&mut self, method: MethodEntry) {
        self.methods.push(method);
    }

    pub fn add_property(&mut self, property: PropertyEntry) {
        self.properties.push(property);
    }

    /// Bind a signal. A field binds one signal however many literals of the
    /// class initialise it; the first one found is kept.
    pub fn add_signal(&mut self, signal: SignalEntry) -> bool {
        if self.signals.iter().any(|s| s.field == signal.field) {
            return false;
        }
        self.signals.push(signal);
        true
    }
}

/// Human-readable summary of the class and its members.
impl fmt::Display for RegistryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.name)?;
        if !self.base.is_empty() {
            write!(f, "({})", self.base)?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " as {}", alias)?;
        }
        if self.tool {
            f.write_str(" [tool]")?;
        }
        writeln!(f)?;

        if !self.properties.is_empty() {
            writeln!(f, "    properties:")?;
            for property in &self.properties {
                writeln!(
                    f,
                    "        {}: {} (hint {}, usage {})",
                    property.name, property.kind, property.hint, property.usage
                )?;
            }
        }
        if let Some(signature) = self.constructor_signature() {
            writeln!(f, "    constructor: {}", signature)?;
        }
        if let Some(signature) = self.destructor_signature() {
            writeln!(f, "    destructor: {}", signature)?;
        }
        if !self.methods.is_empty() {
            writeln!(f, "    methods:")?;
            for method in &self.methods {
                writeln!(f, "        {}", method.signature())?;
            }
        }
        if !self.signals.is_empty() {
            writeln!(f, "    signals:")?;
            for signal in &self.signals {
                writeln!(f, "        signal {}", signal.name)?;
            }
        }
        Ok(())
    }
}
