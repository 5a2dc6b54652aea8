//! Function-shaped entries: lifecycle functions and methods.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use gdnative_core::{Kind, VariantAccessor, VariantConstructor};

/// Convert a camel-case name to snake case (`PhysicsProcess` to
/// `physics_process`).
pub(crate) fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Engine-facing name of a method.
///
/// Virtual hooks are spelled `v_ready` (or `VReady`) in source and are
/// exposed as `_ready`. Everything else keeps its name.
///
/// The prefix alone decides: an ordinary `v_count` is exposed as `_count`
/// too. Name such methods differently or give them an export alias.
///
/// ```
/// use gdnative_registry::entries::godot_name;
///
/// assert_eq!(godot_name("v_physics_process"), "_physics_process");
/// assert_eq!(godot_name("VPhysicsProcess"), "_physics_process");
/// assert_eq!(godot_name("v_count"), "_count");
/// assert_eq!(godot_name("velocity"), "velocity");
/// ```
pub fn godot_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix("v_") {
        if !rest.is_empty() {
            return format!("_{}", rest);
        }
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('V'), Some(second)) if second.is_uppercase() => {
            format!("_{}", to_snake_case(&name[1..]))
        }
        _ => name.to_string(),
    }
}

/// A user constructor bound to a class.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConstructorEntry {
    pub class: String,
    pub function: String,
    /// Resolved return kind, always a pointer to the class.
    pub returns: Kind,
}

impl ConstructorEntry {
    pub fn new(class: impl Into<String>, function: impl Into<String>, returns: Kind) -> Self {
        Self {
            class: class.into(),
            function: function.into(),
            returns,
        }
    }

    pub fn signature(&self) -> String {
        format!("fn {}() -> {}", self.function, self.returns)
    }
}

/// A user destructor bound to a class.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DestructorEntry {
    pub class: String,
    pub function: String,
}

impl DestructorEntry {
    pub fn new(class: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            function: function.into(),
        }
    }

    pub fn signature(&self) -> String {
        format!("fn {}()", self.function)
    }
}

/// A named method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEntry {
    pub name: String,
    pub kind: Kind,
}

impl ParamEntry {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Accessor that unboxes this parameter from its variant.
    pub fn accessor(&self) -> VariantAccessor {
        VariantAccessor::for_kind(&self.kind)
    }
}

impl Serialize for ParamEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParamEntry", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("accessor", self.accessor().method_name())?;
        state.end()
    }
}

/// One return value of a method.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReturnEntry {
    pub kind: Kind,
}

impl ReturnEntry {
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }
}

/// A method exposed on a registered class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    pub class: String,
    pub name: String,
    pub alias: Option<String>,
    pub params: Vec<ParamEntry>,
    pub returns: Vec<ReturnEntry>,
}

impl MethodEntry {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            alias: None,
            params: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_param(mut self, param: ParamEntry) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_return(mut self, value: ReturnEntry) -> Self {
        self.returns.push(value);
        self
    }

    /// Engine-facing name: the export alias when there is one, otherwise
    /// see [`godot_name`].
    pub fn godot_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => godot_name(&self.name),
        }
    }

    pub fn has_returns(&self) -> bool {
        !self.returns.is_empty()
    }

    /// Parameters as `name: kind` pairs.
    pub fn params_signature(&self) -> String {
        self.params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.kind))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Return kinds, parenthesised when there is more than one.
    pub fn returns_signature(&self) -> String {
        let kinds: Vec<String> = self.returns.iter().map(|r| r.kind.to_string()).collect();
        match kinds.len() {
            0 => String::new(),
            1 => kinds.join(""),
            _ => format!("({})", kinds.join(", ")),
        }
    }

    pub fn signature(&self) -> String {
        let returns = self.returns_signature();
        if returns.is_empty() {
            format!("fn {}({})", self.name, self.params_signature())
        } else {
            format!("fn {}({}) -> {}", self.name, self.params_signature(), returns)
        }
    }

    /// How generated glue calls the method, e.g. `get_hp(amount)`.
    pub fn call_expression(&self) -> String {
        let args: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        format!("{}({})", self.name, args.join(", "))
    }

    /// Constructor that boxes this method's return values.
    pub fn variant_constructor(&self) -> VariantConstructor {
        let kinds: Vec<Kind> = self.returns.iter().map(|r| r.kind.clone()).collect();
        VariantConstructor::for_returns(&kinds)
    }
}

impl Serialize for MethodEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MethodEntry", 8)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("godot_name", &self.godot_name())?;
        state.serialize_field("alias", &self.alias)?;
        state.serialize_field("params", &self.params)?;
        state.serialize_field("returns", &self.returns)?;
        state.serialize_field("signature", &self.signature())?;
        state.serialize_field("call", &self.call_expression())?;
        state.serialize_field(
            "boxing",
            &self.variant_constructor().expression("value"),
        )?;
        state.end()
    }
}
