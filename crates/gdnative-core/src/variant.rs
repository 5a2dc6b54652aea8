//! A minimal boxed value.
//!
//! The real engine variant wraps an opaque C struct. The registrar only needs
//! to hold property values and signal defaults between calls, so this is a
//! plain Rust enum tagged the same way.

use serde::Serialize;

use crate::types::VariantType;

/// Dynamically typed value exchanged with the runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Variant {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Real(f64),
    String(String),
    Vector2([f64; 2]),
    Vector3([f64; 3]),
    /// Engine object, by instance id.
    Object(u64),
    Array(Vec<Variant>),
    Dictionary(Vec<(Variant, Variant)>),
}

impl Variant {
    /// The engine type tag of this value.
    pub fn variant_type(&self) -> VariantType {
        match self {
            Variant::Nil => VariantType::Nil,
            Variant::Bool(_) => VariantType::Bool,
            Variant::Int(_) | Variant::Uint(_) => VariantType::Int,
            Variant::Real(_) => VariantType::Real,
            Variant::String(_) => VariantType::String,
            Variant::Vector2(_) => VariantType::Vector2,
            Variant::Vector3(_) => VariantType::Vector3,
            Variant::Object(_) => VariantType::Object,
            Variant::Array(_) => VariantType::Array,
            Variant::Dictionary(_) => VariantType::Dictionary,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Variant::Nil)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Bool(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Int(value)
    }
}

impl From<u64> for Variant {
    fn from(value: u64) -> Self {
        Variant::Uint(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Real(value)
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}
