//! Conversion lookup tables.
//!
//! Generated glue receives arguments as boxed variants and must hand back a
//! boxed variant. These tables decide, from a [`Kind`] alone, which accessor
//! unboxes an argument and which constructor boxes a return value. Both are
//! total: every kind gets an answer, with a documented default.

use serde::Serialize;

use crate::kind::{BINDING_NAMESPACE, Kind};
use crate::types::VariantType;

/// Scalar family of a kind, after normalising fixed-width aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Bool,
    Byte,
    Int,
    Uint,
    Real,
    String,
    /// Already a boxed variant.
    Variant,
    /// One of the engine value types (`Vector2`, `Color`, ...).
    Value(VariantType),
}

fn builtin_name(name: &str) -> Option<Builtin> {
    let builtin = match name {
        "bool" | "Bool" => Builtin::Bool,
        "u8" | "uint8" | "Uint8T" => Builtin::Byte,
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "int" | "int8" | "int16" | "int32"
        | "int64" | "Int" | "Int64T" | "SignedChar" => Builtin::Int,
        "u16" | "u32" | "u64" | "u128" | "usize" | "uint" | "uint16" | "uint32" | "uint64"
        | "Uint" | "Uint32T" | "Uint64T" => Builtin::Uint,
        "f32" | "f64" | "float32" | "float64" | "Float" | "Double" | "Real" => Builtin::Real,
        "String" | "string" | "str" | "Char" | "WcharT" => Builtin::String,
        "Variant" => Builtin::Variant,
        other => Builtin::Value(VariantType::from_tag(other)?),
    };
    Some(builtin)
}

/// Classify a named kind, or a member of the binding namespace.
fn builtin(kind: &Kind) -> Option<Builtin> {
    match kind {
        Kind::Named(name) => builtin_name(name),
        Kind::Qualified { namespace, member } => match namespace.as_ref() {
            Kind::Named(ns) if ns == BINDING_NAMESPACE => builtin_name(member),
            _ => None,
        },
        _ => None,
    }
}

/// Strip any number of pointer layers.
fn strip_pointers(mut kind: &Kind) -> &Kind {
    while let Kind::Pointer(inner) = kind {
        kind = inner;
    }
    kind
}

/// Check whether a kind is one of the floating point kinds.
pub fn is_float_kind(kind: &Kind) -> bool {
    builtin(kind) == Some(Builtin::Real)
}

// ============================================================================
// Argument unboxing
// ============================================================================

/// Accessor used to unbox a variant argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariantAccessor {
    Bool,
    Uint,
    Int,
    Real,
    String,
    Vector2,
    Vector3,
    Rect2,
    Transform2D,
    Plane,
    Quat,
    Aabb,
    Basis,
    Transform,
    Color,
    NodePath,
    Rid,
    Object,
    Dictionary,
    Array,
    PoolByteArray,
    PoolIntArray,
    PoolRealArray,
    PoolStringArray,
    PoolVector2Array,
    PoolVector3Array,
    PoolColorArray,
    /// The argument is taken as a variant, unconverted.
    Raw,
}

impl VariantAccessor {
    /// Pick the accessor for an argument of the given kind.
    ///
    /// Unknown kinds, framework classes and user types unbox as objects.
    pub fn for_kind(kind: &Kind) -> Self {
        match strip_pointers(kind) {
            Kind::Array(element) => Self::for_element(element),
            Kind::Map(..) => VariantAccessor::Dictionary,
            other => match builtin(other) {
                Some(builtin) => Self::for_builtin(builtin),
                None => VariantAccessor::Object,
            },
        }
    }

    fn for_builtin(builtin: Builtin) -> Self {
        match builtin {
            Builtin::Bool => VariantAccessor::Bool,
            Builtin::Byte | Builtin::Uint => VariantAccessor::Uint,
            Builtin::Int => VariantAccessor::Int,
            Builtin::Real => VariantAccessor::Real,
            Builtin::String => VariantAccessor::String,
            Builtin::Variant => VariantAccessor::Raw,
            Builtin::Value(value) => match value {
                VariantType::Vector2 => VariantAccessor::Vector2,
                VariantType::Vector3 => VariantAccessor::Vector3,
                VariantType::Rect2 => VariantAccessor::Rect2,
                VariantType::Transform2D => VariantAccessor::Transform2D,
                VariantType::Plane => VariantAccessor::Plane,
                VariantType::Quat => VariantAccessor::Quat,
                VariantType::Aabb => VariantAccessor::Aabb,
                VariantType::Basis => VariantAccessor::Basis,
                VariantType::Transform => VariantAccessor::Transform,
                VariantType::Color => VariantAccessor::Color,
                VariantType::NodePath => VariantAccessor::NodePath,
                VariantType::Rid => VariantAccessor::Rid,
                VariantType::Dictionary => VariantAccessor::Dictionary,
                VariantType::Array => VariantAccessor::Array,
                VariantType::PoolByteArray => VariantAccessor::PoolByteArray,
                VariantType::PoolIntArray => VariantAccessor::PoolIntArray,
                VariantType::PoolRealArray => VariantAccessor::PoolRealArray,
                VariantType::PoolStringArray => VariantAccessor::PoolStringArray,
                VariantType::PoolVector2Array => VariantAccessor::PoolVector2Array,
                VariantType::PoolVector3Array => VariantAccessor::PoolVector3Array,
                VariantType::PoolColorArray => VariantAccessor::PoolColorArray,
                VariantType::Bool => VariantAccessor::Bool,
                VariantType::Int => VariantAccessor::Int,
                VariantType::Real => VariantAccessor::Real,
                VariantType::String => VariantAccessor::String,
                VariantType::Nil | VariantType::Object => VariantAccessor::Object,
            },
        }
    }

    /// Pool accessor for an array whose elements have the given kind.
    fn for_element(element: &Kind) -> Self {
        match builtin(strip_pointers(element)) {
            Some(Builtin::Byte) => VariantAccessor::PoolByteArray,
            Some(Builtin::Int | Builtin::Uint) => VariantAccessor::PoolIntArray,
            Some(Builtin::Real) => VariantAccessor::PoolRealArray,
            Some(Builtin::String) => VariantAccessor::PoolStringArray,
            Some(Builtin::Value(VariantType::Vector2)) => VariantAccessor::PoolVector2Array,
            Some(Builtin::Value(VariantType::Vector3)) => VariantAccessor::PoolVector3Array,
            Some(Builtin::Value(VariantType::Color)) => VariantAccessor::PoolColorArray,
            _ => VariantAccessor::Array,
        }
    }

    /// Name of the accessor method on the boxed variant.
    pub const fn method_name(self) -> &'static str {
        match self {
            VariantAccessor::Bool => "as_bool",
            VariantAccessor::Uint => "as_uint",
            VariantAccessor::Int => "as_int",
            VariantAccessor::Real => "as_real",
            VariantAccessor::String => "as_string",
            VariantAccessor::Vector2 => "as_vector2",
            VariantAccessor::Vector3 => "as_vector3",
            VariantAccessor::Rect2 => "as_rect2",
            VariantAccessor::Transform2D => "as_transform2d",
            VariantAccessor::Plane => "as_plane",
            VariantAccessor::Quat => "as_quat",
            VariantAccessor::Aabb => "as_aabb",
            VariantAccessor::Basis => "as_basis",
            VariantAccessor::Transform => "as_transform",
            VariantAccessor::Color => "as_color",
            VariantAccessor::NodePath => "as_node_path",
            VariantAccessor::Rid => "as_rid",
            VariantAccessor::Object => "as_object",
            VariantAccessor::Dictionary => "as_dictionary",
            VariantAccessor::Array => "as_array",
            VariantAccessor::PoolByteArray => "as_pool_byte_array",
            VariantAccessor::PoolIntArray => "as_pool_int_array",
            VariantAccessor::PoolRealArray => "as_pool_real_array",
            VariantAccessor::PoolStringArray => "as_pool_string_array",
            VariantAccessor::PoolVector2Array => "as_pool_vector2_array",
            VariantAccessor::PoolVector3Array => "as_pool_vector3_array",
            VariantAccessor::PoolColorArray => "as_pool_color_array",
            VariantAccessor::Raw => "clone",
        }
    }
}

// ============================================================================
// Return-value boxing
// ============================================================================

/// Constructor used to box a method's return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariantConstructor {
    Bool,
    Uint,
    Int,
    Real,
    String,
    /// Two floating point values boxed as one vector.
    Vector2,
    /// Three floating point values boxed as one vector.
    Vector3,
    /// The value is assumed to be boxed already.
    Raw,
}

impl VariantConstructor {
    /// Pick the constructor for a method returning `returns`.
    ///
    /// One value maps through the scalar table. Two or three values become a
    /// vector only when every one of them is a floating point kind.
    pub fn for_returns(returns: &[Kind]) -> Self {
        match returns {
            [single] => Self::for_single(single),
            [_, _] | [_, _, _] if returns.iter().all(is_float_kind) => {
                if returns.len() == 2 {
                    VariantConstructor::Vector2
                } else {
                    VariantConstructor::Vector3
                }
            }
            _ => VariantConstructor::Raw,
        }
    }

    /// Pointers box as their pointee, like arguments unbox.
    fn for_single(kind: &Kind) -> Self {
        match builtin(strip_pointers(kind)) {
            Some(Builtin::Bool) => VariantConstructor::Bool,
            Some(Builtin::Byte | Builtin::Uint) => VariantConstructor::Uint,
            Some(Builtin::Int) => VariantConstructor::Int,
            Some(Builtin::Real) => VariantConstructor::Real,
            Some(Builtin::String) => VariantConstructor::String,
            _ => VariantConstructor::Raw,
        }
    }

    /// Expression boxing `value` into a variant.
    pub fn expression(self, value: &str) -> String {
        match self {
            VariantConstructor::Bool => format!("Variant::Bool({})", value),
            VariantConstructor::Uint => format!("Variant::Uint({} as u64)", value),
            VariantConstructor::Int => format!("Variant::Int({} as i64)", value),
            VariantConstructor::Real => format!("Variant::Real({} as f64)", value),
            VariantConstructor::String => format!("Variant::String({}.to_string())", value),
            VariantConstructor::Vector2 => {
                format!("Variant::Vector2([{v}.0 as f64, {v}.1 as f64])", v = value)
            }
            VariantConstructor::Vector3 => format!(
                "Variant::Vector3([{v}.0 as f64, {v}.1 as f64, {v}.2 as f64])",
                v = value
            ),
            VariantConstructor::Raw => value.to_string(),
        }
    }
}

// ============================================================================
// Property variant types
// ============================================================================

impl VariantType {
    /// The engine variant type a property of the given kind is declared as.
    ///
    /// Anything that is not a scalar, an engine value type or a collection is
    /// declared as an object.
    pub fn for_kind(kind: &Kind) -> Self {
        match strip_pointers(kind) {
            Kind::Array(element) => match VariantAccessor::for_element(element) {
                VariantAccessor::PoolByteArray => VariantType::PoolByteArray,
                VariantAccessor::PoolIntArray => VariantType::PoolIntArray,
                VariantAccessor::PoolRealArray => VariantType::PoolRealArray,
                VariantAccessor::PoolStringArray => VariantType::PoolStringArray,
                VariantAccessor::PoolVector2Array => VariantType::PoolVector2Array,
                VariantAccessor::PoolVector3Array => VariantType::PoolVector3Array,
                VariantAccessor::PoolColorArray => VariantType::PoolColorArray,
                _ => VariantType::Array,
            },
            Kind::Map(..) => VariantType::Dictionary,
            other => match builtin(other) {
                Some(Builtin::Bool) => VariantType::Bool,
                Some(Builtin::Byte | Builtin::Int | Builtin::Uint) => VariantType::Int,
                Some(Builtin::Real) => VariantType::Real,
                Some(Builtin::String) => VariantType::String,
                Some(Builtin::Variant) => VariantType::Nil,
                Some(Builtin::Value(value)) => value,
                None => VariantType::Object,
            },
        }
    }
}
