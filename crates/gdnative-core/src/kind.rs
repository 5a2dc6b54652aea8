//! Semantic kinds.
//!
//! A [`Kind`] is the canonical description of a source type as far as the
//! registrar cares: enough to pick a conversion function, nothing more. It is
//! not a type checker. Kinds have a canonical string rendering which is what
//! templates and the conversion tables were historically keyed on:
//!
//! | Kind                         | Rendering                       |
//! |------------------------------|---------------------------------|
//! | `Named("i64")`               | `i64`                           |
//! | `Pointer(Named("Player"))`   | `*Player`                       |
//! | `Array(Named("f32"))`        | `ArrayType[f32]`                |
//! | `Map(String, i64)`           | `MapType[String]i64`            |
//! | `Qualified(gdnative, Int)`   | `gdnative.Int`                  |
//!
//! Rendering and parsing round-trip: `kind.to_string().parse::<Kind>()`
//! yields an equal kind.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::KindParseError;

/// Namespace of the binding crate that owns the engine value types.
pub const BINDING_NAMESPACE: &str = "gdnative";

/// Canonical semantic kind of a parameter, return value or property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A bare name (`bool`, `Player`, `Self`).
    Named(String),
    /// Anything pointer-like (raw pointers, references, `Box`).
    Pointer(Box<Kind>),
    /// Anything sequence-like (slices, arrays, `Vec`).
    Array(Box<Kind>),
    /// Anything map-like, keyed by the first kind.
    Map(Box<Kind>, Box<Kind>),
    /// A namespace-qualified name.
    Qualified { namespace: Box<Kind>, member: String },
}

impl Kind {
    /// Create a bare named kind.
    pub fn named(name: impl Into<String>) -> Self {
        Kind::Named(name.into())
    }

    /// Wrap a kind in a pointer.
    pub fn pointer(inner: Kind) -> Self {
        Kind::Pointer(Box::new(inner))
    }

    /// Wrap a kind in an array.
    pub fn array(element: Kind) -> Self {
        Kind::Array(Box::new(element))
    }

    /// Create a map kind.
    pub fn map(key: Kind, value: Kind) -> Self {
        Kind::Map(Box::new(key), Box::new(value))
    }

    /// Qualify `member` with a namespace kind.
    pub fn qualified(namespace: Kind, member: impl Into<String>) -> Self {
        Kind::Qualified {
            namespace: Box::new(namespace),
            member: member.into(),
        }
    }

    /// A member of the binding namespace, e.g. `gdnative.Variant`.
    pub fn binding(member: impl Into<String>) -> Self {
        Kind::qualified(Kind::named(BINDING_NAMESPACE), member)
    }

    /// Fallback for pointees that cannot be resolved.
    pub fn generic_pointer() -> Self {
        Kind::binding("Pointer")
    }

    /// Fallback for return values that cannot be resolved: already boxed.
    pub fn variant() -> Self {
        Kind::binding("Variant")
    }

    /// The last name of a named or qualified kind.
    pub fn tail_name(&self) -> Option<&str> {
        match self {
            Kind::Named(name) => Some(name),
            Kind::Qualified { member, .. } => Some(member),
            _ => None,
        }
    }

    /// The outermost namespace of a qualified kind (`a` for `a.b.C`).
    pub fn root_namespace(&self) -> Option<&str> {
        match self {
            Kind::Qualified { namespace, .. } => match namespace.as_ref() {
                Kind::Named(name) => Some(name),
                nested => nested.root_namespace(),
            },
            _ => None,
        }
    }

    /// Check whether this kind is `member` inside `namespace`, or the bare
    /// `member` name.
    pub fn is_member_of(&self, namespace: &str, member: &str) -> bool {
        match self {
            Kind::Named(name) => name == member,
            Kind::Qualified {
                namespace: ns,
                member: m,
            } => m == member && ns.to_string() == namespace,
            _ => false,
        }
    }

    /// The pointee of a pointer kind.
    pub fn pointee(&self) -> Option<&Kind> {
        match self {
            Kind::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    /// Check whether this is a pointer to the type named `name`.
    pub fn is_pointer_to(&self, name: &str) -> bool {
        self.pointee()
            .and_then(Kind::tail_name)
            .is_some_and(|tail| tail == name)
    }

    /// Check whether this is an array kind.
    pub fn is_array(&self) -> bool {
        matches!(self, Kind::Array(_))
    }

    /// Check whether this is a map kind.
    pub fn is_map(&self) -> bool {
        matches!(self, Kind::Map(..))
    }

    /// Replace every bare `Self` with `class`.
    pub fn replace_self(&mut self, class: &str) {
        match self {
            Kind::Named(name) if name == "Self" => *name = class.to_string(),
            Kind::Named(_) => {}
            Kind::Pointer(inner) | Kind::Array(inner) => inner.replace_self(class),
            Kind::Map(key, value) => {
                key.replace_self(class);
                value.replace_self(class);
            }
            Kind::Qualified { namespace, .. } => namespace.replace_self(class),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Named(name) => write!(f, "{}", name),
            Kind::Pointer(inner) => write!(f, "*{}", inner),
            Kind::Array(element) => write!(f, "ArrayType[{}]", element),
            Kind::Map(key, value) => write!(f, "MapType[{}]{}", key, value),
            Kind::Qualified { namespace, member } => write!(f, "{}.{}", namespace, member),
        }
    }
}

impl FromStr for Kind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KindParseError::Empty);
        }

        if let Some(rest) = s.strip_prefix('*') {
            return Ok(Kind::pointer(rest.parse()?));
        }

        if let Some(rest) = s.strip_prefix("ArrayType[") {
            let close = closing_bracket(rest)
                .ok_or_else(|| KindParseError::UnbalancedBrackets(s.to_string()))?;
            if close + 1 != rest.len() {
                return Err(KindParseError::TrailingText(s.to_string()));
            }
            return Ok(Kind::array(rest[..close].parse()?));
        }

        if let Some(rest) = s.strip_prefix("MapType[") {
            let close = closing_bracket(rest)
                .ok_or_else(|| KindParseError::UnbalancedBrackets(s.to_string()))?;
            let key = rest[..close].parse()?;
            let value = rest[close + 1..].parse()?;
            return Ok(Kind::map(key, value));
        }

        if s.contains('[') || s.contains(']') {
            return Err(KindParseError::UnbalancedBrackets(s.to_string()));
        }

        match s.rsplit_once('.') {
            Some((namespace, member)) if !namespace.is_empty() && !member.is_empty() => {
                Ok(Kind::qualified(namespace.parse()?, member))
            }
            _ => Ok(Kind::Named(s.to_string())),
        }
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Index of the `]` closing an already opened `[` in `s`.
fn closing_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (index, ch) in s.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
