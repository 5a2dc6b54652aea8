//! Engine enumerations that have no counterpart in Rust's type system.
//!
//! Property hints, usage flags, RPC modes and variant types are plain
//! integers on the C side. Here they are closed enums (and a bitflags set for
//! usage) that can be looked up from the strings written in field tags.
//!
//! Tag lookup is forgiving about spelling: `range`, `Range`,
//! `PropertyHintRange` and `gdnative.PropertyHintRange` all name the same
//! hint, and underscores are ignored (`exp_range` is `ExpRange`).

use std::fmt;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

use crate::kind::BINDING_NAMESPACE;

/// Reduce a tag value to the lowercase key used for lookups.
fn normalize_tag(value: &str, prefix: &str) -> String {
    let mut value = value.trim();
    if let Some(rest) = value
        .strip_prefix(BINDING_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
    {
        value = rest;
    }
    if let Some(rest) = value.strip_prefix(prefix) {
        value = rest;
    }
    value.replace('_', "").to_ascii_lowercase()
}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $prefix:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal $(| $alias:literal)*
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoPrimitive, TryFromPrimitive,
        )]
        #[repr(u32)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Name of this variant as written in tags (`Range`).
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)*
                }
            }

            /// Look up a variant from a tag value.
            pub fn from_tag(value: &str) -> Option<Self> {
                let key = normalize_tag(value, $prefix);
                $(
                    if key == stringify!($variant).to_ascii_lowercase() $(|| key == $alias)* {
                        return Some($name::$variant);
                    }
                )*
                None
            }

            /// Accepted tag values, lowercase, for error messages.
            pub fn tag_names() -> Vec<String> {
                Self::ALL
                    .iter()
                    .map(|variant| variant.name().to_ascii_lowercase())
                    .collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

tag_enum! {
    /// Editor hint attached to a property.
    pub enum PropertyHint: "PropertyHint" {
        None = 0,
        Range = 1,
        ExpRange = 2,
        Enum = 3,
        ExpEasing = 4,
        Length = 5,
        SpriteFrame = 6,
        KeyAccel = 7,
        Flags = 8,
        Layers2dRender = 9,
        Layers2dPhysics = 10,
        Layers3dRender = 11,
        Layers3dPhysics = 12,
        File = 13,
        Dir = 14,
        GlobalFile = 15,
        GlobalDir = 16,
        ResourceType = 17,
        MultilineText = 18,
        PlaceholderText = 19,
        ColorNoAlpha = 20,
        ImageCompressLossy = 21,
        ImageCompressLossless = 22,
        ObjectId = 23,
        TypeString = 24,
        NodePathToEditedNode = 25,
        MethodOfVariantType = 26,
        MethodOfBaseType = 27,
        MethodOfInstance = 28,
        MethodOfScript = 29,
        PropertyOfVariantType = 30,
        PropertyOfBaseType = 31,
        PropertyOfInstance = 32,
        PropertyOfScript = 33,
        ObjectTooBig = 34,
        NodePathValidTypes = 35,
    }
}

impl Default for PropertyHint {
    fn default() -> Self {
        PropertyHint::None
    }
}

tag_enum! {
    /// Network replication mode of a method or property (`rset_type`).
    pub enum RpcMode: "MethodRpcMode" {
        Disabled = 0,
        Remote = 1,
        Master = 2,
        Puppet = 3 | "slave",
        Remotesync = 4 | "sync",
        Mastersync = 5,
        Puppetsync = 6,
    }
}

impl Default for RpcMode {
    fn default() -> Self {
        RpcMode::Disabled
    }
}

tag_enum! {
    /// Type tag of a boxed variant value.
    pub enum VariantType: "VariantType" {
        Nil = 0,
        Bool = 1,
        Int = 2,
        Real = 3,
        String = 4,
        Vector2 = 5,
        Rect2 = 6,
        Vector3 = 7,
        Transform2D = 8,
        Plane = 9,
        Quat = 10,
        Aabb = 11,
        Basis = 12,
        Transform = 13,
        Color = 14,
        NodePath = 15,
        Rid = 16,
        Object = 17,
        Dictionary = 18,
        Array = 19,
        PoolByteArray = 20,
        PoolIntArray = 21,
        PoolRealArray = 22,
        PoolStringArray = 23,
        PoolVector2Array = 24,
        PoolVector3Array = 25,
        PoolColorArray = 26,
    }
}

bitflags! {
    /// How a property is stored, shown and replicated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct PropertyUsage: u32 {
        const STORAGE = 1;
        const EDITOR = 2;
        const NETWORK = 4;
        const EDITOR_HELPER = 8;
        const CHECKABLE = 16;
        const CHECKED = 32;
        const INTERNATIONALIZED = 64;
        const GROUP = 128;
        const CATEGORY = 256;
        const STORE_IF_NONZERO = 512;
        const STORE_IF_NONONE = 1024;
        const NO_INSTANCE_STATE = 2048;
        const RESTART_IF_CHANGED = 4096;
        const SCRIPT_VARIABLE = 8192;
        const STORE_IF_NULL = 16384;
        const ANIMATE_AS_TRIGGER = 32768;
        const UPDATE_ALL_IF_MODIFIED = 65536;

        const DEFAULT = Self::STORAGE.bits() | Self::EDITOR.bits() | Self::NETWORK.bits();
        const DEFAULT_INTL = Self::DEFAULT.bits() | Self::INTERNATIONALIZED.bits();
        const NOEDITOR = Self::STORAGE.bits() | Self::NETWORK.bits();
    }
}

/// Named usage values accepted in tags.
const USAGE_TAGS: &[(&str, PropertyUsage)] = &[
    ("Storage", PropertyUsage::STORAGE),
    ("Editor", PropertyUsage::EDITOR),
    ("Network", PropertyUsage::NETWORK),
    ("EditorHelper", PropertyUsage::EDITOR_HELPER),
    ("Checkable", PropertyUsage::CHECKABLE),
    ("Checked", PropertyUsage::CHECKED),
    ("Internationalized", PropertyUsage::INTERNATIONALIZED),
    ("Group", PropertyUsage::GROUP),
    ("Category", PropertyUsage::CATEGORY),
    ("StoreIfNonzero", PropertyUsage::STORE_IF_NONZERO),
    ("StoreIfNonone", PropertyUsage::STORE_IF_NONONE),
    ("NoInstanceState", PropertyUsage::NO_INSTANCE_STATE),
    ("RestartIfChanged", PropertyUsage::RESTART_IF_CHANGED),
    ("ScriptVariable", PropertyUsage::SCRIPT_VARIABLE),
    ("StoreIfNull", PropertyUsage::STORE_IF_NULL),
    ("AnimateAsTrigger", PropertyUsage::ANIMATE_AS_TRIGGER),
    ("UpdateAllIfModified", PropertyUsage::UPDATE_ALL_IF_MODIFIED),
    ("Default", PropertyUsage::DEFAULT),
    ("DefaultIntl", PropertyUsage::DEFAULT_INTL),
    ("Noeditor", PropertyUsage::NOEDITOR),
];

impl PropertyUsage {
    /// Look up a named usage from a tag value.
    pub fn from_tag(value: &str) -> Option<Self> {
        let key = normalize_tag(value, "PropertyUsage");
        USAGE_TAGS
            .iter()
            .find(|(name, _)| name.to_ascii_lowercase() == key)
            .map(|(_, usage)| *usage)
    }

    /// The tag name of this exact flag combination, if it has one.
    pub fn tag_name(self) -> Option<&'static str> {
        USAGE_TAGS
            .iter()
            .find(|(_, usage)| *usage == self)
            .map(|(name, _)| *name)
    }

    /// Accepted tag values, lowercase, for error messages.
    pub fn tag_names() -> Vec<String> {
        USAGE_TAGS
            .iter()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}

impl Default for PropertyUsage {
    fn default() -> Self {
        PropertyUsage::DEFAULT
    }
}

impl fmt::Display for PropertyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#x}", self.bits()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_lookup_accepts_every_spelling() {
        assert_eq!(PropertyHint::from_tag("range"), Some(PropertyHint::Range));
        assert_eq!(PropertyHint::from_tag("Range"), Some(PropertyHint::Range));
        assert_eq!(PropertyHint::from_tag("PropertyHintRange"), Some(PropertyHint::Range));
        assert_eq!(
            PropertyHint::from_tag("gdnative.PropertyHintExpRange"),
            Some(PropertyHint::ExpRange)
        );
        assert_eq!(PropertyHint::from_tag("exp_range"), Some(PropertyHint::ExpRange));
        assert_eq!(PropertyHint::from_tag("sideways"), None);
    }

    #[test]
    fn hint_names_and_values() {
        assert_eq!(PropertyHint::Range.name(), "Range");
        assert_eq!(u32::from(PropertyHint::ResourceType), 17);
        assert_eq!(PropertyHint::try_from(8u32), Ok(PropertyHint::Flags));
        assert!(PropertyHint::tag_names().contains(&"multilinetext".to_string()));
        assert_eq!(PropertyHint::default(), PropertyHint::None);
    }

    #[test]
    fn rpc_mode_aliases() {
        assert_eq!(RpcMode::from_tag("slave"), Some(RpcMode::Puppet));
        assert_eq!(RpcMode::from_tag("sync"), Some(RpcMode::Remotesync));
        assert_eq!(RpcMode::from_tag("MethodRpcModeMaster"), Some(RpcMode::Master));
        assert_eq!(RpcMode::default(), RpcMode::Disabled);
        assert_eq!(u32::from(RpcMode::Puppetsync), 6);
    }

    #[test]
    fn usage_tags() {
        assert_eq!(PropertyUsage::from_tag("Default"), Some(PropertyUsage::DEFAULT));
        assert_eq!(PropertyUsage::from_tag("default_intl"), Some(PropertyUsage::DEFAULT_INTL));
        assert_eq!(PropertyUsage::from_tag("nope"), None);
        assert_eq!(PropertyUsage::DEFAULT.bits(), 7);
        assert_eq!(PropertyUsage::DEFAULT.to_string(), "Default");
        assert_eq!(
            (PropertyUsage::EDITOR | PropertyUsage::CHECKED).to_string(),
            "0x22"
        );
    }

    #[test]
    fn variant_type_lookup() {
        assert_eq!(VariantType::from_tag("VariantTypeInt"), Some(VariantType::Int));
        assert_eq!(VariantType::from_tag("transform2d"), Some(VariantType::Transform2D));
        assert_eq!(u32::from(VariantType::PoolColorArray), 26);
    }
}
