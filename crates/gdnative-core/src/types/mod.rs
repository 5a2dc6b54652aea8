//! Engine-side type vocabulary.

mod enums;

pub use enums::{PropertyHint, PropertyUsage, RpcMode, VariantType};
