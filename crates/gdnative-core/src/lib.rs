//! Core types for registering native classes with the Godot NativeScript
//! runtime.
//!
//! This crate holds everything that does not need a parser: the canonical
//! [`Kind`] model, the engine enumerations, a minimal [`Variant`], the
//! conversion tables that map kinds to variant accessors and constructors,
//! the error types, and the runtime registration helper.

pub mod convert;
pub mod error;
pub mod kind;
pub mod runtime;
pub mod types;
pub mod variant;

pub use convert::{VariantAccessor, VariantConstructor, is_float_kind};
pub use error::{GdnativeError, KindParseError, RegistrationError, ScanError, ScanResult};
pub use kind::{BINDING_NAMESPACE, Kind};
pub use types::{PropertyHint, PropertyUsage, RpcMode, VariantType};
pub use variant::Variant;
