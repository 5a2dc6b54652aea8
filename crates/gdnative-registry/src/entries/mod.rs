//! Registry entry types.
//!
//! - [`RegistryClass`] - a registered struct and everything bound to it
//! - [`ConstructorEntry`], [`DestructorEntry`] - user lifecycle functions
//! - [`MethodEntry`] with [`ParamEntry`] and [`ReturnEntry`]
//! - [`PropertyEntry`], [`SignalEntry`]

mod class;
mod function;
mod property;

pub use class::RegistryClass;
pub use function::{ConstructorEntry, DestructorEntry, MethodEntry, ParamEntry, ReturnEntry, godot_name};
pub use property::{PropertyEntry, SignalEntry};
