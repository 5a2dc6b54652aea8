//! Annotation-driven registry extraction.
//!
//! Scans Rust source for structs, functions and fields carrying
//! `godot::*` doc markers and builds a [`Registry`] describing everything
//! that must be registered with the NativeScript runtime. The registry is
//! the input of code generation: every entry exposes its signature strings,
//! its resolved [`Kind`](gdnative_core::Kind)s and the variant conversions
//! those kinds need, and the whole registry serializes with `serde`.

pub mod config;
pub mod entries;
pub mod registry;
pub mod scanner;
pub mod source;

pub use config::ScanConfig;
pub use entries::{
    ConstructorEntry, DestructorEntry, MethodEntry, ParamEntry, PropertyEntry, RegistryClass,
    ReturnEntry, SignalEntry,
};
pub use registry::Registry;
pub use scanner::{Scanner, resolve_kind, resolve_kind_or};
pub use source::SourceSet;
