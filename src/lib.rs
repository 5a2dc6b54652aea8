//! Register Rust types with the Godot NativeScript runtime from doc markers.
//!
//! The workspace is split in two:
//!
//! - [`gdnative_registry`] scans source for `godot::*` markers and builds a
//!   [`Registry`] for code generation.
//! - [`gdnative_core`] holds the kind model, the conversion tables and the
//!   runtime helper that performs the registration calls at plugin load.
//!
//! # Example
//!
//! ```
//! use gdnative_registrar::prelude::*;
//!
//! let registry = scan_source(
//!     r#"
//!     /// godot::register
//!     pub struct Player {
//!         base: godot::Reference,
//!         #[godot(hint = "range", hint_string = "0,100")]
//!         pub hp: i64,
//!     }
//!     "#,
//! )?;
//!
//! let player = registry.get("Player").unwrap();
//! assert_eq!(player.find_property("hp").unwrap().hint, PropertyHint::Range);
//! # Ok::<(), ScanError>(())
//! ```

use std::path::Path;

pub use gdnative_core;
pub use gdnative_registry;

pub use gdnative_core::{
    GdnativeError, Kind, KindParseError, PropertyHint, PropertyUsage, RegistrationError, RpcMode,
    ScanError, ScanResult, Variant, VariantAccessor, VariantConstructor, VariantType,
};
pub use gdnative_registry::{Registry, RegistryClass, ScanConfig, Scanner, SourceSet};

/// Scan one unit of source text with the default configuration.
pub fn scan_source(source: &str) -> ScanResult<Registry> {
    Scanner::new().scan_source(source)
}

/// Scan every source file of a package directory as one package.
pub fn scan_dir(dir: impl AsRef<Path>, config: &ScanConfig) -> ScanResult<Registry> {
    let set = SourceSet::load_dir(dir, config)?;
    Scanner::with_config(config.clone()).scan_set(&set)
}

pub mod prelude {
    pub use crate::{scan_dir, scan_source};
    pub use gdnative_core::runtime::{
        InstanceCreateFunc, InstanceDestroyFunc, InstanceMethod, InstancePropertyGet,
        InstancePropertySet, NativeClass, NativeMethod, NativeProperty, NativeScriptApi,
        NativeSignal, Object, SignalArgument,
    };
    pub use gdnative_core::{
        GdnativeError, Kind, PropertyHint, PropertyUsage, RegistrationError, RpcMode, ScanError,
        ScanResult, Variant, VariantAccessor, VariantConstructor, VariantType,
    };
    pub use gdnative_registry::{
        MethodEntry, PropertyEntry, Registry, RegistryClass, ScanConfig, Scanner, SignalEntry,
        SourceSet,
    };
}
