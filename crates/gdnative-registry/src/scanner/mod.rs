//! Declaration scanner.
//!
//! Extraction runs in two passes over a package of parsed units:
//!
//! 1. **Class discovery** - every struct whose doc comment carries the
//!    register marker becomes a [`RegistryClass`].
//! 2. **Member discovery** - for each class, in discovery order, every unit
//!    is scanned again for its constructor, destructor, methods, properties
//!    and signals.
//!
//! Structural violations abort the scan with a [`ScanError`]; nothing of a
//! failed scan survives. Declarations that merely do not match are skipped.
//!
//! # Example
//!
//! ```
//! use gdnative_registry::Scanner;
//!
//! let registry = Scanner::new()
//!     .scan_source(
//!         r#"
//!         /// godot::register as PLAYER
//!         pub struct Player {
//!             base: godot::Reference,
//!             pub hp: i64,
//!         }
//!
//!         impl Player {
//!             pub fn get_hp(&self) -> i64 {
//!                 self.hp
//!             }
//!         }
//!         "#,
//!     )
//!     .unwrap();
//!
//! let player = registry.get("Player").unwrap();
//! assert_eq!(player.base(), "Reference");
//! assert_eq!(player.property_names(), vec!["hp"]);
//! assert_eq!(player.method_signatures(), vec!["fn get_hp() -> i64"]);
//! ```

mod attrs;
mod decls;
mod markers;
pub mod resolve;
mod signals;
mod validate;

use syn::{Fields, FnArg, ItemStruct, Pat, Type, Visibility};
use tracing::{debug, instrument, warn};

use gdnative_core::{Kind, ScanError, ScanResult};

use crate::config::ScanConfig;
use crate::entries::{MethodEntry, ParamEntry, PropertyEntry, RegistryClass, ReturnEntry};
use crate::registry::Registry;
use crate::source::SourceSet;

use attrs::FieldTags;
use decls::{FnDecl, Unit, return_types};
use markers::{doc_lines, export_marker, lifecycle_targets, register_marker};
pub use resolve::{resolve_kind, resolve_kind_or};

/// Extracts a [`Registry`] from parsed source.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Parse and scan a single unit of source text.
    pub fn scan_source(&self, source: &str) -> ScanResult<Registry> {
        let file = syn::parse_file(source).map_err(|err| ScanError::parse("<source>", err))?;
        self.scan_file(&file)
    }

    pub fn scan_file(&self, file: &syn::File) -> ScanResult<Registry> {
        self.scan_files(std::slice::from_ref(file))
    }

    /// Scan every unit of a loaded source set as one package.
    pub fn scan_set(&self, set: &SourceSet) -> ScanResult<Registry> {
        self.scan_files(set.units())
    }

    /// Scan several units as one package.
    #[instrument(level = "debug", skip_all, fields(units = files.len()))]
    pub fn scan_files(&self, files: &[syn::File]) -> ScanResult<Registry> {
        let units: Vec<Unit<'_>> = files.iter().map(Unit::collect).collect();

        let mut registry = Registry::new();
        let mut declared = Vec::new();
        for unit in &units {
            for item in &unit.structs {
                if self.discover_class(item, &mut registry)? {
                    declared.push(*item);
                }
            }
        }

        if registry.is_empty() {
            return Ok(registry);
        }
        self.check_reserved(&units)?;

        for item in declared {
            let Some(class) = registry.get_mut(&item.ident.to_string()) else {
                continue;
            };
            for unit in &units {
                self.bind_members(class, unit)?;
            }
            for property in self.properties(&class.name, item)? {
                class.add_property(property);
            }
            debug!(
                class = %class.name,
                methods = class.methods.len(),
                properties = class.properties.len(),
                signals = class.signals.len(),
                "scanned class members"
            );
        }

        Ok(registry)
    }

    // ==========================================================================
    // Pass 1
    // ==========================================================================

    /// Register `item` if it carries the register marker.
    fn discover_class(&self, item: &ItemStruct, registry: &mut Registry) -> ScanResult<bool> {
        let Some(marker) = register_marker(&doc_lines(&item.attrs), &self.config)? else {
            return Ok(false);
        };

        let name = item.ident.to_string();
        let base = self
            .base_field(item)
            .and_then(|index| field_type(item, index))
            .and_then(|ty| match ty {
                Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
                _ => None,
            })
            .unwrap_or_default();

        debug!(class = %name, base = %base, alias = ?marker.alias, tool = marker.tool, "found class");
        registry.insert(
            RegistryClass::new(name, base)
                .with_alias(marker.alias)
                .with_tool(marker.tool),
        )?;
        Ok(true)
    }

    /// Index of the first field typed by a path into the framework namespace.
    fn base_field(&self, item: &ItemStruct) -> Option<usize> {
        item.fields.iter().position(|field| match &field.ty {
            Type::Path(path) => {
                path.qself.is_none()
                    && path.path.segments.len() > 1
                    && path
                        .path
                        .segments
                        .first()
                        .is_some_and(|s| s.ident == self.config.framework_namespace.as_str())
            }
            _ => false,
        })
    }

    // ==========================================================================
    // Pass 2
    // ==========================================================================

    fn check_reserved(&self, units: &[Unit<'_>]) -> ScanResult<()> {
        let reserved = &self.config.reserved_init;
        for unit in units {
            if unit.functions.iter().any(|f| f.sig.ident == reserved.as_str()) {
                return Err(ScanError::ReservedName {
                    function: reserved.clone(),
                });
            }
        }
        Ok(())
    }

    fn bind_members(&self, class: &mut RegistryClass, unit: &Unit<'_>) -> ScanResult<()> {
        for function in &unit.functions {
            self.bind_lifecycle(class, function)?;
            if let Some(method) = self.method(&class.name, function)? {
                debug!(class = %class.name, method = %method.name, "found method");
                class.add_method(method);
            }
        }

        for signal in signals::find_signals(unit.file, &class.name, &self.config) {
            let name = signal.name.clone();
            if class.add_signal(signal) {
                debug!(class = %class.name, signal = %name, "found signal");
            }
        }
        Ok(())
    }

    fn bind_lifecycle(&self, class: &mut RegistryClass, function: &FnDecl<'_>) -> ScanResult<()> {
        let lines = doc_lines(function.attrs);
        let owner = function.owner_name();

        let constructors = lifecycle_targets(&lines, &self.config, "constructor")?;
        if constructors.iter().any(|target| *target == class.name) {
            let entry = validate::validate_constructor(&class.name, function.sig, owner.as_deref())?;
            debug!(class = %class.name, function = %entry.function, "found constructor");
            class.set_constructor(entry)?;
        }

        let destructors = lifecycle_targets(&lines, &self.config, "destructor")?;
        if destructors.iter().any(|target| *target == class.name) {
            let entry = validate::validate_destructor(&class.name, function.sig, owner.as_deref())?;
            debug!(class = %class.name, function = %entry.function, "found destructor");
            class.set_destructor(entry)?;
        }
        Ok(())
    }

    /// A method of `class`, if the function is one and is exported.
    fn method(&self, class: &str, function: &FnDecl<'_>) -> ScanResult<Option<MethodEntry>> {
        if function.sig.receiver().is_none() || function.owner_name().as_deref() != Some(class) {
            return Ok(None);
        }

        let export = export_marker(&doc_lines(function.attrs), &self.config)?;
        if !function.is_pub() && export.is_none() {
            return Ok(None);
        }

        let name = function.name();
        let mut method =
            MethodEntry::new(class, name.as_str()).with_alias(export.and_then(|e| e.alias));

        for input in &function.sig.inputs {
            let FnArg::Typed(typed) = input else {
                continue;
            };
            let Pat::Ident(binding) = typed.pat.as_ref() else {
                warn!(class, method = %name, "parameter is not a plain binding, skipping it");
                continue;
            };
            let Some(mut kind) = resolve_kind(&typed.ty) else {
                warn!(class, method = %name, param = %binding.ident, "parameter has no resolvable type, skipping it");
                continue;
            };
            kind.replace_self(class);
            method = method.with_param(ParamEntry::new(binding.ident.to_string(), kind));
        }

        for ty in return_types(&function.sig.output) {
            let mut kind = resolve_kind_or(ty, Kind::variant());
            kind.replace_self(class);
            method = method.with_return(ReturnEntry::new(kind));
        }

        Ok(Some(method))
    }

    /// Properties declared by the fields of the class struct.
    fn properties(&self, class: &str, item: &ItemStruct) -> ScanResult<Vec<PropertyEntry>> {
        let Fields::Named(fields) = &item.fields else {
            return Ok(Vec::new());
        };
        let base = self.base_field(item);

        let mut properties = Vec::new();
        for (index, field) in fields.named.iter().enumerate() {
            let Some(ident) = &field.ident else {
                continue;
            };
            if base == Some(index) {
                continue;
            }

            let name = ident.to_string();
            let tags = FieldTags::from_attrs(&field.attrs, &self.config.tag_attribute, class, &name)?;
            if tags.ignore {
                continue;
            }

            let Some(kind) = resolve_kind(&field.ty) else {
                warn!(class, field = %name, "field has no resolvable type, skipping it");
                continue;
            };
            if self.is_signal_kind(&kind) {
                continue;
            }

            let export = export_marker(&doc_lines(&field.attrs), &self.config)?;
            if !matches!(field.vis, Visibility::Public(_)) && export.is_none() {
                continue;
            }

            let mut property =
                PropertyEntry::new(class, name.as_str(), kind).with_alias(export.and_then(|e| e.alias));
            tags.apply(&mut property)?;
            debug!(class, property = %name, kind = %property.kind, "found property");
            properties.push(property);
        }
        Ok(properties)
    }

    fn is_signal_kind(&self, kind: &Kind) -> bool {
        kind.is_member_of(&self.config.binding_namespace, &self.config.signal_type)
    }
}

fn field_type(item: &ItemStruct, index: usize) -> Option<&Type> {
    item.fields.iter().nth(index).map(|field| &field.ty)
}
