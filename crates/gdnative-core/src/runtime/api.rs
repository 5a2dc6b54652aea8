//! The external registration surface.
//!
//! [`NativeScriptApi`] is the seam to the engine's C-level registration
//! table. Everything handed across it is a callback plus the `method_data`
//! string the engine passes back on every call.

use std::fmt;
use std::sync::Arc;

use crate::types::{PropertyHint, PropertyUsage, RpcMode, VariantType};
use crate::variant::Variant;

/// Handle to an engine-owned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object {
    id: u64,
}

impl Object {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Identity string used to key instance state.
    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn raw_id(&self) -> u64 {
        self.id
    }
}

// ============================================================================
// Callbacks
// ============================================================================

type CreateFn = dyn Fn(&Object, &str) -> String + Send + Sync;
type DestroyFn = dyn Fn(&Object, &str, &str) + Send + Sync;
type MethodFn = dyn Fn(&Object, &str, &str, &[Variant]) -> Variant + Send + Sync;
type SetFn = dyn Fn(&Object, &str, &str, Variant) + Send + Sync;
type GetFn = dyn Fn(&Object, &str, &str) -> Variant + Send + Sync;

macro_rules! callback {
    ($(#[$meta:meta])* $name:ident($field:ident: $fn_ty:ident)) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            $field: Arc<$fn_ty>,
            method_data: String,
        }

        impl $name {
            /// The data the engine hands back to the callback.
            pub fn method_data(&self) -> &str {
                &self.method_data
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("method_data", &self.method_data)
                    .finish_non_exhaustive()
            }
        }
    };
}

callback! {
    /// Instance constructor. Returns the user data that identifies the
    /// instance in every later call.
    InstanceCreateFunc(create: CreateFn)
}

impl InstanceCreateFunc {
    pub fn new(
        method_data: impl Into<String>,
        create: impl Fn(&Object, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            create: Arc::new(create),
            method_data: method_data.into(),
        }
    }

    pub fn call(&self, object: &Object) -> String {
        (self.create)(object, &self.method_data)
    }
}

callback! {
    /// Instance destructor, called with the user data the constructor returned.
    InstanceDestroyFunc(destroy: DestroyFn)
}

impl InstanceDestroyFunc {
    pub fn new(
        method_data: impl Into<String>,
        destroy: impl Fn(&Object, &str, &str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            destroy: Arc::new(destroy),
            method_data: method_data.into(),
        }
    }

    pub fn call(&self, object: &Object, user_data: &str) {
        (self.destroy)(object, &self.method_data, user_data)
    }
}

callback! {
    /// A method exposed to scripts.
    InstanceMethod(method: MethodFn)
}

impl InstanceMethod {
    pub fn new(
        method_data: impl Into<String>,
        method: impl Fn(&Object, &str, &str, &[Variant]) -> Variant + Send + Sync + 'static,
    ) -> Self {
        Self {
            method: Arc::new(method),
            method_data: method_data.into(),
        }
    }

    pub fn call(&self, object: &Object, user_data: &str, args: &[Variant]) -> Variant {
        (self.method)(object, &self.method_data, user_data, args)
    }
}

callback! {
    /// Property setter.
    InstancePropertySet(set: SetFn)
}

impl InstancePropertySet {
    pub fn new(
        method_data: impl Into<String>,
        set: impl Fn(&Object, &str, &str, Variant) + Send + Sync + 'static,
    ) -> Self {
        Self {
            set: Arc::new(set),
            method_data: method_data.into(),
        }
    }

    pub fn call(&self, object: &Object, user_data: &str, value: Variant) {
        (self.set)(object, &self.method_data, user_data, value)
    }
}

callback! {
    /// Property getter.
    InstancePropertyGet(get: GetFn)
}

impl InstancePropertyGet {
    pub fn new(
        method_data: impl Into<String>,
        get: impl Fn(&Object, &str, &str) -> Variant + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            method_data: method_data.into(),
        }
    }

    pub fn call(&self, object: &Object, user_data: &str) -> Variant {
        (self.get)(object, &self.method_data, user_data)
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodAttributes {
    pub rpc_type: RpcMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAttributes {
    pub rset_type: RpcMode,
    pub variant_type: VariantType,
    pub hint: PropertyHint,
    pub hint_string: String,
    pub usage: PropertyUsage,
    pub default_value: Variant,
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self {
            rset_type: RpcMode::Disabled,
            variant_type: VariantType::Nil,
            hint: PropertyHint::None,
            hint_string: String::new(),
            usage: PropertyUsage::DEFAULT,
            default_value: Variant::Nil,
        }
    }
}

/// One declared argument of a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalArgument {
    pub name: String,
    pub variant_type: VariantType,
    pub hint: PropertyHint,
    pub hint_string: String,
    pub usage: PropertyUsage,
    pub default_value: Variant,
}

impl SignalArgument {
    pub fn new(name: impl Into<String>, variant_type: VariantType) -> Self {
        Self {
            name: name.into(),
            variant_type,
            hint: PropertyHint::None,
            hint_string: String::new(),
            usage: PropertyUsage::DEFAULT,
            default_value: Variant::Nil,
        }
    }
}

/// A signal as handed to the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signal {
    pub name: String,
    pub args: Vec<SignalArgument>,
    pub default_args: Vec<Variant>,
}

impl Signal {
    pub fn num_args(&self) -> usize {
        self.args.len()
    }

    pub fn num_default_args(&self) -> usize {
        self.default_args.len()
    }
}

// ============================================================================
// Registration API
// ============================================================================

/// The engine's class registration table.
pub trait NativeScriptApi {
    fn register_class(
        &mut self,
        name: &str,
        base: &str,
        create: InstanceCreateFunc,
        destroy: InstanceDestroyFunc,
    );

    /// Like [`register_class`](Self::register_class), for classes that also
    /// run inside the editor.
    fn register_tool_class(
        &mut self,
        name: &str,
        base: &str,
        create: InstanceCreateFunc,
        destroy: InstanceDestroyFunc,
    );

    fn register_method(
        &mut self,
        class: &str,
        name: &str,
        attributes: MethodAttributes,
        method: InstanceMethod,
    );

    fn register_property(
        &mut self,
        class: &str,
        path: &str,
        attributes: PropertyAttributes,
        set: InstancePropertySet,
        get: InstancePropertyGet,
    );

    fn register_signal(&mut self, class: &str, signal: Signal);
}
