use tracing::debug;

use super::api::{InstanceMethod, MethodAttributes, NativeScriptApi, Object};
use crate::types::RpcMode;
use crate::variant::Variant;

/// A method ready to be registered on a class.
#[derive(Debug, Clone)]
pub struct NativeMethod {
    class: String,
    name: String,
    attributes: MethodAttributes,
    method: InstanceMethod,
}

impl NativeMethod {
    /// Wrap `method` under the script-visible `name`. The RPC mode starts out
    /// disabled.
    pub fn new(
        class: impl Into<String>,
        name: impl Into<String>,
        method: impl Fn(&Object, &str, &str, &[Variant]) -> Variant + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        Self {
            class: class.into(),
            method: InstanceMethod::new(name.clone(), method),
            name,
            attributes: MethodAttributes::default(),
        }
    }

    pub fn with_rpc_mode(mut self, mode: RpcMode) -> Self {
        self.attributes.rpc_type = mode;
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rpc_mode(&self) -> RpcMode {
        self.attributes.rpc_type
    }

    pub(crate) fn register<A: NativeScriptApi + ?Sized>(self, api: &mut A) {
        debug!(class = %self.class, method = %self.name, "registering method");
        api.register_method(&self.class, &self.name, self.attributes, self.method);
    }
}
