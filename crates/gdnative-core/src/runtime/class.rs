use std::sync::Arc;

use tracing::debug;

use super::api::{InstanceCreateFunc, InstanceDestroyFunc, NativeScriptApi, Object};
use super::instances::{self, ClassInfo};
use super::method::NativeMethod;
use super::property::NativeProperty;
use super::signal::NativeSignal;
use crate::error::RegistrationError;

/// A class ready to be registered with the engine.
///
/// Classes are assembled with the `with_*` builders and consumed by
/// [`NativeClass::register`].
#[derive(Debug, Clone)]
pub struct NativeClass {
    info: Arc<ClassInfo>,
    constructor: Option<InstanceCreateFunc>,
    destructor: Option<InstanceDestroyFunc>,
    methods: Vec<NativeMethod>,
    properties: Vec<NativeProperty>,
    signals: Vec<NativeSignal>,
}

impl NativeClass {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            info: Arc::new(ClassInfo {
                name: name.into(),
                base: base.into(),
                tool: false,
            }),
            constructor: None,
            destructor: None,
            methods: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// Mark the class as a tool class, run inside the editor too.
    pub fn with_tool(mut self, tool: bool) -> Self {
        Arc::make_mut(&mut self.info).tool = tool;
        self
    }

    pub fn with_constructor(mut self, constructor: InstanceCreateFunc) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn with_destructor(mut self, destructor: InstanceDestroyFunc) -> Self {
        self.destructor = Some(destructor);
        self
    }

    pub fn with_method(mut self, method: NativeMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_property(mut self, property: NativeProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_signal(mut self, signal: NativeSignal) -> Self {
        self.signals.push(signal);
        self
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn base(&self) -> &str {
        &self.info.base
    }

    pub fn is_tool(&self) -> bool {
        self.info.tool
    }

    pub fn find_property(&self, name: &str) -> Option<&NativeProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Constructor that records the new instance in the process-wide map,
    /// keyed by the object's identity.
    pub fn generic_constructor(&self) -> InstanceCreateFunc {
        let info = Arc::clone(&self.info);
        InstanceCreateFunc::new(self.info.name.clone(), move |object: &Object, _| {
            let id = object.id();
            debug!(class = %info.name, base = %info.base, id = %id, "generic constructor");
            instances::insert(id.clone(), Arc::clone(&info));
            id
        })
    }

    /// Destructor that drops the instance keyed by its user data.
    pub fn generic_destructor(&self) -> InstanceDestroyFunc {
        let name = self.info.name.clone();
        InstanceDestroyFunc::new(name.clone(), move |_: &Object, _, user_data| {
            debug!(class = %name, id = %user_data, "generic destructor");
            instances::remove(user_data);
        })
    }

    /// Register the class, then its methods, properties and signals in
    /// declaration order.
    ///
    /// Property accessors are resolved before anything reaches the API, so a
    /// failure leaves the engine untouched.
    pub fn register<A: NativeScriptApi + ?Sized>(
        self,
        api: &mut A,
    ) -> Result<(), RegistrationError> {
        let accessors = self
            .properties
            .iter()
            .map(NativeProperty::accessors)
            .collect::<Result<Vec<_>, _>>()?;

        let create = match self.constructor {
            Some(ref create) => create.clone(),
            None => self.generic_constructor(),
        };
        let destroy = match self.destructor {
            Some(ref destroy) => destroy.clone(),
            None => self.generic_destructor(),
        };

        let info = &self.info;
        debug!(class = %info.name, base = %info.base, tool = info.tool, "registering class");
        if info.tool {
            api.register_tool_class(&info.name, &info.base, create, destroy);
        } else {
            api.register_class(&info.name, &info.base, create, destroy);
        }

        for method in self.methods {
            method.register(api);
        }
        for (property, (set, get)) in self.properties.into_iter().zip(accessors) {
            property.register(api, set, get);
        }
        for signal in self.signals {
            signal.register(api);
        }
        Ok(())
    }
}
