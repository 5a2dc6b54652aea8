//! Properties and their generic accessors.
//!
//! A property without custom accessors gets a generic getter/setter pair over
//! one shared value slot. The slot belongs to the property, not to an
//! instance: every instance of the class observes the same value.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::api::{
    InstancePropertyGet, InstancePropertySet, NativeScriptApi, Object, PropertyAttributes,
};
use crate::error::RegistrationError;
use crate::types::{PropertyHint, PropertyUsage, RpcMode, VariantType};
use crate::variant::Variant;

/// A property ready to be registered on a class.
#[derive(Debug, Clone)]
pub struct NativeProperty {
    class: String,
    name: String,
    attributes: PropertyAttributes,
    setter: Option<InstancePropertySet>,
    getter: Option<InstancePropertyGet>,
    slot: Arc<Mutex<Variant>>,
}

impl NativeProperty {
    /// Build a property from tag strings.
    ///
    /// Empty strings select the defaults (no hint, default usage, RPC
    /// disabled).
    pub fn new(
        class: impl Into<String>,
        name: impl Into<String>,
        hint: &str,
        hint_string: &str,
        usage: &str,
        rset: &str,
    ) -> Result<Self, RegistrationError> {
        let attributes = PropertyAttributes {
            hint: parse_hint(hint)?,
            hint_string: hint_string.to_string(),
            usage: parse_usage(usage)?,
            rset_type: parse_rpc_mode(rset)?,
            ..PropertyAttributes::default()
        };

        Ok(Self {
            class: class.into(),
            name: name.into(),
            attributes,
            setter: None,
            getter: None,
            slot: Arc::new(Mutex::new(Variant::Nil)),
        })
    }

    pub fn with_variant_type(mut self, variant_type: VariantType) -> Self {
        self.attributes.variant_type = variant_type;
        self
    }

    /// Set the default value, which also seeds the generic slot.
    pub fn with_default(mut self, value: Variant) -> Self {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = value.clone();
        self.attributes.default_value = value;
        self
    }

    pub fn with_setter(mut self, setter: InstancePropertySet) -> Self {
        self.setter = Some(setter);
        self
    }

    pub fn with_getter(mut self, getter: InstancePropertyGet) -> Self {
        self.getter = Some(getter);
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &PropertyAttributes {
        &self.attributes
    }

    /// Current value of the generic slot.
    pub fn value(&self) -> Variant {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn method_data(&self) -> String {
        format!("{}::{}", self.class, self.name)
    }

    fn generic_setter(&self) -> InstancePropertySet {
        let slot = Arc::clone(&self.slot);
        InstancePropertySet::new(self.method_data(), move |_: &Object, data, _, value| {
            debug!(property = %data, "generic property set");
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = value;
        })
    }

    fn generic_getter(&self) -> InstancePropertyGet {
        let slot = Arc::clone(&self.slot);
        InstancePropertyGet::new(self.method_data(), move |_: &Object, data, _| {
            debug!(property = %data, "generic property get");
            slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
        })
    }

    /// Resolve the accessor pair, synthesising generic ones when neither is
    /// supplied.
    pub(crate) fn accessors(
        &self,
    ) -> Result<(InstancePropertySet, InstancePropertyGet), RegistrationError> {
        match (&self.setter, &self.getter) {
            (Some(setter), Some(getter)) => Ok((setter.clone(), getter.clone())),
            (None, None) => Ok((self.generic_setter(), self.generic_getter())),
            _ => Err(RegistrationError::IncompleteAccessors {
                class: self.class.clone(),
                property: self.name.clone(),
            }),
        }
    }

    pub(crate) fn register<A: NativeScriptApi + ?Sized>(
        self,
        api: &mut A,
        set: InstancePropertySet,
        get: InstancePropertyGet,
    ) {
        debug!(class = %self.class, property = %self.name, "registering property");
        api.register_property(&self.class, &self.name, self.attributes, set, get);
    }
}

fn parse_hint(value: &str) -> Result<PropertyHint, RegistrationError> {
    if value.is_empty() {
        return Ok(PropertyHint::default());
    }
    PropertyHint::from_tag(value).ok_or_else(|| RegistrationError::UnknownHint {
        value: value.to_string(),
        allowed: PropertyHint::tag_names(),
    })
}

fn parse_usage(value: &str) -> Result<PropertyUsage, RegistrationError> {
    if value.is_empty() {
        return Ok(PropertyUsage::default());
    }
    PropertyUsage::from_tag(value).ok_or_else(|| RegistrationError::UnknownUsage {
        value: value.to_string(),
        allowed: PropertyUsage::tag_names(),
    })
}

fn parse_rpc_mode(value: &str) -> Result<RpcMode, RegistrationError> {
    if value.is_empty() {
        return Ok(RpcMode::default());
    }
    RpcMode::from_tag(value).ok_or_else(|| RegistrationError::UnknownRpcMode {
        value: value.to_string(),
        allowed: RpcMode::tag_names(),
    })
}
