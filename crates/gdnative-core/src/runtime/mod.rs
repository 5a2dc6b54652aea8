//! Runtime registration helper.
//!
//! Executed at plugin initialisation: turns [`NativeClass`] descriptions into
//! calls against a [`NativeScriptApi`], synthesising generic constructors,
//! destructors and property accessors where none were supplied.
//!
//! # Example
//!
//! ```
//! use gdnative_core::runtime::{NativeClass, NativeMethod, NativeProperty};
//! use gdnative_core::Variant;
//!
//! let class = NativeClass::new("Player", "Reference")
//!     .with_method(NativeMethod::new("Player", "get_hp", |_, _, _, _| Variant::Int(10)))
//!     .with_property(NativeProperty::new("Player", "hp", "Range", "0,100", "", "")?);
//! assert_eq!(class.base(), "Reference");
//! # Ok::<(), gdnative_core::RegistrationError>(())
//! ```

mod api;
mod class;
pub mod instances;
mod method;
mod property;
mod signal;

pub use api::{
    InstanceCreateFunc, InstanceDestroyFunc, InstanceMethod, InstancePropertyGet,
    InstancePropertySet, MethodAttributes, NativeScriptApi, Object, PropertyAttributes, Signal,
    SignalArgument,
};
pub use class::NativeClass;
pub use instances::ClassInfo;
pub use method::NativeMethod;
pub use property::NativeProperty;
pub use signal::NativeSignal;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrationError;
    use crate::types::{PropertyHint, RpcMode, VariantType};
    use crate::variant::Variant;

    #[derive(Debug)]
    enum Call {
        Class {
            name: String,
            base: String,
            tool: bool,
            create: InstanceCreateFunc,
            destroy: InstanceDestroyFunc,
        },
        Method {
            class: String,
            name: String,
            attributes: MethodAttributes,
            method: InstanceMethod,
        },
        Property {
            class: String,
            path: String,
            attributes: PropertyAttributes,
            set: InstancePropertySet,
            get: InstancePropertyGet,
        },
        Signal {
            class: String,
            signal: Signal,
        },
    }

    #[derive(Debug, Default)]
    struct RecordingApi {
        calls: Vec<Call>,
    }

    impl NativeScriptApi for RecordingApi {
        fn register_class(
            &mut self,
            name: &str,
            base: &str,
            create: InstanceCreateFunc,
            destroy: InstanceDestroyFunc,
        ) {
            self.calls.push(Call::Class {
                name: name.to_string(),
                base: base.to_string(),
                tool: false,
                create,
                destroy,
            });
        }

        fn register_tool_class(
            &mut self,
            name: &str,
            base: &str,
            create: InstanceCreateFunc,
            destroy: InstanceDestroyFunc,
        ) {
            self.calls.push(Call::Class {
                name: name.to_string(),
                base: base.to_string(),
                tool: true,
                create,
                destroy,
            });
        }

        fn register_method(
            &mut self,
            class: &str,
            name: &str,
            attributes: MethodAttributes,
            method: InstanceMethod,
        ) {
            self.calls.push(Call::Method {
                class: class.to_string(),
                name: name.to_string(),
                attributes,
                method,
            });
        }

        fn register_property(
            &mut self,
            class: &str,
            path: &str,
            attributes: PropertyAttributes,
            set: InstancePropertySet,
            get: InstancePropertyGet,
        ) {
            self.calls.push(Call::Property {
                class: class.to_string(),
                path: path.to_string(),
                attributes,
                set,
                get,
            });
        }

        fn register_signal(&mut self, class: &str, signal: Signal) {
            self.calls.push(Call::Signal {
                class: class.to_string(),
                signal,
            });
        }
    }

    fn player() -> NativeClass {
        NativeClass::new("Player", "Reference")
            .with_method(
                NativeMethod::new("Player", "get_hp", |_, _, _, _| Variant::Int(100))
                    .with_rpc_mode(RpcMode::Remote),
            )
            .with_property(
                NativeProperty::new("Player", "hp", "Range", "0,100", "", "")
                    .unwrap()
                    .with_variant_type(VariantType::Int),
            )
            .with_signal(NativeSignal::new(
                "Player",
                "hit",
                vec![SignalArgument::new("damage", VariantType::Int)],
                vec![Variant::Int(1)],
            ))
    }

    #[test]
    fn registers_in_declaration_order() {
        let mut api = RecordingApi::default();
        player().register(&mut api).unwrap();

        assert_eq!(api.calls.len(), 4);
        match &api.calls[0] {
            Call::Class {
                name, base, tool, ..
            } => {
                assert_eq!(name, "Player");
                assert_eq!(base, "Reference");
                assert!(!tool);
            }
            other => panic!("expected class, got {other:?}"),
        }
        match &api.calls[1] {
            Call::Method {
                class,
                name,
                attributes,
                method,
            } => {
                assert_eq!(class, "Player");
                assert_eq!(name, "get_hp");
                assert_eq!(attributes.rpc_type, RpcMode::Remote);
                assert_eq!(method.call(&Object::new(7), "7", &[]), Variant::Int(100));
            }
            other => panic!("expected method, got {other:?}"),
        }
        match &api.calls[2] {
            Call::Property {
                class,
                path,
                attributes,
                set,
                get,
            } => {
                assert_eq!((class.as_str(), path.as_str()), ("Player", "hp"));
                assert_eq!(attributes.hint, PropertyHint::Range);
                assert_eq!(attributes.variant_type, VariantType::Int);
                set.call(&Object::new(7), "7", Variant::Int(55));
                assert_eq!(get.call(&Object::new(7), "7"), Variant::Int(55));
            }
            other => panic!("expected property, got {other:?}"),
        }
        match &api.calls[3] {
            Call::Signal { class, signal } => {
                assert_eq!(class, "Player");
                assert_eq!(signal.name, "hit");
                assert_eq!(signal.num_args(), 1);
                assert_eq!(signal.num_default_args(), 1);
            }
            other => panic!("expected signal, got {other:?}"),
        }
    }

    #[test]
    fn generic_lifecycle_tracks_instances() {
        let mut api = RecordingApi::default();
        NativeClass::new("Enemy", "Node")
            .register(&mut api)
            .unwrap();

        let Call::Class {
            create, destroy, ..
        } = &api.calls[0]
        else {
            panic!("expected class registration");
        };
        assert_eq!(create.method_data(), "Enemy");

        let object = Object::new(90_001);
        let id = create.call(&object);
        assert_eq!(id, "90001");
        let info = instances::get(&id).unwrap();
        assert_eq!(info.name, "Enemy");
        assert_eq!(info.base, "Node");

        destroy.call(&object, &id);
        assert!(!instances::contains(&id));
    }

    #[test]
    fn supplied_lifecycle_is_kept() {
        let mut api = RecordingApi::default();
        NativeClass::new("Custom", "Node")
            .with_constructor(InstanceCreateFunc::new("Custom", |_, _| "custom".to_string()))
            .with_destructor(InstanceDestroyFunc::new("Custom", |_, _, _| {}))
            .register(&mut api)
            .unwrap();

        let Call::Class { create, .. } = &api.calls[0] else {
            panic!("expected class registration");
        };
        assert_eq!(create.call(&Object::new(90_002)), "custom");
        assert!(!instances::contains("90002"));
    }

    #[test]
    fn tool_classes_use_the_tool_entry_point() {
        let mut api = RecordingApi::default();
        NativeClass::new("Gizmo", "EditorPlugin")
            .with_tool(true)
            .register(&mut api)
            .unwrap();
        assert!(matches!(&api.calls[0], Call::Class { tool: true, .. }));
    }

    #[test]
    fn incomplete_accessors_register_nothing() {
        let mut api = RecordingApi::default();
        let property = NativeProperty::new("Player", "hp", "", "", "", "")
            .unwrap()
            .with_setter(InstancePropertySet::new("custom", |_, _, _, _| {}));
        let err = NativeClass::new("Player", "Reference")
            .with_property(property)
            .register(&mut api)
            .unwrap_err();

        assert!(matches!(err, RegistrationError::IncompleteAccessors { .. }));
        assert!(api.calls.is_empty());
    }
}
