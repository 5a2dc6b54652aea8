//! Field tag parsing.
//!
//! Property metadata lives in an inert field attribute:
//!
//! ```text
//! #[godot(hint = "range", hint_string = "0,100", usage = "default", rset_type = "remote")]
//! #[godot(get = "hp", set = "set_hp")]
//! #[godot(-)]   // also `_`, `omit` and `skip`: never a property
//! ```

use syn::{Attribute, LitStr, Meta};

use gdnative_core::{PropertyHint, PropertyUsage, RpcMode, ScanError, ScanResult};

use crate::entries::PropertyEntry;

/// Tag keys understood on fields.
pub(crate) const TAG_KEYS: &[&str] = &["hint", "hint_string", "usage", "rset_type", "get", "set"];

/// Tag bodies that exclude a field from registration.
const IGNORE_SENTINELS: &[&str] = &["-", "_", "omit", "skip"];

/// Parsed `#[godot(...)]` tags on a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldTags {
    pub ignore: bool,
    pub hint: Option<String>,
    pub hint_string: Option<String>,
    pub usage: Option<String>,
    pub rset_type: Option<String>,
    pub get: Option<String>,
    pub set: Option<String>,
}

impl FieldTags {
    /// Parse every tag attribute named `attribute` on a field.
    pub(crate) fn from_attrs(
        attrs: &[Attribute],
        attribute: &str,
        class: &str,
        field: &str,
    ) -> ScanResult<Self> {
        let mut result = Self::default();
        let invalid = |message: String| ScanError::InvalidTag {
            class: class.to_string(),
            field: field.to_string(),
            message,
        };

        for attr in attrs {
            if !attr.path().is_ident(attribute) {
                continue;
            }

            let list = match &attr.meta {
                Meta::List(list) => list,
                Meta::Path(_) => continue,
                Meta::NameValue(_) => {
                    return Err(invalid(format!("expected #[{}(...)]", attribute)));
                }
            };

            let body = list.tokens.to_string();
            if IGNORE_SENTINELS.contains(&body.trim()) {
                result.ignore = true;
                continue;
            }

            let mut unknown_key = None;
            let parsed = list.parse_nested_meta(|meta| {
                let key = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.to_string())
                    .unwrap_or_default();
                let slot = match key.as_str() {
                    "hint" => &mut result.hint,
                    "hint_string" => &mut result.hint_string,
                    "usage" => &mut result.usage,
                    "rset_type" => &mut result.rset_type,
                    "get" => &mut result.get,
                    "set" => &mut result.set,
                    _ => {
                        let error = meta.error("unknown tag key");
                        unknown_key = Some(key);
                        return Err(error);
                    }
                };
                let value: LitStr = meta.value()?.parse()?;
                *slot = Some(value.value());
                Ok(())
            });

            if let Err(err) = parsed {
                return Err(match unknown_key {
                    Some(key) => ScanError::UnknownTagKey {
                        class: class.to_string(),
                        field: field.to_string(),
                        key,
                        allowed: TAG_KEYS.iter().map(|k| k.to_string()).collect(),
                    },
                    None => invalid(err.to_string()),
                });
            }
        }

        Ok(result)
    }

    /// Validate the tag values and copy them onto `property`.
    pub(crate) fn apply(self, property: &mut PropertyEntry) -> ScanResult<()> {
        let unknown = |tag: &'static str, value: &str, allowed: Vec<String>| {
            ScanError::UnknownTagValue {
                class: property.class.clone(),
                field: property.name.clone(),
                tag,
                value: value.to_string(),
                allowed,
            }
        };

        let hint = match self.hint.as_deref() {
            Some(value) => PropertyHint::from_tag(value)
                .ok_or_else(|| unknown("hint", value, PropertyHint::tag_names()))?,
            None => PropertyHint::default(),
        };
        let usage = match self.usage.as_deref() {
            Some(value) => PropertyUsage::from_tag(value)
                .ok_or_else(|| unknown("usage", value, PropertyUsage::tag_names()))?,
            None => PropertyUsage::default(),
        };
        let rset = match self.rset_type.as_deref() {
            Some(value) => RpcMode::from_tag(value)
                .ok_or_else(|| unknown("rset_type", value, RpcMode::tag_names()))?,
            None => RpcMode::default(),
        };

        property.hint = hint;
        property.usage = usage;
        property.rset = rset;
        property.hint_string = self.hint_string.unwrap_or_default();
        property.getter = self.get;
        property.setter = self.set;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdnative_core::Kind;

    fn tags(field: syn::Field) -> ScanResult<FieldTags> {
        FieldTags::from_attrs(&field.attrs, "godot", "Player", "hp")
    }

    fn field(tokens: proc_macro2::TokenStream) -> syn::Field {
        syn::parse::Parser::parse2(syn::Field::parse_named, tokens).unwrap()
    }

    #[test]
    fn parses_known_keys() {
        let parsed = tags(field(quote::quote! {
            #[godot(hint = "range", hint_string = "0,100", usage = "Default")]
            pub hp: i64
        }))
        .unwrap();
        assert_eq!(parsed.hint.as_deref(), Some("range"));
        assert_eq!(parsed.hint_string.as_deref(), Some("0,100"));
        assert_eq!(parsed.usage.as_deref(), Some("Default"));
        assert!(!parsed.ignore);
    }

    #[test]
    fn ignore_sentinels() {
        for sentinel in [
            quote::quote!(-),
            quote::quote!(_),
            quote::quote!(omit),
            quote::quote!(skip),
        ] {
            let parsed = tags(field(quote::quote! {
                #[godot(#sentinel)]
                pub hp: i64
            }))
            .unwrap();
            assert!(parsed.ignore);
        }
    }

    #[test]
    fn other_attributes_are_ignored() {
        let parsed = tags(field(quote::quote! {
            #[serde(rename = "x")]
            #[godot]
            pub hp: i64
        }))
        .unwrap();
        assert_eq!(parsed, FieldTags::default());
    }

    #[test]
    fn unknown_key_lists_alternatives() {
        let err = tags(field(quote::quote! {
            #[godot(colour = "red")]
            pub hp: i64
        }))
        .unwrap_err();
        match err {
            ScanError::UnknownTagKey { key, allowed, .. } => {
                assert_eq!(key, "colour");
                assert!(allowed.contains(&"hint_string".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_string_value_is_invalid() {
        let err = tags(field(quote::quote! {
            #[godot(hint = 3)]
            pub hp: i64
        }))
        .unwrap_err();
        assert!(matches!(err, ScanError::InvalidTag { .. }));
    }

    #[test]
    fn apply_validates_values() {
        let mut property = PropertyEntry::new("Player", "hp", Kind::named("i64"));
        FieldTags {
            hint: Some("range".to_string()),
            usage: Some("default".to_string()),
            rset_type: Some("remote".to_string()),
            get: Some("hp".to_string()),
            set: Some("set_hp".to_string()),
            ..FieldTags::default()
        }
        .apply(&mut property)
        .unwrap();
        assert_eq!(property.hint, PropertyHint::Range);
        assert_eq!(property.usage, PropertyUsage::DEFAULT);
        assert_eq!(property.rset, RpcMode::Remote);
        assert_eq!(property.getter.as_deref(), Some("hp"));

        let err = FieldTags {
            hint: Some("sideways".to_string()),
            ..FieldTags::default()
        }
        .apply(&mut property)
        .unwrap_err();
        match err {
            ScanError::UnknownTagValue { tag, value, allowed, .. } => {
                assert_eq!(tag, "hint");
                assert_eq!(value, "sideways");
                assert!(allowed.contains(&"range".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
