//! Constructor and destructor shape validation.
//!
//! A constructor takes nothing and returns exactly one pointer to its class.
//! A destructor takes nothing and returns nothing. Neither may have a
//! receiver. `Self` resolves to the implementing type when the function
//! lives in an `impl` block.

use syn::{Signature, Type};

use gdnative_core::{Kind, ScanError, ScanResult};

use super::decls::return_types;
use super::resolve::resolve_kind_or;
use crate::entries::{ConstructorEntry, DestructorEntry};

fn resolve_return(ty: &Type, owner: Option<&str>) -> Kind {
    let mut kind = resolve_kind_or(ty, Kind::variant());
    if let Some(owner) = owner {
        kind.replace_self(owner);
    }
    kind
}

/// Validate a function marked as constructor of `class`.
///
/// `owner` is the self type of the enclosing `impl`, if any.
pub(crate) fn validate_constructor(
    class: &str,
    sig: &Signature,
    owner: Option<&str>,
) -> ScanResult<ConstructorEntry> {
    let function = sig.ident.to_string();
    let invalid = |reason: String| ScanError::InvalidConstructor {
        class: class.to_string(),
        function: function.clone(),
        reason,
    };

    if sig.receiver().is_some() {
        return Err(invalid(format!(
            "{} is a method of {}, it can not be used as constructor",
            function,
            owner.unwrap_or("an unknown type")
        )));
    }

    if !sig.inputs.is_empty() {
        return Err(invalid(format!(
            "constructors of {} take no params but {} takes {}",
            class,
            function,
            sig.inputs.len()
        )));
    }

    let returns = return_types(&sig.output);
    let ty = match returns.as_slice() {
        [] => {
            return Err(invalid(format!(
                "constructors of {} have to return a pointer to {} but {} returns nothing",
                class, class, function
            )));
        }
        [ty] => *ty,
        many => {
            return Err(invalid(format!(
                "constructors of {} must return exactly one value but {} returns {}",
                class,
                function,
                many.len()
            )));
        }
    };

    let kind = resolve_return(ty, owner);
    if kind.is_pointer_to(class) {
        return Ok(ConstructorEntry::new(class, function.clone(), kind));
    }

    let reason = match kind.pointee() {
        Some(pointee) => format!(
            "constructors of {} must return a pointer to {} but {} returns a pointer to {} instead",
            class, class, function, pointee
        ),
        None => format!(
            "constructors of {} must return a pointer to {} but {} returns {}",
            class, class, function, kind
        ),
    };
    Err(invalid(reason))
}

/// Validate a function marked as destructor of `class`.
pub(crate) fn validate_destructor(
    class: &str,
    sig: &Signature,
    owner: Option<&str>,
) -> ScanResult<DestructorEntry> {
    let function = sig.ident.to_string();
    let invalid = |reason: String| ScanError::InvalidDestructor {
        class: class.to_string(),
        function: function.clone(),
        reason,
    };

    if sig.receiver().is_some() {
        return Err(invalid(format!(
            "{} is a method of {}, it can not be used as destructor",
            function,
            owner.unwrap_or("an unknown type")
        )));
    }

    if !sig.inputs.is_empty() {
        return Err(invalid(format!(
            "destructors of {} take no params but {} takes {}",
            class,
            function,
            sig.inputs.len()
        )));
    }

    let returns = return_types(&sig.output);
    if !returns.is_empty() {
        let kinds: Vec<String> = returns
            .iter()
            .map(|ty| resolve_return(ty, owner).to_string())
            .collect();
        return Err(invalid(format!(
            "destructors of {} return nothing but {} returns {}",
            class,
            function,
            kinds.join(", ")
        )));
    }

    Ok(DestructorEntry::new(class, function.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(tokens: proc_macro2::TokenStream) -> Signature {
        syn::parse2(tokens).unwrap()
    }

    #[test]
    fn accepts_pointer_returns() {
        for signature in [
            quote::quote!(fn new() -> Box<Player>),
            quote::quote!(fn new() -> *mut Player),
            quote::quote!(fn new() -> &'static mut Player),
        ] {
            let entry = validate_constructor("Player", &sig(signature), None).unwrap();
            assert_eq!(entry.function, "new");
            assert!(entry.returns.is_pointer_to("Player"));
        }

        let entry =
            validate_constructor("Player", &sig(quote::quote!(fn new() -> Box<Self>)), Some("Player"))
                .unwrap();
        assert_eq!(entry.signature(), "fn new() -> *Player");
    }

    #[test]
    fn rejects_bad_constructors() {
        let cases = [
            (quote::quote!(fn new(&self) -> Box<Player>), "is a method of"),
            (quote::quote!(fn new(hp: i64) -> Box<Player>), "take no params"),
            (quote::quote!(fn new()), "returns nothing"),
            (quote::quote!(fn new() -> ()), "returns nothing"),
            (quote::quote!(fn new() -> (Box<Player>, i64)), "exactly one value"),
            (quote::quote!(fn new() -> Box<Enemy>), "a pointer to Enemy instead"),
            (quote::quote!(fn new() -> Player), "returns Player"),
        ];
        for (signature, expected) in cases {
            match validate_constructor("Player", &sig(signature), Some("Player")) {
                Err(ScanError::InvalidConstructor { reason, .. }) => {
                    assert!(reason.contains(expected), "{reason}")
                }
                other => panic!("expected invalid constructor, got {other:?}"),
            }
        }
    }

    #[test]
    fn self_in_another_impl_is_another_type() {
        let err = validate_constructor("Player", &sig(quote::quote!(fn new() -> Box<Self>)), Some("Enemy"))
            .unwrap_err();
        assert!(err.to_string().contains("a pointer to Enemy instead"));
    }

    #[test]
    fn destructors() {
        let entry = validate_destructor("Player", &sig(quote::quote!(fn free())), None).unwrap();
        assert_eq!(entry.signature(), "fn free()");
        assert!(validate_destructor("Player", &sig(quote::quote!(fn free() -> ())), None).is_ok());

        let cases = [
            (quote::quote!(fn free(&mut self)), "is a method of"),
            (quote::quote!(fn free(id: u64)), "take no params"),
            (quote::quote!(fn free() -> bool), "returns bool"),
        ];
        for (signature, expected) in cases {
            match validate_destructor("Player", &sig(signature), None) {
                Err(ScanError::InvalidDestructor { reason, .. }) => {
                    assert!(reason.contains(expected), "{reason}")
                }
                other => panic!("expected invalid destructor, got {other:?}"),
            }
        }
    }
}
