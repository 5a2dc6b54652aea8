//! Flattened view of the declarations in one unit.

use syn::{Attribute, Item, ItemImpl, ItemStruct, ReturnType, Signature, Type, Visibility};

/// A function declaration, free or inside an `impl`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FnDecl<'a> {
    pub attrs: &'a [Attribute],
    pub vis: &'a Visibility,
    pub sig: &'a Signature,
    /// Self type of the enclosing `impl`, if any.
    pub owner: Option<&'a Type>,
}

impl FnDecl<'_> {
    pub fn name(&self) -> String {
        self.sig.ident.to_string()
    }

    pub fn owner_name(&self) -> Option<String> {
        self.owner.and_then(type_name)
    }

    pub fn is_pub(&self) -> bool {
        matches!(self.vis, Visibility::Public(_))
    }
}

/// Structs and functions of a unit, inline modules included, in source
/// order.
#[derive(Debug)]
pub(crate) struct Unit<'a> {
    pub file: &'a syn::File,
    pub structs: Vec<&'a ItemStruct>,
    pub functions: Vec<FnDecl<'a>>,
}

impl<'a> Unit<'a> {
    pub fn collect(file: &'a syn::File) -> Self {
        let mut unit = Unit {
            file,
            structs: Vec::new(),
            functions: Vec::new(),
        };
        unit.collect_items(&file.items);
        unit
    }

    fn collect_items(&mut self, items: &'a [Item]) {
        for item in items {
            match item {
                Item::Struct(item) => self.structs.push(item),
                Item::Fn(item) => self.functions.push(FnDecl {
                    attrs: &item.attrs,
                    vis: &item.vis,
                    sig: &item.sig,
                    owner: None,
                }),
                Item::Impl(item) => {
                    for impl_item in &item.items {
                        if let syn::ImplItem::Fn(method) = impl_item {
                            self.functions.push(FnDecl {
                                attrs: &method.attrs,
                                vis: &method.vis,
                                sig: &method.sig,
                                owner: Some(&item.self_ty),
                            });
                        }
                    }
                }
                Item::Mod(module) => {
                    if let Some((_, items)) = &module.content {
                        self.collect_items(items);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Last path segment of a type (`Player` for `crate::Player`).
pub(crate) fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        Type::Paren(paren) => type_name(&paren.elem),
        Type::Group(group) => type_name(&group.elem),
        _ => None,
    }
}

/// Name of the self type of an `impl` block.
pub(crate) fn impl_owner(item: &ItemImpl) -> Option<String> {
    type_name(&item.self_ty)
}

/// Return types of a function, with `()` counting as none and tuples spread
/// out.
pub(crate) fn return_types(output: &ReturnType) -> Vec<&Type> {
    match output {
        ReturnType::Default => Vec::new(),
        ReturnType::Type(_, ty) => spread(ty),
    }
}

fn spread(ty: &Type) -> Vec<&Type> {
    match ty {
        Type::Tuple(tuple) => tuple.elems.iter().collect(),
        Type::Paren(paren) => spread(&paren.elem),
        Type::Group(group) => spread(&group.elem),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_impls_and_modules() {
        let file = syn::parse_file(
            r#"
            pub struct Player;
            fn free() {}
            impl Player { pub fn hp(&self) -> i64 { 0 } }
            impl Trait for crate::Player { fn ready(&mut self) {} }
            mod inner {
                struct Hidden;
                fn nested() {}
            }
            mod external;
            "#,
        )
        .unwrap();
        let unit = Unit::collect(&file);

        let structs: Vec<String> = unit.structs.iter().map(|s| s.ident.to_string()).collect();
        assert_eq!(structs, vec!["Player", "Hidden"]);

        let functions: Vec<(String, Option<String>)> = unit
            .functions
            .iter()
            .map(|f| (f.name(), f.owner_name()))
            .collect();
        assert_eq!(
            functions,
            vec![
                ("free".to_string(), None),
                ("hp".to_string(), Some("Player".to_string())),
                ("ready".to_string(), Some("Player".to_string())),
                ("nested".to_string(), None),
            ]
        );
        assert!(unit.functions[1].is_pub());
        assert!(!unit.functions[2].is_pub());
    }

    #[test]
    fn return_types_spread_tuples() {
        let count = |src: &str| {
            let sig: Signature = syn::parse_str(src).unwrap();
            return_types(&sig.output).len()
        };
        assert_eq!(count("fn a()"), 0);
        assert_eq!(count("fn b() -> ()"), 0);
        assert_eq!(count("fn c() -> i64"), 1);
        assert_eq!(count("fn d() -> (f32, f32)"), 2);
        assert_eq!(count("fn e() -> ((f32, f32, f32))"), 3);
        assert_eq!(count("fn f() -> (Box<Player>)"), 1);
    }
}
