//! Type-kind resolution.
//!
//! Maps a `syn::Type` to its canonical [`Kind`]. Pure and stateless: the
//! same type always resolves to the same kind.

use syn::{GenericArgument, Path, PathArguments, Type};

use gdnative_core::Kind;

/// Containers that resolve to an array kind.
const ARRAY_CONTAINERS: &[&str] = &["Vec", "VecDeque"];

/// Containers that resolve to a map kind.
const MAP_CONTAINERS: &[&str] = &["HashMap", "BTreeMap", "FxHashMap", "IndexMap"];

/// Resolve a type, or `None` for shapes that have no kind.
pub fn resolve_kind(ty: &Type) -> Option<Kind> {
    match ty {
        Type::Path(path) if path.qself.is_none() => resolve_path(&path.path),
        Type::Ptr(ptr) => Some(Kind::pointer(pointee(&ptr.elem))),
        Type::Reference(reference) => Some(Kind::pointer(pointee(&reference.elem))),
        Type::Paren(paren) => resolve_kind(&paren.elem),
        Type::Group(group) => resolve_kind(&group.elem),
        Type::Slice(slice) => Some(Kind::array(pointee(&slice.elem))),
        Type::Array(array) => Some(Kind::array(pointee(&array.elem))),
        _ => None,
    }
}

/// Resolve a type, falling back to `default`.
pub fn resolve_kind_or(ty: &Type, default: Kind) -> Kind {
    resolve_kind(ty).unwrap_or(default)
}

/// Inner kinds that cannot be resolved become the generic pointer.
fn pointee(ty: &Type) -> Kind {
    resolve_kind_or(ty, Kind::generic_pointer())
}

fn resolve_path(path: &Path) -> Option<Kind> {
    let last = path.segments.last()?;
    let qualifiers = path.segments.len() - 1;
    if path
        .segments
        .iter()
        .take(qualifiers)
        .any(|segment| !segment.arguments.is_none())
    {
        return None;
    }

    match &last.arguments {
        PathArguments::None => {
            let mut segments = path.segments.iter().map(|segment| segment.ident.to_string());
            let first = Kind::Named(segments.next()?);
            Some(segments.fold(first, Kind::qualified))
        }
        PathArguments::AngleBracketed(generics) => {
            let args: Vec<&Type> = generics
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(ty),
                    _ => None,
                })
                .collect();

            let container = last.ident.to_string();
            match (container.as_str(), args.as_slice()) {
                ("Box", [inner]) => Some(Kind::pointer(pointee(inner))),
                (name, [element]) if ARRAY_CONTAINERS.contains(&name) => {
                    Some(Kind::array(pointee(element)))
                }
                (name, [key, value, ..]) if MAP_CONTAINERS.contains(&name) => {
                    Some(Kind::map(pointee(key), pointee(value)))
                }
                _ => None,
            }
        }
        PathArguments::Parenthesized(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(src: &str) -> Option<String> {
        let ty: Type = syn::parse_str(src).unwrap();
        resolve_kind(&ty).map(|kind| kind.to_string())
    }

    #[test]
    fn named_and_qualified() {
        assert_eq!(kind_of("i64").as_deref(), Some("i64"));
        assert_eq!(kind_of("Self").as_deref(), Some("Self"));
        assert_eq!(kind_of("godot::Node2D").as_deref(), Some("godot.Node2D"));
        assert_eq!(kind_of("a::b::C").as_deref(), Some("a.b.C"));
    }

    #[test]
    fn pointers() {
        assert_eq!(kind_of("*mut Player").as_deref(), Some("*Player"));
        assert_eq!(kind_of("&str").as_deref(), Some("*str"));
        assert_eq!(kind_of("&mut godot::Node").as_deref(), Some("*godot.Node"));
        assert_eq!(kind_of("Box<Self>").as_deref(), Some("*Self"));
        assert_eq!(kind_of("&dyn Fn()").as_deref(), Some("*gdnative.Pointer"));
        assert_eq!(kind_of("(&Player)").as_deref(), Some("*Player"));
    }

    #[test]
    fn nested_arrays() {
        assert_eq!(kind_of("Vec<Vec<f32>>").as_deref(), Some("ArrayType[ArrayType[f32]]"));
        assert_eq!(kind_of("[[f32; 2]]").as_deref(), Some("ArrayType[ArrayType[f32]]"));
        assert_eq!(
            kind_of("std::collections::VecDeque<u8>").as_deref(),
            Some("ArrayType[u8]")
        );
    }

    #[test]
    fn maps() {
        assert_eq!(
            kind_of("HashMap<String, Vec<i32>>").as_deref(),
            Some("MapType[String]ArrayType[i32]")
        );
        assert_eq!(
            kind_of("BTreeMap<i32, gdnative::Vector2>").as_deref(),
            Some("MapType[i32]gdnative.Vector2")
        );
    }

    #[test]
    fn unresolvable_shapes() {
        assert_eq!(kind_of("impl Iterator<Item = u8>"), None);
        assert_eq!(kind_of("(i32, i32)"), None);
        assert_eq!(kind_of("Option<i32>"), None);
        assert_eq!(kind_of("fn(i32) -> i32"), None);
        assert_eq!(kind_of("<T as Trait>::Output"), None);

        let ty: Type = syn::parse_str("Option<i32>").unwrap();
        assert_eq!(resolve_kind_or(&ty, Kind::variant()).to_string(), "gdnative.Variant");
    }

    #[test]
    fn pointer_kinds_are_stable() {
        let ty: Type = syn::parse_str("&mut Box<Player>").unwrap();
        let first = resolve_kind(&ty).unwrap();
        let second = resolve_kind(&ty).unwrap();
        assert_eq!(first.to_string(), "**Player");
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(first.to_string().parse::<Kind>().unwrap().to_string(), "**Player");
    }
}
