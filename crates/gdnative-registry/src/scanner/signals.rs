//! Signal discovery.
//!
//! A signal belongs to a class when a signal struct literal initialises a
//! field of a struct literal of that class:
//!
//! ```text
//! Player {
//!     hit: gdnative::Signal {
//!         name: "hit".into(),
//!         args: vec![..],
//!         default_args: vec![..],
//!     },
//!     ..
//! }
//! ```
//!
//! Only literal shapes are understood. Anything else is logged and skipped.

use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{Expr, ExprStruct, ItemImpl, Lit, Member, Path, Token};
use tracing::warn;

use crate::config::ScanConfig;
use crate::entries::SignalEntry;

use super::decls::impl_owner;

/// Find every signal bound to `class` in a unit.
pub(crate) fn find_signals(file: &syn::File, class: &str, config: &ScanConfig) -> Vec<SignalEntry> {
    let mut visitor = SignalVisitor {
        class,
        config,
        owner: None,
        signals: Vec::new(),
    };
    visitor.visit_file(file);
    visitor.signals
}

struct SignalVisitor<'a> {
    class: &'a str,
    config: &'a ScanConfig,
    /// Self type of the `impl` being visited.
    owner: Option<String>,
    signals: Vec<SignalEntry>,
}

impl SignalVisitor<'_> {
    fn is_class_literal(&self, path: &Path) -> bool {
        let Some(last) = path.segments.last() else {
            return false;
        };
        if last.ident == self.class {
            return true;
        }
        path.is_ident("Self") && self.owner.as_deref() == Some(self.class)
    }

    fn is_signal_literal(&self, path: &Path) -> bool {
        let Some(last) = path.segments.last() else {
            return false;
        };
        if last.ident != self.config.signal_type.as_str() {
            return false;
        }
        match path.segments.first() {
            Some(first) if path.segments.len() > 1 => {
                first.ident == self.config.binding_namespace.as_str()
            }
            _ => true,
        }
    }

    fn read_signal(&self, field: &str, literal: &ExprStruct) -> Option<SignalEntry> {
        let mut name = None;
        let mut args = None;
        let mut default_args = None;

        for value in &literal.fields {
            let Member::Named(key) = &value.member else {
                continue;
            };
            if key == "name" {
                name = string_literal(&value.expr);
            } else if key == "args" {
                args = Some(list_elements(&value.expr));
            } else if key == "default_args" {
                default_args = Some(list_elements(&value.expr));
            }
        }

        let Some(name) = name else {
            warn!(
                class = self.class,
                field, "signal has no literal name, it will be ignored"
            );
            return None;
        };

        let mut signal = SignalEntry::new(name, field);
        signal.args = self.literal_list(&signal.name, "arguments", args);
        signal.default_args = self.literal_list(&signal.name, "default arguments", default_args);
        Some(signal)
    }

    fn literal_list(
        &self,
        signal: &str,
        what: &str,
        list: Option<Option<Vec<String>>>,
    ) -> Vec<String> {
        match list {
            Some(Some(elements)) => elements,
            Some(None) => {
                warn!(
                    class = self.class,
                    signal,
                    "{} on signal are not a literal list, they will be ignored",
                    what
                );
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

impl<'ast> Visit<'ast> for SignalVisitor<'_> {
    fn visit_item_impl(&mut self, item: &'ast ItemImpl) {
        let previous = std::mem::replace(&mut self.owner, impl_owner(item));
        visit::visit_item_impl(self, item);
        self.owner = previous;
    }

    fn visit_expr_struct(&mut self, expr: &'ast ExprStruct) {
        if self.is_class_literal(&expr.path) {
            for value in &expr.fields {
                let (Member::Named(field), Expr::Struct(literal)) = (&value.member, &value.expr)
                else {
                    continue;
                };
                if !self.is_signal_literal(&literal.path) {
                    continue;
                }
                if let Some(signal) = self.read_signal(&field.to_string(), literal) {
                    self.signals.push(signal);
                }
            }
        }
        visit::visit_expr_struct(self, expr);
    }
}

/// A string literal, possibly behind `.into()`, `.to_string()`,
/// `.to_owned()` or `String::from`.
fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(text) => Some(text.value()),
            _ => None,
        },
        Expr::MethodCall(call)
            if call.args.is_empty()
                && ["into", "to_string", "to_owned"].iter().any(|m| call.method == m) =>
        {
            string_literal(&call.receiver)
        }
        Expr::Call(call) if call.args.len() == 1 => match call.func.as_ref() {
            Expr::Path(func)
                if func
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == "from") =>
            {
                call.args.first().and_then(string_literal)
            }
            _ => None,
        },
        Expr::Paren(paren) => string_literal(&paren.expr),
        Expr::Group(group) => string_literal(&group.expr),
        Expr::Reference(reference) => string_literal(&reference.expr),
        _ => None,
    }
}

/// Elements of a literal list (`[..]`, `&[..]`, `vec![..]`, `[..].to_vec()`)
/// as source text.
fn list_elements(expr: &Expr) -> Option<Vec<String>> {
    match expr {
        Expr::Array(array) => Some(
            array
                .elems
                .iter()
                .map(|elem| elem.to_token_stream().to_string())
                .collect(),
        ),
        Expr::Reference(reference) => list_elements(&reference.expr),
        Expr::Paren(paren) => list_elements(&paren.expr),
        Expr::Group(group) => list_elements(&group.expr),
        Expr::MethodCall(call)
            if call.args.is_empty()
                && ["to_vec", "into", "to_owned"].iter().any(|m| call.method == m) =>
        {
            list_elements(&call.receiver)
        }
        Expr::Macro(mac) if mac.mac.path.is_ident("vec") => {
            let elems = mac
                .mac
                .parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
                .ok()?;
            Some(
                elems
                    .iter()
                    .map(|elem| elem.to_token_stream().to_string())
                    .collect(),
            )
        }
        _ => None,
    }
}
