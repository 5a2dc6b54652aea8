//! Doc-comment markers.
//!
//! Markers are ordinary `///` lines:
//!
//! ```text
//! /// godot::register [tool] [as Alias]
//! /// godot::constructor(Class)
//! /// godot::destructor(Class)
//! /// godot::export [as alias]
//! ```
//!
//! Matching is case-insensitive on the marker itself; aliases and class
//! names keep their case.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

use gdnative_core::{ScanError, ScanResult};

use crate::config::ScanConfig;

/// Trimmed text of every `#[doc = "..."]` attribute.
pub(crate) fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) if nv.path.is_ident("doc") => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// If `line` starts with `marker`, the text after it.
///
/// The marker must end at a word boundary: `godot::registered` is not the
/// register marker.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line.get(..marker.len())?;
    if !head.eq_ignore_ascii_case(marker) {
        return None;
    }
    let rest = &line[marker.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(ch) if ch.is_whitespace() || ch == '(' => Some(rest),
        Some(_) => None,
    }
}

/// Parse the words after a marker: an optional `tool` flag and an optional
/// `as <Alias>`.
fn parse_words(marker: &str, line: &str, rest: &str) -> ScanResult<(bool, Option<String>)> {
    let mut tool = false;
    let mut alias = None;
    let mut words = rest.split_whitespace();
    while let Some(word) = words.next() {
        if word.eq_ignore_ascii_case("as") {
            let name = words.next().ok_or_else(|| ScanError::MalformedMarker {
                marker: marker.to_string(),
                line: line.to_string(),
                reason: "missing name after 'as'".to_string(),
            })?;
            alias = Some(name.to_string());
            break;
        } else if word.eq_ignore_ascii_case("tool") {
            tool = true;
        }
    }
    Ok((tool, alias))
}

/// A parsed `godot::register` marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct RegisterMarker {
    pub alias: Option<String>,
    pub tool: bool,
}

pub(crate) fn register_marker(
    lines: &[String],
    config: &ScanConfig,
) -> ScanResult<Option<RegisterMarker>> {
    let marker = config.marker("register");
    for line in lines {
        if let Some(rest) = strip_marker(line, &marker) {
            let (tool, alias) = parse_words(&marker, line, rest)?;
            return Ok(Some(RegisterMarker { alias, tool }));
        }
    }
    Ok(None)
}

/// A parsed `godot::export` marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ExportMarker {
    pub alias: Option<String>,
}

pub(crate) fn export_marker(
    lines: &[String],
    config: &ScanConfig,
) -> ScanResult<Option<ExportMarker>> {
    let marker = config.marker("export");
    for line in lines {
        if let Some(rest) = strip_marker(line, &marker) {
            let (_, alias) = parse_words(&marker, line, rest)?;
            return Ok(Some(ExportMarker { alias }));
        }
    }
    Ok(None)
}

/// Classes named by `godot::<kind>(Class)` markers, e.g. `kind` =
/// `constructor`.
pub(crate) fn lifecycle_targets(
    lines: &[String],
    config: &ScanConfig,
    kind: &str,
) -> ScanResult<Vec<String>> {
    let marker = config.marker(kind);
    let mut targets = Vec::new();
    for line in lines {
        let Some(rest) = strip_marker(line, &marker) else {
            continue;
        };
        let malformed = |reason: &str| ScanError::MalformedMarker {
            marker: marker.clone(),
            line: line.clone(),
            reason: reason.to_string(),
        };

        let rest = rest.trim();
        let inner = rest
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| malformed("expected the class name in parenthesis"))?;
        if inner.contains('(') || inner.contains(')') {
            return Err(malformed("many parenthesis"));
        }
        let class = inner.trim();
        if class.is_empty() {
            return Err(malformed("missing class name"));
        }
        targets.push(class.to_string());
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_doc_attributes() {
        let item: syn::ItemStruct = syn::parse_quote! {
            /// First line.
            ///   godot::register as PLAYER
            #[derive(Debug)]
            struct Player;
        };
        assert_eq!(doc_lines(&item.attrs), vec!["First line.", "godot::register as PLAYER"]);
    }

    #[test]
    fn register_markers() {
        let config = ScanConfig::default();
        assert_eq!(register_marker(&lines(&["nothing here"]), &config).unwrap(), None);
        assert_eq!(
            register_marker(&lines(&["godot::register"]), &config).unwrap(),
            Some(RegisterMarker::default())
        );
        assert_eq!(
            register_marker(&lines(&["Godot::Register as PLAYER"]), &config).unwrap(),
            Some(RegisterMarker {
                alias: Some("PLAYER".to_string()),
                tool: false,
            })
        );
        assert_eq!(
            register_marker(&lines(&["godot::register tool as Gizmo extra words"]), &config)
                .unwrap(),
            Some(RegisterMarker {
                alias: Some("Gizmo".to_string()),
                tool: true,
            })
        );
        assert_eq!(register_marker(&lines(&["godot::registered"]), &config).unwrap(), None);
    }

    #[test]
    fn alias_needs_a_name() {
        let err = register_marker(&lines(&["godot::register as"]), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::MalformedMarker { .. }));
    }

    #[test]
    fn export_markers() {
        let config = ScanConfig::default();
        assert_eq!(
            export_marker(&lines(&["godot::export as health"]), &config).unwrap(),
            Some(ExportMarker {
                alias: Some("health".to_string())
            })
        );
        assert_eq!(
            export_marker(&lines(&["godot::export"]), &config).unwrap(),
            Some(ExportMarker::default())
        );
        assert_eq!(export_marker(&lines(&["exported"]), &config).unwrap(), None);
    }

    #[test]
    fn lifecycle_markers() {
        let config = ScanConfig::default();
        assert_eq!(
            lifecycle_targets(&lines(&["godot::constructor(Player)"]), &config, "constructor")
                .unwrap(),
            vec!["Player"]
        );
        assert_eq!(
            lifecycle_targets(&lines(&["godot::constructor( Player )"]), &config, "constructor")
                .unwrap(),
            vec!["Player"]
        );
        assert!(
            lifecycle_targets(&lines(&["godot::destructor"]), &config, "constructor")
                .unwrap()
                .is_empty()
        );

        for bad in [
            "godot::constructor",
            "godot::constructor Player",
            "godot::constructor((Player))",
            "godot::constructor()",
        ] {
            assert!(matches!(
                lifecycle_targets(&lines(&[bad]), &config, "constructor"),
                Err(ScanError::MalformedMarker { .. })
            ));
        }
    }
}
