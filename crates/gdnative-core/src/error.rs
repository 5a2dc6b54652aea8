//! Unified error types for the registrar.
//!
//! ## Error Hierarchy
//!
//! ```text
//! GdnativeError (top-level wrapper)
//! ├── ScanError          - authoring errors found while extracting the registry
//! ├── KindParseError     - malformed canonical kind strings
//! └── RegistrationError  - errors raised while registering with the runtime
//! ```
//!
//! Scan errors are fatal: they describe a defect in the scanned source that
//! must be fixed before generation can run again. Best-effort skips (fields
//! without a resolvable type, signal literals with unexpected shapes) are not
//! errors; they are reported through `tracing` and scanning continues.

use thiserror::Error;

// ============================================================================
// Scan Errors
// ============================================================================

/// Authoring errors that abort registry extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// The source text could not be parsed.
    #[error("could not parse {origin}: {message}")]
    Parse {
        /// File name or other description of the source.
        origin: String,
        /// Parser message.
        message: String,
    },

    /// A source file could not be read.
    #[error("could not read {path}: {message}")]
    Io {
        /// Path of the file or directory.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// A doc marker is present but its syntax is wrong.
    #[error("could not parse {marker} comment '{line}': {reason}")]
    MalformedMarker {
        /// The marker that was recognised (e.g. `godot::constructor`).
        marker: String,
        /// The offending doc line.
        line: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A function marked as constructor does not have a valid shape.
    #[error("could not validate constructor {function} of {class}: {reason}")]
    InvalidConstructor {
        /// Owning class.
        class: String,
        /// Function carrying the marker.
        function: String,
        /// Which rule was violated.
        reason: String,
    },

    /// A function marked as destructor does not have a valid shape.
    #[error("could not validate destructor {function} of {class}: {reason}")]
    InvalidDestructor {
        /// Owning class.
        class: String,
        /// Function carrying the marker.
        function: String,
        /// Which rule was violated.
        reason: String,
    },

    /// More than one constructor names the same class.
    #[error("class {class} has two constructors: {first} and {second}")]
    DuplicateConstructor {
        class: String,
        first: String,
        second: String,
    },

    /// More than one destructor names the same class.
    #[error("class {class} has two destructors: {first} and {second}")]
    DuplicateDestructor {
        class: String,
        first: String,
        second: String,
    },

    /// Two structs carry the register marker under the same name.
    #[error("class {0} is registered more than once")]
    DuplicateClass(String),

    /// A user function uses the name reserved for the generated init hook.
    #[error(
        "{function} function present on files, you can not provide your own {function} function while autoregistering classes"
    )]
    ReservedName {
        /// The reserved name that was taken.
        function: String,
    },

    /// A field tag uses a key that is not understood.
    #[error("on property {field} of {class}: unknown tag key {key}, it must be one of: {}", allowed.join(", "))]
    UnknownTagKey {
        class: String,
        field: String,
        key: String,
        allowed: Vec<String>,
    },

    /// A field tag value is not a member of its enumeration.
    #[error("on property {field} of {class}: unknown {tag} {value}, it must be one of: {}", allowed.join(", "))]
    UnknownTagValue {
        class: String,
        field: String,
        /// Tag key (`hint`, `usage` or `rset_type`).
        tag: &'static str,
        value: String,
        allowed: Vec<String>,
    },

    /// A field tag could not be parsed at all.
    #[error("on property {field} of {class}: {message}")]
    InvalidTag {
        class: String,
        field: String,
        message: String,
    },
}

impl ScanError {
    /// Build a parse error from a `syn`-style message.
    pub fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        ScanError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    /// Build an I/O error for the given path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// The class this error refers to, when there is one.
    pub fn class(&self) -> Option<&str> {
        match self {
            ScanError::InvalidConstructor { class, .. }
            | ScanError::InvalidDestructor { class, .. }
            | ScanError::DuplicateConstructor { class, .. }
            | ScanError::DuplicateDestructor { class, .. }
            | ScanError::UnknownTagKey { class, .. }
            | ScanError::UnknownTagValue { class, .. }
            | ScanError::InvalidTag { class, .. } => Some(class),
            ScanError::DuplicateClass(class) => Some(class),
            ScanError::Parse { .. }
            | ScanError::Io { .. }
            | ScanError::MalformedMarker { .. }
            | ScanError::ReservedName { .. } => None,
        }
    }
}

// ============================================================================
// Kind Errors
// ============================================================================

/// Errors produced when parsing a canonical kind string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindParseError {
    #[error("empty kind")]
    Empty,

    #[error("unbalanced brackets in kind '{0}'")]
    UnbalancedBrackets(String),

    #[error("unexpected trailing text in kind '{0}'")]
    TrailingText(String),
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while registering classes with the runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A property hint name is not known.
    #[error("unknown property hint {value:?}, allowed types: {}", allowed.join(", "))]
    UnknownHint { value: String, allowed: Vec<String> },

    /// A property usage name is not known.
    #[error("unknown property usage {value:?}, allowed types: {}", allowed.join(", "))]
    UnknownUsage { value: String, allowed: Vec<String> },

    /// An RPC mode name is not known.
    #[error("unknown rset {value:?}, allowed types: {}", allowed.join(", "))]
    UnknownRpcMode { value: String, allowed: Vec<String> },

    /// Only one of the custom getter/setter pair was supplied.
    #[error(
        "property {class}.{property}: you can not register a property that does not define both setter and getter functions"
    )]
    IncompleteAccessors { class: String, property: String },
}

// ============================================================================
// Top-level
// ============================================================================

/// Any error produced by the registrar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GdnativeError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Kind(#[from] KindParseError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Convenience result alias for scanning.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_name_message() {
        let err = ScanError::ReservedName {
            function: "godot_nativescript_init".to_string(),
        };
        assert!(err.to_string().starts_with("godot_nativescript_init function present"));
        assert_eq!(err.class(), None);
    }

    #[test]
    fn unknown_tag_value_lists_alternatives() {
        let err = ScanError::UnknownTagValue {
            class: "Player".to_string(),
            field: "hp".to_string(),
            tag: "hint",
            value: "sideways".to_string(),
            allowed: vec!["none".to_string(), "range".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("unknown hint sideways"));
        assert!(message.ends_with("none, range"));
        assert_eq!(err.class(), Some("Player"));
    }

    #[test]
    fn wraps_into_top_level() {
        let err: GdnativeError = KindParseError::Empty.into();
        assert!(matches!(err, GdnativeError::Kind(KindParseError::Empty)));
        assert_eq!(err.to_string(), "empty kind");
    }
}
