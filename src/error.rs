//! Compile-time error taxonomy.
//!
//! Every error here is raised while compiling a binding map, before any DOM
//! mutation happens. Dispatch itself has no error path: a custom handler that
//! panics propagates to the caller unmodified.

use crate::selector::ParseError;

/// Errors from compiling a binding declaration.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The declaration named a binding type the registry does not know.
    #[error("no such binding type: {type_name}")]
    UnknownType { type_name: String },

    /// A binding type that requires a `name` was declared without one.
    #[error("{binding_type} bindings must have a \"name\"")]
    MissingName { binding_type: &'static str },

    /// A switch-family binding was declared without `cases`.
    #[error("{binding_type} bindings must have \"cases\"")]
    MissingCases { binding_type: &'static str },

    /// A switch-family binding's case maps to something other than a selector.
    #[error("{binding_type} cases must map to selector strings")]
    BadCases { binding_type: &'static str },

    /// A selector string anywhere in the declaration failed to parse.
    #[error("invalid selector: {0}")]
    Selector(#[from] ParseError),
}
