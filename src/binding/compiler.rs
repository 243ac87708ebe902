//! The binding compiler: declarative map in, handler store out.
//!
//! Iterates the binding map, normalizes shorthand entries, resolves each
//! declaration's type — named types through the registry, ad-hoc functions
//! directly — and registers the compiled handler(s) under the entry's key.
//! Everything that can fail does so here, before any DOM mutation.

use tracing::debug;

use crate::binding::declaration::{Bindings, BindingType, Declaration, Entry};
use crate::binding::handlers::{self, Handler};
use crate::binding::registry::{self, TypeRegistry};
use crate::binding::store::HandlerStore;
use crate::error::CompileError;

/// Compile a binding map against the default registry.
pub fn compile(bindings: &Bindings) -> Result<HandlerStore, CompileError> {
    registry::with_registry(|registry| compile_with(registry, bindings))
}

/// Compile a binding map against a caller-owned registry.
pub fn compile_with(
    registry: &TypeRegistry,
    bindings: &Bindings,
) -> Result<HandlerStore, CompileError> {
    let mut store = HandlerStore::new();

    for (key, entry) in bindings.iter() {
        match entry {
            Entry::Shorthand(selector) => {
                let decl = Declaration::new("text").selector(selector.clone());
                store.add(key, instantiate(registry, &decl)?);
            }
            Entry::Single(decl) => {
                store.add(key, instantiate(registry, decl)?);
            }
            Entry::Multiple(decls) => {
                for decl in decls {
                    store.add(key, instantiate(registry, decl)?);
                }
            }
        }
    }

    debug!(keys = bindings.len(), handlers = store.len(), "compiled binding map");
    Ok(store)
}

fn instantiate(registry: &TypeRegistry, decl: &Declaration) -> Result<Handler, CompileError> {
    let target = decl.target.compile()?;
    match &decl.binding_type {
        BindingType::Custom(f) => Ok(handlers::custom(f.clone(), decl, target)),
        BindingType::Named(name) => registry
            .get(name)
            .ok_or_else(|| CompileError::UnknownType {
                type_name: name.clone(),
            })?
            .build(decl, target),
    }
}
