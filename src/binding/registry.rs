//! The binding-type registry: builtin handler factories plus extensions.
//!
//! Two layers: an immutable builtin table and a mutable override map,
//! merged at read time with builtins always winning. Builtin names are
//! reserved — an `extend` that collides with one is silently inert — and
//! `reset` only clears the override layer, so builtin factory identity
//! (plain `fn` pointers) survives any number of resets.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::binding::declaration::Declaration;
use crate::binding::handlers::{self, Handler};
use crate::error::CompileError;
use crate::selector::Target;

/// Factory signature for builtin binding types.
pub type BuiltinFactory = fn(&Declaration, Target) -> Result<Handler, CompileError>;

/// Factory signature for user-registered binding types.
pub type FactoryFn = dyn Fn(&Declaration, Target) -> Result<Handler, CompileError>;

/// A handler factory held by the registry.
#[derive(Clone)]
pub enum Factory {
    /// One of the builtin factories. Plain `fn` pointer, so identity is
    /// comparable and stable across resets.
    Builtin(BuiltinFactory),
    /// A user-registered factory.
    Extension(Rc<FactoryFn>),
}

impl Factory {
    /// Wrap a closure as a user factory.
    pub fn extension(
        f: impl Fn(&Declaration, Target) -> Result<Handler, CompileError> + 'static,
    ) -> Self {
        Factory::Extension(Rc::new(f))
    }

    /// Instantiate a handler from a declaration and its compiled target.
    pub fn build(&self, decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
        match self {
            Factory::Builtin(f) => f(decl, target),
            Factory::Extension(f) => f(decl, target),
        }
    }

    /// Whether this factory is one of the builtins.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Factory::Builtin(_))
    }
}

impl PartialEq for Factory {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Factory::Builtin(a), Factory::Builtin(b)) => *a == *b,
            (Factory::Extension(a), Factory::Extension(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Builtin(_) => f.write_str("Builtin(..)"),
            Factory::Extension(_) => f.write_str("Extension(..)"),
        }
    }
}

/// The builtin factory table. These names are reserved.
const BUILTINS: &[(&str, BuiltinFactory)] = &[
    ("text", handlers::text),
    ("class", handlers::class),
    ("attribute", handlers::attribute),
    ("value", handlers::value),
    ("booleanClass", handlers::boolean_class),
    ("booleanAttribute", handlers::boolean_attribute),
    ("toggle", handlers::toggle),
    ("switch", handlers::switch),
    ("switchClass", handlers::switch_class),
    ("switchAttribute", handlers::switch_attribute),
    ("innerHTML", handlers::inner_html),
];

/// An extensible binding-type registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    overrides: BTreeMap<String, Factory>,
}

impl TypeRegistry {
    /// Create a registry holding exactly the builtin set.
    pub fn new() -> Self {
        Self::default()
    }

    fn builtin(name: &str) -> Option<BuiltinFactory> {
        BUILTINS
            .iter()
            .find(|(builtin_name, _)| *builtin_name == name)
            .map(|(_, factory)| *factory)
    }

    /// The reserved builtin type names.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|(name, _)| *name)
    }

    /// Look up a factory by type name. Builtins always win over overrides.
    pub fn get(&self, name: &str) -> Option<Factory> {
        Self::builtin(name)
            .map(Factory::Builtin)
            .or_else(|| self.overrides.get(name).cloned())
    }

    /// Whether `get` would return a factory.
    pub fn has_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Merge user factories into the override layer, left-to-right. Entries
    /// colliding with builtin names are accepted but never observable.
    pub fn extend(
        &mut self,
        overrides: impl IntoIterator<Item = (String, Factory)>,
    ) -> &mut Self {
        self.overrides.extend(overrides);
        self
    }

    /// Discard every override, restoring exactly the builtin set.
    pub fn reset(&mut self) -> &mut Self {
        self.overrides.clear();
        self
    }
}

thread_local! {
    /// The default registry backing [`compile`](crate::binding::compiler::compile)
    /// and the module-level registry functions. Dispatch is single-threaded
    /// and synchronous, so a thread-local is the whole story.
    static REGISTRY: RefCell<TypeRegistry> = RefCell::new(TypeRegistry::new());
}

/// Run a closure against the default registry.
pub fn with_registry<R>(f: impl FnOnce(&mut TypeRegistry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Look up a factory in the default registry.
pub fn get(name: &str) -> Option<Factory> {
    with_registry(|registry| registry.get(name))
}

/// Whether the default registry knows a type name.
pub fn has_key(name: &str) -> bool {
    with_registry(|registry| registry.has_key(name))
}

/// Merge user factories into the default registry.
pub fn extend(overrides: impl IntoIterator<Item = (String, Factory)>) {
    with_registry(|registry| {
        registry.extend(overrides);
    });
}

/// Reset the default registry to the builtin set.
pub fn reset() {
    with_registry(|registry| {
        registry.reset();
    });
}
