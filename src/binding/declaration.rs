//! Binding declarations: the declarative input the compiler consumes.
//!
//! A [`Bindings`] map pairs model property keys with declarations. Each
//! [`Declaration`] names a binding type, a target (selector, hook, role, or
//! the root itself), and the per-type configuration fields. Shorthand forms
//! are modeled explicitly as [`Entry`] variants instead of being sniffed at
//! runtime.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::binding::BindTarget;
use crate::dom::node::NodeId;
use crate::selector::{ParseError, SelectorList, Target};
use crate::value::Value;

/// Ad-hoc update function for [`BindingType::Custom`].
///
/// Invoked once per matched element with the previous dispatched value (if
/// any). Context the function needs is captured by the closure itself.
pub type CustomFn = Rc<dyn Fn(&mut dyn BindTarget, NodeId, &Value, Option<&Value>)>;

/// How a declaration names its handler.
#[derive(Clone)]
pub enum BindingType {
    /// A registered handler name, resolved through the type registry.
    Named(String),
    /// An ad-hoc handler function, used directly.
    Custom(CustomFn),
}

impl fmt::Debug for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingType::Named(name) => f.debug_tuple("Named").field(name).finish(),
            BindingType::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for BindingType {
    fn from(name: &str) -> Self {
        BindingType::Named(name.to_owned())
    }
}

impl From<String> for BindingType {
    fn from(name: String) -> Self {
        BindingType::Named(name)
    }
}

/// Where a declaration points: a selector string, a hook/role token, or the
/// root element itself (the default).
#[derive(Debug, Clone, Default)]
pub enum TargetSpec {
    /// The bound root element itself.
    #[default]
    Root,
    /// A CSS selector string.
    Selector(String),
    /// A `data-hook` token: translated to `[data-hook~="…"]`.
    Hook(String),
    /// A `role` value: translated to `[role="…"]`.
    Role(String),
}

impl TargetSpec {
    /// Compile to a resolvable [`Target`]. The empty selector string means
    /// the root, matching the "no selector" default.
    pub(crate) fn compile(&self) -> Result<Target, ParseError> {
        let selector = match self {
            TargetSpec::Root => return Ok(Target::Root),
            TargetSpec::Selector(s) if s.is_empty() => return Ok(Target::Root),
            TargetSpec::Selector(s) => s.clone(),
            TargetSpec::Hook(h) => format!("[data-hook~=\"{h}\"]"),
            TargetSpec::Role(r) => format!("[role=\"{r}\"]"),
        };
        Ok(Target::Matches(SelectorList::parse(&selector)?))
    }
}

/// The right-hand side of one `cases` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    /// A selector string (`switch`/`switchClass`), or the scalar shorthand
    /// for `switchAttribute`.
    Selector(String),
    /// An attribute map (`switchAttribute` only).
    Attributes(BTreeMap<String, String>),
}

impl From<&str> for CaseValue {
    fn from(s: &str) -> Self {
        CaseValue::Selector(s.to_owned())
    }
}

impl From<String> for CaseValue {
    fn from(s: String) -> Self {
        CaseValue::Selector(s)
    }
}

/// One binding declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// The handler this declaration compiles through.
    pub binding_type: BindingType,
    /// Where the binding points.
    pub target: TargetSpec,
    /// Attribute/class name(s). Empty defaults to the dispatched key name.
    pub names: Vec<String>,
    /// "On" side for boolean bindings: class/attribute names, or a selector
    /// for `toggle`.
    pub yes: Vec<String>,
    /// "Off" side for boolean bindings.
    pub no: Vec<String>,
    /// Value → target map for the switch family, in insertion order.
    pub cases: Vec<(String, CaseValue)>,
    /// Show/hide mode, forwarded to the adapter. Defaults to `"display"`.
    pub mode: Option<String>,
    /// Flip the truthiness test (single-name boolean branch only).
    pub invert: bool,
    /// Restrict the target set to a single element.
    pub first_match_only: bool,
}

impl Declaration {
    /// Create a declaration for a named binding type, targeting the root.
    pub fn new(binding_type: impl Into<BindingType>) -> Self {
        Self {
            binding_type: binding_type.into(),
            target: TargetSpec::Root,
            names: Vec::new(),
            yes: Vec::new(),
            no: Vec::new(),
            cases: Vec::new(),
            mode: None,
            invert: false,
            first_match_only: false,
        }
    }

    /// Create a declaration for an ad-hoc handler function.
    pub fn custom(
        f: impl Fn(&mut dyn BindTarget, NodeId, &Value, Option<&Value>) + 'static,
    ) -> Self {
        Self::new(BindingType::Custom(Rc::new(f)))
    }

    /// Target a CSS selector (builder).
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.target = TargetSpec::Selector(selector.into());
        self
    }

    /// Target elements carrying a `data-hook` token (builder).
    pub fn hook(mut self, hook: impl Into<String>) -> Self {
        self.target = TargetSpec::Hook(hook.into());
        self
    }

    /// Target elements with a `role` attribute value (builder).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.target = TargetSpec::Role(role.into());
        self
    }

    /// Add an attribute/class name (builder).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add several attribute/class names (builder).
    pub fn names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a `yes`-side entry (builder).
    pub fn yes(mut self, yes: impl Into<String>) -> Self {
        self.yes.push(yes.into());
        self
    }

    /// Add several `yes`-side entries (builder).
    pub fn yes_all(mut self, yes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.yes.extend(yes.into_iter().map(Into::into));
        self
    }

    /// Add a `no`-side entry (builder).
    pub fn no(mut self, no: impl Into<String>) -> Self {
        self.no.push(no.into());
        self
    }

    /// Add several `no`-side entries (builder).
    pub fn no_all(mut self, no: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.no.extend(no.into_iter().map(Into::into));
        self
    }

    /// Add one `cases` entry (builder).
    pub fn case(mut self, key: impl Into<String>, value: impl Into<CaseValue>) -> Self {
        self.cases.push((key.into(), value.into()));
        self
    }

    /// Add one `cases` entry mapping to an attribute set (builder).
    pub fn case_attrs(
        mut self,
        key: impl Into<String>,
        attrs: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let map = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.cases.push((key.into(), CaseValue::Attributes(map)));
        self
    }

    /// Set the show/hide mode (builder).
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Flip the truthiness test (builder).
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Restrict the target set to a single element (builder).
    pub fn first_match_only(mut self, first_match_only: bool) -> Self {
        self.first_match_only = first_match_only;
        self
    }
}

/// One entry in a binding map: the shorthand string form, a single
/// declaration, or several independent declarations under the same key.
#[derive(Debug, Clone)]
pub enum Entry {
    /// `"selector"` — sugar for a `text` declaration with that selector.
    Shorthand(String),
    Single(Declaration),
    Multiple(Vec<Declaration>),
}

/// A declarative binding map: model property keys paired with declarations,
/// in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<(String, Entry)>,
}

impl Bindings {
    /// Create an empty binding map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the shorthand form: `key` updates the text of `selector`.
    pub fn text(mut self, key: impl Into<String>, selector: impl Into<String>) -> Self {
        self.entries
            .push((key.into(), Entry::Shorthand(selector.into())));
        self
    }

    /// Register one declaration under `key`.
    pub fn bind(mut self, key: impl Into<String>, declaration: Declaration) -> Self {
        self.entries.push((key.into(), Entry::Single(declaration)));
        self
    }

    /// Register several independent declarations under the same key.
    pub fn bind_all(
        mut self,
        key: impl Into<String>,
        declarations: impl IntoIterator<Item = Declaration>,
    ) -> Self {
        self.entries.push((
            key.into(),
            Entry::Multiple(declarations.into_iter().collect()),
        ));
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Number of keys registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
