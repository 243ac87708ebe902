//! # loombind
//!
//! Declarative one-way model-to-DOM bindings over a slotmap element tree.
//!
//! loombind compiles a map of *model property → update instruction* into a
//! registry of stateful update handlers. At runtime, dispatching a changed
//! `(key, value)` pair applies the minimal DOM mutation needed to reflect
//! the value — diffing against each binding's private memory of the
//! previously applied value instead of re-rendering.
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed element tree with the mutation primitives
//!   handlers consume ([`dom::DomAdapter`])
//! - **[`selector`]** — logos-tokenized selector engine: parsing, matching,
//!   and target resolution scoped to a root element
//! - **[`binding`]** — Declarations, the extensible type registry, the
//!   twelve built-in handler factories, the compiler, and keyed dispatch
//! - **[`value`]** — Dynamically typed model values with the truthiness and
//!   text coercions handlers rely on
//! - **[`error`]** — Fail-fast compile-time error taxonomy
//!
//! ## Example
//!
//! ```
//! use loombind::{compile, Bindings, Declaration, Value};
//! use loombind::dom::{Dom, NodeData};
//!
//! let mut dom = Dom::new();
//! let root = dom.insert(NodeData::new("div"));
//! let label = dom.insert_child(root, NodeData::new("span").with_class("name"));
//!
//! let bindings = Bindings::new()
//!     .text("model.name", ".name")
//!     .bind("model.active", Declaration::new("booleanClass").selector(".name"));
//!
//! let mut store = compile(&bindings).unwrap();
//! store.run(&mut dom, "model.name", root, &Value::from("hello"));
//! assert_eq!(dom.get(label).unwrap().text, "hello");
//! ```

pub mod binding;
pub mod dom;
pub mod error;
pub mod selector;
pub mod value;

pub use binding::{
    compile, compile_with, BindTarget, Bindings, BindingType, CaseValue, CustomFn, Declaration,
    Entry, Factory, Handler, HandlerStore, TargetSpec, TypeRegistry,
};
pub use error::CompileError;
pub use value::Value;
