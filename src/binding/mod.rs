//! Binding engine: declarations, type registry, handler factories,
//! compilation, and keyed dispatch.

pub mod compiler;
pub mod declaration;
pub mod handlers;
pub mod registry;
pub mod store;

pub use compiler::{compile, compile_with};
pub use declaration::{Bindings, BindingType, CaseValue, CustomFn, Declaration, Entry, TargetSpec};
pub use handlers::Handler;
pub use registry::{Factory, TypeRegistry};
pub use store::HandlerStore;

use crate::dom::adapter::DomAdapter;
use crate::selector::matching::SelectorMatch;

/// Everything a binding target must provide: mutation primitives plus
/// selector matching. Implemented by [`Dom`](crate::dom::Dom); implement
/// both parent traits to bind against another tree.
pub trait BindTarget: DomAdapter + SelectorMatch {}

impl<T: DomAdapter + SelectorMatch> BindTarget for T {}
