//! DOM arena: slotmap-backed element tree with mutation primitives.

pub mod node;
pub mod tree;
pub mod adapter;

pub use node::{NodeId, NodeData};
pub use tree::Dom;
pub use adapter::DomAdapter;
