//! Target resolution: from a binding's compiled target to concrete elements.
//!
//! The resolver implements the binding engine's targeting contract: an empty
//! target means "the root element itself"; otherwise the target set is the
//! root (when it matches) followed by matching descendants in document
//! order. The root is always an eligible match target, so a binding whose
//! selector happens to match the root updates it too.

use crate::dom::node::NodeId;
use crate::selector::matching::SelectorMatch;
use crate::selector::model::SelectorList;

/// A binding's compiled target.
#[derive(Debug, Clone)]
pub enum Target {
    /// The root element itself (declared with no selector, or the empty
    /// selector string).
    Root,
    /// Elements matching a parsed selector list.
    Matches(SelectorList),
}

/// Resolve a compiled target against a root element.
pub fn resolve<D>(dom: &D, root: NodeId, target: &Target, first_match_only: bool) -> Vec<NodeId>
where
    D: SelectorMatch + ?Sized,
{
    match target {
        Target::Root => vec![root],
        Target::Matches(list) => select(dom, root, list, first_match_only),
    }
}

/// Resolve a selector list against a root element: the root itself when it
/// matches, then matching descendants in document order.
pub fn select<D>(dom: &D, root: NodeId, list: &SelectorList, first_match_only: bool) -> Vec<NodeId>
where
    D: SelectorMatch + ?Sized,
{
    if first_match_only {
        if dom.matches(root, list) {
            return vec![root];
        }
        return dom
            .select_descendants(root, list)
            .into_iter()
            .next()
            .map(|id| vec![id])
            .unwrap_or_default();
    }

    let mut out = Vec::new();
    if dom.matches(root, list) {
        out.push(root);
    }
    out.extend(dom.select_descendants(root, list));
    out
}

/// Resolve an optional selector list; an absent list resolves to nothing.
/// Used for one-sided `yes`/`no` toggles and values missing from `cases`.
pub fn select_opt<D>(
    dom: &D,
    root: NodeId,
    list: Option<&SelectorList>,
    first_match_only: bool,
) -> Vec<NodeId>
where
    D: SelectorMatch + ?Sized,
{
    match list {
        Some(list) => select(dom, root, list, first_match_only),
        None => Vec::new(),
    }
}
