//! Selector matching against the element tree.
//!
//! Walks complex selectors right-to-left, matching compound selectors and
//! navigating the tree via combinators. Exposed through the
//! [`SelectorMatch`] trait so the binding engine stays independent of the
//! concrete tree.

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::selector::model::{
    AttrTest, Combinator, Compound, ComplexSelector, SelectorList, SelectorPart, SimpleSelector,
};

/// The selector-match surface a binding target must provide.
pub trait SelectorMatch {
    /// Whether `el` matches any member of the selector list.
    fn matches(&self, el: NodeId, selector: &SelectorList) -> bool;

    /// All descendants of `root` (excluding `root` itself) matching the
    /// selector list, in document order.
    fn select_descendants(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId>;
}

impl SelectorMatch for Dom {
    fn matches(&self, el: NodeId, selector: &SelectorList) -> bool {
        selector
            .selectors
            .iter()
            .any(|complex| matches_complex(complex, el, self))
    }

    fn select_descendants(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.walk_depth_first(root)
            .into_iter()
            .skip(1) // the root itself is not a descendant
            .filter(|&id| self.matches(id, selector))
            .collect()
    }
}

/// Check whether one complex selector matches a given element.
///
/// The rightmost compound must match the element itself; the walk then
/// proceeds leftward through combinator + compound pairs, climbing the tree.
fn matches_complex(selector: &ComplexSelector, el: NodeId, dom: &Dom) -> bool {
    let parts = &selector.parts;
    if parts.is_empty() {
        return false;
    }

    let mut part_idx = parts.len() - 1;

    match &parts[part_idx] {
        SelectorPart::Compound(compound) => {
            let node = match dom.get(el) {
                Some(n) => n,
                None => return false,
            };
            if !matches_compound(compound, node) {
                return false;
            }
        }
        SelectorPart::Combinator(_) => return false,
    }

    let mut current = el;

    loop {
        if part_idx == 0 {
            // All parts matched.
            return true;
        }

        // part_idx - 1 should be a combinator
        part_idx -= 1;
        let combinator = match &parts[part_idx] {
            SelectorPart::Combinator(c) => c,
            _ => return false,
        };

        if part_idx == 0 {
            // Combinator without a preceding compound — invalid.
            return false;
        }

        // part_idx - 1 should be a compound selector
        part_idx -= 1;
        let compound = match &parts[part_idx] {
            SelectorPart::Compound(c) => c,
            _ => return false,
        };

        match combinator {
            Combinator::Child => {
                // Immediate parent must match.
                let parent_id = match dom.parent(current) {
                    Some(p) => p,
                    None => return false,
                };
                let parent = match dom.get(parent_id) {
                    Some(n) => n,
                    None => return false,
                };
                if !matches_compound(compound, parent) {
                    return false;
                }
                current = parent_id;
            }
            Combinator::Descendant => {
                // Walk up ancestors to find a match.
                let ancestors = dom.ancestors(current);
                let found = ancestors.iter().find(|&&ancestor_id| {
                    dom.get(ancestor_id)
                        .is_some_and(|ancestor| matches_compound(compound, ancestor))
                });
                match found {
                    Some(&ancestor_id) => current = ancestor_id,
                    None => return false,
                }
            }
        }
    }
}

/// Check whether a compound selector matches a single element's data.
fn matches_compound(compound: &Compound, node: &NodeData) -> bool {
    compound.parts.iter().all(|part| match part {
        SimpleSelector::Tag(name) => node.tag == *name,
        SimpleSelector::Universal => true,
        SimpleSelector::Class(name) => node.has_class(name),
        SimpleSelector::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SimpleSelector::Attribute { name, test } => match test {
            AttrTest::Exists => node.has_attr(name),
            AttrTest::Equals(value) => node.attr(name) == Some(value.as_str()),
            AttrTest::Includes(value) => node.attr_has_token(name, value),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    /// Build a test tree:
    /// ```text
    ///       root (div #root)
    ///      /    \
    ///    list    aside
    ///  (ul .nav) (aside [role=complementary])
    ///   / \
    ///  li1  li2
    /// (li .active  (li
    ///  [data-hook=  [data-hook="item last"])
    ///   "item first"])
    /// ```
    fn build_dom() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("div").with_id("root"));
        let list = dom.insert_child(root, NodeData::new("ul").with_class("nav"));
        let aside = dom.insert_child(
            root,
            NodeData::new("aside").with_role("complementary"),
        );
        let li1 = dom.insert_child(
            list,
            NodeData::new("li")
                .with_class("active")
                .with_hook("item")
                .with_hook("first"),
        );
        let li2 = dom.insert_child(
            list,
            NodeData::new("li").with_hook("item").with_hook("last"),
        );
        (dom, root, list, aside, li1, li2)
    }

    fn list(input: &str) -> SelectorList {
        SelectorList::parse(input).unwrap()
    }

    #[test]
    fn match_tag() {
        let (dom, _, l, ..) = build_dom();
        assert!(dom.matches(l, &list("ul")));
        assert!(!dom.matches(l, &list("ol")));
    }

    #[test]
    fn match_class() {
        let (dom, _, l, _, li1, li2) = build_dom();
        assert!(dom.matches(l, &list(".nav")));
        assert!(dom.matches(li1, &list(".active")));
        assert!(!dom.matches(li2, &list(".active")));
    }

    #[test]
    fn match_id() {
        let (dom, root, ..) = build_dom();
        assert!(dom.matches(root, &list("#root")));
        assert!(!dom.matches(root, &list("#other")));
    }

    #[test]
    fn match_universal() {
        let (dom, root, ..) = build_dom();
        assert!(dom.matches(root, &list("*")));
    }

    #[test]
    fn match_attribute_exists() {
        let (dom, _, _, aside, li1, _) = build_dom();
        assert!(dom.matches(aside, &list("[role]")));
        assert!(dom.matches(li1, &list("[data-hook]")));
        assert!(!dom.matches(aside, &list("[data-hook]")));
    }

    #[test]
    fn match_attribute_equals() {
        let (dom, _, _, aside, ..) = build_dom();
        assert!(dom.matches(aside, &list(r#"[role="complementary"]"#)));
        assert!(!dom.matches(aside, &list(r#"[role="list"]"#)));
    }

    #[test]
    fn match_attribute_includes_token() {
        let (dom, _, _, _, li1, li2) = build_dom();
        // both carry the "item" token in a space-separated hook list
        assert!(dom.matches(li1, &list(r#"[data-hook~="item"]"#)));
        assert!(dom.matches(li2, &list(r#"[data-hook~="item"]"#)));
        assert!(dom.matches(li1, &list(r#"[data-hook~="first"]"#)));
        assert!(!dom.matches(li2, &list(r#"[data-hook~="first"]"#)));
        // token match is exact, not substring
        assert!(!dom.matches(li1, &list(r#"[data-hook~="firs"]"#)));
    }

    #[test]
    fn attribute_equals_is_not_token_match() {
        let (dom, _, _, _, li1, _) = build_dom();
        assert!(!dom.matches(li1, &list(r#"[data-hook="item"]"#)));
        assert!(dom.matches(li1, &list(r#"[data-hook="item first"]"#)));
    }

    #[test]
    fn match_descendant_combinator() {
        let (dom, _, _, _, li1, _) = build_dom();
        assert!(dom.matches(li1, &list("div li")));
        assert!(dom.matches(li1, &list("ul li")));
        assert!(!dom.matches(li1, &list("aside li")));
    }

    #[test]
    fn match_child_combinator() {
        let (dom, _, l, _, li1, _) = build_dom();
        assert!(dom.matches(li1, &list("ul > li")));
        // li is a grandchild of div, not a direct child
        assert!(!dom.matches(li1, &list("div > li")));
        assert!(dom.matches(l, &list("div > ul")));
    }

    #[test]
    fn match_selector_list_or_semantics() {
        let (dom, _, l, aside, ..) = build_dom();
        let sel = list("ul, aside");
        assert!(dom.matches(l, &sel));
        assert!(dom.matches(aside, &sel));
    }

    #[test]
    fn select_descendants_document_order() {
        let (dom, root, l, _, li1, li2) = build_dom();
        assert_eq!(dom.select_descendants(root, &list("li")), vec![li1, li2]);
        assert_eq!(dom.select_descendants(root, &list("ul")), vec![l]);
    }

    #[test]
    fn select_descendants_excludes_root() {
        let (dom, root, ..) = build_dom();
        // root is a div, but only descendants count here
        assert!(dom.select_descendants(root, &list("div")).is_empty());
    }

    #[test]
    fn select_descendants_scoped_to_subtree() {
        let (dom, _, l, _, li1, li2) = build_dom();
        assert_eq!(dom.select_descendants(l, &list("li")), vec![li1, li2]);
        assert!(dom.select_descendants(li1, &list("li")).is_empty());
    }

    #[test]
    fn empty_complex_never_matches() {
        let (dom, root, ..) = build_dom();
        let empty = SelectorList {
            selectors: vec![ComplexSelector { parts: vec![] }],
        };
        assert!(!dom.matches(root, &empty));
    }
}
