//! Element mutation primitives consumed by compiled handlers.
//!
//! Handlers never touch [`NodeData`](super::NodeData) directly; they go
//! through [`DomAdapter`], so the binding engine stays independent of the
//! concrete tree. Name-taking operations treat an empty name as a no-op —
//! one-sided `yes`/`no` declarations rely on that.

use super::node::NodeId;
use super::tree::Dom;

/// The mutation surface a binding target must provide.
pub trait DomAdapter {
    /// Set text content.
    fn set_text(&mut self, el: NodeId, value: &str);
    /// Set raw markup content.
    fn set_html(&mut self, el: NodeId, value: &str);
    /// Set attribute `name` to `value`.
    fn set_attribute(&mut self, el: NodeId, name: &str, value: &str);
    /// Add a presence-only (boolean) attribute.
    fn add_attribute(&mut self, el: NodeId, name: &str);
    /// Remove an attribute entirely.
    fn remove_attribute(&mut self, el: NodeId, name: &str);
    /// Add a CSS class.
    fn add_class(&mut self, el: NodeId, name: &str);
    /// Remove a CSS class.
    fn remove_class(&mut self, el: NodeId, name: &str);
    /// Remove `old` and add `new` in one step.
    fn switch_class(&mut self, el: NodeId, old: &str, new: &str);
    /// Whether the element has a CSS class.
    fn has_class(&self, el: NodeId, name: &str) -> bool;
    /// Make the element visible. `mode` mirrors the hide mode.
    fn show(&mut self, el: NodeId, mode: &str);
    /// Hide the element. `mode` is `"display"` or `"visibility"`.
    fn hide(&mut self, el: NodeId, mode: &str);
    /// Assign the element's form value.
    fn set_value(&mut self, el: NodeId, value: &str);
    /// Whether the element currently holds input focus.
    fn is_focused(&self, el: NodeId) -> bool;
}

impl DomAdapter for Dom {
    fn set_text(&mut self, el: NodeId, value: &str) {
        if let Some(node) = self.get_mut(el) {
            node.text = value.to_owned();
        }
    }

    fn set_html(&mut self, el: NodeId, value: &str) {
        if let Some(node) = self.get_mut(el) {
            node.html = value.to_owned();
        }
    }

    fn set_attribute(&mut self, el: NodeId, name: &str, value: &str) {
        if name.is_empty() {
            return;
        }
        if let Some(node) = self.get_mut(el) {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn add_attribute(&mut self, el: NodeId, name: &str) {
        if name.is_empty() {
            return;
        }
        if let Some(node) = self.get_mut(el) {
            node.attributes.entry(name.to_owned()).or_default();
        }
    }

    fn remove_attribute(&mut self, el: NodeId, name: &str) {
        if let Some(node) = self.get_mut(el) {
            node.attributes.remove(name);
        }
    }

    fn add_class(&mut self, el: NodeId, name: &str) {
        if let Some(node) = self.get_mut(el) {
            node.add_class(name);
        }
    }

    fn remove_class(&mut self, el: NodeId, name: &str) {
        if let Some(node) = self.get_mut(el) {
            node.remove_class(name);
        }
    }

    fn switch_class(&mut self, el: NodeId, old: &str, new: &str) {
        if let Some(node) = self.get_mut(el) {
            node.remove_class(old);
            node.add_class(new);
        }
    }

    fn has_class(&self, el: NodeId, name: &str) -> bool {
        self.get(el).is_some_and(|node| node.has_class(name))
    }

    fn show(&mut self, el: NodeId, _mode: &str) {
        if let Some(node) = self.get_mut(el) {
            node.visible = true;
            node.hide_mode = None;
        }
    }

    fn hide(&mut self, el: NodeId, mode: &str) {
        if let Some(node) = self.get_mut(el) {
            node.visible = false;
            node.hide_mode = Some(mode.to_owned());
        }
    }

    fn set_value(&mut self, el: NodeId, value: &str) {
        if let Some(node) = self.get_mut(el) {
            node.value = value.to_owned();
        }
    }

    fn is_focused(&self, el: NodeId) -> bool {
        self.focused() == Some(el)
    }
}
