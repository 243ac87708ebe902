//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an element in the tree. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Tag name (e.g. "div", "span", "input").
    pub tag: String,
    /// Optional unique id (CSS `#id` selector).
    pub id: Option<String>,
    /// CSS classes (for `.class` selector).
    pub classes: Vec<String>,
    /// Attributes. Presence-only (boolean) attributes hold an empty value.
    pub attributes: BTreeMap<String, String>,
    /// Text content.
    pub text: String,
    /// Raw markup content.
    pub html: String,
    /// Form value (inputs, selects, textareas).
    pub value: String,
    /// Whether this element is shown.
    pub visible: bool,
    /// The mode the element was hidden with (`"display"`, `"visibility"`).
    /// `None` while visible.
    pub hide_mode: Option<String>,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and sensible defaults.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            html: String::new(),
            value: String::new(),
            visible: true,
            hide_mode: None,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a `data-hook` token (builder). Hooks are space-separated, so an
    /// element can carry several.
    pub fn with_hook(mut self, hook: impl Into<String>) -> Self {
        let hook = hook.into();
        let entry = self.attributes.entry("data-hook".to_string()).or_default();
        if entry.is_empty() {
            *entry = hook;
        } else {
            entry.push(' ');
            entry.push_str(&hook);
        }
        self
    }

    /// Set the `role` attribute (builder).
    pub fn with_role(self, role: impl Into<String>) -> Self {
        self.with_attr("role", role)
    }

    /// Set the form value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Check whether this element has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present or empty.
    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present at all.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether the attribute's value, read as a space-separated token list,
    /// contains `token`. This is `[attr~="token"]` matching.
    pub fn attr_has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name)
            .is_some_and(|v| v.split_whitespace().any(|t| t == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("div");
        assert_eq!(data.tag, "div");
        assert!(data.id.is_none());
        assert!(data.classes.is_empty());
        assert!(data.attributes.is_empty());
        assert!(data.text.is_empty());
        assert!(data.visible);
        assert!(data.hide_mode.is_none());
    }

    #[test]
    fn builder_with_id() {
        let data = NodeData::new("span").with_id("title");
        assert_eq!(data.id.as_deref(), Some("title"));
    }

    #[test]
    fn builder_with_class_dedup() {
        let data = NodeData::new("div").with_class("primary").with_class("primary");
        assert_eq!(data.classes, vec!["primary"]);
    }

    #[test]
    fn builder_with_classes() {
        let data = NodeData::new("div").with_classes(["a", "b", "c"]);
        assert_eq!(data.classes, vec!["a", "b", "c"]);
    }

    #[test]
    fn builder_with_attr() {
        let data = NodeData::new("img").with_attr("width", "100");
        assert_eq!(data.attr("width"), Some("100"));
        assert!(data.has_attr("width"));
        assert!(!data.has_attr("height"));
    }

    #[test]
    fn builder_with_hook_appends_tokens() {
        let data = NodeData::new("span").with_hook("hello").with_hook("other");
        assert_eq!(data.attr("data-hook"), Some("hello other"));
    }

    #[test]
    fn builder_with_role() {
        let data = NodeData::new("div").with_role("list");
        assert_eq!(data.attr("role"), Some("list"));
    }

    #[test]
    fn add_class_idempotent() {
        let mut data = NodeData::new("div");
        data.add_class("foo");
        data.add_class("foo");
        assert_eq!(data.classes.len(), 1);
    }

    #[test]
    fn add_class_empty_is_noop() {
        let mut data = NodeData::new("div");
        data.add_class("");
        assert!(data.classes.is_empty());
    }

    #[test]
    fn remove_class_noop_when_absent() {
        let mut data = NodeData::new("div");
        data.remove_class("nonexistent"); // should not panic
        assert!(data.classes.is_empty());
    }

    #[test]
    fn attr_has_token() {
        let data = NodeData::new("span").with_attr("data-hook", "hello other");
        assert!(data.attr_has_token("data-hook", "hello"));
        assert!(data.attr_has_token("data-hook", "other"));
        assert!(!data.attr_has_token("data-hook", "hell"));
        assert!(!data.attr_has_token("missing", "hello"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
