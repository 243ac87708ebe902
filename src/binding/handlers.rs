//! Built-in handler factories.
//!
//! Each factory takes a declaration plus its compiled target and produces a
//! [`Handler`]: an update closure over immutable configuration and a small
//! private state struct. The state is the only memory carried between
//! dispatch calls — handlers that diff (class, switchAttribute, custom)
//! remember the previously applied value there, and an uninitialized
//! previous reads as "nothing to remove".

use std::collections::BTreeMap;

use crate::binding::declaration::{CaseValue, CustomFn, Declaration};
use crate::binding::BindTarget;
use crate::dom::adapter::DomAdapter;
use crate::dom::node::NodeId;
use crate::error::CompileError;
use crate::selector::{resolve, select, select_opt, ParseError, SelectorList, Target};
use crate::value::Value;

/// Per-handler private memory.
#[derive(Default, Debug)]
pub(crate) struct BindState {
    /// The last value committed by this handler.
    previous: Option<Value>,
    /// The attribute map applied on the previous call (`switchAttribute`).
    previous_attrs: BTreeMap<String, String>,
}

type UpdateFn = dyn FnMut(&mut BindState, &mut dyn BindTarget, NodeId, &Value, &str);

/// A compiled binding handler: an update closure plus its private state.
///
/// Handlers are created once at compile time and invoked for every value
/// change dispatched to their key; they are never mutated from outside.
pub struct Handler {
    update: Box<UpdateFn>,
    state: BindState,
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("update", &"<closure>")
            .field("state", &self.state)
            .finish()
    }
}

impl Handler {
    /// Create a handler from a plain update function, called with
    /// `(dom, root, value, key_name)`. User-registered factories return
    /// handlers this way; any per-binding state lives in the closure.
    pub fn new(mut f: impl FnMut(&mut dyn BindTarget, NodeId, &Value, &str) + 'static) -> Self {
        Self {
            update: Box::new(move |_state, dom, root, value, key| f(dom, root, value, key)),
            state: BindState::default(),
        }
    }

    fn stateless(f: impl FnMut(&mut dyn BindTarget, NodeId, &Value, &str) + 'static) -> Self {
        Self::new(f)
    }

    fn stateful(
        f: impl FnMut(&mut BindState, &mut dyn BindTarget, NodeId, &Value, &str) + 'static,
    ) -> Self {
        Self {
            update: Box::new(f),
            state: BindState::default(),
        }
    }

    /// Apply this handler: `root` scopes target resolution, `key_name` is the
    /// dispatched property key (the fallback for omitted `name`s).
    pub fn apply(&mut self, dom: &mut dyn BindTarget, root: NodeId, value: &Value, key_name: &str) {
        (self.update)(&mut self.state, dom, root, value, key_name)
    }
}

/// The configured names, falling back to the dispatched key name.
fn names_or_key<'a>(names: &'a [String], key: &'a str) -> Vec<&'a str> {
    if names.is_empty() {
        vec![key]
    } else {
        names.iter().map(String::as_str).collect()
    }
}

/// Parse a `yes`/`no` side as a selector. Multiple entries union like a
/// comma list; an absent side resolves to no elements.
fn parse_side(entries: &[String]) -> Result<Option<SelectorList>, ParseError> {
    if entries.is_empty() {
        Ok(None)
    } else {
        Ok(Some(SelectorList::parse(&entries.join(", "))?))
    }
}

/// Parse the switch-family `cases` as selectors, keeping the raw strings:
/// `switch` skips hiding a case whose raw selector equals the shown one.
fn parse_case_selectors(
    decl: &Declaration,
    binding_type: &'static str,
) -> Result<Vec<(String, String, SelectorList)>, CompileError> {
    if decl.cases.is_empty() {
        return Err(CompileError::MissingCases { binding_type });
    }
    decl.cases
        .iter()
        .map(|(key, value)| match value {
            CaseValue::Selector(raw) => {
                let list = SelectorList::parse(raw)?;
                Ok((key.clone(), raw.clone(), list))
            }
            CaseValue::Attributes(_) => Err(CompileError::BadCases { binding_type }),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Content bindings
// ---------------------------------------------------------------------------

pub(crate) fn text(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    Ok(Handler::stateless(move |dom, root, value, _key| {
        let text = value.to_text();
        for el in resolve(&*dom, root, &target, first) {
            dom.set_text(el, &text);
        }
    }))
}

pub(crate) fn inner_html(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    Ok(Handler::stateless(move |dom, root, value, _key| {
        let html = value.to_text();
        for el in resolve(&*dom, root, &target, first) {
            dom.set_html(el, &html);
        }
    }))
}

pub(crate) fn class(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    Ok(Handler::stateful(move |state, dom, root, value, _key| {
        let prev = state.previous.as_ref().map(Value::to_text).unwrap_or_default();
        let next = value.to_text();
        for el in resolve(&*dom, root, &target, first) {
            dom.switch_class(el, &prev, &next);
        }
        state.previous = Some(value.clone());
    }))
}

pub(crate) fn attribute(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    if decl.names.is_empty() {
        return Err(CompileError::MissingName {
            binding_type: "attribute",
        });
    }
    let names = decl.names.clone();
    let first = decl.first_match_only;
    Ok(Handler::stateless(move |dom, root, value, _key| {
        let text = value.to_text();
        for el in resolve(&*dom, root, &target, first) {
            for name in &names {
                dom.set_attribute(el, name, &text);
            }
        }
    }))
}

pub(crate) fn value(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    Ok(Handler::stateless(move |dom, root, value, _key| {
        let text = value.input_text();
        for el in resolve(&*dom, root, &target, first) {
            // never override a live user edit
            if dom.is_focused(el) {
                continue;
            }
            dom.set_value(el, &text);
        }
    }))
}

// ---------------------------------------------------------------------------
// Boolean bindings
// ---------------------------------------------------------------------------

pub(crate) fn boolean_class(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    if !decl.yes.is_empty() || !decl.no.is_empty() {
        // yes/no swap mode: remove the off side, add the on side
        let yes = decl.yes.clone();
        let no = decl.no.clone();
        Ok(Handler::stateless(move |dom, root, value, _key| {
            let (off, on) = if value.is_truthy() {
                (&no, &yes)
            } else {
                (&yes, &no)
            };
            for el in resolve(&*dom, root, &target, first) {
                for name in off {
                    dom.remove_class(el, name);
                }
                for name in on {
                    dom.add_class(el, name);
                }
            }
        }))
    } else {
        let names = decl.names.clone();
        let invert = decl.invert;
        Ok(Handler::stateless(move |dom, root, value, key| {
            let on = value.is_truthy() != invert;
            for el in resolve(&*dom, root, &target, first) {
                for name in names_or_key(&names, key) {
                    if on {
                        dom.add_class(el, name);
                    } else {
                        dom.remove_class(el, name);
                    }
                }
            }
        }))
    }
}

pub(crate) fn boolean_attribute(
    decl: &Declaration,
    target: Target,
) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    if !decl.yes.is_empty() || !decl.no.is_empty() {
        let yes = decl.yes.clone();
        let no = decl.no.clone();
        Ok(Handler::stateless(move |dom, root, value, _key| {
            let (off, on) = if value.is_truthy() {
                (&no, &yes)
            } else {
                (&yes, &no)
            };
            for el in resolve(&*dom, root, &target, first) {
                for name in off {
                    if !name.is_empty() {
                        dom.remove_attribute(el, name);
                    }
                }
                for name in on {
                    if !name.is_empty() {
                        dom.add_attribute(el, name);
                    }
                }
            }
        }))
    } else {
        let names = decl.names.clone();
        let invert = decl.invert;
        Ok(Handler::stateless(move |dom, root, value, key| {
            let on = value.is_truthy() != invert;
            for el in resolve(&*dom, root, &target, first) {
                for name in names_or_key(&names, key) {
                    if on {
                        dom.add_attribute(el, name);
                    } else {
                        dom.remove_attribute(el, name);
                    }
                }
            }
        }))
    }
}

pub(crate) fn toggle(decl: &Declaration, target: Target) -> Result<Handler, CompileError> {
    let first = decl.first_match_only;
    let mode = decl.mode.clone().unwrap_or_else(|| "display".to_string());
    if !decl.yes.is_empty() || !decl.no.is_empty() {
        // yes/no hold selectors here, resolved fresh on every call
        let yes = parse_side(&decl.yes)?;
        let no = parse_side(&decl.no)?;
        Ok(Handler::stateless(move |dom, root, value, _key| {
            let truthy = value.is_truthy();
            for el in select_opt(&*dom, root, yes.as_ref(), first) {
                if truthy {
                    dom.show(el, &mode);
                } else {
                    dom.hide(el, &mode);
                }
            }
            for el in select_opt(&*dom, root, no.as_ref(), first) {
                if truthy {
                    dom.hide(el, &mode);
                } else {
                    dom.show(el, &mode);
                }
            }
        }))
    } else {
        let invert = decl.invert;
        Ok(Handler::stateless(move |dom, root, value, _key| {
            let shown = value.is_truthy() != invert;
            for el in resolve(&*dom, root, &target, first) {
                if shown {
                    dom.show(el, &mode);
                } else {
                    dom.hide(el, &mode);
                }
            }
        }))
    }
}

// ---------------------------------------------------------------------------
// Switch family
// ---------------------------------------------------------------------------

pub(crate) fn switch(decl: &Declaration, _target: Target) -> Result<Handler, CompileError> {
    let cases = parse_case_selectors(decl, "switch")?;
    let first = decl.first_match_only;
    Ok(Handler::stateless(move |dom, root, value, _key| {
        let current = value.case_key();
        let shown = cases
            .iter()
            .find(|(key, ..)| *key == current)
            .map(|(_, raw, _)| raw.clone());

        // hide every other case whose selector differs from the shown one
        for (key, raw, list) in &cases {
            if *key != current && Some(raw) != shown.as_ref() {
                for el in select(&*dom, root, list, first) {
                    dom.hide(el, "display");
                }
            }
        }
        if let Some((_, _, list)) = cases.iter().find(|(key, ..)| *key == current) {
            for el in select(&*dom, root, list, first) {
                dom.show(el, "display");
            }
        }
    }))
}

pub(crate) fn switch_class(decl: &Declaration, _target: Target) -> Result<Handler, CompileError> {
    let cases = parse_case_selectors(decl, "switchClass")?;
    let names = decl.names.clone();
    let first = decl.first_match_only;
    Ok(Handler::stateless(move |dom, root, value, key| {
        let current = value.case_key();
        for (case_key, _, list) in &cases {
            let on = *case_key == current;
            for el in select(&*dom, root, list, first) {
                for name in names_or_key(&names, key) {
                    if on {
                        dom.add_class(el, name);
                    } else {
                        dom.remove_class(el, name);
                    }
                }
            }
        }
    }))
}

pub(crate) fn switch_attribute(
    decl: &Declaration,
    target: Target,
) -> Result<Handler, CompileError> {
    if decl.cases.is_empty() {
        return Err(CompileError::MissingCases {
            binding_type: "switchAttribute",
        });
    }
    let cases = decl.cases.clone();
    let names = decl.names.clone();
    let first = decl.first_match_only;
    Ok(Handler::stateful(move |state, dom, root, value, key| {
        let current = value.case_key();
        let attrs = cases
            .iter()
            .find(|(case_key, _)| *case_key == current)
            .map(|(_, case)| match case {
                CaseValue::Attributes(map) => map.clone(),
                // scalar shorthand: {name-or-key: scalar}
                CaseValue::Selector(scalar) => {
                    let name = names
                        .first()
                        .cloned()
                        .unwrap_or_else(|| key.to_string());
                    BTreeMap::from([(name, scalar.clone())])
                }
            });

        for el in resolve(&*dom, root, &target, first) {
            for name in state.previous_attrs.keys() {
                dom.remove_attribute(el, name);
            }
            if let Some(map) = &attrs {
                for (name, value) in map {
                    dom.set_attribute(el, name, value);
                }
            }
        }
        // the previous map is only replaced when a case matched
        if let Some(map) = attrs {
            state.previous_attrs = map;
        }
    }))
}

// ---------------------------------------------------------------------------
// Custom
// ---------------------------------------------------------------------------

pub(crate) fn custom(f: CustomFn, decl: &Declaration, target: Target) -> Handler {
    let first = decl.first_match_only;
    Handler::stateful(move |state, dom, root, value, _key| {
        for el in resolve(&*dom, root, &target, first) {
            f(&mut *dom, el, value, state.previous.as_ref());
        }
        // committed only after every call returned; a panicking handler
        // leaves the previous value unchanged
        state.previous = Some(value.clone());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;
    use crate::dom::DomAdapter;

    fn target(selector: &str) -> Target {
        Target::Matches(SelectorList::parse(selector).unwrap())
    }

    /// div#root > [ span.thing[data-hook="hello other"] ]
    fn span_dom() -> (Dom, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("div").with_id("root"));
        let span = dom.insert_child(
            root,
            NodeData::new("span")
                .with_class("thing")
                .with_hook("hello")
                .with_hook("other"),
        );
        (dom, root, span)
    }

    #[test]
    fn text_sets_content() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("text").selector(".thing");
        let mut h = text(&decl, target(".thing")).unwrap();
        h.apply(&mut dom, root, &Value::from("hello"), "model");
        assert_eq!(dom.get(span).unwrap().text, "hello");
    }

    #[test]
    fn text_renders_null_as_empty() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("text").selector(".thing");
        let mut h = text(&decl, target(".thing")).unwrap();
        h.apply(&mut dom, root, &Value::from("x"), "model");
        h.apply(&mut dom, root, &Value::Null, "model");
        assert_eq!(dom.get(span).unwrap().text, "");
    }

    #[test]
    fn class_diffs_previous_value() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("class").selector(".thing");
        let mut h = class(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::from("hello"), "model");
        assert!(dom.has_class(span, "hello"));

        h.apply(&mut dom, root, &Value::from("string"), "model");
        assert!(dom.has_class(span, "string"));
        assert!(!dom.has_class(span, "hello"), "removed previous");
    }

    #[test]
    fn class_sequence_leaves_exactly_last() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("class").selector(".thing");
        let mut h = class(&decl, target(".thing")).unwrap();
        for v in ["a", "b", "c", "d"] {
            h.apply(&mut dom, root, &Value::from(v), "model");
        }
        let classes = &dom.get(span).unwrap().classes;
        assert!(classes.contains(&"d".to_string()));
        for stale in ["a", "b", "c"] {
            assert!(!classes.contains(&stale.to_string()));
        }
    }

    #[test]
    fn attribute_requires_name() {
        let decl = Declaration::new("attribute").selector(".thing");
        let err = attribute(&decl, target(".thing")).unwrap_err();
        assert!(matches!(err, CompileError::MissingName { binding_type: "attribute" }));
    }

    #[test]
    fn attribute_fans_out_over_names() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("attribute")
            .selector(".thing")
            .names(["height", "width"]);
        let mut h = attribute(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::from("100"), "model");
        assert_eq!(dom.get(span).unwrap().attr("height"), Some("100"));
        assert_eq!(dom.get(span).unwrap().attr("width"), Some("100"));

        h.apply(&mut dom, root, &Value::from("200"), "model");
        assert_eq!(dom.get(span).unwrap().attr("height"), Some("200"));
        assert_eq!(dom.get(span).unwrap().attr("width"), Some("200"));
    }

    #[test]
    fn value_coerces_falsy_but_keeps_zero() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("value").selector(".thing");
        let mut h = value(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::from("hello"), "model");
        assert_eq!(dom.get(span).unwrap().value, "hello");

        h.apply(&mut dom, root, &Value::Null, "model");
        assert_eq!(dom.get(span).unwrap().value, "");

        h.apply(&mut dom, root, &Value::Int(0), "model");
        assert_eq!(dom.get(span).unwrap().value, "0");
    }

    #[test]
    fn value_skips_focused_element() {
        let (mut dom, root, span) = span_dom();
        dom.set_focus(Some(span));
        let decl = Declaration::new("value").selector(".thing");
        let mut h = value(&decl, target(".thing")).unwrap();
        h.apply(&mut dom, root, &Value::from("hello"), "model");
        assert_eq!(dom.get(span).unwrap().value, "", "focused value untouched");

        dom.set_focus(None);
        h.apply(&mut dom, root, &Value::from("hello"), "model");
        assert_eq!(dom.get(span).unwrap().value, "hello");
    }

    #[test]
    fn boolean_class_single_name_with_invert() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("booleanClass")
            .selector(".thing")
            .name("hidden")
            .invert(true);
        let mut h = boolean_class(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(!dom.has_class(span, "hidden"));

        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(dom.has_class(span, "hidden"));
    }

    #[test]
    fn boolean_class_falls_back_to_key_name() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("booleanClass").selector(".thing");
        let mut h = boolean_class(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::Bool(true), "active");
        assert!(dom.has_class(span, "active"));
        h.apply(&mut dom, root, &Value::Bool(false), "active");
        assert!(!dom.has_class(span, "active"));
    }

    #[test]
    fn boolean_class_yes_no_symmetry() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("booleanClass")
            .selector(".thing")
            .yes_all(["awesome", "very-awesome"])
            .no_all(["not-awesome"]);
        let mut h = boolean_class(&decl, target(".thing")).unwrap();

        for v in [true, false, true] {
            h.apply(&mut dom, root, &Value::Bool(v), "model");
        }
        assert!(dom.has_class(span, "awesome"));
        assert!(dom.has_class(span, "very-awesome"));
        assert!(!dom.has_class(span, "not-awesome"), "no residual off side");
    }

    #[test]
    fn boolean_class_one_sided_no() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("booleanClass").selector(".thing").no("no");
        let mut h = boolean_class(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(dom.has_class(span, "no"));
        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(!dom.has_class(span, "no"));
    }

    #[test]
    fn boolean_attribute_single_name() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("booleanAttribute")
            .selector(".thing")
            .name("checked");
        let mut h = boolean_attribute(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(dom.get(span).unwrap().has_attr("checked"));
        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(!dom.get(span).unwrap().has_attr("checked"));
    }

    #[test]
    fn boolean_attribute_yes_no_arrays() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("booleanAttribute")
            .selector(".thing")
            .yes_all(["awesome", "super-awesome"])
            .no("not-awesome");
        let mut h = boolean_attribute(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(dom.get(span).unwrap().has_attr("awesome"));
        assert!(dom.get(span).unwrap().has_attr("super-awesome"));
        assert!(!dom.get(span).unwrap().has_attr("not-awesome"));

        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(!dom.get(span).unwrap().has_attr("awesome"));
        assert!(!dom.get(span).unwrap().has_attr("super-awesome"));
        assert!(dom.get(span).unwrap().has_attr("not-awesome"));
    }

    #[test]
    fn toggle_own_selector() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("toggle").selector("span");
        let mut h = toggle(&decl, target("span")).unwrap();

        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(!dom.get(span).unwrap().visible);
        assert_eq!(dom.get(span).unwrap().hide_mode.as_deref(), Some("display"));

        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(dom.get(span).unwrap().visible);
    }

    #[test]
    fn toggle_forwards_mode() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("toggle").selector("span").mode("visibility");
        let mut h = toggle(&decl, target("span")).unwrap();
        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert_eq!(
            dom.get(span).unwrap().hide_mode.as_deref(),
            Some("visibility")
        );
    }

    #[test]
    fn toggle_yes_no_selectors() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("div"));
        let one = dom.insert_child(root, NodeData::new("span").with_class("one"));
        let two = dom.insert_child(root, NodeData::new("span").with_class("two"));

        let decl = Declaration::new("toggle").yes(".two").no(".one");
        let mut h = toggle(&decl, Target::Root).unwrap();

        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(!dom.get(one).unwrap().visible);
        assert!(dom.get(two).unwrap().visible);

        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(dom.get(one).unwrap().visible);
        assert!(!dom.get(two).unwrap().visible);
    }

    #[test]
    fn toggle_one_sided_yes() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("toggle").yes("span");
        let mut h = toggle(&decl, Target::Root).unwrap();

        h.apply(&mut dom, root, &Value::Bool(true), "model");
        assert!(dom.get(span).unwrap().visible);
        h.apply(&mut dom, root, &Value::Bool(false), "model");
        assert!(!dom.get(span).unwrap().visible);
    }

    #[test]
    fn switch_requires_cases() {
        let decl = Declaration::new("switch");
        let err = switch(&decl, Target::Root).unwrap_err();
        assert!(matches!(err, CompileError::MissingCases { binding_type: "switch" }));
    }

    #[test]
    fn switch_rejects_attribute_cases() {
        let decl = Declaration::new("switch").case_attrs("x", [("a", "b")]);
        let err = switch(&decl, Target::Root).unwrap_err();
        assert!(matches!(err, CompileError::BadCases { .. }));
    }

    fn switch_dom() -> (Dom, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("div"));
        let foo = dom.insert_child(root, NodeData::new("div").with_class("foo"));
        let bar = dom.insert_child(root, NodeData::new("div").with_class("bar"));
        let baz = dom.insert_child(root, NodeData::new("div").with_class("baz"));
        (dom, root, foo, bar, baz)
    }

    #[test]
    fn switch_shows_exactly_current_case() {
        let (mut dom, root, foo, bar, baz) = switch_dom();
        let decl = Declaration::new("switch")
            .case("foo", ".foo")
            .case("bar", ".bar")
            .case("baz", ".baz");
        let mut h = switch(&decl, Target::Root).unwrap();

        h.apply(&mut dom, root, &Value::from("bar"), "model");
        assert!(!dom.get(foo).unwrap().visible);
        assert!(dom.get(bar).unwrap().visible);
        assert!(!dom.get(baz).unwrap().visible);
    }

    #[test]
    fn switch_unknown_value_hides_all() {
        let (mut dom, root, foo, bar, baz) = switch_dom();
        let decl = Declaration::new("switch")
            .case("foo", ".foo")
            .case("bar", ".bar")
            .case("baz", ".baz");
        let mut h = switch(&decl, Target::Root).unwrap();

        h.apply(&mut dom, root, &Value::from("something else"), "model");
        for el in [foo, bar, baz] {
            assert!(!dom.get(el).unwrap().visible);
        }
    }

    #[test]
    fn switch_keeps_shared_selector_visible() {
        // two case keys pointing at the same selector: picking either key
        // must not hide the shared target
        let (mut dom, root, foo, ..) = switch_dom();
        let decl = Declaration::new("switch")
            .case("a", ".foo")
            .case("b", ".foo");
        let mut h = switch(&decl, Target::Root).unwrap();
        h.apply(&mut dom, root, &Value::from("a"), "model");
        assert!(dom.get(foo).unwrap().visible);
    }

    #[test]
    fn switch_class_marks_current_case() {
        let (mut dom, root, foo, bar, _) = switch_dom();
        let decl = Declaration::new("switchClass")
            .name("yes")
            .case("foo", ".foo")
            .case("bar", ".bar");
        let mut h = switch_class(&decl, Target::Root).unwrap();

        h.apply(&mut dom, root, &Value::from("foo"), "model");
        assert!(dom.has_class(foo, "yes"));
        assert!(!dom.has_class(bar, "yes"));

        h.apply(&mut dom, root, &Value::from("bar"), "model");
        assert!(!dom.has_class(foo, "yes"));
        assert!(dom.has_class(bar, "yes"));
    }

    #[test]
    fn switch_attribute_tracks_previous_map() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("switchAttribute")
            .selector(".thing")
            .case_attrs("wide", [("width", "100")])
            .case_attrs("tall", [("height", "100")]);
        let mut h = switch_attribute(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::from("wide"), "model");
        assert_eq!(dom.get(span).unwrap().attr("width"), Some("100"));

        h.apply(&mut dom, root, &Value::from("tall"), "model");
        assert!(!dom.get(span).unwrap().has_attr("width"), "previous removed");
        assert_eq!(dom.get(span).unwrap().attr("height"), Some("100"));
    }

    #[test]
    fn switch_attribute_scalar_shorthand_uses_name() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("switchAttribute")
            .selector(".thing")
            .name("data-state")
            .case("on", "lit");
        let mut h = switch_attribute(&decl, target(".thing")).unwrap();
        h.apply(&mut dom, root, &Value::from("on"), "model");
        assert_eq!(dom.get(span).unwrap().attr("data-state"), Some("lit"));
    }

    #[test]
    fn switch_attribute_scalar_shorthand_falls_back_to_key() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("switchAttribute")
            .selector(".thing")
            .case("on", "lit");
        let mut h = switch_attribute(&decl, target(".thing")).unwrap();
        h.apply(&mut dom, root, &Value::from("on"), "state");
        assert_eq!(dom.get(span).unwrap().attr("state"), Some("lit"));
    }

    #[test]
    fn switch_attribute_unknown_value_clears_previous() {
        let (mut dom, root, span) = span_dom();
        let decl = Declaration::new("switchAttribute")
            .selector(".thing")
            .case_attrs("wide", [("width", "100")]);
        let mut h = switch_attribute(&decl, target(".thing")).unwrap();

        h.apply(&mut dom, root, &Value::from("wide"), "model");
        h.apply(&mut dom, root, &Value::from("other"), "model");
        assert!(!dom.get(span).unwrap().has_attr("width"));
    }

    #[test]
    fn inner_html_sets_markup() {
        let (mut dom, root, _) = span_dom();
        let decl = Declaration::new("innerHTML").selector("");
        let mut h = inner_html(&decl, Target::Root).unwrap();
        h.apply(&mut dom, root, &Value::from("<span></span>"), "model");
        assert_eq!(dom.get(root).unwrap().html, "<span></span>");
    }

    #[test]
    fn custom_sees_previous_value() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<(String, Option<String>)>>> = Rc::default();
        let log = Rc::clone(&seen);

        let decl = Declaration::custom(move |dom, el, value, previous| {
            log.borrow_mut()
                .push((value.to_text(), previous.map(Value::to_text)));
            dom.set_text(el, &value.to_text());
        });
        let (mut dom, root, span) = span_dom();
        let f = match &decl.binding_type {
            crate::binding::declaration::BindingType::Custom(f) => f.clone(),
            _ => unreachable!(),
        };
        let mut h = custom(f, &decl, target(".thing"));

        h.apply(&mut dom, root, &Value::from("hello"), "model");
        h.apply(&mut dom, root, &Value::from("goodbye"), "model");

        assert_eq!(dom.get(span).unwrap().text, "goodbye");
        assert_eq!(
            *seen.borrow(),
            vec![
                ("hello".to_string(), None),
                ("goodbye".to_string(), Some("hello".to_string())),
            ]
        );
    }
}
