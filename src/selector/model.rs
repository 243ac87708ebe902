//! Selector AST: simple selectors, compounds, combinators, selector lists.

/// The value test in an attribute selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrTest {
    /// `[attr]` — attribute present.
    Exists,
    /// `[attr="v"]` — exact value match.
    Equals(String),
    /// `[attr~="v"]` — value, read as a space-separated token list,
    /// contains `v`.
    Includes(String),
}

/// A single simple selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Tag selector: matches the element's tag name (e.g. `div`).
    Tag(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[name]`, `[name="v"]`, `[name~="v"]`.
    Attribute { name: String, test: AttrTest },
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A compound selector: a sequence of simple selectors with no whitespace
/// between them, e.g. `div.primary[role="list"]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    pub parts: Vec<SimpleSelector>,
}

impl Compound {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a simple selector to this compound.
    pub fn push(&mut self, part: SimpleSelector) {
        self.parts.push(part);
    }
}

/// One element in a selector chain: either a compound or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(Compound),
    Combinator(Combinator),
}

/// A full selector: chain of compound selectors joined by combinators.
///
/// For example, `ul > li.active` is a `ComplexSelector` with parts:
/// `[Compound(ul), Combinator(Child), Compound(li.active)]`. Always starts
/// and ends with a `SelectorPart::Compound`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

/// A comma-separated selector list. An element matches the list when it
/// matches any member (standard CSS OR semantics).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}
