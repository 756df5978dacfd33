use super::Style;

/// What a rule applies to. Selectors are matched within a single tree: a
/// stylesheet never reaches into or out of a shadow root, except through
/// [`Selector::Part`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `:host`, the element a shadow root is attached to. Only meaningful in
    /// a shadow root's stylesheet; rules of the host's own tree win over it.
    Host,
    /// Elements of the same tree with this tag.
    Tag(String),
    /// `::part(name)`, elements exported by shadow hosts of this tree.
    Part(String),
}

impl Selector {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn part(part: impl Into<String>) -> Self {
        Self::Part(part.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: Selector,
    /// Applies only while the element has focus.
    pub focused: bool,
    pub style: Style,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(&mut self, selector: Selector, style: Style) -> &mut Self {
        self.rules.push(Rule {
            selector,
            focused: false,
            style,
        });
        self
    }

    pub fn rule_focused(&mut self, selector: Selector, style: Style) -> &mut Self {
        self.rules.push(Rule {
            selector,
            focused: true,
            style,
        });
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge every rule matching `selector` into `style`, in declaration
    /// order.
    pub(crate) fn apply(&self, selector: &Selector, focused: bool, style: &mut Style) {
        for rule in &self.rules {
            if rule.selector == *selector && (!rule.focused || focused) {
                style.merge(&rule.style);
            }
        }
    }
}
