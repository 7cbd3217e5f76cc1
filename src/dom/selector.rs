use crate::dom::dom_model::ElementInfo;
use crate::scan::candidate::HintCategory;

/// One simple selector of a selector group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// `tag`
    Tag(&'static str),
    /// `input:not([type=...])`
    InputExcept(&'static str),
    /// `input[type=...]`
    InputOfType(&'static str),
    /// `*[attr]`
    Attribute(&'static str),
}

impl Matcher {
    fn matches(&self, element: &ElementInfo) -> bool {
        match self {
            Matcher::Tag(tag) => element.tag == *tag,
            Matcher::InputExcept(ty) => {
                element.tag == "input" && element.input_type().as_deref() != Some(*ty)
            }
            Matcher::InputOfType(ty) => {
                element.tag == "input" && element.input_type().as_deref() == Some(*ty)
            }
            Matcher::Attribute(name) => element.has_attr(name),
        }
    }

    fn css(&self) -> String {
        match self {
            Matcher::Tag(tag) => tag.to_string(),
            Matcher::InputExcept(ty) => format!("input:not([type={}])", ty),
            // Untyped inputs are text inputs, but `[type=text]` does not see them.
            Matcher::InputOfType("text") => "input[type=text], input:not([type])".to_string(),
            Matcher::InputOfType(ty) => format!("input[type={}]", ty),
            Matcher::Attribute(name) => format!("*[{}]", name),
        }
    }
}

/// A comma-separated selector group; an element matches when any member does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    matchers: Vec<Matcher>,
}

impl Selector {
    pub fn new(matchers: Vec<Matcher>) -> Self {
        Self { matchers }
    }

    pub fn for_category(category: HintCategory) -> Self {
        let matchers = match category {
            HintCategory::All => vec![
                Matcher::Tag("a"),
                Matcher::Tag("map"),
                Matcher::Tag("textarea"),
                Matcher::Tag("select"),
                Matcher::InputExcept("hidden"),
                Matcher::Tag("button"),
                Matcher::Tag("frame"),
                Matcher::Tag("iframe"),
                Matcher::Attribute("onclick"),
                Matcher::Attribute("onmousedown"),
            ],
            HintCategory::Links => vec![Matcher::Tag("a")],
            HintCategory::Images => vec![Matcher::Tag("img")],
            HintCategory::Editable => vec![
                Matcher::InputOfType("text"),
                Matcher::InputOfType("password"),
                Matcher::InputOfType("search"),
                Matcher::Tag("textarea"),
            ],
        };
        Self { matchers }
    }

    /// Inputs visited by focus cycling.
    pub fn text_inputs() -> Self {
        Self::new(vec![
            Matcher::InputOfType("text"),
            Matcher::InputOfType("password"),
            Matcher::Tag("textarea"),
        ])
    }

    /// Adds `frame, iframe` so embedded documents are reached whatever the category.
    pub fn with_frames(mut self) -> Self {
        for tag in ["frame", "iframe"] {
            let matcher = Matcher::Tag(tag);
            if !self.matchers.contains(&matcher) {
                self.matchers.push(matcher);
            }
        }
        self
    }

    pub fn matches(&self, element: &ElementInfo) -> bool {
        self.matchers.iter().any(|m| m.matches(element))
    }

    /// CSS text of the group, for hosts backed by a real `querySelectorAll`.
    pub fn to_css(&self) -> String {
        self.matchers
            .iter()
            .map(Matcher::css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
