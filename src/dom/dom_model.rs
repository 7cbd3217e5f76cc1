use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page-unique handle of an element. Stays valid across frames, so an element
/// found inside an iframe can be focused or clicked without its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

/// Client rectangle of an element, relative to its document's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 20.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// The two computed-style properties that decide whether an element can be hinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default)]
    pub visibility_hidden: bool,
    #[serde(default)]
    pub display_none: bool,
}

impl ComputedStyle {
    pub fn is_hidden(&self) -> bool {
        self.visibility_hidden || self.display_none
    }
}

/// Snapshot of the element facts the hinting engine needs.
///
/// `tag` is lowercase; attribute names are lowercase, values are kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub node: NodeId,
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Full text content, descendants included.
    #[serde(default)]
    pub text: String,
    /// Owning form, for form controls.
    #[serde(default)]
    pub form: Option<NodeId>,
}

impl ElementInfo {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The `type` property as the DOM reports it: lowercase, `text` for an
    /// `input` without a type attribute, `textarea` for textareas.
    pub fn input_type(&self) -> Option<String> {
        match self.tag.as_str() {
            "input" => Some(
                self.attr("type")
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "text".to_string()),
            ),
            "textarea" => Some("textarea".to_string()),
            _ => None,
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.tag.as_str(), "frame" | "iframe")
    }

    /// Form submission method, lowercase; `get` when unspecified.
    pub fn form_method(&self) -> String {
        self.attr("method")
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "get".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    Click,
    MouseDown,
}

impl MouseEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseEventKind::Click => "click",
            MouseEventKind::MouseDown => "mousedown",
        }
    }
}
