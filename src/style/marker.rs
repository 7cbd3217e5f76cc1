use serde::Serialize;

use crate::dom::dom_model::{DocumentId, NodeId};
use crate::scan::candidate::Candidate;

pub const HINT_CLASS: &str = "keyhints_hint";
pub const OVERLAY_CLASS: &str = "keyhints_overlay";

/// Handle issued by a `Renderer` for every marker it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerId(pub u64);

/// The small tag carrying a hint's label, placed at the element's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMarker {
    pub document: DocumentId,
    pub node: NodeId,
    pub class_name: &'static str,
    pub top: f64,
    pub left: f64,
    pub text: String,
    /// Caption of an attached `<label>`, rendered after the label as ` : caption`.
    pub caption: Option<String>,
    pub visible: bool,
}

/// Highlight rectangle drawn over a hinted element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayDescriptor {
    pub document: DocumentId,
    pub node: NodeId,
    pub class_name: &'static str,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Marker {
    Label(LabelMarker),
    Overlay(OverlayDescriptor),
}

impl Marker {
    pub fn node(&self) -> NodeId {
        match self {
            Marker::Label(label) => label.node,
            Marker::Overlay(overlay) => overlay.node,
        }
    }
}

/// Style change applied to a marker that is already shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerPaint {
    Background(String),
    FontSize(String),
    Font(String),
}

/// Page position of the marker corner: the element's corner in page
/// coordinates, clamped to the scrolled viewport origin.
fn corner(candidate: &Candidate) -> (f64, f64) {
    (
        candidate.page_top().max(candidate.scroll_y),
        candidate.page_left().max(candidate.scroll_x),
    )
}

impl LabelMarker {
    pub fn for_candidate(candidate: &Candidate, text: &str, visible: bool) -> Self {
        let (top, left) = corner(candidate);
        Self {
            document: candidate.document,
            node: candidate.element.node,
            class_name: HINT_CLASS,
            top,
            left,
            text: text.to_string(),
            caption: candidate.caption.clone(),
            visible,
        }
    }

    /// Text as rendered, caption included.
    pub fn display_text(&self) -> String {
        match &self.caption {
            Some(caption) => format!("{} : {}", self.text, caption),
            None => self.text.clone(),
        }
    }
}

impl OverlayDescriptor {
    /// Overlay covering the visible part of the element: the part above or left
    /// of the viewport origin is cut off.
    pub fn for_candidate(candidate: &Candidate, background: &str) -> Self {
        let (top, left) = corner(candidate);
        let rect = candidate.rect;
        let width = if rect.left > 0.0 {
            rect.width
        } else {
            rect.width + rect.left
        };
        let height = if rect.top > 0.0 {
            rect.height
        } else {
            rect.height + rect.top
        };
        Self {
            document: candidate.document,
            node: candidate.element.node,
            class_name: OVERLAY_CLASS,
            top,
            left,
            width,
            height,
            background: background.to_string(),
        }
    }
}
