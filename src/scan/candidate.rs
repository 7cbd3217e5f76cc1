use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::dom_model::{DocumentId, ElementInfo, Rect};

/// Which elements a hint session offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintCategory {
    /// Links, form controls, buttons, and anything with a click or mousedown handler.
    #[default]
    All,
    Links,
    Images,
    Editable,
}

impl HintCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HintCategory::All => "all",
            HintCategory::Links => "links",
            HintCategory::Images => "images",
            HintCategory::Editable => "editable",
        }
    }
}

impl fmt::Display for HintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HintCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(HintCategory::All),
            "links" => Ok(HintCategory::Links),
            "images" => Ok(HintCategory::Images),
            "editable" => Ok(HintCategory::Editable),
            other => Err(format!(
                "unknown hint category '{}' (expected all, links, images or editable)",
                other
            )),
        }
    }
}

/// A visible element eligible for a hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub element: ElementInfo,
    pub document: DocumentId,
    /// Client rectangle at scan time.
    pub rect: Rect,
    /// Scroll offsets of the owning document at scan time.
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub caption: Option<String>,
}

impl Candidate {
    /// Top edge in page coordinates.
    pub fn page_top(&self) -> f64 {
        self.rect.top + self.scroll_y
    }

    /// Left edge in page coordinates.
    pub fn page_left(&self) -> f64 {
        self.rect.left + self.scroll_x
    }
}
