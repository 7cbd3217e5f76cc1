use serde::{Deserialize, Serialize};

use crate::error::HintError;
use crate::label::alphabet::{Alphabet, DEFAULT_LETTERS};
use crate::label::strategy::{HintStyle, LabelStrategy};

/// Options accepted at init.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintConfig {
    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    /// CSS font shorthand of the labels, e.g. `bold 10px monospace`.
    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default)]
    pub style: HintStyle,

    #[serde(default = "default_fg_color")]
    pub fg_color: String,

    #[serde(default = "default_bg_color")]
    pub bg_color: String,

    #[serde(default = "default_active_color")]
    pub active_color: String,

    #[serde(default = "default_normal_color")]
    pub normal_color: String,

    #[serde(default = "default_border")]
    pub border: String,

    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Keep a highlight overlay on every hint instead of only the active one.
    #[serde(default)]
    pub mark_all_hints: bool,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            alphabet: default_alphabet(),
            font: default_font(),
            style: HintStyle::Letter,
            fg_color: default_fg_color(),
            bg_color: default_bg_color(),
            active_color: default_active_color(),
            normal_color: default_normal_color(),
            border: default_border(),
            opacity: default_opacity(),
            mark_all_hints: false,
        }
    }
}

impl HintConfig {
    /// Check the options and build the label strategy they select.
    pub fn strategy(&self) -> Result<LabelStrategy, HintError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(HintError::Config(format!(
                "opacity must be between 0 and 1, got {}",
                self.opacity
            )));
        }
        // The alphabet is validated for numeric hints too: search-engine
        // sessions always use letters.
        let alphabet = Alphabet::new(&self.alphabet)?;
        Ok(match self.style {
            HintStyle::Letter => LabelStrategy::Letter(alphabet),
            HintStyle::Number => LabelStrategy::Numeric,
        })
    }
}

// Serde default helpers
fn default_alphabet() -> String { DEFAULT_LETTERS.to_string() }
fn default_font() -> String { "bold 10px monospace".to_string() }
fn default_fg_color() -> String { "#000000".to_string() }
fn default_bg_color() -> String { "#ffffff".to_string() }
fn default_active_color() -> String { "#00ff00".to_string() }
fn default_normal_color() -> String { "#ffff99".to_string() }
fn default_border() -> String { "1px solid #000000".to_string() }
fn default_opacity() -> f64 { 0.8 }
