use crate::session::hint_config::HintConfig;
use crate::style::marker::{HINT_CLASS, OVERLAY_CLASS};

/// Which rule set a stylesheet carries. A document holds at most one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Hints,
    FocusOutline,
}

/// Rule injected once per document by focus cycling.
pub const FOCUS_OUTLINE_CSS: &str = "input:focus { outline: 2px solid #1793d1; }";

/// Everything the session needs to paint hints, derived once from the config.
#[derive(Debug, Clone, PartialEq)]
pub struct HintLook {
    pub font: String,
    /// Font size of the active label; `None` when the font names no size.
    pub active_font_size: Option<String>,
    pub active_color: String,
    pub normal_color: String,
    pub mark_all_hints: bool,
    pub css: String,
}

impl HintLook {
    pub fn from_config(config: &HintConfig) -> Self {
        let normal_color = overlay_color(&config.normal_color, config.opacity);
        Self {
            font: config.font.clone(),
            active_font_size: enlarged_font_size(&config.font),
            active_color: overlay_color(&config.active_color, config.opacity),
            css: hint_css(config, &normal_color),
            normal_color,
            mark_all_hints: config.mark_all_hints,
        }
    }
}

fn hint_css(config: &HintConfig, normal_color: &str) -> String {
    format!(
        ".{hint} {{ position:absolute; z-index:20000; background:{bg}; color:{fg}; \
         border:{border}; font:{font}; display:inline; opacity:{opacity}; }} \
         .{overlay} {{ position:absolute!important; display:block!important; \
         z-index:19999; background:{normal}; cursor:pointer; }}",
        hint = HINT_CLASS,
        overlay = OVERLAY_CLASS,
        bg = config.bg_color,
        fg = config.fg_color,
        border = config.border,
        font = config.font,
        opacity = config.opacity,
        normal = normal_color,
    )
}

/// Translucent overlay color: `#rgb` and `#rrggbb` become
/// `rgba(r,g,b,opacity/2)`, anything else is used as given.
///
/// Short-form digits expand as `(v + 1)^2 - 1`, so `f` is 255 and `0` is 0.
pub fn overlay_color(color: &str, opacity: f64) -> String {
    let Some(hex) = color.strip_prefix('#').filter(|h| h.is_ascii()) else {
        return color.to_string();
    };

    let channels: Option<Vec<u32>> = match hex.len() {
        3 => hex
            .chars()
            .map(|c| c.to_digit(16).map(|v| (v + 1) * (v + 1) - 1))
            .collect(),
        6 => (0..3)
            .map(|i| u32::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok())
            .collect(),
        _ => None,
    };

    match channels {
        Some(c) => format!("rgba({},{},{},{})", c[0], c[1], c[2], opacity / 2.0),
        None => color.to_string(),
    }
}

/// Active labels are drawn 25% larger: the digits of the font spec, times
/// 1.25, rounded up, in pixels.
pub fn enlarged_font_size(font: &str) -> Option<String> {
    let digits: String = font.chars().filter(|c| c.is_ascii_digit()).collect();
    let size: f64 = digits.parse().ok()?;
    Some(format!("{}px", (size * 1.25).ceil()))
}
