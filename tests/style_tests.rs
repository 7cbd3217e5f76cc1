use keyhints::dom::dom_model::{DocumentId, ElementInfo, NodeId, Rect};
use keyhints::label::strategy::{HintStyle, LabelStrategy};
use keyhints::scan::candidate::Candidate;
use keyhints::style::marker::{HINT_CLASS, LabelMarker, OVERLAY_CLASS, OverlayDescriptor};
use keyhints::style::stylesheet::{HintLook, enlarged_font_size, overlay_color};
use keyhints::HintConfig;

fn candidate(rect: Rect, scroll_x: f64, scroll_y: f64, caption: Option<&str>) -> Candidate {
    Candidate {
        element: ElementInfo {
            node: NodeId(4),
            tag: "a".into(),
            attributes: Default::default(),
            text: "docs".into(),
            form: None,
        },
        document: DocumentId(0),
        rect,
        scroll_x,
        scroll_y,
        caption: caption.map(str::to_string),
    }
}

// =========================================================================
// Colors and fonts
// =========================================================================

#[test]
fn overlay_color_expands_hex_colors() {
    assert_eq!(overlay_color("#00ff00", 0.8), "rgba(0,255,0,0.4)");
    assert_eq!(overlay_color("#ffff99", 0.8), "rgba(255,255,153,0.4)");
    assert_eq!(overlay_color("#0f0", 0.8), "rgba(0,255,0,0.4)", "Short form");
    assert_eq!(overlay_color("#123", 1.0), "rgba(3,8,15,0.5)", "Short digits map to (v+1)^2-1");
}

#[test]
fn overlay_color_passes_other_colors_through() {
    assert_eq!(overlay_color("red", 0.8), "red");
    assert_eq!(overlay_color("#12", 0.8), "#12");
    assert_eq!(overlay_color("#ggg", 0.8), "#ggg");
    assert_eq!(overlay_color("#éé", 0.8), "#éé");
}

#[test]
fn active_font_is_a_quarter_larger() {
    assert_eq!(enlarged_font_size("bold 10px monospace").as_deref(), Some("13px"));
    assert_eq!(enlarged_font_size("12px sans").as_deref(), Some("15px"));
    assert_eq!(enlarged_font_size("monospace"), None);
}

#[test]
fn stylesheet_carries_configured_look() {
    let look = HintLook::from_config(&HintConfig::default());
    assert!(look.css.contains(&format!(".{}", HINT_CLASS)));
    assert!(look.css.contains(&format!(".{}", OVERLAY_CLASS)));
    assert!(look.css.contains("z-index:20000"));
    assert!(look.css.contains("background:#ffffff"));
    assert!(look.css.contains("border:1px solid #000000"));
    assert!(look.css.contains("background:rgba(255,255,153,0.4)"), "Overlay uses the normal color");
    assert_eq!(look.active_color, "rgba(0,255,0,0.4)");
    assert_eq!(look.active_font_size.as_deref(), Some("13px"));
}

// =========================================================================
// Markers
// =========================================================================

#[test]
fn label_sits_at_page_corner() {
    let marker = LabelMarker::for_candidate(&candidate(Rect::new(20.0, 30.0, 50.0, 10.0), 5.0, 100.0, None), "FD", true);
    assert_eq!((marker.top, marker.left), (120.0, 35.0));
    assert_eq!(marker.class_name, HINT_CLASS);
    assert_eq!(marker.display_text(), "FD");
}

#[test]
fn label_shows_caption() {
    let marker = LabelMarker::for_candidate(&candidate(Rect::default(), 0.0, 0.0, Some("Email")), "S", true);
    assert_eq!(marker.display_text(), "S : Email");
}

#[test]
fn overlay_clips_left_and_top_overflow() {
    let overlay = OverlayDescriptor::for_candidate(
        &candidate(Rect::new(-4.0, -10.0, 50.0, 20.0), 0.0, 0.0, None),
        "red",
    );
    assert_eq!((overlay.top, overlay.left), (0.0, 0.0));
    assert_eq!((overlay.width, overlay.height), (40.0, 16.0));
    assert_eq!(overlay.background, "red");
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn default_config_matches_browser_defaults() {
    let config = HintConfig::default();
    assert_eq!(config.alphabet, "FDSARTGBVECWXQYIOPMNHZULKJ");
    assert_eq!(config.font, "bold 10px monospace");
    assert_eq!(config.style, HintStyle::Letter);
    assert_eq!(config.opacity, 0.8);
    assert!(!config.mark_all_hints);
}

#[test]
fn partial_yaml_config_keeps_defaults() {
    let config: HintConfig = serde_yaml::from_str("style: number\nmark_all_hints: true\n").unwrap();
    assert_eq!(config.style, HintStyle::Number);
    assert!(config.mark_all_hints);
    assert_eq!(config.active_color, "#00ff00");
    assert_eq!(config.strategy().unwrap(), LabelStrategy::Numeric);
}

#[test]
fn config_validation() {
    let bad_opacity = HintConfig {
        opacity: -0.1,
        ..HintConfig::default()
    };
    assert!(bad_opacity.strategy().is_err());

    let bad_alphabet = HintConfig {
        alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXY".into(),
        style: HintStyle::Number,
        ..HintConfig::default()
    };
    let err = bad_alphabet.strategy().unwrap_err();
    assert!(
        err.to_string().contains("alphabet"),
        "Numeric hints still need a letter alphabet: {}",
        err
    );
}

#[test]
fn hint_style_parses_from_text() {
    assert_eq!("Number".parse::<HintStyle>(), Ok(HintStyle::Number));
    assert!("roman".parse::<HintStyle>().is_err());
}
