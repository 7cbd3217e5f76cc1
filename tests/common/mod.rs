#![allow(dead_code)]

pub mod pages;

use keyhints::dom::dom_model::NodeId;
use keyhints::dom::static_page::StaticPage;
use keyhints::label::strategy::HintStyle;
use keyhints::{HintConfig, Hinter};

pub fn letter_hinter() -> Hinter {
    Hinter::new(HintConfig::default()).unwrap()
}

pub fn numeric_hinter() -> Hinter {
    let config = HintConfig {
        style: HintStyle::Number,
        ..HintConfig::default()
    };
    Hinter::new(config).unwrap()
}

pub fn marking_hinter() -> Hinter {
    let config = HintConfig {
        mark_all_hints: true,
        ..HintConfig::default()
    };
    Hinter::new(config).unwrap()
}

/// Node of the first element whose text is exactly `text`.
pub fn node_with_text(page: &StaticPage, text: &str) -> NodeId {
    page.find_by(|e| e.text == text)
        .unwrap_or_else(|| panic!("no element with text {:?}", text))
        .node
}

/// Node of the first element carrying `name=...`.
pub fn node_named(page: &StaticPage, name: &str) -> NodeId {
    page.find_by(|e| e.attr("name") == Some(name))
        .unwrap_or_else(|| panic!("no element named {:?}", name))
        .node
}

/// Labels of the open session, in scan order.
pub fn session_labels(hinter: &Hinter) -> Vec<String> {
    hinter
        .session()
        .map(|s| s.labels().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn active_label(hinter: &Hinter) -> Option<String> {
    hinter
        .session()
        .and_then(|s| s.active_hint())
        .map(|h| h.label.clone())
}

/// A file under the system temp dir, unique per test name.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("keyhints-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}
