use clap::Parser;
use keyhints::cli::commands::{load_page, summarize};
use keyhints::cli::config::{
    AppConfig, Cli, Commands, build_hint_config, load_config, resolve_trace_path,
};
use keyhints::cli::keys::{HostKey, KeyLoop, parse_keys};
use keyhints::label::strategy::HintStyle;
use keyhints::{HintCategory, Outcome};

mod common;
use crate::common::pages::links_page;
use crate::common::{letter_hinter, temp_path};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_labels_minimal() {
    let cli = Cli::parse_from(["keyhints", "labels", "--page", "page.json"]);
    match cli.command {
        Commands::Labels { page, category } => {
            assert_eq!(page, "page.json");
            assert_eq!(category, HintCategory::All, "Category defaults to all");
        }
        _ => panic!("Expected Labels command"),
    }
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.style, None);
}

#[test]
fn cli_parse_replay_with_globals() {
    let cli = Cli::parse_from([
        "keyhints",
        "replay",
        "--page",
        "page.yaml",
        "--category",
        "links",
        "--keys",
        "ab<Return>",
        "--style",
        "number",
        "--trace",
        "trace.jsonl",
        "-vv",
    ]);
    match cli.command {
        Commands::Replay {
            page,
            category,
            keys,
        } => {
            assert_eq!(page, "page.yaml");
            assert_eq!(category, HintCategory::Links);
            assert_eq!(keys, "ab<Return>");
        }
        _ => panic!("Expected Replay command"),
    }
    assert_eq!(cli.style, Some(HintStyle::Number));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_parse_search_and_focus() {
    let cli = Cli::parse_from(["keyhints", "search", "--page", "p.json", "--query", "cats"]);
    assert!(matches!(cli.command, Commands::Search { ref query, .. } if query == "cats"));

    let cli = Cli::parse_from(["keyhints", "focus", "--page", "p.json"]);
    assert!(matches!(cli.command, Commands::Focus { times: 1, .. }));
}

#[test]
fn cli_rejects_unknown_category() {
    let result = Cli::try_parse_from(["keyhints", "labels", "--page", "p.json", "--category", "videos"]);
    assert!(result.is_err());
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
fn load_config_missing_file_returns_defaults() {
    let config = load_config(Some("/nonexistent/keyhints.yaml"));
    assert_eq!(config.hints, Default::default());
    assert_eq!(config.trace, None);
}

#[test]
fn load_config_reads_yaml() {
    let path = temp_path("config.yaml");
    std::fs::write(
        &path,
        "hints:\n  style: number\n  active_color: \"#ff0000\"\ntrace: hints.jsonl\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.hints.style, HintStyle::Number);
    assert_eq!(config.hints.active_color, "#ff0000");
    assert_eq!(config.hints.font, "bold 10px monospace", "Unset fields keep defaults");
    assert_eq!(config.trace.as_deref(), Some("hints.jsonl"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_config_malformed_file_returns_defaults() {
    let path = temp_path("bad-config.yaml");
    std::fs::write(&path, "hints: [not, a, map]\n").unwrap();
    let config = load_config(path.to_str());
    assert_eq!(config.hints, Default::default());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn cli_flags_override_config_file() {
    let config = AppConfig {
        trace: Some("from-file.jsonl".into()),
        ..AppConfig::default()
    };
    assert_eq!(build_hint_config(&config, Some(HintStyle::Number)).style, HintStyle::Number);
    assert_eq!(build_hint_config(&config, None).style, HintStyle::Letter);
    assert_eq!(resolve_trace_path(&config, Some("cli.jsonl")), Some("cli.jsonl"));
    assert_eq!(resolve_trace_path(&config, None), Some("from-file.jsonl"));
}

// ============================================================================
// Page Loading Tests
// ============================================================================

#[test]
fn load_page_by_extension() {
    let json = temp_path("page.json");
    std::fs::write(&json, r#"{"elements": [{"tag": "a", "text": "home"}]}"#).unwrap();
    let page = load_page(json.to_str().unwrap()).unwrap();
    assert_eq!(page.find_by(|e| e.tag == "a").unwrap().text, "home");
    let _ = std::fs::remove_file(&json);

    let txt = temp_path("page.txt");
    std::fs::write(&txt, "").unwrap();
    assert!(load_page(txt.to_str().unwrap()).is_err(), "Unknown extension");
    let _ = std::fs::remove_file(&txt);
}

#[test]
fn summarize_flattens_and_shortens() {
    assert_eq!(summarize("  Sign \n in "), "Sign in");
    let long = "x".repeat(60);
    let short = summarize(&long);
    assert_eq!(short.chars().count(), 40);
    assert!(short.ends_with("..."));
}

// ============================================================================
// Key Replay Tests
// ============================================================================

#[test]
fn parse_keys_recognizes_named_keys() {
    assert_eq!(
        parse_keys("ab<BS>c<Tab><S-Tab><Return>"),
        vec![
            HostKey::Char('a'),
            HostKey::Char('b'),
            HostKey::Backspace,
            HostKey::Char('c'),
            HostKey::Tab,
            HostKey::ShiftTab,
            HostKey::Return,
        ]
    );
    assert_eq!(parse_keys("<tab><esc>"), vec![HostKey::Tab, HostKey::Escape], "Case-insensitive");
    assert_eq!(
        parse_keys("<x<lt>"),
        vec![HostKey::Char('<'), HostKey::Char('x'), HostKey::Char('<')]
    );
    assert_eq!(parse_keys("é"), vec![HostKey::Char('é')]);
}

#[test]
fn key_loop_accumulates_and_resets_input() {
    let mut page = links_page(30);
    let mut hinter = letter_hinter();
    let mut keys = KeyLoop::default();

    assert_eq!(keys.press(&mut hinter, &mut page, HostKey::Char('j')), None);
    assert_eq!(keys.input(), "j", "First key opens a session and narrows it");
    assert!(hinter.is_open());

    assert_eq!(keys.press(&mut hinter, &mut page, HostKey::Backspace), None);
    assert_eq!(keys.input(), "");
    assert_eq!(hinter.session().unwrap().filtered_len(), 30);

    assert_eq!(keys.press(&mut hinter, &mut page, HostKey::Backspace), None, "Nothing to delete");

    keys.press(&mut hinter, &mut page, HostKey::Char('j'));
    let outcome = keys.press(&mut hinter, &mut page, HostKey::Char('k'));
    assert_eq!(outcome, Some(Outcome::Activated(keyhints::Activation::Click)));
    assert_eq!(keys.input(), "", "Resolved session starts typing over");
}

#[test]
fn key_loop_confirms_and_escapes() {
    let mut page = links_page(5);
    let mut hinter = letter_hinter();
    hinter.open_session(&mut page, HintCategory::All);
    let mut keys = KeyLoop::default();

    keys.press(&mut hinter, &mut page, HostKey::Tab);
    keys.press(&mut hinter, &mut page, HostKey::Escape);
    assert!(!hinter.is_open());

    hinter.open_session(&mut page, HintCategory::All);
    keys.press(&mut hinter, &mut page, HostKey::ShiftTab);
    assert_eq!(
        keys.press(&mut hinter, &mut page, HostKey::Return),
        Some(Outcome::Activated(keyhints::Activation::Click))
    );
    assert!(!hinter.is_open());
}
