use std::path::Path;

use tracing::debug;

use crate::cli::keys::{KeyLoop, parse_keys};
use crate::dom::static_page::{PageSpec, StaticPage};
use crate::scan::candidate::HintCategory;
use crate::session::hint_config::HintConfig;
use crate::session::hinter::Hinter;
use crate::trace::logger::TraceLogger;

// ============================================================================
// labels subcommand
// ============================================================================

pub fn cmd_labels(
    page_path: &str,
    category: HintCategory,
    hints: &HintConfig,
    trace: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = load_page(page_path)?;
    let mut hinter = build_hinter(hints, trace)?;

    if let Some(outcome) = hinter.open_session(&mut page, category) {
        println!("{}", outcome);
        print_dispatches(&page)?;
        return Ok(());
    }

    if let Some(session) = hinter.session() {
        for hint in session.hints() {
            let element = &hint.candidate.element;
            println!(
                "{}\t<{}>\t{}",
                hint.label,
                element.tag,
                summarize(hint.text())
            );
        }
    }
    report_skipped(&hinter);
    hinter.clear(&mut page);
    Ok(())
}

// ============================================================================
// replay subcommand
// ============================================================================

pub fn cmd_replay(
    page_path: &str,
    category: HintCategory,
    keys: &str,
    hints: &HintConfig,
    trace: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = load_page(page_path)?;
    let mut hinter = build_hinter(hints, trace)?;

    if let Some(outcome) = hinter.open_session(&mut page, category) {
        println!("{}", outcome);
        print_dispatches(&page)?;
        return Ok(());
    }
    report_skipped(&hinter);

    let keys = parse_keys(keys);
    let mut key_loop = KeyLoop::default();
    let mut resolved = None;
    for (i, key) in keys.iter().enumerate() {
        let outcome = key_loop.press(&mut hinter, &mut page, *key);
        debug!(?key, input = key_loop.input(), ?outcome, "key replayed");
        if let Some(outcome) = outcome {
            println!("{}", outcome);
            if !hinter.is_open() {
                resolved = Some(keys.len() - i - 1);
                break;
            }
        }
    }

    match resolved {
        Some(ignored) if ignored > 0 => {
            eprintln!("Session resolved, {} remaining keys ignored", ignored);
        }
        Some(_) => {}
        None => {
            if let Some(session) = hinter.session() {
                let labels: Vec<&str> = session.filtered().map(|h| h.label.as_str()).collect();
                println!("open: {}", labels.join(" "));
                if let Some(active) = session.active_hint() {
                    println!("active: {}", active.label);
                }
            }
            hinter.clear(&mut page);
        }
    }

    print_dispatches(&page)?;
    Ok(())
}

// ============================================================================
// search subcommand
// ============================================================================

pub fn cmd_search(
    page_path: &str,
    query: &str,
    hints: &HintConfig,
    trace: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = load_page(page_path)?;
    let mut hinter = build_hinter(hints, trace)?;

    if let Some(outcome) = hinter.open_search_engine_session(&mut page) {
        println!("{}", outcome);
        return Ok(());
    }

    match hinter.submit_search_engine(&mut page, query) {
        Some(name) => println!("post: {}", name),
        None => println!("submitted"),
    }
    print_dispatches(&page)?;
    Ok(())
}

// ============================================================================
// focus subcommand
// ============================================================================

pub fn cmd_focus(
    page_path: &str,
    times: usize,
    hints: &HintConfig,
    trace: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = load_page(page_path)?;
    let mut hinter = build_hinter(hints, trace)?;

    for _ in 0..times {
        if let Some(outcome) = hinter.cycle_input_focus(&mut page) {
            println!("{}", outcome);
            return Ok(());
        }
    }
    print_dispatches(&page)?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a page description, choosing the format from the file extension.
pub fn load_page(path: &str) -> Result<StaticPage, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let spec = match extension.as_deref() {
        Some("json") => PageSpec::from_json(&content)?,
        Some("yaml") | Some("yml") => PageSpec::from_yaml(&content)?,
        _ => return Err(format!("unsupported page format: {}", path).into()),
    };
    Ok(StaticPage::new(&spec))
}

fn build_hinter(hints: &HintConfig, trace: Option<&str>) -> Result<Hinter, Box<dyn std::error::Error>> {
    let tracer = match trace {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    Ok(Hinter::new(hints.clone())?.with_trace(tracer))
}

/// Print every recorded interaction as one JSON object per line.
fn print_dispatches(page: &StaticPage) -> Result<(), Box<dyn std::error::Error>> {
    for record in page.dispatcher.records() {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

fn report_skipped(hinter: &Hinter) {
    if !hinter.diagnostics().is_empty() {
        eprintln!("Skipped {} unreadable elements", hinter.diagnostics().len());
    }
}

/// Element text on one line, shortened for a terminal column.
pub fn summarize(text: &str) -> String {
    const MAX: usize = 40;
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > MAX {
        let cut: String = line.chars().take(MAX - 3).collect();
        format!("{}...", cut)
    } else {
        line
    }
}
