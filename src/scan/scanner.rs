use tracing::{debug, warn};

use crate::dom::capability::Document;
use crate::dom::dom_model::{NodeId, Rect, Viewport};
use crate::dom::selector::Selector;
use crate::error::{DomError, HintError};
use crate::scan::candidate::{Candidate, HintCategory};

/// Result of a scan: every candidate that could be collected, plus the
/// failures that were skipped over on the way.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub candidates: Vec<Candidate>,
    pub failures: Vec<HintError>,
}

impl ScanReport {
    pub(crate) fn record(&mut self, error: HintError) {
        warn!(error = %error, "skipping part of the page during hint scan");
        self.failures.push(error);
    }
}

/// Collect the visible candidates of `category` in `root` and, depth first,
/// in every visible embedded frame.
pub fn scan(category: HintCategory, root: &dyn Document) -> ScanReport {
    let selector = Selector::for_category(category).with_frames();
    let mut report = ScanReport::default();
    scan_document(root, &selector, &mut report);
    debug!(
        category = %category,
        candidates = report.candidates.len(),
        failures = report.failures.len(),
        "hint scan finished"
    );
    report
}

fn scan_document(doc: &dyn Document, selector: &Selector, report: &mut ScanReport) {
    let nodes = match doc.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(source) => {
            report.record(HintError::Scan {
                document: doc.id(),
                node: None,
                source,
            });
            return;
        }
    };
    let viewport = doc.viewport();

    for node in nodes {
        let element = match doc.element(node) {
            Ok(element) => element,
            Err(source) => {
                report.record(scan_error(doc, node, source));
                continue;
            }
        };

        let rect = match visible_rect(doc, node, &viewport) {
            Ok(Some(rect)) => rect,
            Ok(None) => continue,
            Err(source) => {
                report.record(scan_error(doc, node, source));
                continue;
            }
        };

        if element.is_frame() {
            match doc.frame_document(node) {
                Ok(Some(frame)) => scan_document(frame, selector, report),
                Ok(None) => {}
                Err(source) => report.record(scan_error(doc, node, source)),
            }
            continue;
        }

        let caption = match caption_for(doc, &element.tag, element.attr("id")) {
            Ok(caption) => caption,
            Err(source) => {
                report.record(scan_error(doc, node, source));
                None
            }
        };

        report.candidates.push(Candidate {
            element,
            document: doc.id(),
            rect,
            scroll_x: viewport.scroll_x,
            scroll_y: viewport.scroll_y,
            caption,
        });
    }
}

pub(crate) fn scan_error(doc: &dyn Document, node: NodeId, source: DomError) -> HintError {
    HintError::Scan {
        document: doc.id(),
        node: Some(node),
        source,
    }
}

/// The element's client rectangle, or `None` when it is hidden by style, lies
/// entirely outside the viewport, or has no client rectangles at all.
pub fn visible_rect(
    doc: &dyn Document,
    node: NodeId,
    viewport: &Viewport,
) -> Result<Option<Rect>, DomError> {
    if doc.computed_style(node)?.is_hidden() {
        return Ok(None);
    }

    let rect = doc.bounding_rect(node)?;
    if rect.top > viewport.height
        || rect.bottom() < 0.0
        || rect.left > viewport.width
        || rect.right() < 0.0
    {
        return Ok(None);
    }

    if doc.client_rect_count(node)? == 0 {
        return Ok(None);
    }

    Ok(Some(rect))
}

fn caption_for(
    doc: &dyn Document,
    tag: &str,
    id: Option<&str>,
) -> Result<Option<String>, DomError> {
    match id {
        Some(id) if tag == "input" => doc.label_caption(id),
        _ => Ok(None),
    }
}
