use crate::dom::capability::Document;
use crate::dom::dom_model::NodeId;
use crate::error::{DomError, HintError};
use crate::scan::candidate::Candidate;
use crate::scan::scanner::{ScanReport, scan_error, visible_rect};

/// Input types a search query can be typed into.
const SEARCH_FIELD_TYPES: [&str; 2] = ["text", "search"];

/// Visible text and search fields of the root document's forms: forms in
/// document order, controls in form order. Frames are not entered.
pub fn search_fields(doc: &dyn Document) -> ScanReport {
    let mut report = ScanReport::default();
    let forms = match doc.forms() {
        Ok(forms) => forms,
        Err(source) => {
            report.record(HintError::Scan {
                document: doc.id(),
                node: None,
                source,
            });
            return report;
        }
    };

    for form in forms {
        let controls = match doc.form_controls(form) {
            Ok(controls) => controls,
            Err(source) => {
                report.record(scan_error(doc, form, source));
                continue;
            }
        };
        for control in controls {
            match search_field(doc, control) {
                Ok(Some(candidate)) => report.candidates.push(candidate),
                Ok(None) => {}
                Err(source) => report.record(scan_error(doc, control, source)),
            }
        }
    }
    report
}

fn search_field(doc: &dyn Document, node: NodeId) -> Result<Option<Candidate>, DomError> {
    let element = doc.element(node)?;
    let is_search_field = element.tag == "input"
        && element
            .input_type()
            .is_some_and(|ty| SEARCH_FIELD_TYPES.contains(&ty.as_str()));
    if !is_search_field {
        return Ok(None);
    }

    let viewport = doc.viewport();
    let Some(rect) = visible_rect(doc, node, &viewport)? else {
        return Ok(None);
    };
    Ok(Some(Candidate {
        element,
        document: doc.id(),
        rect,
        scroll_x: viewport.scroll_x,
        scroll_y: viewport.scroll_y,
        caption: None,
    }))
}
