use keyhints::dom::capability::Page;
use keyhints::dom::static_page::{DispatchRecord, ElementSpec, StaticPage};
use keyhints::session::search_engine::search_fields;
use keyhints::session::session_model::SessionKind;
use keyhints::{HintCategory, Outcome};

mod common;
use crate::common::pages::{link, page_of, search_form, slot};
use crate::common::{letter_hinter, node_named};

fn form_of(page: &StaticPage, field: &str) -> keyhints::dom::dom_model::NodeId {
    page.find(node_named(page, field)).unwrap().form.unwrap()
}

// =========================================================================
// Field discovery
// =========================================================================

#[test]
fn search_fields_are_text_and_search_inputs_of_forms() {
    let page = page_of(vec![
        ElementSpec::input("text").attr("name", "loose").at(slot(0)),
        ElementSpec::new("form")
            .child(ElementSpec::input("password").attr("name", "pw").at(slot(1)))
            .child(ElementSpec::input("search").attr("name", "s").at(slot(2)))
            .child(ElementSpec::input("text").attr("name", "hidden").hidden().at(slot(3))),
        ElementSpec::new("form")
            .child(ElementSpec::new("input").attr("name", "untyped").at(slot(4)))
            .child(ElementSpec::new("textarea").attr("name", "notes").at(slot(5))),
    ]);

    let report = search_fields(page.document());
    let names: Vec<&str> = report
        .candidates
        .iter()
        .map(|c| c.element.attr("name").unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["s", "untyped"],
        "Forms in document order, visible text-like inputs only"
    );
    assert!(report.failures.is_empty());
}

#[test]
fn search_fields_ignore_frames() {
    let inner = keyhints::PageSpec::new().element(search_form("get"));
    let page = page_of(vec![ElementSpec::new("iframe").at(slot(0)).embedding(inner)]);
    assert!(search_fields(page.document()).candidates.is_empty());
}

// =========================================================================
// Sessions
// =========================================================================

#[test]
fn get_form_submission_returns_nothing() {
    let mut page = page_of(vec![search_form("get")]);
    let q = node_named(&page, "q");
    let form = form_of(&page, "q");
    let mut hinter = letter_hinter();

    assert_eq!(hinter.open_search_engine_session(&mut page), None);
    assert!(
        page.renderer.visible_labels().is_empty(),
        "Search fields are offered without visible labels"
    );
    assert_eq!(page.renderer.overlays().len(), 1, "First field is highlighted");
    assert_eq!(page.renderer.overlays()[0].node, q);

    let name = hinter.submit_search_engine(&mut page, "cats");
    assert_eq!(name, None);
    assert_eq!(
        page.dispatcher.records(),
        &[
            DispatchRecord::SetValue {
                node: q,
                value: "cats".into()
            },
            DispatchRecord::Submit { form },
            DispatchRecord::SetValue {
                node: q,
                value: String::new()
            },
        ]
    );
    assert_eq!(page.dispatcher.value(q), Some(""), "Field emptied after submission");
    assert!(!hinter.is_open());
    assert_eq!(page.renderer.marker_count(), 0);
}

#[test]
fn post_form_submission_returns_field_name() {
    let mut page = page_of(vec![search_form("POST")]);
    let mut hinter = letter_hinter();

    hinter.open_search_engine_session(&mut page);
    assert_eq!(
        hinter.submit_search_engine(&mut page, "cats").as_deref(),
        Some("q")
    );
}

#[test]
fn focus_next_moves_between_search_fields() {
    let mut page = page_of(vec![
        search_form("get"),
        ElementSpec::new("form").child(ElementSpec::input("search").attr("name", "site").at(slot(4))),
    ]);
    let site = node_named(&page, "site");
    let mut hinter = letter_hinter();

    hinter.open_search_engine_session(&mut page);
    hinter.focus_next(&mut page);
    hinter.submit_search_engine(&mut page, "rust");

    assert_eq!(
        page.dispatcher.records()[0],
        DispatchRecord::SetValue {
            node: site,
            value: "rust".into()
        }
    );
}

#[test]
fn deleting_input_keeps_search_labels_hidden() {
    let forms = (0..30)
        .map(|i| ElementSpec::new("form").child(ElementSpec::input("text").attr("name", &format!("q{}", i)).at(slot(i))))
        .collect();
    let mut page = page_of(forms);
    let mut hinter = letter_hinter();

    hinter.open_search_engine_session(&mut page);
    assert_eq!(hinter.update(&mut page, "l"), None);
    assert_eq!(hinter.session().unwrap().filtered_len(), 3);
    assert_eq!(hinter.update(&mut page, ""), None);

    let session = hinter.session().unwrap();
    assert_eq!(session.kind(), SessionKind::SearchEngine);
    assert_eq!(session.filtered_len(), 30);
    assert!(
        page.renderer.visible_labels().is_empty(),
        "Backspace restores hidden labels, not visible ones"
    );
}

#[test]
fn page_without_search_fields_reports_no_hints() {
    let mut page = page_of(vec![link(0, "home")]);
    let mut hinter = letter_hinter();
    assert_eq!(
        hinter.open_search_engine_session(&mut page),
        Some(Outcome::NoHints)
    );
}

#[test]
fn submit_needs_an_open_search_session() {
    let mut page = page_of(vec![search_form("post"), link(2, "home")]);
    let mut hinter = letter_hinter();

    assert_eq!(hinter.submit_search_engine(&mut page, "cats"), None);
    assert!(page.dispatcher.records().is_empty());

    hinter.open_session(&mut page, HintCategory::All);
    assert_eq!(
        hinter.submit_search_engine(&mut page, "cats"),
        None,
        "A hint session is not a search session"
    );
    assert!(hinter.is_open());
}
