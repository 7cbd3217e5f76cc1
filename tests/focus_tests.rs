use keyhints::dom::dom_model::NodeId;
use keyhints::dom::static_page::{DispatchRecord, ElementSpec};
use keyhints::session::focus_cycler::InputFocusCycler;
use keyhints::style::stylesheet::FOCUS_OUTLINE_CSS;
use keyhints::Outcome;

mod common;
use crate::common::pages::{link, page_of, slot};
use crate::common::{letter_hinter, node_named};

fn focused(records: &[DispatchRecord]) -> Vec<NodeId> {
    records
        .iter()
        .filter_map(|r| match r {
            DispatchRecord::Focus { node } => Some(*node),
            _ => None,
        })
        .collect()
}

#[test]
fn cycling_visits_text_inputs_and_wraps() {
    let mut page = page_of(vec![
        ElementSpec::input("text").attr("name", "user").at(slot(0)),
        ElementSpec::input("checkbox").attr("name", "remember").at(slot(1)),
        ElementSpec::input("password").attr("name", "pw").at(slot(2)),
        ElementSpec::new("textarea").attr("name", "bio").at(slot(3)),
    ]);
    let user = node_named(&page, "user");
    let pw = node_named(&page, "pw");
    let bio = node_named(&page, "bio");
    let mut hinter = letter_hinter();

    for _ in 0..4 {
        assert_eq!(hinter.cycle_input_focus(&mut page), None);
    }

    assert_eq!(focused(page.dispatcher.records()), vec![user, pw, bio, user]);
    assert_eq!(
        page.renderer.stylesheets().len(),
        1,
        "Outline style injected once"
    );
    assert_eq!(page.renderer.stylesheets()[0].1, FOCUS_OUTLINE_CSS);
}

#[test]
fn cycling_without_inputs_reports_no_hints() {
    let mut page = page_of(vec![link(0, "home")]);
    let mut hinter = letter_hinter();
    assert_eq!(hinter.cycle_input_focus(&mut page), Some(Outcome::NoHints));
    assert!(page.dispatcher.records().is_empty());
}

#[test]
fn cycler_restarts_when_remembered_input_is_gone() {
    let mut cycler = InputFocusCycler::default();
    let inputs = [NodeId(1), NodeId(2), NodeId(3)];

    assert_eq!(cycler.advance(&inputs), Some(NodeId(1)));
    assert_eq!(cycler.advance(&inputs), Some(NodeId(2)));
    assert_eq!(cycler.current(), Some(NodeId(2)));

    assert_eq!(
        cycler.advance(&[NodeId(7), NodeId(8)]),
        Some(NodeId(7)),
        "Page changed under the cycler"
    );
    assert_eq!(cycler.advance(&[]), None);
}
