use tracing::{debug, warn};

use crate::dom::capability::{Dispatcher, Page, Renderer};
use crate::dom::dom_model::{DocumentId, ElementInfo};
use crate::dom::selector::Selector;
use crate::error::{DomError, HintError};
use crate::label::alphabet::Alphabet;
use crate::label::strategy::LabelStrategy;
use crate::scan::candidate::{Candidate, HintCategory};
use crate::scan::scanner::scan;
use crate::session::activator::{Outcome, activate};
use crate::session::focus_cycler::InputFocusCycler;
use crate::session::hint_config::HintConfig;
use crate::session::match_engine::Narrowed;
use crate::session::search_engine::search_fields;
use crate::session::session_model::{HintSession, SessionKind};
use crate::style::stylesheet::{FOCUS_OUTLINE_CSS, HintLook, SheetKind};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Keyboard hinting for one page host.
///
/// Holds the configuration and at most one open `HintSession`. Every
/// operation receives the page it acts on; failures inside the page are
/// logged and absorbed, and results reach the host only as `Outcome`s.
#[derive(Debug)]
pub struct Hinter {
    config: HintConfig,
    strategy: LabelStrategy,
    alphabet: Alphabet,
    look: HintLook,
    session: Option<HintSession>,
    focus_cycler: InputFocusCycler,
    diagnostics: Vec<HintError>,
    tracer: TraceLogger,
}

impl Hinter {
    pub fn new(config: HintConfig) -> Result<Self, HintError> {
        let strategy = config.strategy()?;
        let alphabet = Alphabet::new(&config.alphabet)?;
        let look = HintLook::from_config(&config);
        Ok(Self {
            config,
            strategy,
            alphabet,
            look,
            session: None,
            focus_cycler: InputFocusCycler::default(),
            diagnostics: Vec::new(),
            tracer: TraceLogger::disabled(),
        })
    }

    pub fn with_trace(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn config(&self) -> &HintConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&HintSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Failures skipped over by the most recent scan.
    pub fn diagnostics(&self) -> &[HintError] {
        &self.diagnostics
    }

    // ========================================================================
    // Hint sessions
    // ========================================================================

    /// Hint every visible element of `category`.
    ///
    /// Returns `NoHints` when there is nothing to hint and activates a lone
    /// candidate right away; `None` means the session waits for input.
    pub fn open_session(&mut self, page: &mut dyn Page, category: HintCategory) -> Option<Outcome> {
        let outcome = self.open(page, category);
        self.trace(TraceEvent::now("open").with_category(category).with_outcome(outcome));
        outcome
    }

    /// Narrow the open session with the text typed since it opened.
    pub fn update(&mut self, page: &mut dyn Page, input: &str) -> Option<Outcome> {
        let outcome = self.narrow(page, input);
        let mut event = TraceEvent::now("update").with_input(input).with_outcome(outcome);
        if let Some(session) = &self.session {
            event = event.with_remaining(
                session.filtered_len(),
                session.active_hint().map(|h| h.label.as_str()),
            );
        }
        self.trace(event);
        outcome
    }

    /// Close the session and remove everything it rendered. Does nothing
    /// when no session is open.
    pub fn clear(&mut self, page: &mut dyn Page) {
        let was_open = self.is_open();
        self.close(page);
        if was_open {
            self.trace(TraceEvent::now("clear"));
        }
    }

    /// Activate the highlighted hint as it is.
    pub fn confirm_active(&mut self, page: &mut dyn Page) -> Outcome {
        let element = self
            .session
            .as_ref()
            .and_then(HintSession::active_hint)
            .map(|hint| hint.candidate.element.clone());
        let outcome = match element {
            Some(element) => self.resolve(page, &element),
            None => {
                self.close(page);
                Outcome::NoHints
            }
        };
        self.trace(TraceEvent::now("confirm").with_outcome(Some(outcome)));
        outcome
    }

    pub fn focus_next(&mut self, page: &mut dyn Page) {
        self.cycle(page, true);
    }

    pub fn focus_prev(&mut self, page: &mut dyn Page) {
        self.cycle(page, false);
    }

    fn open(&mut self, page: &mut dyn Page, category: HintCategory) -> Option<Outcome> {
        self.close(page);
        if let Err(e) = page.dispatcher().blur_active() {
            warn!(error = %HintError::from(e), "could not blur the focused element");
        }

        let report = scan(category, page.document());
        self.diagnostics = report.failures;
        let mut candidates = report.candidates;
        if let Some(capacity) = self.strategy.capacity() {
            if candidates.len() > capacity {
                warn!(
                    found = candidates.len(),
                    capacity, "more candidates than letter labels, dropping the rest"
                );
                candidates.truncate(capacity);
            }
        }

        match candidates.len() {
            0 => return Some(Outcome::NoHints),
            1 => {
                let element = candidates[0].element.clone();
                return Some(self.resolve(page, &element));
            }
            _ => {}
        }

        self.inject_hint_styles(page.renderer(), &candidates);
        let mut session = HintSession::new(
            candidates,
            self.strategy.clone(),
            SessionKind::Hints(category),
        );
        session.render(page.renderer(), &self.look, true);
        session.set_active(0, page.renderer(), &self.look);
        debug!(category = %category, hints = session.hints().len(), "hint session opened");
        self.session = Some(session);
        None
    }

    fn narrow(&mut self, page: &mut dyn Page, input: &str) -> Option<Outcome> {
        if self.session.is_none() {
            if let Some(outcome) = self.open(page, HintCategory::default()) {
                return Some(outcome);
            }
        }
        let session = self.session.as_mut()?;

        match session.narrow(input, page.renderer(), &self.look) {
            Narrowed::Rejected => Some(Outcome::NoHints),
            Narrowed::Empty => {
                self.close(page);
                Some(Outcome::NoHints)
            }
            Narrowed::Single(index) => {
                let element = session.hints()[index].candidate.element.clone();
                Some(self.resolve(page, &element))
            }
            Narrowed::Many => None,
        }
    }

    fn cycle(&mut self, page: &mut dyn Page, forward: bool) {
        if let Some(session) = self.session.as_mut() {
            session.cycle_active(forward, page.renderer(), &self.look);
        }
    }

    /// Activate `element` and close the session, whatever the activation did.
    fn resolve(&mut self, page: &mut dyn Page, element: &ElementInfo) -> Outcome {
        let activation = activate(element, page.dispatcher());
        self.close(page);
        Outcome::Activated(activation)
    }

    fn close(&mut self, page: &mut dyn Page) {
        if let Some(mut session) = self.session.take() {
            session.teardown(page.renderer());
            debug!("hint session closed");
        }
    }

    // ========================================================================
    // Search engine fields
    // ========================================================================

    /// Offer the text and search fields of the page's forms, first one active.
    pub fn open_search_engine_session(&mut self, page: &mut dyn Page) -> Option<Outcome> {
        let outcome = self.open_search_engine(page);
        self.trace(TraceEvent::now("open-search-engine").with_outcome(outcome));
        outcome
    }

    fn open_search_engine(&mut self, page: &mut dyn Page) -> Option<Outcome> {
        self.close(page);
        let report = search_fields(page.document());
        self.diagnostics = report.failures;
        let candidates = report.candidates;
        if candidates.is_empty() {
            return Some(Outcome::NoHints);
        }

        self.inject_hint_styles(page.renderer(), &candidates);
        let mut session = HintSession::new(
            candidates,
            LabelStrategy::Letter(self.alphabet.clone()),
            SessionKind::SearchEngine,
        );
        session.render(page.renderer(), &self.look, false);
        session.set_active(0, page.renderer(), &self.look);
        self.session = Some(session);
        None
    }

    /// Submit `query` through the active search field.
    ///
    /// The field's value is set, its form submitted and the value cleared
    /// again. Returns the field's name when the form posts, since the host
    /// then has to catch the submission itself; `None` for GET forms.
    pub fn submit_search_engine(&mut self, page: &mut dyn Page, query: &str) -> Option<String> {
        let name = self.submit_search(page, query);
        self.trace(TraceEvent::now("submit-search-engine").with_input(query));
        name
    }

    fn submit_search(&mut self, page: &mut dyn Page, query: &str) -> Option<String> {
        let element = self
            .session
            .as_ref()
            .filter(|s| s.kind() == SessionKind::SearchEngine)?
            .active_hint()?
            .candidate
            .element
            .clone();

        let method = element.form.and_then(|form| {
            page.document()
                .element(form)
                .map_err(|e| warn!(error = %HintError::from(e), "could not read the search form"))
                .ok()
                .map(|form| form.form_method())
        });

        if let Err(source) = submit_query(page.dispatcher(), &element, query) {
            let error = HintError::Activation {
                node: element.node,
                source,
            };
            warn!(error = %error, "search submission incomplete");
        }
        self.close(page);

        if method.as_deref() == Some("post") {
            element.attr("name").map(str::to_string)
        } else {
            None
        }
    }

    // ========================================================================
    // Input focus cycling
    // ========================================================================

    /// Focus the next text input of the page, wrapping around after the last.
    pub fn cycle_input_focus(&mut self, page: &mut dyn Page) -> Option<Outcome> {
        let outcome = self.cycle_focus(page);
        self.trace(TraceEvent::now("cycle-input-focus").with_outcome(outcome));
        outcome
    }

    fn cycle_focus(&mut self, page: &mut dyn Page) -> Option<Outcome> {
        let doc = page.document();
        let document = doc.id();
        let inputs = doc
            .query_selector_all(&Selector::text_inputs())
            .unwrap_or_else(|e| {
                warn!(error = %HintError::from(e), "could not list text inputs");
                Vec::new()
            });

        let Some(target) = self.focus_cycler.advance(&inputs) else {
            return Some(Outcome::NoHints);
        };
        inject_once(page.renderer(), document, SheetKind::FocusOutline, FOCUS_OUTLINE_CSS);
        if let Err(source) = page.dispatcher().focus(target) {
            let error = HintError::Activation { node: target, source };
            warn!(error = %error, "could not focus input");
        }
        None
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn inject_hint_styles(&self, renderer: &mut dyn Renderer, candidates: &[Candidate]) {
        for candidate in candidates {
            inject_once(renderer, candidate.document, SheetKind::Hints, &self.look.css);
        }
    }

    fn trace(&mut self, event: TraceEvent) {
        self.tracer.record(&event);
    }
}

fn inject_once(renderer: &mut dyn Renderer, document: DocumentId, kind: SheetKind, css: &str) {
    if renderer.has_stylesheet(document, kind) {
        return;
    }
    if let Err(e) = renderer.inject_stylesheet(document, kind, css) {
        warn!(document = document.0, error = %HintError::from(e), "could not inject hint styles");
    }
}

/// Fill the field, submit its form, and empty the field again.
fn submit_query(
    dispatcher: &mut dyn Dispatcher,
    element: &ElementInfo,
    query: &str,
) -> Result<(), DomError> {
    dispatcher.set_value(element.node, query)?;
    if let Some(form) = element.form {
        dispatcher.submit_form(form)?;
    }
    dispatcher.set_value(element.node, "")
}
