use tracing::warn;

use crate::dom::capability::Renderer;
use crate::dom::dom_model::NodeId;
use crate::error::{DomError, HintError};
use crate::label::strategy::LabelStrategy;
use crate::scan::candidate::{Candidate, HintCategory};
use crate::style::marker::{LabelMarker, Marker, MarkerId, MarkerPaint, OverlayDescriptor};
use crate::style::stylesheet::HintLook;

/// What a session was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Hints(HintCategory),
    SearchEngine,
}

/// A candidate with its label and the markers rendered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub candidate: Candidate,
    pub label: String,
    pub label_marker: Option<MarkerId>,
    pub overlay: Option<MarkerId>,
}

impl Hint {
    pub fn node(&self) -> NodeId {
        self.candidate.element.node
    }

    pub fn text(&self) -> &str {
        &self.candidate.element.text
    }
}

/// The live state of one hinting interaction.
#[derive(Debug)]
pub struct HintSession {
    pub(crate) hints: Vec<Hint>,
    /// Indices into `hints` of the hints still matching, in scan order.
    pub(crate) filtered: Vec<usize>,
    /// Index into `hints` of the highlighted hint; always a member of `filtered`.
    pub(crate) active: Option<usize>,
    pub(crate) last_input: String,
    /// Whether labels were rendered visible; a reset filter restores this.
    pub(crate) labels_visible: bool,
    pub(crate) kind: SessionKind,
    pub(crate) strategy: LabelStrategy,
}

impl HintSession {
    /// Label every candidate in scan order. Nothing is rendered yet.
    pub fn new(candidates: Vec<Candidate>, strategy: LabelStrategy, kind: SessionKind) -> Self {
        let total = candidates.len();
        let hints: Vec<Hint> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| Hint {
                label: strategy.label(i, total),
                candidate,
                label_marker: None,
                overlay: None,
            })
            .collect();
        let filtered = (0..hints.len()).collect();
        Self {
            hints,
            filtered,
            active: None,
            last_input: String::new(),
            labels_visible: true,
            kind,
            strategy,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn strategy(&self) -> &LabelStrategy {
        &self.strategy
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn labels(&self) -> Vec<&str> {
        self.hints.iter().map(|h| h.label.as_str()).collect()
    }

    /// Hints still matching the input, in scan order.
    pub fn filtered(&self) -> impl Iterator<Item = &Hint> + '_ {
        self.filtered.iter().map(|&i| &self.hints[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn active_hint(&self) -> Option<&Hint> {
        self.active.map(|i| &self.hints[i])
    }

    /// Position of the active hint within the filtered subset.
    pub fn active_position(&self) -> Option<usize> {
        let active = self.active?;
        self.filtered.iter().position(|&i| i == active)
    }

    pub fn last_input(&self) -> &str {
        &self.last_input
    }

    /// Show a label marker for every hint, plus an overlay each when all hints
    /// are marked.
    pub(crate) fn render(&mut self, renderer: &mut dyn Renderer, look: &HintLook, labels_visible: bool) {
        self.labels_visible = labels_visible;
        for hint in &mut self.hints {
            let marker = LabelMarker::for_candidate(&hint.candidate, &hint.label, labels_visible);
            hint.label_marker = show(renderer, hint.node(), &Marker::Label(marker));
            if look.mark_all_hints {
                hint.overlay = show(
                    renderer,
                    hint.node(),
                    &Marker::Overlay(OverlayDescriptor::for_candidate(
                        &hint.candidate,
                        &look.normal_color,
                    )),
                );
            }
        }
    }

    /// Highlight the hint at `position` of the filtered subset, demoting the
    /// previously active one.
    pub(crate) fn set_active(&mut self, position: usize, renderer: &mut dyn Renderer, look: &HintLook) {
        let Some(&next) = self.filtered.get(position) else {
            return;
        };

        if let Some(previous) = self.active.take() {
            let hint = &mut self.hints[previous];
            let node = hint.node();
            if look.mark_all_hints {
                if let Some(overlay) = hint.overlay {
                    log_overlay(node, renderer.restyle_marker(overlay, &MarkerPaint::Background(look.normal_color.clone())));
                }
            } else if let Some(overlay) = hint.overlay.take() {
                log_overlay(node, renderer.remove_marker(overlay));
            }
            if let Some(label) = hint.label_marker {
                log_overlay(node, renderer.restyle_marker(label, &MarkerPaint::Font(look.font.clone())));
            }
        }

        let hint = &mut self.hints[next];
        let node = hint.node();
        match hint.overlay {
            Some(overlay) => {
                log_overlay(node, renderer.restyle_marker(overlay, &MarkerPaint::Background(look.active_color.clone())));
            }
            None => {
                let descriptor = OverlayDescriptor::for_candidate(&hint.candidate, &look.active_color);
                hint.overlay = show(renderer, node, &Marker::Overlay(descriptor));
            }
        }
        if let (Some(label), Some(size)) = (hint.label_marker, &look.active_font_size) {
            log_overlay(node, renderer.restyle_marker(label, &MarkerPaint::FontSize(size.clone())));
        }
        self.active = Some(next);
    }

    pub(crate) fn set_label_visible(&mut self, index: usize, visible: bool, renderer: &mut dyn Renderer) {
        let hint = &self.hints[index];
        if let Some(label) = hint.label_marker {
            log_overlay(hint.node(), renderer.set_marker_visible(label, visible));
        }
    }

    /// Remove every marker this session rendered.
    pub(crate) fn teardown(&mut self, renderer: &mut dyn Renderer) {
        for hint in &mut self.hints {
            let node = hint.node();
            for marker in [hint.label_marker.take(), hint.overlay.take()].into_iter().flatten() {
                log_overlay(node, renderer.remove_marker(marker));
            }
        }
        self.filtered.clear();
        self.active = None;
    }
}

fn show(renderer: &mut dyn Renderer, node: NodeId, marker: &Marker) -> Option<MarkerId> {
    match renderer.show_marker(marker) {
        Ok(id) => Some(id),
        Err(source) => {
            log_overlay(node, Err(source));
            None
        }
    }
}

fn log_overlay(node: NodeId, result: Result<(), DomError>) {
    if let Err(source) = result {
        let error = HintError::Overlay { node, source };
        warn!(error = %error, "hint stays usable without its marker");
    }
}
