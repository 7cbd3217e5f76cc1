use tracing::debug;

use crate::dom::capability::Renderer;
use crate::session::session_model::HintSession;
use crate::style::stylesheet::HintLook;

/// Where a session stands after one round of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowed {
    /// The last typed character cannot start or continue any match; nothing changed.
    Rejected,
    /// No hint matches any more.
    Empty,
    /// Exactly one hint is left: the index of it in the session's hint list.
    Single(usize),
    /// Several hints remain and the best of them is active.
    Many,
}

impl HintSession {
    /// Feed the accumulated input typed since the session opened.
    ///
    /// A shorter input than last time is a deletion: the filter is reset to
    /// every hint before the new input is applied.
    pub(crate) fn narrow(&mut self, input: &str, renderer: &mut dyn Renderer, look: &HintLook) -> Narrowed {
        if self.last_input.chars().count() > input.chars().count() {
            debug!(from = %self.last_input, to = %input, "input shortened, resetting hint filter");
            self.reset_filter(renderer, look);
        }
        self.last_input = input.to_string();

        let Some(input) = self.strategy.normalize(input) else {
            return Narrowed::Rejected;
        };

        let previous = std::mem::take(&mut self.filtered);
        for index in previous {
            let hint = &self.hints[index];
            if self.strategy.matches(&hint.label, hint.text(), &input) {
                self.filtered.push(index);
            } else {
                self.set_label_visible(index, false, renderer);
            }
        }

        match self.filtered.len() {
            0 => {
                self.active = None;
                Narrowed::Empty
            }
            1 => Narrowed::Single(self.filtered[0]),
            _ => {
                let best = self
                    .strategy
                    .best_index(self.filtered().map(|h| h.text()), &input);
                self.set_active(best, renderer, look);
                Narrowed::Many
            }
        }
    }

    /// Make every hint match again, labels visible, first one active.
    fn reset_filter(&mut self, renderer: &mut dyn Renderer, look: &HintLook) {
        if self.labels_visible {
            let hidden: Vec<usize> = (0..self.hints.len())
                .filter(|i| !self.filtered.contains(i))
                .collect();
            for index in hidden {
                self.set_label_visible(index, true, renderer);
            }
        }
        self.filtered = (0..self.hints.len()).collect();
        self.set_active(0, renderer, look);
    }

    /// Move the highlight one place through the filtered subset, wrapping.
    pub(crate) fn cycle_active(&mut self, forward: bool, renderer: &mut dyn Renderer, look: &HintLook) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let current = self.active_position().unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.set_active(next, renderer, look);
    }
}
