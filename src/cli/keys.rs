use crate::dom::capability::Page;
use crate::session::activator::Outcome;
use crate::session::hinter::Hinter;

/// A keystroke as the host key loop sees it during a hint session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Char(char),
    Tab,
    ShiftTab,
    Return,
    Backspace,
    Escape,
}

const NAMED_KEYS: &[(&str, HostKey)] = &[
    ("<Tab>", HostKey::Tab),
    ("<S-Tab>", HostKey::ShiftTab),
    ("<Return>", HostKey::Return),
    ("<CR>", HostKey::Return),
    ("<BS>", HostKey::Backspace),
    ("<Esc>", HostKey::Escape),
    ("<lt>", HostKey::Char('<')),
];

/// Split a key string such as `ab<BS>c<Tab><Return>` into keys.
///
/// Named keys are case-insensitive; a `<` that does not open a named key is
/// an ordinary character.
pub fn parse_keys(keys: &str) -> Vec<HostKey> {
    let mut parsed = Vec::new();
    let mut rest = keys;
    while let Some(c) = rest.chars().next() {
        let named = NAMED_KEYS.iter().find(|(name, _)| {
            rest.get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
        });
        match named {
            Some((name, key)) => {
                parsed.push(*key);
                rest = &rest[name.len()..];
            }
            None => {
                parsed.push(HostKey::Char(c));
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    parsed
}

/// The host side of a hint session: keeps the text typed so far and routes
/// each key to the matching `Hinter` operation.
#[derive(Debug, Default)]
pub struct KeyLoop {
    input: String,
}

impl KeyLoop {
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Handle one key. Returns the outcome when the session resolved, after
    /// which the typed text starts over.
    pub fn press(&mut self, hinter: &mut Hinter, page: &mut dyn Page, key: HostKey) -> Option<Outcome> {
        let outcome = match key {
            HostKey::Char(c) => {
                self.input.push(c);
                hinter.update(page, &self.input)
            }
            HostKey::Backspace => {
                self.input.pop()?;
                hinter.update(page, &self.input)
            }
            HostKey::Tab => {
                hinter.focus_next(page);
                None
            }
            HostKey::ShiftTab => {
                hinter.focus_prev(page);
                None
            }
            HostKey::Return => Some(hinter.confirm_active(page)),
            HostKey::Escape => {
                hinter.clear(page);
                self.input.clear();
                None
            }
        };
        if outcome.is_some() && !hinter.is_open() {
            self.input.clear();
        }
        outcome
    }
}
