use crate::error::HintError;

pub const ALPHABET_LEN: usize = 26;

/// Default letter order: home row first, for the left hand.
pub const DEFAULT_LETTERS: &str = "FDSARTGBVECWXQYIOPMNHZULKJ";

/// The ordered letters used to build letter labels.
///
/// Letters are ASCII alphabetic and distinct regardless of case, so a typed
/// lowercase letter always means "label" and an uppercase one "text".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    pub fn new(letters: &str) -> Result<Self, HintError> {
        let letters: Vec<char> = letters.trim().chars().collect();
        if letters.len() != ALPHABET_LEN {
            return Err(HintError::Config(format!(
                "alphabet must have {} letters, got {}",
                ALPHABET_LEN,
                letters.len()
            )));
        }
        if let Some(bad) = letters.iter().find(|c| !c.is_ascii_alphabetic()) {
            return Err(HintError::Config(format!(
                "alphabet may only contain ASCII letters, found '{}'",
                bad
            )));
        }
        for (i, c) in letters.iter().enumerate() {
            if letters[..i].iter().any(|p| p.eq_ignore_ascii_case(c)) {
                return Err(HintError::Config(format!(
                    "alphabet letter '{}' appears twice",
                    c
                )));
            }
        }
        Ok(Self { letters })
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letter(&self, index: usize) -> char {
        self.letters[index]
    }

    pub fn contains_ignore_case(&self, c: char) -> bool {
        self.letters.iter().any(|l| l.eq_ignore_ascii_case(&c))
    }

    /// `c` is the lowercase form of one of the letters.
    pub fn contains_lower(&self, c: char) -> bool {
        c.is_ascii_lowercase() && self.contains_ignore_case(c)
    }

    /// `c` is the uppercase form of one of the letters.
    pub fn contains_upper(&self, c: char) -> bool {
        c.is_ascii_uppercase() && self.contains_ignore_case(c)
    }

    pub fn as_string(&self) -> String {
        self.letters.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            letters: DEFAULT_LETTERS.chars().collect(),
        }
    }
}
