use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::label::alphabet::Alphabet;

/// Words past this position never count when ranking numeric hints by text.
const WORD_SCAN_LIMIT: usize = 37;

/// Configured label style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintStyle {
    #[default]
    Letter,
    Number,
}

impl FromStr for HintStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "letter" => Ok(HintStyle::Letter),
            "number" => Ok(HintStyle::Number),
            other => Err(format!("unknown hint style '{}' (expected letter or number)", other)),
        }
    }
}

/// How labels are generated and how typed input is matched against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelStrategy {
    Letter(Alphabet),
    Numeric,
}

impl LabelStrategy {
    /// Largest number of candidates that can receive distinct labels.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            LabelStrategy::Letter(alphabet) => Some(alphabet.len() * alphabet.len()),
            LabelStrategy::Numeric => None,
        }
    }

    /// Label of the candidate at `index` out of `total`.
    pub fn label(&self, index: usize, total: usize) -> String {
        match self {
            LabelStrategy::Letter(alphabet) => letter_label(alphabet, index, total),
            LabelStrategy::Numeric => numeric_label(index, total),
        }
    }

    /// Reduce accumulated input to the part that is matched.
    ///
    /// Only the trailing run of the last character's class is kept: digits or
    /// non-digits for numeric labels, lowercase alphabet letters or anything
    /// else for letter labels. Returns `None` when the last character typed in
    /// letter mode is not an alphabet letter at all.
    pub fn normalize(&self, input: &str) -> Option<String> {
        let Some(last) = input.chars().last() else {
            return Some(String::new());
        };
        match self {
            LabelStrategy::Numeric => {
                let digits = last.is_ascii_digit();
                Some(trailing_run(input, |c| c.is_ascii_digit() == digits))
            }
            LabelStrategy::Letter(alphabet) => {
                if !alphabet.contains_ignore_case(last) {
                    return None;
                }
                let lower = alphabet.contains_lower(last);
                Some(trailing_run(input, |c| alphabet.contains_lower(c) == lower))
            }
        }
    }

    /// Does a hint with `label` over an element with text content `text`
    /// still match normalized `input`?
    pub fn matches(&self, label: &str, text: &str, input: &str) -> bool {
        match self {
            LabelStrategy::Letter(alphabet) => {
                if input.chars().any(|c| alphabet.contains_upper(c)) {
                    let haystack = text.to_uppercase();
                    input
                        .split_whitespace()
                        .all(|token| haystack.contains(&token.to_uppercase()))
                } else {
                    label.to_lowercase().starts_with(&input.to_lowercase())
                }
            }
            LabelStrategy::Numeric => {
                if is_digits(input) {
                    label.starts_with(input)
                } else {
                    let haystack = text.to_lowercase();
                    input
                        .split_whitespace()
                        .all(|token| haystack.contains(&token.to_lowercase()))
                }
            }
        }
    }

    /// Position, among the still matching hints' texts, of the hint that
    /// should become active.
    ///
    /// Letter labels always pick the first. Numeric labels searched by text
    /// pick the element with a word starting with the input at the lowest word
    /// position; the first one found wins ties.
    pub fn best_index<'a, I>(&self, texts: I, input: &str) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        if matches!(self, LabelStrategy::Letter(_))
            || input.is_empty()
            || input.starts_with(|c: char| c.is_ascii_digit())
        {
            return 0;
        }

        let needle = input.to_lowercase();
        let mut best = 0;
        let mut best_position = WORD_SCAN_LIMIT;
        for (i, text) in texts.into_iter().enumerate() {
            if best_position == 0 {
                break;
            }
            let lowered = text.to_lowercase();
            let position = lowered
                .split_whitespace()
                .take(best_position)
                .position(|word| word.starts_with(&needle));
            if let Some(position) = position {
                best = i;
                best_position = position;
            }
        }
        best
    }
}

fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

fn trailing_run(input: &str, keep: impl Fn(char) -> bool) -> String {
    let mut run: Vec<char> = input.chars().rev().take_while(|c| keep(*c)).collect();
    run.reverse();
    run.into_iter().collect()
}

fn letter_label(alphabet: &Alphabet, index: usize, total: usize) -> String {
    let l = alphabet.len();
    let pair = |first: usize, second: usize| {
        let mut label = String::with_capacity(2);
        label.push(alphabet.letter(first));
        label.push(alphabet.letter(second));
        label
    };

    if total <= l {
        return alphabet.letter(index).to_string();
    }

    if total <= 2 * l {
        let r = split_width(total - l, l);
        if index < l - r {
            return alphabet.letter(index).to_string();
        }
        let m = index % (r * r);
        return pair(m / r + l - r, l - 1 - m % r);
    }

    pair(index % l, l - 1 - (index / l).min(l - 1))
}

/// Number of trailing alphabet letters reserved as first characters of
/// two-letter labels when `extra` candidates exceed the alphabet.
///
/// Starts from `floor(sqrt(2 * extra))`, one more when the root is exact, and
/// grows until the `extra + r` two-letter positions fit in `r * r` pairs.
fn split_width(extra: usize, l: usize) -> usize {
    let doubled = 2 * extra;
    let root = (doubled as f64).sqrt().floor() as usize;
    let mut r = if root * root == doubled { root + 1 } else { root };
    while extra + r > r * r {
        r += 1;
    }
    r.min(l)
}

/// Labels start at 1, 10 or 100 depending on how many there are.
fn numeric_label(index: usize, total: usize) -> String {
    let offset = if total <= 10 {
        1
    } else if total <= 100 {
        10
    } else {
        100
    };
    (offset + index).to_string()
}
