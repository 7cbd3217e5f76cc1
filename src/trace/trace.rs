use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::scan::candidate::HintCategory;
use crate::session::activator::Outcome;

/// One hinting operation, as written to the JSONL trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub operation: &'static str,

    pub category: Option<String>,
    pub input: Option<String>,

    /// Hints still matching after the operation; absent once the session closed.
    pub remaining: Option<usize>,
    pub active_label: Option<String>,

    pub outcome: Option<String>,
}

impl TraceEvent {
    pub fn now(operation: &'static str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            operation,
            category: None,
            input: None,
            remaining: None,
            active_label: None,
            outcome: None,
        }
    }

    pub fn with_category(mut self, category: HintCategory) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_input(mut self, input: impl ToString) -> Self {
        self.input = Some(input.to_string());
        self
    }

    pub fn with_remaining(mut self, remaining: usize, active_label: Option<&str>) -> Self {
        self.remaining = Some(remaining);
        self.active_label = active_label.map(str::to_string);
        self
    }

    pub fn with_outcome(mut self, outcome: Option<Outcome>) -> Self {
        self.outcome = outcome.map(|o| o.sentinel().to_string());
        self
    }
}
