use crate::dom::dom_model::NodeId;

/// Remembers which text input was focused last by cycling, so the next
/// invocation moves on to the following one.
#[derive(Debug, Clone, Default)]
pub struct InputFocusCycler {
    current: Option<NodeId>,
}

impl InputFocusCycler {
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Pick the input to focus among `inputs` (document order) and remember it.
    ///
    /// The first input is picked when nothing is remembered or the remembered
    /// input has disappeared; after the last input the cycle wraps around.
    pub fn advance(&mut self, inputs: &[NodeId]) -> Option<NodeId> {
        let first = *inputs.first()?;
        let next = self
            .current
            .and_then(|current| inputs.iter().position(|&n| n == current))
            .and_then(|pos| inputs.get(pos + 1).copied())
            .unwrap_or(first);
        self.current = Some(next);
        Some(next)
    }
}
