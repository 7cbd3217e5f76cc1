use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::dom::capability::Dispatcher;
use crate::dom::dom_model::{ElementInfo, MouseEventKind};
use crate::error::HintError;

/// How a resolved element was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    /// Checkbox or radio: focused, then clicked.
    Toggle,
    /// Submit, reset or button input: clicked.
    SubmitClick,
    /// Any other text-capable control: focused only.
    FocusText,
    /// Links and everything else: mouse events dispatched.
    Click,
}

/// Result reported to the host when a session resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    NoHints,
    Activated(Activation),
}

impl Outcome {
    /// The string result the host's key loop switches on.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Outcome::NoHints => "no-hints",
            Outcome::Activated(Activation::Toggle) => "toggle",
            Outcome::Activated(Activation::FocusText) => "focus-text",
            Outcome::Activated(Activation::Click | Activation::SubmitClick) => "clicked",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// One synthetic interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStep {
    Focus,
    Mouse(MouseEventKind),
}

/// Decide how `element` is activated, without touching the page.
pub fn plan(element: &ElementInfo) -> (Activation, Vec<DispatchStep>) {
    use DispatchStep::{Focus, Mouse};
    use MouseEventKind::{Click, MouseDown};

    if let Some(ty) = element.input_type() {
        return match ty.as_str() {
            "radio" | "checkbox" => (Activation::Toggle, vec![Focus, Mouse(Click)]),
            "submit" | "reset" | "button" => (Activation::SubmitClick, vec![Mouse(Click)]),
            _ => (Activation::FocusText, vec![Focus]),
        };
    }

    let steps = if element.tag == "a" || element.has_attr("onclick") {
        vec![Mouse(Click)]
    } else if element.has_attr("onmousedown") {
        vec![Mouse(MouseDown)]
    } else {
        vec![Mouse(Click), Mouse(MouseDown)]
    };
    (Activation::Click, steps)
}

/// Activate `element`. A failed dispatch is logged and ends the sequence; the
/// planned activation is still reported.
pub fn activate(element: &ElementInfo, dispatcher: &mut dyn Dispatcher) -> Activation {
    let (activation, steps) = plan(element);
    debug!(node = element.node.0, tag = %element.tag, ?activation, "activating hint");

    for step in steps {
        let result = match step {
            DispatchStep::Focus => dispatcher.focus(element.node),
            DispatchStep::Mouse(kind) => dispatcher.mouse_event(element.node, kind),
        };
        if let Err(source) = result {
            let error = HintError::Activation {
                node: element.node,
                source,
            };
            warn!(error = %error, "activation incomplete");
            break;
        }
    }
    activation
}
