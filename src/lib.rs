//! Keyboard link hinting.
//!
//! Every interactive element of a page gets a short label; the user types
//! to narrow the labels down and the one left is activated like a click or
//! a focus. The host page is reached only through the capability traits in
//! `dom::capability`, so the same engine drives a live browser page or the
//! in-memory `StaticPage`.

pub mod cli;
pub mod dom;
pub mod error;
pub mod label;
pub mod scan;
pub mod session;
pub mod style;
pub mod trace;

pub use dom::capability::{Dispatcher, Document, Page, Renderer};
pub use dom::static_page::{PageSpec, StaticPage};
pub use error::{DomError, HintError};
pub use label::strategy::{HintStyle, LabelStrategy};
pub use scan::candidate::HintCategory;
pub use session::activator::{Activation, Outcome};
pub use session::hint_config::HintConfig;
pub use session::hinter::Hinter;
