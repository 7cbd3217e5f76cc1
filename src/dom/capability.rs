use crate::dom::dom_model::{
    ComputedStyle, DocumentId, ElementInfo, MouseEventKind, NodeId, Rect, Viewport,
};
use crate::dom::selector::Selector;
use crate::error::DomError;
use crate::style::marker::{Marker, MarkerId, MarkerPaint};
use crate::style::stylesheet::SheetKind;

// ============================================================================
// Capabilities consumed from the host page
// ============================================================================

/// Read access to one document of the page. Embedded frames expose their own
/// `Document` through `frame_document`.
pub trait Document {
    fn id(&self) -> DocumentId;

    fn viewport(&self) -> Viewport;

    /// Elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Result<Vec<NodeId>, DomError>;

    fn element(&self, node: NodeId) -> Result<ElementInfo, DomError>;

    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, DomError>;

    fn bounding_rect(&self, node: NodeId) -> Result<Rect, DomError>;

    fn client_rect_count(&self, node: NodeId) -> Result<usize, DomError>;

    /// Text of the `<label for=element_id>` attached to a control, if any.
    fn label_caption(&self, element_id: &str) -> Result<Option<String>, DomError>;

    /// Embedded document of a `frame`/`iframe` element; `None` for other elements.
    fn frame_document(&self, frame: NodeId) -> Result<Option<&dyn Document>, DomError>;

    /// `form` elements, in document order.
    fn forms(&self) -> Result<Vec<NodeId>, DomError>;

    /// Controls of a form, in form order.
    fn form_controls(&self, form: NodeId) -> Result<Vec<NodeId>, DomError>;
}

/// Turns marker descriptions into visible page decorations.
pub trait Renderer {
    /// Whether `document` already carries a stylesheet of this kind. The answer
    /// belongs to the page, so it survives the `Hinter` moving between pages.
    fn has_stylesheet(&self, document: DocumentId, kind: SheetKind) -> bool;

    /// Installs a stylesheet into a document. Callers check `has_stylesheet` first.
    fn inject_stylesheet(&mut self, document: DocumentId, kind: SheetKind, css: &str) -> Result<(), DomError>;

    fn show_marker(&mut self, marker: &Marker) -> Result<MarkerId, DomError>;

    fn restyle_marker(&mut self, marker: MarkerId, paint: &MarkerPaint) -> Result<(), DomError>;

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) -> Result<(), DomError>;

    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), DomError>;
}

/// Delivers synthetic interaction to page elements.
pub trait Dispatcher {
    /// Drops focus from whatever element currently holds it.
    fn blur_active(&mut self) -> Result<(), DomError>;

    fn focus(&mut self, node: NodeId) -> Result<(), DomError>;

    fn mouse_event(&mut self, node: NodeId, kind: MouseEventKind) -> Result<(), DomError>;

    fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError>;

    fn submit_form(&mut self, form: NodeId) -> Result<(), DomError>;
}

/// The whole host page: the root document plus the two side-effecting
/// capabilities.
pub trait Page {
    fn document(&self) -> &dyn Document;

    fn renderer(&mut self) -> &mut dyn Renderer;

    fn dispatcher(&mut self) -> &mut dyn Dispatcher;
}
