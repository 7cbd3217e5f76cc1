use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dom::capability::{Dispatcher, Document, Page, Renderer};
use crate::dom::dom_model::{
    ComputedStyle, DocumentId, ElementInfo, MouseEventKind, NodeId, Rect, Viewport,
};
use crate::dom::selector::Selector;
use crate::error::DomError;
use crate::style::marker::{LabelMarker, Marker, MarkerId, MarkerPaint, OverlayDescriptor};
use crate::style::stylesheet::SheetKind;

// ============================================================================
// Page description (JSON / YAML)
// ============================================================================

/// Serializable description of a page: its viewport and elements in
/// document order. Frames carry their embedded page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub style: ComputedStyle,
    #[serde(default = "default_client_rects")]
    pub client_rects: usize,
    /// Nested elements; for a `form` these are its controls.
    #[serde(default)]
    pub children: Vec<ElementSpec>,
    /// Embedded page of a `frame`/`iframe`.
    #[serde(default)]
    pub frame: Option<PageSpec>,
    /// The embedded page belongs to another origin and cannot be read.
    #[serde(default)]
    pub cross_origin: bool,
    /// The element was removed while the page was being read; every lookup fails.
    #[serde(default)]
    pub detached: bool,
}

fn default_client_rects() -> usize {
    1
}

impl PageSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn element(mut self, element: ElementSpec) -> Self {
        self.elements.push(element);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            rect: Rect::default(),
            style: ComputedStyle::default(),
            client_rects: 1,
            children: Vec::new(),
            frame: None,
            cross_origin: false,
            detached: false,
        }
    }

    pub fn link(text: &str) -> Self {
        Self::new("a").attr("href", "#").text(text)
    }

    pub fn input(input_type: &str) -> Self {
        Self::new("input").attr("type", input_type)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn at(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.style.visibility_hidden = true;
        self
    }

    pub fn display_none(mut self) -> Self {
        self.style.display_none = true;
        self
    }

    pub fn without_client_rects(mut self) -> Self {
        self.client_rects = 0;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn embedding(mut self, page: PageSpec) -> Self {
        self.frame = Some(page);
        self
    }

    pub fn cross_origin(mut self) -> Self {
        self.cross_origin = true;
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// Own text followed by the text of every descendant.
    fn text_content(&self) -> String {
        let mut text = self.text.clone();
        for child in &self.children {
            let child_text = child.text_content();
            if !child_text.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&child_text);
            }
        }
        text
    }
}

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug)]
struct StaticNode {
    info: ElementInfo,
    rect: Rect,
    style: ComputedStyle,
    client_rects: usize,
    detached: bool,
    cross_origin: bool,
}

/// An immutable document built from a `PageSpec`.
#[derive(Debug)]
pub struct StaticDocument {
    id: DocumentId,
    viewport: Viewport,
    nodes: Vec<StaticNode>,
    index: HashMap<NodeId, usize>,
    frames: HashMap<NodeId, StaticDocument>,
}

/// Hands out node and document ids unique across the whole page.
#[derive(Default)]
struct IdSource {
    next_node: u64,
    next_document: u64,
}

impl StaticDocument {
    fn build(spec: &PageSpec, ids: &mut IdSource) -> Self {
        let id = DocumentId(ids.next_document);
        ids.next_document += 1;
        let mut document = Self {
            id,
            viewport: spec.viewport,
            nodes: Vec::new(),
            index: HashMap::new(),
            frames: HashMap::new(),
        };
        for element in &spec.elements {
            document.add(element, None, ids);
        }
        document
    }

    fn add(&mut self, spec: &ElementSpec, form: Option<NodeId>, ids: &mut IdSource) {
        let node = NodeId(ids.next_node);
        ids.next_node += 1;

        let info = ElementInfo {
            node,
            tag: spec.tag.to_lowercase(),
            attributes: spec.attributes.clone(),
            text: spec.text_content(),
            form,
        };
        let is_form = info.tag == "form";
        self.index.insert(node, self.nodes.len());
        self.nodes.push(StaticNode {
            info,
            rect: spec.rect,
            style: spec.style,
            client_rects: spec.client_rects,
            detached: spec.detached,
            cross_origin: spec.cross_origin,
        });

        if let Some(frame) = &spec.frame {
            let embedded = StaticDocument::build(frame, ids);
            self.frames.insert(node, embedded);
        }

        let child_form = if is_form { Some(node) } else { form };
        for child in &spec.children {
            self.add(child, child_form, ids);
        }
    }

    fn node(&self, node: NodeId) -> Result<&StaticNode, DomError> {
        let found = self
            .index
            .get(&node)
            .map(|&i| &self.nodes[i])
            .ok_or(DomError::UnknownNode(node))?;
        if found.detached {
            return Err(DomError::Host(format!("node {} is detached", node.0)));
        }
        Ok(found)
    }

    /// Look an element up in this document or any embedded one.
    pub fn find(&self, node: NodeId) -> Option<&ElementInfo> {
        if let Some(&i) = self.index.get(&node) {
            return Some(&self.nodes[i].info);
        }
        self.frames.values().find_map(|frame| frame.find(node))
    }
}

impl Document for StaticDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query_selector_all(&self, selector: &Selector) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .nodes
            .iter()
            .filter(|n| selector.matches(&n.info))
            .map(|n| n.info.node)
            .collect())
    }

    fn element(&self, node: NodeId) -> Result<ElementInfo, DomError> {
        Ok(self.node(node)?.info.clone())
    }

    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, DomError> {
        Ok(self.node(node)?.style)
    }

    fn bounding_rect(&self, node: NodeId) -> Result<Rect, DomError> {
        Ok(self.node(node)?.rect)
    }

    fn client_rect_count(&self, node: NodeId) -> Result<usize, DomError> {
        Ok(self.node(node)?.client_rects)
    }

    fn label_caption(&self, element_id: &str) -> Result<Option<String>, DomError> {
        Ok(self
            .nodes
            .iter()
            .find(|n| n.info.tag == "label" && n.info.attr("for") == Some(element_id))
            .map(|n| n.info.text.clone()))
    }

    fn frame_document(&self, frame: NodeId) -> Result<Option<&dyn Document>, DomError> {
        let node = self.node(frame)?;
        if node.cross_origin {
            return Err(DomError::FrameUnavailable(frame));
        }
        Ok(self.frames.get(&frame).map(|d| d as &dyn Document))
    }

    fn forms(&self) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .nodes
            .iter()
            .filter(|n| n.info.tag == "form")
            .map(|n| n.info.node)
            .collect())
    }

    fn form_controls(&self, form: NodeId) -> Result<Vec<NodeId>, DomError> {
        self.node(form)?;
        Ok(self
            .nodes
            .iter()
            .filter(|n| n.info.form == Some(form))
            .map(|n| n.info.node)
            .collect())
    }
}

// ============================================================================
// Recording renderer
// ============================================================================

/// A marker as currently shown, with every paint applied to it since.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMarker {
    pub id: MarkerId,
    pub marker: Marker,
    pub visible: bool,
    pub paints: Vec<MarkerPaint>,
}

/// Keeps the markers in memory instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_id: u64,
    markers: BTreeMap<MarkerId, RenderedMarker>,
    stylesheets: Vec<(DocumentId, String)>,
    styled: HashSet<(DocumentId, SheetKind)>,
    /// Refuse to show any marker, like a document that forbids changes.
    pub refuse_markers: bool,
}

impl RecordingRenderer {
    /// Markers currently shown, in creation order.
    pub fn markers(&self) -> impl Iterator<Item = &RenderedMarker> + '_ {
        self.markers.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&RenderedMarker> {
        self.markers.get(&id)
    }

    pub fn labels(&self) -> Vec<&LabelMarker> {
        self.markers
            .values()
            .filter_map(|m| match &m.marker {
                Marker::Label(label) => Some(label),
                Marker::Overlay(_) => None,
            })
            .collect()
    }

    /// Text of the labels still visible.
    pub fn visible_labels(&self) -> Vec<String> {
        self.markers
            .values()
            .filter(|m| m.visible)
            .filter_map(|m| match &m.marker {
                Marker::Label(label) => Some(label.display_text()),
                Marker::Overlay(_) => None,
            })
            .collect()
    }

    pub fn overlays(&self) -> Vec<&OverlayDescriptor> {
        self.markers
            .values()
            .filter_map(|m| match &m.marker {
                Marker::Overlay(overlay) => Some(overlay),
                Marker::Label(_) => None,
            })
            .collect()
    }

    pub fn stylesheets(&self) -> &[(DocumentId, String)] {
        &self.stylesheets
    }

    fn shown(&mut self, id: MarkerId) -> Result<&mut RenderedMarker, DomError> {
        self.markers.get_mut(&id).ok_or(DomError::UnknownMarker(id.0))
    }
}

impl Renderer for RecordingRenderer {
    fn has_stylesheet(&self, document: DocumentId, kind: SheetKind) -> bool {
        self.styled.contains(&(document, kind))
    }

    fn inject_stylesheet(&mut self, document: DocumentId, kind: SheetKind, css: &str) -> Result<(), DomError> {
        self.stylesheets.push((document, css.to_string()));
        self.styled.insert((document, kind));
        Ok(())
    }

    fn show_marker(&mut self, marker: &Marker) -> Result<MarkerId, DomError> {
        if self.refuse_markers {
            return Err(DomError::Host("markers are not allowed on this page".into()));
        }
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        let visible = match marker {
            Marker::Label(label) => label.visible,
            Marker::Overlay(_) => true,
        };
        self.markers.insert(
            id,
            RenderedMarker {
                id,
                marker: marker.clone(),
                visible,
                paints: Vec::new(),
            },
        );
        Ok(id)
    }

    fn restyle_marker(&mut self, marker: MarkerId, paint: &MarkerPaint) -> Result<(), DomError> {
        self.shown(marker)?.paints.push(paint.clone());
        Ok(())
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) -> Result<(), DomError> {
        self.shown(marker)?.visible = visible;
        Ok(())
    }

    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), DomError> {
        self.markers
            .remove(&marker)
            .map(|_| ())
            .ok_or(DomError::UnknownMarker(marker.0))
    }
}

// ============================================================================
// Recording dispatcher
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum DispatchRecord {
    Blur,
    Focus { node: NodeId },
    Mouse { node: NodeId, kind: MouseEventKind },
    SetValue { node: NodeId, value: String },
    Submit { form: NodeId },
}

/// Records every synthetic interaction and keeps form values.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    records: Vec<DispatchRecord>,
    values: HashMap<NodeId, String>,
    /// Nodes that reject every event, like elements inside a sandboxed frame.
    pub unreachable: HashSet<NodeId>,
}

impl RecordingDispatcher {
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.values.get(&node).map(String::as_str)
    }

    fn reach(&self, node: NodeId) -> Result<(), DomError> {
        if self.unreachable.contains(&node) {
            return Err(DomError::Host(format!("node {} rejected the event", node.0)));
        }
        Ok(())
    }
}

impl Dispatcher for RecordingDispatcher {
    fn blur_active(&mut self) -> Result<(), DomError> {
        self.records.push(DispatchRecord::Blur);
        Ok(())
    }

    fn focus(&mut self, node: NodeId) -> Result<(), DomError> {
        self.reach(node)?;
        self.records.push(DispatchRecord::Focus { node });
        Ok(())
    }

    fn mouse_event(&mut self, node: NodeId, kind: MouseEventKind) -> Result<(), DomError> {
        self.reach(node)?;
        self.records.push(DispatchRecord::Mouse { node, kind });
        Ok(())
    }

    fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.reach(node)?;
        self.values.insert(node, value.to_string());
        self.records.push(DispatchRecord::SetValue {
            node,
            value: value.to_string(),
        });
        Ok(())
    }

    fn submit_form(&mut self, form: NodeId) -> Result<(), DomError> {
        self.reach(form)?;
        self.records.push(DispatchRecord::Submit { form });
        Ok(())
    }
}

// ============================================================================
// Page
// ============================================================================

/// A complete in-memory host page.
#[derive(Debug)]
pub struct StaticPage {
    root: StaticDocument,
    pub renderer: RecordingRenderer,
    pub dispatcher: RecordingDispatcher,
}

impl StaticPage {
    pub fn new(spec: &PageSpec) -> Self {
        let mut ids = IdSource::default();
        Self {
            root: StaticDocument::build(spec, &mut ids),
            renderer: RecordingRenderer::default(),
            dispatcher: RecordingDispatcher::default(),
        }
    }

    pub fn root(&self) -> &StaticDocument {
        &self.root
    }

    /// Look an element up anywhere in the page, frames included.
    pub fn find(&self, node: NodeId) -> Option<&ElementInfo> {
        self.root.find(node)
    }

    /// First element, in depth-first page order, satisfying `pred`.
    pub fn find_by(&self, pred: impl Fn(&ElementInfo) -> bool) -> Option<&ElementInfo> {
        fn walk<'a>(
            doc: &'a StaticDocument,
            pred: &dyn Fn(&ElementInfo) -> bool,
        ) -> Option<&'a ElementInfo> {
            for node in &doc.nodes {
                if pred(&node.info) {
                    return Some(&node.info);
                }
                if let Some(found) = doc.frames.get(&node.info.node).and_then(|f| walk(f, pred)) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.root, &pred)
    }
}

impl Page for StaticPage {
    fn document(&self) -> &dyn Document {
        &self.root
    }

    fn renderer(&mut self) -> &mut dyn Renderer {
        &mut self.renderer
    }

    fn dispatcher(&mut self) -> &mut dyn Dispatcher {
        &mut self.dispatcher
    }
}
