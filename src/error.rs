use std::fmt;

use crate::dom::dom_model::{DocumentId, NodeId};

/// Failure reported by one of the page capabilities (document, renderer,
/// dispatcher).
#[derive(Debug, Clone, PartialEq)]
pub enum DomError {
    /// The handle does not name an element of the queried document.
    UnknownNode(NodeId),

    /// The marker handle was never issued or has already been removed.
    UnknownMarker(u64),

    /// The embedded document of a frame could not be reached.
    FrameUnavailable(NodeId),

    /// Any other failure raised by the host page.
    Host(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(node) => write!(f, "unknown node {}", node.0),
            DomError::UnknownMarker(id) => write!(f, "unknown marker {}", id),
            DomError::FrameUnavailable(node) => {
                write!(f, "embedded document of frame {} is unavailable", node.0)
            }
            DomError::Host(msg) => write!(f, "host page error: {}", msg),
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Debug)]
pub enum HintError {
    /// A document query failed while discovering candidates.
    Scan {
        document: DocumentId,
        node: Option<NodeId>,
        source: DomError,
    },

    /// A label marker or highlight overlay could not be created, restyled or removed.
    Overlay { node: NodeId, source: DomError },

    /// A synthetic focus/mouse/form event could not be delivered.
    Activation { node: NodeId, source: DomError },

    /// The hint configuration was rejected at init.
    Config(String),

    /// A page capability failed outside scanning, rendering and activation.
    Dom(DomError),
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintError::Scan {
                document,
                node: Some(node),
                source,
            } => write!(
                f,
                "Scan failed in document {} at node {}: {}",
                document.0, node.0, source
            ),
            HintError::Scan {
                document,
                node: None,
                source,
            } => write!(f, "Scan failed in document {}: {}", document.0, source),
            HintError::Overlay { node, source } => {
                write!(f, "Overlay failure for node {}: {}", node.0, source)
            }
            HintError::Activation { node, source } => {
                write!(f, "Activation of node {} failed: {}", node.0, source)
            }
            HintError::Config(msg) => write!(f, "Invalid hint configuration: {}", msg),
            HintError::Dom(e) => write!(f, "Page error: {}", e),
        }
    }
}

impl std::error::Error for HintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HintError::Scan { source, .. } => Some(source),
            HintError::Overlay { source, .. } => Some(source),
            HintError::Activation { source, .. } => Some(source),
            HintError::Config(_) => None,
            HintError::Dom(source) => Some(source),
        }
    }
}

impl From<DomError> for HintError {
    fn from(e: DomError) -> Self {
        HintError::Dom(e)
    }
}
