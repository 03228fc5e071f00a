//! Pointer and semantic event types shared with the host

use serde::{Deserialize, Serialize};

/// Raw pointer event kinds the hit tester consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEventKind {
    MouseOver,
    MouseOut,
    MouseMove,
    Click,
    RightClick,
}

/// Logical target category of a semantic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTarget {
    Datum,
    Category,
    Serie,
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventOperation {
    HoverIn,
    HoverOut,
    Click,
    RightClick,
}

impl EventOperation {
    /// The operation a raw pointer event implies, before target resolution
    pub fn from_pointer(kind: PointerEventKind) -> Option<EventOperation> {
        match kind {
            PointerEventKind::MouseOver => Some(EventOperation::HoverIn),
            PointerEventKind::MouseOut => Some(EventOperation::HoverOut),
            PointerEventKind::Click => Some(EventOperation::Click),
            PointerEventKind::RightClick => Some(EventOperation::RightClick),
            PointerEventKind::MouseMove => None,
        }
    }
}

/// Semantic event emitted to host-level listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    pub target: EventTarget,
    pub operation: EventOperation,
    pub serie_index: Option<usize>,
    pub datum_index: Option<usize>,
    pub category_index: Option<usize>,
    pub annotation_index: Option<usize>,
}

impl InteractionEvent {
    pub fn new(target: EventTarget, operation: EventOperation) -> Self {
        Self {
            target,
            operation,
            serie_index: None,
            datum_index: None,
            category_index: None,
            annotation_index: None,
        }
    }
}
