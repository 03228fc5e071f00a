//! Hit tester
//!
//! Resolves a raw pointer event plus cursor position into the logical
//! element the event refers to, and translates resolved ids into semantic
//! interaction events for host-level listeners.

use interactive_charts_shared::{
    precedence, ChartDefinition, ElementId, ElementType, EventOperation, EventTarget,
    FocusTarget, InteractionEvent, Point, PointerEventKind,
};

use crate::sensitivity::SensitivityIndex;

/// Per-chart-instance hit tester. The one slot of mutable state is the
/// previously resolved sensitivity area, consulted on MOUSEOUT so
/// hover-out reports the element actually being left.
pub struct HitTester {
    index: SensitivityIndex,
    previous_area: Option<ElementId>,
}

impl HitTester {
    pub fn new(definition: &ChartDefinition) -> Self {
        Self {
            index: SensitivityIndex::build(definition),
            previous_area: None,
        }
    }

    /// Rebuild the sensitivity index for a new chart definition
    pub fn update_chart_definition(&mut self, definition: &ChartDefinition) {
        self.index.update_chart_definition(definition);
        self.previous_area = None;
    }

    pub fn index(&self) -> &SensitivityIndex {
        &self.index
    }

    /// Resolve a pointer event to a logical element id.
    ///
    /// `native_id` is the renderer-resolved id of whatever primitive is
    /// painted at the event target; `cursor` is the pointer position in
    /// chart-local coordinates, when the host has one.
    pub fn detect(
        &mut self,
        kind: PointerEventKind,
        native_id: &ElementId,
        cursor: Option<Point>,
        definition: &ChartDefinition,
    ) -> ElementId {
        let Some(cursor) = cursor else {
            return ElementId::chart_root();
        };

        let entering = self.sensitivity_candidate(&cursor, definition);

        if kind == PointerEventKind::MouseOut {
            let result = self.resolve_mouse_out(native_id, entering.as_ref());
            self.previous_area = entering;
            return validate(result, definition.focus_target);
        }

        let candidate = match &entering {
            None => native_id.clone(),
            Some(area) => {
                // A rendered element only beats the invisible area when it
                // is itself a valid focus target and strictly outranks it
                if is_valid(native_id, definition.focus_target)
                    && precedence(native_id.element_type) > precedence(area.element_type)
                {
                    native_id.clone()
                } else {
                    area.clone()
                }
            }
        };

        self.previous_area = entering;
        validate(candidate, definition.focus_target)
    }

    /// The invisible hit region under the cursor, if any
    fn sensitivity_candidate(
        &self,
        cursor: &Point,
        definition: &ChartDefinition,
    ) -> Option<ElementId> {
        if definition.interior().contains(cursor) && definition.focus_target.datum {
            self.index.nearest_circle(cursor).map(|area| area.id.clone())
        } else if definition.focus_target.category {
            self.index.category_at(cursor).map(|area| area.id.clone())
        } else {
            None
        }
    }

    /// MOUSEOUT reports the area being left, not the one being entered.
    /// With no recorded previous area we fall back to the natively
    /// rendered element id; some cross-region pointer transitions deliver
    /// MOUSEOUT before any MOUSEOVER was seen, and a permissive answer
    /// beats losing the event.
    fn resolve_mouse_out(
        &self,
        native_id: &ElementId,
        entering: Option<&ElementId>,
    ) -> ElementId {
        match &self.previous_area {
            None => native_id.clone(),
            Some(previous) => {
                if entering == Some(previous) {
                    // Still inside the same area: nothing was left
                    ElementId::chart_root()
                } else {
                    previous.clone()
                }
            }
        }
    }

    /// Translate an operation on a resolved logical id into a semantic
    /// event. Unknown element types are ignored, not errors: the renderer
    /// names render-only primitives this engine has no business with.
    pub fn dispatch(&self, operation: EventOperation, logical_id: &str) -> Option<InteractionEvent> {
        let id = match ElementId::parse(logical_id) {
            Ok(id) => id,
            Err(err) => {
                log::debug!("Ignoring unrecognized logical id '{logical_id}': {err}");
                return None;
            }
        };

        let mut event = match id.element_type {
            ElementType::Point
            | ElementType::Bar
            | ElementType::Candlestick
            | ElementType::Boxplot
            | ElementType::Bubble
            | ElementType::PointSensitivity => InteractionEvent::new(EventTarget::Datum, operation),
            ElementType::CategorySensitivity => {
                InteractionEvent::new(EventTarget::Category, operation)
            }
            ElementType::Line | ElementType::Area => {
                InteractionEvent::new(EventTarget::Serie, operation)
            }
            ElementType::AnnotationText => InteractionEvent::new(EventTarget::Annotation, operation),
            ElementType::ChartRoot | ElementType::LegendEntry => {
                log::debug!(
                    "No semantic event for element type {:?}",
                    id.element_type
                );
                return None;
            }
        };

        event.serie_index = id.serie_index();
        event.datum_index = id.datum_index();
        event.category_index = id.category_index();
        if id.element_type == ElementType::AnnotationText {
            event.annotation_index = id.indices.get(2).copied();
        }
        Some(event)
    }
}

/// Reject ids the current focus-target configuration cannot act on,
/// falling back to the chart root
fn validate(candidate: ElementId, focus_target: FocusTarget) -> ElementId {
    if is_valid(&candidate, focus_target) {
        candidate
    } else {
        ElementId::chart_root()
    }
}

fn is_valid(id: &ElementId, focus_target: FocusTarget) -> bool {
    if id.element_type.is_datum_shaped() {
        focus_target.datum
    } else if id.element_type.is_category_shaped() {
        focus_target.category
    } else {
        true
    }
}
