//! Shared types for the interactive-charts architecture
//!
//! This crate contains the types shared between the hit tester, the
//! interactivity definer, and the host: the chart definition (immutable
//! per redraw), the chart state (host-owned), the interactivity layer
//! (the sparse overlay output), logical element ids, and event types.

pub mod brush;
pub mod chart_definition;
pub mod chart_state;
pub mod element_id;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod layer;

pub use brush::{Brush, Color};
pub use chart_definition::{
    AggregationTarget, AnnotationBundle, Category, ChartDefinition, ColorBarDescription,
    ColumnRole, ColumnSpec, CrosshairConfig, CrosshairOrientation, CrosshairTrigger, Datum,
    FocusTarget, InteractivityModel, LegendDescription, LegendEntry, ScaledShape, Serie,
    SerieType, StackingType, TooltipTrigger, ViewWindow,
};
pub use chart_state::{
    ActionsMenuState, AnnotationRef, AnnotationsState, ChangeDetectionConfig, ChartState, Cursor,
    Focus, LegendState, Selection, SelectionEntry, StateChangeDetection,
};
pub use element_id::{precedence, ElementId, ElementType};
pub use errors::{ChartError, Result, ValidationResult};
pub use events::{EventOperation, EventTarget, InteractionEvent, PointerEventKind};
pub use geometry::{LineSegment, Point, Rect};
pub use layer::{
    AnnotationOverride, CategoryOverride, ColorBarMarker, Crosshair, DatumOverride,
    DecorationShape, Glow, GlowLevel, InteractivityLayer, LegendEntryOverride, Ring,
    SerieOverride, TooltipDefinition,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_serialization() {
        let mut def = ChartDefinition::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        def.series.push(Serie::new(SerieType::Scatter));
        def.focus_target = FocusTarget::BOTH;

        let serialized = bincode::serialize(&def).unwrap();
        let deserialized: ChartDefinition = bincode::deserialize(&serialized).unwrap();

        assert_eq!(def, deserialized);
    }

    #[test]
    fn test_layer_serialization() {
        let mut layer = InteractivityLayer::new();
        layer.datum_mut(0, 2).visible = Some(true);
        layer.legend_entry_mut(1).dimmed = true;

        let serialized = bincode::serialize(&layer).unwrap();
        let deserialized: InteractivityLayer = bincode::deserialize(&serialized).unwrap();

        assert_eq!(layer, deserialized);
    }

    #[test]
    fn test_state_serialization() {
        let mut state = ChartState::default();
        state.selected.add(SelectionEntry::Cell { row: 1, column: 2 });
        state.focused.serie = Some(0);

        let json = serde_json::to_string(&state).unwrap();
        let back: ChartState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
