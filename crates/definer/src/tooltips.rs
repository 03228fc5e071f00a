//! Collaborator seams for tooltip and actions-menu content
//!
//! The definer decides *where* tooltips go and *which* element anchors
//! them; the host decides what they say. These traits are invoked, never
//! implemented, by this crate.

use interactive_charts_shared::{
    ActionsMenuState, AnnotationRef, ChartDefinition, ChartState, Point, TooltipDefinition,
};

/// Produces tooltip definitions for the elements the definer marks.
/// Every method may return `None` (no tooltip for that target).
pub trait TooltipProvider {
    /// Tooltip for a single datum
    fn datum_tooltip(
        &self,
        _definition: &ChartDefinition,
        _state: &ChartState,
        _serie_index: usize,
        _datum_index: usize,
        _anchor: Point,
    ) -> Option<TooltipDefinition> {
        None
    }

    /// Tooltip covering a whole category
    fn category_tooltip(
        &self,
        _definition: &ChartDefinition,
        _state: &ChartState,
        _category_index: usize,
        _anchor: Point,
    ) -> Option<TooltipDefinition> {
        None
    }

    /// One tooltip summarizing several selected cells
    fn aggregate_tooltip(
        &self,
        _definition: &ChartDefinition,
        _state: &ChartState,
        _cells: &[(usize, usize)],
        _anchor: Point,
    ) -> Option<TooltipDefinition> {
        None
    }

    /// Tooltip for a focused annotation label. `actions_menu` carries the
    /// menu state when the chart has an actions menu to embed.
    fn annotation_tooltip(
        &self,
        _definition: &ChartDefinition,
        _state: &ChartState,
        _annotation: &AnnotationRef,
        _actions_menu: Option<&ActionsMenuState>,
        _anchor: Point,
    ) -> Option<TooltipDefinition> {
        None
    }
}

/// Extends a tooltip with actions-menu state
pub trait ActionsMenuExtender {
    fn extend(
        &self,
        tooltip: &mut TooltipDefinition,
        definition: &ChartDefinition,
        state: &ActionsMenuState,
    );
}

/// Provider for hosts without tooltips; every target gets `None`
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTooltipProvider;

impl TooltipProvider for NullTooltipProvider {}

/// The external collaborators one `define` call may consult
pub struct Collaborators<'a> {
    pub tooltips: &'a dyn TooltipProvider,
    pub actions_menu: Option<&'a dyn ActionsMenuExtender>,
}

impl<'a> Collaborators<'a> {
    pub fn tooltips_only(tooltips: &'a dyn TooltipProvider) -> Self {
        Self {
            tooltips,
            actions_menu: None,
        }
    }
}
