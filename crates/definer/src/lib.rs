//! Interactivity definer
//!
//! The pure function `(ChartDefinition, ChartState) -> InteractivityLayer`:
//! given the immutable chart geometry and the current interaction state,
//! produce the sparse overlay of glows, rings, crosshairs, tooltips and
//! dimming that the renderer merges over the base chart. Two interaction
//! models exist; the chart definition selects one and they never mix.
//!
//! The single piece of persisted state is the ignore-cursor hint: it tells
//! the host whether cursor-position-only state changes can skip the next
//! recomputation, and it flips off while a tooltip must track the pointer.

pub mod decorations;
pub mod default_model;
pub mod dive_model;
pub mod tooltips;

use interactive_charts_shared::{ChartDefinition, ChartState, InteractivityLayer, InteractivityModel};

pub use decorations::{
    GLOW_LEVEL_OPACITIES, GLOW_LEVEL_WIDTHS, RING_GAP, RING_STROKE_WIDTH,
};
pub use dive_model::DIVE_DIMMED_OPACITY;
pub use tooltips::{ActionsMenuExtender, Collaborators, NullTooltipProvider, TooltipProvider};

/// Per-chart-instance definer. Carries only the ignore-cursor hint; the
/// layer itself is created fresh on every call.
pub struct InteractivityDefiner {
    pub(crate) ignore_cursor: bool,
}

impl Default for InteractivityDefiner {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractivityDefiner {
    pub fn new() -> Self {
        Self { ignore_cursor: true }
    }

    /// Hint for the host's state-equality check: when true, a chart state
    /// differing from the previous one only in cursor position does not
    /// need a fresh layer
    pub fn ignore_cursor_in_comparison(&self) -> bool {
        self.ignore_cursor
    }

    /// Compute the interactivity layer for the given definition and state
    pub fn define(
        &mut self,
        definition: &ChartDefinition,
        state: &ChartState,
        collaborators: &Collaborators<'_>,
    ) -> InteractivityLayer {
        match definition.interactivity_model {
            InteractivityModel::Default => {
                default_model::define(self, definition, state, collaborators)
            }
            InteractivityModel::Dive => dive_model::define(self, definition, state, collaborators),
        }
    }
}
