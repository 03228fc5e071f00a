//! The interactivity layer
//!
//! A sparse overlay with the same shape as the chart definition, carrying
//! only the visual overrides implied by the current chart state. Created
//! fresh on every recomputation, handed to the renderer for merging, never
//! mutated afterwards.
//!
//! Overrides are keyed by explicit index maps rather than nested
//! auto-vivified objects; the `*_mut` accessors return-or-create the
//! record for a key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::brush::Brush;
use crate::geometry::{LineSegment, Point, Rect};

/// Geometry of one decoration primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationShape {
    Circle { center: Point, radius: f64 },
    Rectangle { rect: Rect },
    Path { points: Vec<Point> },
}

/// One stroked level of a glow halo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowLevel {
    pub shape: DecorationShape,
    pub brush: Brush,
}

/// Multi-level translucent halo indicating focus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub levels: Vec<GlowLevel>,
}

/// Single stroked decoration indicating selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub shape: DecorationShape,
    pub brush: Brush,
}

/// Full-chart-area segments through a datum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crosshair {
    pub segments: Vec<LineSegment>,
    pub brush: Brush,
}

/// Tooltip produced by the external tooltip collaborator; content is
/// opaque to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipDefinition {
    pub anchor: Point,
    pub content: serde_json::Value,
    pub pinned: bool,
}

impl TooltipDefinition {
    pub fn at(anchor: Point, content: serde_json::Value) -> Self {
        Self {
            anchor,
            content,
            pinned: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatumOverride {
    pub glow: Option<Glow>,
    pub ring: Option<Ring>,
    pub crosshair: Option<Crosshair>,
    pub tooltip: Option<TooltipDefinition>,
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SerieOverride {
    pub glow: Option<Glow>,
    pub ring: Option<Ring>,
    pub line_brush: Option<Brush>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationOverride {
    pub bold: bool,
    pub expanded: bool,
    pub tooltip: Option<TooltipDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOverride {
    pub tooltip: Option<TooltipDefinition>,
    pub annotation: Option<AnnotationOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntryOverride {
    pub dimmed: bool,
    pub show_remove_button: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBarMarker {
    pub value: f64,
}

/// Sparse overlay merged onto the chart definition by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InteractivityLayer {
    pub series: BTreeMap<usize, SerieOverride>,
    pub datums: BTreeMap<usize, BTreeMap<usize, DatumOverride>>,
    pub categories: BTreeMap<usize, CategoryOverride>,
    pub legend_entries: BTreeMap<usize, LegendEntryOverride>,
    pub color_bar_marker: Option<ColorBarMarker>,
    pub overlay_box: Option<Rect>,
}

impl InteractivityLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return-or-create the serie override record
    pub fn serie_mut(&mut self, serie_index: usize) -> &mut SerieOverride {
        self.series.entry(serie_index).or_default()
    }

    /// Return-or-create the datum override record
    pub fn datum_mut(&mut self, serie_index: usize, datum_index: usize) -> &mut DatumOverride {
        self.datums
            .entry(serie_index)
            .or_default()
            .entry(datum_index)
            .or_default()
    }

    /// Return-or-create the category override record
    pub fn category_mut(&mut self, category_index: usize) -> &mut CategoryOverride {
        self.categories.entry(category_index).or_default()
    }

    /// Return-or-create the legend entry override record
    pub fn legend_entry_mut(&mut self, entry_index: usize) -> &mut LegendEntryOverride {
        self.legend_entries.entry(entry_index).or_default()
    }

    pub fn datum(&self, serie_index: usize, datum_index: usize) -> Option<&DatumOverride> {
        self.datums.get(&serie_index)?.get(&datum_index)
    }

    pub fn serie(&self, serie_index: usize) -> Option<&SerieOverride> {
        self.series.get(&serie_index)
    }

    /// All datum overrides, flattened for inspection
    pub fn datum_entries(&self) -> impl Iterator<Item = (usize, usize, &DatumOverride)> {
        self.datums.iter().flat_map(|(serie, per_datum)| {
            per_datum
                .iter()
                .map(move |(datum, entry)| (*serie, *datum, entry))
        })
    }

    /// Count of tooltips anywhere in the layer
    pub fn tooltip_count(&self) -> usize {
        let datum_tooltips = self
            .datum_entries()
            .filter(|(_, _, d)| d.tooltip.is_some())
            .count();
        let category_tooltips = self
            .categories
            .values()
            .filter(|c| c.tooltip.is_some() || c.annotation.as_ref().is_some_and(|a| a.tooltip.is_some()))
            .count();
        datum_tooltips + category_tooltips
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
            && self.datums.is_empty()
            && self.categories.is_empty()
            && self.legend_entries.is_empty()
            && self.color_bar_marker.is_none()
            && self.overlay_box.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_if_absent() {
        let mut layer = InteractivityLayer::new();
        assert!(layer.is_empty());

        layer.datum_mut(1, 3).visible = Some(true);
        layer.datum_mut(1, 3).ring = Some(Ring {
            shape: DecorationShape::Circle {
                center: Point::new(0.0, 0.0),
                radius: 5.0,
            },
            brush: Brush::default(),
        });

        // Both writes landed on the same record
        let datum = layer.datum(1, 3).unwrap();
        assert_eq!(datum.visible, Some(true));
        assert!(datum.ring.is_some());
        assert_eq!(layer.datum_entries().count(), 1);
    }

    #[test]
    fn test_structural_equality() {
        let mut a = InteractivityLayer::new();
        let mut b = InteractivityLayer::new();
        a.serie_mut(0).line_brush = Some(Brush::default());
        b.serie_mut(0).line_brush = Some(Brush::default());
        assert_eq!(a, b);

        b.legend_entry_mut(2).dimmed = true;
        assert_ne!(a, b);
    }

    #[test]
    fn test_tooltip_count() {
        let mut layer = InteractivityLayer::new();
        layer.datum_mut(0, 0).tooltip = Some(TooltipDefinition::at(
            Point::new(1.0, 1.0),
            serde_json::json!({"text": "a"}),
        ));
        layer.category_mut(2).tooltip = Some(TooltipDefinition::at(
            Point::new(2.0, 2.0),
            serde_json::json!({"text": "b"}),
        ));
        assert_eq!(layer.tooltip_count(), 2);
    }
}
