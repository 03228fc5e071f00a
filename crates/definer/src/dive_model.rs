//! Dive interaction model
//!
//! A single-hover exploration mode, mutually exclusive with the default
//! model: one serie is explored at a time, the point nearest the cursor's
//! x-coordinate is surfaced, and every other serie recedes.

use interactive_charts_shared::{
    ChartDefinition, ChartState, InteractivityLayer, ScaledShape, Serie,
};

use crate::decorations;
use crate::tooltips::Collaborators;
use crate::InteractivityDefiner;

/// Stroke-opacity multiplier applied to the lines of non-focused series
pub const DIVE_DIMMED_OPACITY: f32 = 0.3;

pub(crate) fn define(
    definer: &mut InteractivityDefiner,
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
) -> InteractivityLayer {
    let mut layer = InteractivityLayer::new();

    definer.ignore_cursor = true;

    if let Some(serie_index) = state.focused.serie {
        // The tooltip follows the cursor across the serie
        definer.ignore_cursor = false;
        apply_serie_exploration(definition, state, collaborators, serie_index, &mut layer);
    }

    if definition
        .legend
        .as_ref()
        .is_some_and(|legend| legend.labeled)
    {
        if let Some(entry_index) = state.legend.focused_entry {
            apply_legend_exploration(definition, state, collaborators, entry_index, &mut layer);
        }
    }

    layer
}

fn apply_serie_exploration(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    serie_index: usize,
    layer: &mut InteractivityLayer,
) {
    let Some(serie) = definition.series.get(serie_index) else {
        log::warn!("Focused serie {serie_index} out of range; skipping");
        return;
    };

    let datum_index = match state.focused.datum {
        Some(datum_index) => Some(datum_index),
        None => state
            .cursor
            .position
            .and_then(|cursor| nearest_datum_by_x(serie, cursor.x)),
    };

    if let Some(datum_index) = datum_index {
        surface_datum(definition, state, collaborators, serie_index, datum_index, layer);
    } else {
        log::debug!("No cursor and no focused datum; nothing to surface");
    }

    dim_other_series(definition, serie_index, layer);

    if let Some(entry_index) = legend_entry_for_serie(definition, serie_index) {
        layer.legend_entry_mut(entry_index).show_remove_button = true;
    }
}

/// In labeled-legend mode a focused legend entry surfaces the last
/// in-view datum of its serie, independent of cursor-driven focus
fn apply_legend_exploration(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    entry_index: usize,
    layer: &mut InteractivityLayer,
) {
    let Some(legend) = &definition.legend else {
        return;
    };
    let Some(entry) = legend.entries.get(entry_index) else {
        log::warn!("Focused legend entry {entry_index} out of range; skipping");
        return;
    };
    let serie_index = entry.serie_index;
    let Some(serie) = definition.series.get(serie_index) else {
        return;
    };

    let datum_index = serie
        .view_window
        .map(|window| window.last)
        .or_else(|| last_non_null_index(serie));
    let Some(datum_index) = datum_index else {
        log::debug!("Serie {serie_index} has no in-view datum to surface");
        return;
    };

    if let Some(datum) = serie.datums.get(datum_index) {
        if !datum.is_null() {
            if let Some(glow) = decorations::datum_glow(serie, datum, None) {
                layer.datum_mut(serie_index, datum_index).glow = Some(glow);
            }
        }
    }
    surface_datum(definition, state, collaborators, serie_index, datum_index, layer);
    dim_other_series(definition, serie_index, layer);
}

/// Make the chosen datum visible and, if focus produces tooltips,
/// tooltipped
fn surface_datum(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    serie_index: usize,
    datum_index: usize,
    layer: &mut InteractivityLayer,
) {
    let Some(serie) = definition.series.get(serie_index) else {
        return;
    };
    let Some(datum) = serie.datums.get(datum_index) else {
        log::warn!("Datum {datum_index} out of range in serie {serie_index}; skipping");
        return;
    };
    if datum.is_null() {
        return;
    }

    layer.datum_mut(serie_index, datum_index).visible = Some(true);

    if definition.tooltip_trigger.on_focus() {
        if let Some(anchor) = datum.scaled.as_ref().map(|shape| shape.anchor()) {
            if let Some(tooltip) = collaborators.tooltips.datum_tooltip(
                definition,
                state,
                serie_index,
                datum_index,
                anchor,
            ) {
                layer.datum_mut(serie_index, datum_index).tooltip = Some(tooltip);
            }
        }
    }
}

/// Grey out every serie but the explored one: dimmed legend label and a
/// line stroke at reduced opacity
fn dim_other_series(
    definition: &ChartDefinition,
    focused_serie: usize,
    layer: &mut InteractivityLayer,
) {
    for (serie_index, serie) in definition.series.iter().enumerate() {
        if serie_index == focused_serie {
            continue;
        }
        let dimmed = serie
            .line_brush
            .with_stroke_opacity(serie.line_brush.stroke_opacity * DIVE_DIMMED_OPACITY);
        layer.serie_mut(serie_index).line_brush = Some(dimmed);
        if let Some(entry_index) = legend_entry_for_serie(definition, serie_index) {
            layer.legend_entry_mut(entry_index).dimmed = true;
        }
    }
}

fn legend_entry_for_serie(definition: &ChartDefinition, serie_index: usize) -> Option<usize> {
    definition
        .legend
        .as_ref()?
        .entries
        .iter()
        .position(|entry| entry.serie_index == serie_index)
}

fn last_non_null_index(serie: &Serie) -> Option<usize> {
    serie
        .datums
        .iter()
        .rposition(|datum| !datum.is_null())
}

/// Nearest point to an x-coordinate: the first point at or right of the
/// cursor, compared against its left neighbor; exact midpoint ties go to
/// the later point. A cursor left of every point picks the first, past
/// the last picks the last.
fn nearest_datum_by_x(serie: &Serie, cursor_x: f64) -> Option<usize> {
    let points: Vec<(usize, f64)> = serie
        .datums
        .iter()
        .enumerate()
        .filter_map(|(index, datum)| match datum.scaled {
            Some(ScaledShape::Point { center, .. }) => Some((index, center.x)),
            _ => None,
        })
        .collect();
    if points.is_empty() {
        return None;
    }

    let first_at_or_right = points.iter().position(|&(_, x)| x >= cursor_x);
    let position = match first_at_or_right {
        None => points.len() - 1,
        Some(0) => 0,
        Some(i) => {
            let midpoint = (points[i - 1].1 + points[i].1) / 2.0;
            if cursor_x < midpoint {
                i - 1
            } else {
                i
            }
        }
    };
    Some(points[position].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use interactive_charts_shared::{Datum, Point, SerieType};

    fn line_serie(xs: &[f64]) -> Serie {
        let mut serie = Serie::new(SerieType::Line);
        for &x in xs {
            serie.datums.push(Datum {
                scaled: Some(ScaledShape::Point {
                    center: Point::new(x, 50.0),
                    radius: 3.0,
                }),
                ..Datum::default()
            });
        }
        serie
    }

    #[test]
    fn test_nearest_straddle_and_midpoint() {
        let serie = line_serie(&[0.0, 10.0, 20.0]);
        // 14 is left of the 10/20 midpoint
        assert_eq!(nearest_datum_by_x(&serie, 14.0), Some(1));
        assert_eq!(nearest_datum_by_x(&serie, 16.0), Some(2));
        // The exact midpoint resolves toward the later point
        assert_eq!(nearest_datum_by_x(&serie, 15.0), Some(2));
    }

    #[test]
    fn test_nearest_outside_range() {
        let serie = line_serie(&[0.0, 10.0, 20.0]);
        assert_eq!(nearest_datum_by_x(&serie, -5.0), Some(0));
        assert_eq!(nearest_datum_by_x(&serie, 99.0), Some(2));
    }

    #[test]
    fn test_nearest_skips_null_datums() {
        let mut serie = line_serie(&[0.0, 10.0]);
        serie.datums.insert(1, Datum::default());
        // Datum indices are preserved: [0.0]=0, null=1, [10.0]=2
        assert_eq!(nearest_datum_by_x(&serie, 9.0), Some(2));
    }

    #[test]
    fn test_nearest_empty_serie() {
        let serie = Serie::new(SerieType::Line);
        assert_eq!(nearest_datum_by_x(&serie, 5.0), None);
    }
}
