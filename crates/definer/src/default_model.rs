//! Default interaction model
//!
//! Selection is processed before focus: focus decorations consult the
//! selection decorations already in the layer (a glow starts outside an
//! existing ring, a focus tooltip yields to an aggregate tooltip).

use std::collections::HashSet;

use interactive_charts_shared::{
    AggregationTarget, AnnotationRef, ChartDefinition, ChartState, ColorBarMarker, ColumnRole,
    InteractivityLayer, Point, SerieType, TooltipDefinition,
};

use crate::decorations;
use crate::tooltips::Collaborators;
use crate::InteractivityDefiner;

#[derive(Default)]
struct DefineContext {
    /// Datums covered by an aggregate tooltip; focus tooltips yield to it
    aggregate_cells: HashSet<(usize, usize)>,
}

pub(crate) fn define(
    definer: &mut InteractivityDefiner,
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
) -> InteractivityLayer {
    let mut layer = InteractivityLayer::new();
    let mut context = DefineContext::default();

    definer.ignore_cursor = true;

    apply_cell_selection(definition, state, collaborators, &mut context, &mut layer);
    apply_column_selection(definition, state, &mut layer);
    apply_row_selection(definition, state, collaborators, &mut layer);

    apply_datum_focus(definition, state, collaborators, &context, &mut layer);
    apply_serie_focus(definition, state, &mut layer);
    apply_category_focus(definer, definition, state, collaborators, &mut layer);

    apply_annotations(definition, state, collaborators, &mut layer);

    layer.overlay_box = state.overlay_box;
    layer
}

/// Whether several selected units collapse into one aggregate tooltip
fn aggregates(definition: &ChartDefinition, selected_count: usize) -> bool {
    selected_count > 1
        && (definition.aggregation_target != AggregationTarget::None
            || !definition.actions.is_empty())
}

fn apply_cell_selection(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    context: &mut DefineContext,
    layer: &mut InteractivityLayer,
) {
    let cells: Vec<(usize, usize)> = state.selected.cells().collect();
    if cells.is_empty() {
        return;
    }
    let aggregate = aggregates(definition, cells.len());
    let mut resolved: Vec<(usize, usize)> = Vec::new();

    for &(row, column) in &cells {
        match definition.column_role(column) {
            Some(ColumnRole::Data) => {
                if let Some(cell) = apply_data_cell(
                    definition,
                    state,
                    collaborators,
                    aggregate,
                    row,
                    column,
                    layer,
                ) {
                    resolved.push(cell);
                }
            }
            Some(ColumnRole::Annotation) => {
                apply_annotation_cell(definition, state, collaborators, row, column, layer);
            }
            Some(other) => {
                log::debug!("Selected cell in {other:?} column {column}; nothing to decorate");
            }
            None => {
                log::debug!("Selected cell in unmapped column {column}; skipping");
            }
        }
    }

    // Exactly one aggregate tooltip, anchored on the last selected cell
    if aggregate && definition.tooltip_trigger.on_selection() {
        if let Some(&(serie_index, datum_index)) = resolved.last() {
            if let Some(anchor) = datum_anchor(definition, serie_index, datum_index) {
                if let Some(tooltip) = build_aggregate_tooltip(
                    definition,
                    state,
                    collaborators,
                    &resolved,
                    anchor,
                ) {
                    layer.datum_mut(serie_index, datum_index).tooltip = Some(tooltip);
                }
            }
            context.aggregate_cells = resolved.iter().copied().collect();
        }
    }
}

/// Ring one selected DATA cell. Returns the resolved (serie, datum) pair
/// when the cell maps to real geometry.
fn apply_data_cell(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    aggregate: bool,
    row: usize,
    column: usize,
    layer: &mut InteractivityLayer,
) -> Option<(usize, usize)> {
    let Some(serie_index) = definition.serie_for_column(column) else {
        log::warn!("Selected column {column} has no serie mapping; skipping");
        return None;
    };
    let Some(datum_index) = definition.category_for_row(row) else {
        log::warn!("Selected row {row} has no category mapping; skipping");
        return None;
    };
    let serie = definition.series.get(serie_index)?;
    let Some(datum) = serie.datums.get(datum_index) else {
        log::warn!("Serie {serie_index} has no datum {datum_index}; skipping");
        return None;
    };
    if datum.is_null() {
        log::debug!("Selected datum ({serie_index}, {datum_index}) is null; no decoration");
        return None;
    }

    if let Some(ring) = decorations::datum_ring(serie, datum, &definition.background) {
        layer.datum_mut(serie_index, datum_index).ring = Some(ring);
    }

    if definition.crosshair.trigger.on_selection() {
        if let Some(anchor) = datum.scaled.as_ref().map(|s| s.anchor()) {
            if let Some(crosshair) = decorations::crosshair(definition, serie, anchor) {
                layer.datum_mut(serie_index, datum_index).crosshair = Some(crosshair);
            }
        }
    }

    if !aggregate && definition.tooltip_trigger.on_selection() {
        if let Some(anchor) = datum.scaled.as_ref().map(|s| s.anchor()) {
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

    Some((serie_index, datum_index))
}

/// Bold (and optionally tooltip) a selected interactive annotation cell
fn apply_annotation_cell(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    row: usize,
    column: usize,
    layer: &mut InteractivityLayer,
) {
    let Some(category_index) = definition.category_for_row(row) else {
        log::warn!("Selected annotation row {row} has no category mapping; skipping");
        return;
    };
    let Some(category) = definition.categories.get(category_index) else {
        return;
    };
    let Some(bundle) = &category.annotation else {
        log::debug!("Category {category_index} has no annotation bundle; skipping");
        return;
    };
    if !bundle.interactive {
        return;
    }

    let annotation = layer
        .category_mut(category_index)
        .annotation
        .get_or_insert_with(Default::default);
    annotation.bold = true;

    if definition.tooltip_trigger.on_selection() {
        if let Some(anchor) = category.area.map(|rect| rect.center()) {
            let reference = AnnotationRef {
                serie_index: definition
                    .columns
                    .get(column)
                    .and_then(|spec| spec.serie_index),
                category_index,
                label_index: 0,
            };
            if let Some(tooltip) = collaborators.tooltips.annotation_tooltip(
                definition,
                state,
                &reference,
                None,
                anchor,
            ) {
                layer
                    .category_mut(category_index)
                    .annotation
                    .get_or_insert_with(Default::default)
                    .tooltip = Some(tooltip);
            }
        }
    }
}

/// A selected column rings its entire serie, propagating to visible points
fn apply_column_selection(
    definition: &ChartDefinition,
    state: &ChartState,
    layer: &mut InteractivityLayer,
) {
    for column in state.selected.columns() {
        let Some(serie_index) = definition.serie_for_column(column) else {
            log::warn!("Selected column {column} has no serie mapping; skipping");
            continue;
        };
        let Some(serie) = definition.series.get(serie_index) else {
            continue;
        };

        if serie.serie_type.is_path_family() {
            if let Some(ring) = decorations::serie_ring(serie, &definition.background) {
                layer.serie_mut(serie_index).ring = Some(ring);
            }
        }
        for (datum_index, datum) in serie.datums.iter().enumerate() {
            if !serie.is_point_visible(datum) {
                continue;
            }
            if let Some(ring) = decorations::datum_ring(serie, datum, &definition.background) {
                layer.datum_mut(serie_index, datum_index).ring = Some(ring);
            }
        }
    }
}

fn apply_row_selection(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    layer: &mut InteractivityLayer,
) {
    let rows: Vec<usize> = state.selected.rows().collect();
    if rows.is_empty() {
        return;
    }
    let aggregate = aggregates(definition, rows.len());

    if definition.is_bubble_chart() {
        apply_bubble_row_selection(definition, state, collaborators, aggregate, &rows, layer);
        return;
    }

    let mut resolved: Vec<(usize, usize)> = Vec::new();
    let mut last_category = None;

    for (position, &row) in rows.iter().enumerate() {
        let last = position + 1 == rows.len();
        let Some(category_index) = definition.category_for_row(row) else {
            log::warn!("Selected row {row} has no category mapping; skipping");
            continue;
        };
        if last {
            last_category = Some(category_index);
        }

        for (serie_index, serie) in definition.series.iter().enumerate() {
            let Some(datum) = serie.datums.get(category_index) else {
                continue;
            };
            if datum.is_null() {
                continue;
            }
            if let Some(ring) = decorations::datum_ring(serie, datum, &definition.background) {
                layer.datum_mut(serie_index, category_index).ring = Some(ring);
            }
            resolved.push((serie_index, category_index));
        }

        // One category tooltip per selected row, unless they aggregate
        if !aggregate && definition.tooltip_trigger.on_selection() {
            attach_category_tooltip(definition, state, collaborators, category_index, layer);
        }
    }

    if aggregate && definition.tooltip_trigger.on_selection() {
        if let Some(category_index) = last_category {
            if let Some(anchor) = category_anchor(definition, state, category_index) {
                if let Some(tooltip) = build_aggregate_tooltip(
                    definition,
                    state,
                    collaborators,
                    &resolved,
                    anchor,
                ) {
                    layer.category_mut(category_index).tooltip = Some(tooltip);
                }
            }
        }
    }
}

/// In bubble charts a row is one datum; only the last selected row keeps
/// a visible tooltip (a known limitation preserved deliberately)
fn apply_bubble_row_selection(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    aggregate: bool,
    rows: &[usize],
    layer: &mut InteractivityLayer,
) {
    let serie_index = 0;
    let Some(serie) = definition.series.get(serie_index) else {
        return;
    };
    let mut resolved: Vec<(usize, usize)> = Vec::new();

    for (position, &row) in rows.iter().enumerate() {
        let last = position + 1 == rows.len();
        let Some(datum) = serie.datums.get(row) else {
            log::warn!("Bubble row {row} out of range; skipping");
            continue;
        };
        if datum.is_null() {
            continue;
        }
        if let Some(ring) = decorations::datum_ring(serie, datum, &definition.background) {
            layer.datum_mut(serie_index, row).ring = Some(ring);
        }
        resolved.push((serie_index, row));

        if last && definition.tooltip_trigger.on_selection() {
            if let Some(anchor) = datum.scaled.as_ref().map(|s| s.anchor()) {
                let tooltip = if aggregate {
                    build_aggregate_tooltip(definition, state, collaborators, &resolved, anchor)
                } else {
                    collaborators.tooltips.datum_tooltip(
                        definition,
                        state,
                        serie_index,
                        row,
                        anchor,
                    )
                };
                if let Some(tooltip) = tooltip {
                    layer.datum_mut(serie_index, row).tooltip = Some(tooltip);
                }
            }
        }
    }
}

fn apply_datum_focus(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    context: &DefineContext,
    layer: &mut InteractivityLayer,
) {
    let Some(datum_index) = state.focused.datum else {
        return;
    };
    let serie_index = state
        .focused
        .serie
        .expect("focused datum requires a focused serie");

    let Some(serie) = definition.series.get(serie_index) else {
        log::warn!("Focused serie {serie_index} out of range; skipping");
        return;
    };
    let Some(datum) = serie.datums.get(datum_index) else {
        log::warn!("Focused datum {datum_index} out of range; skipping");
        return;
    };
    if datum.is_null() {
        return;
    }

    let existing_ring = layer
        .datum(serie_index, datum_index)
        .and_then(|entry| entry.ring.clone());
    if let Some(glow) = decorations::datum_glow(serie, datum, existing_ring.as_ref()) {
        layer.datum_mut(serie_index, datum_index).glow = Some(glow);
    }

    if definition.crosshair.trigger.on_focus() {
        if let Some(anchor) = datum.scaled.as_ref().map(|s| s.anchor()) {
            if let Some(crosshair) = decorations::crosshair(definition, serie, anchor) {
                layer.datum_mut(serie_index, datum_index).crosshair = Some(crosshair);
            }
        }
    }

    let covered = context.aggregate_cells.contains(&(serie_index, datum_index));
    if definition.tooltip_trigger.on_focus() && !covered {
        if let Some(anchor) = datum.scaled.as_ref().map(|s| s.anchor()) {
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

    if definition.color_bar.is_some() {
        if let Some(value) = datum.value {
            layer.color_bar_marker = Some(ColorBarMarker { value });
        }
    }
}

fn apply_serie_focus(
    definition: &ChartDefinition,
    state: &ChartState,
    layer: &mut InteractivityLayer,
) {
    // A focused datum owns the decoration; serie focus is the datum-less case
    if state.focused.datum.is_some() {
        return;
    }
    let Some(serie_index) = state.focused.serie else {
        return;
    };
    let Some(serie) = definition.series.get(serie_index) else {
        log::warn!("Focused serie {serie_index} out of range; skipping");
        return;
    };

    glow_whole_serie(definition, serie_index, layer);

    // Diff-mode scatter series pair with the prior serie holding the old
    // data; glowing the new one pulls its partner along. The partner
    // carries old-data columns by construction, so one extra step is
    // always enough.
    if definition.is_diff
        && serie.serie_type == SerieType::Scatter
        && !serie.has_old_data
        && serie_index > 0
    {
        glow_whole_serie(definition, serie_index - 1, layer);
    }
}

fn glow_whole_serie(
    definition: &ChartDefinition,
    serie_index: usize,
    layer: &mut InteractivityLayer,
) {
    let Some(serie) = definition.series.get(serie_index) else {
        log::warn!("Serie {serie_index} out of range; skipping glow");
        return;
    };
    if let Some(glow) = decorations::serie_glow(serie) {
        layer.serie_mut(serie_index).glow = Some(glow);
    }
    for (datum_index, datum) in serie.datums.iter().enumerate() {
        if !serie.is_point_visible(datum) {
            continue;
        }
        let ring = layer
            .datum(serie_index, datum_index)
            .and_then(|entry| entry.ring.clone());
        if let Some(glow) = decorations::datum_glow(serie, datum, ring.as_ref()) {
            layer.datum_mut(serie_index, datum_index).glow = Some(glow);
        }
    }
}

fn apply_category_focus(
    definer: &mut InteractivityDefiner,
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    layer: &mut InteractivityLayer,
) {
    let Some(category_index) = state.focused.category else {
        return;
    };

    for (serie_index, serie) in definition.series.iter().enumerate() {
        let Some(datum) = serie.datums.get(category_index) else {
            continue;
        };
        if !serie.is_point_visible(datum) {
            continue;
        }
        let ring = layer
            .datum(serie_index, category_index)
            .and_then(|entry| entry.ring.clone());
        if let Some(glow) = decorations::datum_glow(serie, datum, ring.as_ref()) {
            layer.datum_mut(serie_index, category_index).glow = Some(glow);
        }
    }

    // The category tooltip follows the pointer; stop ignoring cursor moves
    definer.ignore_cursor = false;

    if definition.tooltip_trigger.on_focus() {
        match state.cursor.position {
            Some(anchor) => {
                if let Some(tooltip) = collaborators.tooltips.category_tooltip(
                    definition,
                    state,
                    category_index,
                    anchor,
                ) {
                    layer.category_mut(category_index).tooltip = Some(tooltip);
                }
            }
            None => {
                log::warn!("Category tooltip needs a cursor position; skipping");
            }
        }
    }
}

fn apply_annotations(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    layer: &mut InteractivityLayer,
) {
    if let Some(expanded) = state.annotations.expanded {
        layer
            .category_mut(expanded.category_index)
            .annotation
            .get_or_insert_with(Default::default)
            .expanded = true;
    }

    let Some(focused) = state.annotations.focused else {
        return;
    };
    let Some(anchor) = category_anchor(definition, state, focused.category_index) else {
        log::warn!(
            "Focused annotation in category {} has no anchor; skipping tooltip",
            focused.category_index
        );
        return;
    };
    let actions_menu = (!definition.actions.is_empty()).then_some(&state.actions_menu);
    if let Some(tooltip) = collaborators.tooltips.annotation_tooltip(
        definition,
        state,
        &focused,
        actions_menu,
        anchor,
    ) {
        layer
            .category_mut(focused.category_index)
            .annotation
            .get_or_insert_with(Default::default)
            .tooltip = Some(tooltip);
    }
}

fn build_aggregate_tooltip(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    cells: &[(usize, usize)],
    anchor: Point,
) -> Option<TooltipDefinition> {
    let mut tooltip = collaborators
        .tooltips
        .aggregate_tooltip(definition, state, cells, anchor)?;
    if !definition.actions.is_empty() {
        if let Some(extender) = collaborators.actions_menu {
            extender.extend(&mut tooltip, definition, &state.actions_menu);
        }
    }
    Some(tooltip)
}

fn datum_anchor(
    definition: &ChartDefinition,
    serie_index: usize,
    datum_index: usize,
) -> Option<Point> {
    definition
        .series
        .get(serie_index)?
        .datums
        .get(datum_index)?
        .scaled
        .as_ref()
        .map(|shape| shape.anchor())
}

fn category_anchor(
    definition: &ChartDefinition,
    state: &ChartState,
    category_index: usize,
) -> Option<Point> {
    definition
        .categories
        .get(category_index)
        .and_then(|category| category.area)
        .map(|rect| rect.center())
        .or(state.cursor.position)
}

fn attach_category_tooltip(
    definition: &ChartDefinition,
    state: &ChartState,
    collaborators: &Collaborators<'_>,
    category_index: usize,
    layer: &mut InteractivityLayer,
) {
    let Some(anchor) = category_anchor(definition, state, category_index) else {
        log::debug!("Category {category_index} has no tooltip anchor; skipping");
        return;
    };
    if let Some(tooltip) =
        collaborators
            .tooltips
            .category_tooltip(definition, state, category_index, anchor)
    {
        layer.category_mut(category_index).tooltip = Some(tooltip);
    }
}
