//! Integration tests for the dive interaction model

use interactive_charts_definer::{
    Collaborators, InteractivityDefiner, NullTooltipProvider, TooltipProvider, DIVE_DIMMED_OPACITY,
};
use interactive_charts_shared::{
    ChartDefinition, ChartState, Datum, InteractivityModel, LegendDescription, LegendEntry, Point,
    Rect, ScaledShape, Serie, SerieType, TooltipDefinition, ViewWindow,
};

struct TestTooltips;

impl TooltipProvider for TestTooltips {
    fn datum_tooltip(
        &self,
        _definition: &ChartDefinition,
        _state: &ChartState,
        serie_index: usize,
        datum_index: usize,
        anchor: Point,
    ) -> Option<TooltipDefinition> {
        Some(TooltipDefinition::at(
            anchor,
            serde_json::json!({"serie": serie_index, "datum": datum_index}),
        ))
    }
}

/// Dive chart with line series at the given x positions, one legend entry
/// per serie
fn dive_chart(series_xs: &[&[f64]], labeled_legend: bool) -> ChartDefinition {
    let mut def = ChartDefinition::new(Rect::new(0.0, 0.0, 640.0, 480.0));
    def.interactivity_model = InteractivityModel::Dive;
    let mut entries = Vec::new();
    for (serie_index, xs) in series_xs.iter().enumerate() {
        let mut serie = Serie::new(SerieType::Line);
        serie.line_brush.stroke_opacity = 1.0;
        for &x in xs.iter() {
            serie.datums.push(Datum {
                scaled: Some(ScaledShape::Point {
                    center: Point::new(x, 50.0 + serie_index as f64 * 20.0),
                    radius: 3.0,
                }),
                ..Datum::default()
            });
        }
        def.series.push(serie);
        entries.push(LegendEntry {
            label: format!("serie {serie_index}"),
            serie_index,
        });
    }
    def.legend = Some(LegendDescription {
        entries,
        labeled: labeled_legend,
    });
    def
}

#[test]
fn test_nearest_point_selection_by_cursor_x() {
    let def = dive_chart(&[&[0.0, 10.0, 20.0]], false);
    let mut state = ChartState::default();
    state.focused.serie = Some(0);

    let mut definer = InteractivityDefiner::new();
    let collaborators = Collaborators::tooltips_only(&TestTooltips);

    // 14 < midpoint(10, 20): index 1 surfaces
    state.cursor.position = Some(Point::new(14.0, 50.0));
    let layer = definer.define(&def, &state, &collaborators);
    assert_eq!(layer.datum(0, 1).unwrap().visible, Some(true));
    assert!(layer.datum(0, 1).unwrap().tooltip.is_some());
    assert!(layer.datum(0, 2).is_none());

    // 16 >= midpoint: index 2 surfaces
    state.cursor.position = Some(Point::new(16.0, 50.0));
    let layer = definer.define(&def, &state, &collaborators);
    assert_eq!(layer.datum(0, 2).unwrap().visible, Some(true));
    assert!(layer.datum(0, 1).is_none());
}

#[test]
fn test_focused_datum_wins_over_cursor() {
    let def = dive_chart(&[&[0.0, 10.0, 20.0]], false);
    let mut state = ChartState::default();
    state.focused.serie = Some(0);
    state.focused.datum = Some(0);
    state.cursor.position = Some(Point::new(19.0, 50.0));

    let mut definer = InteractivityDefiner::new();
    let layer = definer.define(&def, &state, &Collaborators::tooltips_only(&TestTooltips));
    assert_eq!(layer.datum(0, 0).unwrap().visible, Some(true));
    assert!(layer.datum(0, 2).is_none());
}

#[test]
fn test_other_series_dim_and_remove_button_shows() {
    let def = dive_chart(&[&[0.0, 10.0], &[0.0, 10.0], &[0.0, 10.0]], false);
    let mut state = ChartState::default();
    state.focused.serie = Some(1);
    state.cursor.position = Some(Point::new(4.0, 50.0));

    let mut definer = InteractivityDefiner::new();
    let layer = definer.define(&def, &state, &Collaborators::tooltips_only(&TestTooltips));

    // The focused serie keeps its brush; the rest dim
    assert!(layer.serie(1).is_none());
    for serie_index in [0, 2] {
        let dimmed = layer.serie(serie_index).unwrap().line_brush.unwrap();
        assert_eq!(dimmed.stroke_opacity, DIVE_DIMMED_OPACITY);
        assert!(layer.legend_entries.get(&serie_index).unwrap().dimmed);
    }

    // The explored serie's legend entry offers the remove control
    assert!(layer.legend_entries.get(&1).unwrap().show_remove_button);
    assert!(!layer.legend_entries.get(&1).unwrap().dimmed);
}

#[test]
fn test_ignore_cursor_tracks_serie_focus() {
    let def = dive_chart(&[&[0.0, 10.0]], false);
    let mut state = ChartState::default();

    let mut definer = InteractivityDefiner::new();
    let collaborators = Collaborators::tooltips_only(&NullTooltipProvider);

    definer.define(&def, &state, &collaborators);
    assert!(definer.ignore_cursor_in_comparison());

    state.focused.serie = Some(0);
    state.cursor.position = Some(Point::new(5.0, 50.0));
    definer.define(&def, &state, &collaborators);
    assert!(!definer.ignore_cursor_in_comparison());

    state.focused.serie = None;
    definer.define(&def, &state, &collaborators);
    assert!(definer.ignore_cursor_in_comparison());
}

#[test]
fn test_labeled_legend_surfaces_last_in_view_datum() {
    let mut def = dive_chart(&[&[0.0, 10.0, 20.0, 30.0], &[0.0, 10.0, 20.0, 30.0]], true);
    // Only the first three points are inside the view window
    def.series[0].view_window = Some(ViewWindow { first: 0, last: 2 });

    let mut state = ChartState::default();
    state.legend.focused_entry = Some(0);

    let mut definer = InteractivityDefiner::new();
    let layer = definer.define(&def, &state, &Collaborators::tooltips_only(&TestTooltips));

    let surfaced = layer.datum(0, 2).unwrap();
    assert_eq!(surfaced.visible, Some(true));
    assert!(surfaced.glow.is_some());
    assert!(surfaced.tooltip.is_some());

    // The other serie dims even without cursor-driven focus
    assert!(layer.serie(1).unwrap().line_brush.is_some());
    assert!(layer.legend_entries.get(&1).unwrap().dimmed);
}

#[test]
fn test_labeled_legend_ignored_when_legend_not_labeled() {
    let def = dive_chart(&[&[0.0, 10.0]], false);
    let mut state = ChartState::default();
    state.legend.focused_entry = Some(0);

    let mut definer = InteractivityDefiner::new();
    let layer = definer.define(
        &def,
        &state,
        &Collaborators::tooltips_only(&NullTooltipProvider),
    );
    assert!(layer.is_empty());
}
