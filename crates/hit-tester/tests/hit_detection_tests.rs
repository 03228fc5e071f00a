//! Integration tests for pointer-event resolution

use interactive_charts_hit::HitTester;
use interactive_charts_shared::{
    ChartDefinition, Datum, ElementId, EventOperation, EventTarget, Point, PointerEventKind,
    Rect, ScaledShape, Serie, SerieType,
};

/// Helper to build a scatter chart with the given points
fn scatter_chart(points: &[(f64, f64)], radius: f64) -> ChartDefinition {
    let mut def = ChartDefinition::new(Rect::new(0.0, 0.0, 400.0, 400.0));
    let mut serie = Serie::new(SerieType::Scatter);
    serie.point_radius = radius;
    serie.point_brush.stroke_width = 0.0;
    for &(x, y) in points {
        serie.datums.push(Datum {
            scaled: Some(ScaledShape::Point {
                center: Point::new(x, y),
                radius,
            }),
            ..Datum::default()
        });
    }
    def.series.push(serie);
    def
}

#[test]
fn test_three_point_scatter_resolution() {
    let def = scatter_chart(&[(10.0, 10.0), (50.0, 50.0), (90.0, 10.0)], 8.0);
    let mut tester = HitTester::new(&def);
    let root = ElementId::chart_root();

    // (51, 51) lies inside the middle point's sensitivity circle
    let resolved = tester.detect(
        PointerEventKind::MouseMove,
        &root,
        Some(Point::new(51.0, 51.0)),
        &def,
    );
    assert_eq!(resolved, ElementId::point_sensitivity(0, 1));

    // (200, 200) hits nothing and falls back to the chart root
    let resolved = tester.detect(
        PointerEventKind::MouseMove,
        &root,
        Some(Point::new(200.0, 200.0)),
        &def,
    );
    assert!(resolved.is_chart_root());
}

#[test]
fn test_hover_in_hover_out_symmetry() {
    let def = scatter_chart(&[(10.0, 10.0)], 8.0);
    let mut tester = HitTester::new(&def);
    let root = ElementId::chart_root();

    let entered = tester.detect(
        PointerEventKind::MouseOver,
        &root,
        Some(Point::new(12.0, 10.0)),
        &def,
    );
    let hover_in = tester
        .dispatch(EventOperation::HoverIn, &entered.to_string())
        .unwrap();
    assert_eq!(hover_in.target, EventTarget::Datum);
    assert_eq!(hover_in.serie_index, Some(0));
    assert_eq!(hover_in.datum_index, Some(0));

    let left = tester.detect(
        PointerEventKind::MouseOut,
        &root,
        Some(Point::new(300.0, 300.0)),
        &def,
    );
    let hover_out = tester
        .dispatch(EventOperation::HoverOut, &left.to_string())
        .unwrap();
    assert_eq!(hover_out.target, EventTarget::Datum);
    assert_eq!(hover_out.datum_index, hover_in.datum_index);
}

#[test]
fn test_mouse_out_without_history_is_never_empty() {
    let def = scatter_chart(&[(10.0, 10.0)], 8.0);
    let mut tester = HitTester::new(&def);

    // Fresh tester, MOUSEOUT with no recorded area: resolves to the
    // natively rendered element, never an empty result
    let native = ElementId::datum(SerieType::Scatter, 0, 0);
    let resolved = tester.detect(
        PointerEventKind::MouseOut,
        &native,
        Some(Point::new(350.0, 350.0)),
        &def,
    );
    assert_eq!(resolved, native);
}

#[test]
fn test_chart_boundary_is_outside_interior() {
    let def = scatter_chart(&[(0.5, 0.5)], 8.0);
    let mut tester = HitTester::new(&def);
    let root = ElementId::chart_root();

    // Cursor on the 1-unit boundary band does not engage datum circles
    let resolved = tester.detect(
        PointerEventKind::MouseMove,
        &root,
        Some(Point::new(0.5, 0.5)),
        &def,
    );
    assert!(resolved.is_chart_root());
}

#[test]
fn test_definition_swap_resets_state() {
    let def_a = scatter_chart(&[(10.0, 10.0)], 8.0);
    let def_b = scatter_chart(&[(100.0, 100.0)], 8.0);
    let mut tester = HitTester::new(&def_a);
    let root = ElementId::chart_root();

    tester.detect(
        PointerEventKind::MouseOver,
        &root,
        Some(Point::new(10.0, 10.0)),
        &def_a,
    );

    tester.update_chart_definition(&def_b);

    // Old circles are gone and so is the remembered hover; MOUSEOUT
    // falls back to the native element
    let resolved = tester.detect(
        PointerEventKind::MouseOut,
        &root,
        Some(Point::new(10.0, 10.0)),
        &def_b,
    );
    assert!(resolved.is_chart_root());

    let resolved = tester.detect(
        PointerEventKind::MouseMove,
        &root,
        Some(Point::new(100.0, 100.0)),
        &def_b,
    );
    assert_eq!(resolved, ElementId::point_sensitivity(0, 0));
}
