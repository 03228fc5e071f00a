//! Sensitivity index
//!
//! Precomputed spatial lookup of invisible hit regions. Point circles are
//! registered only for path-family series, whose discrete points lack
//! adequate native hit geometry; bar-family shapes hit-test natively and
//! contribute nothing. Read-only after construction; a changed chart
//! definition rebuilds the index wholesale.

use interactive_charts_shared::{ChartDefinition, ElementId, Point, Rect, ScaledShape};

/// Invisible circular hit region around one rendered point
#[derive(Debug, Clone)]
pub struct SensitivityArea {
    pub id: ElementId,
    pub center: Point,
    pub radius: f64,
    pub serie_index: usize,
    pub datum_index: usize,
}

/// Invisible box hit region covering one category
#[derive(Debug, Clone)]
pub struct CategoryArea {
    pub id: ElementId,
    pub rect: Rect,
    pub category_index: usize,
}

#[derive(Debug, Default)]
pub struct SensitivityIndex {
    circles: Vec<SensitivityArea>,
    category_boxes: Vec<CategoryArea>,
}

impl SensitivityIndex {
    pub fn build(definition: &ChartDefinition) -> Self {
        let mut index = SensitivityIndex::default();
        index.populate(definition);
        index
    }

    /// Full rebuild from a new chart definition; no incremental updates
    pub fn update_chart_definition(&mut self, definition: &ChartDefinition) {
        self.circles.clear();
        self.category_boxes.clear();
        self.populate(definition);
    }

    fn populate(&mut self, definition: &ChartDefinition) {
        for (serie_index, serie) in definition.series.iter().enumerate() {
            if !serie.enable_interactivity || !serie.serie_type.is_path_family() {
                continue;
            }
            for (datum_index, datum) in serie.datums.iter().enumerate() {
                let Some(ScaledShape::Point { center, .. }) = datum.scaled else {
                    continue;
                };
                // Hover must engage at the visible edge of the point,
                // stroke included
                let radius =
                    serie.visible_point_radius(datum) + serie.point_brush.stroke_width / 2.0;
                self.circles.push(SensitivityArea {
                    id: ElementId::point_sensitivity(serie_index, datum_index),
                    center,
                    radius,
                    serie_index,
                    datum_index,
                });
            }
        }

        for (category_index, category) in definition.categories.iter().enumerate() {
            if let Some(rect) = category.area {
                self.category_boxes.push(CategoryArea {
                    id: ElementId::category_sensitivity(category_index),
                    rect,
                    category_index,
                });
            }
        }

        log::debug!(
            "Sensitivity index built: {} circles, {} category boxes",
            self.circles.len(),
            self.category_boxes.len()
        );
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.category_boxes.is_empty()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    /// Nearest circle containing the cursor. A cheap bounding-square test
    /// rejects most candidates before the exact squared-distance check.
    /// Ties keep the first-registered circle: only a strictly smaller
    /// distance replaces the current best.
    pub fn nearest_circle(&self, cursor: &Point) -> Option<&SensitivityArea> {
        let mut best: Option<(&SensitivityArea, f64)> = None;
        for area in &self.circles {
            if (cursor.x - area.center.x).abs() > area.radius
                || (cursor.y - area.center.y).abs() > area.radius
            {
                continue;
            }
            let distance_sq = cursor.distance_sq(&area.center);
            if distance_sq > area.radius * area.radius {
                continue;
            }
            match best {
                Some((_, best_sq)) if distance_sq >= best_sq => {}
                _ => best = Some((area, distance_sq)),
            }
        }
        best.map(|(area, _)| area)
    }

    /// First category box containing the cursor, registration order
    pub fn category_at(&self, cursor: &Point) -> Option<&CategoryArea> {
        self.category_boxes.iter().find(|area| area.rect.contains(cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interactive_charts_shared::{Category, Datum, Rect, Serie, SerieType};

    fn scatter_definition(points: &[(f64, f64)], radius: f64) -> ChartDefinition {
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
    fn test_build_skips_null_and_disabled() {
        let mut def = scatter_definition(&[(10.0, 10.0)], 4.0);
        def.series[0].datums.push(Datum::default()); // null datum
        let mut disabled = Serie::new(SerieType::Scatter);
        disabled.enable_interactivity = false;
        disabled.datums.push(Datum {
            scaled: Some(ScaledShape::Point {
                center: Point::new(50.0, 50.0),
                radius: 4.0,
            }),
            ..Datum::default()
        });
        def.series.push(disabled);

        let index = SensitivityIndex::build(&def);
        assert_eq!(index.circle_count(), 1);
    }

    #[test]
    fn test_bar_family_contributes_nothing() {
        let mut def = ChartDefinition::new(Rect::new(0.0, 0.0, 400.0, 400.0));
        let mut serie = Serie::new(SerieType::Bars);
        serie.datums.push(Datum {
            scaled: Some(ScaledShape::Bar {
                rect: Rect::new(10.0, 10.0, 20.0, 100.0),
            }),
            ..Datum::default()
        });
        def.series.push(serie);

        assert!(SensitivityIndex::build(&def).is_empty());
    }

    #[test]
    fn test_radius_includes_half_stroke() {
        let mut def = scatter_definition(&[(10.0, 10.0)], 4.0);
        def.series[0].point_brush.stroke_width = 2.0;
        let index = SensitivityIndex::build(&def);

        // 4.0 visible + 1.0 half stroke
        assert!(index.nearest_circle(&Point::new(15.0, 10.0)).is_some());
        assert!(index.nearest_circle(&Point::new(15.1, 10.0)).is_none());
    }

    #[test]
    fn test_nearest_circle_picks_minimum_distance() {
        let def = scatter_definition(&[(10.0, 10.0), (50.0, 50.0), (90.0, 10.0)], 8.0);
        let index = SensitivityIndex::build(&def);

        let hit = index.nearest_circle(&Point::new(51.0, 51.0)).unwrap();
        assert_eq!((hit.serie_index, hit.datum_index), (0, 1));

        assert!(index.nearest_circle(&Point::new(200.0, 200.0)).is_none());
    }

    #[test]
    fn test_tie_keeps_first_registered() {
        // Two circles overlap; the midpoint is equidistant
        let def = scatter_definition(&[(10.0, 10.0), (20.0, 10.0)], 8.0);
        let index = SensitivityIndex::build(&def);

        let hit = index.nearest_circle(&Point::new(15.0, 10.0)).unwrap();
        assert_eq!(hit.datum_index, 0);
    }

    #[test]
    fn test_category_boxes() {
        let mut def = ChartDefinition::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        def.categories = vec![
            Category {
                label: "a".to_string(),
                area: Some(Rect::new(0.0, 0.0, 100.0, 200.0)),
                ..Category::default()
            },
            Category {
                label: "b".to_string(),
                area: Some(Rect::new(100.0, 0.0, 100.0, 200.0)),
                ..Category::default()
            },
            Category {
                label: "offscreen".to_string(),
                ..Category::default()
            },
        ];
        let index = SensitivityIndex::build(&def);

        assert_eq!(
            index.category_at(&Point::new(150.0, 10.0)).unwrap().category_index,
            1
        );
        assert!(index.category_at(&Point::new(250.0, 10.0)).is_none());
    }

    #[test]
    fn test_rebuild_replaces_everything() {
        let def_a = scatter_definition(&[(10.0, 10.0), (20.0, 20.0)], 4.0);
        let def_b = scatter_definition(&[(99.0, 99.0)], 4.0);
        let mut index = SensitivityIndex::build(&def_a);
        assert_eq!(index.circle_count(), 2);

        index.update_chart_definition(&def_b);
        assert_eq!(index.circle_count(), 1);
        assert!(index.nearest_circle(&Point::new(10.0, 10.0)).is_none());
    }
}
