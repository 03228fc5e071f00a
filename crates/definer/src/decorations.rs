//! Decoration geometry
//!
//! Builders for the glow, ring, and crosshair primitives the definers
//! attach to the interactivity layer. Geometry here must be reproducible:
//! glow levels stack outward by cumulative stroke width, rings keep a
//! fixed gap off the element edge, and serie-level decorations follow the
//! serie's own stroke path offset perpendicular to it.
//!
//! Every builder matches exhaustively over `SerieType`. A boxplot datum
//! reaching glow/ring construction is a programmer error: the upstream
//! chart-definition builder never pairs boxplot series with datum-level
//! decoration.

use interactive_charts_shared::{
    brush, Brush, ChartDefinition, Color, Crosshair, CrosshairOrientation, Datum,
    DecorationShape, Glow, GlowLevel, LineSegment, Point, Ring, ScaledShape, Serie, SerieType,
};

/// Stroke width of each glow level, innermost first
pub const GLOW_LEVEL_WIDTHS: [f64; 3] = [2.0, 2.0, 2.0];
/// Stroke opacity of each glow level, innermost first
pub const GLOW_LEVEL_OPACITIES: [f32; 3] = [0.4, 0.25, 0.1];
/// Gap between an element's edge and its selection ring
pub const RING_GAP: f64 = 1.0;
pub const RING_STROKE_WIDTH: f64 = 1.0;
pub const CROSSHAIR_STROKE_WIDTH: f64 = 1.0;

/// Effective brush of one datum's rendered shape
fn datum_brush(serie: &Serie, datum: &Datum) -> Brush {
    datum.brush.unwrap_or(serie.point_brush)
}

/// Glow halo for a single datum. `ring` is the selection ring already in
/// the layer for this datum, if any: glow circles start at its outer edge
/// so the two decorations nest instead of overlapping.
pub fn datum_glow(serie: &Serie, datum: &Datum, ring: Option<&Ring>) -> Option<Glow> {
    let shape = datum.scaled.as_ref()?;
    let color = datum_brush(serie, datum).fill;

    match serie.serie_type {
        SerieType::Bars | SerieType::Candlesticks => {
            let rect = match shape {
                ScaledShape::Bar { rect } => *rect,
                ScaledShape::Candlestick { body, .. } => *body,
                ScaledShape::Point { .. } => {
                    log::warn!("Bar-family datum carries point geometry; skipping glow");
                    return None;
                }
            };
            let mut levels = Vec::with_capacity(GLOW_LEVEL_WIDTHS.len());
            let mut cumulative = 0.0;
            for (width, opacity) in GLOW_LEVEL_WIDTHS.iter().zip(GLOW_LEVEL_OPACITIES) {
                levels.push(GlowLevel {
                    shape: DecorationShape::Rectangle {
                        rect: rect.grow(cumulative + width / 2.0),
                    },
                    brush: glow_brush(color, *width, opacity),
                });
                cumulative += width;
            }
            Some(Glow { levels })
        }
        SerieType::Line
        | SerieType::Area
        | SerieType::Scatter
        | SerieType::Bubbles
        | SerieType::SteppedArea => {
            let center = match shape {
                ScaledShape::Point { center, .. } => *center,
                _ => {
                    log::warn!("Path-family datum carries box geometry; skipping glow");
                    return None;
                }
            };
            // Start at the ring's outer edge when the datum is already
            // ringed, else at the point's own visible edge
            let start = match ring {
                Some(Ring {
                    shape: DecorationShape::Circle { radius, .. },
                    brush,
                }) => radius + brush.stroke_width / 2.0,
                _ => serie.visible_point_radius(datum),
            };
            let mut levels = Vec::with_capacity(GLOW_LEVEL_WIDTHS.len());
            let mut cumulative = 0.0;
            for (width, opacity) in GLOW_LEVEL_WIDTHS.iter().zip(GLOW_LEVEL_OPACITIES) {
                levels.push(GlowLevel {
                    shape: DecorationShape::Circle {
                        center,
                        radius: start + cumulative + width / 2.0,
                    },
                    brush: glow_brush(color, *width, opacity),
                });
                cumulative += width;
            }
            Some(Glow { levels })
        }
        SerieType::Boxplot => {
            panic!("glow construction is not supported for boxplot series")
        }
    }
}

/// Selection ring for a single datum. Returns `None` when the element is
/// too small to hold a ring (size-based suppression) or lacks geometry.
pub fn datum_ring(serie: &Serie, datum: &Datum, background: &Brush) -> Option<Ring> {
    let shape = datum.scaled.as_ref()?;

    match serie.serie_type {
        SerieType::Bars | SerieType::Candlesticks => {
            let rect = match shape {
                ScaledShape::Bar { rect } => *rect,
                ScaledShape::Candlestick { body, .. } => *body,
                ScaledShape::Point { .. } => {
                    log::warn!("Bar-family datum carries point geometry; skipping ring");
                    return None;
                }
            };
            let bar_stroke = datum_brush(serie, datum).stroke_width;
            let inset = bar_stroke / 2.0 + RING_GAP + RING_STROKE_WIDTH / 2.0;
            let ring_rect = rect.inset(inset);
            if ring_rect.is_empty() {
                return None;
            }

            let ring_brush = if serie.serie_type == SerieType::Candlesticks {
                // Candle bodies flip color; pick whichever of point fill
                // and background stands out most against the body
                let body_fill = datum_brush(serie, datum).fill;
                let candidates = [serie.point_brush.fill, background.fill];
                let color = *brush::max_contrast(&body_fill, &candidates);
                Brush::stroke_only(color, RING_STROKE_WIDTH)
            } else {
                // A background-colored ring; when the chart background is
                // transparent it is rendered at zero opacity so the region
                // stays hit-testable but invisible
                let opacity = if brush::is_transparent(&background.fill) {
                    0.0
                } else {
                    1.0
                };
                Brush::stroke_only(background.fill, RING_STROKE_WIDTH)
                    .with_stroke_opacity(opacity)
            };

            Some(Ring {
                shape: DecorationShape::Rectangle { rect: ring_rect },
                brush: ring_brush,
            })
        }
        SerieType::Line
        | SerieType::Area
        | SerieType::Scatter
        | SerieType::Bubbles
        | SerieType::SteppedArea => {
            let center = match shape {
                ScaledShape::Point { center, .. } => *center,
                _ => {
                    log::warn!("Path-family datum carries box geometry; skipping ring");
                    return None;
                }
            };
            let radius = serie.visible_point_radius(datum) + RING_GAP + RING_STROKE_WIDTH / 2.0;
            Some(Ring {
                shape: DecorationShape::Circle { center, radius },
                brush: Brush::stroke_only(background.fill, RING_STROKE_WIDTH),
            })
        }
        SerieType::Boxplot => {
            panic!("ring construction is not supported for boxplot series")
        }
    }
}

/// Crosshair through a datum: full-chart-area segments, path-family only
pub fn crosshair(
    definition: &ChartDefinition,
    serie: &Serie,
    anchor: Point,
) -> Option<Crosshair> {
    if !serie.serie_type.is_path_family() {
        return None;
    }
    let area = definition.chart_area;
    let orientation = definition.crosshair.orientation;
    let mut segments = Vec::with_capacity(2);
    if matches!(
        orientation,
        CrosshairOrientation::Vertical | CrosshairOrientation::Both
    ) {
        segments.push(LineSegment::new(
            Point::new(anchor.x, area.top),
            Point::new(anchor.x, area.bottom()),
        ));
    }
    if matches!(
        orientation,
        CrosshairOrientation::Horizontal | CrosshairOrientation::Both
    ) {
        segments.push(LineSegment::new(
            Point::new(area.left, anchor.y),
            Point::new(area.right(), anchor.y),
        ));
    }
    Some(Crosshair {
        segments,
        brush: Brush::stroke_only(serie.point_brush.fill, CROSSHAIR_STROKE_WIDTH),
    })
}

/// Serie-level glow: the serie's stroke path offset outward once per glow
/// level, collapsed to a single uniform brush per level
pub fn serie_glow(serie: &Serie) -> Option<Glow> {
    let path = serie.decoration_path();
    if path.len() < 2 {
        return None;
    }
    let color = serie.line_brush.stroke;
    let base = serie.line_brush.stroke_width / 2.0;
    let mut levels = Vec::with_capacity(GLOW_LEVEL_WIDTHS.len());
    let mut cumulative = 0.0;
    for (width, opacity) in GLOW_LEVEL_WIDTHS.iter().zip(GLOW_LEVEL_OPACITIES) {
        let offset = base + cumulative + width / 2.0;
        levels.push(GlowLevel {
            shape: DecorationShape::Path {
                points: offset_polyline(path, offset),
            },
            brush: glow_brush(color, *width, opacity),
        });
        cumulative += width;
    }
    Some(Glow { levels })
}

/// Serie-level ring: the stroke path offset to the interior
pub fn serie_ring(serie: &Serie, background: &Brush) -> Option<Ring> {
    let path = serie.decoration_path();
    if path.len() < 2 {
        return None;
    }
    let offset = -(serie.line_brush.stroke_width / 2.0 + RING_GAP + RING_STROKE_WIDTH / 2.0);
    Some(Ring {
        shape: DecorationShape::Path {
            points: offset_polyline(path, offset),
        },
        brush: Brush::stroke_only(background.fill, RING_STROKE_WIDTH),
    })
}

fn glow_brush(color: Color, width: f64, opacity: f32) -> Brush {
    Brush::stroke_only(color, width).with_stroke_opacity(opacity)
}

/// Offset a polyline perpendicular to itself. Positive offsets displace
/// along the left-hand normal (upward for a left-to-right path); joints
/// use the averaged normal of the adjacent segments.
pub fn offset_polyline(points: &[Point], offset: f64) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut normals: Vec<(f64, f64)> = Vec::with_capacity(points.len() - 1);
    for pair in points.windows(2) {
        let dx = pair[1].x - pair[0].x;
        let dy = pair[1].y - pair[0].y;
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            normals.push((0.0, 0.0));
        } else {
            normals.push((dy / len, -dx / len));
        }
    }

    let mut out = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        let (nx, ny) = if i == 0 {
            normals[0]
        } else if i == points.len() - 1 {
            normals[i - 1]
        } else {
            let a = normals[i - 1];
            let b = normals[i];
            let mx = a.0 + b.0;
            let my = a.1 + b.1;
            let len = (mx * mx + my * my).sqrt();
            if len == 0.0 {
                a
            } else {
                (mx / len, my / len)
            }
        };
        out.push(Point::new(
            points[i].x + nx * offset,
            points[i].y + ny * offset,
        ));
    }
    out
}
