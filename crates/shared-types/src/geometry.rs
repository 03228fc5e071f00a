//! Chart-local geometry primitives shared across the interactivity crates

use serde::{Deserialize, Serialize};

/// A position in chart-local coordinates (pixels from the chart's top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// An axis-aligned rectangle in chart-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }

    /// Shrink the rectangle by `d` on every edge. Width/height may go
    /// negative; `is_empty` reports such degenerate results.
    pub fn inset(&self, d: f64) -> Rect {
        Rect {
            left: self.left + d,
            top: self.top + d,
            width: self.width - 2.0 * d,
            height: self.height - 2.0 * d,
        }
    }

    /// Grow the rectangle uniformly by `d` on every edge
    pub fn grow(&self, d: f64) -> Rect {
        self.inset(-d)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A straight segment, used for crosshair output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_sq(&b), 25.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(&Point::new(10.0, 10.0)));
        assert!(rect.contains(&Point::new(109.0, 59.0)));
        assert!(!rect.contains(&Point::new(110.0, 30.0)));
        assert!(!rect.contains(&Point::new(9.9, 30.0)));
    }

    #[test]
    fn test_inset_and_grow() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.inset(1.0);
        assert_eq!(inner.left, 1.0);
        assert_eq!(inner.width, 8.0);
        assert!(!inner.is_empty());

        // Insetting past the midpoint collapses the rect
        assert!(rect.inset(6.0).is_empty());

        let outer = rect.grow(2.0);
        assert_eq!(outer.left, -2.0);
        assert_eq!(outer.width, 14.0);
    }
}
