//! Brush and color primitives for decoration styling

use serde::{Deserialize, Serialize};

/// RGBA color, each channel 0.0..=1.0
pub type Color = [f32; 4];

pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Whether a color contributes no visible paint
pub fn is_transparent(color: &Color) -> bool {
    color[3] <= 0.0
}

/// Relative luminance of the color, ignoring alpha
pub fn relative_luminance(color: &Color) -> f32 {
    fn channel(c: f32) -> f32 {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(color[0]) + 0.7152 * channel(color[1]) + 0.0722 * channel(color[2])
}

/// Contrast ratio between two colors (>= 1.0)
pub fn contrast_ratio(a: &Color, b: &Color) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Pick whichever candidate contrasts most against `reference`
pub fn max_contrast<'a>(reference: &Color, candidates: &'a [Color]) -> &'a Color {
    debug_assert!(!candidates.is_empty());
    let mut best = &candidates[0];
    let mut best_ratio = contrast_ratio(reference, best);
    for candidate in &candidates[1..] {
        let ratio = contrast_ratio(reference, candidate);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }
    best
}

/// Fill and stroke styling for one rendered element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brush {
    pub fill: Color,
    pub fill_opacity: f32,
    pub stroke: Color,
    pub stroke_width: f64,
    pub stroke_opacity: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            fill: TRANSPARENT,
            fill_opacity: 1.0,
            stroke: BLACK,
            stroke_width: 1.0,
            stroke_opacity: 1.0,
        }
    }
}

impl Brush {
    pub fn stroke_only(stroke: Color, stroke_width: f64) -> Self {
        Self {
            fill: TRANSPARENT,
            fill_opacity: 0.0,
            stroke,
            stroke_width,
            stroke_opacity: 1.0,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_stroke_opacity(mut self, stroke_opacity: f32) -> Self {
        self.stroke_opacity = stroke_opacity;
        self
    }
}
