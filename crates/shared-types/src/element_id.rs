//! Logical element ids
//!
//! Every interactive element, rendered or virtual, is addressed by a stable
//! tokenized id: `TYPE` or `TYPE:idx1:idx2`, ':'-separated and
//! round-trippable. The type vocabulary is closed; render-only element
//! types the engine does not know about simply fail to parse, and callers
//! on permissive paths (event dispatch) treat that as "ignore".

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::chart_definition::SerieType;
use crate::errors::ChartError;

const SEPARATOR: char = ':';

/// Closed vocabulary of addressable element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    ChartRoot,
    Point,
    Bar,
    Candlestick,
    Boxplot,
    Bubble,
    Line,
    Area,
    PointSensitivity,
    CategorySensitivity,
    AnnotationText,
    LegendEntry,
}

impl ElementType {
    pub fn token(&self) -> &'static str {
        match self {
            ElementType::ChartRoot => "chart",
            ElementType::Point => "point",
            ElementType::Bar => "bar",
            ElementType::Candlestick => "candlestick",
            ElementType::Boxplot => "boxplot",
            ElementType::Bubble => "bubble",
            ElementType::Line => "line",
            ElementType::Area => "area",
            ElementType::PointSensitivity => "pointsensitivity",
            ElementType::CategorySensitivity => "categorysensitivity",
            ElementType::AnnotationText => "annotationtext",
            ElementType::LegendEntry => "legendentry",
        }
    }

    pub fn from_token(token: &str) -> Option<ElementType> {
        TOKEN_TABLE.get(token).copied()
    }

    /// Ids of this type address one datum (or its virtual hit region) and
    /// are only valid while DATUM focus is enabled
    pub fn is_datum_shaped(&self) -> bool {
        matches!(
            self,
            ElementType::Point
                | ElementType::Bar
                | ElementType::Candlestick
                | ElementType::Boxplot
                | ElementType::Bubble
                | ElementType::PointSensitivity
        )
    }

    pub fn is_category_shaped(&self) -> bool {
        matches!(self, ElementType::CategorySensitivity)
    }

    pub fn is_sensitivity(&self) -> bool {
        matches!(
            self,
            ElementType::PointSensitivity | ElementType::CategorySensitivity
        )
    }
}

static TOKEN_TABLE: Lazy<HashMap<&'static str, ElementType>> = Lazy::new(|| {
    ALL_TYPES.iter().map(|t| (t.token(), *t)).collect()
});

const ALL_TYPES: [ElementType; 12] = [
    ElementType::ChartRoot,
    ElementType::Point,
    ElementType::Bar,
    ElementType::Candlestick,
    ElementType::Boxplot,
    ElementType::Bubble,
    ElementType::Line,
    ElementType::Area,
    ElementType::PointSensitivity,
    ElementType::CategorySensitivity,
    ElementType::AnnotationText,
    ElementType::LegendEntry,
];

/// Fixed type-ordering table used when a natively rendered element and a
/// sensitivity area compete for the same event. Higher rank wins.
static PRECEDENCE: Lazy<HashMap<ElementType, u32>> = Lazy::new(|| {
    HashMap::from([
        (ElementType::AnnotationText, 70),
        (ElementType::Point, 60),
        (ElementType::Bar, 60),
        (ElementType::Candlestick, 60),
        (ElementType::Boxplot, 60),
        (ElementType::Bubble, 60),
        (ElementType::LegendEntry, 50),
        (ElementType::PointSensitivity, 40),
        (ElementType::CategorySensitivity, 30),
        (ElementType::Line, 20),
        (ElementType::Area, 20),
        (ElementType::ChartRoot, 0),
    ])
});

pub fn precedence(element_type: ElementType) -> u32 {
    PRECEDENCE[&element_type]
}

/// A parsed logical element id: type tag plus the indices that scope it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementId {
    pub element_type: ElementType,
    pub indices: Vec<usize>,
}

impl ElementId {
    pub fn new(element_type: ElementType, indices: Vec<usize>) -> Self {
        Self {
            element_type,
            indices,
        }
    }

    pub fn chart_root() -> Self {
        Self::new(ElementType::ChartRoot, Vec::new())
    }

    /// Id of the rendered shape for one datum of one serie
    pub fn datum(serie_type: SerieType, serie_index: usize, datum_index: usize) -> Self {
        let element_type = match serie_type {
            SerieType::Bars => ElementType::Bar,
            SerieType::Candlesticks => ElementType::Candlestick,
            SerieType::Boxplot => ElementType::Boxplot,
            SerieType::Bubbles => ElementType::Bubble,
            SerieType::Line
            | SerieType::Area
            | SerieType::Scatter
            | SerieType::SteppedArea => ElementType::Point,
        };
        Self::new(element_type, vec![serie_index, datum_index])
    }

    pub fn point_sensitivity(serie_index: usize, datum_index: usize) -> Self {
        Self::new(ElementType::PointSensitivity, vec![serie_index, datum_index])
    }

    pub fn category_sensitivity(category_index: usize) -> Self {
        Self::new(ElementType::CategorySensitivity, vec![category_index])
    }

    pub fn annotation_text(serie_index: usize, category_index: usize, label_index: usize) -> Self {
        Self::new(
            ElementType::AnnotationText,
            vec![serie_index, category_index, label_index],
        )
    }

    pub fn legend_entry(entry_index: usize) -> Self {
        Self::new(ElementType::LegendEntry, vec![entry_index])
    }

    pub fn is_chart_root(&self) -> bool {
        self.element_type == ElementType::ChartRoot
    }

    /// First index for datum- and serie-scoped ids
    pub fn serie_index(&self) -> Option<usize> {
        match self.element_type {
            ElementType::Point
            | ElementType::Bar
            | ElementType::Candlestick
            | ElementType::Boxplot
            | ElementType::Bubble
            | ElementType::PointSensitivity
            | ElementType::Line
            | ElementType::Area
            | ElementType::AnnotationText => self.indices.first().copied(),
            _ => None,
        }
    }

    pub fn datum_index(&self) -> Option<usize> {
        match self.element_type {
            ElementType::Point
            | ElementType::Bar
            | ElementType::Candlestick
            | ElementType::Boxplot
            | ElementType::Bubble
            | ElementType::PointSensitivity => self.indices.get(1).copied(),
            _ => None,
        }
    }

    pub fn category_index(&self) -> Option<usize> {
        match self.element_type {
            ElementType::CategorySensitivity => self.indices.first().copied(),
            ElementType::AnnotationText => self.indices.get(1).copied(),
            _ => None,
        }
    }

    /// Parse the wire format. Unknown type tokens and malformed indices
    /// are errors; permissive callers map them to "ignore".
    pub fn parse(raw: &str) -> crate::errors::Result<ElementId> {
        let mut parts = raw.split(SEPARATOR);
        let token = parts.next().unwrap_or("");
        let element_type = ElementType::from_token(token).ok_or(ChartError::InvalidElementId {
            token: token.to_string(),
        })?;
        let mut indices = Vec::new();
        for part in parts {
            let index = part
                .parse::<usize>()
                .map_err(|_| ChartError::MalformedElementId {
                    id: raw.to_string(),
                    message: format!("'{part}' is not an index"),
                })?;
            indices.push(index);
        }
        Ok(ElementId {
            element_type,
            indices,
        })
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_type.token())?;
        for index in &self.indices {
            write!(f, "{SEPARATOR}{index}")?;
        }
        Ok(())
    }
}
