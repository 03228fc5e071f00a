//! Chart definition types
//!
//! The chart definition is the immutable, post-layout description of a
//! chart handed to the interactivity engine on every redraw. It carries
//! scaled screen geometry only; nothing here re-derives layout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::brush::Brush;
use crate::errors::ValidationResult;
use crate::geometry::{Point, Rect};

/// Serie types supported by the engine (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SerieType {
    Bars,
    Line,
    Area,
    Scatter,
    Bubbles,
    Candlesticks,
    Boxplot,
    SteppedArea,
}

impl SerieType {
    /// Series rendered as axis-aligned boxes per datum
    pub fn is_bar_family(&self) -> bool {
        matches!(
            self,
            SerieType::Bars | SerieType::Candlesticks | SerieType::Boxplot
        )
    }

    /// Series rendered as a path with discrete, individually hoverable
    /// points
    pub fn is_path_family(&self) -> bool {
        matches!(
            self,
            SerieType::Line
                | SerieType::Area
                | SerieType::Scatter
                | SerieType::Bubbles
                | SerieType::SteppedArea
        )
    }
}

/// Post-layout screen geometry of one datum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaledShape {
    Point { center: Point, radius: f64 },
    Bar { rect: Rect },
    Candlestick { body: Rect, wick_top: f64, wick_bottom: f64 },
}

impl ScaledShape {
    /// Representative anchor position for tooltips and crosshairs
    pub fn anchor(&self) -> Point {
        match self {
            ScaledShape::Point { center, .. } => *center,
            ScaledShape::Bar { rect } => rect.center(),
            ScaledShape::Candlestick { body, .. } => body.center(),
        }
    }
}

/// One annotation bundle attached to a datum or category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationBundle {
    pub labels: Vec<String>,
    pub interactive: bool,
}

/// One data point within one serie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Datum {
    /// Scaled screen geometry; `None` marks a null datum
    pub scaled: Option<ScaledShape>,
    /// Source value, used for the color-bar marker
    pub value: Option<f64>,
    pub brush: Option<Brush>,
    pub radius: Option<f64>,
    pub annotation: Option<AnnotationBundle>,
    pub visible: Option<bool>,
}

impl Datum {
    pub fn is_null(&self) -> bool {
        self.scaled.is_none()
    }
}

/// Indices of the first and last datum inside the current view window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewWindow {
    pub first: usize,
    pub last: usize,
}

/// One rendered data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Serie {
    pub serie_type: SerieType,
    pub datums: Vec<Datum>,
    pub line_brush: Brush,
    pub point_brush: Brush,
    pub point_radius: f64,
    /// Stroke path of the serie in screen coordinates
    pub path: Vec<Point>,
    /// Top line of a stacked area, when stacking applies
    pub top_path: Option<Vec<Point>>,
    pub enable_interactivity: bool,
    pub points_visible: bool,
    /// Whether this serie's columns carry "old data" (diff mode)
    pub has_old_data: bool,
    pub view_window: Option<ViewWindow>,
}

impl Serie {
    pub fn new(serie_type: SerieType) -> Self {
        Self {
            serie_type,
            datums: Vec::new(),
            line_brush: Brush::default(),
            point_brush: Brush::default(),
            point_radius: 3.0,
            path: Vec::new(),
            top_path: None,
            enable_interactivity: true,
            points_visible: true,
            has_old_data: false,
            view_window: None,
        }
    }

    /// Effective rendered radius of one datum's point
    pub fn visible_point_radius(&self, datum: &Datum) -> f64 {
        datum.radius.unwrap_or(self.point_radius)
    }

    /// Whether the datum's point is currently painted
    pub fn is_point_visible(&self, datum: &Datum) -> bool {
        datum.visible.unwrap_or(self.points_visible) && !datum.is_null()
    }

    /// The path serie-level decorations follow: the stacked-area top line
    /// when present, else the plain stroke path
    pub fn decoration_path(&self) -> &[Point] {
        match &self.top_path {
            Some(top) => top,
            None => &self.path,
        }
    }
}

/// One category (domain value) of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub label: String,
    /// Precomputed category sensitivity box
    pub area: Option<Rect>,
    pub annotation: Option<AnnotationBundle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub label: String,
    pub serie_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendDescription {
    pub entries: Vec<LegendEntry>,
    /// Labeled-legend mode (dive model interacts with entries directly)
    pub labeled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBarDescription {
    pub min_value: f64,
    pub max_value: f64,
}

/// Roles a data-table column can map to (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Data,
    Annotation,
    AnnotationText,
    Domain,
    Tooltip,
    Style,
    Uncertainty,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub role: ColumnRole,
    pub serie_index: Option<usize>,
}

/// Which logical targets pointer focus can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTarget {
    pub datum: bool,
    pub category: bool,
}

impl FocusTarget {
    pub const DATUM: FocusTarget = FocusTarget {
        datum: true,
        category: false,
    };
    pub const CATEGORY: FocusTarget = FocusTarget {
        datum: false,
        category: true,
    };
    pub const BOTH: FocusTarget = FocusTarget {
        datum: true,
        category: true,
    };
}

impl Default for FocusTarget {
    fn default() -> Self {
        FocusTarget::DATUM
    }
}

/// Interaction model the definer dispatches on (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractivityModel {
    #[default]
    Default,
    Dive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregationTarget {
    #[default]
    None,
    Category,
    Series,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StackingType {
    #[default]
    None,
    Absolute,
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairTrigger {
    #[default]
    None,
    Focus,
    Selection,
    Both,
}

impl CrosshairTrigger {
    pub fn on_focus(&self) -> bool {
        matches!(self, CrosshairTrigger::Focus | CrosshairTrigger::Both)
    }

    pub fn on_selection(&self) -> bool {
        matches!(self, CrosshairTrigger::Selection | CrosshairTrigger::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairOrientation {
    Vertical,
    Horizontal,
    #[default]
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairConfig {
    pub trigger: CrosshairTrigger,
    pub orientation: CrosshairOrientation,
}

/// What user action produces tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    None,
    Focus,
    Selection,
    Both,
}

impl Default for TooltipTrigger {
    fn default() -> Self {
        TooltipTrigger::Both
    }
}

impl TooltipTrigger {
    pub fn on_focus(&self) -> bool {
        matches!(self, TooltipTrigger::Focus | TooltipTrigger::Both)
    }

    pub fn on_selection(&self) -> bool {
        matches!(self, TooltipTrigger::Selection | TooltipTrigger::Both)
    }
}

/// Immutable post-layout description of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefinition {
    pub series: Vec<Serie>,
    pub categories: Vec<Category>,
    pub legend: Option<LegendDescription>,
    pub color_bar: Option<ColorBarDescription>,
    pub chart_area: Rect,
    pub background: Brush,
    pub interactivity_model: InteractivityModel,
    pub focus_target: FocusTarget,
    pub aggregation_target: AggregationTarget,
    pub stacking_type: StackingType,
    pub crosshair: CrosshairConfig,
    pub tooltip_trigger: TooltipTrigger,
    pub is_diff: bool,
    /// Actions-menu entries configured by the host; non-empty means the
    /// chart has an actions menu
    pub actions: Vec<String>,
    /// Data-table column -> role/serie mapping
    pub columns: Vec<ColumnSpec>,
    /// Data-table column index -> serie index
    pub column_series: HashMap<usize, usize>,
    /// Data-table row index -> category index
    pub row_categories: HashMap<usize, usize>,
}

impl ChartDefinition {
    pub fn new(chart_area: Rect) -> Self {
        Self {
            series: Vec::new(),
            categories: Vec::new(),
            legend: None,
            color_bar: None,
            chart_area,
            background: Brush::default(),
            interactivity_model: InteractivityModel::Default,
            focus_target: FocusTarget::default(),
            aggregation_target: AggregationTarget::None,
            stacking_type: StackingType::None,
            crosshair: CrosshairConfig::default(),
            tooltip_trigger: TooltipTrigger::default(),
            is_diff: false,
            actions: Vec::new(),
            columns: Vec::new(),
            column_series: HashMap::new(),
            row_categories: HashMap::new(),
        }
    }

    /// The hit-test interior: the chart area inset by one unit on each
    /// edge, matching native boundary-exit behavior
    pub fn interior(&self) -> Rect {
        self.chart_area.inset(1.0)
    }

    /// A bubble chart is the one chart family where a data-table row is a
    /// single datum rather than a category
    pub fn is_bubble_chart(&self) -> bool {
        self.series
            .first()
            .map(|s| s.serie_type == SerieType::Bubbles)
            .unwrap_or(false)
    }

    pub fn column_role(&self, column: usize) -> Option<ColumnRole> {
        self.columns.get(column).map(|spec| spec.role)
    }

    pub fn serie_for_column(&self, column: usize) -> Option<usize> {
        self.column_series.get(&column).copied().or_else(|| {
            self.columns.get(column).and_then(|spec| spec.serie_index)
        })
    }

    pub fn category_for_row(&self, row: usize) -> Option<usize> {
        self.row_categories.get(&row).copied()
    }

    pub fn stacked(&self) -> bool {
        self.stacking_type != StackingType::None
    }

    /// Validate the internal consistency the interactivity engine relies
    /// on: indices in range, non-null datums carrying geometry
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.chart_area.is_empty() {
            errors.push("Chart area is empty".to_string());
        }

        for (column, serie_index) in &self.column_series {
            if *serie_index >= self.series.len() {
                errors.push(format!(
                    "Column {} maps to serie {} (have {})",
                    column,
                    serie_index,
                    self.series.len()
                ));
            }
        }

        for (row, category_index) in &self.row_categories {
            if *category_index >= self.categories.len() {
                errors.push(format!(
                    "Row {} maps to category {} (have {})",
                    row,
                    category_index,
                    self.categories.len()
                ));
            }
        }

        if let Some(legend) = &self.legend {
            for (i, entry) in legend.entries.iter().enumerate() {
                if entry.serie_index >= self.series.len() {
                    errors.push(format!(
                        "Legend entry {} references serie {} (have {})",
                        i,
                        entry.serie_index,
                        self.series.len()
                    ));
                }
            }
        }

        for (i, serie) in self.series.iter().enumerate() {
            if serie.serie_type.is_path_family() && serie.path.is_empty() {
                let has_points = serie.datums.iter().any(|d| !d.is_null());
                if has_points {
                    warnings.push(format!("Serie {i} has points but no stroke path"));
                }
            }
        }

        ValidationResult::from_lists(errors, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_predicates() {
        assert!(SerieType::Bars.is_bar_family());
        assert!(SerieType::Candlesticks.is_bar_family());
        assert!(!SerieType::Line.is_bar_family());
        assert!(SerieType::Scatter.is_path_family());
        assert!(SerieType::SteppedArea.is_path_family());
        assert!(!SerieType::Boxplot.is_path_family());
    }

    #[test]
    fn test_interior_inset() {
        let def = ChartDefinition::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let interior = def.interior();
        assert_eq!(interior.left, 1.0);
        assert_eq!(interior.width, 98.0);
    }

    #[test]
    fn test_validate_flags_bad_indices() {
        let mut def = ChartDefinition::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        def.series.push(Serie::new(SerieType::Line));
        def.column_series.insert(1, 4);
        def.row_categories.insert(0, 9);
        let result = def.validate();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_visible_point_radius_override() {
        let serie = Serie::new(SerieType::Scatter);
        let datum = Datum {
            radius: Some(7.5),
            ..Datum::default()
        };
        assert_eq!(serie.visible_point_radius(&datum), 7.5);
        assert_eq!(serie.visible_point_radius(&Datum::default()), 3.0);
    }

    #[test]
    fn test_decoration_path_prefers_top_path() {
        let mut serie = Serie::new(SerieType::Area);
        serie.path = vec![Point::new(0.0, 0.0)];
        assert_eq!(serie.decoration_path().len(), 1);
        serie.top_path = Some(vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0)]);
        assert_eq!(serie.decoration_path().len(), 2);
    }
}
