//! Chart state
//!
//! The mutable record of what the user currently points at, hovers, or has
//! selected. Owned by the host, read-only to the engine. Change detection
//! lives here so the host can decide when a recomputation is worth it; the
//! definer's ignore-cursor hint plugs into `differs_from`.

use serde::{Deserialize, Serialize};

use crate::chart_definition::ChartDefinition;
use crate::errors::ValidationResult;
use crate::geometry::{Point, Rect};

/// One selected unit of the data table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SelectionEntry {
    Cell { row: usize, column: usize },
    Row { row: usize },
    Column { column: usize },
}

/// Insertion-ordered selection; the last-selected entry anchors aggregate
/// tooltips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Selection {
    pub entries: Vec<SelectionEntry>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: SelectionEntry) {
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            SelectionEntry::Cell { row, column } => Some((*row, *column)),
            _ => None,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            SelectionEntry::Row { row } => Some(*row),
            _ => None,
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            SelectionEntry::Column { column } => Some(*column),
            _ => None,
        })
    }
}

/// Current pointer focus. `datum` set implies `serie` set; the definer
/// asserts that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Focus {
    pub serie: Option<usize>,
    pub datum: Option<usize>,
    pub category: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub position: Option<Point>,
    pub position_at_last_click: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegendState {
    pub focused_entry: Option<usize>,
}

/// Reference to one annotation label. Bundle-level operations (expansion)
/// ignore `label_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRef {
    pub serie_index: Option<usize>,
    pub category_index: usize,
    pub label_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationsState {
    pub expanded: Option<AnnotationRef>,
    pub focused: Option<AnnotationRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionsMenuState {
    pub focused_entry: Option<usize>,
}

/// The full interaction state of one chart instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartState {
    pub selected: Selection,
    pub focused: Focus,
    pub cursor: Cursor,
    pub legend: LegendState,
    pub annotations: AnnotationsState,
    pub actions_menu: ActionsMenuState,
    pub overlay_box: Option<Rect>,
}

/// Detailed change detection result
#[derive(Debug, Clone, PartialEq)]
pub struct StateChangeDetection {
    pub has_changes: bool,
    pub selection_changed: bool,
    pub focus_changed: bool,
    pub cursor_changed: bool,
    pub legend_changed: bool,
    pub annotations_changed: bool,
    pub requires_redefine: bool,
    pub change_summary: Vec<String>,
}

/// Change detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDetectionConfig {
    /// Skip cursor-position-only changes; the definer flips its
    /// ignore-cursor hint off when a tooltip must track the pointer
    pub ignore_cursor: bool,
}

impl Default for ChangeDetectionConfig {
    fn default() -> Self {
        Self { ignore_cursor: true }
    }
}

impl ChartState {
    /// The equality comparator the host combines with the definer's
    /// ignore-cursor hint: does this state differ from `previous` in a way
    /// that needs a fresh interactivity layer?
    pub fn differs_from(&self, previous: &ChartState, ignore_cursor: bool) -> bool {
        if !ignore_cursor && self.cursor != previous.cursor {
            return true;
        }
        self.selected != previous.selected
            || self.focused != previous.focused
            || self.legend != previous.legend
            || self.annotations != previous.annotations
            || self.actions_menu != previous.actions_menu
            || self.overlay_box != previous.overlay_box
    }

    /// Validate this state against the definition it will be paired with:
    /// every referenced index must be in range, and a focused datum
    /// requires a focused serie
    pub fn validate_against(&self, definition: &ChartDefinition) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.focused.datum.is_some() && self.focused.serie.is_none() {
            errors.push("Focused datum without a focused serie".to_string());
        }
        if let Some(serie) = self.focused.serie {
            if serie >= definition.series.len() {
                errors.push(format!(
                    "Focused serie {} out of range (have {})",
                    serie,
                    definition.series.len()
                ));
            } else if let Some(datum) = self.focused.datum {
                if datum >= definition.series[serie].datums.len() {
                    errors.push(format!(
                        "Focused datum {} out of range in serie {}",
                        datum, serie
                    ));
                }
            }
        }
        if let Some(category) = self.focused.category {
            if category >= definition.categories.len() {
                errors.push(format!(
                    "Focused category {} out of range (have {})",
                    category,
                    definition.categories.len()
                ));
            }
        }

        for entry in &self.selected.entries {
            match *entry {
                SelectionEntry::Cell { row, column } => {
                    if definition.category_for_row(row).is_none() {
                        warnings.push(format!("Selected row {row} has no category mapping"));
                    }
                    if definition.column_role(column).is_none() {
                        warnings.push(format!("Selected column {column} has no role mapping"));
                    }
                }
                SelectionEntry::Row { row } => {
                    if !definition.is_bubble_chart() && definition.category_for_row(row).is_none()
                    {
                        warnings.push(format!("Selected row {row} has no category mapping"));
                    }
                }
                SelectionEntry::Column { column } => {
                    if definition.serie_for_column(column).is_none() {
                        warnings.push(format!("Selected column {column} has no serie mapping"));
                    }
                }
            }
        }

        if let (Some(legend), Some(entry)) = (&definition.legend, self.legend.focused_entry) {
            if entry >= legend.entries.len() {
                errors.push(format!("Focused legend entry {entry} out of range"));
            }
        }

        ValidationResult::from_lists(errors, warnings)
    }

    /// Advanced change detection with a per-field breakdown
    pub fn detect_changes_from(
        &self,
        previous: &ChartState,
        config: &ChangeDetectionConfig,
    ) -> StateChangeDetection {
        let mut change_summary = Vec::new();

        let selection_changed = self.selected != previous.selected;
        if selection_changed {
            change_summary.push(format!(
                "Selection changed: {} -> {} entries",
                previous.selected.entries.len(),
                self.selected.entries.len()
            ));
        }

        let focus_changed = self.focused != previous.focused;
        if focus_changed {
            change_summary.push(format!(
                "Focus changed: {:?} -> {:?}",
                previous.focused, self.focused
            ));
        }

        let cursor_changed = self.cursor != previous.cursor;
        if cursor_changed && !config.ignore_cursor {
            change_summary.push("Cursor moved".to_string());
        }

        let legend_changed = self.legend != previous.legend;
        if legend_changed {
            change_summary.push("Legend focus changed".to_string());
        }

        let annotations_changed = self.annotations != previous.annotations;
        if annotations_changed {
            change_summary.push("Annotation state changed".to_string());
        }

        let other_changed = self.actions_menu != previous.actions_menu
            || self.overlay_box != previous.overlay_box;

        let requires_redefine = selection_changed
            || focus_changed
            || legend_changed
            || annotations_changed
            || other_changed
            || (cursor_changed && !config.ignore_cursor);

        StateChangeDetection {
            has_changes: requires_redefine || cursor_changed,
            selection_changed,
            focus_changed,
            cursor_changed,
            legend_changed,
            annotations_changed,
            requires_redefine,
            change_summary,
        }
    }
}
