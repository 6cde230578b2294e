//! Selection state: per-point dim/highlight transitions and the filter
//! fields emitted for the surrounding dashboard.

use serde::{Deserialize, Serialize};

use crate::core::pivot::{FieldRole, PivotConfig, PivotField};
use crate::core::spec::{SeriesPoint, SeriesSpec, VisualSpec};

/// What a click did to the selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartSelectMode {
    Add,
    Subtract,
    Clear,
}

/// One rectangle of a brush drag: the covered point indices, per series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushSelection {
    #[serde(default)]
    pub series_index: Option<usize>,
    pub data_index: Vec<usize>,
}

fn select_point(point: &mut SeriesPoint) {
    if let Some(style) = &mut point.item_style {
        style.opacity = 1.0;
        point.selected = true;
    }
}

fn unselect_point(point: &mut SeriesPoint) {
    if let Some(style) = &mut point.item_style {
        style.opacity = 0.2;
        point.selected = false;
    }
}

fn clear_point(point: &mut SeriesPoint) {
    if let Some(style) = &mut point.item_style {
        style.opacity = 1.0;
        point.selected = false;
    }
}

/// Applies `apply` to the first point named `name` in each series. Stacked
/// and grouped charts repeat a category name once per series, so peers in
/// every series follow the clicked point.
fn for_each_first_match(spec: &mut VisualSpec, name: &str, apply: impl Fn(&mut SeriesPoint)) {
    for series in &mut spec.series {
        if let Some(point) = series.data.iter_mut().find(|point| point.name == name) {
            apply(point);
        }
    }
}

/// Highlights a clicked point and dims everything not already selected.
pub fn selection_add_single(spec: &mut VisualSpec, target_name: &str) {
    let mut unselected: Vec<String> = Vec::new();
    for series in &spec.series {
        for point in &series.data {
            if !point.selected && !unselected.contains(&point.name) {
                unselected.push(point.name.clone());
            }
        }
    }

    for name in &unselected {
        for_each_first_match(spec, name, unselect_point);
    }
    for_each_first_match(spec, target_name, select_point);
}

/// Applies a brush selection: every category index the brush covered is
/// highlighted across all series, everything else is dimmed.
pub fn selection_add_multi(spec: &mut VisualSpec, brush: &[BrushSelection]) {
    let mut indices: Vec<usize> = Vec::new();
    for selection in brush {
        for &idx in &selection.data_index {
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
    }

    let first_series_names: Vec<String> = spec
        .series
        .first()
        .map(|series| series.data.iter().map(|point| point.name.clone()).collect())
        .unwrap_or_default();

    for (idx, name) in first_series_names.iter().enumerate() {
        if indices.contains(&idx) {
            for_each_first_match(spec, name, select_point);
        } else {
            for_each_first_match(spec, name, unselect_point);
        }
    }
}

/// Removes one point from the selection. When nothing remains selected the
/// whole selection resets so no point stays dimmed.
pub fn selection_subtract(spec: &mut VisualSpec, pivot: &mut PivotConfig, target_name: &str) {
    for_each_first_match(spec, target_name, unselect_point);

    let any_selected = spec
        .series
        .iter()
        .any(|series| series.data.iter().any(|point| point.selected));
    if !any_selected {
        selection_clear(spec, pivot);
    }
}

/// Restores every point and drops the selection filters from the pivot.
pub fn selection_clear(spec: &mut VisualSpec, pivot: &mut PivotConfig) {
    for field in &mut pivot.columns {
        field.filter_data.clear();
    }
    for field in &mut pivot.aggregations {
        field.filter_data.clear();
    }

    for series in &mut spec.series {
        for point in &mut series.data {
            clear_point(point);
        }
    }
}

/// Maps the clicked category/series components onto the pivot's dimension
/// and timestamp fields, producing the filter fields sent with the select
/// event. Row-shelf fields take the series components, everything else the
/// category components.
#[must_use]
pub fn set_select_data(
    pivot: &PivotConfig,
    col_values: &[String],
    row_values: &[String],
) -> Vec<PivotField> {
    let mut result: Vec<PivotField> = Vec::new();

    let shelves: [(&[PivotField], bool); 3] = [
        (&pivot.columns, false),
        (&pivot.rows, true),
        (&pivot.aggregations, false),
    ];
    for (shelf, is_rows) in shelves {
        let targets = if is_rows { row_values } else { col_values };
        let fields = shelf.iter().filter(|field| {
            matches!(
                field.effective_role(),
                FieldRole::Dimension | FieldRole::Timestamp
            )
        });

        for (idx, field) in fields.enumerate() {
            let Some(value) = targets.get(idx).filter(|value| !value.is_empty()) else {
                continue;
            };

            if let Some(existing) = result.iter_mut().find(|item| item.name == field.name) {
                existing.filter_data = vec![value.clone()];
            } else {
                let mut field = field.clone();
                field.filter_data = vec![value.clone()];
                result.push(field);
            }
        }
    }

    result
}

/// Carries selection state from the previous draw onto a rebuilt spec when
/// the redraw was triggered by this chart's own selection filter.
pub fn convert_selection_data(spec: &mut VisualSpec, last_draw: &[SeriesSpec]) {
    for series in &mut spec.series {
        let Some(previous) = last_draw.iter().find(|prev| prev.name == series.name) else {
            continue;
        };

        series.item_style = previous.item_style.clone();
        series.line_style = previous.line_style.clone();
        series.area_style = previous.area_style.clone();
        series.text_style = previous.text_style.clone();
        series.exist_select_data = previous.exist_select_data;

        for (point, prev_point) in series.data.iter_mut().zip(&previous.data) {
            point.item_style = prev_point.item_style.clone();
            point.selected = prev_point.selected;
        }
    }
}
