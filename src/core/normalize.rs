//! Baseline-relative and min/max clamp-and-redistribute transforms applied to
//! raw series values before they enter the option pipeline.

use crate::core::dataset::ResultDataset;
use crate::core::option::AxisGrid;

/// Re-expresses every series value as signed distance from `baseline`.
///
/// Single-series data shifts each value directly. Cross-tabbed data keeps the
/// relative proportions of a stacked group: a flat reference array is built
/// from the category values and every column value at an index is rescaled by
/// `|reference - baseline| / |reference|`, negated when the reference sits
/// below the baseline.
///
/// A reference value of exactly `0` makes the ratio undefined; the non-finite
/// result is propagated as-is rather than special-cased.
pub fn calculate_baseline(baseline: f64, dataset: &mut ResultDataset) {
    if dataset.categories.is_empty() {
        for column in &mut dataset.columns {
            for value in &mut column.value {
                if *value > 0.0 {
                    *value -= baseline;
                } else {
                    *value = -(value.abs() + baseline.abs());
                }
            }
        }
        return;
    }

    let mut reference_value: Vec<f64> = Vec::new();
    let mut reference_ratio: Vec<f64> = Vec::new();
    for category in &dataset.categories {
        for &value in &category.value {
            let gap = (value - baseline).abs();
            reference_value.push(value);
            reference_ratio.push(gap / value.abs());
        }
    }

    for column in &mut dataset.columns {
        for (index, value) in column.value.iter_mut().enumerate() {
            let (Some(&reference), Some(&ratio)) =
                (reference_value.get(index), reference_ratio.get(index))
            else {
                continue;
            };

            if reference < baseline {
                *value = -(value.abs() * ratio);
            } else {
                *value = value.abs() * ratio;
            }
        }
    }
}

/// Clamps series values into the configured `[min, max]` window.
///
/// When `grid.auto_scaled` is set the bounds are first derived from the
/// dataset, padding a positive minimum down by 5% of the span so values near
/// the axis origin are not clipped. The derived bounds are written back into
/// `grid` for persistence.
///
/// Single-series values clamp directly. Cross-tabbed values are walked as
/// stacks: a running total per value index decides how much of each column's
/// contribution is allotted so the cumulative sums a stacked renderer relies
/// on stay consistent, and any index whose final total is below `min` is
/// zeroed across the stack.
pub fn calculate_min_max(grid: &mut AxisGrid, dataset: &mut ResultDataset) {
    if grid.auto_scaled {
        let (min, max) = dataset.value_bounds();
        grid.min = Some(if min > 0.0 {
            (min - (max - min) * 0.05).ceil()
        } else {
            min
        });
        grid.max = Some(max);
    }

    // Nothing to clamp against.
    let min_missing = grid.min.is_none_or(|min| min == 0.0);
    let max_missing = grid.max.is_none_or(|max| max == 0.0);
    if min_missing && max_missing {
        return;
    }

    let min = grid.min.unwrap_or(f64::NEG_INFINITY);
    let max = grid.max.unwrap_or(f64::INFINITY);

    if dataset.categories.is_empty() {
        for column in &mut dataset.columns {
            for value in &mut column.value {
                if *value < min {
                    *value = min;
                } else if *value > max {
                    *value = max;
                }
            }
        }
        return;
    }

    let categories = dataset.categories.clone();
    for category in &categories {
        let mut total_value: Vec<f64> = Vec::new();
        let mut series_value: Vec<f64> = Vec::new();

        for column in &mut dataset.columns {
            if !column.name.contains(category.name.as_str()) {
                continue;
            }

            for (index, value) in column.value.iter_mut().enumerate() {
                if total_value.len() <= index {
                    total_value.resize(index + 1, 0.0);
                    series_value.resize(index + 1, 0.0);
                }

                let raw = *value;
                let total = total_value[index];

                if total > max {
                    *value = 0.0;
                } else if total + raw > max {
                    if series_value[index] <= 0.0 {
                        *value = max;
                    } else {
                        *value = max - total;
                    }
                } else if total + raw < min {
                    *value = 0.0;
                } else if total < min && total + raw > min {
                    *value = total + raw;
                } else {
                    *value = raw;
                }

                series_value[index] += *value;
                total_value[index] += raw;
            }
        }

        // A stack whose final total never reaches the window is dropped.
        for (index, &total) in total_value.iter().enumerate() {
            if total < min {
                for column in &mut dataset.columns {
                    if let Some(value) = column.value.get_mut(index) {
                        *value = 0.0;
                    }
                }
            }
        }
    }
}
