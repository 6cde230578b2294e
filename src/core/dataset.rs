use serde::{Deserialize, Serialize};

use crate::core::pivot::FIELD_DELIMITER;

/// Min/max over all series values, reported by the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub min_value: f64,
    pub max_value: f64,
}

/// One named value series aligned to the category axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub value: Vec<f64>,
    #[serde(default)]
    pub percentage: Vec<f64>,
    /// Presentation metadata derived after intake, consumed by data-label
    /// and tooltip formatting. Never part of the wire payload.
    #[serde(skip)]
    pub ui_meta: Option<ColumnUiMeta>,
}

impl DataColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            value,
            percentage: Vec::new(),
            ui_meta: None,
        }
    }
}

/// Cross-tabulated series group used when a series axis is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub name: String,
    pub value: Vec<f64>,
    #[serde(default)]
    pub percentage: Vec<f64>,
}

/// Per-column presentation metadata computed from the pre-normalization
/// snapshot of the dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnUiMeta {
    pub category_name: Vec<String>,
    pub category_value: Vec<f64>,
    pub category_percent: Vec<f64>,
    /// Category labels for single-series data, or the column's own series
    /// component (name up to the first delimiter) for cross-tabbed data.
    pub series_name: Vec<String>,
    pub series_value: Vec<f64>,
    pub series_percent: Vec<f64>,
}

/// Tabular/pivoted query result consumed by the synthesis pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultDataset {
    pub rows: Vec<String>,
    pub columns: Vec<DataColumn>,
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
    pub info: DatasetInfo,
}

impl ResultDataset {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    #[must_use]
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Checks the column-length invariant: every column's `value` length is
    /// `rows.len()` for single-series data, or `rows.len() × categories.len()`
    /// for cross-tabbed data.
    ///
    /// A violation means the payload is malformed and the pipeline must emit
    /// a no-data signal instead of computing on inconsistent arrays.
    #[must_use]
    pub fn is_structurally_valid(&self) -> bool {
        if self.is_empty() {
            return false;
        }

        let expected = if self.categories.is_empty() {
            self.rows.len()
        } else {
            self.rows.len() * self.categories.len()
        };

        self.columns
            .iter()
            .all(|column| column.value.len() == expected)
    }

    /// Populates per-column presentation metadata from the pre-normalization
    /// snapshot.
    ///
    /// `original` carries the values as delivered by the query layer, before
    /// any baseline or min/max transform rewrote `self`.
    pub fn apply_ui_meta(&mut self, original: &ResultDataset) {
        let single_series = self.categories.is_empty();

        let category_value = if single_series {
            sum_by_index(original.columns.iter().map(|c| c.value.as_slice()))
        } else {
            self.categories
                .last()
                .map(|c| c.value.clone())
                .unwrap_or_default()
        };
        let category_percent = if single_series {
            sum_by_index(self.columns.iter().map(|c| c.percentage.as_slice()))
        } else {
            self.categories
                .last()
                .map(|c| c.percentage.clone())
                .unwrap_or_default()
        };

        let rows = self.rows.clone();
        for (index, column) in self.columns.iter_mut().enumerate() {
            let series_name = if single_series {
                rows.clone()
            } else {
                column
                    .name
                    .split(FIELD_DELIMITER)
                    .next()
                    .map(|part| vec![part.to_owned()])
                    .unwrap_or_default()
            };

            column.ui_meta = Some(ColumnUiMeta {
                category_name: rows.clone(),
                category_value: category_value.clone(),
                category_percent: category_percent.clone(),
                series_name,
                series_value: original
                    .columns
                    .get(index)
                    .map(|c| c.value.clone())
                    .unwrap_or_default(),
                series_percent: column.percentage.clone(),
            });
        }
    }

    /// Min/max over category values when present, over `info` otherwise.
    #[must_use]
    pub fn value_bounds(&self) -> (f64, f64) {
        if self.categories.is_empty() {
            return (self.info.min_value, self.info.max_value);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for category in &self.categories {
            for &value in &category.value {
                min = min.min(value);
                max = max.max(value);
            }
        }
        (min, max)
    }
}

fn sum_by_index<'a>(slices: impl Iterator<Item = &'a [f64]>) -> Vec<f64> {
    let mut totals: Vec<f64> = Vec::new();
    for slice in slices {
        if totals.len() < slice.len() {
            totals.resize(slice.len(), 0.0);
        }
        for (index, value) in slice.iter().enumerate() {
            totals[index] += value;
        }
    }
    totals
}
