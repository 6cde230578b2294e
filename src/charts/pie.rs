//! Pie chart: one slice per category, no axes and no zoom controls.

use crate::core::option::ChartKind;
use crate::core::pivot::{FieldRole, PivotConfig, field_role_count};
use crate::core::spec::{LegendSpec, SeriesKind, SeriesPoint, SeriesSpec, VisualSpec};
use crate::error::SpecResult;
use crate::pipeline::{ChartStrategy, StageContext};

#[derive(Debug, Default)]
pub struct PieChart;

impl ChartStrategy for PieChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn build_skeleton(&self, _ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        let mut spec = VisualSpec::default();
        spec.legend = Some(LegendSpec {
            show: true,
            ..LegendSpec::default()
        });
        Ok(spec)
    }

    fn build_series_data(
        &self,
        mut spec: VisualSpec,
        ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        spec.series = ctx
            .dataset
            .columns
            .iter()
            .map(|column| {
                let mut series = SeriesSpec::new(column.name.clone(), SeriesKind::Pie);
                series.data = column
                    .value
                    .iter()
                    .enumerate()
                    .map(|(idx, &value)| {
                        let name = ctx
                            .dataset
                            .rows
                            .get(idx)
                            .cloned()
                            .unwrap_or_else(|| column.name.clone());
                        SeriesPoint::new(name, value)
                    })
                    .collect();
                series.origin_data = column.value.iter().map(|&value| Some(value)).collect();
                series
            })
            .collect();
        Ok(spec)
    }

    fn is_valid(&self, pivot: &PivotConfig) -> SpecResult<bool> {
        let category_fields = field_role_count(&pivot.columns, FieldRole::Dimension)
            + field_role_count(&pivot.columns, FieldRole::Timestamp);
        let measures = field_role_count(&pivot.aggregations, FieldRole::Measure)
            + field_role_count(&pivot.aggregations, FieldRole::Calculated);

        Ok(category_fields > 0 && measures == 1 && pivot.rows.is_empty())
    }
}
