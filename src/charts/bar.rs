//! Vertical bar chart: categories along x, measure values along y, with a
//! slider minimap plus inside scroll zoom.

use crate::core::option::{AxisLabelKind, ChartKind, ColorOption};
use crate::core::pivot::{FIELD_DELIMITER, FieldRole, PivotConfig, field_role_count};
use crate::core::spec::{
    AxisSpec, DataZoomKind, DataZoomSpec, LegendSpec, SeriesKind, SeriesPoint, SeriesSpec,
    VisualSpec,
};
use crate::error::SpecResult;
use crate::pipeline::{ChartStrategy, StageContext};

#[derive(Debug, Default)]
pub struct BarChart;

impl ChartStrategy for BarChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn build_skeleton(&self, ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        let mut spec = VisualSpec::default();
        spec.x_axis.push(AxisSpec::new(AxisLabelKind::Category));
        spec.y_axis.push(AxisSpec::new(AxisLabelKind::Value));

        spec.data_zoom.push(DataZoomSpec::new(DataZoomKind::Slider));
        let mut inside = DataZoomSpec::new(DataZoomKind::Inside);
        inside.show = false;
        spec.data_zoom.push(inside);

        spec.legend = Some(LegendSpec {
            show: true,
            series_sync: matches!(ctx.option.color, ColorOption::BySeries { .. }),
            ..LegendSpec::default()
        });
        spec.toolbox_zoom = true;
        Ok(spec)
    }

    fn build_series_data(
        &self,
        mut spec: VisualSpec,
        ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        // Row-shelf groups stack; series of the same measure share a stack.
        let stacked = !ctx.field_info.rows.is_empty();

        spec.series = ctx
            .dataset
            .columns
            .iter()
            .map(|column| {
                let mut series = SeriesSpec::new(column.name.clone(), SeriesKind::Bar);
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

                if stacked {
                    let measure = column
                        .name
                        .rsplit(FIELD_DELIMITER)
                        .next()
                        .unwrap_or(column.name.as_str());
                    series.stack = Some(measure.to_owned());
                }
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
        let stray_measures = field_role_count(&pivot.columns, FieldRole::Measure)
            + field_role_count(&pivot.rows, FieldRole::Measure);

        Ok(category_fields > 0 && measures > 0 && stray_measures == 0)
    }
}
