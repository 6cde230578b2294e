//! Waterfall chart: each delta bar floats on an invisible offset bar whose
//! height is the running total before it. The offset series renders first and
//! never takes part in selection.

use crate::core::option::{AxisLabelKind, ChartKind};
use crate::core::pivot::{FieldRole, PivotConfig, field_role_count};
use crate::core::spec::{
    AxisSpec, DataZoomKind, DataZoomSpec, ItemStyle, SeriesKind, SeriesPoint, SeriesSpec,
    VisualSpec,
};
use crate::error::SpecResult;
use crate::pipeline::{ChartStrategy, StageContext};

#[derive(Debug, Default)]
pub struct WaterfallChart;

impl ChartStrategy for WaterfallChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Waterfall
    }

    fn build_skeleton(&self, _ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        let mut spec = VisualSpec::default();
        spec.x_axis.push(AxisSpec::new(AxisLabelKind::Category));
        spec.y_axis.push(AxisSpec::new(AxisLabelKind::Value));

        spec.data_zoom.push(DataZoomSpec::new(DataZoomKind::Slider));
        let mut inside = DataZoomSpec::new(DataZoomKind::Inside);
        inside.show = false;
        spec.data_zoom.push(inside);

        // no legend: the two stacked series are one visual measure
        spec.toolbox_zoom = true;
        Ok(spec)
    }

    fn build_series_data(
        &self,
        mut spec: VisualSpec,
        ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        let Some(column) = ctx.dataset.columns.first() else {
            return Ok(spec);
        };

        let mut offset = SeriesSpec::new("offset", SeriesKind::Bar);
        let mut delta = SeriesSpec::new(column.name.clone(), SeriesKind::Bar);
        offset.stack = Some(column.name.clone());
        delta.stack = Some(column.name.clone());

        let mut total = 0.0;
        for (idx, &value) in column.value.iter().enumerate() {
            let name = ctx
                .dataset
                .rows
                .get(idx)
                .cloned()
                .unwrap_or_else(|| column.name.clone());

            // A negative delta hangs down from the previous total.
            let base = if value >= 0.0 { total } else { total + value };
            let mut base_point = SeriesPoint::new(name.clone(), base);
            base_point.item_style = Some(ItemStyle {
                opacity: 1.0,
                color: Some("transparent".to_owned()),
            });
            offset.data.push(base_point);

            delta.data.push(SeriesPoint::new(name, value.abs()));
            total += value;
        }
        offset.origin_data = offset.data.iter().map(|point| point.value).collect();
        delta.origin_data = column.value.iter().map(|&value| Some(value)).collect();

        spec.series = vec![offset, delta];
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
