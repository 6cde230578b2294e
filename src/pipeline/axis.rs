//! Axis conversion stages.

use crate::core::option::{AxisLabelKind, AxisOption};
use crate::core::pivot::FIELD_DELIMITER;
use crate::core::spec::{AxisSpec, VisualSpec};

use super::strategy::StageContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

fn axis_option<'a>(ctx: &StageContext<'a>, axis: Axis) -> Option<&'a AxisOption> {
    match axis {
        Axis::X => ctx.option.x_axis.as_ref(),
        Axis::Y => ctx.option.y_axis.as_ref(),
    }
}

fn axes(spec: &mut VisualSpec, axis: Axis) -> &mut smallvec::SmallVec<[AxisSpec; 2]> {
    match axis {
        Axis::X => &mut spec.x_axis,
        Axis::Y => &mut spec.y_axis,
    }
}

/// Seeds the axis entry from its option when the skeleton left it out.
pub fn convert_axis_default(mut spec: VisualSpec, ctx: &StageContext<'_>, axis: Axis) -> VisualSpec {
    let Some(option) = axis_option(ctx, axis) else {
        return spec;
    };

    let entries = axes(&mut spec, axis);
    if entries.is_empty() {
        entries.push(AxisSpec::new(option.label_type));
    }
    spec
}

/// Names the x axis from the column shelf and attaches category tick data.
pub fn convert_x_axis_data(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    let joined = ctx.field_info.cols.join(FIELD_DELIMITER);
    let custom = ctx
        .option
        .x_axis
        .as_ref()
        .and_then(|axis| axis.custom_name.clone());

    if let Some(axis) = spec.x_axis.first_mut() {
        axis.name = Some(custom.unwrap_or_else(|| joined.clone()));
        axis.axis_name = Some(joined);

        if axis.axis_type == AxisLabelKind::Category {
            axis.data = ctx.dataset.rows.clone();
        }
    }
    spec
}

/// Names the y axis from the aggregation shelf; when the x axis is not the
/// category axis the row labels move here instead.
pub fn convert_y_axis_data(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    let joined = ctx.field_info.aggs.join(FIELD_DELIMITER);
    let custom = ctx
        .option
        .y_axis
        .as_ref()
        .and_then(|axis| axis.custom_name.clone());
    let x_is_category = spec
        .x_axis
        .first()
        .is_some_and(|axis| axis.axis_type == AxisLabelKind::Category);

    if let Some(axis) = spec.y_axis.first_mut() {
        axis.name = Some(custom.unwrap_or_else(|| joined.clone()));
        axis.axis_name = Some(joined);

        if !x_is_category {
            axis.data = ctx.dataset.rows.clone();
        }
    }
    spec
}

/// Applies the configured value bounds onto a value-typed axis.
pub fn convert_axis(mut spec: VisualSpec, ctx: &StageContext<'_>, axis: Axis) -> VisualSpec {
    let Some(option) = axis_option(ctx, axis) else {
        return spec;
    };

    let grid = option.grid;
    if let Some(entry) = axes(&mut spec, axis).first_mut() {
        if entry.axis_type == AxisLabelKind::Value {
            if let Some(grid) = grid {
                if !grid.auto_scaled {
                    entry.min = grid.min;
                    entry.max = grid.max;
                }
            }
        }
    }
    spec
}
