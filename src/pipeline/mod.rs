//! The option pipeline: resolves a visual option and its dataset into a
//! finished render specification through a fixed stage order, with per-chart
//! hooks between stages.

pub mod axis;
pub mod color;
pub mod common;
pub mod format;
pub mod label;
pub mod legend;
pub mod strategy;
pub mod tool;

pub use strategy::{ChartStrategy, RedrawSeed, StageContext};

use tracing::debug;

use crate::core::spec::{DataInfo, VisualSpec};
use crate::error::SpecResult;
use crate::interaction::{
    convert_data_zoom_auto_range, convert_data_zoom_range, convert_selection_data,
    restore_live_windows,
};

use axis::Axis;

/// Default automatic minimap window: first 20 categories.
const AUTO_ZOOM_COUNT: usize = 20;
/// Above this many categories the window shrinks to a percentage.
const AUTO_ZOOM_LIMIT: usize = 500;
/// Window percentage used past the limit.
const AUTO_ZOOM_PERCENT: f64 = 10.0;

/// Runs every conversion stage in order and returns the finished spec.
///
/// Stage order is fixed; each chart variant contributes through its
/// [`ChartStrategy`] hooks. The skeleton and series stages are required and
/// fail fast when a variant does not supply them.
pub fn run(
    strategy: &dyn ChartStrategy,
    ctx: &StageContext<'_>,
    seed: RedrawSeed<'_>,
) -> SpecResult<VisualSpec> {
    let mut spec = strategy.build_skeleton(ctx)?;
    debug!(chart = ?strategy.kind(), "skeleton built");

    spec = strategy.additional_basic(spec, ctx)?;

    spec.data_info = DataInfo {
        min_value: ctx.dataset.info.min_value,
        max_value: ctx.dataset.info.max_value,
    };
    spec = strategy.additional_data_info(spec, ctx)?;

    if ctx.option.x_axis.is_some() {
        spec = axis::convert_axis_default(spec, ctx, Axis::X);
        spec = axis::convert_x_axis_data(spec, ctx);
        spec = common::convert_common_axis(spec, ctx, Axis::X);
        spec = axis::convert_axis(spec, ctx, Axis::X);
        spec = strategy.additional_x_axis(spec, ctx)?;
    }

    if ctx.option.y_axis.is_some() {
        spec = axis::convert_axis_default(spec, ctx, Axis::Y);
        spec = axis::convert_y_axis_data(spec, ctx);
        spec = common::convert_common_axis(spec, ctx, Axis::Y);
        spec = axis::convert_axis(spec, ctx, Axis::Y);
        spec = strategy.additional_y_axis(spec, ctx)?;
    }

    spec = strategy.build_series_data(spec, ctx)?;
    spec = color::convert_color(spec, ctx);
    spec = format::convert_format_series(spec, ctx);
    spec = label::convert_label(spec, ctx);
    spec = common::convert_common_series(spec, ctx);
    spec = strategy.additional_series(spec, ctx)?;
    debug!(series = spec.series.len(), "series resolved");

    spec = format::convert_format_tooltip(spec, ctx);
    spec = strategy.additional_tooltip(spec, ctx)?;

    spec = convert_data_zoom(strategy, spec, ctx, &seed)?;

    spec = legend::convert_legend(spec, ctx);
    spec = strategy.additional_legend(spec, ctx)?;

    spec = tool::convert_grid(spec, ctx);
    spec = strategy.additional_grid(spec, ctx)?;

    spec = common::convert_common_font(spec, ctx);
    spec = strategy.additional_etc(spec, ctx)?;

    // A redraw caused by this chart's own selection filter keeps its
    // selection styling.
    if let Some(previous) = seed.previous_series {
        convert_selection_data(&mut spec, previous);
    }

    Ok(spec)
}

/// Zoom stage: restore live windows on a kept-range redraw, apply persisted
/// windows, then fall back to the automatic window when neither applies.
/// With zooming disabled the zoom entries and the toolbox control go away.
fn convert_data_zoom(
    strategy: &dyn ChartStrategy,
    mut spec: VisualSpec,
    ctx: &StageContext<'_>,
    seed: &RedrawSeed<'_>,
) -> SpecResult<VisualSpec> {
    let auto = ctx
        .option
        .chart_zooms
        .first()
        .is_some_and(|zoom| zoom.auto);
    if !auto {
        spec.data_zoom.clear();
        spec.toolbox_zoom = false;
        return Ok(spec);
    }

    let mut restored = false;
    if seed.keep_range {
        if let Some(live) = seed.live_zoom {
            restored = restore_live_windows(&mut spec, live);
        }
    }

    convert_data_zoom_range(&mut spec, ctx.option);
    spec = tool::convert_data_zoom(spec, ctx);

    let has_saved_window = ctx
        .option
        .chart_zooms
        .first()
        .is_some_and(|zoom| zoom.start.is_some());
    if !has_saved_window && !restored {
        convert_data_zoom_auto_range(
            &mut spec,
            AUTO_ZOOM_COUNT,
            AUTO_ZOOM_LIMIT,
            AUTO_ZOOM_PERCENT,
            ctx.has_time_field,
            0,
        );
    }

    strategy.additional_data_zoom(spec, ctx)
}
