//! The chart engine: owns the option, pivot and dataset, runs the pipeline,
//! and drives a render adapter. Events for the dashboard queue up and are
//! drained by the caller.

use std::time::Instant;

use tracing::{debug, warn};

use crate::charts::strategy_for;
use crate::core::dataset::ResultDataset;
use crate::core::normalize::{calculate_baseline, calculate_min_max};
use crate::core::option::{
    AxisLabelKind, ChartKind, ColorOption, DrawTrigger, VisualOption,
};
use crate::core::pivot::{
    FIELD_DELIMITER, FieldRole, PivotConfig, PivotField, PivotTableInfo, field_role_count,
    resolve_field_info, resolve_pivot_info,
};
use crate::core::spec::{SeriesSpec, VisualSpec};
use crate::error::SpecResult;
use crate::extensions::{HookEvent, WidgetHook, run_hook};
use crate::interaction::{
    BrushSelection, ChartSelectMode, ZoomRange, save_data_zoom_range, selection_add_multi,
    selection_add_single, selection_clear, selection_subtract, set_select_data, revert_windows,
    zoom_in_windows, zoom_out_windows,
};
use crate::pipeline::color::{reapply_custom_ranges, resolve_mapping};
use crate::pipeline::label::{apply_default_display_types, is_single_series};
use crate::pipeline::{self, ChartStrategy, RedrawSeed, StageContext};
use crate::render::RenderAdapter;

use super::events::{ChartEvent, ChartSelectInfo, ClickParams, DrawParams, ResultData, SelectKind};
use super::resize::ResizeDebouncer;

pub struct ChartEngine<A: RenderAdapter> {
    strategy: Box<dyn ChartStrategy>,
    adapter: A,
    option: VisualOption,
    pivot: PivotConfig,
    data: ResultDataset,
    original_data: ResultDataset,
    field_info: PivotTableInfo,
    field_origin_info: PivotTableInfo,
    pivot_info: PivotTableInfo,
    has_time_field: bool,
    last_spec: Option<VisualSpec>,
    last_draw_series: Vec<SeriesSpec>,
    default_zoom_range: Vec<ZoomRange>,
    draw_params: DrawParams,
    draw_trigger: Option<DrawTrigger>,
    hook: Option<WidgetHook>,
    resize: ResizeDebouncer,
    events: Vec<ChartEvent>,
}

impl<A: RenderAdapter> ChartEngine<A> {
    #[must_use]
    pub fn new(option: VisualOption, adapter: A) -> Self {
        let strategy = strategy_for(option.chart_type);

        Self {
            strategy,
            adapter,
            option,
            pivot: PivotConfig::default(),
            data: ResultDataset::default(),
            original_data: ResultDataset::default(),
            field_info: PivotTableInfo::default(),
            field_origin_info: PivotTableInfo::default(),
            pivot_info: PivotTableInfo::default(),
            has_time_field: false,
            last_spec: None,
            last_draw_series: Vec::new(),
            default_zoom_range: Vec::new(),
            draw_params: DrawParams::default(),
            draw_trigger: None,
            hook: None,
            resize: ResizeDebouncer::default(),
            events: Vec::new(),
        }
    }

    pub fn set_hook(&mut self, hook: WidgetHook) {
        self.hook = Some(hook);
    }

    /// Queued events since the last drain, oldest first.
    pub fn take_events(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn option(&self) -> &VisualOption {
        &self.option
    }

    pub fn option_mut(&mut self) -> &mut VisualOption {
        &mut self.option
    }

    #[must_use]
    pub fn last_spec(&self) -> Option<&VisualSpec> {
        self.last_spec.as_ref()
    }

    #[must_use]
    pub fn default_zoom_range(&self) -> &[ZoomRange] {
        &self.default_zoom_range
    }

    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Ingests a query result: normalizes the dataset against the configured
    /// axes, refreshes the derived field projections, and redraws when a
    /// surface is live.
    pub fn set_result_data(&mut self, result: ResultData) -> SpecResult<()> {
        if result.data.is_empty() {
            self.events.push(ChartEvent::NoData);
            return Ok(());
        }
        if !result.data.is_structurally_valid() {
            warn!("result dataset is structurally inconsistent");
            self.events.push(ChartEvent::NoData);
            return Ok(());
        }

        self.pivot = result.pivot;
        if let Some(option) = result.option {
            self.option = option;
        }
        if let Some(params) = result.params {
            self.draw_params = params;
        }
        self.draw_trigger = result.trigger;

        self.original_data = result.data.clone();
        let mut dataset = result.data;

        // Baseline shift and manual bounds apply against the value axis.
        // Auto-scaled grids derive their bounds at draw time and must not
        // rewrite the ingested values or the caller's option.
        if let Some(axis) = &mut self.option.y_axis {
            if axis.label_type == AxisLabelKind::Value {
                if let Some(baseline) = axis.baseline {
                    if baseline.is_finite() && baseline != 0.0 {
                        calculate_baseline(baseline, &mut dataset);
                    }
                }
                if let Some(grid) = &mut axis.grid {
                    if !grid.auto_scaled {
                        calculate_min_max(grid, &mut dataset);
                    }
                }
            }
        }
        if let Some(axis) = &mut self.option.x_axis {
            if axis.label_type == AxisLabelKind::Value {
                if let Some(baseline) = axis.baseline {
                    if baseline.is_finite() && baseline != 0.0 {
                        calculate_baseline(baseline, &mut dataset);
                    }
                }
                if let Some(grid) = &mut axis.grid {
                    if !grid.auto_scaled {
                        calculate_min_max(grid, &mut dataset);
                    }
                }
            }
        }

        dataset.apply_ui_meta(&self.original_data);
        self.data = dataset;

        self.set_data_info();
        self.set_field_info();

        if self.adapter.is_live() {
            self.draw(false)?;
        }
        self.draw_trigger = None;
        Ok(())
    }

    /// Runs the whole pipeline and pushes the result to the surface.
    ///
    /// `keep_range` preserves the user's current zoom window across the
    /// redraw.
    pub fn draw(&mut self, keep_range: bool) -> SpecResult<()> {
        if !self.strategy.is_valid(&self.pivot)? || self.data.is_empty() {
            self.events.push(ChartEvent::NoData);
            return Ok(());
        }

        let live_zoom = if keep_range && self.adapter.is_live() {
            Some(self.adapter.current_zoom())
        } else {
            None
        };
        let carry_selection = !self.draw_params.selection_filters.is_empty();

        let mut spec = {
            let ctx = StageContext {
                option: &self.option,
                dataset: &self.data,
                pivot: &self.pivot,
                field_info: &self.field_info,
                field_origin_info: &self.field_origin_info,
                pivot_info: &self.pivot_info,
                has_time_field: self.has_time_field,
            };
            let seed = RedrawSeed {
                keep_range,
                live_zoom: live_zoom.as_deref(),
                previous_series: carry_selection.then_some(self.last_draw_series.as_slice()),
            };
            pipeline::run(self.strategy.as_ref(), &ctx, seed)?
        };

        run_hook(self.hook.as_mut(), HookEvent::InitWidget { spec: &mut spec });

        // A live surface may have changed size since the last draw; nothing
        // to fit when no series resolved.
        if self.adapter.is_live() && !spec.series.is_empty() {
            self.adapter.resize();
        }
        // A full draw replaces the surface; selection restyling merges.
        self.adapter.apply(&spec, true);
        self.default_zoom_range = save_data_zoom_range(&spec.data_zoom);
        debug!(chart = ?self.option.chart_type, series = spec.series.len(), "draw finished");

        self.last_spec = Some(spec);
        self.events.push(ChartEvent::DrawFinished);
        Ok(())
    }

    /// Handles a click on the surface. `None` means a click on empty space,
    /// which clears the whole selection.
    pub fn on_click(&mut self, click: Option<ClickParams>) -> SpecResult<()> {
        let Some(spec) = self.last_spec.as_mut() else {
            return Ok(());
        };

        let mode;
        let mut col_values: Vec<String> = Vec::new();
        let mut row_values: Vec<String> = Vec::new();

        match click {
            None => {
                mode = ChartSelectMode::Clear;
                selection_clear(spec, &mut self.pivot);
            }
            Some(params) => {
                if run_hook(
                    self.hook.as_mut(),
                    HookEvent::Selection { name: &params.name },
                ) {
                    return Ok(());
                }

                // A waterfall's first series is the invisible offset bar.
                if self.option.chart_type == ChartKind::Waterfall && params.series_index == 0 {
                    return Ok(());
                }

                let Some(target) = spec
                    .series
                    .get(params.series_index)
                    .and_then(|series| series.data.get(params.data_index))
                else {
                    return Ok(());
                };
                let target_name = target.name.clone();

                if target.selected {
                    mode = ChartSelectMode::Subtract;
                    selection_subtract(spec, &mut self.pivot, &target_name);
                } else {
                    mode = ChartSelectMode::Add;
                    selection_add_single(spec, &target_name);
                }

                col_values = params
                    .name
                    .split(FIELD_DELIMITER)
                    .map(str::to_owned)
                    .collect();
                let mut series_parts: Vec<String> = params
                    .series_name
                    .split(FIELD_DELIMITER)
                    .map(str::to_owned)
                    .collect();
                series_parts.pop();
                row_values = series_parts;
            }
        }

        // Selecting on this chart supersedes any external filter echo.
        if self.draw_params.external_filters {
            self.draw_params.external_filters = false;
        }

        let data = if mode == ChartSelectMode::Clear {
            Vec::new()
        } else {
            set_select_data(&self.pivot, &col_values, &row_values)
        };

        self.adapter.apply(spec, false);
        self.last_draw_series = spec.series.clone();
        self.draw_params.select_type = Some(SelectKind::Single);

        self.events.push(ChartEvent::SelectInfo(ChartSelectInfo {
            mode,
            data,
            params: self.draw_params.clone(),
        }));
        Ok(())
    }

    /// Handles the end of a brush drag over the surface.
    pub fn on_brush_end(&mut self, brush: &[BrushSelection]) -> SpecResult<()> {
        let Some(spec) = self.last_spec.as_mut() else {
            return Ok(());
        };

        if !brush.iter().any(|selection| !selection.data_index.is_empty()) {
            self.adapter.clear_brush();
            return Ok(());
        }
        self.adapter.clear_brush();

        selection_add_multi(spec, brush);

        // Selected category indices, in brush order.
        let mut indices: Vec<usize> = Vec::new();
        for selection in brush {
            for &idx in &selection.data_index {
                if !indices.contains(&idx) {
                    indices.push(idx);
                }
            }
        }

        // Union the covered category components into per-field filters.
        let column_fields: Vec<&PivotField> = self
            .pivot
            .columns
            .iter()
            .filter(|field| {
                matches!(
                    field.effective_role(),
                    FieldRole::Dimension | FieldRole::Timestamp
                )
            })
            .collect();
        let mut data: Vec<PivotField> = Vec::new();
        for &idx in &indices {
            let Some(category) = self.pivot_info.cols.get(idx) else {
                continue;
            };
            for (component_idx, component) in category.split(FIELD_DELIMITER).enumerate() {
                let Some(field) = column_fields.get(component_idx) else {
                    continue;
                };
                let pos = match data.iter().position(|item| item.name == field.name) {
                    Some(pos) => pos,
                    None => {
                        let mut entry = (*field).clone();
                        entry.filter_data = Vec::new();
                        data.push(entry);
                        data.len() - 1
                    }
                };
                let entry = &mut data[pos];
                let component = component.to_owned();
                if !entry.filter_data.contains(&component) {
                    entry.filter_data.push(component);
                }
            }
        }

        self.adapter.apply(spec, false);
        self.last_draw_series = spec.series.clone();
        self.draw_params.select_type = Some(SelectKind::Multi);

        self.events.push(ChartEvent::SelectInfo(ChartSelectInfo {
            mode: ChartSelectMode::Add,
            data,
            params: self.draw_params.clone(),
        }));
        Ok(())
    }

    /// Notes a resize request; the actual resize runs from [`Self::poll_resize`]
    /// once requests settle.
    pub fn request_resize(&mut self, now: Instant) {
        self.resize.request(now);
    }

    /// Fires the pending resize when its settle window elapsed. Returns
    /// whether the surface was resized.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        if self.resize.poll(now) && self.adapter.is_live() {
            self.adapter.resize();
            return true;
        }
        false
    }

    /// Steps every slider zoom window inward.
    pub fn zoom_step_in(&mut self) {
        for (idx, start, end) in zoom_in_windows(&self.adapter.current_zoom()) {
            self.adapter.dispatch_zoom(idx, start, end);
        }
        self.emit_datazoom();
    }

    /// Steps every slider zoom window outward.
    pub fn zoom_step_out(&mut self) {
        for (idx, start, end) in zoom_out_windows(&self.adapter.current_zoom()) {
            self.adapter.dispatch_zoom(idx, start, end);
        }
        self.emit_datazoom();
    }

    /// Restores the zoom windows captured by the last draw.
    pub fn zoom_revert(&mut self) {
        let windows = revert_windows(&self.adapter.current_zoom(), &self.default_zoom_range);
        for (idx, start, end) in windows {
            self.adapter.dispatch_zoom(idx, start, end);
        }
        self.emit_datazoom();
    }

    /// Forwards a zoom interaction from the surface to the dashboard.
    pub fn on_datazoom(&mut self) {
        self.emit_datazoom();
    }

    fn emit_datazoom(&mut self) {
        let ranges = save_data_zoom_range(&self.adapter.current_zoom());
        self.events.push(ChartEvent::Datazoom(ranges));
    }

    /// Tears the surface down.
    pub fn dispose(&mut self) {
        self.adapter.dispose();
    }

    /// Refreshes the option state the dashboard reads back after a draw:
    /// data bounds, field lists, color mapping, and display-type defaults.
    fn set_data_info(&mut self) {
        self.option.min_value = Some(self.data.info.min_value);
        self.option.max_value = Some(self.data.info.max_value);

        let mut dimensions: Vec<PivotField> = Vec::new();
        let mut measures: Vec<PivotField> = Vec::new();
        for shelf in [&self.pivot.columns, &self.pivot.rows, &self.pivot.aggregations] {
            for field in shelf {
                match field.effective_role() {
                    FieldRole::Dimension | FieldRole::Timestamp => {
                        dimensions.push(field.clone());
                    }
                    FieldRole::Measure | FieldRole::Calculated => {
                        measures.push(field.clone());
                    }
                }
            }
        }
        self.option.field_list = dimensions.iter().map(|field| field.name.clone()).collect();
        self.option.field_dimension_list = dimensions;
        self.option.field_measure_list = measures;

        // A dimension color target must point at a field still on a shelf.
        if let ColorOption::ByDimension { target_field, .. } = &mut self.option.color {
            let valid = target_field
                .as_ref()
                .is_some_and(|target| self.option.field_list.contains(target));
            if !valid {
                *target_field = self.option.field_list.last().cloned();
            }
        }

        let agg_measures = field_role_count(&self.pivot.aggregations, FieldRole::Measure)
            + field_role_count(&self.pivot.aggregations, FieldRole::Calculated);
        let single = is_single_series(agg_measures, self.pivot.rows.len());
        if let Some(label) = &mut self.option.data_label {
            apply_default_display_types(label, single);
        }
        if let Some(tooltip) = &mut self.option.tooltip {
            apply_default_display_types(tooltip, single);
        }

        resolve_mapping(&mut self.option, self.draw_trigger);

        let custom_ranges = matches!(
            &self.option.color,
            ColorOption::ByValue {
                custom_mode: Some(_),
                ..
            }
        );
        if self.draw_trigger.is_some() && custom_ranges {
            reapply_custom_ranges(&mut self.option, &self.data);
        }
    }

    /// Rebuilds the shelf and data field projections the converters read.
    fn set_field_info(&mut self) {
        let resolved = resolve_field_info(&self.pivot);
        self.has_time_field = resolved.has_time_field;
        self.field_info = resolved.display;
        self.field_origin_info = resolved.origin;

        self.pivot_info = resolve_pivot_info(
            &self.data.rows,
            self.data.columns.iter().map(|column| column.name.as_str()),
            &self.field_info.aggs,
        );
    }
}
