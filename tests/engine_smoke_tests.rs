use std::time::{Duration, Instant};

use vizspec::api::{ChartEngine, ChartEvent, ClickParams, ResultData};
use vizspec::core::{
    AxisGrid, AxisLabelKind, AxisOption, ChartKind, DataColumn, DatasetInfo, FieldRole,
    PivotConfig, PivotField, ResultDataset, VisualOption,
};
use vizspec::extensions::HookEvent;
use vizspec::interaction::ChartSelectMode;
use vizspec::render::NullRenderAdapter;

fn bar_option() -> VisualOption {
    let mut option = VisualOption::new(ChartKind::Bar);
    option.x_axis = Some(AxisOption::new(AxisLabelKind::Category));
    option.y_axis = Some(AxisOption::new(AxisLabelKind::Value));
    option
}

fn pivot() -> PivotConfig {
    PivotConfig {
        columns: vec![PivotField::new("region", FieldRole::Dimension)],
        rows: Vec::new(),
        aggregations: vec![PivotField::new("sales", FieldRole::Measure)],
    }
}

fn dataset() -> ResultDataset {
    ResultDataset {
        rows: vec!["east".to_owned(), "west".to_owned()],
        columns: vec![DataColumn::new("sales", vec![10.0, 20.0])],
        categories: Vec::new(),
        info: DatasetInfo {
            min_value: 10.0,
            max_value: 20.0,
        },
    }
}

fn result_data() -> ResultData {
    ResultData {
        data: dataset(),
        pivot: pivot(),
        option: None,
        params: None,
        trigger: None,
    }
}

fn engine() -> ChartEngine<NullRenderAdapter> {
    ChartEngine::new(bar_option(), NullRenderAdapter::new())
}

fn drawn_engine() -> ChartEngine<NullRenderAdapter> {
    let mut engine = engine();
    engine.set_result_data(result_data()).expect("ingest");
    engine.draw(false).expect("draw");
    engine.take_events();
    engine
}

#[test]
fn waterfall_clicks_on_the_offset_series_are_ignored() {
    let mut option = VisualOption::new(ChartKind::Waterfall);
    option.x_axis = Some(AxisOption::new(AxisLabelKind::Category));
    option.y_axis = Some(AxisOption::new(AxisLabelKind::Value));

    let mut engine = ChartEngine::new(option, NullRenderAdapter::new());
    engine
        .set_result_data(ResultData {
            data: ResultDataset {
                rows: vec!["q1".to_owned(), "q2".to_owned()],
                columns: vec![DataColumn::new("delta", vec![10.0, -4.0])],
                categories: Vec::new(),
                info: DatasetInfo {
                    min_value: -4.0,
                    max_value: 10.0,
                },
            },
            pivot: PivotConfig {
                columns: vec![PivotField::new("stage", FieldRole::Dimension)],
                rows: Vec::new(),
                aggregations: vec![PivotField::new("delta", FieldRole::Measure)],
            },
            option: None,
            params: None,
            trigger: None,
        })
        .expect("ingest");
    engine.draw(false).expect("draw");
    engine.take_events();

    // series 0 is the invisible offset bar under the floating deltas
    engine
        .on_click(Some(ClickParams {
            series_index: 0,
            data_index: 0,
            name: "q1".to_owned(),
            series_name: "offset".to_owned(),
        }))
        .expect("click");
    assert!(engine.take_events().is_empty());

    engine
        .on_click(Some(ClickParams {
            series_index: 1,
            data_index: 0,
            name: "q1".to_owned(),
            series_name: "delta".to_owned(),
        }))
        .expect("click");
    let events = engine.take_events();
    let ChartEvent::SelectInfo(info) = &events[0] else {
        panic!("expected a select event, got {events:?}");
    };
    assert_eq!(info.mode, ChartSelectMode::Add);
    assert_eq!(info.data[0].name, "stage");
    assert_eq!(info.data[0].filter_data, vec!["q1"]);
}

#[test]
fn ingest_then_draw_reaches_the_surface() {
    let mut engine = engine();
    engine.set_result_data(result_data()).expect("ingest");

    // no surface yet, so ingest alone draws nothing
    assert_eq!(engine.adapter().applied_count(), 0);
    assert!(engine.take_events().is_empty());

    engine.draw(false).expect("draw");
    assert_eq!(engine.take_events(), vec![ChartEvent::DrawFinished]);

    let spec = engine.adapter().last_applied().expect("applied spec");
    assert_eq!(spec.series.len(), 1);
    assert_eq!(spec.x_axis[0].data, vec!["east", "west"]);
    assert!(engine.last_spec().is_some());
    assert_eq!(engine.default_zoom_range().len(), 1);
}

#[test]
fn live_surface_redraws_on_ingest() {
    let mut engine = drawn_engine();
    engine.set_result_data(result_data()).expect("ingest");

    assert_eq!(engine.take_events(), vec![ChartEvent::DrawFinished]);
    // each full draw replaces the surface instead of merging
    assert_eq!(engine.adapter().reinit_count(), 2);
}

#[test]
fn ingest_refreshes_derived_option_state() {
    let mut engine = engine();
    engine.set_result_data(result_data()).expect("ingest");

    let option = engine.option();
    assert_eq!(option.min_value, Some(10.0));
    assert_eq!(option.max_value, Some(20.0));
    assert_eq!(option.field_list, vec!["region"]);
    assert_eq!(option.field_measure_list.len(), 1);
    // the series color mapping is seeded from the palette
    assert_eq!(option.color.mapping_array().len(), 1);
    assert_eq!(option.color.mapping_array()[0].alias, "sales");
}

#[test]
fn auto_scaled_grid_keeps_ingested_values_and_bounds() {
    let mut option = bar_option();
    if let Some(axis) = &mut option.y_axis {
        axis.grid = Some(AxisGrid {
            min: Some(0.0),
            max: Some(15.0),
            auto_scaled: true,
        });
    }

    let mut engine = ChartEngine::new(option, NullRenderAdapter::new());
    engine.set_result_data(result_data()).expect("ingest");
    engine.draw(false).expect("draw");

    // auto-scaled bounds resolve at draw time; intake leaves the persisted
    // grid and the values alone
    let grid = engine
        .option()
        .y_axis
        .as_ref()
        .and_then(|axis| axis.grid)
        .expect("grid");
    assert_eq!(grid.min, Some(0.0));
    assert_eq!(grid.max, Some(15.0));

    let spec = engine.last_spec().expect("spec");
    assert_eq!(spec.series[0].origin_data, vec![Some(10.0), Some(20.0)]);
}

#[test]
fn manual_grid_bounds_still_clamp_on_ingest() {
    let mut option = bar_option();
    if let Some(axis) = &mut option.y_axis {
        axis.grid = Some(AxisGrid {
            min: None,
            max: Some(15.0),
            auto_scaled: false,
        });
    }

    let mut engine = ChartEngine::new(option, NullRenderAdapter::new());
    engine.set_result_data(result_data()).expect("ingest");
    engine.draw(false).expect("draw");

    let spec = engine.last_spec().expect("spec");
    assert_eq!(spec.series[0].origin_data, vec![Some(10.0), Some(15.0)]);
}

#[test]
fn draw_without_resolved_series_skips_the_resize() {
    let mut engine = drawn_engine();

    // rows without columns pass intake but resolve to no series
    let mut rows_only = result_data();
    rows_only.data.columns.clear();
    engine.set_result_data(rows_only).expect("ingest");
    assert_eq!(engine.take_events(), vec![ChartEvent::DrawFinished]);
    assert_eq!(engine.adapter().resize_count(), 0);

    engine.set_result_data(result_data()).expect("ingest");
    assert_eq!(engine.adapter().resize_count(), 1);
}

#[test]
fn empty_dataset_signals_no_data() {
    let mut engine = engine();
    engine
        .set_result_data(ResultData::default())
        .expect("ingest");
    assert_eq!(engine.take_events(), vec![ChartEvent::NoData]);
}

#[test]
fn inconsistent_column_lengths_signal_no_data() {
    let mut result = result_data();
    result.data.columns[0].value.pop();

    let mut engine = engine();
    engine.set_result_data(result).expect("ingest");
    assert_eq!(engine.take_events(), vec![ChartEvent::NoData]);
}

#[test]
fn invalid_shelf_configuration_signals_no_data() {
    let mut result = result_data();
    // a measure on the column shelf invalidates a bar chart
    result
        .pivot
        .columns
        .push(PivotField::new("price", FieldRole::Measure));

    let mut engine = engine();
    engine.set_result_data(result).expect("ingest");
    engine.draw(false).expect("draw");
    assert_eq!(engine.take_events(), vec![ChartEvent::NoData]);
    assert_eq!(engine.adapter().applied_count(), 0);
}

#[test]
fn click_selects_then_subtracts_then_clears() {
    let mut engine = drawn_engine();

    let click = ClickParams {
        series_index: 0,
        data_index: 0,
        name: "east".to_owned(),
        series_name: "sales".to_owned(),
    };
    engine.on_click(Some(click.clone())).expect("click");

    let events = engine.take_events();
    assert_eq!(events.len(), 1);
    let ChartEvent::SelectInfo(info) = &events[0] else {
        panic!("expected a select event, got {events:?}");
    };
    assert_eq!(info.mode, ChartSelectMode::Add);
    assert_eq!(info.data.len(), 1);
    assert_eq!(info.data[0].name, "region");
    assert_eq!(info.data[0].filter_data, vec!["east"]);

    // same point again: it is selected now, so the click subtracts
    engine.on_click(Some(click)).expect("click");
    let events = engine.take_events();
    let ChartEvent::SelectInfo(info) = &events[0] else {
        panic!("expected a select event, got {events:?}");
    };
    assert_eq!(info.mode, ChartSelectMode::Subtract);

    engine.on_click(None).expect("click");
    let events = engine.take_events();
    let ChartEvent::SelectInfo(info) = &events[0] else {
        panic!("expected a select event, got {events:?}");
    };
    assert_eq!(info.mode, ChartSelectMode::Clear);
    assert!(info.data.is_empty());
}

#[test]
fn selection_hook_can_claim_the_click() {
    let mut engine = drawn_engine();
    engine.set_hook(Box::new(|event| {
        Ok(matches!(event, HookEvent::Selection { .. }))
    }));

    engine
        .on_click(Some(ClickParams {
            series_index: 0,
            data_index: 0,
            name: "east".to_owned(),
            series_name: "sales".to_owned(),
        }))
        .expect("click");

    assert!(engine.take_events().is_empty());
    let spec = engine.last_spec().expect("spec");
    assert!(spec.series[0].data.iter().all(|point| !point.selected));
}

#[test]
fn failing_hook_does_not_break_the_draw() {
    let mut engine = engine();
    engine.set_hook(Box::new(|_| Err("hook exploded".into())));

    engine.set_result_data(result_data()).expect("ingest");
    engine.draw(false).expect("draw");
    assert_eq!(engine.take_events(), vec![ChartEvent::DrawFinished]);
}

#[test]
fn kept_range_survives_a_redraw() {
    let mut engine = drawn_engine();
    engine
        .adapter_mut()
        .set_zoom_window(0, Some(30.0), Some(70.0));

    engine.draw(true).expect("redraw");

    let spec = engine.last_spec().expect("spec");
    assert_eq!(spec.data_zoom[0].start, Some(30.0));
    assert_eq!(spec.data_zoom[0].end, Some(70.0));
}

#[test]
fn fresh_draw_resets_the_window() {
    let mut engine = drawn_engine();
    engine
        .adapter_mut()
        .set_zoom_window(0, Some(30.0), Some(70.0));

    engine.draw(false).expect("redraw");

    let spec = engine.last_spec().expect("spec");
    assert_eq!(spec.data_zoom[0].start, None);
    assert_eq!(spec.data_zoom[0].start_value, Some(0));
}

#[test]
fn zoom_steps_dispatch_and_report_windows() {
    let mut engine = drawn_engine();
    engine.zoom_step_in();

    let events = engine.take_events();
    let ChartEvent::Datazoom(ranges) = &events[0] else {
        panic!("expected a zoom event, got {events:?}");
    };
    assert_eq!(ranges[0].start, Some(10.0));
    assert_eq!(ranges[0].end, Some(90.0));

    engine.zoom_revert();
    let events = engine.take_events();
    let ChartEvent::Datazoom(ranges) = &events[0] else {
        panic!("expected a zoom event, got {events:?}");
    };
    // the draw captured a count window, so revert falls back to the full axis
    assert_eq!(ranges[0].start, Some(0.0));
    assert_eq!(ranges[0].end, Some(100.0));
}

#[test]
fn resize_fires_once_after_the_settle_window() {
    let mut engine = drawn_engine();
    let t0 = Instant::now();

    engine.request_resize(t0);
    assert!(!engine.poll_resize(t0 + Duration::from_millis(499)));
    assert!(engine.poll_resize(t0 + Duration::from_millis(500)));
    assert_eq!(engine.adapter().resize_count(), 1);
    assert!(!engine.poll_resize(t0 + Duration::from_millis(600)));
}

#[test]
fn dispose_kills_the_surface() {
    let mut engine = drawn_engine();
    engine.dispose();
    assert!(engine.adapter().is_disposed());
}

#[test]
fn visual_option_round_trips_through_json() {
    let option = bar_option();
    let json = serde_json::to_string(&option).expect("serialize");
    let back: VisualOption = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(option, back);
}
