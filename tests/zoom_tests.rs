use vizspec::core::{
    AxisLabelKind, AxisSpec, DataZoomKind, DataZoomSpec, SeriesKind, SeriesSpec, VisualSpec,
    ZoomOrientation,
};
use vizspec::interaction::{
    ZoomRange, ZoomRangeKind, convert_data_zoom_auto_range, convert_data_zoom_range_by_type,
    restore_live_windows, revert_windows, save_data_zoom_range, zoom_in_windows,
    zoom_out_windows,
};

const COUNT: usize = 20;
const LIMIT: usize = 500;
const PERCENT: f64 = 10.0;

fn spec(categories: usize, series: usize) -> VisualSpec {
    let mut spec = VisualSpec::default();
    let mut axis = AxisSpec::new(AxisLabelKind::Category);
    axis.data = (0..categories).map(|idx| format!("c{idx}")).collect();
    spec.x_axis.push(axis);

    spec.series = (0..series)
        .map(|idx| SeriesSpec::new(format!("s{idx}"), SeriesKind::Bar))
        .collect();

    spec.data_zoom.push(DataZoomSpec::new(DataZoomKind::Slider));
    let mut inside = DataZoomSpec::new(DataZoomKind::Inside);
    inside.show = false;
    spec.data_zoom.push(inside);
    spec
}

#[test]
fn auto_range_shows_first_twenty_categories() {
    let mut spec = spec(100, 2);
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, false, 0);

    assert_eq!(spec.data_zoom[0].start_value, Some(0));
    assert_eq!(spec.data_zoom[0].end_value, Some(19));
    assert_eq!(spec.data_zoom[0].start, None);
}

#[test]
fn auto_range_shrinks_to_percentage_past_the_limit() {
    let mut spec = spec(1000, 2);
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, false, 0);

    // floor(1000 * 10%) - 1
    assert_eq!(spec.data_zoom[0].end_value, Some(99));
}

#[test]
fn auto_range_collapses_for_wide_series_counts() {
    let mut spec = spec(1000, 20);
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, false, 0);

    // 20+ series collapse the window, then a zero window widens to one step
    assert_eq!(spec.data_zoom[0].end_value, Some(1));
}

#[test]
fn auto_range_pins_single_category_axes() {
    let mut spec = spec(1, 2);
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, false, 0);

    assert_eq!(spec.data_zoom[0].start_value, Some(0));
    assert_eq!(spec.data_zoom[0].end_value, Some(0));
}

#[test]
fn time_axes_anchor_the_window_to_the_end() {
    let mut spec = spec(100, 2);
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, true, 0);

    assert_eq!(spec.data_zoom[0].start_value, Some(81));
    assert_eq!(spec.data_zoom[0].end_value, Some(99));
}

#[test]
fn inside_zooms_follow_the_slider_window() {
    let mut spec = spec(100, 2);
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, false, 0);

    assert_eq!(spec.data_zoom[1].start_value, Some(0));
    assert_eq!(spec.data_zoom[1].end_value, Some(19));
}

#[test]
fn auto_range_with_zero_count_still_spans_a_step() {
    let mut spec = spec(100, 2);
    convert_data_zoom_auto_range(&mut spec, 0, LIMIT, PERCENT, false, 0);

    // a zero window widens to one step instead of underflowing
    assert_eq!(spec.data_zoom[0].start_value, Some(0));
    assert_eq!(spec.data_zoom[0].end_value, Some(1));
}

#[test]
fn empty_axes_leave_the_window_alone() {
    let mut spec = spec(0, 2);
    spec.x_axis[0].data.clear();
    convert_data_zoom_auto_range(&mut spec, COUNT, LIMIT, PERCENT, false, 0);

    assert_eq!(spec.data_zoom[0].start_value, None);
    assert_eq!(spec.data_zoom[0].end_value, None);
}

#[test]
fn window_encodings_are_mutually_exclusive() {
    let mut spec = spec(100, 1);

    convert_data_zoom_range_by_type(&mut spec, ZoomRangeKind::Count, 5.0, 30.0, 0);
    assert_eq!(spec.data_zoom[0].start_value, Some(5));
    assert_eq!(spec.data_zoom[0].end_value, Some(30));
    assert_eq!(spec.data_zoom[0].start, None);
    assert_eq!(spec.data_zoom[0].end, None);

    convert_data_zoom_range_by_type(&mut spec, ZoomRangeKind::Percent, 10.0, 90.0, 0);
    assert_eq!(spec.data_zoom[0].start, Some(10.0));
    assert_eq!(spec.data_zoom[0].end, Some(90.0));
    assert_eq!(spec.data_zoom[0].start_value, None);
    assert_eq!(spec.data_zoom[0].end_value, None);
}

#[test]
fn restore_copies_live_windows_and_reports_presence() {
    let mut fresh = spec(100, 1);
    let mut live = fresh.data_zoom.clone();
    live[0].start = Some(30.0);
    live[0].end = Some(70.0);

    assert!(restore_live_windows(&mut fresh, &live));
    assert_eq!(fresh.data_zoom[0].start, Some(30.0));
    assert_eq!(fresh.data_zoom[0].end, Some(70.0));

    let mut fresh = spec(100, 1);
    let live = fresh.data_zoom.clone();
    assert!(!restore_live_windows(&mut fresh, &live));
}

#[test]
fn step_zoom_windows_clamp_at_the_middle_and_the_edges() {
    let mut zooms = vec![DataZoomSpec::new(DataZoomKind::Slider)];
    zooms[0].start = Some(45.0);
    zooms[0].end = Some(55.0);

    assert_eq!(zoom_in_windows(&zooms), vec![(0, 50.0, 50.0)]);
    assert_eq!(zoom_out_windows(&zooms), vec![(0, 35.0, 65.0)]);

    zooms[0].start = Some(5.0);
    zooms[0].end = Some(98.0);
    assert_eq!(zoom_out_windows(&zooms), vec![(0, 0.0, 100.0)]);
}

#[test]
fn step_zoom_defaults_to_the_full_axis() {
    let zooms = vec![DataZoomSpec::new(DataZoomKind::Slider)];
    assert_eq!(zoom_in_windows(&zooms), vec![(0, 10.0, 90.0)]);
}

#[test]
fn revert_restores_saved_windows_per_slider() {
    let mut zooms = vec![
        DataZoomSpec::new(DataZoomKind::Slider),
        DataZoomSpec::new(DataZoomKind::Inside),
    ];
    zooms[0].start = Some(40.0);
    zooms[0].end = Some(60.0);

    let saved = vec![ZoomRange {
        auto: true,
        start: Some(10.0),
        end: Some(30.0),
        start_value: None,
        end_value: None,
        orientation: ZoomOrientation::Horizontal,
    }];

    assert_eq!(revert_windows(&zooms, &saved), vec![(0, 10.0, 30.0)]);
    // no saved range falls back to the full axis
    assert_eq!(revert_windows(&zooms, &[]), vec![(0, 0.0, 100.0)]);
}

#[test]
fn save_captures_slider_entries_only() {
    let mut spec = spec(100, 1);
    spec.data_zoom[0].start = Some(20.0);
    spec.data_zoom[0].end = Some(80.0);

    let saved = save_data_zoom_range(&spec.data_zoom);
    assert_eq!(saved.len(), 1);
    assert!(saved[0].auto);
    assert_eq!(saved[0].start, Some(20.0));
    assert_eq!(saved[0].end, Some(80.0));
}
