//! Zoom window control: restoring live windows across redraws, applying
//! configured ranges, and deriving the automatic minimap window.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::option::{VisualOption, ZoomOrientation};
use crate::core::spec::{DataZoomKind, DataZoomSpec, VisualSpec};

/// Persisted minimap window, captured from the slider zooms at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub auto: bool,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub start_value: Option<usize>,
    #[serde(default)]
    pub end_value: Option<usize>,
    pub orientation: ZoomOrientation,
}

/// Window encoding: category index bounds or percent bounds. The two are
/// mutually exclusive on a zoom entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomRangeKind {
    Count,
    Percent,
}

/// Copies the live window of each zoom entry back onto a freshly built spec
/// so a redraw does not reset the user's scroll position.
///
/// Returns whether any window carried a position to restore.
pub fn restore_live_windows(spec: &mut VisualSpec, live: &[DataZoomSpec]) -> bool {
    let mut restored = false;
    for (zoom, previous) in spec.data_zoom.iter_mut().zip(live) {
        zoom.start = previous.start;
        zoom.end = previous.end;
        zoom.start_value = previous.start_value;
        zoom.end_value = previous.end_value;
        restored |= previous.start.is_some() || previous.start_value.is_some();
    }
    restored
}

/// Writes one window onto a zoom entry in the requested encoding, clearing
/// the other encoding's fields.
pub fn convert_data_zoom_range_by_type(
    spec: &mut VisualSpec,
    kind: ZoomRangeKind,
    start: f64,
    end: f64,
    idx: usize,
) {
    let Some(zoom) = spec.data_zoom.get_mut(idx) else {
        return;
    };

    match kind {
        ZoomRangeKind::Count => {
            zoom.start_value = Some(start as usize);
            zoom.end_value = Some(end as usize);
            zoom.start = None;
            zoom.end = None;
        }
        ZoomRangeKind::Percent => {
            zoom.start = Some(start);
            zoom.end = Some(end);
            zoom.start_value = None;
            zoom.end_value = None;
        }
    }
}

/// Applies the persisted percent windows from the option onto the spec.
pub fn convert_data_zoom_range(spec: &mut VisualSpec, option: &VisualOption) {
    for (idx, zoom) in option.chart_zooms.iter().enumerate() {
        if let (Some(start), Some(end)) = (zoom.start, zoom.end) {
            convert_data_zoom_range_by_type(spec, ZoomRangeKind::Percent, start, end, idx);
        }
    }
}

/// Derives the automatic minimap window when no window was persisted.
///
/// The window shows the first `count` categories, shrunk to `percent` of the
/// axis when the axis exceeds `limit` entries. Charts with 20 or more series
/// collapse the window to a single category, and a time axis anchors the
/// window to the end instead of the start.
pub fn convert_data_zoom_auto_range(
    spec: &mut VisualSpec,
    count: usize,
    limit: usize,
    percent: f64,
    has_time_field: bool,
    idx: usize,
) {
    if spec.data_zoom.is_empty() {
        return;
    }

    let col_count = spec
        .x_axis
        .first()
        .map(|axis| axis.data.len())
        .filter(|len| *len > 0)
        .or_else(|| spec.y_axis.first().map(|axis| axis.data.len()))
        .unwrap_or(0);
    if col_count == 0 {
        return;
    }

    let series_len = spec.series.len();
    let mut start_value = 0usize;
    let mut end_value = count.saturating_sub(1);

    if col_count > limit {
        end_value = if series_len >= 20 {
            0
        } else {
            ((col_count as f64 * (percent / 100.0)).floor() as usize).saturating_sub(1)
        };
    }

    end_value = if col_count == 1 {
        0
    } else if end_value == 0 {
        1
    } else {
        end_value
    };

    if has_time_field {
        start_value = col_count.saturating_sub(end_value);
        end_value = col_count - 1;
    }

    debug!(col_count, series_len, start_value, end_value, "auto zoom window");

    if let Some(zoom) = spec.data_zoom.get_mut(idx) {
        zoom.start_value = Some(start_value);
        zoom.end_value = Some(end_value);
        zoom.start = None;
        zoom.end = None;
    }

    // Inside zooms track the visible slider window.
    for zoom in &mut spec.data_zoom {
        if zoom.kind == DataZoomKind::Inside {
            zoom.start_value = Some(start_value);
            zoom.end_value = Some(end_value);
            zoom.start = None;
            zoom.end = None;
        }
    }
}

/// Percent windows to dispatch for a step zoom in, one per slider entry.
/// Each step narrows the window by 10 points per side, meeting at the middle.
#[must_use]
pub fn zoom_in_windows(zooms: &[DataZoomSpec]) -> Vec<(usize, f64, f64)> {
    slider_windows(zooms, |start, end| {
        ((start + 10.0).min(50.0), (end - 10.0).max(50.0))
    })
}

/// Percent windows to dispatch for a step zoom out, widening 10 points per
/// side up to the full axis.
#[must_use]
pub fn zoom_out_windows(zooms: &[DataZoomSpec]) -> Vec<(usize, f64, f64)> {
    slider_windows(zooms, |start, end| {
        ((start - 10.0).max(0.0), (end + 10.0).min(100.0))
    })
}

/// Percent windows restoring the windows captured at draw time.
#[must_use]
pub fn revert_windows(zooms: &[DataZoomSpec], defaults: &[ZoomRange]) -> Vec<(usize, f64, f64)> {
    let mut saved = defaults.iter();
    zooms
        .iter()
        .enumerate()
        .filter(|(_, zoom)| zoom.kind == DataZoomKind::Slider)
        .map(|(idx, _)| {
            let range = saved.next();
            (
                idx,
                range.and_then(|range| range.start).unwrap_or(0.0),
                range.and_then(|range| range.end).unwrap_or(100.0),
            )
        })
        .collect()
}

fn slider_windows(
    zooms: &[DataZoomSpec],
    step: impl Fn(f64, f64) -> (f64, f64),
) -> Vec<(usize, f64, f64)> {
    zooms
        .iter()
        .enumerate()
        .filter(|(_, zoom)| zoom.kind == DataZoomKind::Slider)
        .map(|(idx, zoom)| {
            let (start, end) = step(zoom.start.unwrap_or(0.0), zoom.end.unwrap_or(100.0));
            (idx, start, end)
        })
        .collect()
}

/// Captures the current slider windows for persistence with the chart.
#[must_use]
pub fn save_data_zoom_range(zooms: &[DataZoomSpec]) -> Vec<ZoomRange> {
    zooms
        .iter()
        .filter(|zoom| zoom.kind == DataZoomKind::Slider)
        .map(|zoom| ZoomRange {
            auto: zoom.show,
            start: zoom.start,
            end: zoom.end,
            start_value: zoom.start_value,
            end_value: zoom.end_value,
            orientation: zoom.orientation,
        })
        .collect()
}
