use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::option::{AxisLabelKind, ColorRange, DisplayType, ZoomOrientation};

/// Opacity-bearing style applied to a series or a single data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub opacity: f64,
    pub color: Option<String>,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            color: None,
        }
    }
}

/// One rendered data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    /// `None` when the point is hidden (legend toggle).
    pub value: Option<f64>,
    pub selected: bool,
    pub item_style: Option<ItemStyle>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            selected: false,
            item_style: Some(ItemStyle::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Bar,
    Line,
    Pie,
}

/// Data-label configuration resolved onto a series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesLabel {
    pub show: bool,
    pub formats: Vec<DisplayType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,
    pub kind: SeriesKind,
    /// Stack group identity; series sharing a stack render cumulatively.
    pub stack: Option<String>,
    pub data: Vec<SeriesPoint>,
    /// Untouched values kept for legend show/hide restores.
    pub origin_data: Vec<Option<f64>>,
    pub color: Option<String>,
    pub item_style: Option<ItemStyle>,
    pub line_style: Option<ItemStyle>,
    pub area_style: Option<ItemStyle>,
    pub text_style: Option<ItemStyle>,
    pub label: SeriesLabel,
    /// Set when any point in the series carries selection state.
    pub exist_select_data: bool,
    /// Decimal places applied to formatted values.
    pub value_format_decimals: u8,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SeriesKind) -> Self {
        Self {
            name: name.into(),
            kind,
            stack: None,
            data: Vec::new(),
            origin_data: Vec::new(),
            color: None,
            item_style: None,
            line_style: None,
            area_style: None,
            text_style: None,
            label: SeriesLabel::default(),
            exist_select_data: false,
            value_format_decimals: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub axis_type: AxisLabelKind,
    pub name: Option<String>,
    /// Field-derived axis identity, kept even when a custom name overrides
    /// the displayed one.
    pub axis_name: Option<String>,
    pub data: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub show_name: bool,
    pub show_label: bool,
}

impl AxisSpec {
    #[must_use]
    pub fn new(axis_type: AxisLabelKind) -> Self {
        Self {
            axis_type,
            name: None,
            axis_name: None,
            data: Vec::new(),
            min: None,
            max: None,
            show_name: true,
            show_label: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataZoomKind {
    Slider,
    Inside,
}

/// One zoom control in the finished specification.
///
/// `start`/`end` (percent) and `start_value`/`end_value` (category index) are
/// mutually exclusive encodings; setting one clears the other so the
/// rendering engine never receives conflicting hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataZoomSpec {
    pub kind: DataZoomKind,
    pub show: bool,
    pub orientation: ZoomOrientation,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub start_value: Option<usize>,
    pub end_value: Option<usize>,
}

impl DataZoomSpec {
    #[must_use]
    pub fn new(kind: DataZoomKind) -> Self {
        Self {
            kind,
            show: true,
            orientation: ZoomOrientation::Horizontal,
            start: None,
            end: None,
            start_value: None,
            end_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendSpec {
    pub show: bool,
    pub data: Vec<String>,
    pub colors: Vec<String>,
    /// When set, legend entries toggle whole series natively and the engine
    /// skips its own point-level show/hide handling.
    pub series_sync: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSpec {
    pub formats: Vec<DisplayType>,
    pub value_format_decimals: u8,
}

/// Plot placement margins, percent of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            top: 10.0,
            bottom: 10.0,
            left: 10.0,
            right: 10.0,
        }
    }
}

/// Piecewise value-to-color mapping for BY_VALUE coloring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualMapSpec {
    pub ranges: Vec<ColorRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataInfo {
    pub min_value: f64,
    pub max_value: f64,
}

/// The fully resolved visual specification.
///
/// Owned exclusively by one pipeline invocation and rebuilt from scratch
/// every draw; selection styling and the zoom window are deliberately seeded
/// from the previous invocation by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualSpec {
    pub x_axis: SmallVec<[AxisSpec; 2]>,
    pub y_axis: SmallVec<[AxisSpec; 2]>,
    pub series: Vec<SeriesSpec>,
    pub legend: Option<LegendSpec>,
    pub data_zoom: Vec<DataZoomSpec>,
    pub tooltip: TooltipSpec,
    pub grid: Vec<GridSpec>,
    pub data_info: DataInfo,
    pub visual_map: Option<VisualMapSpec>,
    /// Whether the toolbox zoom affordance stays available; removed together
    /// with the zoom controls when zooming is disabled.
    pub toolbox_zoom: bool,
    pub font_scale: f64,
}

impl VisualSpec {
    #[must_use]
    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|series| series.name.as_str()).collect()
    }

    /// Category count along the primary axis.
    #[must_use]
    pub fn category_count(&self) -> usize {
        let x_len = self.x_axis.first().map_or(0, |axis| axis.data.len());
        if x_len > 0 {
            x_len
        } else {
            self.y_axis.first().map_or(0, |axis| axis.data.len())
        }
    }
}
