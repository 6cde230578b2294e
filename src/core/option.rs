use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::pivot::PivotField;

/// Chart families the pipeline knows how to specialize for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Waterfall,
}

/// Axis tick semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisLabelKind {
    Category,
    Value,
}

/// User-editable value-axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisGrid {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub auto_scaled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOption {
    pub label_type: AxisLabelKind,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub grid: Option<AxisGrid>,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default = "default_true")]
    pub show_name: bool,
    #[serde(default = "default_true")]
    pub show_label: bool,
}

impl AxisOption {
    #[must_use]
    pub fn new(label_type: AxisLabelKind) -> Self {
        Self {
            label_type,
            baseline: None,
            grid: None,
            custom_name: None,
            show_name: true,
            show_label: true,
        }
    }
}

/// Named color palettes selectable as a color schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorPalette {
    Sc1,
    Sc2,
    Sc3,
    Vc1,
}

impl ColorPalette {
    #[must_use]
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            ColorPalette::Sc1 => &[
                "#3452b5", "#f28a00", "#2b9a9e", "#ffd200", "#c3c3c3", "#4a95cf", "#75c4be",
                "#0c8691", "#9ee4e0", "#6ed0e4", "#b5d994", "#fcd63a",
            ],
            ColorPalette::Sc2 => &[
                "#e23c73", "#7b5bd2", "#ffa009", "#45ae8b", "#95bf4c", "#f8533b", "#5f87c6",
                "#d97cb5", "#9b9b9b", "#4c4c4c",
            ],
            ColorPalette::Sc3 => &[
                "#204b73", "#4d8e98", "#8bb97e", "#d8c96b", "#e6a35e", "#d05c51", "#9a4a66",
                "#5f4b8b", "#3c6e71", "#284b63",
            ],
            ColorPalette::Vc1 => &[
                "#ffcaba", "#fb7661", "#f23a2c", "#d10b15", "#9a0b2c",
            ],
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        ColorPalette::Sc1
    }
}

/// Per-alias color override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMappingEntry {
    pub alias: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorRangeKind {
    Section,
    Gradient,
}

/// One piece of a BY_VALUE piecewise range or gradient stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub kind: ColorRangeKind,
    pub color: String,
    pub fixed_min: Option<f64>,
    pub fixed_max: Option<f64>,
    pub gt: Option<f64>,
    pub lt: Option<f64>,
    /// Gradient stops carry the stop value here.
    #[serde(default)]
    pub value: Option<f64>,
}

impl ColorRange {
    #[must_use]
    pub fn section(
        color: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        gt: Option<f64>,
        lt: Option<f64>,
    ) -> Self {
        Self {
            kind: ColorRangeKind::Section,
            color: color.into(),
            fixed_min: min,
            fixed_max: max,
            gt,
            lt,
            value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorCustomMode {
    Section,
    Gradient,
}

/// Strategy assigning colors to rendered elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorOption {
    /// By aggregate/measure identity.
    BySeries {
        schema: ColorPalette,
        #[serde(default)]
        mapping: IndexMap<String, String>,
        #[serde(default)]
        mapping_array: Vec<ColorMappingEntry>,
        #[serde(default)]
        setting_use: bool,
    },
    /// By a chosen dimension's value.
    ByDimension {
        schema: ColorPalette,
        #[serde(default)]
        target_field: Option<String>,
        #[serde(default)]
        mapping: IndexMap<String, String>,
        #[serde(default)]
        mapping_array: Vec<ColorMappingEntry>,
    },
    /// By numeric value range/gradient.
    ByValue {
        schema: ColorPalette,
        #[serde(default)]
        ranges: Vec<ColorRange>,
        #[serde(default)]
        visual_gradations: Vec<ColorRange>,
        #[serde(default)]
        custom_mode: Option<ColorCustomMode>,
    },
}

impl ColorOption {
    #[must_use]
    pub fn schema(&self) -> ColorPalette {
        match self {
            ColorOption::BySeries { schema, .. }
            | ColorOption::ByDimension { schema, .. }
            | ColorOption::ByValue { schema, .. } => *schema,
        }
    }

    #[must_use]
    pub fn mapping_array(&self) -> &[ColorMappingEntry] {
        match self {
            ColorOption::BySeries { mapping_array, .. }
            | ColorOption::ByDimension { mapping_array, .. } => mapping_array,
            ColorOption::ByValue { .. } => &[],
        }
    }

    #[must_use]
    pub fn target_field(&self) -> Option<&str> {
        match self {
            ColorOption::ByDimension { target_field, .. } => target_field.as_deref(),
            _ => None,
        }
    }
}

impl Default for ColorOption {
    fn default() -> Self {
        ColorOption::BySeries {
            schema: ColorPalette::default(),
            mapping: IndexMap::new(),
            mapping_array: Vec::new(),
            setting_use: false,
        }
    }
}

/// Why a draw was requested. Some option resolution steps behave
/// differently depending on what changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawTrigger {
    ChangePivot,
    ChartType,
    Aggregation,
    Granularity,
    Filter,
    ChartZoom,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomOrientation {
    Horizontal,
    Vertical,
}

/// Persisted viewport configuration for one zoom control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomOption {
    pub auto: bool,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    pub orientation: ZoomOrientation,
}

impl Default for ZoomOption {
    fn default() -> Self {
        Self {
            auto: true,
            start: None,
            end: None,
            orientation: ZoomOrientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendOption {
    pub auto: bool,
    pub show_name: bool,
}

impl Default for LegendOption {
    fn default() -> Self {
        Self {
            auto: true,
            show_name: true,
        }
    }
}

/// Values a data label or tooltip line can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayType {
    CategoryName,
    CategoryValue,
    CategoryPercent,
    SeriesName,
    SeriesValue,
    SeriesPercent,
}

/// Data-label / tooltip configuration.
///
/// `display_types` is positional; disabled slots hold `None` so defaults can
/// be spliced in and out without reordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayOption {
    pub display_types: Vec<Option<DisplayType>>,
    #[serde(default)]
    pub preview_list: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSize {
    Small,
    Normal,
    Large,
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Normal
    }
}

/// The caller-owned presentation option set.
///
/// This is the persisted, round-trippable configuration. The pipeline writes
/// derived state back into the documented fields (`field_list`,
/// `field_measure_list`, `field_dimension_list`, `min_value`/`max_value`,
/// resolved color mapping and ranges) and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualOption {
    pub chart_type: ChartKind,
    #[serde(default)]
    pub x_axis: Option<AxisOption>,
    #[serde(default)]
    pub y_axis: Option<AxisOption>,
    #[serde(default)]
    pub color: ColorOption,
    #[serde(default)]
    pub chart_zooms: Vec<ZoomOption>,
    #[serde(default)]
    pub legend: LegendOption,
    #[serde(default)]
    pub data_label: Option<DisplayOption>,
    #[serde(default)]
    pub tooltip: Option<DisplayOption>,
    #[serde(default)]
    pub font_size: FontSize,

    // Pipeline-populated, persisted for the UI.
    #[serde(default)]
    pub field_list: Vec<String>,
    #[serde(default)]
    pub field_measure_list: Vec<PivotField>,
    #[serde(default)]
    pub field_dimension_list: Vec<PivotField>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
}

impl VisualOption {
    #[must_use]
    pub fn new(chart_type: ChartKind) -> Self {
        Self {
            chart_type,
            x_axis: None,
            y_axis: None,
            color: ColorOption::default(),
            chart_zooms: vec![ZoomOption::default()],
            legend: LegendOption::default(),
            data_label: None,
            tooltip: None,
            font_size: FontSize::default(),
            field_list: Vec::new(),
            field_measure_list: Vec::new(),
            field_dimension_list: Vec::new(),
            min_value: None,
            max_value: None,
        }
    }
}

fn default_true() -> bool {
    true
}
