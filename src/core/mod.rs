pub mod dataset;
pub mod normalize;
pub mod option;
pub mod pivot;
pub mod spec;

pub use dataset::{CategoryColumn, ColumnUiMeta, DataColumn, DatasetInfo, ResultDataset};
pub use option::{
    AxisGrid, AxisLabelKind, AxisOption, ChartKind, ColorCustomMode, ColorMappingEntry,
    ColorOption, ColorPalette, ColorRange, ColorRangeKind, DisplayOption, DisplayType,
    DrawTrigger, FontSize, LegendOption, VisualOption, ZoomOption, ZoomOrientation,
};
pub use pivot::{
    FIELD_DELIMITER, FieldRole, PivotConfig, PivotField, PivotTableInfo, ResolvedFieldInfo,
    ShelfKind, resolve_field_info, resolve_pivot_info,
};
pub use spec::{
    AxisSpec, DataInfo, DataZoomKind, DataZoomSpec, GridSpec, ItemStyle, LegendSpec, SeriesKind,
    SeriesLabel, SeriesPoint, SeriesSpec, TooltipSpec, VisualMapSpec, VisualSpec,
};
