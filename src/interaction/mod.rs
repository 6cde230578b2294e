pub mod selection;
pub mod zoom;

pub use selection::{
    BrushSelection, ChartSelectMode, convert_selection_data, selection_add_multi,
    selection_add_single, selection_clear, selection_subtract, set_select_data,
};
pub use zoom::{
    ZoomRange, ZoomRangeKind, convert_data_zoom_auto_range, convert_data_zoom_range,
    convert_data_zoom_range_by_type, restore_live_windows, revert_windows, save_data_zoom_range,
    zoom_in_windows, zoom_out_windows,
};
