//! Data-label resolution and the display-type defaults applied when the
//! series shape changes.

use crate::core::option::{DisplayOption, DisplayType};
use crate::core::spec::VisualSpec;

use super::strategy::StageContext;

/// Applies the configured data-label display types to every series.
pub fn convert_label(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    let formats: Vec<DisplayType> = ctx
        .option
        .data_label
        .as_ref()
        .map(|label| label.display_types.iter().flatten().copied().collect())
        .unwrap_or_default();

    for series in &mut spec.series {
        series.label.show = !formats.is_empty();
        series.label.formats = formats.clone();
    }
    spec
}

/// Positional slots in a display-type list.
///
/// Slots 0-2 hold the category entries, 3-5 the series entries; disabled
/// slots are `None` so user choices in other slots survive a reshape.
const DISPLAY_SLOTS: usize = 6;

/// Re-derives the default display types when the chart switches between
/// single-series and multi-series shapes.
pub fn apply_default_display_types(display: &mut DisplayOption, single_series: bool) {
    if display.display_types.is_empty() {
        return;
    }
    display.display_types.resize(DISPLAY_SLOTS, None);

    let disabled: &[DisplayType] = if single_series {
        &[
            DisplayType::SeriesName,
            DisplayType::SeriesValue,
            DisplayType::SeriesPercent,
        ]
    } else {
        &[DisplayType::CategoryValue, DisplayType::CategoryPercent]
    };

    for slot in &mut display.display_types {
        if slot.is_some_and(|value| disabled.contains(&value)) {
            *slot = None;
        }
    }

    if single_series {
        display.display_types[0] = Some(DisplayType::CategoryName);
        display.display_types[1] = Some(DisplayType::CategoryValue);
    } else {
        display.display_types[3] = Some(DisplayType::SeriesName);
        display.display_types[4] = Some(DisplayType::SeriesValue);
    }

    display.preview_list = preview_list(display);
}

/// Human-readable preview lines for the option UI.
#[must_use]
pub fn preview_list(display: &DisplayOption) -> Vec<String> {
    display
        .display_types
        .iter()
        .flatten()
        .map(|value| {
            match value {
                DisplayType::CategoryName => "Category name",
                DisplayType::CategoryValue => "Category value",
                DisplayType::CategoryPercent => "Category %",
                DisplayType::SeriesName => "Series name",
                DisplayType::SeriesValue => "Series value",
                DisplayType::SeriesPercent => "Series %",
            }
            .to_owned()
        })
        .collect()
}

/// Whether the pivot shape is single-series for display-type defaults.
#[must_use]
pub fn is_single_series(agg_count: usize, row_count: usize) -> bool {
    agg_count <= 1 && row_count < 1
}
