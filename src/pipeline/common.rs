//! Options shared by every chart variant: axis visibility, series style
//! baselines, and font scaling.

use crate::core::option::FontSize;
use crate::core::spec::{ItemStyle, VisualSpec};

use super::axis::Axis;
use super::strategy::StageContext;

/// Propagates axis name/label visibility from the option.
pub fn convert_common_axis(mut spec: VisualSpec, ctx: &StageContext<'_>, axis: Axis) -> VisualSpec {
    let (option, entries) = match axis {
        Axis::X => (ctx.option.x_axis.as_ref(), &mut spec.x_axis),
        Axis::Y => (ctx.option.y_axis.as_ref(), &mut spec.y_axis),
    };

    if let (Some(option), Some(entry)) = (option, entries.first_mut()) {
        entry.show_name = option.show_name;
        entry.show_label = option.show_label;
    }
    spec
}

/// Normalizes series state the downstream stages rely on: every point carries
/// a restorable item style, and `exist_select_data` reflects the data.
pub fn convert_common_series(mut spec: VisualSpec, _ctx: &StageContext<'_>) -> VisualSpec {
    for series in &mut spec.series {
        for point in &mut series.data {
            if point.item_style.is_none() {
                point.item_style = Some(ItemStyle::default());
            }
        }
        series.exist_select_data = series.data.iter().any(|point| point.selected);
    }
    spec
}

/// Resolves the font size preset into a render scale.
pub fn convert_common_font(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    spec.font_scale = match ctx.option.font_size {
        FontSize::Small => 0.9,
        FontSize::Normal => 1.0,
        FontSize::Large => 1.15,
    };
    spec
}
