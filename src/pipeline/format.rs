//! Number-format resolution for series values and tooltips.

use crate::core::pivot::FieldRole;
use crate::core::spec::VisualSpec;

use super::strategy::StageContext;

/// Decimal places for formatted values: calculated measures keep fractional
/// precision, plain aggregates render as integers.
fn format_decimals(ctx: &StageContext<'_>) -> u8 {
    let fractional = ctx
        .pivot
        .aggregations
        .iter()
        .any(|field| field.role == FieldRole::Calculated);
    if fractional { 2 } else { 0 }
}

pub fn convert_format_series(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    let decimals = format_decimals(ctx);
    for series in &mut spec.series {
        series.value_format_decimals = decimals;
    }
    spec
}

pub fn convert_format_tooltip(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    spec.tooltip.value_format_decimals = format_decimals(ctx);
    if let Some(tooltip) = &ctx.option.tooltip {
        spec.tooltip.formats = tooltip.display_types.iter().flatten().copied().collect();
    }
    spec
}
