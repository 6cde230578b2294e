//! Legend conversion: item list and swatch colors per color variant.

use crate::core::option::{ChartKind, ColorOption};
use crate::core::spec::VisualSpec;

use super::color::dimension_legend_values;
use super::strategy::StageContext;

/// Builds the legend item list and its swatch colors.
///
/// BY_SERIES legends list the measures, BY_DIMENSION legends list the target
/// dimension's values, and BY_VALUE charts hide the legend since the visual
/// map replaces it. Charts whose skeleton carries no legend are left alone.
pub fn convert_legend(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    if spec.legend.is_none() {
        return spec;
    }

    let (data, colors, show) = match &ctx.option.color {
        ColorOption::BySeries {
            schema,
            mapping,
            setting_use,
            ..
        } => {
            let palette = schema.colors();
            let data = ctx.field_info.aggs.clone();
            let colors = data
                .iter()
                .enumerate()
                .map(|(index, alias)| {
                    if *setting_use {
                        if let Some(color) = mapping.get(alias) {
                            return color.clone();
                        }
                    }
                    palette[index % palette.len()].to_owned()
                })
                .collect();
            (data, colors, None)
        }
        ColorOption::ByDimension {
            schema,
            mapping_array,
            ..
        } => {
            let palette = schema.colors();

            // Pie slices are the legend items themselves, so overrides keyed
            // by slice name apply to the slice list instead.
            let data = if ctx.option.chart_type == ChartKind::Pie && !mapping_array.is_empty() {
                spec.series
                    .first()
                    .map(|series| {
                        series
                            .data
                            .iter()
                            .map(|point| point.name.clone())
                            .collect()
                    })
                    .unwrap_or_default()
            } else {
                dimension_legend_values(ctx)
            };

            let colors = data
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    mapping_array
                        .iter()
                        .find(|entry| &entry.alias == value)
                        .map(|entry| entry.color.clone())
                        .unwrap_or_else(|| palette[index % palette.len()].to_owned())
                })
                .collect();
            (data, colors, None)
        }
        ColorOption::ByValue { .. } => (Vec::new(), Vec::new(), Some(false)),
    };

    if let Some(legend) = &mut spec.legend {
        legend.data = data;
        legend.colors = colors;
        legend.show = show.unwrap_or(ctx.option.legend.auto);
    }
    spec
}
