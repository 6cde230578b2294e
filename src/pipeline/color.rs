//! Color resolution: BY_SERIES palette/mapping assignment, BY_DIMENSION
//! value coloring, and BY_VALUE piecewise range derivation.

use crate::core::dataset::ResultDataset;
use crate::core::option::{
    ChartKind, ColorMappingEntry, ColorOption, ColorRange, DrawTrigger, VisualOption,
};
use crate::core::pivot::{FIELD_DELIMITER, PivotTableInfo, ShelfKind};
use crate::core::spec::{VisualMapSpec, VisualSpec};

use super::strategy::StageContext;

/// Assigns a resolved color to every series according to the color variant.
pub fn convert_color(mut spec: VisualSpec, ctx: &StageContext<'_>) -> VisualSpec {
    match &ctx.option.color {
        ColorOption::BySeries {
            schema, mapping, ..
        } => {
            let palette = schema.colors();
            for (index, series) in spec.series.iter_mut().enumerate() {
                let measure = series
                    .name
                    .rsplit(FIELD_DELIMITER)
                    .next()
                    .unwrap_or(series.name.as_str());
                let palette_index = ctx
                    .field_info
                    .aggs
                    .iter()
                    .position(|agg| agg == measure)
                    .unwrap_or(index);

                series.color = Some(
                    mapping
                        .get(measure)
                        .cloned()
                        .unwrap_or_else(|| palette[palette_index % palette.len()].to_owned()),
                );
            }
        }
        ColorOption::ByDimension {
            schema,
            target_field,
            mapping_array,
            ..
        } => {
            let palette = schema.colors();
            let located = target_field
                .as_deref()
                .and_then(|field| ctx.field_origin_info.locate(field));
            let field_idx = located.map_or(0, |(_, index)| index);
            let values = dimension_legend_values(ctx);

            for (index, series) in spec.series.iter_mut().enumerate() {
                let value = series
                    .name
                    .split(FIELD_DELIMITER)
                    .nth(field_idx)
                    .unwrap_or(series.name.as_str());
                let value_index = values
                    .iter()
                    .position(|candidate| candidate == value)
                    .unwrap_or(index);

                let overridden = mapping_array
                    .iter()
                    .find(|entry| entry.alias == value)
                    .map(|entry| entry.color.clone());
                series.color = Some(
                    overridden
                        .unwrap_or_else(|| palette[value_index % palette.len()].to_owned()),
                );
            }
        }
        ColorOption::ByValue { ranges, .. } => {
            spec.visual_map = Some(VisualMapSpec {
                ranges: ranges.clone(),
            });
        }
    }
    spec
}

/// Legend item values for a dimension color target: the shelf list holding
/// the target field, reduced to the target's component and de-duplicated
/// when the shelf carries more than one field.
#[must_use]
pub fn dimension_legend_values(ctx: &StageContext<'_>) -> Vec<String> {
    let Some(target) = ctx.option.color.target_field() else {
        return Vec::new();
    };
    let Some((shelf, field_idx)) = ctx.field_origin_info.locate(target) else {
        return Vec::new();
    };

    legend_values_for_shelf(ctx.field_info, ctx.pivot_info, shelf, field_idx)
}

/// Shelf-scoped legend reduction shared by the legend converter.
#[must_use]
pub fn legend_values_for_shelf(
    field_info: &PivotTableInfo,
    pivot_info: &PivotTableInfo,
    shelf: ShelfKind,
    field_idx: usize,
) -> Vec<String> {
    let pivot_values = pivot_info.shelf(shelf);

    if field_info.shelf(shelf).len() > 1 {
        let mut values: Vec<String> = Vec::new();
        for value in pivot_values {
            let component = value
                .split(FIELD_DELIMITER)
                .nth(field_idx)
                .filter(|part| !part.is_empty())
                .unwrap_or(value.as_str())
                .to_owned();
            if !values.contains(&component) {
                values.push(component);
            }
        }
        values
    } else {
        pivot_values.to_vec()
    }
}

/// Derives the BY_VALUE piecewise ranges from the dataset bounds.
///
/// Ranges run from the max downward; the count follows the palette length,
/// shrunk when the chart has fewer rendered positions than palette colors.
#[must_use]
pub fn set_measure_color_range(
    option: &VisualOption,
    dataset: &ResultDataset,
    color_list: &[String],
) -> Vec<ColorRange> {
    if color_list.is_empty() {
        return Vec::new();
    }

    let rows_len = match option.chart_type {
        ChartKind::Pie => dataset
            .columns
            .first()
            .map_or(0, |column| column.value.len()),
        _ => dataset.rows.len(),
    };

    let last_index = if color_list.len() > rows_len {
        rows_len.saturating_sub(1)
    } else {
        color_list.len() - 1
    };

    let max_value = option.max_value.unwrap_or(dataset.info.max_value);
    let min_value = option.min_value.unwrap_or(dataset.info.min_value);
    let step = if last_index == 0 {
        0.0
    } else {
        (max_value - min_value) / last_index as f64
    };

    let mut ranges = Vec::new();
    let mut running_max = max_value;
    for index in (0..=last_index).rev() {
        let color = color_list[index].clone();

        if index == last_index {
            // The top piece is open-ended above the max.
            ranges.push(ColorRange::section(
                color,
                Some(round1(running_max)),
                None,
                Some(round1(running_max)),
                None,
            ));
        } else {
            let mut min = if index == 0 {
                None
            } else {
                Some(round1(running_max - step))
            };
            if let Some(value) = min {
                if value < min_value && value < 0.0 {
                    min = Some(min_value.trunc());
                }
            }

            ranges.push(ColorRange::section(
                color,
                min,
                Some(round1(running_max)),
                min,
                Some(round1(running_max)),
            ));
            if let Some(value) = min {
                running_max = value;
            }
        }
    }

    ranges
}

/// Resolves the per-alias color mapping into the option's persistence
/// channel (`mapping` + `mapping_array`).
///
/// A pivot change resets the mapping; entries whose measure left the shelf
/// are dropped, and every entry after a dropped one is re-seeded from the
/// palette so palette indices stay aligned with shelf order.
pub fn resolve_mapping(option: &mut VisualOption, trigger: Option<DrawTrigger>) {
    let measures: Vec<String> = option
        .field_measure_list
        .iter()
        .map(|field| field.display_name().to_owned())
        .collect();
    if measures.is_empty() {
        return;
    }

    let by_dimension = matches!(option.color, ColorOption::ByDimension { .. });
    let (schema, mapping, mapping_array) = match &mut option.color {
        ColorOption::BySeries {
            schema,
            mapping,
            mapping_array,
            ..
        } => (*schema, mapping, mapping_array),
        ColorOption::ByDimension {
            schema,
            mapping,
            mapping_array,
            ..
        } => (*schema, mapping, mapping_array),
        ColorOption::ByValue { .. } => return,
    };

    if trigger == Some(DrawTrigger::ChangePivot) {
        mapping.clear();
    }

    if !by_dimension {
        // Drop mappings for measures no longer on the shelf; everything after
        // the first drop is reset so palette order stays stable.
        let mut color_changed = false;
        let keys: Vec<String> = mapping.keys().cloned().collect();
        for key in keys {
            if !measures.contains(&key) || color_changed {
                mapping.shift_remove(&key);
                color_changed = true;
            }
        }
    }

    if !by_dimension {
        let palette = schema.colors();
        for (index, alias) in measures.iter().enumerate() {
            if !mapping.contains_key(alias) {
                mapping.insert(alias.clone(), palette[index % palette.len()].to_owned());
            }
        }
    }

    *mapping_array = mapping
        .iter()
        .map(|(alias, color)| ColorMappingEntry {
            alias: alias.clone(),
            color: color.clone(),
        })
        .collect();
}

/// Re-resolves custom BY_VALUE ranges after a redraw changed the data bounds.
///
/// Gradient stops rescale proportionally to the new max; section ranges keep
/// their colors but re-derive the boundaries from the new bounds.
pub fn reapply_custom_ranges(option: &mut VisualOption, dataset: &ResultDataset) {
    use crate::core::option::ColorCustomMode;

    let max_value = option.max_value.unwrap_or(dataset.info.max_value);

    if let ColorOption::ByValue {
        ranges,
        visual_gradations,
        custom_mode: Some(ColorCustomMode::Gradient),
        ..
    } = &mut option.color
    {
        let prev_max = ranges
            .last()
            .and_then(|range| range.value)
            .unwrap_or(max_value);
        for range in ranges.iter_mut().chain(visual_gradations.iter_mut()) {
            if let Some(value) = range.value {
                range.value = Some(if value < prev_max && prev_max != 0.0 {
                    (max_value * (value / prev_max)).round()
                } else {
                    max_value
                });
            }
        }
        return;
    }

    let colors: Vec<String> = match &option.color {
        ColorOption::ByValue {
            ranges,
            custom_mode: Some(ColorCustomMode::Section),
            ..
        } if !ranges.is_empty() => {
            let mut colors: Vec<String> =
                ranges.iter().map(|range| range.color.clone()).collect();
            colors.reverse();
            colors
        }
        ColorOption::ByValue { schema, .. } => schema
            .colors()
            .iter()
            .map(|&color| color.to_owned())
            .collect(),
        _ => return,
    };

    let derived = set_measure_color_range(option, dataset, &colors);
    if let ColorOption::ByValue {
        ranges,
        visual_gradations,
        custom_mode,
        ..
    } = &mut option.color
    {
        *ranges = derived;
        if custom_mode.is_none() {
            visual_gradations.clear();
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
