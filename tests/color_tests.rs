use approx::assert_relative_eq;
use indexmap::IndexMap;
use vizspec::core::{
    ChartKind, ColorCustomMode, ColorOption, ColorPalette, ColorRange, ColorRangeKind,
    DataColumn, DatasetInfo, DrawTrigger, FieldRole, PivotField, ResultDataset, VisualOption,
};
use vizspec::pipeline::color::{reapply_custom_ranges, resolve_mapping, set_measure_color_range};

fn dataset(rows: usize, min: f64, max: f64) -> ResultDataset {
    ResultDataset {
        rows: (0..rows).map(|idx| format!("r{idx}")).collect(),
        columns: vec![DataColumn::new("m1", vec![min; rows])],
        categories: Vec::new(),
        info: DatasetInfo {
            min_value: min,
            max_value: max,
        },
    }
}

fn colors(list: &[&str]) -> Vec<String> {
    list.iter().map(|&color| color.to_owned()).collect()
}

#[test]
fn measure_ranges_step_down_from_the_max() {
    let option = VisualOption::new(ChartKind::Bar);
    let data = dataset(3, 0.0, 30.0);

    let ranges = set_measure_color_range(&option, &data, &colors(&["#a", "#b", "#c"]));

    assert_eq!(ranges.len(), 3);
    // the top piece is open above the max
    assert_eq!(ranges[0].color, "#c");
    assert_relative_eq!(ranges[0].fixed_min.unwrap(), 30.0);
    assert_eq!(ranges[0].fixed_max, None);

    assert_eq!(ranges[1].color, "#b");
    assert_relative_eq!(ranges[1].fixed_min.unwrap(), 15.0);
    assert_relative_eq!(ranges[1].fixed_max.unwrap(), 30.0);

    // the bottom piece is open below
    assert_eq!(ranges[2].color, "#a");
    assert_eq!(ranges[2].fixed_min, None);
    assert_relative_eq!(ranges[2].fixed_max.unwrap(), 15.0);
}

#[test]
fn measure_ranges_shrink_to_the_rendered_positions() {
    let option = VisualOption::new(ChartKind::Bar);
    let data = dataset(2, 0.0, 10.0);

    let ranges = set_measure_color_range(
        &option,
        &data,
        &colors(&["#a", "#b", "#c", "#d", "#e"]),
    );

    // two rows render, so only two pieces are cut
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].color, "#b");
    assert_eq!(ranges[1].color, "#a");
}

#[test]
fn pie_counts_slices_instead_of_rows() {
    let option = VisualOption::new(ChartKind::Pie);
    let mut data = dataset(1, 0.0, 10.0);
    data.columns[0].value = vec![1.0, 2.0, 3.0];

    let ranges = set_measure_color_range(&option, &data, &colors(&["#a", "#b", "#c", "#d"]));
    assert_eq!(ranges.len(), 3);
}

#[test]
fn boundaries_round_to_one_decimal() {
    let option = VisualOption::new(ChartKind::Bar);
    let data = dataset(3, 0.0, 10.0);

    let ranges = set_measure_color_range(&option, &data, &colors(&["#a", "#b", "#c"]));
    // step 10/2 = 5, boundaries land on .0 after rounding
    assert_relative_eq!(ranges[1].fixed_min.unwrap(), 5.0);

    let data = dataset(4, 0.0, 10.0);
    let ranges = set_measure_color_range(&option, &data, &colors(&["#a", "#b", "#c", "#d"]));
    // step 10/3 = 3.333..., rounded boundaries: 6.7 then 3.4
    assert_relative_eq!(ranges[1].fixed_min.unwrap(), 6.7);
    assert_relative_eq!(ranges[2].fixed_min.unwrap(), 3.4);
}

fn option_with_measures(measures: &[&str]) -> VisualOption {
    let mut option = VisualOption::new(ChartKind::Bar);
    option.field_measure_list = measures
        .iter()
        .map(|&name| PivotField::new(name, FieldRole::Measure))
        .collect();
    option
}

#[test]
fn mapping_seeds_palette_colors_in_shelf_order() {
    let mut option = option_with_measures(&["m1", "m2"]);
    resolve_mapping(&mut option, None);

    let palette = ColorPalette::Sc1.colors();
    let entries = option.color.mapping_array();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].alias, "m1");
    assert_eq!(entries[0].color, palette[0]);
    assert_eq!(entries[1].alias, "m2");
    assert_eq!(entries[1].color, palette[1]);
}

#[test]
fn mapping_drops_stale_measures_and_reseeds_the_rest() {
    let mut option = option_with_measures(&["m1", "m2"]);
    let mut mapping = IndexMap::new();
    mapping.insert("gone".to_owned(), "#111111".to_owned());
    mapping.insert("m2".to_owned(), "#222222".to_owned());
    option.color = ColorOption::BySeries {
        schema: ColorPalette::Sc1,
        mapping,
        mapping_array: Vec::new(),
        setting_use: true,
    };

    resolve_mapping(&mut option, None);

    // "gone" left the shelf; everything after it reseeds from the palette so
    // colors line up with shelf order again
    let palette = ColorPalette::Sc1.colors();
    let entries = option.color.mapping_array();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].alias, "m1");
    assert_eq!(entries[0].color, palette[0]);
    assert_eq!(entries[1].color, palette[1]);
}

#[test]
fn pivot_change_resets_the_mapping() {
    let mut option = option_with_measures(&["m1"]);
    let mut mapping = IndexMap::new();
    mapping.insert("m1".to_owned(), "#abcdef".to_owned());
    option.color = ColorOption::BySeries {
        schema: ColorPalette::Sc1,
        mapping,
        mapping_array: Vec::new(),
        setting_use: true,
    };

    resolve_mapping(&mut option, Some(DrawTrigger::ChangePivot));

    let entries = option.color.mapping_array();
    assert_eq!(entries[0].color, ColorPalette::Sc1.colors()[0]);
}

#[test]
fn dimension_mapping_is_kept_as_the_user_left_it() {
    let mut option = option_with_measures(&["m1"]);
    let mut mapping = IndexMap::new();
    mapping.insert("east".to_owned(), "#abcdef".to_owned());
    option.color = ColorOption::ByDimension {
        schema: ColorPalette::Sc1,
        target_field: Some("region".to_owned()),
        mapping,
        mapping_array: Vec::new(),
    };

    resolve_mapping(&mut option, None);

    // dimension values are not measures; no removal, no reseeding
    let entries = option.color.mapping_array();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].alias, "east");
    assert_eq!(entries[0].color, "#abcdef");
}

fn gradient_stop(value: f64) -> ColorRange {
    ColorRange {
        kind: ColorRangeKind::Gradient,
        color: "#fff".to_owned(),
        fixed_min: None,
        fixed_max: None,
        gt: None,
        lt: None,
        value: Some(value),
    }
}

#[test]
fn custom_gradient_stops_rescale_with_the_new_max() {
    let mut option = VisualOption::new(ChartKind::Bar);
    option.max_value = Some(20.0);
    option.color = ColorOption::ByValue {
        schema: ColorPalette::Vc1,
        ranges: vec![gradient_stop(5.0), gradient_stop(10.0)],
        visual_gradations: vec![gradient_stop(5.0)],
        custom_mode: Some(ColorCustomMode::Gradient),
    };

    reapply_custom_ranges(&mut option, &dataset(3, 0.0, 20.0));

    let ColorOption::ByValue {
        ranges,
        visual_gradations,
        ..
    } = &option.color
    else {
        panic!("color variant changed");
    };
    assert_eq!(ranges[0].value, Some(10.0));
    assert_eq!(ranges[1].value, Some(20.0));
    assert_eq!(visual_gradations[0].value, Some(10.0));
}

#[test]
fn custom_sections_keep_their_colors_over_new_bounds() {
    let mut option = VisualOption::new(ChartKind::Bar);
    option.color = ColorOption::ByValue {
        schema: ColorPalette::Vc1,
        ranges: vec![
            ColorRange::section("#top", Some(20.0), None, Some(20.0), None),
            ColorRange::section("#mid", Some(10.0), Some(20.0), Some(10.0), Some(20.0)),
            ColorRange::section("#low", None, Some(10.0), None, Some(10.0)),
        ],
        visual_gradations: Vec::new(),
        custom_mode: Some(ColorCustomMode::Section),
    };

    reapply_custom_ranges(&mut option, &dataset(3, 0.0, 40.0));

    let ColorOption::ByValue { ranges, .. } = &option.color else {
        panic!("color variant changed");
    };
    // boundaries re-derive from the new max, colors stay in place
    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].color, "#top");
    assert_relative_eq!(ranges[0].fixed_min.unwrap(), 40.0);
    assert_eq!(ranges[1].color, "#mid");
    assert_relative_eq!(ranges[1].fixed_min.unwrap(), 20.0);
    assert_eq!(ranges[2].color, "#low");
}

#[test]
fn default_value_ranges_rebuild_from_the_palette() {
    let mut option = VisualOption::new(ChartKind::Bar);
    option.color = ColorOption::ByValue {
        schema: ColorPalette::Vc1,
        ranges: Vec::new(),
        visual_gradations: vec![gradient_stop(5.0)],
        custom_mode: None,
    };

    reapply_custom_ranges(&mut option, &dataset(5, 0.0, 100.0));

    let ColorOption::ByValue {
        ranges,
        visual_gradations,
        ..
    } = &option.color
    else {
        panic!("color variant changed");
    };
    assert_eq!(ranges.len(), ColorPalette::Vc1.colors().len());
    assert!(visual_gradations.is_empty());
}
