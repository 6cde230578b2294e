use proptest::prelude::*;
use vizspec::core::normalize::{calculate_baseline, calculate_min_max};
use vizspec::core::{AxisGrid, DataColumn, DatasetInfo, ResultDataset};

fn dataset(values: Vec<f64>) -> ResultDataset {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in &values {
        min = min.min(value);
        max = max.max(value);
    }
    ResultDataset {
        rows: (0..values.len()).map(|idx| format!("r{idx}")).collect(),
        columns: vec![DataColumn::new("m1", values)],
        categories: Vec::new(),
        info: DatasetInfo {
            min_value: min,
            max_value: max,
        },
    }
}

proptest! {
    #[test]
    fn clamp_is_idempotent(
        values in prop::collection::vec(1.0f64..10_000.0, 1..32),
        min in 1.0f64..100.0,
        span in 1.0f64..10_000.0
    ) {
        let mut grid = AxisGrid {
            min: Some(min),
            max: Some(min + span),
            auto_scaled: false,
        };

        let mut once = dataset(values);
        calculate_min_max(&mut grid, &mut once);
        let mut twice = once.clone();
        calculate_min_max(&mut grid, &mut twice);

        prop_assert_eq!(once.columns, twice.columns);
    }

    #[test]
    fn clamped_values_stay_inside_window(
        values in prop::collection::vec(1.0f64..10_000.0, 1..32),
        min in 1.0f64..100.0,
        span in 1.0f64..10_000.0
    ) {
        let max = min + span;
        let mut grid = AxisGrid {
            min: Some(min),
            max: Some(max),
            auto_scaled: false,
        };

        let mut data = dataset(values);
        calculate_min_max(&mut grid, &mut data);

        for value in &data.columns[0].value {
            prop_assert!(*value >= min && *value <= max);
        }
    }

    #[test]
    fn baseline_shift_preserves_side_of_baseline(
        values in prop::collection::vec(-10_000.0f64..10_000.0, 1..32),
        baseline in 1.0f64..1_000.0
    ) {
        let mut data = dataset(values.clone());
        calculate_baseline(baseline, &mut data);

        for (raw, shifted) in values.iter().zip(&data.columns[0].value) {
            if *raw > 0.0 {
                prop_assert_eq!(*shifted, raw - baseline);
            } else {
                prop_assert!(*shifted <= 0.0);
            }
        }
    }
}
