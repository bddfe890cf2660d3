//! Integration tests for distribution analysis.

use approx::assert_relative_eq;
use phenopix_analyze::{analyze_distribution, DistributionOptions};
use phenopix_core::{LabeledMask, ObservationValue, Observations};

/// Build a 20x10 labeled mask with one 4x4 object of label 1 near the left.
fn single_object_mask() -> LabeledMask {
    let (width, height) = (20, 10);
    let mut data = vec![0u32; width * height];
    for y in 2..6 {
        for x in 1..5 {
            data[y * width + x] = 1;
        }
    }
    LabeledMask::from_vec(width, height, data).unwrap()
}

#[test]
fn records_frequencies_and_statistics() {
    let mask = single_object_mask();
    let mut observations = Observations::new();
    let opts = DistributionOptions {
        bin_size_x: 5,
        bin_size_y: 5,
    };

    analyze_distribution(&mask, 1, opts, "plant", &mut observations).unwrap();

    // 4 X bins of width 5; all 16 object pixels sit in the first bin
    let x_freq = observations.get("plant", "X_frequencies").unwrap();
    assert_eq!(
        x_freq.value,
        ObservationValue::FloatList(vec![16.0, 0.0, 0.0, 0.0])
    );
    assert_eq!(
        x_freq.label,
        ObservationValue::FloatList(vec![0.0, 5.0, 10.0, 15.0])
    );

    // 2 Y bins of width 5; the object straddles rows 2..6
    let y_freq = observations.get("plant", "Y_frequencies").unwrap();
    assert_eq!(y_freq.value, ObservationValue::FloatList(vec![12.0, 4.0]));

    // mean over X weights the bin starts by counts: all weight at 0
    let x_mean = observations.get("plant", "X_distribution_mean").unwrap();
    match x_mean.value {
        ObservationValue::Float(v) => assert_relative_eq!(v, 0.0),
        ref other => panic!("unexpected value {other:?}"),
    }

    // median of the X bin positions [0, 5, 10, 15]
    let x_median = observations.get("plant", "X_distribution_median").unwrap();
    match x_median.value {
        ObservationValue::Float(v) => assert_relative_eq!(v, 7.5),
        ref other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn empty_object_records_nan() {
    let mask = LabeledMask::from_vec(10, 10, vec![0u32; 100]).unwrap();
    let mut observations = Observations::new();
    let opts = DistributionOptions {
        bin_size_x: 5,
        bin_size_y: 5,
    };

    analyze_distribution(&mask, 1, opts, "plant", &mut observations).unwrap();

    let mean = observations.get("plant", "Y_distribution_mean").unwrap();
    match mean.value {
        ObservationValue::Float(v) => assert!(v.is_nan()),
        ref other => panic!("unexpected value {other:?}"),
    }
    let freq = observations.get("plant", "Y_frequencies").unwrap();
    assert_eq!(freq.value, ObservationValue::FloatList(Vec::new()));
}

#[test]
fn multiple_labels_get_suffixed_samples() {
    let mut data = vec![0u32; 100];
    data[0] = 1;
    data[99] = 2;
    let mask = LabeledMask::from_vec(10, 10, data).unwrap();
    let mut observations = Observations::new();
    let opts = DistributionOptions {
        bin_size_x: 5,
        bin_size_y: 5,
    };

    analyze_distribution(&mask, 2, opts, "plant", &mut observations).unwrap();

    assert!(observations.get("plant1", "X_frequencies").is_some());
    assert!(observations.get("plant2", "X_frequencies").is_some());
    assert!(observations.get("plant", "X_frequencies").is_none());
}

#[test]
fn zero_bin_size_is_rejected() {
    let mask = LabeledMask::from_vec(4, 4, vec![0u32; 16]).unwrap();
    let mut observations = Observations::new();
    let opts = DistributionOptions {
        bin_size_x: 0,
        bin_size_y: 5,
    };
    assert!(analyze_distribution(&mask, 1, opts, "plant", &mut observations).is_err());
}
