//! X/Y spatial distribution analysis of labeled mask objects.
//!
//! For each labeled object, foreground pixel counts are binned into
//! histograms along the X and Y axes, and summary statistics of the axis
//! distribution are recorded as observations.

use rayon::prelude::*;

use phenopix_core::{
    BinaryMask, Error, LabeledMask, Observation, ObservationValue, Observations, Result,
};

const METHOD: &str = "phenopix.analyze.distribution";

/// Binning options for distribution analysis.
#[derive(Debug, Clone, Copy)]
pub struct DistributionOptions {
    /// Bin width in pixels along X.
    pub bin_size_x: usize,
    /// Bin width in pixels along Y.
    pub bin_size_y: usize,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            bin_size_x: 100,
            bin_size_y: 100,
        }
    }
}

/// Per-axis histogram and statistics for a single object.
#[derive(Debug, Clone)]
struct AxisDistribution {
    histogram: Vec<f64>,
    axis: Vec<f64>,
    mean: f64,
    median: f64,
    std: f64,
}

impl AxisDistribution {
    fn undefined() -> Self {
        Self {
            histogram: Vec::new(),
            axis: Vec::new(),
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
        }
    }
}

/// Analyze the X and Y distribution of labeled objects and record the
/// results into `observations`.
///
/// Objects are labels `1..=n_labels` of `labeled_mask`. With one label the
/// sample name is `sample_label`; with several, `{sample_label}{i}`.
/// Empty objects record NaN statistics and empty histograms.
///
/// # Errors
/// Returns [`Error::ConfigError`] when a bin size is zero.
pub fn analyze_distribution(
    labeled_mask: &LabeledMask,
    n_labels: u32,
    opts: DistributionOptions,
    sample_label: &str,
    observations: &mut Observations,
) -> Result<()> {
    if opts.bin_size_x == 0 || opts.bin_size_y == 0 {
        return Err(Error::ConfigError("bin sizes must be nonzero".into()));
    }

    let results: Vec<(u32, AxisDistribution, AxisDistribution)> = (1..=n_labels)
        .into_par_iter()
        .map(|label| {
            let mask = labeled_mask.binary_for_label(label);
            let (x_dist, y_dist) = analyze_object(&mask, opts);
            (label, x_dist, y_dist)
        })
        .collect();

    for (label, x_dist, y_dist) in results {
        let sample = if n_labels == 1 {
            sample_label.to_string()
        } else {
            format!("{sample_label}{label}")
        };
        record_axis(observations, &sample, "X", &x_dist);
        record_axis(observations, &sample, "Y", &y_dist);
    }

    Ok(())
}

/// Bin one object's foreground pixels along both axes.
fn analyze_object(mask: &BinaryMask, opts: DistributionOptions) -> (AxisDistribution, AxisDistribution) {
    let width = mask.width();
    let height = mask.height();
    let num_bins_x = width / opts.bin_size_x;
    let num_bins_y = height / opts.bin_size_y;

    if mask.count_nonzero() == 0 || num_bins_x == 0 || num_bins_y == 0 {
        return (AxisDistribution::undefined(), AxisDistribution::undefined());
    }

    let mut y_histogram = vec![0.0f64; num_bins_y];
    let mut x_histogram = vec![0.0f64; num_bins_x];
    let bytes = mask.as_slice();

    // Trailing partial slices land in the last bin (index clamped).
    let mut y = 0;
    while y < height {
        let end = (y + opts.bin_size_y).min(height);
        let white: usize = bytes[y * width..end * width]
            .iter()
            .filter(|&&v| v != 0)
            .count();
        let bin = (y / opts.bin_size_y).min(num_bins_y - 1);
        #[allow(clippy::cast_precision_loss)]
        {
            y_histogram[bin] = white as f64;
        }
        y += opts.bin_size_y;
    }

    let mut x = 0;
    while x < width {
        let end = (x + opts.bin_size_x).min(width);
        let mut white = 0usize;
        for row in 0..height {
            white += bytes[row * width + x..row * width + end]
                .iter()
                .filter(|&&v| v != 0)
                .count();
        }
        let bin = (x / opts.bin_size_x).min(num_bins_x - 1);
        #[allow(clippy::cast_precision_loss)]
        {
            x_histogram[bin] = white as f64;
        }
        x += opts.bin_size_x;
    }

    #[allow(clippy::cast_precision_loss)]
    let x_axis: Vec<f64> = (0..num_bins_x)
        .map(|i| (i * opts.bin_size_x) as f64)
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let y_axis: Vec<f64> = (0..num_bins_y)
        .map(|i| (i * opts.bin_size_y) as f64)
        .collect();

    let x_dist = AxisDistribution {
        mean: weighted_mean(&x_histogram, &x_axis),
        median: median(&x_axis),
        std: population_std(&x_axis),
        histogram: x_histogram,
        axis: x_axis,
    };
    let y_dist = AxisDistribution {
        mean: weighted_mean(&y_histogram, &y_axis),
        median: median(&y_axis),
        std: population_std(&y_axis),
        histogram: y_histogram,
        axis: y_axis,
    };
    (x_dist, y_dist)
}

fn record_axis(observations: &mut Observations, sample: &str, axis: &str, dist: &AxisDistribution) {
    observations.add_observation(
        sample,
        &format!("{axis}_frequencies"),
        Observation {
            trait_name: format!("{axis} frequencies"),
            method: METHOD.into(),
            scale: "frequency".into(),
            value: ObservationValue::FloatList(dist.histogram.clone()),
            label: ObservationValue::FloatList(dist.axis.clone()),
        },
    );
    observations.add_observation(
        sample,
        &format!("{axis}_distribution_mean"),
        Observation {
            trait_name: format!("{axis} distribution mean"),
            method: METHOD.into(),
            scale: "pixels".into(),
            value: ObservationValue::Float(dist.mean),
            label: ObservationValue::Text("pixel".into()),
        },
    );
    observations.add_observation(
        sample,
        &format!("{axis}_distribution_median"),
        Observation {
            trait_name: format!("{axis} distribution median"),
            method: METHOD.into(),
            scale: "pixel".into(),
            value: ObservationValue::Float(dist.median),
            label: ObservationValue::Text("pixel".into()),
        },
    );
    observations.add_observation(
        sample,
        &format!("{axis}_distribution_std"),
        Observation {
            trait_name: format!("{axis} distribution standard deviation"),
            method: METHOD.into(),
            scale: "pixel".into(),
            value: ObservationValue::Float(dist.std),
            label: ObservationValue::Text("pixel".into()),
        },
    );
}

/// Mean of axis positions weighted by histogram counts.
fn weighted_mean(histogram: &[f64], axis: &[f64]) -> f64 {
    let total: f64 = histogram.iter().sum();
    if total == 0.0 {
        return f64::NAN;
    }
    let weighted: f64 = histogram.iter().zip(axis).map(|(h, a)| h * a).sum();
    weighted / total
}

/// Median of the axis positions.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation of the axis positions.
fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_and_std() {
        assert_relative_eq!(median(&[0.0, 10.0, 20.0]), 10.0);
        assert_relative_eq!(median(&[0.0, 10.0, 20.0, 30.0]), 15.0);
        assert_relative_eq!(population_std(&[0.0, 10.0]), 5.0);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_weighted_mean() {
        // all weight on the second bin
        assert_relative_eq!(weighted_mean(&[0.0, 4.0], &[0.0, 10.0]), 10.0);
        assert!(weighted_mean(&[0.0, 0.0], &[0.0, 10.0]).is_nan());
    }
}
