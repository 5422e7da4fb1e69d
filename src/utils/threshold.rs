//! Intensity thresholding helpers
//!
//! Provides the mean-fraction threshold used by the SPM global metric and the
//! mean of the voxels that survive it.

use ndarray::{ArrayBase, Data, Dimension};

/// Threshold at a fixed fraction of the mean intensity
///
/// # Arguments
/// * `data` - Input array of any shape (usually one 3D volume)
/// * `divisor` - The mean is divided by this value (SPM uses 8)
///
/// # Returns
/// `mean(data) / divisor`, or NaN for an empty array
pub fn mean_fraction_threshold<S, D>(data: &ArrayBase<S, D>, divisor: f64) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    match data.mean() {
        Some(mean) => mean / divisor,
        None => f64::NAN,
    }
}

/// Mean of the elements strictly greater than `threshold`
///
/// Returns NaN when nothing exceeds the threshold (including a NaN threshold).
pub fn mean_above<S, D>(data: &ArrayBase<S, D>, threshold: f64) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (sum, count) = data
        .iter()
        .filter(|&&v| v > threshold)
        .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));

    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}
