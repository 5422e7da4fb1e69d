//! SPM global intensity metric
//!
//! For each volume of a 4D series the metric thresholds voxels at one eighth
//! of the volume mean and averages the voxels above that threshold. A frame
//! whose value departs from its neighbours is a candidate outlier in fMRI
//! quality control.

use std::path::Path;

use ndarray::{Array4, ArrayBase, Axis, Data, Dimension};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::nifti_io::{load_nifti_4d, read_nifti_4d_file};
use crate::utils::threshold::{mean_above, mean_fraction_threshold};

/// Parameters for the SPM global metric
#[derive(Clone, Debug)]
pub struct SpmGlobalParams {
    /// The threshold is mean / threshold_divisor (default 8, as in SPM)
    pub threshold_divisor: f64,
}

impl Default for SpmGlobalParams {
    fn default() -> Self {
        Self {
            threshold_divisor: 8.0,
        }
    }
}

/// SPM global metric for `vol`
///
/// # Arguments
/// * `vol` - Image data, usually one 3D volume (any shape is accepted)
///
/// # Returns
/// Mean of the voxels strictly above `mean(vol) / 8`. NaN when no voxel
/// exceeds the threshold, e.g. for an all-zero volume.
pub fn spm_global<S, D>(vol: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    spm_global_with_params(vol, &SpmGlobalParams::default())
}

/// SPM global metric with a configurable threshold divisor
pub fn spm_global_with_params<S, D>(vol: &ArrayBase<S, D>, params: &SpmGlobalParams) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let threshold = mean_fraction_threshold(vol, params.threshold_divisor);
    mean_above(vol, threshold)
}

/// SPM global metric for every volume of an in-memory 4D series
///
/// Returns one value per index of the last (time) axis, in order.
pub fn spm_globals(data: &Array4<f64>) -> Vec<f64> {
    spm_globals_with_params(data, &SpmGlobalParams::default())
}

pub fn spm_globals_with_params(data: &Array4<f64>, params: &SpmGlobalParams) -> Vec<f64> {
    spm_globals_with_progress(data, params, |_, _| {})
}

/// Per-volume metric with progress callback
///
/// `progress_callback(done, total)` is called after each volume.
pub fn spm_globals_with_progress<F>(
    data: &Array4<f64>,
    params: &SpmGlobalParams,
    mut progress_callback: F,
) -> Vec<f64>
where
    F: FnMut(usize, usize),
{
    let n_volumes = data.len_of(Axis(3));
    let mut globals = Vec::with_capacity(n_volumes);

    for (t, vol) in data.axis_iter(Axis(3)).enumerate() {
        let g = spm_global_with_params(&vol, params);
        if g.is_nan() {
            warn!(volume = t, "no voxel above threshold, SPM global is NaN");
        } else {
            trace!(volume = t, global = g);
        }
        globals.push(g);
        progress_callback(t + 1, n_volumes);
    }

    debug!(n_volumes, "computed SPM globals");
    globals
}

/// SPM global metric for each volume in the 4D image file `path`
///
/// Loader failures (missing file, malformed NIfTI, non-4D image) are
/// returned unchanged; no values are produced in that case.
pub fn get_spm_globals(path: &Path) -> Result<Vec<f64>> {
    let img = read_nifti_4d_file(path)?;
    Ok(spm_globals(&img.data))
}

/// Same as [`get_spm_globals`] for an in-memory .nii or .nii.gz buffer
pub fn get_spm_globals_from_bytes(bytes: &[u8]) -> Result<Vec<f64>> {
    let img = load_nifti_4d(bytes)?;
    Ok(spm_globals(&img.data))
}
