//! Common test utilities for spm-globals integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ndarray::{s, Array4};
use spm_globals::nifti_io::save_nifti_4d_to_file;

/// Synthetic fMRI-like series: a bright sphere ("brain") on a dim background
///
/// Tissue intensity is `tissue + t` for volume `t`, background is constant.
pub fn synthetic_series(
    dims: (usize, usize, usize, usize),
    background: f64,
    tissue: f64,
) -> Array4<f64> {
    let (nx, ny, nz, _) = dims;
    let (cx, cy, cz) = (nx as f64 / 2.0, ny as f64 / 2.0, nz as f64 / 2.0);
    let radius = nx.min(ny).min(nz) as f64 / 3.0;
    let r2 = radius * radius;

    Array4::from_shape_fn(dims, |(i, j, k, t)| {
        let dx = i as f64 - cx;
        let dy = j as f64 - cy;
        let dz = k as f64 - cz;
        if dx * dx + dy * dy + dz * dz <= r2 {
            tissue + t as f64
        } else {
            background
        }
    })
}

/// Multiply every voxel of volume `t` by `factor`
pub fn spike_volume(data: &mut Array4<f64>, t: usize, factor: f64) {
    data.slice_mut(s![.., .., .., t]).mapv_inplace(|v| v * factor);
}

/// Temporary NIfTI file removed on drop
pub struct TempNifti {
    pub path: PathBuf,
}

impl TempNifti {
    /// Write `data` to a uniquely named file in the system temp dir
    pub fn write(name: &str, data: &Array4<f64>) -> Self {
        let path = std::env::temp_dir().join(format!("spm_globals_{}_{}", std::process::id(), name));
        save_nifti_4d_to_file(&path, data, (2.0, 2.0, 2.0), 2.0)
            .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
        TempNifti { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempNifti {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

/// Compare two metric sequences at float32 storage precision, NaN == NaN
pub fn assert_globals_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "sequence lengths differ");
    for (t, (a, e)) in actual.iter().zip(expected).enumerate() {
        if e.is_nan() {
            assert!(a.is_nan(), "volume {}: expected NaN, got {}", t, a);
        } else {
            assert!(
                (a - e).abs() <= 1e-5 * e.abs().max(1.0),
                "volume {}: expected {}, got {}",
                t, e, a
            );
        }
    }
}
