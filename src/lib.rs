//! SPM-Globals: per-volume global intensity for fMRI quality control
//!
//! This crate computes the SPM "global" metric for every volume of a 4D
//! NIfTI time series. Volumes whose global value departs from the rest of
//! the run are candidate outliers.
//!
//! # Modules
//! - `globals`: The SPM global metric and per-volume aggregation
//! - `utils`: Thresholding helpers
//! - `nifti_io`: 4D NIfTI loading and writing
//! - `error`: Error type

pub mod error;
pub mod globals;
pub mod utils;

// I/O modules
pub mod nifti_io;

pub use error::{Result, SpmError};
pub use globals::{
    get_spm_globals, get_spm_globals_from_bytes, spm_global, spm_global_with_params, spm_globals,
    spm_globals_with_params, spm_globals_with_progress, SpmGlobalParams,
};
