//! Utility functions shared by the metric pipeline
//!
//! - Intensity thresholding (mean-fraction threshold, supra-threshold mean)

pub mod threshold;

pub use threshold::*;
