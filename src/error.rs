//! Error type shared by the loader and the metric pipeline

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpmError>;

#[derive(Debug, Error)]
pub enum SpmError {
    /// The image file could not be read from disk
    #[error("failed to read file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding failure reported by the NIfTI reader, passed through as-is
    #[error(transparent)]
    Nifti(#[from] nifti::NiftiError),

    #[error("gzip compression failed: {0}")]
    Gzip(#[source] std::io::Error),

    #[error("expected a {expected}D image, got {found}D")]
    Dimensionality { expected: usize, found: usize },
}
