//! NIfTI file I/O for 4D time series
//!
//! Loads `.nii` / `.nii.gz` images into an `Array4<f64>` with axes (x, y, z, t)
//! and writes synthetic series back out as single-file NIfTI-1.

use std::io::{Cursor, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use ndarray::{Array4, Ix4};
use nifti::{InMemNiftiObject, IntoNdArray, NiftiObject};
use tracing::debug;

use crate::error::{Result, SpmError};

/// 4D NIfTI data decoded to f64
#[derive(Debug, Clone)]
pub struct Nifti4d {
    /// Intensities with axes (x, y, z, t), scaling already applied
    pub data: Array4<f64>,
    /// Dimensions (nx, ny, nz, nt)
    pub dims: (usize, usize, usize, usize),
    /// Voxel sizes in mm
    pub voxel_size: (f64, f64, f64),
    /// Repetition time in seconds (pixdim[4])
    pub tr: f64,
}

impl Nifti4d {
    /// Number of volumes along the time axis
    pub fn n_volumes(&self) -> usize {
        self.dims.3
    }
}

/// Check if bytes are gzip compressed
fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

/// Load a 4D NIfTI image from bytes
///
/// Supports both .nii and .nii.gz content (gzip is auto-detected).
/// Images that do not decode to exactly four axes are rejected.
pub fn load_nifti_4d(bytes: &[u8]) -> Result<Nifti4d> {
    let obj = if is_gzip(bytes) {
        InMemNiftiObject::from_reader(GzDecoder::new(Cursor::new(bytes)))?
    } else {
        InMemNiftiObject::from_reader(Cursor::new(bytes))?
    };

    let pixdim = obj.header().pixdim;
    let voxel_size = (pixdim[1] as f64, pixdim[2] as f64, pixdim[3] as f64);
    let tr = pixdim[4] as f64;

    let array = obj.into_volume().into_ndarray::<f64>()?;
    let found = array.ndim();
    let data = array
        .into_dimensionality::<Ix4>()
        .map_err(|_| SpmError::Dimensionality { expected: 4, found })?;

    let dims = data.dim();
    debug!(?dims, ?voxel_size, tr, "decoded 4D NIfTI image");

    Ok(Nifti4d {
        data,
        dims,
        voxel_size,
        tr,
    })
}

/// Read a 4D NIfTI file from a filesystem path
pub fn read_nifti_4d_file(path: &Path) -> Result<Nifti4d> {
    let bytes = std::fs::read(path).map_err(|source| SpmError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), size = bytes.len(), "read NIfTI file");
    load_nifti_4d(&bytes)
}

/// Save a 4D series as NIfTI bytes
///
/// Writes an uncompressed single-file NIfTI-1 image with float32 voxels.
pub fn save_nifti_4d(
    data: &Array4<f64>,
    voxel_size: (f64, f64, f64),
    tr: f64,
) -> Result<Vec<u8>> {
    let (nx, ny, nz, nt) = data.dim();
    let (vsx, vsy, vsz) = voxel_size;

    let mut header = [0u8; 348];

    // sizeof_hdr = 348
    header[0..4].copy_from_slice(&348i32.to_le_bytes());

    // dim[0..7]
    let dim: [i16; 8] = [4, nx as i16, ny as i16, nz as i16, nt as i16, 1, 1, 1];
    for (i, &d) in dim.iter().enumerate() {
        let offset = 40 + i * 2;
        header[offset..offset + 2].copy_from_slice(&d.to_le_bytes());
    }

    // datatype = 16 (FLOAT32), bitpix = 32
    header[70..72].copy_from_slice(&16i16.to_le_bytes());
    header[72..74].copy_from_slice(&32i16.to_le_bytes());

    let pixdim: [f32; 8] = [1.0, vsx as f32, vsy as f32, vsz as f32, tr as f32, 1.0, 1.0, 1.0];
    for (i, &p) in pixdim.iter().enumerate() {
        let offset = 76 + i * 4;
        header[offset..offset + 4].copy_from_slice(&p.to_le_bytes());
    }

    // vox_offset = 352 (header + 4 bytes extension)
    header[108..112].copy_from_slice(&352.0f32.to_le_bytes());

    // scl_slope = 1.0, scl_inter = 0.0
    header[112..116].copy_from_slice(&1.0f32.to_le_bytes());
    header[116..120].copy_from_slice(&0.0f32.to_le_bytes());

    // xyzt_units: mm + seconds
    header[123] = 2 | 8;

    header[344..348].copy_from_slice(b"n+1\0");

    let mut buffer = Vec::with_capacity(352 + data.len() * 4);
    buffer.extend_from_slice(&header);
    buffer.extend_from_slice(&[0u8; 4]);

    // Reversed axes iterate with x fastest, matching NIfTI's Fortran order
    for &val in data.t().iter() {
        buffer.extend_from_slice(&(val as f32).to_le_bytes());
    }

    Ok(buffer)
}

/// Save a 4D series as gzipped NIfTI bytes (.nii.gz)
pub fn save_nifti_4d_gz(
    data: &Array4<f64>,
    voxel_size: (f64, f64, f64),
    tr: f64,
) -> Result<Vec<u8>> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let uncompressed = save_nifti_4d(data, voxel_size, tr)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&uncompressed).map_err(SpmError::Gzip)?;
    encoder.finish().map_err(SpmError::Gzip)
}

/// Save a 4D series to a file
///
/// If the path ends with .nii.gz, the file is gzip compressed.
/// Otherwise it is saved as uncompressed .nii.
pub fn save_nifti_4d_to_file(
    path: &Path,
    data: &Array4<f64>,
    voxel_size: (f64, f64, f64),
    tr: f64,
) -> Result<()> {
    let bytes = if path.to_string_lossy().ends_with(".nii.gz") {
        save_nifti_4d_gz(data, voxel_size, tr)?
    } else {
        save_nifti_4d(data, voxel_size, tr)?
    };

    std::fs::write(path, &bytes).map_err(|source| SpmError::Io {
        path: path.to_path_buf(),
        source,
    })
}
