//! Print the SPM global value of every volume in a 4D NIfTI file
//!
//! Usage: cargo run --release --example spm_globals -- <image.nii[.gz]>

use std::path::PathBuf;
use std::time::Instant;

use spm_globals::get_spm_globals;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: spm_globals <image.nii[.gz]>")?;

    let start = Instant::now();
    let globals = get_spm_globals(&path)?;
    tracing::info!(volumes = globals.len(), elapsed = ?start.elapsed(), "done");

    for g in &globals {
        println!("{}", g);
    }

    Ok(())
}
