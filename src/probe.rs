//! Image dimension probing.
//!
//! The [`DimensionProbe`] trait is the one seam between the resolver and
//! image decoding. The production implementation, [`ImageProbe`], reads
//! only the header via `image::image_dimensions`, so probing a 4K original
//! costs a few hundred bytes of I/O rather than a full decode.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read dimensions of {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Reads pixel dimensions from an image file.
pub trait DimensionProbe {
    fn identify(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}

/// Header-only probe backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProbe;

impl ImageProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DimensionProbe for ImageProbe {
    fn identify(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| match e {
            image::ImageError::IoError(io) => ProbeError::Io(io),
            other => ProbeError::Decode {
                path: path.display().to_string(),
                reason: other.to_string(),
            },
        })?;
        Ok(Dimensions { width, height })
    }
}
