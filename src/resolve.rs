//! Latest-capture discovery and variant resolution.
//!
//! Given a camera, find the newest `*-original.webp` in its image directory,
//! take its stem, and list which breakpoint variants of that stem exist on
//! disk:
//!
//! ```text
//! images/amc/
//! ├── 0600-original.webp      mtime 06:00
//! ├── 1000-original.webp      mtime 10:00   ← newest, stem = "1000"
//! ├── 1000-mobile.webp        ✓ 480w
//! ├── 1000-mobile.jpg         ✓ 480w
//! ├── 1000-original.jpg       ✓ width probed from file
//! └── ...
//! ```
//!
//! Nothing here is fatal. A missing directory, an empty listing, an I/O
//! error, or a stem without encoded variants all become an [`Unavailable`]
//! reason, and the markup layer renders a placeholder. A failed dimension
//! probe drops just that one variant.

use crate::camera::Camera;
use crate::config::HeroConfig;
use crate::probe::DimensionProbe;
use crate::variants::{Breakpoint, BreakpointWidth, ImageFormat, candidate_variants};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, warn};

/// Suffix of the discovery file written once per capture.
const DISCOVERY_SUFFIX: &str = "-original.webp";

/// Why a camera has nothing to show.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    #[error("image directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("no captured image in {0}")]
    NoBaseImage(PathBuf),
    #[error("no encoded variants for stem '{stem}' in {dir}")]
    NoEncodedVariants { dir: PathBuf, stem: String },
}

impl Unavailable {
    /// Placeholder text shown instead of the picture.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Unavailable::MissingDirectory(_) | Unavailable::NoBaseImage(_) => {
                "No images available"
            }
            Unavailable::NoEncodedVariants { .. } => "No valid images found",
        }
    }
}

/// A variant that exists on disk, with a concrete width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariant {
    pub label: String,
    pub format: ImageFormat,
    pub width: u32,
    /// Web path, e.g. `/images/amc/1000-mobile.webp`.
    pub url: String,
}

impl ResolvedVariant {
    /// `srcset` candidate string: `<url> <width>w`.
    pub fn srcset_entry(&self) -> String {
        format!("{} {}w", self.url, self.width)
    }
}

/// The newest capture of a camera and its available variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub stem: String,
    /// Breakpoint table order, WebP before JPEG within a label.
    pub variants: Vec<ResolvedVariant>,
}

impl ResolvedAsset {
    /// Variants of one format, in breakpoint table order.
    pub fn of_format(&self, format: ImageFormat) -> Vec<&ResolvedVariant> {
        self.variants.iter().filter(|v| v.format == format).collect()
    }

    /// Comma-joined `srcset` value for one format, `None` if it has no variants.
    pub fn srcset(&self, format: ImageFormat) -> Option<String> {
        let entries: Vec<String> = self
            .of_format(format)
            .into_iter()
            .map(ResolvedVariant::srcset_entry)
            .collect();
        (!entries.is_empty()).then(|| entries.join(", "))
    }

    /// URL of the largest WebP variant (the last one in table order).
    pub fn fallback_src(&self) -> Option<&str> {
        self.variants
            .iter()
            .rev()
            .find(|v| v.format == ImageFormat::WebP)
            .map(|v| v.url.as_str())
    }
}

/// Finds the latest capture for a camera and the variants it has on disk.
pub struct AssetResolver<P> {
    images_root: PathBuf,
    images_url: String,
    breakpoints: Vec<Breakpoint>,
    probe: P,
}

impl<P: DimensionProbe> AssetResolver<P> {
    pub fn new(
        images_root: PathBuf,
        images_url: &str,
        breakpoints: Vec<Breakpoint>,
        probe: P,
    ) -> Self {
        Self {
            images_root,
            images_url: images_url.trim_end_matches('/').to_string(),
            breakpoints,
            probe,
        }
    }

    pub fn from_config(config: &HeroConfig, probe: P) -> Self {
        Self::new(
            config.images_root(),
            &config.paths.images_url,
            config.breakpoints.clone(),
            probe,
        )
    }

    pub fn resolve(&self, camera: &Camera) -> Result<ResolvedAsset, Unavailable> {
        let dir = self.images_root.join(&camera.id);
        if !dir.is_dir() {
            debug!(camera = %camera.id, dir = %dir.display(), "image directory missing");
            return Err(Unavailable::MissingDirectory(dir));
        }

        let stem = latest_stem(&dir).ok_or_else(|| Unavailable::NoBaseImage(dir.clone()))?;
        debug!(camera = %camera.id, %stem, "latest capture");

        let web_dir = format!("{}/{}", self.images_url, camera.id);
        let mut variants = Vec::new();
        for candidate in candidate_variants(&self.breakpoints) {
            let filename = candidate.filename(&stem);
            let path = dir.join(&filename);
            if !path.is_file() {
                continue;
            }
            let width = match candidate.width {
                BreakpointWidth::Fixed(w) => w,
                BreakpointWidth::Discover => match self.probe.identify(&path) {
                    Ok(dims) => dims.width,
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "dimension probe failed, skipping variant"
                        );
                        continue;
                    }
                },
            };
            variants.push(ResolvedVariant {
                label: candidate.label.to_string(),
                format: candidate.format,
                width,
                url: format!("{}/{}", web_dir, filename),
            });
        }

        if variants.is_empty() {
            debug!(camera = %camera.id, %stem, "no encoded variants");
            return Err(Unavailable::NoEncodedVariants { dir, stem });
        }
        Ok(ResolvedAsset { stem, variants })
    }
}

/// Stem of the most recently modified discovery file in `dir`.
///
/// A bare `-original.webp` has no stem and is ignored. Symlinked discovery
/// files count with their target's type and mtime.
///
/// Equal timestamps pick whichever entry the directory listing yields last.
fn latest_stem(dir: &Path) -> Option<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "cannot list image directory");
            return None;
        }
    };

    entries
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let stem = name.strip_suffix(DISCOVERY_SUFFIX)?.to_string();
            if stem.is_empty() {
                return None;
            }
            // Follows symlinks, like the per-variant `is_file` checks.
            let meta = fs::metadata(entry.path()).ok()?;
            if !meta.is_file() {
                return None;
            }
            let modified: SystemTime = meta.modified().ok()?;
            Some((modified, stem))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, stem)| stem)
}
