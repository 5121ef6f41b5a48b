//! Shared test utilities: fabricated document roots.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = TestSite::new();
//! site.capture("amc", "20240601-1000", 1_000, &["mobile", "original"], 2560);
//! let config = site.config();
//! ```

use crate::config::HeroConfig;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Write a real image of the given size; format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]));
    img.save(path).unwrap();
}

/// Set a file's modification time to `secs` after the epoch.
pub fn set_mtime(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// A temporary document root laid out like the production site.
pub struct TestSite {
    pub root: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Config pointing at this site with stock everything else.
    pub fn config(&self) -> HeroConfig {
        HeroConfig {
            base_path: self.path().to_string_lossy().to_string(),
            ..HeroConfig::default()
        }
    }

    pub fn camera_dir(&self, camera: &str) -> PathBuf {
        let dir = self.path().join("images").join(camera);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write a capture: the discovery file (mtime `mtime`), plus a WebP and
    /// JPEG file for each label. Fixed-width labels get empty files; the
    /// `original` label gets real images `original_width` pixels wide.
    pub fn capture(
        &self,
        camera: &str,
        stem: &str,
        mtime: u64,
        labels: &[&str],
        original_width: u32,
    ) {
        let dir = self.camera_dir(camera);
        for label in labels {
            for ext in ["webp", "jpg"] {
                let path = dir.join(format!("{stem}-{label}.{ext}"));
                if *label == "original" {
                    write_image(&path, original_width, original_width / 2);
                } else {
                    fs::write(&path, b"").unwrap();
                }
            }
        }
        let discovery = dir.join(format!("{stem}-original.webp"));
        if !discovery.exists() {
            fs::write(&discovery, b"").unwrap();
        }
        set_mtime(&discovery, mtime);
    }

    /// Write a single file under the camera directory.
    pub fn touch(&self, camera: &str, filename: &str) -> PathBuf {
        let path = self.camera_dir(camera).join(filename);
        fs::write(&path, b"").unwrap();
        path
    }

    pub fn write_weather(&self, json: &str) {
        let dir = self.path().join("wx");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("summary.json"), json).unwrap();
    }
}
