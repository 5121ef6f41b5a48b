//! Renderer configuration.
//!
//! Handles loading, validating, and merging `camhero.toml`. Stock defaults
//! describe the standard site layout; a user file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_path = "public_html"   # Document root the paths below are relative to
//! default_camera = "amc"      # Camera used when none is requested
//!
//! [paths]
//! images_dir = "images"                # <base>/<images_dir>/<camera>/
//! images_url = "/images"               # URL prefix for the same directory
//! weather_file = "wx/summary.json"     # Weather snapshot, relative to base
//! videos_url = "/timelapse/videos"     # URL prefix for timelapse videos
//!
//! [markup]
//! sizes = "(max-width: 480px) 100vw, (max-width: 768px) 100vw, (max-width: 1024px) 100vw, 1200px"
//! image_class = "hero-image"
//!
//! [weather]
//! location = "beach"          # Key under `local` in the weather snapshot
//!
//! [[cameras]]
//! id = "amc"
//! name = "Amcrest Weather Camera"
//! video_prefix = "amcrest"
//!
//! [[breakpoints]]
//! label = "mobile-sm"
//! width = 400
//! # ...
//! [[breakpoints]]
//! label = "original"          # no width: read from the image file
//! ```
//!
//! Arrays (`cameras`, `breakpoints`) replace the stock list as a whole.
//! Unknown keys are rejected to catch typos early.

use crate::camera::{self, Camera};
use crate::variants::{self, Breakpoint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Renderer configuration loaded from `camhero.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Document root that image, weather, and video paths hang off.
    pub base_path: String,
    /// Camera id used when a request names none.
    pub default_camera: String,
    /// Directory names and URL prefixes.
    pub paths: PathsConfig,
    /// Attributes of the generated `<picture>`.
    pub markup: MarkupConfig,
    /// Which weather reading feeds the badges.
    pub weather: WeatherConfig,
    /// Known cameras.
    pub cameras: Vec<Camera>,
    /// Ordered breakpoint table, smallest to largest.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            base_path: "public_html".to_string(),
            default_camera: "amc".to_string(),
            paths: PathsConfig::default(),
            markup: MarkupConfig::default(),
            weather: WeatherConfig::default(),
            cameras: camera::default_cameras(),
            breakpoints: variants::default_breakpoints(),
        }
    }
}

impl HeroConfig {
    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.base_path)
    }

    /// Filesystem directory holding every camera's image subdirectory.
    pub fn images_root(&self) -> PathBuf {
        self.base_dir().join(&self.paths.images_dir)
    }

    /// Filesystem path of the weather snapshot.
    pub fn weather_path(&self) -> PathBuf {
        self.base_dir().join(&self.paths.weather_file)
    }

    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cameras.is_empty() {
            return Err(ConfigError::Validation("cameras must not be empty".into()));
        }
        let mut ids = HashSet::new();
        for cam in &self.cameras {
            if cam.id.is_empty() || camera::sanitize_id(&cam.id) != cam.id {
                return Err(ConfigError::Validation(format!(
                    "camera id '{}' may only contain letters, digits, '-' and '_'",
                    cam.id
                )));
            }
            if !ids.insert(cam.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate camera id '{}'",
                    cam.id
                )));
            }
        }
        if !ids.contains(self.default_camera.as_str()) {
            return Err(ConfigError::Validation(format!(
                "default_camera '{}' is not a configured camera",
                self.default_camera
            )));
        }
        if self.breakpoints.is_empty() {
            return Err(ConfigError::Validation(
                "breakpoints must not be empty".into(),
            ));
        }
        let mut labels = HashSet::new();
        for bp in &self.breakpoints {
            if bp.label.is_empty() {
                return Err(ConfigError::Validation(
                    "breakpoint labels must not be empty".into(),
                ));
            }
            if !labels.insert(bp.label.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate breakpoint label '{}'",
                    bp.label
                )));
            }
            if bp.width == Some(0) {
                return Err(ConfigError::Validation(format!(
                    "breakpoint '{}' width must be non-zero",
                    bp.label
                )));
            }
        }
        Ok(())
    }
}

/// Directory names and URL prefixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Image directory relative to `base_path`.
    pub images_dir: String,
    /// URL prefix that serves `images_dir`.
    pub images_url: String,
    /// Weather snapshot relative to `base_path`.
    pub weather_file: String,
    /// URL prefix of the timelapse video directory.
    pub videos_url: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images_dir: "images".to_string(),
            images_url: "/images".to_string(),
            weather_file: "wx/summary.json".to_string(),
            videos_url: "/timelapse/videos".to_string(),
        }
    }
}

/// Attributes of the generated `<picture>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// `sizes` descriptor shared by both `<source>` elements.
    pub sizes: String,
    /// CSS class of the `<img>` element.
    pub image_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            sizes: "(max-width: 480px) 100vw, (max-width: 768px) 100vw, (max-width: 1024px) 100vw, 1200px"
                .to_string(),
            image_class: "hero-image".to_string(),
        }
    }
}

/// Which weather reading feeds the badges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Key under `local` in the weather snapshot.
    pub location: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "beach".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(HeroConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<HeroConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: HeroConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`, falling back to stock defaults
/// when it does not exist.
pub fn load_config(path: &Path) -> Result<HeroConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `camhero.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# camhero configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Document root. Image, weather, and video paths are relative to it.
base_path = "public_html"

# Camera rendered when a request does not name one.
default_camera = "amc"

# ---------------------------------------------------------------------------
# Paths
# ---------------------------------------------------------------------------
[paths]
# Captured images live in <base_path>/<images_dir>/<camera id>/.
images_dir = "images"
# URL prefix the web server maps onto images_dir.
images_url = "/images"
# Weather snapshot written by the ingest process.
weather_file = "wx/summary.json"
# URL prefix of the timelapse videos (<prefix>_<bucket>_<YYYYMMDD>.mp4).
videos_url = "/timelapse/videos"

# ---------------------------------------------------------------------------
# Markup
# ---------------------------------------------------------------------------
[markup]
# sizes descriptor shared by the WebP and JPEG <source> elements.
sizes = "(max-width: 480px) 100vw, (max-width: 768px) 100vw, (max-width: 1024px) 100vw, 1200px"
# CSS class of the <img> element.
image_class = "hero-image"

# ---------------------------------------------------------------------------
# Weather
# ---------------------------------------------------------------------------
[weather]
# Reading under "local" in the snapshot that feeds the badges.
location = "beach"

# ---------------------------------------------------------------------------
# Cameras (replacing this list replaces all cameras)
# ---------------------------------------------------------------------------
[[cameras]]
id = "amc"
name = "Amcrest Weather Camera"
video_prefix = "amcrest"

[[cameras]]
id = "reo"
name = "Reolink Camera"
video_prefix = "reolink"

# ---------------------------------------------------------------------------
# Breakpoints, smallest to largest. A breakpoint without a width has its
# width read from the image file. The last WebP variant found is the
# <img> fallback.
# ---------------------------------------------------------------------------
[[breakpoints]]
label = "mobile-sm"
width = 400

[[breakpoints]]
label = "mobile"
width = 480

[[breakpoints]]
label = "tablet-sm"
width = 600

[[breakpoints]]
label = "tablet"
width = 768

[[breakpoints]]
label = "tablet-lg"
width = 900

[[breakpoints]]
label = "desktop"
width = 1024

[[breakpoints]]
label = "desktop-lg"
width = 1200

[[breakpoints]]
label = "desktop-xl"
width = 1440

[[breakpoints]]
label = "mobile-2x"
width = 800

[[breakpoints]]
label = "desktop-2x"
width = 1600

[[breakpoints]]
label = "desktop-4k"
width = 1920

[[breakpoints]]
label = "original"
"##
}
