//! Camera registry.
//!
//! A camera id names both the image subdirectory and, through the registry,
//! the display name (default alt text) and the timelapse video prefix.
//!
//! Requested ids come from page markup, so they are sanitized before they
//! ever touch a path: only ASCII letters, digits, `-` and `_` survive.
//! An id that is not configured still gets its own image directory but
//! borrows the default camera's name and video prefix.

use crate::config::HeroConfig;
use serde::{Deserialize, Serialize};

/// A configured camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Camera {
    /// Identifier and image subdirectory name.
    pub id: String,
    /// Human-readable name, used as default alt text.
    pub name: String,
    /// Prefix of this camera's timelapse video files.
    pub video_prefix: String,
}

impl Camera {
    pub fn new(id: &str, name: &str, video_prefix: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            video_prefix: video_prefix.to_string(),
        }
    }
}

pub fn default_cameras() -> Vec<Camera> {
    vec![
        Camera::new("amc", "Amcrest Weather Camera", "amcrest"),
        Camera::new("reo", "Reolink Camera", "reolink"),
    ]
}

/// Strip everything but ASCII letters, digits, `-` and `_`.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Lookup over the configured cameras.
#[derive(Debug, Clone)]
pub struct CameraRegistry {
    cameras: Vec<Camera>,
    default_id: String,
}

impl CameraRegistry {
    pub fn from_config(config: &HeroConfig) -> Self {
        Self {
            cameras: config.cameras.clone(),
            default_id: config.default_camera.clone(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn default_camera(&self) -> Camera {
        self.get(&self.default_id).cloned().unwrap_or_else(|| {
            // validate() guarantees the default exists; an unvalidated
            // config falls back to the first camera.
            self.cameras
                .first()
                .cloned()
                .unwrap_or_else(|| Camera::new(&self.default_id, "", &self.default_id))
        })
    }

    /// Resolve a requested id to a camera.
    pub fn resolve(&self, requested: &str) -> Camera {
        let id = sanitize_id(requested.trim());
        if id.is_empty() {
            return self.default_camera();
        }
        match self.get(&id) {
            Some(cam) => cam.clone(),
            None => {
                let fallback = self.default_camera();
                Camera {
                    id,
                    name: fallback.name,
                    video_prefix: fallback.video_prefix,
                }
            }
        }
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }
}
