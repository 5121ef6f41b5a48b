//! CLI output formatting for the `check` command.
//!
//! ```text
//! amc Amcrest Weather Camera
//!     Latest: 20240601-1000
//!     webp: mobile-sm 400w, mobile 480w, original 2560w
//!     jpg: mobile-sm 400w, mobile 480w
//! reo Reolink Camera
//!     Unavailable: image directory not found: public_html/images/reo
//!
//! Weather
//!     beach: 72°, 64%
//! ```
//!
//! Each `format_*` function is pure and returns lines; `print_*` wrappers
//! write them to stdout.

use crate::camera::Camera;
use crate::resolve::{ResolvedAsset, Unavailable};
use crate::variants::ImageFormat;
use crate::weather::{WeatherError, WeatherSnapshot};

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Lines describing one camera's resolution result.
pub fn format_camera_check(
    camera: &Camera,
    result: &Result<ResolvedAsset, Unavailable>,
) -> Vec<String> {
    let mut lines = vec![format!("{} {}", camera.id, camera.name)];
    match result {
        Ok(asset) => {
            lines.push(format!("{}Latest: {}", indent(1), asset.stem));
            for format in ImageFormat::ALL {
                let variants = asset.of_format(format);
                let listed = if variants.is_empty() {
                    "none".to_string()
                } else {
                    variants
                        .iter()
                        .map(|v| format!("{} {}w", v.label, v.width))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                lines.push(format!("{}{}: {}", indent(1), format, listed));
            }
        }
        Err(reason) => {
            lines.push(format!("{}Unavailable: {}", indent(1), reason));
        }
    }
    lines
}

/// Lines describing the weather snapshot as the badges will see it.
pub fn format_weather_check(
    snapshot: &Result<WeatherSnapshot, WeatherError>,
    location: &str,
) -> Vec<String> {
    let mut lines = vec!["Weather".to_string()];
    match snapshot {
        Ok(snapshot) => match snapshot.reading(location) {
            Some(reading) => lines.push(format!(
                "{}{}: {}, {}",
                indent(1),
                location,
                reading
                    .temp_f
                    .map(|t| format!("{}°", t.round() as i64))
                    .unwrap_or_else(|| "no temperature".to_string()),
                reading
                    .humidity
                    .map(|h| format!("{}%", h.round() as i64))
                    .unwrap_or_else(|| "no humidity".to_string()),
            )),
            None => lines.push(format!("{}{}: no reading", indent(1), location)),
        },
        Err(e) => lines.push(format!("{}Unavailable: {}", indent(1), e)),
    }
    lines
}

pub fn print_camera_check(camera: &Camera, result: &Result<ResolvedAsset, Unavailable>) {
    for line in format_camera_check(camera, result) {
        println!("{}", line);
    }
}

pub fn print_weather_check(snapshot: &Result<WeatherSnapshot, WeatherError>, location: &str) {
    for line in format_weather_check(snapshot, location) {
        println!("{}", line);
    }
}
