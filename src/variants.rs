//! Image formats and the responsive breakpoint table.
//!
//! The capture pipeline writes every snapshot once per breakpoint and format:
//!
//! ```text
//! images/amc/
//! ├── 20240601-1000-original.webp   # discovery file
//! ├── 20240601-1000-mobile-sm.webp
//! ├── 20240601-1000-mobile-sm.jpg
//! ├── ...
//! └── 20240601-1000-original.jpg
//! ```
//!
//! The table is ordered smallest to largest and ends with the `original`
//! sentinel, whose width is read from the file rather than configured.
//! Table order is srcset order, and the last WebP entry is the `<img>`
//! fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the breakpoint whose width is probed from the file.
pub const ORIGINAL_LABEL: &str = "original";

/// Encoded image format of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    WebP,
    Jpeg,
}

impl ImageFormat {
    /// Formats in the order their `<source>` elements are emitted.
    pub const ALL: [ImageFormat; 2] = [ImageFormat::WebP, ImageFormat::Jpeg];

    /// File extension used by the capture pipeline.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::WebP => "webp",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// MIME type for the `<source type>` attribute.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::WebP => "image/webp",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Width of a breakpoint: configured, or discovered from the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointWidth {
    Fixed(u32),
    Discover,
}

/// One row of the breakpoint table.
///
/// In TOML a missing `width` means "discover from file":
///
/// ```toml
/// [[breakpoints]]
/// label = "tablet"
/// width = 768
///
/// [[breakpoints]]
/// label = "original"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl Breakpoint {
    pub fn fixed(label: &str, width: u32) -> Self {
        Self {
            label: label.to_string(),
            width: Some(width),
        }
    }

    pub fn discover(label: &str) -> Self {
        Self {
            label: label.to_string(),
            width: None,
        }
    }

    pub fn target_width(&self) -> BreakpointWidth {
        match self.width {
            Some(w) => BreakpointWidth::Fixed(w),
            None => BreakpointWidth::Discover,
        }
    }
}

/// The stock breakpoint table, smallest to largest.
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::fixed("mobile-sm", 400),
        Breakpoint::fixed("mobile", 480),
        Breakpoint::fixed("tablet-sm", 600),
        Breakpoint::fixed("tablet", 768),
        Breakpoint::fixed("tablet-lg", 900),
        Breakpoint::fixed("desktop", 1024),
        Breakpoint::fixed("desktop-lg", 1200),
        Breakpoint::fixed("desktop-xl", 1440),
        Breakpoint::fixed("mobile-2x", 800),
        Breakpoint::fixed("desktop-2x", 1600),
        Breakpoint::fixed("desktop-4k", 1920),
        Breakpoint::discover(ORIGINAL_LABEL),
    ]
}

/// A (label, width, format) rendition a stem may have on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVariant<'a> {
    pub label: &'a str,
    pub width: BreakpointWidth,
    pub format: ImageFormat,
}

impl ImageVariant<'_> {
    /// Filename of this variant for `stem`, e.g. `snap-tablet.webp`.
    pub fn filename(&self, stem: &str) -> String {
        format!("{}-{}.{}", stem, self.label, self.format.extension())
    }
}

/// Every candidate variant in table order, WebP before JPEG per label.
pub fn candidate_variants(breakpoints: &[Breakpoint]) -> Vec<ImageVariant<'_>> {
    breakpoints
        .iter()
        .flat_map(|bp| {
            ImageFormat::ALL.into_iter().map(move |format| ImageVariant {
                label: bp.label.as_str(),
                width: bp.target_width(),
                format,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_extensions_and_mime() {
        assert_eq!(ImageFormat::WebP.extension(), "webp");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::WebP.mime_type(), "image/webp");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn default_table_ends_with_original() {
        let table = default_breakpoints();
        assert_eq!(table.len(), 12);
        assert_eq!(table[0], Breakpoint::fixed("mobile-sm", 400));
        let last = table.last().unwrap();
        assert_eq!(last.label, ORIGINAL_LABEL);
        assert_eq!(last.target_width(), BreakpointWidth::Discover);
    }

    #[test]
    fn variant_filename() {
        let table = vec![Breakpoint::fixed("tablet", 768)];
        let names: Vec<String> = candidate_variants(&table)
            .iter()
            .map(|v| v.filename("snap"))
            .collect();
        assert_eq!(names, vec!["snap-tablet.webp", "snap-tablet.jpg"]);
    }

    #[test]
    fn candidates_are_label_major_webp_first() {
        let table = vec![Breakpoint::fixed("a", 1), Breakpoint::discover("b")];
        let candidates = candidate_variants(&table);
        let order: Vec<(&str, ImageFormat)> =
            candidates.iter().map(|v| (v.label, v.format)).collect();
        assert_eq!(
            order,
            vec![
                ("a", ImageFormat::WebP),
                ("a", ImageFormat::Jpeg),
                ("b", ImageFormat::WebP),
                ("b", ImageFormat::Jpeg),
            ]
        );
        assert_eq!(candidates[3].width, BreakpointWidth::Discover);
    }

    #[test]
    fn breakpoint_toml_without_width_is_discover() {
        let bp: Breakpoint = toml::from_str(r#"label = "original""#).unwrap();
        assert_eq!(bp.target_width(), BreakpointWidth::Discover);
    }
}
