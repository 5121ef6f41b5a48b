//! Hero block HTML assembly.
//!
//! Output shape (whitespace added):
//!
//! ```html
//! <a class="hero-link" href="/timelapse/videos/amcrest_day_20240601.mp4">
//!   <div class="hero-frame">
//!     <picture>
//!       <source srcset="… 400w, … 2560w" type="image/webp" sizes="…">
//!       <source srcset="… 400w, … 2560w" type="image/jpeg" sizes="…">
//!       <img src="…-original.webp" alt="…" loading="eager" fetchpriority="high"
//!            class="hero-image" style="width: 100%; height: auto;">
//!     </picture>
//!     <div class="hero-temp">72°</div>
//!     <div class="hero-humidity">Humidity 64%</div>
//!   </div>
//! </a>
//! ```
//!
//! An unavailable camera renders `<p>No images available</p>` (or
//! `No valid images found`) in place of the `<picture>`; the link and
//! badges stay. Badges read 0 when weather is missing.
//!
//! All interpolation goes through [maud](https://maud.lambda.xyz/), so every
//! attribute and text value is HTML-escaped.

use crate::camera::Camera;
use crate::config::HeroConfig;
use crate::resolve::{ResolvedAsset, Unavailable};
use crate::variants::ImageFormat;
use crate::video;
use crate::weather::WeatherSnapshot;
use chrono::NaiveDateTime;
use maud::{Markup, html};
use tracing::warn;

/// `loading` attribute of the `<img>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Loading {
    Eager,
    #[default]
    Lazy,
}

impl Loading {
    pub fn as_str(self) -> &'static str {
        match self {
            Loading::Eager => "eager",
            Loading::Lazy => "lazy",
        }
    }
}

/// `fetchpriority` attribute of the `<img>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPriority {
    High,
    #[default]
    Auto,
}

impl FetchPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchPriority::High => "high",
            FetchPriority::Auto => "auto",
        }
    }
}

/// Per-render display options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub loading: Loading,
    pub fetch_priority: FetchPriority,
    pub class: String,
    pub show_temp: bool,
    pub show_humidity: bool,
    pub alt_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            loading: Loading::Lazy,
            fetch_priority: FetchPriority::Auto,
            class: "hero-image".to_string(),
            show_temp: true,
            show_humidity: true,
            alt_text: String::new(),
        }
    }
}

impl RenderOptions {
    /// Above-the-fold settings: eager load, high fetch priority.
    pub fn hero(alt_text: &str, class: &str) -> Self {
        Self {
            loading: Loading::Eager,
            fetch_priority: FetchPriority::High,
            class: class.to_string(),
            alt_text: alt_text.to_string(),
            ..Self::default()
        }
    }
}

/// Round a badge value half away from zero; missing reads as 0.
fn badge_value(value: Option<f64>) -> i64 {
    value.map(|v| v.round() as i64).unwrap_or(0)
}

/// Assembles the hero fragment.
#[derive(Debug, Clone)]
pub struct MarkupBuilder {
    sizes: String,
    videos_url: String,
    weather_location: String,
}

impl MarkupBuilder {
    pub fn new(sizes: &str, videos_url: &str, weather_location: &str) -> Self {
        Self {
            sizes: sizes.to_string(),
            videos_url: videos_url.to_string(),
            weather_location: weather_location.to_string(),
        }
    }

    pub fn from_config(config: &HeroConfig) -> Self {
        Self::new(
            &config.markup.sizes,
            &config.paths.videos_url,
            &config.weather.location,
        )
    }

    pub fn build(
        &self,
        camera: &Camera,
        asset: &Result<ResolvedAsset, Unavailable>,
        weather: Option<&WeatherSnapshot>,
        options: &RenderOptions,
        now: NaiveDateTime,
    ) -> String {
        self.render(camera, asset, weather, options, now)
            .into_string()
    }

    fn render(
        &self,
        camera: &Camera,
        asset: &Result<ResolvedAsset, Unavailable>,
        weather: Option<&WeatherSnapshot>,
        options: &RenderOptions,
        now: NaiveDateTime,
    ) -> Markup {
        let video = video::video_url(&self.videos_url, &camera.video_prefix, now);
        let reading = weather.and_then(|w| w.reading(&self.weather_location));
        let temp = badge_value(reading.and_then(|r| r.temp_f));
        let humidity = badge_value(reading.and_then(|r| r.humidity));

        html! {
            a.hero-link href=(video) {
                div.hero-frame {
                    @match asset {
                        Ok(found) => {
                            (self.picture(found, options))
                        },
                        Err(reason) => {
                            p { (reason.placeholder()) }
                        },
                    }
                    @if options.show_temp {
                        div.hero-temp { (temp) "°" }
                    }
                    @if options.show_humidity {
                        div.hero-humidity { "Humidity " (humidity) "%" }
                    }
                }
            }
        }
    }

    /// The `<picture>` element: WebP source, JPEG source, fallback `<img>`.
    pub fn picture(&self, asset: &ResolvedAsset, options: &RenderOptions) -> Markup {
        let webp = asset.srcset(ImageFormat::WebP);
        let jpeg = asset.srcset(ImageFormat::Jpeg);
        let src = asset.fallback_src().unwrap_or_else(|| {
            warn!(stem = %asset.stem, "no WebP variant, fallback <img> has empty src");
            ""
        });

        html! {
            picture {
                @if let Some(srcset) = &webp {
                    source srcset=(srcset) type=(ImageFormat::WebP.mime_type()) sizes=(self.sizes);
                }
                @if let Some(srcset) = &jpeg {
                    source srcset=(srcset) type=(ImageFormat::Jpeg.mime_type()) sizes=(self.sizes);
                }
                img src=(src)
                    alt=(options.alt_text)
                    loading=(options.loading.as_str())
                    fetchpriority=(options.fetch_priority.as_str())
                    class=(options.class)
                    style="width: 100%; height: auto;";
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
