//! The hero renderer: request in, HTML fragment out.
//!
//! Each render lists the camera directory, checks each variant, probes the
//! original's width, reads the weather file, and reads the clock. Nothing
//! is cached between renders.

use crate::camera::CameraRegistry;
use crate::config::HeroConfig;
use crate::markup::{MarkupBuilder, RenderOptions};
use crate::probe::{DimensionProbe, ImageProbe};
use crate::resolve::AssetResolver;
use crate::shortcode::RenderRequest;
use crate::weather::WeatherReader;
use chrono::{Local, NaiveDateTime};
use tracing::debug;

/// Renders hero blocks against one configured document root.
pub struct HeroRenderer<P = ImageProbe> {
    cameras: CameraRegistry,
    resolver: AssetResolver<P>,
    weather: WeatherReader,
    markup: MarkupBuilder,
    image_class: String,
}

impl HeroRenderer<ImageProbe> {
    pub fn new(config: &HeroConfig) -> Self {
        Self::with_probe(config, ImageProbe::new())
    }
}

impl<P: DimensionProbe> HeroRenderer<P> {
    pub fn with_probe(config: &HeroConfig, probe: P) -> Self {
        Self {
            cameras: CameraRegistry::from_config(config),
            resolver: AssetResolver::from_config(config, probe),
            weather: WeatherReader::new(config.weather_path()),
            markup: MarkupBuilder::from_config(config),
            image_class: config.markup.image_class.clone(),
        }
    }

    /// Render at the server's local time.
    pub fn render(&self, request: &RenderRequest) -> String {
        self.render_at(request, Local::now().naive_local())
    }

    /// Render as if the local clock read `now`.
    pub fn render_at(&self, request: &RenderRequest, now: NaiveDateTime) -> String {
        let camera = self.cameras.resolve(&request.camera);
        let alt_text = if request.alt_text.is_empty() {
            camera.name.as_str()
        } else {
            request.alt_text.as_str()
        };
        let options = RenderOptions {
            show_temp: request.show_temp,
            show_humidity: request.show_humidity,
            ..RenderOptions::hero(alt_text, &self.image_class)
        };

        let asset = self.resolver.resolve(&camera);
        let weather = self.weather.read();
        debug!(
            camera = %camera.id,
            available = asset.is_ok(),
            weather = weather.is_some(),
            "rendering hero block"
        );
        self.markup
            .build(&camera, &asset, weather.as_ref(), &options, now)
    }

    pub fn cameras(&self) -> &CameraRegistry {
        &self.cameras
    }

    pub fn resolver(&self) -> &AssetResolver<P> {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TestSite;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn alt_text_defaults_to_camera_name() {
        let site = TestSite::new();
        site.capture("reo", "snap", 1_000, &["mobile"], 0);
        let renderer = HeroRenderer::new(&site.config());

        let html = renderer.render_at(&RenderRequest::parse(r#"camera="reo""#), at(10));
        assert!(html.contains(r#"alt="Reolink Camera""#));
        assert!(html.contains("reolink_day_20240601.mp4"));
    }

    #[test]
    fn explicit_alt_text_wins() {
        let site = TestSite::new();
        site.capture("amc", "snap", 1_000, &["mobile"], 0);
        let renderer = HeroRenderer::new(&site.config());

        let html = renderer.render_at(&RenderRequest::parse(r#"alt_text="Pier""#), at(10));
        assert!(html.contains(r#"alt="Pier""#));
    }

    #[test]
    fn hero_options_are_eager_high() {
        let site = TestSite::new();
        site.capture("amc", "snap", 1_000, &["mobile"], 0);
        let renderer = HeroRenderer::new(&site.config());

        let html = renderer.render_at(&RenderRequest::default(), at(10));
        assert!(html.contains(r#"loading="eager""#));
        assert!(html.contains(r#"fetchpriority="high""#));
        assert!(html.contains(r#"class="hero-image""#));
    }

    #[test]
    fn unknown_camera_renders_placeholder_with_default_video() {
        let site = TestSite::new();
        let renderer = HeroRenderer::new(&site.config());

        let html = renderer.render_at(&RenderRequest::parse("camera=garage"), at(20));
        assert!(html.contains("<p>No images available</p>"));
        assert!(html.contains("amcrest_evening_20240601.mp4"));
    }

    #[test]
    fn weather_badges_from_configured_location() {
        let site = TestSite::new();
        site.capture("amc", "snap", 1_000, &["mobile"], 0);
        site.write_weather(
            r#"{"local": {"beach": {"temp_f": 68.6, "humidity": 71.2}, "dock": {"temp_f": 50}}}"#,
        );
        let renderer = HeroRenderer::new(&site.config());

        let html = renderer.render_at(&RenderRequest::default(), at(7));
        assert!(html.contains(">69°<"));
        assert!(html.contains("Humidity 71%"));
        assert!(html.contains("amcrest_night_20240601.mp4"));
    }
}
