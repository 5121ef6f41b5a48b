//! # camhero
//!
//! Renders the responsive "hero image" block of a webcam site: the newest
//! capture of a camera as a `<picture>` with WebP and JPEG srcsets, live
//! temperature and humidity badges, and a link to the timelapse for the
//! current time of day.
//!
//! ```text
//! RenderRequest ─┬─ CameraRegistry ── AssetResolver ──┐
//!                │                    (dir scan,       │
//!                │                     mtime, probe)   ├─ MarkupBuilder ─→ HTML
//!                ├─ WeatherReader ─────────────────────┤
//!                └─ clock ── video URL ────────────────┘
//! ```
//!
//! Every render is a pure function of the files on disk, the weather file,
//! and the clock. Nothing is cached. Nothing that goes wrong at render time
//! is fatal: a camera without images renders a placeholder, missing weather
//! renders zero badges, and a variant whose width cannot be probed is
//! left out of the srcset.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`render`] | [`HeroRenderer`](render::HeroRenderer), wires everything per request |
//! | [`resolve`] | Latest-capture discovery and on-disk variant resolution |
//! | [`weather`] | Weather snapshot reader |
//! | [`markup`] | HTML assembly with Maud |
//! | [`video`] | Time-of-day bucket and timelapse URL |
//! | [`variants`] | Image formats and the ordered breakpoint table |
//! | [`probe`] | Image dimension probing behind a trait |
//! | [`camera`] | Camera registry and id sanitization |
//! | [`shortcode`] | Named render attributes |
//! | [`config`] | `camhero.toml` loading, merging, validation |
//! | [`style`] | The stylesheet for the rendered classes |
//! | [`output`] | CLI report formatting |

pub mod camera;
pub mod config;
pub mod markup;
pub mod output;
pub mod probe;
pub mod render;
pub mod resolve;
pub mod shortcode;
pub mod style;
pub mod variants;
pub mod video;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_helpers;
