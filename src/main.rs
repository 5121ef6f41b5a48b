use camhero::weather::WeatherReader;
use camhero::{config, output, render::HeroRenderer, shortcode::RenderRequest, style};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "camhero")]
#[command(about = "Render a responsive webcam hero block")]
#[command(long_about = "\
Render a responsive webcam hero block

Finds the newest capture for a camera, emits a <picture> with WebP and JPEG
srcsets, overlays the current temperature and humidity, and links the block
to today's timelapse for the current time of day.

Document root layout:

  <base>/
  ├── images/
  │   ├── amc/
  │   │   ├── 20240601-1000-original.webp    # newest wins (by mtime)
  │   │   ├── 20240601-1000-mobile.webp
  │   │   ├── 20240601-1000-mobile.jpg
  │   │   └── ...
  │   └── reo/
  └── wx/
      └── summary.json                       # local.beach.temp_f / humidity

Render attributes (KEY=VALUE):
  camera          camera id (default: configured default camera)
  show_temp       temperature badge, true/false (default: true)
  show_humidity   humidity badge, true/false (default: true)
  alt_text        image alt text (default: camera name)

Set RUST_LOG=debug to see why a camera renders a placeholder.
Run 'camhero gen-config' to generate a documented camhero.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used if it does not exist)
    #[arg(long, default_value = "camhero.toml", global = true)]
    config: PathBuf,

    /// Document root, overrides `base_path` from the config
    #[arg(long, global = true)]
    base: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the hero block HTML fragment
    Render {
        /// Render attributes, e.g. camera=reo show_temp=false
        #[arg(value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
        /// Render as of this local time (YYYY-MM-DDTHH:MM:SS) instead of now
        #[arg(long)]
        at: Option<NaiveDateTime>,
        /// Prepend the <style> block
        #[arg(long)]
        with_style: bool,
    },
    /// Report what each camera would render and the current weather reading
    Check {
        /// Camera ids to check (default: all configured cameras)
        cameras: Vec<String>,
    },
    /// Print the stylesheet for the hero block
    Css,
    /// Print a stock camhero.toml with all options documented
    GenConfig,
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Css => {
            print!("{}", style::STYLESHEET);
            return Ok(());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        _ => {}
    }

    let mut site_config = config::load_config(&cli.config)?;
    if let Some(base) = &cli.base {
        site_config.base_path = base.to_string_lossy().to_string();
    }
    let renderer = HeroRenderer::new(&site_config);

    match cli.command {
        Command::Render {
            attrs,
            at,
            with_style,
        } => {
            let request = RenderRequest::from_attrs(attrs);
            let html = match at {
                Some(now) => renderer.render_at(&request, now),
                None => renderer.render(&request),
            };
            if with_style {
                println!("{}", style::style_tag().into_string());
            }
            println!("{}", html);
        }
        Command::Check { cameras } => {
            let ids: Vec<String> = if cameras.is_empty() {
                renderer
                    .cameras()
                    .cameras()
                    .iter()
                    .map(|c| c.id.clone())
                    .collect()
            } else {
                cameras
            };
            for id in &ids {
                let camera = renderer.cameras().resolve(id);
                let result = renderer.resolver().resolve(&camera);
                output::print_camera_check(&camera, &result);
            }
            println!();
            let snapshot = WeatherReader::new(site_config.weather_path()).read_snapshot();
            output::print_weather_check(&snapshot, &site_config.weather.location);
        }
        Command::Css | Command::GenConfig => {}
    }

    Ok(())
}
