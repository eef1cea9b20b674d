use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use spherepath::config::{CameraOverrides, RenderConfig};
use spherepath::presets::ScenePreset;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneArg {
    Original,
    Cover,
    Single,
    Room,
}

impl From<SceneArg> for ScenePreset {
    fn from(scene: SceneArg) -> Self {
        match scene {
            SceneArg::Original => ScenePreset::Original,
            SceneArg::Cover => ScenePreset::Cover,
            SceneArg::Single => ScenePreset::Single,
            SceneArg::Room => ScenePreset::Room,
        }
    }
}

/// Command line arguments structure using clap derive macros
///
/// Every render option is optional so that values from `--config` are only
/// replaced by flags that were actually given.
#[derive(Parser, Debug)]
#[command(name = "spherepath")]
#[command(about = "A Monte Carlo path tracer for scenes made of spheres")]
pub struct Args {
    /// JSON render configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels [default: 960]
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels [default: 720]
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel [default: 4]
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum number of bounces per path [default: 50]
    #[arg(long, short = 'd')]
    pub max_depth: Option<u32>,

    /// Seed for reproducible renders (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Built-in scene to render [default: original]
    #[arg(long, value_enum)]
    pub scene: Option<SceneArg>,

    /// Lens diameter for depth of field
    #[arg(long)]
    pub aperture: Option<f32>,

    /// Distance to the plane of perfect focus
    #[arg(long)]
    pub focus_dist: Option<f32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub vfov: Option<f32>,

    /// Output file path (.ppm or .png) [default: result.ppm]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Render options given on the command line, as a configuration layer.
    pub fn to_config(&self) -> RenderConfig {
        let camera = CameraOverrides {
            aperture: self.aperture,
            focus_dist: self.focus_dist,
            vfov: self.vfov,
            ..CameraOverrides::default()
        };

        RenderConfig {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            seed: self.seed,
            scene: self.scene.map(ScenePreset::from),
            camera: (camera != CameraOverrides::default()).then_some(camera),
            output: self.output.clone(),
            ..RenderConfig::default()
        }
    }
}
