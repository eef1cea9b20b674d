use clap::Parser;
use log::{debug, error, info};
use thiserror::Error;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use spherepath::config::{ConfigError, RenderConfig, RenderJob};
use spherepath::output::{save_image, OutputError};
use spherepath::presets::Preset;
use spherepath::{render, Camera, Integrator, RenderSettings, Sampler, Scene};

/// Sampler stream reserved for scene generation; rows use streams 0..height.
const SCENE_STREAM: u64 = u64::MAX;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("SpherePath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let file_config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            RenderConfig::load(path)?
        }
        None => RenderConfig::default(),
    };
    let job = file_config.overlay(args.to_config()).resolve()?;

    let seed = job.seed.unwrap_or_else(rand::random);
    info!("Scene: {:?}, seed {}", job.scene, seed);

    let preset = build_preset(&job, seed);
    let camera_settings = job.camera_settings(preset.camera)?;
    debug!("Camera: {:?}", camera_settings);

    let camera = Camera::new(&camera_settings);
    let integrator = Integrator::new(job.max_depth, preset.background);
    let settings = RenderSettings {
        width: job.width,
        height: job.height,
        samples_per_pixel: job.samples_per_pixel,
        seed,
    };

    let image = render(&preset.scene, &camera, &integrator, &settings);
    save_image(&image, &job.output)?;
    Ok(())
}

/// Build the selected preset, then apply sphere and background overrides.
fn build_preset(job: &RenderJob, seed: u64) -> Preset {
    let mut sampler = Sampler::for_stream(seed, SCENE_STREAM);
    let mut preset = job.scene.build(&mut sampler);

    if let Some(spheres) = &job.spheres {
        info!("Using {} spheres from configuration", spheres.len());
        preset.scene = Scene::from(spheres.clone());
    }
    if let Some(background) = job.background {
        preset.background = background;
    }
    preset
}
