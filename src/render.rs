//! CPU render driver.
//!
//! Casts `samples_per_pixel` camera rays per pixel, averages their radiance
//! and gamma-corrects the result. Rows are rendered in parallel; each row owns
//! its own sampler stream derived from the seed, so a seed always reproduces
//! the same image regardless of scheduling.

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::integrator::Integrator;
use crate::random::Sampler;
use crate::scene::Scene;
use crate::vector::Color;

/// Gamma-corrected, unclamped f32 RGB image.
pub type RenderedImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Image size, sampling and seed for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Rendered image width in pixel count
    pub width: u32,
    /// Rendered image height in pixel count
    pub height: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Seed for all sampler streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 720,
            samples_per_pixel: 4,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Square-root tone curve applied per channel.
pub fn gamma_correct(color: Color) -> Color {
    Color::new(color.x.sqrt(), color.y.sqrt(), color.z.sqrt())
}

/// Render `scene` through `camera`.
///
/// Row `j` of the image plane is counted from the bottom and stored at image
/// row `height - 1 - j`, so the buffer reads top to bottom.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    integrator: &Integrator,
    settings: &RenderSettings,
) -> RenderedImage {
    let width = settings.width.max(1);
    let height = settings.height.max(1);
    let samples = settings.samples_per_pixel.max(1);

    info!(
        "Rendering {}x{} ({} spp, depth {}) on {} threads",
        width,
        height,
        samples,
        integrator.max_depth,
        rayon::current_num_threads()
    );
    debug!("Scene holds {} spheres, seed {}", scene.len(), settings.seed);

    let generation_start = std::time::Instant::now();
    let pb = ProgressBar::new(height as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows ETA: {eta}") {
        pb.set_style(style);
    }

    let rows: Vec<Vec<Color>> = (0..height)
        .into_par_iter()
        .map(|j| {
            let mut sampler = Sampler::for_stream(settings.seed, j as u64);
            let row = (0..width)
                .map(|i| render_pixel(scene, camera, integrator, i, j, width, height, samples, &mut sampler))
                .collect();
            pb.inc(1);
            row
        })
        .collect();

    pb.finish_and_clear();

    let mut image: RenderedImage = ImageBuffer::new(width, height);
    for (j, row) in rows.into_iter().enumerate() {
        let y = height - 1 - j as u32;
        for (i, color) in row.into_iter().enumerate() {
            image.put_pixel(i as u32, y, Rgb([color.x, color.y, color.z]));
        }
    }

    info!("Image generated in {:.2?}", generation_start.elapsed());
    image
}

/// Average `samples` jittered paths through pixel `(i, j)`.
#[allow(clippy::too_many_arguments)]
fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    integrator: &Integrator,
    i: u32,
    j: u32,
    width: u32,
    height: u32,
    samples: u32,
    sampler: &mut Sampler,
) -> Color {
    // Jittered coordinates span [0, 1] across the first and last pixel
    let u_scale = (width - 1).max(1) as f32;
    let v_scale = (height - 1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let u = (i as f32 + sampler.uniform()) / u_scale;
        let v = (j as f32 + sampler.uniform()) / v_scale;
        let r = camera.get_ray(u, v, sampler);
        pixel_color += integrator.ray_color(&r, scene, 0, sampler);
    }

    gamma_correct(pixel_color / samples as f32)
}
