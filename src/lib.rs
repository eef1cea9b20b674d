//! SpherePath path tracer
//!
//! Renders scenes made of spheres with Monte Carlo path tracing: camera rays
//! with optional defocus blur, diffuse, metal, glass and emissive materials,
//! and a depth-bounded recursive radiance estimate per sample.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod hittable;
pub mod integrator;
pub mod interval;
pub mod material;
pub mod output;
pub mod presets;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod vector;

pub use camera::{Camera, CameraSettings};
pub use integrator::{Background, Integrator};
pub use material::Material;
pub use random::Sampler;
pub use ray::Ray;
pub use render::{render, RenderSettings, RenderedImage};
pub use scene::Scene;
pub use sphere::Sphere;
pub use vector::Color;
