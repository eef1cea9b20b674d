//! Material system for ray tracing.
//!
//! Implements four material types: Diffuse, Metal (specular), Dielectric
//! (transparent) and Light (emissive). A material is a plain tag consulted by
//! the integrator; the surface color lives on the sphere.

use glam::Vec3A;
use serde::Deserialize;

use crate::hittable::HitRecord;
use crate::random::Sampler;
use crate::ray::Ray;
use crate::vector::{reflect, Color};

/// Refractive index used for glass in the bundled scenes.
pub const GLASS_REFRACTION_INDEX: f32 = 1.52;

/// Material types for ray tracing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Diffuse,

    /// Metallic material with specular reflection.
    Metal {
        /// Surface roughness (0.0 = mirror, clamped to 1.0).
        #[serde(default)]
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction on the entering side (1.0 = air, 1.52 = glass).
        #[serde(default = "default_refraction_index")]
        refraction_index: f32,
    },

    /// Emitter. Radiance is the sphere albedo scaled by `luminance`.
    Light {
        /// Intensity multiplier applied to the albedo.
        luminance: f32,
    },
}

fn default_refraction_index() -> f32 {
    GLASS_REFRACTION_INDEX
}

/// Outcome of a scatter decision at a single hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scatter {
    /// Continue along `scattered`, tinting the result by `attenuation`.
    Bounce {
        /// Component-wise tint applied to the recursive radiance.
        attenuation: Color,
        /// Outgoing ray, starting at the hit point.
        scattered: Ray,
    },
    /// The path ends here and contributes black.
    Absorbed,
    /// The path ends at an emitter with this radiance.
    Emitted(Color),
}

impl Material {
    /// Decide what happens to `r_in` at `rec`.
    pub fn scatter(&self, r_in: &Ray, rec: &HitRecord, sampler: &mut Sampler) -> Scatter {
        let albedo = rec.sphere.albedo;
        match *self {
            Material::Diffuse => scatter_diffuse(albedo, rec, sampler),
            Material::Metal { fuzz } => {
                scatter_mirror(r_in.unit_direction(), rec, fuzz, albedo, sampler)
            }
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec, sampler)
            }
            Material::Light { luminance } => Scatter::Emitted(albedo * luminance),
        }
    }
}

/// Diffuse bounce towards a random point in the unit ball around `p + n`.
fn scatter_diffuse(albedo: Color, rec: &HitRecord, sampler: &mut Sampler) -> Scatter {
    let normal = rec.normal();
    let target = rec.p + normal + sampler.in_unit_ball();

    // Catch degenerate scatter direction (very close to zero)
    let scattered = Ray::try_new(rec.p, target - rec.p).unwrap_or_else(|| Ray::new(rec.p, normal));

    Scatter::Bounce {
        attenuation: albedo,
        scattered,
    }
}

/// Mirror reflection of the unit view vector, with optional fuzz.
///
/// Shared by metals and by the reflect branch of dielectrics, which restart
/// here on the same hit instead of querying the scene again.
fn scatter_mirror(
    view: Vec3A,
    rec: &HitRecord,
    fuzz: f32,
    attenuation: Color,
    sampler: &mut Sampler,
) -> Scatter {
    let normal = rec.normal();
    let mut direction = reflect(view, normal);
    if fuzz > 0.0 {
        direction += fuzz.min(1.0) * sampler.in_unit_ball();
    }

    // Fuzz can push the reflection below the surface
    if direction.dot(normal) <= 0.0 {
        return Scatter::Absorbed;
    }

    Scatter::Bounce {
        attenuation,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Dielectric scattering: refraction, Schlick-weighted reflection, or total
/// internal reflection.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    sampler: &mut Sampler,
) -> Scatter {
    let eta = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let view = r_in.unit_direction();
    let normal = rec.normal();
    let cos_theta = (-view).dot(normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // The uniform draw is only taken when refraction is possible
    let can_refract = eta * sin_theta <= 1.0;
    if can_refract && sampler.uniform() >= reflectance(cos_theta, eta) {
        return Scatter::Bounce {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, refract(view, normal, cos_theta, eta)),
        };
    }

    scatter_mirror(view, rec, 0.0, Color::ONE, sampler)
}

/// Refract a unit vector through an interface using Snell's law.
fn refract(uv: Vec3A, n: Vec3A, cos_theta: f32, eta: f32) -> Vec3A {
    let r_out_perp = eta * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
fn reflectance(cosine: f32, eta: f32) -> f32 {
    let r0 = (1.0 - eta) / (1.0 + eta);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
