//! Recursive radiance estimation.
//!
//! Follows a ray through the scene, letting each material decide how the
//! path continues, until the path escapes, is absorbed, reaches a light or
//! runs out of depth.

use glam::Vec3A;
use serde::Deserialize;

use crate::material::Scatter;
use crate::random::Sampler;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vector::{unit_or_none, Color};

/// Radiance returned for rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Background {
    /// Vertical blend from `bottom` (looking down) to `top` (looking up).
    Gradient {
        /// Color for a straight-down direction
        bottom: Color,
        /// Color for a straight-up direction
        top: Color,
    },
    /// Same ambient color in every direction.
    Constant {
        /// Ambient radiance
        color: Color,
    },
}

impl Background {
    /// White to light blue sky.
    pub fn sky() -> Self {
        Background::Gradient {
            bottom: Color::ONE,
            top: Color::new(0.5, 0.7, 1.0),
        }
    }

    /// Radiance seen along `r`. Depends only on the ray's unit direction;
    /// a degenerate direction is treated as horizontal.
    pub fn radiance(&self, r: &Ray) -> Color {
        match *self {
            Background::Gradient { bottom, top } => {
                let unit_direction = unit_or_none(r.direction).unwrap_or(Vec3A::ZERO);
                // Y = -1 (down) gives a = 0, Y = 1 (up) gives a = 1
                let a = 0.5 * (unit_direction.y + 1.0);
                (1.0 - a) * bottom + a * top
            }
            Background::Constant { color } => color,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::sky()
    }
}

/// Depth-bounded Monte Carlo path integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Paths reaching this depth are absorbed.
    pub max_depth: u32,
    /// Radiance for escaping rays.
    pub background: Background,
}

impl Integrator {
    /// Create an integrator.
    pub fn new(max_depth: u32, background: Background) -> Self {
        Self {
            max_depth,
            background,
        }
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// `depth` counts bounces taken so far; primary rays start at 0. The
    /// result is linear radiance and is never clamped.
    pub fn ray_color(&self, r: &Ray, scene: &Scene, depth: u32, sampler: &mut Sampler) -> Color {
        // If we've exceeded the ray bounce limit, no more light is gathered
        if depth >= self.max_depth {
            return Color::ZERO;
        }

        let Some(rec) = scene.hit(r) else {
            return self.background.radiance(r);
        };

        match rec.sphere.material.scatter(r, &rec, sampler) {
            Scatter::Bounce {
                attenuation,
                scattered,
            } => attenuation * self.ray_color(&scattered, scene, depth + 1, sampler),
            Scatter::Absorbed => Color::ZERO,
            Scatter::Emitted(radiance) => radiance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use glam::Vec3A;

    fn red_ball() -> Scene {
        Scene::from(vec![Sphere::new(
            Vec3A::new(0.0, 0.0, -1.0),
            0.5,
            Color::new(1.0, 0.0, 0.0),
            Material::Diffuse,
        )])
    }

    #[test]
    fn test_depth_cutoff_returns_black() {
        let scene = red_ball();
        let integrator = Integrator::new(0, Background::sky());
        let mut sampler = Sampler::seeded(1);

        let hit = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let miss = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert_eq!(integrator.ray_color(&hit, &scene, 0, &mut sampler), Color::ZERO);
        assert_eq!(integrator.ray_color(&miss, &scene, 0, &mut sampler), Color::ZERO);

        let integrator = Integrator::new(5, Background::sky());
        assert_eq!(integrator.ray_color(&miss, &scene, 5, &mut sampler), Color::ZERO);
    }

    #[test]
    fn test_background_depends_only_on_direction() {
        let scene = Scene::new();
        let integrator = Integrator::new(10, Background::sky());
        let mut sampler = Sampler::seeded(2);

        let a = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 1.0, 0.0));
        let b = Ray::new(Vec3A::new(5.0, -3.0, 2.0), Vec3A::new(-1.0, 1.0, 0.0));
        let c = Ray::new(Vec3A::new(-7.0, 0.0, 9.0), Vec3A::new(0.0, 1.0, 1.0));
        let ca = integrator.ray_color(&a, &scene, 0, &mut sampler);
        assert_eq!(ca, integrator.ray_color(&b, &scene, 0, &mut sampler));
        assert_eq!(ca, integrator.ray_color(&c, &scene, 0, &mut sampler));

        // Scaling the direction does not change the color
        let d = Ray::new(Vec3A::ZERO, Vec3A::new(3.0, 3.0, 0.0));
        let cd = integrator.ray_color(&d, &scene, 0, &mut sampler);
        assert!((ca - cd).length() < 1e-6);
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let sky = Background::sky();
        let up = sky.radiance(&Ray::new(Vec3A::ZERO, Vec3A::Y));
        let down = sky.radiance(&Ray::new(Vec3A::ZERO, -Vec3A::Y));
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_constant_background() {
        let ambient = Background::Constant { color: Color::splat(0.1) };
        let integrator = Integrator::new(4, ambient);
        let mut sampler = Sampler::seeded(3);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.3, -0.2, 0.9));
        assert_eq!(integrator.ray_color(&r, &Scene::new(), 0, &mut sampler), Color::splat(0.1));
    }

    #[test]
    fn test_light_is_terminal() {
        let glow = Color::new(1.0, 0.9, 0.8);
        let scene = Scene::from(vec![Sphere::new(
            Vec3A::new(0.0, 0.0, -3.0),
            1.0,
            glow,
            Material::Light { luminance: 10.0 },
        )]);
        let integrator = Integrator::new(1, Background::Constant { color: Color::ZERO });
        let mut sampler = Sampler::seeded(4);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        // Unclamped and independent of the remaining depth
        assert_eq!(integrator.ray_color(&r, &scene, 0, &mut sampler), glow * 10.0);
    }

    #[test]
    fn test_diffuse_tints_background() {
        let scene = red_ball();
        let integrator = Integrator::new(50, Background::Constant { color: Color::ONE });
        let mut sampler = Sampler::seeded(5);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        for _ in 0..100 {
            // A single convex sphere: one bounce, then escape
            assert_eq!(integrator.ray_color(&r, &scene, 0, &mut sampler), Color::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_mirror_pair_runs_out_of_depth() {
        // Two facing mirrors trap a ray travelling along the x axis
        let mirror = Material::Metal { fuzz: 0.0 };
        let scene = Scene::from(vec![
            Sphere::new(Vec3A::new(-1002.0, 0.0, 0.0), 1000.0, Color::ONE, mirror),
            Sphere::new(Vec3A::new(1002.0, 0.0, 0.0), 1000.0, Color::ONE, mirror),
        ]);
        let integrator = Integrator::new(8, Background::Constant { color: Color::ONE });
        let mut sampler = Sampler::seeded(6);
        let r = Ray::new(Vec3A::ZERO, Vec3A::X);
        assert_eq!(integrator.ray_color(&r, &scene, 0, &mut sampler), Color::ZERO);
    }

    #[test]
    fn test_background_deserialize() {
        let bg: Background = serde_json::from_str(r#"{"kind":"constant","color":[0.1,0.2,0.3]}"#).unwrap();
        assert_eq!(bg, Background::Constant { color: Color::new(0.1, 0.2, 0.3) });
    }
}
