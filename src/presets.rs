//! Built-in scenes.
//!
//! Each preset pairs a list of spheres with the camera placement and
//! background it was composed for.

use glam::Vec3A;
use log::debug;
use serde::Deserialize;

use crate::camera::CameraSettings;
use crate::integrator::Background;
use crate::material::{Material, GLASS_REFRACTION_INDEX};
use crate::random::Sampler;
use crate::scene::Scene;
use crate::sphere::Sphere;
use crate::vector::Color;

const RED: Color = Color::new(1.0, 0.0, 0.0);
const WHITE: Color = Color::ONE;
const GRAY: Color = Color::new(0.5, 0.5, 0.5);

/// Names of the built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenePreset {
    /// Ground plus one metal, one diffuse and one glass sphere.
    #[default]
    Original,
    /// Randomized field of small spheres around three large ones.
    Cover,
    /// One red diffuse sphere in front of the camera.
    Single,
    /// Closed box of huge spheres lit by an emissive sphere.
    Room,
}

/// A ready-to-render scene with its default view.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Spheres to render
    pub scene: Scene,
    /// Camera placement; aspect ratio is filled in by the caller
    pub camera: CameraSettings,
    /// Radiance for escaping rays
    pub background: Background,
}

impl ScenePreset {
    /// Build the preset. Only [`ScenePreset::Cover`] draws from `sampler`.
    pub fn build(self, sampler: &mut Sampler) -> Preset {
        let preset = match self {
            ScenePreset::Original => original(),
            ScenePreset::Cover => cover(sampler),
            ScenePreset::Single => single(),
            ScenePreset::Room => room(),
        };
        debug!("Built {:?} scene with {} spheres", self, preset.scene.len());
        preset
    }
}

fn glass() -> Material {
    Material::Dielectric {
        refraction_index: GLASS_REFRACTION_INDEX,
    }
}

fn original() -> Preset {
    let scene = Scene::from(vec![
        Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, GRAY, Material::Diffuse),
        Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, Color::new(0.7, 0.6, 0.5), Material::Metal { fuzz: 0.0 }),
        Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, Color::new(0.4, 0.2, 0.1), Material::Diffuse),
        Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, WHITE, glass()),
    ]);

    Preset {
        scene,
        camera: CameraSettings::default(),
        background: Background::sky(),
    }
}

fn cover(sampler: &mut Sampler) -> Preset {
    let mut scene = Scene::new();

    // Ground sphere
    scene.add(Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, GRAY, Material::Diffuse));

    // Generate 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = sampler.uniform();
            let center = Vec3A::new(
                a as f32 + 0.9 * sampler.uniform(),
                0.2,
                b as f32 + 0.9 * sampler.uniform(),
            );

            // Don't place spheres too close to the large feature spheres
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere = if choose_mat < 0.8 {
                let albedo = sampler.uniform_color() * sampler.uniform_color();
                Sphere::new(center, 0.2, albedo, Material::Diffuse)
            } else if choose_mat < 0.95 {
                let albedo = sampler.uniform_color_range(0.5, 1.0);
                let fuzz = sampler.uniform_range(0.0, 0.5);
                Sphere::new(center, 0.2, albedo, Material::Metal { fuzz })
            } else {
                Sphere::new(center, 0.2, WHITE, glass())
            };
            scene.add(sphere);
        }
    }

    // Three large feature spheres
    scene.add(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, WHITE, glass()));
    scene.add(Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, Color::new(0.4, 0.2, 0.1), Material::Diffuse));
    scene.add(Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, Color::new(0.7, 0.6, 0.5), Material::Metal { fuzz: 0.0 }));

    Preset {
        scene,
        camera: CameraSettings {
            lookfrom: Vec3A::new(13.0, 2.0, 3.0),
            lookat: Vec3A::ZERO,
            aperture: 0.1,
            focus_dist: 10.0,
            ..CameraSettings::default()
        },
        background: Background::sky(),
    }
}

fn single() -> Preset {
    Preset {
        scene: Scene::from(vec![Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.5, RED, Material::Diffuse)]),
        camera: CameraSettings {
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vfov: 90.0,
            ..CameraSettings::default()
        },
        background: Background::sky(),
    }
}

fn room() -> Preset {
    const WALL: f32 = 1000.0;
    let scene = Scene::from(vec![
        // Floor, ceiling, left, right and back walls
        Sphere::new(Vec3A::new(0.0, -WALL, 0.0), WALL, Color::splat(0.73), Material::Diffuse),
        Sphere::new(Vec3A::new(0.0, 10.0 + WALL, 0.0), WALL, Color::splat(0.73), Material::Diffuse),
        Sphere::new(Vec3A::new(-5.0 - WALL, 0.0, 0.0), WALL, Color::new(0.65, 0.05, 0.05), Material::Diffuse),
        Sphere::new(Vec3A::new(5.0 + WALL, 0.0, 0.0), WALL, Color::new(0.12, 0.45, 0.15), Material::Diffuse),
        Sphere::new(Vec3A::new(0.0, 0.0, -10.0 - WALL), WALL, Color::splat(0.73), Material::Diffuse),
        // Lamp pushed through the ceiling
        Sphere::new(Vec3A::new(0.0, 11.0, -4.0), 2.0, Color::new(1.0, 0.95, 0.9), Material::Light { luminance: 6.0 }),
        // Props on the floor
        Sphere::new(Vec3A::new(-2.5, 1.5, -5.0), 1.5, Color::new(0.8, 0.85, 0.88), Material::Metal { fuzz: 0.05 }),
        Sphere::new(Vec3A::new(0.5, 1.2, -2.5), 1.2, WHITE, glass()),
        Sphere::new(Vec3A::new(3.0, 1.0, -6.0), 1.0, Color::new(0.2, 0.3, 0.8), Material::Diffuse),
    ]);

    Preset {
        scene,
        camera: CameraSettings {
            lookfrom: Vec3A::new(0.0, 5.0, 14.0),
            lookat: Vec3A::new(0.0, 4.0, -4.0),
            vfov: 50.0,
            ..CameraSettings::default()
        },
        background: Background::Constant {
            color: Color::splat(0.02),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_scene() {
        let preset = ScenePreset::Original.build(&mut Sampler::seeded(0));
        assert_eq!(preset.scene.len(), 4);
        assert_eq!(preset.camera.lookfrom, Vec3A::new(-13.0, 3.0, 6.0));
        assert_eq!(preset.camera.vfov, 20.0);
        assert_eq!(preset.background, Background::sky());
    }

    #[test]
    fn test_cover_is_seeded() {
        let a = ScenePreset::Cover.build(&mut Sampler::seeded(5));
        let b = ScenePreset::Cover.build(&mut Sampler::seeded(5));
        assert_eq!(a, b);
        // Ground and three feature spheres plus most of the 484 grid cells
        assert!(a.scene.len() > 400);
        assert!(a.scene.spheres().iter().all(|s| s.radius > 0.0));
    }

    #[test]
    fn test_single_scene() {
        let preset = ScenePreset::Single.build(&mut Sampler::seeded(0));
        let sphere = preset.scene.spheres()[0];
        assert_eq!(sphere.center, Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(sphere.radius, 0.5);
        assert_eq!(sphere.albedo, RED);
        assert_eq!(sphere.material, Material::Diffuse);
    }

    #[test]
    fn test_room_has_a_light() {
        let preset = ScenePreset::Room.build(&mut Sampler::seeded(0));
        assert!(preset
            .scene
            .spheres()
            .iter()
            .any(|s| matches!(s.material, Material::Light { .. })));
        assert!(matches!(preset.background, Background::Constant { .. }));
    }

    #[test]
    fn test_preset_names() {
        let p: ScenePreset = serde_json::from_str("\"room\"").unwrap();
        assert_eq!(p, ScenePreset::Room);
        assert_eq!(ScenePreset::default(), ScenePreset::Original);
    }
}
