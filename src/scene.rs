//! Collection of spheres forming a scene.
//!
//! Uses a linear scan for intersection testing. A scene is built once and
//! only read while rendering.

use crate::hittable::HitRecord;
use crate::interval::Interval;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Ordered, immutable-while-rendering list of spheres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere to the scene.
    pub fn add(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Spheres in insertion order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Number of spheres in the scene.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// True when the scene has no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Nearest forward hit along `r`.
    ///
    /// On exactly equal distances the sphere added first wins.
    pub fn hit(&self, r: &Ray) -> Option<HitRecord<'_>> {
        let mut ray_t = Interval::FORWARD;
        let mut nearest: Option<(f32, &Sphere)> = None;

        for sphere in &self.spheres {
            if let Some(t) = sphere.intersect(r) {
                if ray_t.surrounds(t) {
                    ray_t = ray_t.with_max(t);
                    nearest = Some((t, sphere));
                }
            }
        }

        nearest.map(|(t, sphere)| HitRecord::new(r, t, sphere))
    }
}

impl From<Vec<Sphere>> for Scene {
    fn from(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }
}
