//! Sphere primitive for ray tracing.
//!
//! Spheres are the only geometry. Very large radii stand in for planes and
//! walls.

use glam::Vec3A;
use serde::Deserialize;

use crate::material::Material;
use crate::ray::Ray;
use crate::vector::Color;

/// Near-surface window in which a root is snapped to zero ("shadow acne").
pub const SHADOW_EPSILON: f32 = 0.001;

/// Sphere primitive defined by center, radius, albedo and material.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Base color, applied as a multiplicative tint (or emission for lights).
    pub albedo: Color,

    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, albedo: Color, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            albedo,
            material,
        }
    }

    /// Parameter of the nearest forward hit, if any.
    ///
    /// Only the near root of the quadratic is considered. A root within
    /// [`SHADOW_EPSILON`] of zero is snapped to zero and therefore rejected,
    /// so a ray leaving this surface never re-hits it at its own origin.
    pub fn intersect(&self, r: &Ray) -> Option<f32> {
        let oc = r.origin - self.center;

        let a = r.direction.dot(r.direction);
        let b = 2.0 * oc.dot(r.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let mut t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t.abs() < SHADOW_EPSILON {
            t = 0.0;
        }

        // NaN (degenerate direction) fails this comparison too
        if t > 0.0 {
            Some(t)
        } else {
            None
        }
    }

    /// Unit normal pointing out of the sphere at surface point `p`.
    pub fn outward_normal(&self, p: Vec3A) -> Vec3A {
        (p - self.center).normalize()
    }
}
