//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::Vec3A;

use crate::vector::near_zero;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera eye (or a point on the lens) for primary rays, a surface
    /// point for scattered rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Code that needs a unit view vector
    /// (material scattering, the background gradient) calls
    /// [`Ray::unit_direction`] explicitly.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Create a ray, rejecting a degenerate (zero-length) direction.
    pub fn try_new(origin: Vec3A, direction: Vec3A) -> Option<Self> {
        if near_zero(direction) || !direction.is_finite() {
            return None;
        }
        Some(Self::new(origin, direction))
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// Unit-length copy of the direction.
    pub fn unit_direction(&self) -> Vec3A {
        self.direction.normalize()
    }
}
