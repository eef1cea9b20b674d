//! Vector and color helpers on top of `glam::Vec3A`.
//!
//! All arithmetic (add, sub, scale, hadamard, dot, cross, length, negate)
//! comes from glam. This module only adds the guarded operations the
//! renderer needs so that a zero-length vector is never normalized.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Squared length below which a direction is treated as degenerate.
pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-8;

/// Normalize `v`, or `None` when its length is zero or not finite.
pub fn unit_or_none(v: Vec3A) -> Option<Vec3A> {
    v.try_normalize()
}

/// True if every component of `v` is close to zero.
pub fn near_zero(v: Vec3A) -> bool {
    v.length_squared() < DEGENERATE_LENGTH_SQUARED
}

/// Mirror `v` about the unit normal `n`.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}
