//! Ray-object intersection records.
//!
//! A [`HitRecord`] is produced by a scene query and lives only for the
//! scatter decision made at that hit.

use glam::Vec3A;

use crate::ray::Ray;
use crate::sphere::Sphere;

/// Ray-object intersection information.
///
/// Contains the intersection point, the outward surface normal, the distance
/// along the ray and the sphere that was struck.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Unit normal pointing out of the sphere
    pub outward_normal: Vec3A,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Sphere that was hit
    pub sphere: &'a Sphere,
}

impl<'a> HitRecord<'a> {
    /// Build the record for `sphere` hit by `r` at parameter `t`.
    pub fn new(r: &Ray, t: f32, sphere: &'a Sphere) -> Self {
        let p = r.at(t);
        let outward_normal = sphere.outward_normal(p);
        Self {
            t,
            p,
            outward_normal,
            // Front face when the ray travels against the outward normal
            front_face: r.direction.dot(outward_normal) <= 0.0,
            sphere,
        }
    }

    /// Shading normal, always pointing against the incident ray.
    pub fn normal(&self) -> Vec3A {
        if self.front_face {
            self.outward_normal
        } else {
            -self.outward_normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::vector::Color;

    #[test]
    fn test_front_face_from_outside() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -2.0), 1.0, Color::ONE, Material::Diffuse);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let t = sphere.intersect(&ray).unwrap();
        let rec = HitRecord::new(&ray, t, &sphere);

        assert!(rec.front_face);
        assert_eq!(rec.normal(), rec.outward_normal);
        assert!((rec.p - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_back_face_flips_normal() {
        let sphere = Sphere::new(Vec3A::ZERO, 1.0, Color::ONE, Material::Diffuse);
        // Travelling outward through the +x pole
        let ray = Ray::new(Vec3A::new(0.5, 0.0, 0.0), Vec3A::X);
        let rec = HitRecord::new(&ray, 0.5, &sphere);

        assert!(!rec.front_face);
        assert_eq!(rec.outward_normal, Vec3A::X);
        assert_eq!(rec.normal(), -Vec3A::X);
        assert!(rec.normal().dot(ray.direction) < 0.0);
    }
}
