//! Camera for ray generation.
//!
//! Perspective projection with an optional thin lens. With a zero aperture
//! every ray starts at the eye; otherwise rays start on a disk around the eye
//! and converge on the plane of perfect focus, producing depth of field.

use glam::Vec3A;

use crate::random::Sampler;
use crate::ray::Ray;

/// Placement and optics used to build a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Image width divided by image height
    pub aspect_ratio: f32,
    /// Lens diameter; 0 disables defocus blur
    pub aperture: f32,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::new(-13.0, 3.0, 6.0),
            lookat: Vec3A::ZERO,
            vup: Vec3A::Y,
            vfov: 20.0,
            aspect_ratio: 4.0 / 3.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

/// Camera frame and viewport, derived once and then only read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space (same as lookfrom)
    origin: Vec3A,
    /// World position of the lower-left corner of the focus-plane viewport
    lower_left_corner: Vec3A,
    /// Full viewport width along u
    horizontal: Vec3A,
    /// Full viewport height along v
    vertical: Vec3A,
    /// Camera frame basis vector pointing right (u)
    u: Vec3A,
    /// Camera frame basis vector pointing up (v)
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: Vec3A,
    lens_radius: f32,
}

impl Camera {
    /// Build the camera frame from `settings`.
    pub fn new(settings: &CameraSettings) -> Self {
        // Determine viewport dimensions
        let theta = settings.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = settings.aspect_ratio * half_height;

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (settings.lookfrom - settings.lookat).normalize(); // Points opposite view direction
        let u = settings.vup.cross(w).normalize(); // Points to camera right
        let v = w.cross(u); // Points to camera up

        let focus_dist = settings.focus_dist;
        let origin = settings.lookfrom;
        let horizontal = 2.0 * half_width * u * focus_dist;
        let vertical = 2.0 * half_height * v * focus_dist;
        let lower_left_corner = origin
            - half_width * u * focus_dist
            - half_height * v * focus_dist
            - w * focus_dist;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        }
    }

    /// Generate the ray through normalized image coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner of the image and `(1, 1)` the
    /// upper-right. The sampler is only consulted when the lens is open.
    pub fn get_ray(&self, s: f32, t: f32, sampler: &mut Sampler) -> Ray {
        let target = self.focus_point(s, t);

        if self.lens_radius <= 0.0 {
            return Ray::new(self.origin, target - self.origin);
        }

        // Sample random point on the lens disk for depth-of-field blur
        let rd = self.lens_radius * sampler.in_unit_disk();
        let offset = self.u * rd.x + self.v * rd.y;
        let ray_origin = self.origin + offset;
        Ray::new(ray_origin, target - ray_origin)
    }

    /// Point on the plane of perfect focus seen at `(s, t)`.
    pub fn focus_point(&self, s: f32, t: f32) -> Vec3A {
        self.lower_left_corner + s * self.horizontal + t * self.vertical
    }

    /// Camera position.
    pub fn origin(&self) -> Vec3A {
        self.origin
    }

    /// Unit vector from the eye towards the look-at point.
    pub fn forward(&self) -> Vec3A {
        -self.w
    }

    /// Radius of the thin lens.
    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinhole() -> CameraSettings {
        CameraSettings {
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::Y,
            vfov: 90.0,
            aspect_ratio: 2.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(&pinhole());
        let mut sampler = Sampler::seeded(1);
        let ray = camera.get_ray(0.5, 0.5, &mut sampler);

        assert_eq!(ray.origin, Vec3A::ZERO);
        assert!((ray.unit_direction() - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_viewport_corners() {
        // vfov 90 gives half height 1 at unit focus distance, aspect 2 gives half width 2
        let camera = Camera::new(&pinhole());
        let mut sampler = Sampler::seeded(2);

        let ll = camera.get_ray(0.0, 0.0, &mut sampler);
        assert!((ll.direction - Vec3A::new(-2.0, -1.0, -1.0)).length() < 1e-5);

        let ur = camera.get_ray(1.0, 1.0, &mut sampler);
        assert!((ur.direction - Vec3A::new(2.0, 1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_pinhole_does_not_consume_samples() {
        let camera = Camera::new(&pinhole());
        let mut a = Sampler::seeded(3);
        let mut b = Sampler::seeded(3);
        camera.get_ray(0.3, 0.7, &mut a);
        assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new(&CameraSettings::default());
        for axis in [camera.u, camera.v, camera.w] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(camera.u.dot(camera.v).abs() < 1e-5);
        assert!(camera.u.dot(camera.w).abs() < 1e-5);
        assert!(camera.v.dot(camera.w).abs() < 1e-5);
        // Right-handed frame with v roughly along world up
        assert!(camera.v.y > 0.0);
        assert!((camera.forward() - (Vec3A::ZERO - Vec3A::new(-13.0, 3.0, 6.0)).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_defocus_rays_converge_on_focus_plane() {
        let settings = CameraSettings {
            lookfrom: Vec3A::new(13.0, 2.0, 3.0),
            lookat: Vec3A::ZERO,
            aperture: 0.5,
            focus_dist: 10.0,
            ..CameraSettings::default()
        };
        let camera = Camera::new(&settings);
        assert_eq!(camera.lens_radius(), 0.25);

        let mut sampler = Sampler::seeded(4);
        let target = camera.focus_point(0.25, 0.6);
        let mut moved = false;
        for _ in 0..100 {
            let ray = camera.get_ray(0.25, 0.6, &mut sampler);
            // Origins stay on the lens disk around the eye
            let offset = ray.origin - camera.origin();
            assert!(offset.length() < camera.lens_radius() + 1e-5);
            assert!(offset.dot(camera.forward()).abs() < 1e-4);
            moved |= offset.length() > 1e-3;
            // ...and every ray still passes through the same focus-plane point
            assert!((ray.at(1.0) - target).length() < 1e-3);
        }
        assert!(moved);
    }

    #[test]
    fn test_focus_plane_distance() {
        let settings = CameraSettings {
            focus_dist: 4.0,
            ..pinhole()
        };
        let camera = Camera::new(&settings);
        let center = camera.focus_point(0.5, 0.5);
        assert!((center - Vec3A::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }
}
