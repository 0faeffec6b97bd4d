//! Sphere primitive for ray tracing.
//!
//! Solves `|o + t·d − c|² = r²` directly in the ray's own parametrization, so
//! the direction does not have to be unit length.

use glam::Vec3A;

use crate::hittable::{Hittable, ANTI_ACNE};
use crate::interval::Interval;
use crate::ray::Ray;

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3A) -> Vec3A {
        (point - self.center).normalize()
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray) -> Option<f32> {
        let emc = r.origin - self.center;
        let a = r.direction.length_squared();
        let b = r.direction.dot(emc);
        let c = emc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Either root may sit behind the anti-acne threshold, e.g. when the ray
        // starts on or inside the sphere. Keep the nearer of the survivors.
        let sqrtd = discriminant.sqrt();
        let accepted = Interval::beyond(ANTI_ACNE);
        [(-b - sqrtd) / a, (-b + sqrtd) / a]
            .into_iter()
            .filter(|&t| accepted.surrounds(t))
            .reduce(f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0)
    }

    #[test]
    fn hits_near_side_first() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let t = unit_sphere().hit(&ray).expect("ray aims at the sphere");
        assert_relative_eq!(t, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn distance_scales_with_direction_length() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -2.0));
        let t = unit_sphere().hit(&ray).expect("ray aims at the sphere");
        assert_relative_eq!(t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn from_inside_only_far_root_survives() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, -1.0));
        let t = unit_sphere().hit(&ray).expect("ray starts inside");
        assert_relative_eq!(t, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn surface_origin_does_not_rehit_itself() {
        // Leaving the near pole outward: the only root is the origin itself.
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -4.0), Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(unit_sphere().hit(&ray), None);
    }

    #[test]
    fn tangent_ray_accepts_single_root() {
        let ray = Ray::new(Vec3A::new(1.0, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        let t = unit_sphere().hit(&ray).expect("tangent ray grazes the sphere");
        assert_relative_eq!(t, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn negative_discriminant_misses() {
        let ray = Ray::new(Vec3A::new(2.0, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(unit_sphere().hit(&ray), None);
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(unit_sphere().hit(&ray), None);
    }

    #[test]
    fn negative_radius_is_clamped() {
        assert_eq!(Sphere::new(Vec3A::ZERO, -3.0).radius, 0.0);
    }
}
