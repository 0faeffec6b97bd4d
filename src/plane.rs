//! Infinite plane primitive.
//!
//! The distance and acne helpers here are shared with mesh triangles, which
//! are intersected as bounded pieces of their supporting plane.

use glam::Vec3A;

use crate::hittable::{Hittable, ANTI_ACNE};
use crate::ray::Ray;

/// Infinite plane through `point` with face normal `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3A,
    /// Face normal as given by the scene; not required to be unit length.
    pub normal: Vec3A,
}

impl Plane {
    /// Create a plane from an anchor point and a face normal.
    pub fn new(point: Vec3A, normal: Vec3A) -> Self {
        Self { point, normal }
    }
}

/// Parameter `t = N·(A − e) / N·d` of the ray crossing the plane through `a`.
///
/// Rays reaching the plane from behind (`N·d > 0`) are solved exactly like
/// front-facing ones; there is no backface culling. An exactly parallel ray
/// has no crossing.
pub fn plane_distance(a: Vec3A, n: Vec3A, ray: &Ray) -> Option<f32> {
    let denom = n.dot(ray.direction);
    if denom == 0.0 {
        return None;
    }
    Some(n.dot(a - ray.origin) / denom)
}

/// Minimum accepted distance for a ray meeting a surface with normal `n`.
///
/// When the ray travels along the normal the base threshold is divided by
/// `N·d`, otherwise the base threshold applies unchanged.
pub fn acne_threshold(n: Vec3A, direction: Vec3A) -> f32 {
    let cos_incidence = n.dot(direction);
    if cos_incidence > 0.0 {
        ANTI_ACNE / cos_incidence
    } else {
        ANTI_ACNE
    }
}

impl Hittable for Plane {
    fn hit(&self, r: &Ray) -> Option<f32> {
        plane_distance(self.point, self.normal, r)
            .filter(|&t| t > acne_threshold(self.normal, r.direction))
    }
}
