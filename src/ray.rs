//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. The direction is kept at
//! whatever scale the caller built it with, so hit distances are measured in
//! multiples of that direction rather than in world units.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The eye for primary rays, a surface point for secondary rays, or a light
    /// position for shadow rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not normalized. Primary and secondary rays are built as `target - origin`,
    /// which makes `t = 1` land exactly on the target point.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Create the ray leaving `origin` and passing through `target` at `t = 1`.
    pub fn through(origin: Vec3A, target: Vec3A) -> Self {
        Self::new(origin, target - origin)
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
