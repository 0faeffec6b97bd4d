//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait implemented by every geometric primitive and
//! the nearest-hit resolver that scans a [`Scene`] linearly.

use crate::ray::Ray;
use crate::scene::{Scene, Shape};

/// Minimum positive hit distance, keeping rays from re-hitting the surface they leave.
pub const ANTI_ACNE: f32 = 0.001;

/// Trait for primitives that can be intersected by rays.
pub trait Hittable {
    /// Distance along the ray, in units of its direction, to the nearest
    /// accepted intersection, or `None` when the ray misses.
    fn hit(&self, r: &Ray) -> Option<f32>;
}

/// Nearest-hit record produced by [`Scene::intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit; `f32::INFINITY` when nothing was hit.
    pub distance: f32,
    /// Index of the struck object in [`Scene::objects`].
    pub object: Option<usize>,
    /// Index of the struck triangle when the object is a mesh.
    pub triangle: Option<usize>,
}

impl Intersection {
    /// Record of a ray that has not hit anything yet.
    pub const MISS: Intersection = Intersection {
        distance: f32::INFINITY,
        object: None,
        triangle: None,
    };

    /// Whether any object was hit.
    pub fn is_hit(&self) -> bool {
        self.object.is_some()
    }

    /// Whether both records name the same object and the same triangle.
    pub fn same_surface(&self, other: &Intersection) -> bool {
        self.object == other.object && self.triangle == other.triangle
    }

    /// Keep the candidate only if it is strictly nearer than the current best.
    fn consider(&mut self, distance: f32, object: usize, triangle: Option<usize>) {
        if distance < self.distance {
            *self = Intersection {
                distance,
                object: Some(object),
                triangle,
            };
        }
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::MISS
    }
}

impl Scene {
    /// Find the nearest object along the ray.
    ///
    /// Every object is tested in scene order and every triangle of a mesh in
    /// mesh order; an exact distance tie keeps whichever was found first.
    pub fn intersect(&self, r: &Ray) -> Intersection {
        let mut nearest = Intersection::MISS;

        for (index, object) in self.objects.iter().enumerate() {
            match &object.shape {
                Shape::Sphere(sphere) => {
                    if let Some(t) = sphere.hit(r) {
                        nearest.consider(t, index, None);
                    }
                }
                Shape::Plane(plane) => {
                    if let Some(t) = plane.hit(r) {
                        nearest.consider(t, index, None);
                    }
                }
                Shape::Mesh(mesh) => {
                    if let Some((triangle, t)) = mesh.hit_triangle(r) {
                        nearest.consider(t, index, Some(triangle));
                    }
                }
            }
        }

        nearest
    }
}
