//! Triangle meshes.

use glam::Vec3A;

use crate::hittable::Hittable;
use crate::plane::{acne_threshold, plane_distance};
use crate::ray::Ray;

/// Single mesh face with its precomputed, unnormalized face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corners in counter-clockwise order seen from the front face.
    pub vertices: [Vec3A; 3],
    /// `(B − A) × (C − A)`.
    pub normal: Vec3A,
}

impl Triangle {
    /// Create a triangle and precompute its face normal from the winding order.
    pub fn new(a: Vec3A, b: Vec3A, c: Vec3A) -> Self {
        Self {
            vertices: [a, b, c],
            normal: (b - a).cross(c - a),
        }
    }

    /// Whether `x`, a point on the supporting plane, lies strictly inside all three edges.
    pub fn contains(&self, x: Vec3A) -> bool {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
            .into_iter()
            .all(|(from, to)| (to - from).cross(x - from).dot(self.normal) > 0.0)
    }
}

impl Hittable for Triangle {
    fn hit(&self, r: &Ray) -> Option<f32> {
        let t = plane_distance(self.vertices[0], self.normal, r)?;
        (t > acne_threshold(self.normal, r.direction) && self.contains(r.at(t))).then_some(t)
    }
}

/// Ordered collection of triangles sharing one material.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Reference position from the scene description; triangles are in world space.
    pub anchor: Vec3A,
    /// Faces in scene order. Their indices identify the struck face in hit records.
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a mesh from world-space triangles.
    pub fn new(anchor: Vec3A, triangles: Vec<Triangle>) -> Self {
        Self { anchor, triangles }
    }

    /// Nearest accepted face along the ray, scanning in order.
    ///
    /// Exact distance ties keep the earlier face.
    pub fn hit_triangle(&self, r: &Ray) -> Option<(usize, f32)> {
        self.triangles
            .iter()
            .enumerate()
            .filter_map(|(index, triangle)| triangle.hit(r).map(|t| (index, t)))
            .fold(None, |best, (index, t)| match best {
                Some((_, best_t)) if best_t <= t => best,
                _ => Some((index, t)),
            })
    }
}
