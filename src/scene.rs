//! Scene model: objects, lights and the ambient medium they sit in.
//!
//! A scene is built once and then only read while rays are traced.

use glam::Vec3A;

use crate::material::{Color, Material};
use crate::mesh::{Mesh, Triangle};
use crate::plane::Plane;
use crate::sphere::Sphere;

/// Vertical field of view used when a scene does not specify one, in degrees.
pub const DEFAULT_FOV: f32 = 60.0;

/// Minimum distance at which directional lights are placed behind a shaded point.
pub const DIRECTIONAL_LIGHT_DISTANCE: f32 = 100.0;

/// Geometry of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Sphere around its center.
    Sphere(Sphere),
    /// Infinite plane.
    Plane(Plane),
    /// Triangle mesh.
    Mesh(Mesh),
}

/// Renderable object: a shape plus the material shading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Geometry tested by the intersection resolver.
    pub shape: Shape,
    /// Surface response used by the shading engine and the trace controller.
    pub material: Material,
}

impl Object {
    /// Sphere object.
    pub fn sphere(center: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            shape: Shape::Sphere(Sphere::new(center, radius)),
            material,
        }
    }

    /// Plane object.
    pub fn plane(point: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self {
            shape: Shape::Plane(Plane::new(point, normal)),
            material,
        }
    }

    /// Mesh object.
    pub fn mesh(anchor: Vec3A, triangles: Vec<Triangle>, material: Material) -> Self {
        Self {
            shape: Shape::Mesh(Mesh::new(anchor, triangles)),
            material,
        }
    }

    /// Position or anchor point of the object.
    pub fn position(&self) -> Vec3A {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.center,
            Shape::Plane(plane) => plane.point,
            Shape::Mesh(mesh) => mesh.anchor,
        }
    }

    /// Unit surface normal at `point`.
    ///
    /// Meshes use the face normal of the struck triangle; an unknown triangle
    /// index yields a zero normal, which shades as unlit.
    pub fn normal_at(&self, point: Vec3A, triangle: Option<usize>) -> Vec3A {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Plane(plane) => plane.normal.normalize(),
            Shape::Mesh(mesh) => triangle
                .and_then(|index| mesh.triangles.get(index))
                .map_or(Vec3A::ZERO, |face| face.normal.normalize()),
        }
    }

    /// Whether the object encloses a volume a ray can travel inside.
    ///
    /// Planes have no interior: passing through one leaves the ray in the
    /// ambient medium.
    pub fn has_interior(&self) -> bool {
        !matches!(self.shape, Shape::Plane(_))
    }

    /// Distance from the world origin to the farthest finite point of the object.
    fn extent(&self) -> f32 {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.center.length() + sphere.radius,
            Shape::Plane(plane) => plane.point.length(),
            Shape::Mesh(mesh) => mesh
                .triangles
                .iter()
                .flat_map(|face| face.vertices)
                .map(Vec3A::length)
                .fold(mesh.anchor.length(), f32::max),
        }
    }
}

/// Light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light feeding only the ambient term. Never shadowed.
    Ambient {
        /// Light color.
        color: Color,
    },
    /// Light arriving from infinitely far away along `direction`.
    Directional {
        /// Light color.
        color: Color,
        /// Direction the light travels in.
        direction: Vec3A,
    },
    /// Omnidirectional light at a position.
    Point {
        /// Light color.
        color: Color,
        /// Light position.
        position: Vec3A,
    },
    /// Point light restricted to a cone.
    Spot {
        /// Light color.
        color: Color,
        /// Light position.
        position: Vec3A,
        /// Axis the cone opens along.
        direction: Vec3A,
        /// Half-angle of the cone in degrees.
        cutoff: f32,
    },
}

impl Light {
    /// Color of the light regardless of its kind.
    pub fn color(&self) -> Color {
        match *self {
            Light::Ambient { color }
            | Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Spot { color, .. } => color,
        }
    }

    /// Whether the light contributes only to the ambient term.
    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient { .. })
    }

    /// Short lowercase name used in logs and scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Light::Ambient { .. } => "ambient",
            Light::Directional { .. } => "directional",
            Light::Point { .. } => "point",
            Light::Spot { .. } => "spot",
        }
    }
}

/// Complete, read-only description of what is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Objects in scan order.
    pub objects: Vec<Object>,
    /// Lights in accumulation order.
    pub lights: Vec<Light>,
    /// Color returned for rays that miss every object.
    pub background: Color,
    /// Field of view in degrees.
    pub fov: f32,
    directional_distance: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Scene {
    /// Create a scene with a black background and the default field of view.
    pub fn new(objects: Vec<Object>, lights: Vec<Light>) -> Self {
        let directional_distance = objects
            .iter()
            .map(Object::extent)
            .fold(DIRECTIONAL_LIGHT_DISTANCE / 4.0, f32::max)
            * 4.0;
        Self {
            objects,
            lights,
            background: Color::ZERO,
            fov: DEFAULT_FOV,
            directional_distance,
        }
    }

    /// Replace the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Replace the field of view, in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// How far behind a shaded point directional lights are synthesized.
    ///
    /// At least [`DIRECTIONAL_LIGHT_DISTANCE`], and far enough that a point on any
    /// object never sees its virtual light inside another object's bounds.
    pub fn directional_distance(&self) -> f32 {
        self.directional_distance
    }
}
