//! Recursive trace controller.
//!
//! One call resolves the nearest hit, shades it locally, then spawns mirror,
//! transmission and refraction rays as the material asks for them. Depth is
//! bounded by a counter; the scene is only read, so independent rays can be
//! traced from any number of threads at once.

use glam::Vec3A;
use log::info;

use crate::hittable::Intersection;
use crate::material::{reflect, Color};
use crate::ray::Ray;
use crate::scene::{Object, Scene, Shape};
use crate::shading::local_illumination;

/// Default bound on nested reflection, transmission and refraction rays.
pub const RECURSION_LIMIT: u32 = 5;

/// Index of refraction of the medium surrounding all objects.
const AMBIENT_INDEX: f32 = 1.0;

/// Color computed for one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traced {
    /// Final color, or the background color when nothing was hit.
    pub color: Color,
    /// Whether the ray struck any object.
    pub hit: bool,
}

/// Shading context of the nearest hit.
struct Surface<'s> {
    object: &'s Object,
    point: Vec3A,
    normal: Vec3A,
    /// Unit vector from the hit point back toward the ray origin.
    view: Vec3A,
}

/// Recursive ray tracer over a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
}

impl<'a> Tracer<'a> {
    /// Create a tracer using [`RECURSION_LIMIT`].
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            max_depth: RECURSION_LIMIT,
        }
    }

    /// Override the recursion limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Recursion limit in effect.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Trace a primary ray from the eye through a point on the viewport.
    pub fn trace_primary(&self, eye: Vec3A, target: Vec3A, pick: bool) -> Traced {
        self.trace(eye, target, pick, 0, true)
    }

    /// Color seen along the ray from `origin` through `target`.
    ///
    /// `level` counts enclosing recursive calls; once it reaches the limit only
    /// local shading is returned. `outside` is true while the ray travels in the
    /// ambient medium and false inside a transmissive object. `pick` turns on
    /// diagnostic logging for this ray and its descendants.
    pub fn trace(&self, origin: Vec3A, target: Vec3A, pick: bool, level: u32, outside: bool) -> Traced {
        let ray = Ray::through(origin, target);
        let hit = self.scene.intersect(&ray);

        let traced = match hit.object.and_then(|index| self.scene.objects.get(index)) {
            Some(object) => Traced {
                color: self.shade(&ray, &hit, object, pick, level, outside),
                hit: true,
            },
            None => Traced {
                color: self.scene.background,
                hit: false,
            },
        };

        if pick && level == 0 {
            log_pick(self.scene, &hit, &traced);
        }

        traced
    }

    fn shade(&self, ray: &Ray, hit: &Intersection, object: &Object, pick: bool, level: u32, outside: bool) -> Color {
        let point = ray.at(hit.distance);
        let surface = Surface {
            object,
            point,
            normal: object.normal_at(point, hit.triangle),
            view: (ray.origin - point).normalize(),
        };

        if pick {
            info!(
                "Hit object {} ({}) at {} (level {}, outside {})",
                hit.object.unwrap_or_default(),
                shape_name(object),
                point,
                level,
                outside
            );
        }

        let local = local_illumination(
            self.scene,
            hit,
            &object.material,
            point,
            surface.normal,
            surface.view,
            pick,
        );

        if level >= self.max_depth {
            return local;
        }

        let mut total = local + self.reflection(&surface, pick, level, outside);
        total = self.transmission(&surface, total, pick, level, outside);
        self.refraction(&surface, total, pick, level, outside)
    }

    /// Mirror contribution, added on top of local shading. Only spawned from outside.
    ///
    /// A mirror ray that misses every object picks up the background color
    /// rather than contributing nothing, the same as the transmitted and
    /// refracted rays.
    fn reflection(&self, surface: &Surface, pick: bool, level: u32, outside: bool) -> Color {
        let material = &surface.object.material;
        if !material.is_reflective() || !outside {
            return Color::ZERO;
        }

        let direction = reflect(surface.view, surface.normal);
        let mirrored = self.trace(surface.point, surface.point + direction, pick, level + 1, outside);
        mirrored.color * material.reflective
    }

    /// Straight-through transparency for materials without a refraction index.
    ///
    /// Seen from outside the local color is blended with what lies behind; seen
    /// from inside only the transmitted color remains. Compare
    /// [`Tracer::refraction`], which always keeps the local color.
    fn transmission(&self, surface: &Surface, total: Color, pick: bool, level: u32, outside: bool) -> Color {
        let material = &surface.object.material;
        if !material.is_transparent() {
            return total;
        }

        let beyond = self.trace(
            surface.point,
            surface.point - surface.view,
            pick,
            level + 1,
            next_medium(surface.object, outside),
        );

        if outside {
            total * (Color::ONE - material.transmissive) + beyond.color * material.transmissive
        } else {
            beyond.color * material.transmissive
        }
    }

    /// Snell refraction, falling back to a mirror ray on total internal reflection.
    ///
    /// Unlike [`Tracer::transmission`], the blend keeps the local color on both
    /// sides of the surface.
    fn refraction(&self, surface: &Surface, total: Color, pick: bool, level: u32, outside: bool) -> Color {
        let material = &surface.object.material;
        if !material.is_refractive() {
            return total;
        }

        let incident = -surface.view;
        let normal = if outside { surface.normal } else { -surface.normal };
        let going_outside = next_medium(surface.object, outside);

        let index_incident = if outside { AMBIENT_INDEX } else { material.refraction };
        let index_refracted = if going_outside { AMBIENT_INDEX } else { material.refraction };

        let cos_incidence = incident.dot(normal);
        let ratio = (index_incident * index_incident) / (index_refracted * index_refracted);
        let discriminant = 1.0 - ratio * (1.0 - cos_incidence * cos_incidence);

        let (direction, medium) = if discriminant < 0.0 {
            (reflect(surface.view, normal), outside)
        } else {
            let tangent = index_incident * (incident - normal * cos_incidence);
            ((tangent / index_refracted - normal * discriminant.sqrt()).normalize(), going_outside)
        };

        if pick {
            log_refraction(incident, normal, direction, discriminant);
        }

        let bent = self.trace(surface.point, surface.point + direction, pick, level + 1, medium);
        total * (Color::ONE - material.transmissive) + bent.color * material.transmissive
    }
}

/// Medium flag after crossing the surface of `object`.
///
/// Planes have no interior, so a ray crossing one stays in the ambient medium.
fn next_medium(object: &Object, outside: bool) -> bool {
    if object.has_interior() {
        !outside
    } else {
        true
    }
}

fn shape_name(object: &Object) -> &'static str {
    match object.shape {
        Shape::Sphere(_) => "sphere",
        Shape::Plane(_) => "plane",
        Shape::Mesh(_) => "mesh",
    }
}

fn log_refraction(incident: Vec3A, normal: Vec3A, direction: Vec3A, discriminant: f32) {
    let incidence = incident.cross(normal).length().clamp(0.0, 1.0).asin();
    info!("  incident = {}", incident);
    info!("  normal = {}", normal);
    info!("  angle of incidence = {:.3}", incidence.to_degrees());
    if discriminant < 0.0 {
        info!("  total internal reflection, R = {}", direction);
    } else {
        let refraction = direction.cross(-normal).length().clamp(0.0, 1.0).asin();
        info!("  R = {}", direction);
        info!("  angle of refraction = {:.3}", refraction.to_degrees());
    }
}

fn log_pick(scene: &Scene, hit: &Intersection, traced: &Traced) {
    match hit.object.and_then(|index| scene.objects.get(index).map(|object| (index, object))) {
        Some((index, object)) => {
            let diffuse = object.material.diffuse;
            info!(
                "Raycast hit object {} ({} at {}) at a distance of {}",
                index,
                shape_name(object),
                object.position(),
                hit.distance
            );
            info!("      Object's diffuse colour: {}", diffuse);
            info!("      Final output colour:     {}", traced.color);
        }
        None => info!("Raycast missed all objects in scene."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::scene::Light;

    const EYE: Vec3A = Vec3A::ZERO;
    const FORWARD: Vec3A = Vec3A::new(0.0, 0.0, -1.0);

    fn light_above() -> Light {
        Light::Point {
            color: Color::ONE,
            position: Vec3A::new(0.0, 5.0, -5.0),
        }
    }

    fn red_sphere(material: Material) -> Object {
        Object::sphere(Vec3A::new(0.0, 0.0, -5.0), 1.0, material)
    }

    #[test]
    fn miss_returns_background() {
        let scene = Scene::new(vec![red_sphere(Material::default())], vec![light_above()])
            .with_background(Color::new(0.1, 0.2, 0.3));
        let traced = Tracer::new(&scene).trace_primary(EYE, Vec3A::new(0.0, 1.0, 0.0), false);
        assert!(!traced.hit);
        assert_eq!(traced.color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn reflection_adds_scaled_mirror_color() {
        // A mirror plane facing the eye reflects straight back into an empty scene.
        let mirror = Material {
            ambient: Color::splat(0.2),
            reflective: Color::splat(0.5),
            ..Material::default()
        };
        let scene = Scene::new(
            vec![Object::plane(Vec3A::new(0.0, 0.0, -3.0), Vec3A::Z, mirror)],
            vec![Light::Ambient { color: Color::ONE }],
        )
        .with_background(Color::new(0.0, 0.0, 1.0));
        let traced = Tracer::new(&scene).trace_primary(EYE, FORWARD, false);
        assert!(traced.hit);
        assert!(traced.color.abs_diff_eq(Color::new(0.2, 0.2, 0.7), 1e-5));
    }

    #[test]
    fn reflection_is_skipped_inside_objects() {
        let mirror = Material {
            ambient: Color::splat(0.2),
            reflective: Color::ONE,
            ..Material::default()
        };
        let scene = Scene::new(
            vec![Object::plane(Vec3A::new(0.0, 0.0, -3.0), Vec3A::Z, mirror)],
            vec![Light::Ambient { color: Color::ONE }],
        )
        .with_background(Color::ONE);
        let traced = Tracer::new(&scene).trace(EYE, FORWARD, false, 0, false);
        assert!(traced.color.abs_diff_eq(Color::splat(0.2), 1e-6));
    }

    #[test]
    fn transparency_from_inside_discards_local_color() {
        let glass = Material {
            ambient: Color::ONE,
            transmissive: Color::splat(0.5),
            ..Material::default()
        };
        let scene = Scene::new(
            vec![Object::sphere(Vec3A::ZERO, 2.0, glass)],
            vec![Light::Ambient { color: Color::ONE }],
        )
        .with_background(Color::new(0.0, 0.8, 0.0));
        let traced = Tracer::new(&scene).trace(EYE, FORWARD, false, 0, false);
        assert!(traced.hit);
        assert!(traced.color.abs_diff_eq(Color::new(0.0, 0.4, 0.0), 1e-6));
    }

    #[test]
    fn refraction_keeps_local_color_from_inside() {
        // Both spheres glow red and let half the light through. Leaving the
        // plainly transparent one drops the red; leaving the refractive one
        // keeps it in the blend.
        let see_through = |refraction: f32| Material {
            ambient: Color::new(1.0, 0.0, 0.0),
            transmissive: Color::splat(0.5),
            refraction,
            ..Material::default()
        };
        let inside = |material: Material| {
            let scene = Scene::new(
                vec![Object::sphere(Vec3A::ZERO, 1.0, material)],
                vec![Light::Ambient { color: Color::ONE }],
            )
            .with_background(Color::new(0.0, 0.0, 1.0));
            Tracer::new(&scene).trace(Vec3A::ZERO, Vec3A::X, false, 0, false)
        };

        let refracted = inside(see_through(1.0));
        assert!(refracted.hit);
        assert!(refracted.color.abs_diff_eq(Color::new(0.5, 0.0, 0.5), 1e-5));

        let transmitted = inside(see_through(0.0));
        assert!(transmitted.hit);
        assert!(transmitted.color.abs_diff_eq(Color::new(0.0, 0.0, 0.5), 1e-5));
    }

    #[test]
    fn depth_limit_returns_local_shading_only() {
        let everything = Material {
            ambient: Color::splat(0.1),
            diffuse: Color::new(1.0, 0.0, 0.0),
            specular: Color::ONE,
            shininess: 8.0,
            reflective: Color::splat(0.5),
            transmissive: Color::splat(0.5),
            refraction: 1.5,
        };
        let scene = Scene::new(
            vec![red_sphere(everything)],
            vec![Light::Ambient { color: Color::ONE }, light_above()],
        )
        .with_background(Color::new(0.0, 0.0, 1.0));
        let tracer = Tracer::new(&scene);

        let at_limit = tracer.trace(EYE, FORWARD, false, RECURSION_LIMIT, true);

        let ray = Ray::through(EYE, FORWARD);
        let hit = scene.intersect(&ray);
        let point = ray.at(hit.distance);
        let object = &scene.objects[0];
        let local = local_illumination(
            &scene,
            &hit,
            &object.material,
            point,
            object.normal_at(point, hit.triangle),
            (EYE - point).normalize(),
            false,
        );
        assert!(at_limit.hit);
        assert_eq!(at_limit.color, local);

        let recursive = tracer.trace_primary(EYE, FORWARD, false);
        assert_ne!(recursive.color, local);
    }

    #[test]
    fn zero_depth_tracer_never_recurses() {
        let mirror = Material {
            reflective: Color::ONE,
            ..Material::default()
        };
        let scene = Scene::new(vec![red_sphere(mirror)], vec![]).with_background(Color::ONE);
        let traced = Tracer::new(&scene).with_max_depth(0).trace_primary(EYE, FORWARD, false);
        assert!(traced.hit);
        assert_eq!(traced.color, Color::ZERO);
    }

    #[test]
    fn refraction_through_unit_index_passes_straight() {
        // With a matching index the refracted ray keeps its direction and finds the
        // plane behind, blended by the transmissive coefficient.
        let glass = Material {
            transmissive: Color::ONE,
            refraction: 1.0,
            ..Material::default()
        };
        let wall = Material {
            ambient: Color::new(1.0, 0.5, 0.0),
            ..Material::default()
        };
        let scene = Scene::new(
            vec![
                Object::sphere(Vec3A::new(0.0, 0.0, -5.0), 1.0, glass),
                Object::plane(Vec3A::new(0.0, 0.0, -10.0), Vec3A::Z, wall),
            ],
            vec![Light::Ambient { color: Color::ONE }],
        );
        let traced = Tracer::new(&scene).trace_primary(EYE, FORWARD, false);
        assert!(traced.hit);
        assert!(traced.color.abs_diff_eq(Color::new(1.0, 0.5, 0.0), 1e-4));
    }

    #[test]
    fn critical_angle_switches_refraction_to_mirror() {
        // From inside a unit glass sphere, a ray along +X starting at height y
        // meets the wall with sin(incidence) = y. The critical angle for index 1.5
        // sits at sin = 2/3: below it the ray escapes to the background, above it
        // the ray keeps reflecting inside until the depth limit leaves it black.
        let glass = Material {
            transmissive: Color::ONE,
            refraction: 1.5,
            ..Material::default()
        };
        let scene = Scene::new(vec![Object::sphere(Vec3A::ZERO, 1.0, glass)], vec![])
            .with_background(Color::ONE);
        let tracer = Tracer::new(&scene);

        let below = Vec3A::new(0.0, 0.6, 0.0);
        let escaped = tracer.trace(below, below + Vec3A::X, false, 0, false);
        assert!(escaped.hit);
        assert!(escaped.color.abs_diff_eq(Color::ONE, 1e-6));

        let above = Vec3A::new(0.0, 0.75, 0.0);
        let trapped = tracer.trace(above, above + Vec3A::X, false, 0, false);
        assert!(trapped.hit);
        assert!(trapped.color.abs_diff_eq(Color::ZERO, 1e-6));
    }

    #[test]
    fn planes_never_leave_the_ambient_medium() {
        let plane = Object::plane(Vec3A::ZERO, Vec3A::Y, Material::default());
        let sphere = red_sphere(Material::default());
        assert!(next_medium(&plane, true));
        assert!(next_medium(&plane, false));
        assert!(!next_medium(&sphere, true));
        assert!(next_medium(&sphere, false));
    }
}
