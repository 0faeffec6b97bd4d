//! Local Phong illumination with spot cones and hard shadows.

use glam::Vec3A;
use log::info;

use crate::hittable::Intersection;
use crate::material::{is_present, reflect, Color, Material};
use crate::ray::Ray;
use crate::scene::{Light, Scene};

/// Shadow rays use `(P − light) / SHADOW_RAY_SCALE` as their direction.
const SHADOW_RAY_SCALE: f32 = 100.0;

/// Where a light sits relative to a shaded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit vector from the point toward the light. Zero for ambient lights.
    pub direction: Vec3A,
    /// Light position, synthesized far away for directional lights.
    pub position: Vec3A,
}

/// Resolve the direction toward `light` as seen from `point`.
///
/// Returns `None` when the point lies outside a spot light's cone. The cone has
/// a hard edge with no falloff.
pub fn light_sample(light: &Light, point: Vec3A, directional_distance: f32) -> Option<LightSample> {
    match *light {
        Light::Ambient { .. } => Some(LightSample {
            direction: Vec3A::ZERO,
            position: point,
        }),
        Light::Directional { direction, .. } => {
            let toward = (-direction).normalize();
            Some(LightSample {
                direction: toward,
                position: point + directional_distance * toward,
            })
        }
        Light::Point { position, .. } => Some(LightSample {
            direction: (position - point).normalize(),
            position,
        }),
        Light::Spot {
            position,
            direction,
            cutoff,
            ..
        } => {
            let toward = (position - point).normalize();
            let facing = direction.normalize();
            (toward.dot(-facing) >= cutoff.to_radians().cos()).then_some(LightSample {
                direction: toward,
                position,
            })
        }
    }
}

/// Whether `hit` is hidden from a non-ambient light.
///
/// A ray is cast from the light toward the shaded point; the point is lit only
/// when that ray's nearest hit is the very same object and triangle.
pub fn in_shadow(scene: &Scene, light: &Light, sample: &LightSample, point: Vec3A, hit: &Intersection) -> bool {
    if light.is_ambient() {
        return false;
    }

    let shadow_ray = Ray::new(sample.position, (point - sample.position) / SHADOW_RAY_SCALE);
    let blocker = scene.intersect(&shadow_ray);
    blocker.is_hit() && !blocker.same_surface(hit)
}

/// Phong contribution of one visible light.
///
/// `n` is the unit surface normal, `l` the unit direction toward the light and
/// `v` the unit direction toward the viewer. Zero material channels are skipped.
pub fn phong(material: &Material, light: &Light, n: Vec3A, l: Vec3A, v: Vec3A) -> Color {
    let color = light.color();

    if light.is_ambient() {
        return if is_present(material.ambient) {
            color * material.ambient
        } else {
            Color::ZERO
        };
    }

    let mut total = Color::ZERO;

    if is_present(material.diffuse) {
        total += color * material.diffuse * n.dot(l).max(0.0);
    }

    if is_present(material.specular) {
        let highlight = reflect(l, n).dot(v);
        if highlight > 0.0 {
            total += color * material.specular * highlight.powf(material.shininess);
        }
    }

    total
}

/// Sum of Phong terms over every light that reaches `point`.
pub fn local_illumination(
    scene: &Scene,
    hit: &Intersection,
    material: &Material,
    point: Vec3A,
    normal: Vec3A,
    view: Vec3A,
    pick: bool,
) -> Color {
    let mut total = Color::ZERO;

    for (index, light) in scene.lights.iter().enumerate() {
        let Some(sample) = light_sample(light, point, scene.directional_distance()) else {
            if pick {
                info!("  light {} ({}) cut off by spot cone", index, light.kind());
            }
            continue;
        };

        if in_shadow(scene, light, &sample, point, hit) {
            if pick {
                info!("  light {} ({}) blocked, point in shadow", index, light.kind());
            }
            continue;
        }

        total += phong(material, light, normal, sample.direction, view);
    }

    total
}
