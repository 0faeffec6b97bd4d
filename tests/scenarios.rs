//! End-to-end light transport scenarios on small hand-built scenes.

use glam::Vec3A;
use whitted::loader::parse_scene;
use whitted::ray::Ray;
use whitted::shading::{in_shadow, light_sample};
use whitted::{Color, Light, Material, Object, Scene, Tracer};

const EYE: Vec3A = Vec3A::ZERO;
const FORWARD: Vec3A = Vec3A::new(0.0, 0.0, -1.0);

/// Aims slightly above the sphere's center, where the surface faces the light
/// overhead. The point straight ahead faces away from it (N·L < 0).
const UPPER_FRONT: Vec3A = Vec3A::new(0.0, 0.15, -1.0);

fn red_sphere() -> Object {
    Object::sphere(Vec3A::new(0.0, 0.0, -5.0), 1.0, Material::diffuse(Color::new(1.0, 0.0, 0.0)))
}

fn white_light_above() -> Light {
    Light::Point {
        color: Color::ONE,
        position: Vec3A::new(0.0, 5.0, -5.0),
    }
}

#[test]
fn rays_missing_everything_return_background() {
    let background = Color::new(0.2, 0.3, 0.4);
    let scene = Scene::new(vec![red_sphere()], vec![white_light_above()]).with_background(background);
    let tracer = Tracer::new(&scene);

    for target in [Vec3A::new(0.0, 0.0, 1.0), Vec3A::new(5.0, 0.0, -1.0), Vec3A::new(0.0, -3.0, -1.0)] {
        let traced = tracer.trace_primary(EYE, target, false);
        assert!(!traced.hit);
        assert_eq!(traced.color, background);
    }
}

#[test]
fn lit_sphere_is_red_dominant() {
    let scene = Scene::new(vec![red_sphere()], vec![white_light_above()]);
    let tracer = Tracer::new(&scene);

    assert!(tracer.trace_primary(EYE, FORWARD, false).hit);

    let traced = tracer.trace_primary(EYE, UPPER_FRONT, false);
    assert!(traced.hit);
    assert!(traced.color.x > 0.3);
    assert_eq!(traced.color.y, 0.0);
    assert_eq!(traced.color.z, 0.0);
}

#[test]
fn plane_between_light_and_sphere_leaves_ambient_only() {
    let sphere = Object::sphere(
        Vec3A::new(0.0, 0.0, -5.0),
        1.0,
        Material {
            ambient: Color::new(0.1, 0.0, 0.0),
            diffuse: Color::new(1.0, 0.0, 0.0),
            specular: Color::ONE,
            shininess: 16.0,
            ..Material::default()
        },
    );
    let blocker = Object::plane(Vec3A::new(0.0, 3.0, 0.0), Vec3A::NEG_Y, Material::default());
    let scene = Scene::new(
        vec![sphere, blocker],
        vec![Light::Ambient { color: Color::ONE }, white_light_above()],
    );

    let ray = Ray::through(EYE, UPPER_FRONT);
    let hit = scene.intersect(&ray);
    assert_eq!(hit.object, Some(0));
    let point = ray.at(hit.distance);
    let light = &scene.lights[1];
    let sample = light_sample(light, point, scene.directional_distance()).unwrap();
    assert!(in_shadow(&scene, light, &sample, point, &hit));

    let traced = Tracer::new(&scene).trace_primary(EYE, UPPER_FRONT, false);
    assert!(traced.hit);
    assert!(traced.color.abs_diff_eq(Color::new(0.1, 0.0, 0.0), 1e-6));
}

#[test]
fn shadow_ray_landing_on_the_same_surface_never_shadows() {
    let scene = Scene::new(vec![red_sphere()], vec![white_light_above()]);
    let ray = Ray::through(EYE, UPPER_FRONT);
    let hit = scene.intersect(&ray);
    let point = ray.at(hit.distance);
    let sample = light_sample(&scene.lights[0], point, scene.directional_distance()).unwrap();
    assert!(!in_shadow(&scene, &scene.lights[0], &sample, point, &hit));
}

#[test]
fn transparent_plane_blends_half_local_half_background() {
    let background = Color::new(0.0, 0.0, 0.8);
    let pane = Object::plane(
        Vec3A::new(0.0, 0.0, -2.0),
        Vec3A::Z,
        Material {
            ambient: Color::new(0.6, 0.2, 0.0),
            transmissive: Color::splat(0.5),
            ..Material::default()
        },
    );
    let scene = Scene::new(vec![pane], vec![Light::Ambient { color: Color::ONE }]).with_background(background);

    let traced = Tracer::new(&scene).trace_primary(EYE, FORWARD, false);
    let local = Color::new(0.6, 0.2, 0.0);
    assert!(traced.hit);
    assert!(traced.color.abs_diff_eq(local * 0.5 + background * 0.5, 1e-6));
}

#[test]
fn spot_light_outside_cone_contributes_nothing() {
    let spot = Light::Spot {
        color: Color::ONE,
        position: Vec3A::new(0.0, 5.0, -5.0),
        direction: Vec3A::new(0.0, 0.0, -1.0),
        cutoff: 10.0,
    };
    let scene = Scene::new(vec![red_sphere()], vec![spot]);
    let traced = Tracer::new(&scene).trace_primary(EYE, FORWARD, false);
    assert!(traced.hit);
    assert_eq!(traced.color, Color::ZERO);
}

#[test]
fn directional_light_shades_like_a_distant_sun() {
    let sun = Light::Directional {
        color: Color::ONE,
        direction: Vec3A::new(0.0, 0.0, -1.0),
    };
    let scene = Scene::new(vec![red_sphere()], vec![sun]);
    let traced = Tracer::new(&scene).trace_primary(EYE, FORWARD, false);
    assert!(traced.hit);
    assert!(traced.color.abs_diff_eq(Color::new(1.0, 0.0, 0.0), 1e-5));
}

#[test]
fn mesh_faces_shadow_each_other_by_triangle() {
    let scene = parse_scene(
        r#"{
            "objects": [
                { "type": "mesh",
                  "triangles": [
                      [[-2, -2, -6], [2, -2, -6], [0, 2, -6]],
                      [[-1, -1, -3], [1, -1, -3], [0, 1, -3]]
                  ],
                  "material": { "diffuse": [0, 1, 0] } }
            ],
            "lights": [ { "type": "point", "color": [1, 1, 1], "position": [0, 0, 0] } ]
        }"#,
    )
    .unwrap();
    let tracer = Tracer::new(&scene);

    // Straight ahead the near face is struck and lit head-on.
    let near = tracer.trace_primary(EYE, FORWARD, false);
    assert!(near.color.abs_diff_eq(Color::new(0.0, 1.0, 0.0), 1e-5));

    // From an eye beside the near face, the far face point behind it is shadowed
    // by the near face of the very same mesh.
    let eye = Vec3A::new(1.5, 0.0, -2.0);
    let behind = tracer.trace_primary(eye, Vec3A::new(0.0, 0.0, -6.0), false);
    assert!(behind.hit);
    assert_eq!(behind.color, Color::ZERO);
}
