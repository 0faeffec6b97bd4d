//! JSON scene descriptions.
//!
//! ```json
//! {
//!   "camera": { "field": 60, "background": [0, 0, 0] },
//!   "objects": [
//!     { "type": "sphere", "position": [0, 0, -5], "radius": 1,
//!       "material": { "diffuse": [1, 0, 0] } }
//!   ],
//!   "lights": [ { "type": "point", "position": [0, 5, -5], "color": [1, 1, 1] } ]
//! }
//! ```
//!
//! Every material channel is optional and defaults to zero, which disables it.

use std::path::{Path, PathBuf};

use glam::Vec3A;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::material::{Color, Material};
use crate::mesh::Triangle;
use crate::scene::{Light, Object, Scene};

/// Reasons a scene description cannot be turned into a [`Scene`].
#[derive(Debug, Error)]
pub enum SceneError {
    /// The file could not be read.
    #[error("unable to open scene file {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid JSON or has the wrong shape.
    #[error("invalid scene description: {0}")]
    Parse(#[from] serde_json::Error),
    /// An object names a type other than sphere, plane or mesh.
    #[error("object {index} has unknown type '{kind}'")]
    UnknownObjectType {
        /// Position in the `objects` array.
        index: usize,
        /// Type name found in the file.
        kind: String,
    },
    /// A light names a type other than ambient, directional, point or spot.
    #[error("light {index} has unknown type '{kind}'")]
    UnknownLightType {
        /// Position in the `lights` array.
        index: usize,
        /// Type name found in the file.
        kind: String,
    },
    /// A variant lacks a field it cannot work without.
    #[error("{entry} {index} ({kind}) is missing required field '{field}'")]
    MissingField {
        /// `"object"` or `"light"`.
        entry: &'static str,
        /// Position in its array.
        index: usize,
        /// Variant name.
        kind: String,
        /// Missing key.
        field: &'static str,
    },
    /// The scene has nothing to render.
    #[error("scene contains no objects")]
    Empty,
}

type Vec3Raw = [f32; 3];

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    camera: CameraFile,
    #[serde(default)]
    objects: Vec<ObjectFile>,
    #[serde(default)]
    lights: Vec<LightFile>,
}

#[derive(Debug, Default, Deserialize)]
struct CameraFile {
    field: Option<f32>,
    background: Option<Vec3Raw>,
}

#[derive(Debug, Deserialize)]
struct ObjectFile {
    #[serde(rename = "type")]
    kind: String,
    position: Option<Vec3Raw>,
    normal: Option<Vec3Raw>,
    radius: Option<f32>,
    triangles: Option<Vec<[Vec3Raw; 3]>>,
    #[serde(default)]
    material: MaterialFile,
}

#[derive(Debug, Default, Deserialize)]
struct MaterialFile {
    ambient: Option<Vec3Raw>,
    diffuse: Option<Vec3Raw>,
    specular: Option<Vec3Raw>,
    shininess: Option<f32>,
    reflective: Option<Vec3Raw>,
    transmissive: Option<Vec3Raw>,
    refraction: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct LightFile {
    #[serde(rename = "type")]
    kind: String,
    color: Option<Vec3Raw>,
    position: Option<Vec3Raw>,
    direction: Option<Vec3Raw>,
    cutoff: Option<f32>,
    radius: Option<f32>,
}

fn vec3(raw: Vec3Raw) -> Vec3A {
    Vec3A::from_array(raw)
}

fn channel(raw: Option<Vec3Raw>) -> Color {
    raw.map_or(Color::ZERO, vec3)
}

impl From<MaterialFile> for Material {
    fn from(file: MaterialFile) -> Self {
        Material {
            ambient: channel(file.ambient),
            diffuse: channel(file.diffuse),
            specular: channel(file.specular),
            shininess: file.shininess.unwrap_or(0.0),
            reflective: channel(file.reflective),
            transmissive: channel(file.transmissive),
            refraction: file.refraction.unwrap_or(0.0),
        }
    }
}

fn require<T>(value: Option<T>, entry: &'static str, index: usize, kind: &str, field: &'static str) -> Result<T, SceneError> {
    value.ok_or_else(|| SceneError::MissingField {
        entry,
        index,
        kind: kind.to_string(),
        field,
    })
}

impl ObjectFile {
    fn into_object(self, index: usize) -> Result<Object, SceneError> {
        let position = self.position.map_or(Vec3A::ZERO, vec3);
        let kind = self.kind.to_ascii_lowercase();
        let material = Material::from(self.material);

        match kind.as_str() {
            "sphere" => {
                let radius = require(self.radius, "object", index, &kind, "radius")?;
                Ok(Object::sphere(position, radius, material))
            }
            "plane" => {
                let normal = require(self.normal, "object", index, &kind, "normal")?;
                Ok(Object::plane(position, vec3(normal), material))
            }
            "mesh" => {
                let triangles = require(self.triangles, "object", index, &kind, "triangles")?
                    .into_iter()
                    .map(|[a, b, c]| Triangle::new(vec3(a), vec3(b), vec3(c)))
                    .collect();
                Ok(Object::mesh(position, triangles, material))
            }
            _ => Err(SceneError::UnknownObjectType {
                index,
                kind: self.kind,
            }),
        }
    }
}

impl LightFile {
    fn into_light(self, index: usize) -> Result<Light, SceneError> {
        let kind = self.kind.to_ascii_lowercase();
        let color = vec3(require(self.color, "light", index, &kind, "color")?);

        if let Some(radius) = self.radius {
            debug!("Light {} radius {} ignored: area lights are not sampled", index, radius);
        }

        match kind.as_str() {
            "ambient" => Ok(Light::Ambient { color }),
            "directional" => Ok(Light::Directional {
                color,
                direction: vec3(require(self.direction, "light", index, &kind, "direction")?),
            }),
            "point" => Ok(Light::Point {
                color,
                position: vec3(require(self.position, "light", index, &kind, "position")?),
            }),
            "spot" => Ok(Light::Spot {
                color,
                position: vec3(require(self.position, "light", index, &kind, "position")?),
                direction: vec3(require(self.direction, "light", index, &kind, "direction")?),
                cutoff: require(self.cutoff, "light", index, &kind, "cutoff")?,
            }),
            _ => Err(SceneError::UnknownLightType {
                index,
                kind: self.kind,
            }),
        }
    }
}

/// Build a scene from a JSON document.
pub fn parse_scene(json: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = serde_json::from_str(json)?;

    let objects = file
        .objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| object.into_object(index))
        .collect::<Result<Vec<_>, _>>()?;
    if objects.is_empty() {
        return Err(SceneError::Empty);
    }

    let lights = file
        .lights
        .into_iter()
        .enumerate()
        .map(|(index, light)| light.into_light(index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut scene = Scene::new(objects, lights);
    if let Some(fov) = file.camera.field {
        info!("Setting fov to {} degrees", fov);
        scene = scene.with_fov(fov);
    }
    if let Some(background) = file.camera.background {
        let background = vec3(background);
        info!("Setting background colour to {}", background);
        scene = scene.with_background(background);
    }

    Ok(scene)
}

/// Read and build a scene from a JSON file.
pub fn load_scene(path: &Path) -> Result<Scene, SceneError> {
    info!("Loading scene {}", path.display());
    let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = parse_scene(&json)?;
    info!("Scene has {} objects and {} lights", scene.objects.len(), scene.lights.len());
    Ok(scene)
}
