//! Camera for ray generation and scene rendering

use glam::{Mat3A, Vec3A};
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

use crate::tracer::{Traced, Tracer};

/// Supersampling counts the viewer understands.
pub const ALIAS_RAY_CHOICES: [u32; 2] = [1, 4];

/// Pinhole camera looking down its local -Z axis.
///
/// The viewport sits at focal distance `focal` in front of the eye and spans
/// `2·focal·tan(fov/2)` vertically; its width follows the image aspect ratio.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Field of view in degrees
    pub fov: f32,
    /// Distance from the eye to the viewport
    pub focal: f32,
    /// Eye position in world space
    pub eye: Vec3A,
    /// Euler angles in degrees, applied about X, then Y, then Z
    pub rotation: Vec3A,
    /// Requested rays per pixel. Only one is traced for now; see [`Camera::render`].
    pub alias_rays: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 512x512 image, 60° FOV, eye at the origin looking down -Z.
    pub fn new() -> Self {
        Self {
            image_width: 512,
            image_height: 512,
            fov: 60.0,
            focal: 1.0,
            eye: Vec3A::ZERO,
            rotation: Vec3A::ZERO,
            alias_rays: 1,
        }
    }

    fn orientation(&self) -> Mat3A {
        let angles = Vec3A::new(
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        Mat3A::from_rotation_x(angles.x) * Mat3A::from_rotation_y(angles.y) * Mat3A::from_rotation_z(angles.z)
    }

    /// Point on the viewport, in camera space, through the center of pixel `(x, y)`.
    ///
    /// `y` counts rows from the bottom of the image.
    pub fn viewport_point(&self, x: u32, y: u32) -> Vec3A {
        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;
        let aspect_ratio = width / height;

        let h = self.focal * (self.fov.to_radians() / 2.0).tan();
        let w = h * aspect_ratio;
        let (left, right, bottom, top) = (-w, w, -h, h);

        let u = left + (right - left) * (x as f32 + 0.5) / width;
        let v = bottom + (top - bottom) * (y as f32 + 0.5) / height;
        Vec3A::new(u, v, -self.focal)
    }

    /// World-space target of the primary ray through pixel `(x, y)`, `y` from the bottom.
    pub fn target(&self, x: u32, y: u32) -> Vec3A {
        self.eye + self.orientation() * self.viewport_point(x, y)
    }

    /// Trace the pixel at `(x, y)` with diagnostics enabled, `y` counted from the top
    /// like image rows.
    pub fn pick(&self, tracer: &Tracer, x: u32, y: u32) -> Traced {
        let row = self.image_height.saturating_sub(1).saturating_sub(y);
        info!("--------------------------- Raycast -----------------------------");
        tracer.trace_primary(self.eye, self.target(x, row), true)
    }

    /// Renders the scene, one primary ray per pixel.
    ///
    /// Rows are processed in parallel; the scene is shared read-only between
    /// workers. Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(&self, tracer: &Tracer) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        if self.alias_rays > 1 {
            warn!("{} rays per pixel requested; supersampling is not implemented, tracing 1", self.alias_rays);
        }

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(self.image_width, self.image_height);

        info!("Generating image using {} CPU cores...", rayon::current_num_threads());
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_width) * u64::from(self.image_height));
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}") {
            pb.set_style(style);
        }

        let last_row = self.image_height.saturating_sub(1);
        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let traced = tracer.trace_primary(self.eye, self.target(i, last_row - j), false);
            *pixel = Rgb(traced.color.to_array());
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}
