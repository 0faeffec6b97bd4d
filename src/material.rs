//! Surface materials for Phong shading and recursive light transport.
//!
//! Every channel uses zero as the "absent" sentinel: a zero reflective color
//! disables the mirror branch entirely, a zero refraction index selects plain
//! transparency instead of Snell refraction, and so on.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Material channels attached to every scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Color reflected under ambient lights.
    pub ambient: Color,
    /// Lambertian color under directional, point and spot lights.
    pub diffuse: Color,
    /// Highlight color of the specular lobe.
    pub specular: Color,
    /// Phong exponent of the specular lobe.
    pub shininess: f32,
    /// Mirror coefficient. Zero disables reflection rays.
    pub reflective: Color,
    /// Transparency coefficient. Zero disables transmission and refraction rays.
    pub transmissive: Color,
    /// Index of refraction. Zero means see-through without bending.
    pub refraction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            shininess: 0.0,
            reflective: Color::ZERO,
            transmissive: Color::ZERO,
            refraction: 0.0,
        }
    }
}

impl Material {
    /// Opaque material with only a diffuse channel.
    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse: color,
            ..Self::default()
        }
    }

    /// Whether reflection rays are spawned at this surface.
    pub fn is_reflective(&self) -> bool {
        is_present(self.reflective)
    }

    /// Whether the surface lets light straight through, without bending it.
    pub fn is_transparent(&self) -> bool {
        is_present(self.transmissive) && self.refraction == 0.0
    }

    /// Whether the surface bends transmitted light by Snell's law.
    pub fn is_refractive(&self) -> bool {
        is_present(self.transmissive) && self.refraction != 0.0
    }
}

/// A color channel participates in shading only when it is not exactly zero.
pub fn is_present(channel: Color) -> bool {
    channel != Color::ZERO
}

/// Mirror `v` about the normal `n`, both pointing away from the surface.
///
/// Returns the normalized direction `2(n·v)n − v`.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    (2.0 * n.dot(v) * n - v).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_channels_disable_transport_branches() {
        let matte = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        assert!(!matte.is_reflective());
        assert!(!matte.is_transparent());
        assert!(!matte.is_refractive());
    }

    #[test]
    fn refraction_index_selects_between_transparency_and_refraction() {
        let mut glass = Material {
            transmissive: Color::splat(0.5),
            ..Material::default()
        };
        assert!(glass.is_transparent());
        assert!(!glass.is_refractive());

        glass.refraction = 1.5;
        assert!(!glass.is_transparent());
        assert!(glass.is_refractive());
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let n = Vec3A::Y;
        let v = Vec3A::new(1.0, 1.0, 0.0).normalize();
        let r = reflect(v, n);
        assert!(r.abs_diff_eq(Vec3A::new(-1.0, 1.0, 0.0).normalize(), 1e-6));
    }
}
