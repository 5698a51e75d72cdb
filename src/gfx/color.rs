//! # Color Values
//!
//! Straight (non-premultiplied) RGBA colors shared by the simulation and the
//! renderer. Components are stored as `f32` in `[0, 1]`.

/// An RGBA color with independent alpha.
///
/// # Examples
///
/// ```
/// use particle_network::gfx::color::Rgba;
///
/// let indigo = Rgba::from_rgb8(99, 102, 241);
/// let faded = indigo.with_alpha(0.3);
/// assert_eq!(faded.a, 0.3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Creates an opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the same hue with a different alpha, clamped to `[0, 1]`
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Packs the color for upload in a vertex buffer
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Converts to a wgpu clear color
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}
