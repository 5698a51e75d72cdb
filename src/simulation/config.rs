//! Particle network configuration
//!
//! Two layers of configuration exist:
//!
//! - [`NetworkConfig`] is derived once from the viewport width at
//!   construction and fixes how many particles exist and how far apart two
//!   particles may be and still be connected. The tiers cap the O(n²)
//!   connection pass on small devices.
//! - [`NetworkSettings`] holds the fixed tuning constants (friction, pointer
//!   repulsion, colors) and host preferences such as reduced motion.

use crate::gfx::color::Rgba;

/// Viewport width below which the mobile tier applies
pub const TABLET_MIN_WIDTH: u32 = 768;
/// Viewport width from which the desktop tier applies
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

/// Device class derived from the viewport width
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceTier {
    pub fn from_width(width: u32) -> Self {
        if width < TABLET_MIN_WIDTH {
            DeviceTier::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            DeviceTier::Tablet
        } else {
            DeviceTier::Desktop
        }
    }

    /// Population and connection range for this tier
    pub fn config(self) -> NetworkConfig {
        match self {
            DeviceTier::Mobile => NetworkConfig {
                particle_count: 15,
                connection_distance: 100,
            },
            DeviceTier::Tablet => NetworkConfig {
                particle_count: 25,
                connection_distance: 120,
            },
            DeviceTier::Desktop => NetworkConfig {
                particle_count: 50,
                connection_distance: 150,
            },
        }
    }
}

/// Per-instance configuration, immutable once the particles are created
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    pub particle_count: usize,
    /// Maximum distance in pixels at which two particles get an edge
    pub connection_distance: u32,
}

impl NetworkConfig {
    pub fn for_viewport_width(width: u32) -> Self {
        DeviceTier::from_width(width).config()
    }
}

/// Tuning constants and host preferences
#[derive(Clone, Debug)]
pub struct NetworkSettings {
    /// Velocity multiplier applied every frame
    pub friction: f32,
    /// Distance in pixels within which the pointer pushes particles away
    pub repel_radius: f32,
    /// Velocity change applied to each particle inside the repel radius
    pub repel_strength: f32,
    /// Opacity multiplier applied to every connection line
    pub edge_dimming: f32,
    pub edge_width: f32,
    pub particle_radius: f32,
    /// Initial velocity components are drawn from `[-spread/2, spread/2)`
    pub initial_speed_spread: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub color: Rgba,
    /// Seed for particle placement; `None` draws from the OS
    pub seed: Option<u64>,
    /// Draw one still frame instead of animating
    pub reduced_motion: bool,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            friction: 0.998,
            repel_radius: 100.0,
            repel_strength: 0.3,
            edge_dimming: 0.3,
            edge_width: 1.0,
            particle_radius: 2.0,
            initial_speed_spread: 0.5,
            min_opacity: 0.3,
            max_opacity: 0.8,
            color: Rgba::from_rgb8(99, 102, 241),
            seed: None,
            reduced_motion: false,
        }
    }
}

impl NetworkSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Sets pointer repulsion radius and strength (builder pattern)
    pub fn with_repel(mut self, radius: f32, strength: f32) -> Self {
        self.repel_radius = radius;
        self.repel_strength = strength;
        self
    }
}
