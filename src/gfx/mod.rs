//! # Graphics Module
//!
//! Everything needed to put the particle network on screen:
//!
//! - **Colors and themes** ([`color`], [`theme`]) - straight-alpha colors and
//!   the dark/light background
//! - **Shape batching** ([`batch`]) - the CPU-side [`DrawSurface`] that
//!   tessellates circles and lines into triangles
//! - **Rendering** ([`render_engine`]) - wgpu device, surface and pipeline
//!
//! [`DrawSurface`]: crate::simulation::DrawSurface

pub mod batch;
pub mod color;
pub mod error;
pub mod render_engine;
pub mod theme;
pub mod vertex;

// Re-export commonly used types
pub use batch::ShapeBatch;
pub use color::Rgba;
pub use error::RenderError;
pub use render_engine::RenderEngine;
pub use theme::Theme;
