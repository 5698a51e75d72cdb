// src/lib.rs
//! Particle Network
//!
//! An animated particle network background: drifting particles joined by
//! fading lines, pushed away by the pointer, paused while the window is
//! hidden. The simulation core is host-agnostic; [`app`] runs it in a winit
//! window rendered with wgpu.

pub mod app;
pub mod gfx;
pub mod options;
pub mod performance;
pub mod simulation;

// Re-export main types for convenience
pub use app::NetworkApp;
pub use simulation::{NetworkSettings, ParticleSimulation};
