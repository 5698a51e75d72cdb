//! Particle network simulation
//!
//! Kinematics, connection rendering and render-loop scheduling for the
//! animated background. Host dependencies are injected through
//! [`HostContext`], so the whole module runs headless under test.

pub mod config;
pub mod network;
pub mod particle;
pub mod traits;

pub use config::{DeviceTier, NetworkConfig, NetworkSettings};
pub use network::{edge_opacity, LoopState, ParticleSimulation};
pub use particle::Particle;
pub use traits::{
    DrawSurface, FixedViewport, FrameHandle, FrameScheduler, HostContext, ManualScheduler, Viewport,
};
