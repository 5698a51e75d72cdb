//! Renderer error types

use thiserror::Error;

/// Failures while setting up or driving the GPU renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to acquire frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
