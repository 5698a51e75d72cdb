//! # Vertex Data Structures
//!
//! GPU-compatible vertex format for the 2D shape pipeline.

/// A 2D vertex in surface pixel space with its own color.
///
/// # Memory Layout
///
/// `#[repr(C)]` keeps the layout C-compatible so slices can be cast to bytes
/// with `bytemuck` and uploaded directly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2D {
    /// Position in pixels, origin top-left, y down
    pub position: [f32; 2],
    /// Straight-alpha RGBA color
    pub color: [f32; 4],
}

impl Vertex2D {
    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x2) at shader location 0
    /// - Attribute 1: Color (Float32x4) at shader location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex2D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Viewport size uniform used to map pixels to clip space
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    pub padding: [f32; 2],
}

impl ViewportUniform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width.max(1) as f32, height.max(1) as f32],
            padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex2D::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn test_viewport_uniform_never_zero() {
        let uniform = ViewportUniform::new(0, 600);
        assert_eq!(uniform.size, [1.0, 600.0]);
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
    }
}
