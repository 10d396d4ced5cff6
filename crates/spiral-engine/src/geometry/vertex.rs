use bytemuck::{Pod, Zeroable};

/// Number of `f32` values per vertex: position (3) followed by color (3).
pub const FLOATS_PER_VERTEX: usize = 6;

/// Vertex layout (24 bytes):
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  color     [f32; 3]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    /// Vertex-buffer layout descriptor for a tightly packed `[Vertex]`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Views a vertex slice as its flat float stream.
    pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
        bytemuck::cast_slice(vertices)
    }
}
