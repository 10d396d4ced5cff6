use wgpu::util::DeviceExt;

use crate::geometry::Vertex;

/// Vertex data uploaded once into a GPU buffer, plus its layout.
///
/// The buffer is `VERTEX`-only: it cannot be written after creation.
pub struct GeometryBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "uploaded {} vertices ({} bytes) to `{label}`",
            vertices.len(),
            buffer.size()
        );

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Layout descriptor matching the buffer contents.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        Vertex::layout()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Size of the uploaded data in bytes.
    pub fn byte_len(&self) -> u64 {
        self.buffer.size()
    }

    pub fn usage(&self) -> wgpu::BufferUsages {
        self.buffer.usage()
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    /// Frees the GPU memory now rather than when the device goes away.
    pub fn release(self) {
        log::debug!("releasing geometry buffer ({} vertices)", self.vertex_count);
        self.buffer.destroy();
    }
}
