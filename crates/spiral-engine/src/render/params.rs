use crate::paint::Color;

/// Fixed-function draw state for a line renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawParams {
    /// Color the frame is cleared to before drawing.
    pub clear: Color,
    pub topology: wgpu::PrimitiveTopology,
    /// Requested line width in pixels. wgpu rasterizes lines 1px wide.
    pub line_width: f32,
    /// Requested point size in pixels. wgpu has no point size; points are 1px.
    pub point_size: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            clear: Color::black(),
            topology: wgpu::PrimitiveTopology::LineStrip,
            line_width: 2.0,
            point_size: 5.0,
        }
    }
}

impl DrawParams {
    /// Requested state the backend cannot honour, as human-readable notes.
    pub fn unsupported(&self) -> Vec<String> {
        let mut notes = Vec::new();
        let is_lines = matches!(
            self.topology,
            wgpu::PrimitiveTopology::LineList | wgpu::PrimitiveTopology::LineStrip
        );

        if is_lines && self.line_width != 1.0 {
            notes.push(format!("line width {} (drawn at 1px)", self.line_width));
        }
        if self.point_size != 1.0 {
            notes.push(format!("point size {} (drawn at 1px)", self.point_size));
        }
        notes
    }
}
