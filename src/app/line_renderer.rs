//! Line renderer for drawing thick coloured lines
//!
//! Lines are represented as quads (two triangles) to support variable thickness.
//! Used for hitbox outlines in the debug overlay.

use wgpu::{Device, Queue, RenderPass, SurfaceConfiguration};

use super::shader_system::Shader;
use super::shape_pipeline::{ShapePipeline, ShapeVertex};

/// Line segment definition
#[derive(Clone, Debug)]
pub struct Line {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub thickness: f32,
    pub color: [f32; 4],
}

impl Line {
    pub fn new(from: [f32; 2], to: [f32; 2], thickness: f32, color: [f32; 4]) -> Self {
        Self {
            from,
            to,
            thickness,
            color,
        }
    }

    /// Generates vertices for this line as a quad; empty for zero-length lines
    fn to_vertices(&self) -> Vec<ShapeVertex> {
        let dx = self.to[0] - self.from[0];
        let dy = self.to[1] - self.from[1];
        let len = (dx * dx + dy * dy).sqrt();

        if len == 0.0 {
            return vec![];
        }

        // Perpendicular direction for thickness
        let px = -dy / len * self.thickness * 0.5;
        let py = dx / len * self.thickness * 0.5;

        let v = |x: f32, y: f32| ShapeVertex {
            position: [x, y],
            color: self.color,
        };
        let v1 = v(self.from[0] + px, self.from[1] + py);
        let v2 = v(self.from[0] - px, self.from[1] - py);
        let v3 = v(self.to[0] - px, self.to[1] - py);
        let v4 = v(self.to[0] + px, self.to[1] + py);

        vec![v1, v2, v3, v1, v3, v4]
    }
}

/// Line renderer shader
pub struct LineRenderer {
    gpu: Option<ShapePipeline>,
    lines: Vec<Line>,
    coord_size: [f32; 2],
}

impl LineRenderer {
    pub fn new(coord_size: [f32; 2]) -> Self {
        Self {
            gpu: None,
            lines: Vec::new(),
            coord_size,
        }
    }

    /// Adds a line to be rendered
    pub fn draw_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Shader for LineRenderer {
    fn name(&self) -> &str {
        "line"
    }

    fn init(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.gpu = Some(ShapePipeline::new(device, config, "Line"));
    }

    fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        let vertices: Vec<ShapeVertex> = self.lines.iter().flat_map(Line::to_vertices).collect();
        if let Some(gpu) = &mut self.gpu {
            gpu.upload(device, queue, self.coord_size, &vertices, "Line");
        }
    }

    fn render<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>) {
        if let Some(gpu) = &self.gpu {
            gpu.render(rpass);
        }
    }

    fn end_frame(&mut self) {
        self.clear();
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_line_is_skipped() {
        let line = Line::new([5.0, 5.0], [5.0, 5.0], 2.0, [1.0; 4]);
        assert!(line.to_vertices().is_empty());
    }

    #[test]
    fn test_horizontal_line_thickness() {
        let line = Line::new([0.0, 10.0], [100.0, 10.0], 4.0, [1.0; 4]);
        let vertices = line.to_vertices();
        assert_eq!(vertices.len(), 6);
        for v in vertices {
            assert!((v.position[1] - 10.0).abs() <= 2.0 + f32::EPSILON);
        }
    }
}
