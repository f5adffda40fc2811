//! Rect renderer for filled, axis-aligned rectangles
//!
//! Every building, obstacle, skyline block and the hero are drawn as one quad.

use wgpu::{Device, Queue, RenderPass, SurfaceConfiguration};

use super::shader_system::Shader;
use super::shape_pipeline::{ShapePipeline, ShapeVertex};
use crate::sim::Rect;

/// Filled rectangle (rendering command)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilledRect {
    pub rect: Rect,
    pub color: [f32; 4],
}

impl FilledRect {
    pub fn new(rect: Rect, color: [f32; 4]) -> Self {
        Self { rect, color }
    }

    /// Two triangles covering the rect
    pub fn to_vertices(&self) -> [ShapeVertex; 6] {
        let Rect { x, y, w, h } = self.rect;
        let v = |px: f32, py: f32| ShapeVertex {
            position: [px, py],
            color: self.color,
        };
        let (tl, tr, br, bl) = (v(x, y), v(x + w, y), v(x + w, y + h), v(x, y + h));
        [tl, bl, br, tl, br, tr]
    }
}

/// Rect renderer shader
pub struct RectRenderer {
    gpu: Option<ShapePipeline>,
    rects: Vec<FilledRect>,
    /// Logical size of the drawing area; rect coordinates are in this space
    coord_size: [f32; 2],
}

impl RectRenderer {
    pub fn new(coord_size: [f32; 2]) -> Self {
        Self {
            gpu: None,
            rects: Vec::new(),
            coord_size,
        }
    }

    /// Queues a rect for this frame
    pub fn draw_rect(&mut self, rect: FilledRect) {
        self.rects.push(rect);
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

impl Shader for RectRenderer {
    fn name(&self) -> &str {
        "rect"
    }

    fn init(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.gpu = Some(ShapePipeline::new(device, config, "Rect"));
    }

    fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        let vertices: Vec<ShapeVertex> = self.rects.iter().flat_map(|r| r.to_vertices()).collect();
        if let Some(gpu) = &mut self.gpu {
            gpu.upload(device, queue, self.coord_size, &vertices, "Rect");
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
