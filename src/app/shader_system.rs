//! Pluggable shader system
//!
//! Shaders are registered once and drawn in registration order each frame,
//! so the registration order is the painter's order of the scene.

use std::any::Any;
use std::collections::HashMap;

use wgpu::{Device, Queue, RenderPass, SurfaceConfiguration};

/// Trait that all shaders must implement
pub trait Shader: Send + Sync {
    /// Returns the shader's unique name
    fn name(&self) -> &str;

    /// Initializes the shader with the given device and configuration
    fn init(&mut self, device: &Device, config: &SurfaceConfiguration);

    /// Begins a new frame, uploading whatever was queued since the last one
    fn begin_frame(&mut self, device: &Device, queue: &Queue);

    /// Renders the shader's contents to the given render pass
    fn render<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>);

    /// Ends the frame, clearing queued geometry
    fn end_frame(&mut self);

    /// Allows downcasting to concrete types
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Registry for managing shaders
#[derive(Default)]
pub struct ShaderRegistry {
    shaders: HashMap<String, Box<dyn Shader>>,
    render_order: Vec<String>,
}

impl ShaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shader; shaders are rendered in the order they are registered
    pub fn register(&mut self, shader: Box<dyn Shader>) {
        let name = shader.name().to_string();
        self.render_order.push(name.clone());
        self.shaders.insert(name, shader);
    }

    /// Initializes all registered shaders
    pub fn init_all(&mut self, device: &Device, config: &SurfaceConfiguration) {
        for shader in self.shaders.values_mut() {
            shader.init(device, config);
        }
    }

    /// Gets a shader by name as its concrete type
    pub fn get_typed_mut<T: Shader + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.shaders
            .get_mut(name)
            .and_then(|shader| shader.as_any_mut().downcast_mut::<T>())
    }

    /// Names in render order
    pub fn names(&self) -> &[String] {
        &self.render_order
    }

    pub fn begin_frame(&mut self, device: &Device, queue: &Queue) {
        for shader in self.shaders.values_mut() {
            shader.begin_frame(device, queue);
        }
    }

    /// Renders all shaders in registration order
    pub fn render_all<'rpass>(&'rpass self, rpass: &mut RenderPass<'rpass>) {
        for name in &self.render_order {
            if let Some(shader) = self.shaders.get(name) {
                shader.render(rpass);
            }
        }
    }

    pub fn end_frame(&mut self) {
        for shader in self.shaders.values_mut() {
            shader.end_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::line_renderer::LineRenderer;
    use crate::app::rect_renderer::RectRenderer;

    #[test]
    fn test_registration_order_and_downcast() {
        let mut registry = ShaderRegistry::new();
        registry.register(Box::new(RectRenderer::new([1280.0, 720.0])));
        registry.register(Box::new(LineRenderer::new([1280.0, 720.0])));

        assert_eq!(registry.names(), ["rect".to_string(), "line".to_string()]);
        assert!(registry.get_typed_mut::<RectRenderer>("rect").is_some());
        assert!(registry.get_typed_mut::<LineRenderer>("rect").is_none());
        assert!(registry.get_typed_mut::<LineRenderer>("missing").is_none());
    }
}
