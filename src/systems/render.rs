//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene pipeline and depth buffer
//! - Rebuilding the static or animated geometry layer when its nodes change

use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};
use ballsweep_core::SimulationState;
use ballsweep_render::{
    context::{ContextError, RenderContext},
    pipeline::{SceneUniforms, ScenePipeline},
    GeometryLayer, LayeredGeometry, SceneLighting,
};
use crate::config::RenderingConfig;
use super::frame_driver::FrameRenderer;

/// Render error types
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other rendering failure; the frame is skipped
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Convert an RGBA array to a wgpu clear color
fn clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ScenePipeline,
    geometry: LayeredGeometry,
    lighting: SceneLighting,
    clear_color: wgpu::Color,
    uploads: u64,
}

impl RenderSystem {
    /// Create render system from window and config
    pub async fn new(
        window: Arc<Window>,
        config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = RenderContext::with_vsync(window, vsync).await?;
        let pipeline = ScenePipeline::new(
            &context.device,
            context.format(),
            context.size.width,
            context.size.height,
        );

        Ok(Self {
            context,
            pipeline,
            geometry: LayeredGeometry::new(),
            lighting: SceneLighting::default(),
            clear_color: clear_color(config.clear_rgba()),
            uploads: 0,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(PhysicalSize::new(width, height));
        if width > 0 && height > 0 {
            self.pipeline.ensure_depth_texture(&self.context.device, width, height);
        }
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    /// Rebuild and upload the geometry layers whose nodes changed
    fn sync_geometry(&mut self, state: &mut SimulationState) {
        if !state.scene.has_dirty_nodes() {
            return;
        }

        let changes = self.geometry.sync(&state.scene, &state.animated_roots());
        if changes.any() {
            self.lighting = SceneLighting::from_scene(&state.scene);
        }
        for layer in GeometryLayer::ALL {
            if changes.rebuilt(layer) {
                self.pipeline.upload_geometry(
                    &self.context.device,
                    &self.context.queue,
                    layer,
                    self.geometry.layer(layer),
                );
            }
        }
        state.scene.clear_all_dirty();

        if self.uploads == 0 {
            log::info!(
                "Uploaded {} triangles and {} line segments",
                self.geometry.triangle_count(),
                self.geometry.line_count()
            );
        }
        self.uploads += 1;
    }
}

impl FrameRenderer for RenderSystem {
    fn render(&mut self, state: &mut SimulationState) -> Result<(), RenderError> {
        self.sync_geometry(state);

        let camera = state
            .camera()
            .ok_or_else(|| RenderError::Other("scene has no camera".to_string()))?;
        let mut uniforms = SceneUniforms::default()
            .with_camera(camera.view_matrix(), camera.projection_matrix());
        self.lighting.apply(&mut uniforms);
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        self.pipeline.render(&mut encoder, &view, self.clear_color);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn recover(&mut self) {
        log::debug!("Reconfiguring surface at {:?}", self.size());
        self.context.reconfigure();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert_eq!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost);
        assert_eq!(RenderError::from(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost);
        assert_eq!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory);
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Timeout),
            RenderError::Other(_)
        ));
    }

    #[test]
    fn test_clear_color_conversion() {
        let color = clear_color([0.0, 0.5, 1.0, 0.2]);
        assert_eq!(color.g, 0.5);
        assert!((color.a - 0.2).abs() < 1e-6);
    }
}
