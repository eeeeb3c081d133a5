//! WGPU context management
//!
//! Owns the instance-derived surface, device, and queue for one window.

use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

/// Errors creating a render context
#[derive(Debug)]
pub enum ContextError {
    /// The window surface could not be created
    Surface(String),
    /// No GPU adapter is compatible with the surface
    AdapterNotFound,
    /// The adapter refused to create a device
    Device(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Failed to create surface: {}", msg),
            ContextError::AdapterNotFound => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Failed to create device: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

impl From<wgpu::CreateSurfaceError> for ContextError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        ContextError::Surface(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for ContextError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        ContextError::Device(e.to_string())
    }
}

/// Device, queue, and configured surface for a window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context with vsync enabled
    pub async fn new(window: Arc<Window>) -> Result<Self, ContextError> {
        Self::with_vsync(window, true).await
    }

    /// Create a context, presenting with FIFO when `vsync` is set and
    /// Immediate otherwise
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(ContextError::AdapterNotFound)?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?}, {:?})", info.name, info.device_type, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Ballsweep Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let present_mode = if vsync || !caps.present_modes.contains(&wgpu::PresentMode::Immediate) {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::Immediate
        };

        // Honor the clear alpha where the compositor supports it
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        log::info!("Surface format: {:?}, present mode: {:?}", format, present_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size: PhysicalSize::new(width, height),
        })
    }

    /// Reconfigure the surface for a new window size
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Surface width / height
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.size.width, self.size.height)
    }

    /// The surface texture format
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
