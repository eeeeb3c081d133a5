//! Ball sweep - animated sphere demo
//!
//! Nine spheres sweep along X inside a translucent cylinder while an orbit
//! camera looks on.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use ballsweep::config::AppConfig;
use ballsweep::input::{InputAction, InputMapper};
use ballsweep::scene::demo_scene;
use ballsweep::systems::{FrameDriver, FrameStatus, RenderSystem, WindowSystem};
use ballsweep_core::SimulationState;
use ballsweep_input::OrbitControls;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    state: SimulationState,
    driver: FrameDriver,
    controls: OrbitControls,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut state = demo_scene(&config)
            .unwrap_or_else(|e| panic!("Failed to build scene: {}", e));

        let controls = Self::controls_from_config(&config);
        if config.controls.enabled {
            if let Some(camera) = state.camera_mut() {
                controls.attach(camera);
            }
        }

        let driver = FrameDriver::new(config.scene.spin_rate);

        Self {
            config,
            window: None,
            renderer: None,
            state,
            driver,
            controls,
        }
    }

    fn controls_from_config(config: &AppConfig) -> OrbitControls {
        let c = &config.controls;
        OrbitControls::new()
            .with_enabled(c.enabled)
            .with_rotate_speed(c.rotate_speed)
            .with_zoom_speed(c.zoom_speed)
            .with_pan_speed(c.pan_speed)
            .with_distance_range(c.min_distance, c.max_distance)
    }

    /// Put the camera back at its configured start
    fn reset_camera(&mut self) {
        let height = self.window.as_ref().map(|w| w.inner_size().height);
        self.controls = Self::controls_from_config(&self.config);
        if let Some(height) = height {
            self.controls.set_viewport_height(height);
        }

        let enabled = self.config.controls.enabled;
        let position = self.config.camera.position();
        let look_at = self.config.camera.look_at();
        if let Some(camera) = self.state.camera_mut() {
            camera.position = position;
            camera.look_at(look_at);
            if enabled {
                self.controls.attach(camera);
            }
        }
        log::info!("Camera reset to starting position");
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => {
                self.driver.stop();
                event_loop.exit();
            }
            InputAction::ResetCamera => self.reset_camera(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::TogglePause => {
                let paused = self.driver.toggle_pause();
                log::info!("Animation {}", if paused { "paused" } else { "resumed" });
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = WindowSystem::create(event_loop, &self.config.window)
            .unwrap_or_else(|e| panic!("{}", e));
        let renderer = pollster::block_on(RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        ))
        .unwrap_or_else(|e| panic!("Failed to initialize GPU: {}", e));

        let size = window.inner_size();
        if let Some(camera) = self.state.camera_mut() {
            camera.set_viewport(size.width, size.height);
        }
        self.controls.set_viewport_height(size.height);

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.driver.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                if let Some(camera) = self.state.camera_mut() {
                    camera.set_viewport(size.width, size.height);
                }
                self.controls.set_viewport_height(size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controls.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.controls.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => {
                if let Some(camera) = self.state.camera_mut() {
                    self.controls.update(camera);
                }

                let Some(renderer) = &mut self.renderer else { return };
                let status = self.driver.tick(&mut self.state, renderer);

                if let Some(window) = &self.window {
                    if self.config.debug.show_stats && self.driver.take_status_changed() {
                        window.update_title(self.driver.fps(), self.driver.is_paused());
                    }
                    match status {
                        FrameStatus::Continue => window.request_redraw(),
                        FrameStatus::Stopped => event_loop.exit(),
                    }
                }
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controls.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    log::info!("Ball sweep starting");
    log::info!("Controls:");
    log::info!("  Left drag: orbit  |  Right drag: pan  |  Wheel: zoom");
    log::info!("  R: reset camera  |  P: pause  |  F: fullscreen  |  Escape: exit");

    let event_loop = EventLoop::new().unwrap_or_else(|e| panic!("Failed to create event loop: {}", e));
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
