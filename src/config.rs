//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SWEEP_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use ballsweep_core::{Color, SweepBounds, SweepBoundsError, Vec3};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "SWEEP_";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit controls configuration
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Ball sweep configuration
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Scene animation configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SWEEP_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SWEEP_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ball Sweep".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position [x, y, z]
    pub position: [f32; 3],
    /// Initial look-at point [x, y, z] (replaced by the orbit target when controls are enabled)
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 20.0, 20.0],
            look_at: [5.0, 0.5, 0.0],
            fov: 45.0,
            near: 1.0,
            far: 6000.0,
        }
    }
}

impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn look_at(&self) -> Vec3 {
        Vec3::from_array(self.look_at)
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Enable mouse orbit controls
    pub enabled: bool,
    /// Orbit speed (1.0 = one turn per viewport-height drag)
    pub rotate_speed: f32,
    /// Dolly speed (exponent applied to 0.95 per wheel step)
    pub zoom_speed: f32,
    /// Pan speed multiplier
    pub pan_speed: f32,
    /// Closest the camera may dolly to the target
    pub min_distance: f32,
    /// Farthest the camera may dolly from the target
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: 6000.0,
        }
    }
}

/// Ball sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// X coordinate balls reset to
    pub start_point: f64,
    /// X coordinate past which balls reset
    pub end_point: f64,
    /// X distance moved per frame
    pub step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let bounds = SweepBounds::default();
        Self {
            start_point: bounds.start_point(),
            end_point: bounds.end_point(),
            step: bounds.step(),
        }
    }
}

impl SweepConfig {
    /// Validate into sweep bounds
    pub fn bounds(&self) -> Result<SweepBounds, SweepBoundsError> {
        SweepBounds::new(self.start_point, self.end_point, self.step)
    }
}

/// Scene animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Y rotation applied to the last ball every frame, in radians
    pub spin_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { spin_rate: 0.001 }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color as 0xRRGGBB
    pub clear_color: Color,
    /// Background alpha
    pub clear_alpha: f32,
    /// Direction towards the optional directional light [x, y, z]
    pub light_dir: [f32; 3],
    /// Directional light intensity (0 disables it)
    pub light_intensity: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            clear_alpha: 0.2,
            light_dir: [0.5, 1.0, 0.3],
            light_intensity: 0.0,
        }
    }
}

impl RenderingConfig {
    /// Background as RGBA
    pub fn clear_rgba(&self) -> [f32; 4] {
        self.clear_color.to_rgba(self.clear_alpha.clamp(0.0, 1.0))
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show frame statistics in the window title
    pub show_stats: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_stats: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.position, [0.0, 20.0, 20.0]);
        assert_eq!(config.camera.far, 6000.0);
        assert_eq!(config.scene.spin_rate, 0.001);
        assert_eq!(config.sweep.bounds(), Ok(SweepBounds::default()));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("spin_rate"));
        assert!(toml.contains("clear_color = 0"));
    }

    #[test]
    fn test_partial_section() {
        let config: AppConfig = toml::from_str("[sweep]\nstep = 0.5\n").unwrap();
        assert_eq!(config.sweep.step, 0.5);
        assert_eq!(config.sweep.end_point, 10.0);
        assert_eq!(config.window.title, "Ball Sweep");
    }

    #[test]
    fn test_invalid_sweep_bounds() {
        let sweep = SweepConfig {
            start_point: 5.0,
            end_point: -5.0,
            step: 0.1,
        };
        assert!(matches!(sweep.bounds(), Err(SweepBoundsError::InvertedBounds { .. })));
    }

    #[test]
    fn test_clear_rgba() {
        let rendering = RenderingConfig::default();
        assert_eq!(rendering.clear_rgba(), [0.0, 0.0, 0.0, 0.2]);
    }
}
