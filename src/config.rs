//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TENTS_SECTION__KEY`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tentview_render::ViewSettings;
use tentview_slab::SlabParams;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Spatial mesh
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Tent pitching
    #[serde(default)]
    pub slab: SlabConfig,
    /// Viewer loop and backend
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
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
    /// 3. Environment variables (`TENTS_*`)
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

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TENTS_SLAB__DT=0.25 -> slab.dt = 0.25
        figment = figment.merge(Env::prefixed("TENTS_").split("__"));

        let config: Self = figment.extract()?;
        log::debug!("Loaded configuration from {}", config_dir.display());
        Ok(config)
    }

    /// Reject values no mesh or slab can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mesh.maxh", self.mesh.maxh)?;
        positive("slab.dt", self.slab.dt)?;
        positive("slab.wavespeed", self.slab.wavespeed)?;
        positive("slab.tau_factor", self.slab.tau_factor)?;
        if self.slab.tau_factor > 1.0 {
            return Err(ConfigError::Invalid {
                key: "slab.tau_factor",
                value: self.slab.tau_factor,
            });
        }
        Ok(())
    }

    /// Settings for the window renderer
    pub fn to_view_settings(&self) -> ViewSettings {
        ViewSettings {
            title: self.window.title.clone(),
            width: self.window.width,
            height: self.window.height,
            fov: self.camera.fov,
            near: self.camera.near,
            far: self.camera.far,
            distance: self.camera.distance,
            background_color: self.rendering.background_color,
            light_dir: self.rendering.light_dir,
            ambient_strength: self.rendering.ambient_strength,
            diffuse_strength: self.rendering.diffuse_strength,
            time_color_strength: self.rendering.time_color_strength,
            rotate_sensitivity: self.input.rotate_sensitivity,
            zoom_speed: self.input.zoom_speed,
            slice_speed: self.input.slice_speed,
            smoothing_half_life: self.input.smoothing_half_life,
            smoothing_enabled: self.input.smoothing_enabled,
        }
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { key, value })
    }
}

/// Mesh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Longest allowed edge of the unit cube mesh
    pub maxh: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { maxh: 0.3 }
    }
}

/// Slab configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabConfig {
    /// Slab height in time
    pub dt: f64,
    /// Wave speed bounding the tent slopes
    pub wavespeed: f64,
    /// Fraction of the causal step a tent may advance, in (0, 1]
    pub tau_factor: f64,
}

impl Default for SlabConfig {
    fn default() -> Self {
        Self {
            dt: 0.5,
            wavespeed: 1.0,
            tau_factor: 1.0,
        }
    }
}

impl SlabConfig {
    /// Pitching parameters
    pub fn params(&self) -> SlabParams {
        SlabParams::new(self.dt, self.wavespeed).with_tau_factor(self.tau_factor)
    }
}

/// How tents are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Interactive wgpu window
    #[default]
    Window,
    /// Legacy VTK files on disk
    Vtk,
}

/// Viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub backend: Backend,
    /// Directory for the VTK backend
    pub output_dir: PathBuf,
    /// Write the whole slab to this file at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slab_vtk: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Window,
            output_dir: PathBuf::from("tents"),
            slab_vtk: None,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tent viewer".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Starting distance from the tent, in tent radii
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.01,
            far: 100.0,
            distance: 3.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Radians of orbit per pixel of mouse drag
    pub rotate_sensitivity: f32,
    /// Relative zoom per second (keys) or per pixel of right drag
    pub zoom_speed: f32,
    /// Fraction of the tent's time range the slice moves per second
    pub slice_speed: f32,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            zoom_speed: 1.0,
            slice_speed: 0.2,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction [x, y, z]
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// How strongly the slice time tints the section
    pub time_color_strength: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.05, 0.05, 0.08, 1.0],
            light_dir: [0.5, 1.0, 0.3],
            ambient_strength: 0.3,
            diffuse_strength: 0.7,
            time_color_strength: 0.4,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema
    #[error("Configuration error: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Configuration error: {key} must be positive and finite, got {value}")]
    Invalid { key: &'static str, value: f64 },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}
