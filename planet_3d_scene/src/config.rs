//! Scene configuration with defaults, validation and RON persistence.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! values it overrides.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::Result;
use crate::engine_bail;

/// Top-level scene configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Planet body, inner shell and cloud shell.
    pub planet: PlanetConfig,
    /// Atmospheric glow shell.
    pub glow: GlowConfig,
    /// Background skydome.
    pub skydome: SkydomeConfig,
    /// Procedural star field.
    pub stars: StarFieldConfig,
    /// Perspective camera.
    pub camera: CameraConfig,
    /// Orbit controls.
    pub controls: ControlsConfig,
    /// Per-tick rotation deltas.
    pub animation: AnimationConfig,
    /// Light sources.
    pub lights: LightConfig,
    /// Texture file paths.
    pub textures: TextureConfig,
    /// Initial drawing surface size.
    pub viewport: ViewportConfig,
    /// Startup entrance timeline.
    pub entrance: EntranceConfig,
}

/// Planet shells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Outer solid shell radius.
    pub radius: f32,
    /// Inner shell sits this far inside the outer shell.
    pub shell_thickness: f32,
    /// Cloud shell sits this far outside the outer shell.
    pub cloud_offset: f32,
    /// Cloud shell opacity in [0, 1].
    pub cloud_opacity: f32,
    /// Sphere tessellation (width and height segments).
    pub segments: u32,
    /// Base surface color (used as-is when no diffuse map is bound).
    pub color: [f32; 3],
    /// Inner shell color = color * inner_tint.
    pub inner_tint: f32,
    /// Phong shininess.
    pub shininess: f32,
    /// Bump map strength.
    pub bump_scale: f32,
    /// Phong specular color.
    pub specular: [f32; 3],
}

/// Glow shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlowConfig {
    /// Glow shell radius, must exceed the planet radius.
    pub radius: f32,
    /// Glow color.
    pub color: [f32; 3],
    /// Base coefficient applied to the view/normal dot product.
    pub c: f32,
    /// Falloff exponent.
    pub p: f32,
}

/// Skydome sphere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkydomeConfig {
    /// Skydome radius, must exceed the glow radius.
    pub radius: f32,
    /// Background opacity.
    pub opacity: f32,
    /// Sphere tessellation.
    pub segments: u32,
}

/// Star field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarFieldConfig {
    /// Number of stars.
    pub count: usize,
    /// Edge length of the cube stars are scattered in.
    pub spread: f32,
    /// Radius of every star sphere.
    pub radius: f32,
    /// Fixed seed for reproducible placement, `None` for a fresh field each run.
    pub seed: Option<u64>,
}

/// Camera.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Initial camera position.
    pub position: [f32; 3],
    /// Orbit target.
    pub target: [f32; 3],
}

/// Orbit controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Ease out after the pointer is released.
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per update.
    pub damping_factor: f32,
    /// Drag rotation multiplier.
    pub rotate_speed: f32,
    /// Allow panning the target.
    pub enable_pan: bool,
    /// Allow dolly in/out.
    pub enable_zoom: bool,
    /// Wheel zoom multiplier.
    pub zoom_speed: f32,
    /// Closest orbit distance when zooming.
    pub min_distance: f32,
    /// Farthest orbit distance when zooming.
    pub max_distance: f32,
    /// Spin around the target while idle.
    pub auto_rotate: bool,
    /// 2.0 is one turn per 30 seconds at 60 updates per second.
    pub auto_rotate_speed: f32,
    /// Residual rotation below which damping stops.
    pub rest_epsilon: f32,
}

/// Per-tick rotation deltas (radians about Y).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Planet group.
    pub planet_spin: f32,
    /// Cloud shell, on top of the planet group.
    pub cloud_spin: f32,
    /// Skydome.
    pub skydome_spin: f32,
}

/// Light sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Point light position.
    pub point_position: [f32; 3],
    /// Point light color.
    pub point_color: [f32; 3],
    /// Point light intensity.
    pub point_intensity: f32,
    /// Point light range (0 = unlimited).
    pub point_distance: f32,
    /// Ambient light color.
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    pub ambient_intensity: f32,
}

/// Texture files, resolved by the texture loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Planet diffuse map.
    pub diffuse: Option<PathBuf>,
    /// Planet bump map.
    pub bump: Option<PathBuf>,
    /// Planet specular map.
    pub specular: Option<PathBuf>,
    /// Cloud map.
    pub clouds: Option<PathBuf>,
    /// Skydome background.
    pub background: Option<PathBuf>,
}

/// Initial drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in device-independent pixels.
    pub width: f32,
    /// Height in device-independent pixels.
    pub height: f32,
    /// Reported device pixel ratio.
    pub device_pixel_ratio: f32,
    /// Upper bound applied to the device pixel ratio.
    pub max_pixel_ratio: f32,
}

/// Entrance timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntranceConfig {
    /// Play the timeline at startup.
    pub enabled: bool,
    /// Seconds per entry.
    pub duration: f32,
    /// Planet group scale at timeline start.
    pub planet_scale_from: f32,
    /// Navigation offset (percent of its height) at timeline start.
    pub nav_offset_from: f32,
    /// Title opacity at timeline start.
    pub title_opacity_from: f32,
    /// Easing shared by all entries.
    pub easing: Easing,
}

// ===== DEFAULTS =====

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            shell_thickness: 0.1,
            cloud_offset: 0.05,
            cloud_opacity: 0.4,
            segments: 64,
            color: [1.0, 1.0, 1.0],
            inner_tint: 0.35,
            shininess: 10.0,
            bump_scale: 0.05,
            specular: [0.3, 0.3, 0.3],
        }
    }
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            radius: 5.5,
            color: [0.0, 0.7, 1.0],
            c: 1.0,
            p: 6.0,
        }
    }
}

impl Default for SkydomeConfig {
    fn default() -> Self {
        Self {
            radius: 90.0,
            opacity: 0.25,
            segments: 64,
        }
    }
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            spread: 100.0,
            radius: 0.25,
            seed: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            enable_pan: false,
            enable_zoom: false,
            zoom_speed: 1.0,
            min_distance: 4.0,
            max_distance: 50.0,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rest_epsilon: 1e-6,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            planet_spin: 0.0005,
            cloud_spin: 0.0007,
            skydome_spin: 0.0001,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            point_position: [0.0, 10.0, 10.0],
            point_color: [1.0, 1.0, 1.0],
            point_intensity: 100.0,
            point_distance: 100.0,
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.2,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            device_pixel_ratio: 1.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: 1.0,
            planet_scale_from: 0.0,
            nav_offset_from: -100.0,
            title_opacity_from: 0.0,
            easing: Easing::QuadOut,
        }
    }
}

// ===== DERIVED VALUES =====

impl PlanetConfig {
    /// Radius of the darkened inner shell.
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.shell_thickness
    }

    /// Radius of the translucent cloud shell.
    pub fn cloud_radius(&self) -> f32 {
        self.radius + self.cloud_offset
    }
}

// ===== VALIDATION & PERSISTENCE =====

const SOURCE: &str = "planet3d::SceneConfig";

fn ensure_finite(name: &str, values: &[f32]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        engine_bail!(InvalidConfig; SOURCE, "{} must be finite, got {:?}", name, values);
    }
    Ok(())
}

impl SceneConfig {
    /// Check radius ordering and numeric sanity.
    ///
    /// Runs before any node is created, so a rejected config never yields
    /// a partially built scene.
    pub fn validate(&self) -> Result<()> {
        let planet = &self.planet;
        ensure_finite("planet.radius", &[planet.radius])?;
        ensure_finite("planet.shell_thickness", &[planet.shell_thickness])?;
        ensure_finite("planet.cloud_offset", &[planet.cloud_offset])?;
        ensure_finite("glow.radius", &[self.glow.radius])?;
        ensure_finite("skydome.radius", &[self.skydome.radius])?;
        ensure_finite("stars.spread", &[self.stars.spread])?;
        ensure_finite("camera.position", &self.camera.position)?;
        ensure_finite("camera.target", &self.camera.target)?;
        ensure_finite("camera clip planes", &[self.camera.near, self.camera.far])?;
        ensure_finite("entrance.duration", &[self.entrance.duration])?;
        ensure_finite("glow.c", &[self.glow.c])?;
        ensure_finite("glow.p", &[self.glow.p])?;
        ensure_finite("stars.radius", &[self.stars.radius])?;
        let controls = &self.controls;
        ensure_finite("controls", &[
            controls.damping_factor,
            controls.rotate_speed,
            controls.zoom_speed,
            controls.min_distance,
            controls.max_distance,
            controls.auto_rotate_speed,
            controls.rest_epsilon,
        ])?;

        if planet.radius <= 0.0 {
            engine_bail!(InvalidConfig; SOURCE, "planet radius must be positive, got {}", planet.radius);
        }
        let inner = planet.inner_radius();
        if inner >= planet.radius {
            engine_bail!(InvalidConfig; SOURCE,
                "inner radius {} must be smaller than outer radius {}", inner, planet.radius);
        }
        if inner <= 0.0 {
            engine_bail!(InvalidConfig; SOURCE,
                "shell thickness {} leaves no inner shell inside radius {}",
                planet.shell_thickness, planet.radius);
        }
        if self.glow.radius <= planet.radius {
            engine_bail!(InvalidConfig; SOURCE,
                "glow radius {} must be larger than outer radius {}", self.glow.radius, planet.radius);
        }
        if planet.cloud_radius() >= self.glow.radius {
            engine_bail!(InvalidConfig; SOURCE,
                "cloud radius {} must stay inside glow radius {}", planet.cloud_radius(), self.glow.radius);
        }
        if self.skydome.radius <= self.glow.radius {
            engine_bail!(InvalidConfig; SOURCE,
                "skydome radius {} must be larger than glow radius {}", self.skydome.radius, self.glow.radius);
        }
        if planet.segments < 3 || self.skydome.segments < 3 {
            engine_bail!(InvalidConfig; SOURCE, "sphere segments must be at least 3");
        }
        if self.stars.spread < 0.0 {
            engine_bail!(InvalidConfig; SOURCE, "star spread must not be negative, got {}", self.stars.spread);
        }
        if self.stars.radius <= 0.0 {
            engine_bail!(InvalidConfig; SOURCE, "star radius must be positive, got {}", self.stars.radius);
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            engine_bail!(InvalidConfig; SOURCE,
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far);
        }
        if self.glow.p < 0.0 {
            engine_bail!(InvalidConfig; SOURCE, "glow exponent must not be negative, got {}", self.glow.p);
        }
        let offset = Vec3::from_array(self.camera.position) - Vec3::from_array(self.camera.target);
        if offset.length_squared() <= f32::EPSILON {
            engine_bail!(InvalidConfig; SOURCE, "camera position must differ from its target");
        }
        if offset.normalize().cross(Vec3::Y).length_squared() <= 1e-6 {
            engine_bail!(InvalidConfig; SOURCE,
                "camera offset {:?} is parallel to the up axis", offset.to_array());
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            engine_bail!(InvalidConfig; SOURCE, "fov {} out of (0, 180)", self.camera.fov_degrees);
        }
        if !(controls.damping_factor > 0.0 && controls.damping_factor <= 1.0) {
            engine_bail!(InvalidConfig; SOURCE,
                "damping factor {} out of (0, 1]", controls.damping_factor);
        }
        if controls.rest_epsilon <= 0.0 {
            engine_bail!(InvalidConfig; SOURCE,
                "rest epsilon must be positive, got {}", controls.rest_epsilon);
        }
        if self.controls.min_distance > self.controls.max_distance {
            engine_bail!(InvalidConfig; SOURCE,
                "min distance {} exceeds max distance {}",
                self.controls.min_distance, self.controls.max_distance);
        }
        if !(self.viewport.max_pixel_ratio >= 1.0) {
            engine_bail!(InvalidConfig; SOURCE,
                "max pixel ratio must be at least 1, got {}", self.viewport.max_pixel_ratio);
        }
        if self.entrance.duration < 0.0 {
            engine_bail!(InvalidConfig; SOURCE, "entrance duration must not be negative");
        }
        Ok(())
    }

    /// Parse a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| crate::engine_err!(Config; SOURCE, "failed to parse config: {}", e))
    }

    /// Serialize as pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| crate::engine_err!(Config; SOURCE, "failed to serialize config: {}", e))
    }

    /// Load from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::engine_err!(Config; SOURCE, "failed to read config {}: {}", path.display(), e)
        })?;
        Self::from_ron_str(&text)
    }

    /// Write to a RON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                crate::engine_err!(Config; SOURCE, "failed to create {}: {}", parent.display(), e)
            })?;
        }
        let text = self.to_ron_string()?;
        std::fs::write(path, text).map_err(|e| {
            crate::engine_err!(Config; SOURCE, "failed to write config {}: {}", path.display(), e)
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
