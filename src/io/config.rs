use crate::geometry::camera::Camera;
use crate::geometry::transform::Transform;
use log::warn;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default degeneracy threshold for near-zero triangle areas.
pub const DEFAULT_EPSILON: f32 = 1e-5;

/// TOML-backed configuration. Every field has a default, so a partial
/// (or empty) file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RasterConfig {
    pub raster: RasterSection,
    pub output: OutputSection,
    pub camera: CameraSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSection {
    /// Degeneracy epsilon; must be positive.
    pub epsilon: f32,
}

impl Default for RasterSection {
    fn default() -> Self {
        RasterSection {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub width: u32,
    pub height: u32,
    pub path: String,
    /// Width of the screen-space window mapped onto the image, in camera
    /// units, centered on the origin.
    pub view_size: f32,
}

impl Default for OutputSection {
    fn default() -> Self {
        OutputSection {
            width: 512,
            height: 512,
            path: "render.png".to_string(),
            view_size: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for CameraSection {
    fn default() -> Self {
        CameraSection {
            position: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl RasterConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read config file: {e}"))?;
        Self::load_from_content(&content)
    }

    pub fn load_from_content(content: &str) -> Result<Self, String> {
        let mut config: RasterConfig =
            toml::from_str(content).map_err(|e| format!("failed to parse TOML: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("failed to write config file: {e}"))
    }

    /// Config is the cold path, so preconditions the hot path only
    /// documents are checked here, once.
    fn validate(&mut self) -> Result<(), String> {
        if self.raster.epsilon <= 0.0 {
            warn!(
                "epsilon {} is not positive, falling back to {}",
                self.raster.epsilon, DEFAULT_EPSILON
            );
            self.raster.epsilon = DEFAULT_EPSILON;
        }
        if self.camera.scale.iter().any(|&s| s == 0.0) {
            return Err(format!(
                "camera scale {:?} has a zero component",
                self.camera.scale
            ));
        }
        if self.output.width == 0 || self.output.height == 0 {
            return Err("output dimensions must be non-zero".to_string());
        }
        Ok(())
    }

    /// Builds the camera described by the `[camera]` section.
    pub fn camera(&self) -> Camera {
        let [px, py, pz] = self.camera.position;
        let [sx, sy, sz] = self.camera.scale;
        Camera::new(
            Transform::new(
                Point3::new(px, py, pz),
                UnitQuaternion::identity(),
                Vector3::new(sx, sy, sz),
            ),
            UnitQuaternion::identity(),
        )
    }
}
