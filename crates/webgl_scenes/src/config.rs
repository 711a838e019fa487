//! Scene configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SceneError;

/// Canvas and camera parameters shared by every scene.
///
/// Missing fields in a config file fall back to [`SceneConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Drawing buffer width in pixels.
    pub canvas_width: f32,
    /// Drawing buffer height in pixels.
    pub canvas_height: f32,
    /// Vertical field of view for perspective scenes, in degrees.
    pub field_of_view_degrees: f32,
    /// Near clip distance.
    pub z_near: f32,
    /// Far clip distance.
    pub z_far: f32,
    /// Distance of the orbiting camera from its target.
    pub camera_radius: f32,
    /// Depth range of the pixel-space projection.
    pub depth: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            field_of_view_degrees: 100.0,
            z_near: 1.0,
            z_far: 2000.0,
            camera_radius: 200.0,
            depth: 1000.0,
        }
    }
}

impl SceneConfig {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] or [`SceneError::Json`] if the file cannot
    /// be read or parsed, and [`SceneError::InvalidConfig`] if the values
    /// fail [`SceneConfig::validate`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scene config");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a config from JSON text.
    ///
    /// # Errors
    ///
    /// See [`SceneConfig::from_json_file`].
    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the canvas size.
    #[must_use]
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Override the field of view (degrees).
    #[must_use]
    pub fn with_field_of_view(mut self, degrees: f32) -> Self {
        self.field_of_view_degrees = degrees;
        self
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.canvas_width / self.canvas_height
    }

    #[must_use]
    pub fn field_of_view_radians(&self) -> f32 {
        self.field_of_view_degrees.to_radians()
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.field_of_view_degrees > 0.0 && self.field_of_view_degrees < 180.0) {
            return Err(SceneError::InvalidConfig(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.field_of_view_degrees
            )));
        }
        if !(self.z_near > 0.0 && self.z_near < self.z_far) {
            return Err(SceneError::InvalidConfig(format!(
                "need 0 < z_near < z_far, got z_near = {}, z_far = {}",
                self.z_near, self.z_far
            )));
        }
        if self.depth <= 0.0 || self.camera_radius <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "depth and camera_radius must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.aspect() - 800.0 / 600.0).abs() < 1.0e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SceneConfig::from_json_str(r#"{ "canvas_width": 1024 }"#).unwrap();
        assert_eq!(config.canvas_width, 1024.0);
        assert_eq!(config.canvas_height, 600.0);
        assert_eq!(config.z_far, 2000.0);
    }

    #[test]
    fn test_rejects_bad_clip_range() {
        let result = SceneConfig::from_json_str(r#"{ "z_near": 10, "z_far": 5 }"#);
        assert!(matches!(result, Err(SceneError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_field_of_view() {
        let config = SceneConfig::default().with_field_of_view(180.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_canvas() {
        let config = SceneConfig::default().with_canvas(0.0, 600.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = SceneConfig::from_json_str("{ canvas_width: ");
        assert!(matches!(result, Err(SceneError::Json(_))));
    }
}
