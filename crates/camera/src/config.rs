use crate::camera::{CameraState, MOVE_SPEED, TURN_SPEED};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a camera config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Initial camera placement and per-tick speeds.
///
/// Every field is optional in YAML; missing ones take the defaults below.
///
/// ```yaml
/// position: [0.0, 1.0, -4.0]
/// yaw: 0.3
/// move_speed: 0.01
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -2.0),
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            move_speed: MOVE_SPEED,
            turn_speed: TURN_SPEED,
        }
    }
}

impl CameraConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&data)?;
        tracing::debug!(path = %path.display(), ?config, "loaded camera config");
        Ok(config)
    }

    /// Build the camera this config describes.
    pub fn camera(&self) -> CameraState {
        if self.up.length_squared() == 0.0 {
            tracing::warn!("camera config has a zero up vector; basis will be NaN");
        }
        CameraState {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
            up: self.up,
            move_speed: self.move_speed,
            turn_speed: self.turn_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_builds_default_camera() {
        assert_eq!(CameraConfig::default().camera(), CameraState::default());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = CameraConfig::from_yaml_str("yaw: 0.5\nposition: [1.0, 2.0, 3.0]\n").unwrap();
        assert_eq!(config.yaw, 0.5);
        assert_eq!(config.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.pitch, 0.0);
        assert_eq!(config.up, Vec3::Y);
        assert_eq!(config.move_speed, MOVE_SPEED);
        assert_eq!(config.turn_speed, TURN_SPEED);
    }

    #[test]
    fn empty_mapping_is_default() {
        let config = CameraConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, CameraConfig::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = CameraConfig::from_yaml_str("position: [1.0, oops").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let err = CameraConfig::from_yaml_str("yaw: sideways").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "move_speed: 0.02").unwrap();
        writeln!(file, "up: [0.0, 2.0, 0.0]").unwrap();

        let config = CameraConfig::load(file.path()).unwrap();
        let cam = config.camera();
        assert_eq!(cam.move_speed, 0.02);
        assert_eq!(cam.up(), Vec3::Y);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CameraConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
