//! Viewer settings read from a JSON file.

use std::path::{Path, PathBuf};

use deskscene::camera::CameraSettings;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Directory holding `wood.jpg`, `keyboard.jpg`, `notebook.jpg` and `mug.jpg`.
    pub texture_dir: PathBuf,
    pub log_level: String,
    pub camera: CameraSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_owned(),
            width: 1280,
            height: 720,
            fullscreen: false,
            texture_dir: PathBuf::from("textures"),
            log_level: "info".to_owned(),
            camera: CameraSettings::default(),
        }
    }
}

impl ClientConfig {
    /// The explicit path if one was given, else `<config dir>/deskscene/config.json`.
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| dirs::config_dir().map(|dir| dir.join("deskscene").join("config.json")))
    }

    /// Reads the config at `path`. No path or a missing file gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(path) {
            Ok(s) => Self::parse(&s).map_err(|e| format!("{}: {e}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(format!("{}: {err}", path.display())),
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_the_other_defaults() {
        let config = ClientConfig::parse(
            r#"{ "width": 800, "texture_dir": "assets", "camera": { "speed": 5.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.width, 800);
        assert_eq!(config.height, 720);
        assert_eq!(config.texture_dir, PathBuf::from("assets"));
        assert_eq!(config.camera.speed, 5.0);
        assert_eq!(config.camera.yaw, CameraSettings::default().yaw);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(ClientConfig::parse("{ \"width\": \"wide\" }").is_err());
        assert!(ClientConfig::parse("not json").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("deskscene-no-such-config.json");
        assert_eq!(ClientConfig::load(Some(path.as_path())), Ok(ClientConfig::default()));
        assert_eq!(ClientConfig::load(None), Ok(ClientConfig::default()));
    }

    #[test]
    fn explicit_path_wins() {
        let path = PathBuf::from("my.json");
        assert_eq!(ClientConfig::locate(Some(path.clone())), Some(path));
    }
}
