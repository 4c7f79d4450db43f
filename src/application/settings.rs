//! Configuration read from an optional JSON file at startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json;

use crate::errors::*;
use crate::math::prelude::Vector3;
use crate::renderer::Palette;
use crate::window::WindowParams;

/// The file `Settings::load_default` reads from the working directory.
pub const SETTINGS_FILE: &str = "chequer.json";

/// Where the camera starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        CameraParams {
            position: Vector3::new(0.0, 6.0, 9.0),
            yaw: crate::camera::YAW,
            pitch: -35.0,
        }
    }
}

/// Every field is optional in the file, missing ones take their default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowParams,
    pub camera: CameraParams,
    /// Renders the shadow pass.
    pub shadows: bool,
    /// Side in texels of the square shadow map.
    pub shadow_map_size: u32,
    pub light_position: Vector3<f32>,
    /// Draws the outline around the pieces.
    pub outline: bool,
    /// Scale of the outline silhouette relative to the piece.
    pub outline_scale: f32,
    pub palette: Palette,
    pub tile_model: PathBuf,
    pub piece_model: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window: WindowParams::default(),
            camera: CameraParams::default(),
            shadows: true,
            shadow_map_size: 4096,
            light_position: Vector3::new(-2.0, 4.0, -1.0),
            outline: true,
            outline_scale: 1.05,
            palette: Palette::default(),
            tile_model: PathBuf::from("assets/models/tile.obj"),
            piece_model: PathBuf::from("assets/models/piece.obj"),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings = serde_json::from_str(text).map_err(|err| Error::Settings(err.to_string()))?;
        Ok(settings)
    }

    /// Reads the settings at `path`, falling back to the defaults if there is
    /// no such file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings at {:?}, using defaults.", path);
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(path)
            .map_err(|err| Error::Settings(format!("{:?}: {}", path, err)))?;

        let settings = Self::from_json(&text)?;
        info!("Loaded settings from {:?}.", path);
        Ok(settings)
    }

    /// Reads `chequer.json` from the working directory.
    pub fn load_default() -> Result<Self> {
        Self::load(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_document() {
        let settings = Settings::from_json(
            r#"{ "shadow_map_size": 1024, "window": { "title": "Board" }, "outline": false }"#,
        )
        .unwrap();

        assert_eq!(settings.shadow_map_size, 1024);
        assert_eq!(settings.window.title, "Board");
        assert_eq!(settings.window.size, WindowParams::default().size);
        assert!(!settings.outline);
        assert!(settings.shadows);
        assert_eq!(settings.outline_scale, 1.05);
    }

    #[test]
    fn malformed_document() {
        let err = Settings::from_json("{ \"shadows\": 3 }").unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some());
    }

    #[test]
    fn missing_file() {
        let settings = Settings::load("does/not/exist.json").unwrap();
        assert_eq!(settings.shadow_map_size, 4096);
    }
}
