use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::handles::{DEFAULT_HANDLE_SIZE, DEFAULT_HANDLE_TOLERANCE};
use crate::editor::region::{DEFAULT_BLUR_RADIUS, DEFAULT_OPACITY};
use crate::editor::DEFAULT_BRUSH_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "smudge";
const APP_CONFIG_FILE: &str = "config.json";

/// Session defaults from `config.json`. Missing fields fall back to the
/// built-in values; the session clamps everything on construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub default_opacity: f32,
    pub default_blur_radius: u8,
    pub brush_size: u8,
    pub handle_size: f32,
    pub handle_tolerance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_opacity: DEFAULT_OPACITY,
            default_blur_radius: DEFAULT_BLUR_RADIUS,
            brush_size: DEFAULT_BRUSH_SIZE,
            handle_size: DEFAULT_HANDLE_SIZE,
            handle_tolerance: DEFAULT_HANDLE_TOLERANCE,
        }
    }
}

pub fn load_editor_config() -> EditorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_editor_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EditorConfig {
    let path = match editor_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return EditorConfig::default(),
    };
    if !path.exists() {
        return EditorConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            EditorConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EditorConfig::default()
        }
    }
}

fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn editor_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
