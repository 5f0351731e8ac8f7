use std::{
    fs,
    path::{Path, PathBuf},
};

use grind_engine_edit::limits::{DEFAULT_HEIGHT, DEFAULT_NAME, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_width")]
    pub default_width: i32,

    #[serde(default = "default_height")]
    pub default_height: i32,

    #[serde(default = "default_name")]
    pub default_name: String,

    #[serde(default = "default_glyph")]
    pub default_glyph: char,
}

fn default_width() -> i32 {
    DEFAULT_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_HEIGHT
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_glyph() -> char {
    '#'
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            default_height: default_height(),
            default_name: default_name(),
            default_glyph: default_glyph(),
        }
    }
}

impl Settings {
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "grind_map").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn default_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Loads settings from `file`, or from the default location.
    /// A missing file yields the defaults.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let Some(file) = file.map(Path::to_path_buf).or_else(Self::default_file) else {
            return Ok(Settings::default());
        };
        if !file.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&file)?;
        let settings: Settings = toml::from_str(&content)?;
        log::debug!("loaded settings from {}", file.display());
        Ok(settings)
    }

    /// Writes the settings, going through a temporary file.
    pub fn store(&self, file: &Path) -> anyhow::Result<()> {
        let mut write_name = file.to_path_buf();
        write_name.set_extension("new");

        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&write_name, toml_string)?;
        fs::rename(&write_name, file)?;
        Ok(())
    }
}
