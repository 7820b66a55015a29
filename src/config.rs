//! Generation settings and the project config file (beadwork.yaml).
//!
//! The config file carries default settings plus any user palettes, which are
//! added to the builtin palette store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BeadError, Result};
use crate::render::RenderOptions;
use crate::types::{Palette, PaletteStore};

/// Config filename looked up in the project directory.
pub const CONFIG_FILENAME: &str = "beadwork.yaml";

/// Options recognised by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Cap on the longer grid side, in beads.
    pub max_cells: u32,

    /// Rendered size of one bead, in pixels.
    pub cell_size: u32,

    /// Palette to quantize against.
    pub palette_name: String,

    /// Outline each bead in the rendered bitmap.
    pub show_grid_lines: bool,

    /// Floyd-Steinberg error diffusion.
    pub dithering: bool,

    /// Mark the border-connected background transparent.
    pub remove_background: bool,

    /// Background tolerance, percent of the maximum RGB distance.
    pub background_threshold: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_cells: 48,
            cell_size: 12,
            palette_name: "standard".to_string(),
            show_grid_lines: true,
            dithering: false,
            remove_background: false,
            background_threshold: 10,
        }
    }
}

impl Settings {
    /// Check ranges and that the palette exists in `store`.
    pub fn validate(&self, store: &PaletteStore) -> Result<()> {
        if self.max_cells == 0 {
            return Err(out_of_range("maxCells", "must be at least 1"));
        }
        if self.cell_size == 0 {
            return Err(out_of_range("cellSize", "must be at least 1"));
        }
        if self.background_threshold > 100 {
            return Err(out_of_range("backgroundThreshold", "must be between 0 and 100"));
        }
        store.palette(&self.palette_name)?;
        Ok(())
    }

    /// Rasterizer options derived from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cell_size: self.cell_size,
            grid_lines: self.show_grid_lines,
        }
    }
}

fn out_of_range(field: &str, reason: &str) -> BeadError {
    BeadError::Config {
        message: format!("{} {}", field, reason),
        help: None,
    }
}

/// Project config loaded from beadwork.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default generation settings.
    pub settings: Settings,

    /// User palettes: name -> hex colours, in order.
    pub palettes: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BeadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| BeadError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `beadwork.yaml` from `dir`, or the defaults if it is absent.
    pub fn discover(dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Ok((Self::load(&path)?, Some(path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// The builtin palettes plus the ones defined here.
    pub fn palette_store(&self) -> Result<PaletteStore> {
        let mut store = PaletteStore::builtin();
        for (name, hex) in &self.palettes {
            store.add(Palette::from_hex_list(name.as_str(), hex.as_slice())?)?;
        }
        Ok(store)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| BeadError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate(&PaletteStore::builtin()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let store = PaletteStore::builtin();
        let s = Settings {
            max_cells: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(&store), Err(BeadError::Config { .. })));

        let s = Settings {
            cell_size: 0,
            ..Settings::default()
        };
        assert!(s.validate(&store).is_err());
    }

    #[test]
    fn test_validate_rejects_threshold_over_100() {
        let s = Settings {
            background_threshold: 101,
            ..Settings::default()
        };
        assert!(s.validate(&PaletteStore::builtin()).is_err());
    }

    #[test]
    fn test_validate_unknown_palette_is_usage_error() {
        let s = Settings {
            palette_name: "neon".to_string(),
            ..Settings::default()
        };
        assert!(s.validate(&PaletteStore::builtin()).unwrap_err().is_usage());
    }

    #[test]
    fn test_parse_partial_settings() {
        let config = Config::parse("settings:\n  maxCells: 32\n  dithering: true\n").unwrap();
        assert_eq!(config.settings.max_cells, 32);
        assert!(config.settings.dithering);
        // Unspecified fields keep their defaults
        assert_eq!(config.settings.cell_size, 12);
        assert_eq!(config.settings.palette_name, "standard");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Config::parse("settings: [1, 2").is_err());
        assert!(Config::parse("settings:\n  maxCells: lots\n").is_err());
    }

    #[test]
    fn test_user_palettes() {
        let yaml = "palettes:\n  duo:\n    - \"#FF0000\"\n    - \"#0000FF\"\n";
        let store = Config::parse(yaml).unwrap().palette_store().unwrap();
        assert_eq!(
            store.colors("duo").unwrap(),
            &[Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255)]
        );
        assert!(store.get("standard").is_some());
    }

    #[test]
    fn test_user_palette_cannot_shadow_builtin() {
        let yaml = "palettes:\n  mini:\n    - \"#FF0000\"\n";
        assert!(Config::parse(yaml).unwrap().palette_store().is_err());
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        let (config, path) = Config::discover(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_none());

        std::fs::write(dir.path().join(CONFIG_FILENAME), "settings:\n  cellSize: 3\n").unwrap();
        let (config, path) = Config::discover(dir.path()).unwrap();
        assert_eq!(config.settings.cell_size, 3);
        assert!(path.is_some());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("maxCells: 48"));
        assert_eq!(Config::parse(&yaml).unwrap(), config);
    }
}
