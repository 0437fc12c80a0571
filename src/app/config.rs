//! Configuration Management

use crate::color::{ColorScale, ColorScaleConfig};
use crate::data::ColumnMap;
use crate::engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Output raster settings
    pub image: ImageConfig,
    /// Field accumulation settings
    pub field: FieldConfig,
    /// Color encoding settings
    pub color: ColorConfig,
    /// Mask containment settings
    pub masks: MaskConfig,
    /// CSV column mapping
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Output raster configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
}

/// Field accumulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Kernel radius in pixels
    pub radius: u32,
    /// Only accumulate samples with a fixation id
    pub fixation_only: bool,
    /// Process all loaded files (false: most recent only)
    pub include_all_files: bool,
}

/// Color encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Hue range in degrees, start to end of recording (may descend)
    pub hue_range: [f64; 2],
    /// Alpha range in percent
    pub alpha_range: [f64; 2],
    /// Color scale for the speed-coded trajectory
    pub speed_scale: ColorScaleConfig,
}

/// Mask containment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Containment margin from mask boundaries, in pixels
    pub safe_offset: f64,
}

/// CSV ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    /// Column names holding each sample field
    #[serde(default)]
    pub columns: ColumnMap,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            radius: 30,
            fixation_only: false,
            include_all_files: true,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            hue_range: [240.0, -50.0],
            alpha_range: [0.0, 70.0],
            speed_scale: ColorScaleConfig::named_gradient("viridis"),
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self { safe_offset: 0.0 }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    ///
    /// A descending hue range is valid; it is honored, not rejected.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.image.width == 0 || self.image.height == 0 {
            return Err(crate::Error::Config(format!(
                "image dimensions must be positive, got {}x{}",
                self.image.width, self.image.height
            )));
        }
        if self.field.radius == 0 {
            return Err(crate::Error::Config("radius must be > 0".to_string()));
        }
        for a in self.color.alpha_range {
            if !(0.0..=100.0).contains(&a) {
                return Err(crate::Error::Config(format!(
                    "alpha_range values must be in [0, 100], got {a}"
                )));
            }
        }
        for h in self.color.hue_range {
            if !h.is_finite() {
                return Err(crate::Error::Config(format!(
                    "hue_range values must be finite, got {h}"
                )));
            }
        }
        if self.masks.safe_offset < 0.0 {
            return Err(crate::Error::Config(format!(
                "safe_offset must be >= 0, got {}",
                self.masks.safe_offset
            )));
        }
        // An unknown speed scale name is caught here rather than at the
        // first render.
        ColorScale::from_config(&self.color.speed_scale)?;
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gazemap").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// The engine settings this configuration describes.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            width: self.image.width,
            height: self.image.height,
            radius: self.field.radius,
            hue_range: self.color.hue_range,
            alpha_range: self.color.alpha_range,
            speed_scale: self.color.speed_scale.clone(),
            safe_offset: self.masks.safe_offset,
            fixation_only: self.field.fixation_only,
            include_all_files: self.field.include_all_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.image.width, 1600);
        assert_eq!(config.image.height, 1200);
        assert_eq!(config.field.radius, 30);
        assert_eq!(config.color.hue_range, [240.0, -50.0]);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[image]"));
        assert!(toml.contains("[field]"));
        assert!(toml.contains("[color]"));
        assert!(toml.contains("[masks]"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_dimensions() {
        let mut config = Config::default();
        config.image.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_radius() {
        let mut config = Config::default();
        config.field.radius = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_alpha_out_of_range() {
        let mut config = Config::default();
        config.color.alpha_range = [0.0, 170.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_descending_hue_range_is_valid() {
        let mut config = Config::default();
        config.color.hue_range = [300.0, -100.0];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_safe_offset() {
        let mut config = Config::default();
        config.masks.safe_offset = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_speed_scale() {
        let mut config = Config::default();
        config.color.speed_scale = ColorScaleConfig::named_gradient("tropical");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_roundtrip_serialization() {
        let original = Config::default();
        let toml_str = original.to_toml().unwrap();
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(original.image.width, deserialized.image.width);
        assert_eq!(original.field.radius, deserialized.field.radius);
        assert_eq!(original.color.hue_range, deserialized.color.hue_range);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let mut original = Config::default();
        original.image.width = 800;
        original.field.radius = 12;
        original.masks.safe_offset = 4.0;

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.image.width, 800);
        assert_eq!(loaded.field.radius, 12);
        assert_eq!(loaded.masks.safe_offset, 4.0);
    }

    #[test]
    fn test_config_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir.path().join("nested").join("path").join("config.toml");

        Config::default().save(&nested_path).expect("Failed to save config");
        assert!(nested_path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let nonexistent_path = PathBuf::from("/tmp/nonexistent_gazemap_config_12345.toml");
        assert!(Config::load(&nonexistent_path).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");
        let mut config = Config::default();
        config.field.radius = 5;
        config.save(&config_path).unwrap();

        let text = std::fs::read_to_string(&config_path).unwrap();
        let broken = text.replace("radius = 5", "radius = 0");
        std::fs::write(&config_path, broken).unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_missing_ingest_section_uses_defaults() {
        // A config without [ingest] falls back to the default columns.
        let toml_str = r#"
[image]
width = 640
height = 480

[field]
radius = 10
fixation_only = false
include_all_files = true

[color]
hue_range = [240.0, -50.0]
alpha_range = [0.0, 70.0]

[color.speed_scale]
kind = "named-gradient"
name = "viridis"
range = [0.0, 1.0]
alpha_range = [100.0, 100.0]
space = "rgb"
easing = "linear"

[masks]
safe_offset = 0.0
"#;
        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.ingest.columns.x, "gaze x [px]");
        assert_eq!(config.image.width, 640);
    }

    #[test]
    fn test_engine_config_mapping() {
        let mut config = Config::default();
        config.image.width = 320;
        config.image.height = 240;
        config.field.fixation_only = true;
        config.masks.safe_offset = 2.5;

        let engine = config.engine_config();
        assert_eq!(engine.width, 320);
        assert_eq!(engine.height, 240);
        assert!(engine.fixation_only);
        assert_eq!(engine.safe_offset, 2.5);
    }
}
