use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::geometry::DEFAULT_SEGMENTS;
use crate::hit::DEFAULT_HIT_WIDTH;
use crate::style::{StyleConfig, hex_color};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "nodewire";

const VALID_KEYS: &str = "defaults.theme, defaults.debug_overlay, defaults.segments, \
    defaults.hit_width, style.line_width, style.point_diameter, style.construction_line_width, \
    style.selected_color, style.selected_halo_color, style.hovered_color, style.construction_color";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_overlay: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_width: Option<f32>,
}

/// Per-field overrides applied on top of the theme's style preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_diameter: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_line_width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_halo_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovered_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_color: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `nodewire config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::debug!("using default config: {e}");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# nodewire configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("dark")
    }

    pub fn debug_overlay(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.debug_overlay)
            .unwrap_or(false)
    }

    pub fn segments(&self) -> usize {
        self.defaults
            .as_ref()
            .and_then(|d| d.segments)
            .unwrap_or(DEFAULT_SEGMENTS)
    }

    pub fn hit_width(&self) -> f32 {
        self.defaults
            .as_ref()
            .and_then(|d| d.hit_width)
            .unwrap_or(DEFAULT_HIT_WIDTH)
    }

    /// The configured theme's style preset with this config's overrides applied.
    pub fn resolved_style(&self) -> Result<StyleConfig> {
        self.style_for(self.theme())
    }

    /// The named preset with this config's overrides applied.
    pub fn style_for(&self, theme: &str) -> Result<StyleConfig> {
        let mut style = StyleConfig::from_name(theme);
        let Some(overrides) = &self.style else {
            return Ok(style);
        };

        if let Some(v) = overrides.line_width {
            style.line_width = v;
        }
        if let Some(v) = overrides.point_diameter {
            style.point_diameter = v;
        }
        if let Some(v) = overrides.construction_line_width {
            style.construction_line_width = v;
        }
        for (value, slot) in [
            (&overrides.selected_color, &mut style.selected_color),
            (&overrides.selected_halo_color, &mut style.selected_halo_color),
            (&overrides.hovered_color, &mut style.hovered_color),
            (&overrides.construction_color, &mut style.construction_color),
        ] {
            if let Some(hex) = value {
                *slot = hex_color::parse(hex).map_err(anyhow::Error::msg)?;
            }
        }

        style.validate()?;
        Ok(style)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults_mut().theme = Some(value.to_string());
            }
            "defaults.debug_overlay" => {
                let enabled = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => anyhow::bail!(
                        "Invalid debug_overlay: {value}. Must be 'true' or 'false'."
                    ),
                };
                self.defaults_mut().debug_overlay = Some(enabled);
            }
            "defaults.segments" => {
                let segments = match value.parse::<usize>() {
                    Ok(n) if n >= 1 => n,
                    _ => anyhow::bail!(
                        "Invalid segments: {value}. Must be a whole number of at least 1."
                    ),
                };
                self.defaults_mut().segments = Some(segments);
            }
            "defaults.hit_width" => {
                let width = match value.parse::<f32>() {
                    Ok(w) if w.is_finite() && w > 0.0 => w,
                    _ => anyhow::bail!("Invalid hit_width: {value}. Must be a positive number."),
                };
                self.defaults_mut().hit_width = Some(width);
            }
            "style.line_width" => self.style_mut().line_width = Some(parse_width(key, value)?),
            "style.point_diameter" => {
                self.style_mut().point_diameter = Some(parse_width(key, value)?)
            }
            "style.construction_line_width" => {
                self.style_mut().construction_line_width = Some(parse_width(key, value)?)
            }
            "style.selected_color" => self.style_mut().selected_color = Some(parse_color(value)?),
            "style.selected_halo_color" => {
                self.style_mut().selected_halo_color = Some(parse_color(value)?)
            }
            "style.hovered_color" => self.style_mut().hovered_color = Some(parse_color(value)?),
            "style.construction_color" => {
                self.style_mut().construction_color = Some(parse_color(value)?)
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }

    fn defaults_mut(&mut self) -> &mut DefaultsConfig {
        self.defaults.get_or_insert_with(DefaultsConfig::default)
    }

    fn style_mut(&mut self) -> &mut StyleOverrides {
        self.style.get_or_insert_with(StyleOverrides::default)
    }
}

fn parse_width(key: &str, value: &str) -> Result<f32> {
    match value.parse::<f32>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a non-negative number."),
    }
}

fn parse_color(value: &str) -> Result<String> {
    hex_color::parse(value).map_err(anyhow::Error::msg)?;
    Ok(value.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Color32;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.theme(), "dark");
        assert!(!config.debug_overlay());
        assert_eq!(config.segments(), 20);
        assert_eq!(config.hit_width(), 10.0);
        assert_eq!(config.resolved_style().unwrap(), StyleConfig::dark());
    }

    #[test]
    fn test_set_theme() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        assert_eq!(config.theme(), "light");
        assert_eq!(config.resolved_style().unwrap().name, "light");
        assert!(config.set("defaults.theme", "neon").is_err());
    }

    #[test]
    fn test_set_defaults() {
        let mut config = Config::default();
        config.set("defaults.debug_overlay", "on").unwrap();
        config.set("defaults.segments", "32").unwrap();
        config.set("defaults.hit_width", "6.5").unwrap();
        assert!(config.debug_overlay());
        assert_eq!(config.segments(), 32);
        assert_eq!(config.hit_width(), 6.5);

        assert!(config.set("defaults.segments", "0").is_err());
        assert!(config.set("defaults.hit_width", "-1").is_err());
        assert!(config.set("defaults.debug_overlay", "maybe").is_err());
    }

    #[test]
    fn test_style_overrides_apply_on_top_of_theme() {
        let mut config = Config::default();
        config.set("style.line_width", "5").unwrap();
        config.set("style.hovered_color", "#00FF00").unwrap();

        let style = config.resolved_style().unwrap();
        assert_eq!(style.line_width, 5.0);
        assert_eq!(style.hovered_color, Color32::from_rgb(0, 255, 0));
        assert_eq!(style.selected_color, StyleConfig::dark().selected_color);
    }

    #[test]
    fn test_overrides_survive_theme_switch() {
        let mut config = Config::default();
        config.set("style.line_width", "5").unwrap();
        config.set("style.hovered_color", "#00ff00").unwrap();

        let light = config.style_for("light").unwrap();
        assert_eq!(light.name, "light");
        assert_eq!(light.line_width, 5.0);
        assert_eq!(light.hovered_color, Color32::from_rgb(0, 255, 0));
        assert_eq!(light.selected_color, StyleConfig::light().selected_color);

        let dark = config.style_for(&light.toggled().name).unwrap();
        assert_eq!(dark, config.resolved_style().unwrap());
    }

    #[test]
    fn test_set_rejects_bad_style_values() {
        let mut config = Config::default();
        assert!(config.set("style.line_width", "wide").is_err());
        assert!(config.set("style.point_diameter", "-2").is_err());
        assert!(config.set("style.selected_color", "orange").is_err());
        assert!(config.style.is_none());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        let err = config.set("style.shadow_color", "#000000").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("style.construction_color", "#808080").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme(), "light");
        assert_eq!(
            loaded.resolved_style().unwrap().construction_color,
            Color32::from_rgb(0x80, 0x80, 0x80)
        );
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }

    #[test]
    fn test_hand_edited_bad_color_fails_to_resolve() {
        let config: Config =
            serde_yaml::from_str("style:\n  selected_color: '#zzzzzz'\n").unwrap();
        assert!(config.resolved_style().is_err());
    }
}
