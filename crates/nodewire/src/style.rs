use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// Pens, widths and colors shared by every connection render.
///
/// Built once (at startup or on a theme switch) and then only read. Renders
/// take it by reference; switching theme means building a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub line_width: f32,
    pub point_diameter: f32,
    pub construction_line_width: f32,
    #[serde(with = "hex_color")]
    pub selected_color: Color32,
    #[serde(with = "hex_color")]
    pub selected_halo_color: Color32,
    #[serde(with = "hex_color")]
    pub hovered_color: Color32,
    #[serde(with = "hex_color")]
    pub construction_color: Color32,
}

fn default_name() -> String {
    "custom".to_string()
}

impl StyleConfig {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            line_width: 3.0,
            point_diameter: 10.0,
            construction_line_width: 2.0,
            selected_color: Color32::from_rgb(0x64, 0x64, 0x64),
            selected_halo_color: Color32::from_rgb(0xFF, 0xA5, 0x00), // orange
            hovered_color: Color32::from_rgb(0xE0, 0xFF, 0xFF),       // light cyan
            construction_color: Color32::from_rgb(0xA0, 0xA0, 0xA4),  // gray
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            line_width: 3.0,
            point_diameter: 10.0,
            construction_line_width: 2.0,
            selected_color: Color32::from_rgb(0x3C, 0x3C, 0x3C),
            selected_halo_color: Color32::from_rgb(0xE0, 0x7B, 0x00),
            hovered_color: Color32::from_rgb(0x2E, 0x8B, 0xC0),
            construction_color: Color32::from_rgb(0x80, 0x80, 0x84),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "light" {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Load a style file. `.json` files are read as JSON, anything else as YAML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read style file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let style: StyleConfig = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        style.validate()?;
        tracing::debug!(path = %path.display(), name = %style.name, "loaded connection style");
        Ok(style)
    }

    /// Reject widths and diameters that cannot be drawn.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("line_width", self.line_width),
            ("point_diameter", self.point_diameter),
            ("construction_line_width", self.construction_line_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("Invalid {field}: {value}. Must be a non-negative number.");
            }
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::dark()
    }
}

/// Serde adapter storing colors as `#rrggbb` / `#rrggbbaa` strings.
pub(crate) mod hex_color {
    use eframe::egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::color::to_hex;

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<Color32, String> {
        Color32::from_hex(s.trim())
            .map_err(|e| format!("Invalid color '{s}': {e:?}. Expected #rrggbb or #rrggbbaa."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(StyleConfig::dark().validate().is_ok());
        assert!(StyleConfig::light().validate().is_ok());
    }

    #[test]
    fn test_from_name_and_toggle() {
        assert_eq!(StyleConfig::from_name("light").name, "light");
        assert_eq!(StyleConfig::from_name("dark").name, "dark");
        assert_eq!(StyleConfig::from_name("anything").name, "dark");
        assert_eq!(StyleConfig::dark().toggled(), StyleConfig::light());
        assert_eq!(StyleConfig::light().toggled(), StyleConfig::dark());
    }

    #[test]
    fn test_validate_rejects_bad_widths() {
        let mut style = StyleConfig::dark();
        style.line_width = -1.0;
        assert!(style.validate().is_err());
        style.line_width = f32::NAN;
        assert!(style.validate().is_err());
        style.line_width = 0.0;
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_uses_hex() {
        let yaml = serde_yaml::to_string(&StyleConfig::dark()).unwrap();
        assert!(yaml.contains("#ffa500"));
        let back: StyleConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, StyleConfig::dark());
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(
            &path,
            r##"{
                "line_width": 4.0,
                "point_diameter": 8.0,
                "construction_line_width": 1.5,
                "selected_color": "#646464",
                "selected_halo_color": "#ffa500",
                "hovered_color": "#e0ffff",
                "construction_color": "#a0a0a480"
            }"##,
        )
        .unwrap();

        let style = StyleConfig::load_from(&path).unwrap();
        assert_eq!(style.name, "custom");
        assert_eq!(style.line_width, 4.0);
        assert_eq!(
            style.construction_color,
            Color32::from_rgba_unmultiplied(0xa0, 0xa0, 0xa4, 0x80)
        );
    }

    #[test]
    fn test_load_yaml_file_rejects_bad_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.yaml");
        std::fs::write(
            &path,
            "line_width: 3\npoint_diameter: 10\nconstruction_line_width: 2\n\
             selected_color: 'not-a-color'\nselected_halo_color: '#ffa500'\n\
             hovered_color: '#e0ffff'\nconstruction_color: '#a0a0a4'\n",
        )
        .unwrap();
        assert!(StyleConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StyleConfig::load_from(Path::new("/nonexistent/style.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read style file"));
    }
}
