//! Representation options with TOML preset support.
//!
//! Every mode's tunables, label and surface parameters, the shading
//! material and the global resolution level live here. Options serialize
//! to/from TOML so a viewer can keep named presets on disk.

mod labels;
mod material;
mod modes;
mod quality;
mod surface;

use std::path::Path;

pub use labels::LabelOptions;
pub use material::Material;
pub use modes::{
    BallsAndSticksOptions, CartoonOptions, LicoriceOptions, LinesOptions,
    SecondaryOptions, TraceOptions, TubeOptions, VanDerWaalsOptions,
};
pub use quality::{PolyComplexity, QualityOptions, Resolution};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use surface::SurfaceOptions;

use crate::error::RepError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[cartoon]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Balls-and-sticks mode.
    pub balls_and_sticks: BallsAndSticksOptions,
    /// Van der Waals mode.
    pub van_der_waals: VanDerWaalsOptions,
    /// Licorice mode.
    pub licorice: LicoriceOptions,
    /// Lines mode.
    pub lines: LinesOptions,
    /// Cartoon mode.
    pub cartoon: CartoonOptions,
    /// Tube mode.
    pub tube: TubeOptions,
    /// Trace mode.
    pub trace: TraceOptions,
    /// Text label mode.
    pub text: LabelOptions,
    /// Surface mode.
    pub surface: SurfaceOptions,
    /// Shading material passed through to the renderer.
    pub material: Material,
    /// Global quality level.
    pub quality: QualityOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, RepError> {
        let content = std::fs::read_to_string(path).map_err(RepError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, RepError> {
        toml::from_str(content)
            .map_err(|e| RepError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), RepError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RepError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RepError::Io)?;
        }
        std::fs::write(path, content).map_err(RepError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[cartoon]
depth = 0.4

[cartoon.helix]
arrow = 2.5

[quality]
resolution = 'ultra'
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.cartoon.depth, 0.4);
        assert_eq!(opts.cartoon.helix.arrow, 2.5);
        // Everything else should be default
        assert_eq!(opts.cartoon.helix.width, 1.0);
        assert_eq!(opts.cartoon.radius, 0.30);
        assert_eq!(opts.quality.resolution, Resolution::Ultra);
        assert_eq!(opts.balls_and_sticks.bond, 0.15);
        assert_eq!(opts.material.id, "SF");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[cartoon]\ndepth = 'deep'").unwrap_err();
        assert!(matches!(err, RepError::OptionsParse(_)));
    }

    #[test]
    fn poly_complexity_follows_resolution() {
        let opts = Options::default();
        let table = opts.trace.poly_complexity;
        assert_eq!(table.at(Resolution::Poor), 12);
        assert_eq!(table.at(Resolution::Medium), 32);
        assert_eq!(table.at(Resolution::Ultra), 64);
        assert_eq!(opts.van_der_waals.poly_complexity.at(Resolution::High), 16);
    }

    #[test]
    fn material_presets() {
        let glass = Material::preset("GL").unwrap();
        assert_eq!(glass.opacity, 0.5);
        assert!(glass.is_transparent());
        assert!(!Material::default().is_transparent());
        assert!(Material::preset("XX").is_none());
    }

    #[test]
    fn label_rules_parse() {
        use crate::color::ColorRule;
        let labels = LabelOptions::default();
        assert_eq!(labels.fg_rule(), ColorRule::None);
        assert_eq!(labels.bg_rule(), ColorRule::Fixed(0x20_20_20));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("balls_and_sticks"));
        assert!(props.contains_key("cartoon"));
        assert!(props.contains_key("surface"));
        assert!(props.contains_key("quality"));

        // Tessellation tables are not exposed in the UI
        let cartoon = &props["cartoon"]["properties"];
        assert!(cartoon.get("depth").is_some());
        assert!(cartoon.get("helix").is_some());
        assert!(cartoon.get("poly_complexity").is_none());
        assert!(cartoon.get("tension").is_none());
    }
}
