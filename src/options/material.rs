use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shading parameters carried alongside geometry.
///
/// The engine never interprets these; they travel with every instanced
/// mesh so the renderer can pick a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Material", inline)]
#[serde(default)]
pub struct Material {
    /// Short preset identifier.
    #[schemars(title = "Preset")]
    pub id: String,
    /// Diffuse intensity.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub diffuse: f32,
    /// Specular intensity.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub specular: f32,
    /// Specular exponent.
    #[schemars(range(min = 1.0, max = 200.0))]
    pub shininess: f32,
    /// Surface opacity.
    #[schemars(title = "Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::soft_plastic()
    }
}

impl Material {
    fn new(id: &str, diffuse: f32, specular: f32, shininess: f32, opacity: f32) -> Self {
        Self {
            id: id.to_owned(),
            diffuse,
            specular,
            shininess,
            opacity,
        }
    }

    /// Soft plastic (`SF`), the default.
    #[must_use]
    pub fn soft_plastic() -> Self {
        Self::new("SF", 1.0, 0.1, 30.0, 1.0)
    }

    /// Look up a built-in preset by identifier.
    #[must_use]
    pub fn preset(id: &str) -> Option<Self> {
        let m = match id {
            "DF" => Self::new("DF", 1.0, 0.0, 1.0, 1.0),
            "SF" => Self::soft_plastic(),
            "PL" => Self::new("PL", 0.56, 0.28, 100.0, 1.0),
            "ME" => Self::new("ME", 0.56, 0.55, 30.0, 1.0),
            "TR" => Self::new("TR", 1.0, 0.0, 1.0, 0.5),
            "GL" => Self::new("GL", 0.5, 0.65, 100.0, 0.5),
            _ => return None,
        };
        Some(m)
    }

    /// Whether the renderer must blend this material.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}
