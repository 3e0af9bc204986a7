use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface extraction parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Surface", inline)]
#[serde(default)]
pub struct SurfaceOptions {
    /// Probe radius added to every atom radius.
    #[schemars(title = "Probe Radius", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub probe_radius: f32,
    /// Multiplier on element radii.
    #[schemars(title = "Radius Scale", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub scale: f32,
    /// Sphere tessellation level.
    #[schemars(title = "Subdivisions", range(min = 0, max = 4))]
    pub subdivisions: u32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            probe_radius: 0.0,
            scale: 1.0,
            subdivisions: 2,
        }
    }
}
