use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Geometry resolution level.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Coarsest tessellation.
    Poor,
    /// Low tessellation.
    Low,
    /// Default tessellation.
    #[default]
    Medium,
    /// Fine tessellation.
    High,
    /// Finest tessellation.
    Ultra,
}

/// Polygon complexity per resolution level for one mode family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
pub struct PolyComplexity {
    /// Value at [`Resolution::Poor`].
    pub poor: u32,
    /// Value at [`Resolution::Low`].
    pub low: u32,
    /// Value at [`Resolution::Medium`].
    pub medium: u32,
    /// Value at [`Resolution::High`].
    pub high: u32,
    /// Value at [`Resolution::Ultra`].
    pub ultra: u32,
}

impl PolyComplexity {
    /// Table from the five level values, coarsest first.
    #[must_use]
    pub const fn new(poor: u32, low: u32, medium: u32, high: u32, ultra: u32) -> Self {
        Self {
            poor,
            low,
            medium,
            high,
            ultra,
        }
    }

    /// Value for `resolution`.
    #[must_use]
    pub fn at(&self, resolution: Resolution) -> u32 {
        match resolution {
            Resolution::Poor => self.poor,
            Resolution::Low => self.low,
            Resolution::Medium => self.medium,
            Resolution::High => self.high,
            Resolution::Ultra => self.ultra,
        }
    }
}

impl Default for PolyComplexity {
    fn default() -> Self {
        Self::new(3, 4, 6, 12, 32)
    }
}

/// Global quality settings.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Quality", inline)]
#[serde(default)]
pub struct QualityOptions {
    /// Resolution level used to pick each mode's poly complexity.
    #[schemars(title = "Resolution")]
    pub resolution: Resolution,
}
