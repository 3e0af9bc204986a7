use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::quality::PolyComplexity;

/// Balls-and-sticks parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Balls and Sticks", inline)]
#[serde(default)]
pub struct BallsAndSticksOptions {
    /// Atom sphere scale relative to the element radius.
    #[schemars(title = "Atom Scale", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub atom: f32,
    /// Bond cylinder radius in angstroms.
    #[schemars(title = "Bond Radius", range(min = 0.02, max = 0.5), extend("step" = 0.01))]
    pub bond: f32,
    /// Fraction of free space between cylinders of a multi-order bond.
    #[schemars(title = "Bond Spacing", range(min = 0.0, max = 0.9), extend("step" = 0.05))]
    pub space: f32,
    /// Draw one cylinder per bond order.
    #[schemars(title = "Multiple Bonds")]
    pub multibond: bool,
    /// Minor radius of aromatic loop tori.
    #[schemars(title = "Aromatic Loop Radius", range(min = 0.02, max = 0.3), extend("step" = 0.01))]
    pub aromrad: f32,
    /// Draw aromatic loops instead of alternating bonds.
    #[schemars(title = "Aromatic Loops")]
    pub showarom: bool,
    /// Tessellation per resolution level.
    #[schemars(skip)]
    pub poly_complexity: PolyComplexity,
}

impl Default for BallsAndSticksOptions {
    fn default() -> Self {
        Self {
            atom: 0.23,
            bond: 0.15,
            space: 0.5,
            multibond: true,
            aromrad: 0.1,
            showarom: true,
            poly_complexity: PolyComplexity::new(3, 4, 6, 12, 32),
        }
    }
}

/// Van der Waals (space-filling) parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Van der Waals", inline)]
#[serde(default)]
pub struct VanDerWaalsOptions {
    /// Sphere tessellation per resolution level.
    #[schemars(skip)]
    pub poly_complexity: PolyComplexity,
}

impl Default for VanDerWaalsOptions {
    fn default() -> Self {
        Self {
            poly_complexity: PolyComplexity::new(4, 6, 8, 16, 32),
        }
    }
}

/// Licorice parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Licorice", inline)]
#[serde(default)]
pub struct LicoriceOptions {
    /// Bond (and atom) radius in angstroms.
    #[schemars(title = "Radius", range(min = 0.05, max = 0.5), extend("step" = 0.01))]
    pub bond: f32,
    /// Fraction of free space between cylinders of a multi-order bond.
    #[schemars(title = "Bond Spacing", range(min = 0.0, max = 0.9), extend("step" = 0.05))]
    pub space: f32,
    /// Draw one cylinder per bond order.
    #[schemars(title = "Multiple Bonds")]
    pub multibond: bool,
    /// Minor radius of aromatic loop tori.
    #[schemars(title = "Aromatic Loop Radius", range(min = 0.02, max = 0.3), extend("step" = 0.01))]
    pub aromrad: f32,
    /// Draw aromatic loops.
    #[schemars(title = "Aromatic Loops")]
    pub showarom: bool,
    /// Tessellation per resolution level.
    #[schemars(skip)]
    pub poly_complexity: PolyComplexity,
}

impl Default for LicoriceOptions {
    fn default() -> Self {
        Self {
            bond: 0.20,
            space: 0.0,
            multibond: true,
            aromrad: 0.1,
            showarom: true,
            poly_complexity: PolyComplexity::new(3, 4, 6, 12, 32),
        }
    }
}

/// Lines parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lines", inline)]
#[serde(default)]
pub struct LinesOptions {
    /// Draw one line per bond order.
    #[schemars(title = "Multiple Bonds")]
    pub multibond: bool,
    /// Draw aromatic loops.
    #[schemars(title = "Aromatic Loops")]
    pub showarom: bool,
    /// Gap between bonds and the aromatic loop.
    #[schemars(title = "Aromatic Offset", range(min = 0.0, max = 0.6), extend("step" = 0.01))]
    pub offsarom: f32,
    /// Line pieces per atom arc of an aromatic loop.
    #[schemars(title = "Aromatic Arc Pieces", range(min = 1, max = 40))]
    pub chunkarom: u32,
    /// Atom pick radius and half-size of the cross on unbonded atoms.
    #[schemars(skip)]
    pub atom: f32,
}

impl Default for LinesOptions {
    fn default() -> Self {
        Self {
            multibond: true,
            showarom: true,
            offsarom: 0.2,
            chunkarom: 10,
            atom: 0.23,
        }
    }
}

/// Ribbon cross-section for one secondary structure class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
pub struct SecondaryOptions {
    /// Ribbon half width in the body of the element.
    #[schemars(range(min = 0.1, max = 3.0))]
    pub width: f32,
    /// Arrow half width at the terminal residue.
    #[schemars(range(min = 0.1, max = 4.0))]
    pub arrow: f32,
}

impl Default for SecondaryOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            arrow: 2.0,
        }
    }
}

/// Cartoon parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Cartoon", inline)]
#[serde(default)]
pub struct CartoonOptions {
    /// Coil tube radius.
    #[schemars(title = "Coil Radius", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub radius: f32,
    /// Ribbon thickness.
    #[schemars(title = "Ribbon Depth", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub depth: f32,
    /// Helix cross-section.
    pub helix: SecondaryOptions,
    /// Strand cross-section.
    pub strand: SecondaryOptions,
    /// Rings per residue half relative to the poly complexity.
    #[schemars(skip)]
    pub height_segments_ratio: f32,
    /// Spline tension (clamped to `0..=1` when used).
    #[schemars(skip)]
    pub tension: f32,
    /// Tessellation per resolution level.
    #[schemars(skip)]
    pub poly_complexity: PolyComplexity,
}

impl Default for CartoonOptions {
    fn default() -> Self {
        Self {
            radius: 0.30,
            depth: 0.25,
            helix: SecondaryOptions::default(),
            strand: SecondaryOptions::default(),
            height_segments_ratio: 1.5,
            tension: -0.7,
            poly_complexity: PolyComplexity::new(4, 6, 10, 18, 34),
        }
    }
}

/// Tube parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tube", inline)]
#[serde(default)]
pub struct TubeOptions {
    /// Tube radius.
    #[schemars(title = "Radius", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub radius: f32,
    /// Rings per residue half relative to the poly complexity.
    #[schemars(skip)]
    pub height_segments_ratio: f32,
    /// Spline tension.
    #[schemars(skip)]
    pub tension: f32,
    /// Tessellation per resolution level.
    #[schemars(skip)]
    pub poly_complexity: PolyComplexity,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            radius: 0.30,
            height_segments_ratio: 1.5,
            tension: -0.7,
            poly_complexity: PolyComplexity::new(4, 6, 10, 18, 34),
        }
    }
}

/// Trace parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Trace", inline)]
#[serde(default)]
pub struct TraceOptions {
    /// Cylinder radius.
    #[schemars(title = "Radius", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub radius: f32,
    /// Tessellation per resolution level.
    #[schemars(skip)]
    pub poly_complexity: PolyComplexity,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            radius: 0.30,
            poly_complexity: PolyComplexity::new(12, 16, 32, 64, 64),
        }
    }
}
