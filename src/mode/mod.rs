//! Representation modes.
//!
//! A mode decides which groups a representation is made of and supplies
//! the per-entity radii and geometric parameters those groups read while
//! building. Modes are read-only: groups borrow them per call and never
//! keep them.

mod atomic;
mod backbone;
mod surface;
mod text;

use glam::Vec2;

pub use atomic::{BallsAndSticksMode, LicoriceMode, LinesMode, VanDerWaalsMode};
pub use backbone::{CartoonMode, TraceMode, TubeMode};
pub use surface::SurfaceMode;
pub use text::TextMode;

use crate::chem::{Atom, Residue};
use crate::groups::GroupKind;
use crate::options::{LabelOptions, Options, Resolution, SurfaceOptions};

/// Geometric parameters shared by every representation group.
///
/// Defaults describe a mode that draws nothing special: element radii,
/// single-order bonds, no aromatic loops.
pub trait Mode: std::fmt::Debug {
    /// Two-letter mode identifier (`BS`, `CA`, ...).
    fn id(&self) -> &'static str;

    /// Human readable name.
    fn name(&self) -> &'static str;

    /// Groups this mode is made of, in build order.
    fn dep_groups(&self) -> &'static [GroupKind];

    /// Cross-section and sphere tessellation at `resolution`; zero for
    /// modes without tessellated geometry.
    fn poly_complexity(&self, _resolution: Resolution) -> u32 {
        0
    }

    /// Sphere radius of one atom.
    fn calc_atom_radius(&self, atom: &Atom) -> f32 {
        atom.element.radius()
    }

    /// Bond, trace and tube radius.
    fn calc_stick_radius(&self) -> f32 {
        0.0
    }

    /// Fraction of free space between the cylinders of a multi-order bond.
    fn calc_space_fraction(&self) -> f32 {
        0.0
    }

    /// Whether bonds are drawn once per bond order.
    fn draw_multiorder_bonds(&self) -> bool {
        false
    }

    /// Whether aromatic rings get a loop instead of alternating bonds.
    fn show_aromatic_loops(&self) -> bool {
        false
    }

    /// Gap between the ring bonds and a line loop.
    fn aromatic_offset(&self) -> f32 {
        0.0
    }

    /// Line pieces per atom arc of a line loop.
    fn aromatic_arc_chunks(&self) -> u32 {
        1
    }

    /// Minor radius of a torus loop.
    fn aromatic_radius(&self) -> f32 {
        0.0
    }

    /// Backbone spline tension.
    fn tension(&self) -> f32 {
        0.0
    }

    /// Spline rings per residue half relative to the poly complexity.
    fn height_segments_ratio(&self) -> f32 {
        1.0
    }

    /// Ribbon cross-section radii `(depth, width)` at a residue point:
    /// `0` is the residue start, `1` its middle and `2` its end.
    fn residue_radius(&self, _residue: &Residue, _end_index: usize) -> Vec2 {
        Vec2::splat(self.calc_stick_radius())
    }

    /// Parameters for the surface builder.
    fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions::default()
    }

    /// Label text and color rules.
    fn label_options(&self) -> LabelOptions {
        LabelOptions::default()
    }
}

/// Built-in modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Element-scaled spheres, bond cylinders and aromatic tori.
    BallsAndSticks,
    /// Space-filling element-radius spheres.
    VanDerWaals,
    /// Equal-radius spheres and cylinders.
    Licorice,
    /// Bond lines and aromatic line loops.
    Lines,
    /// Secondary-structure ribbons plus nucleotide bases.
    Cartoon,
    /// Constant-radius backbone tube plus nucleotide bases.
    Tube,
    /// Cylinders between consecutive control points.
    Trace,
    /// Atom labels.
    Text,
    /// Molecular surface.
    Surface,
}

impl ModeKind {
    /// Every built-in mode.
    pub const ALL: [Self; 9] = [
        Self::BallsAndSticks,
        Self::VanDerWaals,
        Self::Licorice,
        Self::Lines,
        Self::Cartoon,
        Self::Tube,
        Self::Trace,
        Self::Text,
        Self::Surface,
    ];

    /// Look a mode up by its two-letter identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let kind = match id.trim().to_ascii_uppercase().as_str() {
            "BS" => Self::BallsAndSticks,
            "VW" => Self::VanDerWaals,
            "LC" => Self::Licorice,
            "LN" => Self::Lines,
            "CA" => Self::Cartoon,
            "TU" => Self::Tube,
            "TR" => Self::Trace,
            "TX" => Self::Text,
            "SU" => Self::Surface,
            _ => return None,
        };
        Some(kind)
    }

    /// Instantiate the mode with its section of `options`.
    #[must_use]
    pub fn create(self, options: &Options) -> Box<dyn Mode> {
        match self {
            Self::BallsAndSticks => {
                Box::new(BallsAndSticksMode::new(options.balls_and_sticks.clone()))
            }
            Self::VanDerWaals => {
                Box::new(VanDerWaalsMode::new(options.van_der_waals.clone()))
            }
            Self::Licorice => Box::new(LicoriceMode::new(options.licorice.clone())),
            Self::Lines => Box::new(LinesMode::new(options.lines.clone())),
            Self::Cartoon => Box::new(CartoonMode::new(options.cartoon.clone())),
            Self::Tube => Box::new(TubeMode::new(options.tube.clone())),
            Self::Trace => Box::new(TraceMode::new(options.trace.clone())),
            Self::Text => Box::new(TextMode::new(options.text.clone())),
            Self::Surface => Box::new(SurfaceMode::new(options.surface)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_kinds() {
        let options = Options::default();
        for kind in ModeKind::ALL {
            let mode = kind.create(&options);
            assert_eq!(ModeKind::from_id(mode.id()), Some(kind));
            assert!(!mode.dep_groups().is_empty());
        }
        assert_eq!(ModeKind::from_id("ca"), Some(ModeKind::Cartoon));
        assert_eq!(ModeKind::from_id("QQ"), None);
    }

    #[test]
    fn resolution_picks_from_the_mode_table() {
        let options = Options::default();
        let bs = ModeKind::BallsAndSticks.create(&options);
        assert_eq!(bs.poly_complexity(Resolution::Poor), 3);
        assert_eq!(bs.poly_complexity(Resolution::Ultra), 32);
        let text = ModeKind::Text.create(&options);
        assert_eq!(text.poly_complexity(Resolution::Medium), 0);
    }
}
