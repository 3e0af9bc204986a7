use glam::Vec2;

use crate::chem::{Residue, SecondaryKind};
use crate::groups::GroupKind;
use crate::options::{
    CartoonOptions, Resolution, SecondaryOptions, TraceOptions, TubeOptions,
};

use super::Mode;

const RIBBON_GROUPS: [GroupKind; 3] = [
    GroupKind::CartoonChains,
    GroupKind::NucleicSpheres,
    GroupKind::NucleicCylinders,
];

/// Secondary-structure ribbons with arrow heads on terminal residues.
#[derive(Debug, Clone, Default)]
pub struct CartoonMode {
    opts: CartoonOptions,
}

impl CartoonMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: CartoonOptions) -> Self {
        Self { opts }
    }

    fn tube(&self) -> Vec2 {
        Vec2::splat(self.opts.radius)
    }

    fn secondary(&self, residue: &Residue) -> Option<(&SecondaryOptions, bool)> {
        residue.secondary.map(|span| {
            let opts = match span.kind {
                SecondaryKind::Helix => &self.opts.helix,
                SecondaryKind::Strand => &self.opts.strand,
            };
            (opts, span.term)
        })
    }

    fn start_radius(&self, residue: &Residue) -> Vec2 {
        match self.secondary(residue) {
            None => self.tube(),
            Some((sec, true)) => Vec2::new(self.opts.depth, sec.arrow),
            Some((sec, false)) => Vec2::new(self.opts.depth, sec.width),
        }
    }

    fn end_radius(&self, residue: &Residue) -> Vec2 {
        match self.secondary(residue) {
            None => self.tube(),
            Some((_, true)) => Vec2::new(self.opts.depth, self.opts.radius),
            Some((sec, false)) => Vec2::new(self.opts.depth, sec.width),
        }
    }
}

impl Mode for CartoonMode {
    fn id(&self) -> &'static str {
        "CA"
    }

    fn name(&self) -> &'static str {
        "Cartoon"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &RIBBON_GROUPS
    }

    fn poly_complexity(&self, resolution: Resolution) -> u32 {
        self.opts.poly_complexity.at(resolution)
    }

    fn calc_stick_radius(&self) -> f32 {
        self.opts.radius
    }

    fn tension(&self) -> f32 {
        self.opts.tension
    }

    fn height_segments_ratio(&self) -> f32 {
        self.opts.height_segments_ratio
    }

    fn residue_radius(&self, residue: &Residue, end_index: usize) -> Vec2 {
        let start = self.start_radius(residue);
        if end_index == 0 {
            return start;
        }
        let end = self.end_radius(residue);
        if end_index == 2 {
            return end;
        }
        start.lerp(end, end_index as f32 / 2.0)
    }
}

/// Constant-radius backbone tube.
#[derive(Debug, Clone, Default)]
pub struct TubeMode {
    opts: TubeOptions,
}

impl TubeMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: TubeOptions) -> Self {
        Self { opts }
    }
}

impl Mode for TubeMode {
    fn id(&self) -> &'static str {
        "TU"
    }

    fn name(&self) -> &'static str {
        "Tube"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &RIBBON_GROUPS
    }

    fn poly_complexity(&self, resolution: Resolution) -> u32 {
        self.opts.poly_complexity.at(resolution)
    }

    fn calc_stick_radius(&self) -> f32 {
        self.opts.radius
    }

    fn tension(&self) -> f32 {
        self.opts.tension
    }

    fn height_segments_ratio(&self) -> f32 {
        self.opts.height_segments_ratio
    }
}

/// Straight cylinders between consecutive control points.
#[derive(Debug, Clone, Default)]
pub struct TraceMode {
    opts: TraceOptions,
}

impl TraceMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: TraceOptions) -> Self {
        Self { opts }
    }
}

impl Mode for TraceMode {
    fn id(&self) -> &'static str {
        "TR"
    }

    fn name(&self) -> &'static str {
        "Trace"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[GroupKind::TraceChains]
    }

    fn poly_complexity(&self, resolution: Resolution) -> u32 {
        self.opts.poly_complexity.at(resolution)
    }

    fn calc_stick_radius(&self) -> f32 {
        self.opts.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::SecondarySpan;
    use crate::test_fixtures::peptide;

    fn with_secondary(kind: SecondaryKind, term: bool) -> Residue {
        let mut res = peptide(1).residues()[0].clone();
        res.secondary = Some(SecondarySpan { kind, term });
        res
    }

    #[test]
    fn coil_is_a_round_tube() {
        let mut res = peptide(1).residues()[0].clone();
        res.secondary = None;
        let mode = CartoonMode::default();
        for end in 0..=2 {
            assert_eq!(mode.residue_radius(&res, end), Vec2::splat(0.3));
        }
    }

    #[test]
    fn strand_terminal_narrows_to_an_arrow_tip() {
        let res = with_secondary(SecondaryKind::Strand, true);
        let mode = CartoonMode::default();
        assert_eq!(mode.residue_radius(&res, 0), Vec2::new(0.25, 2.0));
        assert_eq!(mode.residue_radius(&res, 2), Vec2::new(0.25, 0.3));
        assert!(mode.residue_radius(&res, 1).abs_diff_eq(Vec2::new(0.25, 1.15), 1e-6));
    }

    #[test]
    fn helix_body_is_flat() {
        let res = with_secondary(SecondaryKind::Helix, false);
        let mode = CartoonMode::default();
        assert_eq!(mode.residue_radius(&res, 1), Vec2::new(0.25, 1.0));
    }

    #[test]
    fn tube_ignores_secondary_structure() {
        let res = with_secondary(SecondaryKind::Helix, false);
        let mode = TubeMode::default();
        assert_eq!(mode.residue_radius(&res, 1), Vec2::splat(0.3));
        assert_eq!(mode.tension(), -0.7);
    }
}
