use crate::chem::Atom;
use crate::groups::GroupKind;
use crate::options::{
    BallsAndSticksOptions, LabelOptions, LicoriceOptions, LinesOptions,
    Resolution, VanDerWaalsOptions,
};

use super::Mode;

/// Element-scaled atom spheres joined by bond cylinders.
#[derive(Debug, Clone, Default)]
pub struct BallsAndSticksMode {
    opts: BallsAndSticksOptions,
}

impl BallsAndSticksMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: BallsAndSticksOptions) -> Self {
        Self { opts }
    }
}

impl Mode for BallsAndSticksMode {
    fn id(&self) -> &'static str {
        "BS"
    }

    fn name(&self) -> &'static str {
        "Balls and Sticks"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[
            GroupKind::AtomsSpheres,
            GroupKind::BondsCylinders,
            GroupKind::AromaticTorus,
        ]
    }

    fn poly_complexity(&self, resolution: Resolution) -> u32 {
        self.opts.poly_complexity.at(resolution)
    }

    fn calc_atom_radius(&self, atom: &Atom) -> f32 {
        atom.element.radius() * self.opts.atom
    }

    fn calc_stick_radius(&self) -> f32 {
        self.opts.bond
    }

    fn calc_space_fraction(&self) -> f32 {
        self.opts.space
    }

    fn draw_multiorder_bonds(&self) -> bool {
        self.opts.multibond
    }

    fn show_aromatic_loops(&self) -> bool {
        self.opts.showarom
    }

    fn aromatic_radius(&self) -> f32 {
        self.opts.aromrad
    }

    fn label_options(&self) -> LabelOptions {
        LabelOptions::plain(false)
    }
}

/// Space-filling spheres at the element radius.
#[derive(Debug, Clone, Default)]
pub struct VanDerWaalsMode {
    opts: VanDerWaalsOptions,
}

impl VanDerWaalsMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: VanDerWaalsOptions) -> Self {
        Self { opts }
    }
}

impl Mode for VanDerWaalsMode {
    fn id(&self) -> &'static str {
        "VW"
    }

    fn name(&self) -> &'static str {
        "Van der Waals"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[GroupKind::AtomsSpheres]
    }

    fn poly_complexity(&self, resolution: Resolution) -> u32 {
        self.opts.poly_complexity.at(resolution)
    }
}

/// Equal-radius atoms and bonds.
#[derive(Debug, Clone, Default)]
pub struct LicoriceMode {
    opts: LicoriceOptions,
}

impl LicoriceMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: LicoriceOptions) -> Self {
        Self { opts }
    }
}

impl Mode for LicoriceMode {
    fn id(&self) -> &'static str {
        "LC"
    }

    fn name(&self) -> &'static str {
        "Licorice"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[
            GroupKind::AtomsSpheres,
            GroupKind::BondsCylinders,
            GroupKind::AromaticTorus,
        ]
    }

    fn poly_complexity(&self, resolution: Resolution) -> u32 {
        self.opts.poly_complexity.at(resolution)
    }

    fn calc_atom_radius(&self, _atom: &Atom) -> f32 {
        self.opts.bond
    }

    fn calc_stick_radius(&self) -> f32 {
        self.opts.bond
    }

    fn calc_space_fraction(&self) -> f32 {
        self.opts.space
    }

    fn draw_multiorder_bonds(&self) -> bool {
        self.opts.multibond
    }

    fn show_aromatic_loops(&self) -> bool {
        self.opts.showarom
    }

    fn aromatic_radius(&self) -> f32 {
        self.opts.aromrad
    }

    fn label_options(&self) -> LabelOptions {
        LabelOptions::plain(false)
    }
}

/// Two-color bond lines.
#[derive(Debug, Clone, Default)]
pub struct LinesMode {
    opts: LinesOptions,
}

impl LinesMode {
    /// Mode with the given parameters.
    #[must_use]
    pub fn new(opts: LinesOptions) -> Self {
        Self { opts }
    }
}

impl Mode for LinesMode {
    fn id(&self) -> &'static str {
        "LN"
    }

    fn name(&self) -> &'static str {
        "Lines"
    }

    fn dep_groups(&self) -> &'static [GroupKind] {
        &[
            GroupKind::AromaticLines,
            GroupKind::BondsLines,
            GroupKind::OrphanedAtomsCrosses,
        ]
    }

    fn calc_atom_radius(&self, _atom: &Atom) -> f32 {
        self.opts.atom
    }

    fn draw_multiorder_bonds(&self) -> bool {
        self.opts.multibond
    }

    fn show_aromatic_loops(&self) -> bool {
        self.opts.showarom
    }

    fn aromatic_offset(&self) -> f32 {
        self.opts.offsarom
    }

    fn aromatic_arc_chunks(&self) -> u32 {
        self.opts.chunkarom
    }

    fn label_options(&self) -> LabelOptions {
        LabelOptions::plain(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::Element;
    use crate::test_fixtures::benzene;

    #[test]
    fn balls_scale_element_radius() {
        let complex = benzene();
        let carbon = &complex.atoms()[0];
        let mode = BallsAndSticksMode::default();
        let expected = Element::C.radius() * 0.23;
        assert!((mode.calc_atom_radius(carbon) - expected).abs() < 1e-6);
        assert_eq!(mode.calc_stick_radius(), 0.15);
        assert!(mode.show_aromatic_loops());
    }

    #[test]
    fn licorice_atoms_match_sticks() {
        let complex = benzene();
        let mode = LicoriceMode::default();
        for atom in complex.atoms() {
            assert_eq!(mode.calc_atom_radius(atom), mode.calc_stick_radius());
        }
    }

    #[test]
    fn van_der_waals_uses_plain_radius() {
        let complex = benzene();
        let hydrogen = &complex.atoms()[6];
        let mode = VanDerWaalsMode::default();
        assert_eq!(mode.calc_atom_radius(hydrogen), Element::H.radius());
        assert!(!mode.draw_multiorder_bonds());
    }

    #[test]
    fn lines_loop_parameters() {
        let mode = LinesMode::default();
        assert_eq!(mode.aromatic_offset(), 0.2);
        assert_eq!(mode.aromatic_arc_chunks(), 10);
        assert_eq!(mode.poly_complexity(Resolution::High), 0);
    }
}
