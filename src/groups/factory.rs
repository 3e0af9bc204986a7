//! Group kinds and the closed set of group variants.

use crate::chem::Complex;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Raycaster};
use crate::selection::Selection;

use super::{
    AromaticLinesGroup, AromaticTorusGroup, AtomsSphereGroup, AtomsSurfaceGroup, AtomsTextGroup,
    BondsCylinderGroup, BondsLinesGroup, BuildContext, Intersection, NucleicCylindersGroup,
    NucleicSpheresGroup, OrphanedAtomsCrossesGroup, RepresentationGroup, ResiduesSubseqGroup,
    ResiduesTraceGroup, SubsetMesh,
};

/// Every group a mode can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// One sphere per atom.
    AtomsSpheres,
    /// Two-color cylinders per bond order.
    BondsCylinders,
    /// Two-color lines per bond order.
    BondsLines,
    /// Axis crosses on atoms without bonds.
    OrphanedAtomsCrosses,
    /// Tube loops inside aromatic rings.
    AromaticTorus,
    /// Line loops inside aromatic rings.
    AromaticLines,
    /// Spline-swept backbone ribbons or tubes.
    CartoonChains,
    /// Cylinders between backbone control points.
    TraceChains,
    /// One sphere per nucleotide base.
    NucleicSpheres,
    /// One cylinder per nucleotide base.
    NucleicCylinders,
    /// One label per atom.
    TextLabels,
    /// Molecular surface over the selected atoms.
    Surface,
}

impl GroupKind {
    /// Short lowercase name used in logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AtomsSpheres => "atom spheres",
            Self::BondsCylinders => "bond cylinders",
            Self::BondsLines => "bond lines",
            Self::OrphanedAtomsCrosses => "orphan crosses",
            Self::AromaticTorus => "aromatic torus",
            Self::AromaticLines => "aromatic lines",
            Self::CartoonChains => "cartoon chains",
            Self::TraceChains => "trace chains",
            Self::NucleicSpheres => "nucleic spheres",
            Self::NucleicCylinders => "nucleic cylinders",
            Self::TextLabels => "text labels",
            Self::Surface => "surface",
        }
    }

    /// Selection this kind is built over.
    #[must_use]
    pub fn select<'a>(self, complex: &'a Complex, mask: u32, ctx: &BuildContext<'_>) -> Selection<'a> {
        match self {
            Self::AtomsSpheres | Self::TextLabels | Self::Surface => Selection::atoms(complex, mask),
            Self::OrphanedAtomsCrosses => Selection::orphan_atoms(complex, mask),
            Self::BondsCylinders | Self::BondsLines => Selection::bonds(complex, mask),
            Self::AromaticTorus | Self::AromaticLines => {
                Selection::aromatic(complex, mask, ctx.mode.show_aromatic_loops())
            }
            Self::CartoonChains | Self::TraceChains => Selection::subseqs(complex, mask),
            Self::NucleicSpheres | Self::NucleicCylinders => Selection::nucleic(complex, mask),
        }
    }

    /// Select the `mask`-ed part of `complex` and build this kind over it.
    ///
    /// # Errors
    ///
    /// Returns [`RepError::EmptySelection`] when nothing is selected, and
    /// propagates construction failures of the group.
    pub fn build<'a>(
        self,
        complex: &'a Complex,
        mask: u32,
        ctx: &BuildContext<'_>,
    ) -> Result<ChemGroup<'a>, RepError> {
        let selection = self.select(complex, mask, ctx);
        if selection.is_empty() {
            return Err(RepError::EmptySelection(self.name()));
        }
        let group = match self {
            Self::AtomsSpheres => ChemGroup::AtomsSphere(AtomsSphereGroup::new(selection, ctx)),
            Self::BondsCylinders => ChemGroup::BondsCylinder(BondsCylinderGroup::new(selection, ctx)),
            Self::BondsLines => ChemGroup::BondsLines(BondsLinesGroup::new(selection, ctx)),
            Self::OrphanedAtomsCrosses => {
                ChemGroup::OrphanCrosses(OrphanedAtomsCrossesGroup::new(selection, ctx))
            }
            Self::AromaticTorus => ChemGroup::AromaticTorus(AromaticTorusGroup::new(selection, ctx)?),
            Self::AromaticLines => ChemGroup::AromaticLines(AromaticLinesGroup::new(selection, ctx)),
            Self::CartoonChains => {
                ChemGroup::ResiduesSubseq(ResiduesSubseqGroup::new(selection, ctx)?)
            }
            Self::TraceChains => ChemGroup::ResiduesTrace(ResiduesTraceGroup::new(selection, ctx)),
            Self::NucleicSpheres => {
                ChemGroup::NucleicSpheres(NucleicSpheresGroup::new(selection, ctx))
            }
            Self::NucleicCylinders => {
                ChemGroup::NucleicCylinders(NucleicCylindersGroup::new(selection, ctx))
            }
            Self::TextLabels => ChemGroup::AtomsText(AtomsTextGroup::new(selection, ctx)?),
            Self::Surface => ChemGroup::AtomsSurface(AtomsSurfaceGroup::new(selection, ctx)?),
        };
        log::debug!("built {} group: {} chunks", self.name(), group.chunk_count());
        Ok(group)
    }
}

/// A built group of any kind.
#[derive(Debug)]
pub enum ChemGroup<'a> {
    /// Atom spheres.
    AtomsSphere(AtomsSphereGroup<'a>),
    /// Molecular surface.
    AtomsSurface(AtomsSurfaceGroup<'a>),
    /// Atom labels.
    AtomsText(AtomsTextGroup<'a>),
    /// Bond cylinders.
    BondsCylinder(BondsCylinderGroup<'a>),
    /// Bond lines.
    BondsLines(BondsLinesGroup<'a>),
    /// Crosses on unbonded atoms.
    OrphanCrosses(OrphanedAtomsCrossesGroup<'a>),
    /// Backbone sweep.
    ResiduesSubseq(ResiduesSubseqGroup<'a>),
    /// Backbone trace.
    ResiduesTrace(ResiduesTraceGroup<'a>),
    /// Nucleotide base cylinders.
    NucleicCylinders(NucleicCylindersGroup<'a>),
    /// Nucleotide base spheres.
    NucleicSpheres(NucleicSpheresGroup<'a>),
    /// Aromatic tube loops.
    AromaticTorus(AromaticTorusGroup<'a>),
    /// Aromatic line loops.
    AromaticLines(AromaticLinesGroup<'a>),
}

impl<'a> ChemGroup<'a> {
    fn inner(&self) -> &(dyn RepresentationGroup + 'a) {
        match self {
            Self::AtomsSphere(g) => g,
            Self::AtomsSurface(g) => g,
            Self::AtomsText(g) => g,
            Self::BondsCylinder(g) => g,
            Self::BondsLines(g) => g,
            Self::OrphanCrosses(g) => g,
            Self::ResiduesSubseq(g) => g,
            Self::ResiduesTrace(g) => g,
            Self::NucleicCylinders(g) => g,
            Self::NucleicSpheres(g) => g,
            Self::AromaticTorus(g) => g,
            Self::AromaticLines(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut (dyn RepresentationGroup + 'a) {
        match self {
            Self::AtomsSphere(g) => g,
            Self::AtomsSurface(g) => g,
            Self::AtomsText(g) => g,
            Self::BondsCylinder(g) => g,
            Self::BondsLines(g) => g,
            Self::OrphanCrosses(g) => g,
            Self::ResiduesSubseq(g) => g,
            Self::ResiduesTrace(g) => g,
            Self::NucleicCylinders(g) => g,
            Self::NucleicSpheres(g) => g,
            Self::AromaticTorus(g) => g,
            Self::AromaticLines(g) => g,
        }
    }
}

impl RepresentationGroup for ChemGroup<'_> {
    fn kind(&self) -> GroupKind {
        self.inner().kind()
    }

    fn geometry(&self) -> &dyn Geometry {
        self.inner().geometry()
    }

    fn calc_chunks_list(&self, mask: u32, inner_only: bool) -> Vec<usize> {
        self.inner().calc_chunks_list(mask, inner_only)
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.inner_mut().set_chunk_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.inner().subset_mesh(chunks)
    }

    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>) {
        self.inner().raycast(raycaster, intersects);
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        self.inner_mut().update_to_frame(frame, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorer::ElementColorer;
    use crate::mode::{BallsAndSticksMode, CartoonMode, LinesMode, Mode, VanDerWaalsMode};
    use crate::options::Material;
    use crate::test_fixtures::{benzene, peptide, salty_water};

    fn ctx<'a>(mode: &'a dyn Mode, material: &'a Material) -> BuildContext<'a> {
        BuildContext {
            mode,
            colorer: &ElementColorer,
            poly_complexity: 6,
            material,
        }
    }

    #[test]
    fn every_balls_and_sticks_group_builds_over_benzene() {
        let complex = benzene();
        let mode = BallsAndSticksMode::default();
        let material = Material::default();
        let ctx = ctx(&mode, &material);
        for &kind in mode.dep_groups() {
            let group = kind.build(&complex, 1, &ctx).unwrap();
            assert_eq!(group.kind(), kind);
        }
        let torus = GroupKind::AromaticTorus.build(&complex, 1, &ctx).unwrap();
        assert_eq!(torus.chunk_count(), 6);
        // Aromatic ring bonds are single when loops are shown.
        let bonds = GroupKind::BondsCylinders.build(&complex, 1, &ctx).unwrap();
        assert_eq!(bonds.chunk_count(), 24);
    }

    #[test]
    fn empty_selections_are_reported_by_kind() {
        let complex = benzene();
        let mode = VanDerWaalsMode::default();
        let material = Material::default();
        let ctx = ctx(&mode, &material);
        let loops = GroupKind::AromaticTorus.build(&complex, 1, &ctx);
        assert!(matches!(loops, Err(RepError::EmptySelection("aromatic torus"))));
        let ribbons = GroupKind::CartoonChains.build(&complex, 1, &ctx);
        assert!(matches!(ribbons, Err(RepError::EmptySelection(_))));
        let masked = GroupKind::AtomsSpheres.build(&complex, 0b100, &ctx);
        assert!(matches!(masked, Err(RepError::EmptySelection("atom spheres"))));
    }

    #[test]
    fn lines_mode_builds_line_groups() {
        let mode = LinesMode::default();
        let material = Material::default();
        let ctx = ctx(&mode, &material);
        let built = |complex: &Complex| -> Vec<GroupKind> {
            mode.dep_groups()
                .iter()
                .filter_map(|k| k.build(complex, 1, &ctx).ok())
                .map(|g| g.kind())
                .collect()
        };
        assert_eq!(built(&benzene()), vec![GroupKind::AromaticLines, GroupKind::BondsLines]);
        let water = salty_water();
        assert_eq!(
            built(&water),
            vec![GroupKind::BondsLines, GroupKind::OrphanedAtomsCrosses]
        );
        let crosses = GroupKind::OrphanedAtomsCrosses.build(&water, 1, &ctx).unwrap();
        assert_eq!(crosses.chunk_count(), 1);
    }

    #[test]
    fn cartoon_chains_over_a_peptide() {
        let complex = peptide(4);
        let mode = CartoonMode::default();
        let material = Material::default();
        let ctx = ctx(&mode, &material);
        let group = GroupKind::CartoonChains.build(&complex, 1, &ctx).unwrap();
        assert_eq!(group.chunk_count(), 8);
        assert!(GroupKind::NucleicSpheres.build(&complex, 1, &ctx).is_err());
    }
}
