//! A representation: one mode and colorer applied to a masked part of a
//! complex, realized as the groups the mode is made of.

use crate::chem::Complex;
use crate::colorer::Colorer;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::Raycaster;
use crate::groups::{
    disable_subset, enable_subset, get_subset, BuildContext, ChemGroup, GroupKind,
    Intersection, RepresentationGroup, SubsetMesh,
};
use crate::mode::Mode;
use crate::options::{Material, Resolution};

/// Groups built for one `(selection, mode, colorer, material)` tuple.
///
/// Group kinds whose selection comes out empty are skipped, so a
/// balls-and-sticks representation of a molecule without rings simply has
/// no torus group.
#[derive(Debug)]
pub struct Representation<'a> {
    mode: Box<dyn Mode>,
    colorer: Box<dyn Colorer>,
    material: Material,
    poly_complexity: u32,
    groups: Vec<ChemGroup<'a>>,
}

impl<'a> Representation<'a> {
    /// Build every group of `mode` over the atoms of `complex` matching
    /// `mask`.
    ///
    /// # Errors
    ///
    /// Propagates group construction failures other than empty selections.
    pub fn new(
        complex: &'a Complex,
        mask: u32,
        mode: Box<dyn Mode>,
        colorer: Box<dyn Colorer>,
        material: Material,
        resolution: Resolution,
    ) -> Result<Self, RepError> {
        let poly_complexity = mode.poly_complexity(resolution);
        let mut rep = Self {
            mode,
            colorer,
            material,
            poly_complexity,
            groups: Vec::new(),
        };
        let ctx = rep.context();
        let mut groups = Vec::with_capacity(rep.mode.dep_groups().len());
        for &kind in rep.mode.dep_groups() {
            match kind.build(complex, mask, &ctx) {
                Ok(group) => groups.push(group),
                Err(RepError::EmptySelection(name)) => {
                    log::debug!("{}: no {name} to draw", rep.mode.name());
                }
                Err(e) => return Err(e),
            }
        }
        log::debug!(
            "{} representation: {} groups, poly complexity {}",
            rep.mode.name(),
            groups.len(),
            rep.poly_complexity
        );
        rep.groups = groups;
        Ok(rep)
    }

    fn context(&self) -> BuildContext<'_> {
        BuildContext {
            mode: self.mode.as_ref(),
            colorer: self.colorer.as_ref(),
            poly_complexity: self.poly_complexity,
            material: &self.material,
        }
    }

    /// The mode this representation was built with.
    #[must_use]
    pub fn mode(&self) -> &dyn Mode {
        self.mode.as_ref()
    }

    /// Built groups, in the mode's build order.
    #[must_use]
    pub fn groups(&self) -> &[ChemGroup<'a>] {
        &self.groups
    }

    /// The built group of `kind`, if its selection was not empty.
    #[must_use]
    pub fn group(&self, kind: GroupKind) -> Option<&ChemGroup<'a>> {
        self.groups.iter().find(|g| g.kind() == kind)
    }

    /// Every resolved hit of every group, nearest first.
    #[must_use]
    pub fn raycast(&self, raycaster: &Raycaster) -> Vec<Intersection> {
        let mut hits = Vec::new();
        for group in &self.groups {
            group.raycast(raycaster, &mut hits);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Subset geometry of every group that has chunks matching `mask`.
    #[must_use]
    pub fn get_subset(&self, mask: u32) -> Vec<(GroupKind, SubsetMesh)> {
        self.groups
            .iter()
            .filter_map(|g| get_subset(g, mask, false).map(|s| (g.kind(), s)))
            .collect()
    }

    /// Show the chunks matching `mask` in every group.
    pub fn enable_subset(&mut self, mask: u32) {
        for group in &mut self.groups {
            enable_subset(group, mask, true);
        }
    }

    /// Hide the chunks matching `mask` in every group.
    pub fn disable_subset(&mut self, mask: u32) {
        for group in &mut self.groups {
            disable_subset(group, mask, true);
        }
    }

    /// Rewrite every group for a trajectory frame.
    ///
    /// # Errors
    ///
    /// Stops at the first group that fails to update.
    pub fn update_to_frame(&mut self, frame: &dyn FrameData) -> Result<(), RepError> {
        let ctx = BuildContext {
            mode: self.mode.as_ref(),
            colorer: self.colorer.as_ref(),
            poly_complexity: self.poly_complexity,
            material: &self.material,
        };
        for group in &mut self.groups {
            group.update_to_frame(frame, &ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::colorer::{ElementColorer, UniformColorer};
    use crate::frame::Frame;
    use crate::geometry::{Geometry, Ray};
    use crate::groups::PickTarget;
    use crate::mode::ModeKind;
    use crate::options::Options;
    use crate::test_fixtures::{allyl, benzene, peptide};

    fn build(complex: &Complex, kind: ModeKind, mask: u32) -> Representation<'_> {
        let options = Options::default();
        Representation::new(
            complex,
            mask,
            kind.create(&options),
            Box::new(ElementColorer),
            options.material.clone(),
            options.quality.resolution,
        )
        .unwrap()
    }

    #[test]
    fn empty_kinds_are_skipped() {
        let complex = allyl();
        let rep = build(&complex, ModeKind::BallsAndSticks, 1);
        let kinds: Vec<GroupKind> = rep.groups().iter().map(RepresentationGroup::kind).collect();
        assert_eq!(kinds, vec![GroupKind::AtomsSpheres, GroupKind::BondsCylinders]);
        assert!(rep.group(GroupKind::AromaticTorus).is_none());

        let ring = benzene();
        let rep = build(&ring, ModeKind::BallsAndSticks, 1);
        assert_eq!(rep.group(GroupKind::AromaticTorus).map(RepresentationGroup::chunk_count), Some(6));
    }

    #[test]
    fn raycast_merges_groups_nearest_first() {
        let complex = benzene();
        let rep = build(&complex, ModeKind::BallsAndSticks, 1);
        // Along the C1-H1 axis: hydrogen sphere, bond, carbon sphere, loop.
        let ray = Ray::new(Vec3::new(20.0, 0.0, 0.0), -Vec3::X);
        let hits = rep.raycast(&Raycaster::new(ray));
        assert!(hits.len() > 2);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(hits[0].target, PickTarget::Atom(6));
        assert!(hits.iter().any(|h| h.target == PickTarget::Atom(0)));
    }

    #[test]
    fn subset_masks_fan_out_to_every_group() {
        let mut complex = benzene();
        complex.set_masks(|a| if a.index < 6 { 0b11 } else { 0b01 });
        let mut rep = build(&complex, ModeKind::BallsAndSticks, 1);
        let subsets = rep.get_subset(0b10);
        assert_eq!(subsets.len(), 3);
        assert!(rep.get_subset(0b1000).is_empty());

        rep.disable_subset(0b10);
        let spheres = rep.group(GroupKind::AtomsSpheres).unwrap();
        assert_eq!(spheres.geometry().chunk_opacity(0), 0.0);
        assert_eq!(spheres.geometry().chunk_opacity(6), 1.0);
        rep.enable_subset(0b10);
        let spheres = rep.group(GroupKind::AtomsSpheres).unwrap();
        assert_eq!(spheres.geometry().chunk_opacity(0), 1.0);
    }

    fn chunk_counts(rep: &Representation<'_>) -> Vec<usize> {
        rep.groups().iter().map(RepresentationGroup::chunk_count).collect()
    }

    #[test]
    fn frames_reach_every_group() {
        let complex = peptide(4);
        let options = Options::default();
        let mut rep = Representation::new(
            &complex,
            1,
            ModeKind::Tube.create(&options),
            Box::new(UniformColorer { color: 0x00FF00 }),
            options.material.clone(),
            Resolution::Low,
        )
        .unwrap();
        let counts = chunk_counts(&rep);
        for shift in [Vec3::X, Vec3::new(0.0, -2.0, 1.0)] {
            let moved = complex.atoms().iter().map(|a| a.position + shift).collect();
            let frame = Frame::new(&complex, moved).unwrap();
            rep.update_to_frame(&frame).unwrap();
            assert_eq!(chunk_counts(&rep), counts);
        }
        assert_eq!(rep.mode().id(), "TU");
    }

    fn bond_idc(rep: &Representation<'_>) -> Option<Vec<usize>> {
        match rep.group(GroupKind::BondsCylinders)? {
            ChemGroup::BondsCylinder(g) => Some(g.chunks_idc().to_vec()),
            _ => None,
        }
    }

    fn sphere_center(rep: &Representation<'_>, chunk: usize) -> Option<Vec3> {
        match rep.group(GroupKind::AtomsSpheres)? {
            ChemGroup::AtomsSphere(g) => Some(g.spheres().item(chunk).0),
            _ => None,
        }
    }

    #[test]
    fn repeated_frames_keep_balls_and_sticks_chunks() {
        let complex = benzene();
        let mut rep = build(&complex, ModeKind::BallsAndSticks, 1);
        let counts = chunk_counts(&rep);
        let idc = bond_idc(&rep);
        assert!(idc.is_some());
        for shift in [Vec3::Z, Vec3::new(3.0, 0.0, -1.0), Vec3::ZERO] {
            let moved: Vec<Vec3> = complex.atoms().iter().map(|a| a.position + shift).collect();
            let frame = Frame::new(&complex, moved.clone()).unwrap();
            rep.update_to_frame(&frame).unwrap();
            assert_eq!(chunk_counts(&rep), counts);
            assert_eq!(bond_idc(&rep), idc);
            assert_eq!(sphere_center(&rep, 4), Some(moved[4]));
        }
    }
}
