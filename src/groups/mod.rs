//! Representation groups: selected chemistry turned into chunked geometry.
//!
//! Every group owns one geometry wrapped in a [`TransformGroup`] and a
//! chunk map from geometry chunks back to the atoms, bonds or residues
//! they were built from. The map is fixed at build time; trajectory frames
//! rewrite positions and colors through the same chunk indices.
//!
//! The concrete variants are collected in [`ChemGroup`]; the operations
//! every variant shares ([`get_subset`], [`enable_subset`],
//! [`disable_subset`]) are free functions over [`RepresentationGroup`].

mod aromatic;
mod atoms_cross;
mod atoms_sphere;
mod atoms_surface;
mod atoms_text;
mod bonds;
mod cartoon_helper;
mod factory;
mod nucleic;
mod residues_subseq;
mod residues_trace;
mod transform_group;

use glam::Vec3;

pub use aromatic::{AromaticLinesGroup, AromaticTorusGroup};
pub use atoms_cross::OrphanedAtomsCrossesGroup;
pub use atoms_sphere::AtomsSphereGroup;
pub use atoms_surface::AtomsSurfaceGroup;
pub use atoms_text::AtomsTextGroup;
pub use bonds::{BondsCylinderGroup, BondsLinesGroup};
pub use cartoon_helper::CartoonHelper;
pub use factory::{ChemGroup, GroupKind};
pub use nucleic::{NucleicCylindersGroup, NucleicSpheresGroup};
pub use residues_subseq::ResiduesSubseqGroup;
pub use residues_trace::{ResiduePair, ResiduesTraceGroup};
pub use transform_group::{InstanceHit, SubsetMesh, TransformGroup};

use crate::colorer::Colorer;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Raycaster};
use crate::mode::Mode;
use crate::options::Material;

/// Read-only collaborators for building and updating a group.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Radii and geometric parameters.
    pub mode: &'a dyn Mode,
    /// Per-entity colors.
    pub colorer: &'a dyn Colorer,
    /// Cross-section and sphere tessellation.
    pub poly_complexity: u32,
    /// Shading parameters handed to the transform group.
    pub material: &'a Material,
}

/// Chemical entity behind a picked chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// Atom index in the complex.
    Atom(usize),
    /// Residue index in the complex.
    Residue(usize),
}

/// One resolved pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Transform instance the hit belongs to.
    pub instance: usize,
    /// Picked entity.
    pub target: PickTarget,
}

/// Lifecycle contract shared by every group variant.
pub trait RepresentationGroup: std::fmt::Debug {
    /// Variant of this group.
    fn kind(&self) -> GroupKind;

    /// The owned geometry.
    fn geometry(&self) -> &dyn Geometry;

    /// Number of geometry chunks allocated at construction.
    fn chunk_count(&self) -> usize {
        self.geometry().chunk_count()
    }

    /// Chunks whose entities match `mask`. With `inner_only`, two-ended
    /// chunks (bond halves) only match when both ends do.
    fn calc_chunks_list(&self, mask: u32, inner_only: bool) -> Vec<usize>;

    /// Set the opacity of the listed chunks.
    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32);

    /// Instanced copy of the listed chunks.
    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh;

    /// Append resolved picks, nearest first; hits without a chunk are
    /// dropped.
    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>);

    /// Rewrite positions (and colors, when the frame asks for it) in place.
    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError>;
}

/// Geometry for the chunks matching `mask`, or `None` when nothing matches.
pub fn get_subset<G>(group: &G, mask: u32, inner_only: bool) -> Option<SubsetMesh>
where
    G: RepresentationGroup + ?Sized,
{
    let chunks = group.calc_chunks_list(mask, inner_only);
    if chunks.is_empty() {
        return None;
    }
    Some(group.subset_mesh(&chunks))
}

/// Make the chunks matching `mask` opaque.
pub fn enable_subset<G>(group: &mut G, mask: u32, inner_only: bool)
where
    G: RepresentationGroup + ?Sized,
{
    change_subset_opacity(group, mask, 1.0, inner_only);
}

/// Hide the chunks matching `mask`.
pub fn disable_subset<G>(group: &mut G, mask: u32, inner_only: bool)
where
    G: RepresentationGroup + ?Sized,
{
    change_subset_opacity(group, mask, 0.0, inner_only);
}

fn change_subset_opacity<G>(group: &mut G, mask: u32, value: f32, inner_only: bool)
where
    G: RepresentationGroup + ?Sized,
{
    let chunks = group.calc_chunks_list(mask, inner_only);
    if chunks.is_empty() {
        return;
    }
    group.set_chunk_opacity(&chunks, value);
}

/// Raycast `mesh`, resolve every chunked hit through `resolve` and keep
/// `intersects` ordered nearest first.
pub(crate) fn collect_hits<G, F>(
    mesh: &TransformGroup<G>,
    raycaster: &Raycaster,
    intersects: &mut Vec<Intersection>,
    resolve: F,
) where
    G: Geometry,
    F: Fn(usize) -> Option<PickTarget>,
{
    let mut hits = Vec::new();
    mesh.raycast(raycaster, &mut hits);
    intersects.extend(hits.into_iter().filter_map(|hit| {
        let target = resolve(hit.chunk?)?;
        Some(Intersection {
            distance: hit.distance,
            point: hit.point,
            instance: hit.instance,
            target,
        })
    }));
    intersects.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Chunk `i` matches when `entity_mask(i)` shares a bit with `mask`.
pub(crate) fn masked_chunks<F>(count: usize, mask: u32, entity_mask: F) -> Vec<usize>
where
    F: Fn(usize) -> u32,
{
    (0..count).filter(|&i| entity_mask(i) & mask != 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::Complex;
    use crate::colorer::ElementColorer;
    use crate::geometry::Ray;
    use crate::mode::BallsAndSticksMode;
    use crate::selection::Selection;
    use crate::test_fixtures::benzene;

    fn spheres(complex: &Complex) -> AtomsSphereGroup<'_> {
        let mode = BallsAndSticksMode::default();
        let material = Material::default();
        let ctx = BuildContext {
            mode: &mode,
            colorer: &ElementColorer,
            poly_complexity: 6,
            material: &material,
        };
        AtomsSphereGroup::new(Selection::atoms(complex, 1), &ctx)
    }

    #[test]
    fn subset_is_empty_iff_nothing_matches() {
        let mut complex = benzene();
        complex.set_masks(|a| if a.index < 6 { 0b11 } else { 0b01 });
        let group = spheres(&complex);
        assert!(get_subset(&group, 0b100, false).is_none());
        let sub = get_subset(&group, 0b10, false).unwrap();
        assert_eq!(
            sub.geometry().chunk_count(),
            group.calc_chunks_list(0b10, false).len()
        );
        assert_eq!(sub.geometry().chunk_count(), 6);
    }

    #[test]
    fn disable_then_enable_restores_opacity() {
        let mut complex = benzene();
        complex.set_masks(|a| if a.index < 6 { 0b11 } else { 0b01 });
        let mut group = spheres(&complex);
        let before: Vec<f32> = (0..12).map(|c| group.geometry().chunk_opacity(c)).collect();

        disable_subset(&mut group, 0b10, true);
        assert_eq!(group.geometry().chunk_opacity(0), 0.0);
        assert_eq!(group.geometry().chunk_opacity(7), 1.0);

        enable_subset(&mut group, 0b10, true);
        let after: Vec<f32> = (0..12).map(|c| group.geometry().chunk_opacity(c)).collect();
        assert_eq!(before, after);

        // An empty mask touches nothing.
        disable_subset(&mut group, 0, true);
        let untouched: Vec<f32> = (0..12).map(|c| group.geometry().chunk_opacity(c)).collect();
        assert_eq!(before, untouched);
    }

    #[test]
    fn ray_through_atom_picks_it_first() {
        let complex = benzene();
        let group = spheres(&complex);
        let target = complex.atoms()[3].position;
        let ray = Ray::new(target + Vec3::Z * 20.0, -Vec3::Z);
        let mut hits = Vec::new();
        group.raycast(&Raycaster::new(ray), &mut hits);
        assert_eq!(hits[0].target, PickTarget::Atom(3));

        // Along the X axis through H4, C4, C1 and H1.
        let axis = Ray::new(Vec3::new(-20.0, 0.0, 0.0), Vec3::X);
        let mut along = Vec::new();
        group.raycast(&Raycaster::new(axis), &mut along);
        let targets: Vec<PickTarget> = along.iter().map(|h| h.target).collect();
        let expected = [9, 3, 0, 6].map(PickTarget::Atom);
        assert_eq!(targets, expected);

        let miss = Ray::new(Vec3::new(50.0, 50.0, 20.0), -Vec3::Z);
        let mut none = Vec::new();
        group.raycast(&Raycaster::new(miss), &mut none);
        assert!(none.is_empty());
    }
}
