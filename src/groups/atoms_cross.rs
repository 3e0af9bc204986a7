use glam::Vec3;

use crate::chem::Atom;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{ChunkedLines, Geometry, Raycaster};
use crate::selection::Selection;

use super::{
    collect_hits, masked_chunks, BuildContext, GroupKind, Intersection, PickTarget,
    RepresentationGroup, SubsetMesh, TransformGroup,
};

/// Pick radius of cross lines.
const CROSS_COLLISION_RADIUS: f32 = 0.1;

/// Axis-aligned cross through every selected atom.
///
/// Lines mode draws nothing for an atom without bonds; this group gives
/// such atoms (ions, lone waters) a three-segment cross sized by the mode's
/// atom radius. One chunk per atom.
#[derive(Debug)]
pub struct OrphanedAtomsCrossesGroup<'a> {
    selection: Selection<'a>,
    mesh: TransformGroup<ChunkedLines>,
}

impl<'a> OrphanedAtomsCrossesGroup<'a> {
    /// Allocate one three-segment chunk per atom of `selection` and build.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let geo = ChunkedLines::new(selection.chunks.len(), 3, CROSS_COLLISION_RADIUS);
        let mesh = TransformGroup::new(geo, ctx.material.clone(), selection.complex.transforms());
        let mut group = Self { selection, mesh };
        let complex = group.selection.complex;
        let color = |a: &Atom| ctx.colorer.atom_color(a, complex);
        group.fill(ctx, &|i| complex.atoms()[i].position, Some(&color));
        log::debug!("orphan crosses: {} atoms", group.selection.chunks.len());
        group
    }

    fn fill(
        &mut self,
        ctx: &BuildContext<'_>,
        pos: &dyn Fn(usize) -> Vec3,
        color: Option<&dyn Fn(&Atom) -> u32>,
    ) {
        let atoms = self.selection.atom_array();
        let geo = self.mesh.geometry_mut();
        for (i, &idx) in self.selection.chunks.iter().enumerate() {
            let atom = &atoms[idx];
            let center = pos(idx);
            let rad = ctx.mode.calc_atom_radius(atom);
            for (seg, axis) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().enumerate() {
                geo.set_segment(i, seg, center + axis * rad, center - axis * rad);
            }
            if let Some(color) = color {
                geo.set_color(i, color(atom));
            }
        }
        geo.finalize();
    }

    /// Atom index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The cross segments.
    #[must_use]
    pub fn lines(&self) -> &ChunkedLines {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for OrphanedAtomsCrossesGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::OrphanedAtomsCrosses
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, _inner_only: bool) -> Vec<usize> {
        let atoms = self.selection.atom_array();
        let idc = &self.selection.chunks;
        masked_chunks(idc.len(), mask, |i| atoms[idc[i]].mask)
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.mesh.geometry_mut().set_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.mesh.subset(chunks)
    }

    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>) {
        let idc = &self.selection.chunks;
        collect_hits(&self.mesh, raycaster, intersects, |chunk| {
            idc.get(chunk).map(|&a| PickTarget::Atom(a))
        });
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        let color = |a: &Atom| frame.atom_color(ctx.colorer, a);
        let color: Option<&dyn Fn(&Atom) -> u32> =
            frame.needs_color_update(ctx.colorer).then_some(&color);
        self.fill(ctx, &|i| frame.atom_pos(i), color);
        Ok(())
    }
}
