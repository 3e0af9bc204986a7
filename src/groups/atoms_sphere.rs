use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Raycaster, Spheres};
use crate::selection::Selection;

use super::{
    collect_hits, masked_chunks, BuildContext, GroupKind, Intersection,
    PickTarget, RepresentationGroup, SubsetMesh, TransformGroup,
};

/// One sphere per selected atom.
#[derive(Debug)]
pub struct AtomsSphereGroup<'a> {
    selection: Selection<'a>,
    mesh: TransformGroup<Spheres>,
}

impl<'a> AtomsSphereGroup<'a> {
    /// Allocate one chunk per atom chunk of `selection` and build.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let geo = Spheres::new(selection.chunks.len());
        let mesh = TransformGroup::new(geo, ctx.material.clone(), selection.complex.transforms());
        let mut group = Self { selection, mesh };
        group.build(ctx);
        group
    }

    fn build(&mut self, ctx: &BuildContext<'_>) {
        let complex = self.selection.complex;
        let atoms = self.selection.atom_array();
        let geo = self.mesh.geometry_mut();
        for (i, &idx) in self.selection.chunks.iter().enumerate() {
            let atom = &atoms[idx];
            geo.set_item(i, atom.position, ctx.mode.calc_atom_radius(atom));
            geo.set_color(i, ctx.colorer.atom_color(atom, complex));
        }
        geo.finalize();
        log::debug!("atom spheres: {} chunks", self.selection.chunks.len());
    }

    /// Atom index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The sphere buffer.
    #[must_use]
    pub fn spheres(&self) -> &Spheres {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for AtomsSphereGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::AtomsSpheres
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
        let atoms = self.selection.atom_array();
        let update_color = frame.needs_color_update(ctx.colorer);
        let geo = self.mesh.geometry_mut();
        for (i, &idx) in self.selection.chunks.iter().enumerate() {
            let atom = &atoms[idx];
            geo.set_item(i, frame.atom_pos(idx), ctx.mode.calc_atom_radius(atom));
            if update_color {
                geo.set_color(i, frame.atom_color(ctx.colorer, atom));
            }
        }
        geo.finalize();
        Ok(())
    }
}
