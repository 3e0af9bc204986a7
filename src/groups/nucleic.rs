use glam::Vec3;

use crate::chem::Residue;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Raycaster, Spheres, TwoColorCylinders};
use crate::selection::Selection;

use super::{
    collect_hits, masked_chunks, BuildContext, GroupKind, Intersection, PickTarget,
    RepresentationGroup, SubsetMesh, TransformGroup,
};

/// Base cylinder `(bottom, top)` of a nucleotide, if it has one.
fn base_ends(residue: &Residue) -> Option<(Vec3, Vec3)> {
    residue.cylinders.map(|[bottom, top]| (bottom, top))
}

/// Nucleotide selection walked in chunk order against static or frame
/// residues.
fn for_each_base<F>(selection: &Selection<'_>, residues: &[Residue], mut f: F)
where
    F: FnMut(usize, &Residue, Vec3, Vec3),
{
    for (item, &idx) in selection.chunks.iter().enumerate() {
        let residue = &residues[idx];
        match base_ends(residue) {
            Some((bottom, top)) => f(item, residue, bottom, top),
            None => log::warn!("nucleotide {} lost its base cylinder", residue.index),
        }
    }
}

/// One cylinder per nucleotide, from the backbone towards the base.
#[derive(Debug)]
pub struct NucleicCylindersGroup<'a> {
    selection: Selection<'a>,
    mesh: TransformGroup<TwoColorCylinders>,
}

impl<'a> NucleicCylindersGroup<'a> {
    /// Build one two-chunk cylinder per selected nucleotide.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let complex = selection.complex;
        let geo = TwoColorCylinders::new(selection.chunks.len());
        let mesh = TransformGroup::new(geo, ctx.material.clone(), complex.transforms());
        let mut group = Self { selection, mesh };
        group.fill(complex.residues(), ctx);
        log::debug!("nucleic cylinders: {}", group.selection.chunks.len());
        group
    }

    // Frames always recolor.
    fn fill(&mut self, residues: &[Residue], ctx: &BuildContext<'_>) {
        let complex = self.selection.complex;
        let stick_rad = ctx.mode.calc_stick_radius();
        let geo = self.mesh.geometry_mut();
        for_each_base(&self.selection, residues, |item, residue, bottom, top| {
            let color = ctx.colorer.residue_color(residue, complex);
            geo.set_item(item, bottom, top, stick_rad);
            geo.set_colors(item, color, color);
        });
        geo.finalize();
    }

    /// Residue index behind each item; item `i` owns chunks `2i` and `2i+1`.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The cylinder buffer.
    #[must_use]
    pub fn cylinders(&self) -> &TwoColorCylinders {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for NucleicCylindersGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::NucleicCylinders
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, _inner_only: bool) -> Vec<usize> {
        let residues = self.selection.residue_array();
        self.selection
            .chunks
            .iter()
            .enumerate()
            .filter(|&(_, &r)| residues[r].mask & mask != 0)
            .flat_map(|(i, _)| [2 * i, 2 * i + 1])
            .collect()
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
            idc.get(chunk / 2).map(|&r| PickTarget::Residue(r))
        });
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        self.fill(frame.residues(), ctx);
        Ok(())
    }
}

/// One sphere per nucleotide, at the base end of its cylinder.
#[derive(Debug)]
pub struct NucleicSpheresGroup<'a> {
    selection: Selection<'a>,
    mesh: TransformGroup<Spheres>,
}

impl<'a> NucleicSpheresGroup<'a> {
    /// Build one sphere per selected nucleotide, twice the stick radius.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let complex = selection.complex;
        let geo = Spheres::new(selection.chunks.len());
        let mesh = TransformGroup::new(geo, ctx.material.clone(), complex.transforms());
        let mut group = Self { selection, mesh };
        group.fill(complex.residues(), ctx);
        log::debug!("nucleic spheres: {}", group.selection.chunks.len());
        group
    }

    fn fill(&mut self, residues: &[Residue], ctx: &BuildContext<'_>) {
        let complex = self.selection.complex;
        let radius = ctx.mode.calc_stick_radius() * 2.0;
        let geo = self.mesh.geometry_mut();
        for_each_base(&self.selection, residues, |item, residue, _bottom, top| {
            geo.set_item(item, top, radius);
            geo.set_color(item, ctx.colorer.residue_color(residue, complex));
        });
        geo.finalize();
    }

    /// Residue index behind each chunk.
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

impl RepresentationGroup for NucleicSpheresGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::NucleicSpheres
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, _inner_only: bool) -> Vec<usize> {
        let residues = self.selection.residue_array();
        let idc = &self.selection.chunks;
        masked_chunks(idc.len(), mask, |i| residues[idc[i]].mask)
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
            idc.get(chunk).map(|&r| PickTarget::Residue(r))
        });
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        self.fill(frame.residues(), ctx);
        Ok(())
    }
}
