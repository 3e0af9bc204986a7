use glam::{Mat4, Vec3};

use crate::chem::{Atom, Residue};
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{ExtrudedObjects, Geometry, Raycaster};
use crate::math::regular_polygon;
use crate::mode::Mode;
use crate::selection::{Selection, SubDiv};

use super::{
    collect_hits, masked_chunks, BuildContext, CartoonHelper, GroupKind, Intersection,
    PickTarget, RepresentationGroup, SubsetMesh, TransformGroup,
};

/// Extruded ribbon or tube along each backbone run, two chunks per
/// residue.
#[derive(Debug)]
pub struct ResiduesSubseqGroup<'a> {
    selection: Selection<'a>,
    segments_height: usize,
    /// Residue index per chunk.
    chunks_idc: Vec<usize>,
    mesh: TransformGroup<ExtrudedObjects>,
}

/// Walk every half residue of every run in chunk order, handing out its
/// `segments + 1` ring transforms. The first ring repeats the previous
/// half's last ring so consecutive chunks join without a seam.
fn loop_through<F>(
    subdivs: &[SubDiv],
    residues: &[Residue],
    atoms: &[Atom],
    pos: &dyn Fn(usize) -> Vec3,
    mode: &dyn Mode,
    segments: usize,
    mut f: F,
) -> Result<(), RepError>
where
    F: FnMut(usize, &Residue, &[Mat4]),
{
    let tension = mode.tension();
    let mut chunk = 0;
    for subdiv in subdivs {
        for &run in &subdiv.arr {
            let helper =
                CartoonHelper::new(residues, atoms, pos, run, subdiv.boundaries, segments, tension)?;
            let mut prev_last: Option<Mat4> = None;
            for idx in run.start * 2..=run.end * 2 + 1 {
                let residue = &residues[idx / 2];
                let first_rad = mode.residue_radius(residue, idx % 2);
                let second_rad = mode.residue_radius(residue, 1 + idx % 2);
                let mut mtc = helper.prepare_matrices(idx - run.start * 2, first_rad, second_rad);
                let head = prev_last.unwrap_or(mtc[0]);
                mtc.insert(0, head);
                f(chunk, residue, &mtc);
                prev_last = Some(mtc[segments]);
                chunk += 1;
            }
        }
    }
    Ok(())
}

impl<'a> ResiduesSubseqGroup<'a> {
    /// Sweep a regular `poly_complexity`-gon along every run of the
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`RepError::InvalidParameter`] when the poly complexity or
    /// the derived segment count is too small for a sweep.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Result<Self, RepError> {
        let segments_height =
            (ctx.poly_complexity as f32 * ctx.mode.height_segments_ratio()) as usize;
        let shape = regular_polygon(1.0, ctx.poly_complexity)?;
        let geo = ExtrudedObjects::new(shape, segments_height + 1, selection.chunks.len() * 2)?;
        let complex = selection.complex;
        let mut group = Self {
            selection,
            segments_height,
            chunks_idc: Vec::new(),
            mesh: TransformGroup::new(geo, ctx.material.clone(), complex.transforms()),
        };

        let pos = |i: usize| complex.atoms()[i].position;
        let geo = group.mesh.geometry_mut();
        let idc = &mut group.chunks_idc;
        loop_through(
            &group.selection.subdivs,
            complex.residues(),
            complex.atoms(),
            &pos,
            ctx.mode,
            segments_height,
            |chunk, residue, mtc| {
                idc.push(residue.index);
                geo.set_item(chunk, mtc);
                geo.set_color(chunk, ctx.colorer.residue_color(residue, complex));
            },
        )?;
        geo.finalize();
        log::debug!(
            "backbone sweep: {} residues, {} rings per chunk",
            group.selection.chunks.len(),
            segments_height + 1
        );
        Ok(group)
    }

    /// Residue index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.chunks_idc
    }

    /// The swept geometry.
    #[must_use]
    pub fn extruded(&self) -> &ExtrudedObjects {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for ResiduesSubseqGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::CartoonChains
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, _inner_only: bool) -> Vec<usize> {
        let residues = self.selection.residue_array();
        let idc = &self.chunks_idc;
        masked_chunks(idc.len(), mask, |i| residues[idc[i]].mask)
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.mesh.geometry_mut().set_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.mesh.subset(chunks)
    }

    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>) {
        let idc = &self.chunks_idc;
        collect_hits(&self.mesh, raycaster, intersects, |chunk| {
            idc.get(chunk).map(|&r| PickTarget::Residue(r))
        });
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        let complex = self.selection.complex;
        let update_color = frame.needs_color_update(ctx.colorer);
        let pos = |i: usize| frame.atom_pos(i);
        let geo = self.mesh.geometry_mut();
        loop_through(
            &self.selection.subdivs,
            frame.residues(),
            complex.atoms(),
            &pos,
            ctx.mode,
            self.segments_height,
            |chunk, residue, mtc| {
                geo.set_item(chunk, mtc);
                if update_color {
                    geo.set_color(chunk, ctx.colorer.residue_color(residue, complex));
                }
            },
        )?;
        geo.finalize();
        Ok(())
    }
}
