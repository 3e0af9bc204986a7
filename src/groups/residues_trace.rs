use crate::chem::Residue;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Raycaster, TwoColorCylinders};
use crate::selection::Selection;

use super::{
    collect_hits, BuildContext, GroupKind, Intersection, PickTarget, RepresentationGroup,
    SubsetMesh, TransformGroup,
};

/// The two residues joined by one trace cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResiduePair {
    /// Residue at the cylinder's first half.
    pub first: usize,
    /// Residue at the cylinder's second half.
    pub second: usize,
}

/// Cylinders between consecutive control points of every backbone run.
#[derive(Debug)]
pub struct ResiduesTraceGroup<'a> {
    selection: Selection<'a>,
    chunks_idc: Vec<ResiduePair>,
    mesh: TransformGroup<TwoColorCylinders>,
}

impl<'a> ResiduesTraceGroup<'a> {
    /// One item per consecutive residue pair of each run.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let chunks_idc: Vec<ResiduePair> = selection
            .subdivs
            .iter()
            .flat_map(|subdiv| &subdiv.arr)
            .flat_map(|run| {
                (run.start + 1..=run.end).map(|idx| ResiduePair {
                    first: idx - 1,
                    second: idx,
                })
            })
            .collect();
        let complex = selection.complex;
        let geo = TwoColorCylinders::new(chunks_idc.len());
        let mesh = TransformGroup::new(geo, ctx.material.clone(), complex.transforms());
        let mut group = Self {
            selection,
            chunks_idc,
            mesh,
        };
        group.fill(complex.residues(), ctx, true);
        log::debug!("trace: {} segments", group.chunks_idc.len());
        group
    }

    fn fill(&mut self, residues: &[Residue], ctx: &BuildContext<'_>, update_color: bool) {
        let complex = self.selection.complex;
        let stick_rad = ctx.mode.calc_stick_radius();
        let geo = self.mesh.geometry_mut();
        for (item, pair) in self.chunks_idc.iter().enumerate() {
            let (prev, curr) = (&residues[pair.first], &residues[pair.second]);
            geo.set_item(item, prev.control_point, curr.control_point, stick_rad);
            if update_color {
                geo.set_colors(
                    item,
                    ctx.colorer.residue_color(prev, complex),
                    ctx.colorer.residue_color(curr, complex),
                );
            }
        }
        geo.finalize();
    }

    /// Residue pair behind each item; item `i` owns chunks `2i` and `2i+1`.
    #[must_use]
    pub fn chunks_idc(&self) -> &[ResiduePair] {
        &self.chunks_idc
    }

    /// The cylinder buffer.
    #[must_use]
    pub fn cylinders(&self) -> &TwoColorCylinders {
        self.mesh.geometry()
    }

    fn resolve(&self, chunk: usize) -> Option<PickTarget> {
        let pair = self.chunks_idc.get(chunk / 2)?;
        let residue = if chunk % 2 == 0 { pair.first } else { pair.second };
        (residue < self.selection.residue_array().len()).then_some(PickTarget::Residue(residue))
    }
}

impl RepresentationGroup for ResiduesTraceGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::TraceChains
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, _inner_only: bool) -> Vec<usize> {
        let residues = self.selection.residue_array();
        let mut list = Vec::new();
        for (i, pair) in self.chunks_idc.iter().enumerate() {
            if residues[pair.first].mask & mask != 0 {
                list.push(2 * i);
            }
            if residues[pair.second].mask & mask != 0 {
                list.push(2 * i + 1);
            }
        }
        list
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.mesh.geometry_mut().set_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.mesh.subset(chunks)
    }

    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>) {
        collect_hits(&self.mesh, raycaster, intersects, |c| self.resolve(c));
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        let update_color = frame.needs_color_update(ctx.colorer);
        self.fill(frame.residues(), ctx, update_color);
        Ok(())
    }
}
