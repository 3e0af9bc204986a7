use glam::{Vec2, Vec3};

use crate::chem::Atom;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{ChunkedLines, ExtrudedObjects, Geometry, Raycaster};
use crate::math::{angle_between, calc_chunk_matrix, regular_polygon, slerp};
use crate::selection::Selection;

use super::{
    collect_hits, masked_chunks, BuildContext, GroupKind, Intersection, PickTarget,
    RepresentationGroup, SubsetMesh, TransformGroup,
};

/// Pick radius of loop lines.
const LOOP_COLLISION_RADIUS: f32 = 0.1;

/// Walk the selected arcs of every ring in chunk order.
///
/// Each ring atom owns the arc between the bisectors of its two ring
/// edges; the arc is sampled at `segments + 1` points at distance
/// `radius - rad_offset` from the ring center. `add_chunk` receives the
/// chunk index, the atom, the points, the ring center and the ring normal.
/// With a frame, rings are re-measured at the frame positions.
fn build_inner<F>(
    selection: &Selection<'_>,
    frame: Option<&dyn FrameData>,
    segments: usize,
    rad_offset: f32,
    mut add_chunk: F,
) where
    F: FnMut(usize, &Atom, &[Vec3], Vec3, Vec3),
{
    let atoms = selection.atom_array();
    let pos = |i: usize| frame.map_or(atoms[i].position, |f| f.atom_pos(i));
    let step = 1.0 / segments as f32;
    let mut points = vec![Vec3::ZERO; segments + 1];
    let mut chunk = 0;
    for stored in selection.cycle_iter() {
        let moved = frame.map(|f| f.cycle(stored));
        let cycle = moved.as_ref().unwrap_or(stored);
        let ring = &cycle.atoms;
        let n = ring.len();
        if n < 3 {
            log::warn!("skipping ring with {n} atoms");
            for a in ring {
                if selection.chunks.get(chunk) == Some(a) {
                    chunk += 1;
                }
            }
            continue;
        }
        let center = cycle.center;
        let radius = cycle.radius - rad_offset;

        let mut prev = pos(ring[n - 1]) - center;
        let mut curr = pos(ring[0]) - center;
        let up = curr.cross(prev).normalize_or_zero();
        let mut bisectors = Vec::with_capacity(n);
        for i in 0..n {
            bisectors.push(slerp(angle_between(prev, curr), prev, curr, 0.5).normalize_or_zero());
            prev = curr;
            curr = pos(ring[(i + 1) % n]) - center;
        }

        for i in 0..n {
            if selection.chunks.get(chunk) != Some(&ring[i]) {
                continue;
            }
            let (start, end) = (bisectors[i], bisectors[(i + 1) % n]);
            let angle = angle_between(start, end);
            for (j, p) in points.iter_mut().enumerate() {
                *p = slerp(angle, start, end, j as f32 * step) * radius + center;
            }
            add_chunk(chunk, &atoms[ring[i]], &points, center, up);
            chunk += 1;
        }
    }
}

/// Atom color for a build (`frame == None`) or a frame update; `None`
/// keeps the current color.
fn loop_color(frame: Option<&dyn FrameData>, ctx: &BuildContext<'_>, selection: &Selection<'_>, atom: &Atom) -> Option<u32> {
    match frame {
        None => Some(ctx.colorer.atom_color(atom, selection.complex)),
        Some(f) if f.needs_color_update(ctx.colorer) => Some(f.atom_color(ctx.colorer, atom)),
        Some(_) => None,
    }
}

/// Tube loops inside aromatic rings, one arc chunk per ring atom.
#[derive(Debug)]
pub struct AromaticTorusGroup<'a> {
    selection: Selection<'a>,
    segments: usize,
    mesh: TransformGroup<ExtrudedObjects>,
}

impl<'a> AromaticTorusGroup<'a> {
    /// Sweep a `poly_complexity`-gon around every selected ring.
    ///
    /// # Errors
    ///
    /// Returns [`RepError::InvalidParameter`] when the poly complexity is
    /// too small for a cross section.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Result<Self, RepError> {
        let segments = ctx.poly_complexity as usize;
        let shape = regular_polygon(1.0, ctx.poly_complexity)?;
        let geo = ExtrudedObjects::new(shape, segments + 1, selection.chunks.len())?;
        let mesh = TransformGroup::new(geo, ctx.material.clone(), selection.complex.transforms());
        let mut group = Self {
            selection,
            segments,
            mesh,
        };
        group.fill(None, ctx);
        log::debug!(
            "aromatic tori: {} rings, {} arcs",
            group.selection.cycles.len(),
            group.selection.chunks.len()
        );
        Ok(group)
    }

    fn fill(&mut self, frame: Option<&dyn FrameData>, ctx: &BuildContext<'_>) {
        let torus_rad = ctx.mode.aromatic_radius();
        let rad = Vec2::splat(torus_rad);
        let rad_offset = ctx.mode.calc_stick_radius() + 2.0 * torus_rad;
        let selection = &self.selection;
        let geo = self.mesh.geometry_mut();
        let mut mtc = Vec::with_capacity(self.segments + 1);
        build_inner(selection, frame, self.segments, rad_offset, |chunk, atom, points, center, up| {
            mtc.clear();
            mtc.extend(points.iter().map(|&p| {
                let dir = (p - center).cross(up);
                calc_chunk_matrix(p, p + dir, up, rad)
            }));
            geo.set_item(chunk, &mtc);
            if let Some(color) = loop_color(frame, ctx, selection, atom) {
                geo.set_color(chunk, color);
            }
        });
        geo.finalize();
    }

    /// Atom index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The swept geometry.
    #[must_use]
    pub fn extruded(&self) -> &ExtrudedObjects {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for AromaticTorusGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::AromaticTorus
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
        self.fill(Some(frame), ctx);
        Ok(())
    }
}

/// Line loops inside aromatic rings, one arc chunk per ring atom.
#[derive(Debug)]
pub struct AromaticLinesGroup<'a> {
    selection: Selection<'a>,
    segments: usize,
    mesh: TransformGroup<ChunkedLines>,
}

impl<'a> AromaticLinesGroup<'a> {
    /// Draw every selected ring arc as `aromatic_arc_chunks` line pieces.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let segments = ctx.mode.aromatic_arc_chunks().max(1) as usize;
        let geo = ChunkedLines::new(selection.chunks.len(), segments, LOOP_COLLISION_RADIUS);
        let mesh = TransformGroup::new(geo, ctx.material.clone(), selection.complex.transforms());
        let mut group = Self {
            selection,
            segments,
            mesh,
        };
        group.fill(None, ctx);
        log::debug!(
            "aromatic lines: {} rings, {} arcs",
            group.selection.cycles.len(),
            group.selection.chunks.len()
        );
        group
    }

    fn fill(&mut self, frame: Option<&dyn FrameData>, ctx: &BuildContext<'_>) {
        let rad_offset = ctx.mode.aromatic_offset();
        let selection = &self.selection;
        let geo = self.mesh.geometry_mut();
        build_inner(selection, frame, self.segments, rad_offset, |chunk, atom, points, _, _| {
            for (seg, pair) in points.windows(2).enumerate() {
                geo.set_segment(chunk, seg, pair[0], pair[1]);
            }
            if let Some(color) = loop_color(frame, ctx, selection, atom) {
                geo.set_color(chunk, color);
            }
        });
        geo.finalize();
    }

    /// Atom index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The line buffer.
    #[must_use]
    pub fn lines(&self) -> &ChunkedLines {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for AromaticLinesGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::AromaticLines
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
        self.fill(Some(frame), ctx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorer::ElementColorer;
    use crate::frame::Frame;
    use crate::geometry::Ray;
    use crate::mode::{BallsAndSticksMode, LinesMode, Mode};
    use crate::options::Material;
    use crate::test_fixtures::benzene;

    fn ctx<'a>(mode: &'a dyn Mode, material: &'a Material) -> BuildContext<'a> {
        BuildContext {
            mode,
            colorer: &ElementColorer,
            poly_complexity: 6,
            material,
        }
    }

    #[test]
    fn torus_closes_around_the_ring() {
        let complex = benzene();
        let mode = BallsAndSticksMode::default();
        let material = Material::default();
        let sel = Selection::aromatic(&complex, 1, mode.show_aromatic_loops());
        let group = AromaticTorusGroup::new(sel, &ctx(&mode, &material)).unwrap();
        let geo = group.extruded();
        assert_eq!(geo.chunk_count(), 6);
        assert_eq!(geo.rings(), 7);

        let cycle = &complex.cycles()[0];
        let expected = cycle.radius - mode.calc_stick_radius() - 2.0 * mode.aromatic_radius();
        for chunk in 0..6 {
            let start = geo.ring_center(chunk, 0);
            assert!((start.distance(cycle.center) - expected).abs() < 1e-4);
            let end = geo.ring_center(chunk, 6);
            let next = geo.ring_center((chunk + 1) % 6, 0);
            assert!(end.distance(next) < 1e-4, "gap after arc {chunk}");
        }
    }

    #[test]
    fn masked_ring_atoms_drop_their_arcs() {
        let mut complex = benzene();
        complex.set_masks(|a| u32::from(a.index == 2 || a.index == 3));
        let mode = BallsAndSticksMode::default();
        let material = Material::default();
        let sel = Selection::aromatic(&complex, 1, true);
        let group = AromaticTorusGroup::new(sel, &ctx(&mode, &material)).unwrap();
        assert_eq!(group.chunks_idc(), &[2, 3]);
        // The arc of atom 2 is centered on its direction.
        let c3 = complex.atoms()[2].position.normalize();
        let mid = group.extruded().ring_center(0, 3).normalize();
        assert!(mid.distance(c3) < 1e-3);
    }

    #[test]
    fn line_loops_pick_their_atom() {
        let complex = benzene();
        let mode = LinesMode::default();
        let material = Material::default();
        let sel = Selection::aromatic(&complex, 1, true);
        let group = AromaticLinesGroup::new(sel, &ctx(&mode, &material));
        assert_eq!(group.chunk_count(), 6);
        assert_eq!(group.lines().segments_per_chunk(), 10);

        let cycle = &complex.cycles()[0];
        let r = cycle.radius - mode.aromatic_offset();
        let target = complex.atoms()[0].position.normalize() * r;
        let ray = Ray::new(target + Vec3::Z * 5.0, -Vec3::Z);
        let mut hits = Vec::new();
        group.raycast(&Raycaster::new(ray), &mut hits);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.target == PickTarget::Atom(0)));
    }

    #[test]
    fn frame_remeasures_rings() {
        let complex = benzene();
        let mode = BallsAndSticksMode::default();
        let material = Material::default();
        let ctx = ctx(&mode, &material);
        let sel = Selection::aromatic(&complex, 1, true);
        let mut group = AromaticTorusGroup::new(sel, &ctx).unwrap();
        let before = group.extruded().ring_center(1, 2);
        let shifted = complex.atoms().iter().map(|a| a.position + Vec3::new(1.0, 2.0, 3.0)).collect();
        let frame = Frame::new(&complex, shifted).unwrap();
        group.update_to_frame(&frame, &ctx).unwrap();
        let after = group.extruded().ring_center(1, 2);
        assert!((after - before - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-4);
        assert_eq!(group.chunks_idc(), &[0, 1, 2, 3, 4, 5]);
    }
}
