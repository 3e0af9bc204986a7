use glam::Vec3;

use crate::chem::{Atom, Bond, BondType};
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{Geometry, Raycaster, TwoColorCylinders, TwoColorLines};
use crate::mode::Mode;
use crate::selection::Selection;

use super::{
    collect_hits, BuildContext, GroupKind, Intersection, PickTarget,
    RepresentationGroup, SubsetMesh, TransformGroup,
};

/// Spacing of multi-order bond lines.
const STEP_SIZE: f32 = 0.15;

/// Pick radius of bond lines.
const LINE_COLLISION_RADIUS: f32 = 0.3;

/// Number of cylinders (or lines) drawn for one bond.
///
/// Aromatic bonds stay single when the ring gets a loop instead.
pub(crate) fn bond_order(bond: &Bond, mode: &dyn Mode) -> usize {
    let suppressed = mode.show_aromatic_loops() && bond.kind == BondType::Aromatic;
    if mode.draw_multiorder_bonds() && !suppressed {
        usize::from(bond.order.max(1))
    } else {
        1
    }
}

/// Lateral offset of the `j`-th of `order` parallel items, in units of
/// their spacing. Offsets are symmetric around the bond axis.
fn offset_scale(j: usize, order: usize) -> f32 {
    if order % 2 == 0 {
        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
        ((j / 2) as f32 + 0.5) * sign
    } else {
        let sign = if j % 2 == 0 { -1.0 } else { 1.0 };
        ((j + 1) / 2) as f32 * sign
    }
}

/// Bond selection plus the per-item bond map shared by both bond groups.
#[derive(Debug)]
struct BondChunks<'a> {
    selection: Selection<'a>,
    /// Bond index per geometry item; each item owns chunks `2i` and `2i+1`.
    chunks_idc: Vec<usize>,
}

impl<'a> BondChunks<'a> {
    fn new(selection: Selection<'a>, mode: &dyn Mode) -> Self {
        let bonds = selection.bond_array();
        let chunks_idc = selection
            .chunks
            .iter()
            .flat_map(|&b| std::iter::repeat_n(b, bond_order(&bonds[b], mode)))
            .collect();
        Self {
            selection,
            chunks_idc,
        }
    }

    fn item_count(&self) -> usize {
        self.chunks_idc.len()
    }

    fn calc_chunks_list(&self, mask: u32, inner_only: bool) -> Vec<usize> {
        let atoms = self.selection.atom_array();
        let bonds = self.selection.bond_array();
        let mut list = Vec::new();
        for (i, &b) in self.chunks_idc.iter().enumerate() {
            let bond = &bonds[b];
            let left = atoms[bond.left].mask & mask != 0;
            let right = atoms[bond.right].mask & mask != 0;
            if left && (!inner_only || right) {
                list.push(2 * i);
            }
            if right && (!inner_only || left) {
                list.push(2 * i + 1);
            }
        }
        list
    }

    fn resolve(&self, chunk: usize) -> Option<PickTarget> {
        let bond = &self.selection.bond_array()[*self.chunks_idc.get(chunk / 2)?];
        let atom = if chunk % 2 == 0 { bond.left } else { bond.right };
        Some(PickTarget::Atom(atom))
    }

    /// Walk every item as `(item, bond, j, order)` in chunk order.
    fn for_each_item<F>(&self, mode: &dyn Mode, mut f: F)
    where
        F: FnMut(usize, &'a Bond, usize, usize),
    {
        let bonds = self.selection.bond_array();
        let mut item = 0;
        for &b in &self.selection.chunks {
            let bond = &bonds[b];
            let order = bond_order(bond, mode);
            for j in 0..order {
                f(item, bond, j, order);
                item += 1;
            }
        }
    }
}

/// Two-color cylinders, one per bond order.
#[derive(Debug)]
pub struct BondsCylinderGroup<'a> {
    chunks: BondChunks<'a>,
    mesh: TransformGroup<TwoColorCylinders>,
}

impl<'a> BondsCylinderGroup<'a> {
    /// Allocate `Σ bond_order` items and build.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let chunks = BondChunks::new(selection, ctx.mode);
        let geo = TwoColorCylinders::new(chunks.item_count());
        let transforms = chunks.selection.complex.transforms();
        let mesh = TransformGroup::new(geo, ctx.material.clone(), transforms);
        let mut group = Self { chunks, mesh };
        let complex = group.chunks.selection.complex;
        let pos = |i: usize| complex.atoms()[i].position;
        let color = |a: &Atom| ctx.colorer.atom_color(a, complex);
        group.fill(ctx.mode, &pos, Some(&color));
        log::debug!(
            "bond cylinders: {} bonds, {} items",
            group.chunks.selection.chunks.len(),
            group.chunks.item_count()
        );
        group
    }

    fn fill(
        &mut self,
        mode: &dyn Mode,
        pos: &dyn Fn(usize) -> Vec3,
        color: Option<&dyn Fn(&Atom) -> u32>,
    ) {
        let atoms = self.chunks.selection.atom_array();
        let bonds = self.chunks.selection.bond_array();
        let stick_rad = mode.calc_stick_radius();
        let empty_offset = mode.calc_space_fraction();
        let draw_multiple = mode.draw_multiorder_bonds();
        let geo = self.mesh.geometry_mut();
        let mut normal = Vec3::ZERO;
        self.chunks.for_each_item(mode, |item, bond, j, order| {
            let (a1, a2) = (&atoms[bond.left], &atoms[bond.right]);
            if j == 0 {
                if pos(bond.left).distance_squared(pos(bond.right)) < 1e-8 {
                    log::warn!("bond {} has a zero-length axis", bond.index);
                }
                normal = bond.calc_normal_dir(atoms, bonds, pos);
            }
            let min_rad = mode.calc_atom_radius(a1).min(mode.calc_atom_radius(a2));
            let dist = 2.0 * min_rad / order as f32;
            let rad = if draw_multiple {
                stick_rad.min(dist * 0.5 * (1.0 - empty_offset))
            } else {
                stick_rad
            };
            let shift = normal * (dist * offset_scale(j, order));
            geo.set_item(item, pos(a1.index) + shift, pos(a2.index) + shift, rad);
            if let Some(color) = color {
                geo.set_colors(item, color(a1), color(a2));
            }
        });
        geo.finalize();
    }

    /// Bond index behind each item.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.chunks.chunks_idc
    }

    /// The cylinder buffer.
    #[must_use]
    pub fn cylinders(&self) -> &TwoColorCylinders {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for BondsCylinderGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::BondsCylinders
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, inner_only: bool) -> Vec<usize> {
        self.chunks.calc_chunks_list(mask, inner_only)
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.mesh.geometry_mut().set_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.mesh.subset(chunks)
    }

    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>) {
        collect_hits(&self.mesh, raycaster, intersects, |c| self.chunks.resolve(c));
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        let pos = |i: usize| frame.atom_pos(i);
        let color = |a: &Atom| frame.atom_color(ctx.colorer, a);
        let color: Option<&dyn Fn(&Atom) -> u32> =
            frame.needs_color_update(ctx.colorer).then_some(&color);
        self.fill(ctx.mode, &pos, color);
        Ok(())
    }
}

/// Two-color lines, one per bond order.
#[derive(Debug)]
pub struct BondsLinesGroup<'a> {
    chunks: BondChunks<'a>,
    mesh: TransformGroup<TwoColorLines>,
}

impl<'a> BondsLinesGroup<'a> {
    /// Allocate `Σ bond_order` items and build.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Self {
        let chunks = BondChunks::new(selection, ctx.mode);
        let geo = TwoColorLines::new(chunks.item_count(), LINE_COLLISION_RADIUS);
        let transforms = chunks.selection.complex.transforms();
        let mesh = TransformGroup::new(geo, ctx.material.clone(), transforms);
        let mut group = Self { chunks, mesh };
        let complex = group.chunks.selection.complex;
        let pos = |i: usize| complex.atoms()[i].position;
        let color = |a: &Atom| ctx.colorer.atom_color(a, complex);
        group.fill(ctx.mode, &pos, Some(&color));
        log::debug!(
            "bond lines: {} bonds, {} items",
            group.chunks.selection.chunks.len(),
            group.chunks.item_count()
        );
        group
    }

    fn fill(
        &mut self,
        mode: &dyn Mode,
        pos: &dyn Fn(usize) -> Vec3,
        color: Option<&dyn Fn(&Atom) -> u32>,
    ) {
        let atoms = self.chunks.selection.atom_array();
        let bonds = self.chunks.selection.bond_array();
        let geo = self.mesh.geometry_mut();
        let mut normal = Vec3::ZERO;
        self.chunks.for_each_item(mode, |item, bond, j, order| {
            let (a1, a2) = (&atoms[bond.left], &atoms[bond.right]);
            let (p1, p2) = (pos(a1.index), pos(a2.index));
            if j == 0 {
                if pos(bond.left).distance_squared(pos(bond.right)) < 1e-8 {
                    log::warn!("bond {} has a zero-length axis", bond.index);
                }
                normal = bond.calc_normal_dir(atoms, bonds, pos);
            }
            let inner = !a1.is_terminal() && !a2.is_terminal();
            let mut scale = offset_scale(j, order);
            if order == 2 && inner {
                scale = 0.5 - scale;
            }
            let (mut left, mut right) = (p1, p2);
            if inner && order > 1 && scale != 0.0 {
                let len = p1.distance(p2);
                if len > 0.0 {
                    left = p1.lerp(p2, STEP_SIZE / len);
                    right = p1.lerp(p2, 1.0 - STEP_SIZE / len);
                }
            }
            let shift = normal * (scale * STEP_SIZE);
            geo.set_item(item, left + shift, right + shift);
            if let Some(color) = color {
                geo.set_colors(item, color(a1), color(a2));
            }
        });
        geo.finalize();
    }

    /// Bond index behind each item.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.chunks.chunks_idc
    }

    /// The line buffer.
    #[must_use]
    pub fn lines(&self) -> &TwoColorLines {
        self.mesh.geometry()
    }
}

impl RepresentationGroup for BondsLinesGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::BondsLines
    }

    fn geometry(&self) -> &dyn Geometry {
        self.mesh.geometry()
    }

    fn calc_chunks_list(&self, mask: u32, inner_only: bool) -> Vec<usize> {
        self.chunks.calc_chunks_list(mask, inner_only)
    }

    fn set_chunk_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.mesh.geometry_mut().set_opacity(chunks, opacity);
    }

    fn subset_mesh(&self, chunks: &[usize]) -> SubsetMesh {
        self.mesh.subset(chunks)
    }

    fn raycast(&self, raycaster: &Raycaster, intersects: &mut Vec<Intersection>) {
        collect_hits(&self.mesh, raycaster, intersects, |c| self.chunks.resolve(c));
    }

    fn update_to_frame(
        &mut self,
        frame: &dyn FrameData,
        ctx: &BuildContext<'_>,
    ) -> Result<(), RepError> {
        let pos = |i: usize| frame.atom_pos(i);
        let color = |a: &Atom| frame.atom_color(ctx.colorer, a);
        let color: Option<&dyn Fn(&Atom) -> u32> =
            frame.needs_color_update(ctx.colorer).then_some(&color);
        self.fill(ctx.mode, &pos, color);
        Ok(())
    }
}
