use glam::Vec3;

use crate::chem::Atom;
use crate::error::RepError;
use crate::frame::FrameData;
use crate::geometry::{
    Geometry, Raycaster, SphereUnionSurface, SurfaceAtom, SurfaceBuilder, SurfaceMesh,
};
use crate::selection::Selection;

use super::{
    collect_hits, masked_chunks, BuildContext, GroupKind, Intersection, PickTarget,
    RepresentationGroup, SubsetMesh, TransformGroup,
};

/// Molecular surface with one chunk per selected atom.
///
/// The surface is a derived mesh, so frames rebuild it from scratch
/// instead of moving vertices.
#[derive(Debug)]
pub struct AtomsSurfaceGroup<'a> {
    selection: Selection<'a>,
    builder: Box<dyn SurfaceBuilder>,
    mesh: TransformGroup<SurfaceMesh>,
}

impl<'a> AtomsSurfaceGroup<'a> {
    /// Build with the sphere-union builder configured from the mode.
    ///
    /// # Errors
    ///
    /// Propagates builder failures.
    pub fn new(selection: Selection<'a>, ctx: &BuildContext<'_>) -> Result<Self, RepError> {
        let opts = ctx.mode.surface_options();
        let builder = SphereUnionSurface {
            probe_radius: opts.probe_radius,
            scale: opts.scale,
            subdivisions: opts.subdivisions,
        };
        Self::with_builder(selection, ctx, Box::new(builder))
    }

    /// Build with a caller-supplied surface builder.
    ///
    /// # Errors
    ///
    /// Propagates builder failures.
    pub fn with_builder(
        selection: Selection<'a>,
        ctx: &BuildContext<'_>,
        builder: Box<dyn SurfaceBuilder>,
    ) -> Result<Self, RepError> {
        let complex = selection.complex;
        let atoms = surface_atoms(&selection, ctx, |a| a.position, |a| {
            ctx.colorer.atom_color(a, complex)
        });
        let geo = builder.build(&atoms)?;
        log::debug!(
            "surface: {} atoms, {} triangles",
            atoms.len(),
            geo.triangle_count()
        );
        let mesh = TransformGroup::new(geo, ctx.material.clone(), complex.transforms());
        Ok(Self {
            selection,
            builder,
            mesh,
        })
    }

    /// Atom index behind each chunk.
    #[must_use]
    pub fn chunks_idc(&self) -> &[usize] {
        &self.selection.chunks
    }

    /// The surface mesh.
    #[must_use]
    pub fn surface(&self) -> &SurfaceMesh {
        self.mesh.geometry()
    }
}

fn surface_atoms<P, C>(
    selection: &Selection<'_>,
    ctx: &BuildContext<'_>,
    pos: P,
    color: C,
) -> Vec<SurfaceAtom>
where
    P: Fn(&Atom) -> Vec3,
    C: Fn(&Atom) -> u32,
{
    let atoms = selection.atom_array();
    selection
        .chunks
        .iter()
        .map(|&i| {
            let atom = &atoms[i];
            SurfaceAtom {
                center: pos(atom),
                radius: ctx.mode.calc_atom_radius(atom),
                color: color(atom),
            }
        })
        .collect()
}

impl RepresentationGroup for AtomsSurfaceGroup<'_> {
    fn kind(&self) -> GroupKind {
        GroupKind::Surface
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
        let complex = self.selection.complex;
        let old = self.mesh.geometry();
        let opacity: Vec<f32> = (0..old.chunk_count()).map(|c| old.chunk_opacity(c)).collect();
        let update_color = frame.needs_color_update(ctx.colorer);
        let atoms = surface_atoms(
            &self.selection,
            ctx,
            |a| frame.atom_pos(a.index),
            |a| {
                if update_color {
                    frame.atom_color(ctx.colorer, a)
                } else {
                    ctx.colorer.atom_color(a, complex)
                }
            },
        );
        let mut geo = self.builder.build(&atoms)?;
        for (chunk, &value) in opacity.iter().enumerate() {
            if value != 1.0 {
                geo.set_opacity(&[chunk], value);
            }
        }
        *self.mesh.geometry_mut() = geo;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorer::ElementColorer;
    use crate::frame::Frame;
    use crate::geometry::Ray;
    use crate::mode::SurfaceMode;
    use crate::options::{Material, SurfaceOptions};
    use crate::test_fixtures::benzene;

    #[test]
    fn one_chunk_per_atom_and_pickable() {
        let complex = benzene();
        let mode = SurfaceMode::default();
        let material = Material::default();
        let ctx = BuildContext {
            mode: &mode,
            colorer: &ElementColorer,
            poly_complexity: 0,
            material: &material,
        };
        let group = AtomsSurfaceGroup::new(Selection::atoms(&complex, 1), &ctx).unwrap();
        assert_eq!(group.chunk_count(), complex.atoms().len());
        assert!(group.surface().triangle_count() > 0);

        // H4 sits on the -X axis, outside every carbon sphere.
        let ray = Ray::new(Vec3::new(-10.0, 0.05, 0.02), Vec3::X);
        let mut hits = Vec::new();
        group.raycast(&Raycaster::new(ray), &mut hits);
        assert_eq!(hits[0].target, PickTarget::Atom(9));
    }

    #[test]
    fn invalid_scale_is_reported() {
        let complex = benzene();
        let mode = SurfaceMode::new(SurfaceOptions {
            scale: -1.0,
            ..SurfaceOptions::default()
        });
        let material = Material::default();
        let ctx = BuildContext {
            mode: &mode,
            colorer: &ElementColorer,
            poly_complexity: 0,
            material: &material,
        };
        assert!(AtomsSurfaceGroup::new(Selection::atoms(&complex, 1), &ctx).is_err());
    }

    #[test]
    fn frame_rebuild_keeps_hidden_chunks_hidden() {
        let complex = benzene();
        let mode = SurfaceMode::default();
        let material = Material::default();
        let ctx = BuildContext {
            mode: &mode,
            colorer: &ElementColorer,
            poly_complexity: 0,
            material: &material,
        };
        let mut group = AtomsSurfaceGroup::new(Selection::atoms(&complex, 1), &ctx).unwrap();
        group.set_chunk_opacity(&[3], 0.0);
        let shifted = complex.atoms().iter().map(|a| a.position * 1.1).collect();
        let frame = Frame::new(&complex, shifted).unwrap();
        group.update_to_frame(&frame, &ctx).unwrap();
        assert_eq!(group.chunk_count(), complex.atoms().len());
        assert_eq!(group.geometry().chunk_opacity(3), 0.0);
        assert_eq!(group.geometry().chunk_opacity(2), 1.0);
        let bounds = group.geometry().bounding_sphere().unwrap();
        assert!(bounds.radius > 2.48);
    }
}
