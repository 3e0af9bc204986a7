//! CPU-side geometry buffers addressed by chunk index.
//!
//! Every geometry is a fixed-capacity set of chunks sized at construction.
//! Groups write chunk data through the concrete types' `set_*` methods and
//! then interact with the buffer only through the object-safe [`Geometry`]
//! trait: opacity masking, finalization, picking and subset extraction.
//! Instance data is `bytemuck::Pod`, so a renderer can upload it directly.

mod chunked_lines;
mod cylinders;
mod extruded;
mod labels;
mod lines;
mod ray;
mod spheres;
mod surface;

use glam::Vec3;

pub use chunked_lines::ChunkedLines;
pub use cylinders::{CylinderInstance, Cylinders, TwoColorCylinders};
pub use extruded::{ExtrudedObjects, ExtrudedVertex};
pub use labels::{Label, Labels};
pub use lines::{LineVertex, Lines, TwoColorLines};
pub use ray::{Ray, Raycaster};
pub use spheres::{SphereInstance, Spheres};
pub use surface::{
    SphereUnionSurface, SurfaceAtom, SurfaceBuilder, SurfaceMesh, SurfaceVertex,
};

/// One intersection reported by a geometry, in the geometry's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance from the ray origin.
    pub distance: f32,
    /// Intersection point.
    pub point: Vec3,
    /// Chunk that was hit, when the geometry can tell.
    pub chunk: Option<usize>,
}

/// Sphere enclosing a whole geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center.
    pub center: Vec3,
    /// Radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Smallest box-centered sphere around padded points.
    ///
    /// Each item is a point with its own padding radius. Returns `None`
    /// for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Vec3, f32)> + Clone,
    {
        let mut iter = points.clone().into_iter();
        let (first, _) = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), (p, _)| (lo.min(p), hi.max(p)));
        let center = (min + max) * 0.5;
        let radius = points
            .into_iter()
            .map(|(p, r)| center.distance(p) + r)
            .fold(0.0_f32, f32::max);
        Some(Self { center, radius })
    }

    /// Whether a ray passes within the sphere.
    #[must_use]
    pub fn hit_by(&self, ray: &Ray) -> bool {
        ray.origin.distance_squared(self.center) <= self.radius * self.radius
            || ray.intersect_sphere(self.center, self.radius).is_some()
    }
}

/// Chunked geometry resource owned by one representation group.
pub trait Geometry: std::fmt::Debug {
    /// Number of addressable chunks.
    fn chunk_count(&self) -> usize;

    /// Set the opacity of the listed chunks.
    fn set_opacity(&mut self, chunks: &[usize], opacity: f32);

    /// Current opacity of one chunk.
    fn chunk_opacity(&self, chunk: usize) -> f32;

    /// Recompute derived data (bounds) after items were written.
    fn finalize(&mut self);

    /// Bounds computed by the last [`finalize`](Self::finalize).
    fn bounding_sphere(&self) -> Option<BoundingSphere>;

    /// Append intersections with `raycaster.ray` to `hits`.
    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>);

    /// A finalized copy holding only the listed chunks, in list order.
    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry>;
}

impl<G: Geometry + ?Sized> Geometry for Box<G> {
    fn chunk_count(&self) -> usize {
        (**self).chunk_count()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        (**self).set_opacity(chunks, opacity);
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        (**self).chunk_opacity(chunk)
    }

    fn finalize(&mut self) {
        (**self).finalize();
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        (**self).bounding_sphere()
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        (**self).raycast(raycaster, hits);
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        (**self).subset(chunks)
    }
}

/// Packed `0xRRGGBB` plus opacity as a vertex/instance color.
pub(crate) fn rgba(color: u32, opacity: f32) -> [f32; 4] {
    let [r, g, b] = crate::color::hex_to_rgb(color);
    [r, g, b, opacity]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_sphere_covers_padded_points() {
        let pts = [(Vec3::ZERO, 1.0), (Vec3::new(4.0, 0.0, 0.0), 0.5)];
        let bs = BoundingSphere::from_points(pts).unwrap();
        assert_eq!(bs.center, Vec3::new(2.0, 0.0, 0.0));
        assert!((bs.radius - 3.0).abs() < 1e-6);
        assert!(BoundingSphere::from_points(std::iter::empty::<(Vec3, f32)>()).is_none());
    }
}
