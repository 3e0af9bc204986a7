use glam::{Mat4, Vec3};

use super::{rgba, BoundingSphere, Geometry, Hit, Raycaster};
use crate::error::RepError;

/// One swept-surface vertex, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ExtrudedVertex {
    /// xyz = position, w unused
    pub position: [f32; 4],
    /// xyz = outward normal, w unused
    pub normal: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

impl Default for ExtrudedVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            normal: [0.0; 4],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// A closed 2D cross-section swept through per-chunk ring transforms.
///
/// Every chunk has the same number of rings; ring `r` of a chunk is the
/// shape transformed by the `r`-th matrix given to
/// [`set_item`](Self::set_item). Consecutive rings are stitched with
/// quads.
#[derive(Debug, Clone)]
pub struct ExtrudedObjects {
    shape: Vec<Vec3>,
    rings: usize,
    vertices: Vec<ExtrudedVertex>,
    bounds: Option<BoundingSphere>,
}

impl ExtrudedObjects {
    /// Allocate `chunks` chunks of `rings` rings of `shape`.
    pub fn new(shape: Vec<Vec3>, rings: usize, chunks: usize) -> Result<Self, RepError> {
        if shape.len() < 3 {
            return Err(RepError::InvalidParameter(format!(
                "cross section needs at least 3 points, got {}",
                shape.len()
            )));
        }
        if rings < 2 {
            return Err(RepError::InvalidParameter(format!(
                "sweep needs at least 2 rings, got {rings}"
            )));
        }
        let vertices = vec![ExtrudedVertex::default(); shape.len() * rings * chunks];
        Ok(Self {
            shape,
            rings,
            vertices,
            bounds: None,
        })
    }

    fn chunk_size(&self) -> usize {
        self.shape.len() * self.rings
    }

    /// Rings per chunk.
    #[must_use]
    pub fn rings(&self) -> usize {
        self.rings
    }

    /// Write the rings of `chunk`; expects [`rings`](Self::rings) matrices.
    pub fn set_item(&mut self, chunk: usize, matrices: &[Mat4]) {
        let parts = self.shape.len();
        let base = chunk * self.chunk_size();
        for (r, m) in matrices.iter().take(self.rings).enumerate() {
            for (k, p) in self.shape.iter().enumerate() {
                let v = &mut self.vertices[base + r * parts + k];
                v.position = m.transform_point3(*p).extend(0.0).to_array();
                v.normal = m.transform_vector3(*p).normalize_or_zero().extend(0.0).to_array();
            }
        }
    }

    /// Color every vertex of `chunk`, keeping opacity.
    pub fn set_color(&mut self, chunk: usize, color: u32) {
        let size = self.chunk_size();
        for v in &mut self.vertices[chunk * size..(chunk + 1) * size] {
            v.color = rgba(color, v.color[3]);
        }
    }

    /// Vertex position at `(chunk, ring, point)`.
    #[must_use]
    pub fn position(&self, chunk: usize, ring: usize, point: usize) -> Vec3 {
        let v = &self.vertices[chunk * self.chunk_size() + ring * self.shape.len() + point];
        Vec3::from_slice(&v.position[..3])
    }

    /// Center of ring `ring` of `chunk` (mean of its points).
    #[must_use]
    pub fn ring_center(&self, chunk: usize, ring: usize) -> Vec3 {
        let parts = self.shape.len();
        let sum: Vec3 = (0..parts).map(|k| self.position(chunk, ring, k)).sum();
        sum / parts as f32
    }

    /// Vertex records.
    #[must_use]
    pub fn vertices(&self) -> &[ExtrudedVertex] {
        &self.vertices
    }

    /// Vertex records as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Triangle list over all chunks.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        let parts = self.shape.len();
        let mut out = Vec::with_capacity(self.chunk_count() * (self.rings - 1) * parts * 6);
        for chunk in 0..self.chunk_count() {
            for tri in self.chunk_triangles(chunk) {
                out.extend(tri.iter().map(|&i| i as u32));
            }
        }
        out
    }

    fn chunk_triangles(&self, chunk: usize) -> impl Iterator<Item = [usize; 3]> + '_ {
        let parts = self.shape.len();
        let base = chunk * self.chunk_size();
        (0..self.rings - 1).flat_map(move |r| {
            (0..parts).flat_map(move |k| {
                let a = base + r * parts + k;
                let b = base + r * parts + (k + 1) % parts;
                let c = a + parts;
                let d = b + parts;
                [[a, c, b], [b, c, d]]
            })
        })
    }

    fn vertex_pos(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[index].position[..3])
    }
}

impl Geometry for ExtrudedObjects {
    fn chunk_count(&self) -> usize {
        self.vertices.len() / self.chunk_size()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        let size = self.chunk_size();
        for &c in chunks {
            for v in &mut self.vertices[c * size..(c + 1) * size] {
                v.color[3] = opacity;
            }
        }
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.vertices[chunk * self.chunk_size()].color[3]
    }

    fn finalize(&mut self) {
        self.bounds = BoundingSphere::from_points((0..self.vertices.len()).map(|i| (self.vertex_pos(i), 0.0)));
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        let ray = &raycaster.ray;
        if self.bounds.is_some_and(|b| !b.hit_by(ray)) {
            return;
        }
        for chunk in 0..self.chunk_count() {
            let nearest = self
                .chunk_triangles(chunk)
                .filter_map(|[a, b, c]| {
                    ray.intersect_triangle(self.vertex_pos(a), self.vertex_pos(b), self.vertex_pos(c))
                })
                .fold(None, |best: Option<f32>, t| Some(best.map_or(t, |b| b.min(t))));
            if let Some(t) = nearest {
                hits.push(Hit {
                    distance: t,
                    point: ray.at(t),
                    chunk: Some(chunk),
                });
            }
        }
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        let size = self.chunk_size();
        let mut out = Self {
            shape: self.shape.clone(),
            rings: self.rings,
            vertices: chunks
                .iter()
                .flat_map(|&c| self.vertices[c * size..(c + 1) * size].iter().copied())
                .collect(),
            bounds: None,
        };
        out.finalize();
        Box::new(out)
    }
}
