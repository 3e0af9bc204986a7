use glam::Vec3;

use super::{rgba, BoundingSphere, Geometry, Hit, Raycaster};

/// One line vertex, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// xyz = position, w unused
    pub position: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

impl Default for LineVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Independent line segments, one chunk per segment.
///
/// Picking treats each segment as a thin capsule of `collision_radius`
/// (or the raycaster's line precision, if larger).
#[derive(Debug, Clone, Default)]
pub struct Lines {
    vertices: Vec<LineVertex>,
    collision_radius: f32,
    bounds: Option<BoundingSphere>,
}

impl Lines {
    /// Allocate `count` degenerate segments.
    #[must_use]
    pub fn new(count: usize, collision_radius: f32) -> Self {
        Self {
            vertices: vec![LineVertex::default(); count * 2],
            collision_radius,
            bounds: None,
        }
    }

    /// Place segment `index`.
    pub fn set_segment(&mut self, index: usize, start: Vec3, end: Vec3) {
        self.vertices[index * 2].position = start.extend(0.0).to_array();
        self.vertices[index * 2 + 1].position = end.extend(0.0).to_array();
    }

    /// Color segment `index`, keeping its opacity.
    pub fn set_color(&mut self, index: usize, color: u32) {
        for v in &mut self.vertices[index * 2..index * 2 + 2] {
            v.color = rgba(color, v.color[3]);
        }
    }

    /// End points of segment `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> (Vec3, Vec3) {
        let p = |v: &LineVertex| Vec3::from_slice(&v.position[..3]);
        (p(&self.vertices[index * 2]), p(&self.vertices[index * 2 + 1]))
    }

    /// Vertex records, two per segment.
    #[must_use]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Vertex records as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub(super) fn raycast_segments(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>, per_chunk: usize) {
        let ray = &raycaster.ray;
        let threshold = self.collision_radius.max(raycaster.line_precision);
        let culled = self.bounds.is_some_and(|b| {
            let padded = BoundingSphere {
                radius: b.radius + threshold,
                ..b
            };
            !padded.hit_by(ray)
        });
        if culled {
            return;
        }
        for seg in 0..self.segment_count() {
            let (a, b) = self.segment(seg);
            let (t, point, dist) = ray.closest_to_segment(a, b);
            if dist <= threshold {
                hits.push(Hit {
                    distance: t,
                    point,
                    chunk: Some(seg / per_chunk),
                });
            }
        }
    }

    pub(super) fn select_segments(&self, chunks: &[usize], per_chunk: usize) -> Self {
        let span = per_chunk * 2;
        let vertices = chunks
            .iter()
            .flat_map(|&c| self.vertices[c * span..(c + 1) * span].iter().copied())
            .collect();
        let mut out = Self {
            vertices,
            collision_radius: self.collision_radius,
            bounds: None,
        };
        out.finalize();
        out
    }
}

impl Geometry for Lines {
    fn chunk_count(&self) -> usize {
        self.segment_count()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        for &c in chunks {
            self.vertices[c * 2].color[3] = opacity;
            self.vertices[c * 2 + 1].color[3] = opacity;
        }
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.vertices[chunk * 2].color[3]
    }

    fn finalize(&mut self) {
        let pad = self.collision_radius;
        self.bounds = BoundingSphere::from_points(
            self.vertices
                .iter()
                .map(move |v| (Vec3::from_slice(&v.position[..3]), pad)),
        );
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        self.raycast_segments(raycaster, hits, 1);
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        Box::new(self.select_segments(chunks, 1))
    }
}

/// Line segments split at their midpoint into two colored halves.
///
/// Item `i` owns chunks `2i` (start half) and `2i + 1` (end half).
#[derive(Debug, Clone, Default)]
pub struct TwoColorLines {
    halves: Lines,
}

impl TwoColorLines {
    /// Allocate `count` items (`2 * count` chunks).
    #[must_use]
    pub fn new(count: usize, collision_radius: f32) -> Self {
        Self {
            halves: Lines::new(count * 2, collision_radius),
        }
    }

    /// Place item `index`.
    pub fn set_item(&mut self, index: usize, start: Vec3, end: Vec3) {
        let mid = start.lerp(end, 0.5);
        self.halves.set_segment(index * 2, start, mid);
        self.halves.set_segment(index * 2 + 1, mid, end);
    }

    /// Color the two halves of item `index`.
    pub fn set_colors(&mut self, index: usize, start: u32, end: u32) {
        self.halves.set_color(index * 2, start);
        self.halves.set_color(index * 2 + 1, end);
    }

    /// Half-segment records, two per item.
    #[must_use]
    pub fn halves(&self) -> &Lines {
        &self.halves
    }
}

impl Geometry for TwoColorLines {
    fn chunk_count(&self) -> usize {
        self.halves.chunk_count()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        self.halves.set_opacity(chunks, opacity);
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.halves.chunk_opacity(chunk)
    }

    fn finalize(&mut self) {
        self.halves.finalize();
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.halves.bounding_sphere()
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        self.halves.raycast(raycaster, hits);
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        self.halves.subset(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ray;

    #[test]
    fn precision_widens_pick_radius() {
        let mut geo = TwoColorLines::new(1, 0.3);
        geo.set_item(0, Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        geo.finalize();
        let mut rc = Raycaster::new(Ray::new(Vec3::new(-5.0, -0.5, 0.6), Vec3::X));
        let mut hits = Vec::new();
        geo.raycast(&rc, &mut hits);
        assert!(hits.is_empty());
        rc.line_precision = 0.7;
        geo.raycast(&rc, &mut hits);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk, Some(0));
    }

    #[test]
    fn subset_copies_segments() {
        let mut geo = Lines::new(3, 0.1);
        geo.set_segment(2, Vec3::ZERO, Vec3::X);
        geo.set_color(2, 0x00_FF_00);
        let sub = geo.subset(&[2, 0]);
        assert_eq!(sub.chunk_count(), 2);
        assert_eq!(geo.vertices()[5].color, [0.0, 1.0, 0.0, 1.0]);
    }
}
