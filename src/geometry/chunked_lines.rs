use glam::Vec3;

use super::{BoundingSphere, Geometry, Hit, Lines, Raycaster};

/// Polylines with a fixed number of segments per chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkedLines {
    lines: Lines,
    per_chunk: usize,
}

impl ChunkedLines {
    /// Allocate `chunks` chunks of `segments` segments each.
    #[must_use]
    pub fn new(chunks: usize, segments: usize, collision_radius: f32) -> Self {
        Self {
            lines: Lines::new(chunks * segments, collision_radius),
            per_chunk: segments.max(1),
        }
    }

    /// Place segment `segment` of chunk `chunk`.
    pub fn set_segment(&mut self, chunk: usize, segment: usize, start: Vec3, end: Vec3) {
        self.lines.set_segment(chunk * self.per_chunk + segment, start, end);
    }

    /// Color every segment of `chunk`.
    pub fn set_color(&mut self, chunk: usize, color: u32) {
        let first = chunk * self.per_chunk;
        for seg in first..first + self.per_chunk {
            self.lines.set_color(seg, color);
        }
    }

    /// Segments per chunk.
    #[must_use]
    pub fn segments_per_chunk(&self) -> usize {
        self.per_chunk
    }

    /// Underlying segment buffer.
    #[must_use]
    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    fn segment_range(&self, chunks: &[usize]) -> Vec<usize> {
        chunks
            .iter()
            .flat_map(|&c| c * self.per_chunk..(c + 1) * self.per_chunk)
            .collect()
    }
}

impl Geometry for ChunkedLines {
    fn chunk_count(&self) -> usize {
        self.lines.chunk_count() / self.per_chunk
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        let segments = self.segment_range(chunks);
        self.lines.set_opacity(&segments, opacity);
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.lines.chunk_opacity(chunk * self.per_chunk)
    }

    fn finalize(&mut self) {
        self.lines.finalize();
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.lines.bounding_sphere()
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        self.lines.raycast_segments(raycaster, hits, self.per_chunk);
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        Box::new(Self {
            lines: self.lines.select_segments(chunks, self.per_chunk),
            per_chunk: self.per_chunk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ray;

    #[test]
    fn hits_map_to_owning_chunk() {
        let mut geo = ChunkedLines::new(2, 3, 0.1);
        for seg in 0..3 {
            let y = seg as f32;
            geo.set_segment(1, seg, Vec3::new(0.0, y, 0.0), Vec3::new(0.0, y + 1.0, 0.0));
        }
        geo.set_color(1, 0xFF_00_00);
        geo.finalize();
        assert_eq!(geo.chunk_count(), 2);
        let rc = Raycaster::new(Ray::new(Vec3::new(-5.0, 2.5, 0.0), Vec3::X));
        let mut hits = Vec::new();
        geo.raycast(&rc, &mut hits);
        assert_eq!(hits.iter().map(|h| h.chunk).collect::<Vec<_>>(), vec![Some(1)]);
        geo.set_opacity(&[1], 0.0);
        assert_eq!(geo.chunk_opacity(1), 0.0);
        assert_eq!(geo.subset(&[1]).chunk_count(), 1);
    }
}
