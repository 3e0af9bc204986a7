use glam::Vec3;

use super::{rgba, BoundingSphere, Geometry, Hit, Raycaster};

/// Per-instance cylinder data, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CylinderInstance {
    /// xyz = bottom center, w = radius
    pub bottom: [f32; 4],
    /// xyz = top center, w = radius
    pub top: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

impl Default for CylinderInstance {
    fn default() -> Self {
        Self {
            bottom: [0.0; 4],
            top: [0.0; 4],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl CylinderInstance {
    fn ends(&self) -> (Vec3, Vec3, f32) {
        let [bx, by, bz, r] = self.bottom;
        let [tx, ty, tz, _] = self.top;
        (Vec3::new(bx, by, bz), Vec3::new(tx, ty, tz), r)
    }
}

/// Instanced single-color open cylinders, one chunk per cylinder.
#[derive(Debug, Clone, Default)]
pub struct Cylinders {
    instances: Vec<CylinderInstance>,
    bounds: Option<BoundingSphere>,
}

impl Cylinders {
    /// Allocate `count` degenerate cylinders.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            instances: vec![CylinderInstance::default(); count],
            bounds: None,
        }
    }

    /// Place cylinder `index` between `bottom` and `top`.
    pub fn set_item(&mut self, index: usize, bottom: Vec3, top: Vec3, radius: f32) {
        let inst = &mut self.instances[index];
        inst.bottom = bottom.extend(radius).to_array();
        inst.top = top.extend(radius).to_array();
    }

    /// Color cylinder `index`, keeping its opacity.
    pub fn set_color(&mut self, index: usize, color: u32) {
        let opacity = self.instances[index].color[3];
        self.instances[index].color = rgba(color, opacity);
    }

    /// Bottom, top and radius of cylinder `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> (Vec3, Vec3, f32) {
        self.instances[index].ends()
    }

    /// Instance records.
    #[must_use]
    pub fn instances(&self) -> &[CylinderInstance] {
        &self.instances
    }

    /// Instance records as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Geometry for Cylinders {
    fn chunk_count(&self) -> usize {
        self.instances.len()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        for &c in chunks {
            self.instances[c].color[3] = opacity;
        }
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.instances[chunk].color[3]
    }

    fn finalize(&mut self) {
        self.bounds = BoundingSphere::from_points(self.instances.iter().flat_map(|inst| {
            let (b, t, r) = inst.ends();
            [(b, r), (t, r)]
        }));
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        let ray = &raycaster.ray;
        if self.bounds.is_some_and(|b| !b.hit_by(ray)) {
            return;
        }
        for (chunk, inst) in self.instances.iter().enumerate() {
            let (bottom, top, radius) = inst.ends();
            if let Some(t) = ray.intersect_cylinder(bottom, top, radius) {
                hits.push(Hit {
                    distance: t,
                    point: ray.at(t),
                    chunk: Some(chunk),
                });
            }
        }
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        let mut out = Self {
            instances: chunks.iter().map(|&c| self.instances[c]).collect(),
            bounds: None,
        };
        out.finalize();
        Box::new(out)
    }
}

/// Cylinders split at their midpoint into two independently colored
/// halves.
///
/// Item `i` owns chunks `2i` (bottom half) and `2i + 1` (top half).
#[derive(Debug, Clone, Default)]
pub struct TwoColorCylinders {
    halves: Cylinders,
}

impl TwoColorCylinders {
    /// Allocate `count` items (`2 * count` chunks).
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            halves: Cylinders::new(count * 2),
        }
    }

    /// Place item `index` between `bottom` and `top`.
    pub fn set_item(&mut self, index: usize, bottom: Vec3, top: Vec3, radius: f32) {
        let mid = bottom.lerp(top, 0.5);
        self.halves.set_item(index * 2, bottom, mid, radius);
        self.halves.set_item(index * 2 + 1, mid, top, radius);
    }

    /// Color the two halves of item `index`.
    pub fn set_colors(&mut self, index: usize, bottom: u32, top: u32) {
        self.halves.set_color(index * 2, bottom);
        self.halves.set_color(index * 2 + 1, top);
    }

    /// Number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.halves.instances.len() / 2
    }

    /// Half-cylinder records, two per item.
    #[must_use]
    pub fn halves(&self) -> &Cylinders {
        &self.halves
    }
}

impl Geometry for TwoColorCylinders {
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
    fn halves_meet_at_midpoint() {
        let mut geo = TwoColorCylinders::new(1);
        geo.set_item(0, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 0.1);
        geo.set_colors(0, 0xFF_00_00, 0x00_00_FF);
        assert_eq!(geo.chunk_count(), 2);
        assert_eq!(geo.item_count(), 1);
        let (_, top, _) = geo.halves().item(0);
        let (bottom, _, _) = geo.halves().item(1);
        assert_eq!(top, Vec3::X);
        assert_eq!(bottom, Vec3::X);
        assert_eq!(geo.halves().instances()[1].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn ray_picks_the_crossed_half() {
        let mut geo = TwoColorCylinders::new(1);
        geo.set_item(0, Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 0.2);
        geo.finalize();
        let rc = Raycaster::new(Ray::new(Vec3::new(-5.0, 1.5, 0.0), Vec3::X));
        let mut hits = Vec::new();
        geo.raycast(&rc, &mut hits);
        assert_eq!(hits.first().and_then(|h| h.chunk), Some(1));
    }
}
