use glam::Vec3;

use super::{rgba, BoundingSphere, Geometry, Hit, Raycaster};

/// Per-instance sphere data, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    /// xyz = center, w = radius
    pub center: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

impl Default for SphereInstance {
    fn default() -> Self {
        Self {
            center: [0.0; 4],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Instanced spheres, one chunk per sphere.
#[derive(Debug, Clone, Default)]
pub struct Spheres {
    instances: Vec<SphereInstance>,
    bounds: Option<BoundingSphere>,
}

impl Spheres {
    /// Allocate `count` unit spheres at the origin.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            instances: vec![SphereInstance::default(); count],
            bounds: None,
        }
    }

    /// Place sphere `index`.
    pub fn set_item(&mut self, index: usize, center: Vec3, radius: f32) {
        self.instances[index].center = center.extend(radius).to_array();
    }

    /// Color sphere `index`, keeping its opacity.
    pub fn set_color(&mut self, index: usize, color: u32) {
        let opacity = self.instances[index].color[3];
        self.instances[index].color = rgba(color, opacity);
    }

    /// Center and radius of sphere `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> (Vec3, f32) {
        let [x, y, z, r] = self.instances[index].center;
        (Vec3::new(x, y, z), r)
    }

    /// Instance records.
    #[must_use]
    pub fn instances(&self) -> &[SphereInstance] {
        &self.instances
    }

    /// Instance records as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Geometry for Spheres {
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
        self.bounds = BoundingSphere::from_points((0..self.instances.len()).map(|i| self.item(i)));
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        let ray = &raycaster.ray;
        if self.bounds.is_some_and(|b| !b.hit_by(ray)) {
            return;
        }
        for chunk in 0..self.instances.len() {
            let (center, radius) = self.item(chunk);
            if let Some(t) = ray.intersect_sphere(center, radius) {
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
