//! Molecular surface meshes and the builders that extract them.

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::{rgba, BoundingSphere, Geometry, Hit, Raycaster};
use crate::error::RepError;

/// One surface vertex, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    /// xyz = position, w unused
    pub position: [f32; 4],
    /// xyz = normal, w unused
    pub normal: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

/// Triangle mesh whose vertices each belong to one chunk (atom).
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    vertices: Vec<SurfaceVertex>,
    indices: Vec<u32>,
    vertex_chunk: Vec<usize>,
    opacity: Vec<f32>,
    bounds: Option<BoundingSphere>,
}

impl SurfaceMesh {
    /// Empty mesh addressing `chunks` chunks.
    #[must_use]
    pub fn new(chunks: usize) -> Self {
        Self {
            opacity: vec![1.0; chunks],
            ..Self::default()
        }
    }

    /// Append a vertex owned by `chunk` and return its index.
    pub fn push_vertex(&mut self, chunk: usize, position: Vec3, normal: Vec3, color: u32) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(SurfaceVertex {
            position: position.extend(0.0).to_array(),
            normal: normal.extend(0.0).to_array(),
            color: rgba(color, self.opacity[chunk]),
        });
        self.vertex_chunk.push(chunk);
        index
    }

    /// Append a triangle over existing vertices.
    pub fn push_triangle(&mut self, tri: [u32; 3]) {
        self.indices.extend_from_slice(&tri);
    }

    /// Recolor every vertex of `chunk`.
    pub fn set_color(&mut self, chunk: usize, color: u32) {
        let opacity = self.opacity[chunk];
        for (v, &c) in self.vertices.iter_mut().zip(&self.vertex_chunk) {
            if c == chunk {
                v.color = rgba(color, opacity);
            }
        }
    }

    /// Vertex records.
    #[must_use]
    pub fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    /// Triangle list.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn pos(&self, index: u32) -> Vec3 {
        Vec3::from_slice(&self.vertices[index as usize].position[..3])
    }
}

impl Geometry for SurfaceMesh {
    fn chunk_count(&self) -> usize {
        self.opacity.len()
    }

    fn set_opacity(&mut self, chunks: &[usize], opacity: f32) {
        for &c in chunks {
            self.opacity[c] = opacity;
        }
        for (v, &c) in self.vertices.iter_mut().zip(&self.vertex_chunk) {
            v.color[3] = self.opacity[c];
        }
    }

    fn chunk_opacity(&self, chunk: usize) -> f32 {
        self.opacity[chunk]
    }

    fn finalize(&mut self) {
        self.bounds = BoundingSphere::from_points((0..self.vertices.len()).map(|i| (self.pos(i as u32), 0.0)));
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounds
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<Hit>) {
        let ray = &raycaster.ray;
        if self.bounds.is_some_and(|b| !b.hit_by(ray)) {
            return;
        }
        for tri in self.indices.chunks_exact(3) {
            if let Some(t) = ray.intersect_triangle(self.pos(tri[0]), self.pos(tri[1]), self.pos(tri[2])) {
                hits.push(Hit {
                    distance: t,
                    point: ray.at(t),
                    chunk: Some(self.vertex_chunk[tri[0] as usize]),
                });
            }
        }
    }

    fn subset(&self, chunks: &[usize]) -> Box<dyn Geometry> {
        let mut slot: FxHashMap<usize, usize> = FxHashMap::default();
        for (i, &c) in chunks.iter().enumerate() {
            let _ = slot.entry(c).or_insert(i);
        }
        let mut out = Self::new(chunks.len());
        for (i, &c) in chunks.iter().enumerate() {
            out.opacity[i] = self.opacity[c];
        }
        let mut remap: FxHashMap<u32, u32> = FxHashMap::default();
        for tri in self.indices.chunks_exact(3) {
            let Some(&dst_chunk) = slot.get(&self.vertex_chunk[tri[0] as usize]) else {
                continue;
            };
            let mapped = [tri[0], tri[1], tri[2]].map(|src| {
                *remap.entry(src).or_insert_with(|| {
                    let index = out.vertices.len() as u32;
                    out.vertices.push(self.vertices[src as usize]);
                    out.vertex_chunk.push(dst_chunk);
                    index
                })
            });
            out.push_triangle(mapped);
        }
        out.finalize();
        Box::new(out)
    }
}

/// One input sphere for surface extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceAtom {
    /// Atom center.
    pub center: Vec3,
    /// Atom radius before probe inflation.
    pub radius: f32,
    /// Atom color.
    pub color: u32,
}

/// Replaceable surface extraction step.
///
/// `atoms[i]` owns chunk `i` of the returned mesh.
pub trait SurfaceBuilder: std::fmt::Debug {
    /// Extract a surface around `atoms`.
    fn build(&self, atoms: &[SurfaceAtom]) -> Result<SurfaceMesh, RepError>;
}

/// Union of inflated atom spheres: icosphere shells with buried triangles
/// removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereUnionSurface {
    /// Added to every scaled atom radius.
    pub probe_radius: f32,
    /// Multiplier on atom radii.
    pub scale: f32,
    /// Icosphere subdivision level.
    pub subdivisions: u32,
}

impl Default for SphereUnionSurface {
    fn default() -> Self {
        Self {
            probe_radius: 0.0,
            scale: 1.0,
            subdivisions: 2,
        }
    }
}

impl SphereUnionSurface {
    fn unit_icosphere(subdivisions: u32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut positions: Vec<Vec3> = [
            (-1.0, phi, 0.0),
            (1.0, phi, 0.0),
            (-1.0, -phi, 0.0),
            (1.0, -phi, 0.0),
            (0.0, -1.0, phi),
            (0.0, 1.0, phi),
            (0.0, -1.0, -phi),
            (0.0, 1.0, -phi),
            (phi, 0.0, -1.0),
            (phi, 0.0, 1.0),
            (-phi, 0.0, -1.0),
            (-phi, 0.0, 1.0),
        ]
        .into_iter()
        .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
        .collect();
        let mut faces: Vec<[u32; 3]> = vec![
            [0, 5, 11], [0, 1, 5], [0, 7, 1], [0, 10, 7], [0, 11, 10],
            [1, 9, 5], [5, 4, 11], [11, 2, 10], [10, 6, 7], [7, 8, 1],
            [3, 4, 9], [3, 2, 4], [3, 6, 2], [3, 8, 6], [3, 9, 8],
            [4, 5, 9], [2, 11, 4], [6, 10, 2], [8, 7, 6], [9, 1, 8],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: FxHashMap<(u32, u32), u32> = FxHashMap::default();
            let mut mid = |a: u32, b: u32, positions: &mut Vec<Vec3>| {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let p = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
                    positions.push(p);
                    positions.len() as u32 - 1
                })
            };
            faces = faces
                .into_iter()
                .flat_map(|[v0, v1, v2]| {
                    let a = mid(v0, v1, &mut positions);
                    let b = mid(v1, v2, &mut positions);
                    let c = mid(v2, v0, &mut positions);
                    [[v0, a, c], [v1, b, a], [v2, c, b], [a, b, c]]
                })
                .collect();
        }
        (positions, faces)
    }
}

impl SurfaceBuilder for SphereUnionSurface {
    fn build(&self, atoms: &[SurfaceAtom]) -> Result<SurfaceMesh, RepError> {
        if self.scale <= 0.0 {
            return Err(RepError::InvalidParameter(format!(
                "surface scale must be positive, got {}",
                self.scale
            )));
        }
        let radii: Vec<f32> = atoms
            .iter()
            .map(|a| a.radius * self.scale + self.probe_radius)
            .collect();
        let cell = 2.0 * radii.iter().copied().fold(0.0_f32, f32::max).max(0.1);
        let key = |p: Vec3| {
            let g = (p / cell).floor();
            (g.x as i32, g.y as i32, g.z as i32)
        };
        let mut grid: FxHashMap<(i32, i32, i32), Vec<usize>> = FxHashMap::default();
        for (i, a) in atoms.iter().enumerate() {
            grid.entry(key(a.center)).or_default().push(i);
        }
        let buried = |owner: usize, p: Vec3| {
            let (gx, gy, gz) = key(p);
            (gx - 1..=gx + 1).any(|x| {
                (gy - 1..=gy + 1).any(|y| {
                    (gz - 1..=gz + 1).any(|z| {
                        grid.get(&(x, y, z)).is_some_and(|cands| {
                            cands.iter().any(|&j| {
                                j != owner && atoms[j].center.distance(p) < radii[j] - 1e-4
                            })
                        })
                    })
                })
            })
        };

        let (unit, faces) = Self::unit_icosphere(self.subdivisions);
        let mut mesh = SurfaceMesh::new(atoms.len());
        for (i, atom) in atoms.iter().enumerate() {
            let points: Vec<Vec3> = unit.iter().map(|&n| atom.center + n * radii[i]).collect();
            let hidden: Vec<bool> = points.iter().map(|&p| buried(i, p)).collect();
            let mut slots: Vec<Option<u32>> = vec![None; unit.len()];
            for face in &faces {
                if face.iter().any(|&v| hidden[v as usize]) {
                    continue;
                }
                let tri = face.map(|v| {
                    *slots[v as usize].get_or_insert_with(|| {
                        mesh.push_vertex(i, points[v as usize], unit[v as usize], atom.color)
                    })
                });
                mesh.push_triangle(tri);
            }
        }
        mesh.finalize();
        log::debug!(
            "sphere union surface: {} atoms, {} triangles",
            atoms.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ray;

    fn pair() -> Vec<SurfaceAtom> {
        vec![
            SurfaceAtom { center: Vec3::ZERO, radius: 1.0, color: 0xFF_00_00 },
            SurfaceAtom { center: Vec3::new(1.5, 0.0, 0.0), radius: 1.0, color: 0x00_00_FF },
        ]
    }

    #[test]
    fn overlapping_spheres_lose_buried_faces() {
        let builder = SphereUnionSurface::default();
        let lone = builder.build(&pair()[..1]).unwrap();
        let both = builder.build(&pair()).unwrap();
        assert_eq!(lone.triangle_count(), 320);
        assert!(both.triangle_count() < 640);
        assert_eq!(both.chunk_count(), 2);
    }

    #[test]
    fn ray_hits_surface_of_nearest_atom() {
        let mesh = SphereUnionSurface::default().build(&pair()).unwrap();
        let rc = Raycaster::new(Ray::new(Vec3::new(-10.0, 0.1, 0.05), Vec3::X));
        let mut hits = Vec::new();
        mesh.raycast(&rc, &mut hits);
        let first = hits
            .iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .and_then(|h| h.chunk);
        assert_eq!(first, Some(0));
    }

    #[test]
    fn subset_keeps_only_listed_atoms() {
        let mut mesh = SphereUnionSurface::default().build(&pair()).unwrap();
        mesh.set_opacity(&[1], 0.0);
        let sub = mesh.subset(&[1]);
        assert_eq!(sub.chunk_count(), 1);
        assert_eq!(sub.chunk_opacity(0), 0.0);
        assert!(SphereUnionSurface { scale: 0.0, ..Default::default() }.build(&pair()).is_err());
    }
}
