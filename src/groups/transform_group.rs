use glam::{Mat4, Vec3};

use crate::geometry::{Geometry, Hit, Raycaster};
use crate::options::Material;

/// A geometry hit tagged with the instance it came from, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceHit {
    /// Distance from the world ray origin.
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec3,
    /// Chunk that was hit, when the geometry can tell.
    pub chunk: Option<usize>,
    /// Index of the transform the hit geometry was instanced with.
    pub instance: usize,
}

/// One geometry and material instanced across rigid transforms.
#[derive(Debug)]
pub struct TransformGroup<G> {
    geometry: G,
    material: Material,
    transforms: Vec<Mat4>,
    inverses: Vec<Mat4>,
}

/// A reduced copy of a group's geometry, instanced like its source.
pub type SubsetMesh = TransformGroup<Box<dyn Geometry>>;

impl<G: Geometry> TransformGroup<G> {
    /// Instance `geometry` over `transforms`; an empty list means a single
    /// identity instance.
    pub fn new(geometry: G, material: Material, transforms: &[Mat4]) -> Self {
        let transforms = if transforms.is_empty() {
            vec![Mat4::IDENTITY]
        } else {
            transforms.to_vec()
        };
        let inverses = transforms.iter().map(Mat4::inverse).collect();
        Self {
            geometry,
            material,
            transforms,
            inverses,
        }
    }

    /// The instanced geometry.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access for in-place item and color rewrites.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Shading parameters for the renderer.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Instance transforms (never empty).
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Intersect every instance with the raycaster's world ray.
    ///
    /// The ray is moved into each instance's local space, the geometry hit
    /// points are moved back and distances are measured again in world
    /// space before the near/far limits apply.
    pub fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<InstanceHit>) {
        let world = raycaster.ray;
        let mut local_hits: Vec<Hit> = Vec::new();
        for (instance, (m, inv)) in self.transforms.iter().zip(&self.inverses).enumerate() {
            local_hits.clear();
            let local = raycaster.with_ray(world.transformed(inv));
            self.geometry.raycast(&local, &mut local_hits);
            for hit in &local_hits {
                let point = m.transform_point3(hit.point);
                let distance = world.origin.distance(point);
                if !raycaster.in_range(distance) {
                    continue;
                }
                hits.push(InstanceHit {
                    distance,
                    point,
                    chunk: hit.chunk,
                    instance,
                });
            }
        }
    }

    /// Re-instance the listed chunks over the same transforms.
    pub fn subset(&self, chunks: &[usize]) -> SubsetMesh {
        TransformGroup {
            geometry: self.geometry.subset(chunks),
            material: self.material.clone(),
            transforms: self.transforms.clone(),
            inverses: self.inverses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Ray, Spheres};

    fn unit_sphere() -> Spheres {
        let mut geo = Spheres::new(1);
        geo.set_item(0, Vec3::ZERO, 1.0);
        geo.finalize();
        geo
    }

    #[test]
    fn empty_transform_list_is_identity() {
        let group = TransformGroup::new(unit_sphere(), Material::default(), &[]);
        assert_eq!(group.transforms(), &[Mat4::IDENTITY]);
    }

    #[test]
    fn hits_are_tagged_per_instance_in_world_space() {
        let transforms = [
            Mat4::IDENTITY,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0)),
        ];
        let group = TransformGroup::new(unit_sphere(), Material::default(), &transforms);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let mut hits = Vec::new();
        group.raycast(&Raycaster::new(ray), &mut hits);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].instance, 0);
        assert!((hits[0].distance - 9.0).abs() < 1e-5);
        assert_eq!(hits[1].instance, 1);
        assert!((hits[1].distance - 19.0).abs() < 1e-4);
        assert!((hits[1].point.z + 9.0).abs() < 1e-4);
    }

    #[test]
    fn far_limit_drops_distant_instances() {
        let transforms = [Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0))];
        let group = TransformGroup::new(unit_sphere(), Material::default(), &transforms);
        let mut rc = Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z));
        rc.far = 15.0;
        let mut hits = Vec::new();
        group.raycast(&rc, &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn subset_keeps_transforms_and_material() {
        let transforms = [Mat4::from_translation(Vec3::X), Mat4::from_translation(Vec3::Y)];
        let material = Material::preset("GL").unwrap_or_default();
        let group = TransformGroup::new(unit_sphere(), material.clone(), &transforms);
        let sub = group.subset(&[0]);
        assert_eq!(sub.transforms(), &transforms);
        assert_eq!(sub.material(), &material);
        assert_eq!(sub.geometry().chunk_count(), 1);
    }
}
