//! Rays and the primitive intersection tests the geometries share.

use glam::{Mat4, Vec3};

const EPSILON: f32 = 1e-7;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray expressed through `m` (usually an inverse instance
    /// transform).
    #[must_use]
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self::new(m.transform_point3(self.origin), m.transform_vector3(self.direction))
    }

    /// Nearest non-negative hit with a sphere.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        [-b - sq, -b + sq].into_iter().find(|&t| t >= 0.0)
    }

    /// Nearest non-negative hit with the side of a finite open cylinder.
    #[must_use]
    pub fn intersect_cylinder(&self, bottom: Vec3, top: Vec3, radius: f32) -> Option<f32> {
        let axis = top - bottom;
        let height = axis.length();
        if height < EPSILON {
            return None;
        }
        let u = axis / height;
        let oc = self.origin - bottom;
        let d_perp = self.direction - u * self.direction.dot(u);
        let oc_perp = oc - u * oc.dot(u);
        let a = d_perp.length_squared();
        if a < EPSILON {
            return None;
        }
        let b = 2.0 * d_perp.dot(oc_perp);
        let c = oc_perp.length_squared() - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)]
            .into_iter()
            .find(|&t| {
                let s = (oc + self.direction * t).dot(u);
                t >= 0.0 && (0.0..=height).contains(&s)
            })
    }

    /// Two-sided Möller–Trumbore triangle test.
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let e1 = b - a;
        let e2 = c - a;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = e2.dot(q) * inv;
        (t >= 0.0).then_some(t)
    }

    /// Closest approach between the ray and segment `a..b`.
    ///
    /// Returns `(ray parameter, closest point on the segment, distance)`.
    #[must_use]
    pub fn closest_to_segment(&self, a: Vec3, b: Vec3) -> (f32, Vec3, f32) {
        let d2 = b - a;
        let r = self.origin - a;
        let e = d2.length_squared();
        let c = self.direction.dot(r);
        let (s, t) = if e <= EPSILON {
            ((-c).max(0.0), 0.0)
        } else {
            let f = d2.dot(r);
            let bb = self.direction.dot(d2);
            let denom = e - bb * bb;
            let s = if denom > EPSILON {
                ((bb * f - c * e) / denom).max(0.0)
            } else {
                0.0
            };
            let t = (bb * s + f) / e;
            if t < 0.0 {
                ((-c).max(0.0), 0.0)
            } else if t > 1.0 {
                ((bb - c).max(0.0), 1.0)
            } else {
                (s, t)
            }
        };
        let on_segment = a + d2 * t;
        (s, on_segment, self.at(s).distance(on_segment))
    }
}

/// A pick request: the ray plus distance limits and line tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    /// Pick ray in world space.
    pub ray: Ray,
    /// Hits closer than this are discarded.
    pub near: f32,
    /// Hits farther than this are discarded.
    pub far: f32,
    /// Minimum pick distance for line geometries.
    pub line_precision: f32,
}

impl Raycaster {
    /// Raycaster with no distance limits.
    #[must_use]
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f32::INFINITY,
            line_precision: 0.0,
        }
    }

    /// Same limits, different ray.
    #[must_use]
    pub fn with_ray(&self, ray: Ray) -> Self {
        Self { ray, ..*self }
    }

    /// Whether `distance` is inside `near..=far`.
    #[must_use]
    pub fn in_range(&self, distance: f32) -> bool {
        (self.near..=self.far).contains(&distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_x() -> Ray {
        Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X)
    }

    #[test]
    fn sphere_hit_is_front_face() {
        let t = down_x().intersect_sphere(Vec3::ZERO, 1.0);
        assert_eq!(t, Some(9.0));
        assert!(down_x().intersect_sphere(Vec3::new(0.0, 2.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn cylinder_side_is_clipped_to_height() {
        let ray = down_x();
        let hit = ray.intersect_cylinder(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.5);
        assert!((hit.unwrap_or(0.0) - 9.5).abs() < 1e-5);
        let miss = ray.intersect_cylinder(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 3.0, 0.0), 0.5);
        assert!(miss.is_none());
    }

    #[test]
    fn triangle_hit_from_either_side() {
        let (a, b, c) = (Vec3::new(0.0, -1.0, -1.0), Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(down_x().intersect_triangle(a, b, c).is_some());
        assert!(down_x().intersect_triangle(a, c, b).is_some());
    }

    #[test]
    fn segment_closest_point() {
        let (t, point, dist) = down_x().closest_to_segment(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, 1.0, 1.0));
        assert!((t - 10.0).abs() < 1e-5);
        assert!((point - Vec3::Y).length() < 1e-5);
        assert!((dist - 1.0).abs() < 1e-5);
    }
}
