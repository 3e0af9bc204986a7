//! Geometric helpers shared by the representation groups.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::RepError;

/// Angle between two vectors in radians; a right angle when either is zero.
#[must_use]
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom == 0.0 {
        return std::f32::consts::FRAC_PI_2;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Spherical interpolation between `v1` and `v2` separated by `omega`.
///
/// Degenerate angles fall back to linear interpolation.
#[must_use]
pub fn slerp(omega: f32, v1: Vec3, v2: Vec3, t: f32) -> Vec3 {
    let sin_omega = omega.sin();
    if sin_omega.abs() < 1e-6 {
        return v1.lerp(v2, t);
    }
    v1 * (((1.0 - t) * omega).sin() / sin_omega) + v2 * ((t * omega).sin() / sin_omega)
}

/// Instance transform for one cross-section ring.
///
/// The ring sits at `eye`, faces `target` and is oriented by `up`; the
/// local X and Y axes are scaled by `rad` and the Z axis is collapsed.
#[must_use]
pub fn calc_chunk_matrix(eye: Vec3, target: Vec3, up: Vec3, rad: Vec2) -> Mat4 {
    let mut z = eye - target;
    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }
    let z = z.normalize();
    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        // up and z are parallel: nudge z before retrying
        let nudged = if up.z.abs() == 1.0 {
            Vec3::new(z.x + 0.0001, z.y, z.z)
        } else {
            Vec3::new(z.x, z.y, z.z + 0.0001)
        }
        .normalize();
        x = up.cross(nudged);
    }
    let x = x.normalize_or_zero();
    let y = z.cross(x);
    Mat4::from_cols(
        (x * rad.x).extend(0.0),
        (y * rad.y).extend(0.0),
        Vec4::ZERO,
        eye.extend(1.0),
    )
}

/// `parts` points evenly spaced on a circle of `radius` in the XY plane.
pub fn regular_polygon(radius: f32, parts: u32) -> Result<Vec<Vec3>, RepError> {
    if parts < 3 {
        return Err(RepError::InvalidParameter(format!(
            "cross section needs at least 3 points, got {parts}"
        )));
    }
    Ok((0..parts)
        .map(|i| {
            let a = 2.0 * i as f32 / parts as f32 * std::f32::consts::PI;
            Vec3::new(a.cos() * radius, a.sin() * radius, 0.0)
        })
        .collect())
}

/// Clamped cubic Hermite spline through a point sequence.
///
/// Tangents are central differences scaled by `1 - tension` (tension
/// clamped to `[0, 1]`, so any negative tension gives Catmull-Rom).
/// Parameter `0..=1` spans the whole sequence; indices outside it are
/// clamped to the end points.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    points: Vec<Vec3>,
    tangent_factor: f32,
}

impl CubicSpline {
    /// Build a spline; needs at least two points.
    pub fn new(points: Vec<Vec3>, tension: f32) -> Result<Self, RepError> {
        if points.len() < 2 {
            return Err(RepError::InvalidParameter(format!(
                "spline needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self {
            points,
            tangent_factor: 1.0 - tension.clamp(0.0, 1.0),
        })
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects short point lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn point(&self, index: isize) -> Vec3 {
        let last = self.points.len() as isize - 1;
        self.points[index.clamp(0, last) as usize]
    }

    fn tangent(&self, k: isize) -> Vec3 {
        (self.point(k + 1) - self.point(k - 1)) * (self.tangent_factor * 0.5)
    }

    /// Evaluate at fractional control-point index `s`.
    #[must_use]
    pub fn at_index(&self, s: f32) -> Vec3 {
        let k = s.floor();
        let t = s - k;
        let k = k as isize;
        let (t2, t3) = (t * t, t * t * t);
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        self.point(k) * h00
            + self.tangent(k) * h10
            + self.point(k + 1) * h01
            + self.tangent(k + 1) * h11
    }

    /// Evaluate at `t` in `0..=1` over the whole sequence.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.at_index(t * (self.points.len() - 1) as f32)
    }

    /// Evaluate at `t` in `0..=1` mapped onto the second through the
    /// last-but-one control point, leaving the outer points as tangent
    /// guides.
    #[must_use]
    pub fn at_inner(&self, t: f32) -> Vec3 {
        let n = self.points.len() as f32;
        self.at_index(t * (n - 3.0) + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slerp_halfway_bisects() {
        let mid = slerp(std::f32::consts::FRAC_PI_2, Vec3::X, Vec3::Y, 0.5);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((mid - expected).length() < 1e-5);
    }

    #[test]
    fn chunk_matrix_places_ring_at_eye() {
        let m = calc_chunk_matrix(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 4.0), Vec3::Y, Vec2::new(2.0, 0.5));
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        // local Y follows `up`, scaled by rad.y
        let up = m.transform_vector3(Vec3::Y);
        assert!((up - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5);
        // Z is collapsed
        assert_eq!(m.transform_vector3(Vec3::Z), Vec3::ZERO);
    }

    #[test]
    fn polygon_rejects_degenerate_shapes() {
        assert!(regular_polygon(1.0, 2).is_err());
        let square = regular_polygon(1.0, 4).unwrap();
        assert!((square[1] - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn spline_passes_through_control_points() {
        let pts = vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 0.0)];
        let spline = CubicSpline::new(pts.clone(), -0.7).unwrap();
        for (i, p) in pts.iter().enumerate() {
            assert!((spline.at_index(i as f32) - *p).length() < 1e-5);
        }
        assert!((spline.at(0.0) - pts[0]).length() < 1e-5);
        assert!((spline.at_inner(0.0) - pts[1]).length() < 1e-5);
        assert!((spline.at_inner(1.0) - pts[2]).length() < 1e-5);
        assert!(CubicSpline::new(vec![Vec3::ZERO], 0.0).is_err());
    }
}
