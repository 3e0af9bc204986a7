use glam::Vec3;

/// A ring of atoms, stored in ring order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    /// Member atom indices in ring order.
    pub atoms: Vec<usize>,
    /// Geometric center of the ring.
    pub center: Vec3,
    /// Distance from the center to the midpoint of the first ring edge.
    pub radius: f32,
}

impl Cycle {
    /// Create a ring and compute its center and radius from `pos`.
    pub fn new<F>(atoms: Vec<usize>, pos: F) -> Self
    where
        F: Fn(usize) -> Vec3,
    {
        let mut cycle = Self {
            atoms,
            center: Vec3::ZERO,
            radius: 0.0,
        };
        cycle.update(pos);
        cycle
    }

    /// Recompute center and radius for new atom positions.
    pub fn update<F>(&mut self, pos: F)
    where
        F: Fn(usize) -> Vec3,
    {
        let n = self.atoms.len();
        if n < 2 {
            log::warn!("ring with {n} atoms has no edge to measure");
            self.center = self.atoms.first().map_or(Vec3::ZERO, |&a| pos(a));
            self.radius = 0.0;
            return;
        }
        let sum: Vec3 = self.atoms.iter().map(|&a| pos(a)).sum();
        self.center = sum / n as f32;
        let edge_mid = pos(self.atoms[0]).lerp(pos(self.atoms[1]), 0.5);
        self.radius = self.center.distance(edge_mid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_ring_center_and_radius() {
        let pts = [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        ];
        let cycle = Cycle::new(vec![0, 1, 2, 3], |i| pts[i]);
        assert!(cycle.center.length() < 1e-6);
        assert!((cycle.radius - 1.0).abs() < 1e-6);
    }
}
