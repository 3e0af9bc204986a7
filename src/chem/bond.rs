use glam::Vec3;

use super::atom::Atom;
use super::element::Element;

/// Bond classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BondType {
    /// Guessed or manually generated.
    #[default]
    Unknown,
    /// Simple covalent bond.
    Covalent,
    /// Member of an aromatic ring.
    Aromatic,
}

/// A bond between two atoms, `left < right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Position of this bond in the complex's bond array.
    pub index: usize,
    /// First atom index.
    pub left: usize,
    /// Second atom index.
    pub right: usize,
    /// Bond order (0 for unknown).
    pub order: u8,
    /// Bond classification.
    pub kind: BondType,
}

impl Bond {
    /// The atom on the other side of this bond from `atom`.
    #[must_use]
    pub fn other(&self, atom: usize) -> usize {
        if self.left == atom {
            self.right
        } else {
            self.left
        }
    }

    /// Unit vector perpendicular to the bond that lies in the plane of the
    /// neighbouring atoms, pointing to the side with more neighbours.
    ///
    /// Multi-order bonds are offset along this direction so double bonds in
    /// rings are drawn on the inside. `pos` supplies atom positions, so the
    /// same computation serves static geometry and trajectory frames.
    pub fn calc_normal_dir<F>(&self, atoms: &[Atom], bonds: &[Bond], pos: F) -> Vec3
    where
        F: Fn(usize) -> Vec3,
    {
        let (mut first, mut second) = (self.left, self.right);
        if atoms[self.left].bonds.len() > atoms[self.right].bonds.len() {
            first = self.right;
            second = self.left;
        }

        let mut third = first;
        let mut max_neibs = 0;
        for &bond_idx in &atoms[second].bonds {
            let another = bonds[bond_idx].other(second);
            let neibs = atoms[another].bonds.len();
            if neibs > max_neibs && another != first {
                third = another;
                max_neibs = neibs;
            }
        }

        let second_pos = pos(second);
        let first_v = pos(first) - second_pos;
        let mut second_v = first_v.cross(pos(third) - second_pos);
        if second_v.length_squared() < 0.0001 {
            second_v = Vec3::Y;
        }
        let first_v = first_v.normalize_or_zero();
        let second_v = second_v.normalize_or_zero();
        let mut dir = second_v.cross(first_v);
        if dir.length_squared() < 0.0001 {
            dir = Vec3::Y;
        }
        self.fix_dir(second_pos, dir.normalize(), atoms, bonds, &pos)
    }

    /// Flip `dir` towards the side of the bond with more neighbour atoms.
    ///
    /// Carbons of the first neighbour shell are counted first, then the
    /// whole first shell, then the second shell; the first stage with a
    /// majority decides.
    fn fix_dir<F>(
        &self,
        ref_point: Vec3,
        dir: Vec3,
        atoms: &[Atom],
        bonds: &[Bond],
        pos: &F,
    ) -> Vec3
    where
        F: Fn(usize) -> Vec3,
    {
        let level_one = self.level_one(atoms, bonds);
        let level_two = self.level_two(atoms, bonds);
        let is_carbon = |a: &usize| atoms[*a].element == Element::C;

        let stages: [Vec<usize>; 4] = [
            level_one.iter().copied().filter(is_carbon).collect(),
            level_one.clone(),
            level_two.iter().copied().filter(is_carbon).collect(),
            level_two,
        ];

        let (mut right, mut left) = (0usize, 0usize);
        for stage in &stages {
            for &atom in stage {
                if dir.dot(pos(atom) - ref_point) > 0.0 {
                    right += 1;
                } else {
                    left += 1;
                }
            }
            if left > right {
                return -dir;
            }
            if left < right {
                return dir;
            }
        }
        dir
    }

    /// Neighbours of both ends, excluding the bond partners themselves.
    fn level_one(&self, atoms: &[Atom], bonds: &[Bond]) -> Vec<usize> {
        let mut out = Vec::new();
        for (from, skip) in [(self.left, self.right), (self.right, self.left)] {
            out.extend(
                atoms[from]
                    .bonds
                    .iter()
                    .map(|&b| bonds[b].other(from))
                    .filter(|&a| a != skip),
            );
        }
        out
    }

    /// Neighbours of the level-one atoms, walking away from the bond.
    fn level_two(&self, atoms: &[Atom], bonds: &[Bond]) -> Vec<usize> {
        let mut out = Vec::new();
        for (from, skip) in [(self.left, self.right), (self.right, self.left)] {
            for &b in &atoms[from].bonds {
                let l1 = bonds[b].other(from);
                if l1 == skip {
                    continue;
                }
                out.extend(
                    atoms[l1]
                        .bonds
                        .iter()
                        .map(|&b2| bonds[b2].other(l1))
                        .filter(|&a| a != from),
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::{allyl, benzene};

    #[test]
    fn ring_bond_normal_points_into_the_ring() {
        let complex = benzene();
        let bond = &complex.bonds()[6];
        assert_eq!((bond.left, bond.right), (0, 1));
        let atoms = complex.atoms();
        let dir = bond.calc_normal_dir(atoms, complex.bonds(), |i| atoms[i].position);
        let mid = (atoms[0].position + atoms[1].position) * 0.5;
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.dot(-mid.normalize()) > 0.99);
    }

    #[test]
    fn other_end_of_a_bond() {
        let complex = allyl();
        let bond = &complex.bonds()[1];
        assert_eq!(bond.other(1), 2);
        assert_eq!(bond.other(2), 1);
    }
}
