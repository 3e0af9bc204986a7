//! Small hand-built structures shared by unit tests.

use glam::Vec3;

use crate::chem::{BondType, Complex, ComplexBuilder, Element, SecondaryKind};

/// Planar benzene in the XY plane: ring carbons 0..6 with alternating
/// aromatic bond orders, hydrogens 6..12.
pub(crate) fn benzene() -> Complex {
    let mut b = ComplexBuilder::new("benzene");
    let chain = b.add_chain('A');
    let res = b.add_residue(chain, "BNZ", 1);
    let mut carbons = Vec::new();
    for i in 0..6 {
        let a = i as f32 * std::f32::consts::FRAC_PI_3;
        let dir = Vec3::new(a.cos(), a.sin(), 0.0);
        carbons.push(b.add_atom(res, &format!("C{}", i + 1), Element::C, dir * 1.39));
    }
    for i in 0..6 {
        let a = i as f32 * std::f32::consts::FRAC_PI_3;
        let dir = Vec3::new(a.cos(), a.sin(), 0.0);
        let h = b.add_atom(res, &format!("H{}", i + 1), Element::H, dir * 2.48);
        b.set_het(h, true);
        let _ = b.add_bond(carbons[i], h, 1, BondType::Covalent);
    }
    for i in 0..6 {
        let order = if i % 2 == 0 { 2 } else { 1 };
        let _ = b.add_bond(carbons[i], carbons[(i + 1) % 6], order, BondType::Aromatic);
    }
    b.add_cycle(carbons);
    b.build()
}

/// Three atoms in a bent chain: double bond 0-1, single bond 1-2.
pub(crate) fn allyl() -> Complex {
    let mut b = ComplexBuilder::new("allyl");
    let chain = b.add_chain('A');
    let res = b.add_residue(chain, "ALY", 1);
    let c0 = b.add_atom(res, "C1", Element::C, Vec3::new(0.0, 0.0, 0.0));
    let c1 = b.add_atom(res, "C2", Element::C, Vec3::new(1.34, 0.0, 0.0));
    let c2 = b.add_atom(res, "C3", Element::C, Vec3::new(2.1, 1.2, 0.0));
    let _ = b.add_bond(c0, c1, 2, BondType::Covalent);
    let _ = b.add_bond(c1, c2, 1, BondType::Covalent);
    b.build()
}

/// Ethylene: C=C along X with four hydrogens in the XY plane.
pub(crate) fn ethylene() -> Complex {
    let mut b = ComplexBuilder::new("ethylene");
    let chain = b.add_chain('A');
    let res = b.add_residue(chain, "ETH", 1);
    let c0 = b.add_atom(res, "C1", Element::C, Vec3::new(-0.67, 0.0, 0.0));
    let c1 = b.add_atom(res, "C2", Element::C, Vec3::new(0.67, 0.0, 0.0));
    let _ = b.add_bond(c0, c1, 2, BondType::Covalent);
    for (x, y, c) in [(-1.2, 0.9, c0), (-1.2, -0.9, c0), (1.2, 0.9, c1), (1.2, -0.9, c1)] {
        let h = b.add_atom(res, "H", Element::H, Vec3::new(x, y, 0.0));
        let _ = b.add_bond(c, h, 1, BondType::Covalent);
    }
    b.build()
}

/// A water molecule (O 0, H 1..3) next to an unbonded sodium ion (3).
pub(crate) fn salty_water() -> Complex {
    let mut b = ComplexBuilder::new("salty water");
    let chain = b.add_chain('W');
    let hoh = b.add_residue(chain, "HOH", 1);
    let o = b.add_atom(hoh, "O", Element::O, Vec3::ZERO);
    for x in [-0.76, 0.76] {
        let h = b.add_atom(hoh, "H", Element::H, Vec3::new(x, 0.59, 0.0));
        let _ = b.add_bond(o, h, 1, BondType::Covalent);
    }
    let ion = b.add_residue(chain, "NA", 2);
    let na = b.add_atom(ion, "NA", Element::Na, Vec3::new(3.0, 1.0, 0.5));
    b.set_het(na, true);
    b.build()
}

/// Alanine backbone (N, CA, C, O per residue) of `n` residues in one chain,
/// peptide-bonded, with the first three residues marked as a helix.
pub(crate) fn peptide(n: usize) -> Complex {
    let mut b = ComplexBuilder::new("peptide");
    let chain = b.add_chain('A');
    let mut prev_c = None;
    for i in 0..n {
        let x = i as f32 * 3.8;
        let flip = if i % 2 == 0 { 1.0 } else { -1.0 };
        let res = b.add_residue(chain, "ALA", i as i32 + 1);
        let n_at = b.add_atom(res, "N", Element::N, Vec3::new(x, 0.0, 0.0));
        let ca = b.add_atom(res, "CA", Element::C, Vec3::new(x + 1.2, 0.8 * flip, 0.0));
        let c = b.add_atom(res, "C", Element::C, Vec3::new(x + 2.4, 0.0, 0.0));
        let o = b.add_atom(res, "O", Element::O, Vec3::new(x + 2.4, -1.2 * flip, 0.3));
        let _ = b.add_bond(n_at, ca, 1, BondType::Covalent);
        let _ = b.add_bond(ca, c, 1, BondType::Covalent);
        let _ = b.add_bond(c, o, 2, BondType::Covalent);
        if let Some(pc) = prev_c {
            let _ = b.add_bond(pc, n_at, 1, BondType::Covalent);
        }
        prev_c = Some(c);
    }
    if n >= 3 {
        b.set_secondary(0, 2, SecondaryKind::Helix);
    }
    b.build()
}

/// Single DNA strand of `n` adenosines with phosphate wings and base
/// cylinder atoms.
pub(crate) fn dna(n: usize) -> Complex {
    let mut b = ComplexBuilder::new("dna");
    let chain = b.add_chain('B');
    let mut prev_c3 = None;
    for i in 0..n {
        let z = i as f32 * 3.4;
        let res = b.add_residue(chain, "DA", i as i32 + 1);
        let p = b.add_atom(res, "P", Element::P, Vec3::new(8.0, 0.0, z));
        let op1 = b.add_atom(res, "OP1", Element::O, Vec3::new(9.0, 0.8, z));
        let op2 = b.add_atom(res, "OP2", Element::O, Vec3::new(9.0, -0.8, z));
        let c3 = b.add_atom(res, "C3'", Element::C, Vec3::new(7.0, 1.0, z + 1.0));
        let c1 = b.add_atom(res, "C1'", Element::C, Vec3::new(5.5, 1.0, z + 1.2));
        let n1 = b.add_atom(res, "N1", Element::N, Vec3::new(2.0, 0.5, z + 1.2));
        let _ = b.add_bond(p, op1, 1, BondType::Covalent);
        let _ = b.add_bond(p, op2, 2, BondType::Covalent);
        let _ = b.add_bond(p, c3, 1, BondType::Covalent);
        let _ = b.add_bond(c3, c1, 1, BondType::Covalent);
        let _ = b.add_bond(c1, n1, 1, BondType::Covalent);
        if let Some(prev) = prev_c3 {
            let _ = b.add_bond(prev, p, 1, BondType::Covalent);
        }
        prev_c3 = Some(c3);
    }
    b.build()
}
