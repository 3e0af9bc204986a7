//! Molecular complex: the owning container for atoms, bonds, residues,
//! chains and rings, plus the derived backbone data the ribbon builders
//! consume.

use glam::{Mat4, Vec3};

use super::atom::Atom;
use super::bond::{Bond, BondType};
use super::cycle::Cycle;
use super::element::Element;
use super::residue::{
    Residue, ResidueKind, SecondaryKind, SecondarySpan,
};

const NUCLEIC_CONTROL_NAMES: [&str; 5] = ["C3'", "C3*", "P", "H5T", "H3T"];
const NUCLEIC_WING_START: [&str; 2] = ["OP1", "O1P"];
const NUCLEIC_WING_END: [&str; 2] = ["OP2", "O2P"];
const CYLINDER_SOURCE: [&str; 6] = ["C3'", "C3*", "C1", "C1'", "C1*", "P"];

/// Base atom that ends the nucleotide cylinder, by residue name.
fn cylinder_target(residue_name: &str) -> Option<&'static [&'static str]> {
    match residue_name.trim() {
        "A" | "DA" | "G" | "DG" => Some(&["N1"]),
        "C" | "DC" => Some(&["N3"]),
        "T" | "DT" | "U" | "DU" => Some(&["O4"]),
        _ => None,
    }
}

/// A polymer chain: an ordered list of residue indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Chain identifier.
    pub name: char,
    /// Residue indices in sequence order.
    pub residues: Vec<usize>,
}

/// Inclusive range of residue indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRange {
    /// First residue index.
    pub start: usize,
    /// Last residue index (inclusive).
    pub end: usize,
}

impl SubRange {
    /// Number of residues in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Always false: a range holds at least one residue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A molecular structure.
///
/// Built once through [`ComplexBuilder`]; topology is immutable afterwards.
/// Only per-atom selection masks may change, which also refreshes the
/// residue masks.
#[derive(Debug, Clone)]
pub struct Complex {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
    cycles: Vec<Cycle>,
    subdivs: Vec<SubRange>,
    transforms: Vec<Mat4>,
}

impl Complex {
    /// Structure name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All atoms.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// All residues, with static backbone data.
    #[must_use]
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// All chains.
    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Ring descriptors.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Connected backbone pieces: maximal residue runs where each residue
    /// is bonded to the next one within the same chain.
    #[must_use]
    pub fn subdivs(&self) -> &[SubRange] {
        &self.subdivs
    }

    /// Instancing transforms (biological assembly), empty for identity.
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Set the selection mask of one atom and refresh its residue mask.
    pub fn set_atom_mask(&mut self, atom: usize, mask: u32) {
        self.atoms[atom].mask = mask;
        let res = self.atoms[atom].residue;
        self.residues[res].mask = collect_mask(&self.atoms, &self.residues[res]);
    }

    /// Recompute every atom mask with `f` and refresh all residue masks.
    pub fn set_masks<F>(&mut self, f: F)
    where
        F: Fn(&Atom) -> u32,
    {
        for atom in &mut self.atoms {
            atom.mask = f(atom);
        }
        for i in 0..self.residues.len() {
            self.residues[i].mask = collect_mask(&self.atoms, &self.residues[i]);
        }
    }

    /// Residue backbone data recomputed for arbitrary atom positions.
    ///
    /// Used for trajectory frames; topology (lead/wing atoms, validity of
    /// protein residues) is shared with the static residues.
    #[must_use]
    pub fn derive_residues<F>(&self, pos: F) -> Vec<Residue>
    where
        F: Fn(usize) -> Vec3,
    {
        let mut out = self.residues.clone();
        for chain in &self.chains {
            finalize_chain(&self.atoms, &mut out, &chain.residues, &pos);
        }
        out
    }

    /// Whether two residues of the same chain share a bond.
    #[must_use]
    pub fn residues_connected(&self, a: usize, b: usize) -> bool {
        let (ra, rb) = (&self.residues[a], &self.residues[b]);
        if ra.chain != rb.chain {
            return false;
        }
        if a == b {
            return true;
        }
        ra.atoms.iter().any(|&atom| {
            self.atoms[atom].bonds.iter().any(|&bond| {
                let bond = &self.bonds[bond];
                self.atoms[bond.left].residue == b
                    || self.atoms[bond.right].residue == b
            })
        })
    }
}

fn collect_mask(atoms: &[Atom], residue: &Residue) -> u32 {
    residue
        .atoms
        .iter()
        .fold(u32::MAX, |mask, &a| mask & atoms[a].mask)
}

fn find_atom(atoms: &[Atom], residue: &Residue, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        residue
            .atoms
            .iter()
            .copied()
            .find(|&a| atoms[a].visual_name() == *name)
    })
}

/// Pick lead and wing atoms and the initial validity flag.
fn assign_roles(atoms: &[Atom], residue: &mut Residue) {
    let (lead, wing) = match residue.kind {
        ResidueKind::Protein => (
            find_atom(atoms, residue, &["CA"]),
            find_atom(atoms, residue, &["O"]),
        ),
        ResidueKind::Nucleic => {
            (find_atom(atoms, residue, &NUCLEIC_CONTROL_NAMES), None)
        }
        ResidueKind::Water | ResidueKind::Other => (None, None),
    };
    residue.is_valid = lead.is_some() && wing.is_some();
    residue.lead_atom = lead.or_else(|| residue.first_atom());
    residue.wing_atom = wing.or_else(|| residue.last_atom());
}

/// Ribbon orientation from the previous residue's carbonyl direction,
/// kept on the same side as the previous wing.
pub(crate) fn calc_wing(
    prev_lead: Vec3,
    curr_lead: Vec3,
    prev_wing_pos: Vec3,
    prev_wing: Option<Vec3>,
) -> Vec3 {
    let a = curr_lead - prev_lead;
    let b = a.cross(prev_lead - prev_wing_pos);
    let b = a.cross(b).normalize_or_zero();
    match prev_wing {
        Some(w) if w.dot(b) < 0.0 => -b,
        _ => b,
    }
}

/// Nucleotide control point, wing and base cylinder. Returns whether the
/// wing could be derived.
fn detect_nucleic<F>(
    atoms: &[Atom],
    out: &mut [Residue],
    idx: usize,
    next: Option<usize>,
    pos: &F,
) -> bool
where
    F: Fn(usize) -> Vec3,
{
    let res = &out[idx];
    let lead = find_atom(atoms, res, &NUCLEIC_CONTROL_NAMES);
    let mut wing_start = find_atom(atoms, res, &NUCLEIC_WING_START);
    let mut wing_end = find_atom(atoms, res, &NUCLEIC_WING_END);
    if let Some(next) = next {
        wing_start = wing_start.or_else(|| find_atom(atoms, &out[next], &NUCLEIC_WING_START));
        wing_end = wing_end.or_else(|| find_atom(atoms, &out[next], &NUCLEIC_WING_END));
    }
    let (Some(lead), Some(ws), Some(we)) = (lead, wing_start, wing_end) else {
        out[idx].is_valid = false;
        return false;
    };

    let source = find_atom(atoms, res, &CYLINDER_SOURCE);
    let target = cylinder_target(&res.name).and_then(|names| find_atom(atoms, res, names));
    let cylinders = match (source, target) {
        (Some(s), Some(t)) => Some([pos(s), pos(t)]),
        _ => {
            log::warn!("nucleotide {} {} lacks base cylinder atoms", res.name, res.sequence);
            None
        }
    };

    let dst = &mut out[idx];
    dst.lead_atom = Some(lead);
    dst.control_point = pos(lead);
    dst.wing_vector = pos(we) - pos(ws);
    dst.is_valid = true;
    dst.cylinders = cylinders;
    true
}

fn finalize_chain<F>(atoms: &[Atom], out: &mut [Residue], chain: &[usize], pos: &F)
where
    F: Fn(usize) -> Vec3,
{
    let mut prev: Option<usize> = None;
    let mut prev_wing: Option<Vec3> = None;
    for (k, &idx) in chain.iter().enumerate() {
        let next = chain.get(k + 1).copied();
        let lead_pos = out[idx].lead_atom.map_or(Vec3::ZERO, pos);
        out[idx].control_point = lead_pos;

        let mut wing = None;
        if out[idx].is_nucleic() {
            if detect_nucleic(atoms, out, idx, next, pos) {
                wing = Some(out[idx].wing_vector);
            }
        } else if let Some(p) = prev {
            let prev_wing_pos = out[p].wing_atom.map_or(Vec3::ZERO, pos);
            let w = calc_wing(out[p].control_point, lead_pos, prev_wing_pos, prev_wing);
            out[idx].wing_vector = w;
            wing = Some(w);
        }
        prev = Some(idx);
        prev_wing = wing;
    }

    match chain {
        [first, second, ..] => out[*first].wing_vector = out[*second].wing_vector,
        [only] => out[*only].wing_vector = Vec3::X,
        [] => {}
    }
}

/// Incremental builder for [`Complex`].
///
/// Indices returned by the `add_*` methods are the final indices in the
/// built complex.
#[derive(Debug, Default)]
pub struct ComplexBuilder {
    name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
    cycles: Vec<Vec<usize>>,
    transforms: Vec<Mat4>,
}

impl ComplexBuilder {
    /// Start an empty structure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a chain and return its index.
    pub fn add_chain(&mut self, name: char) -> usize {
        self.chains.push(Chain {
            name,
            residues: Vec::new(),
        });
        self.chains.len() - 1
    }

    /// Append a residue to `chain` and return its index.
    pub fn add_residue(&mut self, chain: usize, name: &str, sequence: i32) -> usize {
        let index = self.residues.len();
        self.residues.push(Residue {
            index,
            name: name.trim().to_owned(),
            kind: ResidueKind::from_name(name),
            sequence,
            icode: ' ',
            chain,
            atoms: Vec::new(),
            mask: 1,
            secondary: None,
            control_point: Vec3::ZERO,
            wing_vector: Vec3::ZERO,
            is_valid: false,
            lead_atom: None,
            wing_atom: None,
            cylinders: None,
        });
        self.chains[chain].residues.push(index);
        index
    }

    /// Append an atom to `residue` and return its index.
    pub fn add_atom(
        &mut self,
        residue: usize,
        name: &str,
        element: Element,
        position: Vec3,
    ) -> usize {
        let index = self.atoms.len();
        self.atoms.push(Atom {
            index,
            serial: i32::try_from(index + 1).unwrap_or(i32::MAX),
            name: name.to_owned(),
            element,
            position,
            residue,
            het: false,
            mask: 1,
            bonds: Vec::new(),
            label: None,
            label_visible: true,
        });
        self.residues[residue].atoms.push(index);
        index
    }

    /// Mark an atom as a HETATM record.
    pub fn set_het(&mut self, atom: usize, het: bool) {
        self.atoms[atom].het = het;
    }

    /// Attach a custom label to an atom.
    pub fn set_label(&mut self, atom: usize, label: impl Into<String>) {
        self.atoms[atom].label = Some(label.into());
    }

    /// Connect two atoms and return the bond index.
    pub fn add_bond(&mut self, a: usize, b: usize, order: u8, kind: BondType) -> usize {
        let index = self.bonds.len();
        self.bonds.push(Bond {
            index,
            left: a.min(b),
            right: a.max(b),
            order,
            kind,
        });
        self.atoms[a].bonds.push(index);
        self.atoms[b].bonds.push(index);
        index
    }

    /// Register a ring (atom indices in ring order).
    pub fn add_cycle(&mut self, atoms: Vec<usize>) {
        self.cycles.push(atoms);
    }

    /// Mark residues `first..=last` as one secondary structure element.
    pub fn set_secondary(&mut self, first: usize, last: usize, kind: SecondaryKind) {
        for idx in first..=last {
            self.residues[idx].secondary = Some(SecondarySpan {
                kind,
                term: idx == last,
            });
        }
    }

    /// Add an instancing transform.
    pub fn add_transform(&mut self, transform: Mat4) {
        self.transforms.push(transform);
    }

    /// Finalize residues and connectivity and produce the complex.
    #[must_use]
    pub fn build(self) -> Complex {
        let Self {
            name,
            atoms,
            bonds,
            mut residues,
            chains,
            cycles,
            transforms,
        } = self;

        for residue in &mut residues {
            assign_roles(&atoms, residue);
            residue.mask = collect_mask(&atoms, residue);
        }
        let pos = |i: usize| atoms[i].position;
        for chain in &chains {
            finalize_chain(&atoms, &mut residues, &chain.residues, &pos);
        }
        let cycles = cycles
            .into_iter()
            .map(|ring| Cycle::new(ring, pos))
            .collect();

        let mut complex = Complex {
            name,
            atoms,
            bonds,
            residues,
            chains,
            cycles,
            subdivs: Vec::new(),
            transforms,
        };
        complex.subdivs = split_connected(&complex);
        log::debug!(
            "built complex {}: {} atoms, {} bonds, {} residues, {} backbone pieces",
            complex.name,
            complex.atoms.len(),
            complex.bonds.len(),
            complex.residues.len(),
            complex.subdivs.len()
        );
        complex
    }
}

fn split_connected(complex: &Complex) -> Vec<SubRange> {
    let count = complex.residues.len();
    let mut out = Vec::new();
    let mut start = 0;
    for i in 0..count {
        let last = i + 1 == count;
        if last || !complex.residues_connected(i, i + 1) {
            out.push(SubRange { start, end: i });
            start = i + 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{benzene, peptide};

    #[test]
    fn residue_mask_is_and_of_atoms() {
        let mut complex = benzene();
        assert_eq!(complex.residues()[0].mask, 1);
        complex.set_atom_mask(0, 0);
        assert_eq!(complex.residues()[0].mask, 0);
        complex.set_masks(|_| 0b11);
        assert_eq!(complex.residues()[0].mask, 0b11);
    }

    #[test]
    fn peptide_is_one_backbone_piece() {
        let complex = peptide(4);
        assert_eq!(complex.subdivs(), &[SubRange { start: 0, end: 3 }]);
        assert!(complex.residues().iter().all(|r| r.is_valid));
        for res in complex.residues() {
            let ca = res.lead_atom.map(|a| complex.atoms()[a].name.clone());
            assert_eq!(ca.as_deref(), Some("CA"));
        }
    }

    #[test]
    fn first_wing_copies_second() {
        let complex = peptide(3);
        let res = complex.residues();
        assert_eq!(res[0].wing_vector, res[1].wing_vector);
        assert!((res[1].wing_vector.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unbonded_residues_split_pieces() {
        let mut b = ComplexBuilder::new("gap");
        let chain = b.add_chain('A');
        for seq in 0..2 {
            let r = b.add_residue(chain, "ALA", seq);
            let _ = b.add_atom(r, "CA", Element::C, Vec3::new(seq as f32 * 10.0, 0.0, 0.0));
        }
        let complex = b.build();
        assert_eq!(complex.subdivs().len(), 2);
        assert!(!complex.residues()[0].is_valid);
    }

    #[test]
    fn wing_keeps_side_of_previous() {
        let prev = Vec3::new(0.0, 1.0, 0.0);
        let w = calc_wing(Vec3::ZERO, Vec3::X, Vec3::new(0.0, -1.0, 0.0), Some(prev));
        assert!(w.dot(prev) >= 0.0);
        let flipped = calc_wing(Vec3::ZERO, Vec3::X, Vec3::new(0.0, -1.0, 0.0), Some(-prev));
        assert!(flipped.dot(-prev) >= 0.0);
    }

    #[test]
    fn frame_residues_follow_positions() {
        let complex = peptide(3);
        let shift = Vec3::new(5.0, 0.0, 0.0);
        let moved = complex.derive_residues(|i| complex.atoms()[i].position + shift);
        for (a, b) in complex.residues().iter().zip(&moved) {
            assert!((b.control_point - a.control_point - shift).length() < 1e-5);
        }
    }
}
