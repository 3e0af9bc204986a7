//! Masked selections over a complex.
//!
//! A selection is the input of one representation group: the list of
//! entity indices that become geometry chunks, plus the backbone run and
//! ring metadata the residue and aromatic groups need. The constructors
//! here are the processors that turn `(complex, mask)` into a selection.

use crate::chem::{Atom, Bond, Complex, Cycle, Residue, SubRange};

/// Backbone runs inside one connected piece of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDiv {
    /// The connected piece; splines may look at neighbours inside it.
    pub boundaries: SubRange,
    /// Maximal runs of selected, valid residues.
    pub arr: Vec<SubRange>,
}

/// A subset of one complex's entities, in chunk order.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    /// Owning structure, used for entity and color lookups.
    pub complex: &'a Complex,
    /// Entity indices (atoms, bonds or residues, depending on the group).
    pub chunks: Vec<usize>,
    /// Backbone runs (residue groups only).
    pub subdivs: Vec<SubDiv>,
    /// Indices into [`Complex::cycles`] (aromatic groups only).
    pub cycles: Vec<usize>,
}

impl<'a> Selection<'a> {
    fn new(complex: &'a Complex, chunks: Vec<usize>) -> Self {
        Self {
            complex,
            chunks,
            subdivs: Vec::new(),
            cycles: Vec::new(),
        }
    }

    /// Atoms with any bit of `mask` set.
    #[must_use]
    pub fn atoms(complex: &'a Complex, mask: u32) -> Self {
        let chunks = complex
            .atoms()
            .iter()
            .filter(|a| a.mask & mask != 0)
            .map(|a| a.index)
            .collect();
        Self::new(complex, chunks)
    }

    /// Atoms with any bit of `mask` set that have no bonds at all.
    #[must_use]
    pub fn orphan_atoms(complex: &'a Complex, mask: u32) -> Self {
        let chunks = complex
            .atoms()
            .iter()
            .filter(|a| a.mask & mask != 0 && a.bonds.is_empty())
            .map(|a| a.index)
            .collect();
        Self::new(complex, chunks)
    }

    /// Bonds whose two atoms are both selected by `mask`.
    #[must_use]
    pub fn bonds(complex: &'a Complex, mask: u32) -> Self {
        let atoms = complex.atoms();
        let chunks = complex
            .bonds()
            .iter()
            .filter(|b| atoms[b.left].mask & mask != 0 && atoms[b.right].mask & mask != 0)
            .map(|b| b.index)
            .collect();
        Self::new(complex, chunks)
    }

    /// Selected, valid residues grouped into backbone runs.
    ///
    /// A run breaks at every residue that is unselected or lacks a control
    /// point; runs never cross a connected-piece boundary.
    #[must_use]
    pub fn subseqs(complex: &'a Complex, mask: u32) -> Self {
        let residues = complex.residues();
        let mut chunks = Vec::new();
        let mut subdivs = Vec::new();
        for &boundaries in complex.subdivs() {
            let mut arr = Vec::new();
            let mut start = None;
            for idx in boundaries.start..=boundaries.end {
                let res = &residues[idx];
                if res.mask & mask != 0 && res.is_valid {
                    let _ = start.get_or_insert(idx);
                } else if let Some(s) = start.take() {
                    arr.push(SubRange { start: s, end: idx - 1 });
                }
            }
            if let Some(s) = start {
                arr.push(SubRange { start: s, end: boundaries.end });
            }
            if arr.is_empty() {
                continue;
            }
            chunks.extend(arr.iter().flat_map(|r| r.start..=r.end));
            subdivs.push(SubDiv { boundaries, arr });
        }
        Self {
            subdivs,
            ..Self::new(complex, chunks)
        }
    }

    /// Ring atoms selected by `mask`, with the rings that own them.
    ///
    /// Empty when aromatic loops are switched off.
    #[must_use]
    pub fn aromatic(complex: &'a Complex, mask: u32, show_loops: bool) -> Self {
        let mut sel = Self::new(complex, Vec::new());
        if !show_loops {
            return sel;
        }
        let atoms = complex.atoms();
        for (ci, cycle) in complex.cycles().iter().enumerate() {
            let before = sel.chunks.len();
            sel.chunks
                .extend(cycle.atoms.iter().copied().filter(|&a| atoms[a].mask & mask != 0));
            if sel.chunks.len() > before {
                sel.cycles.push(ci);
            }
        }
        sel
    }

    /// Selected nucleotides that carry a base cylinder.
    #[must_use]
    pub fn nucleic(complex: &'a Complex, mask: u32) -> Self {
        let chunks = complex
            .residues()
            .iter()
            .filter(|r| r.mask & mask != 0 && r.cylinders.is_some())
            .map(|r| r.index)
            .collect();
        Self::new(complex, chunks)
    }

    /// Whether no chunk was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Backing atom array.
    #[must_use]
    pub fn atom_array(&self) -> &'a [Atom] {
        self.complex.atoms()
    }

    /// Backing bond array.
    #[must_use]
    pub fn bond_array(&self) -> &'a [Bond] {
        self.complex.bonds()
    }

    /// Backing residue array.
    #[must_use]
    pub fn residue_array(&self) -> &'a [Residue] {
        self.complex.residues()
    }

    /// Selected rings.
    pub fn cycle_iter(&self) -> impl Iterator<Item = &'a Cycle> + '_ {
        let cycles = self.complex.cycles();
        self.cycles.iter().map(move |&i| &cycles[i])
    }
}
