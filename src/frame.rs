//! Trajectory frame data consumed by `update_to_frame`.

use glam::Vec3;

use crate::chem::{Atom, Complex, Cycle, Residue, SecondarySpan};
use crate::colorer::Colorer;
use crate::error::RepError;

/// Per-frame atom positions and derived residue data.
pub trait FrameData {
    /// Position of atom `index` in this frame.
    fn atom_pos(&self, index: usize) -> Vec3;

    /// Color of `atom` in this frame (through its frame residue).
    fn atom_color(&self, colorer: &dyn Colorer, atom: &Atom) -> u32;

    /// Residues recomputed for this frame, indexed like the complex's.
    fn residues(&self) -> &[Residue];

    /// Whether geometry colors must be rewritten for this frame.
    fn needs_color_update(&self, colorer: &dyn Colorer) -> bool {
        colorer.depends_on_frame()
    }

    /// Ring descriptor re-measured at this frame's positions.
    fn cycle(&self, cycle: &Cycle) -> Cycle {
        Cycle::new(cycle.atoms.clone(), |i| self.atom_pos(i))
    }
}

/// One trajectory frame over a complex.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    complex: &'a Complex,
    positions: Vec<Vec3>,
    residues: Vec<Residue>,
}

impl<'a> Frame<'a> {
    /// Create a frame from one position per atom.
    pub fn new(complex: &'a Complex, positions: Vec<Vec3>) -> Result<Self, RepError> {
        if positions.len() != complex.atoms().len() {
            return Err(RepError::InvalidParameter(format!(
                "frame has {} positions for {} atoms",
                positions.len(),
                complex.atoms().len()
            )));
        }
        let residues = complex.derive_residues(|i| positions[i]);
        Ok(Self {
            complex,
            positions,
            residues,
        })
    }

    /// Override per-residue secondary structure for this frame.
    pub fn with_secondary(mut self, secondary: &[Option<SecondarySpan>]) -> Self {
        for (res, sec) in self.residues.iter_mut().zip(secondary) {
            res.secondary = *sec;
        }
        self
    }

    /// The complex this frame animates.
    #[must_use]
    pub fn complex(&self) -> &'a Complex {
        self.complex
    }
}

impl FrameData for Frame<'_> {
    fn atom_pos(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    fn atom_color(&self, colorer: &dyn Colorer, atom: &Atom) -> u32 {
        if colorer.depends_on_frame() {
            colorer.residue_color(&self.residues[atom.residue], self.complex)
        } else {
            colorer.atom_color(atom, self.complex)
        }
    }

    fn residues(&self) -> &[Residue] {
        &self.residues
    }
}
