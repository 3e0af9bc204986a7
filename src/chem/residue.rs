use glam::Vec3;

/// Broad residue classification used by the backbone builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResidueKind {
    /// Amino acid.
    Protein,
    /// Nucleotide.
    Nucleic,
    /// Water molecule.
    Water,
    /// Ligands, ions and anything else.
    #[default]
    Other,
}

impl ResidueKind {
    /// Classify a residue by its three-letter (or shorter) name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "ALA" | "ARG" | "ASN" | "ASP" | "CYS" | "GLN" | "GLU" | "GLY"
            | "HIS" | "ILE" | "LEU" | "LYS" | "MET" | "PHE" | "PRO" | "SER"
            | "THR" | "TRP" | "TYR" | "VAL" | "SEC" | "PYL" | "MSE" => {
                Self::Protein
            }
            "A" | "C" | "G" | "T" | "U" | "DA" | "DC" | "DG" | "DT" | "DU" => {
                Self::Nucleic
            }
            "HOH" | "WAT" => Self::Water,
            _ => Self::Other,
        }
    }
}

/// Secondary structure class of a residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryKind {
    /// Any helix.
    Helix,
    /// Beta strand.
    Strand,
}

/// Secondary structure membership of one residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondarySpan {
    /// Structure class.
    pub kind: SecondaryKind,
    /// Whether this residue is the terminal residue of its element (arrow
    /// head for strands).
    pub term: bool,
}

/// A residue (monomer) of a [`Complex`](super::Complex).
///
/// `control_point`, `wing_vector`, `is_valid` and `cylinders` are derived
/// from atom positions when the complex is finalized, and again for every
/// trajectory frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Position of this residue in the complex's residue array.
    pub index: usize,
    /// Residue type name (e.g. `ALA`, `DG`).
    pub name: String,
    /// Residue type classification.
    pub kind: ResidueKind,
    /// Sequence number.
    pub sequence: i32,
    /// Insertion code.
    pub icode: char,
    /// Index of the owning chain.
    pub chain: usize,
    /// Member atom indices in file order.
    pub atoms: Vec<usize>,
    /// AND of all member atom masks.
    pub mask: u32,
    /// Secondary structure membership, if any.
    pub secondary: Option<SecondarySpan>,
    /// Backbone spline control point.
    pub control_point: Vec3,
    /// Ribbon orientation vector.
    pub wing_vector: Vec3,
    /// Whether the control point could be derived.
    pub is_valid: bool,
    /// Lead atom (`CA` for amino acids, `C3'`/`P` for nucleotides).
    pub lead_atom: Option<usize>,
    /// Wing atom (`O` for amino acids).
    pub wing_atom: Option<usize>,
    /// Base cylinder `[source, target]` for nucleotides.
    pub cylinders: Option<[Vec3; 2]>,
}

impl Residue {
    /// First member atom.
    #[must_use]
    pub fn first_atom(&self) -> Option<usize> {
        self.atoms.first().copied()
    }

    /// Last member atom.
    #[must_use]
    pub fn last_atom(&self) -> Option<usize> {
        self.atoms.last().copied()
    }

    /// Whether this residue is a nucleotide.
    #[must_use]
    pub fn is_nucleic(&self) -> bool {
        self.kind == ResidueKind::Nucleic
    }

    /// Whether this residue is a water molecule.
    #[must_use]
    pub fn is_water(&self) -> bool {
        self.kind == ResidueKind::Water
    }
}
