//! Colorers map chemical entities to packed `0xRRGGBB` colors.

use crate::chem::{Atom, Complex, Element, Residue, SecondaryKind};

/// Per-entity color source used while building and updating groups.
///
/// Implementations are read-only; groups receive them per call and never
/// keep them.
pub trait Colorer: std::fmt::Debug {
    /// Color of one atom.
    fn atom_color(&self, atom: &Atom, complex: &Complex) -> u32;

    /// Color of one residue.
    fn residue_color(&self, residue: &Residue, complex: &Complex) -> u32;

    /// Whether colors depend on per-frame data (secondary structure), so
    /// trajectory frames must recolor geometry.
    fn depends_on_frame(&self) -> bool {
        false
    }
}

/// CPK coloring by chemical element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementColorer;

impl Colorer for ElementColorer {
    fn atom_color(&self, atom: &Atom, _complex: &Complex) -> u32 {
        atom.element.cpk_color()
    }

    fn residue_color(&self, residue: &Residue, complex: &Complex) -> u32 {
        residue
            .lead_atom
            .map_or(Element::C, |a| complex.atoms()[a].element)
            .cpk_color()
    }
}

/// A single color for everything.
#[derive(Debug, Clone, Copy)]
pub struct UniformColorer {
    /// Packed color.
    pub color: u32,
}

impl Default for UniformColorer {
    fn default() -> Self {
        Self { color: 0xFF_FF_FF }
    }
}

impl Colorer for UniformColorer {
    fn atom_color(&self, _atom: &Atom, _complex: &Complex) -> u32 {
        self.color
    }

    fn residue_color(&self, _residue: &Residue, _complex: &Complex) -> u32 {
        self.color
    }
}

/// RasMol-style amino acid and nucleotide palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidueTypeColorer;

impl ResidueTypeColorer {
    fn by_name(name: &str) -> u32 {
        match name {
            "ASP" | "GLU" => 0xE6_0A_0A,
            "CYS" | "MET" => 0xE6_E6_00,
            "LYS" | "ARG" => 0x14_5A_FF,
            "SER" | "THR" => 0xFA_96_00,
            "PHE" | "TYR" => 0x32_32_AA,
            "ASN" | "GLN" => 0x00_DC_DC,
            "GLY" => 0xEB_EB_EB,
            "LEU" | "VAL" | "ILE" => 0x0F_82_0F,
            "ALA" => 0xC8_C8_C8,
            "TRP" => 0xB4_5A_B4,
            "HIS" => 0x82_82_D2,
            "PRO" => 0xDC_96_82,
            "A" | "DA" => 0xA0_A0_FF,
            "C" | "DC" => 0xFF_8C_4B,
            "G" | "DG" => 0xFF_70_70,
            "T" | "DT" => 0xA0_FF_A0,
            "U" | "DU" => 0xFF_80_80,
            _ => 0xBE_A0_6E,
        }
    }
}

impl Colorer for ResidueTypeColorer {
    fn atom_color(&self, atom: &Atom, complex: &Complex) -> u32 {
        self.residue_color(&complex.residues()[atom.residue], complex)
    }

    fn residue_color(&self, residue: &Residue, _complex: &Complex) -> u32 {
        Self::by_name(&residue.name)
    }
}

/// Colors by secondary structure; follows per-frame secondary data.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryStructureColorer {
    /// Helix color.
    pub helix: u32,
    /// Strand color.
    pub strand: u32,
    /// Coil (no secondary structure) color.
    pub coil: u32,
}

impl Default for SecondaryStructureColorer {
    fn default() -> Self {
        Self {
            helix: 0xFF_00_80,
            strand: 0xFF_C8_00,
            coil: 0xFF_FF_FF,
        }
    }
}

impl Colorer for SecondaryStructureColorer {
    fn atom_color(&self, atom: &Atom, complex: &Complex) -> u32 {
        self.residue_color(&complex.residues()[atom.residue], complex)
    }

    fn residue_color(&self, residue: &Residue, _complex: &Complex) -> u32 {
        match residue.secondary.map(|s| s.kind) {
            Some(SecondaryKind::Helix) => self.helix,
            Some(SecondaryKind::Strand) => self.strand,
            None => self.coil,
        }
    }

    fn depends_on_frame(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::peptide;

    #[test]
    fn element_colorer_uses_cpk() {
        let complex = peptide(1);
        let n = &complex.atoms()[0];
        assert_eq!(ElementColorer.atom_color(n, &complex), Element::N.cpk_color());
        let res = &complex.residues()[0];
        assert_eq!(ElementColorer.residue_color(res, &complex), Element::C.cpk_color());
    }

    #[test]
    fn residue_type_colors_atoms_by_residue() {
        let complex = peptide(1);
        let atom = &complex.atoms()[2];
        assert_eq!(ResidueTypeColorer.atom_color(atom, &complex), 0xC8_C8_C8);
    }

    #[test]
    fn only_secondary_colorer_tracks_frames() {
        assert!(SecondaryStructureColorer::default().depends_on_frame());
        assert!(!ElementColorer.depends_on_frame());
        let complex = peptide(4);
        let ss = SecondaryStructureColorer::default();
        assert_eq!(ss.residue_color(&complex.residues()[0], &complex), ss.helix);
        assert_eq!(ss.residue_color(&complex.residues()[3], &complex), ss.coil);
    }
}
