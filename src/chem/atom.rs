use glam::Vec3;

use super::element::Element;

/// A single atom of a [`Complex`](super::Complex).
///
/// Atoms are owned by the complex and addressed by `index` everywhere else
/// (selections, bonds, residues, chunk maps).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Position of this atom in the complex's atom array.
    pub index: usize,
    /// Serial number from the source file.
    pub serial: i32,
    /// Atom name (e.g. `CA`, `C3'`).
    pub name: String,
    /// Chemical element.
    pub element: Element,
    /// Static (model) position.
    pub position: Vec3,
    /// Index of the owning residue.
    pub residue: usize,
    /// Whether the atom came from a HETATM record.
    pub het: bool,
    /// Selection bitmask used by subset queries.
    pub mask: u32,
    /// Indices of bonds touching this atom.
    pub bonds: Vec<usize>,
    /// Cached label text attached to this atom, if any.
    pub label: Option<String>,
    /// Whether the default (name-based) label is shown.
    pub label_visible: bool,
}

impl Atom {
    /// Name used for display: the atom name with surrounding blanks
    /// stripped.
    #[must_use]
    pub fn visual_name(&self) -> &str {
        self.name.trim()
    }

    /// Whether this atom terminates a chain of bonds (exactly one bond).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.bonds.len() == 1
    }
}
