//! Chemical structure model consumed by the representation groups.
//!
//! The structure is plain indexed data: every cross reference (atom to
//! residue, bond to atom, residue to chain) is an index into the owning
//! [`Complex`]'s arrays, which is also the index space selections and chunk
//! maps use.

mod atom;
mod bond;
mod complex;
mod cycle;
mod element;
mod residue;

pub use atom::Atom;
pub use bond::{Bond, BondType};
pub use complex::{Chain, Complex, ComplexBuilder, SubRange};
pub use cycle::Cycle;
pub use element::Element;
pub use residue::{
    Residue, ResidueKind, SecondaryKind, SecondarySpan,
};
