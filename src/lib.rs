// Crate-wide lint policy. Cast and float-comparison allowances live in
// Cargo.toml next to the group levels.
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Library code propagates errors instead of panicking.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
#![deny(clippy::wildcard_imports)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::str_to_string)]
#![deny(unused_results)]
#![deny(unused_qualifications)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test fixtures unwrap freely.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Representation geometry engine for molecular structures.
//!
//! Molrep turns a masked part of a chemical structure into chunked CPU
//! geometry under a representation mode (balls and sticks, cartoon, trace,
//! labels, surface, ...). Every geometry chunk maps back to the atom or
//! residue it was built from, so the same indices drive picking, subset
//! masking and in-place trajectory frame updates.
//!
//! # Key entry points
//!
//! - [`representation::Representation`] - all groups of one mode over one
//!   selection
//! - [`groups::GroupKind`] - build a single group variant
//! - [`chem::ComplexBuilder`] - assemble a structure and derive residue
//!   backbone data
//! - [`options::Options`] - mode tunables with TOML presets
//!
//! # Architecture
//!
//! A [`selection::Selection`] picks entities from a [`chem::Complex`]. A
//! group reads radii from a [`mode::Mode`] and colors from a
//! [`colorer::Colorer`], writes one chunk per entity (or bond order, or
//! half residue) into a [`geometry::Geometry`], and instances it through
//! [`groups::TransformGroup`]. Frames implementing [`frame::FrameData`]
//! rewrite positions and colors without touching the chunk layout.

pub mod chem;
pub mod color;
pub mod colorer;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod groups;
pub mod math;
pub mod mode;
pub mod options;
pub mod representation;
pub mod selection;

#[cfg(test)]
mod test_fixtures;
