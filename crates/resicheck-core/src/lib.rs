//! # RESICHECK Core Library
//!
//! A library for checking the structural completeness of macromolecular coordinate files:
//! it parses PDB, PDBQT and PDBx/mmCIF data and reports, for every standard residue, which
//! atoms of its canonical template are absent.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same layered structure throughout, so that each layer can be
//! tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Model`, `Chain`,
//!   `Residue`, `Atom`), the format readers, and the residue template catalog.
//!
//! - **[`engine`]: The Logic Core.** The completeness analyzer, its configuration, and the
//!   records and faults it produces.
//!
//! - **[`workflows`]: The Public API.** Parse-then-analyze pipelines for single inputs and
//!   parallel batches.
//!
//! - **[`report`]: The Wire Format.** Serialization of findings and parse errors for callers,
//!   as JSON or CSV.

pub mod core;
pub mod engine;
pub mod report;
pub mod workflows;
