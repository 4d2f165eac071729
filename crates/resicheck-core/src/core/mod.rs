//! # Core Module
//!
//! This module provides the building blocks shared by every completeness check: the
//! structure model, the format readers and the residue template catalog.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Structure, models, chains, residues and atoms
//! - **File Input** ([`io`]) - Format selection and the PDB, PDBQT and mmCIF readers
//! - **Structural Knowledge** ([`topology`]) - Residue classification and expected-atom templates
//! - **Identifiers** ([`utils`]) - Atom and residue name normalization

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
