//! # Topology Module
//!
//! This module holds the structural knowledge the completeness engine compares
//! parsed residues against: the residue template catalog and the fixed
//! classification of residue names.
//!
//! ## Overview
//!
//! - **Residue templates** - Canonical heavy-atom and hydrogen names for every standard residue
//! - **Template catalog** - Immutable lookup from residue name to template, built in or loaded from TOML
//! - **Residue classification** - Explicit enumeration of standard, solvent, and hetero residue names
//!
//! ## Key Components
//!
//! - [`registry`] - The [`ResidueCatalog`](registry::ResidueCatalog) and its TOML loader
//! - [`classification`] - Standard-residue predicates shared by the builder and the analyzer
//!
//! ## Usage
//!
//! ```ignore
//! use resicheck::core::topology::registry::ResidueCatalog;
//!
//! let catalog = ResidueCatalog::standard();
//! let gly = catalog.lookup("GLY").unwrap();
//! assert_eq!(gly.heavy_atoms(), &["N", "CA", "C", "O"]);
//! ```

pub mod classification;
pub mod registry;
mod templates;
