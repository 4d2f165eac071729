//! # Core Models Module
//!
//! This module contains the data structures that represent a parsed macromolecular
//! structure: the strict ownership hierarchy `Structure -> Model -> Chain -> Residue -> Atom`.
//!
//! ## Overview
//!
//! Every level owns the level below it in source order, and nothing refers back up the
//! tree. Readers never assemble the hierarchy by hand; they feed atom records into the
//! [`builder::StructureBuilder`], which opens models, chains and residues on demand and
//! resolves alternate locations.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with its normalized name, element and coordinates
//! - [`residue`] - Residue identity (number plus insertion code), name and classification
//! - [`chain`] - Ordered residues sharing one chain identifier
//! - [`structure`] - Models and the complete structure
//! - [`builder`] - Incremental construction and alternate-location policy

pub mod atom;
pub mod builder;
pub mod chain;
pub mod residue;
pub mod structure;
