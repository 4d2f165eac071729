//! Provides input functionality for macromolecular structure file formats.
//!
//! This module turns raw bytes in one of the supported formats (PDB, PDBQT, PDBx/mmCIF)
//! into the [`Structure`] hierarchy. Format selection happens exactly once per call,
//! either from the caller's declaration or by sniffing the content, and every reader
//! shares the [`StructureReader`] interface.

pub mod error;
pub mod format;
pub mod mmcif;
pub mod pdb;
pub mod traits;

use crate::core::models::structure::Structure;
use error::ParseError;
use format::StructureFormat;
use mmcif::MmcifFile;
use pdb::{PdbFile, PdbqtFile};
use tracing::debug;
use traits::{ParseOptions, StructureReader};

/// Parses raw structure bytes with the default [`ParseOptions`].
///
/// `declared_format` is one of `pdb`, `ent`, `pdbqt`, `cif`, `mmcif`, `pdbx`,
/// `pdbx/mmcif` or `auto`.
///
/// # Errors
///
/// Returns [`ParseError::UnsupportedFormat`] for any other declared format, and
/// [`ParseError::Malformed`] or [`ParseError::Truncated`] when the content is invalid.
pub fn parse(data: &[u8], declared_format: &str) -> Result<Structure, ParseError> {
    parse_with_options(data, declared_format, &ParseOptions::default())
}

/// Parses raw structure bytes with explicit [`ParseOptions`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options(
    data: &[u8],
    declared_format: &str,
    options: &ParseOptions,
) -> Result<Structure, ParseError> {
    let format = StructureFormat::resolve(declared_format, data)?;
    debug!(declared = declared_format, resolved = %format, "Selected structure reader.");
    read_as(data, format, options)
}

/// Parses raw bytes with an already resolved format.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] or [`ParseError::Truncated`] when the content is
/// invalid for `format`.
pub fn read_as(
    data: &[u8],
    format: StructureFormat,
    options: &ParseOptions,
) -> Result<Structure, ParseError> {
    match format {
        StructureFormat::Pdb => PdbFile::read_bytes(data, options),
        StructureFormat::Pdbqt => PdbqtFile::read_bytes(data, options),
        StructureFormat::Mmcif => MmcifFile::read_bytes(data, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDB: &[u8] = b"ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N\n\
ATOM      2  CA  GLY A   1       1.458   0.000   0.000  1.00  0.00           C\n\
END\n";

    const CIF: &[u8] = b"data_T\nloop_\n_atom_site.group_PDB\n_atom_site.label_atom_id\n\
_atom_site.label_comp_id\n_atom_site.label_asym_id\n_atom_site.label_seq_id\n\
_atom_site.Cartn_x\n_atom_site.Cartn_y\n_atom_site.Cartn_z\n\
ATOM N GLY A 1 0.0 0.0 0.0\nATOM CA GLY A 1 1.458 0.0 0.0\n";

    #[test]
    fn parse_dispatches_on_declared_format() {
        let from_pdb = parse(PDB, "pdb").unwrap();
        let from_cif = parse(CIF, "mmcif").unwrap();
        assert_eq!(from_pdb.atom_count(), 2);
        assert_eq!(from_cif.atom_count(), 2);
    }

    #[test]
    fn parse_auto_detects_format() {
        assert_eq!(parse(PDB, "auto").unwrap().atom_count(), 2);
        assert_eq!(parse(CIF, "auto").unwrap().atom_count(), 2);
    }

    #[test]
    fn parse_rejects_formats_without_residue_hierarchy() {
        for declared in ["xyz", "psf", "mol2"] {
            let err = parse(PDB, declared).unwrap_err();
            assert_eq!(err.code(), ParseError::UNSUPPORTED_FORMAT, "{declared}");
        }
    }

    #[test]
    fn parse_reports_invalid_utf8_as_malformed() {
        let err = parse(b"ATOM \xC3\x28\n", "pdb").unwrap_err();
        assert_eq!(err.code(), ParseError::MALFORMED);
    }

    #[test]
    fn parse_is_deterministic() {
        let a = parse(PDB, "pdb").unwrap();
        let b = parse(PDB, "pdb").unwrap();
        assert_eq!(a, b);
    }
}
