use crate::core::models::residue::ResidueKind;
use phf::{Set, phf_set};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The polymer family a standard residue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolymerType {
    Protein,
    NucleicAcid,
}

#[derive(Debug, Error)]
#[error("Invalid polymer type string")]
pub struct ParsePolymerTypeError;

impl FromStr for PolymerType {
    type Err = ParsePolymerTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protein" | "amino-acid" => Ok(PolymerType::Protein),
            "nucleic-acid" | "nucleic" | "dna" | "rna" => Ok(PolymerType::NucleicAcid),
            _ => Err(ParsePolymerTypeError),
        }
    }
}

impl fmt::Display for PolymerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PolymerType::Protein => "protein",
                PolymerType::NucleicAcid => "nucleic-acid",
            }
        )
    }
}

pub(crate) static STANDARD_AMINO_ACIDS: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
};

pub(crate) static STANDARD_NUCLEOTIDES: Set<&'static str> = phf_set! {
    "A", "C", "G", "U", "DA", "DC", "DG", "DT",
};

static SOLVENT_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "DOD", "H2O", "SOL", "TIP", "TIP3", "TP3", "SPC",
};

/// Returns the polymer family of a standard residue name, or `None` for anything else.
///
/// The name must already be normalized (see
/// [`normalize_residue_name`](crate::core::utils::identifiers::normalize_residue_name)).
pub fn standard_polymer(name: &str) -> Option<PolymerType> {
    if STANDARD_AMINO_ACIDS.contains(name) {
        Some(PolymerType::Protein)
    } else if STANDARD_NUCLEOTIDES.contains(name) {
        Some(PolymerType::NucleicAcid)
    } else {
        None
    }
}

pub fn is_standard_amino_acid(name: &str) -> bool {
    STANDARD_AMINO_ACIDS.contains(name)
}

pub fn is_solvent(name: &str) -> bool {
    SOLVENT_NAMES.contains(name)
}

/// Classifies a residue from its name and record type alone.
///
/// Observed atom content never takes part in the decision.
pub fn classify_residue(name: &str, is_hetero: bool) -> ResidueKind {
    if standard_polymer(name).is_some() {
        ResidueKind::Standard
    } else if is_solvent(name) {
        ResidueKind::Solvent
    } else if is_hetero {
        ResidueKind::Hetero
    } else {
        ResidueKind::NonStandard
    }
}
