//! Compile-time residue templates backing the built-in catalog.
//!
//! Atom names follow the wwPDB (version 3) chemical component dictionary. Terminal-only
//! atoms (`OXT`, `H1`-`H3`, 5' `OP3`) and titratable hydrogens whose presence depends on
//! the protonation state (`HD1`/`HE2` of histidine, `HD2` of aspartate, `HE2` of glutamate)
//! are not part of any template.

use super::classification::PolymerType;
use phf::{Map, phf_map};

pub(crate) struct StaticTemplate {
    pub(crate) polymer: PolymerType,
    pub(crate) heavy_atoms: &'static [&'static str],
    pub(crate) hydrogens: &'static [&'static str],
}

const PROTEIN: PolymerType = PolymerType::Protein;
const NUCLEIC: PolymerType = PolymerType::NucleicAcid;

pub(crate) static STANDARD_TEMPLATES: Map<&'static str, StaticTemplate> = phf_map! {
    // --- Amino acids ---
    "ALA" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB"],
        hydrogens: &["H", "HA", "HB1", "HB2", "HB3"],
    },
    "ARG" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD", "NE", "CZ", "NH1", "NH2"],
        hydrogens: &[
            "H", "HA", "HB2", "HB3", "HG2", "HG3", "HD2", "HD3", "HE", "HH11", "HH12", "HH21",
            "HH22",
        ],
    },
    "ASN" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "OD1", "ND2"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HD21", "HD22"],
    },
    "ASP" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "OD1", "OD2"],
        hydrogens: &["H", "HA", "HB2", "HB3"],
    },
    "CYS" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "SG"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HG"],
    },
    "GLN" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD", "OE1", "NE2"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HG2", "HG3", "HE21", "HE22"],
    },
    "GLU" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD", "OE1", "OE2"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HG2", "HG3"],
    },
    "GLY" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O"],
        hydrogens: &["H", "HA2", "HA3"],
    },
    "HIS" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "ND1", "CD2", "CE1", "NE2"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HD2", "HE1"],
    },
    "ILE" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG1", "CG2", "CD1"],
        hydrogens: &[
            "H", "HA", "HB", "HG12", "HG13", "HG21", "HG22", "HG23", "HD11", "HD12", "HD13",
        ],
    },
    "LEU" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD1", "CD2"],
        hydrogens: &[
            "H", "HA", "HB2", "HB3", "HG", "HD11", "HD12", "HD13", "HD21", "HD22", "HD23",
        ],
    },
    "LYS" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD", "CE", "NZ"],
        hydrogens: &[
            "H", "HA", "HB2", "HB3", "HG2", "HG3", "HD2", "HD3", "HE2", "HE3", "HZ1", "HZ2",
            "HZ3",
        ],
    },
    "MET" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "SD", "CE"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HG2", "HG3", "HE1", "HE2", "HE3"],
    },
    "PHE" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HD1", "HD2", "HE1", "HE2", "HZ"],
    },
    "PRO" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD"],
        hydrogens: &["HA", "HB2", "HB3", "HG2", "HG3", "HD2", "HD3"],
    },
    "SER" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "OG"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HG"],
    },
    "THR" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "OG1", "CG2"],
        hydrogens: &["H", "HA", "HB", "HG1", "HG21", "HG22", "HG23"],
    },
    "TRP" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &[
            "N", "CA", "C", "O", "CB", "CG", "CD1", "CD2", "NE1", "CE2", "CE3", "CZ2", "CZ3",
            "CH2",
        ],
        hydrogens: &["H", "HA", "HB2", "HB3", "HD1", "HE1", "HE3", "HZ2", "HZ3", "HH2"],
    },
    "TYR" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ", "OH"],
        hydrogens: &["H", "HA", "HB2", "HB3", "HD1", "HD2", "HE1", "HE2", "HH"],
    },
    "VAL" => StaticTemplate {
        polymer: PROTEIN,
        heavy_atoms: &["N", "CA", "C", "O", "CB", "CG1", "CG2"],
        hydrogens: &[
            "H", "HA", "HB", "HG11", "HG12", "HG13", "HG21", "HG22", "HG23",
        ],
    },

    // --- Ribonucleotides ---
    "A" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "O2'", "C1'",
            "N9", "C8", "N7", "C5", "C6", "N6", "N1", "C2", "N3", "C4",
        ],
        hydrogens: &[],
    },
    "C" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "O2'", "C1'",
            "N1", "C2", "O2", "N3", "C4", "N4", "C5", "C6",
        ],
        hydrogens: &[],
    },
    "G" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "O2'", "C1'",
            "N9", "C8", "N7", "C5", "C6", "O6", "N1", "C2", "N2", "N3", "C4",
        ],
        hydrogens: &[],
    },
    "U" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "O2'", "C1'",
            "N1", "C2", "O2", "N3", "C4", "O4", "C5", "C6",
        ],
        hydrogens: &[],
    },

    // --- Deoxyribonucleotides ---
    "DA" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "C1'", "N9",
            "C8", "N7", "C5", "C6", "N6", "N1", "C2", "N3", "C4",
        ],
        hydrogens: &[],
    },
    "DC" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "C1'", "N1",
            "C2", "O2", "N3", "C4", "N4", "C5", "C6",
        ],
        hydrogens: &[],
    },
    "DG" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "C1'", "N9",
            "C8", "N7", "C5", "C6", "O6", "N1", "C2", "N2", "N3", "C4",
        ],
        hydrogens: &[],
    },
    "DT" => StaticTemplate {
        polymer: NUCLEIC,
        heavy_atoms: &[
            "P", "OP1", "OP2", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'", "C2'", "C1'", "N1",
            "C2", "O2", "N3", "C4", "O4", "C5", "C7", "C6",
        ],
        hydrogens: &[],
    },
};
