use super::error::ParseError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Declared name that asks the engine to detect the format from the content.
pub const AUTO_FORMAT: &str = "auto";

/// Structure file formats the engine can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureFormat {
    /// Fixed-column PDB records.
    Pdb,
    /// AutoDock PDBQT, PDB columns plus charge and atom-type fields.
    Pdbqt,
    /// PDBx/mmCIF tag-value data.
    Mmcif,
}

impl StructureFormat {
    /// Human-readable format name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            StructureFormat::Pdb => "PDB",
            StructureFormat::Pdbqt => "PDBQT",
            StructureFormat::Mmcif => "mmCIF",
        }
    }

    /// Resolves a caller-declared format name, detecting it from `data` when the
    /// declaration is [`AUTO_FORMAT`] or empty.
    pub fn resolve(declared: &str, data: &[u8]) -> Result<Self, ParseError> {
        let declared = declared.trim();
        if declared.is_empty() || declared.eq_ignore_ascii_case(AUTO_FORMAT) {
            Ok(Self::sniff(data))
        } else {
            declared.parse()
        }
    }

    /// Guesses the format from the first significant content of the input.
    ///
    /// mmCIF is recognized by a leading `data_` block header (or a bare tag or
    /// `loop_`). Any PDBQT-only record (`ROOT`, `BRANCH`, `TORSDOF`, ...) marks the
    /// input as PDBQT; everything else is read as PDB.
    pub fn sniff(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(data);
        let mut significant = text
            .lines()
            .map(str::trim_start)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        if let Some(first) = significant.next() {
            let lower = first.get(..5).unwrap_or(first).to_ascii_lowercase();
            if lower.starts_with("data_") || lower.starts_with("loop_") || first.starts_with('_')
            {
                return StructureFormat::Mmcif;
            }
        }

        let is_pdbqt = text.lines().any(|line| {
            let record = line.get(..6).unwrap_or(line).trim_end();
            matches!(record, "ROOT" | "ENDROO" | "BRANCH" | "ENDBRA" | "TORSDO")
        });
        if is_pdbqt {
            StructureFormat::Pdbqt
        } else {
            StructureFormat::Pdb
        }
    }

    /// Infers the format from a file extension, if it is a known one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for StructureFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match name.as_str() {
            "pdb" | "ent" => Ok(StructureFormat::Pdb),
            "pdbqt" => Ok(StructureFormat::Pdbqt),
            "cif" | "mmcif" | "pdbx" | "pdbx/mmcif" => Ok(StructureFormat::Mmcif),
            _ => Err(ParseError::UnsupportedFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StructureFormat::Pdb => "pdb",
                StructureFormat::Pdbqt => "pdbqt",
                StructureFormat::Mmcif => "mmcif",
            }
        )
    }
}
