use super::classification::{PolymerType, STANDARD_AMINO_ACIDS, STANDARD_NUCLEOTIDES};
use super::templates::STANDARD_TEMPLATES;
use crate::core::utils::identifiers::{is_heavy_atom, normalize_atom_name, normalize_residue_name};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Canonical atom names defining what "complete" means for one residue name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueTemplate {
    name: String,
    polymer: PolymerType,
    heavy_atoms: Vec<String>,
    hydrogens: Vec<String>,
}

impl ResidueTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polymer(&self) -> PolymerType {
        self.polymer
    }

    pub fn heavy_atoms(&self) -> &[String] {
        &self.heavy_atoms
    }

    pub fn hydrogens(&self) -> &[String] {
        &self.hydrogens
    }

    /// All canonical atom names, heavy atoms first, in template order.
    pub fn atoms(&self) -> impl Iterator<Item = &str> {
        self.heavy_atoms
            .iter()
            .chain(self.hydrogens.iter())
            .map(String::as_str)
    }

    /// The atom names an analysis should expect, with or without hydrogens.
    pub fn expected_atoms(&self, include_hydrogens: bool) -> impl Iterator<Item = &str> {
        let hydrogens: &[String] = if include_hydrogens {
            &self.hydrogens
        } else {
            &[]
        };
        self.heavy_atoms
            .iter()
            .chain(hydrogens.iter())
            .map(String::as_str)
    }

    pub fn contains(&self, atom_name: &str) -> bool {
        self.atoms().any(|name| name == atom_name)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawResidueTemplate {
    polymer: PolymerType,
    heavy_atoms: Vec<String>,
    #[serde(default)]
    hydrogens: Vec<String>,
}

/// Immutable lookup table from residue name to [`ResidueTemplate`].
///
/// The built-in catalog is available through [`ResidueCatalog::standard`] and is
/// created once per process. Custom catalogs are read from TOML with
/// [`ResidueCatalog::load`]. Neither offers a way to change templates after
/// construction, so a catalog can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct ResidueCatalog {
    templates: HashMap<String, ResidueTemplate>,
}

static STANDARD_CATALOG: LazyLock<ResidueCatalog> = LazyLock::new(|| {
    let templates = STANDARD_TEMPLATES
        .entries()
        .map(|(name, template)| {
            let template = ResidueTemplate {
                name: name.to_string(),
                polymer: template.polymer,
                heavy_atoms: template.heavy_atoms.iter().map(|s| s.to_string()).collect(),
                hydrogens: template.hydrogens.iter().map(|s| s.to_string()).collect(),
            };
            (name.to_string(), template)
        })
        .collect();
    ResidueCatalog { templates }
});

impl ResidueCatalog {
    /// The built-in catalog of the 20 standard amino acids and 8 standard nucleotides.
    pub fn standard() -> &'static ResidueCatalog {
        &STANDARD_CATALOG
    }

    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogLoadError> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, CatalogLoadError> {
        let raw: HashMap<String, RawResidueTemplate> =
            toml::from_str(content).map_err(|e| CatalogLoadError::Toml {
                path: origin.to_string(),
                source: e,
            })?;

        let mut templates = HashMap::with_capacity(raw.len());
        for (raw_name, raw_template) in raw {
            let name = normalize_residue_name(&raw_name);
            if raw_template.heavy_atoms.is_empty() {
                return Err(CatalogLoadError::EmptyTemplate { residue: name });
            }

            let mut seen = HashSet::new();
            let mut normalize_all = |atoms: Vec<String>| -> Result<Vec<String>, CatalogLoadError> {
                atoms
                    .iter()
                    .map(|atom| {
                        let atom = normalize_atom_name(atom);
                        if seen.insert(atom.clone()) {
                            Ok(atom)
                        } else {
                            Err(CatalogLoadError::DuplicateAtom {
                                residue: name.clone(),
                                atom,
                            })
                        }
                    })
                    .collect()
            };
            let heavy_atoms = normalize_all(raw_template.heavy_atoms)?;
            let hydrogens = normalize_all(raw_template.hydrogens)?;
            if let Some(atom) = hydrogens.iter().find(|atom| is_heavy_atom(atom)) {
                return Err(CatalogLoadError::NotHydrogen {
                    residue: name,
                    atom: atom.clone(),
                });
            }

            let template = ResidueTemplate {
                name: name.clone(),
                polymer: raw_template.polymer,
                heavy_atoms,
                hydrogens,
            };
            if templates.insert(name.clone(), template).is_some() {
                return Err(CatalogLoadError::DuplicateResidue { residue: name });
            }
        }

        Ok(Self { templates })
    }

    /// Looks up the template for a residue name.
    ///
    /// `None` means the residue cannot be evaluated; it never means "complete".
    pub fn lookup(&self, residue_name: &str) -> Option<&ResidueTemplate> {
        self.templates
            .get(residue_name)
            .or_else(|| self.templates.get(&normalize_residue_name(residue_name)))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates sorted by residue name.
    pub fn templates(&self) -> Vec<&ResidueTemplate> {
        let mut templates: Vec<_> = self.templates.values().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    /// Standard residue names this catalog has no template for, sorted.
    pub fn missing_standard_names(&self) -> Vec<&'static str> {
        let mut missing: Vec<_> = STANDARD_AMINO_ACIDS
            .iter()
            .chain(STANDARD_NUCLEOTIDES.iter())
            .copied()
            .filter(|name| !self.templates.contains_key(*name))
            .collect();
        missing.sort_unstable();
        missing
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Template for residue '{residue}' lists no heavy atoms")]
    EmptyTemplate { residue: String },
    #[error("Template for residue '{residue}' lists atom '{atom}' more than once")]
    DuplicateAtom { residue: String, atom: String },
    #[error("Template for residue '{residue}' lists heavy atom '{atom}' among its hydrogens")]
    NotHydrogen { residue: String, atom: String },
    #[error("Residue '{residue}' is defined more than once")]
    DuplicateResidue { residue: String },
}
