use super::atom::Atom;
use super::chain::Chain;
use super::residue::{Residue, ResidueKey};
use super::structure::{Model, Structure};
use crate::core::topology::classification::classify_residue;
use crate::core::utils::identifiers::normalize_residue_name;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// Policy for choosing between alternate locations of the same atom.
///
/// Whatever the policy, a residue never holds two atoms with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AltLocPolicy {
    /// Keep the alternate with the strictly highest occupancy; ties keep the first seen.
    #[default]
    HighestOccupancy,
    /// Keep the first alternate encountered in the file.
    First,
}

#[derive(Debug, Error)]
#[error("Invalid alternate-location policy string")]
pub struct ParseAltLocPolicyError;

impl FromStr for AltLocPolicy {
    type Err = ParseAltLocPolicyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest-occupancy" | "highest_occupancy" | "occupancy" => {
                Ok(AltLocPolicy::HighestOccupancy)
            }
            "first" => Ok(AltLocPolicy::First),
            _ => Err(ParseAltLocPolicyError),
        }
    }
}

impl fmt::Display for AltLocPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AltLocPolicy::HighestOccupancy => "highest-occupancy",
                AltLocPolicy::First => "first",
            }
        )
    }
}

/// One atom as delivered by a format reader, with its place in the hierarchy.
#[derive(Debug, Clone)]
pub struct AtomRecord<'a> {
    pub chain_id: &'a str,
    pub residue_name: &'a str,
    pub residue_key: ResidueKey,
    pub is_hetero: bool,
    pub atom: Atom,
}

pub struct StructureBuilder {
    structure: Structure,
    alt_loc_policy: AltLocPolicy,

    // --- Lookup state for the model currently being filled ---
    current_model_idx: Option<usize>,
    chain_idx_map: HashMap<String, usize>,
    residue_idx_map: HashMap<(usize, ResidueKey), usize>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new(AltLocPolicy::default())
    }
}

impl StructureBuilder {
    pub fn new(alt_loc_policy: AltLocPolicy) -> Self {
        Self {
            structure: Structure::default(),
            alt_loc_policy,
            current_model_idx: None,
            chain_idx_map: HashMap::new(),
            residue_idx_map: HashMap::new(),
        }
    }

    /// Opens a new model; subsequent atoms go into it until [`end_model`](Self::end_model).
    pub fn start_model(&mut self, serial: usize) -> &mut Self {
        self.structure.models.push(Model::new(serial));
        self.current_model_idx = Some(self.structure.models.len() - 1);
        self.chain_idx_map.clear();
        self.residue_idx_map.clear();
        self
    }

    pub fn end_model(&mut self) -> &mut Self {
        self.current_model_idx = None;
        self.chain_idx_map.clear();
        self.residue_idx_map.clear();
        self
    }

    pub fn has_open_model(&self) -> bool {
        self.current_model_idx.is_some()
    }

    pub fn add_atom(&mut self, record: AtomRecord<'_>) -> &mut Self {
        let model_idx = match self.current_model_idx {
            Some(idx) => idx,
            None => {
                let serial = self
                    .structure
                    .models
                    .last()
                    .map_or(1, |model| model.serial() + 1);
                self.start_model(serial);
                self.structure.models.len() - 1
            }
        };
        let model = &mut self.structure.models[model_idx];

        let chain_idx = *self
            .chain_idx_map
            .entry(record.chain_id.to_string())
            .or_insert_with(|| {
                model.chains.push(Chain::new(record.chain_id));
                model.chains.len() - 1
            });
        let chain = &mut model.chains[chain_idx];

        let residue_name = normalize_residue_name(record.residue_name);
        let res_idx = *self
            .residue_idx_map
            .entry((chain_idx, record.residue_key))
            .or_insert_with(|| {
                let kind = classify_residue(&residue_name, record.is_hetero);
                chain
                    .residues
                    .push(Residue::new(record.residue_key, &residue_name, kind));
                chain.residues.len() - 1
            });
        let residue = &mut chain.residues[res_idx];

        if residue.name() != residue_name {
            debug!(
                chain = record.chain_id,
                residue = %record.residue_key,
                kept = residue.name(),
                skipped = %residue_name,
                "Skipping atom of an alternate residue identity."
            );
            return self;
        }

        let keep_new = match residue.atom(record.atom.name()) {
            None => true,
            Some(existing) => match self.alt_loc_policy {
                AltLocPolicy::First => false,
                AltLocPolicy::HighestOccupancy => {
                    record.atom.ranking_occupancy() > existing.ranking_occupancy()
                }
            },
        };

        if keep_new {
            if let Some(replaced) = residue.upsert_atom(record.atom) {
                trace!(atom = replaced.name(), "Replaced lower-occupancy alternate location.");
            }
        } else {
            trace!(atom = record.atom.name(), "Discarded alternate location.");
        }
        self
    }

    /// Finishes construction. An input without atoms yields one empty model.
    pub fn build(mut self) -> Structure {
        if self.structure.models.is_empty() {
            self.structure.models.push(Model::new(1));
        }
        self.structure
    }
}
