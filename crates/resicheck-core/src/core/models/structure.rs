use super::chain::Chain;
use super::residue::Residue;
use crate::core::io::format::StructureFormat;

/// One conformer or frame of a structure (a `MODEL` block, or the whole file
/// when the input has no model records).
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    serial: usize,
    pub(crate) chains: Vec<Chain>,
}

impl Model {
    pub(crate) fn new(serial: usize) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    /// The model number from the source file, or its 1-based position when implicit.
    pub fn serial(&self) -> usize {
        self.serial
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.id() == id)
    }

    /// Iterates over every residue of the model in chain order, then residue order.
    pub fn residues(&self) -> impl Iterator<Item = (&Chain, &Residue)> {
        self.chains
            .iter()
            .flat_map(|chain| chain.residues().iter().map(move |residue| (chain, residue)))
    }
}

/// A complete parsed submission: an ordered list of models.
///
/// A `Structure` is produced by the readers in [`crate::core::io`] through the
/// [`StructureBuilder`](super::builder::StructureBuilder) and is never shared
/// between analysis calls; each call owns the structure it parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    pub(crate) models: Vec<Model>,
    format: Option<StructureFormat>,
}

impl Structure {
    pub(crate) fn with_format(mut self, format: StructureFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The format the structure was read from; `None` for structures built in memory.
    pub fn format(&self) -> Option<StructureFormat> {
        self.format
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn residue_count(&self) -> usize {
        self.models.iter().map(|model| model.residues().count()).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.models
            .iter()
            .flat_map(|model| model.residues())
            .map(|(_, residue)| residue.atoms().len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::residue::{ResidueKey, ResidueKind};
    use nalgebra::Point3;

    fn sample_structure() -> Structure {
        let mut residue = Residue::new(ResidueKey::new(1, None), "GLY", ResidueKind::Standard);
        residue.upsert_atom(Atom::new("N", "N", Point3::origin()));
        residue.upsert_atom(Atom::new("CA", "C", Point3::origin()));

        let mut chain_a = Chain::new("A");
        chain_a.residues.push(residue.clone());
        let mut chain_b = Chain::new("B");
        chain_b.residues.push(residue);

        let mut first = Model::new(1);
        first.chains.push(chain_a.clone());
        first.chains.push(chain_b);
        let mut second = Model::new(2);
        second.chains.push(chain_a);

        Structure {
            models: vec![first, second],
            format: None,
        }
    }

    #[test]
    fn counts_cover_every_model() {
        let structure = sample_structure();
        assert_eq!(structure.model_count(), 2);
        assert_eq!(structure.residue_count(), 3);
        assert_eq!(structure.atom_count(), 6);
    }

    #[test]
    fn model_residues_iterates_in_chain_order() {
        let structure = sample_structure();
        let chain_ids: Vec<_> = structure.models()[0]
            .residues()
            .map(|(chain, _)| chain.id())
            .collect();
        assert_eq!(chain_ids, vec!["A", "B"]);
    }

    #[test]
    fn chain_lookup_by_id() {
        let structure = sample_structure();
        let model = &structure.models()[1];
        assert_eq!(model.serial(), 2);
        assert!(model.chain("A").is_some());
        assert!(model.chain("B").is_none());
    }
}
