use super::residue::{Residue, ResidueKey};

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    id: String,                     // Chain identifier (e.g., "A", or an mmCIF asym id)
    pub(crate) residues: Vec<Residue>, // Residues in order of first appearance
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue(&self, key: ResidueKey) -> Option<&Residue> {
        self.residues.iter().find(|residue| residue.key() == key)
    }
}
