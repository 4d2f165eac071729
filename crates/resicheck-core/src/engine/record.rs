use crate::core::models::residue::ResidueKey;

/// Atoms a single standard residue is missing relative to its template.
///
/// A record exists only when at least one atom is missing, and `missing_atoms` is always
/// sorted and a subset of the template's atom names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessRecord {
    pub model: usize,
    pub chain: String,
    pub residue_name: String,
    pub residue_id: isize,
    pub insertion_code: Option<char>,
    pub missing_atoms: Vec<String>,
}

impl CompletenessRecord {
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey::new(self.residue_id, self.insertion_code)
    }
}
