use crate::core::models::residue::ResidueKey;
use thiserror::Error;

/// An internal inconsistency found during analysis: a residue classified as standard
/// for which the catalog has no template.
///
/// Faults are collected in the [`AnalysisReport`](super::analyzer::AnalysisReport)
/// rather than returned; the affected residue is skipped and analysis continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No template for standard residue {residue_name} {residue_key} (chain '{chain}', model {model})")]
pub struct ConsistencyFault {
    pub model: usize,
    pub chain: String,
    pub residue_name: String,
    pub residue_key: ResidueKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_message_names_the_residue() {
        let fault = ConsistencyFault {
            model: 1,
            chain: "A".to_string(),
            residue_name: "ALA".to_string(),
            residue_key: ResidueKey::new(52, Some('B')),
        };
        assert_eq!(
            fault.to_string(),
            "No template for standard residue ALA 52B (chain 'A', model 1)"
        );
    }
}
