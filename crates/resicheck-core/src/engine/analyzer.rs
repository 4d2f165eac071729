use super::config::{AnalysisConfig, ModelSelection};
use super::error::ConsistencyFault;
use super::record::CompletenessRecord;
use crate::core::models::chain::Chain;
use crate::core::models::residue::{Residue, ResidueKind};
use crate::core::models::structure::{Model, Structure};
use crate::core::topology::classification::{PolymerType, standard_polymer};
use crate::core::topology::registry::{ResidueCatalog, ResidueTemplate};
use crate::core::utils::identifiers::{is_n_terminal_hydrogen, modern_hydrogen_name};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Everything one analysis pass found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    /// One record per incomplete standard residue, in model, chain, residue order.
    pub records: Vec<CompletenessRecord>,
    pub faults: Vec<ConsistencyFault>,
    /// Standard residues compared against their template.
    pub residues_evaluated: usize,
    /// Residues skipped: non-standard, hetero, solvent, excluded nucleotides and faults.
    pub residues_unevaluated: usize,
}

impl AnalysisReport {
    /// Whether every evaluated residue had all its expected atoms.
    pub fn is_complete(&self) -> bool {
        self.records.is_empty()
    }
}

enum Evaluation {
    Skipped,
    Fault,
    Checked(Vec<String>),
}

/// Reports the missing atoms of every standard residue with the default settings
/// (heavy atoms only, all models, amino acids only).
pub fn analyze(structure: &Structure, catalog: &ResidueCatalog) -> Vec<CompletenessRecord> {
    analyze_with(structure, catalog, &AnalysisConfig::default()).records
}

/// Walks the structure and compares each standard residue with its catalog template.
///
/// The expected set comes only from the template; extra observed atoms are ignored.
/// Residues that cannot be evaluated are counted, never reported as complete or
/// incomplete.
pub fn analyze_with(
    structure: &Structure,
    catalog: &ResidueCatalog,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let models: &[Model] = match config.models {
        ModelSelection::All => structure.models(),
        ModelSelection::First => &structure.models()[..structure.model_count().min(1)],
    };

    let mut report = AnalysisReport::default();
    for model in models {
        for (chain, residue) in model.residues() {
            match evaluate(model, chain, residue, catalog, config, &mut report.faults) {
                Evaluation::Skipped | Evaluation::Fault => report.residues_unevaluated += 1,
                Evaluation::Checked(missing) => {
                    report.residues_evaluated += 1;
                    if !missing.is_empty() {
                        report.records.push(CompletenessRecord {
                            model: model.serial(),
                            chain: chain.id().to_string(),
                            residue_name: residue.name().to_string(),
                            residue_id: residue.number(),
                            insertion_code: residue.insertion_code(),
                            missing_atoms: missing,
                        });
                    }
                }
            }
        }
    }

    debug!(
        evaluated = report.residues_evaluated,
        unevaluated = report.residues_unevaluated,
        incomplete = report.records.len(),
        faults = report.faults.len(),
        "Completeness analysis finished."
    );
    report
}

fn evaluate(
    model: &Model,
    chain: &Chain,
    residue: &Residue,
    catalog: &ResidueCatalog,
    config: &AnalysisConfig,
    faults: &mut Vec<ConsistencyFault>,
) -> Evaluation {
    if residue.kind() != ResidueKind::Standard {
        return Evaluation::Skipped;
    }
    if standard_polymer(residue.name()) == Some(PolymerType::NucleicAcid)
        && !config.include_nucleic_acids
    {
        trace!(residue = residue.name(), "Skipping nucleotide.");
        return Evaluation::Skipped;
    }

    let Some(template) = catalog.lookup(residue.name()) else {
        let fault = ConsistencyFault {
            model: model.serial(),
            chain: chain.id().to_string(),
            residue_name: residue.name().to_string(),
            residue_key: residue.key(),
        };
        warn!(%fault, "Skipping standard residue without a template.");
        faults.push(fault);
        return Evaluation::Fault;
    };

    Evaluation::Checked(missing_atoms(residue, template, config.include_hydrogens))
}

fn missing_atoms(residue: &Residue, template: &ResidueTemplate, include_hydrogens: bool) -> Vec<String> {
    // A free N-terminus carries H1-H3 in place of the backbone amide H.
    let amide_replaced = include_hydrogens && residue.atom_names().any(is_n_terminal_hydrogen);

    // Legacy names stand in for the template names they map to.
    let renamed: HashSet<String> = if include_hydrogens {
        residue
            .atom_names()
            .filter(|name| !template.contains(name))
            .filter_map(|name| modern_hydrogen_name(name, |n| template.contains(n)))
            .collect()
    } else {
        HashSet::new()
    };

    let mut missing: Vec<String> = template
        .expected_atoms(include_hydrogens)
        .filter(|name| !residue.has_atom(name) && !renamed.contains(*name))
        .filter(|name| !(amide_replaced && *name == "H"))
        .map(str::to_string)
        .collect();
    missing.sort_unstable();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::builder::{AtomRecord, StructureBuilder};
    use crate::core::models::residue::ResidueKey;
    use nalgebra::Point3;

    struct Site<'a> {
        model: Option<usize>,
        chain: &'a str,
        residue: &'a str,
        number: isize,
        hetero: bool,
        atoms: &'a [&'a str],
    }

    fn site<'a>(chain: &'a str, residue: &'a str, number: isize, atoms: &'a [&'a str]) -> Site<'a> {
        Site {
            model: None,
            chain,
            residue,
            number,
            hetero: false,
            atoms,
        }
    }

    fn build(sites: &[Site<'_>]) -> Structure {
        let mut builder = StructureBuilder::default();
        let mut current_model = None;
        for site in sites {
            if site.model != current_model {
                if let Some(serial) = site.model {
                    builder.end_model().start_model(serial);
                }
                current_model = site.model;
            }
            for name in site.atoms {
                builder.add_atom(AtomRecord {
                    chain_id: site.chain,
                    residue_name: site.residue,
                    residue_key: ResidueKey::new(site.number, None),
                    is_hetero: site.hetero,
                    atom: Atom::new(name, "", Point3::origin()),
                });
            }
        }
        builder.build()
    }

    fn catalog() -> &'static ResidueCatalog {
        ResidueCatalog::standard()
    }

    #[test]
    fn glycine_missing_carbonyl_oxygen_is_reported() {
        let structure = build(&[site("A", "GLY", 1, &["N", "CA", "C"])]);
        let records = analyze(&structure, catalog());
        assert_eq!(
            records,
            vec![CompletenessRecord {
                model: 1,
                chain: "A".to_string(),
                residue_name: "GLY".to_string(),
                residue_id: 1,
                insertion_code: None,
                missing_atoms: vec!["O".to_string()],
            }]
        );
    }

    #[test]
    fn complete_glycine_yields_no_records() {
        let structure = build(&[site("A", "GLY", 1, &["N", "CA", "C", "O"])]);
        assert!(analyze(&structure, catalog()).is_empty());
    }

    #[test]
    fn solvent_is_never_evaluated() {
        let structure = build(&[Site {
            hetero: true,
            ..site("A", "HOH", 1, &["O"])
        }]);
        let report = analyze_with(&structure, catalog(), &AnalysisConfig::default());
        assert!(report.records.is_empty());
        assert_eq!(report.residues_evaluated, 0);
        assert_eq!(report.residues_unevaluated, 1);
    }

    #[test]
    fn non_standard_and_hetero_residues_are_skipped_whatever_their_content() {
        let structure = build(&[
            site("A", "MSE", 1, &["N"]),
            Site {
                hetero: true,
                ..site("A", "HEM", 2, &["FE"])
            },
        ]);
        let report = analyze_with(&structure, catalog(), &AnalysisConfig::default());
        assert!(report.records.is_empty());
        assert_eq!(report.residues_unevaluated, 2);
    }

    #[test]
    fn each_model_gets_its_own_record_in_model_order() {
        let structure = build(&[
            Site {
                model: Some(1),
                ..site("A", "GLY", 1, &["N", "CA", "C"])
            },
            Site {
                model: Some(2),
                ..site("A", "GLY", 1, &["N", "CA", "C"])
            },
        ]);
        let records = analyze(&structure, catalog());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].model, 1);
        assert_eq!(records[1].model, 2);
        assert_eq!(records[0].missing_atoms, records[1].missing_atoms);
    }

    #[test]
    fn first_model_selection_ignores_later_models() {
        let structure = build(&[
            Site {
                model: Some(1),
                ..site("A", "GLY", 1, &["N", "CA", "C"])
            },
            Site {
                model: Some(2),
                ..site("A", "GLY", 1, &["N", "CA"])
            },
        ]);
        let config = AnalysisConfig {
            models: ModelSelection::First,
            ..AnalysisConfig::default()
        };
        let report = analyze_with(&structure, catalog(), &config);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].model, 1);
    }

    #[test]
    fn missing_atoms_are_sorted_and_a_subset_of_the_template() {
        let structure = build(&[site("B", "TRP", 7, &["N", "CA", "C", "O", "CB", "XX"])]);
        let records = analyze(&structure, catalog());
        assert_eq!(records.len(), 1);
        let missing = &records[0].missing_atoms;
        let mut sorted = missing.clone();
        sorted.sort();
        assert_eq!(missing, &sorted);
        let template = catalog().lookup("TRP").unwrap();
        assert!(missing.iter().all(|name| template.contains(name)));
        assert!(!missing.contains(&"XX".to_string()));
        assert_eq!(missing.len(), 14 - 5);
    }

    #[test]
    fn extra_atoms_do_not_prevent_completeness() {
        let structure = build(&[site("A", "GLY", 1, &["N", "CA", "C", "O", "OXT", "H1"])]);
        assert!(analyze(&structure, catalog()).is_empty());
    }

    #[test]
    fn records_follow_chain_and_residue_order() {
        let structure = build(&[
            site("B", "ALA", 10, &["N"]),
            site("B", "GLY", 3, &["N"]),
            site("A", "SER", 1, &["N"]),
        ]);
        let order: Vec<_> = analyze(&structure, catalog())
            .iter()
            .map(|r| (r.chain.clone(), r.residue_id))
            .collect();
        assert_eq!(
            order,
            vec![("B".to_string(), 10), ("B".to_string(), 3), ("A".to_string(), 1)]
        );
    }

    #[test]
    fn hydrogens_are_expected_only_when_requested() {
        let structure = build(&[site("A", "GLY", 1, &["N", "CA", "C", "O", "HA2"])]);
        assert!(analyze(&structure, catalog()).is_empty());

        let config = AnalysisConfig {
            include_hydrogens: true,
            ..AnalysisConfig::default()
        };
        let report = analyze_with(&structure, catalog(), &config);
        assert_eq!(report.records[0].missing_atoms, vec!["H", "HA3"]);
    }

    #[test]
    fn legacy_hydrogen_names_satisfy_their_modern_counterparts() {
        let structure = build(&[site(
            "A",
            "SER",
            2,
            &["N", "CA", "C", "O", "CB", "OG", "HN", "HA", "1HB", "2HB"],
        )]);
        let config = AnalysisConfig {
            include_hydrogens: true,
            ..AnalysisConfig::default()
        };
        let report = analyze_with(&structure, catalog(), &config);
        assert_eq!(report.records[0].missing_atoms, vec!["HG"]);
    }

    #[test]
    fn n_terminal_hydrogens_satisfy_the_amide_hydrogen() {
        let structure = build(&[site(
            "A",
            "GLY",
            1,
            &["N", "CA", "C", "O", "H1", "H2", "H3", "HA2", "HA3"],
        )]);
        let config = AnalysisConfig {
            include_hydrogens: true,
            ..AnalysisConfig::default()
        };
        assert!(analyze_with(&structure, catalog(), &config).records.is_empty());
    }

    #[test]
    fn nucleotides_are_evaluated_only_when_enabled() {
        let structure = build(&[site("C", "DA", 1, &["P", "OP1"])]);
        let default_report = analyze_with(&structure, catalog(), &AnalysisConfig::default());
        assert!(default_report.records.is_empty());
        assert_eq!(default_report.residues_unevaluated, 1);

        let config = AnalysisConfig {
            include_nucleic_acids: true,
            ..AnalysisConfig::default()
        };
        let report = analyze_with(&structure, catalog(), &config);
        assert_eq!(report.records.len(), 1);
        assert!(report.records[0].missing_atoms.contains(&"C1'".to_string()));
    }

    #[test]
    fn standard_residue_without_template_is_a_fault_not_a_result() {
        let custom = ResidueCatalog::from_toml_str(
            "[GLY]\npolymer = \"protein\"\nheavy-atoms = [\"N\", \"CA\", \"C\", \"O\"]\n",
        )
        .unwrap();
        let structure = build(&[
            site("A", "ALA", 1, &["N"]),
            site("A", "GLY", 2, &["N", "CA", "C"]),
        ]);
        let report = analyze_with(&structure, &custom, &AnalysisConfig::default());
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].residue_name, "ALA");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].residue_name, "GLY");
        assert_eq!(report.residues_evaluated, 1);
        assert_eq!(report.residues_unevaluated, 1);
    }

    #[test]
    fn analysis_is_deterministic() {
        let structure = build(&[
            site("A", "LYS", 1, &["N", "CA"]),
            site("A", "ARG", 2, &["N", "CA", "C", "O", "CB"]),
        ]);
        let first = analyze_with(&structure, catalog(), &AnalysisConfig::default());
        let second = analyze_with(&structure, catalog(), &AnalysisConfig::default());
        assert_eq!(first, second);
        assert!(!first.is_complete());
    }

    #[test]
    fn empty_structure_yields_empty_report() {
        let structure = StructureBuilder::default().build();
        let report = analyze_with(&structure, catalog(), &AnalysisConfig::default());
        assert!(report.is_complete());
        assert_eq!(report.residues_evaluated + report.residues_unevaluated, 0);
    }
}
