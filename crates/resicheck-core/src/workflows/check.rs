use crate::core::io::{self, error::ParseError};
use crate::core::topology::registry::ResidueCatalog;
use crate::engine::analyzer::{AnalysisReport, analyze_with};
use crate::engine::config::CheckConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One structure submitted to [`run_batch`].
#[derive(Debug, Clone)]
pub struct BatchInput<'a> {
    /// Caller-chosen name echoed back in the outcome, usually the file path.
    pub label: String,
    pub data: &'a [u8],
    pub declared_format: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub label: String,
    pub result: Result<AnalysisReport, ParseError>,
}

/// Parses one structure and reports the missing atoms of its standard residues.
///
/// # Errors
///
/// Returns the [`ParseError`] of the reader when the input cannot be parsed; no partial
/// report is produced in that case.
#[instrument(skip_all, name = "check_workflow", fields(format = declared_format, bytes = data.len()))]
pub fn run(
    data: &[u8],
    declared_format: &str,
    config: &CheckConfig,
    catalog: &ResidueCatalog,
) -> Result<AnalysisReport, ParseError> {
    info!("Starting completeness check.");
    let structure = io::parse_with_options(data, declared_format, &config.parse_options())?;
    info!(
        models = structure.model_count(),
        residues = structure.residue_count(),
        atoms = structure.atom_count(),
        "Structure parsed."
    );

    let report = analyze_with(&structure, catalog, &config.analysis());
    info!(
        incomplete_residues = report.records.len(),
        faults = report.faults.len(),
        "Completeness check finished."
    );
    Ok(report)
}

/// Checks independent structures, in parallel when the `parallel` feature is enabled.
///
/// Inputs share only the catalog. Outcomes come back in input order whatever order the
/// workers finish in.
#[instrument(skip_all, name = "batch_check_workflow", fields(inputs = inputs.len()))]
pub fn run_batch(
    inputs: &[BatchInput<'_>],
    config: &CheckConfig,
    catalog: &ResidueCatalog,
    reporter: &ProgressReporter,
) -> Vec<BatchOutcome> {
    reporter.report(Progress::BatchStart {
        total: inputs.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = inputs.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = inputs.par_iter().enumerate();

    let outcomes: Vec<BatchOutcome> = iterator
        .map(|(index, input)| {
            let result = run(input.data, &input.declared_format, config, catalog);
            if let Err(e) = &result {
                warn!(input = %input.label, error = %e, "Structure could not be parsed.");
                reporter.report(Progress::Message(format!(
                    "{}: {} ({})",
                    input.label,
                    e.code(),
                    e
                )));
            }
            reporter.report(Progress::InputFinished {
                index,
                succeeded: result.is_ok(),
            });
            BatchOutcome {
                label: input.label.clone(),
                result,
            }
        })
        .collect();

    reporter.report(Progress::BatchFinish);
    info!(
        failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
        "Batch check finished."
    );
    outcomes
}
