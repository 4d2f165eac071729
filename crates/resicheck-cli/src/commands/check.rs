use crate::cli::{CheckArgs, OutputFormat};
use crate::config::{OutputSettings, PartialCheckConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use resicheck::core::io::error::ParseError;
use resicheck::core::io::format::{AUTO_FORMAT, StructureFormat};
use resicheck::core::topology::registry::ResidueCatalog;
use resicheck::engine::analyzer::AnalysisReport;
use resicheck::engine::progress::ProgressReporter;
use resicheck::report;
use resicheck::workflows::check::{self, BatchInput, BatchOutcome};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub fn run(args: CheckArgs, quiet: bool) -> Result<()> {
    info!("Resolving configuration...");
    let resolved = PartialCheckConfig::load(args.config.as_deref())?.merge_with_cli(&args)?;
    debug!("Final check configuration: {:?}", resolved);

    let custom_catalog;
    let catalog = match &resolved.catalog {
        Some(path) => {
            info!("Loading residue catalog from {:?}", path);
            custom_catalog = ResidueCatalog::load(path)?;
            &custom_catalog
        }
        None => ResidueCatalog::standard(),
    };

    let contents = read_inputs(&args.inputs)?;
    let inputs: Vec<BatchInput<'_>> = args
        .inputs
        .iter()
        .zip(&contents)
        .map(|(path, data)| BatchInput {
            label: path.display().to_string(),
            data: data.as_slice(),
            declared_format: declared_format_for(path, &args.format),
        })
        .collect();

    if let [input] = inputs.as_slice() {
        let writer = open_output(args.output.as_deref())?;
        let result = check::run(
            input.data,
            &input.declared_format,
            &resolved.check,
            catalog,
        );
        return match result {
            Ok(report) => {
                log_faults(&input.label, &report);
                write_single(writer, &report, resolved.output)
            }
            Err(source) => {
                write_error(writer, &source, resolved.output)?;
                Err(CliError::Parse {
                    path: args.inputs[0].clone(),
                    source,
                })
            }
        };
    }

    let handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let outcomes = check::run_batch(&inputs, &resolved.check, catalog, &reporter);
    for outcome in &outcomes {
        if let Ok(report) = &outcome.result {
            log_faults(&outcome.label, report);
        }
    }

    write_batch(open_output(args.output.as_deref())?, &outcomes, resolved.output)?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(CliError::Unparsed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

/// With `auto`, a recognized file extension decides the format; otherwise the reader sniffs.
fn declared_format_for(path: &Path, requested: &str) -> String {
    if !requested.trim().eq_ignore_ascii_case(AUTO_FORMAT) {
        return requested.to_string();
    }
    StructureFormat::from_path(path)
        .map(|format| format.to_string())
        .unwrap_or_else(|| AUTO_FORMAT.to_string())
}

fn read_inputs(paths: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    paths
        .iter()
        .map(|path| {
            debug!("Reading structure file {:?}", path);
            std::fs::read(path).map_err(|source| CliError::Input {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            info!("Writing report to {:?}", path);
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn log_faults(label: &str, report: &AnalysisReport) {
    for fault in &report.faults {
        warn!(input = label, "{}", fault);
    }
    info!(
        input = label,
        evaluated = report.residues_evaluated,
        unevaluated = report.residues_unevaluated,
        incomplete = report.records.len(),
        "Residues checked."
    );
}

fn write_single<W: Write>(writer: W, report: &AnalysisReport, output: OutputSettings) -> Result<()> {
    match output.format {
        OutputFormat::Json => report::write_json(writer, &report.records, output.pretty)?,
        OutputFormat::Csv => report::write_csv(writer, &report.records)?,
    }
    Ok(())
}

fn write_error<W: Write>(writer: W, error: &ParseError, output: OutputSettings) -> Result<()> {
    match output.format {
        OutputFormat::Json => report::write_error_json(writer, error, output.pretty)?,
        OutputFormat::Csv => report::write_error_csv(writer, error)?,
    }
    Ok(())
}

fn write_batch<W: Write>(writer: W, outcomes: &[BatchOutcome], output: OutputSettings) -> Result<()> {
    match output.format {
        OutputFormat::Json => report::write_batch_json(writer, outcomes, output.pretty)?,
        OutputFormat::Csv => report::write_batch_csv(writer, outcomes)?,
    }
    Ok(())
}
