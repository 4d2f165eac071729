use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "RESICHECK CLI - Reports standard residues with missing atoms in PDB, PDBQT and mmCIF structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used when checking several structures.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one or more structure files for standard residues with missing atoms.
    Check(CheckArgs),
    /// Print the residue templates that define a complete residue.
    Catalog(CatalogArgs),
}

/// Serialization used for the findings report.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Structure files to check.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Input format: auto, pdb, pdbqt or mmcif.
    /// With 'auto' the format comes from each file's extension, then from its content.
    #[arg(short, long, default_value = "auto", value_name = "FORMAT")]
    pub format: String,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a custom residue template catalog instead of the built-in one.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Also require the hydrogens listed in each template.
    #[arg(long)]
    pub include_hydrogens: bool,

    /// Also check standard nucleotides.
    #[arg(long)]
    pub include_nucleic_acids: bool,

    /// Alternate-location policy: first or highest-occupancy.
    #[arg(long = "alt-loc", value_name = "POLICY")]
    pub alt_loc: Option<String>,

    /// Only check the first model of each structure.
    #[arg(long)]
    pub first_model_only: bool,

    // --- Output ---
    /// Write the report to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report serialization.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub output_format: Option<OutputFormat>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Show only this residue's template.
    #[arg(value_name = "RESIDUE")]
    pub residue: Option<String>,

    /// Read templates from a custom catalog file.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}
