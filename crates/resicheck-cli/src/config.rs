mod defaults;

pub use defaults::DefaultsConfig;

use crate::cli::{CheckArgs, OutputFormat};
use crate::error::{CliError, Result};
use resicheck::engine::config::{CheckConfig, CheckConfigBuilder, ModelSelection};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialParsingConfig {
    #[serde(rename = "alt-loc")]
    alt_loc: Option<String>,
    models: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAnalysisConfig {
    #[serde(rename = "include-hydrogens")]
    include_hydrogens: Option<bool>,
    #[serde(rename = "include-nucleic-acids")]
    include_nucleic_acids: Option<bool>,
    catalog: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    format: Option<OutputFormat>,
    pretty: Option<bool>,
}

/// The config file as written, every key optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialCheckConfig {
    parsing: Option<PartialParsingConfig>,
    analysis: Option<PartialAnalysisConfig>,
    output: Option<PartialOutputConfig>,
}

/// How the report is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub pretty: bool,
}

/// Everything the `check` command needs after command line, file and defaults are merged.
#[derive(Debug, Clone)]
pub struct ResolvedCheckConfig {
    pub check: CheckConfig,
    pub catalog: Option<PathBuf>,
    pub output: OutputSettings,
}

impl PartialCheckConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, args: &CheckArgs) -> Result<ResolvedCheckConfig> {
        let defaults = DefaultsConfig::default();
        let parsing = self.parsing.unwrap_or_default();
        let analysis = self.analysis.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let mut builder = CheckConfigBuilder::new()
            .alt_loc_policy(defaults.alt_loc_policy)
            .models(defaults.models);

        if let Some(name) = args.alt_loc.as_deref().or(parsing.alt_loc.as_deref()) {
            builder = builder
                .alt_loc_policy_name(name)
                .map_err(|e| CliError::Config(e.to_string()))?;
        }

        if args.first_model_only {
            builder = builder.models(ModelSelection::First);
        } else if let Some(name) = parsing.models.as_deref() {
            builder = builder
                .models_name(name)
                .map_err(|e| CliError::Config(e.to_string()))?;
        }

        let check = builder
            .include_hydrogens(Self::merge_flag(
                args.include_hydrogens,
                analysis.include_hydrogens,
                defaults.include_hydrogens,
            ))
            .include_nucleic_acids(Self::merge_flag(
                args.include_nucleic_acids,
                analysis.include_nucleic_acids,
                defaults.include_nucleic_acids,
            ))
            .build();

        Ok(ResolvedCheckConfig {
            check,
            catalog: args.catalog.clone().or(analysis.catalog),
            output: OutputSettings {
                format: args
                    .output_format
                    .or(output.format)
                    .unwrap_or(defaults.output_format),
                pretty: Self::merge_flag(args.pretty, output.pretty, defaults.pretty),
            },
        })
    }

    /// A flag given on the command line can only switch an option on.
    fn merge_flag(cli_flag: bool, file_val: Option<bool>, default: bool) -> bool {
        if cli_flag {
            true
        } else if let Some(val) = file_val {
            val
        } else {
            default
        }
    }
}
