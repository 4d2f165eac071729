use crate::core::io::traits::ParseOptions;
use crate::core::models::builder::AltLocPolicy;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Unknown model selection: '{0}' (expected 'all' or 'first')")]
    UnknownModelSelection(String),
    #[error("Unknown alternate-location policy: '{0}' (expected 'highest-occupancy' or 'first')")]
    UnknownAltLocPolicy(String),
}

/// Which models of a structure the analyzer walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSelection {
    #[default]
    All,
    First,
}

impl FromStr for ModelSelection {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ModelSelection::All),
            "first" => Ok(ModelSelection::First),
            _ => Err(ConfigError::UnknownModelSelection(s.to_string())),
        }
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ModelSelection::All => "all",
                ModelSelection::First => "first",
            }
        )
    }
}

/// Settings of the completeness analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisConfig {
    /// Expect template hydrogens as well as heavy atoms.
    pub include_hydrogens: bool,
    /// Evaluate standard nucleotides; otherwise they count as unevaluated.
    pub include_nucleic_acids: bool,
    pub models: ModelSelection,
}

/// Complete configuration of one parse-then-analyze check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckConfig {
    pub alt_loc_policy: AltLocPolicy,
    pub include_hydrogens: bool,
    pub include_nucleic_acids: bool,
    pub models: ModelSelection,
}

impl CheckConfig {
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::new()
    }

    /// The part of the configuration the format readers use.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new(self.alt_loc_policy)
    }

    /// The part of the configuration the analyzer uses.
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            include_hydrogens: self.include_hydrogens,
            include_nucleic_acids: self.include_nucleic_acids,
            models: self.models,
        }
    }
}

#[derive(Default)]
pub struct CheckConfigBuilder {
    alt_loc_policy: Option<AltLocPolicy>,
    include_hydrogens: Option<bool>,
    include_nucleic_acids: Option<bool>,
    models: Option<ModelSelection>,
}

impl CheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alt_loc_policy(mut self, policy: AltLocPolicy) -> Self {
        self.alt_loc_policy = Some(policy);
        self
    }
    pub fn include_hydrogens(mut self, include: bool) -> Self {
        self.include_hydrogens = Some(include);
        self
    }
    pub fn include_nucleic_acids(mut self, include: bool) -> Self {
        self.include_nucleic_acids = Some(include);
        self
    }
    pub fn models(mut self, selection: ModelSelection) -> Self {
        self.models = Some(selection);
        self
    }

    /// Sets the alternate-location policy from its textual name.
    pub fn alt_loc_policy_name(self, name: &str) -> Result<Self, ConfigError> {
        let policy = name
            .parse::<AltLocPolicy>()
            .map_err(|_| ConfigError::UnknownAltLocPolicy(name.to_string()))?;
        Ok(self.alt_loc_policy(policy))
    }

    /// Sets the model selection from its textual name.
    pub fn models_name(self, name: &str) -> Result<Self, ConfigError> {
        let selection = name.parse::<ModelSelection>()?;
        Ok(self.models(selection))
    }

    /// Finishes the configuration; unset values take their defaults.
    pub fn build(self) -> CheckConfig {
        let defaults = CheckConfig::default();
        CheckConfig {
            alt_loc_policy: self.alt_loc_policy.unwrap_or(defaults.alt_loc_policy),
            include_hydrogens: self.include_hydrogens.unwrap_or(defaults.include_hydrogens),
            include_nucleic_acids: self
                .include_nucleic_acids
                .unwrap_or(defaults.include_nucleic_acids),
            models: self.models.unwrap_or(defaults.models),
        }
    }
}
