use crate::cli::OutputFormat;
use resicheck::core::models::builder::AltLocPolicy;
use resicheck::engine::config::ModelSelection;

/// Values used when neither the command line nor the config file sets an option.
pub struct DefaultsConfig {
    pub alt_loc_policy: AltLocPolicy,
    pub models: ModelSelection,
    pub include_hydrogens: bool,
    pub include_nucleic_acids: bool,
    pub output_format: OutputFormat,
    pub pretty: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            alt_loc_policy: AltLocPolicy::HighestOccupancy,
            models: ModelSelection::All,
            include_hydrogens: false,
            include_nucleic_acids: false,
            output_format: OutputFormat::Json,
            pretty: false,
        }
    }
}
