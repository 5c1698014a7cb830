pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 6;
pub const MIN_TOP_N: usize = 3;
pub const MAX_TOP_N: usize = 20;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ship-counter")]
#[command(about = "Count orders by ship state and ship city from an Amazon orders report")]
pub struct CliConfig {
    /// Tab-delimited .txt (or .csv) orders report
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Top N to show in charts
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    #[arg(long, help = "Show a sample of raw rows")]
    pub show_raw: bool,

    #[arg(long, help = "Skip the full cleaned dataset export")]
    pub no_cleaned_dataset: bool,

    #[arg(long, help = "Bundle all exports into report.zip")]
    pub bundle: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU / memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn include_cleaned_dataset(&self) -> bool {
        !self.no_cleaned_dataset
    }

    fn show_raw_sample(&self) -> bool {
        self.show_raw
    }

    fn bundle_outputs(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions(
            "input",
            std::slice::from_ref(&self.input),
            validation::REPORT_EXTENSIONS,
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("top_n", self.top_n, MIN_TOP_N, MAX_TOP_N)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["ship-counter", "--input", "orders.txt"]);

        assert_eq!(config.input_path(), "orders.txt");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.top_n(), DEFAULT_TOP_N);
        assert!(config.include_cleaned_dataset());
        assert!(!config.show_raw_sample());
        assert!(!config.bundle_outputs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_out_of_range_top_n() {
        let config =
            CliConfig::parse_from(["ship-counter", "-i", "orders.csv", "--top-n", "25"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_extension() {
        let config = CliConfig::parse_from(["ship-counter", "-i", "orders.xlsx"]);
        assert!(config.validate().is_err());
    }
}
