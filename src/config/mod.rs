pub mod local;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{parse_delimiter, validate_file_name, validate_path, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_DIR: &str = "inputDataSet";
pub const DEFAULT_OUTPUT_DIR: &str = "outputDataSet";
pub const DEFAULT_TEMP_DIR: &str = "tempDataSet";
pub const DEFAULT_PROCESSED_FILE: &str = "processed_data.csv";
pub const DEFAULT_RESULT_FILE: &str = "test_result.csv";
pub const DEFAULT_DELIMITER: u8 = b';';

/// Resolved run settings. `Default` gives the fixed relative layout used
/// when the binary runs without arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlConfig {
    pub input_dir: String,
    pub output_dir: String,
    pub temp_dir: String,
    pub processed_file: String,
    pub result_file: String,
    pub delimiter: u8,
    pub monitor: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_dir: DEFAULT_INPUT_DIR.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            temp_dir: DEFAULT_TEMP_DIR.to_string(),
            processed_file: DEFAULT_PROCESSED_FILE.to_string(),
            result_file: DEFAULT_RESULT_FILE.to_string(),
            delimiter: DEFAULT_DELIMITER,
            monitor: false,
        }
    }
}

impl ConfigProvider for EtlConfig {
    fn input_dir(&self) -> &str {
        &self.input_dir
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn temp_dir(&self) -> &str {
        &self.temp_dir
    }

    fn processed_file(&self) -> &str {
        &self.processed_file
    }

    fn result_file(&self) -> &str {
        &self.result_file
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Validate for EtlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_dir", &self.input_dir)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_path("temp_dir", &self.temp_dir)?;
        validate_file_name("processed_file", &self.processed_file)?;
        validate_path("result_file", &self.result_file)?;
        parse_delimiter("delimiter", &(self.delimiter as char).to_string())?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::TomlConfig;
    use super::EtlConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::parse_delimiter;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "player-etl")]
    #[command(about = "Classify player statistics and check them against reference files")]
    pub struct CliConfig {
        /// Directory holding the input *.csv and *.json files
        #[arg(long)]
        pub input_dir: Option<String>,

        /// Directory holding one reference *.csv per event type
        #[arg(long)]
        pub output_dir: Option<String>,

        /// Working directory for the processed data file
        #[arg(long)]
        pub temp_dir: Option<String>,

        /// Path of the validation result file
        #[arg(long)]
        pub result_file: Option<String>,

        /// Field separator for every delimited file
        #[arg(long)]
        pub delimiter: Option<String>,

        /// Optional TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    impl CliConfig {
        /// 合併設定：預設值 < TOML 檔 < 命令列參數
        pub fn resolve(&self) -> Result<EtlConfig> {
            let mut config = EtlConfig::default();

            if let Some(path) = &self.config {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.apply_to(&mut config)?;
            }

            if let Some(dir) = &self.input_dir {
                config.input_dir = dir.clone();
            }
            if let Some(dir) = &self.output_dir {
                config.output_dir = dir.clone();
            }
            if let Some(dir) = &self.temp_dir {
                config.temp_dir = dir.clone();
            }
            if let Some(file) = &self.result_file {
                config.result_file = file.clone();
            }
            if let Some(delimiter) = &self.delimiter {
                config.delimiter = parse_delimiter("--delimiter", delimiter)?;
            }
            if self.monitor {
                config.monitor = true;
            }

            Ok(config)
        }
    }
}
