pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{local::LocalStorage, EtlConfig};
pub use core::{etl::EtlEngine, pipeline::PlayerPipeline};
pub use domain::model::{PlayerRecord, PlayerType, RunReport, ValidationRow, Verdict};
pub use utils::error::{EtlError, Result};
