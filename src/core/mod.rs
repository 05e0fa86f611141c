pub mod etl;
pub mod ingest;
pub mod pipeline;
pub mod transform;
pub mod validate;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    Extraction, PlayerRecord, PlayerType, Record, RunReport, TransformResult, ValidationReport,
    ValidationRow, Verdict,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
