use crate::domain::model::{Extraction, Record, TransformResult, ValidationReport};
use crate::utils::error::Result;

/// Filesystem boundary. Paths are relative to the storage root.
pub trait Storage {
    /// 列出目錄中指定副檔名的檔案名稱（已排序）
    fn list_files(&self, dir: &str, extension: &str) -> Result<Vec<String>>;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// 確保目錄存在，回傳是否為新建立
    fn ensure_dir(&self, path: &str) -> Result<bool>;
}

pub trait ConfigProvider {
    fn input_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn temp_dir(&self) -> &str;
    fn processed_file(&self) -> &str;
    fn result_file(&self) -> &str;
    fn delimiter(&self) -> u8;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Extraction>;
    fn prepare(&self) -> Result<()>;
    fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<String>;
    fn validate(&self, result: &TransformResult) -> Result<ValidationReport>;
    fn report(&self, report: &ValidationReport) -> Result<String>;
}
