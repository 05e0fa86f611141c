use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parse error in {source_file} line {line}: {message}")]
    ParseError {
        source_file: String,
        line: usize,
        message: String,
    },

    #[error("Field '{field}' is not numeric: {value}")]
    FieldTypeError { field: String, value: String },

    #[error("File '{file}' is missing column '{column}'")]
    MissingColumnError { file: String, column: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parsing,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::CsvError(_) | EtlError::SerializationError(_) | EtlError::ParseError { .. } => {
                ErrorCategory::Parsing
            }
            EtlError::FieldTypeError { .. } | EtlError::MissingColumnError { .. } => {
                ErrorCategory::Data
            }
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Parsing | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::IoError(_) => "確認輸入/輸出目錄存在且具有讀寫權限",
            EtlError::CsvError(_) => "檢查 CSV 檔案是否使用正確的分隔符號且每列欄位數一致",
            EtlError::SerializationError(_) | EtlError::ParseError { .. } => {
                "確認 JSON 檔案每行只包含一個 JSON 物件"
            }
            EtlError::FieldTypeError { .. } => "age / runs / wickets 欄位必須是數值或留空",
            EtlError::MissingColumnError { .. } => {
                "預期結果檔需包含 playerName;eventType;age;runs;wickets;playerType 欄位"
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "檢查命令列參數或 TOML 配置檔"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File system error: {}", self),
            ErrorCategory::Parsing => format!("Could not parse input data: {}", self),
            ErrorCategory::Data => format!("Invalid data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
