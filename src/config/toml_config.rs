use crate::config::EtlConfig;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{parse_delimiter, validate_file_name, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: Option<PathsConfig>,
    pub format: Option<FormatConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub temp_dir: Option<String>,
    pub processed_file: Option<String>,
    pub result_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatConfig {
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_ROOT})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn delimiter(&self) -> Result<Option<u8>> {
        self.format
            .as_ref()
            .and_then(|f| f.delimiter.as_deref())
            .map(|d| parse_delimiter("format.delimiter", d))
            .transpose()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// 將檔案中有設定的欄位覆蓋到 `config`
    pub fn apply_to(&self, config: &mut EtlConfig) -> Result<()> {
        self.validate()?;

        if let Some(paths) = &self.paths {
            let overrides = [
                (&paths.input_dir, &mut config.input_dir),
                (&paths.output_dir, &mut config.output_dir),
                (&paths.temp_dir, &mut config.temp_dir),
                (&paths.processed_file, &mut config.processed_file),
                (&paths.result_file, &mut config.result_file),
            ];
            for (value, target) in overrides {
                if let Some(value) = value {
                    *target = value.clone();
                }
            }
        }

        if let Some(delimiter) = self.delimiter()? {
            config.delimiter = delimiter;
        }

        if self.monitoring_enabled() {
            config.monitor = true;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(paths) = &self.paths {
            let dirs = [
                ("paths.input_dir", &paths.input_dir),
                ("paths.output_dir", &paths.output_dir),
                ("paths.temp_dir", &paths.temp_dir),
                ("paths.result_file", &paths.result_file),
            ];
            for (field, value) in dirs {
                if let Some(value) = value {
                    validate_path(field, value)?;
                }
            }
            if let Some(file) = &paths.processed_file {
                validate_file_name("paths.processed_file", file)?;
            }
        }

        self.delimiter()?;
        Ok(())
    }
}
