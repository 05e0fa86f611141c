use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".".to_string())
    }
}

impl Storage for LocalStorage {
    fn list_files(&self, dir: &str, extension: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(self.resolve(dir))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        // read_dir 不保證順序
        names.sort();
        Ok(names)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn ensure_dir(&self, path: &str) -> Result<bool> {
        let full_path = self.resolve(path);
        if full_path.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(full_path)?;
        Ok(true)
    }
}
