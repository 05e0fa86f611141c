use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// In-memory storage keyed by `/`-separated relative paths.
#[derive(Default)]
pub struct MockStorage {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    dirs: RefCell<BTreeSet<String>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, content: &str) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.as_bytes().to_vec());
    }

    pub fn get_text(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.borrow().contains(path)
    }
}

impl Storage for MockStorage {
    fn list_files(&self, dir: &str, extension: &str) -> Result<Vec<String>> {
        let files = self.files.borrow();
        let names = files
            .keys()
            .map(Path::new)
            .filter(|path| path.parent() == Some(Path::new(dir)))
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Ok(names)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.files.borrow_mut().insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn ensure_dir(&self, path: &str) -> Result<bool> {
        Ok(self.dirs.borrow_mut().insert(path.to_string()))
    }
}
