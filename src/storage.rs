use crate::store::Tables;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML file holding a snapshot of every table
#[derive(Debug, Clone)]
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// A missing or empty file yields empty tables
    pub fn load(&self) -> Result<Tables> {
        if !self.file_path.exists() {
            return Ok(Tables::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("reading {}", self.file_path.display()))?;
        Tables::parse(&content).with_context(|| format!("parsing {}", self.file_path.display()))
    }

    pub fn save(&self, tables: &Tables) -> Result<()> {
        let content = tables.to_toml()?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("writing {}", self.file_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("taskdeck.toml"));
        let tables = storage.load().unwrap();
        assert!(tables.tasks.is_empty());
        assert!(tables.contacts.is_empty());
    }

    #[test]
    fn test_load_empty_file_is_empty() {
        let temp_file = NamedTempFile::new().unwrap();
        let storage = Storage::new(temp_file.path());
        assert_eq!(storage.load().unwrap(), Tables::new());
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let storage = Storage::new(temp_file.path());
        let tables = Tables::fixtures().unwrap();

        storage.save(&tables).unwrap();
        assert_eq!(storage.load().unwrap(), tables);
    }

    #[test]
    fn test_load_reports_invalid_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[[tasks.records]\nid = ").unwrap();
        let storage = Storage::new(temp_file.path());
        let err = storage.load().unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }
}
