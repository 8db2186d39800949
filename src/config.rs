// src/config.rs
use crate::error::{Result, WikiError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Engine configuration: where the corpus lives and how to read it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the wiki.
    pub root_dir: PathBuf,
    /// Accepted document extensions; the first one is the canonical
    /// extension appended to normalized link targets.
    pub file_extensions: Vec<String>,
    /// Name used for the graph and default output files.
    pub graph_name: String,
    /// Separator for list-valued request parameters.
    pub separator: String,
}

impl Config {
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            file_extensions: vec!["wiki".to_string()],
            graph_name: "wikigraph".to_string(),
            separator: ";".to_string(),
        }
    }

    /// The canonical document extension.
    #[must_use]
    pub fn doc_extension(&self) -> &str {
        self.file_extensions
            .first()
            .map(String::as_str)
            .unwrap_or("wiki")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory is missing or no extension
    /// is accepted.
    pub fn validate(&self) -> Result<()> {
        if self.file_extensions.is_empty() {
            return Err(WikiError::Config(
                "at least one file extension is required".to_string(),
            ));
        }
        if !self.root_dir.is_dir() {
            return Err(WikiError::Config(format!(
                "root directory not found: {}",
                self.root_dir.display()
            )));
        }
        Ok(())
    }

    /// Layers defaults from a TOML config file over this configuration.
    /// Only keys present in the file are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or not valid TOML.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|e| WikiError::io(e, path))?;
        let file: FileConfig = toml::from_str(&text)
            .map_err(|e| WikiError::Config(format!("{}: {e}", path.display())))?;
        if let Some(root_dir) = file.root_dir {
            self.root_dir = root_dir;
        }
        if let Some(file_extensions) = file.file_extensions {
            self.file_extensions = file_extensions;
        }
        if let Some(graph_name) = file.graph_name {
            self.graph_name = graph_name;
        }
        if let Some(separator) = file.separator {
            self.separator = separator;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

/// On-disk shape of the optional config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    root_dir: Option<PathBuf>,
    file_extensions: Option<Vec<String>>,
    graph_name: Option<String>,
    separator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("/tmp/wiki");
        assert_eq!(config.doc_extension(), "wiki");
        assert_eq!(config.separator, ";");
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let config = Config::new("/definitely/not/a/real/dir");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = Config::new("/tmp");
        config.file_extensions.clear();
        assert!(config.validate().is_err());
    }
}
