//! Class-index mapping persisted next to the model weights.
//!
//! The file maps stringified integer indices to class names, e.g.
//! `{"0": "ball", "1": "cat"}`. Keys must cover exactly `0..len`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the mapping inside a model directory.
pub const CLASS_MAPPING_FILE_NAME: &str = "class_mapping.json";

/// Errors raised while loading or saving the class mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping file could not be read.
    #[error("Failed to read class mapping {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The mapping file is not valid JSON.
    #[error("Failed to parse class mapping {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The mapping keys are not the contiguous indices `0..len`.
    #[error("Class mapping {path} has invalid indices (expected 0..{expected})")]
    InvalidIndices { path: PathBuf, expected: usize },
    /// The mapping file could not be written.
    #[error("Failed to write class mapping {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Lookup from model output index to human-readable class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    names: Vec<String>,
}

impl ClassMapping {
    /// Build a mapping from class names in index order.
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Class name for a model output index.
    pub fn name_for(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Model output index for a class name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    /// Write the mapping as `{"0": name, ...}`.
    pub fn save(&self, path: &Path) -> Result<(), MappingError> {
        let map: BTreeMap<String, &String> = self
            .names
            .iter()
            .enumerate()
            .map(|(index, name)| (index.to_string(), name))
            .collect();
        let text = serde_json::to_string_pretty(&map).map_err(|source| MappingError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| MappingError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a mapping, validating the keys are exactly `0..len`.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let text = std::fs::read_to_string(path).map_err(|source| MappingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let map: BTreeMap<String, String> =
            serde_json::from_str(&text).map_err(|source| MappingError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let invalid = || MappingError::InvalidIndices {
            path: path.to_path_buf(),
            expected: map.len(),
        };
        let mut names = vec![None; map.len()];
        for (key, name) in &map {
            let index: usize = key.parse().map_err(|_| invalid())?;
            let slot = names.get_mut(index).ok_or_else(invalid)?;
            *slot = Some(name.clone());
        }
        let names = names.into_iter().collect::<Option<Vec<_>>>().ok_or_else(invalid)?;
        Ok(Self { names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mapping_round_trips_with_stringified_indices() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CLASS_MAPPING_FILE_NAME);
        let mapping =
            ClassMapping::from_names(vec!["ball".into(), "cat".into(), "dog".into()]);
        mapping.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["1"], "cat");

        let loaded = ClassMapping::load(&path).unwrap();
        assert_eq!(loaded, mapping);
        assert_eq!(loaded.index_of("dog"), Some(2));
        assert_eq!(loaded.name_for(0), Some("ball"));
    }

    #[test]
    fn non_contiguous_indices_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CLASS_MAPPING_FILE_NAME);
        std::fs::write(&path, r#"{"0": "ball", "2": "cat"}"#).unwrap();
        assert!(matches!(
            ClassMapping::load(&path),
            Err(MappingError::InvalidIndices { .. })
        ));
    }

    #[test]
    fn non_numeric_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CLASS_MAPPING_FILE_NAME);
        std::fs::write(&path, r#"{"zero": "ball"}"#).unwrap();
        assert!(ClassMapping::load(&path).is_err());
    }
}
