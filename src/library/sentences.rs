use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

/// Column the sentence builder reads from the CSV file.
const SENTENCE_COLUMN: &str = "sentence";

/// Errors raised while loading the sentence bank.
#[derive(Debug, Error)]
pub enum SentenceError {
    /// The configured CSV file does not exist.
    #[error("Sentences file not found: {path}")]
    MissingFile { path: PathBuf },
    /// The CSV file could not be read or parsed.
    #[error("Failed to read sentences from {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },
    /// The CSV file has no `sentence` column.
    #[error("Sentences file {path} has no '{SENTENCE_COLUMN}' column")]
    MissingColumn { path: PathBuf },
}

/// Sentences available to the sentence builder, in file order.
#[derive(Debug, Clone, Default)]
pub struct SentenceBank {
    sentences: Vec<String>,
}

impl SentenceBank {
    /// Load sentences from a CSV file with a `sentence` header column.
    /// Blank cells are dropped; surrounding whitespace is trimmed.
    pub fn load(path: &Path) -> Result<Self, SentenceError> {
        if !path.is_file() {
            return Err(SentenceError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let map_err = |source: csv::Error| SentenceError::Read {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::Reader::from_path(path).map_err(map_err)?;
        let column = reader
            .headers()
            .map_err(map_err)?
            .iter()
            .position(|header| header.trim() == SENTENCE_COLUMN)
            .ok_or_else(|| SentenceError::MissingColumn {
                path: path.to_path_buf(),
            })?;

        let mut sentences = Vec::new();
        for record in reader.records() {
            let record = record.map_err(map_err)?;
            if let Some(cell) = record.get(column) {
                let sentence = cell.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
            }
        }
        tracing::info!("Sentence bank: {} sentences", sentences.len());
        Ok(Self { sentences })
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Draw a random sentence with its stable index (used as the item id).
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<(usize, &str)> {
        if self.sentences.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.sentences.len());
        Some((index, self.sentences[index].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    fn write_csv(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.csv");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_trimmed_non_empty_sentences() {
        let (_dir, path) = write_csv("id,sentence\n1,  the cat sleeps \n2,\n3,dogs run fast\n");
        let bank = SentenceBank::load(&path).unwrap();
        assert_eq!(bank.len(), 2);
        let mut rng = StdRng::seed_from_u64(3);
        let (index, sentence) = bank.draw(&mut rng).unwrap();
        assert!(index < 2);
        assert!(!sentence.starts_with(' '));
    }

    #[test]
    fn missing_column_is_distinguished() {
        let (_dir, path) = write_csv("id,text\n1,hello there\n");
        assert!(matches!(
            SentenceBank::load(&path),
            Err(SentenceError::MissingColumn { .. })
        ));
    }

    #[test]
    fn missing_file_is_distinguished() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            SentenceBank::load(&dir.path().join("nope.csv")),
            Err(SentenceError::MissingFile { .. })
        ));
    }
}
