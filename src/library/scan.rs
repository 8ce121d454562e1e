use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

/// Errors raised while scanning the image folder tree.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The configured images folder does not exist.
    #[error("Images folder not found: {path}")]
    MissingRoot { path: PathBuf },
    /// A directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One labeled class: the folder name and the images inside it.
#[derive(Debug, Clone)]
pub struct ImageClass {
    /// Class label, taken verbatim from the folder name.
    pub name: String,
    /// Image files directly inside the class folder, sorted by path.
    pub images: Vec<PathBuf>,
}

/// A drawn exercise card: one image together with its true class.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub class_name: String,
    pub image: PathBuf,
}

/// Scanned image library, classes sorted by name.
#[derive(Debug, Clone, Default)]
pub struct ImageLibrary {
    classes: Vec<ImageClass>,
}

impl ImageLibrary {
    /// Scan `root` for class folders. Classes without any supported image
    /// are dropped; an empty result is not an error.
    pub fn scan(root: &Path) -> Result<Self, LibraryError> {
        if !root.is_dir() {
            return Err(LibraryError::MissingRoot {
                path: root.to_path_buf(),
            });
        }
        let mut classes = Vec::new();
        for entry in list_dir(root)? {
            if !entry.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let mut images: Vec<PathBuf> = list_dir(&entry)?
                .into_iter()
                .filter(|path| path.is_file() && is_supported_image(path))
                .collect();
            if images.is_empty() {
                tracing::debug!("Skipping class folder without images: {}", entry.display());
                continue;
            }
            images.sort();
            classes.push(ImageClass {
                name: name.to_string(),
                images,
            });
        }
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::info!(
            "Image library: {} classes, {} images",
            classes.len(),
            classes.iter().map(|class| class.images.len()).sum::<usize>()
        );
        Ok(Self { classes })
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[ImageClass] {
        &self.classes
    }

    /// Class labels in sorted order.
    pub fn class_names(&self) -> Vec<String> {
        self.classes.iter().map(|class| class.name.clone()).collect()
    }

    /// Draw a random card: a random class, then a random image within it.
    pub fn draw_card<R: Rng>(&self, rng: &mut R) -> Option<Card> {
        let class = self.classes.choose(rng)?;
        let image = class.images.choose(rng)?;
        Some(Card {
            class_name: class.name.clone(),
            image: image.clone(),
        })
    }
}

fn list_dir(path: &Path) -> Result<Vec<PathBuf>, LibraryError> {
    let entries = std::fs::read_dir(path).map_err(|source| LibraryError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect())
}

/// Image formats the exercises (and the trainer) accept.
pub(crate) fn is_supported_image(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref(),
        Some("png" | "jpg" | "jpeg")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    fn seed_library(root: &Path) {
        for (class, files) in [
            ("cat", vec!["a.png", "b.jpg"]),
            ("dog", vec!["x.jpeg"]),
            ("empty", vec![]),
            ("notes", vec!["readme.txt"]),
        ] {
            let dir = root.join(class);
            std::fs::create_dir_all(&dir).unwrap();
            for file in files {
                std::fs::write(dir.join(file), b"img").unwrap();
            }
        }
    }

    #[test]
    fn scan_keeps_only_classes_with_images() {
        let dir = tempdir().unwrap();
        seed_library(dir.path());
        let library = ImageLibrary::scan(dir.path()).unwrap();
        assert_eq!(library.class_names(), vec!["cat", "dog"]);
        assert_eq!(library.classes()[0].images.len(), 2);
    }

    #[test]
    fn scan_missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let result = ImageLibrary::scan(&dir.path().join("nope"));
        assert!(matches!(result, Err(LibraryError::MissingRoot { .. })));
    }

    #[test]
    fn drawn_card_belongs_to_its_class_folder() {
        let dir = tempdir().unwrap();
        seed_library(dir.path());
        let library = ImageLibrary::scan(dir.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let card = library.draw_card(&mut rng).unwrap();
            assert!(card.image.starts_with(dir.path().join(&card.class_name)));
        }
    }

    #[test]
    fn empty_library_draws_nothing() {
        let dir = tempdir().unwrap();
        let library = ImageLibrary::scan(dir.path()).unwrap();
        assert!(library.is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(library.draw_card(&mut rng).is_none());
    }
}
