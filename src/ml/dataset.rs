//! Folder-per-class training data.
//!
//! The trainer reads the same layout the app's image library uses: one
//! subfolder per class, the folder name being the label.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Augmenter, MlError};
use crate::library::ImageLibrary;

/// ImageNet channel means used for input normalization.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet channel standard deviations used for input normalization.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// One training sample: an image path and its class index.
#[derive(Debug, Clone)]
pub struct LabeledImage {
    pub path: PathBuf,
    pub class_index: usize,
}

/// All labeled samples found under a training folder.
#[derive(Debug, Clone)]
pub struct FolderDataset {
    /// Class names in index order (sorted folder names).
    pub classes: Vec<String>,
    pub samples: Vec<LabeledImage>,
}

impl FolderDataset {
    /// Scan `root` for class folders and collect every labeled image.
    pub fn scan(root: &Path) -> Result<Self, MlError> {
        let library = ImageLibrary::scan(root)?;
        let classes = library.class_names();
        let mut samples = Vec::new();
        for (class_index, class) in library.classes().iter().enumerate() {
            for image in &class.images {
                samples.push(LabeledImage {
                    path: image.clone(),
                    class_index,
                });
            }
        }
        Ok(Self { classes, samples })
    }

    /// Split into train and validation sets, stratified per class so every
    /// class keeps at least one training sample. `val_fraction` is clamped
    /// to `[0, 0.5]`; classes with a single sample contribute it to the
    /// training set only.
    pub fn split(&self, val_fraction: f32, seed: u64) -> (Vec<LabeledImage>, Vec<LabeledImage>) {
        let val_fraction = val_fraction.clamp(0.0, 0.5);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut train = Vec::new();
        let mut val = Vec::new();
        for class_index in 0..self.classes.len() {
            let mut group: Vec<&LabeledImage> = self
                .samples
                .iter()
                .filter(|sample| sample.class_index == class_index)
                .collect();
            group.shuffle(&mut rng);
            let mut val_count = (group.len() as f32 * val_fraction).round() as usize;
            if val_fraction > 0.0 && group.len() >= 2 {
                val_count = val_count.clamp(1, group.len() - 1);
            } else {
                val_count = 0;
            }
            for (idx, sample) in group.into_iter().enumerate() {
                if idx < val_count {
                    val.push(sample.clone());
                } else {
                    train.push(sample.clone());
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        train.shuffle(&mut rng);
        val.shuffle(&mut rng);
        (train, val)
    }
}

/// Decode an image, resize it to `size` x `size`, optionally augment it,
/// and normalize it with ImageNet statistics into CHW float data.
pub fn decode_normalized(
    path: &Path,
    size: usize,
    augmenter: Option<&mut Augmenter>,
) -> Result<Vec<f32>, MlError> {
    let decoded = image::open(path).map_err(|source| MlError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded
        .resize_exact(size as u32, size as u32, FilterType::Triangle)
        .to_rgb8();
    let rgb = match augmenter {
        Some(augmenter) => augmenter.apply(rgb),
        None => rgb,
    };

    let mut data = Vec::with_capacity(3 * size * size);
    for channel in 0..3 {
        for pixel in rgb.pixels() {
            let value = pixel[channel] as f32 / 255.0;
            data.push((value - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel]);
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    fn write_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        img.save(path).unwrap();
    }

    fn seed_dataset(root: &Path, per_class: usize) {
        for class in ["ball", "cat", "dog"] {
            let dir = root.join(class);
            std::fs::create_dir_all(&dir).unwrap();
            for idx in 0..per_class {
                write_image(&dir.join(format!("{idx}.png")), 20, 16);
            }
        }
    }

    #[test]
    fn scan_indexes_classes_in_sorted_order() {
        let dir = tempdir().unwrap();
        seed_dataset(dir.path(), 2);
        let dataset = FolderDataset::scan(dir.path()).unwrap();
        assert_eq!(dataset.classes, vec!["ball", "cat", "dog"]);
        assert_eq!(dataset.samples.len(), 6);
        for sample in &dataset.samples {
            let class = &dataset.classes[sample.class_index];
            assert!(sample.path.starts_with(dir.path().join(class)));
        }
    }

    #[test]
    fn split_keeps_every_class_in_the_training_set() {
        let dir = tempdir().unwrap();
        seed_dataset(dir.path(), 5);
        let dataset = FolderDataset::scan(dir.path()).unwrap();
        let (train, val) = dataset.split(0.2, 42);
        assert_eq!(train.len() + val.len(), dataset.samples.len());
        assert_eq!(val.len(), 3);
        for class_index in 0..dataset.classes.len() {
            assert!(train.iter().any(|sample| sample.class_index == class_index));
            assert!(val.iter().any(|sample| sample.class_index == class_index));
        }
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let dir = tempdir().unwrap();
        seed_dataset(dir.path(), 4);
        let dataset = FolderDataset::scan(dir.path()).unwrap();
        let (train_a, _) = dataset.split(0.25, 7);
        let (train_b, _) = dataset.split(0.25, 7);
        let paths_a: Vec<_> = train_a.iter().map(|sample| sample.path.clone()).collect();
        let paths_b: Vec<_> = train_b.iter().map(|sample| sample.path.clone()).collect();
        assert_eq!(paths_a, paths_b);
    }

    #[test]
    fn decode_produces_chw_data_in_normalized_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");
        write_image(&path, 30, 10);
        let data = decode_normalized(&path, 16, None).unwrap();
        assert_eq!(data.len(), 3 * 16 * 16);
        for value in data {
            assert!((-3.0..=3.0).contains(&value));
        }
    }
}
