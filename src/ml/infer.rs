//! App-side inference over a trained model directory.

use std::path::Path;

use burn::backend::NdArray;
use burn::backend::ndarray::NdArrayDevice;
use burn::tensor::Tensor;

use super::metrics::{argmax, softmax};
use super::model::{self, CardClassifier, ClassifierConfig};
use super::{CLASS_MAPPING_FILE_NAME, ClassMapping, MlError, decode_normalized};

/// Class probabilities for one image.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Name of the most probable class.
    pub class_name: String,
    /// Probability of the most probable class.
    pub confidence: f32,
    /// Full softmax distribution in class-index order.
    pub probabilities: Vec<f32>,
}

/// A loaded classifier ready to score images.
pub struct ImageClassifier {
    model: CardClassifier<NdArray>,
    config: ClassifierConfig,
    mapping: ClassMapping,
    device: NdArrayDevice,
}

impl ImageClassifier {
    /// Load config, weight records, and class mapping from a model
    /// directory produced by the trainer.
    pub fn load(dir: &Path) -> Result<Self, MlError> {
        if !dir.is_dir() {
            return Err(MlError::MissingModelDir {
                path: dir.to_path_buf(),
            });
        }
        let config = model::load_config(dir)?;
        let mapping = ClassMapping::load(&dir.join(CLASS_MAPPING_FILE_NAME))?;
        if mapping.len() != config.num_classes {
            return Err(MlError::Dataset(format!(
                "Class mapping has {} entries but the model expects {}",
                mapping.len(),
                config.num_classes
            )));
        }
        let device = NdArrayDevice::default();
        let model = config
            .init::<NdArray>(&device)
            .load_records(dir, &device)?;
        tracing::info!(
            "Loaded classifier from {} ({} classes, {}px inputs)",
            dir.display(),
            config.num_classes,
            config.image_size
        );
        Ok(Self {
            model,
            config,
            mapping,
            device,
        })
    }

    /// Class names in model output order.
    pub fn class_names(&self) -> &[String] {
        self.mapping.names()
    }

    /// Score one image and return the softmax distribution.
    pub fn predict(&self, image_path: &Path) -> Result<Prediction, MlError> {
        let size = self.config.image_size;
        let data = decode_normalized(image_path, size, None)?;
        let input =
            Tensor::<NdArray, 1>::from_floats(data.as_slice(), &self.device).reshape([
                1, 3, size, size,
            ]);
        let logits = self.model.forward(input);
        let row = logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|err| MlError::TensorData(format!("{err:?}")))?;
        let probabilities = softmax(&row);
        let top = argmax(&probabilities);
        Ok(Prediction {
            class_name: self
                .mapping
                .name_for(top)
                .unwrap_or_default()
                .to_string(),
            confidence: probabilities.get(top).copied().unwrap_or(0.0),
            probabilities,
        })
    }

    /// The model's probability for `class_name` on this image, or `None`
    /// when the class is not one the model was trained on.
    pub fn confidence_for(
        &self,
        image_path: &Path,
        class_name: &str,
    ) -> Result<Option<f32>, MlError> {
        let Some(index) = self.mapping.index_of(class_name) else {
            return Ok(None);
        };
        let prediction = self.predict(image_path)?;
        Ok(prediction.probabilities.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::train::{TrainOptions, train};
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn missing_model_dir_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            ImageClassifier::load(&dir.path().join("none")),
            Err(MlError::MissingModelDir { .. })
        ));
    }

    #[test]
    fn trained_model_scores_images_with_a_distribution() {
        let data = tempdir().unwrap();
        let out = tempdir().unwrap();
        for (class, color) in [("dark", Rgb([5u8, 5, 5])), ("light", Rgb([250, 250, 250]))] {
            let dir = data.path().join(class);
            std::fs::create_dir_all(&dir).unwrap();
            for idx in 0..4 {
                RgbImage::from_pixel(24, 24, color)
                    .save(dir.join(format!("{idx}.png")))
                    .unwrap();
            }
        }
        let options = TrainOptions {
            epochs: 2,
            batch_size: 4,
            image_size: 20,
            hidden_size: 16,
            val_fraction: 0.25,
            patience: 0,
            augment: false,
            ..TrainOptions::default()
        };
        train(data.path(), out.path(), &options).unwrap();

        let classifier = ImageClassifier::load(out.path()).unwrap();
        assert_eq!(classifier.class_names(), ["dark", "light"]);

        let sample = data.path().join("dark").join("0.png");
        let prediction = classifier.predict(&sample).unwrap();
        let sum: f32 = prediction.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        assert!(classifier.class_names().contains(&prediction.class_name));

        let confidence = classifier.confidence_for(&sample, "dark").unwrap();
        assert!(confidence.is_some());
        assert!(classifier
            .confidence_for(&sample, "unknown-class")
            .unwrap()
            .is_none());
    }
}
