//! Training loop for the card classifier.
//!
//! A manual epoch/mini-batch loop on `Autodiff<NdArray>`: Adam, cross
//! entropy, per-epoch validation accuracy, best-checkpoint keeping, and
//! early stopping. With a pretrained backbone the backbone output is
//! detached from the autodiff graph so only the head receives gradients.

use std::path::{Path, PathBuf};

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::{Int, Tensor, backend::Backend};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::metrics::{ConfusionMatrix, argmax};
use super::model::{CardClassifier, ClassifierConfig, save_config};
use super::{Augmenter, ClassMapping, FolderDataset, LabeledImage, MlError, decode_normalized};
use super::CLASS_MAPPING_FILE_NAME;

type TrainBackend = Autodiff<NdArray>;

/// Trainer hyperparameters.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub image_size: usize,
    pub hidden_size: usize,
    pub dropout: f64,
    /// Fraction of each class held out for validation.
    pub val_fraction: f32,
    /// Epochs without validation improvement before stopping. 0 disables.
    pub patience: usize,
    pub seed: u64,
    pub augment: bool,
    /// Model directory whose backbone is loaded and frozen.
    pub pretrained_backbone: Option<PathBuf>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 12,
            batch_size: 32,
            learning_rate: 1e-3,
            image_size: 160,
            hidden_size: 128,
            dropout: 0.3,
            val_fraction: 0.2,
            patience: 4,
            seed: 42,
            augment: true,
            pretrained_backbone: None,
        }
    }
}

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub classes: Vec<String>,
    pub train_samples: usize,
    pub val_samples: usize,
    pub epochs_run: usize,
    pub best_epoch: usize,
    pub best_accuracy: f32,
    /// Confusion matrix of the best checkpoint on the validation set.
    pub confusion: ConfusionMatrix,
    pub stopped_early: bool,
}

/// Tracks the best validation accuracy and how long it has been stale.
#[derive(Debug, Clone)]
struct BestTracker {
    best: f32,
    best_epoch: usize,
    stale: usize,
}

impl BestTracker {
    fn new() -> Self {
        Self {
            best: f32::NEG_INFINITY,
            best_epoch: 0,
            stale: 0,
        }
    }

    /// Record an epoch result; returns true when it improved on the best.
    fn observe(&mut self, epoch: usize, accuracy: f32) -> bool {
        if accuracy > self.best {
            self.best = accuracy;
            self.best_epoch = epoch;
            self.stale = 0;
            true
        } else {
            self.stale += 1;
            false
        }
    }

    fn should_stop(&self, patience: usize) -> bool {
        patience > 0 && self.stale >= patience
    }
}

/// Train a classifier on the folder tree at `data_dir` and write the model
/// artifacts (config, weight records, class mapping) into `out_dir`.
pub fn train(
    data_dir: &Path,
    out_dir: &Path,
    options: &TrainOptions,
) -> Result<TrainReport, MlError> {
    let dataset = FolderDataset::scan(data_dir)?;
    if dataset.classes.len() < 2 {
        return Err(MlError::Dataset(format!(
            "Need at least 2 classes with images, found {}",
            dataset.classes.len()
        )));
    }

    let config = ClassifierConfig::new(dataset.classes.len())
        .with_image_size(options.image_size)
        .with_hidden_size(options.hidden_size)
        .with_dropout(options.dropout);
    config.validate()?;

    std::fs::create_dir_all(out_dir).map_err(|source| MlError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;
    save_config(&config, out_dir)?;
    let mapping = ClassMapping::from_names(dataset.classes.clone());
    mapping.save(&out_dir.join(CLASS_MAPPING_FILE_NAME))?;

    let (train_set, val_set) = dataset.split(options.val_fraction, options.seed);
    if train_set.is_empty() {
        return Err(MlError::Dataset("No training samples after split".into()));
    }
    tracing::info!(
        "Training on {} samples, validating on {} ({} classes)",
        train_set.len(),
        val_set.len(),
        dataset.classes.len()
    );

    let device = NdArrayDevice::default();
    let mut model = config.init::<TrainBackend>(&device);
    let frozen_backbone = match &options.pretrained_backbone {
        Some(pretrained_dir) => {
            model = model.with_pretrained_backbone(pretrained_dir, &device)?;
            tracing::info!(
                "Loaded pretrained backbone from {}; backbone frozen",
                pretrained_dir.display()
            );
            true
        }
        None => false,
    };

    let loss_fn = CrossEntropyLossConfig::new().init(&device);
    let mut optim = AdamConfig::new().init();
    let mut augmenter = options
        .augment
        .then(|| Augmenter::new(options.seed.wrapping_add(97)));
    // Checkpoint selection falls back to the training set when no samples
    // were held out.
    let eval_set: &[LabeledImage] = if val_set.is_empty() {
        &train_set
    } else {
        &val_set
    };

    let mut tracker = BestTracker::new();
    let mut best_confusion = ConfusionMatrix::new(dataset.classes.len());
    let mut epochs_run = 0usize;
    let mut stopped_early = false;
    let mut order: Vec<usize> = (0..train_set.len()).collect();

    for epoch in 1..=options.epochs {
        epochs_run = epoch;
        let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(epoch as u64));
        order.shuffle(&mut rng);

        let mut loss_sum = 0f32;
        let mut batches = 0usize;
        for chunk in order.chunks(options.batch_size.max(1)) {
            let batch: Vec<LabeledImage> =
                chunk.iter().map(|&idx| train_set[idx].clone()).collect();
            let (images, targets) = batch_tensors::<TrainBackend>(
                &batch,
                config.image_size,
                augmenter.as_mut(),
                &device,
            )?;

            let features = model.backbone.forward(images);
            let features = if frozen_backbone {
                features.detach()
            } else {
                features
            };
            let logits = model.head.forward(features);
            let loss = loss_fn.forward(logits, targets);
            loss_sum += loss.clone().into_scalar();
            batches += 1;

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(options.learning_rate, model, grads);
        }

        let confusion = evaluate(
            &model.valid(),
            eval_set,
            config.image_size,
            options.batch_size.max(1),
            dataset.classes.len(),
            &device,
        )?;
        let accuracy = confusion.accuracy();
        tracing::info!(
            "epoch {epoch}/{}: train_loss={:.4} eval_acc={:.4}",
            options.epochs,
            loss_sum / batches.max(1) as f32,
            accuracy
        );

        if tracker.observe(epoch, accuracy) {
            model.save_records(out_dir)?;
            best_confusion = confusion;
        }
        if tracker.should_stop(options.patience) {
            tracing::info!(
                "Early stop after epoch {epoch}; best epoch was {}",
                tracker.best_epoch
            );
            stopped_early = true;
            break;
        }
    }

    Ok(TrainReport {
        classes: dataset.classes,
        train_samples: train_set.len(),
        val_samples: val_set.len(),
        epochs_run,
        best_epoch: tracker.best_epoch,
        best_accuracy: tracker.best.max(0.0),
        confusion: best_confusion,
        stopped_early,
    })
}

/// Decode a batch of samples into image and target tensors.
fn batch_tensors<B: Backend>(
    samples: &[LabeledImage],
    image_size: usize,
    mut augmenter: Option<&mut Augmenter>,
    device: &B::Device,
) -> Result<(Tensor<B, 4>, Tensor<B, 1, Int>), MlError> {
    let mut pixels = Vec::with_capacity(samples.len() * 3 * image_size * image_size);
    let mut targets = Vec::with_capacity(samples.len());
    for sample in samples {
        let data = decode_normalized(&sample.path, image_size, augmenter.as_deref_mut())?;
        pixels.extend_from_slice(&data);
        targets.push(sample.class_index as i64);
    }
    let images = Tensor::<B, 1>::from_floats(pixels.as_slice(), device).reshape([
        samples.len(),
        3,
        image_size,
        image_size,
    ]);
    let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), device);
    Ok((images, targets))
}

/// Run the model over `samples` and collect a confusion matrix.
fn evaluate<B: Backend>(
    model: &CardClassifier<B>,
    samples: &[LabeledImage],
    image_size: usize,
    batch_size: usize,
    n_classes: usize,
    device: &B::Device,
) -> Result<ConfusionMatrix, MlError> {
    let mut confusion = ConfusionMatrix::new(n_classes);
    for chunk in samples.chunks(batch_size) {
        let (images, _targets) = batch_tensors::<B>(chunk, image_size, None, device)?;
        let logits = model.forward(images);
        let rows = logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|err| MlError::TensorData(format!("{err:?}")))?;
        for (row, sample) in rows.chunks(n_classes).zip(chunk) {
            confusion.add(sample.class_index, argmax(row));
        }
    }
    Ok(confusion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn best_tracker_counts_stale_epochs() {
        let mut tracker = BestTracker::new();
        assert!(tracker.observe(1, 0.5));
        assert!(!tracker.observe(2, 0.4));
        assert!(!tracker.observe(3, 0.5));
        assert!(tracker.should_stop(2));
        assert!(tracker.observe(4, 0.6));
        assert!(!tracker.should_stop(2));
        assert_eq!(tracker.best_epoch, 4);
    }

    fn seed_training_folder(root: &std::path::Path) {
        for (class, color) in [("dark", Rgb([10u8, 10, 10])), ("light", Rgb([240, 240, 240]))] {
            let dir = root.join(class);
            std::fs::create_dir_all(&dir).unwrap();
            for idx in 0..4 {
                RgbImage::from_pixel(24, 24, color)
                    .save(dir.join(format!("{idx}.png")))
                    .unwrap();
            }
        }
    }

    fn tiny_options() -> TrainOptions {
        TrainOptions {
            epochs: 2,
            batch_size: 4,
            image_size: 20,
            hidden_size: 16,
            val_fraction: 0.25,
            patience: 0,
            augment: false,
            ..TrainOptions::default()
        }
    }

    #[test]
    fn training_writes_all_artifacts() {
        let data = tempdir().unwrap();
        let out = tempdir().unwrap();
        seed_training_folder(data.path());

        let report = train(data.path(), out.path(), &tiny_options()).unwrap();
        assert_eq!(report.classes, vec!["dark", "light"]);
        assert_eq!(report.train_samples + report.val_samples, 8);
        assert_eq!(report.epochs_run, 2);
        for artifact in ["model.json", "class_mapping.json", "backbone.bin", "head.bin"] {
            assert!(out.path().join(artifact).is_file(), "missing {artifact}");
        }
    }

    #[test]
    fn pretrained_backbone_is_accepted() {
        let data = tempdir().unwrap();
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        seed_training_folder(data.path());

        train(data.path(), first.path(), &tiny_options()).unwrap();
        let mut options = tiny_options();
        options.pretrained_backbone = Some(first.path().to_path_buf());
        let report = train(data.path(), second.path(), &options).unwrap();
        assert!(second.path().join("head.bin").is_file());
        assert!(report.best_accuracy >= 0.0);
    }

    #[test]
    fn single_class_folders_are_rejected() {
        let data = tempdir().unwrap();
        let out = tempdir().unwrap();
        let dir = data.path().join("only");
        std::fs::create_dir_all(&dir).unwrap();
        RgbImage::from_pixel(24, 24, Rgb([1, 2, 3]))
            .save(dir.join("a.png"))
            .unwrap();
        assert!(matches!(
            train(data.path(), out.path(), &tiny_options()),
            Err(MlError::Dataset(_))
        ));
    }
}
