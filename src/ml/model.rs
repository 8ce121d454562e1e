//! The card classifier: a convolutional backbone and a small linear head.
//!
//! Backbone and head are separate modules so a pretrained backbone can be
//! loaded and frozen while a fresh head is trained for a new class set.

use std::path::Path;

use burn::{
    config::Config,
    module::Module,
    nn::{
        Dropout, DropoutConfig, Linear, LinearConfig, Relu,
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
    },
    record::{BinFileRecorder, FullPrecisionSettings},
    tensor::{Tensor, backend::Backend},
};

use super::MlError;

/// File name of the model config inside a model directory.
pub const MODEL_CONFIG_FILE_NAME: &str = "model.json";
/// Record stem of the backbone weights (`.bin` appended by the recorder).
pub const BACKBONE_RECORD_STEM: &str = "backbone";
/// Record stem of the head weights (`.bin` appended by the recorder).
pub const HEAD_RECORD_STEM: &str = "head";

/// Hyperparameters of the classifier, persisted as `model.json`.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Number of output classes.
    pub num_classes: usize,
    /// Square input size in pixels.
    #[config(default = 160)]
    pub image_size: usize,
    /// Width of the hidden linear layer.
    #[config(default = 128)]
    pub hidden_size: usize,
    /// Dropout probability between flatten and the hidden layer.
    #[config(default = 0.3)]
    pub dropout: f64,
}

impl ClassifierConfig {
    /// Side length of the final feature map.
    ///
    /// Each 3x3 conv (no padding) removes 2 pixels, each 2x2 pool halves:
    /// conv -> pool -> conv -> pool -> conv.
    pub fn feature_map_side(&self) -> usize {
        let after_conv1 = self.image_size.saturating_sub(2);
        let after_pool1 = after_conv1 / 2;
        let after_conv2 = after_pool1.saturating_sub(2);
        let after_pool2 = after_conv2 / 2;
        after_pool2.saturating_sub(2)
    }

    /// Flattened feature length produced by the backbone.
    pub fn feature_len(&self) -> usize {
        128 * self.feature_map_side() * self.feature_map_side()
    }

    /// Validate that the input size leaves a non-empty feature map.
    pub fn validate(&self) -> Result<(), MlError> {
        if self.num_classes < 2 {
            return Err(MlError::Dataset(format!(
                "Need at least 2 classes, got {}",
                self.num_classes
            )));
        }
        if self.feature_map_side() == 0 {
            return Err(MlError::Dataset(format!(
                "Image size {} is too small for the network (minimum 18)",
                self.image_size
            )));
        }
        Ok(())
    }

    /// Initialize a full classifier with random weights.
    pub fn init<B: Backend>(&self, device: &B::Device) -> CardClassifier<B> {
        CardClassifier {
            backbone: self.init_backbone(device),
            head: self.init_head(device),
        }
    }

    fn init_backbone<B: Backend>(&self, device: &B::Device) -> Backbone<B> {
        Backbone {
            conv1: Conv2dConfig::new([3, 32], [3, 3]).init(device),
            pool1: MaxPool2dConfig::new([2, 2]).init(),
            conv2: Conv2dConfig::new([32, 64], [3, 3]).init(device),
            pool2: MaxPool2dConfig::new([2, 2]).init(),
            conv3: Conv2dConfig::new([64, 128], [3, 3]).init(device),
            activation: Relu::new(),
        }
    }

    fn init_head<B: Backend>(&self, device: &B::Device) -> Head<B> {
        Head {
            dropout: DropoutConfig::new(self.dropout).init(),
            fc1: LinearConfig::new(self.feature_len(), self.hidden_size).init(device),
            fc2: LinearConfig::new(self.hidden_size, self.num_classes).init(device),
            activation: Relu::new(),
        }
    }
}

/// Convolutional feature extractor: three 3x3 conv stages with pooling.
#[derive(Module, Debug)]
pub struct Backbone<B: Backend> {
    conv1: Conv2d<B>,
    pool1: MaxPool2d,
    conv2: Conv2d<B>,
    pool2: MaxPool2d,
    conv3: Conv2d<B>,
    activation: Relu,
}

impl<B: Backend> Backbone<B> {
    /// Flattened features for a batch of `[batch, 3, size, size]` images.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch_size, _, _, _] = images.dims();
        let x = self.activation.forward(self.conv1.forward(images));
        let x = self.pool1.forward(x);
        let x = self.activation.forward(self.conv2.forward(x));
        let x = self.pool2.forward(x);
        let x = self.activation.forward(self.conv3.forward(x));
        let [_, channels, height, width] = x.dims();
        x.reshape([batch_size, channels * height * width])
    }
}

/// Classifier head: dropout, hidden linear layer, output layer.
#[derive(Module, Debug)]
pub struct Head<B: Backend> {
    dropout: Dropout,
    fc1: Linear<B>,
    fc2: Linear<B>,
    activation: Relu,
}

impl<B: Backend> Head<B> {
    /// Logits for a batch of flattened features.
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.dropout.forward(features);
        let x = self.activation.forward(self.fc1.forward(x));
        self.fc2.forward(x)
    }
}

/// The full classifier.
#[derive(Module, Debug)]
pub struct CardClassifier<B: Backend> {
    pub backbone: Backbone<B>,
    pub head: Head<B>,
}

impl<B: Backend> CardClassifier<B> {
    /// Logits for a batch of `[batch, 3, size, size]` images.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        self.head.forward(self.backbone.forward(images))
    }

    /// Persist both weight records into `dir`.
    pub fn save_records(&self, dir: &Path) -> Result<(), MlError> {
        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
        let map_err = |stem: &str| {
            let path = dir.join(format!("{stem}.bin"));
            move |err: burn::record::RecorderError| MlError::Record {
                path: path.clone(),
                message: err.to_string(),
            }
        };
        self.backbone
            .clone()
            .save_file(dir.join(BACKBONE_RECORD_STEM), &recorder)
            .map_err(map_err(BACKBONE_RECORD_STEM))?;
        self.head
            .clone()
            .save_file(dir.join(HEAD_RECORD_STEM), &recorder)
            .map_err(map_err(HEAD_RECORD_STEM))?;
        Ok(())
    }

    /// Load both weight records from `dir` into this model.
    pub fn load_records(self, dir: &Path, device: &B::Device) -> Result<Self, MlError> {
        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
        let map_err = |stem: &str| {
            let path = dir.join(format!("{stem}.bin"));
            move |err: burn::record::RecorderError| MlError::Record {
                path: path.clone(),
                message: err.to_string(),
            }
        };
        let backbone = self
            .backbone
            .load_file(dir.join(BACKBONE_RECORD_STEM), &recorder, device)
            .map_err(map_err(BACKBONE_RECORD_STEM))?;
        let head = self
            .head
            .load_file(dir.join(HEAD_RECORD_STEM), &recorder, device)
            .map_err(map_err(HEAD_RECORD_STEM))?;
        Ok(Self { backbone, head })
    }

    /// Replace the backbone with weights from another model directory,
    /// keeping the current head. Used for transfer learning.
    pub fn with_pretrained_backbone(
        self,
        dir: &Path,
        device: &B::Device,
    ) -> Result<Self, MlError> {
        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
        let backbone = self
            .backbone
            .load_file(dir.join(BACKBONE_RECORD_STEM), &recorder, device)
            .map_err(|err| MlError::Record {
                path: dir.join(format!("{BACKBONE_RECORD_STEM}.bin")),
                message: err.to_string(),
            })?;
        Ok(Self {
            backbone,
            head: self.head,
        })
    }
}

/// Load the persisted config from a model directory.
pub fn load_config(dir: &Path) -> Result<ClassifierConfig, MlError> {
    let path = dir.join(MODEL_CONFIG_FILE_NAME);
    ClassifierConfig::load(&path).map_err(|err| MlError::Config {
        path,
        message: err.to_string(),
    })
}

/// Persist the config into a model directory.
pub fn save_config(config: &ClassifierConfig, dir: &Path) -> Result<(), MlError> {
    let path = dir.join(MODEL_CONFIG_FILE_NAME);
    config.save(&path).map_err(|err| MlError::Config {
        path,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    #[test]
    fn feature_map_arithmetic_matches_the_layer_stack() {
        let config = ClassifierConfig::new(4).with_image_size(160);
        // 160 -> 158 -> 79 -> 77 -> 38 -> 36
        assert_eq!(config.feature_map_side(), 36);
        assert_eq!(config.feature_len(), 128 * 36 * 36);
    }

    #[test]
    fn too_small_inputs_are_rejected() {
        let config = ClassifierConfig::new(4).with_image_size(12);
        assert!(config.validate().is_err());
        let config = ClassifierConfig::new(1).with_image_size(160);
        assert!(config.validate().is_err());
    }

    #[test]
    fn forward_produces_one_logit_row_per_image() {
        let device = NdArrayDevice::default();
        let config = ClassifierConfig::new(3).with_image_size(32);
        let model = config.init::<NdArray>(&device);
        let images = Tensor::<NdArray, 4>::zeros([2, 3, 32, 32], &device);
        let logits = model.forward(images);
        assert_eq!(logits.dims(), [2, 3]);
    }
}
