//! Classifier stack: model definition, folder dataset, training loop, and
//! app-side inference.
//!
//! Training runs on `Autodiff<NdArray>`; the app loads the saved records on
//! the plain `NdArray` backend so inference never needs a GPU stack.

mod augment;
mod dataset;
mod infer;
mod mapping;
pub mod metrics;
mod model;
mod train;

use std::path::PathBuf;

use thiserror::Error;

pub use augment::Augmenter;
pub use dataset::{FolderDataset, LabeledImage, decode_normalized};
pub use infer::{ImageClassifier, Prediction};
pub use mapping::{CLASS_MAPPING_FILE_NAME, ClassMapping, MappingError};
pub use model::{Backbone, CardClassifier, ClassifierConfig, Head, MODEL_CONFIG_FILE_NAME};
pub use train::{TrainOptions, TrainReport, train};

/// Errors raised by the classifier stack.
#[derive(Debug, Error)]
pub enum MlError {
    /// The model directory does not exist or is missing artifacts.
    #[error("Model directory not found or incomplete: {path}")]
    MissingModelDir { path: PathBuf },
    /// The model config file could not be read or parsed.
    #[error("Failed to load model config {path}: {message}")]
    Config { path: PathBuf, message: String },
    /// A weights record could not be loaded or saved.
    #[error("Failed to access model weights {path}: {message}")]
    Record { path: PathBuf, message: String },
    /// An image could not be decoded.
    #[error("Failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The class mapping file is missing or inconsistent.
    #[error(transparent)]
    Mapping(#[from] MappingError),
    /// The training data is unusable.
    #[error("Training data error: {0}")]
    Dataset(String),
    /// Scanning the training folder failed.
    #[error(transparent)]
    Library(#[from] crate::library::LibraryError),
    /// An artifact directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Tensor data could not be read back from the backend.
    #[error("Failed to read tensor data: {0}")]
    TensorData(String),
}
