use std::path::PathBuf;

use thiserror::Error;

use crate::math::ShapeError;

/// Failures while reading or shaping the training data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to fetch dataset from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is empty")]
    Empty,
    #[error("row {row}: expected {expected} columns, found {found}")]
    Width {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: outcome must be 0 or 1, found {value}")]
    Label { row: usize, value: i32 },
    #[error("features have {features} rows but labels have {labels}")]
    LengthMismatch { features: usize, labels: usize },
    #[error("invalid split: {0}")]
    Split(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Failures while persisting or loading the model and scaler.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Required file not found: {file}. Please make sure both 'diabetes_model.pkl' and 'scaler.pkl' are in {dir}.")]
    Missing { file: String, dir: PathBuf },
    #[error("artifact {} could not be decoded: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model expects {model} features but scaler was fitted on {scaler}")]
    FeatureMismatch { model: usize, scaler: usize },
    #[error("scaler does not belong to this model (model expects {expected}, scaler is {found})")]
    ScalerMismatch { expected: String, found: String },
    #[error("model has not been fitted")]
    Unfitted,
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode artifact: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures on the per-request prediction path. All of them are recoverable.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
    #[error("expected {expected} features, got {found}")]
    Width { expected: usize, found: usize },
    #[error("model has not been fitted")]
    Unfitted,
    #[error("model returned no prediction")]
    EmptyPrediction,
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
