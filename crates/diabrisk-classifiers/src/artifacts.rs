//! Durable model and scaler artifacts.
//!
//! Both objects are stored as JSON under fixed file names that the predictor
//! looks up literally. The `.pkl` suffix is part of that contract; the content
//! is not a Python pickle.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ArtifactError;
use crate::models::{ClassifierModel, GBDTClassifier};
use crate::preprocessing::{Scaler, ZeroImputer};

pub const MODEL_FILE: &str = "diabetes_model.pkl";
pub const SCALER_FILE: &str = "scaler.pkl";

/// Contents of the model file: the fitted classifier, the medians the
/// training data was imputed with, and the fingerprint of the scaler it was
/// trained behind.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    pub classifier: GBDTClassifier,
    pub imputer: ZeroImputer,
    pub scaler_fingerprint: String,
}

impl ModelArtifact {
    pub fn new(classifier: GBDTClassifier, imputer: ZeroImputer, scaler: &Scaler) -> Self {
        ModelArtifact {
            classifier,
            imputer,
            scaler_fingerprint: scaler.fingerprint(),
        }
    }
}

/// Paths written by [`save_artifacts`].
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        ArtifactPaths {
            model: dir.as_ref().join(MODEL_FILE),
            scaler: dir.as_ref().join(SCALER_FILE),
        }
    }
}

/// Persist a fitted model and its scaler into `dir`.
///
/// Both payloads are encoded and written to temporary siblings before either
/// is renamed into place.
pub fn save_artifacts<P: AsRef<Path>>(
    dir: P,
    model: &ModelArtifact,
    scaler: &Scaler,
) -> Result<ArtifactPaths, ArtifactError> {
    if !model.classifier.is_fitted() {
        return Err(ArtifactError::Unfitted);
    }
    check_feature_count(&model.classifier, scaler)?;
    check_fingerprint(model, scaler)?;

    let dir = dir.as_ref();
    let model_json = serde_json::to_vec(model)?;
    let scaler_json = serde_json::to_vec_pretty(scaler)?;

    fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = ArtifactPaths::in_dir(dir);
    let model_tmp = stage(&paths.model, &model_json)?;
    let scaler_tmp = stage(&paths.scaler, &scaler_json)?;
    persist(model_tmp, &paths.model)?;
    persist(scaler_tmp, &paths.scaler)?;
    log::info!(
        "Saved model to {} and scaler to {}",
        paths.model.display(),
        paths.scaler.display()
    );
    Ok(paths)
}

/// Load the model and scaler from `dir`.
///
/// A missing file yields [`ArtifactError::Missing`] naming it; the model is
/// checked first.
pub fn load_artifacts<P: AsRef<Path>>(dir: P) -> Result<(ModelArtifact, Scaler), ArtifactError> {
    let dir = dir.as_ref();
    let paths = ArtifactPaths::in_dir(dir);
    for (path, name) in [(&paths.model, MODEL_FILE), (&paths.scaler, SCALER_FILE)] {
        if !path.is_file() {
            return Err(ArtifactError::Missing {
                file: name.to_string(),
                dir: dir.to_path_buf(),
            });
        }
    }

    let model: ModelArtifact = read_json(&paths.model)?;
    let scaler: Scaler = read_json(&paths.scaler)?;
    if !model.classifier.is_fitted() {
        return Err(ArtifactError::Unfitted);
    }
    check_feature_count(&model.classifier, &scaler)?;
    check_fingerprint(&model, &scaler)?;
    log::debug!("Loaded artifacts from {}", dir.display());
    Ok((model, scaler))
}

fn check_feature_count(model: &GBDTClassifier, scaler: &Scaler) -> Result<(), ArtifactError> {
    match model.n_features() {
        Some(n) if n == scaler.n_features() => Ok(()),
        Some(n) => Err(ArtifactError::FeatureMismatch {
            model: n,
            scaler: scaler.n_features(),
        }),
        None => Err(ArtifactError::Unfitted),
    }
}

fn check_fingerprint(model: &ModelArtifact, scaler: &Scaler) -> Result<(), ArtifactError> {
    let found = scaler.fingerprint();
    if model.scaler_fingerprint == found {
        Ok(())
    } else {
        Err(ArtifactError::ScalerMismatch {
            expected: model.scaler_fingerprint.clone(),
            found,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn io_error(path: &Path) -> impl Fn(std::io::Error) -> ArtifactError + '_ {
    move |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `bytes` to a synced temporary file next to `path`.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, ArtifactError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error(path))?;
    tmp.write_all(bytes).map_err(io_error(path))?;
    tmp.as_file().sync_all().map_err(io_error(path))?;
    Ok(tmp)
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<(), ArtifactError> {
    tmp.persist(path).map_err(|e| io_error(path)(e.error))?;
    Ok(())
}
