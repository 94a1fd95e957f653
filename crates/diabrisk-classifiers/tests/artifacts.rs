//! Integration tests for model/scaler persistence and the cached predictor.

mod common;

use diabrisk_classifiers::artifacts::{
    load_artifacts, save_artifacts, ModelArtifact, MODEL_FILE, SCALER_FILE,
};
use diabrisk_classifiers::error::ArtifactError;
use diabrisk_classifiers::models::{ClassifierModel, GBDTClassifier};
use diabrisk_classifiers::predictor::{ArtifactCache, FormState, PatientInput, RiskForm};
use diabrisk_classifiers::preprocessing::{Scaler, ZeroImputer};

fn fitted() -> (ModelArtifact, Scaler, diabrisk_classifiers::math::Array2<f32>) {
    let mut ds = common::synthetic_dataset(300, 21);
    let imputer = ds.impute_zero_with_median();
    let split = ds.train_test_split(0.2, 42).unwrap();
    let scaler = Scaler::fit(&split.train.x).unwrap();
    let x_train = scaler.transform(&split.train.x).unwrap();
    let x_test = scaler.transform(&split.test.x).unwrap();

    let mut model = GBDTClassifier::new(common::fast_config());
    model.fit(&x_train, split.train.y.as_slice()).unwrap();
    (ModelArtifact::new(model, imputer, &scaler), scaler, x_test)
}

#[test]
fn reloaded_artifacts_predict_identically() {
    let (model, scaler, x_test) = fitted();
    let dir = tempfile::tempdir().unwrap();
    let paths = save_artifacts(dir.path(), &model, &scaler).unwrap();
    assert!(paths.model.ends_with(MODEL_FILE));
    assert!(paths.scaler.ends_with(SCALER_FILE));

    let (loaded, loaded_scaler) = load_artifacts(dir.path()).unwrap();
    assert_eq!(loaded_scaler, scaler);
    assert_eq!(loaded.imputer, model.imputer);
    assert_eq!(
        loaded.classifier.predict_proba(&x_test).unwrap(),
        model.classifier.predict_proba(&x_test).unwrap()
    );
    assert_eq!(loaded.classifier.params(), model.classifier.params());
}

#[test]
fn save_leaves_only_the_two_artifacts() {
    let (model, scaler, _) = fitted();
    let dir = tempfile::tempdir().unwrap();
    save_artifacts(dir.path(), &model, &scaler).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec![MODEL_FILE.to_string(), SCALER_FILE.to_string()]);
}

#[test]
fn unfitted_model_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let scaler = Scaler {
        mean: vec![0.0; 8],
        std: vec![1.0; 8],
    };
    let model = ModelArtifact::new(
        GBDTClassifier::new(common::fast_config()),
        ZeroImputer::default(),
        &scaler,
    );
    assert!(matches!(
        save_artifacts(dir.path(), &model, &scaler),
        Err(ArtifactError::Unfitted)
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_scaler_is_named() {
    let (model, scaler, _) = fitted();
    let dir = tempfile::tempdir().unwrap();
    save_artifacts(dir.path(), &model, &scaler).unwrap();
    std::fs::remove_file(dir.path().join(SCALER_FILE)).unwrap();

    match load_artifacts(dir.path()) {
        Err(ArtifactError::Missing { file, .. }) => assert_eq!(file, SCALER_FILE),
        Err(other) => panic!("expected missing scaler, got {other}"),
        Ok(_) => panic!("expected missing scaler, got artifacts"),
    }
}

#[test]
fn missing_model_disables_form_with_named_error() {
    let (model, scaler, _) = fitted();
    let dir = tempfile::tempdir().unwrap();
    save_artifacts(dir.path(), &model, &scaler).unwrap();
    std::fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();

    let cache = ArtifactCache::new(dir.path());
    let mut form = RiskForm::new(&cache);
    match form.submit(&PatientInput::default()) {
        FormState::Disabled(msg) => assert!(msg.contains(MODEL_FILE), "{msg}"),
        other => panic!("expected disabled form, got {other:?}"),
    }
}

#[test]
fn corrupt_artifact_is_reported() {
    let (model, scaler, _) = fitted();
    let dir = tempfile::tempdir().unwrap();
    save_artifacts(dir.path(), &model, &scaler).unwrap();
    std::fs::write(dir.path().join(SCALER_FILE), b"not json").unwrap();
    assert!(matches!(
        load_artifacts(dir.path()),
        Err(ArtifactError::Corrupt { .. })
    ));
}

#[test]
fn scaler_from_another_fit_is_rejected_at_load() {
    let (model, scaler, _) = fitted();
    let dir = tempfile::tempdir().unwrap();
    save_artifacts(dir.path(), &model, &scaler).unwrap();

    // Same width, different parameters: a stale scaler.pkl from an earlier run.
    let other = common::synthetic_dataset(300, 77);
    let stale = Scaler::fit(&other.x).unwrap();
    assert_eq!(stale.n_features(), scaler.n_features());
    std::fs::write(
        dir.path().join(SCALER_FILE),
        serde_json::to_vec(&stale).unwrap(),
    )
    .unwrap();

    match load_artifacts(dir.path()) {
        Err(ArtifactError::ScalerMismatch { expected, found }) => {
            assert_eq!(expected, scaler.fingerprint());
            assert_eq!(found, stale.fingerprint());
        }
        Err(other) => panic!("expected scaler mismatch, got {other}"),
        Ok(_) => panic!("expected scaler mismatch, got artifacts"),
    }

    let cache = ArtifactCache::new(dir.path());
    assert!(RiskForm::new(&cache).is_disabled());
}

#[test]
fn save_refuses_a_scaler_the_model_was_not_trained_with() {
    let (model, _, _) = fitted();
    let other = Scaler {
        mean: vec![0.0; 8],
        std: vec![1.0; 8],
    };
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        save_artifacts(dir.path(), &model, &other),
        Err(ArtifactError::ScalerMismatch { .. })
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn cache_loads_once() {
    let (model, scaler, _) = fitted();
    let dir = tempfile::tempdir().unwrap();
    save_artifacts(dir.path(), &model, &scaler).unwrap();

    let cache = ArtifactCache::new(dir.path());
    assert!(!cache.is_ready());
    assert!(cache.get().is_ok());
    assert!(cache.is_ready());

    // Removing the files after the first load does not affect the cache.
    std::fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();
    std::fs::remove_file(dir.path().join(SCALER_FILE)).unwrap();
    let first = cache.get().unwrap() as *const _;
    let second = cache.get().unwrap() as *const _;
    assert_eq!(first, second);
}
