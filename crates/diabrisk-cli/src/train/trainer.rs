use anyhow::{Context, Result};

use diabrisk_classifiers::artifacts::{save_artifacts, ArtifactPaths, ModelArtifact};
use diabrisk_classifiers::io::read_pima_csv;
use diabrisk_classifiers::models::{ClassifierModel, GBDTClassifier};
use diabrisk_classifiers::preprocessing::{Scaler, ZeroImputer};
use diabrisk_classifiers::stats::ClassificationReport;

use super::input::TrainConfig;

/// What a finished training run produced.
#[derive(Debug)]
pub struct TrainingSummary {
    pub n_records: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub test_indices: Vec<usize>,
    pub imputer: ZeroImputer,
    pub report: ClassificationReport,
    pub artifacts: ArtifactPaths,
}

impl TrainingSummary {
    pub fn accuracy(&self) -> f64 {
        self.report.accuracy
    }
}

/// Load, impute, split, scale, fit, evaluate, then persist.
///
/// Nothing is written unless every earlier step succeeded.
pub fn run_training(config: &TrainConfig) -> Result<TrainingSummary> {
    let mut dataset = read_pima_csv(&config.data)
        .with_context(|| format!("Failed to load dataset from {}", config.data))?;
    dataset.log_input_data_summary();

    // Medians come from the full dataset, before the split.
    let imputer = dataset.impute_zero_with_median();

    let split = dataset
        .train_test_split(config.test_size, config.seed)
        .context("Failed to split dataset")?;
    log::info!(
        "Split {} records into {} training and {} evaluation (seed {})",
        dataset.len(),
        split.train.len(),
        split.test.len(),
        config.seed
    );

    let scaler = Scaler::fit(&split.train.x).context("Training split is empty")?;
    let x_train = scaler
        .transform(&split.train.x)
        .context("Failed to scale training features")?;
    let x_test = scaler
        .transform(&split.test.x)
        .context("Failed to scale evaluation features")?;

    let mut model = GBDTClassifier::new(config.model.clone());
    log::info!("Training {} classifier", model.name());
    model
        .fit(&x_train, split.train.y.as_slice())
        .context("Failed to fit classifier")?;

    let y_pred = model
        .predict(&x_test)
        .context("Failed to evaluate classifier")?;
    let report = ClassificationReport::new(split.test.y.as_slice(), &y_pred);
    println!("Accuracy: {:.2}", report.accuracy);
    println!("{}", report);

    let artifact = ModelArtifact::new(model, imputer, &scaler);
    let artifacts = save_artifacts(&config.output_dir, &artifact, &scaler)
        .with_context(|| format!("Failed to save artifacts to {}", config.output_dir.display()))?;
    println!("Model and scaler saved successfully");

    Ok(TrainingSummary {
        n_records: dataset.len(),
        n_train: split.train.len(),
        n_test: split.test.len(),
        test_indices: split.test_indices,
        imputer: artifact.imputer,
        report,
        artifacts,
    })
}
