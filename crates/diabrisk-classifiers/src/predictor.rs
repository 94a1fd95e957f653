//! Inference side: patient input, the cached artifacts, and the form state
//! machine driven by the interactive front end.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::artifacts::load_artifacts;
use crate::error::{ArtifactError, PredictError};
use crate::math::Array2;
use crate::models::ClassifierModel;
use crate::preprocessing::{Scaler, ZeroImputer};
use crate::schema::{FieldSpec, FEATURE_NAMES, FIELD_SPECS, N_FEATURES};

pub const DISCLAIMER: &str = "Disclaimer: This is a predictive model based on machine learning and should not \
be used as a substitute for professional medical diagnosis. Always consult with a \
healthcare provider regarding any health concerns.";

pub const RETRY_HINT: &str = "Please check your input values and try again.";

/// One patient's measurements as entered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub pregnancies: u32,
    pub glucose: u32,
    pub blood_pressure: u32,
    pub skin_thickness: u32,
    pub insulin: u32,
    pub bmi: f32,
    pub diabetes_pedigree: f32,
    pub age: u32,
}

impl Default for PatientInput {
    /// The form's initial values.
    fn default() -> Self {
        PatientInput {
            pregnancies: 0,
            glucose: 120,
            blood_pressure: 70,
            skin_thickness: 20,
            insulin: 80,
            bmi: 25.0,
            diabetes_pedigree: 0.5,
            age: 30,
        }
    }
}

impl PatientInput {
    /// Build from raw values in `FEATURE_NAMES` order. Integer fields are
    /// rounded.
    pub fn from_values(values: [f64; N_FEATURES]) -> Self {
        let int = |v: f64| v.round().max(0.0) as u32;
        PatientInput {
            pregnancies: int(values[0]),
            glucose: int(values[1]),
            blood_pressure: int(values[2]),
            skin_thickness: int(values[3]),
            insulin: int(values[4]),
            bmi: values[5] as f32,
            diabetes_pedigree: values[6] as f32,
            age: int(values[7]),
        }
    }

    /// Feature vector in training order.
    pub fn to_feature_vector(&self) -> [f32; N_FEATURES] {
        [
            self.pregnancies as f32,
            self.glucose as f32,
            self.blood_pressure as f32,
            self.skin_thickness as f32,
            self.insulin as f32,
            self.bmi,
            self.diabetes_pedigree,
            self.age as f32,
        ]
    }

    /// Check every value against its field range.
    pub fn validate(&self) -> Result<(), PredictError> {
        for (spec, value) in FIELD_SPECS.iter().zip(self.to_feature_vector()) {
            check_field(spec, value)?;
        }
        Ok(())
    }
}

fn check_field(spec: &FieldSpec, value: f32) -> Result<(), PredictError> {
    if !value.is_finite() {
        return Err(PredictError::NotFinite { field: spec.name });
    }
    let value = value as f64;
    // f32 storage of e.g. 0.1 steps can sit a hair above the bound.
    let tolerance = 1e-6 * spec.max.abs().max(1.0);
    if value < spec.min - tolerance || value > spec.max + tolerance {
        return Err(PredictError::OutOfRange {
            field: spec.name,
            min: spec.min,
            max: spec.max,
            value,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLabel {
    High,
    Low,
}

impl RiskLabel {
    pub fn from_class(class: i32) -> Self {
        if class == 1 {
            RiskLabel::High
        } else {
            RiskLabel::Low
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            RiskLabel::High => "High Risk",
            RiskLabel::Low => "Low Risk",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::High => {
                "The model predicts a high risk of diabetes. Please consult with a healthcare \
                 professional for proper medical advice and further testing."
            }
            RiskLabel::Low => {
                "The model predicts a low risk of diabetes. However, maintaining a healthy \
                 lifestyle is always recommended."
            }
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Outcome of one predict action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The submitted vector, echoed back as (feature, value) pairs.
    pub inputs: Vec<(&'static str, f32)>,
    /// Zero sentinels replaced with the training median before scaling.
    pub imputed: Vec<(&'static str, f32)>,
    pub probability: f32,
    pub label: RiskLabel,
}

/// Fitted model plus the preprocessing it was trained behind.
pub struct Predictor {
    model: Box<dyn ClassifierModel + Send + Sync>,
    imputer: ZeroImputer,
    scaler: Scaler,
}

impl Predictor {
    pub fn new(
        model: Box<dyn ClassifierModel + Send + Sync>,
        imputer: ZeroImputer,
        scaler: Scaler,
    ) -> Self {
        Predictor {
            model,
            imputer,
            scaler,
        }
    }

    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, ArtifactError> {
        let (artifact, scaler) = load_artifacts(dir)?;
        Ok(Predictor::new(
            Box::new(artifact.classifier),
            artifact.imputer,
            scaler,
        ))
    }

    pub fn predict(&self, input: &PatientInput) -> Result<Prediction, PredictError> {
        input.validate()?;
        let features = input.to_feature_vector();
        let mut model_input = features;
        let imputed = self.imputer.transform_row(&mut model_input);
        let scaled = self.scaler.transform_row(&model_input)?;
        let x = Array2::from_shape_vec((1, scaled.len()), scaled)?;

        let probability = self
            .model
            .predict_proba(&x)?
            .first()
            .copied()
            .ok_or(PredictError::EmptyPrediction)?;
        let class = self
            .model
            .predict(&x)?
            .first()
            .copied()
            .ok_or(PredictError::EmptyPrediction)?;

        Ok(Prediction {
            inputs: FEATURE_NAMES.into_iter().zip(features).collect(),
            imputed,
            probability,
            label: RiskLabel::from_class(class),
        })
    }
}

/// Load-once holder for the predictor.
///
/// The first [`ArtifactCache::get`] reads the artifacts; later calls return
/// the same result, success or failure, without touching the disk.
pub struct ArtifactCache {
    dir: PathBuf,
    cell: OnceLock<Result<Predictor, ArtifactError>>,
}

impl ArtifactCache {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ArtifactCache {
            dir: dir.into(),
            cell: OnceLock::new(),
        }
    }

    /// Cache already holding a predictor; no disk access.
    pub fn from_predictor(predictor: Predictor) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Ok(predictor));
        ArtifactCache {
            dir: PathBuf::new(),
            cell,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    pub fn get(&self) -> Result<&Predictor, &ArtifactError> {
        self.cell
            .get_or_init(|| {
                log::info!("Loading model and scaler from {}", self.dir.display());
                let loaded = Predictor::load(&self.dir);
                if let Err(e) = &loaded {
                    log::error!("{}", e);
                }
                loaded
            })
            .as_ref()
    }
}

/// Where the form currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// Form visible, no result yet.
    Idle,
    /// Confirmation table, label and disclaimer visible.
    ResultShown(Prediction),
    /// Last attempt failed; the form stays usable.
    Failed(String),
    /// Artifacts failed to load; permanent for the process.
    Disabled(String),
}

/// Form driver over a shared [`ArtifactCache`].
pub struct RiskForm<'a> {
    cache: &'a ArtifactCache,
    state: FormState,
}

impl<'a> RiskForm<'a> {
    pub fn new(cache: &'a ArtifactCache) -> Self {
        let state = match cache.get() {
            Ok(_) => FormState::Idle,
            Err(e) => FormState::Disabled(e.to_string()),
        };
        RiskForm { cache, state }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, FormState::Disabled(_))
    }

    /// Run one predict action. Nothing carries over from earlier submissions.
    pub fn submit(&mut self, input: &PatientInput) -> &FormState {
        if self.is_disabled() {
            return &self.state;
        }
        let predictor = match self.cache.get() {
            Ok(p) => p,
            Err(e) => {
                self.state = FormState::Disabled(e.to_string());
                return &self.state;
            }
        };

        self.state = match predictor.predict(input) {
            Ok(prediction) => {
                log::debug!(
                    "Predicted {} (p = {:.3})",
                    prediction.label,
                    prediction.probability
                );
                FormState::ResultShown(prediction)
            }
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                FormState::Failed(format!("An error occurred during prediction: {}", e))
            }
        };
        &self.state
    }
}
