//! Column layout shared by the trainer and the predictor.
//!
//! The scaler's fitted parameters are positional, so every feature vector in
//! this crate is built in [`FEATURE_NAMES`] order.

/// Number of features per patient record.
pub const N_FEATURES: usize = 8;

/// Feature columns in training order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

/// Binary label column, last in the raw CSV.
pub const LABEL_COLUMN: &str = "Outcome";

/// Columns where a zero is a missing-value sentinel rather than a measurement.
pub const ZERO_AS_MISSING: [&str; 5] = ["Glucose", "BloodPressure", "SkinThickness", "Insulin", "BMI"];

/// Position of a feature in [`FEATURE_NAMES`].
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|&n| n == name)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Integer,
    Float { step: f64 },
}

/// Input widget description for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into range and snap float fields to their step.
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        match self.kind {
            FieldKind::Integer => clamped.round(),
            FieldKind::Float { step } => {
                let snapped = ((clamped - self.min) / step).round() * step + self.min;
                snapped.clamp(self.min, self.max)
            }
        }
    }
}

/// Form fields, one per feature, in [`FEATURE_NAMES`] order.
pub const FIELD_SPECS: [FieldSpec; N_FEATURES] = [
    FieldSpec {
        name: "Pregnancies",
        label: "Pregnancies",
        help: "Number of times pregnant",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 20.0,
        default: 0.0,
    },
    FieldSpec {
        name: "Glucose",
        label: "Glucose (mg/dL)",
        help: "Plasma glucose concentration",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 300.0,
        default: 120.0,
    },
    FieldSpec {
        name: "BloodPressure",
        label: "Blood Pressure (mm Hg)",
        help: "Diastolic blood pressure",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 200.0,
        default: 70.0,
    },
    FieldSpec {
        name: "SkinThickness",
        label: "Skin Thickness (mm)",
        help: "Triceps skin fold thickness",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 100.0,
        default: 20.0,
    },
    FieldSpec {
        name: "Insulin",
        label: "Insulin (μU/ml)",
        help: "2-Hour serum insulin",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 1000.0,
        default: 80.0,
    },
    FieldSpec {
        name: "BMI",
        label: "BMI (kg/m²)",
        help: "Body mass index",
        kind: FieldKind::Float { step: 0.1 },
        min: 0.0,
        max: 100.0,
        default: 25.0,
    },
    FieldSpec {
        name: "DiabetesPedigreeFunction",
        label: "Diabetes Pedigree Function",
        help: "Diabetes pedigree function",
        kind: FieldKind::Float { step: 0.01 },
        min: 0.0,
        max: 3.0,
        default: 0.5,
    },
    FieldSpec {
        name: "Age",
        label: "Age (years)",
        help: "Age in years",
        kind: FieldKind::Integer,
        min: 0.0,
        max: 120.0,
        default: 30.0,
    },
];
