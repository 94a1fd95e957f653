//! diabrisk-classifiers: diabetes risk classification on the Pima Indians
//! Diabetes dataset.
//!
//! This crate covers both halves of the training/inference contract: loading
//! and imputing the raw CSV, the seeded train/test split, feature scaling, a
//! GBDT classifier wrapper, held-out metrics, artifact persistence, and the
//! load-once predictor with the form state machine used by the CLI.
//!
//! The trainer and the predictor only meet through the two artifacts written
//! by [`artifacts::save_artifacts`], so feature order lives in one place
//! ([`schema::FEATURE_NAMES`]).
pub mod artifacts;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod predictor;
pub mod preprocessing;
pub mod schema;
pub mod stats;
