//! Median imputation and feature standardization.
//!
//! A [`Scaler`] is fitted on the training split only and then applied to the
//! evaluation split and to every inference vector. It is persisted next to the
//! model because its parameters are meaningless without it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::data_handling::median;
use crate::error::PredictError;
use crate::math::Array2;
use crate::schema::{feature_index, FEATURE_NAMES, ZERO_AS_MISSING};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImputedColumn {
    pub column: String,
    pub median: f32,
}

/// Replaces zero sentinels with per-column medians.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZeroImputer {
    pub columns: Vec<ImputedColumn>,
}

impl ZeroImputer {
    /// Median of every zero-as-missing column, zeros included.
    pub fn fit(x: &Array2<f32>) -> Self {
        let columns = ZERO_AS_MISSING
            .iter()
            .filter_map(|&name| {
                let col = feature_index(name).filter(|&c| c < x.ncols())?;
                let median = median(x.column(col).as_slice())?;
                Some(ImputedColumn {
                    column: name.to_string(),
                    median,
                })
            })
            .collect();
        ZeroImputer { columns }
    }

    /// Impute every row in place. Returns the number of replaced cells.
    pub fn transform(&self, x: &mut Array2<f32>) -> usize {
        let mut replaced = 0;
        for row in 0..x.nrows() {
            for (col, median) in self.resolved() {
                if col < x.ncols() && x[(row, col)] == 0.0 {
                    x[(row, col)] = median;
                    replaced += 1;
                }
            }
        }
        replaced
    }

    /// Impute a single feature vector, returning the substitutions made.
    pub fn transform_row(&self, row: &mut [f32]) -> Vec<(&'static str, f32)> {
        let mut applied = Vec::new();
        for (col, median) in self.resolved() {
            if let Some(v) = row.get_mut(col) {
                if *v == 0.0 {
                    *v = median;
                    applied.push((FEATURE_NAMES[col], median));
                }
            }
        }
        applied
    }

    pub fn median_of(&self, column: &str) -> Option<f32> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.median)
    }

    fn resolved(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| feature_index(&c.column).map(|idx| (idx, c.median)))
    }
}

/// Standard scaler (per-column mean/std).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f32 = 1e-6;

    /// Fit from a matrix where rows are samples and columns are features.
    ///
    /// Uses the population standard deviation. Returns `None` for an empty
    /// matrix.
    pub fn fit(x: &Array2<f32>) -> Option<Self> {
        let (nrows, ncols) = x.shape();
        if nrows == 0 || ncols == 0 {
            return None;
        }

        // Accumulate in f64.
        let nrows_f = nrows as f64;
        let mut mean = vec![0.0f64; ncols];
        for row in x.rows() {
            for (m, &v) in mean.iter_mut().zip(row) {
                *m += v as f64;
            }
        }
        for m in mean.iter_mut() {
            *m /= nrows_f;
        }

        let mut var = vec![0.0f64; ncols];
        for row in x.rows() {
            for ((acc, &v), &m) in var.iter_mut().zip(row).zip(&mean) {
                let d = v as f64 - m;
                *acc += d * d;
            }
        }

        Some(Scaler {
            mean: mean.iter().map(|&m| m as f32).collect(),
            std: var
                .iter()
                .map(|&v| ((v / nrows_f).sqrt() as f32).max(Self::MIN_STD))
                .collect(),
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// SHA-256 over the fitted parameters. The model artifact records it so a
    /// scaler from another fit is rejected at load.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.mean.len() as u64).to_le_bytes());
        for v in self.mean.iter().chain(&self.std) {
            hasher.update(v.to_le_bytes());
        }
        format!("sha256:{:x}", hasher.finalize())
    }

    /// Standardize a single feature vector.
    pub fn transform_row(&self, row: &[f32]) -> Result<Vec<f32>, PredictError> {
        if row.len() != self.n_features() {
            return Err(PredictError::Width {
                expected: self.n_features(),
                found: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.std))
            .map(|(&v, (&m, &s))| (v - m) / s)
            .collect())
    }

    /// Transform all rows and return a new matrix.
    pub fn transform(&self, x: &Array2<f32>) -> Result<Array2<f32>, PredictError> {
        let mut out = Vec::with_capacity(x.nrows() * x.ncols());
        for row in x.rows() {
            out.extend(self.transform_row(row)?);
        }
        Ok(Array2::from_shape_vec((x.nrows(), self.n_features()), out)?)
    }
}
