//! Dataset container plus the imputation and train/test split steps.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::DataError;
use crate::math::{Array1, Array2};
use crate::preprocessing::ZeroImputer;
use crate::schema::N_FEATURES;

/// Default seed for the train/test shuffle.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Default fraction of records held out for evaluation.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct Dataset {
    /// Features in `FEATURE_NAMES` order.
    pub x: Array2<f32>,
    /// Outcome labels, 0 or 1.
    pub y: Array1<i32>,
}

/// Result of [`Dataset::train_test_split`].
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl Dataset {
    pub fn new(x: Array2<f32>, y: Array1<i32>) -> Result<Self, DataError> {
        if x.nrows() != y.len() {
            return Err(DataError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            });
        }
        if x.ncols() != N_FEATURES {
            return Err(DataError::Width {
                row: 0,
                expected: N_FEATURES,
                found: x.ncols(),
            });
        }
        if let Some((idx, &value)) = y.iter().enumerate().find(|&(_, &v)| v != 0 && v != 1) {
            return Err(DataError::Label {
                row: idx + 1,
                value,
            });
        }
        Ok(Dataset { x, y })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "{} records: {} positive and {} negative outcomes, {} features",
            self.len(),
            self.y.iter().filter(|&&v| v == 1).count(),
            self.y.iter().filter(|&&v| v == 0).count(),
            self.x.ncols()
        );
    }

    /// Replace zero sentinels in the physiologically non-zero columns with
    /// the column median.
    ///
    /// Each median is taken over every record, zeros included, before any
    /// replacement in that column. The returned imputer carries the medians
    /// so inference can apply the same substitution.
    pub fn impute_zero_with_median(&mut self) -> ZeroImputer {
        let imputer = ZeroImputer::fit(&self.x);
        let replaced = imputer.transform(&mut self.x);
        for c in &imputer.columns {
            log::debug!("{}: median {}", c.column, c.median);
        }
        log::info!("Imputed {} zero values", replaced);
        imputer
    }

    /// Unstratified random split, reproducible for a given seed.
    ///
    /// The first `ceil(n * test_size)` shuffled indices form the test set.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<TrainTestSplit, DataError> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(DataError::Split(format!(
                "test_size must be in (0, 1), got {}",
                test_size
            )));
        }

        let n = self.len();
        let n_test = (n as f64 * test_size).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(DataError::Split(format!(
                "cannot hold out {} of {} records",
                n_test, n
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let test_indices = indices[..n_test].to_vec();
        let train_indices = indices[n_test..].to_vec();

        Ok(TrainTestSplit {
            train: self.subset(&train_indices),
            test: self.subset(&test_indices),
            train_indices,
            test_indices,
        })
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select_rows(indices),
            y: self.y.select(indices),
        }
    }
}

/// Median of a slice; even lengths average the two middle values.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
