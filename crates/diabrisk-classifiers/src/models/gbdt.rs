use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};

use crate::config::{ModelConfig, ModelType};
use crate::error::{DataError, PredictError};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;

/// Gradient Boosting Decision Tree (GBDT) classifier
///
/// gbdt's `LogLikelyhood` loss expects labels in {-1, +1}; the 0/1 outcome is
/// mapped on the way in, and `predict` returns the positive-class probability.
#[derive(Serialize, Deserialize)]
pub struct GBDTClassifier {
    model: Option<GBDT>,
    params: ModelConfig,
    feature_size: Option<usize>,
}

impl GBDTClassifier {
    pub fn new(params: ModelConfig) -> Self {
        GBDTClassifier {
            model: None,
            params,
            feature_size: None,
        }
    }

    pub fn params(&self) -> &ModelConfig {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn build_config(&self, feature_size: usize) -> Config {
        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate);

        match &self.params.model_type {
            ModelType::GBDT {
                max_depth,
                num_boost_round,
                subsample,
                debug,
                training_optimization_level,
                loss_type,
            } => {
                config.set_max_depth(*max_depth);
                config.set_iterations(*num_boost_round as usize);
                config.set_data_sample_ratio(*subsample);
                config.set_debug(*debug);
                config.set_training_optimization_level(*training_optimization_level);
                config.set_loss(loss_type);
            }
        }
        config
    }
}

impl ClassifierModel for GBDTClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<(), DataError> {
        if x.nrows() != y.len() {
            return Err(DataError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            });
        }
        if y.is_empty() {
            return Err(DataError::Empty);
        }

        let feature_size = x.ncols();
        let config = self.build_config(feature_size);
        log::debug!(
            "Fitting {} ({:?}) on {} rows x {} features",
            self.name(),
            self.params,
            x.nrows(),
            feature_size
        );

        let mut gbdt = GBDT::new(&config);

        let mut train_x = DataVec::with_capacity(x.nrows());
        for (row, &label) in x.rows().zip(y) {
            let target = if label == 1 { 1.0 } else { -1.0 };
            train_x.push(Data::new_training_data(row.to_vec(), 1.0, target, None));
        }

        gbdt.fit(&mut train_x);

        self.model = Some(gbdt);
        self.feature_size = Some(feature_size);
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>, PredictError> {
        let model = self.model.as_ref().ok_or(PredictError::Unfitted)?;
        if let Some(expected) = self.feature_size {
            if x.ncols() != expected {
                return Err(PredictError::Width {
                    expected,
                    found: x.ncols(),
                });
            }
        }

        let test_x: DataVec = x
            .rows()
            .map(|row| Data::new_test_data(row.to_vec(), None))
            .collect();
        Ok(model.predict(&test_x))
    }

    fn n_features(&self) -> Option<usize> {
        self.feature_size
    }

    fn name(&self) -> &str {
        self.params.model_type.name()
    }
}
