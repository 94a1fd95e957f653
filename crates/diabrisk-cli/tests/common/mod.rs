//! Shared fixtures: a synthetic Pima CSV on disk and a quick training config.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use diabrisk_classifiers::config::{ModelConfig, ModelType};
use diabrisk_classifiers::io::DataSource;
use diabrisk_cli::train::input::TrainConfig;

pub fn write_synthetic_csv(dir: &Path, n: usize, seed: u64) -> PathBuf {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    for _ in 0..n {
        let pregnancies: u32 = rng.gen_range(0..15);
        let glucose: u32 = rng.gen_range(60..200);
        let blood_pressure: u32 = rng.gen_range(40..110);
        let skin: u32 = if rng.gen_bool(0.3) { 0 } else { rng.gen_range(10..50) };
        let insulin: u32 = if rng.gen_bool(0.45) { 0 } else { rng.gen_range(15..400) };
        let bmi: f32 = rng.gen_range(18.0..50.0);
        let dpf: f32 = rng.gen_range(0.08..2.4);
        let age: u32 = rng.gen_range(21..80);
        let risky = glucose > 145 || (bmi > 33.0 && age > 40);
        let outcome = u32::from(if rng.gen_bool(0.1) { !risky } else { risky });
        out.push_str(&format!(
            "{},{},{},{},{},{:.1},{:.3},{},{}\n",
            pregnancies, glucose, blood_pressure, skin, insulin, bmi, dpf, age, outcome
        ));
    }
    let path = dir.join("pima.csv");
    fs::write(&path, out).unwrap();
    path
}

pub fn fast_train_config(data: &Path, output_dir: &Path) -> TrainConfig {
    TrainConfig {
        data: DataSource::Path(data.to_path_buf()),
        output_dir: output_dir.to_path_buf(),
        model: ModelConfig {
            learning_rate: 0.1,
            model_type: ModelType::GBDT {
                max_depth: 4,
                num_boost_round: 25,
                subsample: 1.0,
                debug: false,
                training_optimization_level: 2,
                loss_type: "LogLikelyhood".to_string(),
            },
        },
        ..TrainConfig::default()
    }
}

/// Write `config` as JSON next to the data and return its path.
pub fn write_config(dir: &Path, config: &TrainConfig) -> PathBuf {
    let path = dir.join("train.json");
    fs::write(&path, serde_json::to_string_pretty(config).unwrap()).unwrap();
    path
}
