//! Synthetic Pima-shaped data so tests never touch the network.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use diabrisk_classifiers::config::{ModelConfig, ModelType};
use diabrisk_classifiers::data_handling::Dataset;
use diabrisk_classifiers::io::read_pima_from_reader;

/// Headerless CSV with `n` rows, zero sentinels included.
pub fn synthetic_csv(n: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    for _ in 0..n {
        let pregnancies: u32 = rng.gen_range(0..15);
        let mut glucose: u32 = rng.gen_range(60..200);
        let blood_pressure: u32 = if rng.gen_bool(0.05) { 0 } else { rng.gen_range(40..110) };
        let skin: u32 = if rng.gen_bool(0.3) { 0 } else { rng.gen_range(10..50) };
        let insulin: u32 = if rng.gen_bool(0.45) { 0 } else { rng.gen_range(15..400) };
        let bmi: f32 = if rng.gen_bool(0.02) { 0.0 } else { rng.gen_range(18.0..50.0) };
        let dpf: f32 = rng.gen_range(0.08..2.4);
        let age: u32 = rng.gen_range(21..80);
        let risky = glucose > 145 || (bmi > 33.0 && age > 40);
        let outcome = u32::from(if rng.gen_bool(0.1) { !risky } else { risky });
        if rng.gen_bool(0.01) {
            glucose = 0;
        }
        out.push_str(&format!(
            "{},{},{},{},{},{:.1},{:.3},{},{}\n",
            pregnancies, glucose, blood_pressure, skin, insulin, bmi, dpf, age, outcome
        ));
    }
    out
}

pub fn synthetic_dataset(n: usize, seed: u64) -> Dataset {
    read_pima_from_reader(synthetic_csv(n, seed).as_bytes()).expect("synthetic CSV parses")
}

/// Production hyper-parameters with fewer rounds and no row sampling.
pub fn fast_config() -> ModelConfig {
    ModelConfig {
        learning_rate: 0.1,
        model_type: ModelType::GBDT {
            max_depth: 4,
            num_boost_round: 30,
            subsample: 1.0,
            debug: false,
            training_optimization_level: 2,
            loss_type: "LogLikelyhood".to_string(),
        },
    }
}
