use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;

use diabrisk_classifiers::io::DataSource;
use diabrisk_classifiers::predictor::ArtifactCache;
use diabrisk_cli::predict::{run_session, InquireDriver};
use diabrisk_cli::predict::render::render_about;
use diabrisk_cli::train::input::TrainConfig;
use diabrisk_cli::train::trainer;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DIABRISK_LOG", "error,diabrisk=info"))
        .init();

    let matches = Command::new("diabrisk")
        .version(clap::crate_version!())
        .about("Diabetes risk prediction: train a GBDT classifier and query it from a form")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Fit the classifier and scaler and write diabetes_model.pkl and scaler.pkl")
                .arg(
                    Arg::new("config")
                        .help("Optional JSON training configuration")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .help(
                            "Headerless Pima CSV, as a local path or an http(s) URL. \
                             Overrides the data source in the configuration file.",
                        )
                        .value_parser(|s: &str| s.parse::<DataSource>())
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory the two artifacts are written to (default: current directory)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the train/test shuffle")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("test_size")
                        .long("test-size")
                        .help("Fraction of records held out for evaluation")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Open the interactive risk form")
                .arg(
                    Arg::new("artifact_dir")
                        .short('a')
                        .long("artifact-dir")
                        .help("Directory holding diabetes_model.pkl and scaler.pkl")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("about")
                        .long("about")
                        .help("Describe the model's input features before the form")
                        .action(ArgAction::SetTrue),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config = match TrainConfig::from_arguments(matches) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid training configuration: {:#}", e);
            std::process::exit(1)
        }
    };
    log::debug!(
        "Effective config:\n{}",
        serde_json::to_string_pretty(&config).unwrap_or_default()
    );
    log::info!("[diabrisk::train] Training from {}", config.data);

    match trainer::run_training(&config) {
        Ok(summary) => {
            log::info!(
                "Trained on {} of {} records; held-out accuracy {:.3}",
                summary.n_train,
                summary.n_records,
                summary.accuracy()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let artifact_dir: &PathBuf = matches
        .get_one("artifact_dir")
        .expect("artifact_dir has a default value");
    let mut stdout = io::stdout().lock();

    if matches.get_flag("about") {
        render_about(&mut stdout)?;
    }

    let cache = ArtifactCache::new(artifact_dir.clone());
    let summary = run_session(&cache, &InquireDriver, &mut stdout)?;
    log::info!(
        "[diabrisk::predict] Session ended after {} attempt(s), {} result(s)",
        summary.attempts,
        summary.results
    );
    Ok(())
}
