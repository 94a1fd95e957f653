use anyhow::Result;
use inquire::error::InquireError;
use inquire::{validator::Validation, Confirm, CustomType};

use super::prompt_driver::{Cancelled, PromptDriver};

pub struct InquireDriver;

fn map_err(err: InquireError) -> anyhow::Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Cancelled.into(),
        other => other.into(),
    }
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()
            .map_err(map_err)
    }

    fn ask_u32(&self, title: &str, help: &str, default: u32, min: u32, max: u32) -> Result<u32> {
        CustomType::<u32>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_error_message("Please type a whole number")
            .with_validator(move |x: &u32| {
                if *x >= min && *x <= max {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        format!("Must be between {min} and {max}").into(),
                    ))
                }
            })
            .prompt()
            .map_err(map_err)
    }

    fn ask_f64(&self, title: &str, help: &str, default: f64, min: f64, max: f64) -> Result<f64> {
        CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_error_message("Please type a number")
            .with_validator(move |x: &f64| {
                if x.is_finite() && *x >= min && *x <= max {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        format!("Must be between {min} and {max}").into(),
                    ))
                }
            })
            .prompt()
            .map_err(map_err)
    }
}
