use std::io::Write;

use anyhow::Result;

use diabrisk_classifiers::predictor::{ArtifactCache, FormState, PatientInput, RiskForm};
use diabrisk_classifiers::schema::{FieldKind, FIELD_SPECS, N_FEATURES};

use super::prompt_driver::{is_cancelled, PromptDriver};
use super::render::{render_form_fields, render_header, render_state};

/// Counts from one interactive session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub attempts: usize,
    pub results: usize,
    pub disabled: bool,
}

/// Prompt every field in feature order, starting from its default.
pub fn collect_input<D: PromptDriver>(driver: &D) -> Result<PatientInput> {
    let mut values = [0.0f64; N_FEATURES];
    for (value, spec) in values.iter_mut().zip(FIELD_SPECS.iter()) {
        *value = match spec.kind {
            FieldKind::Integer => driver.ask_u32(
                spec.label,
                spec.help,
                spec.default as u32,
                spec.min as u32,
                spec.max as u32,
            )? as f64,
            FieldKind::Float { .. } => {
                let raw = driver.ask_f64(spec.label, spec.help, spec.default, spec.min, spec.max)?;
                spec.normalize(raw)
            }
        };
    }
    Ok(PatientInput::from_values(values))
}

/// Drive the form until the user stops or cancels.
///
/// After a load failure the fields are still listed next to the error, but
/// nothing is prompted: every submission would only repeat the load error.
pub fn run_session<D, W>(cache: &ArtifactCache, driver: &D, out: &mut W) -> Result<SessionSummary>
where
    D: PromptDriver,
    W: Write,
{
    render_header(out)?;
    let mut form = RiskForm::new(cache);
    let mut summary = SessionSummary::default();

    if form.is_disabled() {
        render_state(out, form.state())?;
        render_form_fields(out)?;
        summary.disabled = true;
        return Ok(summary);
    }

    writeln!(out)?;
    writeln!(out, "Patient Information")?;
    loop {
        let input = match collect_input(driver) {
            Ok(input) => input,
            Err(e) if is_cancelled(&e) => break,
            Err(e) => return Err(e),
        };

        summary.attempts += 1;
        if let FormState::ResultShown(_) = form.submit(&input) {
            summary.results += 1;
        }
        render_state(out, form.state())?;
        out.flush()?;

        match driver.ask_bool("Run another prediction?", "Starts again from the defaults", false) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) if is_cancelled(&e) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}
