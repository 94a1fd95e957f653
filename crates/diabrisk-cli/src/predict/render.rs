//! Plain-text rendering of the form's pages and results.
use std::io::{self, Write};

use diabrisk_classifiers::predictor::{FormState, Prediction, RiskLabel, DISCLAIMER, RETRY_HINT};
use diabrisk_classifiers::schema::{FieldKind, FieldSpec, FIELD_SPECS};

pub const TITLE: &str = "Diabetes Risk Prediction Tool";

pub const INTRO: &str = "This application predicts whether a person has a high or low risk of \
diabetes based on diagnostic measurements. Enter your information below to get a prediction.";

const ABOUT: &str = "This application uses a gradient-boosted decision tree model trained on the \
Pima Indians Diabetes Database. The model considers eight features that are important \
indicators for diabetes prediction:";

fn heading<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", "=".repeat(text.chars().count()))
}

pub fn render_header<W: Write>(out: &mut W) -> io::Result<()> {
    heading(out, TITLE)?;
    writeln!(out, "{}", INTRO)
}

pub fn render_about<W: Write>(out: &mut W) -> io::Result<()> {
    heading(out, "About the Model")?;
    writeln!(out, "{}", ABOUT)?;
    for (i, spec) in FIELD_SPECS.iter().enumerate() {
        writeln!(out, "  {}. {}: {}", i + 1, spec.label, spec.help)?;
    }
    Ok(())
}

fn label_width() -> usize {
    FIELD_SPECS
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Feature".len())
}

fn format_bound(spec: &FieldSpec, value: f64) -> String {
    match spec.kind {
        FieldKind::Integer => format!("{}", value as i64),
        FieldKind::Float { step } if step < 0.1 => format!("{:.2}", value),
        FieldKind::Float { .. } => format!("{:.1}", value),
    }
}

/// The form's fields with their accepted range and initial value.
pub fn render_form_fields<W: Write>(out: &mut W) -> io::Result<()> {
    heading(out, "Patient Information")?;
    let width = label_width();
    writeln!(out, "{:<width$}  {:>14}  {:>8}", "Feature", "Range", "Default", width = width)?;
    writeln!(out, "{}  {}  {}", "-".repeat(width), "-".repeat(14), "-".repeat(8))?;
    for spec in FIELD_SPECS.iter() {
        let pad = width.saturating_sub(spec.label.chars().count());
        let range = format!("{} - {}", format_bound(spec, spec.min), format_bound(spec, spec.max));
        writeln!(
            out,
            "{}{}  {:>14}  {:>8}",
            spec.label,
            " ".repeat(pad),
            range,
            format_bound(spec, spec.default)
        )?;
    }
    Ok(())
}

/// Echo of the submitted vector, one row per feature.
pub fn render_confirmation<W: Write>(out: &mut W, prediction: &Prediction) -> io::Result<()> {
    heading(out, "Confirmation of Input Data")?;
    let width = label_width();

    writeln!(out, "{:<width$}  {:>8}", "Feature", "Value", width = width)?;
    writeln!(out, "{}  {}", "-".repeat(width), "-".repeat(8))?;
    for (spec, (_, value)) in FIELD_SPECS.iter().zip(&prediction.inputs) {
        // Pad by char count; labels contain non-ASCII units.
        let pad = width.saturating_sub(spec.label.chars().count());
        writeln!(out, "{}{}  {:>8}", spec.label, " ".repeat(pad), value)?;
    }
    for (name, median) in &prediction.imputed {
        writeln!(
            out,
            "Note: {} of 0 is treated as missing and replaced with the training median {}.",
            name, median
        )?;
    }
    Ok(())
}

pub fn render_result<W: Write>(out: &mut W, prediction: &Prediction) -> io::Result<()> {
    render_confirmation(out, prediction)?;
    heading(out, "Prediction Result")?;
    let marker = match prediction.label {
        RiskLabel::High => "[!]",
        RiskLabel::Low => "[ok]",
    };
    writeln!(out, "{} {}", marker, prediction.label.headline())?;
    writeln!(out, "{}", prediction.label.message())?;
    writeln!(out)?;
    writeln!(out, "{}", DISCLAIMER)
}

pub fn render_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Error: {}", message)
}

/// Render whatever the form currently shows.
pub fn render_state<W: Write>(out: &mut W, state: &FormState) -> io::Result<()> {
    match state {
        FormState::Idle => Ok(()),
        FormState::ResultShown(prediction) => render_result(out, prediction),
        FormState::Failed(message) => {
            render_error(out, message)?;
            writeln!(out, "{}", RETRY_HINT)
        }
        FormState::Disabled(message) => {
            render_error(out, message)?;
            writeln!(out, "Prediction is disabled until both artifacts are available.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: RiskLabel) -> Prediction {
        Prediction {
            inputs: vec![
                ("Pregnancies", 1.0),
                ("Glucose", 85.0),
                ("BloodPressure", 66.0),
                ("SkinThickness", 29.0),
                ("Insulin", 0.0),
                ("BMI", 26.6),
                ("DiabetesPedigreeFunction", 0.351),
                ("Age", 31.0),
            ],
            imputed: vec![("Insulin", 30.5)],
            probability: 0.2,
            label,
        }
    }

    #[test]
    fn result_page_shows_table_label_and_disclaimer() {
        let mut out = Vec::new();
        render_state(&mut out, &FormState::ResultShown(prediction(RiskLabel::Low))).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Confirmation of Input Data"));
        assert!(text.contains("Glucose (mg/dL)"));
        assert!(text.contains("0.351"));
        assert!(text.contains("Low Risk"));
        assert!(text.contains("healthy lifestyle"));
        assert!(text.contains("Disclaimer"));
        assert!(text.contains("training median 30.5"));
    }

    #[test]
    fn failure_page_has_retry_hint() {
        let mut out = Vec::new();
        render_state(&mut out, &FormState::Failed("boom".into())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("boom"));
        assert!(text.contains(RETRY_HINT));
    }

    #[test]
    fn form_fields_show_ranges_and_defaults() {
        let mut out = Vec::new();
        render_form_fields(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Patient Information"));
        assert!(text.contains("0 - 300"));
        assert!(text.contains("0.0 - 100.0"));
        assert!(text.contains("0.00 - 3.00"));
        assert!(text.contains("0.50"));
        for spec in FIELD_SPECS.iter() {
            assert!(text.contains(spec.label), "{}", spec.label);
        }
    }

    #[test]
    fn about_lists_all_features() {
        let mut out = Vec::new();
        render_about(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("8. Age (years)"));
    }
}
