//! Held-out evaluation metrics for the binary classifier.
use std::fmt;

use serde::Serialize;

/// Fraction of predictions equal to the true label, over the shorter of the
/// two inputs. Empty input yields 0.
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / n as f64
}

/// Precision, recall and F1 for a single class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class report with accuracy, macro and support-weighted averages.
///
/// Any ratio with a zero denominator is reported as 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<(i32, ClassMetrics)>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Build a report over classes 0 and 1.
    pub fn new(y_true: &[i32], y_pred: &[i32]) -> Self {
        let total = y_true.len();
        let classes: Vec<(i32, ClassMetrics)> = [0, 1]
            .iter()
            .map(|&class| {
                let mut tp = 0usize;
                let mut predicted = 0usize;
                let mut support = 0usize;
                for (&t, &p) in y_true.iter().zip(y_pred) {
                    if p == class {
                        predicted += 1;
                    }
                    if t == class {
                        support += 1;
                        if p == class {
                            tp += 1;
                        }
                    }
                }
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                (
                    class,
                    ClassMetrics {
                        precision,
                        recall,
                        f1: f1(precision, recall),
                        support,
                    },
                )
            })
            .collect();

        let n_classes = classes.len() as f64;
        let mut macro_avg = ClassMetrics {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            support: total,
        };
        let mut weighted_avg = macro_avg;
        for (_, m) in &classes {
            macro_avg.precision += m.precision / n_classes;
            macro_avg.recall += m.recall / n_classes;
            macro_avg.f1 += m.f1 / n_classes;

            let w = ratio(m.support, total);
            weighted_avg.precision += m.precision * w;
            weighted_avg.recall += m.recall * w;
            weighted_avg.f1 += m.f1 * w;
        }

        ClassificationReport {
            classes,
            accuracy: accuracy(y_true, y_pred),
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (class, m) in &self.classes {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                class, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
