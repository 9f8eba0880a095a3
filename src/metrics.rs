//! Accuracy and a per-class precision/recall/F1 report for binary labels.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub class: u8,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: [ClassMetrics; 2],
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Share of positions where `predicted` agrees with `truth`.
pub fn accuracy(truth: &[u8], predicted: &[u8]) -> f64 {
    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    ratio(correct, truth.len())
}

impl ClassificationReport {
    /// Builds the report from paired true/predicted labels (0 or 1).
    pub fn new(truth: &[u8], predicted: &[u8]) -> Self {
        let per_class = |class: u8| {
            let mut tp = 0;
            let mut predicted_as = 0;
            let mut support = 0;
            for (&t, &p) in truth.iter().zip(predicted) {
                if p == class {
                    predicted_as += 1;
                }
                if t == class {
                    support += 1;
                    if p == class {
                        tp += 1;
                    }
                }
            }
            let precision = ratio(tp, predicted_as);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                class,
                precision,
                recall,
                f1,
                support,
            }
        };

        ClassificationReport {
            accuracy: accuracy(truth, predicted),
            classes: [per_class(0), per_class(1)],
        }
    }

    /// Number of labelled rows the report covers.
    pub fn support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }

    /// Unweighted mean of (precision, recall, f1).
    pub fn macro_avg(&self) -> (f64, f64, f64) {
        let n = self.classes.len() as f64;
        let sum = self.classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            (acc.0 + c.precision, acc.1 + c.recall, acc.2 + c.f1)
        });
        (sum.0 / n, sum.1 / n, sum.2 / n)
    }

    /// Support-weighted mean of (precision, recall, f1).
    pub fn weighted_avg(&self) -> (f64, f64, f64) {
        let total = self.support() as f64;
        if total == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let sum = self.classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            let w = c.support as f64;
            (
                acc.0 + c.precision * w,
                acc.1 + c.recall * w,
                acc.2 + c.f1 * w,
            )
        });
        (sum.0 / total, sum.1 / total, sum.2 / total)
    }

    /// Contents of the metrics artifact.
    pub fn to_metrics_text(&self) -> String {
        format!(
            "Accuracy: {:.4}\n\nClassification Report:\n{}",
            self.accuracy, self
        )
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.class, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        let total = self.support();
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, total
        )?;
        let (p, r, f1) = self.macro_avg();
        writeln!(
            f,
            "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            "macro avg", p, r, f1, total
        )?;
        let (p, r, f1) = self.weighted_avg();
        writeln!(
            f,
            "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            "weighted avg", p, r, f1, total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_class() {
        let truth = [1, 1, 1, 0, 0, 0, 0, 1];
        let pred = [1, 1, 0, 0, 0, 1, 0, 1];
        let report = ClassificationReport::new(&truth, &pred);

        assert_eq!(report.accuracy, 0.75);
        let liked = report.classes[1];
        assert_eq!(liked.support, 4);
        assert_eq!(liked.precision, 0.75);
        assert_eq!(liked.recall, 0.75);
        assert_eq!(report.support(), 8);
    }

    #[test]
    fn never_predicted_class_has_zero_precision() {
        let report = ClassificationReport::new(&[0, 1, 1], &[0, 0, 0]);
        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].f1, 0.0);
        assert!((report.accuracy - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_average_favours_larger_class() {
        let report = ClassificationReport::new(&[0, 0, 0, 1], &[0, 0, 0, 0]);
        let (_, macro_recall, _) = report.macro_avg();
        let (_, weighted_recall, _) = report.weighted_avg();
        assert_eq!(macro_recall, 0.5);
        assert_eq!(weighted_recall, 0.75);
    }

    #[test]
    fn empty_input_does_not_divide_by_zero() {
        let report = ClassificationReport::new(&[], &[]);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.weighted_avg(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn text_report_layout() {
        let report = ClassificationReport::new(&[1, 0, 1, 0], &[1, 0, 0, 0]);
        let text = report.to_metrics_text();
        assert!(text.starts_with("Accuracy: 0.7500\n\nClassification Report:\n"));
        assert!(text.contains("   precision    recall  f1-score   support"));
        assert!(text.contains("           1      1.00      0.50      0.67         2"));
        assert!(text.contains("    accuracy                          0.75         4"));
    }
}
