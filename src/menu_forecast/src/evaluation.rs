//! Holdout scoring for the fitted model.

use serde::Serialize;

/// Error metrics on the held-out rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Number of held-out rows scored.
    pub rows: usize,
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Coefficient of determination; `None` when the targets have zero variance.
    pub r2: Option<f64>,
}

/// Score raw predictions against targets. Returns `None` for an empty holdout.
pub fn score(predicted: &[f64], actual: &[f64]) -> Option<ValidationReport> {
    let n = predicted.len().min(actual.len());
    if n == 0 {
        return None;
    }
    let nf = n as f64;

    let (abs_sum, sq_sum) = predicted
        .iter()
        .zip(actual)
        .fold((0.0, 0.0), |(a, s), (p, y)| {
            let e = p - y;
            (a + e.abs(), s + e * e)
        });

    let mean = actual[..n].iter().sum::<f64>() / nf;
    let total: f64 = actual[..n].iter().map(|y| (y - mean).powi(2)).sum();
    let r2 = (total > 0.0).then(|| 1.0 - sq_sum / total);

    Some(ValidationReport {
        rows: n,
        mae: abs_sum / nf,
        rmse: (sq_sum / nf).sqrt(),
        r2,
    })
}
