//! The trainable pipeline: one-hot encoder followed by linear regression.
//!
//! [`build_model`] is the only way to obtain a [`TrainedModel`]; the result is
//! immutable. Predictions are clamped to a minimum of one unit.

use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    cleaner::CleanedTable,
    config::TrainingCfg,
    encoder::OneHotEncoder,
    errors::Error,
    evaluation::{self, ValidationReport},
    models::record::{FeatureRow, SalesRow},
    regression::LinearRegression,
    split::train_test_split,
};

/// Smallest quantity the model will ever report.
pub const MIN_PREDICTION: f64 = 1.0;

/// Encoder + regression fitted on the cleaned sales table.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    encoder: OneHotEncoder,
    regression: LinearRegression,
    training_rows: usize,
    validation: Option<ValidationReport>,
}

/// Fit the pipeline.
///
/// The encoder learns categories from every cleaned row; the regression is
/// fit on a shuffled `1 - test_fraction` share and scored on the rest.
///
/// Errors:
/// - [`Error::EmptyDataset`] when `cleaned` has no rows
/// - [`Error::Training`] when the regression cannot be solved
pub fn build_model(cleaned: &CleanedTable, cfg: &TrainingCfg) -> Result<TrainedModel, Error> {
    if cleaned.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut rng = if cfg.random_split {
        StdRng::from_os_rng()
    } else {
        StdRng::seed_from_u64(cfg.split_seed)
    };
    let (train, test) = train_test_split(&cleaned.rows, &mut rng, cfg.test_fraction);
    if train.is_empty() {
        return Err(Error::Training("split left no training rows".into()));
    }

    let all_features: Vec<FeatureRow> = cleaned.rows.iter().map(SalesRow::features).collect();
    let encoder = OneHotEncoder::fit(&all_features);

    let (x_train, y_train) = design(&encoder, &train);
    let regression = LinearRegression::fit(x_train.view(), y_train.view())?;

    let validation = if test.is_empty() {
        None
    } else {
        let (x_test, y_test) = design(&encoder, &test);
        let predicted = regression.predict(x_test.view());
        evaluation::score(&predicted.to_vec(), &y_test.to_vec())
    };

    info!(
        training_rows = train.len(),
        holdout_rows = test.len(),
        features = encoder.width(),
        seeded = !cfg.random_split,
        "trained sales model"
    );
    debug!(
        items = ?encoder.item_categories().collect::<Vec<_>>(),
        days = ?encoder.day_categories().collect::<Vec<_>>(),
        "encoder categories"
    );
    if let Some(report) = &validation {
        info!(
            mae = report.mae,
            rmse = report.rmse,
            r2 = ?report.r2,
            "holdout validation"
        );
    }

    Ok(TrainedModel {
        encoder,
        regression,
        training_rows: train.len(),
        validation,
    })
}

fn design(encoder: &OneHotEncoder, rows: &[SalesRow]) -> (ndarray::Array2<f64>, Array1<f64>) {
    let features: Vec<FeatureRow> = rows.iter().map(SalesRow::features).collect();
    let x = encoder.encode_all(&features);
    let y = rows.iter().map(|r| f64::from(r.quantity_sold)).collect();
    (x, y)
}

impl TrainedModel {
    /// Unclamped model output. May be fractional or negative.
    pub fn predict_raw(&self, row: &FeatureRow) -> f64 {
        self.regression.predict_one(self.encoder.encode(row).view())
    }

    /// Predicted quantity for one (item, day) pair, never below [`MIN_PREDICTION`].
    pub fn predict(&self, item_name: &str, day_of_week: &str) -> f64 {
        self.predict_row(&FeatureRow::new(item_name, day_of_week))
    }

    /// Same as [`TrainedModel::predict`] for an already built row.
    pub fn predict_row(&self, row: &FeatureRow) -> f64 {
        clamp_prediction(self.predict_raw(row))
    }

    /// Clamped predictions, one per input, in input order.
    pub fn predict_batch(&self, rows: &[FeatureRow]) -> Vec<f64> {
        if rows.is_empty() {
            return Vec::new();
        }
        let x = self.encoder.encode_all(rows);
        self.regression
            .predict(x.view())
            .iter()
            .map(|p| clamp_prediction(*p))
            .collect()
    }

    /// Rows the regression was fit on.
    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Holdout metrics, absent when nothing was held out.
    pub fn validation(&self) -> Option<&ValidationReport> {
        self.validation.as_ref()
    }
}

/// `max(1, p)`; a NaN prediction also becomes 1.
pub fn clamp_prediction(p: f64) -> f64 {
    p.max(MIN_PREDICTION)
}
