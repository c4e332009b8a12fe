//! Query service: owns the trained model and the cached recommendation table.
//!
//! A [`ForecastService`] is built once, before any request is served, and is
//! read-only afterwards. It is `Send + Sync` and meant to be shared behind an
//! `Arc`.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{
    cleaner::{CleanedTable, clean_records},
    config::ForecastConfig,
    errors::Error,
    models::{
        record::{FeatureRow, RawRecord},
        recommendation::RecommendationRow,
        weekday::DayOfWeek,
    },
    pipeline::{TrainedModel, build_model},
    recommend::{DaySelection, RecommendationTable, build_recommendations},
};

const ITEM_FIELD: &str = "Item Name";
const DAY_FIELD: &str = "DayOfWeek";

/// Immutable model plus precomputed recommendations.
#[derive(Debug)]
pub struct ForecastService {
    model: TrainedModel,
    table: RecommendationTable,
}

impl ForecastService {
    /// Clean `raw`, train, and build the recommendation table.
    ///
    /// Errors:
    /// - [`Error::EmptyDataset`] when no row survives cleaning
    /// - [`Error::Training`] when the model cannot be fitted
    pub fn initialize(raw: &[RawRecord], cfg: &ForecastConfig) -> Result<Self, Error> {
        let cleaned = clean_records(raw, &cfg.cleaning);
        Self::from_cleaned(&cleaned, cfg)
    }

    /// Train and build recommendations from an already cleaned table.
    pub fn from_cleaned(cleaned: &CleanedTable, cfg: &ForecastConfig) -> Result<Self, Error> {
        let model = build_model(cleaned, &cfg.training)?;
        let table = build_recommendations(&model, &cleaned.distinct_items(), &DayOfWeek::OPEN_DAYS);
        info!(rows = table.len(), "forecast service ready");
        Ok(Self::from_parts(model, table))
    }

    /// Assemble a service from independently built parts.
    pub fn from_parts(model: TrainedModel, table: RecommendationTable) -> Self {
        Self { model, table }
    }

    /// The trained model.
    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    /// The full ranked table.
    pub fn all_recommendations(&self) -> &[RecommendationRow] {
        self.table.rows()
    }

    /// Ranked rows for one open day. `day` is matched case-insensitively.
    ///
    /// Errors: [`Error::InvalidDay`] for Sunday or anything that is not a day name.
    pub fn recommendations(&self, day: &str) -> Result<Vec<RecommendationRow>, Error> {
        let day = DayOfWeek::parse_open_day(day)?;
        Ok(self.table.for_day(day).cloned().collect())
    }

    /// Predict quantities for caller-supplied feature rows.
    ///
    /// See [`parse_feature_rows`] for the accepted payload shapes. Values are
    /// encoded as given (no cleaning or case folding).
    pub fn predict(&self, payload: &Value) -> Result<Vec<f64>, Error> {
        let rows = parse_feature_rows(payload)?;
        Ok(self.model.predict_batch(&rows))
    }

    /// Pivot CSV of the recommendations, `selection` being `"All"` or a day name.
    pub fn export_csv(&self, selection: &str) -> Result<(DaySelection, String), Error> {
        let selection = DaySelection::parse(selection)?;
        let body = self.table.to_pivot_csv(selection)?;
        Ok((selection, body))
    }
}

#[derive(Deserialize)]
struct FeatureColumns {
    #[serde(rename = "Item Name")]
    item_name: Vec<String>,
    #[serde(rename = "DayOfWeek")]
    day_of_week: Vec<String>,
}

/// Validate and convert a prediction payload into feature rows.
///
/// Accepted shapes:
/// - one object: `{"Item Name": "...", "DayOfWeek": "..."}`
/// - an array of such objects
/// - a column object: `{"Item Name": [...], "DayOfWeek": [...]}` with equal lengths
///
/// Both fields must be strings; other fields are ignored.
pub fn parse_feature_rows(payload: &Value) -> Result<Vec<FeatureRow>, Error> {
    let invalid = |e: serde_json::Error| Error::InvalidInput(e.to_string());
    match payload {
        Value::Array(_) => Vec::<FeatureRow>::deserialize(payload).map_err(invalid),
        Value::Object(map) if map.get(ITEM_FIELD).is_some_and(Value::is_array) => {
            let cols = FeatureColumns::deserialize(payload).map_err(invalid)?;
            if cols.item_name.len() != cols.day_of_week.len() {
                return Err(Error::InvalidInput(format!(
                    "column lengths differ: {} item names, {} days",
                    cols.item_name.len(),
                    cols.day_of_week.len()
                )));
            }
            Ok(cols
                .item_name
                .into_iter()
                .zip(cols.day_of_week)
                .map(|(item, day)| FeatureRow::new(item, day))
                .collect())
        }
        Value::Object(_) => FeatureRow::deserialize(payload)
            .map(|row| vec![row])
            .map_err(invalid),
        other => Err(Error::InvalidInput(format!(
            "expected an object or an array of objects, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
