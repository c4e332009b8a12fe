//! Rows of the recommendation table.

use serde::{Deserialize, Serialize};

use crate::models::weekday::DayOfWeek;

/// Units to prepare for one item on one open day.
///
/// Serialized with the column names the front end reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRow {
    /// Item name.
    #[serde(rename = "Item Name")]
    pub item_name: String,
    /// Weekday, Monday..Saturday.
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: DayOfWeek,
    /// Ceiling of the clamped prediction; always at least 1.
    #[serde(rename = "Recommended Production")]
    pub recommended_production: u32,
}
