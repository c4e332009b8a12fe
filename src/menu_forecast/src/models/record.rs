//! Transaction records before and after cleaning, and the categorical feature
//! row the model consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::weekday::DayOfWeek;

/// One transaction line as delivered by the record source.
///
/// Fields are kept as raw strings; nothing is validated until the cleaner runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Date-of-sale column. May hold an aggregate label such as "Total".
    pub date_of_sale: String,
    /// Menu identifier column.
    pub menu_name: String,
    /// Quantity column.
    pub sales_quantity: String,
}

impl RawRecord {
    /// Convenience constructor, mostly for fixtures.
    pub fn new(
        date_of_sale: impl Into<String>,
        menu_name: impl Into<String>,
        sales_quantity: impl Into<String>,
    ) -> Self {
        Self {
            date_of_sale: date_of_sale.into(),
            menu_name: menu_name.into(),
            sales_quantity: sales_quantity.into(),
        }
    }
}

/// A cleaned transaction with its derived weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRow {
    /// Parsed date of sale.
    pub date: NaiveDate,
    /// Canonical item name (renamed from the menu identifier column).
    pub item_name: String,
    /// Weekday computed from `date`.
    pub day_of_week: DayOfWeek,
    /// Units sold.
    pub quantity_sold: u32,
}

impl SalesRow {
    /// Build a row, deriving the weekday from `date`.
    pub fn new(date: NaiveDate, item_name: impl Into<String>, quantity_sold: u32) -> Self {
        Self {
            date,
            item_name: item_name.into(),
            day_of_week: DayOfWeek::of_date(date),
            quantity_sold,
        }
    }

    /// The categorical features of this row.
    pub fn features(&self) -> FeatureRow {
        FeatureRow::new(self.item_name.clone(), self.day_of_week.as_str())
    }
}

/// The categorical pair the encoder works on.
///
/// Both fields are free-form strings: ad-hoc prediction requests may carry
/// items or day names that never occurred in training.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Item name.
    #[serde(rename = "Item Name")]
    pub item_name: String,
    /// Day label, expected to look like "Monday".
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: String,
}

impl FeatureRow {
    /// Create a feature row.
    pub fn new(item_name: impl Into<String>, day_of_week: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            day_of_week: day_of_week.into(),
        }
    }
}
