//! Record cleaning: turns raw transaction lines into the canonical sales table.
//!
//! Steps, in order:
//! 1. Drop aggregate rows whose date-of-sale is a sentinel label ("Total", "Grand Total")
//! 2. Parse the date-of-sale; rows that fail are excluded and counted
//! 3. Map the menu identifier onto the canonical item name
//! 4. Drop discontinued items (exact match)
//! 5. Derive the weekday from the parsed date
//!
//! Quantities that are not non-negative integers are excluded as well.
//! Nothing here fails as a whole: bad rows are reported in [`CleaningReport`].

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::{
    config::CleaningCfg,
    errors::MalformedDateError,
    models::record::{RawRecord, SalesRow},
};

/// Counters describing what the cleaner kept and dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    /// Rows received.
    pub rows_in: usize,
    /// Rows that survived every step.
    pub rows_kept: usize,
    /// Aggregate sentinel rows dropped.
    pub sentinel_dropped: usize,
    /// Rows whose date could not be parsed.
    pub malformed_dates: usize,
    /// Rows whose quantity was not a non-negative integer.
    pub malformed_quantities: usize,
    /// Rows for discontinued items.
    pub excluded_items: usize,
}

/// The canonical, trainable table.
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    /// Surviving rows in source order.
    pub rows: Vec<SalesRow>,
    /// What happened along the way.
    pub report: CleaningReport,
}

impl CleanedTable {
    /// Distinct item names in order of first appearance.
    pub fn distinct_items(&self) -> Vec<String> {
        let set: IndexSet<&str> = self.rows.iter().map(|r| r.item_name.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Number of surviving rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row survived.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a date-of-sale with the first matching format.
///
/// Formats carrying time fields are tried as full date-times and truncated to
/// the date; the rest are tried as plain dates. Surrounding whitespace is ignored.
pub fn parse_sale_date(raw: &str, formats: &[String]) -> Result<NaiveDate, MalformedDateError> {
    let value = raw.trim();
    formats
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .or_else(|| NaiveDateTime::parse_from_str(value, fmt).ok().map(|dt| dt.date()))
        })
        .ok_or_else(|| MalformedDateError {
            value: raw.to_string(),
        })
}

/// Parse a quantity as a non-negative integer. Integral float spellings such
/// as `"12.0"` are accepted.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let value = raw.trim();
    if let Ok(q) = value.parse::<u32>() {
        return Some(q);
    }
    let q = value.parse::<f64>().ok()?;
    (q.is_finite() && q >= 0.0 && q.fract() == 0.0 && q <= f64::from(u32::MAX)).then_some(q as u32)
}

/// Clean a raw record set.
pub fn clean_records(raw: &[RawRecord], rules: &CleaningCfg) -> CleanedTable {
    let sentinels: HashSet<&str> = rules.sentinel_labels.iter().map(String::as_str).collect();
    let excluded: HashSet<&str> = rules.excluded_items.iter().map(String::as_str).collect();

    let mut report = CleaningReport {
        rows_in: raw.len(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(raw.len());

    for (line, rec) in raw.iter().enumerate() {
        if sentinels.contains(rec.date_of_sale.as_str()) {
            report.sentinel_dropped += 1;
            continue;
        }

        let date = match parse_sale_date(&rec.date_of_sale, &rules.date_formats) {
            Ok(d) => d,
            Err(e) => {
                debug!(line, error = %e, "excluding row");
                report.malformed_dates += 1;
                continue;
            }
        };

        let item_name = rec.menu_name.as_str();
        if excluded.contains(item_name) {
            report.excluded_items += 1;
            continue;
        }

        let Some(quantity) = parse_quantity(&rec.sales_quantity) else {
            debug!(line, quantity = %rec.sales_quantity, "excluding row with malformed quantity");
            report.malformed_quantities += 1;
            continue;
        };

        rows.push(SalesRow::new(date, item_name, quantity));
    }

    report.rows_kept = rows.len();

    if report.malformed_dates > 0 || report.malformed_quantities > 0 {
        warn!(
            malformed_dates = report.malformed_dates,
            malformed_quantities = report.malformed_quantities,
            "some rows were excluded from training"
        );
    }
    info!(
        rows_in = report.rows_in,
        rows_kept = report.rows_kept,
        sentinel_dropped = report.sentinel_dropped,
        excluded_items = report.excluded_items,
        "cleaned sales records"
    );

    CleanedTable { rows, report }
}
