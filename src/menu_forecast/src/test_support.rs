//! Fixtures shared by the unit tests.

use chrono::NaiveDate;

use crate::{cleaner::CleanedTable, models::record::SalesRow};

/// Ten weeks of sales for three items, starting Monday 2024-01-01.
///
/// Chicken Roll sells 20 + weekday index, Veg Roll 10 + weekday index (Monday
/// is index 0), Water never sells. Every (item, day) pair occurs ten times,
/// so any seeded 80% split still covers all categories.
pub(crate) fn additive_table() -> CleanedTable {
    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let items = [("Chicken Roll", 20u32), ("Veg Roll", 10), ("Water", 0)];
    let mut rows = Vec::new();
    for week in 0..10i64 {
        for offset in 0..7i64 {
            let date = monday + chrono::Duration::days(week * 7 + offset);
            for (name, base) in items {
                let qty = if base == 0 { 0 } else { base + offset as u32 };
                rows.push(SalesRow::new(date, name, qty));
            }
        }
    }
    CleanedTable {
        rows,
        ..Default::default()
    }
}
