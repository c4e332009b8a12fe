//! The recommendation table: units to prepare per item per open day.
//!
//! Built once from a [`TrainedModel`] and never recomputed. Rows are ordered by
//! recommended production, highest first; ties keep enumeration order (items
//! in the order given, days Monday..Saturday).

use indexmap::IndexSet;
use tracing::info;

use crate::{
    errors::Error,
    models::{recommendation::RecommendationRow, weekday::DayOfWeek},
    pipeline::TrainedModel,
};

/// Which days an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelection {
    /// Monday through Saturday.
    All,
    /// A single open day.
    Day(DayOfWeek),
}

impl DaySelection {
    /// Parse `"All"` (any case) or an open day name (any case).
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw.eq_ignore_ascii_case("all") {
            return Ok(DaySelection::All);
        }
        DayOfWeek::parse_open_day(raw).map(DaySelection::Day)
    }

    /// The selected days in weekday order.
    pub fn days(&self) -> Vec<DayOfWeek> {
        match self {
            DaySelection::All => DayOfWeek::OPEN_DAYS.to_vec(),
            DaySelection::Day(d) => vec![*d],
        }
    }

    /// Tag used in export file names: `all_days` or the day name.
    pub fn file_tag(&self) -> String {
        match self {
            DaySelection::All => "all_days".into(),
            DaySelection::Day(d) => d.as_str().to_string(),
        }
    }
}

/// Sorted, immutable recommendation rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationTable {
    rows: Vec<RecommendationRow>,
}

/// Round a clamped prediction up to whole units.
fn production_units(prediction: f64) -> u32 {
    // saturating float-to-int cast; predictions are already >= 1
    prediction.ceil().max(1.0) as u32
}

/// Predict every `items × days` pair and rank the results.
pub fn build_recommendations(
    model: &TrainedModel,
    items: &[String],
    days: &[DayOfWeek],
) -> RecommendationTable {
    let mut rows: Vec<RecommendationRow> = items
        .iter()
        .flat_map(|item| {
            days.iter().map(move |day| RecommendationRow {
                item_name: item.clone(),
                day_of_week: *day,
                recommended_production: production_units(model.predict(item, day.as_str())),
            })
        })
        .collect();

    // stable: equal values keep enumeration order
    rows.sort_by(|a, b| b.recommended_production.cmp(&a.recommended_production));

    info!(
        items = items.len(),
        days = days.len(),
        rows = rows.len(),
        "built recommendation table"
    );
    RecommendationTable { rows }
}

impl RecommendationTable {
    /// All rows in ranked order.
    pub fn rows(&self) -> &[RecommendationRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one day, still in ranked order.
    pub fn for_day(&self, day: DayOfWeek) -> impl Iterator<Item = &RecommendationRow> {
        self.rows.iter().filter(move |r| r.day_of_week == day)
    }

    /// Render a pivot CSV: one row per item, one column per selected day.
    ///
    /// Items are listed in ranked order of first appearance, walking the
    /// selected days Monday first; an item absent from one day's rows still
    /// gets a line from a later day. Missing cells are left empty.
    pub fn to_pivot_csv(&self, selection: DaySelection) -> Result<String, Error> {
        let days = selection.days();

        let mut items: IndexSet<&str> = IndexSet::new();
        for day in &days {
            items.extend(self.for_day(*day).map(|r| r.item_name.as_str()));
        }

        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["Item Name".to_string()];
        header.extend(days.iter().map(|d| format!("{d} Recommended Production")));
        writer.write_record(&header)?;

        for item in &items {
            let mut record = vec![item.to_string()];
            for day in &days {
                let cell = self
                    .for_day(*day)
                    .find(|r| r.item_name == *item)
                    .map(|r| r.recommended_production.to_string())
                    .unwrap_or_default();
                record.push(cell);
            }
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| Error::Source(format!("export is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TrainingCfg, pipeline::build_model, test_support::additive_table};

    fn table() -> RecommendationTable {
        let cleaned = additive_table();
        let model = build_model(&cleaned, &TrainingCfg::default()).unwrap();
        build_recommendations(&model, &cleaned.distinct_items(), &DayOfWeek::OPEN_DAYS)
    }

    #[test]
    fn one_row_per_item_and_open_day() {
        let t = table();
        assert_eq!(t.len(), 3 * 6);
        assert!(t.rows().iter().all(|r| r.day_of_week.is_open()));
        assert!(t.rows().iter().all(|r| r.recommended_production >= 1));
    }

    #[test]
    fn sorted_descending() {
        let t = table();
        for pair in t.rows().windows(2) {
            assert!(pair[0].recommended_production >= pair[1].recommended_production);
        }
        assert_eq!(t.rows()[0].item_name, "Chicken Roll");
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let t = table();
        // Water clamps to 1 early in the week; those rows tie and must stay Monday-first.
        let water: Vec<_> = t
            .rows()
            .iter()
            .filter(|r| r.item_name == "Water" && r.recommended_production == 1)
            .map(|r| r.day_of_week)
            .collect();
        assert!(!water.is_empty());
        assert!(water.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rounds_up() {
        assert_eq!(production_units(1.0), 1);
        assert_eq!(production_units(1.0001), 2);
        assert_eq!(production_units(7.9), 8);
    }

    #[test]
    fn day_filter_keeps_order() {
        let t = table();
        let monday: Vec<_> = t.for_day(DayOfWeek::Monday).collect();
        assert_eq!(monday.len(), 3);
        assert!(monday.iter().all(|r| r.day_of_week == DayOfWeek::Monday));
        assert_eq!(monday[0].item_name, "Chicken Roll");
        assert_eq!(monday[1].item_name, "Veg Roll");
    }

    #[test]
    fn pivot_csv_layout() {
        let t = table();
        let csv = t.to_pivot_csv(DaySelection::All).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Item Name,Monday Recommended Production,Tuesday Recommended Production,\
             Wednesday Recommended Production,Thursday Recommended Production,\
             Friday Recommended Production,Saturday Recommended Production"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Chicken Roll,"));
        assert_eq!(lines[1].split(',').count(), 7);

        let single = t.to_pivot_csv(DaySelection::Day(DayOfWeek::Friday)).unwrap();
        assert!(single.starts_with("Item Name,Friday Recommended Production\n"));
    }

    #[test]
    fn pivot_lists_items_missing_from_monday_after_monday_items() {
        let row = |item: &str, day, units| RecommendationRow {
            item_name: item.to_string(),
            day_of_week: day,
            recommended_production: units,
        };
        let t = RecommendationTable {
            rows: vec![
                row("Paneer Roll", DayOfWeek::Tuesday, 9),
                row("Veg Roll", DayOfWeek::Monday, 5),
                row("Veg Roll", DayOfWeek::Tuesday, 4),
            ],
        };
        let csv = t.to_pivot_csv(DaySelection::All).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Veg Roll,5,4,,,,");
        assert_eq!(lines[2], "Paneer Roll,,9,,,,");
    }

    #[test]
    fn selection_parsing() {
        assert_eq!(DaySelection::parse("ALL").unwrap(), DaySelection::All);
        assert_eq!(
            DaySelection::parse("tuesday").unwrap(),
            DaySelection::Day(DayOfWeek::Tuesday)
        );
        assert!(DaySelection::parse("Sunday").is_err());
    }
}
