//! Loads raw sales lines from a delimited file with a header row.
//!
//! Only the three configured columns are read; every other column is ignored.
//! Values are kept as strings for the cleaner to interpret.

use std::{fs::File, io::Read, path::Path};

use tracing::info;

use crate::{config::SourceCfg, errors::Error, models::record::RawRecord};

/// Read raw records from the file named in `cfg.path`.
pub fn load_raw_records(cfg: &SourceCfg) -> Result<Vec<RawRecord>, Error> {
    load_raw_records_from_path(&cfg.path, cfg)
}

/// Read raw records from an explicit path, using `cfg` for the column names.
pub fn load_raw_records_from_path(path: &Path, cfg: &SourceCfg) -> Result<Vec<RawRecord>, Error> {
    let file = File::open(path).map_err(|e| {
        Error::Source(format!("cannot open sales file {}: {e}", path.display()))
    })?;
    let records = read_raw_records(file, cfg)?;
    info!(path = %path.display(), rows = records.len(), "loaded raw sales records");
    Ok(records)
}

/// Read raw records from any reader.
///
/// Errors:
/// - [`Error::Source`] when a configured column is missing from the header
/// - [`Error::Csv`] for unreadable input (bad UTF-8, I/O failures)
///
/// Short rows are accepted; their missing fields read as empty strings and are
/// left for the cleaner to drop.
pub fn read_raw_records<R: Read>(reader: R, cfg: &SourceCfg) -> Result<Vec<RawRecord>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::Source(format!("missing column {name:?} in sales file")))
    };
    let date_idx = column(&cfg.date_column)?;
    let item_idx = column(&cfg.item_column)?;
    let qty_idx = column(&cfg.quantity_column)?;

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        out.push(RawRecord {
            date_of_sale: field(date_idx),
            menu_name: field(item_idx),
            sales_quantity: field(qty_idx),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cleaner::clean_records, config::CleaningCfg};

    const SAMPLE: &str = "\
Menu Name,Date of Sale,Sales Quantity,Price
Chicken Roll,2024-01-01,12,80
Veg Roll,2024-01-01,7,60
,Total,19,
";

    #[test]
    fn reads_configured_columns_only() {
        let records = read_raw_records(SAMPLE.as_bytes(), &SourceCfg::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], RawRecord::new("2024-01-01", "Chicken Roll", "12"));
        assert_eq!(records[2].date_of_sale, "Total");
        assert_eq!(records[2].menu_name, "");
    }

    #[test]
    fn short_footer_rows_load_and_are_cleaned_away() {
        let input = "\
Menu Name,Date of Sale,Sales Quantity,Amount
Chicken Roll,2024-01-01,12,80
Veg Roll,2024-01-02,7,60
,Grand Total
";
        let records = read_raw_records(input.as_bytes(), &SourceCfg::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], RawRecord::new("Grand Total", "", ""));

        let cleaned = clean_records(&records, &CleaningCfg::default());
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.report.sentinel_dropped, 1);
    }

    #[test]
    fn short_row_missing_the_date_is_dropped_as_malformed() {
        let input = "Menu Name,Date of Sale,Sales Quantity\nChicken Roll,2024-01-01,12\nVeg Roll\n";
        let records = read_raw_records(input.as_bytes(), &SourceCfg::default()).unwrap();
        assert_eq!(records[1], RawRecord::new("", "Veg Roll", ""));

        let cleaned = clean_records(&records, &CleaningCfg::default());
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.report.malformed_dates, 1);
    }

    #[test]
    fn missing_column_is_source_error() {
        let cfg = SourceCfg {
            quantity_column: "Qty".into(),
            ..Default::default()
        };
        let err = read_raw_records(SAMPLE.as_bytes(), &cfg).unwrap_err();
        assert!(matches!(err, Error::Source(ref m) if m.contains("Qty")));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let cfg = SourceCfg {
            path: path.clone(),
            ..Default::default()
        };
        assert_eq!(load_raw_records(&cfg).unwrap().len(), 3);
    }

    #[test]
    fn missing_file_is_source_error() {
        let cfg = SourceCfg {
            path: "/definitely/not/here.csv".into(),
            ..Default::default()
        };
        assert!(matches!(load_raw_records(&cfg), Err(Error::Source(_))));
    }
}
