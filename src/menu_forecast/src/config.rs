//! Forecast configuration: parsing, normalization, and loading.
//!
//! This module defines the TOML-backed settings for the training pipeline:
//! - Where the raw sales file lives and which columns hold date, item, and quantity
//! - Which rows the cleaner drops (aggregate sentinel labels, discontinued items)
//! - Which date formats are tried when parsing the date-of-sale column
//! - How the train/holdout split is drawn
//!
//! Every field has a default, so an empty document is a valid configuration.
//!
//! Key behaviors:
//! - Normalization trims sentinel labels, excluded items, and date formats and
//!   de-duplicates them while preserving order.
//! - Column names are trimmed and must be non-empty.
//! - `test_fraction` must lie strictly between 0 and 1.
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_config_str`]
//! - Parse + normalize from a file path: [`load_config_path`]
//! - Normalization of an already-built value: [`normalize_config`]

use std::{collections::HashSet, mem, path::PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Seed used for the train/holdout split unless configured otherwise.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Top-level configuration for the training pipeline.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Raw record source.
    pub source: SourceCfg,
    /// Record cleaning rules.
    pub cleaning: CleaningCfg,
    /// Model training settings.
    pub training: TrainingCfg,
}

/// Location and column layout of the raw sales file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceCfg {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Header of the date-of-sale column.
    pub date_column: String,
    /// Header of the menu identifier column.
    pub item_column: String,
    /// Header of the quantity column.
    pub quantity_column: String,
}

impl Default for SourceCfg {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/sales_data.csv"),
            date_column: "Date of Sale".into(),
            item_column: "Menu Name".into(),
            quantity_column: "Sales Quantity".into(),
        }
    }
}

/// Rules applied by [`crate::cleaner::clean_records`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningCfg {
    /// Date-of-sale values that mark aggregate rows (exact match).
    pub sentinel_labels: Vec<String>,
    /// Discontinued items removed from training (exact match).
    pub excluded_items: Vec<String>,
    /// `chrono` format strings tried in order. Formats with time fields parse
    /// full date-times and keep only the date.
    pub date_formats: Vec<String>,
}

impl Default for CleaningCfg {
    fn default() -> Self {
        Self {
            sentinel_labels: vec!["Total".into(), "Grand Total".into()],
            excluded_items: vec!["Frank Roll".into()],
            date_formats: vec![
                "%Y-%m-%d".into(),
                "%m/%d/%Y".into(),
                "%m/%d/%y".into(),
                "%d-%b-%Y".into(),
                "%Y-%m-%d %H:%M:%S".into(),
                "%Y-%m-%dT%H:%M:%S".into(),
            ],
        }
    }
}

/// Train/holdout split settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingCfg {
    /// Share of cleaned rows held out for validation.
    pub test_fraction: f64,
    /// Seed for the split RNG. Ignored when `random_split` is set.
    pub split_seed: u64,
    /// Draw the split from OS entropy instead of `split_seed`.
    pub random_split: bool,
}

impl Default for TrainingCfg {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            split_seed: DEFAULT_SPLIT_SEED,
            random_split: false,
        }
    }
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Sentinel labels removed as duplicates after trimming.
    pub sentinel_labels_deduped: usize,
    /// Excluded items removed as duplicates after trimming.
    pub excluded_items_deduped: usize,
    /// Date formats removed as duplicates after trimming.
    pub date_formats_deduped: usize,
}

/// Normalize a configuration in place.
///
/// What normalization does:
/// - Trim column names and reject empty ones
/// - Trim + de-duplicate sentinel labels, excluded items, and date formats,
///   preserving the first occurrence; empty entries are dropped
/// - Require at least one date format
/// - Require `0 < test_fraction < 1`
pub fn normalize_config(cfg: &mut ForecastConfig) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    for (label, column) in [
        ("source.date_column", &mut cfg.source.date_column),
        ("source.item_column", &mut cfg.source.item_column),
        ("source.quantity_column", &mut cfg.source.quantity_column),
    ] {
        *column = column.trim().to_string();
        if column.is_empty() {
            bail!("{label} cannot be empty after trimming");
        }
    }

    report.sentinel_labels_deduped = dedupe_trimmed(&mut cfg.cleaning.sentinel_labels);
    report.excluded_items_deduped = dedupe_trimmed(&mut cfg.cleaning.excluded_items);
    report.date_formats_deduped = dedupe_trimmed(&mut cfg.cleaning.date_formats);

    if cfg.cleaning.date_formats.is_empty() {
        bail!("cleaning.date_formats must list at least one format");
    }

    let frac = cfg.training.test_fraction;
    if !(frac > 0.0 && frac < 1.0) {
        bail!("training.test_fraction must be between 0 and 1 (exclusive), got {frac}");
    }

    Ok(report)
}

/// Trim every entry, drop empties and later duplicates. Returns how many
/// non-empty duplicates were removed.
fn dedupe_trimmed(list: &mut Vec<String>) -> usize {
    let mut seen = HashSet::new();
    let mut removed = 0;
    let mut out = Vec::with_capacity(list.len());
    for entry in mem::take(list) {
        let entry = entry.trim().to_string();
        if entry.is_empty() {
            continue;
        }
        if seen.insert(entry.clone()) {
            out.push(entry);
        } else {
            removed += 1;
        }
    }
    *list = out;
    removed
}

/// Parse and normalize a configuration from a TOML string.
///
/// Errors:
/// - TOML parse failures (including unknown keys)
/// - Normalization errors (see [`normalize_config`])
pub fn load_config_str(toml_str: &str) -> anyhow::Result<ForecastConfig> {
    let mut cfg: ForecastConfig = toml::from_str(toml_str).context("failed to parse forecast TOML")?;
    let report = normalize_config(&mut cfg).context("normalize_config failed")?;
    tracing::debug!(?report, "normalized forecast config");
    Ok(cfg)
}

/// Read a configuration TOML file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<ForecastConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = load_config_str("").unwrap();
        assert_eq!(cfg.source.item_column, "Menu Name");
        assert_eq!(cfg.cleaning.sentinel_labels, vec!["Total", "Grand Total"]);
        assert_eq!(cfg.cleaning.excluded_items, vec!["Frank Roll"]);
        assert_eq!(cfg.training.split_seed, DEFAULT_SPLIT_SEED);
        assert!(!cfg.training.random_split);
    }

    #[test]
    fn normalizes_lists_and_columns() {
        let mut cfg: ForecastConfig = toml::from_str(
            r#"
            [source]
            item_column = "  Menu Name "
            [cleaning]
            sentinel_labels = ["Total", " Total", "Grand Total", ""]
            excluded_items = ["Frank Roll", "Frank Roll "]
            date_formats = ["%Y-%m-%d"]
            "#,
        )
        .unwrap();

        let report = normalize_config(&mut cfg).unwrap();
        assert_eq!(
            report,
            NormalizationReport {
                sentinel_labels_deduped: 1,
                excluded_items_deduped: 1,
                date_formats_deduped: 0,
            }
        );
        assert_eq!(cfg.source.item_column, "Menu Name");
        assert_eq!(cfg.cleaning.sentinel_labels, vec!["Total", "Grand Total"]);
        assert_eq!(cfg.cleaning.excluded_items, vec!["Frank Roll"]);
    }

    #[test]
    fn rejects_out_of_range_test_fraction() {
        let err = load_config_str("[training]\ntest_fraction = 1.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("test_fraction"));
        assert!(load_config_str("[training]\ntest_fraction = 0.0\n").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = load_config_str("[training]\nepochs = 3\n").unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }

    #[test]
    fn rejects_empty_column_and_missing_formats() {
        assert!(load_config_str("[source]\ndate_column = \"  \"\n").is_err());
        assert!(load_config_str("[cleaning]\ndate_formats = [\" \"]\n").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.toml");
        std::fs::write(&path, "[training]\nsplit_seed = 7\nrandom_split = true\n").unwrap();

        let cfg = load_config_path(&path).unwrap();
        assert_eq!(cfg.training.split_seed, 7);
        assert!(cfg.training.random_split);
    }
}
