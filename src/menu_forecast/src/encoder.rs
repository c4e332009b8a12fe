//! One-hot encoding of the (item, weekday) feature pair.
//!
//! The encoder is fit once over every distinct value seen in the cleaned data.
//! The output vector is laid out as `[item block | day block]`, each block in
//! sorted category order. Values that were not seen during fitting encode to an
//! all-zero block, so the model falls back to its baseline for that field
//! instead of failing.

use indexmap::IndexSet;
use ndarray::{Array1, Array2};

use crate::models::record::FeatureRow;

/// Categories of one feature column.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Categories {
    values: IndexSet<String>,
}

impl Categories {
    fn fit<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut sorted: Vec<&str> = values.collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self {
            values: sorted.into_iter().map(str::to_string).collect(),
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn position(&self, value: &str) -> Option<usize> {
        self.values.get_index_of(value)
    }
}

/// Fitted one-hot encoder for [`FeatureRow`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneHotEncoder {
    items: Categories,
    days: Categories,
}

impl OneHotEncoder {
    /// Learn the categories present in `rows`.
    pub fn fit<'a>(rows: impl IntoIterator<Item = &'a FeatureRow> + Clone) -> Self {
        Self {
            items: Categories::fit(rows.clone().into_iter().map(|r| r.item_name.as_str())),
            days: Categories::fit(rows.into_iter().map(|r| r.day_of_week.as_str())),
        }
    }

    /// Length of an encoded vector.
    pub fn width(&self) -> usize {
        self.items.len() + self.days.len()
    }

    /// Known item names, sorted.
    pub fn item_categories(&self) -> impl Iterator<Item = &str> {
        self.items.values.iter().map(String::as_str)
    }

    /// Known day labels, sorted.
    pub fn day_categories(&self) -> impl Iterator<Item = &str> {
        self.days.values.iter().map(String::as_str)
    }

    /// Column index of each field of `row`, `None` for unseen values.
    fn hot_columns(&self, row: &FeatureRow) -> [Option<usize>; 2] {
        [
            self.items.position(&row.item_name),
            self.days
                .position(&row.day_of_week)
                .map(|i| self.items.len() + i),
        ]
    }

    /// Encode a single row.
    pub fn encode(&self, row: &FeatureRow) -> Array1<f64> {
        let mut out = Array1::zeros(self.width());
        for col in self.hot_columns(row).into_iter().flatten() {
            out[col] = 1.0;
        }
        out
    }

    /// Encode many rows into a design matrix, one row per input.
    pub fn encode_all(&self, rows: &[FeatureRow]) -> Array2<f64> {
        let mut out = Array2::zeros((rows.len(), self.width()));
        for (i, row) in rows.iter().enumerate() {
            for col in self.hot_columns(row).into_iter().flatten() {
                out[[i, col]] = 1.0;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FeatureRow> {
        vec![
            FeatureRow::new("Veg Roll", "Tuesday"),
            FeatureRow::new("Chicken Roll", "Monday"),
            FeatureRow::new("Veg Roll", "Monday"),
        ]
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let enc = OneHotEncoder::fit(&rows());
        assert_eq!(
            enc.item_categories().collect::<Vec<_>>(),
            vec!["Chicken Roll", "Veg Roll"]
        );
        assert_eq!(enc.day_categories().collect::<Vec<_>>(), vec!["Monday", "Tuesday"]);
        assert_eq!(enc.width(), 4);
    }

    #[test]
    fn encodes_one_hot_per_block() {
        let enc = OneHotEncoder::fit(&rows());
        let v = enc.encode(&FeatureRow::new("Veg Roll", "Monday"));
        assert_eq!(v.to_vec(), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn unseen_values_encode_to_zero_block() {
        let enc = OneHotEncoder::fit(&rows());
        let v = enc.encode(&FeatureRow::new("Chicken Roll", "Sunday"));
        assert_eq!(v.to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
        let v = enc.encode(&FeatureRow::new("Pizza", "Funday"));
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn matrix_rows_match_single_encoding() {
        let enc = OneHotEncoder::fit(&rows());
        let m = enc.encode_all(&rows());
        for (i, row) in rows().iter().enumerate() {
            assert_eq!(m.row(i).to_owned(), enc.encode(row));
        }
    }
}
