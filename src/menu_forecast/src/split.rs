//! Shuffled train/holdout split.

use rand::{Rng, seq::SliceRandom};

/// Shuffle `rows` and cut off a holdout of `ceil(len × test_fraction)` rows.
///
/// The holdout is capped at `len - 1` so a non-empty input always leaves at
/// least one training row. Returns `(train, test)`.
pub fn train_test_split<T: Clone, R: Rng + ?Sized>(
    rows: &[T],
    rng: &mut R,
    test_fraction: f64,
) -> (Vec<T>, Vec<T>) {
    let n = rows.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut shuffled = rows.to_vec();
    shuffled.shuffle(rng);

    let test_len = ((n as f64 * test_fraction).ceil() as usize).min(n - 1);
    let train = shuffled.split_off(test_len);
    (train, shuffled)
}
