//! Exact distribution of best-of-N-keep-K sums.
//!
//! Every one of the `sides^n` ordered outcomes is enumerated, so the cost is
//! `O(sides^n * n log n)`. This is meant for tabletop sizes (n up to about 10
//! with common dice). Nothing guards against larger inputs; they simply take
//! exponentially longer.

use tracing::debug;

use crate::dice::{Dice, keep_highest_with};

impl Dice {
    /// Probability of each sum `1..=sides*k` for `sum_nk(n, k)`.
    ///
    /// Index `i` holds the probability of sum `i + 1`. The table has
    /// `sides * k` entries even when `k > n`; sums past `sides * n` are 0.
    /// Empty when `n <= 0` or `k <= 0`.
    pub fn probability(&self, n: i32, k: i32) -> Vec<f64> {
        if n <= 0 || k <= 0 {
            return Vec::new();
        }
        let sides = self.sides();
        let len = sides as usize * k as usize;
        let total = f64::from(sides).powi(n);
        debug!(sides, n, k, outcomes = total, "enumerating outcomes");

        let mut counts = vec![0u64; len];
        let mut faces = vec![1i32; n as usize];
        let mut scratch = Vec::with_capacity(n as usize);

        // Odometer over n digits in 1..=sides.
        'outer: loop {
            let s = keep_highest_with(&faces, k, &mut scratch);
            counts[(s - 1) as usize] += 1;

            for digit in faces.iter_mut() {
                if *digit < sides {
                    *digit += 1;
                    continue 'outer;
                }
                *digit = 1;
            }
            break;
        }

        counts.into_iter().map(|c| c as f64 / total).collect()
    }
}

/// Mean sum of a probability table as returned by [`Dice::probability`].
pub fn expected_sum(table: &[f64]) -> f64 {
    table
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1) as f64 * p)
        .sum()
}
