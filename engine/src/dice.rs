use std::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DiceError, Result};

/// Uniform integer generator consumed by every roll.
///
/// Implemented for all `rand` generators; tests can supply a scripted one.
pub trait Source {
    /// A uniformly distributed value in `0..bound`. `bound` is always positive.
    fn below(&mut self, bound: i32) -> i32;
}

impl<R: RngCore + ?Sized> Source for R {
    fn below(&mut self, bound: i32) -> i32 {
        self.gen_range(0..bound)
    }
}

/// A fair die with faces `1..=sides`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Dice {
    sides: i32,
}

/// Outcome of a (possibly keep-highest) sum: the score and every die rolled, in roll order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SumResult {
    pub sum: i64,
    pub rolls: Vec<i32>,
}

impl From<SumResult> for (i64, Vec<i32>) {
    fn from(r: SumResult) -> Self {
        (r.sum, r.rolls)
    }
}

impl Dice {
    pub fn new(sides: i32) -> Result<Self> {
        if sides <= 0 {
            debug!(sides, "rejected dice configuration");
            return Err(DiceError::InvalidConfiguration { sides });
        }
        Ok(Self { sides })
    }

    pub fn sides(&self) -> i32 {
        self.sides
    }

    /// One roll in `1..=sides`.
    pub fn roll<S: Source + ?Sized>(&self, src: &mut S) -> i32 {
        let r = src.below(self.sides) + 1;
        trace!(sides = self.sides, roll = r, "roll");
        r
    }

    /// `n` independent rolls in the order they were made. Empty when `n <= 0`.
    pub fn roll_n<S: Source + ?Sized>(&self, src: &mut S, n: i32) -> Vec<i32> {
        if n <= 0 {
            return Vec::new();
        }
        (0..n).map(|_| self.roll(src)).collect()
    }

    /// Sum of `n` rolls. Same as `sum_nk(src, n, n)`.
    pub fn sum_n<S: Source + ?Sized>(&self, src: &mut S, n: i32) -> SumResult {
        self.sum_nk(src, n, n)
    }

    /// Roll `n` dice and sum the `k` highest.
    ///
    /// - `n <= 0`: nothing is rolled, result is `(0, [])`.
    /// - `k <= 0`: the dice are still rolled and returned, the sum is 0.
    /// - `k >= n`: every die counts.
    ///
    /// `rolls` always holds all `n` results in roll order, never the sorted copy.
    pub fn sum_nk<S: Source + ?Sized>(&self, src: &mut S, n: i32, k: i32) -> SumResult {
        if n <= 0 {
            return SumResult::default();
        }
        let rolls = self.roll_n(src, n);
        let sum = keep_highest(&rolls, k);
        debug!(sides = self.sides, n, k, sum, ?rolls, "sum_nk");
        SumResult { sum, rolls }
    }
}

/// Sum of the `k` largest values in `rolls`; `k` is clamped to `rolls.len()`, and `k <= 0` sums nothing.
///
/// Summed as `i64` so any count of `i32` faces fits.
pub fn keep_highest(rolls: &[i32], k: i32) -> i64 {
    let mut scratch = Vec::new();
    keep_highest_with(rolls, k, &mut scratch)
}

/// `keep_highest` reusing `scratch` for the sorted copy.
pub(crate) fn keep_highest_with(rolls: &[i32], k: i32, scratch: &mut Vec<i32>) -> i64 {
    if k <= 0 {
        return 0;
    }
    let k = k as usize;
    if k >= rolls.len() {
        return rolls.iter().map(|&r| i64::from(r)).sum();
    }
    scratch.clear();
    scratch.extend_from_slice(rolls);
    scratch.sort_unstable_by(|a, b| b.cmp(a));
    scratch[..k].iter().map(|&r| i64::from(r)).sum()
}

impl TryFrom<i32> for Dice {
    type Error = DiceError;

    fn try_from(sides: i32) -> Result<Self> {
        Dice::new(sides)
    }
}

impl From<Dice> for i32 {
    fn from(d: Dice) -> Self {
        d.sides
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}
