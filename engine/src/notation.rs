use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::dice::{Dice, Source, SumResult};
use crate::error::{DiceError, Result};

/// A roll expression such as `d20`, `3d6` or `4d6k3` (roll 4d6, keep the highest 3).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RollSpec {
    pub count: i32,
    pub sides: i32,
    pub keep: Option<i32>,
}

impl RollSpec {
    pub fn new(count: i32, sides: i32) -> Self {
        Self {
            count,
            sides,
            keep: None,
        }
    }

    pub fn keep_highest(self, keep: i32) -> Self {
        Self {
            keep: Some(keep),
            ..self
        }
    }

    /// Number of dice that count toward the sum.
    pub fn kept(&self) -> i32 {
        self.keep.unwrap_or(self.count)
    }

    pub fn dice(&self) -> Result<Dice> {
        Dice::new(self.sides)
    }

    pub fn roll<S: Source + ?Sized>(&self, src: &mut S) -> Result<SumResult> {
        Ok(self.dice()?.sum_nk(src, self.count, self.kept()))
    }

    pub fn probability(&self) -> Result<Vec<f64>> {
        Ok(self.dice()?.probability(self.count, self.kept()))
    }
}

impl FromStr for RollSpec {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        let (count, rest) = lowered
            .split_once('d')
            .ok_or_else(|| DiceError::notation(s, "expected NdS or NdSkK"))?;
        let count = if count.is_empty() {
            1
        } else {
            parse_num(s, count, "count")?
        };
        let (sides, keep) = match rest.split_once('k') {
            Some((sides, keep)) => (sides, Some(parse_num(s, keep, "keep")?)),
            None => (rest, None),
        };
        let sides = parse_num(s, sides, "sides")?;

        if count <= 0 {
            return Err(DiceError::notation(s, "dice count must be positive"));
        }
        if sides <= 0 {
            return Err(DiceError::notation(s, "sides must be positive"));
        }
        if keep.is_some_and(|k| k < 0) {
            return Err(DiceError::notation(s, "keep must not be negative"));
        }
        Ok(Self { count, sides, keep })
    }
}

fn parse_num(input: &str, part: &str, what: &str) -> Result<i32> {
    part.parse()
        .map_err(|_| DiceError::notation(input, format!("bad {} '{}'", what, part)))
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(k) = self.keep {
            write!(f, "k{}", k)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for RollSpec {
    type Error = DiceError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RollSpec> for String {
    fn from(spec: RollSpec) -> Self {
        spec.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!("d20".parse::<RollSpec>().unwrap(), RollSpec::new(1, 20));
        assert_eq!("3D6".parse::<RollSpec>().unwrap(), RollSpec::new(3, 6));
        assert_eq!(
            " 4d6k3 ".parse::<RollSpec>().unwrap(),
            RollSpec::new(4, 6).keep_highest(3)
        );
    }

    #[test]
    fn keep_zero_is_allowed() {
        let spec: RollSpec = "2d8k0".parse().unwrap();
        assert_eq!(spec.kept(), 0);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "6", "0d6", "2d0", "2d-3", "xd6", "2d6k", "2d6k-1", "2d6kk1"] {
            assert!(
                matches!(bad.parse::<RollSpec>(), Err(DiceError::InvalidNotation { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for text in ["1d20", "4d6k3", "10d10"] {
            assert_eq!(text.parse::<RollSpec>().unwrap().to_string(), text);
        }
    }
}
