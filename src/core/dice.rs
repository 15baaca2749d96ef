//! Dice notation parsing and outcome distributions.
//!
//! Small pools are enumerated exactly. Larger pools fall back to a normal
//! approximation of the Irwin-Hall sum, which is an accuracy trade-off rather
//! than a bug: exact enumeration is exponential in the dice count.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::DiceError;
use crate::prng::RandomSource;

/// Largest pool the parser accepts.
pub const MAX_COUNT: u32 = 1000;
/// Largest die the parser accepts.
pub const MAX_SIDES: u32 = 1000;

/// Pools at or below both limits are enumerated exactly.
pub const EXACT_MAX_COUNT: u32 = 4;
pub const EXACT_MAX_SIDES: u32 = 20;

/// Quick-pick notations offered by the calculator.
pub const PRESETS: [&str; 6] = ["1d20", "2d6", "3d8+5", "4d6", "1d100", "2d12"];

/// `count` dice with `sides` faces each, plus a flat `modifier`.
///
/// Only built through [`DiceExpr::new`] (parsing and deserialization both go
/// through it), so every value is within the engine limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDiceExpr"))]
pub struct DiceExpr {
    count: u32,
    sides: u32,
    modifier: i32,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawDiceExpr {
    count: u32,
    sides: u32,
    #[serde(default)]
    modifier: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDiceExpr> for DiceExpr {
    type Error = DiceError;

    fn try_from(raw: RawDiceExpr) -> Result<Self, Self::Error> {
        Self::new(raw.count, raw.sides, raw.modifier)
    }
}

impl DiceExpr {
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, DiceError> {
        if count == 0 || count > MAX_COUNT {
            return Err(DiceError::Count {
                got: count as u64,
                max: MAX_COUNT,
            });
        }
        if sides == 0 || sides > MAX_SIDES {
            return Err(DiceError::Sides {
                got: sides as u64,
                max: MAX_SIDES,
            });
        }
        let lo = count as i64 + modifier as i64;
        let hi = count as i64 * sides as i64 + modifier as i64;
        if lo < i32::MIN as i64 || hi > i32::MAX as i64 {
            return Err(DiceError::Modifier(modifier.to_string()));
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Lowest reachable total.
    pub fn min(&self) -> i32 {
        (self.count as i64 + self.modifier as i64) as i32
    }

    /// Highest reachable total.
    pub fn max(&self) -> i32 {
        (self.count as i64 * self.sides as i64 + self.modifier as i64) as i32
    }

    pub fn average(&self) -> f64 {
        self.count as f64 * (self.sides as f64 + 1.0) / 2.0 + self.modifier as f64
    }

    pub fn distribution(&self) -> Distribution {
        let dist = if self.count <= EXACT_MAX_COUNT && self.sides <= EXACT_MAX_SIDES {
            exact(self.count, self.sides, self.modifier)
        } else {
            normal_approx(self.count, self.sides, self.modifier)
        };
        debug!(
            count = self.count,
            sides = self.sides,
            modifier = self.modifier,
            method = ?dist.method,
            support = dist.len(),
            "computed dice distribution"
        );
        dist
    }

    /// Roll every die once. A face is `floor(r * sides) + 1`.
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> RollResult {
        let sides = self.sides as f64;
        let rolls: Vec<u32> = (0..self.count)
            .map(|_| ((rng.next_f64() * sides) as u32 + 1).min(self.sides))
            .collect();
        let total = rolls.iter().map(|&r| r as i64).sum::<i64>() + self.modifier as i64;
        RollResult {
            rolls,
            total: total as i32,
            min: self.min(),
            max: self.max(),
            average: self.average(),
        }
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    /// Accepts `[count]d<sides>[+|-modifier]`, case-insensitive `d`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || DiceError::Malformed(text.to_string());
        let s = text.trim();

        let (count_str, rest) = s
            .split_once(|c: char| c == 'd' || c == 'D')
            .ok_or_else(malformed)?;
        if !all_digits(count_str) {
            return Err(malformed());
        }

        let sides_end = rest.find(|c: char| c == '+' || c == '-').unwrap_or(rest.len());
        let (sides_str, modifier_str) = rest.split_at(sides_end);
        if sides_str.is_empty() || !all_digits(sides_str) {
            return Err(malformed());
        }
        if !modifier_str.is_empty() && (modifier_str.len() < 2 || !all_digits(&modifier_str[1..])) {
            return Err(malformed());
        }

        let count = if count_str.is_empty() {
            1
        } else {
            parse_saturating(count_str)
        };
        let sides = parse_saturating(sides_str);
        if count == 0 || count > MAX_COUNT as u64 {
            return Err(DiceError::Count {
                got: count,
                max: MAX_COUNT,
            });
        }
        if sides == 0 || sides > MAX_SIDES as u64 {
            return Err(DiceError::Sides {
                got: sides,
                max: MAX_SIDES,
            });
        }

        let modifier = if modifier_str.is_empty() {
            0
        } else {
            modifier_str
                .parse::<i32>()
                .map_err(|_| DiceError::Modifier(modifier_str.to_string()))?
        };

        Self::new(count as u32, sides as u32, modifier)
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_saturating(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Parse dice notation, collapsing every failure into `None`.
pub fn parse_dice_notation(text: &str) -> Option<DiceExpr> {
    text.parse().ok()
}

/// Outcome of a single roll of a [`DiceExpr`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RollResult {
    pub rolls: Vec<u32>,
    pub total: i32,
    pub min: i32,
    pub max: i32,
    pub average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistributionMethod {
    /// Every combination enumerated.
    Exact,
    /// Gaussian density sampled at each integer, then renormalized.
    NormalApprox,
}

/// Probability mass per total, ordered by total.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Distribution {
    method: DistributionMethod,
    masses: BTreeMap<i32, f64>,
}

impl Distribution {
    pub fn method(&self) -> DistributionMethod {
        self.method
    }

    /// Mass at `value`; zero outside the support.
    pub fn get(&self, value: i32) -> f64 {
        self.masses.get(&value).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.masses.iter().map(|(&v, &p)| (v, p))
    }

    pub fn min(&self) -> Option<i32> {
        self.masses.keys().next().copied()
    }

    pub fn max(&self) -> Option<i32> {
        self.masses.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    pub fn mean(&self) -> f64 {
        self.iter().map(|(v, p)| v as f64 * p).sum()
    }

    /// Tallest bar, used to scale charts.
    pub fn max_probability(&self) -> f64 {
        self.masses.values().copied().fold(0.0, f64::max)
    }

    pub fn into_map(self) -> BTreeMap<i32, f64> {
        self.masses
    }
}

/// Distribution of `count`d`sides` + `modifier`.
///
/// Inputs are checked against the same limits as [`DiceExpr::new`], so the
/// support is always `[count + modifier, count * sides + modifier]`.
pub fn distribution(count: u32, sides: u32, modifier: i32) -> Result<Distribution, DiceError> {
    DiceExpr::new(count, sides, modifier).map(|expr| expr.distribution())
}

fn exact(count: u32, sides: u32, modifier: i32) -> Distribution {
    fn enumerate(depth: u32, sum: i64, sides: u32, occurrences: &mut BTreeMap<i64, u64>) {
        if depth == 0 {
            *occurrences.entry(sum).or_insert(0) += 1;
            return;
        }
        for face in 1..=sides as i64 {
            enumerate(depth - 1, sum + face, sides, occurrences);
        }
    }

    let mut occurrences = BTreeMap::new();
    enumerate(count, 0, sides, &mut occurrences);

    let combinations = (sides as u64).pow(count) as f64;
    trace!(combinations, "enumerated dice combinations");
    let masses = occurrences
        .into_iter()
        .map(|(sum, n)| ((sum + modifier as i64) as i32, n as f64 / combinations))
        .collect();

    Distribution {
        method: DistributionMethod::Exact,
        masses,
    }
}

fn normal_approx(count: u32, sides: u32, modifier: i32) -> Distribution {
    let lo = count as i64 + modifier as i64;
    let hi = count as i64 * sides as i64 + modifier as i64;
    let n = count as f64;
    let s = sides as f64;
    let mean = n * (s + 1.0) / 2.0 + modifier as f64;
    let variance = n * (s * s - 1.0) / 12.0;

    let mut masses = BTreeMap::new();
    if variance <= 0.0 {
        // Every die shows 1.
        masses.insert(lo as i32, 1.0);
        return Distribution {
            method: DistributionMethod::NormalApprox,
            masses,
        };
    }

    let stddev = variance.sqrt();
    let norm = stddev * (2.0 * std::f64::consts::PI).sqrt();
    let mut total = 0.0;
    for v in lo..=hi {
        let z = (v as f64 - mean) / stddev;
        let p = (-0.5 * z * z).exp() / norm;
        total += p;
        masses.insert(v as i32, p);
    }

    if total > 0.0 {
        for p in masses.values_mut() {
            *p /= total;
        }
    }

    Distribution {
        method: DistributionMethod::NormalApprox,
        masses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::SeededRng;

    #[test]
    fn parses_full_notation() {
        let e = parse_dice_notation("3d8+5").unwrap();
        assert_eq!(
            e,
            DiceExpr {
                count: 3,
                sides: 8,
                modifier: 5
            }
        );
        assert_eq!((e.count(), e.sides(), e.modifier()), (3, 8, 5));
    }

    #[test]
    fn parses_short_forms() {
        assert_eq!(parse_dice_notation("d20").unwrap().count(), 1);
        assert_eq!(parse_dice_notation(" 2D6 ").unwrap().sides(), 6);
        assert_eq!(parse_dice_notation("1d4-1").unwrap().modifier(), -1);
        assert_eq!(parse_dice_notation("2d6+0").unwrap().modifier(), 0);
    }

    #[test]
    fn rejects_bad_notation() {
        for bad in [
            "", "not-dice", "2d", "d", "2x6", "2d6+", "2d6+3+1", "-2d6", "2d6 + 3", "2d-6", "0d6",
            "2d0", "1d1001", "99999999999999999999d6",
        ] {
            assert!(parse_dice_notation(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parse_errors_explain_themselves() {
        assert!(matches!(
            "0d6".parse::<DiceExpr>(),
            Err(DiceError::Count { got: 0, .. })
        ));
        assert!(matches!(
            "1d0".parse::<DiceExpr>(),
            Err(DiceError::Sides { got: 0, .. })
        ));
        assert!(matches!(
            "1d6+99999999999".parse::<DiceExpr>(),
            Err(DiceError::Modifier(_))
        ));
        assert!(matches!(
            "hello".parse::<DiceExpr>(),
            Err(DiceError::Malformed(_))
        ));
    }

    #[test]
    fn display_round_trips_presets() {
        for p in PRESETS {
            assert_eq!(parse_dice_notation(p).unwrap().to_string(), p);
        }
        assert_eq!(DiceExpr::new(3, 8, -2).unwrap().to_string(), "3d8-2");
    }

    #[test]
    fn two_d_six_is_the_triangle() {
        let d = distribution(2, 6, 0).unwrap();
        assert_eq!(d.method(), DistributionMethod::Exact);
        assert_eq!((d.min(), d.max()), (Some(2), Some(12)));
        assert_eq!(d.len(), 11);
        assert!((d.get(7) - 6.0 / 36.0).abs() < 1e-12);
        assert!((d.get(2) - 1.0 / 36.0).abs() < 1e-12);
        assert!((d.total() - 1.0).abs() < 1e-9);
        assert!((d.mean() - 7.0).abs() < 1e-9);
        for k in 0..5 {
            assert!((d.get(2 + k) - d.get(12 - k)).abs() < 1e-12);
        }
    }

    #[test]
    fn modifier_shifts_support() {
        let d = distribution(3, 8, 5).unwrap();
        assert_eq!((d.min(), d.max()), (Some(8), Some(29)));
        assert_eq!(d.get(7), 0.0);
    }

    #[test]
    fn large_pools_use_the_approximation() {
        let d = distribution(10, 6, 0).unwrap();
        assert_eq!(d.method(), DistributionMethod::NormalApprox);
        assert_eq!((d.min(), d.max()), (Some(10), Some(60)));
        assert!((d.total() - 1.0).abs() < 1e-9);
        assert!((d.mean() - 35.0).abs() < 1e-6);

        let wide = distribution(1, 100, 0).unwrap();
        assert_eq!(wide.method(), DistributionMethod::NormalApprox);
        assert_eq!(wide.len(), 100);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(distribution(4, 20, 0).unwrap().method(), DistributionMethod::Exact);
        assert_eq!(
            distribution(5, 20, 0).unwrap().method(),
            DistributionMethod::NormalApprox
        );
        assert_eq!(
            distribution(4, 21, 0).unwrap().method(),
            DistributionMethod::NormalApprox
        );
    }

    #[test]
    fn one_sided_pool_is_a_point_mass() {
        let d = distribution(8, 1, 2).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.get(10), 1.0);
    }

    #[test]
    fn distribution_rejects_out_of_range_input() {
        assert!(matches!(
            distribution(5, 1000, i32::MAX - 100),
            Err(DiceError::Modifier(_))
        ));
        assert!(matches!(
            distribution(100_000, 6, 0),
            Err(DiceError::Count { got: 100_000, .. })
        ));
        assert!(matches!(
            distribution(2, 100_000, 0),
            Err(DiceError::Sides { got: 100_000, .. })
        ));
        assert!(matches!(distribution(0, 6, 0), Err(DiceError::Count { got: 0, .. })));

        let d = distribution(5, 1000, i32::MAX - 5000).unwrap();
        assert_eq!(d.min(), Some(i32::MAX - 4995));
        assert_eq!(d.max(), Some(i32::MAX));
    }

    #[test]
    fn bounds_at_the_limits_do_not_overflow() {
        let e = DiceExpr::new(MAX_COUNT, MAX_SIDES, i32::MAX).unwrap_err();
        assert!(matches!(e, DiceError::Modifier(_)));
        let big = DiceExpr::new(MAX_COUNT, MAX_SIDES, 0).unwrap();
        assert_eq!(big.max(), 1_000_000);
        let low = DiceExpr::new(1, 6, i32::MIN).unwrap();
        assert_eq!(low.min(), i32::MIN + 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_goes_through_validation() {
        let ok: DiceExpr = serde_json::from_str(r#"{"count":3,"sides":8}"#).unwrap();
        assert_eq!(ok, DiceExpr::new(3, 8, 0).unwrap());
        for bad in [
            r#"{"count":100000,"sides":100000,"modifier":0}"#,
            r#"{"count":0,"sides":6,"modifier":0}"#,
            r#"{"count":1,"sides":0,"modifier":0}"#,
            r#"{"count":1000,"sides":1000,"modifier":2147483647}"#,
        ] {
            assert!(serde_json::from_str::<DiceExpr>(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn roll_stays_in_range_and_reproduces() {
        let e = parse_dice_notation("4d6+2").unwrap();
        let a = e.roll(&mut SeededRng::new(7));
        let b = e.roll(&mut SeededRng::new(7));
        assert_eq!(a, b);
        assert_eq!(a.rolls.len(), 4);
        assert!(a.rolls.iter().all(|&r| (1..=6).contains(&r)));
        assert!((e.min()..=e.max()).contains(&a.total));
        assert_eq!(a.total, a.rolls.iter().sum::<u32>() as i32 + 2);
        assert_eq!(a.average, 16.0);
    }
}
