// Seeded PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It drives dice rolls, loot simulations and the RNG playground, where the only
// requirement is that a seed reproduces the same stream on every platform.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

use crate::seed::hash_seed;

/// Added to the seed once, when a stream is built with [`SeededRng::new`].
pub const SEED_OFFSET: u32 = 0x6D2B_79F5;

/// Upper bound on the number of values the playground draws in one go.
pub const MAX_SAMPLES: usize = 10_000;

/// Anything that can hand out uniform floats in `[0, 1)`.
///
/// Implemented for [`SeededRng`] and for plain closures, so callers can pass a
/// stream produced by [`rng_stream`] or their own source.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// mulberry32-style generator that mixes its state in place.
///
/// All state is a single `u32`; cloning duplicates the stream position.
/// Each draw replaces the state with its own mix, so there is no Weyl
/// counter: streams fall into a cycle after some tens of thousands of
/// draws, and state `0` maps to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Playground stream: the seed offset by [`SEED_OFFSET`].
    pub fn new(seed: i32) -> Self {
        Self::from_state((seed as u32).wrapping_add(SEED_OFFSET))
    }

    /// Seed from arbitrary text via [`hash_seed`].
    pub fn from_text(text: &str) -> Self {
        Self::new(hash_seed(text))
    }

    /// Raw state, no offset. Resumes a stream captured with
    /// [`SeededRng::state`]; `from_state(seed as u32)` is the loot explorer's
    /// stream.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Non-deterministic seed pulled from the OS-seeded `RandomState`.
    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        "dumgorf::prng".hash(&mut hasher);
        let bits = hasher.finish();
        Self::from_state((bits ^ (bits >> 32)) as u32)
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        self.state = t;
        t ^ (t >> 14)
    }

    #[inline]
    pub fn next_f64_01(&mut self) -> f64 {
        // Convert to [0,1).
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform integer in `low..=high`.
    #[inline]
    pub fn gen_range_u32(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f64 + 1.0;
        low + (self.next_f64_01() * span) as u32
    }

    /// Draw `count` values (clamped to `1..=MAX_SAMPLES`).
    pub fn sample(&mut self, count: usize) -> Vec<f64> {
        let count = count.clamp(1, MAX_SAMPLES);
        (0..count).map(|_| self.next_f64_01()).collect()
    }
}

impl RandomSource for SeededRng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.next_f64_01()
    }
}

/// Closure form of the stream: every call advances the captured state.
pub fn rng_stream(seed: i32) -> impl FnMut() -> f64 {
    let mut rng = SeededRng::new(seed);
    move || rng.next_f64_01()
}

/// Bucket `[0, 1)` values into `buckets` equal-width bins.
pub fn histogram(values: &[f64], buckets: usize) -> Vec<u32> {
    let buckets = buckets.max(1);
    let mut out = vec![0u32; buckets];
    for &v in values {
        let idx = ((v * buckets as f64).floor().max(0.0) as usize).min(buckets - 1);
        out[idx] += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a: Vec<u32> = {
            let mut r = SeededRng::new(1);
            (0..8).map(|_| r.next_u32()).collect()
        };
        let b: Vec<u32> = {
            let mut r = SeededRng::new(2);
            (0..8).map(|_| r.next_u32()).collect()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        for seed in [i32::MIN, -1, 0, 1, 7, i32::MAX] {
            let mut r = SeededRng::new(seed);
            for _ in 0..2000 {
                let v = r.next_f64_01();
                assert!((0.0..1.0).contains(&v), "seed {seed} produced {v}");
            }
        }
    }

    #[test]
    fn clone_duplicates_position() {
        let mut a = SeededRng::new(99);
        a.next_u32();
        let mut b = a.clone();
        assert_eq!(a.next_u32(), b.next_u32());

        let mut c = SeededRng::from_state(a.state());
        assert_eq!(a.next_u32(), c.next_u32());
    }

    #[test]
    fn stream_closure_matches_struct() {
        let mut stream = rng_stream(-12345);
        let mut rng = SeededRng::new(-12345);
        for _ in 0..100 {
            assert_eq!(stream(), rng.next_f64_01());
        }
    }

    #[test]
    fn gen_range_is_inclusive_and_bounded() {
        let mut r = SeededRng::new(5);
        let mut seen = [false; 6];
        for _ in 0..2000 {
            let v = r.gen_range_u32(1, 6);
            assert!((1..=6).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(r.gen_range_u32(3, 3), 3);
    }

    #[test]
    fn sample_clamps_count() {
        let mut r = SeededRng::new(0);
        assert_eq!(r.sample(0).len(), 1);
        assert_eq!(r.sample(MAX_SAMPLES + 5).len(), MAX_SAMPLES);
    }

    #[test]
    fn zero_seed_still_mixes() {
        let mut r = SeededRng::new(0);
        let draws: Vec<u32> = (0..4).map(|_| r.next_u32()).collect();
        assert!(draws.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn offset_stream_reference_values() {
        let mut r = SeededRng::new(1);
        assert_eq!(r.next_u32(), 2_693_262_067);
        assert_eq!(r.next_u32(), 4_133_145_771);
        assert_eq!(r.next_u32(), 878_811_644);

        let mut r = SeededRng::new(1);
        assert!((r.next_f64_01() - 0.627_073_940_588_161_3).abs() < 1e-15);

        // "hello-world" hashes to -2128682281.
        let mut r = SeededRng::from_text("hello-world");
        let draws: Vec<f64> = (0..3).map(|_| r.next_f64_01()).collect();
        let expected = [0.915_618_761_675_432_3, 0.744_134_357_664_734_1, 0.635_900_634_806_603_2];
        for (got, want) in draws.iter().zip(expected) {
            assert!((got - want).abs() < 1e-15, "{got} != {want}");
        }
    }

    #[test]
    fn raw_state_reference_values() {
        let mut r = SeededRng::from_state(42);
        assert_eq!(r.next_u32(), 3_327_947);
        assert_eq!(r.next_u32(), 1_195_631_484);
        assert_eq!(r.next_u32(), 778_408_914);
    }

    #[test]
    fn raw_zero_state_is_a_fixed_point() {
        let mut r = SeededRng::from_state(0);
        assert_eq!(r.next_u32(), 0);
        assert_eq!(r.next_u32(), 0);
        assert_eq!(r.state(), 0);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values = [0.0, 0.04, 0.05, 0.5, 0.999_999];
        let h = histogram(&values, 20);
        assert_eq!(h.len(), 20);
        assert_eq!(h.iter().sum::<u32>(), values.len() as u32);
        assert_eq!(h[0], 2);
        assert_eq!(h[1], 1);
        assert_eq!(h[10], 1);
        assert_eq!(h[19], 1);
    }
}
