//! Uniform integer sampling and the digit-count magnitude map.

use rand::prelude::*;

use mathmaster_types::{CountSpec, DigitSpec};

/// Largest digit count whose magnitude range still fits in a `u64`.
pub const MAX_DIGITS: u32 = 19;

/// Source of uniformly distributed integers.
pub trait RandomRange {
    /// Uniform integer in `[min, max]`. Callers guarantee `min <= max`.
    fn int_inclusive(&mut self, min: u64, max: u64) -> u64;
}

/// [`RandomRange`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRange<R>(R);

impl RngRange<StdRng> {
    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Fresh sequence for live play.
    #[must_use]
    pub fn entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl<R: Rng> RandomRange for RngRange<R> {
    fn int_inclusive(&mut self, min: u64, max: u64) -> u64 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        self.0.random_range(min..=max)
    }
}

/// Inclusive magnitude bounds for a `digits`-digit operand.
///
/// One digit includes zero (`[0, 9]`); `d` digits otherwise span
/// `[10^(d-1), 10^d - 1]`.
#[must_use]
pub fn digit_bounds(digits: u32) -> (u64, u64) {
    let digits = digits.clamp(1, MAX_DIGITS);
    if digits == 1 {
        return (0, 9);
    }
    let low = 10u64.pow(digits - 1);
    let high = 10u64.checked_pow(digits).map_or(u64::MAX, |p| p - 1);
    (low, high)
}

/// Sample an operand with exactly `digits` digits.
pub fn sample_digits<R: RandomRange + ?Sized>(rng: &mut R, digits: u32) -> u64 {
    let (low, high) = digit_bounds(digits);
    rng.int_inclusive(low, high)
}

/// Resolve a digit spec to a concrete digit count.
pub fn resolve_digits<R: RandomRange + ?Sized>(rng: &mut R, spec: DigitSpec) -> u32 {
    match spec {
        DigitSpec::Fixed(d) => d,
        DigitSpec::Range(lo, hi) => resolve_range(rng, lo, hi),
        DigitSpec::PerOperand(_) => resolve_digits(rng, spec.for_operand(0)),
    }
}

/// Resolve an operand-count spec to a concrete count.
pub fn resolve_count<R: RandomRange + ?Sized>(rng: &mut R, spec: CountSpec) -> u32 {
    match spec {
        CountSpec::Fixed(n) => n,
        CountSpec::Range(lo, hi) => resolve_range(rng, lo, hi),
    }
}

/// Sample an operand under `spec`, resolving its digit count first.
pub fn sample_operand<R: RandomRange + ?Sized>(rng: &mut R, spec: DigitSpec) -> u64 {
    let digits = resolve_digits(rng, spec);
    sample_digits(rng, digits)
}

/// Like [`sample_operand`] but never zero; single digits draw from `[1, 9]`.
pub fn sample_nonzero_operand<R: RandomRange + ?Sized>(rng: &mut R, spec: DigitSpec) -> u64 {
    let digits = resolve_digits(rng, spec);
    let (low, high) = digit_bounds(digits);
    rng.int_inclusive(low.max(1), high)
}

fn resolve_range<R: RandomRange + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> u32 {
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    rng.int_inclusive(u64::from(lo), u64::from(hi)) as u32
}
