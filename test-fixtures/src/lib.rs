//! Shared helpers for the workspace's integration tests.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, TimeZone, Utc};
use frecency_core::traits::{ManualClock, SharedClock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative closeness: `a` lies within `tol * |b|` of `b`.
pub fn approx_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs()
}

/// Panics with both values when they are not within relative tolerance.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        approx_equal(actual, expected, tol),
        "expected {expected} (±{tol} relative), got {actual}"
    );
}

/// A fixed instant well after the default time origin.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// `secs` seconds after `t`, allowing fractions.
pub fn after(t: DateTime<Utc>, secs: f64) -> DateTime<Utc> {
    t + Duration::nanoseconds((secs * 1e9).round() as i64)
}

/// A manual clock starting at [`fixed_now`], plus a shared handle to it.
pub fn manual_clock() -> (ManualClock, SharedClock) {
    let clock = ManualClock::new(fixed_now());
    let shared = clock.shared();
    (clock, shared)
}

/// Deterministic RNG for statistical tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `n` uniform draws from [0, 1).
pub fn uniform_samples(rng: &mut impl Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// Occurrence count per distinct value.
pub fn count_draws<T: Hash + Eq + Clone>(draws: &[T]) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for d in draws {
        *counts.entry(d.clone()).or_insert(0) += 1;
    }
    counts
}

/// Population mean and standard deviation (no bias correction).
pub fn mean_std(xs: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
