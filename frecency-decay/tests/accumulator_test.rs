use chrono::Duration;
use frecency_core::errors::FrecencyError;
use frecency_core::traits::{Clock, DecayingWeight};
use frecency_decay::{AccumulatorOptions, DecayAccumulator};
use test_fixtures::{after, assert_close, fixed_now, manual_clock};

const TOL: f64 = 1e-3;

// ── Decay per half-life ───────────────────────────────────────────────────

#[test]
fn weight_halves_once_per_timescale() {
    let timescale = 10.0;
    let now = fixed_now();
    let soon = after(now, timescale);
    let later = after(soon, timescale);

    let mut f1 = DecayAccumulator::new(timescale).unwrap();
    let mut f2 = DecayAccumulator::new(timescale).unwrap();
    f1.increment_at(1.0, now).unwrap();
    f2.increment_at(1.0, soon).unwrap();

    // Each reads back exactly what was added, at its own event time.
    let value1 = f1.present_weight_at(now);
    let value2 = f2.present_weight_at(soon);
    assert_close(value1, 1.0, TOL);
    assert_close(value2, 1.0, TOL);

    // At `soon`, the later event weighs twice the earlier one.
    let value3 = f1.present_weight_at(soon);
    assert_close(value3 * 2.0, value2, TOL);

    // The ratio holds at any later time, and both keep decaying.
    let value4 = f1.present_weight_at(later);
    let value5 = f2.present_weight_at(later);
    assert_close(value4 * 2.0, value5, TOL);
    assert_close(value4, 0.25, TOL);
    assert_close(value5, 0.5, TOL);

    // Simultaneous weight accumulates linearly.
    f1.increment_at(9.0, now).unwrap();
    assert_close(f1.present_weight_at(now), 10.0, TOL);
}

#[test]
fn shorter_timescale_decays_faster() {
    let timescale = 10.0;
    let now = fixed_now();
    let soon = after(now, timescale);

    let mut f1 = DecayAccumulator::new(timescale).unwrap();
    let mut f2 = DecayAccumulator::new(timescale / 2.0).unwrap();
    f1.increment_at(1.0, now).unwrap();
    f2.increment_at(1.0, now).unwrap();

    assert_close(f1.present_weight_at(soon), f2.present_weight_at(soon) * 2.0, TOL);
}

#[test]
fn split_increment_matches_single_increment() {
    let now = fixed_now();
    let mut split = DecayAccumulator::new(60.0).unwrap();
    let mut whole = DecayAccumulator::new(60.0).unwrap();
    split.increment_at(2.5, now).unwrap();
    split.increment_at(4.0, now).unwrap();
    whole.increment_at(6.5, now).unwrap();

    let t = after(now, 90.0);
    assert_close(split.present_weight_at(t), whole.present_weight_at(t), 1e-6);
}

#[test]
fn past_event_counts_less_than_present_event() {
    let now = fixed_now();
    let yesterday = now - Duration::days(1);
    let mut acc = DecayAccumulator::new(86400.0).unwrap();
    acc.increment_at(1.0, yesterday).unwrap();
    assert_close(acc.present_weight_at(now), 0.5, TOL);
    acc.increment_at(1.0, now).unwrap();
    assert_close(acc.present_weight_at(now), 1.5, TOL);
}

// ── Clock-driven defaults ────────────────────────────────────────────────

#[test]
fn increment_and_read_use_the_injected_clock() {
    let (clock, shared) = manual_clock();
    let mut acc = DecayAccumulator::with_clock(5.0, shared).unwrap();
    acc.increment(4.0).unwrap();
    assert_close(acc.present_weight(), 4.0, TOL);

    clock.advance_secs(10.0);
    assert_close(acc.present_weight(), 1.0, TOL);
}

#[test]
fn start_value_is_added_at_construction_time() {
    let (clock, shared) = manual_clock();
    let acc = DecayAccumulator::with_options(
        AccumulatorOptions::new(3600.0)
            .with_clock(shared)
            .with_start_value(3.0),
    )
    .unwrap();
    assert_close(acc.present_weight_at(clock.now()), 3.0, TOL);
}

// ── Empty state and argument validation ──────────────────────────────────

#[test]
fn fresh_accumulator_is_empty_with_zero_weight() {
    let acc = DecayAccumulator::new(1.0).unwrap();
    assert!(acc.is_empty());
    assert_eq!(acc.log2_value(), f64::NEG_INFINITY);
    assert_eq!(acc.present_weight_at(fixed_now()), 0.0);
}

#[test]
fn zero_increment_is_accepted_and_changes_nothing() {
    let mut acc = DecayAccumulator::new(1.0).unwrap();
    acc.increment_at(0.0, fixed_now()).unwrap();
    assert!(acc.is_empty());

    acc.increment_at(2.0, fixed_now()).unwrap();
    let before = acc.log2_value();
    acc.increment_at(0.0, fixed_now()).unwrap();
    assert_eq!(acc.log2_value(), before);
}

#[test]
fn rejects_non_positive_timescale() {
    for timescale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = DecayAccumulator::new(timescale).unwrap_err();
        assert!(
            matches!(err, FrecencyError::InvalidArgument { name: "timescale", .. }),
            "timescale {timescale} accepted"
        );
    }
}

#[test]
fn rejects_negative_and_non_finite_increments() {
    let mut acc = DecayAccumulator::new(1.0).unwrap();
    for value in [-1.0, f64::NAN, f64::INFINITY] {
        let err = acc.increment_at(value, fixed_now()).unwrap_err();
        assert!(matches!(err, FrecencyError::InvalidArgument { name: "value_added", .. }));
    }
    assert!(acc.is_empty());
}

#[test]
fn negative_start_value_fails_construction() {
    let result = DecayAccumulator::with_options(AccumulatorOptions::new(1.0).with_start_value(-2.0));
    assert!(matches!(result, Err(FrecencyError::InvalidArgument { .. })));
}

// ── Numerical range ──────────────────────────────────────────────────────

#[test]
fn survives_decades_at_a_one_second_half_life() {
    let now = fixed_now();
    let far_future = now + Duration::days(365 * 10);
    let mut acc = DecayAccumulator::new(1.0).unwrap();
    acc.increment_at(1.0, far_future).unwrap();

    assert!(acc.log2_value().is_finite());
    assert_close(acc.present_weight_at(far_future), 1.0, TOL);
    // Reading long before the event would overflow in linear space; log space stays finite.
    assert!(acc.log2_present_weight_at(now).is_finite());
}

#[test]
fn log2_value_never_decreases_under_increments() {
    let now = fixed_now();
    let mut acc = DecayAccumulator::new(2.0).unwrap();
    let mut prev = acc.log2_value();
    for i in 0..50 {
        // Events going back in time still add weight.
        acc.increment_at(1.0, after(now, -(i as f64))).unwrap();
        assert!(acc.log2_value() >= prev);
        prev = acc.log2_value();
    }
}

// ── Accumulator-to-accumulator combination ───────────────────────────────

#[test]
fn increment_by_accumulator_adds_scaled_weight() {
    let now = fixed_now();
    let mut a = DecayAccumulator::new(30.0).unwrap();
    let mut b = DecayAccumulator::new(30.0).unwrap();
    a.increment_at(1.0, now).unwrap();
    b.increment_at(2.0, after(now, -30.0)).unwrap();

    a.increment_by_accumulator(&b, 3.0).unwrap();
    // b is worth 1.0 at `now`, so a gains 3.0.
    assert_close(a.present_weight_at(now), 4.0, 1e-6);
    assert_close(a.present_weight_at(after(now, 30.0)), 2.0, 1e-6);
}

#[test]
fn increment_by_accumulator_corrects_for_origin() {
    let now = fixed_now();
    let mut a = DecayAccumulator::new(100.0).unwrap();
    let mut b = DecayAccumulator::with_options(
        AccumulatorOptions::new(100.0).with_time_origin(now - Duration::days(3)),
    )
    .unwrap();
    b.increment_at(5.0, now).unwrap();

    a.increment_by_accumulator(&b, 1.0).unwrap();
    assert_close(a.present_weight_at(now), 5.0, 1e-6);
}

#[test]
fn increment_by_accumulator_requires_matching_timescales() {
    let mut a = DecayAccumulator::new(1.0).unwrap();
    let b = DecayAccumulator::new(2.0).unwrap();
    let err = a.increment_by_accumulator(&b, 1.0).unwrap_err();
    assert!(matches!(err, FrecencyError::IncompatibleTimescales { .. }));
}

#[test]
fn increment_by_empty_accumulator_is_a_no_op() {
    let now = fixed_now();
    let mut a = DecayAccumulator::new(1.0).unwrap();
    a.increment_at(1.0, now).unwrap();
    let before = a.log2_value();
    let empty = DecayAccumulator::new(1.0).unwrap();
    a.increment_by_accumulator(&empty, 7.0).unwrap();
    assert_eq!(a.log2_value(), before);
}

#[test]
fn increment_by_accumulator_log2_takes_factors_beyond_f64() {
    let now = fixed_now();
    let mut a = DecayAccumulator::new(30.0).unwrap();
    let mut b = DecayAccumulator::new(30.0).unwrap();
    b.increment_at(1.0, now).unwrap();

    // 2^2000 does not fit in an f64, but its log2 does.
    a.increment_by_accumulator_log2(&b, 2000.0).unwrap();
    assert_close(a.log2_present_weight_at(now), 2000.0, 1e-9);

    a.increment_by_accumulator_log2(&b, f64::NEG_INFINITY).unwrap();
    assert_close(a.log2_present_weight_at(now), 2000.0, 1e-9);

    for bad in [f64::NAN, f64::INFINITY] {
        let err = a.increment_by_accumulator_log2(&b, bad).unwrap_err();
        assert!(matches!(
            err,
            FrecencyError::InvalidArgument { name: "log2_multiplier", .. }
        ));
    }
}

#[test]
fn decaying_weight_trait_reports_negligible_weight() {
    let now = fixed_now();
    let mut acc = DecayAccumulator::new(1.0).unwrap();
    acc.increment_at(1.0, now).unwrap();
    assert!(!acc.is_negligible_at(now, 0.5));
    assert!(acc.is_negligible_at(after(now, 20.0), 1e-3));
}
