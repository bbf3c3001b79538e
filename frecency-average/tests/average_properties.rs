use frecency_average::WeightedAverage;
use proptest::prelude::*;
use test_fixtures::{after, fixed_now};

proptest! {
    #[test]
    fn offset_stays_below_every_sample(samples in prop::collection::vec(-1e6f64..1e6, 1..50)) {
        let now = fixed_now();
        let mut w = WeightedAverage::new(60.0).unwrap();
        for (i, &s) in samples.iter().enumerate() {
            w.add_sample_at(s, 1.0, after(now, i as f64)).unwrap();
            let min = samples[..=i].iter().cloned().fold(f64::INFINITY, f64::min);
            prop_assert!(w.offset() < min);
        }
    }

    #[test]
    fn mean_lies_within_sample_range(
        samples in prop::collection::vec((-1e3f64..1e3, 0.1f64..10.0), 1..40),
    ) {
        let now = fixed_now();
        let mut w = WeightedAverage::new(30.0).unwrap();
        for (i, &(s, weight)) in samples.iter().enumerate() {
            w.add_sample_at(s, weight, after(now, i as f64)).unwrap();
        }
        let min = samples.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max = samples.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let e = w.mean_std_uncertainty_at(after(now, samples.len() as f64)).unwrap();
        let slack = 1e-6 * (1.0 + min.abs().max(max.abs()));
        prop_assert!(e.mean >= min - slack && e.mean <= max + slack);
        prop_assert!(e.std >= 0.0);
        prop_assert!(e.uncertainty >= 0.0);
    }
}
