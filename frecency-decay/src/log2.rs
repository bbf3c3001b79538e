use std::f64::consts::LOG2_E;

/// `log2(2^a + 2^b)` without leaving log space.
///
/// Computed as `max(a, b) + log2(1 + 2^-|a - b|)`, so neither operand is ever
/// exponentiated on its own. Negative infinity is the additive identity.
/// The operands are ordered before combining, which makes the result exactly
/// commutative.
pub fn log2_add_exp2(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if hi == f64::INFINITY {
        return hi;
    }
    hi + (lo - hi).exp2().ln_1p() * LOG2_E
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_in_linear_space() {
        let sum = log2_add_exp2(3.0_f64.log2(), 5.0_f64.log2());
        assert!((sum.exp2() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn equal_operands_gain_one_bit() {
        assert!((log2_add_exp2(10.0, 10.0) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn negative_infinity_is_identity() {
        assert_eq!(log2_add_exp2(f64::NEG_INFINITY, 7.5), 7.5);
        assert_eq!(log2_add_exp2(-2.0, f64::NEG_INFINITY), -2.0);
        assert_eq!(
            log2_add_exp2(f64::NEG_INFINITY, f64::NEG_INFINITY),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn huge_gap_keeps_the_larger_operand() {
        assert_eq!(log2_add_exp2(5000.0, -5000.0), 5000.0);
        assert_eq!(log2_add_exp2(-5000.0, 5000.0), 5000.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(log2_add_exp2(f64::NAN, 1.0).is_nan());
    }
}
