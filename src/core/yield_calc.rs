//! Char yield formula
//!
//! `yield = ((ash - crucible) / sample) * 100`, rounded half-up to two places.
//! No validation happens here; see [`crate::core::validation`].

/// Decimal places kept on a yield
pub const YIELD_PLACES: i32 = 2;

/// Compute the char yield in percent
///
/// Division by zero and negative inputs are not guarded.
pub fn calculate(crucible_weight: f64, sample_weight: f64, ash_weight: f64) -> f64 {
    let residue = ash_weight - crucible_weight;
    round_half_up((residue / sample_weight) * 100.0, YIELD_PLACES)
}

/// Round to `places` decimals, halves away from zero
///
/// Values within 1e-9 of a half step are treated as the half step, so
/// binary noise such as `1.005 * 100 = 100.49999...` still rounds up.
/// Values with no fractional digits left at that scale are returned as is.
pub fn round_half_up(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    let scaled = value.abs() * factor;
    // f64 has no fractional bits at or above 2^52
    if !scaled.is_finite() || scaled >= 4_503_599_627_370_496.0 {
        return value;
    }
    let floor = scaled.floor();
    let rounded = if scaled - floor + 1e-9 >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    (rounded / factor).copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sample() {
        // 1.5 g residue from 5 g sample
        assert_eq!(calculate(10.00, 5.00, 11.50), 30.00);
    }

    #[test]
    fn test_matches_formula_across_inputs() {
        let cases = [
            (12.3456, 1.0321, 12.5012),
            (20.0, 3.0, 21.0),
            (15.111, 2.222, 15.555),
            (9.87, 0.5, 9.99),
        ];
        for (c, s, a) in cases {
            let expected = round_half_up(((a - c) / s) * 100.0, 2);
            assert_eq!(calculate(c, s, a), expected);
        }
        // 1/3 of the sample remains
        assert_eq!(calculate(20.0, 3.0, 21.0), 33.33);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1.005, 2), 1.01);
        assert_eq!(round_half_up(2.345, 2), 2.35);
        assert_eq!(round_half_up(2.344, 2), 2.34);
        assert_eq!(round_half_up(-2.345, 2), -2.35);
        assert_eq!(round_half_up(30.000000000000004, 2), 30.0);
        assert_eq!(round_half_up(0.0, 2), 0.0);
    }

    #[test]
    fn test_round_half_up_near_f64_max() {
        assert_eq!(round_half_up(f64::MAX, 2), f64::MAX);
        assert_eq!(round_half_up(-1e307, 2), -1e307);
        assert!(round_half_up(f64::INFINITY, 2).is_infinite());
        assert_eq!(round_half_up(1e212, 2), 1e212);
    }

    #[test]
    fn test_overflowing_ratio_is_infinite() {
        assert!(calculate(0.0, 1e-300, 1e10).is_infinite());
    }

    #[test]
    fn test_unguarded_division() {
        assert!(calculate(10.0, 0.0, 11.0).is_infinite());
    }
}
