//! Rounding and ratio helpers.
//!
//! Every figure shown on the dashboard is rounded to two decimals, and every
//! ratio over an empty population is `0.0` rather than NaN.

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to two decimals. Zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// Arithmetic mean rounded to two decimals. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(13.0), 13.0);
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn test_percentage_of_empty_population_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 1), 100.0);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(0, 10), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[100.0, 0.0]), 50.0);
        assert_eq!(mean(&[10.0, 11.0, 11.0]), 10.67);
    }
}
