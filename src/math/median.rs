//! Median and rounding helpers.
//!
//! Values reaching these functions come from the loader, which guarantees no
//! missing values, so there is no NaN-skipping here.

use std::cmp::Ordering;

/// Statistical median: the middle value, or the mean of the two middle values
/// for an even count. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = n / 2;
    if n % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Round to `decimals` places, ties to even on the scaled value (`0.125` -> `0.12`).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_group_is_middle_value() {
        let m = median(&[0.50, 0.10, 0.30]).unwrap();
        assert!((m - 0.30).abs() < 1e-12);
    }

    #[test]
    fn median_of_even_group_averages_middle_pair() {
        let m = median(&[0.40, 0.10, 0.30, 0.20]).unwrap();
        assert!((m - 0.25).abs() < 1e-12);
    }

    #[test]
    fn median_of_empty_is_none() {
        assert!(median(&[]).is_none());
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(0.1234, 2), 0.12);
        assert_eq!(round_to(0.5, 2), 0.5);
        assert_eq!(round_to(12.0, 2), 12.0);
        assert_eq!(round_to(-0.126, 2), -0.13);
    }

    #[test]
    fn round_to_breaks_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(0.625, 2), 0.62);
    }
}
