//! Statistical utility functions.

/// Calculate the mean of a slice.
///
/// Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (n denominator).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (n denominator).
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Weighted arithmetic mean, normalized by the sum of the weights.
///
/// Falls back to the unweighted mean when the weights are missing, do not
/// match the values, or do not sum to a positive finite number.
///
/// # Example
/// ```
/// use weather_ensemble::utils::weighted_mean;
///
/// let m = weighted_mean(&[10.0, 20.0], &[0.4, 0.6]);
/// assert!((m - 16.0).abs() < 1e-12);
/// ```
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    if weights.len() != values.len() {
        return mean(values);
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return mean(values);
    }

    values
        .iter()
        .zip(weights.iter())
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / total
}

/// Round to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert_relative_eq!(mean(&[10.0]), 10.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn population_std_dev_uses_n_denominator() {
        // Population variance of [2, 4, 4, 4, 5, 5, 7, 9] = 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_variance(&values), 4.0, epsilon = 1e-10);
        assert_relative_eq!(population_std_dev(&values), 2.0, epsilon = 1e-10);
        assert_relative_eq!(population_std_dev(&[22.5, 23.1]), 0.3, epsilon = 1e-10);
        assert_eq!(population_std_dev(&[3.0]), 0.0);
        assert!(population_std_dev(&[]).is_nan());
    }

    #[test]
    fn weighted_mean_normalizes_weights() {
        assert_relative_eq!(weighted_mean(&[10.0, 20.0], &[0.4, 0.6]), 16.0, epsilon = 1e-10);
        // Same ratio, different scale
        assert_relative_eq!(weighted_mean(&[10.0, 20.0], &[2.0, 3.0]), 16.0, epsilon = 1e-10);
    }

    #[test]
    fn weighted_mean_never_divides_by_zero() {
        assert_relative_eq!(weighted_mean(&[10.0, 20.0], &[0.0, 0.0]), 15.0, epsilon = 1e-10);
        assert_relative_eq!(weighted_mean(&[10.0, 20.0], &[]), 15.0, epsilon = 1e-10);
        assert!(weighted_mean(&[], &[]).is_nan());
    }

    #[test]
    fn equal_weights_give_plain_mean() {
        assert_relative_eq!(
            weighted_mean(&[1.0, 2.0, 6.0], &[0.3, 0.3, 0.3]),
            3.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn round_to_two_digits() {
        assert_eq!(round_to(22.7715, 2), 22.77);
        assert_eq!(round_to(0.4243, 2), 0.42);
        assert_eq!(round_to(0.8749, 3), 0.875);
    }
}
