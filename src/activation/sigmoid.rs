use std::f64::consts::E;

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Sigmoid derivative expressed through an already-activated value:
/// `σ'(z) = a · (1 − a)` where `a = σ(z)`.
///
/// Both layers feed their post-sigmoid outputs here, never `z`.
pub fn sigmoid_prime_from_output(a: f64) -> f64 {
    a * (1.0 - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint_and_tails() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
    }

    #[test]
    fn derivative_peaks_at_half() {
        assert_eq!(sigmoid_prime_from_output(0.5), 0.25);
        assert_eq!(sigmoid_prime_from_output(0.0), 0.0);
        assert_eq!(sigmoid_prime_from_output(1.0), 0.0);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let z = 0.7;
        let h = 1e-6;
        let numeric = (sigmoid(z + h) - sigmoid(z - h)) / (2.0 * h);
        assert!((numeric - sigmoid_prime_from_output(sigmoid(z))).abs() < 1e-8);
    }
}
