use crate::{
    descriptive::{is_constant, mean},
    error::StatsError,
};

/// Pearson product-moment correlation coefficient of two paired samples.
///
/// The result lies in `[-1, 1]`. It is undefined when either sample has no
/// variance.
///
/// # Errors
///
/// * [`StatsError::LengthMismatch`] if the samples are not paired
/// * [`StatsError::InsufficientData`] for fewer than two pairs
/// * [`StatsError::ZeroVariance`] if either sample is constant
///
/// # Examples
///
/// ```
/// # use oncostat_stats::correlation::pearson;
/// let x = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(pearson(&x, &[2.0, 4.0, 6.0, 8.0]), Ok(1.0));
/// assert_eq!(pearson(&x, &[8.0, 6.0, 4.0, 2.0]), Ok(-1.0));
/// assert!(pearson(&x, &[5.0; 4]).is_err());
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    StatsError::require(2, x.len())?;
    if is_constant(x) || is_constant(y) {
        return Err(StatsError::ZeroVariance);
    }

    let (Some(mean_x), Some(mean_y)) = (mean(x), mean(y)) else {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: 0,
        });
    };

    let (sxy, sxx, syy) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (a, b)| {
        let dx = a - mean_x;
        let dy = b - mean_y;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });
    if sxx <= 0.0 || syy <= 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    // Rounding can push |r| slightly above 1 for perfectly linear data.
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric() {
        let x = [10.2, 8.7, 12.1, 9.9, 15.3, 11.0];
        let y = [0.11, 0.09, 0.08, 0.10, 0.07, 0.12];
        let xy = pearson(&x, &y).unwrap();
        let yx = pearson(&y, &x).unwrap();
        assert!((xy - yx).abs() < 1e-15);
        assert!((-1.0..=1.0).contains(&xy));
    }

    #[test]
    fn test_self_correlation_is_one() {
        let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        assert!((pearson(&x, &x).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_value() {
        // sxy = 4, sxx = 10, syy = 2.8 for x = 1..5, y = [1, 3, 2, 3, 3]
        let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 3.0, 2.0, 3.0, 3.0]).unwrap();
        assert!((r - 4.0 / (28.0_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_invariant_under_affine_transform() {
        let x = [1.5, 2.5, 2.0, 4.0, 3.5];
        let y = [0.2, 0.1, 0.4, 0.5, 0.3];
        let scaled = x.map(|v| 3.0 * v - 7.0);
        let r = pearson(&x, &y).unwrap();
        assert!((pearson(&scaled, &y).unwrap() - r).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            pearson(&[1.0], &[2.0]),
            Err(StatsError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::ZeroVariance)
        );
    }

    #[test]
    fn test_inexact_constant_is_undefined() {
        let x = [10.2, 8.7, 12.1, 9.9, 15.3, 11.0, 7.4];
        for value in [0.1, 0.3, 52.7] {
            assert_eq!(pearson(&x, &[value; 7]), Err(StatsError::ZeroVariance));
            assert_eq!(pearson(&[value; 7], &x), Err(StatsError::ZeroVariance));
        }
    }
}
