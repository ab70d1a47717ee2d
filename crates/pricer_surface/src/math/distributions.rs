//! Standard normal distribution functions.
//!
//! This module provides AD-compatible implementations of:
//! - `norm_pdf`: Probability density function (PDF)
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_inv_cdf`: Inverse CDF (quantile function)
//!
//! All functions are generic over `T: Float` to support both `f64` and `Dual64`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Acklam's rational approximation coefficients, central region numerator.
const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
/// Tail region coefficients.
const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.024_25;

/// Standard normal probability density function.
///
/// # Examples
/// ```
/// use pricer_surface::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Standard normal cumulative distribution function.
///
/// Hart's polynomial approximation, max absolute error around 7.8e-8.
/// Exact at zero and antisymmetric: `norm_cdf(-x) == 1 - norm_cdf(x)`.
///
/// # Examples
/// ```
/// use pricer_surface::math::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!((norm_cdf(1.0_f64) - 0.8413447).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let p = T::from(0.231_641_9).unwrap();
    let a1 = T::from(0.319_381_530).unwrap();
    let a2 = T::from(-0.356_563_782).unwrap();
    let a3 = T::from(1.781_477_937).unwrap();
    let a4 = T::from(-1.821_255_978).unwrap();
    let a5 = T::from(1.330_274_429).unwrap();

    if x == T::zero() {
        return T::from(0.5).unwrap();
    }

    let z = x.abs();
    let t = T::one() / (T::one() + p * z);
    let poly = t * (a1 + t * (a2 + t * (a3 + t * (a4 + t * a5))));
    let upper = T::one() - norm_pdf(z) * poly;

    if x < T::zero() {
        T::one() - upper
    } else {
        upper
    }
}

/// Inverse of the standard normal CDF (Acklam's rational approximation).
///
/// Relative error below 1.2e-9 on `(0, 1)`. Returns `-inf` at 0, `+inf` at 1
/// and NaN outside `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_surface::math::distributions::norm_inv_cdf;
///
/// assert!(norm_inv_cdf(0.5_f64).abs() < 1e-9);
/// assert!((norm_inv_cdf(0.975_f64) - 1.959964).abs() < 1e-6);
/// ```
pub fn norm_inv_cdf<T: Float>(p: T) -> T {
    if p.is_nan() || p < T::zero() || p > T::one() {
        return T::nan();
    }
    if p == T::zero() {
        return T::neg_infinity();
    }
    if p == T::one() {
        return T::infinity();
    }

    let c = |i: usize| T::from(ACKLAM_C[i]).unwrap();
    let d = |i: usize| T::from(ACKLAM_D[i]).unwrap();
    let tail = |q: T| {
        (((((c(0) * q + c(1)) * q + c(2)) * q + c(3)) * q + c(4)) * q + c(5))
            / ((((d(0) * q + d(1)) * q + d(2)) * q + d(3)) * q + T::one())
    };

    let p_low = T::from(P_LOW).unwrap();
    let two = T::from(2.0).unwrap();
    if p < p_low {
        tail((-two * p.ln()).sqrt())
    } else if p <= T::one() - p_low {
        let a = |i: usize| T::from(ACKLAM_A[i]).unwrap();
        let b = |i: usize| T::from(ACKLAM_B[i]).unwrap();
        let q = p - T::from(0.5).unwrap();
        let r = q * q;
        (((((a(0) * r + a(1)) * r + a(2)) * r + a(3)) * r + a(4)) * r + a(5)) * q
            / (((((b(0) * r + b(1)) * r + b(2)) * r + b(3)) * r + b(4)) * r + T::one())
    } else {
        -tail((-two * (T::one() - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-3.0_f64), 0.0013498980316300946, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_within_stated_accuracy() {
        let reference = [
            (-2.0, 0.022750131948179195),
            (-0.5, 0.3085375387259869),
            (0.0, 0.5),
            (0.5, 0.6914624612740131),
            (1.5, 0.9331927987311419),
            (2.5, 0.9937903346742238),
        ];
        for (x, expected) in reference {
            assert!((norm_cdf(x) - expected).abs() < 7.8e-8, "N({}) off", x);
        }
        assert_eq!(norm_cdf(-0.0_f64), 0.5);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -1.0, -0.2, 0.0, 0.7, 2.5] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_norm_inv_cdf_reference_values() {
        assert_relative_eq!(norm_inv_cdf(0.8413447460685429_f64), 1.0, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.01_f64), -2.326347874040841, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(0.99_f64), 2.326347874040841, epsilon = 1e-8);
        assert_relative_eq!(norm_inv_cdf(1e-10_f64), -6.361340902404056, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_inv_cdf_edges() {
        assert_eq!(norm_inv_cdf(0.0_f64), f64::NEG_INFINITY);
        assert_eq!(norm_inv_cdf(1.0_f64), f64::INFINITY);
        assert!(norm_inv_cdf(1.5_f64).is_nan());
        assert!(norm_inv_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_inverse_round_trip() {
        for p in [0.001, 0.02, 0.1, 0.25, 0.5, 0.75, 0.9, 0.98, 0.999] {
            assert_relative_eq!(norm_cdf(norm_inv_cdf(p)), p, epsilon = 2e-7);
        }
    }
}
