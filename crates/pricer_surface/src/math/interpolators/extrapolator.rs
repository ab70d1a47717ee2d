//! Extrapolation policies applied outside the node range.

use super::{DataBundle, Interpolator1D};
use crate::types::error::to_f64;
use crate::types::InterpolationError;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Which end of the node range a query fell beyond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Below the first key.
    Left,
    /// Above the last key.
    Right,
}

impl Side {
    fn node_index<T: Float>(self, data: &DataBundle<T>) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => data.size() - 1,
        }
    }
}

/// Extrapolation policy for one side of a 1-D interpolator.
///
/// All policies except `Interpolator` are anchored at the boundary node
/// `(x_b, y_b)` and, where needed, the inner interpolator's derivative `d_b`
/// at that node:
///
/// | policy      | value                                   |
/// |-------------|-----------------------------------------|
/// | `Flat`      | `y_b`                                   |
/// | `Linear`    | `y_b + d_b * (x - x_b)`                 |
/// | `LogLinear` | `y_b * exp(d_b / y_b * (x - x_b))`      |
/// | `Exception` | error                                   |
/// | `Interpolator` | the inner interpolator, unchanged    |
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::ExtrapolatorKind;
///
/// assert_eq!("flat".parse::<ExtrapolatorKind>().unwrap(), ExtrapolatorKind::Flat);
/// assert!("Mirror".parse::<ExtrapolatorKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtrapolatorKind {
    /// Constant at the boundary node value.
    #[default]
    Flat,
    /// Straight line with the interpolator's boundary slope.
    Linear,
    /// Exponential continuation of the boundary log-slope.
    LogLinear,
    /// Reject queries outside the node range.
    Exception,
    /// Let the inner interpolator extend itself.
    Interpolator,
}

impl ExtrapolatorKind {
    /// Canonical name of the policy.
    pub fn name(&self) -> &'static str {
        match self {
            ExtrapolatorKind::Flat => "Flat",
            ExtrapolatorKind::Linear => "Linear",
            ExtrapolatorKind::LogLinear => "LogLinear",
            ExtrapolatorKind::Exception => "Exception",
            ExtrapolatorKind::Interpolator => "Interpolator",
        }
    }

    fn out_of_bounds<T: Float>(data: &DataBundle<T>, x: T) -> InterpolationError {
        InterpolationError::OutOfBounds {
            x: to_f64(x),
            min: to_f64(data.first_key()),
            max: to_f64(data.last_key()),
        }
    }

    fn positive_boundary<T: Float>(
        data: &DataBundle<T>,
        index: usize,
    ) -> Result<T, InterpolationError> {
        let y = data.value(index);
        if y > T::zero() {
            Ok(y)
        } else {
            Err(InterpolationError::NonPositiveValue {
                value: to_f64(y),
                index,
            })
        }
    }

    /// Extrapolated value at `x` beyond `side`.
    pub fn extrapolate<T, I>(
        &self,
        interp: &I,
        data: &DataBundle<T>,
        x: T,
        side: Side,
    ) -> Result<T, InterpolationError>
    where
        T: Float,
        I: Interpolator1D<T> + ?Sized,
    {
        let index = side.node_index(data);
        let (xb, yb) = (data.key(index), data.value(index));
        match self {
            ExtrapolatorKind::Flat => Ok(yb),
            ExtrapolatorKind::Linear => {
                let db = interp.first_derivative(data, xb)?;
                Ok(yb + db * (x - xb))
            }
            ExtrapolatorKind::LogLinear => {
                let yb = Self::positive_boundary(data, index)?;
                let db = interp.first_derivative(data, xb)?;
                Ok(yb * (db / yb * (x - xb)).exp())
            }
            ExtrapolatorKind::Exception => Err(Self::out_of_bounds(data, x)),
            ExtrapolatorKind::Interpolator => interp.interpolate(data, x),
        }
    }

    /// First derivative of the extrapolated curve at `x` beyond `side`.
    pub fn first_derivative<T, I>(
        &self,
        interp: &I,
        data: &DataBundle<T>,
        x: T,
        side: Side,
    ) -> Result<T, InterpolationError>
    where
        T: Float,
        I: Interpolator1D<T> + ?Sized,
    {
        let index = side.node_index(data);
        let xb = data.key(index);
        match self {
            ExtrapolatorKind::Flat => Ok(T::zero()),
            ExtrapolatorKind::Linear => interp.first_derivative(data, xb),
            ExtrapolatorKind::LogLinear => {
                let yb = Self::positive_boundary(data, index)?;
                let db = interp.first_derivative(data, xb)?;
                let rate = db / yb;
                Ok(yb * (rate * (x - xb)).exp() * rate)
            }
            ExtrapolatorKind::Exception => Err(Self::out_of_bounds(data, x)),
            ExtrapolatorKind::Interpolator => interp.first_derivative(data, x),
        }
    }

    /// Node sensitivities of the extrapolated value at `x` beyond `side`.
    ///
    /// Propagated analytically through the boundary value `y_b` (a one-hot
    /// sensitivity) and the boundary slope `d_b`, whose sensitivities come
    /// from [`Interpolator1D::first_derivative_node_sensitivities`].
    pub fn node_sensitivities<T, I>(
        &self,
        interp: &I,
        data: &DataBundle<T>,
        x: T,
        side: Side,
    ) -> Result<Vec<T>, InterpolationError>
    where
        T: Float,
        I: Interpolator1D<T> + ?Sized,
    {
        let index = side.node_index(data);
        let xb = data.key(index);
        match self {
            ExtrapolatorKind::Flat => {
                let mut result = vec![T::zero(); data.size()];
                result[index] = T::one();
                Ok(result)
            }
            ExtrapolatorKind::Linear => {
                let dx = x - xb;
                let mut result = interp.first_derivative_node_sensitivities(data, xb)?;
                result.iter_mut().for_each(|s| *s = *s * dx);
                result[index] = result[index] + T::one();
                Ok(result)
            }
            ExtrapolatorKind::LogLinear => {
                let yb = Self::positive_boundary(data, index)?;
                let db = interp.first_derivative(data, xb)?;
                let dx = x - xb;
                let rate = db / yb;
                let growth = (rate * dx).exp();
                // v = y_b * exp(d_b / y_b * dx)
                let mut result = interp.first_derivative_node_sensitivities(data, xb)?;
                result.iter_mut().for_each(|s| *s = *s * growth * dx);
                result[index] = result[index] + growth * (T::one() - rate * dx);
                Ok(result)
            }
            ExtrapolatorKind::Exception => Err(Self::out_of_bounds(data, x)),
            ExtrapolatorKind::Interpolator => interp.node_sensitivities(data, x),
        }
    }

    /// Node sensitivities of [`ExtrapolatorKind::first_derivative`].
    pub fn first_derivative_node_sensitivities<T, I>(
        &self,
        interp: &I,
        data: &DataBundle<T>,
        x: T,
        side: Side,
    ) -> Result<Vec<T>, InterpolationError>
    where
        T: Float,
        I: Interpolator1D<T> + ?Sized,
    {
        let index = side.node_index(data);
        let xb = data.key(index);
        match self {
            ExtrapolatorKind::Flat => Ok(vec![T::zero(); data.size()]),
            ExtrapolatorKind::Linear => interp.first_derivative_node_sensitivities(data, xb),
            ExtrapolatorKind::LogLinear => {
                let yb = Self::positive_boundary(data, index)?;
                let db = interp.first_derivative(data, xb)?;
                let dx = x - xb;
                let rate = db / yb;
                let growth = (rate * dx).exp();
                // d = d_b * exp(d_b / y_b * dx)
                let mut result = interp.first_derivative_node_sensitivities(data, xb)?;
                result
                    .iter_mut()
                    .for_each(|s| *s = *s * growth * (T::one() + rate * dx));
                result[index] = result[index] - growth * rate * rate * dx;
                Ok(result)
            }
            ExtrapolatorKind::Exception => Err(Self::out_of_bounds(data, x)),
            ExtrapolatorKind::Interpolator => interp.first_derivative_node_sensitivities(data, x),
        }
    }
}

impl FromStr for ExtrapolatorKind {
    type Err = InterpolationError;

    /// Parses a policy name (case-insensitive, separators ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "flat" => Ok(ExtrapolatorKind::Flat),
            "linear" => Ok(ExtrapolatorKind::Linear),
            "loglinear" => Ok(ExtrapolatorKind::LogLinear),
            "exception" | "none" => Ok(ExtrapolatorKind::Exception),
            "interpolator" => Ok(ExtrapolatorKind::Interpolator),
            _ => Err(InterpolationError::UnknownExtrapolator(s.to_string())),
        }
    }
}

impl fmt::Display for ExtrapolatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::LinearInterpolator;
    use approx::assert_relative_eq;

    fn sample() -> DataBundle<f64> {
        DataBundle::new(&[1.0, 2.0, 3.0], &[2.0, 3.0, 5.0]).unwrap()
    }

    #[test]
    fn test_flat_policy() {
        let data = sample();
        let p = ExtrapolatorKind::Flat;
        assert_eq!(p.extrapolate(&LinearInterpolator, &data, 0.0, Side::Left).unwrap(), 2.0);
        assert_eq!(p.extrapolate(&LinearInterpolator, &data, 9.0, Side::Right).unwrap(), 5.0);
        assert_eq!(
            p.first_derivative(&LinearInterpolator, &data, 9.0, Side::Right)
                .unwrap(),
            0.0
        );
        assert_eq!(
            p.node_sensitivities(&LinearInterpolator, &data, 0.0, Side::Left)
                .unwrap(),
            vec![1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_linear_policy_uses_boundary_slope() {
        let data = sample();
        let p = ExtrapolatorKind::Linear;
        // Left slope 1, right slope 2 (slope of last interval at the last key)
        assert_relative_eq!(
            p.extrapolate(&LinearInterpolator, &data, 0.0, Side::Left)
                .unwrap(),
            1.0
        );
        assert_relative_eq!(
            p.extrapolate(&LinearInterpolator, &data, 4.0, Side::Right)
                .unwrap(),
            7.0
        );
        assert_relative_eq!(
            p.first_derivative(&LinearInterpolator, &data, 4.0, Side::Right)
                .unwrap(),
            2.0
        );
    }

    #[test]
    fn test_linear_policy_sensitivities() {
        let data = sample();
        let s = ExtrapolatorKind::Linear
            .node_sensitivities(&LinearInterpolator, &data, 4.0, Side::Right)
            .unwrap();
        // v = y2 + (y2 - y1) * (x - x2): weights [0, -1, 2]
        assert_relative_eq!(s[0], 0.0);
        assert_relative_eq!(s[1], -1.0);
        assert_relative_eq!(s[2], 2.0);
    }

    #[test]
    fn test_log_linear_policy() {
        let data = sample();
        let p = ExtrapolatorKind::LogLinear;
        let v = p
            .extrapolate(&LinearInterpolator, &data, 4.0, Side::Right)
            .unwrap();
        assert_relative_eq!(v, 5.0 * (2.0_f64 / 5.0).exp(), epsilon = 1e-12);

        let shift = 1e-6;
        let s = p
            .node_sensitivities(&LinearInterpolator, &data, 4.0, Side::Right)
            .unwrap();
        for j in 0..data.size() {
            let up = data.with_value(j, data.value(j) + shift).unwrap();
            let dn = data.with_value(j, data.value(j) - shift).unwrap();
            let fd = (p.extrapolate(&LinearInterpolator, &up, 4.0, Side::Right).unwrap()
                - p.extrapolate(&LinearInterpolator, &dn, 4.0, Side::Right).unwrap())
                / (2.0 * shift);
            assert_relative_eq!(s[j], fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_log_linear_policy_rejects_non_positive_boundary() {
        let data = DataBundle::new(&[1.0, 2.0], &[-1.0, 3.0]).unwrap();
        let err = ExtrapolatorKind::LogLinear
            .extrapolate(&LinearInterpolator, &data, 0.0, Side::Left)
            .unwrap_err();
        assert!(matches!(err, InterpolationError::NonPositiveValue { index: 0, .. }));
    }

    #[test]
    fn test_exception_policy() {
        let data = sample();
        let err = ExtrapolatorKind::Exception
            .extrapolate(&LinearInterpolator, &data, 3.5, Side::Right)
            .unwrap_err();
        assert_eq!(
            err,
            InterpolationError::OutOfBounds {
                x: 3.5,
                min: 1.0,
                max: 3.0
            }
        );
    }

    #[test]
    fn test_interpolator_policy_delegates() {
        let data = sample();
        let v = ExtrapolatorKind::Interpolator
            .extrapolate(&LinearInterpolator, &data, 0.0, Side::Left)
            .unwrap();
        assert_relative_eq!(v, 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "LogLinear".parse::<ExtrapolatorKind>().unwrap(),
            ExtrapolatorKind::LogLinear
        );
        assert_eq!(
            "exception".parse::<ExtrapolatorKind>().unwrap(),
            ExtrapolatorKind::Exception
        );
        assert_eq!(
            "Quadratic".parse::<ExtrapolatorKind>().unwrap_err(),
            InterpolationError::UnknownExtrapolator("Quadratic".to_string())
        );
    }
}
