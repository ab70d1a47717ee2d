//! Log-linear interpolation implementation.

use super::{DataBundle, Interpolator1D};
use crate::types::error::to_f64;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolation of `ln(y)`.
///
/// Typical for discount factors and variance-like quantities that must stay
/// positive. Shares the boundary conventions of
/// [`LinearInterpolator`](super::LinearInterpolator): flat at and beyond the
/// last key, first interval extended below the first key.
///
/// # Formula
///
/// ```text
/// y = exp(ln y1 + (x - x1) / (x2 - x1) * (ln y2 - ln y1))
/// ```
///
/// All node values must be strictly positive; otherwise every query fails
/// with [`InterpolationError::NonPositiveValue`].
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{DataBundle, Interpolator1D, LogLinearInterpolator};
///
/// let data = DataBundle::<f64>::new(&[0.0, 1.0], &[1.0, 4.0]).unwrap();
/// let y = LogLinearInterpolator.interpolate(&data, 0.5).unwrap();
/// assert!((y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogLinearInterpolator;

impl LogLinearInterpolator {
    fn check_positive<T: Float>(data: &DataBundle<T>) -> Result<(), InterpolationError> {
        match data.values().iter().position(|&v| v <= T::zero() || v.is_nan()) {
            Some(index) => Err(InterpolationError::NonPositiveValue {
                value: to_f64(data.value(index)),
                index,
            }),
            None => Ok(()),
        }
    }

    /// Interval index for value/derivative evaluation, `None` beyond the last key.
    fn interval<T: Float>(data: &DataBundle<T>, x: T) -> Option<usize> {
        let n = data.size();
        let i = data.lower_bound_index(x);
        if i < n - 1 {
            Some(i)
        } else if x > data.last_key() {
            None
        } else {
            Some(n - 2)
        }
    }

    /// Value on interval `i` together with the interpolation weight `t`.
    fn interval_value<T: Float>(data: &DataBundle<T>, i: usize, x: T) -> (T, T) {
        let t = (x - data.key(i)) / (data.key(i + 1) - data.key(i));
        let ln_y1 = data.value(i).ln();
        let ln_y2 = data.value(i + 1).ln();
        ((ln_y1 + t * (ln_y2 - ln_y1)).exp(), t)
    }
}

impl<T: Float> Interpolator1D<T> for LogLinearInterpolator {
    fn name(&self) -> &'static str {
        "LogLinear"
    }

    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        Self::check_positive(data)?;
        let n = data.size();
        let i = data.lower_bound_index(x);
        if i == n - 1 {
            return Ok(data.value(n - 1));
        }
        Ok(Self::interval_value(data, i, x).0)
    }

    fn first_derivative(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        Self::check_positive(data)?;
        let Some(i) = Self::interval(data, x) else {
            return Ok(T::zero());
        };
        let (v, _) = Self::interval_value(data, i, x);
        let slope = (data.value(i + 1).ln() - data.value(i).ln()) / (data.key(i + 1) - data.key(i));
        Ok(v * slope)
    }

    fn node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        Self::check_positive(data)?;
        let n = data.size();
        let mut result = vec![T::zero(); n];
        let i = data.lower_bound_index(x);
        if i == n - 1 {
            result[n - 1] = T::one();
            return Ok(result);
        }

        let (v, t) = Self::interval_value(data, i, x);
        result[i] = v * (T::one() - t) / data.value(i);
        result[i + 1] = v * t / data.value(i + 1);
        Ok(result)
    }

    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        Self::check_positive(data)?;
        let mut result = vec![T::zero(); data.size()];
        let Some(i) = Self::interval(data, x) else {
            return Ok(result);
        };

        // d = v * s with s = (ln y2 - ln y1) / dx
        let dx = data.key(i + 1) - data.key(i);
        let (y1, y2) = (data.value(i), data.value(i + 1));
        let (v, t) = Self::interval_value(data, i, x);
        let s = (y2.ln() - y1.ln()) / dx;
        result[i] = v * (T::one() - t) / y1 * s - v / (dx * y1);
        result[i + 1] = v * t / y2 * s + v / (dx * y2);
        Ok(result)
    }
}
