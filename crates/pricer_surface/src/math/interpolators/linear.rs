//! Linear interpolation implementation.

use super::{DataBundle, Interpolator1D};
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// This is the reference scheme; its boundary behaviour is deliberately
/// asymmetric and other components rely on it:
///
/// - below the first key the first interval is extended linearly;
/// - at or beyond the last key the value is flat at the last node value;
/// - the derivative exactly at the last key is the slope of the last
///   interval, while strictly beyond it the derivative is zero.
///
/// # Formula
///
/// ```text
/// y = y1 + (x - x1) / (x2 - x1) * (y2 - y1)
/// ```
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{DataBundle, Interpolator1D, LinearInterpolator};
///
/// let data = DataBundle::<f64>::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
/// let interp = LinearInterpolator;
///
/// assert!((interp.interpolate(&data, 1.5).unwrap() - 3.0).abs() < 1e-12);
/// // Flat beyond the last node
/// assert_eq!(interp.interpolate(&data, 10.0).unwrap(), 6.0);
/// // Slope of the last interval exactly at the last node, zero beyond it
/// assert_eq!(interp.first_derivative(&data, 3.0).unwrap(), 2.0);
/// assert_eq!(interp.first_derivative(&data, 3.5).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearInterpolator;

impl<T: Float> Interpolator1D<T> for LinearInterpolator {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        let n = data.size();
        let i = data.lower_bound_index(x);
        if i == n - 1 {
            return Ok(data.value(n - 1));
        }

        let x1 = data.key(i);
        let x2 = data.key(i + 1);
        let y1 = data.value(i);
        let y2 = data.value(i + 1);
        Ok(y1 + (x - x1) / (x2 - x1) * (y2 - y1))
    }

    fn first_derivative(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        let n = data.size();
        let mut i = data.lower_bound_index(x);
        if i == n - 1 {
            if x > data.last_key() {
                return Ok(T::zero());
            }
            i -= 1;
        }

        Ok((data.value(i + 1) - data.value(i)) / (data.key(i + 1) - data.key(i)))
    }

    fn node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        let n = data.size();
        let mut result = vec![T::zero(); n];
        let i = data.lower_bound_index(x);
        if i == n - 1 {
            result[n - 1] = T::one();
            return Ok(result);
        }

        let a = (data.key(i + 1) - x) / (data.key(i + 1) - data.key(i));
        result[i] = a;
        result[i + 1] = T::one() - a;
        Ok(result)
    }

    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        let n = data.size();
        let mut result = vec![T::zero(); n];
        let mut i = data.lower_bound_index(x);
        if i == n - 1 {
            if x > data.last_key() {
                return Ok(result);
            }
            i -= 1;
        }

        let inv_dx = T::one() / (data.key(i + 1) - data.key(i));
        result[i] = -inv_dx;
        result[i + 1] = inv_dx;
        Ok(result)
    }
}
