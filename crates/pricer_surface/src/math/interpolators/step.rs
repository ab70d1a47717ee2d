//! Piecewise constant interpolation.

use super::{DataBundle, Interpolator1D};
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise constant interpolator holding each node value until the next key.
///
/// Returns `values[lower_bound_index(x)]`, so queries below the first key take
/// the first value. The derivative is zero everywhere.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{DataBundle, Interpolator1D, StepInterpolator};
///
/// let data = DataBundle::new(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]).unwrap();
/// assert_eq!(StepInterpolator.interpolate(&data, 1.999).unwrap(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInterpolator;

impl<T: Float> Interpolator1D<T> for StepInterpolator {
    fn name(&self) -> &'static str {
        "Step"
    }

    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        Ok(data.value(data.lower_bound_index(x)))
    }

    fn first_derivative(&self, data: &DataBundle<T>, _x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        Ok(T::zero())
    }

    fn node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        let mut result = vec![T::zero(); data.size()];
        result[data.lower_bound_index(x)] = T::one();
        Ok(result)
    }

    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        _x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        Ok(vec![T::zero(); data.size()])
    }
}
