//! Strategy trait implemented by every 1-D interpolation scheme.

use super::DataBundle;
use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation strategy over a [`DataBundle`].
///
/// Implementations hold no node data of their own: the same interpolator
/// value can be applied to any bundle, and is safe to share across threads.
///
/// Node sensitivities are returned as a vector of length `data.size()` whose
/// `j`-th entry is the partial derivative of the result with respect to
/// `data.value(j)`.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{DataBundle, Interpolator1D, LinearInterpolator};
///
/// let data = DataBundle::<f64>::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 3.0]).unwrap();
/// let interp = LinearInterpolator;
///
/// assert!((interp.interpolate(&data, 0.5).unwrap() - 1.0).abs() < 1e-12);
/// assert_eq!(interp.node_sensitivities(&data, 0.5).unwrap(), vec![0.5, 0.5, 0.0]);
/// ```
pub trait Interpolator1D<T: Float> {
    /// Canonical scheme name, as accepted by the name parser.
    fn name(&self) -> &'static str;

    /// Minimum number of nodes the scheme requires.
    fn min_points(&self) -> usize {
        2
    }

    /// Interpolated value at `x`.
    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError>;

    /// First derivative with respect to `x`.
    fn first_derivative(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError>;

    /// Partial derivatives of the interpolated value with respect to each node value.
    fn node_sensitivities(&self, data: &DataBundle<T>, x: T)
        -> Result<Vec<T>, InterpolationError>;

    /// Partial derivatives of [`Interpolator1D::first_derivative`] with respect to
    /// each node value.
    ///
    /// Extrapolators that extend the boundary slope need these to propagate
    /// sensitivities beyond the node range.
    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError>;

    /// Reject bundles with fewer nodes than the scheme needs.
    fn check_data(&self, data: &DataBundle<T>) -> Result<(), InterpolationError> {
        if data.size() < self.min_points() {
            return Err(InterpolationError::InsufficientData {
                got: data.size(),
                need: self.min_points(),
            });
        }
        Ok(())
    }
}
