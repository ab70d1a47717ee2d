//! Named surface defined by interpolated nodes.

use super::ParameterizedSurface;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{GridData, GridInterpolator2D};
use num_traits::Float;
use tracing::debug;

/// A named surface `z(x, y)` defined by scattered nodes and a
/// [`GridInterpolator2D`].
///
/// Parameters are the node `z` values in construction order.
///
/// # Example
///
/// ```
/// use pricer_surface::market_data::InterpolatedNodalSurface;
/// use pricer_surface::math::interpolators::GridInterpolator2D;
///
/// let surface = InterpolatedNodalSurface::new(
///     "ATM",
///     &[1.0_f64, 2.0, 1.0, 2.0],
///     &[0.0, 0.0, 1.0, 1.0],
///     &[0.1, 0.2, 0.3, 0.4],
///     GridInterpolator2D::default(),
/// ).unwrap();
///
/// assert_eq!(surface.z_value(2.0, 1.0).unwrap(), 0.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedNodalSurface<T: Float> {
    name: String,
    data: GridData<T>,
    interpolator: GridInterpolator2D,
}

impl<T: Float> InterpolatedNodalSurface<T> {
    /// Build a surface from parallel node arrays.
    ///
    /// # Errors
    ///
    /// Any [`GridData::new`] validation failure, or a slice layout too
    /// small for the axis schemes ([`GridInterpolator2D::check_data`]),
    /// wrapped in [`MarketDataError::Interpolation`].
    pub fn new(
        name: impl Into<String>,
        xs: &[T],
        ys: &[T],
        zs: &[T],
        interpolator: GridInterpolator2D,
    ) -> Result<Self, MarketDataError> {
        let data = GridData::new(xs, ys, zs)?;
        interpolator.check_data(&data)?;
        let name = name.into();
        debug!(
            surface = %name,
            nodes = data.size(),
            y_slices = data.y_keys().len(),
            "built nodal surface"
        );
        Ok(Self {
            name,
            data,
            interpolator,
        })
    }

    /// Surface name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying node data.
    #[inline]
    pub fn data(&self) -> &GridData<T> {
        &self.data
    }

    /// The 2-D interpolator.
    #[inline]
    pub fn interpolator(&self) -> GridInterpolator2D {
        self.interpolator
    }

    /// Surface value at `(x, y)`.
    pub fn z_value(&self, x: T, y: T) -> Result<T, MarketDataError> {
        Ok(self.interpolator.interpolate(&self.data, x, y)?)
    }

    /// Sensitivities of `z(x, y)` to every node.
    pub fn z_value_parameter_sensitivity(&self, x: T, y: T) -> Result<Vec<T>, MarketDataError> {
        Ok(self.interpolator.node_sensitivities(&self.data, x, y)?)
    }

    /// Partial derivatives `(∂z/∂x, ∂z/∂y)`.
    pub fn first_partial_derivatives(&self, x: T, y: T) -> Result<(T, T), MarketDataError> {
        Ok(self.interpolator.first_partial_derivatives(&self.data, x, y)?)
    }

    /// Value, partial derivatives and node sensitivities in one pass.
    pub fn evaluate(&self, x: T, y: T) -> Result<(T, (T, T), Vec<T>), MarketDataError> {
        Ok(self.interpolator.evaluate(&self.data, x, y)?)
    }
}

impl<T: Float> ParameterizedSurface<T> for InterpolatedNodalSurface<T> {
    fn parameter_count(&self) -> usize {
        self.data.size()
    }

    fn parameter(&self, index: usize) -> Option<T> {
        self.data.zs().get(index).copied()
    }

    fn with_parameter(&self, index: usize, value: T) -> Result<Self, MarketDataError> {
        Ok(Self {
            name: self.name.clone(),
            data: self.data.with_z(index, value)?,
            interpolator: self.interpolator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::{CombinedInterpolator, ExtrapolatorKind, InterpolatorKind};
    use crate::types::InterpolationError;
    use approx::assert_relative_eq;

    fn sample() -> InterpolatedNodalSurface<f64> {
        InterpolatedNodalSurface::new(
            "test",
            &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0],
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            &[1.0, 2.0, 4.0, 3.0, 4.0, 6.0],
            GridInterpolator2D::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_reproduces_nodes() {
        let surface = sample();
        let data = surface.data().clone();
        for i in 0..data.size() {
            assert_eq!(surface.z_value(data.xs()[i], data.ys()[i]).unwrap(), data.zs()[i]);
        }
    }

    #[test]
    fn test_sensitivities_match_bump() {
        let surface = sample();
        let (x, y) = (1.3, 0.4);
        let sens = surface.z_value_parameter_sensitivity(x, y).unwrap();
        let base = surface.z_value(x, y).unwrap();
        for (i, &s) in sens.iter().enumerate() {
            let bumped = surface
                .with_parameter(i, surface.parameter(i).unwrap() + 1e-6)
                .unwrap();
            let fd = (bumped.z_value(x, y).unwrap() - base) / 1e-6;
            assert_relative_eq!(s, fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_with_parameter_out_of_range() {
        let surface = sample();
        assert!(surface.parameter(6).is_none());
        assert!(matches!(
            surface.with_parameter(6, 1.0),
            Err(MarketDataError::Interpolation(InterpolationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_exception_extrapolator_propagates() {
        let strict = CombinedInterpolator::new(
            InterpolatorKind::Linear,
            ExtrapolatorKind::Exception,
            ExtrapolatorKind::Exception,
        );
        let surface = InterpolatedNodalSurface::new(
            "strict",
            &[0.0, 1.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[1.0, 2.0, 3.0, 4.0],
            GridInterpolator2D::new(strict, strict),
        )
        .unwrap();
        assert!(matches!(
            surface.z_value(1.5, 0.5),
            Err(MarketDataError::Interpolation(InterpolationError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_rejects_duplicate_nodes() {
        let result = InterpolatedNodalSurface::new(
            "dup",
            &[0.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0],
            &[1.0, 2.0, 3.0],
            GridInterpolator2D::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_slice_too_small_for_scheme() {
        let spline = CombinedInterpolator::new(
            InterpolatorKind::NaturalCubicSpline,
            ExtrapolatorKind::Flat,
            ExtrapolatorKind::Flat,
        );
        let result = InterpolatedNodalSurface::new(
            "ragged",
            &[0.0, 1.0, 2.0, 0.0, 2.0],
            &[0.0, 0.0, 0.0, 1.0, 1.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            GridInterpolator2D::new(spline, CombinedInterpolator::default()),
        );
        let err = result.unwrap_err();
        assert_eq!(
            err,
            MarketDataError::Interpolation(InterpolationError::InsufficientData { got: 2, need: 3 })
        );
        assert_eq!(err.kind(), crate::market_data::ErrorKind::MalformedInput);
    }
}
