//! Interpolator decorated with left and right extrapolation policies.

use super::{DataBundle, ExtrapolatorKind, Interpolator1D, InterpolatorKind, Side};
use crate::types::InterpolationError;
use num_traits::Float;
use tracing::trace;

/// An interpolation scheme plus independent left/right extrapolators.
///
/// Queries inside `[first_key, last_key]` go to the inner scheme; queries
/// outside go to the extrapolator of the side they fall on. Note that the
/// inner scheme owns the query exactly at the last key, so the derivative
/// asymmetry of [`LinearInterpolator`](super::LinearInterpolator) at that
/// node is preserved.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{
///     CombinedInterpolator, DataBundle, ExtrapolatorKind, Interpolator1D, InterpolatorKind,
/// };
///
/// let interp = CombinedInterpolator::new(
///     InterpolatorKind::Linear,
///     ExtrapolatorKind::Flat,
///     ExtrapolatorKind::Linear,
/// );
/// let data = DataBundle::new(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
///
/// assert_eq!(interp.interpolate(&data, -1.0).unwrap(), 1.0);
/// assert_eq!(interp.interpolate(&data, 2.0).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CombinedInterpolator {
    interpolator: InterpolatorKind,
    left: ExtrapolatorKind,
    right: ExtrapolatorKind,
}

impl CombinedInterpolator {
    /// Combine a scheme with left and right extrapolation policies.
    pub fn new(
        interpolator: InterpolatorKind,
        left: ExtrapolatorKind,
        right: ExtrapolatorKind,
    ) -> Self {
        Self {
            interpolator,
            left,
            right,
        }
    }

    /// Build from scheme and policy names.
    ///
    /// # Errors
    ///
    /// `UnknownInterpolator` or `UnknownExtrapolator` for unrecognised names.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_surface::math::interpolators::CombinedInterpolator;
    ///
    /// assert!(CombinedInterpolator::from_names("Linear", "Flat", "Flat").is_ok());
    /// assert!(CombinedInterpolator::from_names("Linear", "Flat", "Cubic").is_err());
    /// ```
    pub fn from_names(
        interpolator: &str,
        left: &str,
        right: &str,
    ) -> Result<Self, InterpolationError> {
        Ok(Self::new(
            interpolator.parse()?,
            left.parse()?,
            right.parse()?,
        ))
    }

    /// Inner interpolation scheme.
    pub fn interpolator(&self) -> InterpolatorKind {
        self.interpolator
    }

    /// Policy applied below the first key.
    pub fn left_extrapolator(&self) -> ExtrapolatorKind {
        self.left
    }

    /// Policy applied above the last key.
    pub fn right_extrapolator(&self) -> ExtrapolatorKind {
        self.right
    }

    fn side<T: Float>(data: &DataBundle<T>, x: T) -> Option<Side> {
        if x < data.first_key() {
            Some(Side::Left)
        } else if x > data.last_key() {
            Some(Side::Right)
        } else {
            None
        }
    }

    fn policy(&self, side: Side) -> ExtrapolatorKind {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl<T: Float> Interpolator1D<T> for CombinedInterpolator {
    fn name(&self) -> &'static str {
        self.interpolator.name()
    }

    fn min_points(&self) -> usize {
        Interpolator1D::<T>::min_points(&self.interpolator)
    }

    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        match Self::side(data, x) {
            None => self.interpolator.interpolate(data, x),
            Some(side) => {
                self.check_data(data)?;
                trace!(?side, policy = self.policy(side).name(), "extrapolating");
                self.policy(side)
                    .extrapolate(&self.interpolator, data, x, side)
            }
        }
    }

    fn first_derivative(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        match Self::side(data, x) {
            None => self.interpolator.first_derivative(data, x),
            Some(side) => {
                self.check_data(data)?;
                self.policy(side)
                    .first_derivative(&self.interpolator, data, x, side)
            }
        }
    }

    fn node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        match Self::side(data, x) {
            None => self.interpolator.node_sensitivities(data, x),
            Some(side) => {
                self.check_data(data)?;
                self.policy(side)
                    .node_sensitivities(&self.interpolator, data, x, side)
            }
        }
    }

    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        match Self::side(data, x) {
            None => self
                .interpolator
                .first_derivative_node_sensitivities(data, x),
            Some(side) => {
                self.check_data(data)?;
                self.policy(side).first_derivative_node_sensitivities(
                    &self.interpolator,
                    data,
                    x,
                    side,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> DataBundle<f64> {
        DataBundle::new(&[0.0, 1.0, 2.0, 4.0], &[0.3, 0.25, 0.22, 0.2]).unwrap()
    }

    fn all_policies() -> [ExtrapolatorKind; 4] {
        [
            ExtrapolatorKind::Flat,
            ExtrapolatorKind::Linear,
            ExtrapolatorKind::LogLinear,
            ExtrapolatorKind::Interpolator,
        ]
    }

    #[test]
    fn test_in_range_delegates_to_inner() {
        let data = sample();
        let combined = CombinedInterpolator::new(
            InterpolatorKind::Linear,
            ExtrapolatorKind::Exception,
            ExtrapolatorKind::Exception,
        );
        for x in [0.0, 0.5, 3.0, 4.0] {
            assert_eq!(
                combined.interpolate(&data, x).unwrap(),
                InterpolatorKind::Linear.interpolate(&data, x).unwrap()
            );
        }
    }

    #[test]
    fn test_exception_outside_range() {
        let data = sample();
        let combined = CombinedInterpolator::new(
            InterpolatorKind::Linear,
            ExtrapolatorKind::Exception,
            ExtrapolatorKind::Exception,
        );
        assert!(matches!(
            combined.interpolate(&data, -0.1),
            Err(InterpolationError::OutOfBounds { .. })
        ));
        assert!(matches!(
            combined.node_sensitivities(&data, 4.1),
            Err(InterpolationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_continuous_at_boundaries() {
        let data = sample();
        for policy in all_policies() {
            let combined = CombinedInterpolator::new(InterpolatorKind::Linear, policy, policy);
            let eps = 1e-10;
            for (inside, outside) in [(0.0, -eps), (4.0, 4.0 + eps)] {
                let a = combined.interpolate(&data, inside).unwrap();
                let b = combined.interpolate(&data, outside).unwrap();
                assert_relative_eq!(a, b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_flat_right_tail_matches_linear_flat_tail() {
        let data = sample();
        let combined = CombinedInterpolator::new(
            InterpolatorKind::Linear,
            ExtrapolatorKind::Linear,
            ExtrapolatorKind::Flat,
        );
        assert_eq!(combined.interpolate(&data, 10.0).unwrap(), 0.2);
        assert_eq!(
            combined.node_sensitivities(&data, 10.0).unwrap(),
            vec![0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_sensitivities_match_bumps_outside_range() {
        let data = sample();
        let shift = 1e-6;
        for policy in all_policies() {
            for scheme in [InterpolatorKind::Linear, InterpolatorKind::NaturalCubicSpline] {
                let combined = CombinedInterpolator::new(scheme, policy, policy);
                for x in [-1.5, 5.5] {
                    let s = combined.node_sensitivities(&data, x).unwrap();
                    let ds = combined.first_derivative_node_sensitivities(&data, x).unwrap();
                    for j in 0..data.size() {
                        let up = data.with_value(j, data.value(j) + shift).unwrap();
                        let dn = data.with_value(j, data.value(j) - shift).unwrap();
                        let fd = (combined.interpolate(&up, x).unwrap()
                            - combined.interpolate(&dn, x).unwrap())
                            / (2.0 * shift);
                        let fd_deriv = (combined.first_derivative(&up, x).unwrap()
                            - combined.first_derivative(&dn, x).unwrap())
                            / (2.0 * shift);
                        assert_relative_eq!(s[j], fd, epsilon = 1e-7);
                        assert_relative_eq!(ds[j], fd_deriv, epsilon = 1e-5);
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_names() {
        let combined = CombinedInterpolator::from_names("LogLinear", "Flat", "Linear").unwrap();
        assert_eq!(combined.interpolator(), InterpolatorKind::LogLinear);
        assert_eq!(combined.left_extrapolator(), ExtrapolatorKind::Flat);
        assert_eq!(combined.right_extrapolator(), ExtrapolatorKind::Linear);

        assert_eq!(
            CombinedInterpolator::from_names("Linear", "Sideways", "Flat").unwrap_err(),
            InterpolationError::UnknownExtrapolator("Sideways".to_string())
        );
    }
}
