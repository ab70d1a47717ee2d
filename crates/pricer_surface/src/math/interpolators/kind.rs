//! Closed set of 1-D interpolation schemes with name-based selection.

use super::{
    DataBundle, Interpolator1D, LinearInterpolator, LogLinearInterpolator,
    NaturalCubicSplineInterpolator, StepInterpolator,
};
use crate::types::InterpolationError;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Enum dispatch over the built-in interpolation schemes.
///
/// Configuration selects a scheme by name; the enum keeps dispatch static
/// and the value `Copy`.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::InterpolatorKind;
///
/// let kind: InterpolatorKind = "linear".parse().unwrap();
/// assert_eq!(kind, InterpolatorKind::Linear);
/// assert!("Quartic".parse::<InterpolatorKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InterpolatorKind {
    /// Piecewise linear, see [`LinearInterpolator`].
    #[default]
    Linear,
    /// Linear in `ln y`, see [`LogLinearInterpolator`].
    LogLinear,
    /// Natural cubic spline, see [`NaturalCubicSplineInterpolator`].
    NaturalCubicSpline,
    /// Piecewise constant, see [`StepInterpolator`].
    Step,
}

impl InterpolatorKind {
    /// Canonical name of the scheme.
    pub fn name(&self) -> &'static str {
        match self {
            InterpolatorKind::Linear => "Linear",
            InterpolatorKind::LogLinear => "LogLinear",
            InterpolatorKind::NaturalCubicSpline => "NaturalCubicSpline",
            InterpolatorKind::Step => "Step",
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $interp:ident => $body:expr) => {
        match $self {
            InterpolatorKind::Linear => {
                let $interp = LinearInterpolator;
                $body
            }
            InterpolatorKind::LogLinear => {
                let $interp = LogLinearInterpolator;
                $body
            }
            InterpolatorKind::NaturalCubicSpline => {
                let $interp = NaturalCubicSplineInterpolator;
                $body
            }
            InterpolatorKind::Step => {
                let $interp = StepInterpolator;
                $body
            }
        }
    };
}

impl<T: Float> Interpolator1D<T> for InterpolatorKind {
    fn name(&self) -> &'static str {
        InterpolatorKind::name(self)
    }

    fn min_points(&self) -> usize {
        dispatch!(self, i => Interpolator1D::<T>::min_points(&i))
    }

    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        dispatch!(self, i => i.interpolate(data, x))
    }

    fn first_derivative(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        dispatch!(self, i => i.first_derivative(data, x))
    }

    fn node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        dispatch!(self, i => i.node_sensitivities(data, x))
    }

    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        dispatch!(self, i => i.first_derivative_node_sensitivities(data, x))
    }
}

impl FromStr for InterpolatorKind {
    type Err = InterpolationError;

    /// Parses a scheme name (case-insensitive, separators ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "linear" => Ok(InterpolatorKind::Linear),
            "loglinear" => Ok(InterpolatorKind::LogLinear),
            "naturalcubicspline" | "naturalspline" | "cubicspline" => {
                Ok(InterpolatorKind::NaturalCubicSpline)
            }
            "step" | "piecewiseconstant" => Ok(InterpolatorKind::Step),
            _ => Err(InterpolationError::UnknownInterpolator(s.to_string())),
        }
    }
}

impl fmt::Display for InterpolatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
