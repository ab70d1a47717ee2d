//! Natural cubic spline interpolation.

use super::{DataBundle, Interpolator1D};
use crate::types::InterpolationError;
use num_traits::Float;

/// Natural cubic spline with C² continuity and zero end curvature.
///
/// The second derivatives `M` are obtained with the Thomas algorithm each
/// time the spline is evaluated, so the scheme stays a stateless strategy
/// like the others. Outside the node range the end polynomials are
/// extended; wrap the scheme in a
/// [`CombinedInterpolator`](super::CombinedInterpolator) to choose a
/// different tail.
///
/// The spline is linear in the node values, so node sensitivities are
/// exact: the sensitivity to node `j` is the spline through the unit vector
/// `e_j` evaluated at `x`.
///
/// At least 3 nodes are required.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{DataBundle, Interpolator1D, NaturalCubicSplineInterpolator};
///
/// let data = DataBundle::<f64>::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
/// let spline = NaturalCubicSplineInterpolator;
/// assert!((spline.interpolate(&data, 2.0).unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalCubicSplineInterpolator;

impl NaturalCubicSplineInterpolator {
    /// Solve the tridiagonal system for the knot second derivatives.
    ///
    /// Interior equations:
    /// `h[i-1]*M[i-1] + 2*(h[i-1]+h[i])*M[i] + h[i]*M[i+1] = 6*(slope[i] - slope[i-1])`
    fn second_derivatives<T: Float>(keys: &[T], values: &[T]) -> Vec<T> {
        let n = keys.len();
        let mut m = vec![T::zero(); n];
        if n < 3 {
            return m;
        }

        let two = T::from(2.0).unwrap();
        let six = T::from(6.0).unwrap();
        let h: Vec<T> = keys.windows(2).map(|w| w[1] - w[0]).collect();

        // Forward sweep over interior knots 1..n-1
        let mut c_prime = vec![T::zero(); n];
        let mut d_prime = vec![T::zero(); n];
        for i in 1..n - 1 {
            let a = h[i - 1];
            let b = two * (h[i - 1] + h[i]);
            let c = h[i];
            let rhs = six
                * ((values[i + 1] - values[i]) / h[i] - (values[i] - values[i - 1]) / h[i - 1]);
            let denom = b - a * c_prime[i - 1];
            c_prime[i] = c / denom;
            d_prime[i] = (rhs - a * d_prime[i - 1]) / denom;
        }

        // Back substitution, M[n-1] = 0
        for i in (1..n - 1).rev() {
            m[i] = d_prime[i] - c_prime[i] * m[i + 1];
        }
        m
    }

    fn segment<T: Float>(data: &DataBundle<T>, x: T) -> usize {
        data.lower_bound_index(x).min(data.size() - 2)
    }

    fn value_at<T: Float>(keys: &[T], values: &[T], m: &[T], i: usize, x: T) -> T {
        let six = T::from(6.0).unwrap();
        let h = keys[i + 1] - keys[i];
        let a = (keys[i + 1] - x) / h;
        let b = T::one() - a;
        a * values[i]
            + b * values[i + 1]
            + ((a * a * a - a) * m[i] + (b * b * b - b) * m[i + 1]) * h * h / six
    }

    fn derivative_at<T: Float>(keys: &[T], values: &[T], m: &[T], i: usize, x: T) -> T {
        let three = T::from(3.0).unwrap();
        let six = T::from(6.0).unwrap();
        let h = keys[i + 1] - keys[i];
        let a = (keys[i + 1] - x) / h;
        let b = T::one() - a;
        (values[i + 1] - values[i]) / h - (three * a * a - T::one()) / six * h * m[i]
            + (three * b * b - T::one()) / six * h * m[i + 1]
    }

    /// Evaluate `eval` on the spline through each unit vector `e_j`.
    fn unit_responses<T, F>(data: &DataBundle<T>, eval: F) -> Vec<T>
    where
        T: Float,
        F: Fn(&[T], &[T]) -> T,
    {
        let n = data.size();
        let mut unit = vec![T::zero(); n];
        (0..n)
            .map(|j| {
                unit[j] = T::one();
                let m = Self::second_derivatives(data.keys(), &unit);
                let response = eval(&unit, &m);
                unit[j] = T::zero();
                response
            })
            .collect()
    }
}

impl<T: Float> Interpolator1D<T> for NaturalCubicSplineInterpolator {
    fn name(&self) -> &'static str {
        "NaturalCubicSpline"
    }

    fn min_points(&self) -> usize {
        3
    }

    fn interpolate(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        let m = Self::second_derivatives(data.keys(), data.values());
        let i = Self::segment(data, x);
        Ok(Self::value_at(data.keys(), data.values(), &m, i, x))
    }

    fn first_derivative(&self, data: &DataBundle<T>, x: T) -> Result<T, InterpolationError> {
        self.check_data(data)?;
        let m = Self::second_derivatives(data.keys(), data.values());
        let i = Self::segment(data, x);
        Ok(Self::derivative_at(data.keys(), data.values(), &m, i, x))
    }

    fn node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        let i = Self::segment(data, x);
        Ok(Self::unit_responses(data, |values, m| {
            Self::value_at(data.keys(), values, m, i, x)
        }))
    }

    fn first_derivative_node_sensitivities(
        &self,
        data: &DataBundle<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        self.check_data(data)?;
        let i = Self::segment(data, x);
        Ok(Self::unit_responses(data, |values, m| {
            Self::derivative_at(data.keys(), values, m, i, x)
        }))
    }
}
