//! Bump-and-reprice node sensitivities.
//!
//! Analytic sensitivities come from
//! [`VolatilitySurface::volatility_sensitivity`]. The functions here
//! recompute them by central finite differences on every node, which is
//! how the analytic results are validated and how arbitrary functionals of
//! a surface can be risked.
//!
//! With the `parallel` feature the nodes are bumped concurrently with
//! Rayon; every worker reads the same immutable base surface.

use crate::market_data::surfaces::{ParameterizedSurface, VolatilitySurface};
use crate::market_data::MarketDataError;
use crate::types::error::to_f64;
use crate::types::InterpolationError;
use chrono::NaiveDateTime;
use num_traits::Float;
use tracing::debug;

/// Default absolute node bump.
pub const DEFAULT_BUMP: f64 = 1e-6;

/// Central finite-difference sensitivities of `f` to every node.
///
/// Node `i` is bumped by `±shift` and the result is
/// `(f(up) - f(down)) / (2 · shift)`.
///
/// # Errors
///
/// `InvalidInput` for a non-positive shift; otherwise the first error
/// returned by `f` or by rebuilding a bumped surface.
///
/// # Example
///
/// ```
/// use pricer_surface::market_data::InterpolatedNodalSurface;
/// use pricer_surface::math::interpolators::GridInterpolator2D;
/// use pricer_surface::risk::finite_difference_sensitivities;
///
/// let surface = InterpolatedNodalSurface::new(
///     "Z",
///     &[0.0_f64, 1.0, 0.0, 1.0],
///     &[0.0, 0.0, 1.0, 1.0],
///     &[1.0, 2.0, 3.0, 4.0],
///     GridInterpolator2D::default(),
/// ).unwrap();
///
/// let sens = finite_difference_sensitivities(&surface, 1e-6, |s| s.z_value(0.5, 0.5)).unwrap();
/// assert!(sens.iter().all(|&w| (w - 0.25).abs() < 1e-8));
/// ```
#[cfg(feature = "parallel")]
pub fn finite_difference_sensitivities<T, S, F>(
    surface: &S,
    shift: T,
    f: F,
) -> Result<Vec<T>, MarketDataError>
where
    T: Float + Send + Sync,
    S: ParameterizedSurface<T> + Sync,
    F: Fn(&S) -> Result<T, MarketDataError> + Sync,
{
    use rayon::prelude::*;

    check_shift(shift)?;
    debug!(
        nodes = surface.parameter_count(),
        shift = to_f64(shift),
        "parallel finite-difference sensitivities"
    );
    (0..surface.parameter_count())
        .into_par_iter()
        .map(|i| central_difference(surface, i, shift, &f))
        .collect()
}

/// Sequential fallback when the parallel feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn finite_difference_sensitivities<T, S, F>(
    surface: &S,
    shift: T,
    f: F,
) -> Result<Vec<T>, MarketDataError>
where
    T: Float,
    S: ParameterizedSurface<T>,
    F: Fn(&S) -> Result<T, MarketDataError>,
{
    check_shift(shift)?;
    debug!(
        nodes = surface.parameter_count(),
        shift = to_f64(shift),
        "finite-difference sensitivities"
    );
    (0..surface.parameter_count())
        .map(|i| central_difference(surface, i, shift, &f))
        .collect()
}

/// Finite-difference counterpart of
/// [`VolatilitySurface::volatility_sensitivity`].
#[cfg(feature = "parallel")]
pub fn volatility_sensitivities_by_bump<T, S>(
    surface: &S,
    expiry: NaiveDateTime,
    tenor: T,
    strike: T,
    forward: T,
    shift: T,
) -> Result<Vec<T>, MarketDataError>
where
    T: Float + Send + Sync,
    S: VolatilitySurface<T> + ParameterizedSurface<T> + Sync,
{
    finite_difference_sensitivities(surface, shift, |s: &S| {
        s.volatility(expiry, tenor, strike, forward)
    })
}

/// Finite-difference counterpart of
/// [`VolatilitySurface::volatility_sensitivity`].
#[cfg(not(feature = "parallel"))]
pub fn volatility_sensitivities_by_bump<T, S>(
    surface: &S,
    expiry: NaiveDateTime,
    tenor: T,
    strike: T,
    forward: T,
    shift: T,
) -> Result<Vec<T>, MarketDataError>
where
    T: Float,
    S: VolatilitySurface<T> + ParameterizedSurface<T>,
{
    finite_difference_sensitivities(surface, shift, |s: &S| {
        s.volatility(expiry, tenor, strike, forward)
    })
}

fn check_shift<T: Float>(shift: T) -> Result<(), MarketDataError> {
    if shift > T::zero() && shift.is_finite() {
        Ok(())
    } else {
        Err(InterpolationError::InvalidInput(format!(
            "bump size must be positive and finite, got {}",
            to_f64(shift)
        ))
        .into())
    }
}

fn central_difference<T, S, F>(surface: &S, index: usize, shift: T, f: &F) -> Result<T, MarketDataError>
where
    T: Float,
    S: ParameterizedSurface<T>,
    F: Fn(&S) -> Result<T, MarketDataError>,
{
    let base = surface.parameter(index).ok_or_else(|| {
        InterpolationError::InvalidInput(format!("no node at index {}", index))
    })?;
    let up = f(&surface.with_parameter(index, base + shift)?)?;
    let down = f(&surface.with_parameter(index, base - shift)?)?;
    Ok((up - down) / (shift + shift))
}
