//! Volatility smile quoted in call delta.
//!
//! Nodes live on (expiry, call delta). A strike query is mapped to the
//! delta whose Black strike reproduces it:
//!
//! ```text
//! K(d) = F · exp(-σ(t, d)·√t·N⁻¹(d) + σ(t, d)²·t / 2)
//! ```
//!
//! `K(d)` is decreasing in `d`, so `ln(K(d) / K)` is bracketed on
//! `[delta_min, delta_max]` and solved with Brent's method.

use super::{InterpolatedNodalSurface, ParameterizedSurface, VolatilitySensitivity, VolatilitySurface};
use crate::market_data::error::MarketDataError;
use crate::math::distributions::{norm_inv_cdf, norm_pdf};
use crate::math::solvers::{BrentFailure, BrentSolver, SolverConfig};
use crate::types::error::to_f64;
use crate::types::{DayCountConvention, SolverError};
use chrono::NaiveDateTime;
use num_traits::Float;
use tracing::{debug, trace};

/// Absolute tolerance on the solved delta.
pub const DEFAULT_DELTA_TOLERANCE: f64 = 1e-12;

/// Iteration budget for the delta search.
pub const DEFAULT_DELTA_MAX_ITERATIONS: usize = 100;

/// Lower end of the default delta bracket.
pub const DEFAULT_DELTA_MIN: f64 = 1e-10;

/// Upper end of the default delta bracket.
pub const DEFAULT_DELTA_MAX: f64 = 1.0 - 1e-10;

/// Delta bracket and solver settings for strike inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmileConfig<T: Float> {
    /// Smallest admissible call delta
    pub delta_min: T,
    /// Largest admissible call delta
    pub delta_max: T,
    /// Brent settings
    pub solver: SolverConfig<T>,
}

impl<T: Float> Default for SmileConfig<T> {
    fn default() -> Self {
        Self {
            delta_min: T::from(DEFAULT_DELTA_MIN).unwrap(),
            delta_max: T::from(DEFAULT_DELTA_MAX).unwrap(),
            solver: SolverConfig {
                tolerance: T::from(DEFAULT_DELTA_TOLERANCE).unwrap(),
                max_iterations: DEFAULT_DELTA_MAX_ITERATIONS,
            },
        }
    }
}

impl<T: Float> SmileConfig<T> {
    /// Create a configuration, checking `0 < delta_min < delta_max < 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_surface::market_data::surfaces::SmileConfig;
    /// use pricer_surface::math::solvers::SolverConfig;
    ///
    /// assert!(SmileConfig::new(0.01_f64, 0.99, SolverConfig::default()).is_ok());
    /// assert!(SmileConfig::new(0.5_f64, 0.4, SolverConfig::default()).is_err());
    /// ```
    pub fn new(delta_min: T, delta_max: T, solver: SolverConfig<T>) -> Result<Self, MarketDataError> {
        let ordered = T::zero() < delta_min && delta_min < delta_max && delta_max < T::one();
        if !ordered {
            return Err(SolverError::InvalidConfig(format!(
                "delta bracket must satisfy 0 < min < max < 1, got [{}, {}]",
                to_f64(delta_min),
                to_f64(delta_max)
            ))
            .into());
        }
        Ok(Self {
            delta_min,
            delta_max,
            solver,
        })
    }
}

/// Volatility surface over (expiry, call delta) queried by strike.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_surface::market_data::surfaces::{DeltaSmileSurface, SmileConfig, VolatilitySurface};
/// use pricer_surface::market_data::InterpolatedNodalSurface;
/// use pricer_surface::math::interpolators::GridInterpolator2D;
/// use pricer_surface::types::DayCountConvention;
///
/// let nodal = InterpolatedNodalSurface::new(
///     "EURUSD",
///     &[0.5_f64, 0.5, 0.5, 1.0, 1.0, 1.0],
///     &[0.25, 0.5, 0.75, 0.25, 0.5, 0.75],
///     &[0.11, 0.10, 0.115, 0.12, 0.11, 0.125],
///     GridInterpolator2D::default(),
/// ).unwrap();
/// let valuation = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let smile = DeltaSmileSurface::new(
///     valuation,
///     DayCountConvention::ActualActual365,
///     nodal,
///     SmileConfig::default(),
/// ).unwrap();
///
/// let t = 0.75;
/// let strike = smile.strike_from_delta(t, 0.3, 1.10).unwrap();
/// let delta = smile.delta_from_strike(t, strike, 1.10).unwrap();
/// assert!((delta - 0.3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSmileSurface<T: Float> {
    valuation: NaiveDateTime,
    day_count: DayCountConvention,
    surface: InterpolatedNodalSurface<T>,
    config: SmileConfig<T>,
}

impl<T: Float> DeltaSmileSurface<T> {
    /// Create a delta smile surface.
    ///
    /// # Errors
    ///
    /// `InvalidSurface` if a node expiry is negative or a node delta lies
    /// outside (0, 1).
    pub fn new(
        valuation: NaiveDateTime,
        day_count: DayCountConvention,
        surface: InterpolatedNodalSurface<T>,
        config: SmileConfig<T>,
    ) -> Result<Self, MarketDataError> {
        let data = surface.data();
        if let Some(&t) = data.xs().iter().find(|&&t| t < T::zero()) {
            return Err(MarketDataError::InvalidSurface(format!(
                "{}: negative expiry node {}",
                surface.name(),
                to_f64(t)
            )));
        }
        if let Some(&d) = data
            .ys()
            .iter()
            .find(|&&d| !(d > T::zero() && d < T::one()))
        {
            return Err(MarketDataError::InvalidSurface(format!(
                "{}: delta node {} outside (0, 1)",
                surface.name(),
                to_f64(d)
            )));
        }
        debug!(
            surface = surface.name(),
            valuation = %valuation,
            day_count = day_count.name(),
            delta_min = to_f64(config.delta_min),
            delta_max = to_f64(config.delta_max),
            "built delta smile surface"
        );
        Ok(Self {
            valuation,
            day_count,
            surface,
            config,
        })
    }

    /// Strike inversion settings.
    #[inline]
    pub fn config(&self) -> &SmileConfig<T> {
        &self.config
    }

    /// Underlying nodal surface in (expiry, delta).
    #[inline]
    pub fn surface(&self) -> &InterpolatedNodalSurface<T> {
        &self.surface
    }

    /// Strike whose call delta is `delta` at time `t`.
    ///
    /// # Errors
    ///
    /// * `InvalidDelta` - `delta` outside (0, 1)
    /// * `InvalidForward` - non-positive forward
    pub fn strike_from_delta(&self, t: T, delta: T, forward: T) -> Result<T, MarketDataError> {
        if !(delta > T::zero() && delta < T::one()) {
            return Err(MarketDataError::InvalidDelta {
                delta: to_f64(delta),
            });
        }
        check_forward(forward)?;
        let sigma = self.surface.z_value(t, delta)?;
        Ok(forward * log_strike_ratio(t, delta, sigma).exp())
    }

    /// Call delta whose strike is `strike` at time `t`.
    ///
    /// At `t = 0` the delta is `delta_max` in the money, 0.5 at the money
    /// and `delta_min` out of the money.
    ///
    /// # Errors
    ///
    /// * `InvalidStrike` / `InvalidForward` - non-positive inputs
    /// * `DeltaOutOfRange` - strike not reachable inside the delta bracket
    /// * `Solver` - the search did not converge
    pub fn delta_from_strike(&self, t: T, strike: T, forward: T) -> Result<T, MarketDataError> {
        if !(strike > T::zero() && strike.is_finite()) {
            return Err(MarketDataError::InvalidStrike {
                strike: to_f64(strike),
            });
        }
        check_forward(forward)?;

        let SmileConfig {
            delta_min,
            delta_max,
            solver,
        } = self.config;

        if t <= T::zero() {
            let half = T::from(0.5).unwrap();
            return Ok(if strike < forward {
                delta_max
            } else if strike > forward {
                delta_min
            } else {
                half.max(delta_min).min(delta_max)
            });
        }

        let ln_moneyness = (strike / forward).ln();
        let objective = |d: T| -> Result<T, MarketDataError> {
            let sigma = self.surface.z_value(t, d)?;
            Ok(log_strike_ratio(t, d, sigma) - ln_moneyness)
        };

        let delta = BrentSolver::new(solver)
            .try_find_root(objective, delta_min, delta_max)
            .map_err(|failure| match failure {
                BrentFailure::Solver(SolverError::NoBracket { .. }) => {
                    MarketDataError::DeltaOutOfRange {
                        strike: to_f64(strike),
                        forward: to_f64(forward),
                        expiry: to_f64(t),
                        delta_min: to_f64(delta_min),
                        delta_max: to_f64(delta_max),
                    }
                }
                BrentFailure::Solver(err) => MarketDataError::Solver(err),
                BrentFailure::Objective(err) => err,
            })?;

        debug!(
            surface = self.surface.name(),
            expiry = to_f64(t),
            strike = to_f64(strike),
            delta = to_f64(delta),
            "solved delta for strike"
        );
        Ok(delta)
    }

    /// Scale applied to the direct node sensitivities to account for the
    /// solved delta moving with the nodes.
    fn implicit_factor(&self, t: T, delta: T, sigma: T, dsigma_ddelta: T) -> Result<T, MarketDataError> {
        let sqrt_t = t.sqrt();
        let quantile = norm_inv_cdf(delta);
        let df_dsigma = -sqrt_t * quantile + sigma * t;
        let df_ddelta = -sigma * sqrt_t / norm_pdf(quantile) + df_dsigma * dsigma_ddelta;
        if df_ddelta == T::zero() || !df_ddelta.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "degenerate delta objective slope at delta = {}",
                to_f64(delta)
            ))
            .into());
        }
        Ok(T::one() - dsigma_ddelta * df_dsigma / df_ddelta)
    }
}

/// `ln(K(d) / F)` for a call delta `d` and volatility `sigma`.
#[inline]
fn log_strike_ratio<T: Float>(t: T, delta: T, sigma: T) -> T {
    let half = T::from(0.5).unwrap();
    -sigma * t.sqrt() * norm_inv_cdf(delta) + half * sigma * sigma * t
}

fn check_forward<T: Float>(forward: T) -> Result<(), MarketDataError> {
    if forward > T::zero() && forward.is_finite() {
        Ok(())
    } else {
        Err(MarketDataError::InvalidForward {
            forward: to_f64(forward),
        })
    }
}

impl<T: Float> VolatilitySurface<T> for DeltaSmileSurface<T> {
    fn name(&self) -> &str {
        self.surface.name()
    }

    fn valuation_date_time(&self) -> NaiveDateTime {
        self.valuation
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn volatility(
        &self,
        expiry: NaiveDateTime,
        _tenor: T,
        strike: T,
        forward: T,
    ) -> Result<T, MarketDataError> {
        let t = self.relative_time(expiry)?;
        let delta = self.delta_from_strike(t, strike, forward)?;
        trace!(expiry = to_f64(t), delta = to_f64(delta), "delta smile lookup");
        self.surface.z_value(t, delta)
    }

    fn volatility_sensitivity(
        &self,
        expiry: NaiveDateTime,
        _tenor: T,
        strike: T,
        forward: T,
    ) -> Result<VolatilitySensitivity<T>, MarketDataError> {
        let t = self.relative_time(expiry)?;
        let delta = self.delta_from_strike(t, strike, forward)?;
        let (value, (_, dsigma_ddelta), mut node_weights) = self.surface.evaluate(t, delta)?;
        if t > T::zero() {
            let factor = self.implicit_factor(t, delta, value, dsigma_ddelta)?;
            node_weights.iter_mut().for_each(|w| *w = *w * factor);
        }
        Ok(VolatilitySensitivity {
            expiry: t,
            value,
            node_weights,
        })
    }
}

impl<T: Float> ParameterizedSurface<T> for DeltaSmileSurface<T> {
    fn parameter_count(&self) -> usize {
        self.surface.parameter_count()
    }

    fn parameter(&self, index: usize) -> Option<T> {
        self.surface.parameter(index)
    }

    fn with_parameter(&self, index: usize, value: T) -> Result<Self, MarketDataError> {
        Ok(Self {
            surface: self.surface.with_parameter(index, value)?,
            ..self.clone()
        })
    }
}
