//! Volatility surface trait definitions.

use crate::market_data::error::MarketDataError;
use crate::types::DayCountConvention;
use chrono::NaiveDateTime;
use num_traits::Float;

/// Volatility together with its sensitivities to the surface nodes.
///
/// `node_weights[i]` is `∂σ/∂z_i` for the i-th node of the underlying
/// nodal surface, in the order the nodes were supplied at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilitySensitivity<T: Float> {
    /// Time to expiry in years used for the lookup
    pub expiry: T,
    /// Volatility at the query point
    pub value: T,
    /// Sensitivity of `value` to every surface node
    pub node_weights: Vec<T>,
}

/// Generic trait for implied volatility lookup by expiry date-time.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `Dual64`)
///
/// # Expiry State Machine
///
/// * `expiry > valuation`: time is the day-count year fraction between the
///   two dates
/// * `expiry == valuation`: time is zero; the volatility is still evaluated
/// * `expiry < valuation`: [`MarketDataError::ExpiredOption`]
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_surface::market_data::surfaces::{GridVolatilitySurface, VolatilityAxes, VolatilitySurface};
/// use pricer_surface::market_data::InterpolatedNodalSurface;
/// use pricer_surface::math::interpolators::GridInterpolator2D;
/// use pricer_surface::types::DayCountConvention;
///
/// let nodal = InterpolatedNodalSurface::new(
///     "EUR-SWAPTION",
///     &[0.5_f64, 1.0, 0.5, 1.0],
///     &[1.0, 1.0, 5.0, 5.0],
///     &[0.20, 0.22, 0.24, 0.26],
///     GridInterpolator2D::default(),
/// ).unwrap();
/// let valuation = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let surface = GridVolatilitySurface::new(
///     valuation,
///     DayCountConvention::ActualActual365,
///     nodal,
///     VolatilityAxes::ExpiryTenor,
/// );
///
/// assert_eq!(surface.relative_time(valuation).unwrap(), 0.0);
/// let yesterday = valuation - chrono::Duration::days(1);
/// assert!(surface.relative_time(yesterday).is_err());
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Surface name.
    fn name(&self) -> &str;

    /// Reference date-time against which expiries are measured.
    fn valuation_date_time(&self) -> NaiveDateTime;

    /// Day count converting dates to year fractions.
    fn day_count(&self) -> DayCountConvention;

    /// Time to expiry in years.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::ExpiredOption`] if `expiry` is strictly before the
    /// valuation date-time.
    fn relative_time(&self, expiry: NaiveDateTime) -> Result<T, MarketDataError> {
        let valuation = self.valuation_date_time();
        if expiry < valuation {
            return Err(MarketDataError::ExpiredOption { expiry, valuation });
        }
        let years = self
            .day_count()
            .relative_year_fraction(valuation.date(), expiry.date());
        Ok(T::from(years).unwrap())
    }

    /// Implied volatility for the given expiry, tenor, strike and forward.
    ///
    /// # Arguments
    ///
    /// * `expiry` - Option expiry date-time
    /// * `tenor` - Underlying tenor in years (ignored by strike-only surfaces)
    /// * `strike` - Strike price
    /// * `forward` - Forward price of the underlying
    fn volatility(
        &self,
        expiry: NaiveDateTime,
        tenor: T,
        strike: T,
        forward: T,
    ) -> Result<T, MarketDataError>;

    /// Implied volatility with its node sensitivities.
    fn volatility_sensitivity(
        &self,
        expiry: NaiveDateTime,
        tenor: T,
        strike: T,
        forward: T,
    ) -> Result<VolatilitySensitivity<T>, MarketDataError>;
}

/// A surface whose node values can be read and replaced one at a time.
///
/// Bump-and-reprice risk is built on this trait.
pub trait ParameterizedSurface<T: Float>: Sized {
    /// Number of node values.
    fn parameter_count(&self) -> usize;

    /// Node value at `index`.
    fn parameter(&self, index: usize) -> Option<T>;

    /// A copy of the surface with node `index` set to `value`.
    fn with_parameter(&self, index: usize, value: T) -> Result<Self, MarketDataError>;
}
