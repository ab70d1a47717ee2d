//! Volatility surface backed by an interpolated nodal grid.

use super::{InterpolatedNodalSurface, ParameterizedSurface, VolatilitySensitivity, VolatilitySurface};
use crate::market_data::error::MarketDataError;
use crate::types::error::to_f64;
use crate::types::DayCountConvention;
use chrono::NaiveDateTime;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// How a volatility query maps onto the surface `y` coordinate.
///
/// The surface `x` coordinate is always time to expiry in years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityAxes {
    /// `y` is the underlying tenor in years (swaption cubes).
    #[default]
    ExpiryTenor,
    /// `y` is the strike.
    ExpiryStrike,
    /// `y` is `strike - forward`.
    ExpirySimpleMoneyness,
}

impl VolatilityAxes {
    /// Surface `y` coordinate for a query.
    #[inline]
    pub fn y_coordinate<T: Float>(&self, tenor: T, strike: T, forward: T) -> T {
        match self {
            VolatilityAxes::ExpiryTenor => tenor,
            VolatilityAxes::ExpiryStrike => strike,
            VolatilityAxes::ExpirySimpleMoneyness => strike - forward,
        }
    }
}

impl fmt::Display for VolatilityAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VolatilityAxes::ExpiryTenor => "ExpiryTenor",
            VolatilityAxes::ExpiryStrike => "ExpiryStrike",
            VolatilityAxes::ExpirySimpleMoneyness => "ExpirySimpleMoneyness",
        };
        write!(f, "{}", name)
    }
}

/// Model the quoted volatilities belong to.
///
/// Carried for the pricers that consume the surface; lookups do not depend
/// on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityModel {
    /// Lognormal (Black) volatility
    #[default]
    Black,
    /// Normal (Bachelier) volatility
    Normal,
}

/// Volatility surface over (expiry, tenor / strike / moneyness).
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
///     "SPX",
///     &[0.5_f64, 1.0, 0.5, 1.0],
///     &[90.0, 90.0, 110.0, 110.0],
///     &[0.25, 0.24, 0.21, 0.20],
///     GridInterpolator2D::default(),
/// ).unwrap();
/// let valuation = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let surface = GridVolatilitySurface::new(
///     valuation,
///     DayCountConvention::ActualActual365,
///     nodal,
///     VolatilityAxes::ExpiryStrike,
/// );
///
/// let expiry = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let vol = surface.volatility(expiry, 0.0, 100.0, 100.0).unwrap();
/// assert!(vol > 0.20 && vol < 0.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridVolatilitySurface<T: Float> {
    valuation: NaiveDateTime,
    day_count: DayCountConvention,
    surface: InterpolatedNodalSurface<T>,
    axes: VolatilityAxes,
    model: VolatilityModel,
}

impl<T: Float> GridVolatilitySurface<T> {
    /// Create a Black volatility surface.
    pub fn new(
        valuation: NaiveDateTime,
        day_count: DayCountConvention,
        surface: InterpolatedNodalSurface<T>,
        axes: VolatilityAxes,
    ) -> Self {
        Self {
            valuation,
            day_count,
            surface,
            axes,
            model: VolatilityModel::Black,
        }
    }

    /// Set the volatility model tag.
    pub fn with_model(mut self, model: VolatilityModel) -> Self {
        self.model = model;
        self
    }

    /// Axis mapping.
    #[inline]
    pub fn axes(&self) -> VolatilityAxes {
        self.axes
    }

    /// Volatility model tag.
    #[inline]
    pub fn model(&self) -> VolatilityModel {
        self.model
    }

    /// Underlying nodal surface.
    #[inline]
    pub fn surface(&self) -> &InterpolatedNodalSurface<T> {
        &self.surface
    }

    fn coordinates(
        &self,
        expiry: NaiveDateTime,
        tenor: T,
        strike: T,
        forward: T,
    ) -> Result<(T, T), MarketDataError> {
        let t = self.relative_time(expiry)?;
        match self.axes {
            VolatilityAxes::ExpiryTenor if !tenor.is_finite() => {
                return Err(MarketDataError::InvalidTenor {
                    tenor: to_f64(tenor),
                });
            }
            VolatilityAxes::ExpiryStrike | VolatilityAxes::ExpirySimpleMoneyness
                if !strike.is_finite() =>
            {
                return Err(MarketDataError::InvalidStrike {
                    strike: to_f64(strike),
                });
            }
            VolatilityAxes::ExpirySimpleMoneyness if !forward.is_finite() => {
                return Err(MarketDataError::InvalidForward {
                    forward: to_f64(forward),
                });
            }
            _ => {}
        }
        let y = self.axes.y_coordinate(tenor, strike, forward);
        trace!(
            surface = self.surface.name(),
            expiry = to_f64(t),
            y = to_f64(y),
            "grid volatility lookup"
        );
        Ok((t, y))
    }
}

impl<T: Float> VolatilitySurface<T> for GridVolatilitySurface<T> {
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
        tenor: T,
        strike: T,
        forward: T,
    ) -> Result<T, MarketDataError> {
        let (t, y) = self.coordinates(expiry, tenor, strike, forward)?;
        self.surface.z_value(t, y)
    }

    fn volatility_sensitivity(
        &self,
        expiry: NaiveDateTime,
        tenor: T,
        strike: T,
        forward: T,
    ) -> Result<VolatilitySensitivity<T>, MarketDataError> {
        let (t, y) = self.coordinates(expiry, tenor, strike, forward)?;
        let (value, _, node_weights) = self.surface.evaluate(t, y)?;
        Ok(VolatilitySensitivity {
            expiry: t,
            value,
            node_weights,
        })
    }
}

impl<T: Float> ParameterizedSurface<T> for GridVolatilitySurface<T> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::ErrorKind;
    use crate::math::interpolators::GridInterpolator2D;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn valuation() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn swaption_surface() -> GridVolatilitySurface<f64> {
        let nodal = InterpolatedNodalSurface::new(
            "USD-SWAPTION",
            &[0.25, 1.0, 5.0, 0.25, 1.0, 5.0],
            &[2.0, 2.0, 2.0, 10.0, 10.0, 10.0],
            &[0.30, 0.28, 0.24, 0.26, 0.25, 0.22],
            GridInterpolator2D::default(),
        )
        .unwrap();
        GridVolatilitySurface::new(
            valuation(),
            DayCountConvention::ActualActual365,
            nodal,
            VolatilityAxes::ExpiryTenor,
        )
        .with_model(VolatilityModel::Normal)
    }

    // ========================================
    // Expiry State Machine Tests
    // ========================================

    #[test]
    fn test_expired_option_rejected() {
        let surface = swaption_surface();
        let expiry = valuation() - Duration::days(1);
        let err = surface.volatility(expiry, 2.0, 0.03, 0.03).unwrap_err();
        assert!(matches!(err, MarketDataError::ExpiredOption { .. }));
        assert_eq!(err.kind(), ErrorKind::DomainViolation);
    }

    #[test]
    fn test_expiry_at_valuation_is_zero_time() {
        let surface = swaption_surface();
        let t: f64 = surface.relative_time(valuation()).unwrap();
        assert_eq!(t, 0.0);
        // Flat extrapolation below the first expiry
        let vol = surface.volatility(valuation(), 2.0, 0.03, 0.03).unwrap();
        assert_relative_eq!(vol, 0.30, epsilon = 1e-14);
    }

    #[test]
    fn test_non_finite_tenor_rejected() {
        let surface = swaption_surface();
        let expiry = valuation() + Duration::days(200);
        for tenor in [f64::NAN, f64::INFINITY] {
            let err = surface.volatility(expiry, tenor, 0.03, 0.03).unwrap_err();
            assert!(matches!(err, MarketDataError::InvalidTenor { .. }));
            assert_eq!(err.kind(), ErrorKind::DomainViolation);
            assert!(surface
                .volatility_sensitivity(expiry, tenor, 0.03, 0.03)
                .is_err());
        }
    }

    #[test]
    fn test_same_day_later_time_is_zero() {
        let surface = swaption_surface();
        let later = valuation() + Duration::hours(6);
        let t: f64 = surface.relative_time(later).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_relative_time_uses_day_count() {
        let surface = swaption_surface();
        let expiry = valuation() + Duration::days(73);
        let t: f64 = surface.relative_time(expiry).unwrap();
        assert_relative_eq!(t, 0.2, epsilon = 1e-14);
    }

    // ========================================
    // Lookup Tests
    // ========================================

    #[test]
    fn test_volatility_at_node() {
        let surface = swaption_surface();
        let expiry = valuation() + Duration::days(365);
        let vol = surface.volatility(expiry, 10.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(vol, 0.25, epsilon = 1e-14);
        assert_eq!(surface.model(), VolatilityModel::Normal);
    }

    #[test]
    fn test_sensitivity_sums_to_one_inside() {
        let surface = swaption_surface();
        let expiry = valuation() + Duration::days(500);
        let sens = surface.volatility_sensitivity(expiry, 6.0, 0.0, 0.0).unwrap();
        let total: f64 = sens.node_weights.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            sens.value,
            surface.volatility(expiry, 6.0, 0.0, 0.0).unwrap(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_simple_moneyness_axis() {
        let nodal = InterpolatedNodalSurface::new(
            "BOND-FUT",
            &[0.5, 0.5, 2.0, 2.0],
            &[-0.01, 0.01, -0.01, 0.01],
            &[0.010, 0.012, 0.011, 0.013],
            GridInterpolator2D::default(),
        )
        .unwrap();
        let surface = GridVolatilitySurface::new(
            valuation(),
            DayCountConvention::ActualActual365,
            nodal,
            VolatilityAxes::ExpirySimpleMoneyness,
        );
        let expiry = valuation() + Duration::days(365);
        // strike - forward = 0 sits half way between the two moneyness slices
        let vol = surface.volatility(expiry, 0.0, 0.03, 0.03).unwrap();
        let t = 1.0;
        let expected = 0.011 + (t - 0.5) / 1.5 * 0.001;
        assert_relative_eq!(vol, expected, epsilon = 1e-12);

        let err = surface
            .volatility(expiry, 0.0, 0.03, f64::NAN)
            .unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidForward { .. }));
    }

    #[test]
    fn test_with_parameter_keeps_configuration() {
        let surface = swaption_surface();
        let bumped = surface.with_parameter(0, 0.31).unwrap();
        assert_eq!(bumped.parameter(0), Some(0.31));
        assert_eq!(bumped.model(), VolatilityModel::Normal);
        assert_eq!(bumped.axes(), VolatilityAxes::ExpiryTenor);
    }

    #[test]
    fn test_axes_serde_names() {
        let axes: VolatilityAxes = serde::Deserialize::deserialize(
            serde::de::value::StrDeserializer::<serde::de::value::Error>::new(
                "expiry_simple_moneyness",
            ),
        )
        .unwrap();
        assert_eq!(axes, VolatilityAxes::ExpirySimpleMoneyness);
        assert_eq!(axes.to_string(), "ExpirySimpleMoneyness");
    }
}
