//! Volatility surfaces built on the interpolation layer.
//!
//! # Architecture
//!
//! All structures are generic over `T: Float` so that node values may be
//! `f64` or dual numbers. Surfaces are immutable after construction; risk
//! is computed either analytically through
//! [`VolatilitySurface::volatility_sensitivity`] or by bumping nodes via
//! [`ParameterizedSurface::with_parameter`].
//!
//! # Components
//!
//! - [`surfaces`]: Surface trait and implementations
//! - [`error`]: Market data error types ([`MarketDataError`], [`ErrorKind`])
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_surface::market_data::{
//!     GridVolatilitySurface, InterpolatedNodalSurface, VolatilityAxes, VolatilitySurface,
//! };
//! use pricer_surface::math::interpolators::GridInterpolator2D;
//! use pricer_surface::types::DayCountConvention;
//!
//! let nodal = InterpolatedNodalSurface::new(
//!     "CAPLET",
//!     &[1.0_f64, 2.0, 1.0, 2.0],
//!     &[0.02, 0.02, 0.04, 0.04],
//!     &[0.30, 0.28, 0.26, 0.25],
//!     GridInterpolator2D::default(),
//! ).unwrap();
//! let valuation = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let surface = GridVolatilitySurface::new(
//!     valuation,
//!     DayCountConvention::ActualActual365,
//!     nodal,
//!     VolatilityAxes::ExpiryStrike,
//! );
//!
//! let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let vol = surface.volatility(expiry, 0.0, 0.03, 0.03).unwrap();
//! assert!(vol > 0.25 && vol < 0.30);
//! ```

pub mod error;
pub mod surfaces;

pub use error::{ErrorKind, MarketDataError};
pub use surfaces::{
    DeltaSmileSurface, GridVolatilitySurface, InterpolatedNodalSurface, ParameterizedSurface,
    SmileConfig, VolatilityAxes, VolatilityModel, VolatilitySensitivity, VolatilitySurface,
};
