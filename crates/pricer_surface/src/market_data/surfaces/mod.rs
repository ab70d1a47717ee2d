//! Volatility surface abstractions for option pricing.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Expiry-date-time based volatility lookup trait
//! - [`ParameterizedSurface`]: Node access used for bump-and-reprice risk
//! - [`InterpolatedNodalSurface`]: Named surface over interpolated nodes
//! - [`GridVolatilitySurface`]: Expiry × tenor / strike / moneyness surface
//! - [`DeltaSmileSurface`]: Expiry × call delta smile queried by strike

mod delta_smile;
mod grid_vol;
mod nodal;
mod traits;

pub use delta_smile::{
    DeltaSmileSurface, SmileConfig, DEFAULT_DELTA_MAX, DEFAULT_DELTA_MAX_ITERATIONS,
    DEFAULT_DELTA_MIN, DEFAULT_DELTA_TOLERANCE,
};
pub use grid_vol::{GridVolatilitySurface, VolatilityAxes, VolatilityModel};
pub use nodal::InterpolatedNodalSurface;
pub use traits::{ParameterizedSurface, VolatilitySensitivity, VolatilitySurface};
