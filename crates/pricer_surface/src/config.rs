//! Declarative surface construction settings.
//!
//! A [`SurfaceConfig`] names the interpolation scheme and extrapolation
//! policies of each axis, the day count and the delta solver settings. It
//! is typically read from TOML:
//!
//! ```toml
//! day_count = "ACT/365F"
//! axes = "expiry_strike"
//!
//! [x_axis]
//! interpolator = "Linear"
//! left_extrapolator = "Flat"
//! right_extrapolator = "Linear"
//!
//! [y_axis]
//! interpolator = "NaturalCubicSpline"
//!
//! [solver]
//! tolerance = 1e-12
//! max_iterations = 50
//! ```
//!
//! Names are resolved when the typed objects are built, so an unknown
//! scheme or policy surfaces as an [`InterpolationError`] from
//! [`AxisConfig::build`] rather than as a TOML parse error.

use crate::market_data::surfaces::{
    SmileConfig, VolatilityAxes, DEFAULT_DELTA_MAX, DEFAULT_DELTA_MAX_ITERATIONS,
    DEFAULT_DELTA_MIN, DEFAULT_DELTA_TOLERANCE,
};
use crate::market_data::MarketDataError;
use crate::math::interpolators::{CombinedInterpolator, GridInterpolator2D};
use crate::math::solvers::SolverConfig;
use crate::types::{DayCountConvention, InterpolationError};
use num_traits::Float;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or type error, including unknown day counts.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Unknown interpolator or extrapolator name.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// Inconsistent solver settings.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

/// Interpolation settings of one surface axis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Interpolation scheme name
    pub interpolator: String,
    /// Policy below the first node
    pub left_extrapolator: String,
    /// Policy above the last node
    pub right_extrapolator: String,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            interpolator: "Linear".to_string(),
            left_extrapolator: "Flat".to_string(),
            right_extrapolator: "Flat".to_string(),
        }
    }
}

impl AxisConfig {
    /// Resolve the names into a [`CombinedInterpolator`].
    pub fn build(&self) -> Result<CombinedInterpolator, InterpolationError> {
        CombinedInterpolator::from_names(
            &self.interpolator,
            &self.left_extrapolator,
            &self.right_extrapolator,
        )
    }
}

/// Delta inversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Absolute tolerance on the solved delta
    pub tolerance: f64,
    /// Iteration budget
    pub max_iterations: usize,
    /// Lower end of the delta bracket
    pub delta_min: f64,
    /// Upper end of the delta bracket
    pub delta_max: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_DELTA_TOLERANCE,
            max_iterations: DEFAULT_DELTA_MAX_ITERATIONS,
            delta_min: DEFAULT_DELTA_MIN,
            delta_max: DEFAULT_DELTA_MAX,
        }
    }
}

/// Full surface construction configuration.
///
/// Every field has a default, so an empty document is valid.
///
/// # Example
///
/// ```
/// use pricer_surface::config::SurfaceConfig;
/// use pricer_surface::math::interpolators::InterpolatorKind;
///
/// let config = SurfaceConfig::from_toml_str(r#"
///     day_count = "ACT/360"
///     [y_axis]
///     interpolator = "LogLinear"
/// "#).unwrap();
///
/// let grid = config.grid_interpolator().unwrap();
/// assert_eq!(grid.y_interpolator().interpolator(), InterpolatorKind::LogLinear);
/// assert_eq!(grid.x_interpolator().interpolator(), InterpolatorKind::Linear);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Day count converting expiry dates to year fractions
    pub day_count: DayCountConvention,
    /// Meaning of the surface y axis
    pub axes: VolatilityAxes,
    /// Expiry axis interpolation
    pub x_axis: AxisConfig,
    /// Second axis interpolation
    pub y_axis: AxisConfig,
    /// Delta inversion settings
    pub solver: SolverSettings,
}

impl SurfaceConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        debug!(
            day_count = config.day_count.name(),
            axes = %config.axes,
            x = %config.x_axis.interpolator,
            y = %config.y_axis.interpolator,
            "loaded surface config"
        );
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the configured 2-D interpolator.
    pub fn grid_interpolator(&self) -> Result<GridInterpolator2D, ConfigError> {
        Ok(GridInterpolator2D::new(
            self.x_axis.build()?,
            self.y_axis.build()?,
        ))
    }

    /// Build the delta smile settings.
    ///
    /// # Errors
    ///
    /// `ConfigError::MarketData` for a non-positive tolerance, a zero
    /// iteration budget or an ill-ordered delta bracket.
    pub fn smile_config<T: Float>(&self) -> Result<SmileConfig<T>, ConfigError> {
        let settings = &self.solver;
        let solver = SolverConfig::new(float(settings.tolerance), settings.max_iterations)
            .map_err(MarketDataError::from)?;
        Ok(SmileConfig::new(
            float(settings.delta_min),
            float(settings.delta_max),
            solver,
        )?)
    }
}

fn float<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
