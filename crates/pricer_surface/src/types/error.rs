//! Error types for structured error handling.
//!
//! This module provides:
//! - `InterpolationError`: Errors from data bundle construction and interpolation
//! - `SolverError`: Errors from root-finding solvers
//!
//! Market data errors live in [`crate::market_data::MarketDataError`] and wrap
//! both of these.

use num_traits::Float;
use thiserror::Error;

/// Interpolation-related errors.
///
/// Covers malformed input detected while building a data bundle or an
/// interpolator, as well as query-time rejections.
///
/// # Variants
/// - `OutOfBounds`: Query point outside the domain of an exception extrapolator
/// - `InsufficientData`: Not enough data points for the interpolation scheme
/// - `DuplicateKey`: Two nodes share the same key
/// - `DuplicateNode`: Two surface nodes share the same coordinate
/// - `UnsortedKeys`: Keys claimed sorted are not strictly ascending
/// - `NonPositiveValue`: Log-based scheme applied to a non-positive value
/// - `UnknownInterpolator` / `UnknownExtrapolator`: Unrecognised scheme name
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use pricer_surface::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Two nodes share the same key.
    #[error("Duplicate key {key} at index {index}")]
    DuplicateKey {
        /// The repeated key
        key: f64,
        /// Index of the second occurrence
        index: usize,
    },

    /// Two surface nodes share the same `(x, y)` coordinate.
    #[error("Duplicate node at ({x}, {y})")]
    DuplicateNode {
        /// First coordinate
        x: f64,
        /// Second coordinate
        y: f64,
    },

    /// Keys supplied as sorted are not strictly ascending.
    #[error("Keys are not strictly ascending at index {index}")]
    UnsortedKeys {
        /// Index where the ordering violation was detected
        index: usize,
    },

    /// Log-based scheme requires strictly positive values.
    #[error("Non-positive value {value} at index {index}")]
    NonPositiveValue {
        /// The offending value
        value: f64,
        /// Node index of the offending value
        index: usize,
    },

    /// Interpolator name not recognised.
    #[error("Unknown interpolator: {0}")]
    UnknownInterpolator(String),

    /// Extrapolator name not recognised.
    #[error("Unknown extrapolator: {0}")]
    UnknownExtrapolator(String),

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: Objective produced a non-finite value
/// - `InvalidConfig`: Non-positive tolerance or zero iteration budget
///
/// # Examples
/// ```
/// use pricer_surface::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Solver settings rejected before any iteration.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Lossy conversion used to attach generic values to error context.
#[inline]
pub(crate) fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
