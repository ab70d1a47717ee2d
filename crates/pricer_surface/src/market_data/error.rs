//! Market data error types.
//!
//! This module provides structured error handling for volatility surface
//! construction and lookup.

use crate::types::{InterpolationError, SolverError};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Broad classification of a [`MarketDataError`].
///
/// Callers that only need to decide between "fix the input", "the query is
/// outside what the surface covers" and "the numerics gave up" can match on
/// this instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input detected at construction or configuration time.
    MalformedInput,
    /// A well-formed query outside the surface's valid domain.
    DomainViolation,
    /// An iterative computation failed to converge.
    NonConvergence,
}

/// Market data operation errors.
///
/// # Variants
///
/// - `ExpiredOption`: Expiry strictly before the valuation date-time
/// - `DeltaOutOfRange`: No delta in the configured bracket reproduces the strike
/// - `InvalidStrike`: Non-positive or non-finite strike where one is required
/// - `InvalidForward`: Non-positive or non-finite forward where one is required
/// - `InvalidTenor`: Non-finite underlying tenor on a tenor-keyed surface
/// - `InvalidDelta`: Call delta outside the open interval (0, 1)
/// - `InvalidSurface`: Surface construction rejected
/// - `Interpolation`: Wrapped interpolation error
/// - `Solver`: Wrapped root-finding error
///
/// # Examples
///
/// ```
/// use pricer_surface::market_data::{ErrorKind, MarketDataError};
///
/// let err = MarketDataError::InvalidStrike { strike: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// assert_eq!(err.kind(), ErrorKind::DomainViolation);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Option expiry is before the valuation date-time.
    #[error("Option expired: expiry {expiry} is before valuation {valuation}")]
    ExpiredOption {
        /// Requested expiry
        expiry: NaiveDateTime,
        /// Surface valuation date-time
        valuation: NaiveDateTime,
    },

    /// Strike cannot be reached by any delta in the bracket.
    #[error(
        "No delta in [{delta_min}, {delta_max}] matches strike {strike} \
         (forward {forward}, expiry {expiry})"
    )]
    DeltaOutOfRange {
        /// Requested strike
        strike: f64,
        /// Forward used for the inversion
        forward: f64,
        /// Time to expiry in years
        expiry: f64,
        /// Lower end of the delta bracket
        delta_min: f64,
        /// Upper end of the delta bracket
        delta_max: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid forward price.
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Invalid underlying tenor.
    #[error("Invalid tenor: {tenor}")]
    InvalidTenor {
        /// The invalid tenor value
        tenor: f64,
    },

    /// Call delta outside (0, 1).
    #[error("Invalid delta: {delta} is outside (0, 1)")]
    InvalidDelta {
        /// The invalid delta value
        delta: f64,
    },

    /// Surface could not be constructed.
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Root-finding error.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

impl MarketDataError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketDataError::ExpiredOption { .. }
            | MarketDataError::DeltaOutOfRange { .. }
            | MarketDataError::InvalidStrike { .. }
            | MarketDataError::InvalidForward { .. }
            | MarketDataError::InvalidTenor { .. }
            | MarketDataError::InvalidDelta { .. } => ErrorKind::DomainViolation,
            MarketDataError::InvalidSurface(_) => ErrorKind::MalformedInput,
            MarketDataError::Interpolation(err) => match err {
                InterpolationError::OutOfBounds { .. }
                | InterpolationError::NonPositiveValue { .. } => ErrorKind::DomainViolation,
                _ => ErrorKind::MalformedInput,
            },
            MarketDataError::Solver(err) => match err {
                SolverError::NoBracket { .. } => ErrorKind::DomainViolation,
                SolverError::InvalidConfig(_) => ErrorKind::MalformedInput,
                SolverError::MaxIterationsExceeded { .. }
                | SolverError::NumericalInstability(_) => ErrorKind::NonConvergence,
            },
        }
    }
}
