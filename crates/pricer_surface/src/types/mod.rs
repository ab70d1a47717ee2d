//! Core error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for interpolation and solver operations
//! - `time`: Day count conventions for date to year-fraction conversion
//!
//! # Re-exports
//!
//! - [`DayCountConvention`] from `time`
//! - [`InterpolationError`], [`SolverError`] from `error`

pub mod error;
pub mod time;

pub use error::{InterpolationError, SolverError};
pub use time::DayCountConvention;
