//! Numerical building blocks.
//!
//! - [`interpolators`]: 1-D schemes, extrapolation policies and the 2-D grid
//! - [`solvers`]: Bracketing root finder used for delta inversion
//! - [`distributions`]: Standard normal pdf, cdf and inverse cdf

pub mod distributions;
pub mod interpolators;
pub mod solvers;
