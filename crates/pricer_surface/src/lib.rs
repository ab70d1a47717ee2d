//! # pricer_surface: Interpolation and Volatility Surface Evaluation
//!
//! ## Role
//!
//! pricer_surface is the numerical layer option pricers query for a
//! volatility and its sensitivities:
//! - 1-D interpolation over immutable node bundles (`math::interpolators`)
//! - Extrapolation policies decorating any scheme (`CombinedInterpolator`)
//! - Separable 2-D grid interpolation with node sensitivities
//! - Volatility surfaces keyed by expiry date-time (`market_data::surfaces`)
//! - Delta to strike inversion with Brent's method (`math::solvers`)
//! - Bump-and-reprice risk for validating analytic sensitivities (`risk`)
//! - TOML-driven construction settings (`config`)
//!
//! Every value is immutable once built, so surfaces can be shared across
//! threads without locking.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_surface::math::interpolators::{
//!     CombinedInterpolator, DataBundle, ExtrapolatorKind, Interpolator1D, InterpolatorKind,
//! };
//!
//! let data = DataBundle::new(&[1.0_f64, 2.0, 3.0], &[10.0, 20.0, 40.0]).unwrap();
//! let interp = CombinedInterpolator::new(
//!     InterpolatorKind::Linear,
//!     ExtrapolatorKind::Flat,
//!     ExtrapolatorKind::Linear,
//! );
//!
//! assert_eq!(interp.interpolate(&data, 2.5).unwrap(), 30.0);
//! assert_eq!(interp.interpolate(&data, 0.0).unwrap(), 10.0);
//!
//! let weights = interp.node_sensitivities(&data, 2.5).unwrap();
//! assert_eq!(weights, vec![0.0, 0.5, 0.5]);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): Dual number checks of the analytic derivatives
//! - `parallel` (default): Rayon-parallel finite-difference risk

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod market_data;
pub mod math;
pub mod risk;
pub mod types;
