//! Interpolation methods for market data evaluation.
//!
//! Interpolators are stateless strategies applied to an immutable
//! [`DataBundle`]; they return values, first derivatives and node
//! sensitivities, all generic over `T: num_traits::Float`.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear, flat at and beyond the last node
//! - [`LogLinearInterpolator`]: Piecewise linear in `ln y`
//! - [`NaturalCubicSplineInterpolator`]: Natural cubic spline with C² continuity
//! - [`StepInterpolator`]: Piecewise constant
//!
//! [`InterpolatorKind`] selects one of these by name. [`CombinedInterpolator`]
//! decorates a scheme with left and right [`ExtrapolatorKind`] policies, and
//! [`GridInterpolator2D`] composes two of those over [`GridData`].
//!
//! ## AD Compatibility
//!
//! All schemes work with `num_dual::Dual64`, which is how the analytic
//! derivatives and sensitivities are cross-checked in the test suite.
//!
//! ## Example
//!
//! ```
//! use pricer_surface::math::interpolators::{
//!     CombinedInterpolator, DataBundle, Interpolator1D,
//! };
//!
//! let data = DataBundle::<f64>::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! let interp = CombinedInterpolator::from_names("Linear", "Linear", "Flat").unwrap();
//!
//! let y = interp.interpolate(&data, 1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! assert!((interp.interpolate(&data, -1.0).unwrap() + 1.0).abs() < 1e-10);
//! assert_eq!(interp.interpolate(&data, 5.0).unwrap(), 9.0);
//! ```

mod bundle;
mod combined;
mod extrapolator;
mod grid;
mod kind;
mod linear;
mod log_linear;
mod natural_cubic_spline;
mod step;
mod traits;


// Re-export public types at module level
pub use bundle::DataBundle;
pub use combined::CombinedInterpolator;
pub use extrapolator::{ExtrapolatorKind, Side};
pub use grid::{GridData, GridInterpolator2D};
pub use kind::InterpolatorKind;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;
pub use natural_cubic_spline::NaturalCubicSplineInterpolator;
pub use step::StepInterpolator;
pub use traits::Interpolator1D;
