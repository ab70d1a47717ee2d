//! Root-finding solvers.
//!
//! Delta-quoted smiles are turned into strike-quoted volatilities by
//! solving for the delta whose implied strike matches the query strike.
//! That objective is monotone but has no cheap derivative, so the
//! bracketing [`BrentSolver`] is used.
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Example
//!
//! ```
//! use pricer_surface::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::{BrentFailure, BrentSolver};
pub use config::SolverConfig;
