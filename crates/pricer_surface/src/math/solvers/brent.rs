//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::error::to_f64;
use crate::types::SolverError;
use num_traits::Float;
use std::convert::Infallible;

/// Brent's method root finder.
///
/// Combines bisection, secant and inverse quadratic interpolation. Always
/// keeps a sign-changing bracket, so it converges for any continuous
/// function whose values at the bracket ends differ in sign.
///
/// # Example
///
/// ```
/// use pricer_surface::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::MaxIterationsExceeded` - no convergence within budget
    /// * `SolverError::NumericalInstability` - `f` returned a non-finite value
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.try_find_root(|x| Ok::<T, Infallible>(f(x)), a, b)
            .map_err(|e| match e {
                BrentFailure::Solver(e) => e,
                BrentFailure::Objective(never) => match never {},
            })
    }

    /// Find a root of a fallible objective in the bracket `[a, b]`.
    ///
    /// Errors raised by the objective abort the search and are returned
    /// unchanged as [`BrentFailure::Objective`].
    pub fn try_find_root<F, E>(&self, f: F, a: T, b: T) -> Result<T, BrentFailure<E>>
    where
        F: Fn(T) -> Result<T, E>,
    {
        let eval = |x: T| -> Result<T, BrentFailure<E>> {
            let y = f(x).map_err(BrentFailure::Objective)?;
            if y.is_finite() {
                Ok(y)
            } else {
                Err(BrentFailure::Solver(SolverError::NumericalInstability(
                    format!("objective is {} at x = {}", to_f64(y), to_f64(x)),
                )))
            }
        };

        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();
        let half = T::from(0.5).unwrap();

        let mut a = a;
        let mut b = b;
        let mut fa = eval(a)?;
        let mut fb = eval(b)?;

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(BrentFailure::Solver(SolverError::NoBracket {
                a: to_f64(a),
                b: to_f64(b),
            }));
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            // Keep the root bracketed between b and c
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is the best estimate so far
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = two * T::epsilon() * b.abs() + half * self.config.tolerance;
            let m = half * (c - b);
            if m.abs() <= tol || fb == T::zero() {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step
                    (two * m * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();

                let bound = (three * m * q - (tol * q).abs()).min((e * q).abs());
                if two * p < bound {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol {
                b + d
            } else if m > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = eval(b)?;
        }

        Err(BrentFailure::Solver(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        }))
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

/// Failure of [`BrentSolver::try_find_root`].
#[derive(Debug, Clone, PartialEq)]
pub enum BrentFailure<E> {
    /// The search itself failed.
    Solver(SolverError),
    /// The objective returned an error.
    Objective(E),
}
