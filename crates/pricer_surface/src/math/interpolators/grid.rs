//! Two-dimensional interpolation on scattered grid nodes.
//!
//! A [`GridData`] groups surface nodes into slices of constant `y`. The
//! [`GridInterpolator2D`] interpolates along `x` within every slice, then
//! along `y` across the slice results. Derivatives follow by the chain rule
//! and node sensitivities are the outer product of the `y` weights with the
//! per-slice `x` weights.

use super::{CombinedInterpolator, DataBundle, ExtrapolatorKind, Interpolator1D};
use crate::types::error::to_f64;
use crate::types::InterpolationError;
use num_traits::Float;

/// Surface nodes `(x_i, y_i, z_i)` grouped into slices of constant `y`.
///
/// The caller's node order is kept and defines the parameter order used by
/// node sensitivities. Slices need not share the same `x` keys.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::GridData;
///
/// let grid = GridData::new(
///     &[1.0, 2.0, 1.0, 2.0],
///     &[0.0, 0.0, 1.0, 1.0],
///     &[0.1, 0.2, 0.3, 0.4],
/// ).unwrap();
/// assert_eq!(grid.size(), 4);
/// assert_eq!(grid.y_keys(), &[0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridData<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    zs: Vec<T>,
    /// Distinct y values, ascending
    y_keys: Vec<T>,
    /// Node indices of each y slice, ascending in x
    slices: Vec<Vec<usize>>,
}

impl<T: Float> GridData<T> {
    /// Build grid data from parallel coordinate and value slices.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - length mismatch or NaN coordinate
    /// * `DuplicateNode` - repeated `(x, y)` pair
    /// * `InsufficientData` - fewer than 2 distinct values on either axis
    pub fn new(xs: &[T], ys: &[T], zs: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() || xs.len() != zs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs, ys and zs must have same length: got {}, {} and {}",
                xs.len(),
                ys.len(),
                zs.len()
            )));
        }
        if let Some(index) = (0..xs.len()).find(|&i| xs[i].is_nan() || ys[i].is_nan()) {
            return Err(InterpolationError::InvalidInput(format!(
                "node {} has a NaN coordinate",
                index
            )));
        }

        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| {
            ys[a]
                .partial_cmp(&ys[b])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(xs[a].partial_cmp(&xs[b]).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut y_keys: Vec<T> = Vec::new();
        let mut slices: Vec<Vec<usize>> = Vec::new();
        for &i in &order {
            let same_slice = y_keys.last().is_some_and(|&y| y == ys[i]);
            match slices.last_mut() {
                Some(slice) if same_slice => {
                    if slice.last().is_some_and(|&prev| xs[prev] == xs[i]) {
                        return Err(InterpolationError::DuplicateNode {
                            x: to_f64(xs[i]),
                            y: to_f64(ys[i]),
                        });
                    }
                    slice.push(i);
                }
                _ => {
                    y_keys.push(ys[i]);
                    slices.push(vec![i]);
                }
            }
        }

        let mut x_keys = xs.to_vec();
        x_keys.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        x_keys.dedup();
        let distinct = x_keys.len().min(y_keys.len());
        if distinct < 2 {
            return Err(InterpolationError::InsufficientData {
                got: distinct,
                need: 2,
            });
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.to_vec(),
            y_keys,
            slices,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.zs.len()
    }

    /// Node x coordinates in caller order.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Node y coordinates in caller order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Node values in caller order.
    #[inline]
    pub fn zs(&self) -> &[T] {
        &self.zs
    }

    /// Distinct y coordinates, ascending.
    #[inline]
    pub fn y_keys(&self) -> &[T] {
        &self.y_keys
    }

    /// A copy of the grid with node `index` set to `z`.
    pub fn with_z(&self, index: usize, z: T) -> Result<Self, InterpolationError> {
        if index >= self.size() {
            return Err(InterpolationError::InvalidInput(format!(
                "node index {} out of range for grid of size {}",
                index,
                self.size()
            )));
        }
        let mut grid = self.clone();
        grid.zs[index] = z;
        Ok(grid)
    }

    /// Bundle of slice `j` along x, or `None` for a single-node slice.
    fn slice_bundle(&self, j: usize) -> Result<Option<DataBundle<T>>, InterpolationError> {
        let slice = &self.slices[j];
        if slice.len() < 2 {
            return Ok(None);
        }
        let keys: Vec<T> = slice.iter().map(|&i| self.xs[i]).collect();
        let values: Vec<T> = slice.iter().map(|&i| self.zs[i]).collect();
        DataBundle::from_sorted(&keys, &values).map(Some)
    }
}

/// Result of interpolating one y slice along x.
struct SliceEvaluation<T> {
    value: T,
    x_derivative: T,
    /// Sensitivities to the slice's nodes, in slice order
    sensitivities: Vec<T>,
}

/// Separable 2-D interpolator: x within each slice, then y across slices.
///
/// Both axes use a [`CombinedInterpolator`], so each carries its own
/// extrapolation policies. With local schemes only the slices bracketing the
/// query receive weight; a global scheme such as the natural spline on the
/// y axis sees every slice.
///
/// A slice holding a single node is constant in x. Away from that node only
/// the `Exception` policy still applies; every other policy reduces to the
/// node value.
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::{GridData, GridInterpolator2D};
///
/// let grid = GridData::<f64>::new(
///     &[0.0, 1.0, 0.0, 1.0],
///     &[0.0, 0.0, 1.0, 1.0],
///     &[0.0, 1.0, 2.0, 3.0],
/// ).unwrap();
/// let interp = GridInterpolator2D::default();
///
/// let z = interp.interpolate(&grid, 0.5, 0.5).unwrap();
/// assert!((z - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridInterpolator2D {
    x_interpolator: CombinedInterpolator,
    y_interpolator: CombinedInterpolator,
}

impl GridInterpolator2D {
    /// Combine an x-axis and a y-axis interpolator.
    pub fn new(x_interpolator: CombinedInterpolator, y_interpolator: CombinedInterpolator) -> Self {
        Self {
            x_interpolator,
            y_interpolator,
        }
    }

    /// Interpolator applied along x within each slice.
    pub fn x_interpolator(&self) -> CombinedInterpolator {
        self.x_interpolator
    }

    /// Interpolator applied along y across slices.
    pub fn y_interpolator(&self) -> CombinedInterpolator {
        self.y_interpolator
    }

    /// Check that `data` has enough nodes for both axis schemes.
    ///
    /// Every slice with more than one node must satisfy the x scheme's
    /// minimum, and the number of slices the y scheme's minimum.
    ///
    /// # Errors
    ///
    /// `InsufficientData` naming the first undersized axis.
    pub fn check_data<T: Float>(&self, data: &GridData<T>) -> Result<(), InterpolationError> {
        let need_x = Interpolator1D::<T>::min_points(&self.x_interpolator);
        if let Some(slice) = data
            .slices
            .iter()
            .find(|slice| slice.len() > 1 && slice.len() < need_x)
        {
            return Err(InterpolationError::InsufficientData {
                got: slice.len(),
                need: need_x,
            });
        }
        let need_y = Interpolator1D::<T>::min_points(&self.y_interpolator);
        if data.y_keys.len() < need_y {
            return Err(InterpolationError::InsufficientData {
                got: data.y_keys.len(),
                need: need_y,
            });
        }
        Ok(())
    }

    /// Interpolated value at `(x, y)`.
    pub fn interpolate<T: Float>(
        &self,
        data: &GridData<T>,
        x: T,
        y: T,
    ) -> Result<T, InterpolationError> {
        let values = self.slice_values(data, x)?;
        let bundle = DataBundle::from_sorted(data.y_keys(), &values)?;
        self.y_interpolator.interpolate(&bundle, y)
    }

    /// Partial derivatives `(dz/dx, dz/dy)` at `(x, y)`.
    pub fn first_partial_derivatives<T: Float>(
        &self,
        data: &GridData<T>,
        x: T,
        y: T,
    ) -> Result<(T, T), InterpolationError> {
        let slices = self.evaluate_slices(data, x)?;
        let values: Vec<T> = slices.iter().map(|s| s.value).collect();
        let bundle = DataBundle::from_sorted(data.y_keys(), &values)?;

        let y_weights = self.y_interpolator.node_sensitivities(&bundle, y)?;
        let dz_dx = y_weights
            .iter()
            .zip(&slices)
            .fold(T::zero(), |acc, (&w, s)| acc + w * s.x_derivative);
        let dz_dy = self.y_interpolator.first_derivative(&bundle, y)?;
        Ok((dz_dx, dz_dy))
    }

    /// Sensitivities of the value at `(x, y)` to every node, in node order.
    pub fn node_sensitivities<T: Float>(
        &self,
        data: &GridData<T>,
        x: T,
        y: T,
    ) -> Result<Vec<T>, InterpolationError> {
        let slices = self.evaluate_slices(data, x)?;
        let values: Vec<T> = slices.iter().map(|s| s.value).collect();
        let bundle = DataBundle::from_sorted(data.y_keys(), &values)?;
        let y_weights = self.y_interpolator.node_sensitivities(&bundle, y)?;
        Ok(Self::scatter(data, &slices, &y_weights))
    }

    /// Value, partial derivatives and node sensitivities in one pass.
    ///
    /// Returns `(z, (dz/dx, dz/dy), sensitivities)`.
    pub fn evaluate<T: Float>(
        &self,
        data: &GridData<T>,
        x: T,
        y: T,
    ) -> Result<(T, (T, T), Vec<T>), InterpolationError> {
        let slices = self.evaluate_slices(data, x)?;
        let values: Vec<T> = slices.iter().map(|s| s.value).collect();
        let bundle = DataBundle::from_sorted(data.y_keys(), &values)?;

        let z = self.y_interpolator.interpolate(&bundle, y)?;
        let y_weights = self.y_interpolator.node_sensitivities(&bundle, y)?;
        let dz_dx = y_weights
            .iter()
            .zip(&slices)
            .fold(T::zero(), |acc, (&w, s)| acc + w * s.x_derivative);
        let dz_dy = self.y_interpolator.first_derivative(&bundle, y)?;
        Ok((z, (dz_dx, dz_dy), Self::scatter(data, &slices, &y_weights)))
    }

    fn scatter<T: Float>(
        data: &GridData<T>,
        slices: &[SliceEvaluation<T>],
        y_weights: &[T],
    ) -> Vec<T> {
        let mut result = vec![T::zero(); data.size()];
        for (j, (slice, &wy)) in slices.iter().zip(y_weights).enumerate() {
            for (&node, &wx) in data.slices[j].iter().zip(&slice.sensitivities) {
                result[node] = wy * wx;
            }
        }
        result
    }

    fn slice_values<T: Float>(
        &self,
        data: &GridData<T>,
        x: T,
    ) -> Result<Vec<T>, InterpolationError> {
        (0..data.y_keys.len())
            .map(|j| match data.slice_bundle(j)? {
                Some(bundle) => self.x_interpolator.interpolate(&bundle, x),
                None => self.single_node_value(data, j, x),
            })
            .collect()
    }

    /// Value of single-node slice `j` at `x`, honouring `Exception` tails.
    fn single_node_value<T: Float>(
        &self,
        data: &GridData<T>,
        j: usize,
        x: T,
    ) -> Result<T, InterpolationError> {
        let node = data.slices[j][0];
        let x0 = data.xs[node];
        let policy = if x < x0 {
            Some(self.x_interpolator.left_extrapolator())
        } else if x > x0 {
            Some(self.x_interpolator.right_extrapolator())
        } else {
            None
        };
        match policy {
            Some(ExtrapolatorKind::Exception) => Err(InterpolationError::OutOfBounds {
                x: to_f64(x),
                min: to_f64(x0),
                max: to_f64(x0),
            }),
            _ => Ok(data.zs[node]),
        }
    }

    fn evaluate_slices<T: Float>(
        &self,
        data: &GridData<T>,
        x: T,
    ) -> Result<Vec<SliceEvaluation<T>>, InterpolationError> {
        (0..data.y_keys.len())
            .map(|j| match data.slice_bundle(j)? {
                Some(bundle) => Ok(SliceEvaluation {
                    value: self.x_interpolator.interpolate(&bundle, x)?,
                    x_derivative: self.x_interpolator.first_derivative(&bundle, x)?,
                    sensitivities: self.x_interpolator.node_sensitivities(&bundle, x)?,
                }),
                None => Ok(SliceEvaluation {
                    value: self.single_node_value(data, j, x)?,
                    x_derivative: T::zero(),
                    sensitivities: vec![T::one()],
                }),
            })
            .collect()
    }
}
