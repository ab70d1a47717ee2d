//! Immutable ordered node container shared by all 1-D interpolators.

use crate::types::error::to_f64;
use crate::types::InterpolationError;
use num_traits::Float;

/// Ordered `(key, value)` nodes with strictly ascending keys.
///
/// The bundle owns its storage: construction copies the caller's slices so
/// later mutation of those slices cannot affect interpolation results.
/// Every interpolator in [`crate::math::interpolators`] is a stateless
/// strategy evaluated against a `DataBundle`.
///
/// # Invariants
///
/// - `keys.len() == values.len() >= 2`
/// - keys are strictly ascending and never NaN
///
/// # Example
///
/// ```
/// use pricer_surface::math::interpolators::DataBundle;
///
/// let bundle = DataBundle::new(&[2.0, 0.0, 1.0], &[20.0, 0.0, 10.0]).unwrap();
/// assert_eq!(bundle.keys(), &[0.0, 1.0, 2.0]);
/// assert_eq!(bundle.values(), &[0.0, 10.0, 20.0]);
/// assert_eq!(bundle.lower_bound_index(1.5), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataBundle<T: Float> {
    keys: Vec<T>,
    values: Vec<T>,
}

impl<T: Float> DataBundle<T> {
    /// Build a bundle from unsorted nodes.
    ///
    /// Nodes are sorted by key. Duplicate keys are rejected rather than
    /// silently merged.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - length mismatch or NaN key
    /// * `InsufficientData` - fewer than 2 nodes
    /// * `DuplicateKey` - two nodes share a key
    pub fn new(keys: &[T], values: &[T]) -> Result<Self, InterpolationError> {
        validate_shape(keys, values)?;

        let mut pairs: Vec<(T, T)> = keys.iter().copied().zip(values.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        for (index, window) in pairs.windows(2).enumerate() {
            if window[0].0 == window[1].0 {
                return Err(InterpolationError::DuplicateKey {
                    key: to_f64(window[1].0),
                    index: index + 1,
                });
            }
        }

        let (keys, values): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();
        Ok(Self { keys, values })
    }

    /// Build a bundle from nodes the caller claims are already sorted.
    ///
    /// The ordering is still verified; a bundle is never built on an
    /// unchecked promise.
    ///
    /// # Errors
    ///
    /// As [`DataBundle::new`], plus `UnsortedKeys` when a key does not
    /// exceed its predecessor (`DuplicateKey` when it equals it).
    pub fn from_sorted(keys: &[T], values: &[T]) -> Result<Self, InterpolationError> {
        validate_shape(keys, values)?;

        for (index, window) in keys.windows(2).enumerate() {
            if window[1] == window[0] {
                return Err(InterpolationError::DuplicateKey {
                    key: to_f64(window[1]),
                    index: index + 1,
                });
            }
            if window[1] < window[0] {
                return Err(InterpolationError::UnsortedKeys { index: index + 1 });
            }
        }

        Ok(Self {
            keys: keys.to_vec(),
            values: values.to_vec(),
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// Key of node `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= size()`.
    #[inline]
    pub fn key(&self, i: usize) -> T {
        self.keys[i]
    }

    /// Value of node `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= size()`.
    #[inline]
    pub fn value(&self, i: usize) -> T {
        self.values[i]
    }

    /// All keys in ascending order.
    #[inline]
    pub fn keys(&self) -> &[T] {
        &self.keys
    }

    /// All values in key order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Smallest key.
    #[inline]
    pub fn first_key(&self) -> T {
        self.keys[0]
    }

    /// Largest key.
    #[inline]
    pub fn last_key(&self) -> T {
        self.keys[self.keys.len() - 1]
    }

    /// Index of the greatest key `<= x`, clamped to `[0, size() - 1]`.
    ///
    /// Queries below the first key return 0; queries at or beyond the last
    /// key return `size() - 1`.
    #[inline]
    pub fn lower_bound_index(&self, x: T) -> usize {
        // partition_point returns the count of keys <= x
        let pos = self.keys.partition_point(|&k| k <= x);
        pos.saturating_sub(1)
    }

    /// A copy of this bundle with node `index` set to `value`.
    ///
    /// Used to bump a single node when computing sensitivities by finite
    /// differences.
    pub fn with_value(&self, index: usize, value: T) -> Result<Self, InterpolationError> {
        if index >= self.size() {
            return Err(InterpolationError::InvalidInput(format!(
                "node index {} out of range for bundle of size {}",
                index,
                self.size()
            )));
        }
        let mut values = self.values.clone();
        values[index] = value;
        Ok(Self {
            keys: self.keys.clone(),
            values,
        })
    }
}

fn validate_shape<T: Float>(keys: &[T], values: &[T]) -> Result<(), InterpolationError> {
    if keys.len() != values.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "keys and values must have same length: got {} and {}",
            keys.len(),
            values.len()
        )));
    }
    if keys.len() < 2 {
        return Err(InterpolationError::InsufficientData {
            got: keys.len(),
            need: 2,
        });
    }
    if let Some(index) = keys.iter().position(|k| k.is_nan()) {
        return Err(InterpolationError::InvalidInput(format!(
            "key at index {} is NaN",
            index
        )));
    }
    Ok(())
}
