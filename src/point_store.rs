use alloc::vec::Vec;
use core::{cmp::Ordering, slice::Iter};

use log::{debug, trace};
use num_traits::Float;
use ordered_float::OrderedFloat;

use crate::{
    Column, DatasetError, LinearRegression, Point, RegressionResult, Result, StatisticsSummary,
};

/// Number of points a new store can hold before its first growth
pub const INITIAL_CAPACITY: usize = 20;

/// An in-place transform applied to every value of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform<T> {
    /// Natural logarithm; every value must be strictly positive
    Log,
    /// Exponential
    Antilog,
    /// Reciprocal; zero values are left untouched
    Invert,
    /// Multiplication by a constant factor
    Scale(T),
}

impl<T: Float> Transform<T> {
    #[inline]
    fn apply(&self, v: T) -> T {
        match *self {
            Self::Log => v.ln(),
            Self::Antilog => v.exp(),
            Self::Invert if v.is_zero() => v,
            Self::Invert => v.recip(),
            Self::Scale(factor) => v * factor,
        }
    }
}

/// Per-column extremes of a store, as `(min, max)` pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    /// Smallest and largest `x`
    pub x: (T, T),
    /// Smallest and largest `y`
    pub y: (T, T),
}

/// An ordered, growable collection of measurement points.
///
/// Points keep their insertion order and are never reordered. Every mutation sets
/// the `modified` flag; the persistence layer clears it with
/// [`PointStore::mark_persisted`] once the content is safely stored.
///
/// Reads performed by the engines ([`PointStore::summary`], [`PointStore::fit`])
/// borrow the store immutably, so no transform can be observed half applied.
#[derive(Debug, Clone)]
pub struct PointStore<T> {
    /// Points in insertion order
    points: Vec<Point<T>>,
    /// Whether the content changed since it was last persisted
    modified: bool,
}

impl<T: Float + Default> Default for PointStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PointStore<T>
where
    T: Float + Default,
{
    /// Creates an empty store with room for [`INITIAL_CAPACITY`] points.
    ///
    /// # Returns
    ///
    /// * `Self` - The empty, unmodified store
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty store with room for `capacity` points before it grows.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The initial capacity
    ///
    /// # Returns
    ///
    /// * `Self` - The empty, unmodified store
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            modified: false,
        }
    }

    /// Returns the number of points in the store
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the store holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of points the store can hold before it has to grow
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Returns `true` if the store changed since it was last persisted
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Acknowledges that the current content has been persisted
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The store
    pub const fn mark_persisted(&mut self) -> &mut Self {
        self.modified = false;
        self
    }

    /// Returns the points as a slice, in insertion order
    pub fn as_slice(&self) -> &[Point<T>] {
        &self.points
    }

    /// Returns an iterator over the points, in insertion order
    pub fn iter(&self) -> Iter<'_, Point<T>> {
        self.points.iter()
    }

    /// Returns the point at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Point<T>> {
        self.points.get(index)
    }

    /// Removes every point, keeping the allocated storage
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The store
    pub fn clear(&mut self) -> &mut Self {
        if !self.points.is_empty() {
            self.points.clear();
            self.modified = true;
        }
        self
    }

    /// Appends a point at the end of the store.
    ///
    /// When the store is full its capacity doubles, so appends are amortized O(1).
    /// If the storage cannot grow the call fails and the store is left exactly as it
    /// was.
    ///
    /// # Arguments
    ///
    /// * `x` - The abscissa
    /// * `y` - The ordinate
    /// * `ey` - The uncertainty of `y`, `0` when unknown
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The store, or [`DatasetError::Allocation`]
    ///
    /// # Examples
    ///
    /// ```
    /// use regres::PointStore;
    ///
    /// let mut store = PointStore::new();
    /// store.append(1.0, 1.0, 0.0)?.append(2.0, 2.0, 0.0)?;
    ///
    /// assert_eq!(store.len(), 2);
    /// assert!(store.is_modified());
    /// # Ok::<(), regres::DatasetError>(())
    /// ```
    pub fn append(&mut self, x: T, y: T, ey: T) -> Result<&mut Self> {
        self.push(Point::new(x, y, ey))
    }

    /// Appends an already built point; see [`PointStore::append`].
    pub fn push(&mut self, point: Point<T>) -> Result<&mut Self> {
        let len = self.points.len();
        if len == self.points.capacity() {
            let additional = len.max(1);
            self.points
                .try_reserve_exact(additional)
                .map_err(|_| DatasetError::Allocation {
                    requested: len + additional,
                })?;
            trace!("point storage grown to {}", self.points.capacity());
        }

        self.points.push(point);
        self.modified = true;
        Ok(self)
    }

    /// Applies `transform` to every value of `column`.
    ///
    /// The transform is all-or-nothing: a logarithm over a column holding any
    /// non-positive value is rejected before a single point is touched.
    ///
    /// # Arguments
    ///
    /// * `column` - The column to transform
    /// * `transform` - The transform to apply
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The store, or [`DatasetError::LogDomain`]
    ///
    /// # Examples
    ///
    /// ```
    /// use regres::{Column, PointStore, Transform};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let mut store = PointStore::new();
    /// for y in [1.0, 1.0_f64.exp(), 2.0_f64.exp()] {
    ///     store.append(0.0, y, 0.0)?;
    /// }
    ///
    /// store.transform(Column::Y, Transform::Log)?;
    ///
    /// for (p, e) in store.iter().zip([0.0, 1.0, 2.0]) {
    ///     assert_approx_eq!(p.y, e, 1e-12);
    /// }
    ///
    /// store.append(0.0, -1.0, 0.0)?;
    /// assert!(store.transform(Column::Y, Transform::Log).is_err());
    /// # Ok::<(), regres::DatasetError>(())
    /// ```
    pub fn transform(&mut self, column: Column, transform: Transform<T>) -> Result<&mut Self> {
        let out_of_domain = |p: &&Point<T>| {
            matches!(transform, Transform::Log)
                && p.get(column).partial_cmp(&T::zero()) != Some(Ordering::Greater)
        };
        if let Some((index, p)) = self.points.iter().enumerate().find(|(_, p)| out_of_domain(p)) {
            let value = p.get(column).to_f64().unwrap_or(f64::NAN);
            debug!("log transform rejected: point {index} holds {value} in column {column:?}");
            return Err(DatasetError::LogDomain {
                column,
                index,
                value,
            });
        }

        self.points.iter_mut().for_each(|p| {
            let v = p.get_mut(column);
            *v = transform.apply(*v);
        });
        self.modified = true;
        trace!("transformed column {column:?} of {} points", self.points.len());
        Ok(self)
    }

    /// Returns the smallest and largest value of each column, or `None` when the
    /// store is empty.
    ///
    /// NaN values order above every other value.
    ///
    /// # Examples
    ///
    /// ```
    /// use regres::PointStore;
    ///
    /// let mut store = PointStore::new();
    /// store.append(3.0, -1.0, 0.0)?.append(-2.0, 4.0, 0.0)?;
    ///
    /// let bounds = store.bounds().unwrap();
    /// assert_eq!(bounds.x, (-2.0, 3.0));
    /// assert_eq!(bounds.y, (-1.0, 4.0));
    /// # Ok::<(), regres::DatasetError>(())
    /// ```
    pub fn bounds(&self) -> Option<Bounds<T>>
    where
        OrderedFloat<T>: Ord,
    {
        let column = |c: Column| {
            let min = self.points.iter().map(|p| OrderedFloat(p.get(c))).min()?;
            let max = self.points.iter().map(|p| OrderedFloat(p.get(c))).max()?;
            Some((min.0, max.0))
        };
        Some(Bounds {
            x: column(Column::X)?,
            y: column(Column::Y)?,
        })
    }

    /// Computes the descriptive statistics of the current content
    ///
    /// # Returns
    ///
    /// * `StatisticsSummary<T>` - The summary; see [`StatisticsSummary::compute`]
    pub fn summary(&self) -> StatisticsSummary<T> {
        StatisticsSummary::compute(&self.points)
    }

    /// Fits `y = a + b·x` with the default [`LinearRegression`] configuration
    ///
    /// # Returns
    ///
    /// * `RegressionResult<T>` - The fit; see [`LinearRegression::fit`]
    pub fn fit(&self) -> RegressionResult<T> {
        LinearRegression::new().fit(&self.points)
    }
}

impl<'a, T> IntoIterator for &'a PointStore<T> {
    type Item = &'a Point<T>;
    type IntoIter = Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, INITIAL_CAPACITY, PointStore, Transform};
    use crate::{DatasetError, Point};
    use alloc::vec::Vec;
    use assert_approx_eq::assert_approx_eq;

    fn store_of(points: &[(f64, f64, f64)]) -> PointStore<f64> {
        let mut store = PointStore::new();
        for &(x, y, ey) in points {
            store.append(x, y, ey).unwrap();
        }
        store
    }

    #[test]
    fn test_new_is_empty() {
        let store: PointStore<f64> = PointStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(!store.is_modified());
        assert!(store.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn test_append_keeps_order() {
        let store = store_of(&[(1.0, 1.0, 0.0), (2.0, 2.0, 0.0), (3.0, 3.0, 0.0)]);
        assert_eq!(store.len(), 3);
        assert!(store.is_modified());

        let points: Vec<_> = store.iter().copied().collect();
        assert_eq!(
            points,
            [
                Point::new(1.0, 1.0, 0.0),
                Point::new(2.0, 2.0, 0.0),
                Point::new(3.0, 3.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_growth_preserves_points() {
        let mut store = PointStore::with_capacity(2);
        for i in 0..50 {
            let v = i as f64;
            store.append(v, 2.0 * v, 0.5).unwrap();
        }

        assert_eq!(store.len(), 50);
        assert!(store.capacity() >= 50);
        for (i, p) in store.iter().enumerate() {
            let v = i as f64;
            assert_eq!(*p, Point::new(v, 2.0 * v, 0.5));
        }
    }

    #[test]
    fn test_growth_from_zero_capacity() {
        let mut store = PointStore::with_capacity(0);
        store.append(1.0, 2.0, 0.0).unwrap();
        assert_eq!(store.get(0), Some(&Point::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_mark_persisted() {
        let mut store = store_of(&[(1.0, 1.0, 0.0)]);
        assert!(store.is_modified());
        store.mark_persisted();
        assert!(!store.is_modified());

        store.transform(Column::X, Transform::Scale(2.0)).unwrap();
        assert!(store.is_modified());
    }

    #[test]
    fn test_log_transform() {
        let e = 1.0_f64.exp();
        let mut store = store_of(&[(1.0, 1.0, 0.1), (2.0, e, 0.1), (3.0, e * e, 0.1)]);
        store.transform(Column::Y, Transform::Log).unwrap();

        let ys: Vec<_> = store.iter().map(|p| p.y).collect();
        for (y, e) in ys.iter().zip([0.0, 1.0, 2.0]) {
            assert_approx_eq!(*y, e, 1e-12);
        }
        // the other column and the errors are untouched
        let xs: Vec<_> = store.iter().map(|p| (p.x, p.ey)).collect();
        assert_eq!(xs, [(1.0, 0.1), (2.0, 0.1), (3.0, 0.1)]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_log_domain_error_is_atomic() {
        let mut store = store_of(&[(1.0, 0.0, 0.0), (2.0, 0.0, 0.0), (-3.0, 0.0, 0.0)]);
        store.mark_persisted();

        let err = store.transform(Column::X, Transform::Log).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::LogDomain {
                column: Column::X,
                index: 2,
                value
            } if value == -3.0
        ));

        let xs: Vec<_> = store.iter().map(|p| p.x).collect();
        assert_eq!(xs, [1.0, 2.0, -3.0]);
        assert!(!store.is_modified());
    }

    #[test]
    fn test_log_rejects_zero_and_nan() {
        let mut store = store_of(&[(0.0, 1.0, 0.0)]);
        assert!(store.transform(Column::X, Transform::Log).is_err());

        let mut store = store_of(&[(f64::NAN, 1.0, 0.0)]);
        assert!(store.transform(Column::X, Transform::Log).is_err());
    }

    #[test]
    fn test_antilog_transform() {
        let mut store = store_of(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        store.transform(Column::X, Transform::Antilog).unwrap();
        assert_approx_eq!(store.as_slice()[0].x, 1.0, 1e-12);
        assert_approx_eq!(store.as_slice()[1].x, 1.0_f64.exp(), 1e-12);
    }

    #[test]
    fn test_invert_skips_zero() {
        let mut store = store_of(&[(0.0, 1.0, 0.0), (4.0, 2.0, 0.0), (-0.5, 3.0, 0.0)]);
        store.transform(Column::X, Transform::Invert).unwrap();

        let xs: Vec<_> = store.iter().map(|p| p.x).collect();
        assert_eq!(xs, [0.0, 0.25, -2.0]);
    }

    #[test]
    fn test_scale_transform() {
        let mut store = store_of(&[(1.0, 1.0, 0.0), (2.0, -3.0, 0.0)]);
        store.transform(Column::Y, Transform::Scale(-2.0)).unwrap();

        let ys: Vec<_> = store.iter().map(|p| p.y).collect();
        assert_eq!(ys, [-2.0, 6.0]);
    }

    #[test]
    fn test_clear() {
        let mut store = store_of(&[(1.0, 1.0, 0.0)]);
        store.mark_persisted().clear();
        assert!(store.is_empty());
        assert!(store.is_modified());
    }

    #[test]
    fn test_bounds() {
        let store: PointStore<f64> = PointStore::new();
        assert!(store.bounds().is_none());

        let store = store_of(&[(1.0, 5.0, 0.0), (-4.0, 2.0, 0.0), (3.0, 9.0, 0.0)]);
        let bounds = store.bounds().unwrap();
        assert_eq!(bounds.x, (-4.0, 3.0));
        assert_eq!(bounds.y, (2.0, 9.0));
    }
}
