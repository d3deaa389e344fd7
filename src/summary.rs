use num_traits::Float;

use crate::{
    Point,
    helper::{count_as, kbn_sum},
};

/// Descriptive statistics of a set of points.
///
/// Built fresh by [`StatisticsSummary::compute`] and never mutated afterwards. Sums
/// are accumulated with Kahan-Babuska-Neumaier compensation and the spreads use a
/// second, centered pass around the already computed means.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatisticsSummary<T> {
    /// Number of points
    pub n: usize,
    /// Mean of `x`
    pub x_mean: T,
    /// Mean of `y`
    pub y_mean: T,
    /// `Σx`
    pub sum_x: T,
    /// `Σy`
    pub sum_y: T,
    /// `Σx²`
    pub sum_x2: T,
    /// `Σy²`
    pub sum_y2: T,
    /// `Σxy`
    pub sum_xy: T,
    /// `Σ(x - x̄)²`
    pub ssx: T,
    /// `Σ(y - ȳ)²`
    pub ssy: T,
    /// Population variance of `x`, `ssx / n`
    pub var_x: T,
    /// Population variance of `y`, `ssy / n`
    pub var_y: T,
    /// Sample variance of `x`, `ssx / (n - 1)`
    pub sample_var_x: T,
    /// Sample variance of `y`, `ssy / (n - 1)`
    pub sample_var_y: T,
}

impl<T> StatisticsSummary<T>
where
    T: Float + Default,
{
    /// Computes the statistics of `points`.
    ///
    /// Fewer than two points carry no spread, so the summary reports only `n` and
    /// leaves every other field zero. Sample variances are therefore never NaN.
    ///
    /// # Arguments
    ///
    /// * `points` - The points to summarize
    ///
    /// # Returns
    ///
    /// * `Self` - The summary
    ///
    /// # Examples
    ///
    /// ```
    /// use regres::{Point, StatisticsSummary};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let points = [
    ///     Point::<f64>::new(1.0, 2.0, 0.0),
    ///     Point::new(2.0, 4.0, 0.0),
    ///     Point::new(3.0, 6.0, 0.0),
    ///     Point::new(4.0, 8.0, 0.0),
    /// ];
    /// let stats = StatisticsSummary::compute(&points);
    ///
    /// assert_eq!(stats.n, 4);
    /// assert_eq!(stats.x_mean, 2.5);
    /// assert_eq!(stats.sum_xy, 60.0);
    /// assert_eq!(stats.ssx, 5.0);
    /// assert_approx_eq!(stats.var_x, 1.25);
    /// assert_approx_eq!(stats.sample_var_y, 20.0 / 3.0);
    /// ```
    pub fn compute(points: &[Point<T>]) -> Self {
        let n = points.len();
        if n < 2 {
            return Self {
                n,
                ..Self::default()
            };
        }

        let sum_x = kbn_sum(points.iter().map(|p| p.x));
        let sum_y = kbn_sum(points.iter().map(|p| p.y));
        let sum_x2 = kbn_sum(points.iter().map(|p| p.x * p.x));
        let sum_y2 = kbn_sum(points.iter().map(|p| p.y * p.y));
        let sum_xy = kbn_sum(points.iter().map(|p| p.x * p.y));

        let n_t = count_as::<T>(n);
        let x_mean = sum_x / n_t;
        let y_mean = sum_y / n_t;

        let ssx = kbn_sum(points.iter().map(|p| (p.x - x_mean).powi(2)));
        let ssy = kbn_sum(points.iter().map(|p| (p.y - y_mean).powi(2)));

        let dof = count_as::<T>(n - 1);

        Self {
            n,
            x_mean,
            y_mean,
            sum_x,
            sum_y,
            sum_x2,
            sum_y2,
            sum_xy,
            ssx,
            ssy,
            var_x: ssx / n_t,
            var_y: ssy / n_t,
            sample_var_x: ssx / dof,
            sample_var_y: ssy / dof,
        }
    }

    /// Population standard deviations of `x` and `y`
    pub fn stddev(&self) -> (T, T) {
        (self.var_x.sqrt(), self.var_y.sqrt())
    }

    /// Sample standard deviations of `x` and `y`
    pub fn sample_stddev(&self) -> (T, T) {
        (self.sample_var_x.sqrt(), self.sample_var_y.sqrt())
    }
}
