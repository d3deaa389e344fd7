use log::debug;
use num_traits::Float;

use crate::{
    Kbn, Point,
    helper::{count_as, kbn_sum, ratio_or_zero},
};

mod normal_sums;
use normal_sums::{NormalSums, inverse_variance};

mod result;
pub use result::RegressionResult;

/// How points are weighted in the fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Weighted least squares as soon as any point has `ey > 0`.
    ///
    /// The decision covers the whole data set: points without an uncertainty then
    /// get a zero weight and stop influencing the fit, although they are still
    /// counted in the degrees of freedom.
    #[default]
    Auto,
    /// Ordinary least squares; `ey` is ignored
    Unweighted,
}

/// Result reported when the normal-equations determinant is exactly zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Degenerate {
    /// Every field zero, intercept included
    #[default]
    Zeroed,
    /// `a` set to the (weighted) mean of `y`; every other field zero
    MeanIntercept,
}

/// Linear least-squares fit of `y = a + b·x`, weighted by `1/ey²` when the data
/// carries uncertainties.
///
/// The fit never fails and never returns NaN or infinities for degenerate input:
///
/// - fewer than two points yields an all-zero result;
/// - no spread in `x` (zero determinant) yields the [`Degenerate`] result;
/// - a zero spread in `y` reports `r = 0`.
///
/// Besides the statistical standard errors `sa`, `sb` (scaled by the reduced
/// chi-square), the fit reports `ea`, `eb`: the per-point `y` uncertainties linearly
/// propagated through the closed-form solution. Unweighted fits have no per-point
/// uncertainty, so `√s²` is used for every point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearRegression {
    /// Weight selection policy
    weighting: Weighting,
    /// Result of a zero-determinant fit
    degenerate: Degenerate,
}

impl LinearRegression {
    /// Creates a fit with automatic weighting and zeroed degenerate results
    ///
    /// # Returns
    ///
    /// * `Self` - The regression configuration
    pub const fn new() -> Self {
        Self {
            weighting: Weighting::Auto,
            degenerate: Degenerate::Zeroed,
        }
    }

    /// Returns the weighting policy
    pub const fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Sets the weighting policy
    ///
    /// # Arguments
    ///
    /// * `weighting` - The weighting policy
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The regression configuration
    pub const fn set_weighting(&mut self, weighting: Weighting) -> &mut Self {
        self.weighting = weighting;
        self
    }

    /// Returns the degenerate-result policy
    pub const fn degenerate(&self) -> Degenerate {
        self.degenerate
    }

    /// Sets the result reported when `x` has no spread
    ///
    /// # Arguments
    ///
    /// * `degenerate` - The degenerate-result policy
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The regression configuration
    pub const fn set_degenerate(&mut self, degenerate: Degenerate) -> &mut Self {
        self.degenerate = degenerate;
        self
    }

    /// Fits a straight line through `points`.
    ///
    /// # Arguments
    ///
    /// * `points` - The measurements to fit
    ///
    /// # Returns
    ///
    /// * `RegressionResult<T>` - The fitted line with its errors and correlation
    ///
    /// # Examples
    ///
    /// ```
    /// use regres::{LinearRegression, Point};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let points = [
    ///     Point::<f64>::new(0.0, 2.0, 0.0),
    ///     Point::new(1.0, 5.0, 0.0),
    ///     Point::new(2.0, 8.0, 0.0),
    ///     Point::new(3.0, 11.0, 0.0),
    /// ];
    /// let fit = LinearRegression::new().fit(&points);
    ///
    /// assert_approx_eq!(fit.a, 2.0);
    /// assert_approx_eq!(fit.b, 3.0);
    /// assert_approx_eq!(fit.r, 1.0);
    /// assert_approx_eq!(fit.sa, 0.0);
    /// assert_approx_eq!(fit.sb, 0.0);
    /// assert!(!fit.weighted);
    /// ```
    ///
    /// A single uncertainty switches the whole fit to weighted mode:
    ///
    /// ```
    /// use regres::{LinearRegression, Point};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let points = [
    ///     Point::<f64>::new(0.0, 1.0, 0.5),
    ///     Point::new(1.0, 3.0, 0.5),
    ///     Point::new(2.0, 100.0, 0.0),
    /// ];
    /// let fit = LinearRegression::new().fit(&points);
    ///
    /// assert!(fit.weighted);
    /// assert_approx_eq!(fit.a, 1.0);
    /// assert_approx_eq!(fit.b, 2.0);
    /// ```
    pub fn fit<T>(&self, points: &[Point<T>]) -> RegressionResult<T>
    where
        T: Float + Default,
    {
        let n = points.len();
        if n < 2 {
            return RegressionResult::default();
        }

        let weighted = match self.weighting {
            Weighting::Auto => points.iter().any(Point::has_error),
            Weighting::Unweighted => false,
        };
        let weight = |p: &Point<T>| {
            if weighted {
                inverse_variance(p)
            } else {
                T::one()
            }
        };
        debug!(
            "fitting {n} points, {}",
            if weighted { "weighted" } else { "unweighted" }
        );

        let sums = NormalSums::accumulate(points, weight);
        let delta = sums.determinant();
        if delta.is_zero() || !delta.is_finite() {
            let delta = delta.to_f64().unwrap_or(f64::NAN);
            debug!("degenerate fit: normal-equations determinant is {delta:?}");
            return self.degenerate_result(&sums, weighted);
        }

        let (a, b) = sums.solve(delta);
        if !(a.is_finite() && b.is_finite()) {
            debug!("degenerate fit: solution overflowed");
            return self.degenerate_result(&sums, weighted);
        }
        let residual = |p: &Point<T>| p.y - (a + b * p.x);
        let dof = (n > 2).then(|| count_as::<T>(n - 2));

        let (sa, sb, ea, eb) = if weighted {
            let chisq = kbn_sum(points.iter().map(|p| weight(p) * residual(p).powi(2)));
            let s2 = dof.map_or_else(T::one, |dof| chisq / dof);

            let sb = sqrt_or_zero(s2 * sums.s / delta);
            let sa = sqrt_or_zero(s2 * sums.sxx / delta);
            let (ea, eb) = sums.propagate(points, delta, |p| p.ey.max(T::zero()));
            (sa, sb, ea, eb)
        } else {
            let ssr = kbn_sum(points.iter().map(|p| residual(p).powi(2)));
            let s2 = dof.map_or_else(T::zero, |dof| ssr / dof);

            let denom = sums.sxx - ratio_or_zero(sums.sx * sums.sx, sums.s);
            if denom > T::zero() {
                let sb = sqrt_or_zero(s2 / denom);
                let sa = sqrt_or_zero(s2 * sums.sxx / (sums.s * denom));
                let ey = s2.sqrt();
                let (ea, eb) = sums.propagate(points, delta, |_| ey);
                (sa, sb, ea, eb)
            } else {
                debug!("no spread left in x after centering, standard errors set to zero");
                (T::zero(), T::zero(), T::zero(), T::zero())
            }
        };

        let result = RegressionResult {
            a,
            b,
            sa,
            sb,
            ea,
            eb,
            r: pearson(points, &sums, weight),
            weighted,
        };
        if result.is_finite() {
            result
        } else {
            debug!("degenerate fit: error terms overflowed");
            self.degenerate_result(&sums, weighted)
        }
    }

    fn degenerate_result<T>(&self, sums: &NormalSums<T>, weighted: bool) -> RegressionResult<T>
    where
        T: Float + Default,
    {
        match self.degenerate {
            Degenerate::Zeroed => RegressionResult::default(),
            Degenerate::MeanIntercept => RegressionResult {
                a: Some(sums.means().1)
                    .filter(|a| a.is_finite())
                    .unwrap_or_else(T::zero),
                weighted,
                ..Default::default()
            },
        }
    }
}

/// Pearson correlation around the weighted means; zero when either spread is zero
fn pearson<T, W>(points: &[Point<T>], sums: &NormalSums<T>, weight: W) -> T
where
    T: Float + Default,
    W: Fn(&Point<T>) -> T,
{
    let (x_mean, y_mean) = sums.means();
    let mut cov = Kbn::default();
    let mut var_x = Kbn::default();
    let mut var_y = Kbn::default();

    for p in points {
        let w = weight(p);
        let dx = p.x - x_mean;
        let dy = p.y - y_mean;
        cov += w * dx * dy;
        var_x += w * dx * dx;
        var_y += w * dy * dy;
    }

    let (cov, var_x, var_y) = (cov.total(), var_x.total(), var_y.total());
    if var_x > T::zero() && var_y > T::zero() {
        cov / (var_x * var_y).sqrt()
    } else {
        T::zero()
    }
}

#[inline]
fn sqrt_or_zero<T: Float>(v: T) -> T {
    if v > T::zero() { v.sqrt() } else { T::zero() }
}
