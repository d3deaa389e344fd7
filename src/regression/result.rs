use num_traits::Float;

/// Outcome of a linear fit `y = a + b·x`.
///
/// Every field is zero when the fit is undefined (fewer than two points, no
/// spread in `x`, or sums that overflow the float range). Use [`LinearRegression`](crate::LinearRegression) to produce one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegressionResult<T> {
    /// Intercept
    pub a: T,
    /// Slope
    pub b: T,
    /// Standard error of the intercept
    pub sa: T,
    /// Standard error of the slope
    pub sb: T,
    /// Propagated measurement error of the intercept
    pub ea: T,
    /// Propagated measurement error of the slope
    pub eb: T,
    /// Pearson correlation coefficient
    pub r: T,
    /// Whether the fit used `1/ey²` weights
    pub weighted: bool,
}

impl<T: Float> RegressionResult<T> {
    /// Evaluates the fitted line at `x`
    ///
    /// # Arguments
    ///
    /// * `x` - The abscissa
    ///
    /// # Returns
    ///
    /// * `T` - `a + b·x`
    pub fn predict(&self, x: T) -> T {
        self.a + self.b * x
    }

    /// Coefficient of determination, `r²`
    pub fn r_squared(&self) -> T {
        self.r * self.r
    }

    /// Whether every numeric field is finite
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.sa, self.sb, self.ea, self.eb, self.r]
            .iter()
            .all(|v| v.is_finite())
    }
}
