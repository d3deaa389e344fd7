use num_traits::Float;

use crate::{Kbn, Point, helper::ratio_or_zero};

/// Weight of a point inside a weighted fit: `1/ey²`, or zero when the point
/// carries no uncertainty. Never infinite.
#[inline]
pub(crate) fn inverse_variance<T: Float>(p: &Point<T>) -> T {
    if p.has_error() {
        (p.ey * p.ey).recip().min(T::max_value())
    } else {
        T::zero()
    }
}

/// Weighted sums of the normal equations of `y = a + b·x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NormalSums<T> {
    /// `Σw`
    pub s: T,
    /// `Σw·x`
    pub sx: T,
    /// `Σw·y`
    pub sy: T,
    /// `Σw·x²`
    pub sxx: T,
    /// `Σw·x·y`
    pub sxy: T,
}

impl<T: Float + Default> NormalSums<T> {
    /// Accumulates the sums over `points`, weighting each point with `weight`
    pub fn accumulate<W>(points: &[Point<T>], weight: W) -> Self
    where
        W: Fn(&Point<T>) -> T,
    {
        let mut s = Kbn::default();
        let mut sx = Kbn::default();
        let mut sy = Kbn::default();
        let mut sxx = Kbn::default();
        let mut sxy = Kbn::default();

        for p in points {
            let w = weight(p);
            s += w;
            sx += w * p.x;
            sy += w * p.y;
            sxx += w * p.x * p.x;
            sxy += w * p.x * p.y;
        }

        Self {
            s: s.total(),
            sx: sx.total(),
            sy: sy.total(),
            sxx: sxx.total(),
            sxy: sxy.total(),
        }
    }

    /// Determinant of the normal matrix, `S·Sxx − Sx²`
    pub fn determinant(&self) -> T {
        self.s * self.sxx - self.sx * self.sx
    }

    /// Solves for `(a, b)` by Cramer's rule; `delta` must be non-zero
    pub fn solve(&self, delta: T) -> (T, T) {
        let b = (self.s * self.sxy - self.sx * self.sy) / delta;
        let a = (self.sxx * self.sy - self.sx * self.sxy) / delta;
        (a, b)
    }

    /// Weighted means of `x` and `y`
    pub fn means(&self) -> (T, T) {
        (ratio_or_zero(self.sx, self.s), ratio_or_zero(self.sy, self.s))
    }

    /// First-order propagation of per-point `y` uncertainties into `(ea, eb)`.
    ///
    /// Each point contributes `|(S·x − Sx)/delta|·ey` to `ea` and
    /// `|(Sxx − x·Sx)/delta|·ey` to `eb`.
    pub fn propagate<E>(&self, points: &[Point<T>], delta: T, ey: E) -> (T, T)
    where
        E: Fn(&Point<T>) -> T,
    {
        let mut ea = Kbn::default();
        let mut eb = Kbn::default();

        for p in points {
            let e = ey(p);
            let coef_a = ((self.s * p.x - self.sx) / delta).abs();
            let coef_b = ((self.sxx - p.x * self.sx) / delta).abs();
            ea += coef_a * e;
            eb += coef_b * e;
        }

        (ea.total(), eb.total())
    }
}

#[cfg(test)]
mod tests {
    use super::{NormalSums, inverse_variance};
    use crate::Point;

    #[test]
    fn test_inverse_variance() {
        assert_eq!(inverse_variance(&Point::new(0.0, 0.0, 0.5)), 4.0);
        assert_eq!(inverse_variance(&Point::new(0.0, 0.0, 0.0)), 0.0);
        assert_eq!(inverse_variance(&Point::new(0.0, 0.0, -2.0)), 0.0);
        assert!(inverse_variance(&Point::<f64>::new(0.0, 0.0, 1e-200)).is_finite());
    }

    #[test]
    fn test_accumulate_unit_weights() {
        let points = [
            Point::new(0.0, 2.0, 0.0),
            Point::new(1.0, 5.0, 0.0),
            Point::new(2.0, 8.0, 0.0),
            Point::new(3.0, 11.0, 0.0),
        ];
        let sums = NormalSums::accumulate(&points, |_| 1.0);
        assert_eq!(
            sums,
            NormalSums {
                s: 4.0,
                sx: 6.0,
                sy: 26.0,
                sxx: 14.0,
                sxy: 54.0
            }
        );
        assert_eq!(sums.determinant(), 20.0);
        assert_eq!(sums.solve(20.0), (2.0, 3.0));
        assert_eq!(sums.means(), (1.5, 6.5));
    }

    #[test]
    fn test_propagate() {
        let points = [Point::new(0.0, 1.0, 0.5), Point::new(1.0, 3.0, 0.5)];
        let sums = NormalSums::accumulate(&points, inverse_variance);
        let delta = sums.determinant();
        assert_eq!(delta, 16.0);

        let (ea, eb) = sums.propagate(&points, delta, |p| p.ey);
        assert_eq!(ea, 0.25);
        assert_eq!(eb, 0.125);
    }
}
