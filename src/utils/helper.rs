use num_traits::Float;

use crate::Kbn;

/// Returns the compensated sum of the values produced by `iter`
///
/// # Arguments
///
/// * `iter` - The values to accumulate
///
/// # Returns
///
/// * `T` - The Kahan-Babuska-Neumaier total
#[inline]
pub fn kbn_sum<T, I>(iter: I) -> T
where
    T: Float + Default,
    I: IntoIterator<Item = T>,
{
    let mut sum = Kbn::default();
    for v in iter {
        sum += v;
    }
    sum.total()
}

/// Divides `num` by `den`, returning zero instead of a non-finite quotient when
/// `den` is zero.
#[inline]
pub fn ratio_or_zero<T: Float>(num: T, den: T) -> T {
    if den.is_zero() { T::zero() } else { num / den }
}

/// Converts a count into `T`, falling back to zero when it is not representable
#[inline]
pub fn count_as<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::zero)
}
