use num_traits::Float;

/// A single paired measurement with an optional uncertainty on `y`.
///
/// `ey <= 0` means the uncertainty is unknown. Such a point never produces an
/// infinite weight; inside a weighted fit it simply carries no weight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T> {
    /// Abscissa
    pub x: T,
    /// Ordinate
    pub y: T,
    /// Measurement uncertainty of `y`
    pub ey: T,
}

impl<T: Float> Point<T> {
    /// Creates a new point
    ///
    /// # Arguments
    ///
    /// * `x` - The abscissa
    /// * `y` - The ordinate
    /// * `ey` - The uncertainty of `y`, `0` when unknown
    ///
    /// # Returns
    ///
    /// * `Self` - The point
    pub const fn new(x: T, y: T, ey: T) -> Self {
        Self { x, y, ey }
    }

    /// Returns `true` if the point carries a usable uncertainty on `y`
    pub fn has_error(&self) -> bool {
        self.ey > T::zero()
    }

    /// Returns the value stored in `column`
    ///
    /// # Arguments
    ///
    /// * `column` - The column to read
    ///
    /// # Returns
    ///
    /// * `T` - The `x` or `y` value of the point
    pub const fn get(&self, column: Column) -> T {
        match column {
            Column::X => self.x,
            Column::Y => self.y,
        }
    }

    /// Returns a mutable reference to the value stored in `column`
    pub const fn get_mut(&mut self, column: Column) -> &mut T {
        match column {
            Column::X => &mut self.x,
            Column::Y => &mut self.y,
        }
    }
}

/// Selects one of the two transformable columns of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The abscissa column
    X,
    /// The ordinate column
    Y,
}
