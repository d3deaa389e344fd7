//! Plain-text data rows.
//!
//! A data file holds one point per line as whitespace separated numbers:
//!
//! ```text
//! x y [ey]
//! ```
//!
//! Lines whose first two fields are not numbers (headers, comments, blank lines)
//! are skipped. A missing or unparsable third field means `ey = 0`, and anything
//! after it is ignored. Rows are written back with three columns and six
//! decimals, so files produced here load unchanged.

use alloc::{format, string::String, vec::Vec};

use log::trace;
use num_traits::Float;

use crate::{Point, PointStore, Result};

/// Parses a single data row, or returns `None` when the line holds no point
///
/// # Arguments
///
/// * `line` - The text of the row
///
/// # Returns
///
/// * `Option<Point<T>>` - The point, or `None` if the first two fields are not numbers
pub fn parse_row<T: Float>(line: &str) -> Option<Point<T>> {
    let mut fields = line
        .split_whitespace()
        .map(|f| f.parse::<f64>().ok().and_then(T::from));

    let x = fields.next()??;
    let y = fields.next()??;
    let ey = fields.next().flatten().unwrap_or_else(T::zero);

    Some(Point::new(x, y, ey))
}

/// Parses every data row of `text`, in order
///
/// # Examples
///
/// ```
/// use regres::{Point, format::parse_rows};
///
/// let text = "# x y ey\n1 2\n3 4 0.5\n\nfive 6\n";
/// let points: Vec<Point<f64>> = parse_rows(text);
///
/// assert_eq!(points, [Point::new(1.0, 2.0, 0.0), Point::new(3.0, 4.0, 0.5)]);
/// ```
pub fn parse_rows<T: Float>(text: &str) -> Vec<Point<T>> {
    text.lines().filter_map(parse_row).collect()
}

/// Renders `points` as data rows, three columns per line
///
/// # Examples
///
/// ```
/// use regres::{Point, format::render_rows};
///
/// let text = render_rows(&[Point::new(1.0, 2.5, 0.0), Point::new(-3.0, 4.0, 0.125)]);
/// assert_eq!(text, "1.000000 2.500000 0.000000\n-3.000000 4.000000 0.125000\n");
/// ```
pub fn render_rows<T: Float>(points: &[Point<T>]) -> String {
    points
        .iter()
        .map(|p| {
            let [x, y, ey] = [p.x, p.y, p.ey].map(|v| v.to_f64().unwrap_or(f64::NAN));
            format!("{x:.6} {y:.6} {ey:.6}\n")
        })
        .collect()
}

impl<T> PointStore<T>
where
    T: Float + Default,
{
    /// Builds a store from data rows; the new store is not marked modified
    ///
    /// # Arguments
    ///
    /// * `text` - The data rows
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The loaded store, or [`DatasetError::Allocation`](crate::DatasetError::Allocation)
    pub fn from_text(text: &str) -> Result<Self> {
        let mut store = Self::new();
        for point in parse_rows(text) {
            store.push(point)?;
        }
        store.mark_persisted();
        trace!("loaded {} points from text", store.len());
        Ok(store)
    }

    /// Replaces the content of the store with the points in `text`.
    ///
    /// The current points are only dropped once the new content has been fully
    /// built; on failure the store is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use regres::PointStore;
    ///
    /// let mut store = PointStore::new();
    /// store.append(9.0, 9.0, 0.0)?;
    ///
    /// store.load_text("1 2 0.1\n3 4\n")?;
    /// assert_eq!(store.len(), 2);
    /// assert!(!store.is_modified());
    /// # Ok::<(), regres::DatasetError>(())
    /// ```
    pub fn load_text(&mut self, text: &str) -> Result<&mut Self> {
        *self = Self::from_text(text)?;
        Ok(self)
    }

    /// Renders the store as data rows, front to back
    pub fn to_text(&self) -> String {
        render_rows(self.as_slice())
    }
}
