#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;

mod errors;
pub use errors::{DatasetError, Result};

mod point;
pub use point::{Column, Point};

mod point_store;
pub use point_store::{Bounds, INITIAL_CAPACITY, PointStore, Transform};

mod summary;
pub use summary::StatisticsSummary;

mod regression;
pub use regression::{Degenerate, LinearRegression, RegressionResult, Weighting};

pub mod format;

#[cfg(feature = "std")]
pub mod fs;
#[cfg(feature = "std")]
pub use fs::load_file;
