//! utility functions for internal library use

use ndarray::{Array2, ArrayView2};
use num_traits::identities::One;

/// Prepend the input with a column of ones.
/// Used when the caller's design matrix does not already carry the constant
/// intercept column.
pub fn one_pad<T>(data: ArrayView2<T>) -> Array2<T>
where
    T: Copy + One,
{
    Array2::from_shape_fn((data.nrows(), data.ncols() + 1), |(i, j)| {
        if j == 0 {
            T::one()
        } else {
            data[[i, j - 1]]
        }
    })
}

/// Evenly spaced sample points covering `[lo, hi]` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|i| if i + 1 == n { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}

/// The (min, max) of the finite values, or `None` if there are none.
pub fn finite_range<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
