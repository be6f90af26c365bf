//! numerical trait constraints
use ndarray::ScalarOperand;
use ndarray_linalg::Lapack;
use std::fmt::Debug;

/// The floating-point types the diagnostics engine runs on. Both
/// `num_traits::Float` and `Lapack` define methods like `abs` and `sqrt`, so
/// generic code calls those through `num_traits::Float::` explicitly.
pub trait Float: Sized + num_traits::Float + Lapack + ScalarOperand + Debug {
    /// Lossless-enough conversion of a count into the float type.
    fn from_count(n: usize) -> Self {
        // every integer a design matrix dimension can take is representable
        <Self as num_traits::NumCast>::from(n)
            .unwrap_or_else(<Self as num_traits::Float>::infinity)
    }

    /// Conversion of a literal constant.
    fn lit(x: f64) -> Self {
        <Self as num_traits::NumCast>::from(x).unwrap_or_else(<Self as num_traits::Float>::nan)
    }
}

impl Float for f32 {}
impl Float for f64 {}
