use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;
use std::iter::Sum;

/// Float types the numeric kernels (matmul, transpose, log-sum-exp) are generic over.
///
/// Tensors store `f32`; the gradient checker and a few reductions run the same
/// kernels in `f64` for precision.
pub trait Numeric: Float + NumAssignOps + Sum + Debug + Send + Sync + 'static {
    /// Conversion from the `f32` storage type.
    fn from_storage(value: f32) -> Self;
    /// Rounding conversion back to `f32` storage.
    fn to_storage(self) -> f32;
}

impl Numeric for f32 {
    fn from_storage(value: f32) -> Self {
        value
    }
    fn to_storage(self) -> f32 {
        self
    }
}

impl Numeric for f64 {
    fn from_storage(value: f32) -> Self {
        value as f64
    }
    fn to_storage(self) -> f32 {
        self as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot<T: Numeric>(a: &[T], b: &[T]) -> T {
        a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
    }

    #[test]
    fn test_kernels_accept_f32_and_f64() {
        assert_eq!(dot(&[1.0f32, 2.0], &[3.0, 4.0]), 11.0);
        assert_eq!(dot(&[1.0f64, 2.0], &[3.0, 4.0]), 11.0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(<f64 as Numeric>::from_storage(0.5), 0.5f64);
        assert_eq!(Numeric::to_storage(0.25f64), 0.25f32);
    }
}
