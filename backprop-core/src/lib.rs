//! Reverse-mode automatic differentiation over `f32` tensors, a closed set of
//! differentiable primitives, an SGD optimizer and a training loop for small
//! classifiers.
//!
//! ```
//! use backprop_core::ops::{arithmetic::mul_op, reduction::sum_op};
//! use backprop_core::Tensor;
//!
//! # fn main() -> Result<(), backprop_core::BackpropError> {
//! let x = Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?;
//! x.requires_grad_(true)?;
//! let loss = sum_op(&mul_op(&x, &x)?)?;
//! loss.backward()?;
//! assert_eq!(x.grad_or_zeros()?.get_f32_data()?, vec![2.0, 4.0, 6.0]);
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod train;
pub mod utils;

pub use error::{BackpropError, ErrorKind};
pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
