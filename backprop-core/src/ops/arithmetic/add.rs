// src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::{apply_binary_broadcast, attach_grad_fn};
use crate::tensor::Tensor;

/// Performs element-wise addition `a + b` with NumPy-style broadcasting.
///
/// # Errors
/// `BroadcastError` if the shapes are not broadcast-compatible.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, BackpropError> {
    let (output_data, output_shape) = apply_binary_broadcast(a, b, |x, y| x + y)?;
    let output = Tensor::new(output_data, output_shape)?;
    if a.requires_grad() || b.requires_grad() {
        attach_grad_fn(
            &output,
            BackwardOp::Add {
                a: a.clone(),
                b: b.clone(),
            },
        );
    }
    Ok(output)
}

/// d(a+b)/da = d(a+b)/db = 1: the upstream gradient, summed over each operand's
/// broadcast dimensions.
pub(crate) fn add_backward(a: &Tensor, b: &Tensor, grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let grad_a = grad_output.reduce_to_shape(&a.shape())?;
    let grad_b = grad_output.reduce_to_shape(&b.shape())?;
    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
