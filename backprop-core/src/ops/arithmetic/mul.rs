// src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::{apply_binary_broadcast, attach_grad_fn};
use crate::tensor::broadcast_utils::{expand_data, reduce_data};
use crate::tensor::Tensor;

/// Performs element-wise multiplication `a * b` with broadcasting.
///
/// # Errors
/// `BroadcastError` if the shapes are not broadcast-compatible.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, BackpropError> {
    let (output_data, output_shape) = apply_binary_broadcast(a, b, |x, y| x * y)?;
    let output = Tensor::new(output_data, output_shape)?;
    if a.requires_grad() || b.requires_grad() {
        attach_grad_fn(
            &output,
            BackwardOp::Mul {
                a: a.clone(),
                b: b.clone(),
            },
        );
    }
    Ok(output)
}

/// grad_a = reduce(grad * b), grad_b = reduce(grad * a).
pub(crate) fn mul_backward(a: &Tensor, b: &Tensor, grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    let output_shape = grad_output.shape();
    let grad = grad_output.get_f32_data()?;

    let a_expanded = expand_data(&a.get_f32_data()?, &a_shape, &output_shape)?;
    let b_expanded = expand_data(&b.get_f32_data()?, &b_shape, &output_shape)?;

    let grad_times_b: Vec<f32> = grad.iter().zip(b_expanded.iter()).map(|(g, y)| g * y).collect();
    let grad_times_a: Vec<f32> = grad.iter().zip(a_expanded.iter()).map(|(g, x)| g * x).collect();

    let grad_a = Tensor::new(reduce_data(&grad_times_b, &output_shape, &a_shape)?, a_shape)?;
    let grad_b = Tensor::new(reduce_data(&grad_times_a, &output_shape, &b_shape)?, b_shape)?;
    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
